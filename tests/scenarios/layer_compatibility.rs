//! Scenario: a board-specific layer in a multi-board solution.

use ctxplan::application::ResolveOptions;
use ctxplan::domain::entities::ResolveError;
use ctxplan::domain::ports::BuildIndexRepository;

use crate::common::{INVENTORY, NET_LAYER, SOLUTION};
use crate::Workspace;

#[test]
fn filtered_layer_reference_keeps_every_context_buildable() {
    let ws = Workspace::standard();
    let result = ws.resolve(&ResolveOptions::new().with_pattern("App")).unwrap();

    assert!(result.succeeded(), "{:?}", result.report.failed);
    let layers = |id: &str| {
        result
            .report
            .items
            .iter()
            .find(|i| i.identifier.to_string() == id)
            .map(|i| i.layer_ids().map(String::from).collect::<Vec<_>>())
            .unwrap()
    };
    assert_eq!(layers("App.Debug+BoardA"), ["Net"]);
    assert!(layers("App.Debug+BoardB").is_empty());
}

#[test]
fn unfiltered_layer_fails_only_the_unsupported_board() {
    let solution = SOLUTION.replace("          for-context: [+BoardA]\n", "");
    let ws = Workspace::new(&solution, INVENTORY, &[("Net.clayer.yml", NET_LAYER)]);
    let result = ws.resolve(&ResolveOptions::new().with_pattern("App")).unwrap();

    let failed: Vec<String> = result.report.failed.iter().map(ToString::to_string).collect();
    assert_eq!(failed, ["App.Debug+BoardB", "App.Release+BoardB"]);
    let item = result
        .report
        .items
        .iter()
        .find(|i| i.identifier.to_string() == "App.Debug+BoardB")
        .unwrap();
    assert!(matches!(
        item.errors[0],
        ResolveError::LayerWiringConflict { ref layer, .. } if layer == "Net"
    ));

    // Successful contexts are still recorded, failed ones get no fingerprint.
    let index = ws.index_repo().load().unwrap().unwrap();
    assert!(index.contexts["App.Debug+BoardA"].fingerprint.is_some());
    assert!(index.contexts["App.Debug+BoardB"].fingerprint.is_none());
}

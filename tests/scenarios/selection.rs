//! Scenario: expanding the solution and narrowing it with filters.

use ctxplan::application::{list_contexts, ResolveOptions};
use ctxplan::domain::services::SelectionRequest;
use ctxplan::domain::value_objects::ContextOrder;

use crate::Workspace;

fn ids(contexts: &[ctxplan::ContextId]) -> Vec<String> {
    contexts.iter().map(ToString::to_string).collect()
}

#[test]
fn every_project_build_and_target_combination_is_a_context() {
    let ws = Workspace::standard();
    let contexts = list_contexts(&ws.solution, &SelectionRequest::all(), None).unwrap();
    assert_eq!(
        ids(&contexts),
        [
            "App.Debug+BoardA",
            "App.Debug+BoardB",
            "App.Release+BoardA",
            "App.Release+BoardB",
            "Boot.Debug+BoardA",
            "Boot.Debug+BoardB",
            "Boot.Release+BoardA",
            "Boot.Release+BoardB",
        ]
    );
}

#[test]
fn filter_selects_matching_contexts_only() {
    let ws = Workspace::standard();
    let request = SelectionRequest::all().with_pattern("App.Debug");
    let contexts = list_contexts(&ws.solution, &request, None).unwrap();
    assert_eq!(ids(&contexts), ["App.Debug+BoardA", "App.Debug+BoardB"]);
}

#[test]
fn target_type_pattern_spans_projects() {
    let ws = Workspace::standard();
    let request = SelectionRequest::all()
        .with_pattern("+BoardB")
        .with_order(ContextOrder::Yml);
    let contexts = list_contexts(&ws.solution, &request, None).unwrap();
    assert_eq!(contexts.len(), 4);
    assert!(contexts.iter().all(|c| c.target_type() == Some("BoardB")));
}

#[test]
fn unmatched_filter_is_reported_not_fatal() {
    let ws = Workspace::standard();
    let options = ResolveOptions::new()
        .with_pattern("Boot.Debug")
        .with_pattern("Loader")
        .dry_run();
    let result = ws.resolve(&options).unwrap();

    assert_eq!(result.report.items.len(), 2);
    assert_eq!(result.report.missing_filters, ["Loader"]);
    assert!(result.succeeded());
}

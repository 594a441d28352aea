use super::*;
use crate::domain::entities::Connection;

fn ctx(s: &str) -> ContextId {
    ContextId::parse(s).unwrap()
}

fn ids(layers: &[Layer]) -> Vec<&str> {
    layers.iter().map(|l| l.id.as_str()).collect()
}

#[test]
fn referenced_layer_for_other_target_is_a_conflict() {
    let declared = vec![Layer::new("Net").for_target_type("BoardA")];
    let resolver = LayerCompatibilityResolver::new(&declared, &[]);

    let report = resolver.resolve(&ctx("App.Debug+BoardA"), &["Net"]);
    assert!(report.is_buildable());
    assert_eq!(ids(&report.compatible), ["Net"]);

    let report = resolver.resolve(&ctx("App.Debug+BoardB"), &["Net"]);
    assert_eq!(report.referenced, ["Net"]);
    assert!(report.compatible.is_empty());
    assert!(!report.is_buildable());
    assert_eq!(
        report.conflicts[0].kind,
        ConflictKind::IncompatibleTarget {
            target: "BoardB".to_string(),
            alternatives: 0
        }
    );
}

#[test]
fn unknown_reference_is_fatal() {
    let resolver = LayerCompatibilityResolver::new(&[], &[]);
    let report = resolver.resolve(&ctx("App"), &["Ghost"]);
    assert_eq!(report.conflicts, [LayerConflict::new("Ghost", ConflictKind::Unknown)]);
    assert!(!report.is_buildable());
}

#[test]
fn missing_provider_is_pulled_from_the_search_path() {
    let declared = vec![Layer::new("App").with_connection(Connection::consumes("STDIO"))];
    let discovered = vec![
        Layer::new("Board")
            .for_target_type("BoardA")
            .with_connection(Connection::provides("STDIO"))
            .with_connection(Connection::consumes("CMSIS_Driver")),
        Layer::new("Drivers").with_connection(Connection::provides("CMSIS_Driver")),
        Layer::new("Unused").with_connection(Connection::provides("Audio")),
    ];
    let resolver = LayerCompatibilityResolver::new(&declared, &discovered);

    let report = resolver.resolve(&ctx("App+BoardA"), &["App"]);
    assert!(report.is_buildable(), "{:?}", report.conflicts);
    assert_eq!(ids(&report.compatible), ["App", "Board", "Drivers"]);
    assert_eq!(report.available, ["App", "Board", "Drivers", "Unused"]);
}

#[test]
fn provider_for_other_target_leaves_slot_unsatisfied() {
    let declared = vec![Layer::new("App").with_connection(Connection::consumes("STDIO"))];
    let discovered = vec![Layer::new("Board")
        .for_target_type("BoardA")
        .with_connection(Connection::provides("STDIO"))];
    let resolver = LayerCompatibilityResolver::new(&declared, &discovered);

    let report = resolver.resolve(&ctx("App+BoardB"), &["App"]);
    assert_eq!(
        report.conflicts,
        [LayerConflict::new(
            "App",
            ConflictKind::UnsatisfiedSlot {
                slot: "STDIO".to_string()
            }
        )]
    );
    assert!(report.compatible.is_empty());
}

#[test]
fn two_discoverable_providers_are_ambiguous() {
    let declared = vec![Layer::new("App").with_connection(Connection::consumes("STDIO"))];
    let discovered = vec![
        Layer::new("UART").with_connection(Connection::provides("STDIO")),
        Layer::new("SWO").with_connection(Connection::provides("STDIO")),
    ];
    let resolver = LayerCompatibilityResolver::new(&declared, &discovered);

    let report = resolver.resolve(&ctx("App"), &["App"]);
    assert_eq!(
        report.conflicts[0].to_string(),
        "layer 'App' consumes 'STDIO', which is provided by more than one layer: UART, SWO"
    );
}

#[test]
fn two_referenced_providers_are_ambiguous() {
    let declared = vec![
        Layer::new("App").with_connection(Connection::consumes("STDIO")),
        Layer::new("UART").with_connection(Connection::provides("STDIO")),
        Layer::new("SWO").with_connection(Connection::provides("STDIO")),
    ];
    let resolver = LayerCompatibilityResolver::new(&declared, &[]);

    let report = resolver.resolve(&ctx("App"), &["App", "UART", "SWO"]);
    assert!(!report.is_buildable());
    assert_eq!(ids(&report.compatible), ["UART", "SWO"]);
}

#[test]
fn a_layer_does_not_provide_for_itself() {
    let declared = vec![Layer::new("Loop")
        .with_connection(Connection::provides("X"))
        .with_connection(Connection::consumes("X"))];
    let resolver = LayerCompatibilityResolver::new(&declared, &[]);
    let report = resolver.resolve(&ctx("App"), &["Loop"]);
    assert!(!report.is_buildable());
}

#[test]
fn incompatible_layer_is_replaced_by_single_category_alternative() {
    let declared = vec![Layer::new("BoardA-Layer")
        .with_category("Board")
        .for_target_type("BoardA")];
    let discovered = vec![
        Layer::new("BoardB-Layer")
            .with_category("Board")
            .for_target_type("BoardB"),
        Layer::new("Shield").with_category("Shield"),
    ];
    let resolver = LayerCompatibilityResolver::new(&declared, &discovered);

    let report = resolver.resolve(&ctx("App+BoardB"), &["BoardA-Layer"]);
    assert!(report.is_buildable());
    assert_eq!(ids(&report.compatible), ["BoardB-Layer"]);
    assert_eq!(
        report.conflicts[0].kind,
        ConflictKind::Substituted {
            by: "BoardB-Layer".to_string(),
            category: "Board".to_string()
        }
    );
}

#[test]
fn several_category_alternatives_are_a_conflict() {
    let declared = vec![Layer::new("A").with_category("Board").for_target_type("BoardA")];
    let discovered = vec![
        Layer::new("B1").with_category("Board"),
        Layer::new("B2").with_category("Board"),
    ];
    let resolver = LayerCompatibilityResolver::new(&declared, &discovered);
    let report = resolver.resolve(&ctx("App+BoardB"), &["A"]);
    assert!(!report.is_buildable());
    assert!(matches!(
        report.conflicts[0].kind,
        ConflictKind::IncompatibleTarget { alternatives: 2, .. }
    ));
}

#[test]
fn declared_layers_shadow_discovered_ones() {
    let declared = vec![Layer::new("Net").for_target_type("BoardA")];
    let discovered = vec![Layer::new("Net")];
    let resolver = LayerCompatibilityResolver::new(&declared, &discovered);
    assert_eq!(resolver.pool().len(), 1);
    assert!(!resolver.resolve(&ctx("App+BoardB"), &["Net"]).is_buildable());
}

#[test]
fn consumer_of_a_broken_provider_is_not_compatible() {
    let declared = vec![
        Layer::new("App").with_connection(Connection::consumes("NET")),
        Layer::new("Net")
            .with_connection(Connection::provides("NET"))
            .with_connection(Connection::consumes("RTOS")),
    ];
    let resolver = LayerCompatibilityResolver::new(&declared, &[]);

    let report = resolver.resolve(&ctx("App"), &["App", "Net"]);
    assert!(!report.is_buildable());
    assert!(report.compatible.is_empty());
    assert_eq!(
        report.conflicts,
        [
            LayerConflict::new(
                "Net",
                ConflictKind::UnsatisfiedSlot {
                    slot: "RTOS".to_string()
                }
            ),
            LayerConflict::new(
                "App",
                ConflictKind::UnsatisfiedSlot {
                    slot: "NET".to_string()
                }
            ),
        ]
    );
}

#[test]
fn breakage_propagates_along_the_whole_chain() {
    let declared = vec![
        Layer::new("App").with_connection(Connection::consumes("STDIO")),
        Layer::new("Board")
            .with_connection(Connection::provides("STDIO"))
            .with_connection(Connection::consumes("CMSIS_Driver")),
        Layer::new("Drivers")
            .with_connection(Connection::provides("CMSIS_Driver"))
            .with_connection(Connection::consumes("Clock")),
        Layer::new("Extra").with_connection(Connection::provides("Audio")),
    ];
    let resolver = LayerCompatibilityResolver::new(&declared, &[]);

    let report = resolver.resolve(&ctx("App"), &["App", "Board", "Drivers", "Extra"]);
    assert_eq!(ids(&report.compatible), ["Extra"]);
    let broken: Vec<&str> = report.conflicts.iter().map(|c| c.layer.as_str()).collect();
    assert_eq!(broken, ["Drivers", "Board", "App"]);
}

//! Property tests for context identifiers and pattern matching.

use proptest::prelude::*;

use ctxplan::ContextId;

fn name() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Za-z0-9_-]{1,12}").unwrap()
}

fn concrete() -> impl Strategy<Value = ContextId> {
    (name(), proptest::option::of(name()), proptest::option::of(name())).prop_map(
        |(project, build, target)| {
            let mut id = ContextId::new(project);
            if let Some(build) = build {
                id = id.with_build_type(build);
            }
            if let Some(target) = target {
                id = id.with_target_type(target);
            }
            id
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Display and parse are inverse on well-formed identifiers.
    #[test]
    fn property_context_id_round_trips(id in concrete()) {
        let text = id.to_string();
        prop_assert_eq!(ContextId::parse(&text).unwrap(), id);
    }

    /// PROPERTY: Every identifier matches itself and the empty-axis pattern.
    #[test]
    fn property_context_id_matches_itself(id in concrete()) {
        prop_assert!(id.matches(&id));
        prop_assert!(ContextId::any().matches(&id));
    }

    /// PROPERTY: Dropping an axis from a pattern never loses a match.
    #[test]
    fn property_wider_pattern_still_matches(id in concrete()) {
        let project_only = ContextId::new(id.project());
        prop_assert!(project_only.matches(&id));
        if let Some(target) = id.target_type() {
            prop_assert!(ContextId::for_target_type(target).matches(&id));
        }
    }

    /// PROPERTY: `ContextId::parse` never panics on arbitrary input.
    #[test]
    fn property_context_id_parse_never_panics(text in "(?s).{0,64}") {
        let _ = ContextId::parse(&text);
    }

    /// PROPERTY: Identifiers sort the same way as their (project, build, target) tuples.
    #[test]
    fn property_ordering_is_field_wise(a in concrete(), b in concrete()) {
        let key = |id: &ContextId| {
            (
                id.project().to_string(),
                id.build_type().map(str::to_string),
                id.target_type().map(str::to_string),
            )
        };
        prop_assert_eq!(a.cmp(&b), key(&a).cmp(&key(&b)));
    }
}

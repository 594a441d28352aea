//! Property tests for version ranges.

use proptest::prelude::*;
use semver::Version;

use ctxplan::domain::value_objects::VersionRange;

fn version() -> impl Strategy<Value = Version> {
    (0u64..20, 0u64..20, 0u64..20).prop_map(|(major, minor, patch)| Version::new(major, minor, patch))
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: A pin contains exactly its own version.
    #[test]
    fn property_pin_is_exact(pinned in version(), other in version()) {
        let range = VersionRange::parse(&format!("@{}", pinned)).unwrap();
        prop_assert_eq!(range.pinned(), Some(&pinned));
        prop_assert_eq!(range.contains(&other), other == pinned);
    }

    /// PROPERTY: A bare version is a lower bound.
    #[test]
    fn property_bare_version_is_a_minimum(min in version(), other in version()) {
        let range = VersionRange::parse(&min.to_string()).unwrap();
        prop_assert_eq!(range.contains(&other), other >= min);
    }

    /// PROPERTY: `min:max` contains both bounds and nothing outside them.
    #[test]
    fn property_interval_is_inclusive(a in version(), b in version(), other in version()) {
        let (min, max) = if a <= b { (a, b) } else { (b, a) };
        let range = VersionRange::parse(&format!("{}:{}", min, max)).unwrap();
        prop_assert!(range.contains(&min));
        prop_assert!(range.contains(&max));
        prop_assert_eq!(range.contains(&other), other >= min && other <= max);
    }

    /// PROPERTY: The empty range admits everything.
    #[test]
    fn property_any_contains_everything(v in version()) {
        prop_assert!(VersionRange::any().contains(&v));
    }

    /// PROPERTY: `VersionRange::parse` never panics on arbitrary input.
    #[test]
    fn property_version_range_parse_never_panics(text in "(?s).{0,48}") {
        let _ = VersionRange::parse(&text);
    }
}

//! Property tests for pack version selection under each load policy.

use proptest::prelude::*;
use semver::Version;

use ctxplan::domain::entities::{BuildIndex, PackId, PackRequirement};
use ctxplan::domain::services::PackResolver;
use ctxplan::domain::value_objects::{LoadPacksPolicy, VersionRange};
use ctxplan::infrastructure::StaticInventory;

fn version() -> impl Strategy<Value = Version> {
    (0u64..4, 0u64..4, 0u64..3).prop_map(|(major, minor, patch)| Version::new(major, minor, patch))
}

fn installed() -> impl Strategy<Value = Vec<Version>> {
    proptest::collection::vec(version(), 0..8)
}

fn inventory(versions: &[Version]) -> StaticInventory {
    versions.iter().fold(StaticInventory::default(), |inv, v| {
        inv.with_pack(PackId::new("Vendor", "Pack"), v.clone())
    })
}

fn chosen(versions: &[Version], policy: LoadPacksPolicy, range: &str, lock: Option<&Version>) -> Vec<Version> {
    let inventory = inventory(versions);
    let index = lock.map(|v| BuildIndex::new().with_locked_pack(PackId::new("Vendor", "Pack"), v.clone()));
    let requirement = PackRequirement::new(PackId::new("Vendor", "Pack"), VersionRange::parse(range).unwrap());
    PackResolver::new(&inventory, policy)
        .with_snapshot(index.as_ref())
        .resolve([&requirement])
        .packs
        .into_iter()
        .filter_map(|p| p.version)
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 96,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: `latest` picks the newest installed version in range.
    #[test]
    fn property_latest_is_the_maximum(versions in installed(), min in version()) {
        let range = min.to_string();
        let expected = versions.iter().filter(|v| **v >= min).max().cloned();
        let picked = chosen(&versions, LoadPacksPolicy::Latest, &range, None);
        prop_assert_eq!(picked.first().cloned(), expected);
        prop_assert!(picked.len() <= 1);
    }

    /// PROPERTY: `all` picks every installed version in range, once, ascending.
    #[test]
    fn property_all_is_every_version_in_range(versions in installed(), min in version()) {
        let mut expected: Vec<Version> = versions.iter().filter(|v| **v >= min).cloned().collect();
        expected.sort();
        expected.dedup();
        prop_assert_eq!(chosen(&versions, LoadPacksPolicy::All, &min.to_string(), None), expected);
    }

    /// PROPERTY: `default` keeps a locked version while it is still installed.
    #[test]
    fn property_default_honours_an_installed_lock(versions in installed(), pick in any::<prop::sample::Index>()) {
        prop_assume!(!versions.is_empty());
        let locked = pick.get(&versions).clone();
        prop_assert_eq!(
            chosen(&versions, LoadPacksPolicy::Default, "", Some(&locked)),
            vec![locked]
        );
    }

    /// PROPERTY: Every chosen version satisfies the range.
    #[test]
    fn property_chosen_versions_are_in_range(
        versions in installed(),
        a in version(),
        b in version(),
        policy in prop_oneof![
            Just(LoadPacksPolicy::Default),
            Just(LoadPacksPolicy::Latest),
            Just(LoadPacksPolicy::All),
            Just(LoadPacksPolicy::Required),
        ],
    ) {
        let (min, max) = if a <= b { (a, b) } else { (b, a) };
        let range = format!("{}:{}", min, max);
        for v in chosen(&versions, policy, &range, None) {
            prop_assert!(v >= min && v <= max);
        }
    }
}

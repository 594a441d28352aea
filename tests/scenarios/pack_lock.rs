//! Scenario: pack versions across runs, with and without the lock.

use semver::Version;

use ctxplan::application::ResolveOptions;
use ctxplan::domain::entities::{PackId, ResolveError};
use ctxplan::domain::ports::BuildIndexRepository;
use ctxplan::domain::value_objects::LoadPacksPolicy;
use ctxplan::infrastructure::StaticInventory;

use crate::Workspace;

fn packs_of(ws: &Workspace, options: &ResolveOptions) -> Vec<String> {
    let result = ws.resolve(options).unwrap();
    let item = &result.report.items[0];
    item.resolved_packs.iter().map(ToString::to_string).collect()
}

fn boot_debug_a() -> ResolveOptions {
    ResolveOptions::new().with_pattern("Boot.Debug+BoardA")
}

#[test]
fn policy_decides_which_installed_versions_are_loaded() {
    let ws = Workspace::standard();

    assert_eq!(
        packs_of(&ws, &boot_debug_a().with_policy(LoadPacksPolicy::Latest).dry_run()),
        ["Vendor::Pack@2.0.0"]
    );
    assert_eq!(
        packs_of(&ws, &boot_debug_a().with_policy(LoadPacksPolicy::All).dry_run()),
        ["Vendor::Pack@1.0.0", "Vendor::Pack@1.2.0", "Vendor::Pack@2.0.0"]
    );
}

#[test]
fn default_policy_keeps_the_locked_version() {
    let ws = Workspace::standard();
    let mut index = ctxplan::domain::entities::BuildIndex::new()
        .with_locked_pack(PackId::new("Vendor", "Pack"), Version::new(1, 0, 0));
    index.touch(chrono::Utc::now());
    ws.index_repo().save(&index).unwrap();

    assert_eq!(packs_of(&ws, &boot_debug_a()), ["Vendor::Pack@1.0.0"]);
    assert_eq!(
        packs_of(&ws, &boot_debug_a().with_policy(LoadPacksPolicy::Latest)),
        ["Vendor::Pack@2.0.0"]
    );
}

#[test]
fn first_run_locks_and_later_runs_reuse_the_lock() {
    let mut ws = Workspace::standard();
    assert_eq!(packs_of(&ws, &boot_debug_a()), ["Vendor::Pack@2.0.0"]);

    let locked = ws.index_repo().load().unwrap().unwrap();
    assert_eq!(
        locked.locked_versions(&PackId::new("Vendor", "Pack")).collect::<Vec<_>>(),
        [&Version::new(2, 0, 0)]
    );

    // A newer version appears; the lock still wins under the default policy.
    ws.inventory = std::mem::take(&mut ws.inventory)
        .with_pack(PackId::new("Vendor", "Pack"), Version::new(2, 1, 0));
    assert_eq!(packs_of(&ws, &boot_debug_a()), ["Vendor::Pack@2.0.0"]);
}

#[test]
fn frozen_run_fails_on_drift_and_keeps_the_index() {
    let mut ws = Workspace::standard();
    ws.resolve(&boot_debug_a()).unwrap();
    let before = ws.index_repo().load().unwrap().unwrap();

    // The locked 2.0.0 is uninstalled.
    ws.inventory = StaticInventory::from_yaml_str(
        &crate::common::INVENTORY.replace("version: 2.0.0", "version: 1.1.0"),
        std::path::Path::new("inventory.yml"),
    )
    .unwrap();

    let result = ws.resolve(&boot_debug_a().with_frozen(true)).unwrap();
    assert!(!result.succeeded());
    assert!(matches!(
        result.report.items[0].errors[0],
        ResolveError::PackVersionDrift { .. }
    ));

    let after = ws.index_repo().load().unwrap().unwrap();
    assert_eq!(after.packs, before.packs);
}

#[test]
fn frozen_run_without_an_index_is_rejected() {
    let ws = Workspace::standard();
    let err = ws.resolve(&boot_debug_a().with_frozen(true)).unwrap_err();
    assert!(format!("{:#}", err).contains("no build index exists"));
}

#[test]
fn unchanged_inputs_give_unchanged_fingerprints() {
    let ws = Workspace::standard();
    ws.resolve(&ResolveOptions::new()).unwrap();
    let first = ws.index_repo().load().unwrap().unwrap();
    ws.resolve(&ResolveOptions::new()).unwrap();
    let second = ws.index_repo().load().unwrap().unwrap();

    assert!(!first.contexts.is_empty());
    for (context, entry) in &first.contexts {
        assert!(entry.fingerprint.is_some(), "{} has no fingerprint", context);
        assert_eq!(entry.fingerprint, second.contexts[context].fingerprint);
    }
}

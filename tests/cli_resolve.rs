//! Integration tests for `ctxplan resolve`

mod common;

use common::TestEnv;

#[test]
fn resolve_prints_one_line_per_context() {
    let env = TestEnv::new();
    let result = env.run(&["resolve", "demo.csolution.yml", "-c", "Boot", "-L", "layers"]);

    assert!(result.success, "stderr: {}", result.stderr);
    insta::assert_snapshot!(result.stdout, @r"
    ✓ Boot.Debug+BoardA
    ✓ Boot.Debug+BoardB
    ✓ Boot.Release+BoardA
    ✓ Boot.Release+BoardB
    4 of 4 contexts resolved
    ");
}

#[test]
fn resolve_processes_contexts_in_declaration_order() {
    let env = TestEnv::new();
    env.write(
        "demo.csolution.yml",
        r#"
solution:
  compiler: GCC
  build-types:
    - type: Release
    - type: Debug
  target-types:
    - type: BoardA
      board: Kit-A
  projects:
    - name: Boot
    - name: App
"#,
    );
    let result = env.run(&["resolve", "demo.csolution.yml"]);

    assert!(result.success, "stderr: {}", result.stderr);
    insta::assert_snapshot!(result.stdout, @r"
    ✓ Boot.Release+BoardA
    ✓ Boot.Debug+BoardA
    ✓ App.Release+BoardA
    ✓ App.Debug+BoardA
    4 of 4 contexts resolved
    ");
}

#[test]
fn resolve_writes_the_build_index() {
    let env = TestEnv::new();
    let result = env.run(&["resolve", "demo.csolution.yml", "-L", "layers"]);
    assert!(result.success, "stderr: {}", result.stderr);

    let index = env.read("demo.cbuild-idx.toml").expect("build index written");
    assert!(index.contains("Vendor::Pack"));
    assert!(index.contains("2.0.0"));
    assert!(index.contains("App.Debug+BoardA"));
}

#[test]
fn layer_missing_from_the_search_path_fails_the_run() {
    let env = TestEnv::new();
    let result = env.run(&["resolve", "demo.csolution.yml", "-c", "App.Debug"]);

    assert!(!result.success);
    assert_eq!(result.exit_code, 1);
    assert!(result.stdout.contains("✗ App.Debug+BoardA"));
    assert!(result.stdout.contains("✓ App.Debug+BoardB"));
    assert!(result.stdout.contains("1 of 2 contexts failed"));
}

#[test]
fn unmatched_context_filter_is_a_warning() {
    let env = TestEnv::new();
    let result = env.run(&["resolve", "demo.csolution.yml", "-c", "Boot.Debug+BoardA", "-c", "Loader"]);

    assert!(result.success, "stderr: {}", result.stderr);
    assert!(result.stdout.contains("warning: context 'Loader' was not found"));
    assert!(result.stdout.contains("1 of 1 contexts resolved with warnings"));
}

#[test]
fn json_output_reports_every_context() {
    let env = TestEnv::new();
    let result = env.run(&["--json", "resolve", "demo.csolution.yml", "-c", "Boot.Debug"]);
    assert!(result.success, "stderr: {}", result.stderr);

    let json: serde_json::Value = serde_json::from_str(&result.stdout).unwrap();
    assert_eq!(json["success"], true);
    assert_eq!(json["contexts"].as_array().unwrap().len(), 2);
    assert_eq!(json["index_saved"], true);
}

#[test]
fn context_set_is_written_and_reused() {
    let env = TestEnv::new();
    let first = env.run(&["resolve", "demo.csolution.yml", "-S", "-c", "Boot.Release"]);
    assert!(first.success, "stderr: {}", first.stderr);
    let set = env.read("demo.cbuild-set.yml").expect("context set written");
    assert!(set.contains("Boot.Release+BoardA"));

    let second = env.run(&["resolve", "demo.csolution.yml", "-S"]);
    assert!(second.success, "stderr: {}", second.stderr);
    assert!(second.stdout.contains("2 of 2 contexts resolved"));
}

#[test]
fn frozen_packs_without_an_index_is_an_error() {
    let env = TestEnv::new();
    let result = env.run(&["resolve", "demo.csolution.yml", "--frozen-packs"]);

    assert!(!result.success);
    assert!(result.stderr.contains("no build index exists"));
}

#[test]
fn unknown_load_policy_is_rejected() {
    let env = TestEnv::new();
    let result = env.run(&["resolve", "demo.csolution.yml", "-l", "newest"]);

    assert!(!result.success);
    assert!(result.stderr.contains("unknown load option"));
}

#[test]
fn missing_solution_is_an_error() {
    let env = TestEnv::empty();
    let result = env.run(&["resolve", "nowhere.csolution.yml"]);

    assert!(!result.success);
    assert!(result.stderr.starts_with("error:"));
}

#[test]
fn project_config_sets_the_load_policy() {
    let env = TestEnv::new();
    env.write("ctxplan.toml", "[packs]\nload = \"all\"\n");
    let result = env.run(&["--json", "resolve", "demo.csolution.yml", "-c", "Boot.Debug+BoardA"]);
    assert!(result.success, "stderr: {}", result.stderr);

    let json: serde_json::Value = serde_json::from_str(&result.stdout).unwrap();
    assert_eq!(json["contexts"][0]["resolved_packs"].as_array().unwrap().len(), 3);
}

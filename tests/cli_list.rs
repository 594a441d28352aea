//! Integration tests for `ctxplan list`

mod common;

use common::TestEnv;

#[test]
fn list_contexts_honours_the_filter() {
    let env = TestEnv::new();
    let result = env.run(&["list", "contexts", "demo.csolution.yml", "-f", "Release+BoardB"]);

    assert!(result.success, "stderr: {}", result.stderr);
    insta::assert_snapshot!(result.stdout, @r"
    App.Release+BoardB
    Boot.Release+BoardB
    ");
}

#[test]
fn list_packs_does_not_write_the_index() {
    let env = TestEnv::new();
    let result = env.run(&["list", "packs", "demo.csolution.yml", "-c", "Boot", "-l", "all"]);

    assert!(result.success, "stderr: {}", result.stderr);
    insta::assert_snapshot!(result.stdout, @r"
    Vendor::Pack@1.0.0
    Vendor::Pack@1.2.0
    Vendor::Pack@2.0.0
    ");
    assert!(env.read("demo.cbuild-idx.toml").is_none());
}

#[test]
fn list_toolchains_names_the_environment_variable() {
    let env = TestEnv::new();
    let result = env.run(&["list", "toolchains", "demo.csolution.yml"]);

    assert!(result.success, "stderr: {}", result.stderr);
    assert_eq!(result.stdout.trim(), "GCC@12.2.0 GCC_TOOLCHAIN_12_2_0=/opt/gcc/bin");
}

#[test]
fn list_layers_shows_compatibility_per_context() {
    let env = TestEnv::new();
    let result = env.run(&[
        "--json", "list", "layers", "demo.csolution.yml", "-c", "App.Debug", "-L", "layers",
    ]);
    assert!(result.success, "stderr: {}", result.stderr);

    let json: serde_json::Value = serde_json::from_str(&result.stdout).unwrap();
    assert_eq!(json["available"][0]["id"], "Net");
    assert_eq!(json["contexts"][0]["context"], "App.Debug+BoardA");
    assert_eq!(json["contexts"][0]["compatible"][0], "Net");
    assert!(json["contexts"][1]["compatible"].as_array().unwrap().is_empty());
    assert_eq!(json["index_saved"], false);
}

#[test]
fn list_layers_can_update_the_index() {
    let env = TestEnv::new();
    let result = env.run(&["list", "layers", "demo.csolution.yml", "-L", "layers", "--update-idx"]);
    assert!(result.success, "stderr: {}", result.stderr);

    let index = env.read("demo.cbuild-idx.toml").expect("build index written");
    assert!(index.contains("App.Debug+BoardA"));
}

const REORDERED: &str = r#"
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
"#;

#[test]
fn list_contexts_sorts_unless_yml_order_is_given() {
    let env = TestEnv::new();
    env.write("demo.csolution.yml", REORDERED);

    let sorted = env.run(&["list", "contexts", "demo.csolution.yml"]);
    assert!(sorted.success, "stderr: {}", sorted.stderr);
    insta::assert_snapshot!(sorted.stdout, @r"
    App.Debug+BoardA
    App.Release+BoardA
    Boot.Debug+BoardA
    Boot.Release+BoardA
    ");

    let declared = env.run(&["list", "contexts", "demo.csolution.yml", "--yml-order"]);
    assert!(declared.success, "stderr: {}", declared.stderr);
    insta::assert_snapshot!(declared.stdout, @r"
    Boot.Release+BoardA
    Boot.Debug+BoardA
    App.Release+BoardA
    App.Debug+BoardA
    ");
}

#[test]
fn list_components_of_the_resolved_packs() {
    let env = TestEnv::new();
    env.write(
        "inventory.yml",
        r#"
packs:
  - vendor: Vendor
    name: Pack
    version: 1.0.0
    components:
      - id: Vendor::Drivers:UART
  - vendor: Vendor
    name: Pack
    version: 2.0.0
    components:
      - id: Vendor::Drivers:UART
      - id: Vendor::Drivers:SPI
toolchains:
  - name: GCC
    version: 12.2.0
    root: /opt/gcc/bin
boards:
  - name: Kit-A
    vendor: Acme
    mounted_device: STM32F4
  - name: Kit-B
    vendor: Acme
    mounted_device: STM32F4
devices:
  - name: STM32F4
    vendor: ST
"#,
    );

    let result = env.run(&["list", "components", "demo.csolution.yml", "-c", "Boot"]);
    assert!(result.success, "stderr: {}", result.stderr);
    insta::assert_snapshot!(result.stdout, @r"
    Vendor::Drivers:SPI (Vendor::Pack@2.0.0)
    Vendor::Drivers:UART (Vendor::Pack@2.0.0)
    ");

    let filtered = env.run(&["list", "components", "demo.csolution.yml", "-c", "Boot", "-f", "UART"]);
    assert_eq!(filtered.stdout.trim(), "Vendor::Drivers:UART (Vendor::Pack@2.0.0)");
    assert!(env.read("demo.cbuild-idx.toml").is_none());
}

#[test]
fn list_boards_and_devices_from_the_inventory() {
    let env = TestEnv::new();

    let boards = env.run(&["list", "boards", "demo.csolution.yml"]);
    assert!(boards.success, "stderr: {}", boards.stderr);
    insta::assert_snapshot!(boards.stdout, @r"
    Acme::Kit-A
    Acme::Kit-B
    ");

    let filtered = env.run(&["--json", "list", "boards", "demo.csolution.yml", "-f", "Kit-B"]);
    let json: serde_json::Value = serde_json::from_str(&filtered.stdout).unwrap();
    assert_eq!(json, serde_json::json!(["Acme::Kit-B"]));

    let devices = env.run(&["list", "devices", "demo.csolution.yml"]);
    assert!(devices.success, "stderr: {}", devices.stderr);
    assert_eq!(devices.stdout.trim(), "ST::STM32F4");
}

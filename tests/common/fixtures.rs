//! Test fixtures - solution, layer and inventory documents.

/// Two projects, two build-types, two target-types: four contexts per project.
pub const SOLUTION: &str = r#"
solution:
  compiler: GCC
  build-types:
    - type: Debug
    - type: Release
  target-types:
    - type: BoardA
      board: Kit-A
    - type: BoardB
      board: Kit-B
  packs:
    - pack: Vendor::Pack
  projects:
    - name: App
      layers:
        - layer: Net
          for-context: [+BoardA]
    - name: Boot
"#;

/// A network layer that only supports `BoardA`.
pub const NET_LAYER: &str = r#"
layer:
  category: Network
  for-context: [+BoardA]
  connections:
    - provides: ETH
"#;

pub const INVENTORY: &str = r#"
packs:
  - vendor: Vendor
    name: Pack
    version: 1.0.0
  - vendor: Vendor
    name: Pack
    version: 1.2.0
  - vendor: Vendor
    name: Pack
    version: 2.0.0
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
"#;

//! Default configuration values

/// Default configuration file name (YAML)
pub const DEFAULT_CONFIG_YAML: &str = "notedraft.yaml";

/// Default configuration file name (TOML)
pub const DEFAULT_CONFIG_TOML: &str = "notedraft.toml";

/// Alternative configuration file name
pub const ALT_CONFIG_FILE: &str = ".notedraft.yaml";

/// Get list of config file names to search for
pub fn config_file_names() -> Vec<&'static str> {
    vec![
        DEFAULT_CONFIG_YAML,
        DEFAULT_CONFIG_TOML,
        ALT_CONFIG_FILE,
        ".notedraft.toml",
    ]
}

/// Default configuration template
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# notedraft configuration

union:
  name: Union
  identifier: tensorflow/tfjs
  manifest: package.json

dependencies:
  - name: Core
    identifier: tensorflow/tfjs-core
    package: "@tensorflow/tfjs-core"
  - name: Data
    identifier: tensorflow/tfjs-data
    package: "@tensorflow/tfjs-data"
  - name: Layers
    identifier: tensorflow/tfjs-layers
    package: "@tensorflow/tfjs-layers"
  - name: Converter
    identifier: tensorflow/tfjs-converter
    package: "@tensorflow/tfjs-converter"

auxiliary:
  name: Node
  identifier: tensorflow/tfjs-node

tag_format: "v{version}"
clone_base: https://github.com
output: release-notes.md

github:
  api_url: https://api.github.com
  web_url: https://github.com
  token_env: GITHUB_TOKEN
  skip_thanks_domains: []

buckets:
  skip_tag: INTERNAL
  fallback_title: Misc
  tags:
    - { tag: BREAKING, title: Breaking Changes }
    - { tag: FEATURE, title: Features }
    - { tag: BUG, title: Bug Fixes }
    - { tag: PERF, title: Performance }
    - { tag: SECURITY, title: Security }
    - { tag: DOC, title: Documentation }
    - { tag: DEV, title: Development }
"#;

// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for layering configuration sources into one store.

use layercfg::prelude::*;
use std::env;

/// Helper to set and clean up environment variables
struct EnvGuard {
    keys: Vec<String>,
}

impl EnvGuard {
    fn new() -> Self {
        EnvGuard { keys: Vec::new() }
    }

    fn set(&mut self, key: &str, value: &str) {
        env::set_var(key, value);
        self.keys.push(key.to_string());
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for key in &self.keys {
            env::remove_var(key);
        }
    }
}

#[test]
#[cfg(all(feature = "env", feature = "yaml"))]
fn test_env_overrides_yaml() {
    use std::io::Write;
    use tempfile::NamedTempFile;

    let mut env_guard = EnvGuard::new();

    let mut yaml_file = NamedTempFile::new().unwrap();
    writeln!(yaml_file, "layered.test.key: yaml_value").unwrap();

    env_guard.set("LAYERED_TEST_KEY", "env_value");

    let store = ConfigStoreBuilder::new()
        .with_yaml_file(yaml_file.path())
        .unwrap()
        .with_env_vars()
        .build()
        .unwrap();

    // env order 100 beats file order 200
    assert_eq!(
        store.get_str("layered.test.key"),
        Some(ConfigValue::from("env_value"))
    );
}

#[test]
#[cfg(all(feature = "cli", feature = "env"))]
fn test_cli_overrides_env() {
    let mut env_guard = EnvGuard::new();
    env_guard.set("LAYERED_CLI_KEY", "env_value");

    let args = vec!["--layered.cli.key", "cli_value"];
    let store = ConfigStoreBuilder::new()
        .with_env_vars()
        .with_cli_args(args)
        .build()
        .unwrap();

    // cli order 0 beats env order 100
    assert_eq!(
        store.get_str("layered.cli.key"),
        Some(ConfigValue::from("cli_value"))
    );
}

#[test]
#[cfg(all(feature = "cli", feature = "env", feature = "yaml"))]
fn test_three_tier_layering() {
    use std::io::Write;
    use tempfile::NamedTempFile;

    // capture the builder's debug traces in the test output
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();

    let mut env_guard = EnvGuard::new();

    let mut yaml_file = NamedTempFile::new().unwrap();
    writeln!(
        yaml_file,
        "tier.all: file\ntier.envfile: file\ntier.fileonly: file"
    )
    .unwrap();

    env_guard.set("TIER_ALL", "env");
    env_guard.set("TIER_ENVFILE", "env");

    let args = vec!["--tier.all=cli"];
    let store = ConfigStoreBuilder::new()
        .with_yaml_file(yaml_file.path())
        .unwrap()
        .with_env_vars()
        .with_cli_args(args)
        .build()
        .unwrap();

    assert_eq!(store.get_str("tier.all"), Some(ConfigValue::from("cli")));
    assert_eq!(
        store.get_str("tier.envfile"),
        Some(ConfigValue::from("env"))
    );
    assert_eq!(
        store.get_str("tier.fileonly"),
        Some(ConfigValue::from("file"))
    );
}

#[test]
#[cfg(feature = "yaml")]
fn test_yaml_values_are_typed_at_ingestion() {
    use std::io::Write;
    use tempfile::NamedTempFile;

    let mut yaml_file = NamedTempFile::new().unwrap();
    writeln!(
        yaml_file,
        "server:\n  port: 8080\n  tls: true\n  hosts:\n    - alpha\n    - beta"
    )
    .unwrap();

    let source = YamlFileSource::from_file(yaml_file.path()).unwrap();
    let store = ConfigStore::from_source(&source).unwrap();

    let port = store.get_item_str("server.port").unwrap();
    assert_eq!(port.kind(), ValueKind::Int);
    assert_eq!(port.value().as_i64("server.port").unwrap(), 8080);

    let tls = store.get_item_str("server.tls").unwrap();
    assert_eq!(tls.kind(), ValueKind::Bool);

    let hosts = store.get_item_str("server.hosts").unwrap();
    assert_eq!(hosts.kind(), ValueKind::List);
}

#[test]
#[cfg(feature = "env")]
fn test_from_source_stamps_the_source_order() {
    let mut values = std::collections::HashMap::new();
    values.insert("stamped.key".to_string(), "value".to_string());

    let source = EnvVarSource::with_values(values);
    let store = ConfigStore::from_source(&source).unwrap();

    let item = store.get_item_str("stamped.key").unwrap();
    assert_eq!(item.order(), source.order());
    assert_eq!(store.default_order(), source.order());
}

#[test]
#[cfg(feature = "env")]
fn test_prefixed_env_layering() {
    let mut env_guard = EnvGuard::new();
    env_guard.set("PFXAPP_DATABASE_HOST", "db.internal");
    env_guard.set("UNRELATED_SETTING", "nope");

    let store = ConfigStoreBuilder::new()
        .with_env_prefix("PFXAPP_")
        .build()
        .unwrap();

    assert_eq!(
        store.get_str("database.host"),
        Some(ConfigValue::from("db.internal"))
    );
    assert!(store.get_str("unrelated.setting").is_none());
}

#[test]
fn test_builder_with_no_sources_builds_empty_store() {
    let store = ConfigStoreBuilder::new().build().unwrap();
    assert!(store.is_empty());
}

#[test]
#[cfg(feature = "yaml")]
fn test_builder_propagates_missing_file_error() {
    let result = ConfigStoreBuilder::new().with_yaml_file("/nonexistent/nowhere.yaml");
    assert!(result.is_err());
}

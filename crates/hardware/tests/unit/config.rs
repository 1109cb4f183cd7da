//! # Configuration Tests
//!
//! Defaults, partial JSON overrides, file loading and validation.

use std::io::Write;

use pretty_assertions::assert_eq;
use rstest::rstest;
use tomasim_core::SimError;
use tomasim_core::config::Config;

#[test]
fn defaults_describe_the_reference_machine() {
    let config = Config::default();
    assert_eq!(config.memory.size, 100 * 1024 * 1024);
    assert_eq!(config.pipeline.rob_size, 16);
    assert_eq!(config.pipeline.station_count, 8);
    assert_eq!(config.pipeline.alu_latency, 0);
    assert_eq!(config.pipeline.mem_latency, 0);
    assert_eq!(config.pipeline.muldiv_latency, 5);
    assert_eq!(config.general.history_file, "dump.txt");
    assert_eq!(config.general.snapshot_file, None);
    assert!(config.validate().is_ok());
}

#[test]
fn stack_defaults_follow_memory_size() {
    let mut config = Config::default();
    config.memory.size = 1000;
    assert_eq!(config.memory.stack_base(), 990);
    assert_eq!(config.memory.stack_size(), 10);

    config.memory.stack_base = Some(800);
    config.memory.stack_size = Some(64);
    assert_eq!(config.memory.stack_base(), 800);
    assert_eq!(config.memory.stack_size(), 64);
}

#[test]
fn partial_json_keeps_other_defaults() {
    let config = Config::from_json_str(r#"{ "memory": { "size": 65536 } }"#).unwrap();
    assert_eq!(config.memory.size, 65536);
    assert_eq!(config.pipeline, Config::default().pipeline);
    assert_eq!(config.general, Config::default().general);
}

#[test]
fn empty_object_is_the_default() {
    assert_eq!(Config::from_json_str("{}").unwrap(), Config::default());
}

#[test]
fn malformed_json_is_a_config_error() {
    let err = Config::from_json_str("{ \"pipeline\": ").unwrap_err();
    assert!(matches!(err, SimError::Config(_)));
}

#[rstest]
#[case::zero_rob(r#"{ "pipeline": { "rob_size": 0 } }"#, "rob_size")]
#[case::zero_stations(r#"{ "pipeline": { "station_count": 0 } }"#, "station_count")]
#[case::zero_memory(r#"{ "memory": { "size": 0 } }"#, "memory.size")]
#[case::zero_history(r#"{ "general": { "history_limit": 0 } }"#, "history_limit")]
#[case::stack_beyond_memory(
    r#"{ "memory": { "size": 4096, "stack_base": 8192 } }"#,
    "stack_base"
)]
#[case::stack_larger_than_base(
    r#"{ "memory": { "size": 4096, "stack_base": 1024, "stack_size": 2048 } }"#,
    "stack_size"
)]
fn invalid_values_are_rejected(#[case] json: &str, #[case] field: &str) {
    match Config::from_json_str(json) {
        Err(SimError::Config(msg)) => assert!(msg.contains(field), "{msg}"),
        other => panic!("expected config error, got {other:?}"),
    }
}

#[test]
fn loads_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{ "general": {{ "max_cycles": 250, "snapshot_file": "out.json" }} }}"#
    )
    .unwrap();

    let config = Config::from_file(file.path()).unwrap();
    assert_eq!(config.general.max_cycles, Some(250));
    assert_eq!(config.general.snapshot_file.as_deref(), Some("out.json"));
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = Config::from_file(dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, SimError::Io { .. }));
}

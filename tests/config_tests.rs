//! Configuration file tests

use iflow_converter::config::{CONFIG_FILENAME, ConverterConfig, sample_config};
use iflow_converter::convert::{ConversionError, IflowConverter};
use iflow_converter::graph::OrphanPolicy;
use serde_json::json;
use tempfile::tempdir;

#[test]
fn missing_file_falls_back_to_defaults() {
    let dir = tempdir().unwrap();
    let config = ConverterConfig::load(dir.path()).unwrap();
    assert_eq!(config.layout.step_x, 200.0);
}

#[test]
fn save_and_load_round_trip() {
    let dir = tempdir().unwrap();
    let mut config = ConverterConfig::with_orphan_policy(OrphanPolicy::Error);
    config.layout.origin_y = 40.0;
    config.package.script_dir = Some("scripts".to_string());

    config.save(dir.path()).unwrap();
    assert!(dir.path().join(CONFIG_FILENAME).exists());

    let loaded = ConverterConfig::parse(&std::fs::read_to_string(dir.path().join(CONFIG_FILENAME)).unwrap())
        .unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn malformed_file_is_an_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("broken.toml");
    std::fs::write(&path, "[layout\nstep_x = ").unwrap();
    assert!(ConverterConfig::load_file(&path).is_err());
}

#[test]
fn sample_config_parses() {
    assert!(ConverterConfig::parse(sample_config()).is_ok());
}

#[test]
fn layout_settings_reach_the_diagram() {
    let config = ConverterConfig::parse("[layout]\norigin_x = 10.0\nstep_x = 50.0\n").unwrap();
    let document = json!({
        "version": "1.0",
        "iflow": {"id": "L", "name": "L", "version": "1"},
        "endpoints": [{
            "id": "ep1", "name": "L",
            "components": [{"type": "filter", "id": "A", "config": {}}],
            "flow": ["A"]
        }]
    });
    let xml = IflowConverter::new(config).convert(&document).unwrap().xml;
    assert!(xml.contains("<dc:Bounds height=\"60\" width=\"100\" x=\"60\" y=\"100\"/>"));
}

#[test]
fn strict_orphan_policy_from_file() {
    let config = ConverterConfig::parse("[graph]\norphan_policy = \"error\"\n").unwrap();
    let document = json!({
        "version": "1.0",
        "iflow": {"id": "O", "name": "O", "version": "1"},
        "endpoints": [{
            "id": "ep1", "name": "O",
            "components": [
                {"type": "filter", "id": "A", "config": {}},
                {"type": "filter", "id": "B", "config": {}}
            ],
            "flow": ["A"]
        }]
    });
    assert!(matches!(
        IflowConverter::new(config).convert(&document),
        Err(ConversionError::OrphanedComponent { .. })
    ));
}

use super::*;
use std::path::PathBuf;

#[test]
fn test_from_cli_applies_overrides() {
    let cli = AppConfig {
        install_dir: Some(PathBuf::from("/srv/agent/skills")),
        max_depth: 4,
        ..AppConfig::default()
    };

    let config = AppConfig::from_cli(cli).unwrap();

    assert_eq!(config.install_dir, Some(PathBuf::from("/srv/agent/skills")));
    assert_eq!(config.max_depth, 4);
}

#[test]
fn test_from_cli_keeps_zero_depth() {
    let cli = AppConfig {
        install_dir: Some(PathBuf::from("/srv/agent/skills")),
        max_depth: 0,
        ..AppConfig::default()
    };

    assert_eq!(AppConfig::from_cli(cli).unwrap().max_depth, 0);
}

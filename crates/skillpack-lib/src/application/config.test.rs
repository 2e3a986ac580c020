use super::*;

#[test]
fn test_defaults() {
    let config = AppConfig::default();

    assert_eq!(config.max_depth, 10);
    assert_eq!(config.log_level, 0);
    assert!(config.install_dir.is_none());
    assert!(config.registry_index.is_none());
    assert_eq!(config.color, ColorIntent::Auto);
}

#[test]
fn test_merge_prefers_explicit_values() {
    let base = AppConfig {
        install_dir: Some(PathBuf::from("/base/skills")),
        max_depth: 7,
        ..AppConfig::default()
    };
    let cli = AppConfig {
        registry_index: Some(PathBuf::from("/cli/index.json")),
        log_format: LogFormat::Json,
        ..AppConfig::default()
    };

    let merged = base.merge_with(cli);

    assert_eq!(merged.install_dir, Some(PathBuf::from("/base/skills")));
    assert_eq!(merged.registry_index, Some(PathBuf::from("/cli/index.json")));
    assert_eq!(merged.max_depth, 7);
    assert_eq!(merged.log_format, LogFormat::Json);
}

#[test]
fn test_validate_accepts_zero_depth() {
    let mut config = AppConfig {
        max_depth: 0,
        install_dir: Some(PathBuf::from("/opt/agent/skills")),
        ..AppConfig::default()
    };

    config.validate().unwrap();
    assert_eq!(config.resolve_options().max_depth, 0);
}

#[test]
fn test_validate_keeps_absolute_install_dir() {
    let mut config = AppConfig {
        install_dir: Some(PathBuf::from("/opt/agent/skills")),
        ..AppConfig::default()
    };

    config.validate().unwrap();
    assert_eq!(config.install_dir, Some(PathBuf::from("/opt/agent/skills")));
}

#[test]
fn test_validate_expands_default_install_dir() {
    let mut config = AppConfig::default();

    config.validate().unwrap();
    let dir = config.install_dir.unwrap();
    assert!(dir.is_absolute());
    assert!(dir.ends_with(".skillpack/skills"));
}

#[test]
fn test_logger_config_from_verbosity() {
    let config = AppConfig {
        log_level: 3,
        ..AppConfig::default()
    };

    let logger = config.to_logger_config(false);
    assert_eq!(logger.level, LogLevel::Debug);
    assert!(!logger.color);
}

#[test]
fn test_resolve_options_use_max_depth() {
    let config = AppConfig {
        max_depth: 3,
        ..AppConfig::default()
    };

    assert_eq!(config.resolve_options().max_depth, 3);
}

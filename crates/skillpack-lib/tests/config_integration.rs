use clap::Parser;
use skillpack_lib::application::{AppConfig, Cli};
use skillpack_lib::primitives::ColorIntent;
use std::env;
use std::path::PathBuf;

#[test]
fn test_cli_flags_reach_effective_config() {
    let cli = Cli::try_parse_from([
        "skillpack",
        "--install-dir",
        "/srv/agents/skills",
        "--max-depth",
        "6",
        "--log-level",
        "2",
        "lock",
    ])
    .unwrap();

    let config = AppConfig::from_cli(cli.config).unwrap();

    assert_eq!(config.install_dir, Some(PathBuf::from("/srv/agents/skills")));
    assert_eq!(config.max_depth, 6);
    assert_eq!(config.log_level, 2);
    assert!(config.registry_index.is_none());
}

#[test]
fn test_environment_layer_and_cli_precedence() {
    // Only test in this binary touching SKILLPACK_* variables
    unsafe {
        env::set_var("SKILLPACK_MAX_DEPTH", "3");
        env::set_var("SKILLPACK_COLOR", "never");
    }

    let from_env = Cli::try_parse_from(["skillpack", "lock"]).unwrap();
    assert_eq!(from_env.config.max_depth, 3);
    assert_eq!(from_env.config.color, ColorIntent::Never);

    let from_flag = Cli::try_parse_from(["skillpack", "--max-depth", "8", "lock"]).unwrap();
    assert_eq!(from_flag.config.max_depth, 8);

    unsafe {
        env::remove_var("SKILLPACK_MAX_DEPTH");
        env::remove_var("SKILLPACK_COLOR");
    }
}

#[test]
fn test_zero_depth_flag_limits_resolution_to_root() {
    let cli = Cli::try_parse_from([
        "skillpack",
        "--install-dir",
        "/srv/agents/skills",
        "--max-depth",
        "0",
        "lock",
    ])
    .unwrap();

    let config = AppConfig::from_cli(cli.config).unwrap();
    assert_eq!(config.resolve_options().max_depth, 0);
}

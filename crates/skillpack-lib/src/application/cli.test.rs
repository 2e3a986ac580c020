use super::*;

#[test]
fn test_parse_plan_command() {
    let cli = Cli::try_parse_from(["skillpack", "plan", "web-search", "--skip-installed", "-v"]).unwrap();

    assert_eq!(
        cli.command,
        Some(Commands::Plan {
            name: "web-search".to_string(),
            skip_installed: true,
            verbose: true,
        })
    );
}

#[test]
fn test_parse_global_options() {
    let cli = Cli::try_parse_from([
        "skillpack",
        "--max-depth",
        "4",
        "--registry-index",
        "/tmp/index.json",
        "tree",
        "app",
    ])
    .unwrap();

    assert_eq!(cli.config.max_depth, 4);
    assert_eq!(
        cli.config.registry_index.as_deref(),
        Some(std::path::Path::new("/tmp/index.json"))
    );
    assert_eq!(cli.command, Some(Commands::Tree { name: "app".to_string() }));
}

#[test]
fn test_plan_requires_name() {
    assert!(Cli::try_parse_from(["skillpack", "plan"]).is_err());
}

#[test]
fn test_command_properties() {
    assert!(!Commands::Lock.requires_registry());
    assert!(Commands::Tree { name: "x".into() }.requires_registry());
    assert!(Commands::Record { name: "x".into() }.requires_registry());
    assert!(!Commands::Version.requires_registry());
}

#[test]
fn test_no_command_is_allowed() {
    let cli = Cli::try_parse_from(["skillpack"]).unwrap();
    assert!(cli.command.is_none());
}

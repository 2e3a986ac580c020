use super::*;

#[test]
fn test_log_level_from_verbosity() {
    assert_eq!(LogLevel::from_verbosity(0), LogLevel::Error);
    assert_eq!(LogLevel::from_verbosity(2), LogLevel::Info);
    assert_eq!(LogLevel::from_verbosity(9), LogLevel::Trace);
}

#[test]
fn test_log_level_directive() {
    assert_eq!(LogLevel::Warning.as_directive(), "warn");
    assert_eq!(LogLevel::Trace.as_directive(), "trace");
}

#[test]
fn test_fromstr_accepts_aliases() {
    assert_eq!("plain".parse::<LogFormat>().unwrap(), LogFormat::Text);
    assert!("yaml".parse::<LogFormat>().is_err());
    assert_eq!("off".parse::<ColorIntent>().unwrap(), ColorIntent::Never);
    assert_eq!("stdout".parse::<LogOutput>().unwrap(), LogOutput::Stdout);
}

#[test]
fn test_fromstr_rejects_unknown_values() {
    let err = "loud".parse::<LogLevel>().unwrap_err();
    match err {
        ConfigError::ParseError { value, reason } => {
            assert_eq!(value, "loud");
            assert_eq!(reason, "invalid log level");
        }
        other => panic!("Unexpected error: {:?}", other),
    }
}

#[test]
fn test_color_intent_resolution() {
    assert!(ColorIntent::Auto.enabled(true));
    assert!(!ColorIntent::Auto.enabled(false));
    assert!(ColorIntent::Always.enabled(false));
    assert!(!ColorIntent::Never.enabled(true));
}

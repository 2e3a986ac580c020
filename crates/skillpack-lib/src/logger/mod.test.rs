use super::*;

#[test]
fn test_filter_directives_scope_crate_level() {
    let directives = filter_directives(LogLevel::Debug);
    assert!(directives.starts_with("skillpack=debug"));
    assert!(directives.contains("skillpack_lib=debug"));
    assert!(directives.contains("tokio=warn"));
}

#[test]
fn test_filter_directives_parse() {
    // Every level must produce a filter EnvFilter accepts
    for level in [
        LogLevel::Error,
        LogLevel::Warning,
        LogLevel::Info,
        LogLevel::Debug,
        LogLevel::Trace,
    ] {
        assert!(EnvFilter::try_new(filter_directives(level)).is_ok());
    }
}

#[test]
fn test_logger_not_initialized_initially() {
    // Other tests in this binary never install the global subscriber
    assert!(!Logger::is_initialized() || Logger::global().is_some());
}

use super::*;

fn vars(no_color: Option<&str>, force: Option<&str>, clicolor: Option<&str>, ci: Option<&str>) -> EnvironmentConfig {
    EnvironmentConfig {
        no_color: no_color.map(String::from),
        force_color: force.map(String::from),
        clicolor: clicolor.map(String::from),
        ci: ci.map(String::from),
    }
}

#[test]
fn test_no_variables_keep_intent() {
    let env = EnvironmentConfig::default();
    assert_eq!(env.apply_color_config(ColorIntent::Auto), ColorIntent::Auto);
    assert_eq!(env.apply_color_config(ColorIntent::Always), ColorIntent::Always);
}

#[test]
fn test_no_color_disables() {
    let env = vars(Some("1"), None, None, None);
    assert_eq!(env.apply_color_config(ColorIntent::Auto), ColorIntent::Never);
}

#[test]
fn test_empty_no_color_is_ignored() {
    let env = vars(Some(""), None, None, None);
    assert_eq!(env.apply_color_config(ColorIntent::Auto), ColorIntent::Auto);
}

#[test]
fn test_clicolor_zero_disables() {
    let env = vars(None, None, Some("0"), None);
    assert_eq!(env.apply_color_config(ColorIntent::Always), ColorIntent::Never);
}

#[test]
fn test_force_color_wins_over_disablers() {
    let env = vars(Some("1"), Some("1"), Some("0"), None);
    assert_eq!(env.apply_color_config(ColorIntent::Auto), ColorIntent::Always);

    let env = vars(None, Some("false"), None, None);
    assert_eq!(env.apply_color_config(ColorIntent::Always), ColorIntent::Never);
}

#[test]
fn test_invalid_force_color_values_ignored() {
    let env = vars(None, Some("invalid"), None, None);
    assert_eq!(env.apply_color_config(ColorIntent::Auto), ColorIntent::Auto);
}

#[test]
fn test_ci_disables_even_when_forced() {
    let env = vars(None, Some("1"), None, Some("true"));
    assert!(env.is_ci());
    assert_eq!(env.apply_color_config(ColorIntent::Auto), ColorIntent::Never);
}

#[test]
fn test_load_from_process_environment() {
    // Only asserts that loading succeeds; values depend on the caller's shell
    assert!(EnvironmentConfig::load().is_ok());
}

use super::*;

#[test]
fn test_plain_styling_is_verbatim() {
    let styles = StyleManager::plain();
    assert_eq!(styles.style_success("ok"), "ok");
    assert_eq!(styles.format_error("boom"), "✗ boom");
    assert_eq!(styles.format_warning("careful"), "! careful");
    assert!(!styles.colors_enabled());
}

#[test]
fn test_colored_styling_adds_escape_codes() {
    let styles = StyleManager::new(true);
    let painted = styles.style_error("bad");
    assert!(painted.contains("bad"));
    assert!(painted.contains('\u{1b}'));
}

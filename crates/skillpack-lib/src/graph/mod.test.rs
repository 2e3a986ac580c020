use super::*;

#[test]
fn test_join_path() {
    assert_eq!(join_path(["a", "b", "a"]), "a → b → a");
    assert_eq!(join_path(Vec::<String>::new()), "");
}

#[test]
fn test_not_found_message_names_parent() {
    let err = GraphError::NotFound {
        name: "ghost".to_string(),
        required_by: Some("host".to_string()),
    };
    assert_eq!(
        err.to_string(),
        "Skill not found in registry: ghost (required by host)"
    );

    let root = GraphError::NotFound {
        name: "ghost".to_string(),
        required_by: None,
    };
    assert_eq!(root.to_string(), "Skill not found in registry: ghost");
}

#[test]
fn test_registry_error_propagates_unchanged() {
    let err: GraphError = RegistryError::Backend {
        name: "x".to_string(),
        reason: "timeout".to_string(),
    }
    .into();
    assert!(matches!(err, GraphError::Registry(RegistryError::Backend { .. })));
    assert!(err.to_string().contains("timeout"));
}

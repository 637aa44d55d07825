//! Integration tests for hierarchy files and the sample item types.

use std::fs;

use tempfile::TempDir;

use clitree::application::ApplicationError;
use clitree::domain::{NodeId, Theme, TreeBuilder, TreeItem};
use clitree::sample::{Catalog, Value};
use clitree::tree_traits::TreeNodeConvert;
use clitree::util::testing;

const HIERARCHY: &str = r#"
[[namespace]]
name = "prod"

[[namespace.secrets]]
name = "db"
values = ["user", "password"]

[[namespace.secrets]]
name = "api"
values = ["token"]

[[namespace]]
name = "dev"
"#;

#[test]
fn given_hierarchy_file_when_loading_then_tree_mirrors_file() {
    testing::init_test_setup();
    // Arrange
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tree.toml");
    fs::write(&path, HIERARCHY).unwrap();

    // Act
    let catalog = Catalog::load(&path).unwrap();
    let tree = TreeBuilder::new().build_tree(catalog.items().into()).unwrap();

    // Assert
    assert_eq!(tree.len(), 7);
    let token = tree.find(&NodeId::from_indices(vec![0, 1, 0])).unwrap();
    assert_eq!(tree.display_name(token), "token ( )");
    let dev = tree.find(&NodeId::from_indices(vec![1])).unwrap();
    assert!(tree.is_leaf(dev));
}

#[test]
fn given_invalid_toml_when_loading_then_hierarchy_error() {
    testing::init_test_setup();
    // Arrange
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tree.toml");
    fs::write(&path, "[[namespace]]\nvalues = 3\n").unwrap();

    // Act
    let result = Catalog::load(&path);

    // Assert
    match result {
        Err(ApplicationError::Hierarchy { path: reported, .. }) => assert_eq!(reported, path),
        other => panic!("expected hierarchy error, got {other:?}"),
    }
}

#[test]
fn given_missing_file_when_loading_then_operation_failed() {
    testing::init_test_setup();
    // Arrange
    let dir = TempDir::new().unwrap();

    // Act
    let result = Catalog::load(&dir.path().join("absent.toml"));

    // Assert
    assert!(matches!(
        result,
        Err(ApplicationError::OperationFailed { .. })
    ));
}

#[test]
fn given_demo_when_showing_then_termtree_lists_hierarchy() {
    testing::init_test_setup();
    // Arrange
    let catalog = Catalog::demo();
    let tree = TreeBuilder::new().build_tree(catalog.items().into()).unwrap();

    // Act
    let shown = tree.to_tree_string("demo").to_string();

    // Assert
    let lines: Vec<&str> = shown.lines().collect();
    assert_eq!(lines.len(), 9);
    assert_eq!(lines[0], "demo");
    assert!(lines[1].ends_with("namespace 1"));
    assert!(lines[3].ends_with("value1 ( )"));
}

#[test]
fn given_plain_theme_when_rendering_label_then_equals_display_name() {
    testing::init_test_setup();
    // Arrange
    let value = Value::new("value1");

    // Act
    let label = value.render_label(&Theme::plain());

    // Assert
    assert_eq!(label, value.display_name());
}

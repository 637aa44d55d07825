//! Integration tests for the cursor state machine.

use rstest::rstest;

use clitree::domain::{
    CursorController, NodeId, NodeTree, Transition, TreeAction, TreeBuilder, TreeError,
};
use clitree::sample::Catalog;
use clitree::util::testing;

fn id(path: &[usize]) -> NodeId {
    NodeId::from_indices(path.to_vec())
}

fn demo() -> (Catalog, NodeTree, CursorController) {
    let catalog = Catalog::demo();
    let (tree, cursor) = TreeBuilder::new().build(catalog.items()).unwrap();
    (catalog, tree, cursor)
}

fn value_selected(catalog: &Catalog, namespace: usize, value: usize) -> bool {
    let namespace = catalog.namespaces()[namespace].borrow();
    let secrets = namespace.secrets()[0].borrow();
    let selected = secrets.values()[value].borrow().is_selected();
    selected
}

#[rstest]
#[case::up_at_first_top_level(&[0], TreeAction::Up)]
#[case::down_at_last_top_level(&[1], TreeAction::Down)]
#[case::back_at_top_level(&[1], TreeAction::Back)]
#[case::down_at_last_leaf(&[0, 0, 1], TreeAction::Down)]
#[case::up_at_first_leaf(&[1, 0, 0], TreeAction::Up)]
fn given_cursor_at_boundary_when_moving_then_blocked(
    #[case] start: &[usize],
    #[case] action: TreeAction,
) {
    testing::init_test_setup();
    // Arrange
    let (_catalog, tree, _) = demo();
    let mut cursor = CursorController::at(&tree, &id(start)).unwrap();

    // Act
    let transition = cursor.apply(&tree, action);

    // Assert
    assert_eq!(transition, Transition::Blocked);
    assert_eq!(cursor.id(&tree), Some(&id(start)));
}

#[rstest]
#[case::down_to_next_top_level(&[0], TreeAction::Down, &[1])]
#[case::up_to_previous_leaf(&[0, 0, 1], TreeAction::Up, &[0, 0, 0])]
#[case::activate_descends(&[1], TreeAction::Activate, &[1, 0])]
#[case::activate_descends_to_first_leaf(&[1, 0], TreeAction::Activate, &[1, 0, 0])]
#[case::back_ascends_from_leaf(&[1, 0, 1], TreeAction::Back, &[1, 0])]
#[case::back_ascends_to_top_level(&[0, 0], TreeAction::Back, &[0])]
fn given_cursor_when_moving_then_lands_on_expected_node(
    #[case] start: &[usize],
    #[case] action: TreeAction,
    #[case] expected: &[usize],
) {
    testing::init_test_setup();
    // Arrange
    let (_catalog, tree, _) = demo();
    let mut cursor = CursorController::at(&tree, &id(start)).unwrap();

    // Act
    let transition = cursor.apply(&tree, action);

    // Assert
    let target = tree.find(&id(expected)).unwrap();
    assert_eq!(transition, Transition::Moved(target));
    assert_eq!(cursor.current(), target);
}

#[rstest]
#[case::second_leaf(&[0, 0, 1], &[0, 0, 0])]
#[case::first_leaf(&[1, 0, 0], &[1, 0, 0])]
#[case::category(&[1, 0], &[1, 0])]
fn given_cursor_below_top_level_when_back_then_activate_then_lands_on_first_sibling(
    #[case] start: &[usize],
    #[case] expected: &[usize],
) {
    testing::init_test_setup();
    // Arrange
    let (catalog, tree, _) = demo();
    let mut cursor = CursorController::at(&tree, &id(start)).unwrap();

    // Act
    let back = cursor.apply(&tree, TreeAction::Back);
    let activate = cursor.apply(&tree, TreeAction::Activate);

    // Assert
    let target = tree.find(&id(expected)).unwrap();
    assert!(matches!(back, Transition::Moved(_)));
    assert_eq!(activate, Transition::Moved(target));
    assert_eq!(cursor.current(), target);
    assert!(catalog.selected().is_empty());
}

#[test]
fn given_cursor_on_leaf_when_activating_then_value_toggles_and_cursor_stays() {
    testing::init_test_setup();
    // Arrange
    let (catalog, tree, _) = demo();
    let mut cursor = CursorController::at(&tree, &id(&[1, 0, 1])).unwrap();
    let leaf = cursor.current();

    // Act
    let first = cursor.apply(&tree, TreeAction::Activate);

    // Assert
    assert_eq!(first, Transition::Mutated(leaf));
    assert_eq!(cursor.current(), leaf);
    assert!(value_selected(&catalog, 1, 1));
    assert_eq!(tree.display_name(leaf), "value4 (x)");

    // Act: second activation toggles back
    cursor.apply(&tree, TreeAction::Activate);

    // Assert
    assert!(!value_selected(&catalog, 1, 1));
    assert!(!value_selected(&catalog, 0, 0));
}

#[test]
fn given_full_walk_when_descending_and_selecting_then_path_is_consistent() {
    testing::init_test_setup();
    // Arrange
    let (catalog, tree, mut cursor) = demo();

    // Act: 0 -> 00 -> 000 -> toggle -> 001 -> toggle -> 00 -> 0
    let actions = [
        TreeAction::Activate,
        TreeAction::Activate,
        TreeAction::Activate,
        TreeAction::Down,
        TreeAction::Activate,
        TreeAction::Back,
        TreeAction::Back,
    ];
    for action in actions {
        assert_ne!(cursor.apply(&tree, action), Transition::Blocked, "{action}");
    }

    // Assert
    assert_eq!(cursor.id(&tree), Some(&id(&[0])));
    assert!(value_selected(&catalog, 0, 0));
    assert!(value_selected(&catalog, 0, 1));
    assert_eq!(catalog.selected(), vec!["value1", "value2"]);
}

#[test]
fn given_quit_when_applying_then_quit_without_moving() {
    testing::init_test_setup();
    // Arrange
    let (_catalog, tree, mut cursor) = demo();
    let before = cursor.current();

    // Act
    let transition = cursor.apply(&tree, TreeAction::Quit);

    // Assert
    assert_eq!(transition, Transition::Quit);
    assert_eq!(cursor.current(), before);
}

#[test]
fn given_unknown_id_when_placing_cursor_then_unknown_node() {
    testing::init_test_setup();
    // Arrange
    let (_catalog, tree, _) = demo();

    // Act
    let result = CursorController::at(&tree, &id(&[5]));

    // Assert
    assert_eq!(result.unwrap_err(), TreeError::UnknownNode(id(&[5])));
}

#[test]
fn given_root_id_when_placing_cursor_then_rejected() {
    testing::init_test_setup();
    // Arrange
    let (_catalog, tree, _) = demo();

    // Act
    let result = CursorController::at(&tree, &NodeId::root());

    // Assert
    assert_eq!(result.unwrap_err(), TreeError::RootNotSelectable);
}

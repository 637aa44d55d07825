//! Integration tests for frame rendering.

use std::cell::RefCell;
use std::rc::Rc;

use clitree::domain::{
    shared, ItemRef, NodeId, NodeTree, Renderer, Theme, TreeBuilder, TreeItem,
};
use clitree::sample::Catalog;
use clitree::util::testing;

struct Entry {
    name: String,
    children: Vec<ItemRef>,
}

fn entry(name: &str, children: Vec<ItemRef>) -> Rc<RefCell<Entry>> {
    shared(Entry {
        name: name.to_string(),
        children,
    })
}

impl TreeItem for Entry {
    fn display_name(&self) -> String {
        self.name.clone()
    }

    fn children(&self) -> Vec<ItemRef> {
        self.children.clone()
    }
}

fn plain() -> Renderer {
    Renderer::new(Theme::plain()).with_quit_keys(vec![
        "q".to_string(),
        "ctrl+c".to_string(),
        "enter".to_string(),
    ])
}

fn render_at(tree: &NodeTree, path: &[usize]) -> String {
    let idx = tree.find(&NodeId::from_indices(path.to_vec())).unwrap();
    plain().render(tree, idx)
}

#[test]
fn given_demo_tree_when_cursor_on_first_namespace_then_exact_frame() {
    testing::init_test_setup();
    // Arrange
    let catalog = Catalog::demo();
    let (tree, cursor) = TreeBuilder::new().build(catalog.items()).unwrap();

    // Act
    let frame = plain().render(&tree, cursor.current());

    // Assert
    let expected = format!(
        "Select items: 0 \n\n\
         >namespace 1 secrets value1 ( )\n\
         {pad} value2 ( )\n\
         \n\n\n \
         namespace 2\n\
         \n\
         Press q or ctrl+c or enter to quit.\n",
        pad = " ".repeat(20)
    );
    assert_eq!(frame, expected);
}

#[test]
fn given_cursor_in_second_branch_when_rendering_then_only_that_branch_expands() {
    testing::init_test_setup();
    // Arrange
    let catalog = Catalog::demo();
    let (tree, _) = TreeBuilder::new().build(catalog.items()).unwrap();

    // Act
    let frame = render_at(&tree, &[1, 0, 1]);

    // Assert
    let lines: Vec<&str> = frame.lines().collect();
    assert_eq!(lines[0], "Select items: 101 ");
    assert_eq!(lines[2], " namespace 1");
    assert_eq!(lines[3], " namespace 2 secrets valu3 ( )");
    assert_eq!(lines[4], format!("{}>value4 ( )", " ".repeat(20)));
    assert!(!frame.contains("value1"));
}

#[test]
fn given_selected_leaf_when_rendering_then_label_shows_mark() {
    testing::init_test_setup();
    // Arrange
    let catalog = Catalog::demo();
    let (tree, _) = TreeBuilder::new().build(catalog.items()).unwrap();
    let leaf = tree.find(&NodeId::from_indices(vec![0, 0, 0])).unwrap();
    tree.get(leaf)
        .and_then(|node| node.value())
        .unwrap()
        .borrow_mut()
        .mutate();

    // Act
    let frame = plain().render(&tree, leaf);

    // Assert
    assert!(frame.contains(" secrets>value1 (x)\n"), "{frame}");
}

#[test]
fn given_uneven_labels_when_rendering_then_later_children_align_with_first() {
    testing::init_test_setup();
    // Arrange: widths differ per level so the widest-ancestor rule matters
    let items: Vec<ItemRef> = vec![
        entry(
            "a",
            vec![
                entry("bb", vec![entry("x", vec![]), entry("yy", vec![])]),
                entry("cccccc", vec![entry("z", vec![]), entry("w", vec![])]),
            ],
        ),
        entry("longer top", vec![entry("t", vec![])]),
    ];
    let tree = TreeBuilder::new().build_tree(items.into()).unwrap();

    // Act
    let frame = render_at(&tree, &[0]);

    // Assert: each later sibling starts in the column of its first sibling
    let lines: Vec<&str> = frame.lines().collect();
    let column = |line: &str, label: &str| line.find(label).map(|pos| pos - 1);
    let first_leaf = column(lines[2], "x").unwrap();
    let second_leaf = column(lines[3], "yy").unwrap();
    assert_eq!(first_leaf, second_leaf, "\n{frame}");
    assert!(lines[3][..second_leaf].trim().is_empty());

    let cccccc_line = lines
        .iter()
        .find(|line| line.contains("cccccc"))
        .unwrap();
    let bb = column(lines[2], "bb").unwrap();
    assert_eq!(column(cccccc_line, "cccccc").unwrap(), bb, "\n{frame}");
}

#[test]
fn given_wide_characters_when_rendering_then_width_counts_columns() {
    testing::init_test_setup();
    // Arrange: two CJK characters are four columns
    let items: Vec<ItemRef> = vec![entry(
        "界界",
        vec![entry("leaf", vec![entry("a", vec![]), entry("b", vec![])])],
    )];
    let tree = TreeBuilder::new().build_tree(items.into()).unwrap();

    // Act
    let frame = render_at(&tree, &[0]);

    // Assert: ">界界" is 5 columns, " leaf" 5 more, so "b" is padded by 10
    let lines: Vec<&str> = frame.lines().collect();
    assert_eq!(lines[2], ">界界 leaf a");
    assert_eq!(lines[3], format!("{} b", " ".repeat(10)));
}

#[test]
fn given_same_state_when_rendering_twice_then_frames_are_identical() {
    testing::init_test_setup();
    // Arrange
    let catalog = Catalog::demo();
    let (tree, cursor) = TreeBuilder::new().build(catalog.items()).unwrap();
    let renderer = Renderer::default();

    // Act
    let first = renderer.render(&tree, cursor.current());
    let second = renderer.render(&tree, cursor.current());

    // Assert
    assert_eq!(first, second);
}

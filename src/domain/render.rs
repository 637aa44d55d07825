//! Column-aligned text rendering of the tree.
//!
//! Only the top-level branch holding the cursor is expanded. Inside it every
//! node's first child sits on the node's own line and later children start on
//! new lines, indented so that each level lines up under the widest label of
//! the generation above it.

use generational_arena::Index;
use itertools::Itertools;
use unicode_width::UnicodeWidthStr;

use crate::domain::arena::NodeTree;
use crate::domain::theme::Theme;

/// Pure frame producer: same (tree, cursor) always yields the same text.
#[derive(Debug, Clone)]
pub struct Renderer {
    theme: Theme,
    quit_keys: Vec<String>,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(Theme::default())
    }
}

impl Renderer {
    pub fn new(theme: Theme) -> Self {
        Self {
            theme,
            quit_keys: vec!["q".to_string(), "ctrl+c".to_string()],
        }
    }

    /// Key labels listed in the footer hint.
    pub fn with_quit_keys(mut self, keys: Vec<String>) -> Self {
        self.quit_keys = keys;
        self
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Full frame: header, top-level branches, footer.
    pub fn render(&self, tree: &NodeTree, cursor: Index) -> String {
        let cursor_id = tree.id(cursor).map(ToString::to_string).unwrap_or_default();
        let mut frame = format!("Select items: {cursor_id} \n\n");

        let active_branch = tree.branch(cursor);
        for &top in tree.children(tree.root()) {
            if Some(top) == active_branch {
                frame.push_str(&self.render_node(tree, top, cursor));
                frame.push('\n');
            } else {
                frame.push(self.theme.blank_marker);
                frame.push_str(&tree.display_name(top));
                frame.push('\n');
            }
        }

        frame.push('\n');
        if !self.quit_keys.is_empty() {
            frame.push_str(&format!(
                "Press {} to quit.\n",
                self.quit_keys.iter().join(" or ")
            ));
        }
        frame
    }

    /// Marker and label of `idx`, followed by its children laid out recursively.
    fn render_node(&self, tree: &NodeTree, idx: Index, cursor: Index) -> String {
        let mut out = String::new();
        out.push(self.theme.marker(idx == cursor));

        let label = tree
            .get(idx)
            .and_then(|node| node.value())
            .map(|value| value.borrow().render_label(&self.theme))
            .unwrap_or_default();

        if tree.is_leaf(idx) {
            out.push_str(&label);
            out.push('\n');
            return out;
        }

        for (position, &child) in tree.children(idx).iter().enumerate() {
            let rendered = self.render_node(tree, child, cursor);
            if position == 0 {
                let gap = self
                    .indent_unit(tree, child)
                    .saturating_sub(label_width(tree, idx) + 1);
                out.push_str(&label);
                out.push_str(&" ".repeat(gap));
            } else {
                out.push_str(&" ".repeat(self.indent_chain(tree, child)));
            }
            out.push_str(&rendered);
        }
        out.push('\n');
        out
    }

    /// Width of one indentation step for `idx`: widest aunt/uncle label plus one.
    fn indent_unit(&self, tree: &NodeTree, idx: Index) -> usize {
        if tree.is_top_level(idx) {
            return 0;
        }
        widest_ancestor(tree, idx)
            .map(|widest| label_width(tree, widest) + 1)
            .unwrap_or(0)
    }

    /// Full left padding for a non-first child: its own unit on top of the
    /// chain of the widest ancestor, up to the top level.
    fn indent_chain(&self, tree: &NodeTree, idx: Index) -> usize {
        if tree.is_top_level(idx) {
            return 0;
        }
        match widest_ancestor(tree, idx) {
            Some(widest) => self.indent_chain(tree, widest) + label_width(tree, widest) + 1,
            None => 0,
        }
    }
}

/// Among the parent of `idx` and the parent's siblings, the node with the
/// widest label. The parent wins ties, then earlier siblings.
fn widest_ancestor(tree: &NodeTree, idx: Index) -> Option<Index> {
    let parent = tree.parent(idx)?;
    let candidates = if tree.is_root(parent) {
        tree.children(idx)
    } else {
        tree.children(tree.parent(parent)?)
    };

    let mut widest = parent;
    let mut widest_width = label_width(tree, parent);
    for &candidate in candidates {
        let width = label_width(tree, candidate);
        if width > widest_width {
            widest = candidate;
            widest_width = width;
        }
    }
    Some(widest)
}

fn label_width(tree: &NodeTree, idx: Index) -> usize {
    tree.display_name(idx).as_str().width()
}

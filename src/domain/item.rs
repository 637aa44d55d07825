//! Capability contract every value shown in the tree must satisfy.

use std::cell::RefCell;
use std::rc::Rc;

use crate::domain::theme::Theme;

/// Shared handle to a caller-owned tree value.
///
/// The caller keeps its own typed handles (`Rc<RefCell<T>>`) and reads the
/// mutated state back after the session ends.
pub type ItemRef = Rc<RefCell<dyn TreeItem>>;

/// Minimal interface of a tree value.
///
/// Only `display_name` is required. Leaves override `mutate`, groupings
/// override `children`.
pub trait TreeItem {
    /// Label shown in the UI. May encode mutable state (e.g. a selection marker).
    fn display_name(&self) -> String;

    /// Styled label for the terminal.
    ///
    /// Must print exactly as wide as `display_name`, the layout measures
    /// the unstyled name.
    fn render_label(&self, _theme: &Theme) -> String {
        self.display_name()
    }

    /// Invoked when a leaf is activated.
    fn mutate(&mut self) {}

    /// Ordered children. Empty for leaves.
    fn children(&self) -> Vec<ItemRef> {
        Vec::new()
    }
}

/// Wrap a value into the shared handle the caller keeps.
pub fn shared<T: TreeItem + 'static>(value: T) -> Rc<RefCell<T>> {
    Rc::new(RefCell::new(value))
}

/// Erase concrete handles into tree handles, keeping order.
pub fn as_items<T: TreeItem + 'static>(values: &[Rc<RefCell<T>>]) -> Vec<ItemRef> {
    values
        .iter()
        .map(|value| Rc::clone(value) as ItemRef)
        .collect()
}

/// Identity of a shared value, independent of the trait object vtable.
pub(crate) fn same_item(a: &ItemRef, b: &ItemRef) -> bool {
    std::ptr::eq(Rc::as_ptr(a) as *const (), Rc::as_ptr(b) as *const ())
}

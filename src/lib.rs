//! Interactive terminal tree selector.
//!
//! Caller-owned values implementing [`domain::TreeItem`] are arranged in an
//! arena tree, navigated with a cursor and rendered as text frames. Leaves
//! mutate in place when activated, so the caller reads results back from its
//! own handles.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod sample;
pub mod tree_traits;
pub mod util;

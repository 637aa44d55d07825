//! Namespace / secrets / value hierarchy used by the command line.
//!
//! Values toggle a selection flag when activated; the label carries the flag
//! as a ` (x)` or ` ( )` suffix.

use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

use serde::Deserialize;
use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::domain::{as_items, shared, ItemRef, Role, Theme, TreeItem};

/// Selectable leaf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Value {
    name: String,
    selected: bool,
}

impl Value {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            selected: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }
}

impl TreeItem for Value {
    fn display_name(&self) -> String {
        if self.selected {
            format!("{} (x)", self.name)
        } else {
            format!("{} ( )", self.name)
        }
    }

    fn render_label(&self, theme: &Theme) -> String {
        theme.paint(Role::Leaf, &self.display_name())
    }

    fn mutate(&mut self) {
        self.selected = !self.selected;
    }
}

/// Category grouping values.
#[derive(Debug)]
pub struct Secrets {
    name: String,
    values: Vec<Rc<RefCell<Value>>>,
}

impl Secrets {
    pub fn new(name: impl Into<String>, values: Vec<Rc<RefCell<Value>>>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    pub fn values(&self) -> &[Rc<RefCell<Value>>] {
        &self.values
    }
}

impl TreeItem for Secrets {
    fn display_name(&self) -> String {
        self.name.clone()
    }

    fn render_label(&self, theme: &Theme) -> String {
        theme.paint(Role::Category, &self.name)
    }

    fn children(&self) -> Vec<ItemRef> {
        as_items(&self.values)
    }
}

/// Top-level group.
#[derive(Debug)]
pub struct Namespace {
    name: String,
    secrets: Vec<Rc<RefCell<Secrets>>>,
}

impl Namespace {
    pub fn new(name: impl Into<String>, secrets: Vec<Rc<RefCell<Secrets>>>) -> Self {
        Self {
            name: name.into(),
            secrets,
        }
    }

    pub fn secrets(&self) -> &[Rc<RefCell<Secrets>>] {
        &self.secrets
    }
}

impl TreeItem for Namespace {
    fn display_name(&self) -> String {
        self.name.clone()
    }

    fn render_label(&self, theme: &Theme) -> String {
        theme.paint(Role::Group, &self.name)
    }

    fn children(&self) -> Vec<ItemRef> {
        as_items(&self.secrets)
    }
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    namespace: Vec<NamespaceEntry>,
}

#[derive(Debug, Deserialize)]
struct NamespaceEntry {
    name: String,
    #[serde(default)]
    secrets: Vec<SecretsEntry>,
}

#[derive(Debug, Deserialize)]
struct SecretsEntry {
    name: String,
    #[serde(default)]
    values: Vec<String>,
}

/// Owned hierarchy. Keeps the typed handles so selections can be read back
/// after a session.
#[derive(Debug, Default)]
pub struct Catalog {
    namespaces: Vec<Rc<RefCell<Namespace>>>,
}

impl Catalog {
    pub fn new(namespaces: Vec<Rc<RefCell<Namespace>>>) -> Self {
        Self { namespaces }
    }

    /// Two namespaces with one `secrets` category each.
    pub fn demo() -> Self {
        let secrets = |values: &[&str]| {
            let values = values.iter().map(|v| shared(Value::new(*v))).collect();
            shared(Secrets::new("secrets", values))
        };
        Self::new(vec![
            shared(Namespace::new(
                "namespace 1",
                vec![secrets(&["value1", "value2"])],
            )),
            shared(Namespace::new(
                "namespace 2",
                vec![secrets(&["valu3", "value4"])],
            )),
        ])
    }

    /// Parse a hierarchy file:
    ///
    /// ```toml
    /// [[namespace]]
    /// name = "prod"
    ///
    /// [[namespace.secrets]]
    /// name = "db"
    /// values = ["user", "password"]
    /// ```
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        let file: CatalogFile = toml::from_str(content)?;
        let namespaces = file
            .namespace
            .into_iter()
            .map(|ns| {
                let secrets = ns
                    .secrets
                    .into_iter()
                    .map(|s| {
                        let values = s.values.into_iter().map(|v| shared(Value::new(v))).collect();
                        shared(Secrets::new(s.name, values))
                    })
                    .collect();
                shared(Namespace::new(ns.name, secrets))
            })
            .collect();
        Ok(Self::new(namespaces))
    }

    #[instrument(level = "debug")]
    pub fn load(path: &Path) -> ApplicationResult<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(&format!("read hierarchy {}", path.display()))?;
        let catalog = Self::from_toml(&content).map_err(|e| ApplicationError::Hierarchy {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        debug!(namespaces = catalog.namespaces.len(), "hierarchy loaded");
        Ok(catalog)
    }

    pub fn namespaces(&self) -> &[Rc<RefCell<Namespace>>] {
        &self.namespaces
    }

    /// Top-level items for the tree builder.
    pub fn items(&self) -> Vec<ItemRef> {
        as_items(&self.namespaces)
    }

    /// Names of the selected values in tree order.
    pub fn selected(&self) -> Vec<String> {
        let mut names = Vec::new();
        for namespace in &self.namespaces {
            for secrets in namespace.borrow().secrets() {
                for value in secrets.borrow().values() {
                    let value = value.borrow();
                    if value.is_selected() {
                        names.push(value.name().to_string());
                    }
                }
            }
        }
        names
    }
}

//! Pane descriptor
//!
//! One entry per mounted pane. The identity never changes; everything else
//! is a display attribute the pane updates in place as its props change.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::name::PaneName;

/// Process-unique registry key for one pane instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PaneIdentity(Uuid);

impl PaneIdentity {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PaneIdentity {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for PaneIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Path of a pane in the container's child structure.
///
/// Paths compare lexicographically, which is document order: a parent slot
/// sorts before its descendants and siblings sort by index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentPosition(Vec<u32>);

impl DocumentPosition {
    pub fn new(path: impl Into<Vec<u32>>) -> Self {
        Self(path.into())
    }

    /// Direct child slot of the container.
    pub fn slot(index: u32) -> Self {
        Self(vec![index])
    }

    pub fn child(&self, index: u32) -> Self {
        let mut path = self.0.clone();
        path.push(index);
        Self(path)
    }

    pub fn path(&self) -> &[u32] {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaneDescriptor {
    identity: PaneIdentity,
    /// Public key used in events; `None` until the pane has one
    pub name: Option<PaneName>,
    /// Opaque label payload handed to the renderer
    pub label: String,
    pub disabled: bool,
    pub closable: bool,
    /// Defer content until the pane has been active once
    pub lazy: bool,
    /// Where the pane sits in the container's child structure
    pub position: DocumentPosition,
    /// Maintained by the registry
    #[serde(default)]
    visited: bool,
}

impl PaneDescriptor {
    pub fn new(identity: PaneIdentity) -> Self {
        Self {
            identity,
            name: None,
            label: String::new(),
            disabled: false,
            closable: false,
            lazy: false,
            position: DocumentPosition::default(),
            visited: false,
        }
    }

    pub fn named(identity: PaneIdentity, name: impl Into<PaneName>) -> Self {
        Self::new(identity).with_name(name)
    }

    pub fn with_name(mut self, name: impl Into<PaneName>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn with_closable(mut self, closable: bool) -> Self {
        self.closable = closable;
        self
    }

    pub fn with_lazy(mut self, lazy: bool) -> Self {
        self.lazy = lazy;
        self
    }

    pub fn at(mut self, position: DocumentPosition) -> Self {
        self.position = position;
        self
    }

    pub fn identity(&self) -> PaneIdentity {
        self.identity
    }

    /// Whether the pane has ever been the active pane
    pub fn visited(&self) -> bool {
        self.visited
    }

    pub(crate) fn rekey(&mut self, identity: PaneIdentity) {
        self.identity = identity;
    }

    pub(crate) fn set_visited(&mut self, visited: bool) {
        self.visited = visited;
    }

    pub fn is_named(&self, name: &PaneName) -> bool {
        self.name.as_ref() == Some(name)
    }

    /// Nameless panes can never become the active pane.
    pub fn can_activate(&self) -> bool {
        self.name.is_some()
    }

    /// Closable on its own or through a container-wide flag
    pub fn is_closable(&self, container_closable: bool) -> bool {
        self.closable || container_closable
    }

    /// An edit-remove request for this pane is honored only when this holds.
    pub fn is_removable(&self, container_closable: bool) -> bool {
        !self.disabled && self.name.is_some() && self.is_closable(container_closable)
    }

    /// Label with a fallback to the name
    pub fn display_label(&self) -> String {
        if self.label.is_empty() {
            self.name.as_ref().map(|n| n.to_string()).unwrap_or_default()
        } else {
            self.label.clone()
        }
    }
}

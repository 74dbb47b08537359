//! Outbound notifications and the interactions that cause them

use serde::{Deserialize, Serialize};

use tabset_panes::{PaneDescriptor, PaneName};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditAction {
    Remove,
    Add,
}

impl EditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            EditAction::Remove => "remove",
            EditAction::Add => "add",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OriginKind {
    Pointer,
    Keyboard,
    Programmatic,
}

/// The renderer-side interaction that led to a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OriginEvent {
    pub kind: OriginKind,
    propagation_stopped: bool,
}

impl OriginEvent {
    pub fn new(kind: OriginKind) -> Self {
        Self {
            kind,
            propagation_stopped: false,
        }
    }

    pub fn pointer() -> Self {
        Self::new(OriginKind::Pointer)
    }

    pub fn keyboard() -> Self {
        Self::new(OriginKind::Keyboard)
    }

    pub fn programmatic() -> Self {
        Self::new(OriginKind::Programmatic)
    }

    /// Keep the interaction from reaching enclosing handlers.
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum TabsEvent {
    /// The bound value should follow the new active name
    ValueUpdated { name: PaneName },
    Change { name: PaneName },
    TabClick {
        pane: PaneDescriptor,
        origin: OriginEvent,
    },
    Edit {
        name: Option<PaneName>,
        action: EditAction,
    },
    TabRemove { name: PaneName },
    TabAdd,
}

impl TabsEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            TabsEvent::ValueUpdated { .. } => "value-updated",
            TabsEvent::Change { .. } => "change",
            TabsEvent::TabClick { .. } => "tab-click",
            TabsEvent::Edit { .. } => "edit",
            TabsEvent::TabRemove { .. } => "tab-remove",
            TabsEvent::TabAdd => "tab-add",
        }
    }
}

impl std::fmt::Display for TabsEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

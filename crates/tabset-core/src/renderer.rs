//! Tab navigation renderer contract
//!
//! Drawing the strip, keyboard focus and scrolling belong to the renderer.
//! The container hands it a snapshot each render pass and calls the two
//! imperative hooks below.

use serde::Serialize;

use tabset_panes::{PaneDescriptor, PaneIdentity, PaneName};

use crate::config::{TabPosition, TabType, TabsConfig};

pub trait TabNavRenderer: Send + Sync {
    fn render(&self, snapshot: &NavSnapshot);

    /// Bring the active tab into view. Called after a render pass.
    fn scroll_active_into_view(&self);

    /// Drop any keyboard focus ring left on the previous tab.
    fn clear_focus_ring(&self);
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub identity: PaneIdentity,
    pub name: Option<PaneName>,
    pub label: String,
    pub disabled: bool,
    /// Whether to draw a close button
    pub closable: bool,
    pub active: bool,
}

impl NavItem {
    fn from_descriptor(pane: &PaneDescriptor, config: &TabsConfig, current: &PaneName) -> Self {
        Self {
            identity: pane.identity(),
            name: pane.name.clone(),
            label: pane.display_label(),
            disabled: pane.disabled,
            closable: pane.is_closable(config.panes_closable()),
            active: pane.is_named(current),
        }
    }
}

/// Everything the renderer needs for one pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavSnapshot {
    pub items: Vec<NavItem>,
    pub current: PaneName,
    pub tab_type: TabType,
    pub tab_position: TabPosition,
    pub stretch: bool,
    pub editable: bool,
    pub show_add: bool,
}

impl NavSnapshot {
    pub(crate) fn build(panes: &[PaneDescriptor], current: PaneName, config: &TabsConfig) -> Self {
        let items = panes
            .iter()
            .map(|pane| NavItem::from_descriptor(pane, config, &current))
            .collect();

        Self {
            items,
            current,
            tab_type: config.tab_type,
            tab_position: config.tab_position,
            stretch: config.stretches(),
            editable: config.editable,
            show_add: config.shows_add_button(),
        }
    }

    /// Index of the first item marked active
    pub fn active_index(&self) -> Option<usize> {
        self.items.iter().position(|item| item.active)
    }

    pub fn active_item(&self) -> Option<&NavItem> {
        self.active_index().map(|index| &self.items[index])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tabset_panes::DocumentPosition;

    #[test]
    fn test_snapshot_items() {
        let a = PaneDescriptor::named(PaneIdentity::new(), "a").at(DocumentPosition::slot(0));
        let b = PaneDescriptor::named(PaneIdentity::new(), "b")
            .with_label("Bee")
            .with_closable(true)
            .at(DocumentPosition::slot(1));
        let config = TabsConfig {
            addable: true,
            stretch: true,
            ..TabsConfig::default()
        };

        let snapshot = NavSnapshot::build(&[a, b], PaneName::from("b"), &config);

        assert_eq!(snapshot.active_index(), Some(1));
        let active = snapshot.active_item().unwrap();
        assert_eq!(active.label, "Bee");
        assert!(active.closable);
        assert!(!snapshot.items[0].closable);
        assert!(snapshot.show_add);
        assert!(snapshot.stretch);
    }

    #[test]
    fn test_editable_makes_every_tab_closable() {
        let a = PaneDescriptor::named(PaneIdentity::new(), "a");
        let config = TabsConfig {
            editable: true,
            ..TabsConfig::default()
        };
        let snapshot = NavSnapshot::build(&[a], PaneName::from("x"), &config);
        assert!(snapshot.items[0].closable);
        assert_eq!(snapshot.active_index(), None);
    }
}

//! Registration protocol handed to child panes
//!
//! The container builds one context and passes it to every pane it hosts.
//! Panes register, update and unregister through it and may read the
//! active name and the configuration; they cannot change the active pane.

use parking_lot::RwLock;
use std::sync::Arc;

use tabset_active::ActiveTabState;
use tabset_panes::{PaneDescriptor, PaneIdentity, PaneName, PaneRegistry};

use crate::config::TabsConfig;
use crate::Result;

#[derive(Clone)]
pub struct TabsContext {
    registry: PaneRegistry,
    state: ActiveTabState,
    config: Arc<RwLock<TabsConfig>>,
}

impl TabsContext {
    pub(crate) fn new(
        registry: PaneRegistry,
        state: ActiveTabState,
        config: Arc<RwLock<TabsConfig>>,
    ) -> Self {
        Self {
            registry,
            state,
            config,
        }
    }

    pub fn register(&self, identity: PaneIdentity, descriptor: PaneDescriptor) {
        self.registry.register(identity, descriptor);
        self.mark_if_active(identity);
    }

    pub fn unregister(&self, identity: PaneIdentity) {
        self.registry.unregister(identity);
    }

    pub fn update<F>(&self, identity: PaneIdentity, f: F) -> Result<PaneDescriptor>
    where
        F: FnOnce(&mut PaneDescriptor),
    {
        self.registry.update(identity, f)?;
        self.mark_if_active(identity);
        self.registry.get(identity).ok_or_else(|| {
            tabset_panes::PaneError::NotFound(identity).into()
        })
    }

    pub fn descriptor(&self, identity: PaneIdentity) -> Option<PaneDescriptor> {
        self.registry.get(identity)
    }

    pub fn current_name(&self) -> PaneName {
        self.state.current()
    }

    pub fn is_current(&self, name: Option<&PaneName>) -> bool {
        name.is_some_and(|name| *name == self.state.current())
    }

    pub fn config(&self) -> TabsConfig {
        self.config.read().clone()
    }

    fn mark_if_active(&self, identity: PaneIdentity) {
        let current = self.state.current();
        let is_active = self
            .registry
            .get(identity)
            .is_some_and(|descriptor| descriptor.is_named(&current));
        if is_active {
            self.registry.mark_visited(&current);
        }
    }
}

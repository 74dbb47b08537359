//! Command / event dispatcher
//!
//! Turns renderer interactions into state machine requests and outbound
//! notifications. Edit requests are only announced; adding or removing the
//! pane itself is left to whoever owns the panes.

use tabset_active::{Outcome, Step};
use tabset_panes::{PaneDescriptor, PaneIdentity, PaneName};

use crate::container::Tabs;
use crate::event::{EditAction, OriginEvent, TabsEvent};

pub struct Dispatcher {
    tabs: Tabs,
}

impl Dispatcher {
    pub(crate) fn new(tabs: Tabs) -> Self {
        Self { tabs }
    }

    /// A tab was clicked or activated from the keyboard. The click is
    /// announced whatever the guard later decides.
    pub async fn handle_activate_request(
        &self,
        pane: &PaneDescriptor,
        candidate: Option<PaneName>,
        origin: OriginEvent,
    ) -> Outcome {
        if pane.disabled {
            tracing::debug!(pane_id = %pane.identity(), "Ignoring activation of disabled pane");
            return Outcome::Unchanged;
        }

        let step = self.tabs.begin_activation(candidate);
        self.tabs.emit(TabsEvent::TabClick {
            pane: pane.clone(),
            origin,
        });

        match step {
            Step::Done(outcome) => outcome,
            Step::Pending(pending) => self.tabs.finish_activation(pending).await,
        }
    }

    /// Returns whether the request was announced.
    pub fn handle_remove_request(&self, pane: &PaneDescriptor, origin: &mut OriginEvent) -> bool {
        let closable = self.tabs.config().panes_closable();
        let name = match &pane.name {
            Some(name) if pane.is_removable(closable) => name.clone(),
            _ => {
                tracing::debug!(pane_id = %pane.identity(), "Ignoring remove request");
                return false;
            }
        };

        origin.stop_propagation();
        self.tabs.emit(TabsEvent::Edit {
            name: Some(name.clone()),
            action: EditAction::Remove,
        });
        self.tabs.emit(TabsEvent::TabRemove { name });
        true
    }

    pub fn handle_add_request(&self) {
        self.tabs.emit(TabsEvent::Edit {
            name: None,
            action: EditAction::Add,
        });
        self.tabs.emit(TabsEvent::TabAdd);
    }

    /// Renderer-facing form of `handle_activate_request`, keyed by identity.
    pub async fn click(&self, identity: PaneIdentity, origin: OriginEvent) -> Outcome {
        match self.tabs.pane(identity) {
            Some(pane) => {
                let candidate = pane.name.clone();
                self.handle_activate_request(&pane, candidate, origin).await
            }
            None => Outcome::Unchanged,
        }
    }

    /// Renderer-facing form of `handle_remove_request`, keyed by identity.
    pub fn close(&self, identity: PaneIdentity, origin: &mut OriginEvent) -> bool {
        match self.tabs.pane(identity) {
            Some(pane) => self.handle_remove_request(&pane, origin),
            None => false,
        }
    }
}

//! Pane Registry
//!
//! Owns every pane descriptor of one container. Entries are stored by
//! identity; the ordered view is recomputed synchronously inside the same
//! write section as the mutation, and observers are notified only after
//! that, so no reader ever sees an order older than the last mutation.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

use crate::error::PaneError;
use crate::name::PaneName;
use crate::observer::{Observers, Subscription};
use crate::pane::{DocumentPosition, PaneDescriptor, PaneIdentity};
use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryChange {
    Registered(PaneIdentity),
    Updated(PaneIdentity),
    Unregistered(PaneIdentity),
    Reordered,
}

struct Entry {
    descriptor: PaneDescriptor,
    /// Registration sequence, only used to break position ties
    seq: u64,
}

#[derive(Default)]
struct RegistryInner {
    entries: HashMap<PaneIdentity, Entry>,
    ordered: Vec<PaneIdentity>,
    next_seq: u64,
}

impl RegistryInner {
    fn recompute_order(&mut self) {
        let mut ordered: Vec<(&DocumentPosition, u64, PaneIdentity)> = self
            .entries
            .iter()
            .map(|(id, entry)| (&entry.descriptor.position, entry.seq, *id))
            .collect();
        ordered.sort();
        self.ordered = ordered.into_iter().map(|(_, _, id)| id).collect();
    }

    fn ordered_descriptors(&self) -> Vec<PaneDescriptor> {
        self.ordered
            .iter()
            .filter_map(|id| self.entries.get(id))
            .map(|entry| entry.descriptor.clone())
            .collect()
    }
}

pub struct PaneRegistry {
    inner: Arc<RwLock<RegistryInner>>,
    observers: Observers<RegistryChange>,
}

impl PaneRegistry {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(RegistryInner::default())),
            observers: Observers::new(),
        }
    }

    /// Insert or replace the descriptor for `identity`. The stored
    /// descriptor always carries `identity` as its own.
    pub fn register(&self, identity: PaneIdentity, mut descriptor: PaneDescriptor) {
        if descriptor.identity() != identity {
            tracing::debug!(
                pane_id = %identity,
                descriptor_id = %descriptor.identity(),
                "Rekeying descriptor to its registry key"
            );
            descriptor.rekey(identity);
        }

        {
            let mut inner = self.inner.write();
            let seq = match inner.entries.get(&identity) {
                Some(existing) => {
                    let visited = existing.descriptor.visited() || descriptor.visited();
                    descriptor.set_visited(visited);
                    existing.seq
                }
                None => {
                    let seq = inner.next_seq;
                    inner.next_seq += 1;
                    seq
                }
            };
            inner.entries.insert(identity, Entry { descriptor, seq });
            inner.recompute_order();
        }

        tracing::debug!(pane_id = %identity, "Registered pane");
        self.observers.emit(&RegistryChange::Registered(identity));
    }

    /// Remove the entry for `identity`. Absent entries are ignored.
    pub fn unregister(&self, identity: PaneIdentity) {
        let removed = {
            let mut inner = self.inner.write();
            let removed = inner.entries.remove(&identity).is_some();
            if removed {
                inner.recompute_order();
            }
            removed
        };

        if removed {
            tracing::debug!(pane_id = %identity, "Unregistered pane");
            self.observers.emit(&RegistryChange::Unregistered(identity));
        }
    }

    /// Mutate a registered descriptor in place.
    pub fn update<F>(&self, identity: PaneIdentity, f: F) -> Result<PaneDescriptor>
    where
        F: FnOnce(&mut PaneDescriptor),
    {
        let updated = {
            let mut inner = self.inner.write();
            let entry = inner
                .entries
                .get_mut(&identity)
                .ok_or(PaneError::NotFound(identity))?;
            f(&mut entry.descriptor);
            let updated = entry.descriptor.clone();
            inner.recompute_order();
            updated
        };

        self.observers.emit(&RegistryChange::Updated(identity));
        Ok(updated)
    }

    /// Move one pane to a new place in the child structure.
    pub fn relocate(&self, identity: PaneIdentity, position: DocumentPosition) -> Result<()> {
        self.update(identity, |descriptor| descriptor.position = position)?;
        Ok(())
    }

    /// Apply a full layout pass: new positions for any number of panes,
    /// followed by a single recompute. Unknown identities are skipped.
    pub fn sync_layout<I>(&self, layout: I) -> usize
    where
        I: IntoIterator<Item = (PaneIdentity, DocumentPosition)>,
    {
        let moved = {
            let mut inner = self.inner.write();
            let mut moved = 0;
            for (identity, position) in layout {
                if let Some(entry) = inner.entries.get_mut(&identity) {
                    if entry.descriptor.position != position {
                        entry.descriptor.position = position;
                        moved += 1;
                    }
                }
            }
            if moved > 0 {
                inner.recompute_order();
            }
            moved
        };

        if moved > 0 {
            tracing::debug!(moved, "Pane layout changed");
            self.observers.emit(&RegistryChange::Reordered);
        }
        moved
    }

    /// Record that every pane named `name` has now been active.
    pub fn mark_visited(&self, name: &PaneName) -> usize {
        let newly_visited: Vec<PaneIdentity> = {
            let mut inner = self.inner.write();
            inner
                .entries
                .iter_mut()
                .filter(|(_, entry)| entry.descriptor.is_named(name) && !entry.descriptor.visited())
                .map(|(id, entry)| {
                    entry.descriptor.set_visited(true);
                    *id
                })
                .collect()
        };

        for identity in &newly_visited {
            self.observers.emit(&RegistryChange::Updated(*identity));
        }
        newly_visited.len()
    }

    /// Descriptors in document order as of the last mutation.
    pub fn ordered_view(&self) -> Vec<PaneDescriptor> {
        self.inner.read().ordered_descriptors()
    }

    pub fn ordered_identities(&self) -> Vec<PaneIdentity> {
        self.inner.read().ordered.clone()
    }

    pub fn get(&self, identity: PaneIdentity) -> Option<PaneDescriptor> {
        self.inner
            .read()
            .entries
            .get(&identity)
            .map(|entry| entry.descriptor.clone())
    }

    /// First pane in document order carrying `name`.
    pub fn find_by_name(&self, name: &PaneName) -> Option<PaneDescriptor> {
        let inner = self.inner.read();
        inner
            .ordered
            .iter()
            .filter_map(|id| inner.entries.get(id))
            .find(|entry| entry.descriptor.is_named(name))
            .map(|entry| entry.descriptor.clone())
    }

    pub fn contains(&self, identity: PaneIdentity) -> bool {
        self.inner.read().entries.contains_key(&identity)
    }

    pub fn len(&self) -> usize {
        self.inner.read().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Listen for registry mutations. Listeners run after the order is
    /// already recomputed.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&RegistryChange) + Send + Sync + 'static,
    {
        self.observers.subscribe(listener)
    }
}

impl Default for PaneRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for PaneRegistry {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            observers: self.observers.clone(),
        }
    }
}

//! Synchronous change observers
//!
//! Listeners run on the emitting thread right after the mutation that
//! triggered them. The listener list is snapshotted before dispatch, so a
//! listener may subscribe or drop subscriptions without deadlocking.

use parking_lot::RwLock;
use std::sync::{Arc, Weak};

type Listener<T> = Arc<dyn Fn(&T) + Send + Sync>;

struct ObserverList<T> {
    next_id: u64,
    listeners: Vec<(u64, Listener<T>)>,
}

pub struct Observers<T> {
    inner: Arc<RwLock<ObserverList<T>>>,
}

impl<T: 'static> Observers<T> {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(ObserverList {
                next_id: 0,
                listeners: Vec::new(),
            })),
        }
    }

    /// Attach a listener; it stays attached until the returned
    /// subscription is dropped.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let id = {
            let mut list = self.inner.write();
            let id = list.next_id;
            list.next_id += 1;
            list.listeners.push((id, Arc::new(listener)));
            id
        };

        let weak: Weak<RwLock<ObserverList<T>>> = Arc::downgrade(&self.inner);
        Subscription {
            detach: Some(Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    inner.write().listeners.retain(|(other, _)| *other != id);
                }
            })),
        }
    }

    pub fn emit(&self, event: &T) {
        let listeners: Vec<Listener<T>> = self
            .inner
            .read()
            .listeners
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();

        for listener in listeners {
            listener(event);
        }
    }

    pub fn len(&self) -> usize {
        self.inner.read().listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: 'static> Default for Observers<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Observers<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

/// Handle to an attached listener. Dropping it detaches the listener.
#[must_use = "dropping a subscription detaches the listener immediately"]
pub struct Subscription {
    detach: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl Subscription {
    /// Keep the listener attached for the lifetime of the observer list.
    pub fn forget(mut self) {
        self.detach = None;
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(detach) = self.detach.take() {
            detach();
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("attached", &self.detach.is_some())
            .finish()
    }
}

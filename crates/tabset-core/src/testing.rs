//! Test doubles shared by the unit tests

use parking_lot::Mutex;
use std::sync::Arc;

use tabset_panes::Subscription;

use crate::container::Tabs;
use crate::event::TabsEvent;
use crate::renderer::{NavSnapshot, TabNavRenderer};

#[derive(Default)]
pub(crate) struct RecordingRenderer {
    calls: Mutex<Vec<&'static str>>,
    snapshots: Mutex<Vec<NavSnapshot>>,
}

impl RecordingRenderer {
    pub(crate) fn attach(tabs: &Tabs) -> Arc<Self> {
        let renderer = Arc::new(Self::default());
        let shared: Arc<dyn TabNavRenderer> = renderer.clone();
        tabs.attach_renderer(shared);
        renderer
    }

    pub(crate) fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().clone()
    }

    fn count(&self, call: &str) -> usize {
        self.calls.lock().iter().filter(|c| **c == call).count()
    }

    pub(crate) fn scrolls(&self) -> usize {
        self.count("scroll_active_into_view")
    }

    pub(crate) fn focus_clears(&self) -> usize {
        self.count("clear_focus_ring")
    }

    pub(crate) fn last_snapshot(&self) -> Option<NavSnapshot> {
        self.snapshots.lock().last().cloned()
    }
}

impl TabNavRenderer for RecordingRenderer {
    fn render(&self, snapshot: &NavSnapshot) {
        self.calls.lock().push("render");
        self.snapshots.lock().push(snapshot.clone());
    }

    fn scroll_active_into_view(&self) {
        self.calls.lock().push("scroll_active_into_view");
    }

    fn clear_focus_ring(&self) {
        self.calls.lock().push("clear_focus_ring");
    }
}

pub(crate) fn record_events(tabs: &Tabs) -> (Arc<Mutex<Vec<TabsEvent>>>, Subscription) {
    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&events);
    let subscription = tabs.subscribe(move |event| sink.lock().push(event.clone()));
    (events, subscription)
}

//! Tabbed container
//!
//! Owns the registry, the active state machine and the renderer link.
//! Every committed change is announced as value-updated then change, clears
//! the renderer's focus ring, and queues one scroll-into-view that runs
//! after the next render pass.

use parking_lot::{Mutex, RwLock};
use std::future::Future;
use std::sync::Arc;
use tokio::sync::watch;

use tabset_active::{ActiveTabState, BeforeLeave, Outcome, PendingTransition, Phase, Step};
use tabset_panes::{Observers, PaneDescriptor, PaneIdentity, PaneName, PaneRegistry, Subscription};

use crate::config::TabsConfig;
use crate::context::TabsContext;
use crate::dispatcher::Dispatcher;
use crate::event::TabsEvent;
use crate::renderer::{NavSnapshot, TabNavRenderer};

struct RenderQueue {
    /// Something changed since the last render pass
    dirty: bool,
    /// One entry per committed change awaiting a render pass
    pending_scrolls: usize,
}

pub struct Tabs {
    config: Arc<RwLock<TabsConfig>>,
    registry: PaneRegistry,
    state: ActiveTabState,
    events: Observers<TabsEvent>,
    renderer: Arc<RwLock<Option<Arc<dyn TabNavRenderer>>>>,
    queue: Arc<Mutex<RenderQueue>>,
    render_pass: Arc<watch::Sender<u64>>,
}

impl Tabs {
    pub fn new(config: TabsConfig) -> Self {
        Self::with_before_leave(config, BeforeLeave::allow_all())
    }

    pub fn with_before_leave(config: TabsConfig, before_leave: BeforeLeave) -> Self {
        if config.active_name.is_some() {
            tracing::warn!("`active_name` is deprecated, use `model_value` instead");
        }

        let seed = config.initial_name();
        let registry = PaneRegistry::new();
        let queue = Arc::new(Mutex::new(RenderQueue {
            dirty: true,
            pending_scrolls: 0,
        }));

        let dirty = Arc::clone(&queue);
        registry
            .subscribe(move |_| dirty.lock().dirty = true)
            .forget();

        let (render_pass, _) = watch::channel(0);

        tracing::debug!(initial = %seed, controlled = config.is_controlled(), "Created tab container");

        Self {
            config: Arc::new(RwLock::new(config)),
            registry,
            state: ActiveTabState::with_guard(seed, before_leave),
            events: Observers::new(),
            renderer: Arc::new(RwLock::new(None)),
            queue,
            render_pass: Arc::new(render_pass),
        }
    }

    // === Read-only state ===

    pub fn current_name(&self) -> PaneName {
        self.state.current()
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    pub fn config(&self) -> TabsConfig {
        self.config.read().clone()
    }

    /// Panes in render order
    pub fn panes(&self) -> Vec<PaneDescriptor> {
        self.registry.ordered_view()
    }

    pub fn pane(&self, identity: PaneIdentity) -> Option<PaneDescriptor> {
        self.registry.get(identity)
    }

    /// First pane in render order carrying the active name
    pub fn active_pane(&self) -> Option<PaneDescriptor> {
        self.registry.find_by_name(&self.state.current())
    }

    pub fn context(&self) -> TabsContext {
        TabsContext::new(
            self.registry.clone(),
            self.state.clone(),
            Arc::clone(&self.config),
        )
    }

    pub fn dispatcher(&self) -> Dispatcher {
        Dispatcher::new(self.clone())
    }

    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&TabsEvent) + Send + Sync + 'static,
    {
        self.events.subscribe(listener)
    }

    // === Inputs ===

    pub fn set_before_leave(&self, before_leave: BeforeLeave) {
        self.state.set_guard(before_leave);
    }

    /// Presentation options only; the value inputs keep going through
    /// `set_model_value` / `set_active_name`.
    pub fn configure<F>(&self, f: F)
    where
        F: FnOnce(&mut TabsConfig),
    {
        {
            let mut config = self.config.write();
            let model_value = config.model_value.clone();
            let active_name = config.active_name.clone();
            f(&mut *config);
            config.model_value = model_value;
            config.active_name = active_name;
        }
        self.queue.lock().dirty = true;
    }

    /// Controlled value changed from outside. Goes through the guard like
    /// any other request.
    pub async fn set_model_value(&self, value: Option<PaneName>) -> Outcome {
        let changed = {
            let mut config = self.config.write();
            if config.model_value == value {
                false
            } else {
                config.model_value = value.clone();
                true
            }
        };

        if !changed {
            return Outcome::Unchanged;
        }
        self.request_activate(value).await
    }

    /// Deprecated alias input, synchronized like `set_model_value`.
    pub async fn set_active_name(&self, value: Option<PaneName>) -> Outcome {
        let changed = {
            let mut config = self.config.write();
            if config.active_name == value {
                false
            } else {
                config.active_name = value.clone();
                true
            }
        };

        if !changed {
            return Outcome::Unchanged;
        }
        tracing::warn!("`active_name` is deprecated, use `model_value` instead");
        self.request_activate(value).await
    }

    pub async fn request_activate(&self, candidate: Option<PaneName>) -> Outcome {
        match self.begin_activation(candidate) {
            Step::Done(outcome) => outcome,
            Step::Pending(pending) => self.finish_activation(pending).await,
        }
    }

    pub(crate) fn begin_activation(&self, candidate: Option<PaneName>) -> Step {
        let step = self.state.start(candidate);
        if let Step::Done(outcome) = &step {
            self.apply(outcome);
        }
        step
    }

    pub(crate) async fn finish_activation(&self, pending: PendingTransition) -> Outcome {
        let outcome = pending.resolve().await;
        self.apply(&outcome);
        outcome
    }

    fn apply(&self, outcome: &Outcome) {
        let Some(name) = outcome.committed_name() else {
            return;
        };

        self.registry.mark_visited(name);
        self.emit(TabsEvent::ValueUpdated { name: name.clone() });
        self.emit(TabsEvent::Change { name: name.clone() });

        if let Some(renderer) = self.renderer() {
            renderer.clear_focus_ring();
        }

        let mut queue = self.queue.lock();
        queue.dirty = true;
        queue.pending_scrolls += 1;
    }

    pub(crate) fn emit(&self, event: TabsEvent) {
        tracing::trace!(event = %event, "Emitting tabs event");
        self.events.emit(&event);
    }

    // === Rendering ===

    pub fn attach_renderer(&self, renderer: Arc<dyn TabNavRenderer>) {
        *self.renderer.write() = Some(renderer);
        self.queue.lock().dirty = true;
    }

    pub fn detach_renderer(&self) -> Option<Arc<dyn TabNavRenderer>> {
        self.renderer.write().take()
    }

    fn renderer(&self) -> Option<Arc<dyn TabNavRenderer>> {
        self.renderer.read().clone()
    }

    pub fn snapshot(&self) -> NavSnapshot {
        let config = self.config.read().clone();
        NavSnapshot::build(&self.registry.ordered_view(), self.state.current(), &config)
    }

    pub fn is_dirty(&self) -> bool {
        self.queue.lock().dirty
    }

    /// Run one render pass: hand the renderer a fresh snapshot, then run
    /// the scrolls queued by changes committed before this pass.
    pub fn render(&self) -> NavSnapshot {
        let snapshot = self.snapshot();
        let renderer = self.renderer();

        if let Some(renderer) = &renderer {
            renderer.render(&snapshot);
        }

        let scrolls = {
            let mut queue = self.queue.lock();
            queue.dirty = false;
            std::mem::take(&mut queue.pending_scrolls)
        };

        if let Some(renderer) = &renderer {
            for _ in 0..scrolls {
                renderer.scroll_active_into_view();
            }
        }

        self.render_pass.send_modify(|pass| *pass += 1);
        tracing::trace!(items = snapshot.items.len(), scrolls, "Render pass complete");

        snapshot
    }

    /// Resolves once the next render pass has completed.
    pub fn next_render(&self) -> impl Future<Output = ()> + Send + 'static {
        let mut passes = self.render_pass.subscribe();
        async move {
            let _ = passes.changed().await;
        }
    }
}

impl Default for Tabs {
    fn default() -> Self {
        Self::new(TabsConfig::default())
    }
}

impl Clone for Tabs {
    fn clone(&self) -> Self {
        Self {
            config: Arc::clone(&self.config),
            registry: self.registry.clone(),
            state: self.state.clone(),
            events: self.events.clone(),
            renderer: Arc::clone(&self.renderer),
            queue: Arc::clone(&self.queue),
            render_pass: Arc::clone(&self.render_pass),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::OriginEvent;
    use crate::testing::{record_events, RecordingRenderer};
    use futures_util::FutureExt;
    use tabset_active::GuardError;
    use tabset_panes::DocumentPosition;
    use tokio::sync::oneshot;

    fn name(s: &str) -> PaneName {
        PaneName::from(s)
    }

    fn mount(tabs: &Tabs, pane_name: &str, slot: u32) -> PaneIdentity {
        let id = PaneIdentity::new();
        tabs.context().register(
            id,
            PaneDescriptor::named(id, pane_name).at(DocumentPosition::slot(slot)),
        );
        id
    }

    fn ordered_names(tabs: &Tabs) -> Vec<PaneName> {
        tabs.panes().into_iter().filter_map(|p| p.name).collect()
    }

    #[tokio::test]
    async fn test_activate_emits_value_then_change() {
        let tabs = Tabs::default();
        mount(&tabs, "a", 0);
        mount(&tabs, "b", 1);
        let (events, _subscription) = record_events(&tabs);

        let outcome = tabs.request_activate(Some(name("b"))).await;

        assert!(outcome.is_committed());
        assert_eq!(tabs.current_name(), name("b"));
        assert_eq!(
            *events.lock(),
            vec![
                TabsEvent::ValueUpdated { name: name("b") },
                TabsEvent::Change { name: name("b") },
            ]
        );
    }

    #[tokio::test]
    async fn test_request_current_is_silent() {
        let tabs = Tabs::new(TabsConfig::controlled("a"));
        let renderer = RecordingRenderer::attach(&tabs);
        let (events, _subscription) = record_events(&tabs);

        assert_eq!(tabs.request_activate(Some(name("a"))).await, Outcome::Unchanged);
        tabs.render();

        assert!(events.lock().is_empty());
        assert_eq!(renderer.scrolls(), 0);
        assert_eq!(renderer.focus_clears(), 0);
    }

    #[tokio::test]
    async fn test_guard_false_keeps_state_silent() {
        let tabs = Tabs::with_before_leave(
            TabsConfig::controlled("a"),
            BeforeLeave::sync(|candidate: &PaneName, _: &PaneName| candidate != &PaneName::from("c")),
        );
        mount(&tabs, "a", 0);
        mount(&tabs, "c", 1);
        let renderer = RecordingRenderer::attach(&tabs);
        let (events, _subscription) = record_events(&tabs);

        let outcome = tabs.request_activate(Some(name("c"))).await;
        tabs.render();

        assert_eq!(outcome, Outcome::Denied { candidate: name("c") });
        assert_eq!(tabs.current_name(), name("a"));
        assert!(events.lock().is_empty());
        assert_eq!(renderer.focus_clears(), 0);
        assert_eq!(renderer.scrolls(), 0);
        assert_eq!(renderer.last_snapshot().unwrap().current, name("a"));
    }

    #[tokio::test]
    async fn test_renderer_identity_reaches_mismatched_registration() {
        let tabs = Tabs::new(TabsConfig::controlled("a"));
        let key = PaneIdentity::new();
        tabs.context()
            .register(key, PaneDescriptor::named(PaneIdentity::new(), "b"));

        let shown = tabs.snapshot().items[0].identity;
        assert_eq!(shown, key);

        let outcome = tabs.dispatcher().click(shown, OriginEvent::pointer()).await;
        assert!(outcome.is_committed());
        assert_eq!(tabs.current_name(), name("b"));

        tabs.context().unregister(shown);
        assert!(tabs.panes().is_empty());
    }

    #[tokio::test]
    async fn test_detached_renderer_is_not_called() {
        let tabs = Tabs::default();
        let renderer = RecordingRenderer::attach(&tabs);
        assert!(tabs.detach_renderer().is_some());
        assert!(tabs.detach_renderer().is_none());

        tabs.request_activate(Some(name("b"))).await;
        tabs.render();

        assert!(renderer.calls().is_empty());
    }

    #[tokio::test]
    async fn test_guard_error_keeps_state() {
        let tabs = Tabs::with_before_leave(
            TabsConfig::controlled("a"),
            BeforeLeave::future(|_: &PaneName, _: &PaneName| async {
                Err::<bool, _>(GuardError::Failed("unsaved changes".to_string()))
            }),
        );
        let (events, _subscription) = record_events(&tabs);

        tabs.request_activate(Some(name("b"))).await;

        assert_eq!(tabs.current_name(), name("a"));
        assert!(events.lock().is_empty());
    }

    #[tokio::test]
    async fn test_controlled_sync_emits_once() {
        let tabs = Tabs::new(TabsConfig::controlled("a"));
        let (events, _subscription) = record_events(&tabs);

        tabs.set_model_value(Some(name("x"))).await;
        // Same value again is not a change
        tabs.set_model_value(Some(name("x"))).await;

        assert_eq!(tabs.current_name(), name("x"));
        assert_eq!(
            *events.lock(),
            vec![
                TabsEvent::ValueUpdated { name: name("x") },
                TabsEvent::Change { name: name("x") },
            ]
        );
    }

    #[tokio::test]
    async fn test_controlled_sync_goes_through_guard() {
        let tabs = Tabs::with_before_leave(
            TabsConfig::controlled("a"),
            BeforeLeave::sync(|_: &PaneName, _: &PaneName| false),
        );

        let outcome = tabs.set_model_value(Some(name("x"))).await;

        assert!(!outcome.is_committed());
        assert_eq!(tabs.current_name(), name("a"));
        assert_eq!(tabs.config().model_value, Some(name("x")));
    }

    #[tokio::test]
    async fn test_legacy_active_name_sync() {
        let tabs = Tabs::new(TabsConfig {
            active_name: Some(name("first")),
            ..TabsConfig::default()
        });
        assert_eq!(tabs.current_name(), name("first"));

        assert!(tabs.set_active_name(Some(name("second"))).await.is_committed());
        assert_eq!(tabs.current_name(), name("second"));
    }

    #[tokio::test]
    async fn test_clearing_model_value_keeps_current() {
        let tabs = Tabs::new(TabsConfig::controlled("a"));
        assert_eq!(tabs.set_model_value(None).await, Outcome::Unchanged);
        assert_eq!(tabs.current_name(), name("a"));
        assert!(!tabs.config().is_controlled());
    }

    #[tokio::test]
    async fn test_scroll_once_per_change_after_render() {
        let tabs = Tabs::default();
        let renderer = RecordingRenderer::attach(&tabs);
        mount(&tabs, "a", 0);
        mount(&tabs, "b", 1);

        tabs.request_activate(Some(name("a"))).await;
        assert_eq!(renderer.focus_clears(), 1);
        // Nothing scrolls before the render pass
        assert_eq!(renderer.scrolls(), 0);

        tabs.request_activate(Some(name("b"))).await;
        tabs.render();
        assert_eq!(renderer.scrolls(), 2);
        assert_eq!(renderer.last_snapshot().unwrap().current, name("b"));

        // Later passes without changes do not scroll again
        tabs.render();
        assert_eq!(renderer.scrolls(), 2);
        assert_eq!(
            renderer.calls(),
            vec![
                "clear_focus_ring",
                "clear_focus_ring",
                "render",
                "scroll_active_into_view",
                "scroll_active_into_view",
                "render",
            ]
        );
    }

    #[tokio::test]
    async fn test_next_render_resolves_after_pass() {
        let tabs = Tabs::default();
        let mut waiter = Box::pin(tabs.next_render());
        assert!((&mut waiter).now_or_never().is_none());

        tabs.render();
        waiter.await;
    }

    #[tokio::test]
    async fn test_dirty_tracking() {
        let tabs = Tabs::default();
        assert!(tabs.is_dirty());
        tabs.render();
        assert!(!tabs.is_dirty());

        let id = mount(&tabs, "a", 0);
        assert!(tabs.is_dirty());
        tabs.render();

        tabs.context().unregister(id);
        assert!(tabs.is_dirty());
        tabs.render();

        tabs.configure(|config| config.stretch = true);
        assert!(tabs.is_dirty());
    }

    #[tokio::test]
    async fn test_configure_cannot_bypass_guard() {
        let tabs = Tabs::new(TabsConfig::controlled("a"));
        tabs.configure(|config| {
            config.model_value = Some(PaneName::from("z"));
            config.editable = true;
        });

        let config = tabs.config();
        assert!(config.editable);
        assert_eq!(config.model_value, Some(name("a")));
        assert_eq!(tabs.current_name(), name("a"));
    }

    #[tokio::test]
    async fn test_order_and_active_pane() {
        let tabs = Tabs::new(TabsConfig::controlled("b"));
        mount(&tabs, "c", 2);
        let a = mount(&tabs, "a", 0);
        mount(&tabs, "b", 1);

        assert_eq!(ordered_names(&tabs), vec![name("a"), name("b"), name("c")]);
        assert_eq!(tabs.active_pane().unwrap().name, Some(name("b")));
        assert!(tabs.active_pane().unwrap().visited());

        tabs.context()
            .update(a, |pane| pane.position = DocumentPosition::slot(9))
            .unwrap();
        assert_eq!(ordered_names(&tabs), vec![name("b"), name("c"), name("a")]);
    }

    #[tokio::test]
    async fn test_last_write_wins_through_container() {
        let (allow_a, gate_a) = oneshot::channel::<bool>();
        let (allow_b, gate_b) = oneshot::channel::<bool>();
        let gates = Arc::new(Mutex::new(vec![gate_a, gate_b]));

        let tabs = Tabs::with_before_leave(
            TabsConfig::controlled("start"),
            BeforeLeave::future(move |_: &PaneName, _: &PaneName| {
                let gate = gates.lock().remove(0);
                async move { gate.await.map_err(|_| GuardError::Dropped) }
            }),
        );
        let (events, _subscription) = record_events(&tabs);

        let Step::Pending(first) = tabs.begin_activation(Some(name("A"))) else {
            panic!("guard should be pending");
        };
        let Step::Pending(second) = tabs.begin_activation(Some(name("B"))) else {
            panic!("guard should be pending");
        };

        allow_b.send(true).unwrap();
        assert!(tabs.finish_activation(second).await.is_committed());
        allow_a.send(true).unwrap();
        assert_eq!(
            tabs.finish_activation(first).await,
            Outcome::Superseded { candidate: name("A") }
        );

        assert_eq!(tabs.current_name(), name("B"));
        assert_eq!(events.lock().len(), 2);
    }
}

//! Tabset Core
//!
//! Controller for a tabbed container: panes register through a context,
//! the active pane changes only through the leave guard, and the
//! navigation renderer is driven by explicit render passes.

mod config;
mod container;
mod context;
mod dispatcher;
mod error;
mod event;
mod pane;
mod renderer;
#[cfg(test)]
mod testing;

pub use config::{TabPosition, TabType, TabsConfig};
pub use container::Tabs;
pub use context::TabsContext;
pub use dispatcher::Dispatcher;
pub use error::CoreError;
pub use event::{EditAction, OriginEvent, OriginKind, TabsEvent};
pub use pane::{PaneProps, TabPane};
pub use renderer::{NavItem, NavSnapshot, TabNavRenderer};

// Re-export the building blocks
pub use tabset_active::{
    ActiveTabState, BeforeLeave, GuardError, GuardFuture, GuardReply, Outcome, PendingTransition,
    Phase, Step, Verdict,
};
pub use tabset_panes::{
    DocumentPosition, Observers, PaneDescriptor, PaneError, PaneIdentity, PaneName, PaneRegistry,
    RegistryChange, Subscription,
};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().with_env_filter(filter).with_target(true).init();
}

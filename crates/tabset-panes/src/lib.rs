//! Tabset Panes
//!
//! Pane descriptors and the registry that owns them.
//! Storage is keyed by identity; every read is ordered by document position.

mod error;
mod name;
mod observer;
mod pane;
mod registry;

pub use error::PaneError;
pub use name::PaneName;
pub use observer::{Observers, Subscription};
pub use pane::{DocumentPosition, PaneDescriptor, PaneIdentity};
pub use registry::{PaneRegistry, RegistryChange};

pub type Result<T> = std::result::Result<T, PaneError>;

//! Pane error types

use thiserror::Error;

use crate::pane::PaneIdentity;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PaneError {
    #[error("Pane not registered: {0}")]
    NotFound(PaneIdentity),
}

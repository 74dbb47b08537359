//! Core error types
//!
//! Guard denials and failures never show up here; they only ever leave the
//! active pane where it was.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Pane error: {0}")]
    Pane(#[from] tabset_panes::PaneError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

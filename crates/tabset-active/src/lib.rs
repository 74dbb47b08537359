//! Tabset Active Pane
//!
//! Tracks which pane is active and moves between panes only with the
//! consent of the leave guard. Guard answers may arrive late and out of
//! order; only the most recent request is ever applied.

mod error;
mod guard;
mod machine;
mod phase;

pub use error::GuardError;
pub use guard::{BeforeLeave, GuardFuture, GuardReply, Verdict};
pub use machine::{ActiveTabState, Outcome, PendingTransition, Step};
pub use phase::Phase;

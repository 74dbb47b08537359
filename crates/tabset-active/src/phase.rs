//! Transition phase
//!
//! ```text
//! Idle
//!   ↓ request_activate(candidate ≠ current)
//! Transitioning { candidate }
//!   ↓ latest guard answer (allow or deny)
//! Idle
//! ```

use serde::{Deserialize, Serialize};

use tabset_panes::PaneName;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "lowercase")]
pub enum Phase {
    /// No guard answer outstanding
    Idle,
    /// Waiting on the guard for the most recent candidate
    Transitioning { candidate: PaneName },
}

impl Phase {
    pub fn is_idle(&self) -> bool {
        matches!(self, Phase::Idle)
    }

    pub fn candidate(&self) -> Option<&PaneName> {
        match self {
            Phase::Idle => None,
            Phase::Transitioning { candidate } => Some(candidate),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Transitioning { .. } => "transitioning",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_accessors() {
        assert!(Phase::Idle.is_idle());
        assert_eq!(Phase::Idle.candidate(), None);

        let phase = Phase::Transitioning {
            candidate: PaneName::from("b"),
        };
        assert!(!phase.is_idle());
        assert_eq!(phase.candidate(), Some(&PaneName::from("b")));
        assert_eq!(phase.to_string(), "transitioning");
    }
}

//! Active Tab State Machine
//!
//! Holds the active pane name and moves it only through the leave guard.
//! Every real request bumps a generation counter; a guard answer is applied
//! only if its generation is still the latest, so late answers for
//! superseded requests are dropped.

use parking_lot::{Mutex, RwLock};
use std::sync::Arc;

use tabset_panes::PaneName;

use crate::guard::{settle, BeforeLeave, GuardFuture, GuardReply, Verdict};
use crate::phase::Phase;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Candidate missing or already active
    Unchanged,
    Committed {
        previous: PaneName,
        current: PaneName,
    },
    /// The guard said no, or failed
    Denied { candidate: PaneName },
    /// A newer request started before this guard answered
    Superseded { candidate: PaneName },
}

impl Outcome {
    pub fn is_committed(&self) -> bool {
        matches!(self, Outcome::Committed { .. })
    }

    /// The newly active name, if this outcome changed it
    pub fn committed_name(&self) -> Option<&PaneName> {
        match self {
            Outcome::Committed { current, .. } => Some(current),
            _ => None,
        }
    }
}

/// Result of the synchronous half of a request.
#[derive(Debug)]
pub enum Step {
    Done(Outcome),
    Pending(PendingTransition),
}

/// A request whose guard answer has not arrived yet.
#[must_use = "the transition only completes when resolved"]
pub struct PendingTransition {
    state: ActiveTabState,
    generation: u64,
    candidate: PaneName,
    answer: GuardFuture,
}

impl PendingTransition {
    pub fn candidate(&self) -> &PaneName {
        &self.candidate
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Wait for the guard and apply its answer if still current.
    pub async fn resolve(self) -> Outcome {
        let verdict = settle(self.answer.await);
        self.state.finish(self.generation, self.candidate, verdict)
    }
}

impl std::fmt::Debug for PendingTransition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingTransition")
            .field("generation", &self.generation)
            .field("candidate", &self.candidate)
            .finish()
    }
}

struct Inner {
    current: PaneName,
    generation: u64,
    /// Generation and candidate of the request the phase is waiting on
    pending: Option<(u64, PaneName)>,
}

pub struct ActiveTabState {
    inner: Arc<Mutex<Inner>>,
    guard: Arc<RwLock<BeforeLeave>>,
}

impl ActiveTabState {
    pub fn new(seed: PaneName) -> Self {
        Self::with_guard(seed, BeforeLeave::allow_all())
    }

    pub fn with_guard(seed: PaneName, guard: BeforeLeave) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                current: seed,
                generation: 0,
                pending: None,
            })),
            guard: Arc::new(RwLock::new(guard)),
        }
    }

    pub fn current(&self) -> PaneName {
        self.inner.lock().current.clone()
    }

    pub fn phase(&self) -> Phase {
        match &self.inner.lock().pending {
            Some((_, candidate)) => Phase::Transitioning {
                candidate: candidate.clone(),
            },
            None => Phase::Idle,
        }
    }

    pub fn generation(&self) -> u64 {
        self.inner.lock().generation
    }

    /// Replace the leave guard. Requests already waiting keep the answer
    /// of the guard they asked.
    pub fn set_guard(&self, guard: BeforeLeave) {
        *self.guard.write() = guard;
    }

    /// Synchronous half of a request: the no-op check, the generation bump
    /// and the guard call. A guard that answers on the spot is applied
    /// before this returns.
    pub fn start(&self, candidate: Option<PaneName>) -> Step {
        let Some(candidate) = candidate else {
            return Step::Done(Outcome::Unchanged);
        };

        let (generation, current) = {
            let mut inner = self.inner.lock();
            if inner.current == candidate {
                return Step::Done(Outcome::Unchanged);
            }
            inner.generation += 1;
            let generation = inner.generation;
            inner.pending = Some((generation, candidate.clone()));
            (generation, inner.current.clone())
        };

        tracing::debug!(
            generation,
            candidate = %candidate,
            current = %current,
            "Asking leave guard"
        );

        // The guard runs without any lock held; it may read the state.
        let guard = self.guard.read().clone();
        match guard.ask(&candidate, &current) {
            GuardReply::Ready(answer) => {
                Step::Done(self.finish(generation, candidate, settle(answer)))
            }
            GuardReply::Pending(answer) => Step::Pending(PendingTransition {
                state: self.clone(),
                generation,
                candidate,
                answer,
            }),
        }
    }

    /// Ask to make `candidate` the active pane and wait for the outcome.
    pub async fn request_activate(&self, candidate: Option<PaneName>) -> Outcome {
        match self.start(candidate) {
            Step::Done(outcome) => outcome,
            Step::Pending(pending) => pending.resolve().await,
        }
    }

    fn finish(&self, generation: u64, candidate: PaneName, verdict: Verdict) -> Outcome {
        let mut inner = self.inner.lock();

        if inner.generation != generation {
            tracing::debug!(
                generation,
                latest = inner.generation,
                candidate = %candidate,
                "Discarding stale guard answer"
            );
            return Outcome::Superseded { candidate };
        }

        inner.pending = None;
        match verdict {
            Verdict::Allow => {
                let previous = std::mem::replace(&mut inner.current, candidate.clone());
                tracing::info!(from = %previous, to = %candidate, "Active pane changed");
                Outcome::Committed {
                    previous,
                    current: candidate,
                }
            }
            Verdict::Deny => {
                tracing::debug!(candidate = %candidate, "Leave guard kept the active pane");
                Outcome::Denied { candidate }
            }
        }
    }
}

impl Clone for ActiveTabState {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            guard: Arc::clone(&self.guard),
        }
    }
}

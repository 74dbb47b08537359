//! Leave guard
//!
//! A function value `(candidate, current) -> allow | deny` consulted before
//! the active pane changes. It may answer on the spot or hand back a future.

use futures_util::future::{BoxFuture, FutureExt};
use std::future::Future;
use std::sync::Arc;

use tabset_panes::PaneName;

use crate::error::GuardError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Allow,
    Deny,
}

impl From<bool> for Verdict {
    fn from(allow: bool) -> Self {
        if allow {
            Verdict::Allow
        } else {
            Verdict::Deny
        }
    }
}

/// A guard that answers nothing allows the change.
impl From<Option<bool>> for Verdict {
    fn from(answer: Option<bool>) -> Self {
        answer.map(Verdict::from).unwrap_or(Verdict::Allow)
    }
}

impl From<()> for Verdict {
    fn from(_: ()) -> Self {
        Verdict::Allow
    }
}

pub type GuardFuture = BoxFuture<'static, Result<Verdict, GuardError>>;

pub enum GuardReply {
    Ready(Result<Verdict, GuardError>),
    Pending(GuardFuture),
}

impl std::fmt::Debug for GuardReply {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GuardReply::Ready(result) => f.debug_tuple("Ready").field(result).finish(),
            GuardReply::Pending(_) => f.write_str("Pending"),
        }
    }
}

type GuardFn = dyn Fn(&PaneName, &PaneName) -> GuardReply + Send + Sync;

#[derive(Clone, Default)]
pub struct BeforeLeave {
    guard: Option<Arc<GuardFn>>,
}

impl BeforeLeave {
    /// The default guard: every change is allowed.
    pub fn allow_all() -> Self {
        Self { guard: None }
    }

    pub fn new<F>(guard: F) -> Self
    where
        F: Fn(&PaneName, &PaneName) -> GuardReply + Send + Sync + 'static,
    {
        Self {
            guard: Some(Arc::new(guard)),
        }
    }

    /// Guard that answers synchronously with `bool`, `Option<bool>` or `()`.
    pub fn sync<F, V>(guard: F) -> Self
    where
        F: Fn(&PaneName, &PaneName) -> V + Send + Sync + 'static,
        V: Into<Verdict>,
    {
        Self::new(move |candidate, current| GuardReply::Ready(Ok(guard(candidate, current).into())))
    }

    /// Synchronous guard that can fail.
    pub fn fallible<F, V>(guard: F) -> Self
    where
        F: Fn(&PaneName, &PaneName) -> Result<V, GuardError> + Send + Sync + 'static,
        V: Into<Verdict>,
    {
        Self::new(move |candidate, current| {
            GuardReply::Ready(guard(candidate, current).map(Into::<Verdict>::into))
        })
    }

    /// Guard that answers through a future.
    pub fn future<F, Fut, V>(guard: F) -> Self
    where
        F: Fn(&PaneName, &PaneName) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<V, GuardError>> + Send + 'static,
        V: Into<Verdict>,
    {
        Self::new(move |candidate, current| {
            GuardReply::Pending(guard(candidate, current).map(|r| r.map(Into::<Verdict>::into)).boxed())
        })
    }

    pub fn is_allow_all(&self) -> bool {
        self.guard.is_none()
    }

    pub fn ask(&self, candidate: &PaneName, current: &PaneName) -> GuardReply {
        match &self.guard {
            Some(guard) => guard(candidate, current),
            None => GuardReply::Ready(Ok(Verdict::Allow)),
        }
    }
}

impl std::fmt::Debug for BeforeLeave {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BeforeLeave")
            .field("custom", &self.guard.is_some())
            .finish()
    }
}

/// Collapse a guard answer to allow/deny; failures deny.
pub(crate) fn settle(answer: Result<Verdict, GuardError>) -> Verdict {
    answer.unwrap_or(Verdict::Deny)
}

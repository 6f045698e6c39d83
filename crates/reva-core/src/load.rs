//! Per-screen data-loading state machine.
//!
//! ```text
//! Loading --ok--> Ready
//! Loading --err-> Failed --retry--> Loading
//! ```
//!
//! Every load is identified by a [`LoadTicket`]. Starting a new load (route
//! parameter changed, user retried) cancels the previous ticket, and a
//! completion carrying anything but the current ticket is dropped.

use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T> {
    Loading,
    Ready(T),
    /// Human-readable message shown with a retry affordance.
    Failed(String),
}

impl<T> LoadState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, LoadState::Failed(_))
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            LoadState::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            LoadState::Failed(msg) => Some(msg),
            _ => None,
        }
    }
}

/// Correlation and cancellation handle for one in-flight load.
#[derive(Debug, Clone)]
pub struct LoadTicket<P> {
    generation: u64,
    param: P,
    cancel: CancellationToken,
}

impl<P> LoadTicket<P> {
    /// Route parameter this load was started for.
    pub fn param(&self) -> &P {
        &self.param
    }

    pub fn cancel_token(&self) -> &CancellationToken {
        &self.cancel
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

/// Load state of one screen, keyed by its route parameter `P`.
#[derive(Debug)]
pub struct ScreenLoader<P, T> {
    state: LoadState<T>,
    current: Option<LoadTicket<P>>,
    generation: u64,
}

impl<P: Clone + PartialEq, T> Default for ScreenLoader<P, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Clone + PartialEq, T> ScreenLoader<P, T> {
    pub fn new() -> Self {
        Self {
            state: LoadState::Loading,
            current: None,
            generation: 0,
        }
    }

    pub fn state(&self) -> &LoadState<T> {
        &self.state
    }

    /// Parameter of the most recent load, if one was started.
    pub fn param(&self) -> Option<&P> {
        self.current.as_ref().map(|t| &t.param)
    }

    /// Enter `Loading` for `param`, cancelling any load still in flight.
    pub fn begin(&mut self, param: P) -> LoadTicket<P> {
        if let Some(prev) = self.current.take() {
            prev.cancel.cancel();
        }
        self.generation += 1;
        let ticket = LoadTicket {
            generation: self.generation,
            param,
            cancel: CancellationToken::new(),
        };
        self.state = LoadState::Loading;
        self.current = Some(ticket.clone());
        ticket
    }

    /// Re-issue the current load after a failure. `None` unless `Failed`.
    pub fn retry(&mut self) -> Option<LoadTicket<P>> {
        if !self.state.is_failed() {
            return None;
        }
        let param = self.current.as_ref()?.param.clone();
        Some(self.begin(param))
    }

    pub fn is_current(&self, ticket: &LoadTicket<P>) -> bool {
        self.current
            .as_ref()
            .is_some_and(|cur| cur.generation == ticket.generation && cur.param == ticket.param)
    }

    /// Apply a finished load. Returns `false` (state untouched) for a stale ticket.
    pub fn complete(&mut self, ticket: &LoadTicket<P>, result: Result<T, String>) -> bool {
        if !self.is_current(ticket) || !self.state.is_loading() {
            tracing::debug!(generation = ticket.generation, "discarding stale load result");
            return false;
        }
        self.state = match result {
            Ok(data) => LoadState::Ready(data),
            Err(msg) => LoadState::Failed(msg),
        };
        true
    }

    /// Cancel the in-flight load (screen left). The state is kept.
    pub fn cancel(&mut self) {
        if let Some(ticket) = self.current.take() {
            ticket.cancel.cancel();
        }
    }
}

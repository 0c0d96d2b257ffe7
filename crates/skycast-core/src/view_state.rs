//! Dashboard view state machine (idle/loading/displaying/error).
//!
//! Every search is tagged with a request id. Only the completion carrying the
//! id currently awaited may leave `Loading`, so an older response that lands
//! after a newer search was started is dropped instead of overwriting it.

/// Identifier handed out per search, strictly increasing.
pub type RequestId = u64;

/// What the dashboard is currently showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewState {
    #[default]
    Idle,
    Loading {
        request_id: RequestId,
    },
    Displaying,
    ErrorShown,
}

/// Outcome of feeding a fetch completion into the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The completion matched the pending request and the state moved on.
    Applied(ViewState),
    /// The completion belongs to a superseded request; nothing changed.
    Stale,
}

impl ViewState {
    /// True while a request is in flight.
    pub fn is_loading(self) -> bool {
        matches!(self, ViewState::Loading { .. })
    }

    /// Request id the dashboard is waiting on, if any.
    pub fn pending_request(self) -> Option<RequestId> {
        match self {
            ViewState::Loading { request_id } => Some(request_id),
            _ => None,
        }
    }

    /// State after the user starts a search. Allowed from every state; an
    /// in-flight request is superseded rather than awaited.
    pub fn begin_search(self, request_id: RequestId) -> Self {
        ViewState::Loading { request_id }
    }

    /// State after a search with blank input.
    pub fn reject_input(self) -> Self {
        ViewState::ErrorShown
    }

    /// State after a fetch for `request_id` finished.
    pub fn on_fetch_done(self, request_id: RequestId, succeeded: bool) -> Completion {
        match self {
            ViewState::Loading { request_id: pending } if pending == request_id => {
                Completion::Applied(if succeeded {
                    ViewState::Displaying
                } else {
                    ViewState::ErrorShown
                })
            }
            _ => Completion::Stale,
        }
    }
}

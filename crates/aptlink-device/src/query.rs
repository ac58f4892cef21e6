use std::time::{Duration, Instant};

use aptlink_frame::Frame;
use tracing::debug;

/// A request frame paired with the identifier of its expected response.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub request: Frame,
    pub expected_id: u16,
    /// When set, timed-out reads are retried until this much time has passed.
    pub timeout: Option<Duration>,
}

impl Query {
    pub fn new(request: Frame, expected_id: u16) -> Self {
        Self {
            request,
            expected_id,
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Lifecycle of one query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryState {
    Idle,
    Sent,
    AwaitingResponse,
    Done,
    Failed,
}

/// Bookkeeping for a query in flight. Lives only inside one `query` call.
#[derive(Debug)]
pub(crate) struct PendingQuery {
    pub(crate) request_id: u16,
    pub(crate) expected_id: u16,
    timeout: Option<Duration>,
    deadline: Option<Instant>,
    state: QueryState,
}

impl PendingQuery {
    pub(crate) fn new(query: &Query) -> Self {
        Self {
            request_id: query.request.id,
            expected_id: query.expected_id,
            timeout: query.timeout,
            deadline: None,
            state: QueryState::Idle,
        }
    }

    pub(crate) fn state(&self) -> QueryState {
        self.state
    }

    /// Record that the request left; the retry window starts now.
    pub(crate) fn sent(&mut self) {
        self.deadline = self.timeout.map(|timeout| Instant::now() + timeout);
        self.advance(QueryState::Sent);
    }

    /// Whether another read may follow a timed-out one.
    pub(crate) fn may_retry(&self) -> bool {
        self.deadline
            .is_some_and(|deadline| Instant::now() <= deadline)
    }

    pub(crate) fn advance(&mut self, next: QueryState) {
        if self.state == next {
            return;
        }
        debug!(
            request = format_args!("{:#06x}", self.request_id),
            expected = format_args!("{:#06x}", self.expected_id),
            from = ?self.state,
            to = ?next,
            "query state"
        );
        self.state = next;
    }
}

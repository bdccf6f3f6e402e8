//! Live dashboard feed: framing, decoding and the scoped subscription.

pub mod decode;
pub mod sse;
pub mod subscription;

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Local};
use tokio::sync::watch;

use crate::models::attendance::{BoardColors, DepartmentGroup};

pub use decode::decode_snapshot;
pub use subscription::FeedSubscription;

/// A full replacement of the dashboard data.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub departments: Vec<DepartmentGroup>,
    pub colors: Option<BoardColors>,
    pub total_employee_count: usize,
    pub received_at: DateTime<Local>,
}

#[derive(Debug)]
pub enum FeedError {
    Transport(String),
    Closed,
    Malformed(serde_json::Error),
    MissingData,
}

impl fmt::Display for FeedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedError::Transport(e) => write!(f, "Feed transport error: {e}"),
            FeedError::Closed => write!(f, "Feed closed by server"),
            FeedError::Malformed(e) => write!(f, "Malformed feed payload: {e}"),
            FeedError::MissingData => write!(f, "Feed payload has no department list"),
        }
    }
}

impl std::error::Error for FeedError {}

impl From<serde_json::Error> for FeedError {
    fn from(e: serde_json::Error) -> Self {
        FeedError::Malformed(e)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedStatus {
    Connecting,
    Live,
    DataUnavailable,
    ConnectionError,
    Closed,
}

impl FeedStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeedStatus::Connecting => "connecting",
            FeedStatus::Live => "live",
            FeedStatus::DataUnavailable => "data_unavailable",
            FeedStatus::ConnectionError => "connection_error",
            FeedStatus::Closed => "closed",
        }
    }

    /// Text shown in place of the grid, `None` when the grid can be shown.
    pub fn message(&self) -> Option<&'static str> {
        match self {
            FeedStatus::Connecting => Some("Loading..."),
            FeedStatus::Live => None,
            FeedStatus::DataUnavailable => Some("Data unavailable."),
            FeedStatus::ConnectionError => Some("Connection error."),
            FeedStatus::Closed => Some("Connection closed."),
        }
    }

    /// No further events will arrive.
    pub fn is_terminal(&self) -> bool {
        matches!(self, FeedStatus::ConnectionError | FeedStatus::Closed)
    }
}

impl From<&FeedError> for FeedStatus {
    fn from(e: &FeedError) -> Self {
        match e {
            FeedError::Transport(_) => FeedStatus::ConnectionError,
            FeedError::Closed => FeedStatus::Closed,
            FeedError::Malformed(_) | FeedError::MissingData => FeedStatus::DataUnavailable,
        }
    }
}

/// Latest feed outcome plus the last good snapshot.
#[derive(Debug, Clone)]
pub struct FeedState {
    pub status: FeedStatus,
    pub snapshot: Option<Arc<Snapshot>>,
}

impl FeedState {
    pub fn connecting() -> Self {
        FeedState { status: FeedStatus::Connecting, snapshot: None }
    }

    pub fn live(snapshot: Snapshot) -> Self {
        FeedState { status: FeedStatus::Live, snapshot: Some(Arc::new(snapshot)) }
    }

    pub fn apply(&mut self, outcome: Result<Snapshot, FeedError>) {
        match outcome {
            Ok(snapshot) => {
                log::debug!(
                    "Feed snapshot: {} departments, {} employees",
                    snapshot.departments.len(),
                    snapshot.total_employee_count
                );
                self.status = FeedStatus::Live;
                self.snapshot = Some(Arc::new(snapshot));
            }
            Err(e) => {
                match e {
                    FeedError::Malformed(_) | FeedError::MissingData => log::warn!("{e}"),
                    _ => log::error!("{e}"),
                }
                self.status = FeedStatus::from(&e);
            }
        }
    }

    /// The snapshot to render, only while the feed is healthy.
    pub fn live_snapshot(&self) -> Option<&Arc<Snapshot>> {
        match self.status {
            FeedStatus::Live => self.snapshot.as_ref(),
            _ => None,
        }
    }
}

/// Read side of the feed, shared with request handlers.
#[derive(Debug, Clone)]
pub struct FeedHandle {
    rx: watch::Receiver<FeedState>,
}

impl FeedHandle {
    pub fn from_receiver(rx: watch::Receiver<FeedState>) -> Self {
        FeedHandle { rx }
    }

    pub fn current(&self) -> FeedState {
        self.rx.borrow().clone()
    }

    /// A receiver for one watcher, marked as having seen the current state.
    pub fn subscribe(&self) -> watch::Receiver<FeedState> {
        let mut rx = self.rx.clone();
        rx.mark_unchanged();
        rx
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> Snapshot {
        Snapshot {
            departments: vec![],
            colors: None,
            total_employee_count: 0,
            received_at: Local::now(),
        }
    }

    #[test]
    fn bad_payload_hides_grid_but_keeps_last_snapshot() {
        let mut state = FeedState::connecting();
        assert!(state.live_snapshot().is_none());

        state.apply(Ok(snapshot()));
        assert!(state.live_snapshot().is_some());

        state.apply(Err(FeedError::MissingData));
        assert_eq!(state.status, FeedStatus::DataUnavailable);
        assert!(state.live_snapshot().is_none());
        assert!(state.snapshot.is_some());

        state.apply(Ok(snapshot()));
        assert_eq!(state.status, FeedStatus::Live);
    }

    #[test]
    fn transport_failures_are_terminal() {
        let mut state = FeedState::connecting();
        state.apply(Err(FeedError::Transport("refused".into())));
        assert_eq!(state.status.message(), Some("Connection error."));
        assert!(state.status.is_terminal());

        state.apply(Err(FeedError::Closed));
        assert_eq!(state.status.message(), Some("Connection closed."));
    }
}

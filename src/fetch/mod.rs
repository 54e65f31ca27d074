mod messages;

pub use messages::{Dispatcher, FetchMessage};

use crate::api::{ApiError, FailureKind, Query};
use tracing::debug;

/// Identity of one mounted page. Every navigation mounts a fresh page with a
/// new id, so responses addressed to a page that has been left can be told
/// apart from responses for the page on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MountId(pub u64);

/// Which piece of page state a response belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Trending,
    Popular,
    Topics,
    TopicPhotos,
    Search,
    Photo,
    Related,
    Suggestions,
    Wallpaper,
    Download,
}

/// Routing information carried by a request and echoed back with its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    pub mount: MountId,
    pub slot: Slot,
    pub generation: u64,
}

/// An outbound fetch waiting to be dispatched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub ticket: Ticket,
    pub query: Query,
}

impl Request {
    pub fn new(mount: MountId, slot: Slot, generation: u64, query: Query) -> Self {
        Self {
            ticket: Ticket {
                mount,
                slot,
                generation,
            },
            query,
        }
    }
}

/// Settled result of a fetch. Empty results and failures are distinct.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    Loaded(T),
    Empty,
    Failed(FailureKind),
}

impl<U> Outcome<Vec<U>> {
    pub fn from_list(result: Result<Vec<U>, ApiError>) -> Self {
        match result {
            Ok(items) if items.is_empty() => Outcome::Empty,
            Ok(items) => Outcome::Loaded(items),
            Err(e) => Outcome::Failed(e.kind()),
        }
    }
}

impl<T> Outcome<T> {
    pub fn from_item(result: Result<T, ApiError>) -> Self {
        match result {
            Ok(item) => Outcome::Loaded(item),
            Err(e) => Outcome::Failed(e.kind()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T> {
    Idle,
    Loading,
    Ready(Outcome<T>),
}

/// A piece of fetched page state guarded by a generation counter.
///
/// Each `begin` starts a new generation and drops whatever was held. Results
/// are only accepted for the current generation, so a slow response to a
/// superseded request can never overwrite newer state.
#[derive(Debug, Clone)]
pub struct Tracked<T> {
    generation: u64,
    state: LoadState<T>,
}

impl<T> Default for Tracked<T> {
    fn default() -> Self {
        Self {
            generation: 0,
            state: LoadState::Idle,
        }
    }
}

impl<T> Tracked<T> {
    /// Start a new fetch. Returns the generation to stamp on the request.
    pub fn begin(&mut self) -> u64 {
        self.generation += 1;
        self.state = LoadState::Loading;
        self.generation
    }

    /// Apply a result. Returns `false` if it belongs to an older generation.
    pub fn settle(&mut self, generation: u64, outcome: Outcome<T>) -> bool {
        if generation != self.generation || !matches!(self.state, LoadState::Loading) {
            debug!(
                generation,
                current = self.generation,
                "Discarding stale response"
            );
            return false;
        }
        self.state = LoadState::Ready(outcome);
        true
    }

    /// Drop held data and invalidate anything in flight.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.state = LoadState::Idle;
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, LoadState::Loading)
    }

    pub fn is_settled(&self) -> bool {
        matches!(self.state, LoadState::Ready(_))
    }

    pub fn value(&self) -> Option<&T> {
        match &self.state {
            LoadState::Ready(Outcome::Loaded(v)) => Some(v),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<FailureKind> {
        match &self.state {
            LoadState::Ready(Outcome::Failed(kind)) => Some(*kind),
            _ => None,
        }
    }

    pub fn is_empty_result(&self) -> bool {
        matches!(self.state, LoadState::Ready(Outcome::Empty))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracked_accepts_current_generation() {
        let mut slot: Tracked<Vec<u32>> = Tracked::default();
        assert_eq!(&slot.state, &LoadState::Idle);

        let generation = slot.begin();
        assert!(slot.is_loading());
        assert!(slot.settle(generation, Outcome::Loaded(vec![1, 2])));
        assert_eq!(slot.value(), Some(&vec![1, 2]));
    }

    #[test]
    fn test_tracked_rejects_superseded_generation() {
        let mut slot: Tracked<&str> = Tracked::default();
        let first = slot.begin();
        let second = slot.begin();

        assert!(!slot.settle(first, Outcome::Loaded("old")));
        assert!(slot.is_loading());
        assert!(slot.settle(second, Outcome::Loaded("new")));
        assert_eq!(slot.value(), Some(&"new"));
    }

    #[test]
    fn test_tracked_settles_once() {
        let mut slot: Tracked<u8> = Tracked::default();
        let generation = slot.begin();
        assert!(slot.settle(generation, Outcome::Loaded(1)));
        assert!(!slot.settle(generation, Outcome::Loaded(2)));
        assert_eq!(slot.value(), Some(&1));
    }

    #[test]
    fn test_tracked_reset_invalidates_in_flight() {
        let mut slot: Tracked<u8> = Tracked::default();
        let generation = slot.begin();
        slot.reset();
        assert!(!slot.settle(generation, Outcome::Loaded(1)));
        assert_eq!(&slot.state, &LoadState::Idle);
    }

    #[test]
    fn test_outcome_distinguishes_empty_from_failure() {
        let empty: Outcome<Vec<u8>> = Outcome::from_list(Ok::<_, ApiError>(vec![]));
        assert_eq!(empty, Outcome::Empty);

        let failed: Outcome<Vec<u8>> =
            Outcome::from_list(Err(ApiError::NotFound("x".into())));
        assert_eq!(failed, Outcome::Failed(FailureKind::NotFound));

        let mut slot: Tracked<Vec<u8>> = Tracked::default();
        let generation = slot.begin();
        slot.settle(generation, failed);
        assert!(!slot.is_empty_result());
        assert_eq!(slot.failure(), Some(FailureKind::NotFound));
    }

    #[test]
    fn test_outcome_from_item() {
        let loaded = Outcome::from_item(Ok::<_, ApiError>(5));
        assert_eq!(loaded, Outcome::Loaded(5));
        let failed: Outcome<u8> = Outcome::from_item(Err(ApiError::Status {
            status: 500,
            message: String::new(),
        }));
        assert_eq!(failed, Outcome::Failed(FailureKind::Rejected(500)));
    }
}

use crate::api::{ApiError, FailureKind, Payload, Query};
use crate::fetch::{MountId, Outcome, Request, Slot, Tracked};
use crate::model::Photo;
use tracing::debug;

pub const SEARCH_PAGE_SIZE: u32 = 20;

/// Search-and-show capability shared by any page with a results strip.
/// Each search replaces the previous result set wholesale.
#[derive(Debug, Default)]
pub struct SearchResults {
    query: Option<String>,
    results: Tracked<Vec<Photo>>,
}

impl SearchResults {
    /// Start a search. Blank queries issue nothing and keep current results.
    pub fn submit(&mut self, mount: MountId, query: &str) -> Option<Request> {
        let query = query.trim();
        if query.is_empty() {
            debug!("Blank search ignored");
            return None;
        }
        let generation = self.results.begin();
        self.query = Some(query.to_string());
        Some(Request::new(
            mount,
            Slot::Search,
            generation,
            Query::Search {
                query: query.to_string(),
                per_page: SEARCH_PAGE_SIZE,
            },
        ))
    }

    pub fn apply(&mut self, generation: u64, result: Result<Payload, ApiError>) -> bool {
        let outcome = Outcome::from_list(result.and_then(Payload::into_photos));
        self.results.settle(generation, outcome)
    }

    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    pub fn photos(&self) -> &[Photo] {
        self.results.value().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_loading(&self) -> bool {
        self.results.is_loading()
    }

    /// True when the last search settled with no matches.
    pub fn found_nothing(&self) -> bool {
        self.results.is_empty_result()
    }

    pub fn failure(&self) -> Option<FailureKind> {
        self.results.failure()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures;
    use proptest::prelude::*;

    fn settle_with(search: &mut SearchResults, request: &Request, ids: &[&str]) {
        let result = Ok(Payload::Photos(fixtures::photos(ids)));
        assert!(search.apply(request.ticket.generation, result));
    }

    #[test]
    fn test_submit_issues_search_request() {
        let mut search = SearchResults::default();
        let request = search.submit(MountId(1), " mountains ").unwrap();
        assert_eq!(
            request.query,
            Query::Search {
                query: "mountains".into(),
                per_page: SEARCH_PAGE_SIZE
            }
        );
        assert!(search.is_loading());
        assert_eq!(search.query(), Some("mountains"));
    }

    #[test]
    fn test_new_search_replaces_results() {
        let mut search = SearchResults::default();
        let first = search.submit(MountId(1), "cats").unwrap();
        settle_with(&mut search, &first, &["c1", "c2", "c3"]);
        assert_eq!(search.photos().len(), 3);

        let second = search.submit(MountId(1), "dogs").unwrap();
        assert!(search.photos().is_empty());
        settle_with(&mut search, &second, &["d1"]);
        let ids: Vec<&str> = search.photos().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["d1"]);
    }

    #[test]
    fn test_late_result_of_previous_search_is_dropped() {
        let mut search = SearchResults::default();
        let first = search.submit(MountId(1), "cats").unwrap();
        let second = search.submit(MountId(1), "dogs").unwrap();

        let stale = Ok(Payload::Photos(fixtures::photos(&["c1"])));
        assert!(!search.apply(first.ticket.generation, stale));
        settle_with(&mut search, &second, &["d1", "d2"]);
        assert_eq!(search.photos().len(), 2);
    }

    #[test]
    fn test_empty_and_failed_searches_differ() {
        let mut search = SearchResults::default();
        let request = search.submit(MountId(1), "zzzz").unwrap();
        search.apply(request.ticket.generation, Ok(Payload::Photos(vec![])));
        assert!(search.found_nothing());
        assert_eq!(search.failure(), None);

        let request = search.submit(MountId(1), "zzzz").unwrap();
        search.apply(
            request.ticket.generation,
            Err(ApiError::Status {
                status: 500,
                message: String::new(),
            }),
        );
        assert!(!search.found_nothing());
        assert_eq!(search.failure(), Some(FailureKind::Rejected(500)));
    }

    proptest! {
        #[test]
        fn test_blank_query_keeps_existing_results(blank in "[ \t]{0,8}") {
            let mut search = SearchResults::default();
            let request = search.submit(MountId(1), "forest").unwrap();
            search.apply(request.ticket.generation, Ok(Payload::Photos(fixtures::photos(&["f1", "f2"]))));

            prop_assert!(search.submit(MountId(1), &blank).is_none());
            prop_assert_eq!(search.photos().len(), 2);
            prop_assert_eq!(search.query(), Some("forest"));
        }
    }
}

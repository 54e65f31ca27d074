use super::Section;
use crate::api::{ApiError, FailureKind, Payload, Query};
use crate::fetch::{MountId, Outcome, Request, Slot, Ticket, Tracked};
use crate::model::{Photo, RandomFilters};
use tracing::{debug, warn};

pub const SUGGESTION_COUNT: u32 = 6;
pub const EMPTY_TITLE: &str = "No favourites yet";
pub const EMPTY_HINT: &str = "Start adding wallpapers to your favourites";

/// Photos the user has marked, in the order they were added. Lives for the
/// process only.
#[derive(Debug, Clone, Default)]
pub struct FavouriteSet {
    photos: Vec<Photo>,
}

impl FavouriteSet {
    /// Append a photo unless one with the same id is already present.
    pub fn add(&mut self, photo: Photo) -> bool {
        if self.contains(&photo.id) {
            return false;
        }
        self.photos.push(photo);
        true
    }

    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.photos.len();
        self.photos.retain(|p| p.id != id);
        self.photos.len() != before
    }

    /// Add or remove. Returns whether the photo is now a favourite.
    pub fn toggle(&mut self, photo: &Photo) -> bool {
        if self.remove(&photo.id) {
            false
        } else {
            self.photos.push(photo.clone());
            true
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.photos.iter().any(|p| p.id == id)
    }

    pub fn as_slice(&self) -> &[Photo] {
        &self.photos
    }

    pub fn len(&self) -> usize {
        self.photos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.photos.is_empty()
    }
}

#[derive(Debug)]
pub struct FavouritesPage {
    mount: MountId,
    suggestions: Tracked<Vec<Photo>>,
}

impl FavouritesPage {
    pub fn mount(mount: MountId) -> (Self, Vec<Request>) {
        let mut page = Self {
            mount,
            suggestions: Tracked::default(),
        };
        let request = Request::new(
            mount,
            Slot::Suggestions,
            page.suggestions.begin(),
            Query::RandomBatch {
                filters: RandomFilters::default(),
                count: SUGGESTION_COUNT,
            },
        );
        (page, vec![request])
    }

    pub fn mount_id(&self) -> MountId {
        self.mount
    }

    pub fn apply(&mut self, ticket: Ticket, result: Result<Payload, ApiError>) -> bool {
        if ticket.slot != Slot::Suggestions {
            debug!(slot = ?ticket.slot, "Favourites ignores slot");
            return false;
        }
        if let Err(e) = &result {
            warn!(error = %e, "Suggestion fetch failed");
        }
        let outcome = Outcome::from_list(result.and_then(Payload::into_photos));
        self.suggestions.settle(ticket.generation, outcome)
    }

    pub fn is_loading(&self) -> bool {
        self.suggestions.is_loading()
    }

    pub fn failure(&self) -> Option<FailureKind> {
        self.suggestions.failure()
    }

    pub fn sections<'a>(&'a self, favourites: &'a FavouriteSet) -> Vec<Section<'a>> {
        let suggested = self.suggestions.value().map(Vec::as_slice).unwrap_or(&[]);
        vec![
            Section::of_photos("Favourites", favourites.as_slice()),
            Section::of_photos("Suggested", suggested),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures;
    use proptest::prelude::*;

    fn set_of(ids: &[&str]) -> FavouriteSet {
        let mut set = FavouriteSet::default();
        for photo in fixtures::photos(ids) {
            set.add(photo);
        }
        set
    }

    fn ids_of(set: &FavouriteSet) -> Vec<&str> {
        set.as_slice().iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn test_remove_keeps_order() {
        let mut set = set_of(&["7", "42", "99"]);
        assert!(set.remove("42"));
        assert_eq!(ids_of(&set), vec!["7", "99"]);
        assert!(!set.remove("42"));
    }

    #[test]
    fn test_add_rejects_duplicates() {
        let mut set = set_of(&["a"]);
        assert!(!set.add(fixtures::photo("a")));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_toggle() {
        let mut set = FavouriteSet::default();
        let photo = fixtures::photo("x");
        assert!(set.toggle(&photo));
        assert!(set.contains("x"));
        assert!(!set.toggle(&photo));
        assert!(set.is_empty());
    }

    #[test]
    fn test_mount_requests_suggestions() {
        let (page, requests) = FavouritesPage::mount(MountId(2));
        assert!(page.is_loading());
        assert_eq!(
            requests[0].query,
            Query::RandomBatch {
                filters: RandomFilters::default(),
                count: SUGGESTION_COUNT
            }
        );
    }

    #[test]
    fn test_sections_show_set_and_suggestions() {
        let (mut page, requests) = FavouritesPage::mount(MountId(2));
        page.apply(
            requests[0].ticket,
            Ok(Payload::Photos(fixtures::photos(&["r1", "r2"]))),
        );
        let set = set_of(&["f1"]);
        let sections = page.sections(&set);
        assert_eq!(sections[0].title, "Favourites");
        assert_eq!(sections[0].entries.len(), 1);
        assert_eq!(sections[1].title, "Suggested");
        assert_eq!(sections[1].entries.len(), 2);
    }

    #[test]
    fn test_failed_suggestions_still_show_favourites() {
        let (mut page, requests) = FavouritesPage::mount(MountId(2));
        page.apply(
            requests[0].ticket,
            Err(ApiError::Status {
                status: 403,
                message: "Rate Limit Exceeded".into(),
            }),
        );
        assert!(!page.is_loading());
        assert_eq!(page.failure(), Some(FailureKind::Rejected(403)));
        let set = set_of(&["f1", "f2"]);
        assert_eq!(page.sections(&set)[0].entries.len(), 2);
    }

    proptest! {
        #[test]
        fn test_remove_preserves_relative_order(
            ids in proptest::collection::hash_set("[a-z]{1,4}", 1..12),
            pick in any::<prop::sample::Index>(),
        ) {
            let ids: Vec<String> = ids.into_iter().collect();
            let refs: Vec<&str> = ids.iter().map(String::as_str).collect();
            let mut set = set_of(&refs);
            let target = pick.get(&ids).clone();

            set.remove(&target);
            let expected: Vec<&str> = refs.iter().copied().filter(|id| *id != target).collect();
            prop_assert_eq!(ids_of(&set), expected);
        }
    }
}

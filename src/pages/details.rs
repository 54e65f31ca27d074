use super::Section;
use crate::api::{ApiError, FailureKind, Payload, Query};
use crate::fetch::{MountId, Outcome, Request, Slot, Ticket, Tracked};
use crate::model::{Photo, Tag};
use tracing::{debug, warn};

pub const RELATED_LIMIT: usize = 4;
pub const TAG_LIMIT: usize = 7;
pub const NOT_FOUND: &str = "Photo not found.";

/// Detail view for a single photo and a handful of related ones.
#[derive(Debug)]
pub struct DetailsPage {
    mount: MountId,
    id: String,
    photo: Tracked<Photo>,
    related: Tracked<Vec<Photo>>,
}

impl DetailsPage {
    pub fn mount(mount: MountId, id: &str) -> (Self, Vec<Request>) {
        let mut page = Self {
            mount,
            id: id.to_string(),
            photo: Tracked::default(),
            related: Tracked::default(),
        };
        let requests = page.fetch();
        (page, requests)
    }

    pub fn mount_id(&self) -> MountId {
        self.mount
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    fn fetch(&mut self) -> Vec<Request> {
        vec![
            Request::new(
                self.mount,
                Slot::Photo,
                self.photo.begin(),
                Query::Photo {
                    id: self.id.clone(),
                },
            ),
            Request::new(
                self.mount,
                Slot::Related,
                self.related.begin(),
                Query::Related {
                    id: self.id.clone(),
                    limit: RELATED_LIMIT,
                },
            ),
        ]
    }

    /// Point the page at another photo. Anything still in flight for the
    /// previous id is invalidated. The same id is a no-op.
    pub fn set_id(&mut self, id: &str) -> Vec<Request> {
        if self.id == id {
            return Vec::new();
        }
        debug!(from = %self.id, to = %id, "Switching photo");
        self.id = id.to_string();
        self.fetch()
    }

    pub fn apply(&mut self, ticket: Ticket, result: Result<Payload, ApiError>) -> bool {
        if let Err(e) = &result {
            warn!(slot = ?ticket.slot, id = %self.id, error = %e, "Detail fetch failed");
        }
        match ticket.slot {
            Slot::Photo => self.photo.settle(
                ticket.generation,
                Outcome::from_item(result.and_then(Payload::into_photo)),
            ),
            Slot::Related => self.related.settle(
                ticket.generation,
                Outcome::from_list(result.and_then(Payload::into_photos)),
            ),
            other => {
                debug!(slot = ?other, "Details ignores slot");
                false
            }
        }
    }

    pub fn is_loading(&self) -> bool {
        self.photo.is_loading() || self.related.is_loading()
    }

    pub fn photo(&self) -> Option<&Photo> {
        self.photo.value()
    }

    pub fn related(&self) -> &[Photo] {
        self.related.value().map(Vec::as_slice).unwrap_or(&[])
    }

    /// Settled without a photo, whether missing or failed.
    pub fn not_found(&self) -> bool {
        self.photo.is_settled() && self.photo.value().is_none()
    }

    pub fn failure(&self) -> Option<FailureKind> {
        self.photo.failure().or(self.related.failure())
    }

    pub fn tags(&self) -> &[Tag] {
        let tags = self.photo().map(|p| p.tags.as_slice()).unwrap_or(&[]);
        &tags[..tags.len().min(TAG_LIMIT)]
    }

    pub fn sections(&self) -> Vec<Section<'_>> {
        let Some(photo) = self.photo() else {
            return Vec::new();
        };
        vec![
            Section::of_photos("This Wallpaper", std::slice::from_ref(photo)),
            Section::of_photos("Related Wallpapers", self.related()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures;

    fn photo_payload(id: &str) -> Payload {
        Payload::Photo(Box::new(fixtures::photo(id)))
    }

    #[test]
    fn test_mount_fetches_photo_and_related() {
        let (page, requests) = DetailsPage::mount(MountId(6), "abc");
        assert!(page.is_loading());
        assert_eq!(requests[0].query, Query::Photo { id: "abc".into() });
        assert_eq!(
            requests[1].query,
            Query::Related {
                id: "abc".into(),
                limit: RELATED_LIMIT
            }
        );
    }

    #[test]
    fn test_loading_until_both_settle() {
        let (mut page, requests) = DetailsPage::mount(MountId(6), "abc");
        page.apply(requests[0].ticket, Ok(photo_payload("abc")));
        assert!(page.is_loading());
        page.apply(
            requests[1].ticket,
            Ok(Payload::Photos(fixtures::photos(&["r1", "r2"]))),
        );
        assert!(!page.is_loading());
        let sections = page.sections();
        assert_eq!(sections[0].entries[0].photo.id, "abc");
        assert_eq!(sections[1].title, "Related Wallpapers");
        assert_eq!(sections[1].entries.len(), 2);
    }

    #[test]
    fn test_stale_id_response_is_discarded() {
        let (mut page, first) = DetailsPage::mount(MountId(6), "id1");
        let second = page.set_id("id2");
        assert_eq!(second.len(), 2);

        assert!(!page.apply(first[0].ticket, Ok(photo_payload("id1"))));
        assert!(!page.apply(first[1].ticket, Ok(Payload::Photos(fixtures::photos(&["x"])))));
        assert!(page.is_loading());

        assert!(page.apply(second[0].ticket, Ok(photo_payload("id2"))));
        assert!(page.apply(second[1].ticket, Ok(Payload::Photos(vec![]))));
        assert_eq!(page.photo().unwrap().id, "id2");
        assert!(page.related().is_empty());
    }

    #[test]
    fn test_same_id_is_noop() {
        let (mut page, _) = DetailsPage::mount(MountId(6), "abc");
        assert!(page.set_id("abc").is_empty());
    }

    #[test]
    fn test_not_found() {
        let (mut page, requests) = DetailsPage::mount(MountId(6), "gone");
        page.apply(requests[0].ticket, Err(ApiError::NotFound("gone".into())));
        page.apply(requests[1].ticket, Ok(Payload::Photos(vec![])));
        assert!(page.not_found());
        assert_eq!(page.failure(), Some(FailureKind::NotFound));
        assert!(page.sections().is_empty());
    }

    #[test]
    fn test_tags_are_capped() {
        let (mut page, requests) = DetailsPage::mount(MountId(6), "abc");
        let mut photo = fixtures::photo("abc");
        photo.tags = (0..10)
            .map(|i| Tag {
                title: format!("tag{i}"),
            })
            .collect();
        page.apply(requests[0].ticket, Ok(Payload::Photo(Box::new(photo))));
        assert_eq!(page.tags().len(), TAG_LIMIT);
        assert_eq!(page.tags()[0].title, "tag0");
    }
}

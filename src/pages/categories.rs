use super::Section;
use crate::api::{ApiError, FailureKind, Payload, Query};
use crate::fetch::{MountId, Outcome, Request, Slot, Ticket, Tracked};
use crate::model::{Photo, Topic};
use tracing::{debug, warn};

pub const TOPIC_PAGE_SIZE: u32 = 30;
pub const CATEGORY_PHOTOS: u32 = 12;
/// Tabs offered in the category strip.
pub const VISIBLE_TABS: usize = 8;

#[derive(Debug)]
pub struct CategoriesPage {
    mount: MountId,
    topics: Tracked<Vec<Topic>>,
    active: Option<usize>,
    wallpapers: Tracked<Vec<Photo>>,
}

impl CategoriesPage {
    pub fn mount(mount: MountId) -> (Self, Vec<Request>) {
        let mut page = Self {
            mount,
            topics: Tracked::default(),
            active: None,
            wallpapers: Tracked::default(),
        };
        let request = Request::new(
            mount,
            Slot::Topics,
            page.topics.begin(),
            Query::Topics {
                per_page: TOPIC_PAGE_SIZE,
            },
        );
        (page, vec![request])
    }

    pub fn mount_id(&self) -> MountId {
        self.mount
    }

    /// Apply a result. Topics arriving activates the first one and returns
    /// the request for its photos.
    pub fn apply(&mut self, ticket: Ticket, result: Result<Payload, ApiError>) -> Vec<Request> {
        if let Err(e) = &result {
            warn!(slot = ?ticket.slot, error = %e, "Categories fetch failed");
        }
        match ticket.slot {
            Slot::Topics => {
                let outcome = Outcome::from_list(result.and_then(Payload::into_topics));
                if !self.topics.settle(ticket.generation, outcome) {
                    return Vec::new();
                }
                self.select_category(0).into_iter().collect()
            }
            Slot::TopicPhotos => {
                let outcome = Outcome::from_list(result.and_then(Payload::into_photos));
                self.wallpapers.settle(ticket.generation, outcome);
                Vec::new()
            }
            other => {
                debug!(slot = ?other, "Categories ignores slot");
                Vec::new()
            }
        }
    }

    /// Make a tab active and refetch its photos, even when it already is.
    pub fn select_category(&mut self, index: usize) -> Option<Request> {
        let topic = self.tabs().get(index)?;
        let topic_id = topic.id.clone();
        self.active = Some(index);
        let generation = self.wallpapers.begin();
        debug!(%topic_id, generation, "Selecting category");
        Some(Request::new(
            self.mount,
            Slot::TopicPhotos,
            generation,
            Query::TopicPhotos {
                topic_id,
                per_page: CATEGORY_PHOTOS,
            },
        ))
    }

    pub fn select_next(&mut self) -> Option<Request> {
        let count = self.tabs().len();
        if count == 0 {
            return None;
        }
        let next = self.active.map_or(0, |i| (i + 1) % count);
        self.select_category(next)
    }

    pub fn select_prev(&mut self) -> Option<Request> {
        let count = self.tabs().len();
        if count == 0 {
            return None;
        }
        let prev = self.active.map_or(0, |i| (i + count - 1) % count);
        self.select_category(prev)
    }

    pub fn tabs(&self) -> &[Topic] {
        let topics = self.topics.value().map(Vec::as_slice).unwrap_or(&[]);
        &topics[..topics.len().min(VISIBLE_TABS)]
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    pub fn active_topic(&self) -> Option<&Topic> {
        self.tabs().get(self.active?)
    }

    pub fn is_loading(&self) -> bool {
        self.topics.is_loading() || self.wallpapers.is_loading()
    }

    pub fn failure(&self) -> Option<FailureKind> {
        self.topics.failure().or(self.wallpapers.failure())
    }

    pub fn sections(&self) -> Vec<Section<'_>> {
        let Some(topic) = self.active_topic() else {
            return Vec::new();
        };
        let photos = self.wallpapers.value().map(Vec::as_slice).unwrap_or(&[]);
        vec![Section::of_photos(topic.title.as_str(), photos)]
    }
}

use super::search::SearchResults;
use super::{Entry, Section};
use crate::api::{ApiError, FailureKind, Payload, Query};
use crate::fetch::{MountId, Outcome, Request, Slot, Ticket, Tracked};
use crate::model::{Order, Photo, Topic};
use crate::shell::SearchHandoff;
use tracing::{debug, warn};

pub const FEED_PAGE_SIZE: u32 = 12;
/// Cards shown per home section.
pub const SECTION_PREVIEW: usize = 4;

/// Landing page: trending and popular feeds, category covers, and the
/// results of the last search carried in from the shell.
#[derive(Debug)]
pub struct HomePage {
    mount: MountId,
    trending: Tracked<Vec<Photo>>,
    popular: Tracked<Vec<Photo>>,
    categories: Tracked<Vec<Topic>>,
    search: SearchResults,
    last_handoff: Option<u64>,
}

impl HomePage {
    pub fn mount(mount: MountId) -> (Self, Vec<Request>) {
        let mut page = Self {
            mount,
            trending: Tracked::default(),
            popular: Tracked::default(),
            categories: Tracked::default(),
            search: SearchResults::default(),
            last_handoff: None,
        };
        let requests = vec![
            Request::new(
                mount,
                Slot::Trending,
                page.trending.begin(),
                Query::ListPhotos {
                    order: Order::Latest,
                    per_page: FEED_PAGE_SIZE,
                },
            ),
            Request::new(
                mount,
                Slot::Popular,
                page.popular.begin(),
                Query::ListPhotos {
                    order: Order::Popular,
                    per_page: FEED_PAGE_SIZE,
                },
            ),
            Request::new(
                mount,
                Slot::Topics,
                page.categories.begin(),
                Query::Topics {
                    per_page: FEED_PAGE_SIZE,
                },
            ),
        ];
        (page, requests)
    }

    pub fn mount_id(&self) -> MountId {
        self.mount
    }

    /// Run the search carried by a handoff, once per token.
    pub fn consume_handoff(&mut self, handoff: &SearchHandoff) -> Option<Request> {
        if self.last_handoff.is_some_and(|seen| seen >= handoff.token) {
            debug!(token = handoff.token, "Handoff already consumed");
            return None;
        }
        self.last_handoff = Some(handoff.token);
        self.search.submit(self.mount, &handoff.query)
    }

    pub fn apply(&mut self, ticket: Ticket, result: Result<Payload, ApiError>) -> bool {
        if let Err(e) = &result {
            warn!(slot = ?ticket.slot, error = %e, "Home fetch failed");
        }
        match ticket.slot {
            Slot::Trending => self.trending.settle(
                ticket.generation,
                Outcome::from_list(result.and_then(Payload::into_photos)),
            ),
            Slot::Popular => self.popular.settle(
                ticket.generation,
                Outcome::from_list(result.and_then(Payload::into_photos)),
            ),
            Slot::Topics => self.categories.settle(
                ticket.generation,
                Outcome::from_list(result.and_then(Payload::into_topics)),
            ),
            Slot::Search => self.search.apply(ticket.generation, result),
            other => {
                debug!(slot = ?other, "Home ignores slot");
                false
            }
        }
    }

    pub fn is_loading(&self) -> bool {
        self.trending.is_loading()
            || self.popular.is_loading()
            || self.categories.is_loading()
            || self.search.is_loading()
    }

    pub fn search(&self) -> &SearchResults {
        &self.search
    }

    /// First failure among the feeds, for the notice line.
    pub fn failure(&self) -> Option<FailureKind> {
        self.search
            .failure()
            .or(self.trending.failure())
            .or(self.popular.failure())
            .or(self.categories.failure())
    }

    pub fn sections(&self) -> Vec<Section<'_>> {
        let mut sections = Vec::new();
        let results = self.search.photos();
        if !results.is_empty() {
            sections.push(Section::of_photos("Search Results", results));
        }
        sections.push(preview("Trending Wallpapers", &self.trending));

        let covers = self
            .categories
            .value()
            .map(|topics| {
                topics
                    .iter()
                    .filter_map(|t| {
                        t.cover_photo.as_ref().map(|photo| Entry {
                            photo,
                            label: t.title.as_str(),
                        })
                    })
                    .take(SECTION_PREVIEW)
                    .collect()
            })
            .unwrap_or_default();
        sections.push(Section::new("Explore by Categories", covers));

        sections.push(preview("Popular Wallpapers", &self.popular));
        sections
    }
}

fn preview<'a>(title: &str, feed: &'a Tracked<Vec<Photo>>) -> Section<'a> {
    let photos = feed.value().map(Vec::as_slice).unwrap_or(&[]);
    let shown = &photos[..photos.len().min(SECTION_PREVIEW)];
    Section::of_photos(title, shown)
}

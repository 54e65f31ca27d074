pub mod categories;
pub mod details;
pub mod favourites;
pub mod home;
pub mod notification;
pub mod profile;
pub mod search;
pub mod settings;

use crate::api::{FailureKind, Query};
use crate::app::Route;
use crate::fetch::{FetchMessage, MountId, Request, Slot};
use crate::model::Photo;
use categories::CategoriesPage;
use details::DetailsPage;
use favourites::{FavouriteSet, FavouritesPage};
use home::HomePage;
use notification::NotificationPage;
use settings::SettingsPage;

/// One selectable photo card.
#[derive(Debug, Clone, Copy)]
pub struct Entry<'a> {
    pub photo: &'a Photo,
    pub label: &'a str,
}

impl<'a> Entry<'a> {
    pub fn of(photo: &'a Photo) -> Self {
        Self {
            photo,
            label: photo.short_title(),
        }
    }
}

/// A titled group of cards. Pages expose their data-bearing content as
/// sections; the UI renders exactly these.
#[derive(Debug, Clone)]
pub struct Section<'a> {
    pub title: String,
    pub entries: Vec<Entry<'a>>,
}

impl<'a> Section<'a> {
    pub fn new(title: impl Into<String>, entries: Vec<Entry<'a>>) -> Self {
        Self {
            title: title.into(),
            entries,
        }
    }

    pub fn of_photos(title: impl Into<String>, photos: &'a [Photo]) -> Self {
        Self::new(title, photos.iter().map(Entry::of).collect())
    }
}

/// The mounted page controller.
#[derive(Debug)]
pub enum Page {
    Home(HomePage),
    Categories(CategoriesPage),
    Favourites(FavouritesPage),
    Notification(NotificationPage),
    Settings(SettingsPage),
    Details(DetailsPage),
}

impl Page {
    /// Build the controller for a route and return the requests it needs.
    pub fn mount(route: &Route, mount: MountId) -> (Self, Vec<Request>) {
        match route {
            Route::Home => {
                let (page, requests) = HomePage::mount(mount);
                (Page::Home(page), requests)
            }
            Route::Categories => {
                let (page, requests) = CategoriesPage::mount(mount);
                (Page::Categories(page), requests)
            }
            Route::Favourites => {
                let (page, requests) = FavouritesPage::mount(mount);
                (Page::Favourites(page), requests)
            }
            Route::Notification => (Page::Notification(NotificationPage::mount(mount)), Vec::new()),
            Route::Settings => {
                let (page, requests) = SettingsPage::mount(mount);
                (Page::Settings(page), requests)
            }
            Route::ShowDetails(id) => {
                let (page, requests) = DetailsPage::mount(mount, id);
                (Page::Details(page), requests)
            }
        }
    }

    pub fn mount_id(&self) -> MountId {
        match self {
            Page::Home(p) => p.mount_id(),
            Page::Categories(p) => p.mount_id(),
            Page::Favourites(p) => p.mount_id(),
            Page::Notification(p) => p.mount_id(),
            Page::Settings(p) => p.mount_id(),
            Page::Details(p) => p.mount_id(),
        }
    }

    pub fn is_loading(&self) -> bool {
        match self {
            Page::Home(p) => p.is_loading(),
            Page::Categories(p) => p.is_loading(),
            Page::Favourites(p) => p.is_loading(),
            Page::Notification(_) => false,
            Page::Settings(p) => p.is_loading(),
            Page::Details(p) => p.is_loading(),
        }
    }

    /// The failure to surface as a one-line notice, if any slot failed.
    pub fn failure(&self) -> Option<FailureKind> {
        match self {
            Page::Home(p) => p.failure(),
            Page::Categories(p) => p.failure(),
            Page::Favourites(p) => p.failure(),
            Page::Notification(_) => None,
            Page::Settings(p) => p.failure(),
            Page::Details(p) => p.failure(),
        }
    }

    /// Apply a fetch result addressed to this page and return any follow-up
    /// requests it triggers.
    pub fn apply(&mut self, message: FetchMessage) -> Vec<Request> {
        let FetchMessage { ticket, result } = message;
        match self {
            Page::Home(p) => {
                p.apply(ticket, result);
                Vec::new()
            }
            Page::Categories(p) => p.apply(ticket, result),
            Page::Favourites(p) => {
                p.apply(ticket, result);
                Vec::new()
            }
            Page::Notification(_) => Vec::new(),
            Page::Settings(p) => {
                p.apply(ticket, result);
                Vec::new()
            }
            Page::Details(p) => {
                p.apply(ticket, result);
                Vec::new()
            }
        }
    }

    /// Data-bearing content. Empty while the page is loading.
    pub fn sections<'a>(&'a self, favourites: &'a FavouriteSet) -> Vec<Section<'a>> {
        if self.is_loading() {
            return Vec::new();
        }
        match self {
            Page::Home(p) => p.sections(),
            Page::Categories(p) => p.sections(),
            Page::Favourites(p) => p.sections(favourites),
            Page::Notification(_) => Vec::new(),
            Page::Settings(p) => p.sections(),
            Page::Details(p) => p.sections(),
        }
    }
}

/// Request to register a download for a photo. Photos without a download
/// link produce nothing. Downloads are not tied to page state, so the
/// generation is always zero.
pub fn download_request(mount: MountId, photo: &Photo) -> Option<Request> {
    if !photo.has_download_link() {
        return None;
    }
    Some(Request::new(
        mount,
        Slot::Download,
        0,
        Query::DownloadUrl {
            photo_id: photo.id.clone(),
        },
    ))
}

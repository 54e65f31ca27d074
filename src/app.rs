use crate::fetch::{FetchMessage, MountId, Request, Slot};
use crate::model::Photo;
use crate::pages::favourites::FavouriteSet;
use crate::pages::settings::SettingsTab;
use crate::pages::{Entry, Page, download_request};
use crate::shell::{NavShell, SearchHandoff};
use tracing::{debug, info, warn};

/// Addressable pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    ShowDetails(String),
    Categories,
    Favourites,
    Notification,
    Settings,
}

impl Route {
    /// Sidebar entries, in order. Bound to keys 1-5.
    pub const MENU: [Route; 5] = [
        Route::Home,
        Route::Categories,
        Route::Favourites,
        Route::Notification,
        Route::Settings,
    ];

    pub fn parse(path: &str) -> Option<Route> {
        let path = if path.len() > 1 {
            path.strip_suffix('/').unwrap_or(path)
        } else {
            path
        };
        match path {
            "" | "/" => Some(Route::Home),
            "/categories" => Some(Route::Categories),
            "/favourites" => Some(Route::Favourites),
            "/notification" => Some(Route::Notification),
            "/settings" => Some(Route::Settings),
            _ => path
                .strip_prefix("/showdetails/")
                .filter(|id| !id.is_empty())
                .map(|id| Route::ShowDetails(id.to_string())),
        }
    }

    /// Parse a path, falling back to home for anything unknown.
    pub fn parse_or_home(path: &str) -> Route {
        Route::parse(path).unwrap_or_else(|| {
            warn!(%path, "Unknown route, showing home");
            Route::Home
        })
    }

    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::ShowDetails(id) => format!("/showdetails/{}", id),
            Route::Categories => "/categories".to_string(),
            Route::Favourites => "/favourites".to_string(),
            Route::Notification => "/notification".to_string(),
            Route::Settings => "/settings".to_string(),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Route::Home => "Home",
            Route::ShowDetails(_) => "Details",
            Route::Categories => "Categories",
            Route::Favourites => "Favourites",
            Route::Notification => "Notification",
            Route::Settings => "Settings",
        }
    }
}

/// Input mode for the search bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Searching,
}

/// Main application state.
pub struct App {
    pub should_quit: bool,
    pub show_help: bool,
    pub input_mode: InputMode,

    pub route: Route,
    pub page: Page,
    history: Vec<Route>,
    next_mount: u64,

    pub shell: NavShell,
    pub favourites: FavouriteSet,

    // Index into the flattened entries of the current page
    pub selected: usize,

    pub status_msg: String,

    // Drained by the event loop
    outbox: Vec<Request>,
    links_to_open: Vec<String>,
}

impl App {
    pub fn new(initial: Route) -> Self {
        let (page, requests) = Page::mount(&initial, MountId(1));
        Self {
            should_quit: false,
            show_help: false,
            input_mode: InputMode::Normal,

            route: initial,
            page,
            history: Vec::new(),
            next_mount: 1,

            shell: NavShell::default(),
            favourites: FavouriteSet::default(),

            selected: 0,
            status_msg: "Press ? for help".to_string(),

            outbox: requests,
            links_to_open: Vec::new(),
        }
    }

    fn mount(&mut self, route: Route) {
        self.next_mount += 1;
        let (page, requests) = Page::mount(&route, MountId(self.next_mount));
        debug!(path = %route.path(), mount = self.next_mount, "Mounted page");
        self.page = page;
        self.route = route;
        self.selected = 0;
        self.outbox.extend(requests);
    }

    /// Go to a route, remembering the current one for `back`.
    pub fn navigate(&mut self, route: Route) {
        self.navigate_with(route, None);
    }

    fn navigate_with(&mut self, route: Route, handoff: Option<SearchHandoff>) {
        if route == self.route && handoff.is_none() {
            return;
        }
        if route != self.route {
            self.history.push(self.route.clone());
        }

        let reuse = matches!(
            (&self.page, &route),
            (Page::Details(_), Route::ShowDetails(_)) | (Page::Home(_), Route::Home)
        );
        if reuse {
            if let (Page::Details(details), Route::ShowDetails(id)) = (&mut self.page, &route) {
                let requests = details.set_id(id);
                self.outbox.extend(requests);
                self.selected = 0;
            }
            self.route = route;
        } else {
            self.mount(route);
        }

        if let (Some(handoff), Page::Home(home)) = (handoff, &mut self.page) {
            if let Some(request) = home.consume_handoff(&handoff) {
                self.status_msg = format!("Searching for \"{}\"", handoff.query);
                self.outbox.push(request);
            }
        }
    }

    pub fn back(&mut self) {
        if let Some(route) = self.history.pop() {
            self.mount(route);
        }
    }

    pub fn can_go_back(&self) -> bool {
        !self.history.is_empty()
    }

    /// Select a sidebar entry by position.
    pub fn open_menu(&mut self, index: usize) {
        if let Some(route) = Route::MENU.get(index) {
            self.navigate(route.clone());
        }
    }

    /// Submit the search bar. Blank input keeps the bar open and does nothing.
    pub fn submit_search(&mut self) {
        let Some(handoff) = self.shell.submit() else {
            return;
        };
        self.input_mode = InputMode::Normal;
        info!(token = handoff.token, "Search submitted");
        self.navigate_with(Route::Home, Some(handoff));
    }

    pub fn take_requests(&mut self) -> Vec<Request> {
        std::mem::take(&mut self.outbox)
    }

    pub fn take_links(&mut self) -> Vec<String> {
        std::mem::take(&mut self.links_to_open)
    }

    /// Route a fetch result. Download registrations are handled whatever
    /// page is showing; everything else must belong to the mounted page.
    pub fn handle_message(&mut self, message: FetchMessage) {
        if message.ticket.slot == Slot::Download {
            match message.result.and_then(|p| p.into_download_url()) {
                Ok(url) => {
                    self.status_msg = format!("Download ready: {}", url);
                    self.links_to_open.push(url);
                }
                Err(e) => {
                    warn!(error = %e, "Download registration failed");
                    let hint = if e.is_retryable() { " (press d to retry)" } else { "" };
                    self.status_msg = format!("Download failed: {}{}", e.user_message(), hint);
                }
            }
            return;
        }

        let current = self.page.mount_id();
        if message.ticket.mount != current {
            debug!(
                ticket = ?message.ticket,
                current = current.0,
                "Discarding response for a page that was left"
            );
            return;
        }

        let follow_up = self.page.apply(message);
        self.outbox.extend(follow_up);
        self.clamp_selection();
    }

    pub fn entries(&self) -> Vec<Entry<'_>> {
        self.page
            .sections(&self.favourites)
            .into_iter()
            .flat_map(|s| s.entries)
            .collect()
    }

    pub fn selected_photo(&self) -> Option<&Photo> {
        self.entries().get(self.selected).map(|e| e.photo)
    }

    fn clamp_selection(&mut self) {
        let count = self.entries().len();
        self.selected = self.selected.min(count.saturating_sub(1));
    }

    pub fn select_next(&mut self) {
        let count = self.entries().len();
        if self.selected + 1 < count {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Open the detail page for the selected card.
    pub fn open_selected(&mut self) {
        if let Some(id) = self.selected_photo().map(|p| p.id.clone()) {
            self.navigate(Route::ShowDetails(id));
        }
    }

    pub fn toggle_favourite_selected(&mut self) {
        let Some(photo) = self.selected_photo().cloned() else {
            return;
        };
        let added = self.favourites.toggle(&photo);
        self.status_msg = if added {
            format!("Added \"{}\" to favourites", photo.short_title())
        } else {
            format!("Removed \"{}\" from favourites", photo.short_title())
        };
        self.clamp_selection();
    }

    /// Remove the selected card from favourites. Only acts on the
    /// favourites page.
    pub fn remove_favourite_selected(&mut self) {
        if !matches!(self.page, Page::Favourites(_)) {
            return;
        }
        let Some(id) = self.selected_photo().map(|p| p.id.clone()) else {
            return;
        };
        if self.favourites.remove(&id) {
            self.status_msg = "Removed from favourites".to_string();
            self.clamp_selection();
        }
    }

    pub fn download_selected(&mut self) {
        let Some(photo) = self.selected_photo() else {
            return;
        };
        match download_request(self.page.mount_id(), photo) {
            Some(request) => {
                self.status_msg = "Registering download...".to_string();
                self.outbox.push(request);
            }
            None => self.status_msg = "This photo has no download link".to_string(),
        }
    }

    pub fn next_tab(&mut self) {
        let request = match &mut self.page {
            Page::Categories(p) => p.select_next(),
            Page::Settings(p) => p.next_tab(),
            _ => return,
        };
        self.selected = 0;
        self.outbox.extend(request);
    }

    pub fn prev_tab(&mut self) {
        let request = match &mut self.page {
            Page::Categories(p) => p.select_prev(),
            Page::Settings(p) => p.prev_tab(),
            _ => return,
        };
        self.selected = 0;
        self.outbox.extend(request);
    }

    pub fn change_wallpaper(&mut self) {
        if let Page::Settings(p) = &mut self.page {
            if let Some(request) = p.change_wallpaper() {
                self.status_msg = "Fetching a new wallpaper...".to_string();
                self.outbox.push(request);
            }
        }
    }

    pub fn toggle_auto_change(&mut self) {
        if let Page::Settings(p) = &mut self.page {
            if p.tab() == SettingsTab::General {
                let on = p.toggle_auto_change();
                self.status_msg = format!(
                    "Automatic wallpaper change {}",
                    if on { "enabled" } else { "disabled" }
                );
            }
        }
    }

    pub fn toggle_two_factor(&mut self) {
        if let Page::Settings(p) = &mut self.page {
            if p.tab() == SettingsTab::Profile {
                let on = p.profile_mut().toggle_two_factor();
                self.status_msg = format!(
                    "Two-factor authentication {}",
                    if on { "on" } else { "off" }
                );
            }
        }
    }
}

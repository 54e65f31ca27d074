use super::Section;
use super::profile::Profile;
use crate::api::{ApiError, FailureKind, Payload, Query};
use crate::fetch::{MountId, Outcome, Request, Slot, Ticket, Tracked};
use crate::model::{Photo, RandomFilters};
use tracing::{debug, warn};

pub const WALLPAPER_QUERY: &str = "landscape";
pub const DEFAULT_DESCRIPTION: &str = "Beautiful Wallpaper";
pub const UNKNOWN_AUTHOR: &str = "Unknown";

/// Which tab is selected on the settings page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsTab {
    General,
    Profile,
    Preferences,
    History,
}

impl SettingsTab {
    pub const ALL: [SettingsTab; 4] = [Self::General, Self::Profile, Self::Preferences, Self::History];

    pub fn next(self) -> Self {
        match self {
            Self::General => Self::Profile,
            Self::Profile => Self::Preferences,
            Self::Preferences => Self::History,
            Self::History => Self::General,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::General => Self::History,
            Self::Profile => Self::General,
            Self::Preferences => Self::Profile,
            Self::History => Self::Preferences,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::General => "General",
            Self::Profile => "Profile",
            Self::Preferences => "Preferences",
            Self::History => "History",
        }
    }

    /// Body text for tabs that only show a placeholder.
    pub fn placeholder(self) -> Option<&'static str> {
        match self {
            Self::Preferences => Some("Customize your app behavior and settings"),
            Self::History => Some("View previously applied wallpapers"),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub struct SettingsPage {
    mount: MountId,
    tab: SettingsTab,
    wallpaper: Tracked<Photo>,
    auto_change: bool,
    profile: Profile,
}

impl SettingsPage {
    pub fn mount(mount: MountId) -> (Self, Vec<Request>) {
        let mut page = Self {
            mount,
            tab: SettingsTab::General,
            wallpaper: Tracked::default(),
            auto_change: false,
            profile: Profile::default(),
        };
        let request = page.fetch_wallpaper();
        (page, vec![request])
    }

    pub fn mount_id(&self) -> MountId {
        self.mount
    }

    fn fetch_wallpaper(&mut self) -> Request {
        Request::new(
            self.mount,
            Slot::Wallpaper,
            self.wallpaper.begin(),
            Query::Random {
                filters: RandomFilters::landscape(WALLPAPER_QUERY),
            },
        )
    }

    /// Switch tab. The wallpaper is dropped on every switch and refetched
    /// when General is chosen.
    pub fn select_tab(&mut self, tab: SettingsTab) -> Option<Request> {
        debug!(tab = tab.label(), "Selecting settings tab");
        self.tab = tab;
        match tab {
            SettingsTab::General => Some(self.fetch_wallpaper()),
            _ => {
                self.wallpaper.reset();
                None
            }
        }
    }

    pub fn next_tab(&mut self) -> Option<Request> {
        self.select_tab(self.tab.next())
    }

    pub fn prev_tab(&mut self) -> Option<Request> {
        self.select_tab(self.tab.prev())
    }

    /// "Change Wallpaper": only meaningful on the General tab.
    pub fn change_wallpaper(&mut self) -> Option<Request> {
        if self.tab != SettingsTab::General {
            return None;
        }
        Some(self.fetch_wallpaper())
    }

    pub fn toggle_auto_change(&mut self) -> bool {
        self.auto_change = !self.auto_change;
        self.auto_change
    }

    pub fn apply(&mut self, ticket: Ticket, result: Result<Payload, ApiError>) -> bool {
        if ticket.slot != Slot::Wallpaper {
            debug!(slot = ?ticket.slot, "Settings ignores slot");
            return false;
        }
        if let Err(e) = &result {
            warn!(error = %e, "Wallpaper fetch failed");
        }
        let outcome = Outcome::from_item(result.and_then(Payload::into_photo));
        self.wallpaper.settle(ticket.generation, outcome)
    }

    pub fn tab(&self) -> SettingsTab {
        self.tab
    }

    pub fn auto_change(&self) -> bool {
        self.auto_change
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn profile_mut(&mut self) -> &mut Profile {
        &mut self.profile
    }

    pub fn wallpaper(&self) -> Option<&Photo> {
        self.wallpaper.value()
    }

    pub fn is_loading(&self) -> bool {
        self.wallpaper.is_loading()
    }

    pub fn failure(&self) -> Option<FailureKind> {
        self.wallpaper.failure()
    }

    pub fn sections(&self) -> Vec<Section<'_>> {
        match self.wallpaper.value() {
            Some(photo) => vec![Section::of_photos("Current Wallpaper", std::slice::from_ref(photo))],
            None => Vec::new(),
        }
    }
}

/// Description line for the wallpaper card.
pub fn wallpaper_description(photo: &Photo) -> &str {
    photo
        .description
        .as_deref()
        .filter(|d| !d.trim().is_empty())
        .unwrap_or(DEFAULT_DESCRIPTION)
}

pub fn wallpaper_author(photo: &Photo) -> &str {
    if photo.user.name.trim().is_empty() {
        UNKNOWN_AUTHOR
    } else {
        &photo.user.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures;

    fn loaded() -> SettingsPage {
        let (mut page, requests) = SettingsPage::mount(MountId(5));
        let photo = fixtures::photo("w1");
        assert!(page.apply(requests[0].ticket, Ok(Payload::Photo(Box::new(photo)))));
        page
    }

    #[test]
    fn test_mount_requests_landscape_wallpaper() {
        let (page, requests) = SettingsPage::mount(MountId(5));
        assert!(page.is_loading());
        assert_eq!(page.tab(), SettingsTab::General);
        assert_eq!(
            requests[0].query,
            Query::Random {
                filters: RandomFilters::landscape("landscape")
            }
        );
    }

    #[test]
    fn test_leaving_general_discards_wallpaper() {
        let mut page = loaded();
        assert_eq!(page.sections()[0].title, "Current Wallpaper");

        assert!(page.select_tab(SettingsTab::Profile).is_none());
        assert!(page.wallpaper().is_none());
        assert!(!page.is_loading());
        assert!(page.change_wallpaper().is_none());

        let back = page.select_tab(SettingsTab::General).unwrap();
        assert_eq!(back.ticket.slot, Slot::Wallpaper);
        assert!(page.is_loading());
    }

    #[test]
    fn test_change_wallpaper_drops_superseded_response() {
        let (mut page, requests) = SettingsPage::mount(MountId(5));
        let newer = page.change_wallpaper().unwrap();

        let old = Payload::Photo(Box::new(fixtures::photo("old")));
        assert!(!page.apply(requests[0].ticket, Ok(old)));
        let new = Payload::Photo(Box::new(fixtures::photo("new")));
        assert!(page.apply(newer.ticket, Ok(new)));
        assert_eq!(page.wallpaper().unwrap().id, "new");
    }

    #[test]
    fn test_tab_cycle() {
        for tab in SettingsTab::ALL {
            assert_eq!(tab.next().prev(), tab);
        }
        assert_eq!(SettingsTab::History.next(), SettingsTab::General);
    }

    #[test]
    fn test_card_defaults() {
        let mut photo = fixtures::photo("w");
        assert_eq!(wallpaper_description(&photo), DEFAULT_DESCRIPTION);
        assert_eq!(wallpaper_author(&photo), "Jane Doe");
        photo.user.name.clear();
        photo.description = Some("Misty hills".into());
        assert_eq!(wallpaper_author(&photo), UNKNOWN_AUTHOR);
        assert_eq!(wallpaper_description(&photo), "Misty hills");
    }

    #[test]
    fn test_auto_change_toggle() {
        let mut page = loaded();
        assert!(page.toggle_auto_change());
        assert!(page.auto_change());
    }
}

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Image URL variants returned for every photo.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PhotoUrls {
    pub raw: String,
    pub full: String,
    pub regular: String,
    pub small: String,
    pub thumb: String,
}

/// Links attached to a photo. `download_location` is the endpoint that must be
/// hit to register a download before the asset is fetched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PhotoLinks {
    pub html: Option<String>,
    pub download: Option<String>,
    pub download_location: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ProfileImage {
    pub small: String,
    pub medium: String,
    pub large: String,
}

/// Photographer summary embedded in every photo.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct User {
    pub name: String,
    pub username: String,
    pub profile_image: ProfileImage,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Tag {
    pub title: String,
}

/// A single photo record.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Photo {
    pub id: String,
    pub created_at: Option<DateTime<Utc>>,
    pub width: u32,
    pub height: u32,
    pub description: Option<String>,
    pub alt_description: Option<String>,
    pub urls: PhotoUrls,
    pub links: PhotoLinks,
    pub likes: u64,
    /// Only present on single-photo lookups.
    pub downloads: Option<u64>,
    pub user: User,
    /// Only present on single-photo lookups.
    pub tags: Vec<Tag>,
}

impl Photo {
    pub fn title(&self) -> &str {
        match self.alt_description.as_deref() {
            Some(s) if !s.trim().is_empty() => s,
            _ => "Untitled",
        }
    }

    /// First comma-separated part of the title, used on compact cards.
    pub fn short_title(&self) -> &str {
        self.title().split(',').next().unwrap_or("Untitled").trim()
    }

    pub fn caption(&self) -> String {
        match self.description.as_deref() {
            Some(s) if !s.trim().is_empty() => s.to_string(),
            _ => format!(
                "A beautiful wallpaper from Unsplash. Photo by {}.",
                self.user.name
            ),
        }
    }

    pub fn dimensions(&self) -> String {
        format!("{} × {}", self.width, self.height)
    }

    pub fn has_download_link(&self) -> bool {
        self.links
            .download_location
            .as_deref()
            .is_some_and(|l| !l.is_empty())
    }
}

/// A named grouping of photos (Unsplash "topic").
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Topic {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub description: Option<String>,
    pub total_photos: u64,
    pub cover_photo: Option<Photo>,
}

/// Body of `GET /search/photos`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SearchPage {
    pub total: u64,
    pub total_pages: u64,
    pub results: Vec<Photo>,
}

/// Body of `GET /photos/{id}/related`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RelatedPage {
    pub results: Vec<Photo>,
}

/// Body of `GET /photos/{id}/download`.
#[derive(Debug, Clone, Deserialize)]
pub struct DownloadLink {
    pub url: String,
}

/// Listing order for `GET /photos`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Order {
    Latest,
    Popular,
}

impl Order {
    pub fn as_param(self) -> &'static str {
        match self {
            Self::Latest => "latest",
            Self::Popular => "popular",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    Landscape,
    Portrait,
    Squarish,
}

impl Orientation {
    pub fn as_param(self) -> &'static str {
        match self {
            Self::Landscape => "landscape",
            Self::Portrait => "portrait",
            Self::Squarish => "squarish",
        }
    }
}

/// Filters accepted by the random-photo endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct RandomFilters {
    pub query: Option<String>,
    pub orientation: Option<Orientation>,
}

impl RandomFilters {
    pub fn landscape(query: &str) -> Self {
        Self {
            query: Some(query.to_string()),
            orientation: Some(Orientation::Landscape),
        }
    }
}

#[cfg(test)]
pub mod fixtures {
    use super::*;

    pub fn photo(id: &str) -> Photo {
        Photo {
            id: id.to_string(),
            width: 4000,
            height: 3000,
            alt_description: Some(format!("photo {id}")),
            links: PhotoLinks {
                html: Some(format!("https://unsplash.com/photos/{id}")),
                download: Some(format!("https://unsplash.com/photos/{id}/download")),
                download_location: Some(format!("https://api.unsplash.com/photos/{id}/download")),
            },
            user: User {
                name: "Jane Doe".to_string(),
                username: "jane".to_string(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    pub fn photos(ids: &[&str]) -> Vec<Photo> {
        ids.iter().map(|id| photo(id)).collect()
    }

    pub fn topic(id: &str, cover: Option<&str>) -> Topic {
        Topic {
            id: id.to_string(),
            slug: id.to_string(),
            title: format!("Topic {id}"),
            cover_photo: cover.map(photo),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PHOTO_JSON: &str = r##"{
        "id": "Dwu85P9SOIk",
        "created_at": "2016-05-03T11:00:28-04:00",
        "width": 2448,
        "height": 3264,
        "color": "#6E633A",
        "downloads": 1345,
        "likes": 24,
        "description": "A man drinking a coffee.",
        "alt_description": null,
        "urls": {
            "raw": "https://images.unsplash.com/raw",
            "full": "https://images.unsplash.com/full",
            "regular": "https://images.unsplash.com/regular",
            "small": "https://images.unsplash.com/small",
            "thumb": "https://images.unsplash.com/thumb"
        },
        "links": {
            "self": "https://api.unsplash.com/photos/Dwu85P9SOIk",
            "html": "https://unsplash.com/photos/Dwu85P9SOIk",
            "download": "https://unsplash.com/photos/Dwu85P9SOIk/download",
            "download_location": "https://api.unsplash.com/photos/Dwu85P9SOIk/download"
        },
        "tags": [{ "type": "search", "title": "coffee" }, { "title": "man" }],
        "user": {
            "id": "QPxL2MGqfrw",
            "username": "exampleuser",
            "name": "Joe Example",
            "profile_image": { "small": "s", "medium": "m", "large": "l" }
        }
    }"##;

    #[test]
    fn test_photo_deserializes_full_record() {
        let photo: Photo = serde_json::from_str(PHOTO_JSON).unwrap();
        assert_eq!(photo.id, "Dwu85P9SOIk");
        assert_eq!(photo.downloads, Some(1345));
        assert_eq!(photo.tags.len(), 2);
        assert_eq!(photo.tags[0].title, "coffee");
        assert_eq!(photo.user.username, "exampleuser");
        assert!(photo.has_download_link());
        assert!(photo.created_at.is_some());
    }

    #[test]
    fn test_photo_tolerates_missing_fields() {
        let photo: Photo = serde_json::from_str(r#"{"id": "x"}"#).unwrap();
        assert_eq!(photo.id, "x");
        assert!(photo.tags.is_empty());
        assert!(!photo.has_download_link());
        assert_eq!(photo.title(), "Untitled");
    }

    #[test]
    fn test_photo_text_helpers() {
        let mut photo: Photo = serde_json::from_str(PHOTO_JSON).unwrap();
        assert_eq!(photo.caption(), "A man drinking a coffee.");
        assert_eq!(photo.dimensions(), "2448 × 3264");

        photo.description = None;
        assert_eq!(
            photo.caption(),
            "A beautiful wallpaper from Unsplash. Photo by Joe Example."
        );

        photo.alt_description = Some("mountain lake, sunrise, fog".to_string());
        assert_eq!(photo.short_title(), "mountain lake");
    }

    #[test]
    fn test_topic_with_cover_photo() {
        let json = format!(
            r#"{{"id": "t1", "slug": "wallpapers", "title": "Wallpapers", "total_photos": 10, "cover_photo": {PHOTO_JSON}}}"#
        );
        let topic: Topic = serde_json::from_str(&json).unwrap();
        assert_eq!(topic.title, "Wallpapers");
        assert_eq!(topic.cover_photo.unwrap().id, "Dwu85P9SOIk");
    }

    #[test]
    fn test_order_and_orientation_params() {
        assert_eq!(Order::Latest.as_param(), "latest");
        assert_eq!(Order::Popular.as_param(), "popular");
        assert_eq!(Orientation::Landscape.as_param(), "landscape");
        let filters = RandomFilters::landscape("landscape");
        assert_eq!(filters.orientation, Some(Orientation::Landscape));
    }
}

mod error;

pub use error::{ApiError, FailureKind};

use crate::model::{
    DownloadLink, Order, Photo, RandomFilters, RelatedPage, SearchPage, Topic,
};
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, warn};

pub const DEFAULT_API_URL: &str = "https://api.unsplash.com";

/// One outbound operation against the photo API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    ListPhotos { order: Order, per_page: u32 },
    Search { query: String, per_page: u32 },
    Topics { per_page: u32 },
    TopicPhotos { topic_id: String, per_page: u32 },
    Photo { id: String },
    Related { id: String, limit: usize },
    Random { filters: RandomFilters },
    RandomBatch { filters: RandomFilters, count: u32 },
    DownloadUrl { photo_id: String },
}

/// Decoded result of a [`Query`].
#[derive(Debug, Clone)]
pub enum Payload {
    Photos(Vec<Photo>),
    Topics(Vec<Topic>),
    Photo(Box<Photo>),
    DownloadUrl(String),
}

impl Payload {
    pub fn into_photos(self) -> Result<Vec<Photo>, ApiError> {
        match self {
            Payload::Photos(photos) => Ok(photos),
            _ => Err(ApiError::UnexpectedPayload("a photo list")),
        }
    }

    pub fn into_topics(self) -> Result<Vec<Topic>, ApiError> {
        match self {
            Payload::Topics(topics) => Ok(topics),
            _ => Err(ApiError::UnexpectedPayload("a topic list")),
        }
    }

    pub fn into_photo(self) -> Result<Photo, ApiError> {
        match self {
            Payload::Photo(photo) => Ok(*photo),
            _ => Err(ApiError::UnexpectedPayload("a single photo")),
        }
    }

    pub fn into_download_url(self) -> Result<String, ApiError> {
        match self {
            Payload::DownloadUrl(url) => Ok(url),
            _ => Err(ApiError::UnexpectedPayload("a download URL")),
        }
    }
}

/// A decoded listing. Unsplash answers a failed listing with a JSON error
/// body; that still decodes to empty `items`, and `rejection` records the
/// status so an empty listing can be told apart from a refused one.
#[derive(Debug)]
pub struct Listing<T> {
    pub items: T,
    pub rejection: Option<ApiError>,
}

impl<T> Listing<T> {
    pub fn found(items: T) -> Self {
        Self {
            items,
            rejection: None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Listing<U> {
        Listing {
            items: f(self.items),
            rejection: self.rejection,
        }
    }

    /// The items, or the rejection if the server refused the listing.
    pub fn into_result(self) -> Result<T, ApiError> {
        match self.rejection {
            Some(error) => Err(error),
            None => Ok(self.items),
        }
    }
}

/// Anything that can answer a [`Query`]. The real implementation is
/// [`UnsplashClient`]; tests plug in canned sources.
pub trait PhotoSource: Send + Sync + 'static {
    fn execute(&self, query: Query) -> impl Future<Output = Result<Payload, ApiError>> + Send;
}

/// Thin client over the Unsplash REST API. Cheap to clone; holds no cache.
#[derive(Debug, Clone)]
pub struct UnsplashClient {
    http: reqwest::Client,
    base_url: Url,
    access_key: Arc<str>,
}

impl UnsplashClient {
    pub fn new(base_url: &str, access_key: &str) -> Result<Self, ApiError> {
        let mut base = Url::parse(base_url)
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {}", base_url, e)))?;
        if base.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl(base_url.to_string()));
        }
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let http = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: base,
            access_key: Arc::from(access_key.trim()),
        })
    }

    /// Build a request URL from path segments and query parameters. The access
    /// key is always appended as `client_id`. Segments are percent-encoded, so
    /// identifiers are forwarded verbatim.
    pub fn endpoint(&self, segments: &[&str], params: &[(&str, String)]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in params {
                pairs.append_pair(key, value);
            }
            pairs.append_pair("client_id", &self.access_key);
        }
        Ok(url)
    }

    async fn get(&self, url: Url) -> Result<(StatusCode, String), ApiError> {
        let path = url.path().to_string();
        let response = self
            .http
            .get(url)
            .header("Accept-Version", "v1")
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;
        debug!(%path, status = status.as_u16(), bytes = body.len(), "GET");
        Ok((status, body))
    }

    pub async fn list_photos(&self, order: Order, per_page: u32) -> Result<Listing<Vec<Photo>>, ApiError> {
        let url = self.endpoint(
            &["photos"],
            &[
                ("order_by", order.as_param().to_string()),
                ("per_page", per_page.to_string()),
            ],
        )?;
        let (status, body) = self.get(url).await?;
        decode_list(status, &body)
    }

    /// Blank queries never leave the process.
    pub async fn search_photos(&self, query: &str, per_page: u32) -> Result<Listing<Vec<Photo>>, ApiError> {
        let query = query.trim();
        if query.is_empty() {
            debug!("Skipping search with blank query");
            return Ok(Listing::found(Vec::new()));
        }
        let url = self.endpoint(
            &["search", "photos"],
            &[
                ("query", query.to_string()),
                ("per_page", per_page.to_string()),
            ],
        )?;
        let (status, body) = self.get(url).await?;
        let page: Listing<SearchPage> = decode_list(status, &body)?;
        Ok(page.map(|p| p.results))
    }

    pub async fn list_topics(&self, per_page: u32) -> Result<Listing<Vec<Topic>>, ApiError> {
        let url = self.endpoint(&["topics"], &[("per_page", per_page.to_string())])?;
        let (status, body) = self.get(url).await?;
        decode_list(status, &body)
    }

    pub async fn list_topic_photos(&self, topic_id: &str, per_page: u32) -> Result<Listing<Vec<Photo>>, ApiError> {
        let url = self.endpoint(
            &["topics", topic_id, "photos"],
            &[("per_page", per_page.to_string())],
        )?;
        let (status, body) = self.get(url).await?;
        decode_list(status, &body)
    }

    pub async fn get_photo(&self, id: &str) -> Result<Photo, ApiError> {
        let url = self.endpoint(&["photos", id], &[])?;
        let (status, body) = self.get(url).await?;
        decode_item(status, &body, id)
    }

    pub async fn get_related_photos(&self, id: &str, limit: usize) -> Result<Listing<Vec<Photo>>, ApiError> {
        let url = self.endpoint(&["photos", id, "related"], &[])?;
        let (status, body) = self.get(url).await?;
        let page: Listing<RelatedPage> = decode_list(status, &body)?;
        Ok(page.map(|p| {
            let mut results = p.results;
            results.truncate(limit);
            results
        }))
    }

    pub async fn get_random_photo(&self, filters: &RandomFilters) -> Result<Photo, ApiError> {
        let url = self.endpoint(&["photos", "random"], &random_params(filters))?;
        let (status, body) = self.get(url).await?;
        decode_item(status, &body, "random")
    }

    pub async fn get_random_photos(&self, filters: &RandomFilters, count: u32) -> Result<Listing<Vec<Photo>>, ApiError> {
        let mut params = random_params(filters);
        params.push(("count", count.to_string()));
        let url = self.endpoint(&["photos", "random"], &params)?;
        let (status, body) = self.get(url).await?;
        decode_list(status, &body)
    }

    /// Register a download with Unsplash and return the URL of the asset.
    /// Every call registers again; callers can invoke it repeatedly.
    pub async fn resolve_download_url(&self, photo_id: &str) -> Result<String, ApiError> {
        let url = self.endpoint(&["photos", photo_id, "download"], &[])?;
        let (status, body) = self.get(url).await?;
        let link: DownloadLink = decode_item(status, &body, photo_id)?;
        Ok(link.url)
    }

    async fn run(&self, query: Query) -> Result<Payload, ApiError> {
        match query {
            Query::ListPhotos { order, per_page } => self
                .list_photos(order, per_page)
                .await?
                .into_result()
                .map(Payload::Photos),
            Query::Search { query, per_page } => self
                .search_photos(&query, per_page)
                .await?
                .into_result()
                .map(Payload::Photos),
            Query::Topics { per_page } => self
                .list_topics(per_page)
                .await?
                .into_result()
                .map(Payload::Topics),
            Query::TopicPhotos { topic_id, per_page } => self
                .list_topic_photos(&topic_id, per_page)
                .await?
                .into_result()
                .map(Payload::Photos),
            Query::Photo { id } => self
                .get_photo(&id)
                .await
                .map(|p| Payload::Photo(Box::new(p))),
            Query::Related { id, limit } => self
                .get_related_photos(&id, limit)
                .await?
                .into_result()
                .map(Payload::Photos),
            Query::Random { filters } => self
                .get_random_photo(&filters)
                .await
                .map(|p| Payload::Photo(Box::new(p))),
            Query::RandomBatch { filters, count } => self
                .get_random_photos(&filters, count)
                .await?
                .into_result()
                .map(Payload::Photos),
            Query::DownloadUrl { photo_id } => self
                .resolve_download_url(&photo_id)
                .await
                .map(Payload::DownloadUrl),
        }
    }
}

impl PhotoSource for UnsplashClient {
    fn execute(&self, query: Query) -> impl Future<Output = Result<Payload, ApiError>> + Send {
        let client = self.clone();
        async move { client.run(query).await }
    }
}

fn random_params(filters: &RandomFilters) -> Vec<(&'static str, String)> {
    let mut params = Vec::new();
    if let Some(query) = filters.query.as_deref().filter(|q| !q.trim().is_empty()) {
        params.push(("query", query.trim().to_string()));
    }
    if let Some(orientation) = filters.orientation {
        params.push(("orientation", orientation.as_param().to_string()));
    }
    params
}

/// Decode a listing body. A non-success response whose body is still JSON
/// (Unsplash answers errors with `{"errors": [...]}`) yields an empty listing
/// that carries the rejection.
pub fn decode_list<T: DeserializeOwned + Default>(status: StatusCode, body: &str) -> Result<Listing<T>, ApiError> {
    if status.is_success() {
        return Ok(Listing::found(serde_json::from_str(body)?));
    }
    let rejection = ApiError::Status {
        status: status.as_u16(),
        message: error_message(body),
    };
    if serde_json::from_str::<serde_json::Value>(body).is_ok() {
        warn!(error = %rejection, "Listing request refused");
        return Ok(Listing {
            items: T::default(),
            rejection: Some(rejection),
        });
    }
    Err(rejection)
}

/// Decode a single-entity body; 404 maps to [`ApiError::NotFound`].
pub fn decode_item<T: DeserializeOwned>(status: StatusCode, body: &str, id: &str) -> Result<T, ApiError> {
    if status == StatusCode::NOT_FOUND {
        return Err(ApiError::NotFound(id.to_string()));
    }
    if !status.is_success() {
        return Err(ApiError::Status {
            status: status.as_u16(),
            message: error_message(body),
        });
    }
    Ok(serde_json::from_str(body)?)
}

/// Pull a readable message out of an error body.
fn error_message(body: &str) -> String {
    #[derive(serde::Deserialize)]
    struct ErrorBody {
        errors: Vec<String>,
    }

    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) if !parsed.errors.is_empty() => parsed.errors.join("; "),
        _ => body.trim().chars().take(200).collect(),
    }
}

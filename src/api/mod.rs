use crate::internal::models::Item;
use anyhow::{Context, Result, anyhow};
use html2text::from_read;
use reqwest::Url;
use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use strum_macros::{Display, EnumIter};
use tracing::{debug, warn};

/// Types of Hacker News story lists we can fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
pub enum StoryListType {
    Top,
    New,
    Best,
    Ask,
    Show,
    Job,
}

impl StoryListType {
    fn as_api_str(&self) -> &str {
        match self {
            Self::Top => "topstories",
            Self::New => "newstories",
            Self::Best => "beststories",
            Self::Ask => "askstories",
            Self::Show => "showstories",
            Self::Job => "jobstories",
        }
    }

    /// Heading printed above a listing of this type.
    pub fn heading(&self) -> &'static str {
        match self {
            Self::Top => "Top Stories",
            Self::New => "Latest Stories",
            Self::Best => "Best Stories",
            Self::Ask => "Ask HN",
            Self::Show => "Show HN",
            Self::Job => "Jobs",
        }
    }
}

pub const HN_API_BASE_URL: &str = "https://hacker-news.firebaseio.com/v0/";
pub const HN_ITEM_PAGE_URL: &str = "https://news.ycombinator.com/item?id=";
pub const HTML_TO_TEXT_SERVICE_URL: &str = "https://www.w3.org/services/html2txt";

/// Link to the discussion page of an item.
pub fn item_page_url(id: u32) -> String {
    format!("{}{}", HN_ITEM_PAGE_URL, id)
}

/// Read access to Hacker News items.
///
/// The listing and viewing code only talks to this trait so tests can feed
/// in items from memory.
pub trait ItemSource {
    fn get_item(&self, id: u32) -> Result<Item>;
    fn get_list_ids(&self, list_type: StoryListType) -> Result<Vec<u32>>;
}

/// HTTP API service for fetching Hacker News data.
///
/// This service uses `reqwest::blocking::Client` and returns `anyhow::Result` with
/// contextualized errors to preserve diagnostic information instead of erasing it
/// into plain strings.
#[derive(Clone)]
pub struct ApiService {
    client: Client,
    base_url: String,
    text_service_url: String,
    page_width: usize,
}

impl ApiService {
    /// Create a new `ApiService` against the public API with a request timeout.
    pub fn new(timeout: Duration) -> Result<Self> {
        Self::with_base_url(HN_API_BASE_URL.to_string(), timeout)
    }

    /// Point the service at another API root, e.g. a mock server. The URL
    /// must end with a slash.
    pub fn with_base_url(base_url: String, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("hn-cli/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url,
            text_service_url: HTML_TO_TEXT_SERVICE_URL.to_string(),
            page_width: 80,
        })
    }

    /// Override the HTML to text conversion service.
    pub fn with_text_service(mut self, url: String) -> Self {
        self.text_service_url = url;
        self
    }

    /// Column width used when converting pages locally.
    pub fn with_page_width(mut self, width: usize) -> Self {
        self.page_width = width;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Generic helper to GET a URL and deserialize the JSON body into `T`.
    fn get_json<T>(&self, url: &str) -> Result<T>
    where
        T: DeserializeOwned,
    {
        debug!(url, "GET");
        let resp = self
            .client
            .get(url)
            .send()
            .with_context(|| format!("failed to send GET request to {}", url))?
            .error_for_status()
            .with_context(|| format!("request to {} returned an error status", url))?;

        resp.json::<T>()
            .with_context(|| format!("failed to parse JSON response from {}", url))
    }

    /// Fetch a list of story IDs for the given list type (e.g., top, new).
    pub fn fetch_story_ids(&self, list_type: StoryListType) -> Result<Vec<u32>> {
        let url = format!("{}{}.json", self.base_url, list_type.as_api_str());
        self.get_json(&url)
            .with_context(|| format!("fetch_story_ids failed for list {}", list_type))
    }

    /// Fetch a single item by id. The API answers `null` for unknown ids.
    pub fn fetch_item(&self, id: u32) -> Result<Item> {
        let url = format!("{}item/{}.json", self.base_url, id);
        let item: Option<Item> = self
            .get_json(&url)
            .with_context(|| format!("fetch_item failed for id {}", id))?;
        item.ok_or_else(|| anyhow!("item {} not found", id))
    }

    /// Fetch a web page as plain text.
    ///
    /// Goes through the remote HTML to text service first and converts the
    /// raw page locally when that service is unavailable.
    pub fn render_page(&self, url: &str) -> Result<String> {
        match self.render_via_service(url) {
            Ok(text) => Ok(text),
            Err(e) => {
                warn!(url, error = %e, "HTML to text service failed, converting locally");
                self.render_locally(url)
            }
        }
    }

    fn render_via_service(&self, url: &str) -> Result<String> {
        let service = Url::parse_with_params(&self.text_service_url, &[("url", url)])
            .context("invalid HTML to text service url")?;

        self.client
            .get(service.clone())
            .send()
            .with_context(|| format!("failed to reach {}", service))?
            .error_for_status()
            .with_context(|| format!("{} returned an error status", service))?
            .text()
            .context("failed to read converted page")
    }

    fn render_locally(&self, url: &str) -> Result<String> {
        let bytes = self
            .client
            .get(url)
            .send()
            .with_context(|| format!("failed to fetch {}", url))?
            .bytes()
            .context("failed to get response bytes")?;

        from_read(&bytes[..], self.page_width).context("failed to convert HTML to text")
    }
}

impl ItemSource for ApiService {
    fn get_item(&self, id: u32) -> Result<Item> {
        self.fetch_item(id)
    }

    fn get_list_ids(&self, list_type: StoryListType) -> Result<Vec<u32>> {
        self.fetch_story_ids(list_type)
    }
}

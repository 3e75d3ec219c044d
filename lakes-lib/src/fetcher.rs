//! Retrieval of lake descriptions from an online encyclopedia.
//!
//! A fetch is a single GET request for the article matching a lake's name followed by
//! extraction of the visible text of one container element. There is no retry and no
//! caching: fetching the same name twice repeats the request.

use std::sync::LazyLock;

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use regex::Regex;
use reqwest::{Client, StatusCode, Url};
use scraper::{Html, Selector};
use thiserror::Error;
use tokio::task::{JoinError, spawn_blocking};
use tracing::{debug, warn};

use crate::repository::FetcherConfig;

/// Characters escaped when a lake name becomes one URL path segment
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'\\')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Runs of lines holding nothing but whitespace
static BLANK_LINES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\s*\n").expect("blank line pattern must compile"));

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Lake name must not be empty")]
    EmptyName,
    #[error("Invalid article URL {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("No article found for \"{name}\" (HTTP {status})")]
    NotFound { name: String, status: StatusCode },
    #[error("No network access: {0}")]
    NoNetwork(#[source] reqwest::Error),
    #[error("The article has no element with id \"{0}\"")]
    MissingContent(String),
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("Text extraction failed: {0}")]
    Extraction(#[from] JoinError),
}

/// Fetches article text for lake names.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
    url_template: String,
    container_id: String,
}

impl Fetcher {
    pub fn new(cfg: &FetcherConfig) -> Result<Self, FetchError> {
        let mut builder = Client::builder().user_agent(cfg.user_agent.clone());
        if let Some(timeout) = cfg.timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build().map_err(FetchError::Client)?,
            url_template: cfg.url_template.clone(),
            container_id: cfg.container_id.clone(),
        })
    }

    /// The article URL for `name`, which is escaped so it stays a single path segment.
    pub fn article_url(&self, name: &str) -> Result<Url, FetchError> {
        let segment = utf8_percent_encode(name.trim(), PATH_SEGMENT).to_string();
        let url = self.url_template.replace("{name}", &segment);

        Url::parse(&url).map_err(|source| FetchError::InvalidUrl { url, source })
    }

    /// Download the article for `name` and return its plain text.
    ///
    /// The text extraction runs on the blocking thread pool so the caller's executor stays
    /// responsive while a large page is parsed.
    pub async fn fetch(&self, name: &str) -> Result<String, FetchError> {
        if name.trim().is_empty() {
            return Err(FetchError::EmptyName);
        }

        let url = self.article_url(name)?;
        debug!("Fetching {url}");

        let response = self.client.get(url).send().await.map_err(|e| {
            warn!("Request for {name} failed: {e}");
            FetchError::NoNetwork(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!("No article for {name} (HTTP {status})");
            return Err(FetchError::NotFound {
                name: name.into(),
                status,
            });
        }

        let body = response.text().await.map_err(FetchError::NoNetwork)?;
        let container_id = self.container_id.clone();

        spawn_blocking(move || extract_text(&body, &container_id))
            .await?
            .ok_or_else(|| FetchError::MissingContent(self.container_id.clone()))
    }
}

/// The visible text of the element with `id="{container_id}"`, with blank lines
/// collapsed and surrounding whitespace trimmed. `None` if no such element exists.
pub fn extract_text(html: &str, container_id: &str) -> Option<String> {
    let selector = Selector::parse(&format!("[id=\"{container_id}\"]")).ok()?;
    let document = Html::parse_document(html);
    let container = document.select(&selector).next()?;

    let text: String = container.text().collect();

    Some(collapse_blank_lines(&text))
}

/// Replace every run of blank lines with a single line break and trim the result.
pub fn collapse_blank_lines(text: &str) -> String {
    BLANK_LINES.replace_all(text, "\n").trim().to_string()
}

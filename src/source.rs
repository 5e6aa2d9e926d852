//! Remote access to the entity index and entity files.

use log::{debug, info};
use reqwest::blocking::{Client, Response};
use reqwest::StatusCode;

use crate::config::PipelineConfig;
use crate::error::{FetchError, ListingError};
use crate::listing::EntityFile;

/// Where entity definitions come from.
///
/// Calls block until the remote answers; nothing is retried.
#[cfg_attr(test, mockall::automock)]
pub trait EntitySource {
    /// Retrieves the pinned entity index.
    ///
    /// # Errors
    /// Any [`ListingError`] aborts the run.
    fn list_entity_files(&self) -> Result<Vec<EntityFile>, ListingError>;

    /// Retrieves the raw text behind `url`.
    ///
    /// # Errors
    /// A [`FetchError`] skips only the file being fetched.
    fn fetch_text(&self, url: &str) -> Result<String, FetchError>;
}

/// [`EntitySource`] backed by the GitHub contents API.
pub struct HttpEntitySource {
    client: Client,
    index_url: String,
}

impl HttpEntitySource {
    /// Builds a client from the configured agent, timeout and pinned index.
    ///
    /// # Errors
    /// Returns the `reqwest` error if the TLS backend cannot be initialised.
    pub fn new(config: &PipelineConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.as_str())
            .build()?;
        Ok(Self {
            client,
            index_url: config.index_url(),
        })
    }
}

fn non_success(resp: &Response) -> Option<StatusCode> {
    let status = resp.status();
    (!status.is_success()).then_some(status)
}

impl EntitySource for HttpEntitySource {
    fn list_entity_files(&self) -> Result<Vec<EntityFile>, ListingError> {
        info!("Listing entities from {}", self.index_url);
        let resp = self
            .client
            .get(&self.index_url)
            .send()
            .map_err(ListingError::Request)?;
        if let Some(status) = non_success(&resp) {
            return Err(ListingError::Status { status });
        }
        resp.json().map_err(ListingError::Decode)
    }

    fn fetch_text(&self, url: &str) -> Result<String, FetchError> {
        debug!("Fetching {url}");
        let resp = self.client.get(url).send().map_err(FetchError::Request)?;
        if let Some(status) = non_success(&resp) {
            return Err(FetchError::Status { status });
        }
        resp.text().map_err(FetchError::Request)
    }
}


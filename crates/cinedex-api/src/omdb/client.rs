//! `OmdbClient` - OMDb API client implementation.

use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::instrument;
use url::Url;

use super::api::LocalOmdbApi;
use super::error::{OmdbError, Result};
use super::types::{DetailsResponse, Envelope, SearchParams, SearchResponse};

/// Default base URL for the OMDb API.
const DEFAULT_BASE_URL: &str = "https://www.omdbapi.com/";

/// Item-type filter sent with every search.
const SEARCH_ITEM_TYPE: &str = "movie";

/// Query parameter carrying the credential.
const API_KEY_PARAM: &str = "apikey";

/// OMDb API client.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct OmdbClient {
    /// HTTP client.
    http_client: Client,
    /// Base URL for API requests.
    base_url: Url,
    /// API key. `None` when absent or blank.
    api_key: Option<String>,
}

/// Builder for `OmdbClient`.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct OmdbClientBuilder {
    base_url: Option<Url>,
    api_key: Option<String>,
    user_agent: Option<String>,
}

impl OmdbClientBuilder {
    /// Creates a new builder.
    const fn new() -> Self {
        Self {
            base_url: None,
            api_key: None,
            user_agent: None,
        }
    }

    /// Overrides the base URL (for wiremock in tests).
    #[must_use]
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the API key.
    ///
    /// Optional at build time: a client without a key builds fine and
    /// fails every request with [`OmdbError::Configuration`].
    #[must_use]
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Sets the User-Agent (required).
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// - `user_agent` is not set ([`OmdbError::Build`]).
    /// - `reqwest::Client` build fails ([`OmdbError::Network`]).
    pub fn build(self) -> Result<OmdbClient> {
        let user_agent = self
            .user_agent
            .ok_or(OmdbError::Build("user agent is required"))?;

        let base_url = match self.base_url {
            Some(url) => url,
            None => Url::parse(DEFAULT_BASE_URL)
                .map_err(|_| OmdbError::Build("default base URL is invalid"))?,
        };

        let api_key = self
            .api_key
            .map(|key| String::from(key.trim()))
            .filter(|key| !key.is_empty());

        let http_client = Client::builder()
            .user_agent(&user_agent)
            .gzip(true)
            .build()
            .map_err(OmdbError::Network)?;

        Ok(OmdbClient {
            http_client,
            base_url,
            api_key,
        })
    }
}

impl OmdbClient {
    /// Creates a new builder.
    #[must_use]
    pub const fn builder() -> OmdbClientBuilder {
        OmdbClientBuilder::new()
    }

    /// Returns `true` if a non-blank API key is configured.
    #[must_use]
    pub const fn is_api_key_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Sends a GET request with the API key and query params.
    ///
    /// Returns the decoded JSON payload once the HTTP status and the
    /// payload's own status flag have been checked.
    #[instrument(skip_all)]
    async fn get_payload(&self, query: &[(&str, String)]) -> Result<serde_json::Value> {
        let api_key = self.api_key.as_deref().ok_or(OmdbError::Configuration)?;

        let request = self
            .http_client
            .get(self.base_url.clone())
            .query(&[(API_KEY_PARAM, api_key)])
            .query(query)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .build()
            .map_err(OmdbError::Network)?;

        tracing::debug!(url = %redact_api_key(request.url()), "OMDb API request");

        let response = self
            .http_client
            .execute(request)
            .await
            .map_err(OmdbError::Network)?;

        let status = response.status();
        if !status.is_success() {
            let status_text = String::from(status.canonical_reason().unwrap_or_default());
            if status == StatusCode::UNAUTHORIZED {
                let body = response.text().await.unwrap_or_default();
                let message = serde_json::from_str::<Envelope>(&body)
                    .ok()
                    .and_then(|envelope| envelope.error)
                    .unwrap_or(status_text);
                return Err(OmdbError::Authentication(message));
            }
            return Err(OmdbError::Transport {
                status: status.as_u16(),
                status_text,
            });
        }

        let body = response.text().await.map_err(OmdbError::Network)?;
        let payload: serde_json::Value = serde_json::from_str(&body).map_err(OmdbError::Decode)?;

        let envelope = Envelope::deserialize(&payload).map_err(OmdbError::Decode)?;
        if let Some(message) = envelope.failure_message() {
            tracing::debug!(error = %message, "OMDb API reported failure");
            return Err(OmdbError::Upstream(message));
        }

        Ok(payload)
    }
}

impl LocalOmdbApi for OmdbClient {
    #[instrument(skip_all, fields(page = params.page))]
    async fn search_movies(&self, params: &SearchParams) -> Result<SearchResponse> {
        let query = [
            ("s", params.query.clone()),
            ("page", params.page.to_string()),
            ("type", String::from(SEARCH_ITEM_TYPE)),
        ];

        let payload = self.get_payload(&query).await?;
        SearchResponse::deserialize(&payload).map_err(OmdbError::Decode)
    }

    #[instrument(skip_all)]
    async fn movie_details(&self, imdb_id: &str) -> Result<DetailsResponse> {
        let query = [("i", String::from(imdb_id)), ("plot", String::from("full"))];

        let payload = self.get_payload(&query).await?;
        Ok(DetailsResponse::from_payload(&payload))
    }
}

/// Returns a copy of `url` with the API key value masked, for logging.
fn redact_api_key(url: &Url) -> Url {
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(key, value)| {
            if key == API_KEY_PARAM {
                (key.into_owned(), String::from("***"))
            } else {
                (key.into_owned(), value.into_owned())
            }
        })
        .collect();

    let mut redacted = url.clone();
    redacted.query_pairs_mut().clear().extend_pairs(pairs);
    redacted
}

//! `OmdbApi` trait definition.
#![allow(clippy::future_not_send)]

use super::error::Result;
use super::types::{DetailsResponse, SearchParams, SearchResponse};

/// OMDb API trait.
///
/// Abstracts API operations for mock substitution in tests.
/// Uses `trait_variant::make` to generate a `Send`-bound async trait.
#[allow(clippy::module_name_repetitions)]
#[trait_variant::make(OmdbApi: Send)]
pub trait LocalOmdbApi {
    /// Fetches one page of movie search results.
    ///
    /// # Errors
    ///
    /// Returns an error if no API key is configured, the HTTP status is not
    /// successful, the payload reports an upstream error, or decoding fails.
    async fn search_movies(&self, params: &SearchParams) -> Result<SearchResponse>;

    /// Fetches full details for one movie.
    ///
    /// # Errors
    ///
    /// Same conditions as [`LocalOmdbApi::search_movies`].
    async fn movie_details(&self, imdb_id: &str) -> Result<DetailsResponse>;
}

//! OMDb API client module.
//!
//! Handles HTTP requests to the OMDb search and detail endpoints,
//! merges paginated search results, and formats values for display.

mod api;
mod client;
mod error;
pub mod format;
mod pagination;
mod types;

#[allow(clippy::module_name_repetitions)]
pub use api::{LocalOmdbApi, OmdbApi};
#[allow(clippy::module_name_repetitions)]
pub use client::{OmdbClient, OmdbClientBuilder};
#[allow(clippy::module_name_repetitions)]
pub use error::{OmdbError, Result};
pub use pagination::{MAX_PAGES, PAGE_SIZE, lookup_movie, search_all_movies};
pub use types::{
    DetailsResponse, Movie, MovieLookup, Rating, ResponseFlag, SearchParams, SearchResponse,
};

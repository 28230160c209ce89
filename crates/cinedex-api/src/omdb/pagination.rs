//! Multi-page search aggregation and detail lookup on top of `LocalOmdbApi`.

use futures::future::join_all;
use tracing::instrument;

use super::api::LocalOmdbApi;
use super::error::{OmdbError, Result};
use super::types::{MovieLookup, ResponseFlag, SearchParams, SearchResponse};

/// Fixed number of records per upstream search page.
pub const PAGE_SIZE: u32 = 10;

/// Upper bound on pages fetched per query (first page included).
pub const MAX_PAGES: u32 = 10;

/// Number of pages to fetch for a reported `totalResults`.
fn pages_to_fetch(total_results: u64) -> u32 {
    let pages = total_results
        .div_ceil(u64::from(PAGE_SIZE))
        .min(u64::from(MAX_PAGES));
    u32::try_from(pages).unwrap_or(MAX_PAGES)
}

/// Fetches every available result page for `query`, up to [`MAX_PAGES`],
/// and merges them into one response shaped like a single page.
///
/// Page 1 is fetched first. Its failure is returned as-is, and so is a
/// page 1 that carries an `Error` or no `Search`. Pages `2..=N` are then
/// requested concurrently and awaited together; pages that fail or come
/// back empty are skipped. Records are concatenated in ascending page
/// order regardless of completion order. `totalResults` is always page 1's
/// value, even when some pages were skipped.
///
/// # Errors
///
/// Returns the page-1 error. Errors on later pages never propagate.
#[instrument(skip_all)]
pub async fn search_all_movies(
    api: &(impl LocalOmdbApi + Sync),
    query: &str,
) -> Result<SearchResponse> {
    let first_page = api.search_movies(&SearchParams::new(query)).await?;

    if first_page.error.is_some() || first_page.search.is_none() {
        tracing::debug!(query, "first page carries no results, skipping aggregation");
        return Ok(first_page);
    }

    let total_pages = pages_to_fetch(first_page.total_results_count());
    if total_pages <= 1 {
        return Ok(first_page);
    }

    tracing::debug!(query, total_pages, "fetching remaining search pages");

    let remaining = (2..=total_pages).map(|page| {
        let params = SearchParams::new(query).page(page);
        async move { (page, api.search_movies(&params).await) }
    });
    let outcomes = join_all(remaining).await;

    let SearchResponse {
        search,
        total_results,
        ..
    } = first_page;
    let mut movies = search.unwrap_or_default();
    let mut merged_pages: u32 = 1;

    for (page, outcome) in outcomes {
        match outcome {
            Ok(SearchResponse {
                search: Some(found),
                error: None,
                ..
            }) => {
                movies.extend(found);
                merged_pages = merged_pages.saturating_add(1);
            }
            Ok(response) => {
                tracing::debug!(page, error = ?response.error, "skipping empty search page");
            }
            Err(e) => {
                tracing::debug!(page, error = %e, "skipping failed search page");
            }
        }
    }

    tracing::info!(
        query,
        pages = merged_pages,
        requested = total_pages,
        records = movies.len(),
        "search pagination completed"
    );

    Ok(SearchResponse {
        search: Some(movies),
        total_results,
        response: ResponseFlag::Success,
        error: None,
    })
}

/// Looks up one movie and reduces the outcome to something renderable.
///
/// An upstream error (e.g. `Incorrect IMDb ID.`) or an ambiguous payload
/// becomes [`MovieLookup::NotFound`] rather than an error.
///
/// # Errors
///
/// Returns configuration, authentication, transport, network and decode
/// errors unchanged.
#[instrument(skip_all)]
pub async fn lookup_movie(
    api: &(impl LocalOmdbApi + Sync),
    imdb_id: &str,
) -> Result<MovieLookup> {
    let details = match api.movie_details(imdb_id).await {
        Ok(details) => details,
        Err(OmdbError::Upstream(reason)) => {
            return Ok(MovieLookup::NotFound {
                reason: Some(reason),
            });
        }
        Err(e) => return Err(e),
    };

    if let Some(reason) = details.error {
        return Ok(MovieLookup::NotFound {
            reason: Some(reason),
        });
    }

    match details.movie {
        Some(movie) if details.response.is_success() => Ok(MovieLookup::Found(Box::new(movie))),
        _ => Ok(MovieLookup::NotFound { reason: None }),
    }
}

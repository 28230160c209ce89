//! Text rendering for command output.
//!
//! Each view builds its lines first so the layout can be tested without a
//! subscriber; [`emit`] then writes them through `tracing`.

use cinedex_api::omdb::format::{format_rating, format_runtime, format_year, poster_url};
use cinedex_api::omdb::{Movie, SearchResponse};

/// Empty-state message for the home listing.
pub const HOME_EMPTY: &str = "Movies Not Found.";

/// Empty-state message for the favorites listing.
pub const FAVORITES_EMPTY: &str = "You haven't added any favorites yet.";

/// Writes each line as an `info` event.
pub fn emit(lines: &[String]) {
    for line in lines {
        tracing::info!("{line}");
    }
}

/// One row of a movie listing: favorite marker, id, year, title.
#[must_use]
pub fn movie_line(movie: &Movie, favorite: bool) -> String {
    let marker = if favorite { '*' } else { ' ' };
    format!(
        "{marker} {}\t{}\t{}",
        movie.imdb_id,
        format_year(Some(&movie.year)),
        movie.title
    )
}

fn listing(movies: &[Movie], is_favorite: &impl Fn(&str) -> bool) -> impl Iterator<Item = String> {
    movies
        .iter()
        .map(|m| movie_line(m, is_favorite(&m.imdb_id)))
}

/// Lines for `search`.
#[must_use]
pub fn search_lines(
    query: &str,
    response: &SearchResponse,
    is_favorite: &impl Fn(&str) -> bool,
) -> Vec<String> {
    let mut lines = vec![format!("Search Results for \"{query}\"")];
    if let Some(total) = response.total_results.as_deref() {
        let plural = if total == "1" { "" } else { "s" };
        lines.push(format!("Found {total} result{plural}"));
    }
    lines.extend(listing(response.movies(), is_favorite));
    lines
}

/// Lines for `home`.
#[must_use]
pub fn home_lines(response: &SearchResponse, is_favorite: &impl Fn(&str) -> bool) -> Vec<String> {
    let movies = response.movies();
    if movies.is_empty() {
        return vec![String::from(HOME_EMPTY)];
    }
    let mut lines = vec![String::from("Popular Movies")];
    lines.extend(listing(movies, is_favorite));
    lines
}

/// Lines for `movie`. Optional sections are left out when absent.
#[must_use]
pub fn details_lines(movie: &Movie, favorite: bool) -> Vec<String> {
    let mut lines = vec![format!(
        "{} ({})",
        movie.title,
        format_year(Some(&movie.year))
    )];

    let mut facts = Vec::new();
    if movie.runtime.is_some() {
        facts.push(format!("{} min", format_runtime(movie.runtime.as_deref())));
    }
    if movie.imdb_rating.is_some() {
        facts.push(format!("IMDb {}", format_rating(movie.imdb_rating.as_deref())));
    }
    if !facts.is_empty() {
        lines.push(facts.join(" | "));
    }

    let sections = [
        ("Plot", &movie.plot),
        ("Genre", &movie.genre),
        ("Director", &movie.director),
        ("Cast", &movie.actors),
    ];
    for (label, value) in sections {
        if let Some(value) = value.as_deref().filter(|v| !v.is_empty()) {
            lines.push(format!("{label}: {value}"));
        }
    }

    if !movie.ratings.is_empty() {
        lines.push(String::from("Ratings:"));
        for rating in &movie.ratings {
            lines.push(format!("  {}: {}", rating.source, rating.value));
        }
    }

    lines.push(format!("Poster: {}", poster_url(Some(&movie.poster))));
    lines.push(format!(
        "Favorite: {}",
        if favorite { "yes" } else { "no" }
    ));
    lines
}

/// Lines for `favorites list`.
#[must_use]
pub fn favorites_lines(favorites: &[Movie]) -> Vec<String> {
    if favorites.is_empty() {
        return vec![
            String::from(FAVORITES_EMPTY),
            String::from("Start exploring movies and add them to your favorites!"),
        ];
    }
    let mut lines = vec![format!("Favorites ({})", favorites.len())];
    lines.extend(favorites.iter().map(|m| movie_line(m, true)));
    lines
}

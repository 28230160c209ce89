//! Display helpers for OMDb field values.

/// Placeholder shown for missing values.
const NOT_AVAILABLE: &str = "N/A";

/// Grey 400x600 "No Poster" SVG, as a data URI.
pub const POSTER_PLACEHOLDER: &str = "data:image/svg+xml;base64,PHN2ZyB3aWR0aD0iNDAwIiBoZWlnaHQ9IjYwMCIgeG1sbnM9Imh0dHA6Ly93d3cudzMub3JnLzIwMDAvc3ZnIj48cmVjdCB3aWR0aD0iNDAwIiBoZWlnaHQ9IjYwMCIgZmlsbD0iI2U1ZTVlNSIvPjx0ZXh0IHg9IjUwJSIgeT0iNTAlIiBmb250LWZhbWlseT0iQXJpYWwiIGZvbnQtc2l6ZT0iMjQiIGZpbGw9IiM5OTk5OTkiIHRleHQtYW5jaG9yPSJtaWRkbGUiIGR5PSIuM2VtIj5ObyBQb3N0ZXI8L3RleHQ+PC9zdmc+";

/// Returns the part of `year` before the first `-`.
///
/// Falls back to the whole value when that part is empty, and to `N/A`
/// when `year` is absent or empty. En-dash ranges (`2005–2008`) are kept whole.
#[must_use]
pub fn format_year(year: Option<&str>) -> &str {
    match year {
        None | Some("") => NOT_AVAILABLE,
        Some(year) => match year.split('-').next() {
            Some(first) if !first.is_empty() => first,
            _ => year,
        },
    }
}

/// Strips the first ` min` suffix from a runtime (`140 min` -> `140`).
#[must_use]
pub fn format_runtime(runtime: Option<&str>) -> String {
    match runtime {
        None | Some("") => String::from(NOT_AVAILABLE),
        Some(runtime) => runtime.replacen(" min", "", 1),
    }
}

/// Returns the poster URL, or [`POSTER_PLACEHOLDER`] for a missing or `N/A` poster.
#[must_use]
pub fn poster_url(poster: Option<&str>) -> &str {
    match poster {
        None | Some("" | NOT_AVAILABLE) => POSTER_PLACEHOLDER,
        Some(url) => url,
    }
}

/// Returns the rating, or `N/A` when it is missing.
#[must_use]
pub fn format_rating(rating: Option<&str>) -> &str {
    match rating {
        None | Some("") => NOT_AVAILABLE,
        Some(rating) => rating,
    }
}

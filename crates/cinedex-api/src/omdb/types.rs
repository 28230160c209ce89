//! OMDb API response types and search parameters.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

// --- Response flag ---

/// The upstream dual-state `Response` field.
///
/// OMDb encodes it as the strings `"True"` / `"False"`. Anything other
/// than `"True"` (including a missing field) is read as `Failure`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResponseFlag {
    /// `"True"`.
    Success,
    /// `"False"`.
    #[default]
    Failure,
}

impl ResponseFlag {
    /// Returns `true` for `"True"`.
    #[must_use]
    pub const fn is_success(self) -> bool {
        matches!(self, Self::Success)
    }

    /// Wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "True",
            Self::Failure => "False",
        }
    }
}

impl Serialize for ResponseFlag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ResponseFlag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        if raw == "True" {
            Ok(Self::Success)
        } else {
            Ok(Self::Failure)
        }
    }
}

// --- Movie ---

/// A single catalogue item.
///
/// Search results carry only the identity fields; the detail endpoint
/// fills in the optional ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
    /// IMDb identifier (e.g. `tt0372784`).
    #[serde(rename = "imdbID")]
    pub imdb_id: String,
    /// Title.
    #[serde(rename = "Title")]
    pub title: String,
    /// Release year, or a range such as `2005–2008`.
    #[serde(rename = "Year")]
    pub year: String,
    /// Poster URL, or the sentinel `N/A`.
    #[serde(rename = "Poster")]
    pub poster: String,
    /// Item type (`movie`, `series`, `episode`).
    #[serde(rename = "Type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Runtime (e.g. `140 min`).
    #[serde(rename = "Runtime", default, skip_serializing_if = "Option::is_none")]
    pub runtime: Option<String>,
    /// Comma-separated genres.
    #[serde(rename = "Genre", default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    /// Director(s).
    #[serde(rename = "Director", default, skip_serializing_if = "Option::is_none")]
    pub director: Option<String>,
    /// Comma-separated cast.
    #[serde(rename = "Actors", default, skip_serializing_if = "Option::is_none")]
    pub actors: Option<String>,
    /// Plot text.
    #[serde(rename = "Plot", default, skip_serializing_if = "Option::is_none")]
    pub plot: Option<String>,
    /// Ratings by source.
    #[serde(rename = "Ratings", default, skip_serializing_if = "Vec::is_empty")]
    pub ratings: Vec<Rating>,
    /// IMDb aggregate rating as a string (e.g. `8.2`, or `N/A`).
    #[serde(rename = "imdbRating", default, skip_serializing_if = "Option::is_none")]
    pub imdb_rating: Option<String>,
}

/// One `(source, value)` rating pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rating {
    /// Rating source (e.g. `Rotten Tomatoes`).
    #[serde(rename = "Source")]
    pub source: String,
    /// Rating value as reported (e.g. `85%`).
    #[serde(rename = "Value")]
    pub value: String,
}

// --- Search ---

/// One page of search results, or several pages merged into one.
///
/// `Response` and `Error` are not mutually exclusive by construction;
/// callers must handle an absent `Search` with no `Error` as well.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Matching records.
    #[serde(rename = "Search", default, skip_serializing_if = "Option::is_none")]
    pub search: Option<Vec<Movie>>,
    /// Total number of matches reported by the upstream.
    #[serde(rename = "totalResults", default, skip_serializing_if = "Option::is_none")]
    pub total_results: Option<String>,
    /// Status flag.
    #[serde(rename = "Response", default)]
    pub response: ResponseFlag,
    /// Human-readable error text.
    #[serde(rename = "Error", default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SearchResponse {
    /// Returns the records, or an empty slice when `Search` is absent.
    #[must_use]
    pub fn movies(&self) -> &[Movie] {
        self.search.as_deref().unwrap_or_default()
    }

    /// Parses `totalResults`. Absent or non-numeric values count as 0;
    /// digit strings too large for `u64` saturate.
    #[must_use]
    pub fn total_results_count(&self) -> u64 {
        let Some(raw) = self.total_results.as_deref().map(str::trim) else {
            return 0;
        };
        raw.parse().unwrap_or_else(|_| {
            if !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit()) {
                u64::MAX
            } else {
                0
            }
        })
    }
}

// --- Details ---

/// Response from the detail endpoint.
///
/// `movie` is populated only when the payload decodes as a movie.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetailsResponse {
    /// Status flag.
    pub response: ResponseFlag,
    /// Human-readable error text.
    pub error: Option<String>,
    /// Decoded movie.
    pub movie: Option<Movie>,
}

impl DetailsResponse {
    /// Splits a raw detail payload into its status fields and the movie.
    #[must_use]
    pub fn from_payload(payload: &serde_json::Value) -> Self {
        let envelope = Envelope::deserialize(payload).unwrap_or_default();
        Self {
            response: envelope.response,
            error: envelope.error,
            movie: Movie::deserialize(payload).ok(),
        }
    }
}

/// Outcome of a detail lookup, ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MovieLookup {
    /// The movie exists.
    Found(Box<Movie>),
    /// The upstream had no usable record for the identifier.
    NotFound {
        /// Upstream error text, when one was given.
        reason: Option<String>,
    },
}

// --- Envelope ---

/// Status fields shared by every OMDb payload.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct Envelope {
    /// Status flag.
    #[serde(rename = "Response", default)]
    pub response: ResponseFlag,
    /// Error text.
    #[serde(rename = "Error", default)]
    pub error: Option<String>,
}

impl Envelope {
    /// Returns the error text when the payload reports failure with a non-empty message.
    pub fn failure_message(self) -> Option<String> {
        if self.response.is_success() {
            return None;
        }
        self.error.filter(|message| !message.is_empty())
    }
}

// --- Search Parameters ---

/// Parameters for the search endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchParams {
    /// Free-text query (required).
    pub query: String,
    /// Result page (1-based, default: 1).
    pub page: u32,
}

impl SearchParams {
    /// Creates new search params for page 1 of the given query.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            page: 1,
        }
    }

    /// Sets the result page. Values below 1 are clamped to 1.
    #[must_use]
    pub fn page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::indexing_slicing)]

    use super::*;

    #[test]
    fn test_parse_search_fixture() {
        // Arrange
        let json = include_str!("../../../../fixtures/omdb/search_batman_page1.json");

        // Act
        let response: SearchResponse = serde_json::from_str(json).unwrap();

        // Assert
        assert!(response.response.is_success());
        assert_eq!(response.total_results.as_deref(), Some("612"));
        assert_eq!(response.total_results_count(), 612);
        let first = &response.movies()[0];
        assert_eq!(first.imdb_id, "tt0372784");
        assert_eq!(first.title, "Batman Begins");
        assert_eq!(first.kind.as_deref(), Some("movie"));
        assert!(first.plot.is_none());
    }

    #[test]
    fn test_parse_search_not_found_fixture() {
        // Arrange
        let json = include_str!("../../../../fixtures/omdb/search_not_found.json");

        // Act
        let response: SearchResponse = serde_json::from_str(json).unwrap();

        // Assert
        assert_eq!(response.response, ResponseFlag::Failure);
        assert_eq!(response.error.as_deref(), Some("Movie not found!"));
        assert!(response.search.is_none());
        assert!(response.movies().is_empty());
        assert_eq!(response.total_results_count(), 0);
    }

    #[test]
    fn test_unknown_response_flag_is_failure() {
        // Arrange
        let json = r#"{"Response":"maybe"}"#;

        // Act
        let response: SearchResponse = serde_json::from_str(json).unwrap();

        // Assert
        assert_eq!(response.response, ResponseFlag::Failure);
    }

    #[test]
    fn test_total_results_unparseable_counts_as_zero() {
        // Arrange
        let response = SearchResponse {
            total_results: Some(String::from("lots")),
            ..SearchResponse::default()
        };

        // Act & Assert
        assert_eq!(response.total_results_count(), 0);
    }

    #[test]
    fn test_total_results_beyond_u32_parses() {
        // Arrange
        let past_u32 = SearchResponse {
            total_results: Some(String::from("4294967296")),
            ..SearchResponse::default()
        };
        let past_u64 = SearchResponse {
            total_results: Some(String::from("99999999999999999999999")),
            ..SearchResponse::default()
        };
        let signed = SearchResponse {
            total_results: Some(String::from("-5")),
            ..SearchResponse::default()
        };

        // Act & Assert
        assert_eq!(past_u32.total_results_count(), 4_294_967_296);
        assert_eq!(past_u64.total_results_count(), u64::MAX);
        assert_eq!(signed.total_results_count(), 0);
    }

    #[test]
    fn test_details_from_payload_with_movie() {
        // Arrange
        let json = include_str!("../../../../fixtures/omdb/details_tt0372784.json");
        let payload: serde_json::Value = serde_json::from_str(json).unwrap();

        // Act
        let details = DetailsResponse::from_payload(&payload);

        // Assert
        assert!(details.response.is_success());
        assert!(details.error.is_none());
        let movie = details.movie.unwrap();
        assert_eq!(movie.director.as_deref(), Some("Christopher Nolan"));
        assert_eq!(movie.ratings.len(), 3);
        assert_eq!(movie.ratings[1].source, "Rotten Tomatoes");
        assert_eq!(movie.imdb_rating.as_deref(), Some("8.2"));
    }

    #[test]
    fn test_details_from_payload_without_movie() {
        // Arrange
        let payload = serde_json::json!({ "Response": "False" });

        // Act
        let details = DetailsResponse::from_payload(&payload);

        // Assert
        assert_eq!(details.response, ResponseFlag::Failure);
        assert!(details.error.is_none());
        assert!(details.movie.is_none());
    }

    #[test]
    fn test_envelope_failure_message_ignores_empty_error() {
        // Arrange
        let empty = Envelope {
            response: ResponseFlag::Failure,
            error: Some(String::new()),
        };
        let success = Envelope {
            response: ResponseFlag::Success,
            error: Some(String::from("ignored")),
        };

        // Act & Assert
        assert!(empty.failure_message().is_none());
        assert!(success.failure_message().is_none());
    }

    #[test]
    fn test_movie_serialization_omits_absent_detail_fields() {
        // Arrange
        let movie = Movie {
            imdb_id: String::from("tt0000001"),
            title: String::from("Carmencita"),
            year: String::from("1894"),
            poster: String::from("N/A"),
            kind: None,
            runtime: None,
            genre: None,
            director: None,
            actors: None,
            plot: None,
            ratings: Vec::new(),
            imdb_rating: None,
        };

        // Act
        let json = serde_json::to_string(&movie).unwrap();

        // Assert
        assert_eq!(
            json,
            r#"{"imdbID":"tt0000001","Title":"Carmencita","Year":"1894","Poster":"N/A"}"#
        );
    }

    #[test]
    fn test_search_params_page_is_clamped() {
        // Arrange & Act
        let params = SearchParams::new("alien").page(0);

        // Assert
        assert_eq!(params.query, "alien");
        assert_eq!(params.page, 1);
    }
}

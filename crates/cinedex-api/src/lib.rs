//! API client library for cinedex.
//!
//! Provides the OMDb movie database client and the search aggregation
//! built on top of it.

/// OMDb API client.
pub mod omdb;

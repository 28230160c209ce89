//! Persisted favorites list.

use anyhow::{Context, Result};
use cinedex_api::omdb::Movie;
use serde::{Deserialize, Serialize};

use super::kv::KeyValueStore;

/// Storage key for the favorites document.
pub const FAVORITES_KEY: &str = "movie-favorites-storage";

/// Persisted document shape.
#[derive(Debug, Default, Serialize, Deserialize)]
struct FavoritesDocument {
    #[serde(default)]
    favorites: Vec<Movie>,
}

/// Favorites held in memory and written through to a [`KeyValueStore`].
///
/// `add` does not de-duplicate; `remove` drops every entry with the id.
#[derive(Debug)]
pub struct FavoritesStore<S> {
    store: S,
    favorites: Vec<Movie>,
}

impl<S: KeyValueStore> FavoritesStore<S> {
    /// Loads the favorites document, starting empty when none is stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read or the stored JSON is malformed.
    pub fn load(store: S) -> Result<Self> {
        let favorites = match store.get(FAVORITES_KEY)? {
            Some(raw) => {
                serde_json::from_str::<FavoritesDocument>(&raw)
                    .with_context(|| format!("malformed {FAVORITES_KEY} document"))?
                    .favorites
            }
            None => Vec::new(),
        };
        tracing::debug!(count = favorites.len(), "favorites loaded");
        Ok(Self { store, favorites })
    }

    /// Current favorites in insertion order.
    #[must_use]
    pub fn favorites(&self) -> &[Movie] {
        &self.favorites
    }

    /// Returns `true` if any entry carries `imdb_id`.
    #[must_use]
    pub fn is_favorite(&self, imdb_id: &str) -> bool {
        self.favorites.iter().any(|m| m.imdb_id == imdb_id)
    }

    /// Appends `movie`.
    ///
    /// # Errors
    ///
    /// Returns an error if the updated list cannot be persisted.
    pub fn add(&mut self, movie: Movie) -> Result<()> {
        let mut next = self.favorites.clone();
        next.push(movie);
        self.commit(next)
    }

    /// Removes every entry with `imdb_id`. Returns whether anything was removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the updated list cannot be persisted.
    pub fn remove(&mut self, imdb_id: &str) -> Result<bool> {
        if !self.is_favorite(imdb_id) {
            return Ok(false);
        }
        let next = self
            .favorites
            .iter()
            .filter(|m| m.imdb_id != imdb_id)
            .cloned()
            .collect();
        self.commit(next)?;
        Ok(true)
    }

    /// Removes `movie` if it is a favorite, adds it otherwise.
    ///
    /// Returns `true` when the movie is a favorite afterwards.
    ///
    /// # Errors
    ///
    /// Returns an error if the updated list cannot be persisted.
    pub fn toggle(&mut self, movie: Movie) -> Result<bool> {
        if self.remove(&movie.imdb_id)? {
            Ok(false)
        } else {
            self.add(movie)?;
            Ok(true)
        }
    }

    /// Persists `next`, then makes it current.
    fn commit(&mut self, next: Vec<Movie>) -> Result<()> {
        let doc = FavoritesDocument { favorites: next };
        let raw = serde_json::to_string(&doc).context("failed to encode favorites")?;
        self.store.set(FAVORITES_KEY, &raw)?;
        self.favorites = doc.favorites;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::indexing_slicing)]

    use super::*;
    use crate::kv::{MemoryStore, SqliteStore};

    fn make_movie(imdb_id: &str, title: &str) -> Movie {
        Movie {
            imdb_id: imdb_id.to_owned(),
            title: title.to_owned(),
            year: String::from("2005"),
            poster: String::from("N/A"),
            kind: Some(String::from("movie")),
            runtime: None,
            genre: None,
            director: None,
            actors: None,
            plot: None,
            ratings: Vec::new(),
            imdb_rating: None,
        }
    }

    fn ids<S: KeyValueStore>(store: &FavoritesStore<S>) -> Vec<&str> {
        store
            .favorites()
            .iter()
            .map(|m| m.imdb_id.as_str())
            .collect()
    }

    #[test]
    fn test_load_empty() {
        // Arrange
        let backend = MemoryStore::new();

        // Act
        let store = FavoritesStore::load(&backend).unwrap();

        // Assert
        assert!(store.favorites().is_empty());
        assert!(!store.is_favorite("tt0372784"));
    }

    #[test]
    fn test_add_writes_through() {
        // Arrange
        let backend = MemoryStore::new();
        let mut store = FavoritesStore::load(&backend).unwrap();

        // Act
        store
            .add(make_movie("tt0372784", "Batman Begins"))
            .unwrap();

        // Assert
        let raw = backend.get(FAVORITES_KEY).unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["favorites"][0]["imdbID"], "tt0372784");
        assert_eq!(value["favorites"][0]["Title"], "Batman Begins");
    }

    #[test]
    fn test_add_keeps_duplicates_and_remove_drops_all() {
        // Arrange
        let backend = MemoryStore::new();
        let mut store = FavoritesStore::load(&backend).unwrap();
        store.add(make_movie("tt1", "One")).unwrap();
        store.add(make_movie("tt2", "Two")).unwrap();
        store.add(make_movie("tt1", "One")).unwrap();
        assert_eq!(ids(&store), vec!["tt1", "tt2", "tt1"]);

        // Act
        let removed = store.remove("tt1").unwrap();

        // Assert
        assert!(removed);
        assert_eq!(ids(&store), vec!["tt2"]);
    }

    #[test]
    fn test_remove_missing_is_noop() {
        // Arrange
        let backend = MemoryStore::new();
        let mut store = FavoritesStore::load(&backend).unwrap();

        // Act
        let removed = store.remove("tt404").unwrap();

        // Assert
        assert!(!removed);
        assert_eq!(backend.get(FAVORITES_KEY).unwrap(), None);
    }

    #[test]
    fn test_toggle_twice_restores_list() {
        // Arrange
        let backend = MemoryStore::new();
        let mut store = FavoritesStore::load(&backend).unwrap();
        store.add(make_movie("tt1", "One")).unwrap();
        let before: Vec<Movie> = store.favorites().to_vec();

        // Act
        let first = store.toggle(make_movie("tt2", "Two")).unwrap();
        let second = store.toggle(make_movie("tt2", "Two")).unwrap();

        // Assert
        assert!(first);
        assert!(!second);
        assert_eq!(store.favorites(), before.as_slice());
    }

    #[test]
    fn test_survives_reopen() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let dir_path = dir.path().to_path_buf();
        {
            let mut store = FavoritesStore::load(SqliteStore::open(Some(&dir_path)).unwrap())
                .unwrap();
            store.add(make_movie("tt0372784", "Batman Begins")).unwrap();
        }

        // Act
        let reopened =
            FavoritesStore::load(SqliteStore::open(Some(&dir_path)).unwrap()).unwrap();

        // Assert
        assert!(reopened.is_favorite("tt0372784"));
        assert_eq!(reopened.favorites()[0].title, "Batman Begins");
    }

    #[test]
    fn test_malformed_document_is_error() {
        // Arrange
        let backend = MemoryStore::new();
        backend.set(FAVORITES_KEY, "{not json").unwrap();

        // Act
        let result = FavoritesStore::load(&backend);

        // Assert
        let err = result.unwrap_err();
        assert!(err.to_string().contains(FAVORITES_KEY));
    }

    #[test]
    fn test_missing_favorites_field_loads_empty() {
        // Arrange
        let backend = MemoryStore::new();
        backend.set(FAVORITES_KEY, "{}").unwrap();

        // Act
        let store = FavoritesStore::load(&backend).unwrap();

        // Assert
        assert!(store.favorites().is_empty());
    }
}

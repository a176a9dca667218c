// src/repositories/catalog_repository.rs
//
// Catalog Repository - movies by title, rooms by name
//
// Registering an existing key replaces the previous entry. Shows already
// holding the old `Arc` keep referencing it.

use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::domain::{Movie, Room};
use crate::error::AppResult;

// ---------------------------------------------------------------------
// Repository contract
// ---------------------------------------------------------------------
#[cfg_attr(test, mockall::automock)]
pub trait CatalogRepository: Send + Sync {
    fn save_movie(&self, movie: Movie) -> AppResult<Arc<Movie>>;

    fn save_room(&self, room: Room) -> AppResult<Arc<Room>>;

    fn get_movie(&self, title: &str) -> AppResult<Option<Arc<Movie>>>;

    fn get_room(&self, name: &str) -> AppResult<Option<Arc<Room>>>;

    /// All movies ordered by title
    fn list_movies(&self) -> AppResult<Vec<Arc<Movie>>>;

    /// All rooms ordered by name
    fn list_rooms(&self) -> AppResult<Vec<Arc<Room>>>;
}

// ---------------------------------------------------------------------
// In-memory implementation
// ---------------------------------------------------------------------
#[derive(Default)]
pub struct InMemoryCatalogRepository {
    movies: RwLock<BTreeMap<String, Arc<Movie>>>,
    rooms: RwLock<BTreeMap<String, Arc<Room>>>,
}

impl InMemoryCatalogRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CatalogRepository for InMemoryCatalogRepository {
    fn save_movie(&self, movie: Movie) -> AppResult<Arc<Movie>> {
        let movie = Arc::new(movie);
        self.movies
            .write()
            .insert(movie.title().to_string(), Arc::clone(&movie));
        Ok(movie)
    }

    fn save_room(&self, room: Room) -> AppResult<Arc<Room>> {
        let room = Arc::new(room);
        self.rooms
            .write()
            .insert(room.name().to_string(), Arc::clone(&room));
        Ok(room)
    }

    fn get_movie(&self, title: &str) -> AppResult<Option<Arc<Movie>>> {
        Ok(self.movies.read().get(title).cloned())
    }

    fn get_room(&self, name: &str) -> AppResult<Option<Arc<Room>>> {
        Ok(self.rooms.read().get(name).cloned())
    }

    fn list_movies(&self) -> AppResult<Vec<Arc<Movie>>> {
        Ok(self.movies.read().values().cloned().collect())
    }

    fn list_rooms(&self) -> AppResult<Vec<Arc<Room>>> {
        Ok(self.rooms.read().values().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_save_and_get_movie() {
        let repo = InMemoryCatalogRepository::new();
        repo.save_movie(Movie::new("Heat", Duration::minutes(170)).unwrap())
            .unwrap();

        let movie = repo.get_movie("Heat").unwrap().unwrap();
        assert_eq!(movie.duration_minutes(), 170);
        assert!(repo.get_movie("heat").unwrap().is_none());
    }

    #[test]
    fn test_reregistering_room_replaces_it() {
        let repo = InMemoryCatalogRepository::new();
        let old = repo.save_room(Room::new("Hall 1", 10).unwrap()).unwrap();
        repo.save_room(Room::new("Hall 1", 80).unwrap()).unwrap();

        assert_eq!(repo.get_room("Hall 1").unwrap().unwrap().capacity(), 80);
        assert_eq!(old.capacity(), 10);
        assert_eq!(repo.list_rooms().unwrap().len(), 1);
    }

    #[test]
    fn test_lists_are_sorted_by_key() {
        let repo = InMemoryCatalogRepository::new();
        for title in ["Up", "Alien", "Heat"] {
            repo.save_movie(Movie::new(title, Duration::minutes(90)).unwrap())
                .unwrap();
        }

        let titles: Vec<_> = repo
            .list_movies()
            .unwrap()
            .iter()
            .map(|m| m.title().to_string())
            .collect();
        assert_eq!(titles, vec!["Alien", "Heat", "Up"]);
    }
}

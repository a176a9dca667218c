// src/repositories/show_repository.rs
//
// Show Repository
//
// The store owns every Show from insertion onward and is the only place that
// hands out show ids. Reads run concurrently; `add` takes the write lock.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::NaiveDate;
use parking_lot::RwLock;

use crate::domain::{Show, ShowId};
use crate::error::{AppError, AppResult};

// ---------------------------------------------------------------------
// Repository contract
// ---------------------------------------------------------------------
#[cfg_attr(test, mockall::automock)]
pub trait ShowStore: Send + Sync {
    /// Reserve the next show id; ids are unique, gaps are allowed
    fn next_id(&self) -> ShowId;

    fn add(&self, show: Show) -> AppResult<Arc<Show>>;

    /// All shows in insertion order
    fn get_all(&self) -> AppResult<Vec<Arc<Show>>>;

    /// Shows starting on `date`, ascending by start time
    fn get_by_date(&self, date: NaiveDate) -> AppResult<Vec<Arc<Show>>>;

    fn get_by_id(&self, id: ShowId) -> AppResult<Option<Arc<Show>>>;
}

// ---------------------------------------------------------------------
// In-memory implementation
// ---------------------------------------------------------------------
#[derive(Default)]
struct ShowTable {
    /// Insertion order
    shows: Vec<Arc<Show>>,
    /// Position of each id in `shows`
    index: HashMap<ShowId, usize>,
}

pub struct InMemoryShowStore {
    table: RwLock<ShowTable>,
    next_id: AtomicU64,
}

impl InMemoryShowStore {
    pub fn new() -> Self {
        Self {
            table: RwLock::new(ShowTable::default()),
            next_id: AtomicU64::new(1),
        }
    }

    pub fn len(&self) -> usize {
        self.table.read().shows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.read().shows.is_empty()
    }
}

impl Default for InMemoryShowStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ShowStore for InMemoryShowStore {
    fn next_id(&self) -> ShowId {
        ShowId::new(self.next_id.fetch_add(1, Ordering::Relaxed))
    }

    fn add(&self, show: Show) -> AppResult<Arc<Show>> {
        let mut table = self.table.write();

        let duplicate = table.index.contains_key(&show.id());
        debug_assert!(!duplicate, "duplicate show id {}", show.id());
        if duplicate {
            log::error!("Refusing to store show with duplicate id {}", show.id());
            return Err(AppError::DuplicateShow(show.id()));
        }

        let show = Arc::new(show);
        let position = table.shows.len();
        table.index.insert(show.id(), position);
        table.shows.push(Arc::clone(&show));
        Ok(show)
    }

    fn get_all(&self) -> AppResult<Vec<Arc<Show>>> {
        Ok(self.table.read().shows.clone())
    }

    fn get_by_date(&self, date: NaiveDate) -> AppResult<Vec<Arc<Show>>> {
        let mut on_date: Vec<Arc<Show>> = self
            .table
            .read()
            .shows
            .iter()
            .filter(|show| show.date() == date)
            .cloned()
            .collect();

        // Stable: equal start times keep insertion order
        on_date.sort_by_key(|show| show.start());
        Ok(on_date)
    }

    fn get_by_id(&self, id: ShowId) -> AppResult<Option<Arc<Show>>> {
        let table = self.table.read();
        Ok(table.index.get(&id).map(|&position| Arc::clone(&table.shows[position])))
    }
}

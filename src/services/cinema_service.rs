// src/services/cinema_service.rs
//
// Cinema Service - Catalog, Scheduling, Booking and Marathon Planning
//
// CRITICAL RULES:
// - Entities are validated by the domain before they reach a repository
// - A failed operation never leaves partial state behind
// - Every successful state change emits exactly one event
// - Planning works on a snapshot and never touches seat locks

use std::sync::Arc;

use chrono::{Duration, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

use crate::config::CinemaConfig;
use crate::domain::{validate_show, Movie, Room, Show, ShowId};
use crate::error::{AppError, AppResult};
use crate::events::{
    BookingRejected, EventBus, MarathonPlanned, MovieRegistered, RoomRegistered, SeatsBooked,
    ShowScheduled,
};
use crate::repositories::{CatalogRepository, InMemoryCatalogRepository, InMemoryShowStore, ShowStore};
use crate::services::marathon_planner::{GreedyMarathonPlanner, MarathonPlan, MarathonPlanner};

/// Request to schedule a new show
#[derive(Debug, Clone)]
pub struct CreateShowRequest {
    pub movie_title: String,
    pub room_name: String,
    pub start: NaiveDateTime,
    pub price: Decimal,
}

/// Request to book seats for a show
#[derive(Debug, Clone)]
pub struct BookSeatsRequest {
    pub show_id: ShowId,
    pub seats: Vec<u32>,
}

pub struct CinemaService {
    catalog_repo: Arc<dyn CatalogRepository>,
    show_store: Arc<dyn ShowStore>,
    planner: Arc<dyn MarathonPlanner>,
    event_bus: Arc<EventBus>,
}

impl CinemaService {
    pub fn new(
        catalog_repo: Arc<dyn CatalogRepository>,
        show_store: Arc<dyn ShowStore>,
        planner: Arc<dyn MarathonPlanner>,
        event_bus: Arc<EventBus>,
    ) -> Self {
        Self {
            catalog_repo,
            show_store,
            planner,
            event_bus,
        }
    }

    /// Wire in-memory repositories and the greedy planner from a config
    pub fn in_memory(config: &CinemaConfig) -> Self {
        Self::new(
            Arc::new(InMemoryCatalogRepository::new()),
            Arc::new(InMemoryShowStore::new()),
            Arc::new(GreedyMarathonPlanner::new(config.marathon)),
            Arc::new(EventBus::with_emission_log(config.record_event_log)),
        )
    }

    pub fn event_bus(&self) -> &Arc<EventBus> {
        &self.event_bus
    }

    // ------------------------------------------------------------------
    // Catalog
    // ------------------------------------------------------------------

    /// Register (or replace) a movie by title
    pub fn register_movie(&self, title: &str, duration: Duration) -> AppResult<Arc<Movie>> {
        let movie = self.catalog_repo.save_movie(Movie::new(title, duration)?)?;
        log::info!("Movie added: {}", movie);

        self.event_bus.emit(MovieRegistered::new(
            movie.title().to_string(),
            movie.duration_minutes(),
        ));
        Ok(movie)
    }

    /// Register (or replace) a room by name
    pub fn register_room(&self, name: &str, capacity: u32) -> AppResult<Arc<Room>> {
        let room = self.catalog_repo.save_room(Room::new(name, capacity)?)?;
        log::info!("Room added: {}", room);

        self.event_bus
            .emit(RoomRegistered::new(room.name().to_string(), room.capacity()));
        Ok(room)
    }

    pub fn list_movies(&self) -> AppResult<Vec<Arc<Movie>>> {
        self.catalog_repo.list_movies()
    }

    pub fn list_rooms(&self) -> AppResult<Vec<Arc<Room>>> {
        self.catalog_repo.list_rooms()
    }

    // ------------------------------------------------------------------
    // Shows
    // ------------------------------------------------------------------

    /// Schedule a show for a registered movie in a registered room
    ///
    /// CRITICAL: nothing is stored unless the show is fully valid
    pub fn create_show(&self, request: CreateShowRequest) -> AppResult<Arc<Show>> {
        // 1. Resolve catalog references
        let movie = self
            .catalog_repo
            .get_movie(&request.movie_title)?
            .ok_or_else(|| AppError::not_found("Movie", &request.movie_title))?;
        let room = self
            .catalog_repo
            .get_room(&request.room_name)?
            .ok_or_else(|| AppError::not_found("Room", &request.room_name))?;

        // 2. Create domain entity with a store-issued id
        let show = Show::new(
            self.show_store.next_id(),
            movie,
            room,
            request.start,
            request.price,
        )?;

        // 3. Persist
        let show = self.show_store.add(show)?;
        log::info!("Show added: {}", show);

        // 4. Emit event
        self.event_bus.emit(ShowScheduled::new(
            show.id(),
            show.movie().title().to_string(),
            show.room().name().to_string(),
            show.start(),
            show.end(),
            show.price(),
        ));

        Ok(show)
    }

    pub fn get_show(&self, show_id: ShowId) -> AppResult<Option<Arc<Show>>> {
        self.show_store.get_by_id(show_id)
    }

    pub fn list_all_shows(&self) -> AppResult<Vec<Arc<Show>>> {
        self.show_store.get_all()
    }

    /// Shows starting on `date`, ascending by start time
    pub fn list_shows_on_date(&self, date: NaiveDate) -> AppResult<Vec<Arc<Show>>> {
        let shows = self.show_store.get_by_date(date)?;
        if shows.is_empty() {
            log::debug!("No shows scheduled for {}", date);
        }
        Ok(shows)
    }

    // ------------------------------------------------------------------
    // Booking
    // ------------------------------------------------------------------

    /// Book all requested seats or none of them
    pub fn book_seats(&self, request: BookSeatsRequest) -> AppResult<()> {
        // 1. Load show
        let show = self
            .show_store
            .get_by_id(request.show_id)?
            .ok_or_else(|| {
                log::warn!("Show with ID {} not found", request.show_id);
                AppError::not_found("Show", request.show_id)
            })?;

        // 2. Book (domain validates atomically)
        if let Err(rejection) = show.book(&request.seats) {
            log::warn!("Failed to book seats for show {}: {}", show.id(), rejection);
            self.event_bus.emit(BookingRejected::new(
                show.id(),
                request.seats,
                rejection.to_string(),
            ));
            return Err(AppError::BookingConflict(rejection));
        }

        // 3. Seats are committed; a failing check here is a bug, not a caller error
        debug_assert!(validate_show(&show).is_ok());

        // 4. Emit event
        log::info!("Booked seats {:?} for show {}", request.seats, show.id());
        self.event_bus.emit(SeatsBooked::new(
            show.id(),
            request.seats,
            show.booked_count(),
            show.room().capacity(),
        ));

        Ok(())
    }

    // ------------------------------------------------------------------
    // Planning
    // ------------------------------------------------------------------

    /// Plan the largest set of non-overlapping shows on `date`
    pub fn plan_marathon(&self, date: NaiveDate) -> AppResult<MarathonPlan> {
        let candidates = self.list_shows_on_date(date)?;
        let selected = self.planner.plan(&candidates);
        let plan = MarathonPlan::new(date, selected);

        log::info!(
            "Marathon for {}: {} of {} shows, {} min, ${:.2}",
            date,
            plan.len(),
            candidates.len(),
            plan.total_minutes(),
            plan.total_price
        );

        self.event_bus.emit(MarathonPlanned::new(
            date,
            candidates.len(),
            plan.shows.iter().map(|show| show.id()).collect(),
            plan.total_minutes(),
            plan.total_price,
        ));

        Ok(plan)
    }
}

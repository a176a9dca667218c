// src/services/cinema_service_tests.rs
//
// Cinema service tests
//
// INVARIANTS TESTED:
// - Failed operations leave no partial state (no stored show, no booked seat)
// - Booking conflicts and unknown ids surface as typed errors
// - Marathon planning composes the day listing with the planner
// - Each successful state change emits its event

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::thread;

    use chrono::{Duration, NaiveDate, NaiveDateTime};
    use rust_decimal::Decimal;

    use crate::config::CinemaConfig;
    use crate::domain::{BookingRejection, DomainError, Movie, Room, Show, ShowId};
    use crate::error::AppError;
    use crate::events::{BookingRejected, EventBus, MarathonPlanned, SeatsBooked};
    use crate::repositories::{InMemoryCatalogRepository, MockShowStore};
    use crate::services::marathon_planner::MockMarathonPlanner;
    use crate::services::{
        BookSeatsRequest, CinemaService, CreateShowRequest, GreedyMarathonPlanner, MarathonRules,
    };

    // ========================================================================
    // TEST HELPERS
    // ========================================================================

    fn at(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap()
    }

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn service() -> CinemaService {
        let service = CinemaService::in_memory(&CinemaConfig::default());
        service.register_room("Hall 1", 50).unwrap();
        service
    }

    fn schedule(service: &CinemaService, title: &str, start: &str, price_cents: i64) -> Arc<Show> {
        service
            .create_show(CreateShowRequest {
                movie_title: title.to_string(),
                room_name: "Hall 1".to_string(),
                start: at(start),
                price: Decimal::new(price_cents, 2),
            })
            .unwrap()
    }

    fn book(service: &CinemaService, show_id: ShowId, seats: &[u32]) -> Result<(), AppError> {
        service.book_seats(BookSeatsRequest {
            show_id,
            seats: seats.to_vec(),
        })
    }

    // ========================================================================
    // SCHEDULING
    // ========================================================================

    #[test]
    fn test_booking_scenario() {
        let service = service();
        service
            .register_movie("The Long Film", Duration::minutes(150))
            .unwrap();
        let show = schedule(&service, "The Long Film", "2024-01-01 10:00", 1250);

        assert_eq!(show.end(), at("2024-01-01 12:30"));

        book(&service, show.id(), &[1, 2, 3]).unwrap();
        assert_eq!(show.booked_seats(), BTreeSet::from([1, 2, 3]));

        let err = book(&service, show.id(), &[3, 4]).unwrap_err();
        assert!(matches!(
            err,
            AppError::BookingConflict(BookingRejection::SeatAlreadyBooked { seat: 3 })
        ));
        assert_eq!(show.booked_seats(), BTreeSet::from([1, 2, 3]));
    }

    #[test]
    fn test_booking_last_seats_sells_out() {
        let service = service();
        service.register_movie("Heat", Duration::minutes(60)).unwrap();
        let show = schedule(&service, "Heat", "2024-01-01 10:00", 500);

        book(&service, show.id(), &(1..=49u32).collect::<Vec<_>>()).unwrap();
        assert!(!show.is_sold_out());
        book(&service, show.id(), &[50]).unwrap();
        assert!(show.is_sold_out());
        assert_eq!(show.available_seats(), 0);
    }

    #[test]
    fn test_unknown_movie_is_not_found() {
        let service = service();
        let err = service
            .create_show(CreateShowRequest {
                movie_title: "Missing".to_string(),
                room_name: "Hall 1".to_string(),
                start: at("2024-01-01 10:00"),
                price: Decimal::ONE,
            })
            .unwrap_err();

        assert!(matches!(err, AppError::NotFound { entity: "Movie", .. }));
        assert!(service.list_all_shows().unwrap().is_empty());
    }

    #[test]
    fn test_unknown_room_is_not_found() {
        let service = service();
        service.register_movie("Heat", Duration::minutes(170)).unwrap();
        let err = service
            .create_show(CreateShowRequest {
                movie_title: "Heat".to_string(),
                room_name: "Hall 9".to_string(),
                start: at("2024-01-01 10:00"),
                price: Decimal::ONE,
            })
            .unwrap_err();

        assert!(matches!(err, AppError::NotFound { entity: "Room", .. }));
    }

    #[test]
    fn test_negative_price_never_reaches_store() {
        let service = service();
        service.register_movie("Heat", Duration::minutes(170)).unwrap();
        let err = service
            .create_show(CreateShowRequest {
                movie_title: "Heat".to_string(),
                room_name: "Hall 1".to_string(),
                start: at("2024-01-01 10:00"),
                price: Decimal::new(-100, 2),
            })
            .unwrap_err();

        assert!(matches!(err, AppError::Domain(DomainError::Validation(_))));
        assert!(service.list_all_shows().unwrap().is_empty());
    }

    #[test]
    fn test_invalid_catalog_entries_rejected() {
        let service = service();
        assert!(matches!(
            service.register_movie(" ", Duration::minutes(90)),
            Err(AppError::Domain(DomainError::Validation(_)))
        ));
        assert!(service.register_room("Hall 2", 0).is_err());
        assert_eq!(service.list_rooms().unwrap().len(), 1);
        assert!(service.list_movies().unwrap().is_empty());
    }

    #[test]
    fn test_show_ids_are_unique() {
        let service = service();
        service.register_movie("Heat", Duration::minutes(60)).unwrap();
        let a = schedule(&service, "Heat", "2024-01-01 10:00", 500);
        let b = schedule(&service, "Heat", "2024-01-01 12:00", 500);

        assert_ne!(a.id(), b.id());
        assert!(service.get_show(b.id()).unwrap().is_some());
    }

    #[test]
    fn test_list_shows_on_date_sorted() {
        let service = service();
        service.register_movie("Heat", Duration::minutes(60)).unwrap();
        schedule(&service, "Heat", "2024-01-01 18:00", 500);
        schedule(&service, "Heat", "2024-01-02 09:00", 500);
        schedule(&service, "Heat", "2024-01-01 09:00", 500);

        let shows = service.list_shows_on_date(day("2024-01-01")).unwrap();
        let starts: Vec<_> = shows.iter().map(|s| s.start()).collect();
        assert_eq!(starts, vec![at("2024-01-01 09:00"), at("2024-01-01 18:00")]);
    }

    // ========================================================================
    // BOOKING
    // ========================================================================

    #[test]
    fn test_booking_unknown_show_is_not_found() {
        let service = service();
        let err = book(&service, ShowId::new(404), &[1]).unwrap_err();
        assert!(matches!(err, AppError::NotFound { entity: "Show", .. }));
    }

    #[test]
    fn test_out_of_range_booking_is_conflict() {
        let service = service();
        service.register_movie("Heat", Duration::minutes(60)).unwrap();
        let show = schedule(&service, "Heat", "2024-01-01 10:00", 500);

        let err = book(&service, show.id(), &[10, 51]).unwrap_err();
        assert!(matches!(
            err,
            AppError::BookingConflict(BookingRejection::SeatOutOfRange { seat: 51, capacity: 50 })
        ));
        assert!(show.booked_seats().is_empty());
    }

    #[test]
    fn test_booking_events() {
        let service = service();
        service.register_movie("Heat", Duration::minutes(60)).unwrap();
        let show = schedule(&service, "Heat", "2024-01-01 10:00", 500);

        let booked = Arc::new(AtomicUsize::new(0));
        let rejected = Arc::new(AtomicUsize::new(0));
        {
            let booked = Arc::clone(&booked);
            service
                .event_bus()
                .subscribe::<SeatsBooked, _>(move |event| {
                    booked.fetch_add(event.seats.len(), Ordering::SeqCst);
                });
            let rejected = Arc::clone(&rejected);
            service
                .event_bus()
                .subscribe::<BookingRejected, _>(move |_| {
                    rejected.fetch_add(1, Ordering::SeqCst);
                });
        }

        book(&service, show.id(), &[1, 2]).unwrap();
        assert!(book(&service, show.id(), &[2]).is_err());
        assert!(book(&service, show.id(), &[]).is_err());

        assert_eq!(booked.load(Ordering::SeqCst), 2);
        assert_eq!(rejected.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_concurrent_bookings_through_service() {
        let service = Arc::new(service());
        service.register_movie("Heat", Duration::minutes(60)).unwrap();
        let show = schedule(&service, "Heat", "2024-01-01 10:00", 500);

        let handles: Vec<_> = (0..12)
            .map(|_| {
                let service = Arc::clone(&service);
                let show_id = show.id();
                thread::spawn(move || book(&service, show_id, &[25]).is_ok())
            })
            .collect();

        let winners = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|won| *won)
            .count();
        assert_eq!(winners, 1);
        assert_eq!(show.booked_count(), 1);
    }

    // ========================================================================
    // MARATHON PLANNING
    // ========================================================================

    #[test]
    fn test_plan_marathon_picks_maximum_count() {
        let service = service();
        service.register_movie("A", Duration::minutes(90)).unwrap();
        service.register_movie("B", Duration::minutes(60)).unwrap();
        service.register_movie("C", Duration::minutes(90)).unwrap();
        service.register_movie("D", Duration::minutes(90)).unwrap();
        schedule(&service, "B", "2024-01-01 10:00", 800);
        schedule(&service, "D", "2024-01-01 11:00", 800);
        schedule(&service, "A", "2024-01-01 09:00", 1000);
        schedule(&service, "C", "2024-01-01 10:30", 1200);

        let plan = service.plan_marathon(day("2024-01-01")).unwrap();

        let titles: Vec<_> = plan
            .shows
            .iter()
            .map(|s| s.movie().title().to_string())
            .collect();
        assert_eq!(titles, vec!["A", "C", "D"]);
        assert_eq!(plan.total_minutes(), 270);
        assert_eq!(plan.total_price, Decimal::new(3000, 2));
        for pair in plan.shows.windows(2) {
            assert!(pair[1].start() >= pair[0].end());
        }
    }

    #[test]
    fn test_plan_marathon_on_empty_day() {
        let service = service();
        let plan = service.plan_marathon(day("2024-05-05")).unwrap();
        assert!(plan.is_empty());
        assert_eq!(plan.total_price, Decimal::ZERO);
    }

    #[test]
    fn test_plan_marathon_ignores_other_days() {
        let service = service();
        service.register_movie("Heat", Duration::minutes(60)).unwrap();
        schedule(&service, "Heat", "2024-01-02 10:00", 500);
        let plan = service.plan_marathon(day("2024-01-01")).unwrap();
        assert!(plan.is_empty());
    }

    #[test]
    fn test_plan_marathon_respects_configured_break() {
        let config = CinemaConfig {
            marathon: MarathonRules {
                min_break_minutes: 30,
            },
            ..CinemaConfig::default()
        };
        let service = CinemaService::in_memory(&config);
        service.register_room("Hall 1", 50).unwrap();
        service.register_movie("Heat", Duration::minutes(60)).unwrap();
        schedule(&service, "Heat", "2024-01-01 10:00", 500);
        schedule(&service, "Heat", "2024-01-01 11:00", 500);
        schedule(&service, "Heat", "2024-01-01 11:30", 500);

        let plan = service.plan_marathon(day("2024-01-01")).unwrap();
        let starts: Vec<_> = plan.shows.iter().map(|s| s.start()).collect();
        assert_eq!(starts, vec![at("2024-01-01 10:00"), at("2024-01-01 11:30")]);
    }

    #[test]
    fn test_plan_marathon_with_maximal_break() {
        let config = CinemaConfig {
            marathon: MarathonRules {
                min_break_minutes: u32::MAX,
            },
            ..CinemaConfig::default()
        };
        let service = CinemaService::in_memory(&config);
        service.register_room("Hall 1", 50).unwrap();
        service.register_movie("Heat", Duration::minutes(60)).unwrap();
        schedule(&service, "Heat", "2024-01-01 10:00", 500);
        schedule(&service, "Heat", "2024-01-01 18:00", 500);

        let plan = service.plan_marathon(day("2024-01-01")).unwrap();
        assert_eq!(plan.len(), 1);
        assert_eq!(plan.shows[0].start(), at("2024-01-01 10:00"));
    }

    #[test]
    fn test_plan_marathon_emits_event() {
        let service = service();
        service.register_movie("Heat", Duration::minutes(60)).unwrap();
        schedule(&service, "Heat", "2024-01-01 10:00", 500);

        let planned = Arc::new(AtomicUsize::new(0));
        let planned_clone = Arc::clone(&planned);
        service
            .event_bus()
            .subscribe::<MarathonPlanned, _>(move |event| {
                planned_clone.store(event.show_ids.len(), Ordering::SeqCst);
            });

        service.plan_marathon(day("2024-01-01")).unwrap();
        assert_eq!(planned.load(Ordering::SeqCst), 1);

        let log = service.event_bus().emitted();
        assert_eq!(log.last().unwrap().event_type, "MarathonPlanned");
    }

    // ========================================================================
    // ORCHESTRATION WITH MOCKS
    // ========================================================================

    fn mocked_show(id: u64, start: &str) -> Arc<Show> {
        let movie = Arc::new(Movie::new("Heat", Duration::minutes(60)).unwrap());
        let room = Arc::new(Room::new("Hall 1", 10).unwrap());
        Arc::new(Show::new(ShowId::new(id), movie, room, at(start), Decimal::ONE).unwrap())
    }

    #[test]
    fn test_planner_receives_days_shows_from_store() {
        let shows = vec![
            mocked_show(1, "2024-01-01 09:00"),
            mocked_show(2, "2024-01-01 11:00"),
        ];
        let returned = shows.clone();

        let mut store = MockShowStore::new();
        store
            .expect_get_by_date()
            .withf(|date| *date == NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
            .times(1)
            .returning(move |_| Ok(returned.clone()));

        let mut planner = MockMarathonPlanner::new();
        planner
            .expect_plan()
            .withf(|candidates| {
                candidates.iter().map(|s| s.id().value()).collect::<Vec<_>>() == vec![1, 2]
            })
            .times(1)
            .returning(|candidates| candidates[..1].to_vec());

        let service = CinemaService::new(
            Arc::new(InMemoryCatalogRepository::new()),
            Arc::new(store),
            Arc::new(planner),
            Arc::new(EventBus::new()),
        );

        let plan = service.plan_marathon(day("2024-01-01")).unwrap();
        assert_eq!(plan.len(), 1);
        assert_eq!(plan.shows[0].id(), ShowId::new(1));
        assert_eq!(plan.total_minutes(), 60);
    }

    #[test]
    fn test_store_failure_on_add_emits_nothing() {
        let service_catalog = Arc::new(InMemoryCatalogRepository::new());
        let bus = Arc::new(EventBus::new());

        let mut store = MockShowStore::new();
        store.expect_next_id().returning(|| ShowId::new(1));
        store
            .expect_add()
            .times(1)
            .returning(|show| Err(AppError::DuplicateShow(show.id())));

        let service = CinemaService::new(
            service_catalog,
            Arc::new(store),
            Arc::new(GreedyMarathonPlanner::default()),
            Arc::clone(&bus),
        );
        service.register_room("Hall 1", 10).unwrap();
        service.register_movie("Heat", Duration::minutes(60)).unwrap();
        bus.clear_emitted();

        let err = service
            .create_show(CreateShowRequest {
                movie_title: "Heat".to_string(),
                room_name: "Hall 1".to_string(),
                start: at("2024-01-01 10:00"),
                price: Decimal::ONE,
            })
            .unwrap_err();

        assert!(matches!(err, AppError::DuplicateShow(_)));
        assert!(bus.emitted().is_empty());
    }
}

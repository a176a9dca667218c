// src/services/mod.rs
//
// Services Module - Orchestration Layer

pub mod cinema_service;
pub mod marathon_planner;

#[cfg(test)]
mod cinema_service_tests;

// Re-export all services and their types
pub use cinema_service::{BookSeatsRequest, CinemaService, CreateShowRequest};

pub use marathon_planner::{
    GreedyMarathonPlanner, MarathonPlan, MarathonPlanner, MarathonRules, MAX_BREAK_MINUTES,
};

// src/services/marathon_planner.rs
//
// Marathon Planner - greedy interval scheduling
//
// CRITICAL RULES:
// - Pure: no repository access, no events, no seat locks
// - Works on a caller-provided snapshot of one day's shows
// - Maximizes the NUMBER of shows, not minutes watched or money spent

use std::cmp::Ordering;
use std::sync::Arc;

use chrono::{Duration, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::{Show, ShowSummary};

/// Longest break a config may ask for: one full day
pub const MAX_BREAK_MINUTES: u32 = 24 * 60;

/// Tunables for marathon planning
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarathonRules {
    /// Minimum gap between the end of one show and the start of the next.
    /// Zero means back-to-back shows are allowed.
    pub min_break_minutes: u32,
}

impl Default for MarathonRules {
    fn default() -> Self {
        Self {
            min_break_minutes: 0,
        }
    }
}

impl MarathonRules {
    /// Never negative; any `u32` minute count fits in a `Duration`
    pub fn min_break(&self) -> Duration {
        Duration::minutes(i64::from(self.min_break_minutes))
    }
}

#[cfg_attr(test, mockall::automock)]
pub trait MarathonPlanner: Send + Sync {
    /// Select a maximum-size set of non-overlapping shows, in chronological order
    fn plan(&self, shows: &[Arc<Show>]) -> Vec<Arc<Show>>;
}

/// Earliest-finish-time-first activity selection
#[derive(Debug, Clone, Default)]
pub struct GreedyMarathonPlanner {
    rules: MarathonRules,
}

impl GreedyMarathonPlanner {
    pub fn new(rules: MarathonRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &MarathonRules {
        &self.rules
    }
}

/// End time, then start time, then id
fn by_finish(a: &Arc<Show>, b: &Arc<Show>) -> Ordering {
    a.end()
        .cmp(&b.end())
        .then_with(|| a.start().cmp(&b.start()))
        .then_with(|| a.id().cmp(&b.id()))
}

impl MarathonPlanner for GreedyMarathonPlanner {
    fn plan(&self, shows: &[Arc<Show>]) -> Vec<Arc<Show>> {
        let mut candidates = shows.to_vec();
        candidates.sort_by(by_finish);

        let min_break = self.rules.min_break();
        let mut next_free: Option<NaiveDateTime> = None;
        let mut selected = Vec::new();

        for show in candidates {
            let selectable = match next_free {
                None => true,
                Some(free_at) => show.start() >= free_at,
            };
            if !selectable {
                log::debug!("Marathon skips show {} (starts {})", show.id(), show.start());
                continue;
            }

            next_free = show.end().checked_add_signed(min_break);
            selected.push(show);

            // Nothing can start after the end of representable time
            if next_free.is_none() {
                break;
            }
        }

        selected
    }
}

/// A planned marathon with the totals a presentation layer shows
#[derive(Debug, Clone)]
pub struct MarathonPlan {
    pub date: NaiveDate,
    pub shows: Vec<Arc<Show>>,
    pub total_duration: Duration,
    pub total_price: Decimal,
}

impl MarathonPlan {
    pub fn new(date: NaiveDate, shows: Vec<Arc<Show>>) -> Self {
        let total_duration = shows
            .iter()
            .fold(Duration::zero(), |acc, show| acc + show.movie().duration());
        let total_price = shows.iter().map(|show| show.price()).sum();
        Self {
            date,
            shows,
            total_duration,
            total_price,
        }
    }

    pub fn len(&self) -> usize {
        self.shows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shows.is_empty()
    }

    pub fn total_minutes(&self) -> i64 {
        self.total_duration.num_minutes()
    }

    pub fn summaries(&self) -> Vec<ShowSummary> {
        self.shows.iter().map(|show| show.summary()).collect()
    }
}

//! Tree statistics.
//!
//! Aggregates are ephemeral and recomputed on every load. Breeding-age
//! counting depends on "now", so computation goes through a [`Clock`] that
//! tests (and replay tooling) can freeze.

use std::collections::HashMap;

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::components::{FowlId, FowlSnapshot, HatchDate};

/// Breeding eligibility window, age in whole months, inclusive.
pub const BREEDING_AGE_MIN_MONTHS: u32 = 6;
pub const BREEDING_AGE_MAX_MONTHS: u32 = 60;

/// Current-time source for age computation.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Wall-clock dates.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }
}

/// Frozen date, for deterministic aggregates.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeStatistics {
    pub total: usize,
    pub max_generation: u32,
    pub verified: usize,
    pub breeding_age: usize,
}

pub fn is_breeding_age(record: &FowlSnapshot, today: NaiveDate) -> bool {
    let months = HatchDate(record.hatch_date).age_months(today);
    (BREEDING_AGE_MIN_MONTHS..=BREEDING_AGE_MAX_MONTHS).contains(&months)
}

/// Aggregate counts over a loaded node set. `generations` must cover the
/// same records (see `generation::assign_generations`).
pub fn compute_statistics(
    nodes: &[FowlSnapshot],
    generations: &HashMap<FowlId, u32>,
    clock: &dyn Clock,
) -> TreeStatistics {
    let today = clock.today();
    let mut stats = TreeStatistics {
        total: nodes.len(),
        ..Default::default()
    };

    for record in nodes {
        let generation = generations.get(&record.id).copied().unwrap_or(0);
        stats.max_generation = stats.max_generation.max(generation);
        if record.lineage_verified {
            stats.verified += 1;
        }
        if is_breeding_age(record, today) {
            stats.breeding_age += 1;
        }
    }
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genealogy::generation::assign_generations;
    use crate::genealogy::test_pool::fowl;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_statistics_with_frozen_clock() {
        let mut pool = vec![
            fowl(1, None, None),
            fowl(2, Some(1), None),
            fowl(3, Some(2), None),
        ];
        // Hatched 2024-01-01. Freeze "today" so ages are 12 months exactly.
        let clock = FixedClock(date(2025, 1, 1));
        pool[0].lineage_verified = true;
        pool[1].lineage_verified = true;

        let generations = assign_generations(&pool);
        let stats = compute_statistics(&pool, &generations, &clock);

        assert_eq!(stats.total, 3);
        assert_eq!(stats.max_generation, 2);
        assert_eq!(stats.verified, 2);
        assert_eq!(stats.breeding_age, 3);
    }

    #[test]
    fn test_breeding_window_is_inclusive() {
        let record = fowl(1, None, None); // hatched 2024-01-01

        // 5 months: too young
        assert!(!is_breeding_age(&record, date(2024, 6, 1)));
        // 6 months: lower bound
        assert!(is_breeding_age(&record, date(2024, 7, 1)));
        // 60 months: upper bound
        assert!(is_breeding_age(&record, date(2029, 1, 1)));
        // 61 months: too old
        assert!(!is_breeding_age(&record, date(2029, 2, 1)));
    }

    #[test]
    fn test_statistics_are_time_dependent() {
        let pool = vec![fowl(1, None, None)];
        let generations = assign_generations(&pool);

        let young = compute_statistics(&pool, &generations, &FixedClock(date(2024, 2, 1)));
        let mature = compute_statistics(&pool, &generations, &FixedClock(date(2025, 2, 1)));

        assert_eq!(young.breeding_age, 0);
        assert_eq!(mature.breeding_age, 1);
    }

    #[test]
    fn test_empty_set() {
        let stats = compute_statistics(&[], &HashMap::new(), &FixedClock(date(2025, 1, 1)));
        assert_eq!(stats, TreeStatistics::default());
    }
}

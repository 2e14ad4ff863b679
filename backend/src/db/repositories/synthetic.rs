//! Seeded generator of plausible interaction records.
//!
//! Mirrors the demo data the dashboard was first built against: visitors
//! aged 18 to 47, an even gender split, 80% interaction rate, hand gestures
//! half of the time, sessions ending within the last ten days.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::db::repository::{RecordSource, RepositoryResult};
use crate::models::RawRecord;
use crate::services::normalizer::{random_duration, random_filters};

pub const DEFAULT_RECORD_COUNT: usize = 500;

const MIN_AGE: i64 = 18;
const AGE_SPAN: i64 = 30;
const INTERACTION_RATE: f64 = 0.8;
const HAND_GESTURE_RATE: f64 = 0.5;
const DAY_SPAN: i64 = 10;

pub struct SyntheticSource {
    count: usize,
    seed: Option<u64>,
    anchor: Option<DateTime<Utc>>,
}

impl SyntheticSource {
    pub fn new(count: usize, seed: Option<u64>) -> Self {
        Self {
            count,
            seed,
            anchor: None,
        }
    }

    /// Pin "now" so seeded output is fully reproducible.
    pub fn with_anchor(mut self, anchor: DateTime<Utc>) -> Self {
        self.anchor = Some(anchor);
        self
    }

    pub fn generate(&self) -> Vec<RawRecord> {
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let anchor = self.anchor.unwrap_or_else(Utc::now);

        (0..self.count)
            .map(|i| {
                let age = MIN_AGE + rng.gen_range(0..AGE_SPAN);
                let gender = if rng.gen_bool(0.5) { "Male" } else { "Female" };
                let interacted = rng.gen_bool(INTERACTION_RATE);
                let hand_gestures = rng.gen_bool(HAND_GESTURE_RATE);
                let duration = random_duration(&mut rng);
                let filters = random_filters(&mut rng);
                let end_time = anchor
                    - Duration::days(rng.gen_range(0..DAY_SPAN))
                    - Duration::seconds(rng.gen_range(0..86_400));

                RawRecord {
                    id: (i + 1).to_string(),
                    age: Some(age),
                    gender: Some(gender.to_string()),
                    interacted,
                    hand_gestures,
                    duration: Some(duration),
                    end_time,
                    filters: Some(filters.into_iter().map(i64::from).collect()),
                }
            })
            .collect()
    }
}

impl Default for SyntheticSource {
    fn default() -> Self {
        Self::new(DEFAULT_RECORD_COUNT, None)
    }
}

#[async_trait]
impl RecordSource for SyntheticSource {
    fn name(&self) -> &'static str {
        "synthetic"
    }

    async fn fetch_all(&self) -> RepositoryResult<Vec<RawRecord>> {
        let records = self.generate();
        debug!("Generated {} synthetic records", records.len());
        Ok(records)
    }

    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(true)
    }
}

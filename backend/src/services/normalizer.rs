//! Raw record normalization.
//!
//! Every raw record becomes exactly one [`NormalizedRecord`], in input order:
//!
//! - `date` is the UTC calendar date of `endTime`;
//! - `filters` keeps the valid ids the source supplied, or synthesizes a
//!   random non-empty subset of `{1, 2, 3, 4}` when it supplied none;
//! - `duration` keeps a finite non-negative source value, or synthesizes one
//!   uniformly from `[60, 300]` seconds rounded to two decimals.
//!
//! Synthesis goes through a [`FallbackGenerator`] so callers decide where the
//! randomness comes from; tests pass a seeded generator.

use log::debug;
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::models::{date_bucket, FilterId, NormalizedRecord, RawRecord};

/// Lower bound of a synthesized duration, in seconds.
pub const MIN_FALLBACK_DURATION: f64 = 60.0;
/// Upper bound of a synthesized duration, in seconds.
pub const MAX_FALLBACK_DURATION: f64 = 300.0;

/// Source of values for fields a record source left empty.
pub trait FallbackGenerator {
    /// A non-empty subset of the filter universe.
    fn filters(&mut self) -> Vec<FilterId>;

    /// A duration in `[MIN_FALLBACK_DURATION, MAX_FALLBACK_DURATION]`.
    fn duration(&mut self) -> f64;
}

/// [`FallbackGenerator`] backed by a `StdRng`.
pub struct SeededFallback {
    rng: StdRng,
}

impl SeededFallback {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Seeded when a seed is configured, entropy otherwise.
    pub fn from_seed(seed: Option<u64>) -> Self {
        seed.map(Self::new).unwrap_or_else(Self::from_entropy)
    }
}

impl FallbackGenerator for SeededFallback {
    fn filters(&mut self) -> Vec<FilterId> {
        random_filters(&mut self.rng)
    }

    fn duration(&mut self) -> f64 {
        random_duration(&mut self.rng)
    }
}

/// Shuffle the filter universe and keep a uniformly sized, non-empty prefix.
pub fn random_filters<R: Rng + ?Sized>(rng: &mut R) -> Vec<FilterId> {
    let count = rng.gen_range(1..=FilterId::ALL.len());
    let mut universe = FilterId::ALL.to_vec();
    universe.shuffle(rng);
    universe.truncate(count);
    universe
}

/// Uniform duration in `[60, 300]`, rounded to two decimals.
pub fn random_duration<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    let value = rng.gen_range(MIN_FALLBACK_DURATION..=MAX_FALLBACK_DURATION);
    (value * 100.0).round() / 100.0
}

/// Normalize a batch of raw records, one output per input.
pub fn normalize<G>(raw: &[RawRecord], fallback: &mut G) -> Vec<NormalizedRecord>
where
    G: FallbackGenerator + ?Sized,
{
    let mut synthesized_filters = 0usize;
    let mut synthesized_durations = 0usize;

    let records: Vec<NormalizedRecord> = raw
        .iter()
        .map(|record| {
            let normalized = normalize_one(record, fallback);
            if source_filters(record.filters.as_deref()).is_empty() {
                synthesized_filters += 1;
            }
            if source_duration(record.duration).is_none() {
                synthesized_durations += 1;
            }
            normalized
        })
        .collect();

    debug!(
        "Normalized {} records ({} synthesized filter sets, {} synthesized durations)",
        records.len(),
        synthesized_filters,
        synthesized_durations
    );

    records
}

/// Normalize a single raw record.
pub fn normalize_one<G>(raw: &RawRecord, fallback: &mut G) -> NormalizedRecord
where
    G: FallbackGenerator + ?Sized,
{
    let mut filters = source_filters(raw.filters.as_deref());
    if filters.is_empty() {
        filters = fallback.filters();
    }

    let duration = source_duration(raw.duration).unwrap_or_else(|| fallback.duration());

    NormalizedRecord {
        id: raw.id.clone(),
        age: raw.age,
        gender: raw.gender.clone(),
        interacted: raw.interacted,
        hand_gestures: raw.hand_gestures,
        duration,
        end_time: raw.end_time,
        date: date_bucket(&raw.end_time),
        filters,
    }
}

/// Valid ids in first-seen order, duplicates dropped.
fn source_filters(values: Option<&[i64]>) -> Vec<FilterId> {
    let mut filters: Vec<FilterId> = Vec::new();
    for id in values.unwrap_or_default().iter().filter_map(|v| FilterId::new(*v)) {
        if !filters.contains(&id) {
            filters.push(id);
        }
    }
    filters
}

fn source_duration(value: Option<f64>) -> Option<f64> {
    value.filter(|d| d.is_finite() && *d >= 0.0)
}

/// Thread-safe normalizer holding its own fallback generator.
///
/// Shared through the application state so every snapshot rebuild draws from
/// the same (optionally seeded) stream.
pub struct Normalizer {
    fallback: Mutex<Box<dyn FallbackGenerator + Send>>,
}

impl Normalizer {
    pub fn new(fallback: Box<dyn FallbackGenerator + Send>) -> Self {
        Self {
            fallback: Mutex::new(fallback),
        }
    }

    pub fn seeded(seed: Option<u64>) -> Self {
        Self::new(Box::new(SeededFallback::from_seed(seed)))
    }

    pub fn normalize(&self, raw: &[RawRecord]) -> Vec<NormalizedRecord> {
        let mut fallback = self.fallback.lock();
        normalize(raw, &mut **fallback)
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::seeded(None)
    }
}

#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::Mutex;

use tellar::models::{parse_end_time, FilterId, NormalizedRecord, RawRecord};

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Runs `f` with environment variables temporarily modified.
///
/// This is panic-safe (restores variables on unwind) and also serializes access to
/// process-global env vars to avoid flaky tests when Rust runs tests in parallel.
///
/// `changes` is a list of `(key, value)` pairs:
/// - `Some(v)` sets the variable to `v`
/// - `None` removes the variable
pub fn with_scoped_env<F, R>(changes: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    let _guard = ScopedEnv::new(changes);
    f()
}

struct ScopedEnv {
    snapshot: Vec<(String, Option<String>)>,
}

impl ScopedEnv {
    fn new(changes: &[(&str, Option<&str>)]) -> Self {
        let keys: HashSet<&str> = changes.iter().map(|(k, _)| *k).collect();
        let snapshot = keys
            .into_iter()
            .map(|k| (k.to_string(), std::env::var(k).ok()))
            .collect::<Vec<_>>();

        for (k, v) in changes {
            match v {
                Some(val) => std::env::set_var(k, val),
                None => std::env::remove_var(k),
            }
        }

        Self { snapshot }
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        for (k, v) in self.snapshot.drain(..) {
            match v {
                Some(val) => std::env::set_var(&k, val),
                None => std::env::remove_var(&k),
            }
        }
    }
}

/// A raw record as a collection would return it, without filters or duration.
pub fn raw_record(id: &str, age: Option<i64>, gender: Option<&str>, interacted: bool, end_time: &str) -> RawRecord {
    RawRecord {
        id: id.to_string(),
        age,
        gender: gender.map(str::to_string),
        interacted,
        hand_gestures: false,
        duration: None,
        end_time: parse_end_time(end_time).expect("valid test timestamp"),
        filters: None,
    }
}

/// A fully populated normalized record.
pub fn normalized_record(
    id: &str,
    age: Option<i64>,
    gender: &str,
    interacted: bool,
    end_time: &str,
    filters: &[u8],
) -> NormalizedRecord {
    let end_time = parse_end_time(end_time).expect("valid test timestamp");
    NormalizedRecord {
        id: id.to_string(),
        age,
        gender: Some(gender.to_string()),
        interacted,
        hand_gestures: false,
        duration: 120.0,
        end_time,
        date: end_time.date_naive(),
        filters: filters
            .iter()
            .map(|f| FilterId::new(*f as i64).expect("valid filter id"))
            .collect(),
    }
}

//! Shared helpers for integration tests.
#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::Mutex;

use chrono::NaiveDate;
use coachtrack::models::{NewCoach, NewMaterial, Ownership};

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Runs `f` with environment variables temporarily modified.
///
/// Variables are restored on drop, even when `f` panics, and access is
/// serialised because the test harness runs tests in parallel.
///
/// `changes` is a list of `(key, value)` pairs where `None` removes the variable.
pub fn with_scoped_env<F, R>(changes: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    let _guard = ScopedEnv::apply(changes);
    f()
}

struct ScopedEnv {
    saved: Vec<(String, Option<String>)>,
}

impl ScopedEnv {
    fn apply(changes: &[(&str, Option<&str>)]) -> Self {
        let keys: HashSet<&str> = changes.iter().map(|(k, _)| *k).collect();
        let saved = keys
            .into_iter()
            .map(|k| (k.to_string(), std::env::var(k).ok()))
            .collect();

        for (k, v) in changes {
            set_or_remove(k, *v);
        }
        Self { saved }
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        for (k, v) in self.saved.drain(..) {
            set_or_remove(&k, v.as_deref());
        }
    }
}

fn set_or_remove(key: &str, value: Option<&str>) {
    match value {
        Some(val) => std::env::set_var(key, val),
        None => std::env::remove_var(key),
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn new_coach(number: &str, offered: NaiveDate, work_types: &[&str]) -> NewCoach {
    NewCoach {
        coach_number: number.to_string(),
        offered_date: offered,
        work_types: work_types.iter().map(|w| w.to_string()).collect(),
        notes: None,
    }
}

pub fn new_material(name: &str, code: &str, ownership: Ownership) -> NewMaterial {
    NewMaterial {
        name: name.to_string(),
        material_code: code.to_string(),
        unit: "piece".to_string(),
        stock_quantity: Some(10),
        min_stock_level: Some(2),
        description: None,
        ownership,
    }
}

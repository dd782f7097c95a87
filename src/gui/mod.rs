// src/gui/mod.rs
use std::sync::{Mutex, MutexGuard};

pub mod app;
pub mod components;
pub mod progress;

pub use app::run;

/// Lock a UI/worker slot; a panicked worker does not take the UI down.
pub(crate) fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

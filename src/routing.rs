// src/routing.rs
//! Site path helpers for the gym (location) and language segments.
//!
//! Paths look like `/xx/rest/of/path`, where `xx` is a two-character code.
//! The last code seen is remembered in the store, so a path without one
//! can fall back to it.

use crate::config::consts::CODE_LEN;
use crate::store::Store;

/// First path segment, when it is exactly two characters.
pub fn leading_code(path: &str) -> Option<&str> {
    path.split('/')
        .nth(1)
        .filter(|seg| seg.chars().count() == CODE_LEN)
}

/// Put `code` at the front of `path`, replacing an existing code segment.
pub fn switch_code(path: &str, code: &str) -> String {
    if leading_code(path).is_some() {
        // "/xx/rest" -> ["", "xx", "rest"]
        let mut parts: Vec<&str> = path.split('/').collect();
        parts[1] = code;
        return parts.join("/");
    }
    if path.starts_with('/') { join!("/", code, path) } else { join!("/", code, "/", path) }
}

/// Code from the path (and remember it under `key`), else the stored one.
pub fn resolve_code(path: &str, store: &Store, key: &str) -> Option<String> {
    match leading_code(path) {
        Some(code) => {
            if let Err(e) = store.set(key, code) {
                logw!("Routing: could not store {} = {}: {}", key, code, e);
            }
            Some(s!(code))
        }
        None => store.get(key),
    }
}

/// Link target for a gym button: carry the current page over to `target`.
pub fn gym_button_href(target: &str, current_path: &str) -> String {
    let parts: Vec<&str> = current_path.split('/').collect();
    if parts.len() > 2 {
        join!(target, "/", parts[2])
    } else if parts.len() == 2 && parts[1].chars().count() > CODE_LEN {
        join!(target, "/", parts[1])
    } else {
        s!(target)
    }
}

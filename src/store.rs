// src/store.rs
//! Local persistence under `.store/`:
//! - `prefs.csv`: `key,value` rows (stand-in for browser localStorage)
//! - `cache/<key>.csv`: last good CSV per sheet source

use std::{
    fs,
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

use crate::config::consts::{CACHE_SUBDIR, PREFS_FILE, STORE_DIR, STORE_SEP};
use crate::core::sanitize::sanitize_file_stem;
use crate::csv::{parse_rows, write_row};
use crate::file::{ensure_directory, read_optional, write_text};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Store {
    root: PathBuf,
}

impl Default for Store {
    fn default() -> Self { Self::new(STORE_DIR) }
}

impl Store {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self { Self { root: root.into() } }

    pub fn root(&self) -> &Path { &self.root }

    pub fn prefs_path(&self) -> PathBuf { self.root.join(PREFS_FILE) }

    pub fn cache_path(&self, source_key: &str) -> PathBuf {
        self.root.join(CACHE_SUBDIR).join(format!("{}.csv", sanitize_file_stem(source_key)))
    }

    /* ---------------- Preferences ---------------- */

    /// All stored pairs, in file order. Missing file -> empty.
    pub fn prefs(&self) -> io::Result<Vec<(String, String)>> {
        let Some(text) = read_optional(&self.prefs_path())? else { return Ok(Vec::new()) };
        let pairs = parse_rows(&text, STORE_SEP)
            .into_iter()
            .filter_map(|mut row| {
                if row.is_empty() || row[0].is_empty() { return None; }
                let value = if row.len() > 1 { row.swap_remove(1) } else { s!() };
                Some((row.swap_remove(0), value))
            })
            .collect();
        Ok(pairs)
    }

    /// Stored value for `key`. Unreadable prefs are logged and read as absent.
    pub fn get(&self, key: &str) -> Option<String> {
        match self.prefs() {
            Ok(pairs) => pairs.into_iter().find(|(k, _)| k == key).map(|(_, v)| v),
            Err(e) => {
                logw!("Store: could not read {}: {}", self.prefs_path().display(), e);
                None
            }
        }
    }

    /// Insert or replace `key`, rewriting the prefs file.
    pub fn set(&self, key: &str, value: &str) -> io::Result<()> {
        let mut pairs = self.prefs()?;
        match pairs.iter_mut().find(|(k, _)| k == key) {
            Some(pair) => pair.1 = s!(value),
            None => pairs.push((s!(key), s!(value))),
        }

        ensure_directory(&self.root)?;
        let file = fs::File::create(self.prefs_path())?;
        let mut writer = BufWriter::new(file);
        for (k, v) in &pairs {
            write_row(&mut writer, &[k.clone(), v.clone()], STORE_SEP)?;
        }
        writer.flush()?;
        logd!("Store: {} = {:?}", key, value);
        Ok(())
    }

    /* ---------------- Cached sheets ---------------- */

    pub fn save_csv(&self, source_key: &str, text: &str) -> io::Result<PathBuf> {
        let path = self.cache_path(source_key);
        write_text(&path, text)?;
        logd!("Cache: saved {} bytes to {}", text.len(), path.display());
        Ok(path)
    }

    /// Cached CSV for a source key, if any.
    pub fn load_csv(&self, source_key: &str) -> Option<String> {
        let path = self.cache_path(source_key);
        match read_optional(&path) {
            Ok(text) => text,
            Err(e) => {
                logw!("Cache: could not read {}: {}", path.display(), e);
                None
            }
        }
    }
}

// src/config/consts.rs

// Net config
pub const SHEETS_BASE: &str = "https://docs.google.com/spreadsheets/d/";
pub const PUBLISHED_ID_PREFIX: &str = "2PACX-";
pub const USER_AGENT: &str = concat!("sheet_tabs/", env!("CARGO_PKG_VERSION"));
pub const FETCH_TIMEOUT_SECS: u64 = 15;

// Local store (prefs + cached sheets + log)
pub const STORE_DIR: &str = ".store";
pub const PREFS_FILE: &str = "prefs.csv";
pub const CACHE_SUBDIR: &str = "cache";
pub const LOG_FILE: &str = "debug.log";
pub const STORE_SEP: char = ',';

// Token grammar
pub const FONT_SIZE_MIN: u32 = 8;
pub const FONT_SIZE_MAX: u32 = 48;

// Routing
pub const GYM_KEY: &str = "totem";
pub const LANGUAGE_KEY: &str = "language";
pub const CODE_LEN: usize = 2;

// Config + output
pub const CONFIG_FILE: &str = "sheet_tabs.toml";
pub const DEFAULT_OUT_FILE: &str = "sheet.html";
pub const DEFAULT_TITLE: &str = "Sheet";
pub const NO_DATA_MESSAGE: &str = "No data available";
/// Tab label for rows whose category cell is empty
pub const BLANK_TAB_LABEL: &str = "(blank)";

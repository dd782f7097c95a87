// src/fetch.rs
//! Getting CSV text for a published sheet.
//!
//! - `csv_urls` lists candidate export URLs for an id, best first.
//! - `fetch_csv` tries them in order through a `Transport`; HTTP errors,
//!   transport errors and HTML interstitials (login/consent pages) all
//!   count as a failed attempt.
//! - `load_with_cache` saves every good fetch in the store and falls back
//!   to the saved copy when all URLs fail.

use crate::config::consts::{PUBLISHED_ID_PREFIX, SHEETS_BASE};
use crate::config::options::SourceOptions;
use crate::progress::Progress;
use crate::store::Store;

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("no sheet id given")]
    MissingSheetId,
    #[error("gid {gid:?} is not a number")]
    InvalidGid { gid: String },
    #[error("HTTP {status} from {url}")]
    Http { status: u16, url: String },
    #[error("request to {url} failed: {message}")]
    Transport { url: String, message: String },
    #[error("{url} returned an HTML page instead of CSV")]
    NotCsv { url: String },
    #[error("all {} sheet URL(s) failed", .attempts.len())]
    AllFailed { attempts: Vec<FetchError> },
}

/// GET one URL and return the body. Non-2xx must be `FetchError::Http`.
pub trait Transport {
    fn get(&self, url: &str) -> Result<String, FetchError>;
}

/// Which sheet to fetch. Only selects URLs; the parsing core never sees it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SheetSource {
    /// Publish-to-web id (`2PACX-...`) or a raw file id
    pub sheet_id: String,
    pub gid: Option<String>,
}

impl SheetSource {
    pub fn new<S: Into<String>>(sheet_id: S) -> Self {
        Self { sheet_id: sheet_id.into(), gid: None }
    }

    pub fn with_gid<S: Into<String>>(mut self, gid: S) -> Self {
        self.gid = Some(gid.into());
        self
    }

    pub fn id(&self) -> &str { self.sheet_id.trim() }

    /// Trimmed gid, `None` when absent or blank.
    pub fn gid(&self) -> Option<&str> {
        self.gid.as_deref().map(str::trim).filter(|g| !g.is_empty())
    }

    pub fn is_published_id(&self) -> bool { self.id().starts_with(PUBLISHED_ID_PREFIX) }

    /// Key for the local cache: `id` or `id_gid`.
    pub fn cache_key(&self) -> String {
        match self.gid() {
            Some(gid) => join!(self.id(), "_", gid),
            None => s!(self.id()),
        }
    }
}

impl From<&SourceOptions> for SheetSource {
    fn from(opts: &SourceOptions) -> Self {
        Self { sheet_id: opts.sheet_id.clone(), gid: opts.gid.clone() }
    }
}

/// Candidate CSV URLs, in the order they should be tried.
pub fn csv_urls(source: &SheetSource) -> Result<Vec<String>, FetchError> {
    let id = source.id();
    if id.is_empty() { return Err(FetchError::MissingSheetId); }
    let gid = source.gid();
    // gids are numeric; anything else would leak into the query string
    if let Some(g) = gid.filter(|g| !g.bytes().all(|b| b.is_ascii_digit())) {
        return Err(FetchError::InvalidGid { gid: s!(g) });
    }

    if source.is_published_id() {
        let mut url = format!("{SHEETS_BASE}e/{id}/pub?output=csv");
        if let Some(g) = gid { url.push_str(&format!("&gid={g}&single=true")); }
        return Ok(vec![url]);
    }

    let gid_param = gid.map(|g| format!("&gid={g}")).unwrap_or_default();
    Ok(vec![
        format!("{SHEETS_BASE}{id}/export?format=csv{gid_param}"),
        format!("{SHEETS_BASE}{id}/pub?output=csv"),
        format!("{SHEETS_BASE}{id}/gviz/tq?tqx=out:csv{gid_param}"),
    ])
}

/// True when a body is an HTML document rather than CSV.
pub fn looks_like_html(body: &str) -> bool {
    let head = body.trim_start().trim_start_matches('\u{feff}').trim_start();
    let prefix: String = head.chars().take(9).collect::<String>().to_ascii_lowercase();
    prefix.starts_with("<!doctype") || prefix.starts_with("<html")
}

/// Try each candidate URL; first CSV body wins.
pub fn fetch_csv<T, P>(transport: &T, source: &SheetSource, progress: &mut P) -> Result<String, FetchError>
where
    T: Transport + ?Sized,
    P: Progress + ?Sized,
{
    let urls = csv_urls(source)?;
    progress.begin(urls.len());

    let mut attempts = Vec::with_capacity(urls.len());
    for url in &urls {
        progress.log(&format!("Fetching {url}"));
        let result = transport.get(url).and_then(|body| {
            if looks_like_html(&body) { Err(FetchError::NotCsv { url: url.clone() }) } else { Ok(body) }
        });

        match result {
            Ok(body) => {
                progress.attempt_done(url, true);
                progress.finish();
                logf!("Fetch: {} bytes from {}", body.len(), url);
                return Ok(body);
            }
            Err(e) => {
                logw!("Fetch: {}", e);
                progress.attempt_done(url, false);
                attempts.push(e);
            }
        }
    }

    progress.finish();
    Err(FetchError::AllFailed { attempts })
}

/// `fetch_csv`, saving the result in `store` and falling back to the
/// cached copy when every URL fails.
pub fn load_with_cache<T, P>(
    transport: &T,
    store: &Store,
    source: &SheetSource,
    progress: &mut P,
) -> Result<String, FetchError>
where
    T: Transport + ?Sized,
    P: Progress + ?Sized,
{
    let key = source.cache_key();
    match fetch_csv(transport, source, progress) {
        Ok(text) => {
            if let Err(e) = store.save_csv(&key, &text) {
                logw!("Cache: could not save {}: {}", key, e);
            }
            Ok(text)
        }
        Err(e @ (FetchError::MissingSheetId | FetchError::InvalidGid { .. })) => Err(e),
        Err(e) => match store.load_csv(&key) {
            Some(text) => {
                logw!("Fetch failed ({}); using cached copy of {}", e, key);
                progress.log("Offline: showing cached copy");
                Ok(text)
            }
            None => {
                loge!("Fetch failed and no cache for {}: {}", key, e);
                Err(e)
            }
        },
    }
}

// tests/fetch_fallback.rs
//
// URL fallback order, interstitial rejection and the cache fallback,
// with a scripted transport instead of the network.
//
use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use sheet_tabs::fetch::{self, FetchError, SheetSource, Transport};
use sheet_tabs::progress::{NullProgress, Progress};
use sheet_tabs::store::Store;

/// Answers from a url -> body table; anything else is a 404.
#[derive(Default)]
struct Scripted {
    bodies: HashMap<String, String>,
    calls: RefCell<Vec<String>>,
}

impl Scripted {
    fn with(mut self, url: &str, body: &str) -> Self {
        self.bodies.insert(url.into(), body.into());
        self
    }
}

impl Transport for Scripted {
    fn get(&self, url: &str) -> Result<String, FetchError> {
        self.calls.borrow_mut().push(url.into());
        self.bodies.get(url).cloned().ok_or_else(|| FetchError::Http { status: 404, url: url.into() })
    }
}

#[derive(Default)]
struct Counted {
    begun: usize,
    ok: usize,
    failed: usize,
    finished: bool,
}

impl Progress for Counted {
    fn begin(&mut self, total: usize) { self.begun = total; }
    fn attempt_done(&mut self, _url: &str, ok: bool) {
        if ok { self.ok += 1 } else { self.failed += 1 }
    }
    fn finish(&mut self) { self.finished = true; }
}

fn tmp_store(name: &str) -> Store {
    let mut p: PathBuf = std::env::temp_dir();
    p.push(format!("sheet_tabs_fetch_{}_{}", name, std::process::id()));
    let _ = fs::remove_dir_all(&p);
    Store::new(p)
}

const EXPORT: &str = "https://docs.google.com/spreadsheets/d/FILE/export?format=csv";
const PUB: &str = "https://docs.google.com/spreadsheets/d/FILE/pub?output=csv";

#[test]
fn falls_through_to_the_first_csv_body() {
    let t = Scripted::default()
        .with(EXPORT, "<!doctype html><title>Sign in</title>")
        .with(PUB, "A,B\n1,2\n");
    let mut prog = Counted::default();

    let text = fetch::fetch_csv(&t, &SheetSource::new("FILE"), &mut prog).unwrap();
    assert_eq!(text, "A,B\n1,2\n");
    assert_eq!(*t.calls.borrow(), vec![EXPORT, PUB]);
    assert_eq!((prog.begun, prog.ok, prog.failed, prog.finished), (3, 1, 1, true));
}

#[test]
fn all_failures_are_collected_in_order() {
    let t = Scripted::default().with(PUB, "<html><body>consent</body></html>");
    let err = fetch::fetch_csv(&t, &SheetSource::new("FILE"), &mut NullProgress).unwrap_err();

    let FetchError::AllFailed { attempts } = err else { panic!("expected AllFailed") };
    assert_eq!(attempts.len(), 3);
    assert!(matches!(attempts[0], FetchError::Http { status: 404, .. }));
    assert!(matches!(attempts[1], FetchError::NotCsv { .. }));
    assert!(matches!(attempts[2], FetchError::Http { .. }));
}

#[test]
fn missing_id_never_touches_the_transport() {
    let t = Scripted::default();
    let err = fetch::fetch_csv(&t, &SheetSource::new(""), &mut NullProgress).unwrap_err();
    assert!(matches!(err, FetchError::MissingSheetId));
    assert!(t.calls.borrow().is_empty());
}

#[test]
fn bad_gid_fails_before_any_request_and_skips_the_cache() {
    let store = tmp_store("badgid");
    let source = SheetSource::new("FILE").with_gid("0&single=false");
    store.save_csv(&source.cache_key(), "A\n1\n").unwrap();

    let t = Scripted::default();
    let err = fetch::load_with_cache(&t, &store, &source, &mut NullProgress).unwrap_err();
    assert!(matches!(err, FetchError::InvalidGid { .. }));
    assert!(t.calls.borrow().is_empty());
    let _ = fs::remove_dir_all(store.root());
}

#[test]
fn cache_is_written_then_used_when_offline() {
    let store = tmp_store("cache");
    let source = SheetSource::new("FILE").with_gid("5");
    let export_gid = format!("{EXPORT}&gid=5");

    let online = Scripted::default().with(&export_gid, "K,V\na,1\n");
    let text = fetch::load_with_cache(&online, &store, &source, &mut NullProgress).unwrap();
    assert_eq!(text, "K,V\na,1\n");
    assert!(store.cache_path("FILE_5").is_file());

    let offline = Scripted::default();
    let cached = fetch::load_with_cache(&offline, &store, &source, &mut NullProgress).unwrap();
    assert_eq!(cached, "K,V\na,1\n");

    let _ = fs::remove_dir_all(store.root());
}

#[test]
fn no_cache_means_the_fetch_error() {
    let store = tmp_store("nocache");
    let err = fetch::load_with_cache(&Scripted::default(), &store, &SheetSource::new("FILE"), &mut NullProgress)
        .unwrap_err();
    assert!(matches!(err, FetchError::AllFailed { .. }));
}

// src/cli.rs
use std::{fs, path::PathBuf};

use clap::{Args, Parser, Subcommand};
use color_eyre::eyre::{Result, WrapErr, eyre};

use crate::config::consts::{DEFAULT_OUT_FILE, GYM_KEY};
use crate::config::options::{AppOptions, WidgetKind};
use crate::core::net::HttpTransport;
use crate::fetch::{self, FetchError, SheetSource};
use crate::file;
use crate::html;
use crate::progress::Progress;
use crate::routing;
use crate::store::Store;
use crate::widget::Widget;

#[derive(Debug, Parser)]
#[command(name = "sheet_tabs", version, about = "Render a published spreadsheet as an HTML table or tab widget")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch (or read) a CSV and write the widget as HTML
    Render(RenderArgs),
    /// Gym / language path helpers
    #[command(subcommand)]
    Route(RouteCommand),
}

#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Publish id (2PACX-...) or raw file id
    #[arg(long)]
    pub sheet: Option<String>,
    #[arg(long)]
    pub gid: Option<String>,
    /// Read a local CSV file instead of fetching
    #[arg(long, value_name = "FILE")]
    pub input: Option<PathBuf>,
    #[arg(long, value_enum)]
    pub widget: Option<WidgetKind>,
    /// Output file or directory (stdout when absent)
    #[arg(short, long)]
    pub out: Option<String>,
    /// Widget markup only, no page wrapper
    #[arg(long)]
    pub fragment: bool,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
    /// Use only the cached copy, never the network
    #[arg(long)]
    pub offline: bool,
    /// Store directory (prefs + cache)
    #[arg(long, value_name = "DIR")]
    pub store: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum RouteCommand {
    /// Put a two-letter code at the front of a path
    Switch {
        #[arg(long)]
        path: String,
        #[arg(long)]
        code: String,
    },
    /// Code from the path (remembered), else the remembered one
    Resolve {
        #[arg(long)]
        path: String,
        #[arg(long, default_value = GYM_KEY)]
        key: String,
        #[arg(long, value_name = "DIR")]
        store: Option<PathBuf>,
    },
    /// Link target for a gym button on the current page
    GymHref {
        #[arg(long)]
        target: String,
        #[arg(long)]
        path: String,
    },
}

impl RenderArgs {
    /// Flags win over the config file.
    pub fn apply(&self, o: &mut AppOptions) {
        if let Some(s) = &self.sheet { o.source.sheet_id = s.clone(); }
        if let Some(g) = &self.gid { o.source.gid = Some(g.clone()); }
        if let Some(w) = self.widget { o.render.widget = w; }
        if self.fragment { o.render.fragment = true; }
        if let Some(t) = &self.title { o.render.title = t.clone(); }
    }
}

fn store_at(dir: &Option<PathBuf>) -> Store {
    dir.as_ref().map(Store::new).unwrap_or_default()
}

/// Fetch status on stderr so stdout stays clean for the HTML.
struct StderrProgress;

impl Progress for StderrProgress {
    fn log(&mut self, msg: &str) { eprintln!("{msg}"); }
}

pub fn run() -> Result<()> {
    match Cli::parse().command {
        Command::Render(args) => render(args),
        Command::Route(cmd) => route(cmd),
    }
}

/* ---------------- render ---------------- */

/// CSV text for the configured source, or `None` when it cannot be had
/// (the page then shows the no-data state).
fn obtain_csv(args: &RenderArgs, options: &AppOptions, store: &Store) -> Result<Option<String>> {
    if let Some(path) = &args.input {
        let text = fs::read_to_string(path).wrap_err_with(|| format!("reading {}", path.display()))?;
        return Ok(Some(text));
    }

    let source = SheetSource::from(&options.source);
    if source.id().is_empty() {
        return Err(eyre!("nothing to render: pass --sheet, --input or a config with [source] sheet_id"));
    }

    if args.offline {
        let cached = store.load_csv(&source.cache_key());
        if cached.is_none() { eprintln!("No cached copy of {}", source.cache_key()); }
        return Ok(cached);
    }

    let transport = HttpTransport::new(&options.fetch)?;
    let result = if options.fetch.use_cache {
        fetch::load_with_cache(&transport, store, &source, &mut StderrProgress)
    } else {
        fetch::fetch_csv(&transport, &source, &mut StderrProgress)
    };

    match result {
        Ok(text) => Ok(Some(text)),
        Err(FetchError::AllFailed { attempts }) => {
            for e in &attempts { eprintln!("  {e}"); }
            eprintln!("Warning: could not fetch {}", source.cache_key());
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

pub fn render(args: RenderArgs) -> Result<()> {
    let mut options = AppOptions::load_or_default(args.config.as_deref())?;
    args.apply(&mut options);
    let store = store_at(&args.store);

    let mut widget = match obtain_csv(&args, &options, &store)? {
        Some(text) => Widget::from_csv(options.render.widget, &text),
        None => Widget::no_data(),
    };
    // A static page cannot build panes on demand.
    if let Widget::Tabs(tabs) = &mut widget { tabs.build_all(); }

    let body = html::render_widget(&widget);
    let output = if options.render.fragment { body } else { html::render_page(&options.render.title, &body) };

    match &args.out {
        None => print!("{output}"),
        Some(o) => {
            let path = file::resolve_single_out_path(o, DEFAULT_OUT_FILE)?;
            file::write_text(&path, &output).wrap_err_with(|| format!("writing {}", path.display()))?;
            logf!("CLI: wrote {} ({})", path.display(), widget.label());
            eprintln!("Wrote {}", path.display());
        }
    }
    Ok(())
}

/* ---------------- route ---------------- */

pub fn route(cmd: RouteCommand) -> Result<()> {
    match cmd {
        RouteCommand::Switch { path, code } => println!("{}", routing::switch_code(&path, &code)),
        RouteCommand::Resolve { path, key, store } => {
            match routing::resolve_code(&path, &store_at(&store), &key) {
                Some(code) => println!("{code}"),
                None => return Err(eyre!("no code in {path:?} and none stored under {key:?}")),
            }
        }
        RouteCommand::GymHref { target, path } => println!("{}", routing::gym_button_href(&target, &path)),
    }
    Ok(())
}

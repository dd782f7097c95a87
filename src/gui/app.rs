// src/gui/app.rs
use std::{
    error::Error,
    sync::{Arc, Mutex},
    thread,
};

use eframe::egui;

use crate::{
    config::state::AppState,
    core::net::HttpTransport,
    fetch::{self, FetchError, SheetSource},
    store::Store,
    widget::Widget,
};

use super::{components, lock, progress::GuiProgress};

pub fn run(options: eframe::NativeOptions, state: AppState) -> Result<(), Box<dyn Error>> {
    eframe::run_native(
        "Sheet Tabs",
        options,
        Box::new(move |cc| {
            let mut app = App::new(state);
            // Config already names a sheet: load it right away.
            if !app.state.gui.sheet_id_text.trim().is_empty() { app.load(&cc.egui_ctx); }
            Ok(Box::new(app))
        }),
    )?;
    Ok(())
}

/// Worker -> UI hand-off: filled once per load, taken by the next frame.
type FetchSlot = Arc<Mutex<Option<Result<String, FetchError>>>>;

pub struct App {
    // single source of truth (UI thread only)
    pub state: AppState,
    pub store: Store,

    // what the central panel shows; owns its own tab state
    pub widget: Widget,

    // status/progress (workers write here)
    pub status: Arc<Mutex<String>>,
    pub running: bool,

    inbox: FetchSlot,
}

impl App {
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            store: Store::default(),
            widget: Widget::no_data(),
            status: Arc::new(Mutex::new(s!("Enter a sheet id and press Load"))),
            running: false,
            inbox: Arc::new(Mutex::new(None)),
        }
    }

    /* ---------- tiny helpers ---------- */

    #[inline]
    pub fn set_status<T: Into<String>>(&self, msg: T) {
        *lock(&self.status) = msg.into();
    }

    fn ready_message(&self) -> String {
        match &self.widget {
            Widget::Table(layout) => format!("Ready: table, {} row(s)", layout.row_count()),
            Widget::Tabs(tabs) => format!("Ready: {} tab(s)", tabs.len()),
            Widget::NoData => s!("No data"),
        }
    }

    /* ---------- loading ---------- */

    /// Apply the source bar and fetch on a worker thread.
    pub fn load(&mut self, ctx: &egui::Context) {
        if self.running { return; }
        self.state.apply_gui_fields();

        let source = SheetSource::from(&self.state.options.source);
        if source.id().is_empty() {
            self.widget = Widget::no_data();
            self.set_status("Enter a sheet id first");
            return;
        }

        self.running = true;
        self.set_status(format!("Loading {}...", source.cache_key()));
        logf!("UI: Load {} as {}", source.cache_key(), self.state.options.render.widget.label());

        let fetch_opts = self.state.options.fetch.clone();
        let store = self.store.clone();
        let status = self.status.clone();
        let inbox = self.inbox.clone();
        let ctx2 = ctx.clone();

        thread::spawn(move || {
            let mut prog = GuiProgress::new(status);
            let result = HttpTransport::new(&fetch_opts).and_then(|transport| {
                if fetch_opts.use_cache {
                    fetch::load_with_cache(&transport, &store, &source, &mut prog)
                } else {
                    fetch::fetch_csv(&transport, &source, &mut prog)
                }
            });
            *lock(&inbox) = Some(result);
            ctx2.request_repaint();
        });
    }

    /// Parse + lay out on the UI thread once the worker is done.
    fn poll_worker(&mut self) {
        let Some(result) = lock(&self.inbox).take() else { return };
        self.running = false;

        match result {
            Ok(text) => {
                self.widget = Widget::from_csv(self.state.options.render.widget, &text);
                self.set_status(self.ready_message());
            }
            Err(e) => {
                loge!("UI: Load failed: {}", e);
                self.widget = Widget::no_data();
                self.set_status(format!("Error: {e}"));
            }
        }
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_worker();

        egui::TopBottomPanel::top("source_bar").show(ctx, |ui| {
            components::source_bar::draw(ui, self);
        });

        egui::TopBottomPanel::bottom("status_line").show(ctx, |ui| {
            let status = lock(&self.status).clone();
            ui.label(status);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            match &mut self.widget {
                Widget::Table(layout) => components::data_table::draw(ui, layout),
                Widget::Tabs(tabs) => {
                    components::tabs::draw(ui, tabs);
                    ui.separator();
                    match tabs.active_layout() {
                        Some(layout) => components::data_table::draw(ui, layout),
                        None => components::data_table::draw_no_data(ui),
                    }
                }
                Widget::NoData => components::data_table::draw_no_data(ui),
            }
        });
    }
}

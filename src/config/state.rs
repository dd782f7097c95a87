// src/config/state.rs
use super::options::{AppOptions, WidgetKind};

#[derive(Clone, Debug)]
pub struct GuiState {
    /// Text fields of the source bar (applied on Load)
    pub sheet_id_text: String,
    pub gid_text: String,
    pub widget: WidgetKind,

    pub window_w: u32,
    pub window_h: u32,
}

impl Default for GuiState {
    fn default() -> Self {
        Self {
            sheet_id_text: s!(),
            gid_text: s!(),
            widget: WidgetKind::Table,
            window_w: 1100,
            window_h: 700,
        }
    }
}

impl GuiState {
    /// Seed the text fields from loaded options.
    pub fn from_options(options: &AppOptions) -> Self {
        Self {
            sheet_id_text: options.source.sheet_id.clone(),
            gid_text: options.source.gid.clone().unwrap_or_default(),
            widget: options.render.widget,
            ..Self::default()
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct AppState {
    pub options: AppOptions,
    pub gui: GuiState,
}

impl AppState {
    pub fn new(options: AppOptions) -> Self {
        let gui = GuiState::from_options(&options);
        Self { options, gui }
    }

    /// Mirror the source bar text fields → options.source / options.render
    pub fn apply_gui_fields(&mut self) {
        self.options.source.sheet_id = s!(self.gui.sheet_id_text.trim());
        let gid = self.gui.gid_text.trim();
        self.options.source.gid = if gid.is_empty() { None } else { Some(s!(gid)) };
        self.options.render.widget = self.gui.widget;
    }
}

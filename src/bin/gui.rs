// src/bin/gui.rs
#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]
use eframe::egui::{IconData, ViewportBuilder};
use image::{Rgba, RgbaImage};

use sheet_tabs::config::{options::AppOptions, state::AppState};
use sheet_tabs::gui;

/// 32x32: dark header band over alternating row stripes.
fn app_icon() -> IconData {
    let rgba = RgbaImage::from_fn(32, 32, |_x, y| match y {
        0..=8 => Rgba([0x37, 0x41, 0x51, 0xFF]),
        _ if (y - 9) / 6 % 2 == 0 => Rgba([0xF3, 0xF4, 0xF6, 0xFF]),
        _ => Rgba([0x3B, 0x82, 0xF6, 0xFF]),
    });
    let (w, h) = rgba.dimensions();
    IconData { rgba: rgba.into_raw(), width: w, height: h }
}

fn main() {
    let _log = match sheet_tabs::log::init() {
        Ok(guard) => Some(guard),
        Err(e) => { eprintln!("Logging disabled: {e}"); None }
    };

    let options = AppOptions::load_or_default(None).unwrap_or_else(|e| {
        sheet_tabs::loge!("Config: {}", e);
        eprintln!("{e}");
        AppOptions::default()
    });
    let state = AppState::new(options);

    let native = eframe::NativeOptions {
        // eframe 0.32: icon set via viewport builder
        viewport: ViewportBuilder::default()
            .with_icon(app_icon())
            .with_inner_size([state.gui.window_w as f32, state.gui.window_h as f32]),
        ..Default::default()
    };

    if let Err(e) = gui::run(native, state) {
        eprintln!("GUI failed: {}", e);
        std::process::exit(1);
    }
}

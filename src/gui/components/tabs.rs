// src/gui/components/tabs.rs
//
// Tab bar for a tabbed widget. Clicks and ArrowLeft/ArrowRight/Home/End go
// straight to the widget's state machine; a pane is built on first show.

use eframe::egui;

use crate::tabs::{TabKey, TabWidget};

fn pressed_key(ctx: &egui::Context) -> Option<TabKey> {
    // Keys belong to the text fields while one is focused.
    if ctx.memory(|m| m.focused().is_some()) { return None; }
    ctx.input(|i| {
        if i.key_pressed(egui::Key::ArrowLeft) { Some(TabKey::ArrowLeft) }
        else if i.key_pressed(egui::Key::ArrowRight) { Some(TabKey::ArrowRight) }
        else if i.key_pressed(egui::Key::Home) { Some(TabKey::Home) }
        else if i.key_pressed(egui::Key::End) { Some(TabKey::End) }
        else { None }
    })
}

pub fn draw(ui: &mut egui::Ui, tabs: &mut TabWidget) {
    if let Some(key) = pressed_key(ui.ctx()) {
        tabs.apply_key(key);
        logd!("UI: Tab key {:?} -> {:?}", key, tabs.active());
    }

    let mut clicked = None;
    ui.horizontal_wrapped(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;

        for (idx, pane) in tabs.panes().iter().enumerate() {
            let selected = tabs.active() == Some(idx);
            if ui.selectable_label(selected, pane.label()).clicked() && !selected { clicked = Some(idx); }
        }
    });

    if let Some(idx) = clicked {
        logf!("UI: Tab switch {:?} -> {}", tabs.active(), idx);
        tabs.activate(idx);
    }
}

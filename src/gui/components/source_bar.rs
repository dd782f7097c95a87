// src/gui/components/source_bar.rs
//
// Sheet id + gid text fields, widget kind picker, Load button.
// Edits stay in GuiState until Load applies them to the options.

use eframe::egui;

use crate::config::options::WidgetKind;
use crate::gui::app::App;

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    let ctx = ui.ctx().clone();
    let mut submit = false;

    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;

        ui.label("Sheet id");
        let id_resp = ui.add(
            egui::TextEdit::singleline(&mut app.state.gui.sheet_id_text)
                .desired_width(340.0)
                .hint_text("2PACX-... or file id"),
        );

        ui.label("gid");
        let gid_resp = ui.add(
            egui::TextEdit::singleline(&mut app.state.gui.gid_text)
                .desired_width(90.0)
                .hint_text("optional"),
        );

        egui::ComboBox::from_id_salt("widget_kind")
            .selected_text(app.state.gui.widget.label())
            .show_ui(ui, |ui| {
                for kind in [WidgetKind::Table, WidgetKind::Tabs] {
                    ui.selectable_value(&mut app.state.gui.widget, kind, kind.label());
                }
            });

        let enter = ui.input(|i| i.key_pressed(egui::Key::Enter));
        if (id_resp.lost_focus() || gid_resp.lost_focus()) && enter { submit = true; }

        let label = if app.running { "Loading..." } else { "Load" };
        if ui.add_enabled(!app.running, egui::Button::new(label)).clicked() { submit = true; }
    });

    if submit { app.load(&ctx); }
}

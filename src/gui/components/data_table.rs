// src/gui/components/data_table.rs
//
// Draws one TableLayout. Each row is a horizontal strip whose cell widths
// are `col_span / column_count` of the table width, so wide cells line up
// with the columns they cover. Rows differ in height (font tokens), so the
// visible slice is found from running offsets rather than `show_rows`.

use std::ops::Range;

use eframe::egui::{self, Align, Color32, Direction, Layout, RichText};
use egui_extras::{Size, StripBuilder};

use crate::config::consts::NO_DATA_MESSAGE;
use crate::format::{Alignment, TextColor};
use crate::table::{FormattedCell, Header, TableLayout};

const ROW_H: f32 = 26.0;
const ROW_PAD: f32 = 10.0;

const HEADER_FILL: Color32 = Color32::from_rgb(0x37, 0x41, 0x51);
const BODY_FILL: Color32 = Color32::WHITE;
const STRIPE_FILL: Color32 = Color32::from_rgb(0xF3, 0xF4, 0xF6);
const BUTTON_FILL: Color32 = Color32::from_rgb(0x3B, 0x82, 0xF6);

fn color32(c: TextColor) -> Color32 {
    match c {
        TextColor::White => Color32::WHITE,
        TextColor::Black => Color32::BLACK,
        TextColor::Red => Color32::from_rgb(0xEF, 0x44, 0x44),
        TextColor::Green => Color32::from_rgb(0x22, 0xC5, 0x5E),
        TextColor::Blue => BUTTON_FILL,
    }
}

fn layout_for(a: Alignment) -> Layout {
    match a {
        Alignment::Left => Layout::left_to_right(Align::Center),
        Alignment::Right => Layout::right_to_left(Align::Center),
        Alignment::Center => Layout::centered_and_justified(Direction::LeftToRight),
    }
}

fn rich(text: &str, color: TextColor, font_size: Option<u32>) -> RichText {
    let rt = RichText::new(text).color(color32(color));
    match font_size {
        Some(px) => rt.size(px as f32),
        None => rt,
    }
}

/// Tallest font in the row decides its height.
fn row_height(sizes: impl Iterator<Item = Option<u32>>) -> f32 {
    sizes.flatten().max().map_or(ROW_H, |px| (px as f32 + ROW_PAD).max(ROW_H))
}

fn with_spans<'a>(mut builder: StripBuilder<'a>, spans: &[usize], ncols: usize) -> StripBuilder<'a> {
    for &span in spans {
        builder = builder.size(Size::relative(span as f32 / ncols as f32));
    }
    builder
}

fn header_cell(ui: &mut egui::Ui, h: &Header) {
    ui.painter().rect_filled(ui.max_rect(), 0.0, HEADER_FILL);
    ui.with_layout(layout_for(h.alignment), |ui| {
        ui.add(egui::Label::new(rich(&h.text, h.color, h.font_size).strong()).selectable(false));
    });
}

fn body_cell(ui: &mut egui::Ui, c: &FormattedCell, striped: bool) {
    ui.painter().rect_filled(ui.max_rect(), 0.0, if striped { STRIPE_FILL } else { BODY_FILL });
    ui.with_layout(layout_for(c.alignment), |ui| {
        match &c.button {
            Some(b) => {
                let text = rich(&b.label, TextColor::White, c.font_size).strong();
                let resp = ui.add(egui::Button::new(text).fill(BUTTON_FILL)).on_hover_text(b.url.as_str());
                if resp.clicked() {
                    logf!("UI: Open {}", b.url);
                    ui.ctx().open_url(egui::OpenUrl::new_tab(&b.url));
                }
            }
            None => {
                ui.label(rich(&c.text, c.color, c.font_size));
            }
        }
    });
}

/// Running top offsets: `offsets[i]..offsets[i + 1]` is row `i`.
fn row_offsets(heights: impl Iterator<Item = f32>) -> Vec<f32> {
    let mut offsets = vec![0.0];
    let mut y = 0.0;
    for h in heights {
        y += h;
        offsets.push(y);
    }
    offsets
}

/// Rows that overlap `top..bottom` (content coordinates).
fn visible_rows(offsets: &[f32], top: f32, bottom: f32) -> Range<usize> {
    let n = offsets.len().saturating_sub(1);
    let first = offsets[1..].partition_point(|&end| end <= top).min(n);
    let last = offsets[..n].partition_point(|&start| start < bottom).max(first);
    first..last
}

fn header_strip(ui: &mut egui::Ui, layout: &TableLayout, ncols: usize) {
    let height = row_height(layout.headers.iter().map(|h| h.font_size));
    let spans = vec![1; layout.headers.len()];
    StripBuilder::new(ui).size(Size::exact(height)).vertical(|mut strip| {
        strip.strip(|builder| {
            with_spans(builder, &spans, ncols).horizontal(|mut cells| {
                for h in &layout.headers { cells.cell(|ui| header_cell(ui, h)); }
            });
        });
    });
}

/// Header stays put; only body rows inside the viewport are laid out.
pub fn draw(ui: &mut egui::Ui, layout: &TableLayout) {
    let ncols = layout.column_count().max(1);
    if layout.show_header { header_strip(ui, layout, ncols); }

    let offsets = row_offsets(
        layout.body_rows.iter().map(|row| row_height(row.cells.iter().map(|c| c.font_size))),
    );
    let total = offsets.last().copied().unwrap_or(0.0);

    egui::ScrollArea::vertical()
        .id_salt("sheet_table")
        .auto_shrink([false, false])
        .show_viewport(ui, |ui, viewport| {
            ui.set_height(total);
            let rows = visible_rows(&offsets, viewport.min.y, viewport.max.y);
            if rows.is_empty() { return; }

            let top = ui.max_rect().top();
            let rect = egui::Rect::from_x_y_ranges(
                ui.max_rect().x_range(),
                top + offsets[rows.start]..=top + offsets[rows.end],
            );
            let heights: Vec<f32> = rows.clone().map(|i| offsets[i + 1] - offsets[i]).collect();
            let visible = &layout.body_rows[rows];

            ui.scope_builder(egui::UiBuilder::new().max_rect(rect), |ui| {
                // offsets assume rows touch
                ui.spacing_mut().item_spacing.y = 0.0;
                let mut outer = StripBuilder::new(ui);
                for &h in &heights { outer = outer.size(Size::exact(h)); }

                outer.vertical(|mut strip| {
                    for row in visible {
                        let spans: Vec<usize> = row.cells.iter().map(|c| c.col_span).collect();
                        strip.strip(|builder| {
                            with_spans(builder, &spans, ncols).horizontal(|mut cells| {
                                for c in &row.cells { cells.cell(|ui| body_cell(ui, c, row.striped)); }
                            });
                        });
                    }
                });
            });
        });
}

pub fn draw_no_data(ui: &mut egui::Ui) {
    ui.centered_and_justified(|ui| {
        ui.label(RichText::new(NO_DATA_MESSAGE).italics());
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_height_follows_largest_font() {
        assert_eq!(row_height([None, None].into_iter()), ROW_H);
        assert_eq!(row_height([Some(8), None].into_iter()), ROW_H);
        assert_eq!(row_height([Some(20), Some(48)].into_iter()), 48.0 + ROW_PAD);
    }

    #[test]
    fn only_overlapping_rows_are_visible() {
        let offsets = row_offsets([10.0, 20.0, 10.0, 30.0].into_iter());
        assert_eq!(offsets, vec![0.0, 10.0, 30.0, 40.0, 70.0]);

        assert_eq!(visible_rows(&offsets, 0.0, 10.0), 0..1);
        assert_eq!(visible_rows(&offsets, 15.0, 35.0), 1..3);
        assert_eq!(visible_rows(&offsets, 40.0, 500.0), 3..4);
        assert_eq!(visible_rows(&offsets, 80.0, 90.0), 4..4);
    }

    #[test]
    fn no_rows_nothing_visible() {
        assert!(visible_rows(&row_offsets(std::iter::empty()), 0.0, 100.0).is_empty());
    }
}

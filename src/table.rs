// src/table.rs
//! TableLayout: a fully laid-out table, ready for a host to draw.
//!
//! - Headers are token-parsed once per table (default color white).
//! - Body cells inherit alignment + font size from their header, default
//!   color black, and may widen over following empty cells with `{W}`.
//! - Odd body rows are striped.

use crate::data::{Column, Row, Sheet};
use crate::format::{Alignment, Button, CellDefaults, TextColor, parse_tokens};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Header {
    pub column: Column,
    /// Token-stripped header text
    pub text: String,
    pub alignment: Alignment,
    pub color: TextColor,
    pub font_size: Option<u32>,
}

impl Header {
    pub fn from_column(column: &Column) -> Self {
        let fmt = parse_tokens(&column.text, CellDefaults::HEADER);
        // Headers have no buttons; a `{B}label>url` header shows its label.
        let text = match fmt.button {
            Some(b) => b.label,
            None => fmt.text,
        };
        Self {
            column: column.clone(),
            text,
            alignment: fmt.alignment,
            color: fmt.color,
            font_size: fmt.font_size,
        }
    }

    pub fn is_blank(&self) -> bool { self.text.trim().is_empty() }

    fn cell_defaults(&self) -> CellDefaults {
        CellDefaults { font_size: self.font_size, alignment: self.alignment, ..CellDefaults::BODY }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormattedCell {
    pub text: String,
    pub alignment: Alignment,
    pub color: TextColor,
    pub font_size: Option<u32>,
    /// Columns covered, >= 1
    pub col_span: usize,
    pub button: Option<Button>,
}

impl FormattedCell {
    pub fn is_button(&self) -> bool { self.button.is_some() }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BodyRow {
    pub striped: bool,
    pub cells: Vec<FormattedCell>,
}

impl BodyRow {
    /// Total columns covered by this row's cells.
    pub fn span(&self) -> usize { self.cells.iter().map(|c| c.col_span).sum() }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TableLayout {
    pub headers: Vec<Header>,
    /// False when every header is blank; hosts then draw no header section
    pub show_header: bool,
    pub body_rows: Vec<BodyRow>,
}

impl TableLayout {
    pub fn column_count(&self) -> usize { self.headers.len() }
    pub fn row_count(&self) -> usize { self.body_rows.len() }
    pub fn is_empty(&self) -> bool { self.headers.is_empty() && self.body_rows.is_empty() }
}

/* ---------------- Builder ---------------- */

/// Stateless layout builder. Kept as a type so pane builders and hosts
/// can hold one and swap it in tests.
#[derive(Clone, Copy, Debug, Default)]
pub struct TableBuilder;

impl TableBuilder {
    pub fn build(&self, sheet: &Sheet) -> TableLayout {
        let headers: Vec<Header> = sheet.columns().iter().map(Header::from_column).collect();
        let show_header = !headers.iter().all(Header::is_blank);

        let body_rows = sheet.rows()
            .iter()
            .enumerate()
            .map(|(i, row)| BodyRow { striped: is_striped(i), cells: layout_row(&headers, row) })
            .collect();

        let layout = TableLayout { headers, show_header, body_rows };
        logd!(
            "Table: {} header(s), {} row(s), header shown: {}",
            layout.column_count(), layout.row_count(), layout.show_header
        );
        layout
    }
}

/// Convenience for `TableBuilder.build(sheet)`.
pub fn build(sheet: &Sheet) -> TableLayout {
    TableBuilder.build(sheet)
}

/// Zebra striping: odd rows.
pub fn is_striped(row_index: usize) -> bool { row_index % 2 == 1 }

fn layout_row(headers: &[Header], row: &Row) -> Vec<FormattedCell> {
    let mut cells = Vec::with_capacity(headers.len());
    let mut skip = 0usize;

    for (pos, header) in headers.iter().enumerate() {
        if skip > 0 { skip -= 1; continue; }

        let fmt = parse_tokens(row.get(pos), header.cell_defaults());
        let mut col_span = 1;
        if fmt.wide {
            // Greedy: swallow following empty raw values, same row only.
            let mut next = pos + 1;
            while next < headers.len() && row.get(next).is_empty() {
                col_span += 1;
                skip += 1;
                next += 1;
            }
        }

        cells.push(FormattedCell {
            text: fmt.text,
            alignment: fmt.alignment,
            color: fmt.color,
            font_size: fmt.font_size,
            col_span,
            button: fmt.button,
        });
    }
    cells
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::csv;

    #[test]
    fn button_token_in_header_keeps_its_label() {
        let layout = build(&csv::parse("{L}{B}Buy>x.com,Price\na,1\n"));
        assert_eq!(layout.headers[0].text, "Buy");
        assert_eq!(layout.headers[0].alignment, Alignment::Left);
        assert!(layout.show_header);
        assert!(layout.body_rows[0].cells[0].button.is_none());
    }

    #[test]
    fn wide_cell_spans_following_empties() {
        let layout = build(&csv::parse("A,B,C\n{W}Spanner,,\n"));
        let row = &layout.body_rows[0];
        assert_eq!(row.cells.len(), 1);
        assert_eq!(row.cells[0].text, "Spanner");
        assert_eq!(row.cells[0].col_span, 3);
    }

    #[test]
    fn wide_cell_stops_at_first_value() {
        let layout = build(&csv::parse("A,B,C,D\n{W}x,,y,\n"));
        let row = &layout.body_rows[0];
        let spans: Vec<usize> = row.cells.iter().map(|c| c.col_span).collect();
        assert_eq!(spans, vec![2, 1, 1]);
        assert_eq!(row.span(), 4);
    }

    #[test]
    fn empty_without_wide_token_is_its_own_cell() {
        let layout = build(&csv::parse("A,B\nx,\n"));
        assert_eq!(layout.body_rows[0].cells.len(), 2);
        assert_eq!(layout.body_rows[0].cells[1].text, "");
    }

    #[test]
    fn short_rows_count_as_absent_for_spans() {
        let layout = build(&csv::parse("A,B,C\n{W}only\n"));
        assert_eq!(layout.body_rows[0].cells[0].col_span, 3);
    }

    #[test]
    fn wide_on_last_column_spans_one() {
        let layout = build(&csv::parse("A,B\nx,{W}y\n"));
        let spans: Vec<usize> = layout.body_rows[0].cells.iter().map(|c| c.col_span).collect();
        assert_eq!(spans, vec![1, 1]);
    }

    #[test]
    fn cells_inherit_header_alignment_and_size_but_not_color() {
        let layout = build(&csv::parse("{R}{g}{f14}Price\n9.99\n{L}{b}1.00\n"));
        let h = &layout.headers[0];
        assert_eq!(h.text, "Price");
        assert_eq!(h.color, TextColor::Green);

        let first = &layout.body_rows[0].cells[0];
        assert_eq!(first.alignment, Alignment::Right);
        assert_eq!(first.font_size, Some(14));
        assert_eq!(first.color, TextColor::Black);

        let second = &layout.body_rows[1].cells[0];
        assert_eq!(second.alignment, Alignment::Left);
        assert_eq!(second.color, TextColor::Blue);
    }

    #[test]
    fn all_blank_headers_hide_header_section() {
        let layout = build(&csv::parse(" ,{C}\n1,2\n"));
        assert!(!layout.show_header);
        assert_eq!(layout.row_count(), 1);
        assert_eq!(layout.body_rows[0].cells.len(), 2);
    }

    #[test]
    fn odd_rows_are_striped() {
        let layout = build(&csv::parse("A\n0\n1\n2\n3\n"));
        let striped: Vec<bool> = layout.body_rows.iter().map(|r| r.striped).collect();
        assert_eq!(striped, vec![false, true, false, true]);
    }

    #[test]
    fn degenerate_inputs_give_valid_layouts() {
        let empty = build(&csv::parse(""));
        assert!(empty.is_empty());
        assert!(!empty.show_header);

        let headers_only = build(&csv::parse("A,B\n"));
        assert_eq!(headers_only.column_count(), 2);
        assert_eq!(headers_only.row_count(), 0);
        assert!(headers_only.show_header);
    }

    #[test]
    fn button_cells_carry_url() {
        let layout = build(&csv::parse("Link\n{B}Go>example.com\n"));
        let cell = &layout.body_rows[0].cells[0];
        assert!(cell.is_button());
        assert_eq!(cell.button.as_ref().unwrap().url, "https://example.com");
    }
}

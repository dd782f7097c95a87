// src/csv.rs
use std::io::{self, Write};
use std::mem::take;

use crate::data::Sheet;

/* ---------------- Parsing ---------------- */

/// Quote-aware CSV scanner (RFC-4180 quoting, CRLF tolerant).
///
/// Single left-to-right pass with an `in_quotes` flag:
/// - unquoted `sep` ends a field, unquoted newline ends a row
/// - inside quotes `""` is a literal quote, a lone `"` closes the quote,
///   everything else (separators and newlines included) is literal
/// - an unterminated quote is closed by end of input
///
/// `\r\n` and a lone `\r` both count as a newline, inside quotes too.
/// Only a trailing single empty field (text ending in a newline) is dropped.
pub fn parse_rows(text: &str, sep: char) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let mut field = s!();
    let mut row = Vec::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' => {
                if in_quotes {
                    if matches!(chars.peek(), Some('"')) {
                        chars.next(); // double-quote escape
                        field.push('"');
                    } else {
                        in_quotes = false;
                    }
                } else {
                    in_quotes = true;
                }
            }
            '\r' => {
                if matches!(chars.peek(), Some('\n')) { chars.next(); }
                if in_quotes {
                    field.push('\n');
                } else {
                    row.push(take(&mut field));
                    rows.push(take(&mut row));
                }
            }
            '\n' if !in_quotes => {
                row.push(take(&mut field));
                rows.push(take(&mut row));
            }
            c if c == sep && !in_quotes => {
                // move the field without cloning
                row.push(take(&mut field));
            }
            _ => field.push(ch),
        }
    }

    // Flush the trailing field/row even if quotes were unterminated,
    // unless the input simply ended with a newline.
    row.push(field);
    if !(row.len() == 1 && row[0].is_empty()) {
        rows.push(row);
    }

    rows
}

/// Parse comma-separated text into a `Sheet`: first row = column headers,
/// the rest = data rows. Never fails; empty input gives an empty sheet.
pub fn parse(text: &str) -> Sheet {
    let rows = parse_rows(text, ',');
    let sheet = Sheet::from_rows(rows);
    logd!("CSV: parsed {} column(s), {} row(s)", sheet.column_count(), sheet.row_count());
    sheet
}

/* ---------------- Writing ---------------- */

fn needs_quotes(field: &str, sep: char) -> bool {
    field.contains(sep) || field.contains('"') || field.contains('\n') || field.contains('\r')
}

/// Write a single CSV/TSV row to any writer.
pub fn write_row<W: Write>(mut w: W, row: &[String], sep: char) -> io::Result<()> {
    let mut first = true;
    for cell in row {
        if !first { write!(w, "{}", sep)?; } else { first = false; }
        if needs_quotes(cell, sep) {
            let escaped = cell.replace('"', "\"\"");
            write!(w, "\"{}\"", escaped)?;
        } else {
            write!(w, "{}", cell)?;
        }
    }
    writeln!(w)
}

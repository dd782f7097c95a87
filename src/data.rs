// src/data.rs
//
// Parsed sheet data.
//
// - Column: original header text + original column position. Two columns with
//           the same text stay distinct through `index`; no key mangling.
// - Row:    cell values in column order (positions follow the owning sheet's
//           column list, not `Column::index`).
// - Sheet:  column list + rows. Every row is padded/truncated to the column
//           count at construction, so lookups never fail.

/// One column of a sheet, as it appeared in the header row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Column {
    /// Raw header text, tokens included
    pub text: String,
    /// Position in the original CSV header row
    pub index: usize,
}

impl Column {
    pub fn new<S: Into<String>>(text: S, index: usize) -> Self {
        Self { text: text.into(), index }
    }

    /// `text_index`, unique even when two headers share a text.
    pub fn qualified_key(&self) -> String {
        format!("{}_{}", self.text, self.index)
    }
}

/// One data row. Immutable once the sheet is built.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Row {
    cells: Vec<String>,
}

impl Row {
    pub fn new(cells: Vec<String>) -> Self { Self { cells } }

    pub fn cells(&self) -> &[String] { &self.cells }

    /// Cell at `pos`, or "" past the end.
    pub fn get(&self, pos: usize) -> &str {
        self.cells.get(pos).map(String::as_str).unwrap_or("")
    }

    /// Copy of the row with the cell at `pos` removed.
    pub fn without(&self, pos: usize) -> Row {
        let cells = self.cells.iter()
            .enumerate()
            .filter(|(i, _)| *i != pos)
            .map(|(_, c)| c.clone())
            .collect();
        Row { cells }
    }
}

/// Header columns + data rows.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Sheet {
    columns: Vec<Column>,
    rows: Vec<Row>,
}

impl Sheet {
    /// Build from explicit columns; rows are fitted to the column count
    /// (short rows padded with "", extra cells dropped).
    pub fn new(columns: Vec<Column>, rows: Vec<Row>) -> Self {
        let width = columns.len();
        let rows = rows.into_iter()
            .map(|mut r| { r.cells.resize(width, s!()); r })
            .collect();
        Self { columns, rows }
    }

    /// First raw row = headers, remaining raw rows = data.
    pub fn from_rows(mut raw: Vec<Vec<String>>) -> Self {
        if raw.is_empty() { return Self::default(); }
        let header = raw.remove(0);
        let columns = header.into_iter()
            .enumerate()
            .map(|(i, text)| Column::new(text, i))
            .collect();
        Self::new(columns, raw.into_iter().map(Row::new).collect())
    }

    pub fn columns(&self) -> &[Column] { &self.columns }
    pub fn rows(&self) -> &[Row] { &self.rows }

    pub fn column_count(&self) -> usize { self.columns.len() }
    pub fn row_count(&self) -> usize { self.rows.len() }

    /// No columns and no rows.
    pub fn is_empty(&self) -> bool { self.columns.is_empty() && self.rows.is_empty() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ragged_rows_are_fitted() {
        let sheet = Sheet::from_rows(vec![
            row!["A", "B", "C"],
            row!["1"],
            row!["1", "2", "3", "4"],
        ]);
        assert_eq!(sheet.rows()[0].cells(), &row!["1", "", ""][..]);
        assert_eq!(sheet.rows()[1].cells(), &row!["1", "2", "3"][..]);
        assert_eq!(sheet.rows()[0].get(2), "");
        assert_eq!(sheet.rows()[1].get(9), "");
    }

    #[test]
    fn duplicate_header_texts_stay_distinct() {
        let sheet = Sheet::from_rows(vec![row!["Name", "Name"]]);
        let keys: Vec<String> = sheet.columns().iter().map(Column::qualified_key).collect();
        assert_eq!(keys, vec!["Name_0", "Name_1"]);
        assert_eq!(sheet.row_count(), 0);
    }

    #[test]
    fn without_drops_one_cell() {
        let r = Row::new(row!["x", "1", "2"]);
        assert_eq!(r.without(0).cells(), &row!["1", "2"][..]);
    }
}

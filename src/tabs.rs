// src/tabs.rs
//! Tabbed widget: bucketize rows by their first column, then build one
//! table pane per bucket lazily, the first time its tab is activated.
//!
//! Pane states: `Unbuilt -> Built(hidden) <-> Built(visible)`.
//! A built pane never goes back to `Unbuilt`, and at most one pane is
//! visible at a time (exactly one once any tab has been activated).

use std::collections::HashMap;

use crate::config::consts::BLANK_TAB_LABEL;
use crate::data::{Row, Sheet};
use crate::table::{TableBuilder, TableLayout};

/* ---------------- Buckets ---------------- */

/// Rows sharing one first-column value, with that column removed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bucket {
    /// Raw first-column value (tokens not stripped)
    pub name: String,
    pub sheet: Sheet,
}

/// Buckets in first-seen order, with lookup by name.
#[derive(Clone, Debug, Default)]
pub struct Buckets {
    items: Vec<Bucket>,
    by_name: HashMap<String, usize>,
}

impl Buckets {
    pub fn len(&self) -> usize { self.items.len() }
    pub fn is_empty(&self) -> bool { self.items.is_empty() }
    pub fn get(&self, index: usize) -> Option<&Bucket> { self.items.get(index) }
    pub fn iter(&self) -> impl Iterator<Item = &Bucket> { self.items.iter() }

    pub fn by_name(&self, name: &str) -> Option<&Bucket> {
        self.by_name.get(name).and_then(|&i| self.items.get(i))
    }

    pub fn names(&self) -> Vec<&str> {
        self.items.iter().map(|b| b.name.as_str()).collect()
    }
}

/// Partition rows by the raw value of the first column.
///
/// Each bucket keeps `columns[1..]` with their original indices. A blank
/// category is a bucket like any other. No columns or no rows -> no buckets.
pub fn bucketize(sheet: &Sheet) -> Buckets {
    let mut buckets = Buckets::default();
    if sheet.column_count() == 0 { return buckets; }

    let columns = sheet.columns()[1..].to_vec();
    let mut grouped: Vec<Vec<Row>> = Vec::new();

    for row in sheet.rows() {
        let name = row.get(0);
        let slot = match buckets.by_name.get(name) {
            Some(&i) => i,
            None => {
                let i = buckets.items.len();
                buckets.by_name.insert(s!(name), i);
                buckets.items.push(Bucket { name: s!(name), sheet: Sheet::default() });
                grouped.push(Vec::new());
                i
            }
        };
        grouped[slot].push(row.without(0));
    }

    for (bucket, rows) in buckets.items.iter_mut().zip(grouped) {
        bucket.sheet = Sheet::new(columns.clone(), rows);
    }

    logd!("Tabs: {} bucket(s) from {} row(s)", buckets.len(), sheet.row_count());
    buckets
}

/* ---------------- Panes ---------------- */

#[derive(Clone, Debug, PartialEq, Eq)]
enum PaneState {
    Unbuilt,
    Built { layout: TableLayout, visible: bool },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TabPane {
    name: String,
    state: PaneState,
}

impl TabPane {
    fn new(name: &str) -> Self { Self { name: s!(name), state: PaneState::Unbuilt } }

    pub fn name(&self) -> &str { &self.name }

    /// Text for the tab itself; a blank category gets a placeholder.
    pub fn label(&self) -> &str {
        if self.name.trim().is_empty() { BLANK_TAB_LABEL } else { &self.name }
    }

    pub fn is_built(&self) -> bool { matches!(self.state, PaneState::Built { .. }) }
    pub fn is_visible(&self) -> bool { matches!(self.state, PaneState::Built { visible: true, .. }) }

    pub fn layout(&self) -> Option<&TableLayout> {
        match &self.state {
            PaneState::Built { layout, .. } => Some(layout),
            PaneState::Unbuilt => None,
        }
    }

    fn set_visible(&mut self, on: bool) {
        if let PaneState::Built { visible, .. } = &mut self.state { *visible = on; }
    }
}

/// Builds the table for one bucket. Called at most once per pane.
pub trait PaneBuilder {
    fn build_pane(&mut self, bucket: &Bucket) -> TableLayout;
}

impl PaneBuilder for TableBuilder {
    fn build_pane(&mut self, bucket: &Bucket) -> TableLayout {
        self.build(&bucket.sheet)
    }
}

/// Tab bar keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TabKey {
    ArrowLeft,
    ArrowRight,
    Home,
    End,
}

/* ---------------- Widget ---------------- */

/// One tab widget instance: its buckets, panes and the active index.
#[derive(Clone, Debug)]
pub struct TabWidget<B = TableBuilder> {
    buckets: Buckets,
    panes: Vec<TabPane>,
    active: Option<usize>,
    builder: B,
}

impl TabWidget<TableBuilder> {
    pub fn new(buckets: Buckets) -> Self { Self::with_builder(buckets, TableBuilder) }

    pub fn from_sheet(sheet: &Sheet) -> Self { Self::new(bucketize(sheet)) }
}

impl<B: PaneBuilder> TabWidget<B> {
    /// Create one unbuilt pane per bucket, then activate tab 0 if any.
    pub fn with_builder(buckets: Buckets, builder: B) -> Self {
        let panes = buckets.iter().map(|b| TabPane::new(&b.name)).collect();
        let mut widget = Self { buckets, panes, active: None, builder };
        widget.activate(0);
        widget
    }

    pub fn len(&self) -> usize { self.panes.len() }
    pub fn is_empty(&self) -> bool { self.panes.is_empty() }
    pub fn panes(&self) -> &[TabPane] { &self.panes }
    pub fn pane(&self, index: usize) -> Option<&TabPane> { self.panes.get(index) }
    pub fn buckets(&self) -> &Buckets { &self.buckets }
    pub fn builder(&self) -> &B { &self.builder }
    pub fn active(&self) -> Option<usize> { self.active }

    pub fn active_layout(&self) -> Option<&TableLayout> {
        self.active.and_then(|i| self.panes.get(i)).and_then(TabPane::layout)
    }

    pub fn built_count(&self) -> usize { self.panes.iter().filter(|p| p.is_built()).count() }

    /// Show the pane at `index`, building it first if needed.
    /// Out of range: nothing changes, returns `None`.
    pub fn activate(&mut self, index: usize) -> Option<&TableLayout> {
        if index >= self.panes.len() { return None; }

        if !self.panes[index].is_built() {
            let layout = self.builder.build_pane(&self.buckets.items[index]);
            logd!("Tabs: built pane {} ({:?})", index, self.panes[index].name);
            self.panes[index].state = PaneState::Built { layout, visible: false };
        }

        for (i, pane) in self.panes.iter_mut().enumerate() {
            pane.set_visible(i == index);
        }
        self.active = Some(index);
        self.panes[index].layout()
    }

    pub fn activate_next(&mut self) -> Option<&TableLayout> {
        let n = self.panes.len();
        if n == 0 { return None; }
        let next = self.active.map_or(0, |i| (i + 1) % n);
        self.activate(next)
    }

    pub fn activate_prev(&mut self) -> Option<&TableLayout> {
        let n = self.panes.len();
        if n == 0 { return None; }
        let prev = self.active.map_or(n - 1, |i| (i + n - 1) % n);
        self.activate(prev)
    }

    pub fn activate_first(&mut self) -> Option<&TableLayout> { self.activate(0) }

    pub fn activate_last(&mut self) -> Option<&TableLayout> {
        let last = self.panes.len().checked_sub(1)?;
        self.activate(last)
    }

    pub fn apply_key(&mut self, key: TabKey) -> Option<&TableLayout> {
        match key {
            TabKey::ArrowLeft => self.activate_prev(),
            TabKey::ArrowRight => self.activate_next(),
            TabKey::Home => self.activate_first(),
            TabKey::End => self.activate_last(),
        }
    }

    /// Build every unbuilt pane (hidden). The visible pane does not change.
    pub fn build_all(&mut self) {
        for (i, pane) in self.panes.iter_mut().enumerate() {
            if pane.is_built() { continue; }
            let layout = self.builder.build_pane(&self.buckets.items[i]);
            pane.state = PaneState::Built { layout, visible: false };
        }
    }
}

// src/widget.rs
//! CSV text -> `Widget`, the value every host renders.

use crate::config::options::WidgetKind;
use crate::csv;
use crate::table::{TableBuilder, TableLayout};
use crate::tabs::TabWidget;

#[derive(Clone, Debug)]
pub enum Widget {
    Table(TableLayout),
    Tabs(TabWidget),
    /// Placeholder when no CSV could be obtained
    NoData,
}

impl Widget {
    /// Parse and lay out. Never fails; an empty dataset gives a degenerate
    /// table or a tab widget with zero panes.
    pub fn from_csv(kind: WidgetKind, text: &str) -> Self {
        let sheet = csv::parse(text);
        let widget = match kind {
            WidgetKind::Table => Widget::Table(TableBuilder.build(&sheet)),
            WidgetKind::Tabs => Widget::Tabs(TabWidget::from_sheet(&sheet)),
        };
        logf!("Widget: {} ({} column(s), {} row(s))", widget.label(), sheet.column_count(), sheet.row_count());
        widget
    }

    pub fn no_data() -> Self { Widget::NoData }

    pub fn is_no_data(&self) -> bool { matches!(self, Widget::NoData) }

    pub fn label(&self) -> &'static str {
        match self {
            Widget::Table(_) => WidgetKind::Table.label(),
            Widget::Tabs(_) => WidgetKind::Tabs.label(),
            Widget::NoData => "No data",
        }
    }

    /// Table currently on screen: the table itself or the active pane.
    pub fn current_layout(&self) -> Option<&TableLayout> {
        match self {
            Widget::Table(layout) => Some(layout),
            Widget::Tabs(tabs) => tabs.active_layout(),
            Widget::NoData => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_selects_widget() {
        let text = "Cat,X\nA,1\nB,2\n";
        assert!(matches!(Widget::from_csv(WidgetKind::Table, text), Widget::Table(_)));

        let Widget::Tabs(tabs) = Widget::from_csv(WidgetKind::Tabs, text) else {
            panic!("expected tabs");
        };
        assert_eq!(tabs.len(), 2);
        assert_eq!(tabs.built_count(), 1);
    }

    #[test]
    fn empty_text_is_degenerate_not_no_data() {
        let table = Widget::from_csv(WidgetKind::Table, "");
        assert!(!table.is_no_data());
        assert!(table.current_layout().unwrap().is_empty());

        let Widget::Tabs(tabs) = Widget::from_csv(WidgetKind::Tabs, "") else {
            panic!("expected tabs");
        };
        assert!(tabs.is_empty());
    }

    #[test]
    fn each_widget_owns_its_state() {
        let text = "Cat,X\nA,1\nB,2\n";
        let Widget::Tabs(mut first) = Widget::from_csv(WidgetKind::Tabs, text) else { panic!() };
        let Widget::Tabs(second) = Widget::from_csv(WidgetKind::Tabs, text) else { panic!() };
        first.activate(1);
        assert_eq!(first.active(), Some(1));
        assert_eq!(second.active(), Some(0));
    }

    #[test]
    fn no_data_has_no_layout() {
        assert!(Widget::no_data().current_layout().is_none());
    }
}

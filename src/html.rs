// src/html.rs
// HTML host: turns laid-out widgets into markup.
// Semantic class names only (`align-*`, `color-*`, `striped`); no styling.
// All text goes through `escape_html`, attribute values through `escape_attr`.

use crate::config::consts::NO_DATA_MESSAGE;
use crate::core::sanitize::{escape_attr, escape_html};
use crate::format::{Alignment, TextColor};
use crate::table::{BodyRow, FormattedCell, Header, TableLayout};
use crate::tabs::{PaneBuilder, TabWidget};
use crate::widget::Widget;

/* ---------------- Tables ---------------- */

fn class_attr(alignment: Alignment, color: TextColor) -> String {
    format!(" class=\"align-{} color-{}\"", alignment.as_str(), color.as_str())
}

fn font_attr(font_size: Option<u32>) -> String {
    font_size.map(|px| format!(" style=\"font-size:{px}px\"")).unwrap_or_default()
}

fn header_html(h: &Header) -> String {
    format!(
        "<th{}{}>{}</th>",
        class_attr(h.alignment, h.color),
        font_attr(h.font_size),
        escape_html(&h.text)
    )
}

fn cell_html(c: &FormattedCell) -> String {
    let span = if c.col_span > 1 { format!(" colspan=\"{}\"", c.col_span) } else { s!() };
    let inner = match &c.button {
        Some(b) => format!(
            "<a class=\"button\" role=\"button\" href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">{}</a>",
            escape_attr(&b.url),
            escape_html(&b.label)
        ),
        None => escape_html(&c.text),
    };
    format!("<td{}{}{}>{}</td>", class_attr(c.alignment, c.color), span, font_attr(c.font_size), inner)
}

fn row_html(row: &BodyRow) -> String {
    let mut out = s!(if row.striped { "<tr class=\"striped\">" } else { "<tr>" });
    for cell in &row.cells { out.push_str(&cell_html(cell)); }
    out.push_str("</tr>\n");
    out
}

pub fn render_table(layout: &TableLayout) -> String {
    let mut out = s!("<table class=\"sheet-table\">\n");

    if layout.show_header {
        out.push_str("<thead><tr>");
        for h in &layout.headers { out.push_str(&header_html(h)); }
        out.push_str("</tr></thead>\n");
    }

    out.push_str("<tbody>\n");
    for row in &layout.body_rows { out.push_str(&row_html(row)); }
    out.push_str("</tbody>\n</table>\n");
    out
}

/* ---------------- Tabs ---------------- */

/// Tab bar plus one container per built pane. Unbuilt panes are left out;
/// call `build_all` first for a page that must work without scripts.
pub fn render_tabs<B: PaneBuilder>(tabs: &TabWidget<B>) -> String {
    let mut out = s!("<div class=\"tabs-widget\">\n<ul role=\"tablist\">\n");

    for (i, pane) in tabs.panes().iter().enumerate() {
        let selected = tabs.active() == Some(i);
        out.push_str(&format!(
            "<li><button type=\"button\" role=\"tab\" aria-selected=\"{}\" data-index=\"{}\">{}</button></li>\n",
            selected, i, escape_html(pane.label())
        ));
    }
    out.push_str("</ul>\n<div class=\"widget-container\">\n");

    for (i, pane) in tabs.panes().iter().enumerate() {
        let Some(layout) = pane.layout() else { continue };
        let hidden = if pane.is_visible() { "" } else { " hidden" };
        out.push_str(&format!("<div class=\"table-content\" data-tab-index=\"{i}\"{hidden}>\n"));
        out.push_str(&render_table(layout));
        out.push_str("</div>\n");
    }

    out.push_str("</div>\n</div>\n");
    out
}

pub fn render_no_data() -> String {
    format!("<p class=\"no-data\">{}</p>\n", escape_html(NO_DATA_MESSAGE))
}

pub fn render_widget(widget: &Widget) -> String {
    match widget {
        Widget::Table(layout) => render_table(layout),
        Widget::Tabs(tabs) => render_tabs(tabs),
        Widget::NoData => render_no_data(),
    }
}

/* ---------------- Page ---------------- */

// Tab clicks and ArrowLeft/ArrowRight/Home/End toggle `hidden` on panes.
const TAB_SCRIPT: &str = r#"<script>
document.querySelectorAll('[role=tablist]').forEach(function (bar) {
  var root = bar.parentElement;
  var tabs = Array.prototype.slice.call(bar.querySelectorAll('[role=tab]'));
  function show(i) {
    tabs.forEach(function (t, n) { t.setAttribute('aria-selected', String(n === i)); });
    root.querySelectorAll('.table-content').forEach(function (p) {
      p.hidden = Number(p.getAttribute('data-tab-index')) !== i;
    });
    tabs[i].focus();
  }
  bar.addEventListener('click', function (ev) {
    var tab = ev.target.closest('[role=tab]');
    if (tab) show(tabs.indexOf(tab));
  });
  bar.addEventListener('keydown', function (ev) {
    var cur = tabs.findIndex(function (t) { return t.getAttribute('aria-selected') === 'true'; });
    var n = tabs.length, next = null;
    if (ev.key === 'ArrowRight') next = (cur + 1) % n;
    else if (ev.key === 'ArrowLeft') next = (cur - 1 + n) % n;
    else if (ev.key === 'Home') next = 0;
    else if (ev.key === 'End') next = n - 1;
    if (next !== null) { ev.preventDefault(); show(next); }
  });
});
</script>
"#;

/// Standalone document around a rendered widget.
pub fn render_page(title: &str, body: &str) -> String {
    let mut out = s!("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    out.push_str(&format!("<title>{}</title>\n", escape_html(title)));
    out.push_str("</head>\n<body>\n");
    out.push_str(body);
    out.push_str(TAB_SCRIPT);
    out.push_str("</body>\n</html>\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::options::WidgetKind;
    use crate::csv;
    use crate::table;

    #[test]
    fn text_is_escaped() {
        let html = render_table(&table::build(&csv::parse("A&B\n<script>\n")));
        assert!(html.contains("<th class=\"align-center color-white\">A&amp;B</th>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn colspan_only_when_wide() {
        let html = render_table(&table::build(&csv::parse("A,B,C\n{W}Spanner,,\nx,y,z\n")));
        assert!(html.contains("colspan=\"3\">Spanner</td>"));
        assert_eq!(html.matches("colspan").count(), 1);
    }

    #[test]
    fn classes_and_font_size() {
        let html = render_table(&table::build(&csv::parse("H\n{L}{r}{f20}x\ny\n")));
        assert!(html.contains("<td class=\"align-left color-red\" style=\"font-size:20px\">x</td>"));
        assert!(html.contains("<tr class=\"striped\"><td class=\"align-center color-black\">y</td>"));
    }

    #[test]
    fn blank_headers_emit_no_thead() {
        let html = render_table(&table::build(&csv::parse(" , \n1,2\n")));
        assert!(!html.contains("<thead>"));
        assert!(html.contains("<td class=\"align-center color-black\">1</td>"));
    }

    #[test]
    fn buttons_open_in_a_new_context() {
        let html = render_table(&table::build(&csv::parse("L\n{B}Buy>shop.example.com/?a=1&b=2\n")));
        assert!(html.contains("href=\"https://shop.example.com/?a=1&amp;b=2\""));
        assert!(html.contains("target=\"_blank\""));
        assert!(html.contains(">Buy</a>"));
    }

    #[test]
    fn tabs_omit_unbuilt_panes_and_hide_inactive_ones() {
        let text = "Cat,V\nA,1\nB,2\nC,3\n";
        let Widget::Tabs(mut tabs) = Widget::from_csv(WidgetKind::Tabs, text) else { panic!() };
        tabs.activate(1);

        let html = render_tabs(&tabs);
        assert!(html.contains("<ul role=\"tablist\">"));
        assert!(html.contains("aria-selected=\"true\" data-index=\"1\">B</button>"));
        assert!(html.contains("aria-selected=\"false\" data-index=\"0\">A</button>"));
        assert!(html.contains("<div class=\"table-content\" data-tab-index=\"0\" hidden>"));
        assert!(html.contains("<div class=\"table-content\" data-tab-index=\"1\">"));
        assert!(!html.contains("data-tab-index=\"2\""));

        tabs.build_all();
        assert!(render_tabs(&tabs).contains("data-tab-index=\"2\" hidden"));
    }

    #[test]
    fn blank_category_tab_is_labelled() {
        let tabs = TabWidget::from_sheet(&csv::parse("C,V\n,1\nA,2\n"));
        let html = render_tabs(&tabs);
        assert!(html.contains("aria-selected=\"true\" data-index=\"0\">(blank)</button>"));
        assert!(!html.contains("\"></button>"));
    }

    #[test]
    fn no_data_and_page_wrapper() {
        assert_eq!(render_widget(&Widget::no_data()), "<p class=\"no-data\">No data available</p>\n");
        let page = render_page("Prices & Co", "<p>x</p>");
        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("<title>Prices &amp; Co</title>"));
        assert!(page.contains("<p>x</p>"));
        assert!(page.contains("<script>"));
    }
}

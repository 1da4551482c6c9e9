use std::fmt;

use battlecards_engine::markup::to_html;
use battlecards_engine::{CardPane, RowView, TabPane, ViewTree};

const STYLE: &str = "\
body { font-family: sans-serif; display: flex; margin: 0; }
nav.cards { width: 16rem; padding: 1rem; background: #f3f4f6; }
nav.cards a { display: block; padding: .5rem; color: inherit; text-decoration: none; }
nav.cards a.active { background: #0284c7; color: #fff; border-radius: .5rem; }
main { flex: 1; padding: 2rem; }
.battle-card-content, .sub-tab-content { display: none; }
.battle-card-content.active, .sub-tab-content.active { display: block; }
.sub-tab-link { margin-right: 1rem; }
.sub-tab-link.active { font-weight: bold; border-bottom: 2px solid #0284c7; }
table { border-collapse: collapse; width: 100%; }
th, td { text-align: left; padding: .5rem 1rem; border-bottom: 1px solid #e5e7eb; }
.details-row { display: none; }
.details-row.expanded { display: table-row; background: #f9fafb; }";

/// A standalone HTML page with every card; the active card and tab are visible.
pub struct HtmlView<'a> {
    tree: &'a ViewTree,
}

impl<'a> HtmlView<'a> {
    pub fn new(tree: &'a ViewTree) -> Self {
        Self { tree }
    }
}

fn active_class(active: bool) -> &'static str {
    if active { " active" } else { "" }
}

fn write_card(f: &mut fmt::Formatter, card: &CardPane) -> fmt::Result {
    writeln!(
        f,
        r#"<section id="{}" class="battle-card-content{}">"#,
        card.card_id,
        active_class(card.active)
    )?;
    writeln!(f, r#"<h2 data-path="{}">{}</h2>"#, card.title.path, card.title.raw)?;
    writeln!(
        f,
        r#"<p class="subtitle" data-path="{}">{}</p>"#,
        card.subtitle.path,
        to_html(&card.subtitle.raw)
    )?;

    writeln!(f, r#"<nav class="sub-tab-nav">"#)?;
    for link in &card.sub_tabs {
        writeln!(
            f,
            r##"<a href="#{}" class="sub-tab-link{}" data-path="{}">{}</a>"##,
            link.tab_id,
            active_class(link.active),
            link.title.path,
            link.title.raw
        )?;
    }
    writeln!(f, "</nav>")?;

    for tab in &card.tabs {
        write_tab(f, tab)?;
    }
    writeln!(f, "</section>")
}

fn write_tab(f: &mut fmt::Formatter, tab: &TabPane) -> fmt::Result {
    writeln!(
        f,
        r#"<div id="{}" class="sub-tab-content{}">"#,
        tab.tab_id,
        active_class(tab.active)
    )?;
    if let Some(description) = &tab.description {
        writeln!(
            f,
            r#"<p class="description" data-path="{}">{}</p>"#,
            description.path,
            to_html(&description.raw)
        )?;
    }

    write!(f, "<table>\n<thead><tr><th></th>")?;
    for header in &tab.headers {
        write!(f, r#"<th data-path="{}">{}</th>"#, header.path, header.raw)?;
    }
    writeln!(f, "</tr></thead>\n<tbody>")?;
    for row in &tab.rows {
        write_row(f, row, tab.headers.len() + 1)?;
    }
    writeln!(f, "</tbody>\n</table>\n</div>")
}

fn write_row(f: &mut fmt::Formatter, row: &RowView, colspan: usize) -> fmt::Result {
    let expanded = if row.expanded { " row-expanded" } else { "" };
    write!(
        f,
        r#"<tr class="expandable-row{}" data-row-index="{}"><td>{}</td>"#,
        expanded,
        row.index,
        if row.expanded { "▾" } else { "▸" }
    )?;
    for cell in &row.cells {
        write!(f, r#"<td data-path="{}">{}</td>"#, cell.path, to_html(&cell.raw))?;
    }
    writeln!(f, "</tr>")?;

    let expanded = if row.detail.expanded { " expanded" } else { "" };
    write!(
        f,
        r#"<tr class="details-row{}"><td colspan="{}"><ul>"#,
        expanded, colspan
    )?;
    for bullet in &row.detail.bullets {
        write!(
            f,
            r#"<li data-path="{}">{}</li>"#,
            bullet.text.path,
            to_html(&bullet.text.raw)
        )?;
    }
    writeln!(f, "</ul></td></tr>")
}

impl<'a> fmt::Display for HtmlView<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "<!DOCTYPE html>")?;
        writeln!(f, r#"<html lang="en">"#)?;
        writeln!(f, "<head>")?;
        writeln!(f, r#"<meta charset="utf-8">"#)?;
        writeln!(f, "<title>Battle Cards</title>")?;
        writeln!(f, "<style>\n{}\n</style>\n</head>\n<body>", STYLE)?;

        writeln!(f, r#"<nav class="cards"><ul>"#)?;
        for item in &self.tree.nav {
            writeln!(
                f,
                r##"<li><a href="#{}" class="nav-link{}">{}</a></li>"##,
                item.card_id,
                active_class(item.active),
                item.title
            )?;
        }
        writeln!(f, "</ul></nav>\n<main>")?;

        for card in &self.tree.cards {
            write_card(f, card)?;
        }
        writeln!(f, "</main>\n</body>\n</html>")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use battlecards_engine::{RenderOptions, ViewState, render};
    use battlecards_types::Document;
    use serde_json::json;

    #[test]
    fn test_html_marks_active_panes_and_expanded_rows() {
        let doc = Document::from_value(json!({
            "acme": {
                "title": "Acme",
                "subtitle": "**Big**\nvendor",
                "tabs": [{
                    "id": "acme-x",
                    "title": "X",
                    "headers": ["Feature"],
                    "content": [{"row": ["*fast*"], "details": ["d0"]}]
                }]
            },
            "globex": {"title": "Globex", "subtitle": "", "tabs": []}
        }))
        .unwrap();
        let mut view = ViewState::new();
        view.toggle_row_expanded("acme", "acme-x", 0);
        let html = HtmlView::new(&render(&doc, &view, RenderOptions::default())).to_string();

        assert!(html.contains(r#"<section id="acme" class="battle-card-content active">"#));
        assert!(html.contains(r#"<section id="globex" class="battle-card-content">"#));
        assert!(html.contains(r#"<div id="acme-x" class="sub-tab-content active">"#));
        assert!(html.contains("<strong>Big</strong><br>vendor"));
        assert!(html.contains(r#"<td data-path="acme.tabs[0].content[0].row[0]"><em>fast</em></td>"#));
        assert!(html.contains(r#"<tr class="details-row expanded"><td colspan="2"><ul><li data-path="acme.tabs[0].content[0].details[0]">d0</li>"#));
    }
}

//! HTML rendering of the runner price table

use crate::error::AppError;
use crate::pricing::{LoadState, RunnerTable};
use crate::static_files::{asset_text, PAGE_TEMPLATE};
use std::fmt::Write;

/// Header of the synthetic price column
pub const PRICE_COLUMN_TITLE: &str = "Cost for the specified number of minutes";

/// Everything needed to render the page once
#[derive(Debug)]
pub struct PageView<'a> {
    pub title: &'a str,
    pub state: &'a LoadState,
    pub table: &'a RunnerTable,
    /// Minutes text to echo back into the form
    pub minutes: Option<&'a str>,
    /// Blocking notice shown above the table
    pub notice: Option<&'a str>,
    /// Escape CSV field text; `false` writes it as raw markup
    pub escape_fields: bool,
}

/// Escape text for use in HTML content and attribute values
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn field_text(text: &str, escape: bool) -> String {
    if escape {
        escape_html(text)
    } else {
        text.to_string()
    }
}

/// Render the `<th>` cells: CSV headers plus the price column
pub fn render_header_cells(table: &RunnerTable, escape: bool) -> String {
    let mut out = String::new();
    for header in table.headers() {
        let _ = write!(out, "<th>{}</th>", field_text(header, escape));
    }
    let _ = write!(out, "<th>{}</th>", PRICE_COLUMN_TITLE);
    out
}

/// Render one `<tr>` per runner row
pub fn render_rows(table: &RunnerTable, escape: bool) -> String {
    let mut out = String::new();
    for row in table.rows() {
        out.push_str("            <tr>");
        for field in row.fields() {
            let _ = write!(out, "<td>{}</td>", field_text(field, escape));
        }
        // the default price lands in an attribute, so it is always escaped
        let _ = write!(
            out,
            "<td class=\"price-cell\" data-default-price=\"{}\">{}</td>",
            escape_html(row.price().default_price()),
            escape_html(row.price().computed_price()),
        );
        out.push_str("</tr>\n");
    }
    out
}

fn render_status(state: &LoadState) -> String {
    match state {
        LoadState::Loaded { .. } => String::new(),
        LoadState::Pending => {
            "<p class=\"status-pending\">Runner prices are still loading.</p>".to_string()
        }
        LoadState::Failed { reason, .. } => format!(
            "<p class=\"status-failed\" role=\"alert\">Runner prices could not be loaded: {}</p>",
            escape_html(reason)
        ),
    }
}

/// Substitute every `{{name}}` token in `template` in a single pass
///
/// Inserted values are never scanned again, so placeholder text coming from
/// user input or CSV data is written out literally. Unknown tokens are kept.
pub fn fill_template(template: &str, value_for: impl Fn(&str) -> Option<String>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after_open = &rest[start + 2..];

        match after_open.find("}}") {
            Some(end) => {
                let name = &after_open[..end];
                match value_for(name) {
                    Some(value) => out.push_str(&value),
                    None => {
                        out.push_str("{{");
                        out.push_str(name);
                        out.push_str("}}");
                    }
                }
                rest = &after_open[end + 2..];
            }
            None => {
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }

    out.push_str(rest);
    out
}

/// Render the full page from the embedded template
pub fn render_page(view: &PageView<'_>) -> Result<String, AppError> {
    let template = asset_text(PAGE_TEMPLATE)
        .ok_or_else(|| AppError::InternalError("page template is not embedded".to_string()))?;

    Ok(fill_template(&template, |name| {
        let value = match name {
            "title" => escape_html(view.title),
            "status" => render_status(view.state),
            "notice" => view
                .notice
                .map(|text| format!("<p class=\"notice\" role=\"alert\">{}</p>", escape_html(text)))
                .unwrap_or_default(),
            "minutes" => escape_html(view.minutes.unwrap_or("")),
            "header_cells" => render_header_cells(view.table, view.escape_fields),
            "rows" => render_rows(view.table, view.escape_fields),
            _ => return None,
        };
        Some(value)
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::parse_runner_csv;
    use chrono::Utc;

    fn loaded() -> LoadState {
        LoadState::Loaded {
            loaded_at: Utc::now(),
            content_hash: "hash".to_string(),
        }
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html("<a href='x'>\"&\"</a>"),
            "&lt;a href=&#39;x&#39;&gt;&quot;&amp;&quot;&lt;/a&gt;"
        );
        assert_eq!(escape_html("ubuntu-latest"), "ubuntu-latest");
    }

    #[test]
    fn test_render_rows_has_price_cell() {
        let table = parse_runner_csv("h1;h2;price\nrunnerA;2cpu;0.50\nrunnerB;4cpu;1.00").unwrap();
        let rows = render_rows(&table, true);

        assert_eq!(rows.matches("<tr>").count(), 2);
        assert_eq!(rows.matches("<td").count(), 8);
        assert!(rows.contains(
            "<td>runnerA</td><td>2cpu</td><td>0.50</td><td class=\"price-cell\" data-default-price=\"0.50\">0</td>"
        ));
    }

    #[test]
    fn test_render_header_cells() {
        let table = parse_runner_csv("Runner;Price\n").unwrap();
        assert_eq!(
            render_header_cells(&table, true),
            format!("<th>Runner</th><th>Price</th><th>{}</th>", PRICE_COLUMN_TITLE)
        );
    }

    #[test]
    fn test_escape_switch_controls_field_markup() {
        let table = parse_runner_csv("name;price\n<b>big</b>;2").unwrap();

        assert!(render_rows(&table, true).contains("<td>&lt;b&gt;big&lt;/b&gt;</td>"));
        assert!(render_rows(&table, false).contains("<td><b>big</b></td>"));
    }

    #[test]
    fn test_render_page_with_notice_and_minutes() {
        let table = parse_runner_csv("name;price\na;1").unwrap();
        let state = loaded();
        let page = render_page(&PageView {
            title: "CI runner prices",
            state: &state,
            table: &table,
            minutes: Some("ten"),
            notice: Some("Please enter only numbers"),
            escape_fields: true,
        })
        .unwrap();

        assert!(page.contains("<title>CI runner prices</title>"));
        assert!(page.contains("Please enter only numbers"));
        assert!(page.contains("value=\"ten\""));
        assert!(page.contains("id=\"csvTable\""));
        assert!(!page.contains("{{"));
    }

    #[test]
    fn test_fill_template_does_not_rescan_inserted_values() {
        let filled = fill_template("<{{a}}|{{b}}|{{unknown}}|{{open", |name| match name {
            "a" => Some("{{b}}".to_string()),
            "b" => Some("B".to_string()),
            _ => None,
        });
        assert_eq!(filled, "<{{b}}|B|{{unknown}}|{{open");
    }

    #[test]
    fn test_placeholder_text_in_data_is_written_literally() {
        let table = parse_runner_csv("{{rows}};price\n{{title}};1\nb;2").unwrap();
        let state = loaded();
        let page = render_page(&PageView {
            title: "{{rows}}",
            state: &state,
            table: &table,
            minutes: Some("{{rows}}"),
            notice: None,
            escape_fields: false,
        })
        .unwrap();

        assert_eq!(page.matches("class=\"price-cell\"").count(), 2);
        assert!(page.contains("value=\"{{rows}}\""));
        assert!(page.contains("<title>{{rows}}</title>"));
        assert!(page.contains("<th>{{rows}}</th>"));
        assert!(page.contains("<td>{{title}}</td>"));
    }

    #[test]
    fn test_render_page_shows_failed_state() {
        let table = RunnerTable::default();
        let state = LoadState::Failed {
            failed_at: Utc::now(),
            reason: "HTTP 404 Not Found".to_string(),
        };
        let page = render_page(&PageView {
            title: "t",
            state: &state,
            table: &table,
            minutes: None,
            notice: None,
            escape_fields: true,
        })
        .unwrap();

        assert!(page.contains("status-failed"));
        assert!(page.contains("HTTP 404 Not Found"));
        assert!(!page.contains("<td"));
    }
}

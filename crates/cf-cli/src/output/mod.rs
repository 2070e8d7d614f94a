use std::collections::BTreeSet;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::cli::OutputFormat;
use crate::ui;

pub mod table;

/// Render a serializable response to a string in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Table => Ok(render_table(&serde_json::to_value(value)?)),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

fn options() -> table::TableOptions {
    let prefs = ui::prefs();
    table::TableOptions {
        max_width: prefs.term_width,
        color: prefs.table_color,
    }
}

/// Arrays become one row per item. Objects print their scalar fields as a
/// key/value table, then each list-of-records field (a flow's gaps, a plan's
/// tasks) as its own titled table.
fn render_table(value: &Value) -> String {
    match value {
        Value::Array(items) => render_records(items),
        Value::Object(map) => render_object(map),
        scalar => table::render_rows(&["value"], &[vec![value_to_cell(scalar)]], options()),
    }
}

fn render_object(map: &Map<String, Value>) -> String {
    let mut summary = Vec::new();
    let mut sections = Vec::new();
    for (key, value) in map {
        match value {
            Value::Array(items) if !items.is_empty() && items.iter().all(Value::is_object) => {
                sections.push(format!("{key} ({})\n{}", items.len(), render_records(items)));
            }
            other => summary.push(vec![key.clone(), value_to_cell(other)]),
        }
    }
    summary.sort_by(|a, b| a[0].cmp(&b[0]));

    let mut blocks = Vec::with_capacity(sections.len() + 1);
    if !summary.is_empty() {
        blocks.push(table::render_rows(&["key", "value"], &summary, options()));
    }
    blocks.extend(sections);
    blocks.join("\n\n")
}

fn render_records(items: &[Value]) -> String {
    if items.is_empty() {
        return String::from("(no rows)");
    }
    if !items.iter().all(Value::is_object) {
        let rows: Vec<Vec<String>> = items.iter().map(|item| vec![value_to_cell(item)]).collect();
        return table::render_rows(&["value"], &rows, options());
    }

    let headers: BTreeSet<&str> = items
        .iter()
        .filter_map(Value::as_object)
        .flat_map(|map| map.keys().map(String::as_str))
        .collect();
    let headers: Vec<&str> = headers.into_iter().collect();

    let rows: Vec<Vec<String>> = items
        .iter()
        .filter_map(Value::as_object)
        .map(|map| {
            headers
                .iter()
                .map(|header| map.get(*header).map_or_else(|| String::from("-"), value_to_cell))
                .collect()
        })
        .collect();
    table::render_rows(&headers, &rows, options())
}

fn value_to_cell(value: &Value) -> String {
    match value {
        Value::Null => String::from("null"),
        Value::String(text) => text.clone(),
        Value::Array(items) if items.iter().all(Value::is_string) => items
            .iter()
            .filter_map(Value::as_str)
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde::Serialize;

    use super::render;
    use crate::cli::OutputFormat;

    #[derive(Serialize)]
    struct GapRow {
        gap_id: &'static str,
        severity: &'static str,
        current_response: Option<u8>,
    }

    #[derive(Serialize)]
    struct Summary {
        assessment_id: &'static str,
        total_gaps: usize,
        gaps: Vec<GapRow>,
    }

    fn rows() -> Vec<GapRow> {
        vec![
            GapRow {
                gap_id: "asm-1-PR.AA-01",
                severity: "critical",
                current_response: None,
            },
            GapRow {
                gap_id: "asm-1-DE.CM-01",
                severity: "medium",
                current_response: Some(1),
            },
        ]
    }

    #[test]
    fn json_render_is_valid_json() {
        let out = render(&rows(), OutputFormat::Json).expect("json render should work");
        let parsed: serde_json::Value = serde_json::from_str(&out).expect("json should parse");
        assert_eq!(parsed[0]["gap_id"], "asm-1-PR.AA-01");
        assert_eq!(parsed[1]["current_response"], 1);
    }

    #[test]
    fn raw_render_is_single_line_json() {
        let out = render(&rows(), OutputFormat::Raw).expect("raw render should work");
        assert!(!out.contains('\n'));
        let parsed: serde_json::Value = serde_json::from_str(&out).expect("json should parse");
        assert_eq!(parsed.as_array().map(Vec::len), Some(2));
    }

    #[test]
    fn array_renders_one_row_per_item_with_sorted_columns() {
        let out = render(&rows(), OutputFormat::Table).expect("table render should work");
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("current_response"));
        assert!(lines[1].chars().all(|c| c == '-'));
        assert!(lines[2].contains("null"));
        assert!(lines[3].contains("asm-1-DE.CM-01"));
    }

    #[test]
    fn object_renders_summary_then_record_sections() {
        let summary = Summary {
            assessment_id: "asm-1",
            total_gaps: 2,
            gaps: rows(),
        };
        let out = render(&summary, OutputFormat::Table).expect("table render should work");
        let blocks: Vec<&str> = out.split("\n\n").collect();
        assert_eq!(blocks.len(), 2);
        assert!(blocks[0].contains("assessment_id"));
        assert!(!blocks[0].contains("asm-1-PR.AA-01"));
        assert!(blocks[1].starts_with("gaps (2)"));
        assert!(blocks[1].contains("asm-1-PR.AA-01"));
    }

    #[test]
    fn empty_array_renders_placeholder() {
        let out = render(&Vec::<GapRow>::new(), OutputFormat::Table).expect("table render should work");
        assert_eq!(out, "(no rows)");
    }

    #[test]
    fn scalar_lists_render_one_value_per_row() {
        let out = render(&vec!["flow", "gap"], OutputFormat::Table).expect("table render should work");
        assert!(out.lines().any(|line| line.trim() == "flow"));
    }
}

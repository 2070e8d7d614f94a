//! Plain aligned tables for `--format table`.

/// Narrowest a column is ever squeezed to when fitting the terminal.
const MIN_COLUMN_WIDTH: usize = 6;

const SEPARATOR: &str = "  ";

#[derive(Clone, Copy, Debug)]
pub struct TableOptions {
    pub max_width: Option<usize>,
    pub color: bool,
}

/// Render rows of cells under `headers`, one line per row.
///
/// Missing cells print as `-`. Numeric cells are right-aligned. When
/// `max_width` is set the widest columns shrink first and overflowing cells
/// end in an ellipsis.
#[must_use]
pub fn render_rows(headers: &[&str], rows: &[Vec<String>], options: TableOptions) -> String {
    let mut widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(index, header)| {
            rows.iter()
                .filter_map(|row| row.get(index))
                .map(|cell| cell.chars().count())
                .chain([header.chars().count(), MIN_COLUMN_WIDTH])
                .max()
                .unwrap_or(MIN_COLUMN_WIDTH)
        })
        .collect();
    if let Some(max_width) = options.max_width {
        shrink_to_fit(&mut widths, headers, max_width);
    }

    let header_line = headers
        .iter()
        .zip(&widths)
        .map(|(header, width)| pad(&truncate_text(header, *width), *width, false))
        .collect::<Vec<_>>()
        .join(SEPARATOR);
    let divider = "-".repeat(header_line.chars().count());

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(header_line);
    lines.push(divider);
    for row in rows {
        let line = widths
            .iter()
            .enumerate()
            .map(|(index, width)| {
                let cell = truncate_text(row.get(index).map_or("-", String::as_str), *width);
                let padded = pad(&cell, *width, looks_numeric(&cell));
                if options.color {
                    colorize_status(&padded, &cell)
                } else {
                    padded
                }
            })
            .collect::<Vec<_>>()
            .join(SEPARATOR);
        lines.push(line);
    }
    lines.join("\n")
}

fn shrink_to_fit(widths: &mut [usize], headers: &[&str], max_width: usize) {
    let separators = widths.len().saturating_sub(1) * SEPARATOR.len();
    let mut total = widths.iter().sum::<usize>() + separators;

    while total > max_width {
        let widest = widths
            .iter()
            .enumerate()
            .filter(|(index, width)| **width > headers[*index].len().max(MIN_COLUMN_WIDTH))
            .max_by_key(|(_, width)| **width)
            .map(|(index, _)| index);
        let Some(index) = widest else {
            break;
        };
        widths[index] -= 1;
        total -= 1;
    }
}

fn truncate_text(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    if width <= 1 {
        return "…".to_string();
    }
    let mut out: String = value.chars().take(width - 1).collect();
    out.push('…');
    out
}

fn looks_numeric(value: &str) -> bool {
    let trimmed = value.trim();
    trimmed.chars().any(|ch| ch.is_ascii_digit())
        && trimmed
            .chars()
            .all(|ch| ch.is_ascii_digit() || matches!(ch, '-' | '+' | '.'))
}

fn pad(value: &str, width: usize, right_align: bool) -> String {
    let fill = " ".repeat(width.saturating_sub(value.chars().count()));
    if right_align {
        format!("{fill}{value}")
    } else {
        format!("{value}{fill}")
    }
}

/// Wrap an already padded cell in an ANSI color picked from its plain value:
/// red for critical or failed, yellow for open work, green for done.
fn colorize_status(padded: &str, value: &str) -> String {
    let code = match value.to_ascii_lowercase().as_str() {
        "critical" | "failed" | "blocked" | "not_implemented" => Some("31"),
        "high" | "medium" | "not_started" | "in_progress" | "partial" | "partially_implemented" => {
            Some("33")
        }
        "low" | "implemented" | "completed" | "strong" => Some("32"),
        _ => None,
    };

    match code {
        Some(code) => format!("\u{1b}[{code}m{padded}\u{1b}[0m"),
        None => padded.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{TableOptions, colorize_status, looks_numeric, render_rows, truncate_text};

    const PLAIN: TableOptions = TableOptions {
        max_width: None,
        color: false,
    };

    #[test]
    fn severity_values_are_colored() {
        assert_eq!(colorize_status("critical", "critical"), "\u{1b}[31mcritical\u{1b}[0m");
        assert_eq!(colorize_status("medium ", "medium"), "\u{1b}[33mmedium \u{1b}[0m");
        assert_eq!(colorize_status("low", "low"), "\u{1b}[32mlow\u{1b}[0m");
        assert_eq!(colorize_status("asm-1-q1", "asm-1-q1"), "asm-1-q1");
    }

    #[test]
    fn long_cells_are_truncated_with_ellipsis() {
        assert_eq!(truncate_text("Implement access reviews", 10), "Implement…");
        assert_eq!(truncate_text("short", 10), "short");
    }

    #[test]
    fn numbers_are_right_aligned() {
        let rows = vec![vec!["PR.AA-01".to_string(), "8".to_string()]];
        let table = render_rows(&["question", "hours"], &rows, PLAIN);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines[2], "PR.AA-01       8");
    }

    #[test]
    fn missing_cells_print_dash() {
        let rows = vec![vec!["only-one".to_string()]];
        let table = render_rows(&["a", "b"], &rows, PLAIN);
        assert!(table.lines().nth(2).is_some_and(|line| line.ends_with("-     ")));
    }

    #[test]
    fn only_cells_with_digits_count_as_numbers() {
        assert!(looks_numeric("16"));
        assert!(looks_numeric("-2"));
        assert!(!looks_numeric("-"));
        assert!(!looks_numeric("+."));
        assert!(!looks_numeric(""));
    }

    #[test]
    fn narrow_terminal_shrinks_widest_column() {
        let rows = vec![vec![
            "ctl-asm-1-q1".to_string(),
            "Implement a very long control description for review".to_string(),
        ]];
        let options = TableOptions {
            max_width: Some(40),
            color: false,
        };
        let table = render_rows(&["control_id", "description"], &rows, options);
        for line in table.lines() {
            assert!(line.chars().count() <= 40, "line too wide: {line}");
        }
        assert!(table.contains('…'));
    }
}

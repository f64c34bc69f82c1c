use serde::Serialize;

pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Render rows as a fixed-width text table: left-aligned cells, two spaces
/// between columns, a dashed rule under the header. Ragged rows are padded
/// with empty cells and trailing whitespace is trimmed, so interval and
/// ISO-timestamp columns line up without dangling spaces.
pub fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (cell, width) in row.iter().zip(widths.iter_mut()) {
            *width = (*width).max(cell.len());
        }
    }

    let line = |cells: &[&str]| -> String {
        let mut out = String::new();
        for (i, &width) in widths.iter().enumerate() {
            if i > 0 {
                out.push_str("  ");
            }
            let cell = cells.get(i).copied().unwrap_or("");
            out.push_str(&format!("{cell:<width$}"));
        }
        out.trim_end().to_string()
    };

    let rule: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
    let mut table = vec![line(headers), rule.join("  ")];
    for row in rows {
        let cells: Vec<&str> = row.iter().map(String::as_str).collect();
        table.push(line(&cells));
    }
    table.join("\n")
}

pub fn print_table(headers: &[&str], rows: Vec<Vec<String>>) {
    println!("{}", render_table(headers, &rows));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn print_json_handles_plain_values() {
        print_json(&serde_json::json!({ "ok": true })).unwrap();
    }

    #[test]
    fn columns_align_to_widest_cell() {
        let rendered = render_table(
            &["slug", "start"],
            &[
                vec!["trio".to_string(), "2026-03-02T18:00:00Z".to_string()],
                vec!["the-long-goodbyes".to_string(), "2026-03-09T19:30:00Z".to_string()],
            ],
        );
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "slug               start");
        assert_eq!(lines[1], "-----------------  --------------------");
        assert_eq!(lines[2], "trio               2026-03-02T18:00:00Z");
        assert_eq!(lines[3], "the-long-goodbyes  2026-03-09T19:30:00Z");
    }

    #[test]
    fn ragged_rows_pad_with_empty_cells() {
        let rendered = render_table(
            &["slug", "name"],
            &[
                vec!["trio".to_string(), "Trio".to_string()],
                vec!["solo".to_string()],
            ],
        );
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[3], "solo");
    }
}

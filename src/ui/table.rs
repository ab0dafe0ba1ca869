//! Table rendering for formatted output.

use console::measure_text_width;

/// A simple box-drawn table.
///
/// Column widths are measured in display columns, so prompt text with
/// wide characters still lines up.
#[derive(Debug)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    column_widths: Vec<usize>,
}

impl Table {
    /// Create a new table with the given headers.
    pub fn new(headers: Vec<&str>) -> Self {
        let headers: Vec<String> = headers.iter().map(|s| s.to_string()).collect();
        let column_widths = headers.iter().map(|h| measure_text_width(h)).collect();

        Self {
            headers,
            rows: Vec::new(),
            column_widths,
        }
    }

    /// Add a row to the table.
    pub fn add_row(&mut self, row: Vec<&str>) {
        let row: Vec<String> = row.iter().map(|s| s.to_string()).collect();

        for (i, cell) in row.iter().enumerate() {
            if i < self.column_widths.len() {
                self.column_widths[i] = self.column_widths[i].max(measure_text_width(cell));
            }
        }

        self.rows.push(row);
    }

    /// Get the number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Render the table as a string.
    pub fn render(&self) -> String {
        let mut lines = Vec::with_capacity(self.rows.len() + 4);

        lines.push(self.render_border('┌', '┬', '┐'));
        lines.push(self.render_row(&self.headers));
        lines.push(self.render_border('├', '┼', '┤'));
        for row in &self.rows {
            lines.push(self.render_row(row));
        }
        lines.push(self.render_border('└', '┴', '┘'));

        lines.join("\n")
    }

    fn render_border(&self, left: char, mid: char, right: char) -> String {
        let segments: Vec<String> = self
            .column_widths
            .iter()
            .map(|width| "─".repeat(width + 2))
            .collect();
        format!("{}{}{}", left, segments.join(&mid.to_string()), right)
    }

    fn render_row(&self, row: &[String]) -> String {
        let mut s = String::from("│");

        for (i, width) in self.column_widths.iter().enumerate() {
            let cell = row.get(i).map(|s| s.as_str()).unwrap_or("");
            let padding = width.saturating_sub(measure_text_width(cell));
            s.push_str(&format!(" {}{} │", cell, " ".repeat(padding)));
        }

        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_empty() {
        let table = Table::new(vec!["ID", "Name"]);
        assert!(table.is_empty());
        assert_eq!(table.row_count(), 0);

        let output = table.render();
        assert!(output.contains("ID"));
        assert!(output.contains("Name"));
    }

    #[test]
    fn table_with_rows() {
        let mut table = Table::new(vec!["Folder", "Prompts"]);
        table.add_row(vec!["Uncategorized", "3"]);
        table.add_row(vec!["Work", "1"]);

        assert_eq!(table.row_count(), 2);

        let output = table.render();
        assert!(output.contains("Uncategorized"));
        assert!(output.contains("Work"));
    }

    #[test]
    fn table_uses_box_drawing() {
        let table = Table::new(vec!["Test"]);
        let output = table.render();

        assert!(output.contains("┌"));
        assert!(output.contains("┘"));
        assert!(output.contains("│"));
    }

    #[test]
    fn table_handles_missing_cells() {
        let mut table = Table::new(vec!["A", "B", "C"]);
        table.add_row(vec!["only", "two"]);

        let output = table.render();
        assert!(output.contains("only"));
        assert!(output.contains("two"));
    }

    #[test]
    fn rows_have_equal_width_with_wide_chars() {
        let mut table = Table::new(vec!["Text"]);
        table.add_row(vec!["日本語"]);
        table.add_row(vec!["abc"]);

        let output = table.render();
        let widths: Vec<usize> = output.lines().map(measure_text_width).collect();

        assert!(widths.windows(2).all(|w| w[0] == w[1]));
    }

    #[test]
    fn table_render_line_count() {
        let mut table = Table::new(vec!["ID", "Name", "Prompt"]);
        table.add_row(vec!["1", "", "one"]);
        table.add_row(vec!["2", "a.md", "two"]);
        table.add_row(vec!["3", "", "three"]);

        let output = table.render();
        // top border, header, separator, 3 rows, bottom border
        assert_eq!(output.lines().count(), 7);
    }
}

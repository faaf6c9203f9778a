//! Plain-text column layout for CLI listings. Widths ignore ANSI color codes
//! so colored cells line up with plain ones.

pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    max_widths: Vec<Option<usize>>,
}

impl Table {
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let headers: Vec<String> =
            headers.into_iter().map(Into::into).collect();
        let max_widths = vec![None; headers.len()];
        Self { headers, rows: Vec::new(), max_widths }
    }

    /// Caps a column; longer plain cells are cut with an ellipsis.
    pub fn max_width(mut self, col: usize, width: usize) -> Self {
        if let Some(slot) = self.max_widths.get_mut(col) {
            *slot = Some(width);
        }
        self
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    pub fn render(&self) -> String {
        if self.headers.is_empty() {
            return String::new();
        }
        let rows: Vec<Vec<String>> = self
            .rows
            .iter()
            .map(|row| {
                row.iter()
                    .take(self.headers.len())
                    .enumerate()
                    .map(|(i, cell)| self.fit(i, cell))
                    .collect()
            })
            .collect();

        let mut widths: Vec<usize> =
            self.headers.iter().map(|h| display_len(h)).collect();
        for row in &rows {
            for (i, cell) in row.iter().enumerate() {
                widths[i] = widths[i].max(display_len(cell));
            }
        }

        let header = format_row(&self.headers, &widths);
        let mut out = String::new();
        out.push_str(header.trim_end());
        out.push('\n');
        out.push_str(&"-".repeat(display_len(header.trim_end())));
        for row in &rows {
            out.push('\n');
            out.push_str(format_row(row, &widths).trim_end());
        }
        out
    }

    /// Truncates plain cells in capped columns. Styled cells pass through.
    fn fit(&self, col: usize, cell: &str) -> String {
        match self.max_widths[col] {
            Some(w) if display_len(cell) == cell.chars().count() => {
                truncate_with_ellipsis(cell, w)
            }
            _ => cell.to_string(),
        }
    }
}

fn format_row(row: &[String], widths: &[usize]) -> String {
    row.iter()
        .zip(widths)
        .map(|(cell, width)| {
            let pad = width.saturating_sub(display_len(cell));
            format!("{cell}{}", " ".repeat(pad))
        })
        .collect::<Vec<_>>()
        .join("  ")
}

/// Truncate text to a width, appending an ellipsis when needed.
pub fn truncate_with_ellipsis(text: &str, max_width: usize) -> String {
    if max_width == 0 {
        return String::new();
    }
    if text.chars().count() <= max_width {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max_width - 1).collect();
    out.push('…');
    out
}

/// Visible length of a string, skipping ANSI escape sequences.
pub fn display_len(s: &str) -> usize {
    let mut len = 0;
    let mut chars = s.chars();
    while let Some(ch) = chars.next() {
        if ch == '\x1b' {
            for next in chars.by_ref() {
                if next == 'm' {
                    break;
                }
            }
            continue;
        }
        len += 1;
    }
    len
}

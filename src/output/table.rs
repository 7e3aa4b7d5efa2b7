//
//  bitbucket-cloud
//  output/table.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Table Output Formatting
//!
//! Listings are rendered with `comfy_table` using UTF-8 box-drawing
//! characters, arranged dynamically to fit the terminal width.
//!
//! ## Example
//!
//! ```rust
//! use bitbucket_cloud::output::TableBuilder;
//!
//! let table = TableBuilder::new()
//!     .color(false)
//!     .headers(["NAME", "VISIBILITY"])
//!     .row(["acme/widgets", "private"])
//!     .build();
//! assert!(table.to_string().contains("acme/widgets"));
//! ```

use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};

/// Creates an empty table with the default preset.
pub fn create_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Builder for listing tables.
pub struct TableBuilder {
    table: Table,
    color: bool,
}

impl TableBuilder {
    pub fn new() -> Self {
        Self {
            table: create_table(),
            color: console::colors_enabled(),
        }
    }

    /// Enables or disables colored headers.
    pub fn color(mut self, enabled: bool) -> Self {
        self.color = enabled;
        self
    }

    pub fn headers<I, S>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let headers: Vec<String> = headers.into_iter().map(Into::into).collect();
        if self.color {
            self.table
                .set_header(headers.iter().map(|h| Cell::new(h).fg(Color::Cyan)));
        } else {
            self.table.set_header(headers);
        }
        self
    }

    pub fn row<I, S>(mut self, cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let row: Vec<String> = cells.into_iter().map(Into::into).collect();
        self.table.add_row(row);
        self
    }

    pub fn print(self) {
        println!("{}", self.table);
    }

    pub fn build(self) -> Table {
        self.table
    }
}

impl Default for TableBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Colors a pull request state or similar status word.
pub fn format_status(status: &str, color: bool) -> String {
    if !color {
        return status.to_string();
    }

    use console::style;
    match status.to_lowercase().as_str() {
        "open" => style(status).green().to_string(),
        "merged" => style(status).blue().to_string(),
        "declined" => style(status).red().to_string(),
        "superseded" => style(status).yellow().to_string(),
        _ => status.to_string(),
    }
}

/// Renders repository visibility.
pub fn format_visibility(is_private: bool, color: bool) -> String {
    let label = if is_private { "private" } else { "public" };
    if !color {
        return label.to_string();
    }

    use console::style;
    if is_private {
        style(label).yellow().to_string()
    } else {
        style(label).green().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_formatting() {
        assert_eq!(format_status("MERGED", false), "MERGED");
        assert_eq!(format_visibility(true, false), "private");
        assert_eq!(format_visibility(false, false), "public");
    }

    #[test]
    fn test_table_contains_rows() {
        let rendered = TableBuilder::new()
            .color(false)
            .headers(["ID", "TITLE"])
            .row(["1", "Fix pagination"])
            .row(["2", "Add forks"])
            .build()
            .to_string();

        assert!(rendered.contains("TITLE"));
        assert!(rendered.contains("Fix pagination"));
        assert!(rendered.contains("Add forks"));
    }
}

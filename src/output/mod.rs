//
//  bitbucket-cloud
//  output/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Output Module
//!
//! Rendering for `bbc` results in two formats:
//!
//! - **Table format**: Human-readable output for interactive terminal use
//! - **JSON format**: Machine-readable output for scripting
//!
//! ## Core Components
//!
//! - [`OutputFormat`]: The available output formats
//! - [`OutputWriter`]: Main entry point for writing formatted output
//! - [`TableOutput`]: Detail view of a single value
//! - [`TableRow`]: One line of a listing table

mod table;

pub use table::*;

use serde::Serialize;

/// The available output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable tables and field lists.
    #[default]
    Table,
    /// Pretty-printed JSON.
    Json,
}

/// Writes values in the selected [`OutputFormat`].
pub struct OutputWriter {
    format: OutputFormat,
    color: bool,
}

impl OutputWriter {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            color: console::colors_enabled(),
        }
    }

    /// JSON when `json` is set, tables otherwise.
    pub fn from_flag(json: bool) -> Self {
        Self::new(if json {
            OutputFormat::Json
        } else {
            OutputFormat::Table
        })
    }

    pub fn color_enabled(&self) -> bool {
        self.color
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Writes a single value.
    pub fn write<T: Serialize + TableOutput>(&self, value: &T) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
            OutputFormat::Table => value.print_table(self.color),
        }
        Ok(())
    }

    /// Writes a listing. `empty` is printed in table mode when there is
    /// nothing to show; JSON mode prints `[]`.
    pub fn write_list<T: Serialize + TableRow>(&self, values: &[T], empty: &str) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(values)?),
            OutputFormat::Table if values.is_empty() => println!("{}", empty),
            OutputFormat::Table => {
                let mut builder = TableBuilder::new().color(self.color).headers(T::headers());
                for value in values {
                    builder = builder.row(value.row(self.color));
                }
                builder.print();
            }
        }
        Ok(())
    }

    /// Writes raw JSON regardless of format.
    pub fn write_json<T: Serialize + ?Sized>(&self, value: &T) -> anyhow::Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }

    pub fn write_warning(&self, msg: &str) {
        use console::style;
        if self.color {
            eprintln!("{} {}", style("warning:").yellow().bold(), msg);
        } else {
            eprintln!("warning: {}", msg);
        }
    }

    pub fn write_success(&self, msg: &str) {
        use console::style;
        if self.color {
            println!("{} {}", style("✓").green().bold(), msg);
        } else {
            println!("✓ {}", msg);
        }
    }
}

/// Types that can be shown as a detail view.
pub trait TableOutput {
    fn print_table(&self, color: bool);
}

/// Types that can be shown as one line of a listing.
pub trait TableRow {
    fn headers() -> Vec<&'static str>;

    fn row(&self, color: bool) -> Vec<String>;
}

/// Prints a bold title with an underline.
pub fn print_header(text: &str) {
    use console::style;
    println!("{}", style(text).bold());
    println!("{}", "-".repeat(text.chars().count()));
}

/// Prints a `key: value` line, dimming the key when color is on.
pub fn print_field(key: &str, value: &str, color: bool) {
    use console::style;
    if color {
        println!("{}: {}", style(key).dim(), value);
    } else {
        println!("{}: {}", key, value);
    }
}

//! Rendering of command results as tables, JSON, CSV or bare values.

use colored::Colorize;
use serde::Serialize;
use tabled::{
    builder::Builder,
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

use solvency_risk::RiskZone;

use crate::cli::OutputFormat;

/// Global output settings shared by every command.
#[derive(Debug, Clone, Copy)]
pub struct Output {
    /// Selected format.
    pub format: OutputFormat,
    /// Suppress headers and status lines.
    pub quiet: bool,
}

impl Output {
    /// Creates output settings.
    pub fn new(format: OutputFormat, quiet: bool) -> Self {
        Self { format, quiet }
    }

    /// Prints rows in the selected format.
    pub fn rows<T: Serialize + Tabled>(&self, data: &[T]) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Table => print_table(data),
            OutputFormat::Json => print_json(data),
            OutputFormat::Csv => print_csv(data),
            OutputFormat::Minimal => print_minimal(data),
        }
    }

    /// Prints a section header (table format only).
    pub fn header(&self, title: &str) {
        if !self.quiet && self.format == OutputFormat::Table {
            println!("\n{}", title.bold().underline());
        }
    }

    /// Prints a success line unless quiet.
    pub fn success(&self, message: &str) {
        if !self.quiet {
            println!("{} {}", "✓".green(), message);
        }
    }

    /// Prints a warning line to stderr unless quiet.
    pub fn warning(&self, message: &str) {
        if !self.quiet {
            eprintln!("{} {}", "⚠".yellow(), message);
        }
    }
}

/// Prints any serializable value as pretty JSON.
pub fn print_json<T: Serialize + ?Sized>(data: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(data)?);
    Ok(())
}

/// Rounded table with a left-aligned label column.
fn print_table<T: Tabled>(data: &[T]) -> anyhow::Result<()> {
    if data.is_empty() {
        println!("No results.");
        return Ok(());
    }

    let table = Table::new(data)
        .with(Style::rounded())
        .with(Modify::new(Columns::first()).with(Alignment::left()))
        .to_string();

    println!("{table}");
    Ok(())
}

/// CSV with a header row taken from the serde field names.
fn print_csv<T: Serialize>(data: &[T]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(std::io::stdout());
    for item in data {
        wtr.serialize(item)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Compact JSON of the first row only.
fn print_minimal<T: Serialize>(data: &[T]) -> anyhow::Result<()> {
    if let Some(first) = data.first() {
        println!("{}", serde_json::to_string(first)?);
    }
    Ok(())
}

/// Prints a grid with a corner label, column labels and row labels.
pub fn print_grid(corner: &str, columns: &[String], rows: Vec<(String, Vec<String>)>) {
    let mut builder = Builder::default();
    builder.push_record(std::iter::once(corner.to_string()).chain(columns.iter().cloned()));
    for (label, cells) in rows {
        builder.push_record(std::iter::once(label).chain(cells));
    }

    let table = builder
        .build()
        .with(Style::rounded())
        .with(Modify::new(Columns::first()).with(Alignment::left()))
        .to_string();
    println!("{table}");
}

/// Red cross on stderr; used for every failure the binary reports.
pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red(), message);
}

/// Colours a zone label for terminal display.
pub fn zone_label(zone: RiskZone) -> String {
    match zone {
        RiskZone::Safe => zone.label().green().to_string(),
        RiskZone::Warning => zone.label().yellow().to_string(),
        RiskZone::Liquidated => zone.label().red().bold().to_string(),
    }
}

/// Formats a percentage with two decimals.
pub fn format_pct(value: f64) -> String {
    format!("{value:.2}%")
}

/// One labelled metric in a two-column summary table.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct KeyValue {
    #[tabled(rename = "Metric")]
    pub key: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

impl KeyValue {
    /// Labels a preformatted value.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Labels a percentage, shown with two decimals.
    pub fn from_pct(key: impl Into<String>, value: f64) -> Self {
        Self::new(key, format_pct(value))
    }
}

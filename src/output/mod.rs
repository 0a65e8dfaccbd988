//! Output formatters for the CLI views.
//!
//! Every view serializes to JSON as-is and knows how to lay itself out as
//! Markdown or plain text. Text output can accent ratings and statuses with
//! terminal colours.

mod views;

use std::io::Write;

use colored::{Color, ColoredString, Colorize};
use serde::Serialize;

use crate::config::OutputFormat;
use crate::core::{Result, Severity};
use crate::score::Rating;

pub use views::{FactorRow, MaintainabilityView, PerformanceView, ReliabilityView, ScoreView};

/// Output format enum.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Format {
    Json,
    Markdown,
    #[default]
    Text,
}

impl From<OutputFormat> for Format {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Json => Format::Json,
            OutputFormat::Markdown => Format::Markdown,
            OutputFormat::Text => Format::Text,
        }
    }
}

/// A CLI view that can be written in every output format.
pub trait View: Serialize {
    fn write_markdown(&self, w: &mut dyn Write) -> Result<()>;
    fn write_text(&self, w: &mut dyn Write, style: &Style) -> Result<()>;
}

impl Format {
    pub fn write<V: View, W: Write>(&self, view: &V, writer: &mut W, style: &Style) -> Result<()> {
        match self {
            Format::Json => {
                serde_json::to_writer_pretty(&mut *writer, view)?;
                writeln!(writer)?;
                Ok(())
            }
            Format::Markdown => view.write_markdown(writer),
            Format::Text => view.write_text(writer, style),
        }
    }
}

/// Text styling switch.
#[derive(Clone, Copy, Debug, Default)]
pub struct Style {
    color: bool,
}

impl Style {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    pub fn plain() -> Self {
        Self { color: false }
    }

    /// Rating letter in its report accent colour.
    pub fn rating(&self, rating: Rating) -> ColoredString {
        let text = rating.as_str().bold();
        match (self.color, hex_rgb(rating.color())) {
            (true, Some((r, g, b))) => text.truecolor(r, g, b),
            _ => text.clear(),
        }
    }

    /// Status label, or "no data" for an unmeasured factor.
    pub fn status(&self, label: Option<&str>, severity: Option<Severity>) -> ColoredString {
        let text = label.unwrap_or("no data");
        if !self.color {
            return text.normal().clear();
        }
        match severity {
            Some(severity) => text.color(severity_color(severity)),
            None => text.dimmed(),
        }
    }

    pub fn heading(&self, text: &str) -> ColoredString {
        if self.color {
            text.bold()
        } else {
            text.normal().clear()
        }
    }
}

fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Success => Color::Green,
        Severity::Info => Color::Cyan,
        Severity::Warning => Color::Yellow,
        Severity::Danger => Color::Red,
    }
}

/// Parse `#rrggbb`.
fn hex_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

/// Markdown table writer shared by the views.
pub(crate) fn markdown_table(
    w: &mut dyn Write,
    headers: &[&str],
    rows: &[Vec<String>],
) -> Result<()> {
    if rows.is_empty() {
        writeln!(w, "_No items_\n")?;
        return Ok(());
    }
    writeln!(w, "| {} |", headers.join(" | "))?;
    writeln!(w, "|{}", " --- |".repeat(headers.len()))?;
    for row in rows {
        writeln!(w, "| {} |", row.join(" | "))?;
    }
    writeln!(w)?;
    Ok(())
}

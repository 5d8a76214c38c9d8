use super::humanize::{group_thousands, relative_time};
use crate::enrichment::domain::PackageMetadata;
use crate::ports::outbound::MetadataFormatter;
use crate::shared::Result;
use chrono::{DateTime, Utc};
use comfy_table::{presets, Cell, ContentArrangement, Table, TableComponent};
use owo_colors::OwoColorize;

const HEADERS: [&str; 4] = ["Package", "Repository", "Published", "Downloads"];

const BAD_TIME: &str = "Bad time format";
const NOT_A_NUMBER: &str = "NaN";

/// Whether package names are emphasized with ANSI color
///
/// Decided once by the caller from the output destination and passed in;
/// the formatter never inspects the terminal itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorConfig {
    pub enabled: bool,
}

impl ColorConfig {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn disabled() -> Self {
        Self { enabled: false }
    }

    fn emphasize(&self, text: &str) -> String {
        if self.enabled {
            text.bright_green().to_string()
        } else {
            text.to_string()
        }
    }
}

/// Table border style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TableStyle {
    /// Column separators only, no outer frame
    #[default]
    Borderless,
    /// Full UTF-8 box drawing
    Bordered,
}

impl TableStyle {
    pub fn from_borders_flag(borders: bool) -> Self {
        if borders {
            TableStyle::Bordered
        } else {
            TableStyle::Borderless
        }
    }

    fn apply(self, table: &mut Table) {
        match self {
            TableStyle::Borderless => {
                // Header rule only, no lines between rows
                table
                    .load_preset(presets::ASCII_NO_BORDERS)
                    .remove_style(TableComponent::HorizontalLines)
                    .remove_style(TableComponent::MiddleIntersections);
            }
            TableStyle::Bordered => {
                table.load_preset(presets::UTF8_FULL);
            }
        }
    }
}

/// A cell before rendering. Column transformers accept only the variant
/// they understand and print a placeholder for anything else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellValue {
    Text(String),
    Timestamp(DateTime<Utc>),
    Count(u64),
    Missing,
}

impl CellValue {
    fn from_timestamp(value: Option<DateTime<Utc>>) -> Self {
        value.map_or(CellValue::Missing, CellValue::Timestamp)
    }
}

/// Published column: relative time, or a placeholder
pub fn render_published(value: &CellValue, now: DateTime<Utc>) -> String {
    match value {
        CellValue::Timestamp(ts) => relative_time(*ts, now),
        _ => BAD_TIME.to_string(),
    }
}

/// Downloads column: grouped count, or a placeholder
pub fn render_downloads(value: &CellValue) -> String {
    match value {
        CellValue::Count(n) => group_thousands(*n),
        _ => NOT_A_NUMBER.to_string(),
    }
}

fn render_text(value: &CellValue) -> String {
    match value {
        CellValue::Text(s) => s.clone(),
        _ => String::new(),
    }
}

/// TableFormatter adapter for the human-readable report
///
/// Columns: Package, Repository, Published (relative to render time),
/// Downloads (thousands-grouped). Rows are emitted in the order given.
pub struct TableFormatter {
    color: ColorConfig,
    style: TableStyle,
    reference_time: Option<DateTime<Utc>>,
}

impl TableFormatter {
    pub fn new(color: ColorConfig, style: TableStyle) -> Self {
        Self {
            color,
            style,
            reference_time: None,
        }
    }

    /// Pins "now" for relative timestamps
    pub fn with_reference_time(mut self, now: DateTime<Utc>) -> Self {
        self.reference_time = Some(now);
        self
    }

    fn row_cells(package: &PackageMetadata) -> [CellValue; 4] {
        [
            CellValue::Text(package.name().to_string()),
            CellValue::Text(package.repository_url().to_string()),
            CellValue::from_timestamp(package.last_published()),
            CellValue::Count(package.downloads()),
        ]
    }

    fn render_row(&self, cells: &[CellValue; 4], now: DateTime<Utc>) -> Vec<Cell> {
        vec![
            Cell::new(self.color.emphasize(&render_text(&cells[0]))),
            Cell::new(render_text(&cells[1])),
            Cell::new(render_published(&cells[2], now)),
            Cell::new(render_downloads(&cells[3])),
        ]
    }
}

impl Default for TableFormatter {
    fn default() -> Self {
        Self::new(ColorConfig::disabled(), TableStyle::default())
    }
}

impl MetadataFormatter for TableFormatter {
    fn format(&self, packages: &[PackageMetadata]) -> Result<String> {
        let now = self.reference_time.unwrap_or_else(Utc::now);

        let mut table = Table::new();
        self.style.apply(&mut table);
        table
            .set_content_arrangement(ContentArrangement::Disabled)
            .set_header(HEADERS);

        for package in packages {
            table.add_row(self.render_row(&Self::row_cells(package), now));
        }

        Ok(format!("{}\n", table))
    }
}

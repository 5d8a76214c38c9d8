use crate::adapters::outbound::formatters::{ColorConfig, JsonFormatter, TableFormatter, TableStyle};
use crate::application::dto::OutputFormat;
use crate::ports::outbound::MetadataFormatter;

/// Factory for creating report formatters
///
/// Picks the formatter adapter for an `OutputFormat`. Table appearance
/// (emphasis color, borders) is decided by the caller and passed through;
/// the JSON formatter ignores it.
pub struct FormatterFactory;

impl FormatterFactory {
    /// Creates a formatter instance for the specified output format
    ///
    /// # Examples
    /// ```
    /// use sbom_meta::adapters::outbound::formatters::{ColorConfig, TableStyle};
    /// use sbom_meta::application::dto::OutputFormat;
    /// use sbom_meta::application::factories::FormatterFactory;
    ///
    /// let formatter =
    ///     FormatterFactory::create(OutputFormat::Json, ColorConfig::disabled(), TableStyle::default());
    /// assert_eq!(formatter.format(&[]).unwrap().trim(), "[]");
    /// ```
    pub fn create(
        format: OutputFormat,
        color: ColorConfig,
        style: TableStyle,
    ) -> Box<dyn MetadataFormatter> {
        match format {
            OutputFormat::Json => Box::new(JsonFormatter::new()),
            OutputFormat::Table => Box::new(TableFormatter::new(color, style)),
        }
    }

    /// Returns the progress message for the specified output format
    pub fn progress_message(format: OutputFormat) -> &'static str {
        match format {
            OutputFormat::Json => "📝 Generating JSON output...",
            OutputFormat::Table => "📝 Generating table output...",
        }
    }
}

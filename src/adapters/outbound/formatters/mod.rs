/// Formatter adapters for the enrichment report
mod humanize;
mod json_formatter;
mod table_formatter;

pub use humanize::{group_thousands, relative_time};
pub use json_formatter::JsonFormatter;
pub use table_formatter::{
    render_downloads, render_published, CellValue, ColorConfig, TableFormatter, TableStyle,
};

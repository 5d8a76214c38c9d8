mod cli;

use cli::{color_enabled, Args};
use sbom_meta::adapters::outbound::console::StderrProgressReporter;
use sbom_meta::adapters::outbound::database::PostgresMetadataResolver;
use sbom_meta::adapters::outbound::filesystem::LockfileInventorySource;
use sbom_meta::adapters::outbound::formatters::ColorConfig;
use sbom_meta::application::dto::EnrichmentRequest;
use sbom_meta::application::factories::{FormatterFactory, PresenterFactory};
use sbom_meta::application::use_cases::EnrichInventoryUseCase;
use sbom_meta::config::{self, ConfigFile, DatabaseConfig};
use sbom_meta::shared::error::ExitCode;
use sbom_meta::shared::Result;
use std::io::IsTerminal;
use std::process;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("\n❌ An error occurred:\n");
        eprintln!("{}", e);

        // Display error chain
        for cause in e.chain().skip(1) {
            eprintln!("\nCaused by: {}", cause);
        }

        eprintln!();
        process::exit(ExitCode::ApplicationError.as_i32());
    }
}

async fn run() -> Result<()> {
    // Parse command-line arguments (clap exits with 2 on usage errors)
    let args = Args::parse_args();

    // Environment first: a malformed CHAI_DB_* fails before any work
    let db_config = DatabaseConfig::from_env()?;

    let config_file = load_config_file(&args)?;
    let options = args.merge(config_file);

    let request = EnrichmentRequest::builder()
        .source_path(options.source.clone())
        .mode(options.mode)
        .sort_key(options.sort_key)
        .exclude_patterns(options.exclude_patterns.clone())
        .concurrency(options.concurrency)
        .build()?;

    // Create adapters (Dependency Injection)
    let use_case = EnrichInventoryUseCase::new(
        LockfileInventorySource::new(),
        PostgresMetadataResolver::new(db_config),
        StderrProgressReporter::new(),
    );

    let response = use_case.execute(request).await?;

    let no_color_env = std::env::var_os("NO_COLOR").is_some();
    let color = ColorConfig::new(color_enabled(
        std::io::stdout().is_terminal(),
        no_color_env,
        &options,
    ));

    eprintln!("{}", FormatterFactory::progress_message(options.format));
    let formatter = FormatterFactory::create(options.format, color, options.table_style);
    let formatted_output = formatter.format(&response.packages)?;

    let presenter = PresenterFactory::create(options.presenter);
    presenter.present(&formatted_output)?;

    Ok(())
}

/// `--config` must exist; otherwise the file is looked up next to SOURCE
fn load_config_file(args: &Args) -> Result<ConfigFile> {
    match &args.config {
        Some(path) => config::load_config_from_path(path),
        None => Ok(config::discover_config(&args.config_search_dir())?.unwrap_or_default()),
    }
}

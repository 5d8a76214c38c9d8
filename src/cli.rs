use clap::Parser;
use std::path::{Path, PathBuf};

use sbom_meta::adapters::outbound::formatters::TableStyle;
use sbom_meta::application::dto::{OutputFormat, MAX_CONCURRENCY};
use sbom_meta::application::factories::PresenterType;
use sbom_meta::config::ConfigFile;
use sbom_meta::enrichment::domain::sort_key::DEFAULT_SORT;
use sbom_meta::enrichment::domain::SortKey;
use sbom_meta::ports::outbound::ResolutionMode;

/// Enrich a project's package inventory with provenance and popularity
/// metadata from a CHAI database
#[derive(Parser, Debug)]
#[command(name = "sbom-meta")]
#[command(version)]
#[command(
    about = "Enrich a project's package inventory with metadata from a CHAI database",
    long_about = None,
    after_help = "Database connection: CHAI_DB_HOST (localhost), CHAI_DB_PORT (5435), \
                  CHAI_DB_USER (postgres), CHAI_DB_PASSWORD, CHAI_DB_NAME (chai)"
)]
pub struct Args {
    /// Project directory or lockfile to scan (defaults to current directory)
    #[arg(value_name = "SOURCE")]
    pub source: Option<PathBuf>,

    /// Output JSON instead of a table
    #[arg(long)]
    pub json: bool,

    /// Sort by package, repository, published or downloads, optionally
    /// followed by ",asc" or ",desc" [default: published,asc]
    #[arg(long, value_name = "FIELD[,DIRECTION]")]
    pub sort: Option<String>,

    /// Also count distinct dependent packages
    #[arg(long)]
    pub full: bool,

    /// Exclude packages matching patterns (supports wildcards: *)
    /// Can be specified multiple times: -e "pytest*" -e "@types/*"
    #[arg(short, long = "exclude", value_name = "PATTERN")]
    pub exclude: Vec<String>,

    /// Number of packages to resolve concurrently [default: 1]
    #[arg(short, long, value_name = "N", value_parser = parse_concurrency)]
    pub concurrency: Option<usize>,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Draw table borders
    #[arg(long)]
    pub borders: bool,

    /// Disable colored package names
    #[arg(long)]
    pub no_color: bool,

    /// Path to a config file (defaults to sbom-meta.config.yml in SOURCE)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

fn parse_concurrency(raw: &str) -> Result<usize, String> {
    let n: usize = raw
        .parse()
        .map_err(|_| format!("'{}' is not a positive integer", raw))?;
    if n == 0 || n > MAX_CONCURRENCY {
        return Err(format!("must be between 1 and {}", MAX_CONCURRENCY));
    }
    Ok(n)
}

/// Settings for one run after merging flags, config file and defaults
#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    pub source: PathBuf,
    pub format: OutputFormat,
    pub sort_key: SortKey,
    pub mode: ResolutionMode,
    pub exclude_patterns: Vec<String>,
    pub concurrency: usize,
    pub table_style: TableStyle,
    pub presenter: PresenterType,
    pub no_color: bool,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn source_path(&self) -> PathBuf {
        self.source.clone().unwrap_or_else(|| PathBuf::from("."))
    }

    /// Directory searched for `sbom-meta.config.yml` when `--config` is absent
    pub fn config_search_dir(&self) -> PathBuf {
        let source = self.source_path();
        if source.is_dir() {
            return source;
        }
        match source.parent() {
            Some(parent) if parent != Path::new("") => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }

    /// Applies precedence: flag > config file > default
    pub fn merge(self, config: ConfigFile) -> Options {
        let source = self.source_path();

        let sort = self
            .sort
            .or(config.sort)
            .unwrap_or_else(|| DEFAULT_SORT.to_string());

        let mode = if self.full || config.full.unwrap_or(false) {
            ResolutionMode::Full
        } else {
            ResolutionMode::Standard
        };

        let mut exclude_patterns = config.exclude_packages.unwrap_or_default();
        for pattern in self.exclude {
            if !exclude_patterns.contains(&pattern) {
                exclude_patterns.push(pattern);
            }
        }

        Options {
            source,
            format: OutputFormat::from_json_flag(self.json || config.json.unwrap_or(false)),
            sort_key: SortKey::parse(&sort),
            mode,
            exclude_patterns,
            concurrency: self.concurrency.or(config.concurrency).unwrap_or(1),
            table_style: TableStyle::from_borders_flag(
                self.borders || config.borders.unwrap_or(false),
            ),
            presenter: PresenterType::from_output(self.output),
            no_color: self.no_color,
        }
    }
}

/// Package names are colored only for an interactive stdout that nobody
/// asked to keep plain
pub fn color_enabled(
    stdout_is_terminal: bool,
    no_color_env: bool,
    options: &Options,
) -> bool {
    stdout_is_terminal && !no_color_env && !options.no_color && !options.presenter.is_file()
}

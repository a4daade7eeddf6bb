use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::{Clock, QuizConfig, QuizLoopService};
use storage::{
    CatalogError, DEFAULT_NAME_KEY, DatasetCatalog, DatasetEntry, DatasetLoader, FileSource,
    HttpSource, PlaceSource,
};
use tracing_subscriber::EnvFilter;
use ui::{App, UiApp, build_app_context};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    EmptyValue { flag: &'static str },
    InvalidTolerance { raw: String },
    InvalidDataset { raw: String, source: CatalogError },
    InvalidCatalog(CatalogError),
    ConflictingSources,
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::EmptyValue { flag } => write!(f, "{flag} cannot be empty"),
            ArgsError::InvalidTolerance { raw } => {
                write!(f, "invalid tolerance (expected kilometres >= 0): {raw}")
            }
            ArgsError::InvalidDataset { raw, source } => {
                write!(f, "invalid --dataset value {raw:?}: {source}")
            }
            ArgsError::InvalidCatalog(err) => write!(f, "invalid dataset list: {err}"),
            ArgsError::ConflictingSources => {
                write!(f, "--data-dir and --base-url cannot be used together")
            }
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    let value = args.next().ok_or(ArgsError::MissingValue { flag })?;
    if value.trim().is_empty() {
        return Err(ArgsError::EmptyValue { flag });
    }
    Ok(value)
}

fn parse_tolerance(raw: &str) -> Result<f64, ArgsError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|km| km.is_finite() && *km >= 0.0)
        .ok_or_else(|| ArgsError::InvalidTolerance {
            raw: raw.to_string(),
        })
}

struct DesktopApp {
    quiz_loop: Arc<QuizLoopService>,
}

impl UiApp for DesktopApp {
    fn quiz_loop(&self) -> Arc<QuizLoopService> {
        Arc::clone(&self.quiz_loop)
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--data-dir <dir> | --base-url <url>]");
    eprintln!("                      [--dataset <file>=<name>]... [--tolerance-km <km>]");
    eprintln!("                      [--name-key <property>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --data-dir data");
    eprintln!("  --dataset parki_narodowe.geojson=Parki Narodowe");
    eprintln!("  --tolerance-km 10");
    eprintln!("  --name-key {DEFAULT_NAME_KEY}");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  GEOQUIZ_DATA_DIR, GEOQUIZ_BASE_URL, GEOQUIZ_TOLERANCE_KM, GEOQUIZ_NAME_KEY");
    eprintln!("  RUST_LOG (default: info)");
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum SourceArg {
    Dir(PathBuf),
    Url(String),
}

#[derive(Debug)]
struct Args {
    source: SourceArg,
    datasets: Vec<DatasetEntry>,
    tolerance_km: Option<f64>,
    name_key: String,
}

/// What the command line asked for.
#[derive(Debug)]
enum Parsed {
    Run(Args),
    Help,
}

impl Args {
    fn parse(
        args: &mut impl Iterator<Item = String>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Parsed, ArgsError> {
        let env = |key: &str| env(key).filter(|value| !value.trim().is_empty());

        let mut data_dir = env("GEOQUIZ_DATA_DIR").map(PathBuf::from);
        let mut base_url = env("GEOQUIZ_BASE_URL");
        let mut tolerance_km = env("GEOQUIZ_TOLERANCE_KM")
            .map(|raw| parse_tolerance(&raw))
            .transpose()?;
        let mut name_key = env("GEOQUIZ_NAME_KEY").unwrap_or_else(|| DEFAULT_NAME_KEY.into());
        let mut datasets = Vec::new();
        let mut flag_dir = false;
        let mut flag_url = false;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--data-dir" => {
                    data_dir = Some(PathBuf::from(require_value(args, "--data-dir")?));
                    flag_dir = true;
                }
                "--base-url" => {
                    base_url = Some(require_value(args, "--base-url")?);
                    flag_url = true;
                }
                "--dataset" => {
                    let raw = require_value(args, "--dataset")?;
                    let entry = raw
                        .parse::<DatasetEntry>()
                        .map_err(|source| ArgsError::InvalidDataset {
                            raw: raw.clone(),
                            source,
                        })?;
                    datasets.push(entry);
                }
                "--tolerance-km" => {
                    let raw = require_value(args, "--tolerance-km")?;
                    tolerance_km = Some(parse_tolerance(&raw)?);
                }
                "--name-key" => {
                    name_key = require_value(args, "--name-key")?.trim().to_string();
                }
                "--help" | "-h" => return Ok(Parsed::Help),
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        // A flag beats the environment; two flags naming different sources is an error.
        let source = match (data_dir, base_url) {
            (Some(_), Some(_)) if flag_dir && flag_url => {
                return Err(ArgsError::ConflictingSources);
            }
            (Some(dir), Some(_)) if flag_dir => SourceArg::Dir(dir),
            (Some(_), Some(url)) if flag_url => SourceArg::Url(url),
            (Some(dir), Some(_)) => SourceArg::Dir(dir),
            (Some(dir), None) => SourceArg::Dir(dir),
            (None, Some(url)) => SourceArg::Url(url),
            (None, None) => SourceArg::Dir(PathBuf::from("data")),
        };

        Ok(Parsed::Run(Self {
            source,
            datasets,
            tolerance_km,
            name_key,
        }))
    }

    fn catalog(&self) -> Result<DatasetCatalog, ArgsError> {
        if self.datasets.is_empty() {
            return Ok(DatasetCatalog::default());
        }
        DatasetCatalog::new(self.datasets.clone()).map_err(ArgsError::InvalidCatalog)
    }

    fn config(&self) -> QuizConfig {
        let config = QuizConfig::default();
        match self.tolerance_km {
            Some(km) => config.with_tolerance_km(km),
            None => config,
        }
    }

    fn place_source(&self) -> Arc<dyn PlaceSource> {
        match &self.source {
            SourceArg::Dir(dir) => Arc::new(FileSource::new(dir.clone())),
            SourceArg::Url(url) => Arc::new(HttpSource::new(url.clone())),
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let parsed = Args::parse(&mut argv, |key| std::env::var(key).ok()).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let args = match parsed {
        Parsed::Help => {
            print_usage();
            return Ok(());
        }
        Parsed::Run(args) => args,
    };

    init_tracing();

    let catalog = args.catalog()?;
    let loader = DatasetLoader::new(args.place_source()).with_name_key(args.name_key.clone());
    tracing::info!(
        source = ?args.source,
        datasets = catalog.entries().len(),
        name_key = %args.name_key,
        "starting geo quiz"
    );

    let quiz_loop = Arc::new(
        QuizLoopService::new(loader, catalog, args.config()).with_clock(Clock::system()),
    );
    let app: Arc<dyn UiApp> = Arc::new(DesktopApp { quiz_loop });
    let context = build_app_context(&app);

    // Some desktop setups default to an always-on-top window.
    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Geo Quiz")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(2);
    }
}

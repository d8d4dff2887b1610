use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use dashdata::config::Config;
use dashdata::resource::{display_value, select};
use dashdata::source::{DirSource, HttpSource, Source};
use dashdata::{format_load_error, DashboardClient, Resource};
use serde_json::{Map, Value};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Load the revenue-cycle dashboard's JSON snapshots
#[derive(Parser, Debug)]
#[command(name = "dashdata", version, about, long_about = None)]
struct Args {
    /// Dashboard server to fetch from
    #[arg(long, global = true, conflicts_with = "data_dir")]
    base_url: Option<String>,

    /// Read snapshots from a local directory instead of a server
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Log level for debugging
    #[arg(long, value_enum, default_value = "off", global = true)]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load one snapshot and print it
    Get {
        /// kpis, payer-summary, denial-trends, claim-risk or incentives
        resource: Resource,

        /// Print only the field at this dot path (e.g. rows.0.payer)
        #[arg(short, long)]
        select: Option<String>,

        /// Print JSON on a single line
        #[arg(long)]
        compact: bool,
    },
    /// Load all snapshots concurrently
    All {
        #[arg(long)]
        compact: bool,
    },
    /// Show where each snapshot is loaded from
    Paths,
    /// Show or change the saved configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    Show,
    SetBaseUrl { url: String },
    SetDataDir { dir: PathBuf },
    SetPath { resource: Resource, path: String },
    ResetPath { resource: Resource },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::OFF,
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Trace => LevelFilter::TRACE,
        }
    }
}

/// Log file next to the config file, or in the working directory when no
/// config directory exists
fn log_file_path() -> PathBuf {
    Config::config_path()
        .and_then(|p| p.parent().map(|dir| dir.join("dashdata.log")))
        .unwrap_or_else(|| PathBuf::from("dashdata.log"))
}

/// Route `tracing` output to the log file. `RUST_LOG` directives refine the
/// `--log-level` default. Logging stays off unless a level is chosen.
fn init_file_logging(level: LogLevel) -> Option<WorkerGuard> {
    let max_level = LevelFilter::from(level);
    if max_level == LevelFilter::OFF {
        return None;
    }

    let path = log_file_path();
    let (dir, file_name) = match (path.parent(), path.file_name()) {
        (Some(dir), Some(name)) if !dir.as_os_str().is_empty() => (dir.to_path_buf(), name.to_owned()),
        (_, Some(name)) => (PathBuf::from("."), name.to_owned()),
        _ => return None,
    };
    if let Err(e) = std::fs::create_dir_all(&dir) {
        eprintln!("Logging disabled, cannot create {}: {}", dir.display(), e);
        return None;
    }

    let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::never(dir, file_name));

    let filter = EnvFilter::builder()
        .with_default_directive(max_level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!(?level, log_file = %path.display(), "dashdata logging started");
    Some(guard)
}

fn build_client(args: &Args, config: &Config) -> Result<DashboardClient> {
    let source: Source =
        match config.effective_data_dir(args.data_dir.as_deref(), args.base_url.as_deref()) {
            Some(dir) => {
                tracing::info!("Reading snapshots from {}", dir.display());
                DirSource::new(dir).into()
            }
            None => {
                let base_url = config.effective_base_url(args.base_url.as_deref());
                tracing::info!("Fetching snapshots from {}", base_url);
                HttpSource::new(&base_url)?.into()
            }
        };

    Ok(DashboardClient::new(source, config.path_table()))
}

fn print_json(value: &Value, compact: bool) -> Result<()> {
    let text = if compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    println!("{}", text);
    Ok(())
}

async fn run(args: Args) -> Result<ExitCode> {
    let mut config = Config::load();

    match &args.command {
        Command::Get {
            resource,
            select: field,
            compact,
        } => {
            let client = build_client(&args, &config)?;
            let value = match client.load_resource(*resource).await {
                Ok(value) => value,
                Err(e) => {
                    eprintln!("{}", format_load_error(&e));
                    return Ok(ExitCode::FAILURE);
                }
            };

            match field {
                Some(field) => match select(&value, field) {
                    Some(selected @ (Value::Array(_) | Value::Object(_))) => {
                        print_json(selected, *compact)?
                    }
                    Some(selected) => println!("{}", display_value(selected)),
                    None => {
                        eprintln!("No field '{}' in {}", field, resource);
                        return Ok(ExitCode::FAILURE);
                    }
                },
                None => print_json(&value, *compact)?,
            }
        }
        Command::All { compact } => {
            let client = build_client(&args, &config)?;
            let data = client.load_all().await;

            let mut out = Map::new();
            for (resource, entry) in data.entries() {
                let value = entry.unwrap_or_else(|e| {
                    let mut error = Map::new();
                    error.insert("error".to_string(), Value::String(format_load_error(e)));
                    Value::Object(error)
                });
                out.insert(resource.key().to_string(), value);
            }
            print_json(&Value::Object(out), *compact)?;

            if data.loaded_count() < Resource::ALL.len() {
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::Paths => {
            let client = build_client(&args, &config)?;
            for (resource, path) in client.paths().iter() {
                println!(
                    "{:<15} {:<20} {}",
                    resource.key(),
                    resource.display_name(),
                    client.source().describe(path)
                );
            }
        }
        Command::Config { action } => {
            match action {
                ConfigAction::Show => {}
                ConfigAction::SetBaseUrl { url } => config.set_base_url(url)?,
                ConfigAction::SetDataDir { dir } => {
                    let dir = std::fs::canonicalize(dir)
                        .with_context(|| format!("No such directory: {}", dir.display()))?;
                    config.set_data_dir(&dir)?
                }
                ConfigAction::SetPath { resource, path } => config.set_path(*resource, path)?,
                ConfigAction::ResetPath { resource } => config.reset_path(*resource)?,
            }
            if let Some(path) = Config::config_path() {
                println!("# {}", path.display());
            }
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
    }

    Ok(ExitCode::SUCCESS)
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();

    let _log_guard = init_file_logging(args.log_level);

    run(args).await
}

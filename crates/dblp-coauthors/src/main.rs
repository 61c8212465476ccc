//! DBLP co-author search - entry point
//!
//! Runs the stdio tool server by default; `search`, `refresh` and `convert`
//! are one-shot commands.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use dblp_coauthors::{
    Config, RefreshConfig, SearchSession,
    convert::convert_dump,
    formatters,
    models::{Matcher, PublicationType, ResponseFormat, ViewOptionsInput},
    refresh::{DownloadReason, RefreshOutcome, Refresher},
    server::ToolServer,
    session::{SearchOutcome, cutoff_year_from_now},
};

#[derive(Parser, Debug)]
#[command(name = "dblp-coauthors")]
#[command(about = "Find recent co-authors in a local DBLP snapshot")]
#[command(version)]
struct Cli {
    /// Directory holding the snapshot files
    #[arg(long, global = true, env = "DBLP_SNAPSHOT_DIR")]
    snapshot_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "info", env = "RUST_LOG")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the search tools over stdio (default)
    Serve,
    /// Run one search and print the result
    Search(SearchArgs),
    /// Download the RDF dump if the local copy is missing or stale
    Refresh(RefreshArgs),
    /// Convert the RDF dump into snapshot files
    Convert(ConvertArgs),
}

#[derive(Args, Debug)]
struct SearchArgs {
    /// Names, "Last, First" names or identifier URLs separated by ';'
    search: String,

    /// Name matcher (startswith or like)
    #[arg(long)]
    matcher: Option<Matcher>,

    /// Only papers from the last N years (1-10)
    #[arg(long, value_parser = clap::value_parser!(i32).range(1..=10))]
    cutoff_years: Option<i32>,

    /// Include papers from every year
    #[arg(long, conflicts_with = "cutoff_years")]
    ignore_cutoff: bool,

    /// One row per joint paper
    #[arg(long)]
    explain: bool,

    /// Hide rows of the searched authors themselves
    #[arg(long)]
    exclude_self: bool,

    /// Identifier URLs to keep, separated by ';'
    #[arg(long)]
    prefilter: Option<String>,

    /// Publication type to hide (repeatable)
    #[arg(long = "exclude-type")]
    exclude_types: Vec<PublicationType>,

    /// Output format (html, markdown, json)
    #[arg(long, default_value = "html")]
    format: ResponseFormat,
}

#[derive(Args, Debug)]
struct RefreshArgs {
    /// Local dump file
    #[arg(long)]
    file: Option<PathBuf>,

    /// Remote directory URL
    #[arg(long)]
    remote_dir: Option<String>,

    /// Maximum tolerated age in days
    #[arg(long)]
    max_age_days: Option<i64>,
}

#[derive(Args, Debug)]
struct ConvertArgs {
    /// Gzipped RDF dump
    #[arg(long, default_value = "dblp.rdf.gz")]
    input: PathBuf,

    /// Directory for the snapshot files (defaults to the snapshot directory)
    #[arg(long)]
    output_dir: Option<PathBuf>,
}

fn init_tracing(log_level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let subscriber = tracing_subscriber::registry().with(filter);

    // stdout carries protocol and command output.
    if json {
        subscriber.with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr)).init();
    } else {
        subscriber
            .with(tracing_subscriber::fmt::layer().compact().with_writer(std::io::stderr))
            .init();
    }
}

fn load_config(snapshot_dir: Option<PathBuf>) -> anyhow::Result<Config> {
    let config = Config::from_env()?;
    Ok(match snapshot_dir {
        Some(dir) => config.with_snapshot_dir(dir),
        None => config,
    })
}

fn run_search(config: Config, args: SearchArgs) -> anyhow::Result<()> {
    let matcher = args.matcher.unwrap_or(config.default_matcher);
    let years = args.cutoff_years.unwrap_or(config.default_cutoff_years);
    let min_year = cutoff_year_from_now(years, args.ignore_cutoff);

    let mut session = SearchSession::open(config)?;
    session.apply_view(&ViewOptionsInput {
        exclude_self: Some(args.exclude_self),
        prefilter: args.prefilter,
        excluded_types: Some(args.exclude_types),
        explain: Some(args.explain),
    });

    match session.search(&args.search, matcher, min_year)? {
        SearchOutcome::NoMatches { message } => println!("{message}"),
        SearchOutcome::Found { hits, view } => {
            println!("{}", formatters::format_search(args.format, &hits, &view)?);
        }
    }
    Ok(())
}

async fn run_refresh(args: RefreshArgs) -> anyhow::Result<()> {
    let mut config = RefreshConfig::from_env()?;
    if let Some(file) = args.file {
        config.local_file = file;
    }
    if let Some(dir) = args.remote_dir {
        config.remote_dir = dir;
    }
    if let Some(days) = args.max_age_days {
        config.max_age_days = days;
    }

    let max_age_days = config.max_age_days;
    let file = config.local_file.clone();
    match Refresher::new(config)?.run().await? {
        RefreshOutcome::Downloaded { reason, bytes } => {
            let why = match reason {
                DownloadReason::Missing => "missing".to_string(),
                DownloadReason::Stale { age_days } => format!("{age_days} days old"),
            };
            println!("Downloaded {} ({why}, {bytes} bytes)", file.display());
        }
        RefreshOutcome::UpToDate { .. } => {
            println!("{} is up to date (less than {max_age_days} days old)", file.display());
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing(&cli.log_level, cli.json_logs);

    tracing::info!(version = env!("CARGO_PKG_VERSION"), command = ?cli.command, "Starting dblp-coauthors");

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => {
            let session = SearchSession::open(load_config(cli.snapshot_dir)?)?;
            ToolServer::new(session).run_stdio().await?;
        }
        Command::Search(args) => run_search(load_config(cli.snapshot_dir)?, args)?,
        Command::Refresh(args) => run_refresh(args).await?,
        Command::Convert(args) => {
            let output_dir = match args.output_dir.or(cli.snapshot_dir) {
                Some(dir) => dir,
                None => Config::from_env()?.snapshot_dir,
            };
            let stats = convert_dump(&args.input, &output_dir)?;
            println!(
                "Wrote {} papers, {} authors and {} links to {} ({} entries without links)",
                stats.papers,
                stats.authors,
                stats.links,
                output_dir.display(),
                stats.skipped_entries
            );
        }
    }

    Ok(())
}

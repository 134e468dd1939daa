//! News-Harvest main entry point
//!
//! Batch command-line front end: fetches every target, writes one result
//! line per extracted item to the output file and logs progress.

use anyhow::{Context, Result};
use clap::Parser;
use news_harvest::config::{load_config_with_hash, Config};
use news_harvest::dispatch;
use news_harvest::harvest::{FetchHooks, NewsFetcher};
use news_harvest::output::{BatchWriter, LineFormat};
use news_harvest::targets::{default_targets, read_target_list};
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// News-Harvest: fetches news titles from news category pages
#[derive(Parser, Debug)]
#[command(name = "news-harvest")]
#[command(version = "1.0.0")]
#[command(about = "Utility for fetching news titles from news category pages", long_about = None)]
struct Cli {
    /// Path to the output result file
    #[arg(long, value_name = "OUTPUT-PATH")]
    out: PathBuf,

    /// Path to a URL list file (one URL per line)
    #[arg(long, value_name = "URL-LIST-PATH")]
    urls: Option<PathBuf>,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Number of concurrent workers (overrides the config file)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=100))]
    concurrency: Option<u32>,

    /// Append each item's URL after its title
    #[arg(long)]
    show_url: bool,

    /// Separator between title and URL (implies --show-url)
    #[arg(long, value_name = "SEP")]
    url_separator: Option<String>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

/// Consumer-side state for a batch run
struct BatchRun {
    writer: BatchWriter<BufWriter<File>>,
    write_error: Option<io::Error>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("failed to load config {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => Config::default(),
    };

    let targets = match &cli.urls {
        Some(path) => read_target_list(path)
            .with_context(|| format!("failed to read URL list {}", path.display()))?,
        None => config.urls.clone().unwrap_or_else(default_targets),
    };

    let concurrency = cli.concurrency.unwrap_or(config.fetch.concurrency) as usize;

    let mut format = LineFormat::from(&config.output);
    if cli.show_url {
        format.show_url = true;
    }
    if let Some(separator) = cli.url_separator {
        format = LineFormat::with_urls(Some(separator));
    }

    let out = File::create(&cli.out)
        .with_context(|| format!("failed to create output file {}", cli.out.display()))?;

    let fetcher = NewsFetcher::from_config(&config)?;
    let (dispatcher, dispatch_loop) = dispatch::channel::<BatchRun>(config.dispatch.poll_interval());

    tracing::info!(
        "Fetching {} targets with {} workers into {}",
        targets.len(),
        concurrency,
        cli.out.display()
    );

    let on_result = dispatcher.clone();
    let on_done = dispatcher.clone();
    let hooks = FetchHooks::new()
        .on_begin(|target| tracing::info!("[{}] begin: {}", target.id, target.url))
        .on_result(move |outcome| {
            on_result.push(move |run: &mut BatchRun| {
                if let Err(e) = run.writer.record(&outcome) {
                    tracing::error!("Failed to write results for [{}]: {}", outcome.id(), e);
                    run.write_error.get_or_insert(e);
                }
            });
        })
        .on_done(move || {
            on_done.push(|run: &mut BatchRun| run.writer.mark_done());
            on_done.push_shutdown();
        });

    let pool = fetcher.run(concurrency, targets, hooks);

    let run = dispatch_loop
        .run(BatchRun {
            writer: BatchWriter::new(BufWriter::new(out), format),
            write_error: None,
        })
        .await;
    pool.wait().await;

    if !run.writer.is_done() {
        anyhow::bail!("dispatch loop closed before the fetch cycle finished");
    }

    let stats = run.writer.stats();
    if let Some(e) = run.write_error {
        return Err(e).context("failed to write results");
    }
    run.writer
        .into_inner()
        .context("failed to flush output file")?;

    if !cli.quiet {
        println!("{}", stats);
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("news_harvest=info,warn"),
            1 => EnvFilter::new("news_harvest=debug,info"),
            2 => EnvFilter::new("news_harvest=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

//! leetfetch CLI
//!
//! Thin consumer of the crawler core: resolves a query, fetches the
//! problem, and prints the text an editor plugin would insert.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use leetfetch::{
    error::{AppError, Result},
    models::{Config, ProblemSummary},
    services::ProblemCrawler,
};

/// Buffer layout: description as a docstring, template below it.
const BUFFER_TEMPLATE: &str = "\"\"\"\n{title}\nLeetCode {identifier} - Difficulty: {difficulty}\n\n{description}\n\"\"\"\n\n{code}\n";

/// leetfetch - LeetCode problem fetcher
#[derive(Parser, Debug)]
#[command(name = "leetfetch", version, about = "Fetches LeetCode problems for editor insertion")]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "leetfetch.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search problems by number, title, or "number. title"
    Search {
        /// The query text
        query: String,

        /// Maximum number of results
        #[arg(short, long, default_value_t = 10)]
        limit: usize,
    },

    /// Fetch the best match for a query and print the buffer text
    Fetch {
        /// The query text
        query: String,
    },

    /// Validate the configuration file
    Validate,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

fn print_summary(summary: &ProblemSummary) {
    let paid_marker = if summary.paid_only { " (paid)" } else { "" };
    println!(
        "{}. {} [{}]{}",
        summary.identifier, summary.title, summary.difficulty, paid_marker
    );
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load_or_default(&cli.config);

    match cli.command {
        Command::Search { query, limit } => {
            let crawler = ProblemCrawler::new(Arc::new(config))?;
            let results = crawler.search(&query, limit).await;

            if results.is_empty() {
                log::warn!("No problems matched '{}'", query);
                return Ok(());
            }
            for summary in &results {
                print_summary(summary);
            }
        }

        Command::Fetch { query } => {
            let crawler = ProblemCrawler::new(Arc::new(config))?;

            let results = crawler.search(&query, 1).await;
            let Some(top) = results.first() else {
                return Err(AppError::validation(format!(
                    "No problem matched '{query}'"
                )));
            };

            log::info!(
                "Fetching {}. {} ({})",
                top.identifier,
                top.title,
                top.canonical_slug
            );

            let identifier = top.identifier.parse::<u32>().unwrap_or(0);
            let record = crawler
                .fetch(identifier, &top.title, Some(&top.canonical_slug))
                .await?;

            print!("{}", record.format(BUFFER_TEMPLATE));
        }

        Command::Validate => {
            log::info!("Validating configuration...");

            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            log::info!("Config OK ({})", cli.config.display());
        }
    }

    Ok(())
}

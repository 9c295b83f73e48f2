//! Sumi-Linkrank main entry point
//!
//! This is the command-line interface for the Sumi-Linkrank internal link
//! analyzer: it runs the HTTP service, one-off analyses, crawls, and report
//! exports.

use anyhow::{bail, Context};
use clap::{ArgGroup, Parser, Subcommand};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use sumi_linkrank::analysis::{AnalyzeRequest, Analyzer};
use sumi_linkrank::config::load_or_default;
use sumi_linkrank::crawler::crawl;
use sumi_linkrank::graph::LinkGraph;
use sumi_linkrank::output::{
    export_report, load_statistics, print_analysis_list, print_analysis_summary,
};
use sumi_linkrank::server::{serve, AppState, SuccessBody};
use sumi_linkrank::storage::Storage;
use tracing_subscriber::EnvFilter;

/// Sumi-Linkrank: internal link structure analysis
///
/// Builds the internal link graph of a site, from a stored crawl or a
/// bounded breadth-first crawl, and reports orphaned pages, hubs,
/// authorities, click depth and a damped link score for every page.
#[derive(Parser, Debug)]
#[command(name = "sumi-linkrank")]
#[command(version = "1.0.0")]
#[command(about = "Internal link graph analyzer", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (defaults are used when omitted)
    #[arg(short, long, value_name = "CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose", global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP analysis service
    Serve {
        /// Address to bind (overrides the config file)
        #[arg(long)]
        bind: Option<String>,
    },

    /// Analyze a stored crawl or a freshly crawled site
    #[command(group(ArgGroup::new("source").required(true).args(["crawl_id", "start_url"])))]
    Analyze {
        /// ID of a stored crawl
        #[arg(long)]
        crawl_id: Option<String>,

        /// URL to start a new crawl from
        #[arg(long)]
        start_url: Option<String>,

        /// Maximum number of pages to crawl
        #[arg(long)]
        max_pages: Option<usize>,

        /// Print the full API response as JSON
        #[arg(long)]
        json: bool,
    },

    /// Crawl a site and store its link graph
    Crawl {
        /// URL to start crawling from
        #[arg(long)]
        start_url: String,

        /// Maximum number of pages to crawl
        #[arg(long)]
        max_pages: Option<usize>,
    },

    /// Store a link graph from a JSON file as a crawl
    Import {
        /// JSON array of `{ "url", "links" }` objects
        #[arg(long)]
        file: PathBuf,

        /// Start URL to record (defaults to the first page)
        #[arg(long)]
        start_url: Option<String>,
    },

    /// List stored analyses, newest first
    List {
        #[arg(long, default_value_t = 20)]
        limit: usize,
    },

    /// Write a markdown report of a stored analysis
    Report {
        #[arg(long)]
        analysis_id: String,

        #[arg(long)]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let (config, config_hash) =
        load_or_default(cli.config.as_deref()).context("failed to load configuration")?;
    match &cli.config {
        Some(path) => tracing::info!(
            "Configuration loaded from {} (hash: {})",
            path.display(),
            config_hash
        ),
        None => tracing::info!("Using default configuration"),
    }

    let analyzer = Analyzer::from_config(config, config_hash)
        .context("failed to initialize analyzer")?;

    match cli.command {
        Command::Serve { bind } => handle_serve(analyzer, bind).await,
        Command::Analyze {
            crawl_id,
            start_url,
            max_pages,
            json,
        } => {
            let request = AnalyzeRequest {
                crawl_id,
                start_url,
                max_pages,
            };
            handle_analyze(&analyzer, request, json).await
        }
        Command::Crawl {
            start_url,
            max_pages,
        } => handle_crawl(&analyzer, &start_url, max_pages).await,
        Command::Import { file, start_url } => handle_import(&analyzer, &file, start_url),
        Command::List { limit } => handle_list(&analyzer, limit),
        Command::Report {
            analysis_id,
            output,
        } => handle_report(&analyzer, &analysis_id, &output),
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("sumi_linkrank=info,warn"),
            1 => EnvFilter::new("sumi_linkrank=debug,info"),
            2 => EnvFilter::new("sumi_linkrank=trace,debug"),
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

async fn handle_serve(analyzer: Analyzer, bind: Option<String>) -> anyhow::Result<()> {
    let bind = bind.unwrap_or_else(|| analyzer.config().server.bind.clone());
    let addr: SocketAddr = bind
        .parse()
        .with_context(|| format!("invalid bind address {}", bind))?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    serve(listener, AppState::new(analyzer))
        .await
        .context("server shutdown")?;
    Ok(())
}

async fn handle_analyze(
    analyzer: &Analyzer,
    request: AnalyzeRequest,
    json: bool,
) -> anyhow::Result<()> {
    let outcome = analyzer
        .run(request)
        .await
        .context("analysis failed")?;

    if let Some(crawl_id) = &outcome.crawl_id {
        tracing::info!("Crawled graph stored as {}", crawl_id);
    }

    if json {
        let body = SuccessBody::from_outcome(outcome);
        println!("{}", serde_json::to_string_pretty(&body)?);
    } else {
        print_analysis_summary(&outcome.analysis.report, outcome.analysis_id.as_deref());
    }
    Ok(())
}

async fn handle_crawl(
    analyzer: &Analyzer,
    start_url: &str,
    max_pages: Option<usize>,
) -> anyhow::Result<()> {
    let graph = crawl(analyzer.config(), start_url, max_pages)
        .await
        .with_context(|| format!("crawl of {} failed", start_url))?;

    let crawl_id = analyzer
        .store_graph(start_url, &graph)
        .context("failed to store crawl")?;

    println!(
        "✓ Crawled {} pages ({} internal links)",
        graph.len(),
        graph.edge_count()
    );
    println!("✓ Stored as crawl {}", crawl_id);
    Ok(())
}

fn handle_import(
    analyzer: &Analyzer,
    file: &Path,
    start_url: Option<String>,
) -> anyhow::Result<()> {
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("failed to read {}", file.display()))?;
    let graph: LinkGraph = serde_json::from_str(&content)
        .with_context(|| format!("{} is not a valid link graph", file.display()))?;

    let start_url = match start_url.or_else(|| graph.first_url().map(String::from)) {
        Some(url) => url,
        None => bail!("{} contains no pages", file.display()),
    };

    let crawl_id = analyzer
        .store_graph(&start_url, &graph)
        .context("failed to store crawl")?;

    println!(
        "✓ Imported {} pages ({} links) as crawl {}",
        graph.len(),
        graph.edge_count(),
        crawl_id
    );
    Ok(())
}

fn handle_list(analyzer: &Analyzer, limit: usize) -> anyhow::Result<()> {
    let (listing, stats) = analyzer
        .with_storage(|s| {
            let listing = s.list_analyses(limit)?;
            let stats = load_statistics(&*s)?;
            Ok((listing, stats))
        })
        .context("failed to read stored analyses")?;

    print_analysis_list(&listing, &stats);
    Ok(())
}

fn handle_report(
    analyzer: &Analyzer,
    analysis_id: &str,
    output: &Path,
) -> anyhow::Result<()> {
    analyzer
        .with_storage(|s| Ok(export_report(&*s, analysis_id, output)))
        .context("failed to open storage")?
        .with_context(|| format!("failed to export analysis {}", analysis_id))?;

    println!("✓ Report written to: {}", output.display());
    Ok(())
}

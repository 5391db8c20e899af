//! metasearch CLI - meta search engine command line interface.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use metasearch_core::{
    CancellationToken, EngineRegistry, Search, SearchConfig, SearchOptions, SearchResponse,
};

/// metasearch - query several search engines at once
#[derive(Parser)]
#[command(name = "metasearch")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Search using meta search engine
    Search(SearchArgs),

    /// List available search engines
    Engines,
}

#[derive(Parser)]
struct SearchArgs {
    /// Search query
    query: String,

    /// Search engines to use (comma-separated shortcuts or aliases)
    #[arg(short, long, value_delimiter = ',')]
    engines: Option<Vec<String>>,

    /// Maximum number of results to display
    #[arg(short, long)]
    limit: Option<usize>,

    /// Per-engine timeout in seconds
    #[arg(short, long)]
    timeout: Option<u64>,

    /// Output format
    #[arg(short, long, default_value = "text")]
    format: OutputFormat,

    /// Proxy URL (e.g., http://127.0.0.1:8080 or socks5://127.0.0.1:1080)
    #[arg(short, long)]
    proxy: Option<String>,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Human-readable text output
    Text,
    /// JSON output
    Json,
    /// Compact single-line output
    Compact,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = match &cli.config {
        Some(path) => SearchConfig::from_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => SearchConfig::default(),
    };
    let registry = Arc::new(EngineRegistry::from_config(&config)?);

    match cli.command {
        Commands::Search(args) => run_search(registry, &config, args).await,
        Commands::Engines => {
            list_engines(&registry);
            Ok(())
        }
    }
}

fn list_engines(registry: &EngineRegistry) {
    println!("Available search engines:\n");
    for spec in registry.engines() {
        let config = spec.config();
        let aliases = if config.aliases.is_empty() {
            String::new()
        } else {
            format!(" ({})", config.aliases.join(", "))
        };
        let default = if registry.is_default(&config.shortcut) {
            " [default]"
        } else {
            ""
        };
        println!(
            "  {:<9}- {}{}{}",
            config.shortcut, config.name, aliases, default
        );
    }
    println!();
    println!("Usage: metasearch search \"query\" -e ddg,wiki,sogou");
}

async fn run_search(
    registry: Arc<EngineRegistry>,
    config: &SearchConfig,
    args: SearchArgs,
) -> Result<()> {
    let mut options = SearchOptions::from_config(config);
    if let Some(engines) = args.engines {
        options.engines = Some(engines.into_iter().map(|e| e.trim().to_string()).collect());
    }
    options.limit = args.limit;
    if let Some(secs) = args.timeout {
        options.timeout = Duration::from_secs(secs);
    }
    if let Some(proxy) = args.proxy {
        options.proxy = Some(proxy);
    }

    if let (Some(proxy), OutputFormat::Text) = (&options.proxy, args.format) {
        eprintln!("Using proxy: {}", proxy);
    }

    let cancel = CancellationToken::new();
    let cancel_on_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("received Ctrl+C, cancelling search");
            cancel_on_signal.cancel();
        }
    });

    let search = Search::with_registry(registry);
    let response = search
        .search_with_cancel(&args.query, options, &cancel)
        .await?;

    match args.format {
        OutputFormat::Text => print_text(&args.query, &response),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&response)?),
        OutputFormat::Compact => {
            for result in &response.results {
                println!("{}\t{}", result.title, result.url);
            }
        }
    }

    Ok(())
}

fn print_text(query: &str, response: &SearchResponse) {
    println!(
        "\nSearch results for \"{}\" ({} results in {}ms):\n",
        query,
        response.count,
        response.duration.as_millis()
    );

    for (i, result) in response.results.iter().enumerate() {
        println!("{}. {}", i + 1, result.title);
        println!("   URL: {}", result.url);
        if !result.content.is_empty() {
            println!("   {}", truncate(&result.content, 150));
        }
        println!(
            "   Engines: {} | Score: {:.2}",
            result.engines.join(", "),
            result.score
        );
        println!();
    }

    for failure in &response.errors {
        eprintln!("Engine {} failed: {}", failure.engine, failure.message);
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => format!("{}...", &text[..end]),
        None => text.to_string(),
    }
}

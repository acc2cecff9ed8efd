use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use dialoguer::{Confirm, Input};
use sift_core::{Config, ProjectIndexer, SearchOutcome, SearchSession};
use sift_index::{EntityKind, Extractor};
use sift_store::{ChromaStore, Embedder, OllamaEmbedder, SearchHit, VectorStore};

/// Semantic search over the service interfaces of a PHP project.
#[derive(Parser)]
#[command(name = "sift", version)]
struct Cli {
    /// Configuration file (TOML). Falls back to `SIFT_CONFIG`, then
    /// `config/default.toml`.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Discover, extract, embed and store project entities.
    Index {
        /// Entity kinds to index; all kinds when omitted.
        #[arg(long = "kind")]
        kinds: Vec<EntityKind>,
        /// Drop the collection before indexing.
        #[arg(long)]
        rebuild: bool,
    },
    /// Interactive query loop on stdin.
    Search,
    /// Print the entities extracted from one PHP file as JSON.
    Extract { file: PathBuf },
    /// Print the normalized query and its detected entity types.
    Classify { query: String },
    /// Serve the `search_in_project` tool over stdio (MCP).
    Mcp,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_subscriber();

    let config_path = resolve_config_path(cli.config.as_deref());
    let config = Config::load(&config_path)
        .with_context(|| format!("failed to load config from {}", config_path.display()))?;
    config.validate()?;

    match cli.command {
        Command::Index { kinds, rebuild } => run_index(&config, kinds, rebuild).await,
        Command::Search => run_search(&config).await,
        Command::Extract { file } => run_extract(&file),
        Command::Classify { query } => {
            run_classify(&config, &query);
            Ok(())
        }
        Command::Mcp => run_mcp(&config).await,
    }
}

fn resolve_config_path(cli_path: Option<&Path>) -> PathBuf {
    if let Some(path) = cli_path {
        return path.to_path_buf();
    }
    if let Ok(path) = std::env::var("SIFT_CONFIG") {
        return PathBuf::from(path);
    }
    PathBuf::from("config/default.toml")
}

fn init_subscriber() {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

fn backends(config: &Config) -> (Arc<dyn Embedder>, Arc<dyn VectorStore>) {
    let embedder = OllamaEmbedder::new(&config.embedding.base_url, &config.embedding.model);
    let store = ChromaStore::new(&config.store.url, &config.store.tenant, &config.store.database);
    (Arc::new(embedder), Arc::new(store))
}

async fn run_index(config: &Config, kinds: Vec<EntityKind>, rebuild: bool) -> anyhow::Result<()> {
    let (embedder, store) = backends(config);
    if rebuild {
        store
            .delete_collection(&config.project.name)
            .await
            .context("failed to drop collection")?;
        tracing::info!(collection = %config.project.name, "collection dropped");
    }

    let kinds = if kinds.is_empty() {
        EntityKind::ALL.to_vec()
    } else {
        kinds
    };
    let indexer = ProjectIndexer::new(config, embedder, store);
    let report = indexer.index_project(&kinds).await?;

    for error in &report.errors {
        eprintln!("skipped {error}");
    }
    println!(
        "Indexed {} entities from {}/{} files in {} ms",
        report.entities, report.files_indexed, report.files_scanned, report.duration_ms
    );
    Ok(())
}

async fn run_search(config: &Config) -> anyhow::Result<()> {
    let (embedder, store) = backends(config);
    let session = SearchSession::new(config, embedder, store);

    loop {
        let query: String = Input::new()
            .with_prompt("Query (empty or `exit` to quit)")
            .allow_empty(true)
            .interact_text()?;
        if sift_core::search::is_exit_command(&query) {
            break;
        }

        match session.search(&query).await? {
            SearchOutcome::Unprocessable => {
                println!("Nothing searchable in that query, try different words.");
            }
            SearchOutcome::Hits { types, hits } => {
                println!("Types: {}", types.join(", "));
                print_pages(&hits, config.search.page_size)?;
            }
        }
    }
    Ok(())
}

fn print_pages(hits: &[SearchHit], page_size: usize) -> anyhow::Result<()> {
    if hits.is_empty() {
        println!("No results.");
        return Ok(());
    }
    let pages = hits.chunks(page_size.max(1));
    let last = pages.len() - 1;
    for (i, page) in pages.enumerate() {
        for hit in page {
            println!("\n{}  ({})", hit.metadata.name, hit.metadata.kind);
            println!("{}", hit.metadata.file_reference);
            if let Some(distance) = hit.distance {
                println!("distance: {distance:.4}");
            }
            println!("{}", hit.metadata.code);
        }
        if i < last && !Confirm::new().with_prompt("Show more?").default(true).interact()? {
            break;
        }
    }
    Ok(())
}

fn run_extract(file: &Path) -> anyhow::Result<()> {
    let source = std::fs::read_to_string(file)
        .with_context(|| format!("failed to read {}", file.display()))?;
    let entities = Extractor::php()
        .extract(&source)
        .with_context(|| format!("failed to extract {}", file.display()))?;
    println!("{}", serde_json::to_string_pretty(&entities)?);
    Ok(())
}

fn run_classify(config: &Config, query: &str) {
    let stop_words = config.stop_words();
    let normalized = sift_text::normalize_query(query, &stop_words);
    let labels = sift_query::classify(&normalized, &config.query.categories);
    println!("normalized: {normalized}");
    println!("types: {}", labels.into_vec().join(", "));
}

async fn run_mcp(config: &Config) -> anyhow::Result<()> {
    let (embedder, store) = backends(config);
    let session = SearchSession::new(config, embedder, store);
    let server = sift_mcp::SearchServer::new(
        Arc::new(session),
        config.project.name.clone(),
        config.mcp.num_results,
    );
    sift_mcp::serve_stdio(server).await
}

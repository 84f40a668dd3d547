use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use docroute_common::{logger, AppConfig};
use docroute_llm::{GeminiClient, LlmClient, OllamaClient, TaskRunner, TextEmbedder};
use docroute_retrieval::{loader, Ingestor, SearchEngine};

/// Find project root by looking for .git directory
fn find_project_root() -> Option<PathBuf> {
    let mut current_dir = std::env::current_dir().ok()?;

    loop {
        if current_dir.join(".git").exists() {
            return Some(current_dir);
        }

        if !current_dir.pop() {
            break;
        }
    }

    None
}

/// Load .env file from project root
fn load_dotenv_from_project_root() {
    if let Some(root) = find_project_root() {
        let env_path = root.join(".env");
        if env_path.exists() {
            dotenv::from_path(&env_path).ok();
        }
    } else {
        // Fallback to default dotenv behavior
        dotenv::dotenv().ok();
    }
}

#[derive(Parser)]
#[command(name = "docroute")]
#[command(about = "DocRoute - retrieval-augmented text assistant", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ingest a directory of documents and save the index
    Ingest {
        /// Directory to ingest
        dir: PathBuf,

        /// Index file to write (defaults to the configured path)
        #[arg(long)]
        index: Option<PathBuf>,
    },

    /// Search the index for documents similar to a query
    Search {
        /// Search query
        query: String,

        /// Number of results
        #[arg(long, default_value_t = 3)]
        top_k: usize,

        /// Index file to read (defaults to the configured path)
        #[arg(long)]
        index: Option<PathBuf>,
    },

    /// Answer a question using retrieved documents as context
    Ask {
        /// Question to answer
        question: String,

        /// Number of context documents
        #[arg(long, default_value_t = 2)]
        top_k: usize,

        /// Index file to read (defaults to the configured path)
        #[arg(long)]
        index: Option<PathBuf>,
    },

    /// Run a generative text task over a file
    Task {
        #[command(subcommand)]
        task: TaskCommand,
    },
}

#[derive(Subcommand)]
enum TaskCommand {
    /// Summarize the file
    Summarize { file: PathBuf },

    /// Classify the file's sentiment
    Sentiment { file: PathBuf },

    /// Extract named entities from the file
    Entities { file: PathBuf },

    /// Generate code from the problem statement in the file
    Codegen { file: PathBuf },

    /// Review the code in the file
    Review { file: PathBuf },
}

/// Pick the generative backend: hosted Gemini when a key is configured,
/// local Ollama otherwise
fn generation_backend(config: &AppConfig) -> Result<Arc<dyn LlmClient>> {
    if config.gemini_api_key.is_some() {
        Ok(Arc::new(GeminiClient::from_config(config)?))
    } else {
        Ok(Arc::new(OllamaClient::from_config(config)?))
    }
}

fn search_engine(config: &AppConfig) -> Result<SearchEngine> {
    let embedder: Arc<dyn TextEmbedder> = Arc::new(OllamaClient::from_config(config)?);
    Ok(SearchEngine::new(embedder))
}

async fn run_ingest(config: &AppConfig, dir: &Path, index: Option<PathBuf>) -> Result<()> {
    let engine = search_engine(config)?;
    let ingestor = Ingestor::new(engine.clone())
        .with_chunking(config.chunk_size, config.chunk_overlap);

    let summary = ingestor.ingest_directory(dir).await?;

    let index_path = index.unwrap_or_else(|| config.index_path.clone());
    engine.save_index(&index_path).await?;

    println!(
        "Ingested {} documents from {} files into {}",
        summary.documents_added,
        summary.files_seen,
        index_path.display()
    );
    for failure in &summary.failures {
        println!("  skipped {}: {}", failure.path.display(), failure.reason);
    }

    Ok(())
}

async fn run_search(
    config: &AppConfig,
    query: &str,
    top_k: usize,
    index: Option<PathBuf>,
) -> Result<()> {
    let engine = search_engine(config)?;
    let index_path = index.unwrap_or_else(|| config.index_path.clone());
    engine.load_index(&index_path).await?;

    let results = engine.search(query, top_k).await?;
    if results.is_empty() {
        println!("No documents found matching the query.");
        return Ok(());
    }

    for (rank, result) in results.iter().enumerate() {
        let text = engine.document_text(&result.doc_id).await;
        let metadata = engine.document_metadata(&result.doc_id).await;
        let preview: String = text.chars().take(200).collect();

        println!(
            "{}. {} (score: {:.4})",
            rank + 1,
            result.doc_id,
            result.score
        );
        println!("   metadata: {}", serde_json::to_string(&metadata)?);
        println!("   {}{}", preview, if text.len() > preview.len() { "..." } else { "" });
    }

    Ok(())
}

async fn run_ask(
    config: &AppConfig,
    question: &str,
    top_k: usize,
    index: Option<PathBuf>,
) -> Result<()> {
    let engine = search_engine(config)?;
    let index_path = index.unwrap_or_else(|| config.index_path.clone());
    engine.load_index(&index_path).await?;

    let results = engine.search(question, top_k).await?;
    let mut contexts = Vec::new();
    for result in &results {
        contexts.push(engine.document_text(&result.doc_id).await);
    }

    let tasks = TaskRunner::new(generation_backend(config)?);
    let answer = if contexts.is_empty() {
        tasks.answer(question, None).await?
    } else {
        tasks.answer(question, Some(&contexts.join("\n"))).await?
    };

    println!("{}", answer);
    Ok(())
}

async fn run_task(config: &AppConfig, task: TaskCommand) -> Result<()> {
    let tasks = TaskRunner::new(generation_backend(config)?);

    let output = match task {
        TaskCommand::Summarize { file } => tasks.summarize(&loader::load_text(&file)?).await?,
        TaskCommand::Sentiment { file } => tasks.sentiment(&loader::load_text(&file)?).await?,
        TaskCommand::Entities { file } => {
            tasks.extract_entities(&loader::load_text(&file)?).await?
        }
        TaskCommand::Codegen { file } => tasks.generate_code(&loader::load_text(&file)?).await?,
        TaskCommand::Review { file } => tasks.review_code(&loader::load_text(&file)?).await?,
    };

    println!("{}", output);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load environment variables from .env at project root
    load_dotenv_from_project_root();

    let config = AppConfig::from_env()?;
    logger::setup_console_logging(&config.log_level)?;

    tracing::debug!(
        "Configuration loaded: index={}, ollama={}",
        config.index_path.display(),
        config.ollama_base_url
    );

    match cli.command {
        Commands::Ingest { dir, index } => run_ingest(&config, &dir, index).await?,
        Commands::Search {
            query,
            top_k,
            index,
        } => run_search(&config, &query, top_k, index).await?,
        Commands::Ask {
            question,
            top_k,
            index,
        } => run_ask(&config, &question, top_k, index).await?,
        Commands::Task { task } => run_task(&config, task).await?,
    }

    Ok(())
}

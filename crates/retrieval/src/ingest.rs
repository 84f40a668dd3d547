use docroute_common::{DocRouteError, Result};
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::chunking::{chunk_text, DEFAULT_CHUNK_OVERLAP, DEFAULT_CHUNK_SIZE};
use crate::engine::SearchEngine;
use crate::loader;
use crate::types::{MetaValue, Metadata};

/// File extensions ingested by default
pub const DEFAULT_EXTENSIONS: &[&str] = &["txt", "md", "csv", "json"];

/// One file that could not be ingested
#[derive(Debug, Clone)]
pub struct IngestFailure {
    /// Path of the failed file
    pub path: PathBuf,

    /// Failure description
    pub reason: String,
}

/// Outcome of one directory ingestion
#[derive(Debug, Clone, Default)]
pub struct IngestSummary {
    /// Files matching the extension filter
    pub files_seen: usize,

    /// Documents added to the store
    pub documents_added: usize,

    /// Files skipped after a parse or embedding failure
    pub failures: Vec<IngestFailure>,
}

/// Walks a directory tree and feeds matching files into a search engine.
///
/// A failure on any single file is recorded and the walk continues; only a
/// missing root directory aborts the ingestion.
pub struct Ingestor {
    engine: SearchEngine,
    chunk_size: usize,
    chunk_overlap: usize,
    extensions: Vec<String>,
}

impl Ingestor {
    /// Create ingestor with default chunking and extension filter
    pub fn new(engine: SearchEngine) -> Self {
        Self {
            engine,
            chunk_size: DEFAULT_CHUNK_SIZE,
            chunk_overlap: DEFAULT_CHUNK_OVERLAP,
            extensions: DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Override chunking parameters
    pub fn with_chunking(mut self, chunk_size: usize, chunk_overlap: usize) -> Self {
        self.chunk_size = chunk_size;
        self.chunk_overlap = chunk_overlap;
        self
    }

    /// Override the allowed extension set (without leading dots)
    pub fn with_extensions(mut self, extensions: &[&str]) -> Self {
        self.extensions = extensions.iter().map(|s| s.to_lowercase()).collect();
        self
    }

    /// Ingest all matching files under a directory, recursively
    pub async fn ingest_directory(&self, dir: &Path) -> Result<IngestSummary> {
        if !dir.is_dir() {
            return Err(DocRouteError::invalid_input(format!(
                "Not a directory: {}",
                dir.display()
            )));
        }

        info!("Ingesting directory: {}", dir.display());
        let mut summary = IngestSummary::default();

        // Ignore-file filtering off: every file in the tree is considered
        let walker = WalkBuilder::new(dir).standard_filters(false).build();

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Error walking directory: {}", e);
                    continue;
                }
            };

            let path = entry.path();
            if !entry.file_type().map_or(false, |t| t.is_file()) {
                continue;
            }

            let Some(ext) = path
                .extension()
                .and_then(|e| e.to_str())
                .map(str::to_lowercase)
            else {
                continue;
            };
            if !self.extensions.contains(&ext) {
                continue;
            }

            summary.files_seen += 1;

            match self.ingest_file(path, &ext).await {
                Ok(added) => summary.documents_added += added,
                Err(e) => {
                    warn!("Error ingesting file {}: {}", path.display(), e);
                    summary.failures.push(IngestFailure {
                        path: path.to_path_buf(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        info!(
            "Ingestion completed - {} documents from {} files ({} failures)",
            summary.documents_added,
            summary.files_seen,
            summary.failures.len()
        );
        Ok(summary)
    }

    /// Ingest one file, returning the number of documents added
    async fn ingest_file(&self, path: &Path, ext: &str) -> Result<usize> {
        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| {
                DocRouteError::invalid_input(format!("Unreadable file name: {}", path.display()))
            })?;

        match ext {
            "csv" => self.ingest_csv(path, filename).await,
            "json" => self.ingest_json(path, filename).await,
            _ => self.ingest_text(path, filename).await,
        }
    }

    /// One document per CSV row, cells joined with spaces
    async fn ingest_csv(&self, path: &Path, filename: &str) -> Result<usize> {
        let rows = loader::load_csv(path)?;

        for (row_index, row) in rows.iter().enumerate() {
            let doc_id = format!("{}_{}", filename, row_index);
            let text = row.join(" ");

            let mut metadata = Metadata::new();
            metadata.insert("source".to_string(), MetaValue::from(path.display().to_string()));
            metadata.insert("row".to_string(), MetaValue::from(row_index));

            self.engine.add_document(doc_id, &text, metadata).await?;
        }

        Ok(rows.len())
    }

    /// List root: one document per element; otherwise one document for the
    /// whole file
    async fn ingest_json(&self, path: &Path, filename: &str) -> Result<usize> {
        let data = loader::load_json(path)?;
        let source = path.display().to_string();

        match data {
            serde_json::Value::Array(items) => {
                let count = items.len();
                for (index, item) in items.into_iter().enumerate() {
                    let doc_id = format!("{}_{}", filename, index);
                    let text = serde_json::to_string(&item)?;

                    let mut metadata = Metadata::new();
                    metadata.insert("source".to_string(), MetaValue::from(source.clone()));
                    metadata.insert("index".to_string(), MetaValue::from(index));

                    self.engine.add_document(doc_id, &text, metadata).await?;
                }
                Ok(count)
            }
            other => {
                let text = serde_json::to_string(&other)?;

                let mut metadata = Metadata::new();
                metadata.insert("source".to_string(), MetaValue::from(source));

                self.engine.add_document(filename, &text, metadata).await?;
                Ok(1)
            }
        }
    }

    /// Chunked text file: a single chunk keeps the bare filename as id
    async fn ingest_text(&self, path: &Path, filename: &str) -> Result<usize> {
        let text = loader::load_text(path)?;
        let chunks = chunk_text(&text, self.chunk_size, self.chunk_overlap);
        let source = path.display().to_string();

        let count = chunks.len();
        for (chunk_index, chunk) in chunks.iter().enumerate() {
            let doc_id = if count > 1 {
                format!("{}_{}", filename, chunk_index)
            } else {
                filename.to_string()
            };

            let mut metadata = Metadata::new();
            metadata.insert("source".to_string(), MetaValue::from(source.clone()));
            metadata.insert("chunk".to_string(), MetaValue::from(chunk_index));

            self.engine.add_document(doc_id, &chunk.text, metadata).await?;
        }

        Ok(count)
    }
}

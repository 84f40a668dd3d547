use docroute_common::{DocRouteError, Result};
use docroute_llm::TextEmbedder;
use std::cmp::Ordering;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::persistence;
use crate::similarity::dot_product;
use crate::store::DocumentStore;
use crate::types::{Metadata, SearchResult};

/// Vector search engine.
///
/// Owns the document store and ranks stored documents against a query by
/// raw dot product of embeddings.
#[derive(Clone)]
pub struct SearchEngine {
    store: Arc<RwLock<DocumentStore>>,
    embedder: Arc<dyn TextEmbedder>,
}

impl SearchEngine {
    /// Create new engine with an empty store
    pub fn new(embedder: Arc<dyn TextEmbedder>) -> Self {
        Self {
            store: Arc::new(RwLock::new(DocumentStore::new())),
            embedder,
        }
    }

    /// Add document to the store, overwriting any prior entry with the
    /// same id. Embedding failure propagates to the caller.
    pub async fn add_document(
        &self,
        doc_id: impl Into<String>,
        text: &str,
        metadata: Metadata,
    ) -> Result<()> {
        let doc_id = doc_id.into();
        debug!("Adding document to index: {}", doc_id);

        let embedding = self
            .embedder
            .embed(text)
            .await
            .map_err(|e| DocRouteError::embedding(format!("'{}': {}", doc_id, e)))?;

        let mut store = self.store.write().await;
        store.insert(doc_id, text.to_string(), metadata, embedding);

        Ok(())
    }

    /// Search for documents similar to the query.
    ///
    /// Returns at most `top_k` results, sorted by descending score. An
    /// empty store yields an empty result without touching the embedder.
    pub async fn search(&self, query: &str, top_k: usize) -> Result<Vec<SearchResult>> {
        if self.store.read().await.is_empty() {
            return Ok(Vec::new());
        }

        debug!("Searching for: {} (top_k={})", query, top_k);

        let query_embedding = self
            .embedder
            .embed(query)
            .await
            .map_err(|e| DocRouteError::embedding(format!("query embedding: {}", e)))?;

        let store = self.store.read().await;
        let mut results: Vec<SearchResult> = store
            .embeddings()
            .map(|(doc_id, embedding)| {
                SearchResult::new(doc_id.clone(), dot_product(&query_embedding, embedding))
            })
            .collect();

        results.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        results.truncate(top_k);

        info!(
            "Search completed - {} results from {} documents",
            results.len(),
            store.len()
        );
        Ok(results)
    }

    /// Get the text of a document, empty string if absent
    pub async fn document_text(&self, doc_id: &str) -> String {
        self.store.read().await.text(doc_id)
    }

    /// Get the metadata of a document, empty map if absent
    pub async fn document_metadata(&self, doc_id: &str) -> Metadata {
        self.store.read().await.metadata(doc_id)
    }

    /// Number of stored documents
    pub async fn document_count(&self) -> usize {
        self.store.read().await.len()
    }

    /// Embedding dimension of the stored documents, if any
    pub async fn dimension(&self) -> Option<usize> {
        self.store.read().await.dimension()
    }

    /// Save the full store to an index file
    pub async fn save_index(&self, path: &Path) -> Result<()> {
        let store = self.store.read().await;
        persistence::save_index(&store, path)
    }

    /// Replace the in-memory store with the contents of an index file.
    ///
    /// All-or-nothing: on any load failure, the prior state is untouched.
    pub async fn load_index(&self, path: &Path) -> Result<()> {
        let loaded = persistence::load_index(path)?;
        *self.store.write().await = loaded;
        Ok(())
    }
}

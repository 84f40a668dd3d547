use std::collections::HashMap;

use crate::types::Metadata;

/// In-memory document store.
///
/// Three maps kept in lockstep: every id present in one is present in all.
/// `insert` is the only mutation path and maintains that invariant;
/// re-inserting an id overwrites the prior entry.
#[derive(Debug, Clone, Default)]
pub struct DocumentStore {
    documents: HashMap<String, String>,
    metadata: HashMap<String, Metadata>,
    embeddings: HashMap<String, Vec<f32>>,
}

impl DocumentStore {
    /// Create new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from its three maps.
    ///
    /// Callers must pass maps with identical key sets; persistence
    /// validates this before constructing a store.
    pub(crate) fn from_parts(
        documents: HashMap<String, String>,
        metadata: HashMap<String, Metadata>,
        embeddings: HashMap<String, Vec<f32>>,
    ) -> Self {
        Self {
            documents,
            metadata,
            embeddings,
        }
    }

    /// Insert a document, overwriting any prior entry with the same id
    pub fn insert(
        &mut self,
        doc_id: impl Into<String>,
        text: String,
        metadata: Metadata,
        embedding: Vec<f32>,
    ) {
        let doc_id = doc_id.into();
        self.documents.insert(doc_id.clone(), text);
        self.metadata.insert(doc_id.clone(), metadata);
        self.embeddings.insert(doc_id, embedding);
    }

    /// Get document text, or empty string if absent (lenient lookup)
    pub fn text(&self, doc_id: &str) -> String {
        self.documents.get(doc_id).cloned().unwrap_or_default()
    }

    /// Get document metadata, or empty map if absent (lenient lookup)
    pub fn metadata(&self, doc_id: &str) -> Metadata {
        self.metadata.get(doc_id).cloned().unwrap_or_default()
    }

    /// Iterate over (id, embedding) pairs, in no particular order
    pub fn embeddings(&self) -> impl Iterator<Item = (&String, &Vec<f32>)> {
        self.embeddings.iter()
    }

    /// Embedding dimension, when at least one document is stored
    pub fn dimension(&self) -> Option<usize> {
        self.embeddings.values().next().map(Vec::len)
    }

    /// Number of stored documents
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Whether the store holds no documents
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub(crate) fn documents_map(&self) -> &HashMap<String, String> {
        &self.documents
    }

    pub(crate) fn metadata_map(&self) -> &HashMap<String, Metadata> {
        &self.metadata
    }

    pub(crate) fn embeddings_map(&self) -> &HashMap<String, Vec<f32>> {
        &self.embeddings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MetaValue;

    fn sample_metadata() -> Metadata {
        let mut meta = Metadata::new();
        meta.insert("source".to_string(), MetaValue::from("notes.txt"));
        meta
    }

    #[test]
    fn test_insert_keeps_maps_in_lockstep() {
        let mut store = DocumentStore::new();
        store.insert("doc1", "hello".to_string(), sample_metadata(), vec![1.0, 0.0]);

        assert_eq!(store.len(), 1);
        assert_eq!(store.text("doc1"), "hello");
        assert_eq!(store.metadata("doc1").get("source"), Some(&MetaValue::from("notes.txt")));
        assert_eq!(store.embeddings().count(), 1);
    }

    #[test]
    fn test_insert_overwrites_same_id() {
        let mut store = DocumentStore::new();
        store.insert("doc1", "old".to_string(), Metadata::new(), vec![1.0]);
        store.insert("doc1", "new".to_string(), Metadata::new(), vec![2.0]);

        assert_eq!(store.len(), 1);
        assert_eq!(store.text("doc1"), "new");
        assert_eq!(store.embeddings().next().unwrap().1, &vec![2.0]);
    }

    #[test]
    fn test_lenient_lookups_return_defaults() {
        let store = DocumentStore::new();
        assert_eq!(store.text("missing"), "");
        assert!(store.metadata("missing").is_empty());
    }

    #[test]
    fn test_dimension() {
        let mut store = DocumentStore::new();
        assert_eq!(store.dimension(), None);

        store.insert("doc1", "a".to_string(), Metadata::new(), vec![0.0; 8]);
        assert_eq!(store.dimension(), Some(8));
    }
}

//! On-disk index serialization.
//!
//! The index file is a single JSON document with three sections keyed by
//! document id: `documents`, `metadata` and `embeddings`. A well-formed
//! file carries identical key sets in all three. Loading is all-or-nothing:
//! a malformed file never yields a store.

use chrono::{DateTime, Utc};
use docroute_common::{DocRouteError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info};

use crate::store::DocumentStore;
use crate::types::Metadata;

#[derive(Debug, Serialize, Deserialize)]
struct IndexSnapshot {
    documents: HashMap<String, String>,
    metadata: HashMap<String, Metadata>,
    embeddings: HashMap<String, Vec<f32>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    saved_at: Option<DateTime<Utc>>,
}

impl IndexSnapshot {
    fn validate(&self) -> Result<()> {
        for id in self.documents.keys() {
            if !self.metadata.contains_key(id) {
                return Err(DocRouteError::persistence(format!(
                    "Document '{}' has no metadata section entry",
                    id
                )));
            }
            if !self.embeddings.contains_key(id) {
                return Err(DocRouteError::persistence(format!(
                    "Document '{}' has no embeddings section entry",
                    id
                )));
            }
        }

        if self.metadata.len() != self.documents.len()
            || self.embeddings.len() != self.documents.len()
        {
            return Err(DocRouteError::persistence(
                "Index sections carry different key sets",
            ));
        }

        // Dimensionality is fixed per store
        let mut dims = self.embeddings.values().map(Vec::len);
        if let Some(first) = dims.next() {
            if dims.any(|d| d != first) {
                return Err(DocRouteError::persistence(
                    "Embeddings have inconsistent dimensions",
                ));
            }
        }

        Ok(())
    }
}

/// Serialize the full store to a single index file
pub fn save_index(store: &DocumentStore, path: &Path) -> Result<()> {
    let snapshot = IndexSnapshot {
        documents: store.documents_map().clone(),
        metadata: store.metadata_map().clone(),
        embeddings: store.embeddings_map().clone(),
        saved_at: Some(Utc::now()),
    };

    let data = serde_json::to_string_pretty(&snapshot)
        .map_err(|e| DocRouteError::persistence(format!("Failed to serialize index: {}", e)))?;
    std::fs::write(path, data).map_err(|e| {
        DocRouteError::persistence(format!("Failed to write {}: {}", path.display(), e))
    })?;

    info!(
        "Index saved - {} documents to {}",
        store.len(),
        path.display()
    );
    Ok(())
}

/// Parse an index file into a fresh store.
///
/// Fails with a persistence error on missing sections, malformed JSON or
/// key-set mismatch; never returns a partially populated store.
pub fn load_index(path: &Path) -> Result<DocumentStore> {
    debug!("Loading index from {}", path.display());

    let raw = std::fs::read_to_string(path).map_err(|e| {
        DocRouteError::persistence(format!("Failed to read {}: {}", path.display(), e))
    })?;

    let snapshot: IndexSnapshot = serde_json::from_str(&raw).map_err(|e| {
        DocRouteError::persistence(format!("Malformed index file {}: {}", path.display(), e))
    })?;

    snapshot.validate()?;

    let store = DocumentStore::from_parts(
        snapshot.documents,
        snapshot.metadata,
        snapshot.embeddings,
    );

    info!(
        "Index loaded - {} documents from {}",
        store.len(),
        path.display()
    );
    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MetaValue;

    fn sample_store() -> DocumentStore {
        let mut store = DocumentStore::new();
        let mut meta = Metadata::new();
        meta.insert("source".to_string(), MetaValue::from("a.txt"));
        meta.insert("chunk".to_string(), MetaValue::from(0usize));
        store.insert("a.txt", "alpha text".to_string(), meta, vec![0.1, 0.2, 0.3]);
        store.insert(
            "b.txt",
            "beta text".to_string(),
            Metadata::new(),
            vec![0.4, 0.5, 0.6],
        );
        store
    }

    #[test]
    fn test_save_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("index.json");

        let store = sample_store();
        save_index(&store, &path).unwrap();

        let loaded = load_index(&path).unwrap();
        assert_eq!(loaded.len(), store.len());
        assert_eq!(loaded.text("a.txt"), "alpha text");
        assert_eq!(loaded.metadata("a.txt"), store.metadata("a.txt"));

        let embedding = loaded
            .embeddings()
            .find(|(id, _)| id.as_str() == "a.txt")
            .unwrap()
            .1;
        for (got, want) in embedding.iter().zip([0.1f32, 0.2, 0.3]) {
            assert!((got - want).abs() < 1e-6);
        }
    }

    #[test]
    fn test_load_missing_section_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("index.json");
        std::fs::write(
            &path,
            r#"{"documents": {"a": "text"}, "embeddings": {"a": [1.0]}}"#,
        )
        .unwrap();

        let err = load_index(&path).unwrap_err();
        assert!(matches!(err, DocRouteError::Persistence(_)));
    }

    #[test]
    fn test_load_key_set_mismatch_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("index.json");
        std::fs::write(
            &path,
            r#"{"documents": {"a": "text"}, "metadata": {"a": {}}, "embeddings": {"b": [1.0]}}"#,
        )
        .unwrap();

        let err = load_index(&path).unwrap_err();
        assert!(matches!(err, DocRouteError::Persistence(_)));
    }

    #[test]
    fn test_load_inconsistent_dimensions_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("index.json");
        std::fs::write(
            &path,
            r#"{"documents": {"a": "x", "b": "y"},
                "metadata": {"a": {}, "b": {}},
                "embeddings": {"a": [1.0, 2.0], "b": [1.0]}}"#,
        )
        .unwrap();

        let err = load_index(&path).unwrap_err();
        assert!(matches!(err, DocRouteError::Persistence(_)));
    }

    #[test]
    fn test_load_missing_file_fails() {
        let err = load_index(Path::new("/nonexistent/index.json")).unwrap_err();
        assert!(matches!(err, DocRouteError::Persistence(_)));
    }
}

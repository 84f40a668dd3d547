//! DocRoute Vector Retrieval Engine
//!
//! Document ingestion, chunking, embedding-based indexing, similarity
//! search and index persistence.

pub mod chunking;
pub mod engine;
pub mod ingest;
pub mod loader;
pub mod persistence;
pub mod similarity;
pub mod store;
pub mod types;

#[cfg(test)]
mod test_util;

pub use chunking::{chunk_text, TextChunk, DEFAULT_CHUNK_OVERLAP, DEFAULT_CHUNK_SIZE};
pub use engine::SearchEngine;
pub use ingest::{IngestFailure, IngestSummary, Ingestor, DEFAULT_EXTENSIONS};
pub use store::DocumentStore;
pub use types::{MetaValue, Metadata, SearchResult};

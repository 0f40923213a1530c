//! portal-search: expert-routed retrieval-and-answer pipeline
//!
//! Crawled documents are classified into per-source experts (verbatim
//! "simple" experts or chunked-and-indexed retrieval-augmented ones),
//! registered, and queried by an orchestrator that fans out across
//! selected experts and synthesizes one answer with cited sources.

pub mod config;
pub mod error;
pub mod index;
pub mod ingestion;
pub mod orchestrator;
pub mod providers;
pub mod registry;
pub mod retrieval;
pub mod server;
pub mod synthesis;
pub mod types;

pub use config::PortalConfig;
pub use error::{Error, Result};
pub use types::{
    Chunk, Document, Expert, ExpertKind, ExpertType, RetrievalResult, ScoredContext, SearchAnswer,
    SearchRequest, Source,
};

//! Core data types for the expert pipeline

pub mod document;
pub mod expert;
pub mod query;
pub mod response;

pub use document::{Chunk, Document};
pub use expert::{Expert, ExpertKind, ExpertType};
pub use query::SearchRequest;
pub use response::{RetrievalResult, ScoredContext, SearchAnswer, Source};

//! Query request types

use serde::{Deserialize, Serialize};

/// A search request against the whole pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRequest {
    /// Natural-language query
    pub query: String,
}

use crate::error::Result;
use crate::types::RankedResult;

/// A read-only retrieval surface over an initialized corpus.
pub trait ContextRetriever: Send + Sync {
    fn query(&self, text: &str, limit: usize) -> Result<RankedResult>;
    fn count(&self) -> Result<usize>;
}

//! schoolrag-lexical
//!
//! Keyword-category lexical retrieval over an in-memory corpus. `index`
//! builds the category affinity cache, `search` ranks documents for a
//! query, and `context` assembles ranked documents for prompt building.

pub mod affinity;
pub mod context;
pub mod format;
pub mod index;
pub mod scorer;
pub mod search;
pub mod shared;
pub mod taxonomy;

pub use context::{assemble_context, ContextBundle, QueryAnalysis};
pub use index::LexicalRetriever;
pub use shared::SharedRetriever;
pub use taxonomy::Taxonomy;

//! Snapshot holder that lets appends run alongside queries.
//!
//! Queries grab the current `Arc` and score against it without holding any
//! lock. Writers rebuild a private copy and swap it in, so a reader sees
//! either the old corpus and cache or the new pair, never a mix.

use std::sync::{Arc, Mutex, PoisonError, RwLock};

use schoolrag_core::error::Result;
use schoolrag_core::traits::ContextRetriever;
use schoolrag_core::types::{NewDocument, RankedResult, RawDocument};

use crate::index::LexicalRetriever;

#[derive(Debug, Default)]
pub struct SharedRetriever {
    current: RwLock<Arc<LexicalRetriever>>,
    // serializes writers so concurrent appends don't drop each other's documents
    writer: Mutex<()>,
}

impl SharedRetriever {
    pub fn new(retriever: LexicalRetriever) -> Self {
        Self { current: RwLock::new(Arc::new(retriever)), writer: Mutex::new(()) }
    }

    pub fn snapshot(&self) -> Arc<LexicalRetriever> {
        Arc::clone(&self.current.read().unwrap_or_else(PoisonError::into_inner))
    }

    fn publish(&self, next: LexicalRetriever) {
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Arc::new(next);
    }

    pub fn append(&self, docs: Vec<NewDocument>) -> Result<usize> {
        let _guard = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        let mut next = LexicalRetriever::clone(&self.snapshot());
        let total = next.append(docs)?;
        self.publish(next);
        Ok(total)
    }

    /// Replace the whole corpus. On a malformed corpus the old snapshot stays live.
    pub fn reinitialize<I>(&self, corpus: I) -> Result<()>
    where
        I: IntoIterator<Item = RawDocument>,
    {
        let _guard = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        let next = LexicalRetriever::initialized(self.snapshot().taxonomy().clone(), corpus)?;
        self.publish(next);
        Ok(())
    }
}

impl ContextRetriever for SharedRetriever {
    fn query(&self, text: &str, limit: usize) -> Result<RankedResult> {
        self.snapshot().query(text, limit)
    }

    fn count(&self) -> Result<usize> {
        self.snapshot().count()
    }
}

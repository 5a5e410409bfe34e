use schoolrag_core::error::Result;
use schoolrag_core::traits::ContextRetriever;
use schoolrag_core::types::RankedResult;

use crate::format::{format_results, ScoredResult};
use crate::index::LexicalRetriever;
use crate::scorer::{score, ParsedQuery};

impl LexicalRetriever {
    /// Score every document, keep strictly positive scores, order by
    /// descending score and keep the first `limit`. Equal scores keep
    /// corpus order. A blank query returns nothing without scoring.
    pub fn rank(&self, query: &str, limit: usize) -> Result<Vec<ScoredResult<'_>>> {
        let entries = self.entries()?;
        if query.trim().is_empty() {
            return Ok(Vec::new());
        }
        let parsed = ParsedQuery::parse(query);
        let mut results: Vec<ScoredResult<'_>> = entries
            .iter()
            .enumerate()
            .filter_map(|(index, entry)| {
                let s = score(entry, &parsed, &self.taxonomy);
                (s > 0.0).then(|| ScoredResult::new(&entry.doc, s, index))
            })
            .collect();
        // stable: ties stay in corpus order
        results.sort_by(|a, b| b.score.total_cmp(&a.score));
        results.truncate(limit);
        Ok(results)
    }

    pub fn query(&self, query: &str, limit: usize) -> Result<RankedResult> {
        Ok(format_results(&self.rank(query, limit)?))
    }
}

impl ContextRetriever for LexicalRetriever {
    fn query(&self, text: &str, limit: usize) -> Result<RankedResult> {
        LexicalRetriever::query(self, text, limit)
    }

    fn count(&self) -> Result<usize> {
        LexicalRetriever::count(self)
    }
}

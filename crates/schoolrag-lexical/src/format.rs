use schoolrag_core::types::{doc_id, Document, DocumentMetadata, RankedResult};

/// One ranked hit, borrowed from the index it was scored against.
#[derive(Debug, Clone)]
pub struct ScoredResult<'a> {
    pub document: &'a Document,
    pub metadata: DocumentMetadata,
    pub score: f64,
    /// Position in the corpus, not in the ranking.
    pub index: usize,
}

impl<'a> ScoredResult<'a> {
    pub fn new(document: &'a Document, score: f64, index: usize) -> Self {
        let metadata = DocumentMetadata { path: document.path.clone(), file_type: document.file_type() };
        Self { document, metadata, score, index }
    }

    pub fn distance(&self) -> f64 {
        distance(self.score)
    }
}

/// Maps a positive score into (0, 1); lower is closer.
pub fn distance(score: f64) -> f64 {
    1.0 / (1.0 + score)
}

pub fn format_results(results: &[ScoredResult<'_>]) -> RankedResult {
    let mut out = RankedResult {
        documents: Vec::with_capacity(results.len()),
        metadatas: Vec::with_capacity(results.len()),
        distances: Vec::with_capacity(results.len()),
        ids: Vec::with_capacity(results.len()),
    };
    for r in results {
        out.documents.push(r.document.content.clone());
        out.metadatas.push(r.metadata.clone());
        out.distances.push(r.distance());
        out.ids.push(doc_id(r.index));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use schoolrag_core::types::FileType;

    #[test]
    fn ids_follow_corpus_index_not_rank() {
        let a = Document::new("views/a.php", "a");
        let b = Document::new("lib/b.php", "b");
        let results = vec![ScoredResult::new(&b, 4.0, 7), ScoredResult::new(&a, 1.0, 2)];
        let out = format_results(&results);
        assert_eq!(out.ids, vec!["doc_7", "doc_2"]);
        assert_eq!(out.documents, vec!["b", "a"]);
        assert_eq!(out.distances, vec![0.2, 0.5]);
        assert_eq!(out.metadatas[1].file_type, FileType::View);
        assert_eq!(out.metadatas[0].file_type, FileType::Other);
    }
}

use std::hash::Hasher;

use twox_hash::XxHash64;

use schoolrag_core::error::{Error, Result};
use schoolrag_core::types::{Document, NewDocument, RawDocument};

use crate::affinity::CategoryAffinity;
use crate::scorer::IndexedDocument;
use crate::taxonomy::Taxonomy;

/// In-memory lexical retriever over a read-only corpus.
///
/// Starts uninitialized; `initialize` loads the corpus and builds the
/// category affinity cache. Querying before that fails with
/// `Error::Uninitialized`.
#[derive(Debug, Clone, Default)]
pub struct LexicalRetriever {
    pub(crate) taxonomy: Taxonomy,
    pub(crate) entries: Option<Vec<IndexedDocument>>,
}

impl LexicalRetriever {
    pub fn new(taxonomy: Taxonomy) -> Self {
        Self { taxonomy, entries: None }
    }

    /// Construct and initialize in one step.
    pub fn initialized<I>(taxonomy: Taxonomy, corpus: I) -> Result<Self>
    where
        I: IntoIterator<Item = RawDocument>,
    {
        let mut retriever = Self::new(taxonomy);
        retriever.initialize(corpus)?;
        Ok(retriever)
    }

    pub fn from_documents(taxonomy: Taxonomy, docs: Vec<Document>) -> Self {
        let entries = Self::build_entries(docs, &taxonomy);
        Self { taxonomy, entries: Some(entries) }
    }

    /// Validate every entry, then rebuild the affinity cache from scratch.
    /// A malformed entry leaves the previous state untouched.
    pub fn initialize<I>(&mut self, corpus: I) -> Result<()>
    where
        I: IntoIterator<Item = RawDocument>,
    {
        let docs = corpus
            .into_iter()
            .enumerate()
            .map(|(index, raw)| raw.into_document(index))
            .collect::<Result<Vec<_>>>()?;
        self.entries = Some(Self::build_entries(docs, &self.taxonomy));
        tracing::info!(
            documents = self.entries.as_ref().map_or(0, Vec::len),
            categories = self.taxonomy.len(),
            fingerprint = %format!("{:016x}", self.fingerprint()?),
            "initialized lexical index"
        );
        Ok(())
    }

    fn build_entries(docs: Vec<Document>, taxonomy: &Taxonomy) -> Vec<IndexedDocument> {
        docs.into_iter().map(|doc| IndexedDocument::new(doc, taxonomy)).collect()
    }

    pub(crate) fn entries(&self) -> Result<&[IndexedDocument]> {
        self.entries.as_deref().ok_or(Error::Uninitialized)
    }

    pub fn is_initialized(&self) -> bool {
        self.entries.is_some()
    }

    pub fn taxonomy(&self) -> &Taxonomy {
        &self.taxonomy
    }

    pub fn count(&self) -> Result<usize> {
        Ok(self.entries()?.len())
    }

    pub fn document(&self, index: usize) -> Result<Option<&Document>> {
        Ok(self.entries()?.get(index).map(|e| &e.doc))
    }

    pub fn affinity(&self, index: usize) -> Result<Option<&CategoryAffinity>> {
        Ok(self.entries()?.get(index).map(|e| &e.affinity))
    }

    /// Append documents and recompute the whole affinity cache.
    /// Returns the new corpus size.
    pub fn append(&mut self, docs: Vec<NewDocument>) -> Result<usize> {
        let mut corpus: Vec<Document> = self.entries()?.iter().map(|e| e.doc.clone()).collect();
        let added = docs.len();
        let millis = chrono::Utc::now().timestamp_millis();
        for doc in docs {
            let path = doc.id.unwrap_or_else(|| format!("training_{millis}"));
            corpus.push(Document { path, content: doc.content });
        }
        self.entries = Some(Self::build_entries(corpus, &self.taxonomy));
        let total = self.count()?;
        tracing::info!(added, total, "appended documents");
        Ok(total)
    }

    /// Deterministic hash of the corpus and its affinity cache.
    pub fn fingerprint(&self) -> Result<u64> {
        let mut hasher = XxHash64::with_seed(0);
        for entry in self.entries()? {
            hasher.write(entry.doc.path.as_bytes());
            hasher.write_u8(0);
            hasher.write(entry.doc.content.as_bytes());
            hasher.write_u8(0);
            for score in entry.affinity.scores() {
                hasher.write_u64(*score);
            }
        }
        Ok(hasher.finish())
    }
}

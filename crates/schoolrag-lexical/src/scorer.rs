//! Lexical relevance scoring of one document against one query.

use schoolrag_core::types::Document;

use crate::affinity::CategoryAffinity;
use crate::taxonomy::Taxonomy;

pub const CONTENT_HIT: f64 = 2.0;
pub const PATH_HIT: f64 = 3.0;
pub const CATEGORY_FACTOR: f64 = 0.5;

/// A lower-cased query and its distinct whitespace-separated terms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedQuery {
    lowered: String,
    terms: Vec<String>,
}

impl ParsedQuery {
    pub fn parse(text: &str) -> Self {
        let lowered = text.to_lowercase();
        let mut terms: Vec<String> = Vec::new();
        for term in lowered.split_whitespace() {
            if !terms.iter().any(|t| t == term) {
                terms.push(term.to_string());
            }
        }
        Self { lowered, terms }
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn lowered(&self) -> &str {
        &self.lowered
    }

    /// Category activation looks for the label itself in the whole query
    /// string, not for any of the category's terms.
    pub fn activates(&self, label: &str) -> bool {
        self.lowered.contains(label)
    }
}

/// A corpus document with its lower-cased fields and affinity row cached.
#[derive(Debug, Clone)]
pub struct IndexedDocument {
    pub doc: Document,
    lower_content: String,
    lower_path: String,
    pub affinity: CategoryAffinity,
}

impl IndexedDocument {
    pub fn new(doc: Document, taxonomy: &Taxonomy) -> Self {
        let lower_content = doc.content.to_lowercase();
        let lower_path = doc.path.to_lowercase();
        let affinity = CategoryAffinity::from_lowered(&lower_content, &lower_path, taxonomy);
        Self { doc, lower_content, lower_path, affinity }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScoreBreakdown {
    pub content_hits: u32,
    pub path_hits: u32,
    pub category_bonus: f64,
}

impl ScoreBreakdown {
    pub fn total(&self) -> f64 {
        f64::from(self.content_hits) * CONTENT_HIT
            + f64::from(self.path_hits) * PATH_HIT
            + self.category_bonus
    }
}

pub fn score_breakdown(entry: &IndexedDocument, query: &ParsedQuery, taxonomy: &Taxonomy) -> ScoreBreakdown {
    let mut breakdown = ScoreBreakdown::default();
    for term in query.terms() {
        if entry.lower_content.contains(term.as_str()) {
            breakdown.content_hits += 1;
        }
        if entry.lower_path.contains(term.as_str()) {
            breakdown.path_hits += 1;
        }
    }
    for (idx, category) in taxonomy.categories().iter().enumerate() {
        if query.activates(&category.label) {
            breakdown.category_bonus += entry.affinity.get(idx) as f64 * CATEGORY_FACTOR;
        }
    }
    breakdown
}

/// Non-negative relevance; 0 means no detectable relevance.
pub fn score(entry: &IndexedDocument, query: &ParsedQuery, taxonomy: &Taxonomy) -> f64 {
    score_breakdown(entry, query, taxonomy).total()
}

//! Per-document category affinity, computed once per corpus load.
//!
//! For each category the affinity is the sum over its terms of
//! `content occurrences + 2 * path occurrences`. Matching is plain,
//! case-insensitive substring counting: "class" also counts inside
//! "classroom", and overlapping terms are each counted.

use schoolrag_core::types::Document;

use crate::taxonomy::Taxonomy;

pub const CONTENT_OCCURRENCE_WEIGHT: u64 = 1;
pub const PATH_OCCURRENCE_WEIGHT: u64 = 2;

/// Affinity scores for one document, positionally aligned with
/// `Taxonomy::categories()`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CategoryAffinity {
    scores: Vec<u64>,
}

impl CategoryAffinity {
    pub fn compute(doc: &Document, taxonomy: &Taxonomy) -> Self {
        Self::from_lowered(&doc.content.to_lowercase(), &doc.path.to_lowercase(), taxonomy)
    }

    /// Same as `compute` for fields that are already lower-cased.
    pub fn from_lowered(content: &str, path: &str, taxonomy: &Taxonomy) -> Self {
        let scores = taxonomy
            .categories()
            .iter()
            .map(|category| {
                category.terms.iter().fold(0u64, |acc, term| {
                    acc + count_occurrences(content, term) * CONTENT_OCCURRENCE_WEIGHT
                        + count_occurrences(path, term) * PATH_OCCURRENCE_WEIGHT
                })
            })
            .collect();
        Self { scores }
    }

    pub fn scores(&self) -> &[u64] {
        &self.scores
    }

    /// Score for category position `idx`; out-of-range positions score 0.
    pub fn get(&self, idx: usize) -> u64 {
        self.scores.get(idx).copied().unwrap_or(0)
    }

    /// Look up by label through the taxonomy the cache was built with.
    pub fn for_label(&self, taxonomy: &Taxonomy, label: &str) -> u64 {
        taxonomy
            .categories()
            .iter()
            .position(|c| c.label == label)
            .map_or(0, |idx| self.get(idx))
    }
}

/// Non-overlapping substring occurrences of `needle` in `haystack`.
pub fn count_occurrences(haystack: &str, needle: &str) -> u64 {
    if needle.is_empty() {
        return 0;
    }
    haystack.matches(needle).count() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_are_substring_and_non_overlapping() {
        assert_eq!(count_occurrences("classroom class", "class"), 2);
        assert_eq!(count_occurrences("aaaa", "aa"), 2);
        assert_eq!(count_occurrences("abc", ""), 0);
    }

    #[test]
    fn path_hits_weigh_double() {
        let tax = Taxonomy::from_pairs(vec![("fee", vec!["fee"])]);
        let in_content = Document::new("x.php", "fee");
        let in_path = Document::new("fee.php", "nothing");
        assert_eq!(CategoryAffinity::compute(&in_content, &tax).get(0), 1);
        assert_eq!(CategoryAffinity::compute(&in_path, &tax).get(0), 2);
    }

    #[test]
    fn overlapping_terms_both_count() {
        // "fee" and "fees" both hit "Fees"
        let tax = Taxonomy::from_pairs(vec![("fee", vec!["fee", "fees"])]);
        let doc = Document::new("a.php", "Fees");
        let affinity = CategoryAffinity::compute(&doc, &tax);
        assert_eq!(affinity.for_label(&tax, "fee"), 2);
        assert_eq!(affinity.for_label(&tax, "exam"), 0);
    }
}

//! Turns a user query plus the model's query analysis into the context
//! block handed to prompt building.

use serde::{Deserialize, Serialize};

use schoolrag_core::error::Result;
use schoolrag_core::traits::ContextRetriever;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Complexity {
    Simple,
    #[default]
    Medium,
    Complex,
}

impl Complexity {
    pub fn result_count(self) -> usize {
        match self {
            Complexity::Simple => 5,
            Complexity::Medium => 8,
            Complexity::Complex => 12,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct QueryAnalysis {
    pub intent: String,
    pub entities: Vec<String>,
    pub complexity: Complexity,
    pub language: String,
    pub category: String,
}

impl Default for QueryAnalysis {
    fn default() -> Self {
        Self {
            intent: "general".to_string(),
            entities: Vec::new(),
            complexity: Complexity::Medium,
            language: "English".to_string(),
            category: "other".to_string(),
        }
    }
}

impl QueryAnalysis {
    /// Parse the analysis JSON returned by the model. Anything unparseable,
    /// including a fenced or chatty reply, yields the default analysis.
    pub fn parse_or_default(text: &str) -> Self {
        match serde_json::from_str(text.trim()) {
            Ok(analysis) => analysis,
            Err(e) => {
                tracing::debug!(error = %e, "query analysis not parseable, using default");
                Self::default()
            }
        }
    }
}

const SEARCH_BOOSTERS: &[(&str, &[&str])] = &[
    ("student", &["admission", "enrollment", "registration", "student_profile"]),
    ("teacher", &["staff", "employee", "teacher_profile", "staff_management"]),
    ("fee", &["payment", "invoice", "fee_collection", "billing"]),
    ("attendance", &["present", "absent", "attendance_report", "tracking"]),
    ("exam", &["test", "result", "grade", "examination", "marksheet"]),
    ("report", &["analytics", "dashboard", "summary", "statistics"]),
];

/// Append the analysis category's booster terms to the search query.
/// Unknown categories and `other` leave the query untouched.
pub fn enhance_query(query: &str, category: &str) -> String {
    match SEARCH_BOOSTERS.iter().find(|(label, _)| *label == category) {
        Some((_, boosters)) => format!("{} {}", query, boosters.join(" ")),
        None => query.to_string(),
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ContextSource {
    EmbeddedIndex,
    EmptyQuery,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContextBundle {
    pub documents: Vec<String>,
    pub ids: Vec<String>,
    pub source: ContextSource,
    pub search_terms: String,
    pub suggested_urls: Vec<String>,
}

impl ContextBundle {
    /// Documents separated by blank lines, ready for a prompt template.
    pub fn joined(&self) -> String {
        self.documents.join("\n\n")
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

pub fn assemble_context(
    retriever: &dyn ContextRetriever,
    search_query: &str,
    analysis: &QueryAnalysis,
    fallback_url: &str,
) -> Result<ContextBundle> {
    if search_query.trim().is_empty() {
        // still surfaces Uninitialized before short-circuiting
        retriever.count()?;
        return Ok(ContextBundle {
            documents: Vec::new(),
            ids: Vec::new(),
            source: ContextSource::EmptyQuery,
            search_terms: String::new(),
            suggested_urls: vec![fallback_url.to_string()],
        });
    }
    let enhanced = enhance_query(search_query, &analysis.category);
    tracing::debug!(search_terms = %enhanced, limit = analysis.complexity.result_count(), "assembling context");
    let ranked = retriever.query(&enhanced, analysis.complexity.result_count())?;
    Ok(ContextBundle {
        documents: ranked.documents,
        ids: ranked.ids,
        source: ContextSource::EmbeddedIndex,
        search_terms: enhanced,
        suggested_urls: Vec::new(),
    })
}

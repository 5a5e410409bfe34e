//! Domain types shared by the corpus loader and the retrieval engines.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Coarse classification of a corpus document, derived from its path.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    Controller,
    View,
    Model,
    Library,
    Other,
}

impl FileType {
    /// First matching directory marker wins; no marker means `Other`.
    pub fn from_path(path: &str) -> Self {
        if path.contains("controllers/") {
            FileType::Controller
        } else if path.contains("views/") {
            FileType::View
        } else if path.contains("models/") {
            FileType::Model
        } else if path.contains("libraries/") {
            FileType::Library
        } else {
            FileType::Other
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FileType::Controller => "controller",
            FileType::View => "view",
            FileType::Model => "model",
            FileType::Library => "library",
            FileType::Other => "other",
        }
    }
}

/// A single corpus entry.
///
/// - `path`: slash-separated identifier, e.g. `controllers/Student.php`
/// - `content`: the text body
///
/// Position inside the corpus is the document's identity (`doc_<index>`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub path: String,
    pub content: String,
}

impl Document {
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self { path: path.into(), content: content.into() }
    }

    pub fn file_type(&self) -> FileType {
        FileType::from_path(&self.path)
    }
}

/// A corpus entry as read from an external source, before validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawDocument {
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

impl RawDocument {
    /// Validate entry `index`, reporting the first missing field.
    pub fn into_document(self, index: usize) -> Result<Document> {
        let path = self.path.ok_or(Error::MalformedCorpus { index, field: "path" })?;
        let content = self.content.ok_or(Error::MalformedCorpus { index, field: "content" })?;
        Ok(Document { path, content })
    }
}

impl From<Document> for RawDocument {
    fn from(doc: Document) -> Self {
        Self { path: Some(doc.path), content: Some(doc.content) }
    }
}

/// A document submitted for appending to a live corpus. `id` becomes the
/// path; a generated `training_<millis>` path is used when it is absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewDocument {
    #[serde(default)]
    pub id: Option<String>,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub path: String,
    #[serde(rename = "type")]
    pub file_type: FileType,
}

/// Ranked output handed to prompt building.
///
/// All four sequences are parallel and equal in length. `ids` carry the
/// original corpus index (`doc_<index>`), not the rank position.
/// `distances` are `1 / (1 + score)`, so lower means more relevant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RankedResult {
    pub documents: Vec<String>,
    pub metadatas: Vec<DocumentMetadata>,
    pub distances: Vec<f64>,
    pub ids: Vec<String>,
}

impl RankedResult {
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

/// Synthetic identifier for the document at corpus position `index`.
pub fn doc_id(index: usize) -> String {
    format!("doc_{index}")
}

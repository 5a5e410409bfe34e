//! Corpus input: reading, building and writing the `{path, content}` JSON array.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::types::{Document, RawDocument};

/// Parse a corpus file. Fields stay optional here; missing ones are reported
/// when the retriever is initialized.
pub fn load_corpus(path: &Path) -> Result<Vec<RawDocument>> {
    let data = fs::read_to_string(path)?;
    let corpus: Vec<RawDocument> = serde_json::from_str(&data)?;
    tracing::info!(path = %path.display(), documents = corpus.len(), "loaded corpus");
    Ok(corpus)
}

pub fn save_corpus(path: &Path, docs: &[Document]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(docs)?;
    fs::write(path, json)?;
    tracing::info!(path = %path.display(), documents = docs.len(), "wrote corpus");
    Ok(())
}

#[derive(Debug, Clone)]
pub struct BuilderConfig {
    /// Any root-relative path containing one of these is skipped.
    pub excluded_dirs: Vec<String>,
    pub excluded_extensions: Vec<String>,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            excluded_dirs: vec!["third_party".to_string()],
            excluded_extensions: vec![".sql".to_string(), ".md".to_string()],
        }
    }
}

/// Scans an application tree into corpus documents.
#[derive(Default)]
pub struct CorpusBuilder {
    config: BuilderConfig,
}

impl CorpusBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: BuilderConfig) -> Self {
        Self { config }
    }

    pub fn scan(&self, root: &Path) -> Result<Vec<Document>> {
        self.scan_with_progress(root, |_| {})
    }

    /// Like `scan`, calling `on_file` with each accepted relative path.
    pub fn scan_with_progress<F>(&self, root: &Path, mut on_file: F) -> Result<Vec<Document>>
    where
        F: FnMut(&str),
    {
        let files = self.list_files(root);
        if files.is_empty() {
            tracing::warn!(root = %root.display(), "no files found");
            return Ok(vec![]);
        }
        let mut docs = Vec::with_capacity(files.len());
        for (file_path, relative) in files {
            let content = self.read_file_content(&file_path)?;
            on_file(&relative);
            docs.push(Document { path: relative, content });
        }
        tracing::info!(root = %root.display(), documents = docs.len(), "scanned application tree");
        Ok(docs)
    }

    fn read_file_content(&self, file_path: &Path) -> Result<String> {
        match fs::read_to_string(file_path) {
            Ok(content) => Ok(content),
            Err(_) => Ok(String::from_utf8_lossy(&fs::read(file_path)?).to_string()),
        }
    }

    fn is_excluded(&self, relative: &str) -> bool {
        self.config.excluded_dirs.iter().any(|d| relative.contains(d.as_str()))
            || self.config.excluded_extensions.iter().any(|ext| relative.ends_with(ext.as_str()))
    }

    fn relative_path(root: &Path, path: &Path) -> String {
        let relative = path.strip_prefix(root).unwrap_or(path);
        relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/")
    }

    fn list_files(&self, root: &Path) -> Vec<(PathBuf, String)> {
        let mut files = Vec::new();
        let walker = walkdir::WalkDir::new(root).into_iter().filter_entry(|e| {
            e.depth() == 0 || !self.is_excluded(&Self::relative_path(root, e.path()))
        });
        for entry in walker.filter_map(|e| e.ok()).filter(|e| e.file_type().is_file()) {
            let relative = Self::relative_path(root, entry.path());
            files.push((entry.path().to_path_buf(), relative));
        }
        files.sort_by(|a, b| a.1.cmp(&b.1));
        files
    }
}

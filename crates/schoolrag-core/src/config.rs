//! Lightweight configuration loader and path helpers.
//!
//! Uses Figment to merge `config.toml` + `config.<env>.toml` + `APP_*` env vars.
//! Nested keys are addressed with a double underscore, e.g.
//! `APP_RETRIEVAL__DEFAULT_RESULTS=12`. Provides helpers to expand `~` and
//! `${VAR}` and to resolve relative paths against a known base directory.

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use crate::error::Error;

pub struct Config {
    figment: Figment,
}

/// Result count used when a caller does not ask for one.
pub const DEFAULT_RESULTS: usize = 8;

/// Which keyword map seeds the category affinity cache.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TaxonomyPreset {
    #[default]
    Full,
    Compact,
}

/// The `[retrieval]` section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RetrievalSettings {
    pub corpus_path: String,
    pub default_results: usize,
    pub taxonomy: TaxonomyPreset,
    pub fallback_url: String,
}

impl Default for RetrievalSettings {
    fn default() -> Self {
        Self {
            corpus_path: "proschool360_corpus.json".to_string(),
            default_results: DEFAULT_RESULTS,
            taxonomy: TaxonomyPreset::Full,
            fallback_url: "https://proschool360.com".to_string(),
        }
    }
}

impl RetrievalSettings {
    pub fn validate(&self) -> crate::error::Result<()> {
        if self.default_results == 0 {
            return Err(Error::InvalidConfig("retrieval.default_results must be positive".into()));
        }
        if self.corpus_path.trim().is_empty() {
            return Err(Error::InvalidConfig("retrieval.corpus_path is empty".into()));
        }
        Ok(())
    }

    /// Corpus location after `~`/`${VAR}` expansion, relative paths joined to `base`.
    pub fn resolved_corpus_path(&self, base: &Path) -> PathBuf {
        resolve_with_base(base, &self.corpus_path)
    }
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());
        Self::load_for_env(&env_name)
    }

    pub fn load_for_env(env_name: &str) -> anyhow::Result<Self> {
        Self::load_from_dir(Path::new("."), env_name)
    }

    /// Same layering as `load_for_env`, reading the TOML files from `dir`.
    pub fn load_from_dir(dir: &Path, env_name: &str) -> anyhow::Result<Self> {
        let mut figment = Figment::new().merge(Toml::file(dir.join("config.toml")));
        match env_name {
            "dev" | "development" => figment = figment.merge(Toml::file(dir.join("config.dev.toml"))),
            "prod" | "production" => figment = figment.merge(Toml::file(dir.join("config.prod.toml"))),
            "test" | "testing" => figment = figment.merge(Toml::file(dir.join("config.test.toml"))),
            _ => {}
        }
        figment = figment.merge(Env::prefixed("APP_").split("__"));

        let config = Self { figment };
        config.validate()?;
        Ok(config)
    }

    /// Wrap an already-assembled figment; used by tests and embedders.
    pub fn from_figment(figment: Figment) -> anyhow::Result<Self> {
        let config = Self { figment };
        config.validate()?;
        Ok(config)
    }

    pub fn get<T>(&self, key: &str) -> anyhow::Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.figment
            .extract_inner(key)
            .map_err(|e| anyhow::anyhow!("Failed to get '{}': {}", key, e))
    }

    /// The `[retrieval]` section, falling back to defaults when it is absent.
    pub fn retrieval(&self) -> anyhow::Result<RetrievalSettings> {
        if !self.figment.contains("retrieval") {
            return Ok(RetrievalSettings::default());
        }
        let settings: RetrievalSettings = self.get("retrieval")?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> anyhow::Result<()> {
        self.retrieval()?;
        Ok(())
    }
}

/// Expand a user-provided path string:
/// - Expands leading '~' to the user's home directory
/// - Expands ${VAR} and $VAR environment variables
/// - Returns a PathBuf without attempting to canonicalize
pub fn expand_path<S: AsRef<str>>(input: S) -> PathBuf {
    let s = input.as_ref();
    let expanded_env = shellexpand::env(s).unwrap_or(std::borrow::Cow::Borrowed(s));
    let expanded = shellexpand::tilde(&expanded_env);
    PathBuf::from(expanded.as_ref())
}

/// Resolve a possibly relative path against a given base directory after expansion.
/// If `p` is absolute, it's returned as-is; otherwise `base.join(p)` is returned.
pub fn resolve_with_base<S: AsRef<str>>(base: &Path, p: S) -> PathBuf {
    let p = expand_path(p);
    if p.is_absolute() { p } else { base.join(p) }
}

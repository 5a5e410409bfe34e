use std::fs;
use tempfile::TempDir;

use figment::providers::{Format, Toml};
use figment::Figment;
use schoolrag_core::config::{Config, RetrievalSettings, TaxonomyPreset, DEFAULT_RESULTS};
use schoolrag_core::corpus::{load_corpus, save_corpus, BuilderConfig, CorpusBuilder};
use schoolrag_core::types::{Document, FileType, RawDocument};
use schoolrag_core::Error;

#[test]
fn file_type_first_marker_wins() {
    assert_eq!(FileType::from_path("application/controllers/Student.php"), FileType::Controller);
    assert_eq!(FileType::from_path("views/fee/index.php"), FileType::View);
    assert_eq!(FileType::from_path("models/Exam_model.php"), FileType::Model);
    assert_eq!(FileType::from_path("libraries/Mailer.php"), FileType::Library);
    assert_eq!(FileType::from_path("config/routes.php"), FileType::Other);
    // controllers/ is checked before views/
    assert_eq!(FileType::from_path("views/controllers/x.php"), FileType::Controller);
    // the trailing slash is part of the marker
    assert_eq!(FileType::from_path("controllers.php"), FileType::Other);
}

#[test]
fn raw_document_reports_missing_field() {
    let missing_content = RawDocument { path: Some("a.php".into()), content: None };
    match missing_content.into_document(3) {
        Err(Error::MalformedCorpus { index, field }) => {
            assert_eq!(index, 3);
            assert_eq!(field, "content");
        }
        other => panic!("unexpected: {:?}", other),
    }
    let missing_path = RawDocument { path: None, content: Some("x".into()) };
    assert!(matches!(missing_path.into_document(0), Err(Error::MalformedCorpus { field: "path", .. })));
}

#[test]
fn scan_skips_third_party_and_excluded_extensions() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    fs::create_dir_all(root.join("controllers")).unwrap();
    fs::create_dir_all(root.join("third_party/vendor")).unwrap();
    fs::write(root.join("controllers/Student.php"), "class Student").unwrap();
    fs::write(root.join("third_party/vendor/lib.php"), "vendored").unwrap();
    fs::write(root.join("schema.sql"), "CREATE TABLE x").unwrap();
    fs::write(root.join("README.md"), "# readme").unwrap();
    fs::write(root.join("index.php"), "<?php").unwrap();

    let docs = CorpusBuilder::new().scan(root).expect("scan");
    let paths: Vec<&str> = docs.iter().map(|d| d.path.as_str()).collect();
    assert_eq!(paths, vec!["controllers/Student.php", "index.php"]);
    assert_eq!(docs[0].content, "class Student");
}

#[test]
fn scan_honors_extra_exclusions() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    fs::create_dir_all(root.join("uploads")).unwrap();
    fs::create_dir_all(root.join("third_party")).unwrap();
    fs::write(root.join("uploads/photo.php"), "upload").unwrap();
    fs::write(root.join("third_party/lib.php"), "vendored").unwrap();
    fs::write(root.join("app.js"), "init()").unwrap();
    fs::write(root.join("index.php"), "<?php").unwrap();

    let mut config = BuilderConfig::default();
    config.excluded_dirs.push("uploads".to_string());
    config.excluded_extensions.push(".js".to_string());
    let docs = CorpusBuilder::with_config(config).scan(root).expect("scan");
    let paths: Vec<&str> = docs.iter().map(|d| d.path.as_str()).collect();
    assert_eq!(paths, vec!["index.php"]);
}

#[test]
fn scan_reads_invalid_utf8_lossily() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("bin.php"), [b'o', b'k', 0xff, b'!']).unwrap();
    let docs = CorpusBuilder::new().scan(tmp.path()).expect("scan");
    assert_eq!(docs.len(), 1);
    assert!(docs[0].content.starts_with("ok"));
    assert!(docs[0].content.ends_with('!'));
}

#[test]
fn corpus_save_then_load_keeps_order() {
    let tmp = TempDir::new().unwrap();
    let file = tmp.path().join("out/corpus.json");
    let docs = vec![Document::new("b.php", "second"), Document::new("a.php", "first")];
    save_corpus(&file, &docs).expect("save");

    let loaded = load_corpus(&file).expect("load");
    assert_eq!(loaded.len(), 2);
    assert_eq!(loaded[0].path.as_deref(), Some("b.php"));
    assert_eq!(loaded[1].content.as_deref(), Some("first"));
}

#[test]
fn load_corpus_tolerates_missing_fields_until_validation() {
    let tmp = TempDir::new().unwrap();
    let file = tmp.path().join("corpus.json");
    fs::write(&file, r#"[{"path": "a.php"}, {"content": "x"}]"#).unwrap();
    let loaded = load_corpus(&file).expect("load");
    assert!(loaded[0].content.is_none());
    assert!(loaded[1].path.is_none());
}

#[test]
fn load_corpus_rejects_non_array() {
    let tmp = TempDir::new().unwrap();
    let file = tmp.path().join("corpus.json");
    fs::write(&file, r#"{"path": "a.php"}"#).unwrap();
    assert!(matches!(load_corpus(&file), Err(Error::Json(_))));
    assert!(matches!(load_corpus(&tmp.path().join("missing.json")), Err(Error::Io(_))));
}

#[test]
fn retrieval_settings_default_when_section_absent() {
    let config = Config::from_figment(Figment::new()).expect("config");
    assert_eq!(config.retrieval().unwrap(), RetrievalSettings::default());
}

#[test]
fn retrieval_settings_from_toml() {
    let toml = r#"
        [retrieval]
        corpus_path = "data/corpus.json"
        default_results = 5
        taxonomy = "compact"
    "#;
    let config = Config::from_figment(Figment::new().merge(Toml::string(toml))).expect("config");
    let settings = config.retrieval().unwrap();
    assert_eq!(settings.default_results, 5);
    assert_eq!(settings.taxonomy, TaxonomyPreset::Compact);
    assert_eq!(settings.fallback_url, "https://proschool360.com");
    let resolved = settings.resolved_corpus_path(std::path::Path::new("/srv/app"));
    assert_eq!(resolved, std::path::PathBuf::from("/srv/app/data/corpus.json"));
}

#[test]
fn zero_default_results_is_rejected() {
    let toml = "[retrieval]\ndefault_results = 0\n";
    assert!(Config::from_figment(Figment::new().merge(Toml::string(toml))).is_err());
}

#[test]
fn default_results_constant_backs_settings() {
    assert_eq!(RetrievalSettings::default().default_results, DEFAULT_RESULTS);
}

#[test]
fn test_env_layers_file_overlay_and_env_vars() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("config.toml"),
        "[retrieval]\ncorpus_path = \"base.json\"\ndefault_results = 3\nfallback_url = \"https://base.example\"\n",
    )
    .unwrap();
    fs::write(tmp.path().join("config.test.toml"), "[retrieval]\ncorpus_path = \"test.json\"\n").unwrap();

    std::env::set_var("APP_RETRIEVAL__DEFAULT_RESULTS", "12");
    std::env::set_var("APP_RETRIEVAL__TAXONOMY", "compact");
    let loaded = Config::load_from_dir(tmp.path(), "test");
    std::env::remove_var("APP_RETRIEVAL__DEFAULT_RESULTS");
    std::env::remove_var("APP_RETRIEVAL__TAXONOMY");

    let settings = loaded.expect("config").retrieval().unwrap();
    assert_eq!(settings.corpus_path, "test.json");
    assert_eq!(settings.default_results, 12);
    assert_eq!(settings.taxonomy, TaxonomyPreset::Compact);
    assert_eq!(settings.fallback_url, "https://base.example");
}

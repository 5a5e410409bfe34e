use std::env;
use std::path::PathBuf;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use schoolrag_cli::{flag_value, init_logging};
use schoolrag_core::config::{expand_path, Config};
use schoolrag_core::corpus::{save_corpus, BuilderConfig, CorpusBuilder};

// Scan an application tree into a corpus JSON file.
// Usage:
//   schoolrag-build-corpus <app_dir> [--out proschool360_corpus.json]
//     [--exclude-dir NAME]... [--exclude-ext .EXT]...
// Notes:
//   - third_party/ directories and *.sql / *.md files are always skipped.
//   - Without --out the corpus goes to retrieval.corpus_path from config.

fn main() -> anyhow::Result<()> {
    init_logging();
    let config = Config::load().map_err(|e| {
        eprintln!("Error loading config: {}", e);
        e
    })?;
    let settings = config.retrieval()?;

    let args: Vec<String> = env::args().skip(1).collect();
    let mut app_dir: Option<PathBuf> = None;
    let mut out: Option<PathBuf> = None;
    let mut builder_config = BuilderConfig::default();
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--out" | "-o" => {
                out = Some(expand_path(flag_value(&args, i, "--out", "a path")));
                i += 2;
            }
            "--exclude-dir" => {
                let name = flag_value(&args, i, "--exclude-dir", "a name");
                builder_config.excluded_dirs.push(name.to_string());
                i += 2;
            }
            "--exclude-ext" => {
                let ext = flag_value(&args, i, "--exclude-ext", "an extension");
                builder_config.excluded_extensions.push(ext.to_string());
                i += 2;
            }
            s if s.starts_with('-') => {
                eprintln!("Unknown flag: {}", s);
                std::process::exit(2);
            }
            s => {
                if app_dir.is_none() {
                    app_dir = Some(expand_path(s));
                }
                i += 1;
            }
        }
    }
    let Some(app_dir) = app_dir else {
        eprintln!(
            "Usage: schoolrag-build-corpus <app_dir> [--out FILE] [--exclude-dir NAME] [--exclude-ext .EXT]"
        );
        std::process::exit(1);
    };
    let out = match out {
        Some(p) => p,
        None => settings.resolved_corpus_path(&env::current_dir()?),
    };

    println!("Corpus builder\n==============");
    println!("App dir : {}", app_dir.display());
    println!("Output  : {}", out.display());

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner} {pos} files  {msg}")?);
    pb.enable_steady_tick(Duration::from_millis(100));
    let docs = CorpusBuilder::with_config(builder_config).scan_with_progress(&app_dir, |path| {
        pb.inc(1);
        pb.set_message(path.to_string());
    })?;
    pb.finish_and_clear();

    save_corpus(&out, &docs)?;
    println!("Done. Wrote {} documents.", docs.len());
    Ok(())
}

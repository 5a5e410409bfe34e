use std::env;
use std::path::PathBuf;

use schoolrag_cli::{flag_value, init_logging, parse_limit};
use schoolrag_core::config::{expand_path, Config};
use schoolrag_core::corpus::load_corpus;
use schoolrag_lexical::{LexicalRetriever, Taxonomy};

// Rank corpus documents for a query and print them.
// Usage:
//   schoolrag-search "<query>" [--corpus FILE] [--limit N] [--json]
// Corpus path precedence: flag > retrieval.corpus_path (config / APP_RETRIEVAL__CORPUS_PATH).

fn main() -> anyhow::Result<()> {
    init_logging();
    let config = Config::load().map_err(|e| {
        eprintln!("Error loading config: {}", e);
        e
    })?;
    let settings = config.retrieval()?;

    let args: Vec<String> = env::args().skip(1).collect();
    if args.is_empty() {
        eprintln!("Usage: schoolrag-search <query> [--corpus FILE] [--limit N] [--json]");
        std::process::exit(1);
    }
    let mut query = String::new();
    let mut corpus: Option<PathBuf> = None;
    let mut limit = settings.default_results;
    let mut as_json = false;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--corpus" => {
                corpus = Some(expand_path(flag_value(&args, i, "--corpus", "a path")));
                i += 2;
                continue;
            }
            "--limit" => {
                let raw = flag_value(&args, i, "--limit", "a number");
                limit = match parse_limit(raw) {
                    Some(n) => n,
                    None => {
                        eprintln!("--limit requires a number, got '{}'", raw);
                        std::process::exit(2);
                    }
                };
                i += 2;
                continue;
            }
            "--json" => {
                as_json = true;
                i += 1;
                continue;
            }
            s if s.starts_with("--") => {
                eprintln!("Unknown flag: {}", s);
                std::process::exit(2);
            }
            s => {
                if query.is_empty() {
                    query = s.to_string();
                }
                i += 1;
                continue;
            }
        }
    }

    let corpus_path = match corpus {
        Some(p) => p,
        None => settings.resolved_corpus_path(&env::current_dir()?),
    };
    let retriever = LexicalRetriever::initialized(
        Taxonomy::from_preset(settings.taxonomy),
        load_corpus(&corpus_path)?,
    )?;
    let documents = retriever.count()?;
    let fingerprint = format!("{:016x}", retriever.fingerprint()?);
    tracing::info!(corpus = %corpus_path.display(), documents, %fingerprint, "retriever ready");

    if as_json {
        let out = retriever.query(&query, limit)?;
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!("Lexical search\n==============");
    println!("Query: {} (limit {})\n", query, limit);
    let hits = retriever.rank(&query, limit)?;
    if hits.is_empty() {
        println!("No matching documents.");
        println!("Try {}", settings.fallback_url);
    }
    for (rank, hit) in hits.iter().enumerate() {
        println!(
            "{:>2}. doc_{:<6} score={:<7.1} distance={:.4} type={:<10} path={}",
            rank + 1,
            hit.index,
            hit.score,
            hit.distance(),
            hit.metadata.file_type.as_str(),
            hit.metadata.path
        );
    }
    Ok(())
}

//! Shared helpers for the schoolrag binaries.

use tracing_subscriber::EnvFilter;

/// Install a fmt subscriber; `RUST_LOG` overrides the default `info` filter.
/// Logs go to stderr so stdout stays clean for results and `--json` output.
pub fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Value following a flag at `args[i]`, or exit with a usage error.
pub fn flag_value<'a>(args: &'a [String], i: usize, flag: &str, what: &str) -> &'a str {
    match args.get(i + 1) {
        Some(v) => v.as_str(),
        None => {
            eprintln!("{flag} requires {what}");
            std::process::exit(2);
        }
    }
}

/// Parse a `--limit` value; `None` for anything that is not a whole number.
pub fn parse_limit(raw: &str) -> Option<usize> {
    raw.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limit_accepts_whole_numbers_only() {
        assert_eq!(parse_limit("12"), Some(12));
        assert_eq!(parse_limit("0"), Some(0));
        assert_eq!(parse_limit("abc"), None);
        assert_eq!(parse_limit("-3"), None);
        assert_eq!(parse_limit("2.5"), None);
    }
}

//! Log subscriber setup.
//!
//! `RUST_LOG` wins when set; otherwise the `-v` count picks the level.
//! Logs go to stderr so stdout stays parseable with `--json`.

use tracing_subscriber::EnvFilter;

/// Filter directive for a given `-v` count.
pub fn default_directive(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "warn,ccroster_client=info,ccroster_cli=info",
        _ => "info,ccroster_client=debug,ccroster_cli=debug",
    }
}

pub fn init_logging(verbose: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive_by_verbosity() {
        assert_eq!(default_directive(0), "warn");
        assert!(default_directive(1).contains("ccroster_client=info"));
        assert!(default_directive(3).contains("ccroster_client=debug"));
    }

    #[test]
    fn test_directives_parse() {
        for verbose in 0..3 {
            assert!(EnvFilter::try_new(default_directive(verbose)).is_ok());
        }
    }
}

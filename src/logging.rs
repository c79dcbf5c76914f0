//! Logging init: progress messages go to stderr, filtered by verbosity.

use tracing_subscriber::EnvFilter;

/// Filter directive for a `-v` count when `RUST_LOG` is not set.
pub fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info,ping_drive=info",
        _ => "debug,ping_drive=debug",
    }
}

/// Initialize logging to stderr. `RUST_LOG` overrides the verbosity.
pub fn init_logging(verbosity: u8) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .with_ansi(false)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive() {
        assert_eq!(default_directive(0), "warn");
        assert_eq!(default_directive(1), "info,ping_drive=info");
        assert_eq!(default_directive(2), "debug,ping_drive=debug");
        assert_eq!(default_directive(9), "debug,ping_drive=debug");
    }
}

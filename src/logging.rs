use tracing::Level;
use tracing::subscriber::{self, DefaultGuard, SetGlobalDefaultError};

fn level_for(verbosity: u8) -> Level {
    match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Installs the process-wide subscriber. Logs go to stderr so that
/// stdout stays clean for reports.
pub fn init_logging(verbosity: u8) -> Result<(), SetGlobalDefaultError> {
    let subscriber = tracing_subscriber::fmt()
        .compact()
        .with_max_level(level_for(verbosity))
        .with_writer(std::io::stderr)
        .finish();
    subscriber::set_global_default(subscriber)
}

/// Scoped subscriber for tests; logging stops when the guard is dropped.
pub fn init_logging_tests() -> DefaultGuard {
    let subscriber = tracing_subscriber::fmt()
        .compact()
        .with_max_level(Level::DEBUG)
        .with_test_writer()
        .finish();
    subscriber::set_default(subscriber)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_levels() {
        assert_eq!(level_for(0), Level::WARN);
        assert_eq!(level_for(1), Level::INFO);
        assert_eq!(level_for(2), Level::DEBUG);
        assert_eq!(level_for(9), Level::TRACE);
    }
}

use tracing_subscriber::{fmt, EnvFilter};

/// Initialize the logging/tracing subsystem. Output goes to stderr so stdout
/// only ever carries the version string.
pub fn init_logging(verbose: bool) {
    let _ = fmt()
        .with_env_filter(log_filter(verbose))
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .compact()
        .try_init();
}

fn log_filter(verbose: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new("polytracker_version=debug")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("polytracker_version=warn"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbose_filter_enables_debug() {
        assert_eq!(log_filter(true).to_string(), "polytracker_version=debug");
    }

    #[test]
    fn init_twice_does_not_panic() {
        init_logging(false);
        init_logging(true);
    }
}

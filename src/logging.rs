use crate::errors::RouteFinderError;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Environment variable overriding the log filter
pub const LOG_ENV: &str = "ROUTEFINDER_LOG";


/// Pick the filter directive from the command line flags
/// An explicit level wins over `verbose`
pub fn filter_directive(verbose: bool, log_level: Option<&str>) -> String {
    match (verbose, log_level) {
        (_, Some(level)) if level.contains('=') => level.to_string(),
        (_, Some(level)) => format!("routefinder={level}"),
        (true, None) => "routefinder=debug".to_string(),
        (false, None) => "routefinder=warn".to_string(),
    }
}

/// Initialize structured logging on stderr
/// `ROUTEFINDER_LOG` takes precedence over the flags when set
pub fn init_tracing(verbose: bool, log_level: Option<&str>, log_json: bool) -> Result<(), RouteFinderError> {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(verbose, log_level)));

    let registry = tracing_subscriber::registry().with(filter);

    let result = if log_json {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_ansi(false),
            )
            .try_init()
    } else {
        registry
            .with(
                fmt::layer()
                    .compact()
                    .with_target(false)
                    .with_writer(std::io::stderr)
                    .with_ansi(false),
            )
            .try_init()
    };

    result.map_err(|error| RouteFinderError::Logging(error.to_string()))
}

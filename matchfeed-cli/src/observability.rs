use tracing_subscriber::EnvFilter;

/// Install the process-wide subscriber. Logs go to stderr so stdout stays parseable.
///
/// `RUST_LOG` selects the filter (default `info`); `quiet` drops everything below `error`
/// unless `RUST_LOG` says otherwise.
pub fn init(quiet: bool) {
    let fallback = if quiet { "error" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

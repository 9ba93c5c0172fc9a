use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs the global subscriber for the command-line programs.
///
/// `RUST_LOG` takes precedence over the verbosity flag.
pub fn init_cli_logger(verbose: bool) {
    let default_filter = if verbose {
        "neural_topology=debug,info"
    } else {
        "neural_topology=info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    // try_init so repeated calls (tests, embedding) do not panic
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .try_init();
}

use tracing_subscriber::{
    fmt, prelude::__tracing_subscriber_SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

/// Install a global `tracing` subscriber for hosts embedding the core.
///
/// `RUST_LOG` takes precedence; otherwise `verbose` enables `debug` for this
/// crate, and everything is silent by default. Calling it twice is a no-op.
pub fn init_logging(verbose: bool) {
    let default_directive = if verbose { "networth_core=debug" } else { "off" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    let _ = tracing_subscriber::registry()
        .with(fmt::layer().without_time())
        .with(env_filter)
        .try_init();
}

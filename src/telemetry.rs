use tracing_subscriber::{EnvFilter, fmt};

/// Environment variable holding the log filter, e.g. `richdoc=debug`.
pub const LOG_ENV: &str = "RICHDOC_LOG";

/// Install a global stderr subscriber.
///
/// The filter comes from [`LOG_ENV`] and defaults to `warn`, or `debug` for richdoc itself when
/// `verbose` is set. Installing twice is a no-op.
pub fn init(verbose: bool, color: bool) {
	let default_directive = if verbose { "richdoc=debug" } else { "warn" };
	let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_directive));

	let _ = fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_ansi(color)
		.with_target(false)
		.compact()
		.try_init();
}

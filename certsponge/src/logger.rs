//! Logging setup.
//!
//! Events go to stderr so stdout stays free for `-v` output.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Initialize console logging.
///
/// `RUST_LOG` takes precedence over `level` when set.
///
/// # Examples
/// ```no_run
/// certsponge::logger::init_logger("warn")?;
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn init_logger(level: &str) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(level))?;

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .try_init()?;

    Ok(())
}

//! Diagnostic logging setup

use tracing::Level;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Map the number of `-v` flags to a maximum log level
pub const fn level_for_verbosity(verbosity: u8) -> Level {
    match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    }
}

/// Install a stderr subscriber; `RUST_LOG` takes precedence over `verbosity`
///
/// Returns `false` if a global subscriber was already installed
pub fn init(verbosity: u8) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| {
            EnvFilter::default()
                .add_directive(LevelFilter::from_level(level_for_verbosity(verbosity)).into())
        });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .is_ok()
}

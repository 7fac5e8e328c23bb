// src/log.rs

//! Logging setup for hosts embedding the toolkit.
//!
//! Library code logs through the `log` facade (`debug!` per operation,
//! `info!` when a detect/stitch/export/import completes, `warn!` for skipped
//! inputs). Hosts that want console output install a `tracing-subscriber`
//! formatter once at startup; `log` records are forwarded into it.
//!
//! ```no_run
//! sprite_sheet_kit::utils::log::init_subscriber(tracing::Level::DEBUG).ok();
//! ```

pub use log::{debug, error, info, trace, warn};
pub use tracing::Level;

use crate::utils::error::{Result, SpriteError};

/// Initializes a global logging subscriber that writes to standard error.
///
/// Returns an error instead of panicking when a global subscriber or logger
/// is already installed, so calling it twice (e.g. from tests) is harmless.
///
/// # Arguments
/// * `max_level` - The maximum level of messages to log (e.g., `Level::INFO`, `Level::DEBUG`).
pub fn init_subscriber(max_level: Level) -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(max_level)
        .with_thread_ids(true)
        .with_target(false)
        .try_init()
        .map_err(|e| SpriteError::InvalidArg(format!("logging already initialized: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_init_reports_error() {
        let _ = init_subscriber(Level::WARN);
        assert!(init_subscriber(Level::WARN).is_err());
    }
}

//! Helpers for logging statistics of the solver in a machine-parsable form.
//!
//! Statistics are emitted through the [`log`] facade; consumers choose the logger
//! implementation and where the lines end up.

use std::fmt::Display;
use std::sync::OnceLock;

use log::info;

static STATISTIC_PREFIX: OnceLock<String> = OnceLock::new();

const DEFAULT_STATISTIC_PREFIX: &str = "%% statistic:";

/// Configures the prefix emitted in front of every statistic line. Can be set once, before the
/// first statistic is logged; later calls are ignored.
pub fn configure_statistic_logging(prefix: &str) {
    let _ = STATISTIC_PREFIX.set(prefix.to_owned());
}

/// Logs the statistic as `<prefix> <name>=<value>` at info level.
pub fn log_statistic(name: impl Display, value: impl Display) {
    let prefix = STATISTIC_PREFIX
        .get()
        .map(String::as_str)
        .unwrap_or(DEFAULT_STATISTIC_PREFIX);

    info!("{prefix} {name}={value}");
}

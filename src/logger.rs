//! Console logging for the binaries.

use std::env;
use std::io::Write;

use chrono::Local;
use log::LevelFilter;

/// Environment variable consulted when no level is given on the command line.
pub const LOG_LEVEL_VAR: &str = "CASCII_LOG";

/// Map a level name to a filter; unknown names fall back to `info`.
pub fn parse_level(level: &str) -> LevelFilter {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => LevelFilter::Trace,
        "debug" => LevelFilter::Debug,
        "info" => LevelFilter::Info,
        "warn" | "warning" => LevelFilter::Warn,
        "error" => LevelFilter::Error,
        "off" => LevelFilter::Off,
        _ => LevelFilter::Info,
    }
}

/// Install the logger. `level` wins over `CASCII_LOG`; the default is `info`.
///
/// Returns the filter in effect. Calling it twice keeps the first logger.
pub fn init(level: Option<&str>) -> LevelFilter {
    let filter = match level {
        Some(level) => parse_level(level),
        None => env::var(LOG_LEVEL_VAR)
            .map(|v| parse_level(&v))
            .unwrap_or(LevelFilter::Info),
    };

    let _ = env_logger::Builder::new()
        .filter_level(filter)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {:<5} {}] {}",
                Local::now().format("%H:%M:%S"),
                record.level(),
                record.target(),
                record.args()
            )
        })
        .try_init();

    filter
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_names() {
        assert_eq!(parse_level("debug"), LevelFilter::Debug);
        assert_eq!(parse_level(" WARN "), LevelFilter::Warn);
        assert_eq!(parse_level("off"), LevelFilter::Off);
        assert_eq!(parse_level("chatty"), LevelFilter::Info);
    }
}

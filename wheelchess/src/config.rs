//! Runtime tunables.
//!
//! Every value has a compile-time default and can be overridden through an
//! environment variable. Unparseable values fall back to the default.

use std::path::PathBuf;
use std::time::Duration;

/// Default logic tick period in milliseconds.
const DEFAULT_TICK_MS: u64 = 20;

/// Shortest tick accepted from the environment.
const MIN_TICK_MS: u64 = 1;

/// Default directory for the rolling log file.
const DEFAULT_LOG_DIR: &str = "logs";

/// Get the logic tick period.
///
/// Priority:
/// 1. `WHEELCHESS_TICK_MS` env variable if set (falls back to default if the
///    value is not a positive integer)
/// 2. `20` ms as fallback
pub fn get_tick_period() -> Duration {
    Duration::from_millis(tick_ms_from(std::env::var("WHEELCHESS_TICK_MS").ok()))
}

/// Get the directory where log files are written.
///
/// Priority:
/// 1. `WHEELCHESS_LOG_DIR` env variable if set
/// 2. `logs` as fallback
pub fn get_log_dir() -> PathBuf {
    if let Ok(path) = std::env::var("WHEELCHESS_LOG_DIR") {
        return PathBuf::from(path);
    }

    PathBuf::from(DEFAULT_LOG_DIR)
}

fn tick_ms_from(value: Option<String>) -> u64 {
    value
        .and_then(|v| v.trim().parse::<u64>().ok())
        .filter(|ms| *ms >= MIN_TICK_MS)
        .unwrap_or(DEFAULT_TICK_MS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_tick_period() {
        let period = get_tick_period();
        match std::env::var("WHEELCHESS_TICK_MS") {
            Ok(_) => assert!(period >= Duration::from_millis(MIN_TICK_MS)),
            Err(_) => assert_eq!(period, Duration::from_millis(DEFAULT_TICK_MS)),
        }
    }

    #[test]
    fn test_tick_ms_parsing() {
        assert_eq!(tick_ms_from(None), DEFAULT_TICK_MS);
        assert_eq!(tick_ms_from(Some("50".into())), 50);
        assert_eq!(tick_ms_from(Some(" 5 ".into())), 5);
        assert_eq!(tick_ms_from(Some("0".into())), DEFAULT_TICK_MS);
        assert_eq!(tick_ms_from(Some("fast".into())), DEFAULT_TICK_MS);
    }

    #[test]
    fn test_get_log_dir() {
        let dir = get_log_dir();
        match std::env::var("WHEELCHESS_LOG_DIR") {
            Ok(val) => assert_eq!(dir, PathBuf::from(val)),
            Err(_) => assert_eq!(dir, PathBuf::from(DEFAULT_LOG_DIR)),
        }
    }
}

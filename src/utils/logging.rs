use env_logger::{Builder, Target};
use log::{Level, LevelFilter};
use std::env;
use std::io::Write;

fn level_from_env(raw: &str) -> LevelFilter {
    match raw.to_lowercase().as_str() {
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Info,
    }
}

/// Installs the global logger. Calling it twice is harmless; the second
/// installation is ignored.
pub fn init_logging() {
    let level = level_from_env(&env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()));

    let mut builder = Builder::from_default_env();

    builder.format(|buf, record| {
        let timestamp = buf.timestamp();
        match record.level() {
            Level::Info => writeln!(buf, "{} [INFO] [{}]: {}", timestamp, record.target(), record.args()),
            level => writeln!(
                buf,
                "{} [{}] [{}:{}] {}: {}",
                timestamp,
                level,
                record.file().unwrap_or("unknown"),
                record.line().unwrap_or(0),
                record.target(),
                record.args()
            ),
        }
    });

    // Transport crates are chatty at debug level
    if env::var("CRM_ENV").unwrap_or_else(|_| "development".to_string()) == "production" {
        builder.filter_module("reqwest", LevelFilter::Warn);
        builder.filter_module("hyper", LevelFilter::Warn);
    }

    // Logs go to stderr so the rendered calendar owns stdout
    let _ = builder.filter_level(level).target(Target::Stderr).try_init();
}

pub fn log_aggregation(events: usize, skipped: usize) {
    if skipped > 0 {
        log::info!("[Calendar] Aggregated {} events ({} records skipped)", events, skipped);
    } else {
        log::debug!("[Calendar] Aggregated {} events", events);
    }
}

pub fn log_fetch_failure(operation: &str, error: &dyn std::error::Error) {
    log::warn!("[Source] {} failed: {}", operation, error);
}

pub fn log_request(method: &str, path: &str, status: u16, duration_ms: u64) {
    log::debug!("[HTTP] {} {} -> {} in {}ms", method, path, status, duration_ms);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(level_from_env("ERROR"), LevelFilter::Error);
        assert_eq!(level_from_env("debug"), LevelFilter::Debug);
        assert_eq!(level_from_env("crm_calendar=trace"), LevelFilter::Info);
    }

    #[test]
    fn test_init_logging_twice() {
        init_logging();
        init_logging();
    }
}

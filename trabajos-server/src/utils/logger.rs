//! Logging Infrastructure
//!
//! Console output plus optional daily rotating files:
//! - `app/`   application logs, deleted after [`LOG_RETENTION_DAYS`]
//! - `audit/` item mutations (`target: "audit"`), never deleted

use std::fs;
use std::path::{Path, PathBuf};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt, prelude::*};

/// Days of application logs kept on disk
pub const LOG_RETENTION_DAYS: i64 = 14;

/// Delete `app.YYYY-MM-DD` files older than `keep_days`
///
/// Returns how many files were removed.
pub fn cleanup_old_logs(log_dir: &Path, keep_days: i64) -> anyhow::Result<usize> {
    let app_log_dir = log_dir.join("app");
    if !app_log_dir.exists() {
        return Ok(0);
    }

    let cutoff = chrono::Local::now().date_naive() - chrono::Duration::days(keep_days);
    let mut removed = 0;

    for entry in fs::read_dir(app_log_dir)? {
        let path = entry?.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if let Some(date_part) = name.strip_prefix("app.")
            && let Ok(date) = chrono::NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
            && date < cutoff
        {
            fs::remove_file(&path)?;
            tracing::info!(file = %name, "Deleted old log file");
            removed += 1;
        }
    }

    Ok(removed)
}

/// Initialize the logging system
///
/// `RUST_LOG` takes precedence over `level`. Safe to call more than once;
/// later calls are ignored and return `false`. The hourly cleanup of `app/`
/// only starts for the call that installed the subscriber.
///
/// ```no_run
/// // Development: console only
/// trabajos_server::init_logger_with_file("debug", false, None)?;
///
/// // Production: JSON console + rotating files
/// trabajos_server::init_logger_with_file("info", true, Some("/var/lib/trabajos/logs"))?;
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn init_logger_with_file(
    level: &str,
    json_format: bool,
    log_dir: Option<&str>,
) -> anyhow::Result<bool> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let mut layers: Vec<Box<dyn Layer<Registry> + Send + Sync>> = Vec::new();

    if json_format {
        layers.push(
            fmt::layer()
                .json()
                .with_target(true)
                .with_current_span(true)
                .with_thread_ids(true)
                .boxed(),
        );
    } else {
        layers.push(fmt::layer().with_target(true).with_thread_ids(false).boxed());
    }

    if let Some(dir) = log_dir {
        let log_dir = Path::new(dir);
        let app_log_dir = log_dir.join("app");
        let audit_log_dir = log_dir.join("audit");
        fs::create_dir_all(&app_log_dir)?;
        fs::create_dir_all(&audit_log_dir)?;

        let app_log = RollingFileAppender::new(Rotation::DAILY, app_log_dir, "app");
        layers.push(
            fmt::layer()
                .with_target(true)
                .with_ansi(false)
                .with_writer(app_log)
                .with_filter(tracing_subscriber::filter::filter_fn(|meta| {
                    meta.target() != "audit"
                }))
                .boxed(),
        );

        let audit_log = RollingFileAppender::new(Rotation::DAILY, audit_log_dir, "audit");
        layers.push(
            fmt::layer()
                .json()
                .with_target(true)
                .with_writer(audit_log)
                .with_filter(tracing_subscriber::filter::filter_fn(|meta| {
                    meta.target() == "audit"
                }))
                .boxed(),
        );
    }

    if tracing_subscriber::registry()
        .with(layers)
        .with(env_filter)
        .try_init()
        .is_err()
    {
        tracing::debug!("Global subscriber already installed");
        return Ok(false);
    }

    if let Some(dir) = log_dir
        && tokio::runtime::Handle::try_current().is_ok()
    {
        tokio::spawn(periodic_cleanup(PathBuf::from(dir)));
    }

    Ok(true)
}

/// Runs every hour to clean old application logs
async fn periodic_cleanup(log_dir: PathBuf) {
    use tokio::time::{Duration, sleep};

    loop {
        if let Err(e) = cleanup_old_logs(&log_dir, LOG_RETENTION_DAYS) {
            tracing::warn!(error = %e, "Log cleanup failed");
        }
        sleep(Duration::from_secs(3600)).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cleanup_removes_only_expired_app_logs() {
        let dir = tempfile::tempdir().unwrap();
        let app = dir.path().join("app");
        fs::create_dir_all(&app).unwrap();

        let today = chrono::Local::now().date_naive();
        let old = today - chrono::Duration::days(LOG_RETENTION_DAYS + 3);
        let recent = today - chrono::Duration::days(1);

        let old_file = app.join(format!("app.{}", old.format("%Y-%m-%d")));
        let recent_file = app.join(format!("app.{}", recent.format("%Y-%m-%d")));
        let unrelated = app.join("notes.txt");
        for path in [&old_file, &recent_file, &unrelated] {
            fs::write(path, "x").unwrap();
        }

        let removed = cleanup_old_logs(dir.path(), LOG_RETENTION_DAYS).unwrap();
        assert_eq!(removed, 1);
        assert!(!old_file.exists());
        assert!(recent_file.exists());
        assert!(unrelated.exists());
    }

    #[test]
    fn test_cleanup_without_app_dir_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(cleanup_old_logs(dir.path(), 1).unwrap(), 0);
    }

    #[tokio::test]
    async fn test_only_first_init_installs() {
        let dir = tempfile::tempdir().unwrap();
        let log_dir = dir.path().to_string_lossy().into_owned();

        // Another test in this binary may have installed the subscriber already
        init_logger_with_file("warn", false, None).unwrap();
        let second = init_logger_with_file("debug", true, Some(&log_dir)).unwrap();
        assert!(!second);
        assert!(dir.path().join("audit").is_dir());
    }
}

//! Rolling Logger
//!
//! `tracing` subscriber that writes to stderr, to a daily-rolled file in the
//! app's log directory, and to an in-memory buffer of recent lines the UI
//! can show. Records emitted through the `log` facade are bridged in.

mod ring;

use std::io::{self, Write};
use std::path::Path;
use std::sync::{Arc, Mutex, OnceLock};

use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::ring::RingBuffer;

/// Log files kept per app
const MAX_LOG_FILES: usize = 7;
/// Lines kept in memory
const RING_CAPACITY: usize = 500;
const DEFAULT_FILTER: &str = "info";

type SharedRing = Arc<Mutex<RingBuffer>>;

struct LoggerState {
    ring: SharedRing,
    // Flushes the file writer when dropped
    _guard: WorkerGuard,
}

static STATE: OnceLock<LoggerState> = OnceLock::new();

/// Initialize the global logger. Calling it again is a no-op.
pub fn init_logger(log_dir: impl AsRef<Path>, app_name: &str) -> Result<(), String> {
    if STATE.get().is_some() {
        return Ok(());
    }
    let log_dir = log_dir.as_ref();
    std::fs::create_dir_all(log_dir)
        .map_err(|e| format!("Failed to create log dir {}: {}", log_dir.display(), e))?;

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(app_name)
        .filename_suffix("log")
        .max_log_files(MAX_LOG_FILES)
        .build(log_dir)
        .map_err(|e| format!("Failed to open log file in {}: {}", log_dir.display(), e))?;
    let (file_writer, guard) = tracing_appender::non_blocking(appender);

    let ring = Arc::new(Mutex::new(RingBuffer::new(RING_CAPACITY)));
    let state = LoggerState {
        ring: Arc::clone(&ring),
        _guard: guard,
    };
    if STATE.set(state).is_err() {
        // Another thread won the race
        return Ok(());
    }

    install_subscriber(file_writer, RingMaker(ring), app_name)
}

#[cfg(not(target_os = "android"))]
fn install_subscriber(file: NonBlocking, ring: RingMaker, _app_name: &str) -> Result<(), String> {
    tracing_subscriber::registry()
        .with(env_filter())
        .with(fmt::layer().with_writer(io::stderr).with_target(true))
        .with(fmt::layer().with_writer(file).with_ansi(false).with_target(true))
        .with(fmt::layer().with_writer(ring).with_ansi(false).with_target(true))
        .try_init()
        .map_err(|e| format!("Failed to install subscriber: {}", e))
}

// Logcat takes the `log` facade directly; tracing events still reach the
// file and the buffer.
#[cfg(target_os = "android")]
fn install_subscriber(file: NonBlocking, ring: RingMaker, app_name: &str) -> Result<(), String> {
    android_logger::init_once(
        android_logger::Config::default()
            .with_max_level(log::LevelFilter::Info)
            .with_tag(app_name),
    );
    let subscriber = tracing_subscriber::registry()
        .with(env_filter())
        .with(fmt::layer().with_writer(file).with_ansi(false).with_target(true))
        .with(fmt::layer().with_writer(ring).with_ansi(false).with_target(true));
    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| format!("Failed to install subscriber: {}", e))
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Log at info level through the rolling logger
pub fn info(msg: &str) -> Result<(), String> {
    ensure_initialized()?;
    tracing::info!("{}", msg);
    Ok(())
}

/// Log at error level through the rolling logger
pub fn error(msg: &str) -> Result<(), String> {
    ensure_initialized()?;
    tracing::error!("{}", msg);
    Ok(())
}

/// Most recent log lines, oldest first. Empty before `init_logger`.
pub fn recent_lines() -> Vec<String> {
    STATE
        .get()
        .and_then(|state| state.ring.lock().ok().map(|ring| ring.snapshot()))
        .unwrap_or_default()
}

fn ensure_initialized() -> Result<(), String> {
    if STATE.get().is_none() {
        return Err("Logger not initialized".to_string());
    }
    Ok(())
}

/// Hands the fmt layer one ring writer per event
#[derive(Clone)]
struct RingMaker(SharedRing);

impl<'a> MakeWriter<'a> for RingMaker {
    type Writer = RingWriter;

    fn make_writer(&'a self) -> Self::Writer {
        RingWriter {
            ring: Arc::clone(&self.0),
            buf: Vec::new(),
        }
    }
}

/// Buffers one formatted event and pushes its lines on drop
struct RingWriter {
    ring: SharedRing,
    buf: Vec<u8>,
}

impl Write for RingWriter {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for RingWriter {
    fn drop(&mut self) {
        if self.buf.is_empty() {
            return;
        }
        let text = String::from_utf8_lossy(&self.buf);
        let Ok(mut ring) = self.ring.lock() else {
            return;
        };
        for line in text.lines().filter(|l| !l.is_empty()) {
            ring.push(line.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logger_lifecycle() {
        assert!(info("too early").is_err());
        assert!(recent_lines().is_empty());

        let dir = tempfile::tempdir().unwrap();
        init_logger(dir.path(), "Test").expect("init failed");
        init_logger(dir.path(), "Test").expect("second init is a no-op");

        info("db ready").unwrap();
        error("sync failed").unwrap();
        log::warn!("bridged from log");

        let lines = recent_lines();
        assert!(lines.iter().any(|l| l.contains("INFO") && l.contains("db ready")));
        assert!(lines.iter().any(|l| l.contains("ERROR") && l.contains("sync failed")));
        assert!(lines.iter().any(|l| l.contains("bridged from log")));

        // The file writer is non-blocking; give its worker time to flush
        let today = chrono::Utc::now().date_naive();
        let file = dir.path().join(format!("Test.{}.log", today.format("%Y-%m-%d")));
        let mut content = String::new();
        for _ in 0..50 {
            content = std::fs::read_to_string(&file).unwrap_or_default();
            if content.contains("db ready") {
                break;
            }
            std::thread::sleep(std::time::Duration::from_millis(20));
        }
        assert!(content.contains("db ready"));
    }
}

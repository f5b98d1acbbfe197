use log::{LevelFilter, Log, Metadata, Record};
use std::sync::OnceLock;
use std::time::Instant;

/// Moment the logger was installed; log lines carry time elapsed since then.
static START: OnceLock<Instant> = OnceLock::new();

/// A logger that writes to stdout using println!
pub struct StdoutLogger;

impl Log for StdoutLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        let elapsed = START.get_or_init(Instant::now).elapsed();
        let level = record.level();
        let thread_id = std::thread::current().id();
        let file = record.file().unwrap_or("unknown");
        let line = record.line().unwrap_or(0);
        let message = record.args();

        println!(
            "+{:>10.3} [{}] [thread:{:?}] {}:{} - {}",
            elapsed.as_secs_f64(),
            level,
            thread_id,
            file,
            line,
            message
        );
    }

    fn flush(&self) {}
}

/// Initialize the global logger with StdoutLogger
///
/// Sets the max level based on build mode:
/// - Debug builds: LevelFilter::Debug (all levels active)
/// - Release builds: LevelFilter::Info (Debug suppressed)
///
/// This can only be called once per process. Subsequent calls are silently ignored.
pub fn init_stdout_logger() {
    static LOGGER: StdoutLogger = StdoutLogger;

    START.get_or_init(Instant::now);

    let max_level = if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(max_level);
    }
}

//! Unified logging for the sample program.
//!
//! One global logger dispatches by record target: screenshot events go to the
//! image sink's `ImageLogger`, everything else is printed to stderr with a
//! timestamp. Screenshot records bypass the console level filter — they carry
//! image payloads, not text anyone wants on a terminal.

use log::LevelFilter;
use piclog_sink::ImageLogger;
use std::io::Write as _;

/// Record target the sample logs screenshots under.
pub const SCREENSHOT_TARGET: &str = "screenshot";

struct RouterLogger {
    console_level: LevelFilter,
    image: ImageLogger,
}

impl log::Log for RouterLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.target() == self.image.target() || metadata.level() <= self.console_level
    }

    fn log(&self, record: &log::Record) {
        if record.target() == self.image.target() {
            log::Log::log(&self.image, record);
            return;
        }
        if record.level() <= self.console_level {
            eprintln!(
                "[{}] [{:<5}] {}",
                chrono::Local::now().format("%H:%M:%S%.3f"),
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

/// Install the routing logger as the global `log` logger.
///
/// The max level is pinned to `Trace` so screenshot records always flow;
/// `console_level` only gates the stderr side.
pub fn init(console_level: LevelFilter, image: ImageLogger) -> anyhow::Result<()> {
    log::set_boxed_logger(Box::new(RouterLogger {
        console_level,
        image,
    }))?;
    log::set_max_level(LevelFilter::Trace);
    Ok(())
}

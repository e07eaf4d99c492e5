//! `log::Log` adapter for the image sink.
//!
//! Hosts that route screenshot events through the `log` facade register an
//! [`ImageLogger`] (directly, or behind their own dispatching logger). The
//! logger claims records of a single target, treats the formatted message as
//! the base64 payload, and reads the record's structured key-values for the
//! per-event options.
//!
//! The `log` contract gives `log()` no way to fail, so sink errors go to a
//! host-installed error hook. The default hook drops them, mirroring a host
//! framework whose policy is to swallow sink failures; install a hook to
//! surface them.

use log::kv::{self, VisitSource};

use crate::error::SinkError;
use crate::params::WriteOptions;
use crate::sink::ImageSink;

/// Hook invoked with every sink error.
pub type ErrorHook = Box<dyn Fn(&SinkError) + Send + Sync>;

/// Routes log records of one target to an [`ImageSink`].
pub struct ImageLogger {
    sink: ImageSink,
    target: String,
    error_hook: Option<ErrorHook>,
}

impl ImageLogger {
    /// Wrap `sink`, claiming records whose target equals `target`.
    pub fn new(sink: ImageSink, target: impl Into<String>) -> Self {
        Self {
            sink,
            target: target.into(),
            error_hook: None,
        }
    }

    /// Install a hook that observes sink errors (the host framework's own
    /// failure channel).
    pub fn with_error_hook(mut self, hook: impl Fn(&SinkError) + Send + Sync + 'static) -> Self {
        self.error_hook = Some(Box::new(hook));
        self
    }

    /// The record target this logger claims.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Register this logger as the global `log` logger.
    ///
    /// Most hosts instead embed the `ImageLogger` in their own dispatching
    /// logger so non-screenshot records still reach a console or file.
    pub fn install(self) -> Result<(), log::SetLoggerError> {
        log::set_boxed_logger(Box::new(self))?;
        log::set_max_level(log::LevelFilter::Trace);
        Ok(())
    }
}

impl log::Log for ImageLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.target() == self.target
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let mut collector = OptionsCollector::default();
        // A key-value source can fail mid-visit; whatever was collected up to
        // that point still applies.
        let _ = record.key_values().visit(&mut collector);

        let message = record.args().to_string();
        if let Err(e) = self.sink.write_image(&message, &collector.options)
            && let Some(hook) = &self.error_hook
        {
            hook(&e);
        }
    }

    fn flush(&self) {}
}

/// Collects the recognized keys (`overlay`, `path`, `filename`) from a
/// record's key-value source; first occurrence of a key wins.
#[derive(Default)]
struct OptionsCollector {
    options: WriteOptions,
}

impl<'kv> VisitSource<'kv> for OptionsCollector {
    fn visit_pair(&mut self, key: kv::Key<'kv>, value: kv::Value<'kv>) -> Result<(), kv::Error> {
        let slot = match key.as_str() {
            "overlay" => &mut self.options.overlay,
            "path" => &mut self.options.sub_path,
            "filename" => &mut self.options.filename,
            _ => return Ok(()),
        };
        if slot.is_none() {
            *slot = Some(value.to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SinkConfig;
    use log::Log;

    fn logger_for(dir: &std::path::Path) -> ImageLogger {
        ImageLogger::new(ImageSink::new(SinkConfig::with_base_dir(dir)), "screenshot")
    }

    fn tiny_png_base64() -> String {
        let img = image::RgbaImage::from_pixel(8, 8, image::Rgba([10, 20, 30, 255]));
        let mut bytes = Vec::new();
        img.write_to(
            &mut std::io::Cursor::new(&mut bytes),
            image::ImageFormat::Png,
        )
        .unwrap();
        base64::Engine::encode(&base64::engine::general_purpose::STANDARD, &bytes)
    }

    #[test]
    fn sink_and_logger_are_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ImageSink>();
        assert_send_sync::<ImageLogger>();
    }

    #[test]
    fn claims_only_its_target() {
        let dir = tempfile::tempdir().unwrap();
        let logger = logger_for(dir.path());
        assert!(logger.enabled(&log::Metadata::builder().target("screenshot").build()));
        assert!(!logger.enabled(&log::Metadata::builder().target("app::ui").build()));
    }

    #[test]
    fn record_kvs_drive_the_write() {
        let dir = tempfile::tempdir().unwrap();
        let logger = logger_for(dir.path());
        let payload = tiny_png_base64();

        let kvs: &[(&str, &str)] = &[("path", "run/one"), ("filename", "frame.jpg")];
        logger.log(
            &log::Record::builder()
                .target("screenshot")
                .level(log::Level::Info)
                .key_values(&kvs)
                .args(format_args!("{payload}"))
                .build(),
        );

        assert!(dir.path().join("run/one/frame.jpg").exists());
    }

    #[test]
    fn foreign_targets_write_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let logger = logger_for(dir.path());
        let payload = tiny_png_base64();

        logger.log(
            &log::Record::builder()
                .target("app::other")
                .level(log::Level::Info)
                .args(format_args!("{payload}"))
                .build(),
        );

        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn error_hook_sees_decode_failures() {
        use std::sync::atomic::{AtomicUsize, Ordering};
        static CALLS: AtomicUsize = AtomicUsize::new(0);

        let dir = tempfile::tempdir().unwrap();
        let logger = logger_for(dir.path())
            .with_error_hook(|_e| {
                CALLS.fetch_add(1, Ordering::SeqCst);
            });

        logger.log(
            &log::Record::builder()
                .target("screenshot")
                .level(log::Level::Info)
                .args(format_args!("not base64 at all!!!"))
                .build(),
        );

        assert_eq!(CALLS.load(Ordering::SeqCst), 1);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}

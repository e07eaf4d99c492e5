//! The image log sink: one linear pass per event.
//!
//! decode base64 → decode image → overlay (optional) → resolve directory →
//! resolve filename → de-duplicate → JPEG encode & write. No cross-event
//! state beyond the configuration; no internal locking — concurrent events
//! aimed at the same path are subject to the check-then-write race and may
//! silently overwrite each other, matching the host-dispatch model this sink
//! is written for.

use std::borrow::Cow;
use std::fs::{self, File};
use std::io::{BufWriter, Write as _};
use std::path::{Path, PathBuf};

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use chrono::Timelike;
use image::DynamicImage;
use image::codecs::jpeg::JpegEncoder;

use crate::config::SinkConfig;
use crate::error::SinkError;
use crate::overlay::{OVERLAY_COLOR, OVERLAY_TEXT_SIZE, TextRasterizer};
use crate::params::WriteOptions;

/// Upper bound on filename de-duplication attempts.
const MAX_COLLISION_ATTEMPTS: u32 = 100;

/// Consumes one log event (base64 image payload + per-event options) and
/// materializes it as a JPEG file under the configured base directory.
pub struct ImageSink {
    config: SinkConfig,
    rasterizer: TextRasterizer,
}

impl ImageSink {
    /// Build a sink from an immutable configuration. Font discovery for the
    /// overlay happens once, here.
    pub fn new(config: SinkConfig) -> Self {
        let rasterizer = TextRasterizer::new(config.font_family.as_deref());
        Self { config, rasterizer }
    }

    /// The sink's configuration.
    pub fn config(&self) -> &SinkConfig {
        &self.config
    }

    /// Compatibility entry point: scan a stringly `key=value` parameter bag
    /// for the overlay/path/filename roles, then write.
    pub fn handle<S: AsRef<str>>(&self, message: &str, params: &[S]) -> Result<PathBuf, SinkError> {
        self.write_image(message, &WriteOptions::from_params(params))
    }

    /// Decode the base64 `message` as an image and write it as JPEG under the
    /// base directory, applying `options`. Returns the path written.
    ///
    /// Any failure propagates unchanged; no partial file is written on a
    /// decode failure, and directories created before a later failure remain.
    pub fn write_image(&self, message: &str, options: &WriteOptions) -> Result<PathBuf, SinkError> {
        // Hosts wrap long payloads across lines; whitespace is insignificant
        // in base64, so strip it rather than hand it to the strict decoder.
        let payload: Cow<'_, str> = if message.bytes().any(|b| b.is_ascii_whitespace()) {
            Cow::Owned(message.split_ascii_whitespace().collect())
        } else {
            Cow::Borrowed(message)
        };
        let bytes = BASE64.decode(payload.as_ref())?;
        let decoded = image::load_from_memory(&bytes).map_err(SinkError::ImageDecode)?;

        // One canonical pixel pipeline whether or not an overlay is drawn, so
        // an empty overlay is byte-identical to no overlay at all.
        let mut rgba = decoded.to_rgba8();
        if let Some(text) = options.overlay.as_deref()
            && !text.is_empty()
        {
            self.rasterizer
                .draw_text(&mut rgba, text, (0, 0), OVERLAY_TEXT_SIZE, OVERLAY_COLOR);
        }

        let dir = self.resolve_dir(options)?;
        let filename = resolve_filename(&dir, options);
        let path = dir.join(&filename);

        let rgb = DynamicImage::ImageRgba8(rgba).to_rgb8();
        let file = File::create(&path).map_err(|e| SinkError::Write {
            path: path.display().to_string(),
            source: e,
        })?;
        let mut writer = BufWriter::new(file);
        rgb.write_with_encoder(JpegEncoder::new_with_quality(
            &mut writer,
            self.config.jpeg_quality,
        ))
        .map_err(|e| SinkError::ImageEncode {
            path: path.display().to_string(),
            source: e,
        })?;
        writer.flush().map_err(|e| SinkError::Write {
            path: path.display().to_string(),
            source: e,
        })?;

        log::debug!("image event written to {}", path.display());
        Ok(path)
    }

    /// Base directory, extended by the event's sub-path when one is present
    /// and non-blank. Created recursively either way.
    fn resolve_dir(&self, options: &WriteOptions) -> Result<PathBuf, SinkError> {
        let dir = match options.sub_path.as_deref() {
            Some(sub) if !sub.trim().is_empty() => self.config.base_dir.join(sub),
            _ => self.config.base_dir.clone(),
        };
        fs::create_dir_all(&dir).map_err(|e| SinkError::CreateDir {
            path: dir.display().to_string(),
            source: e,
        })?;
        Ok(dir)
    }
}

/// Caller-supplied filename (verbatim) or the local-timestamp default, then
/// de-duplicated against existing files in `dir`.
fn resolve_filename(dir: &Path, options: &WriteOptions) -> String {
    let filename = options
        .filename
        .clone()
        .unwrap_or_else(default_filename);
    deduplicate_filename(dir, filename)
}

/// `yyyyMMddHHmmssffff.jpg` — 18 digits of local time down to
/// hundred-microsecond units.
fn default_filename() -> String {
    let now = chrono::Local::now();
    let frac = (now.nanosecond() % 1_000_000_000) / 100_000;
    format!("{}{frac:04}.jpg", now.format("%Y%m%d%H%M%S"))
}

fn deduplicate_filename(dir: &Path, filename: String) -> String {
    deduplicate_with(filename, |name| dir.join(name).exists())
}

/// Collision handling, kept bug-for-bug compatible with the observed
/// behavior: each failed attempt appends `-N.jpg` to the *previous candidate
/// string* (so `a.jpg` collides into `a.jpg-0.jpg`, then `a.jpg-0.jpg-1.jpg`,
/// ...). After 100 taken attempts the last candidate is used even though it
/// still collides, silently overwriting.
fn deduplicate_with(mut filename: String, taken: impl Fn(&str) -> bool) -> String {
    for attempt in 0..MAX_COLLISION_ATTEMPTS {
        if !taken(&filename) {
            break;
        }
        filename = format!("{filename}-{attempt}.jpg");
    }
    filename
}

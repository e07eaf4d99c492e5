//! Image log sink for the `log` facade.
//!
//! The whole point of this crate is to let an application log a screenshot to
//! a known directory: a log event whose message is a base64-encoded image is
//! decoded, optionally stamped with a red text overlay at the top-left
//! corner, and written as a JPEG under a configured base directory, with
//! per-event `path` and `filename` overrides and timestamped default names.
//!
//! # Module layout
//!
//! - [`config`] — immutable [`SinkConfig`] (base directory, JPEG quality,
//!   overlay font family)
//! - [`error`] — typed [`SinkError`] covering decode, directory, encode and
//!   write failures
//! - [`params`] — typed [`WriteOptions`] plus the stringly `key=value`
//!   parameter-bag adapter
//! - [`overlay`] — red overlay text rasterization (system fonts via
//!   fontdb/swash, builtin pixel-font fallback)
//! - [`sink`] — the [`ImageSink`] write path itself
//! - [`logger`] — [`ImageLogger`], a `log::Log` implementation routing one
//!   record target to the sink
//!
//! # Example
//!
//! ```no_run
//! use piclog_sink::{ImageSink, SinkConfig, WriteOptions};
//!
//! let sink = ImageSink::new(SinkConfig::with_base_dir("/var/log/shots"));
//! let options = WriteOptions::default()
//!     .overlay("session 42")
//!     .sub_path("user/42");
//! # let payload = String::new();
//! let written = sink.write_image(&payload, &options)?;
//! println!("saved {}", written.display());
//! # Ok::<(), piclog_sink::SinkError>(())
//! ```

pub mod config;
pub mod error;
pub mod logger;
pub mod overlay;
pub mod params;
pub mod sink;

pub use config::SinkConfig;
pub use error::SinkError;
pub use logger::ImageLogger;
pub use overlay::TextRasterizer;
pub use params::WriteOptions;
pub use sink::ImageSink;

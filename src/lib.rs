//! piclog — sample program for the piclog-sink image log target.
//!
//! Renders a synthetic terminal-style screenshot, base64-encodes it, and
//! emits it through the `log` facade so the image sink materializes it as a
//! JPEG on disk. Library exports exist for integration tests.

/// Application version (root crate version, for use by sub-crates).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod capture;
pub mod cli;
pub mod logging;

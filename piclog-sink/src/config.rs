//! Sink configuration.
//!
//! `SinkConfig` is immutable once the sink is constructed: a long-lived sink
//! holds one configuration value set at startup, and reconfiguration means
//! building a new sink. All fields deserialize with per-field defaults so a
//! partial TOML table (or an empty one) yields a usable configuration.

use serde::Deserialize;
use std::path::PathBuf;

/// Default JPEG quality (1-100) for encoded output.
const DEFAULT_JPEG_QUALITY: u8 = 90;

/// Configuration for an [`ImageSink`](crate::ImageSink).
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SinkConfig {
    /// Base output directory. Every event's file lands under this directory,
    /// optionally extended by the event's relative sub-path.
    ///
    /// Defaults to the platform pictures directory.
    #[serde(default = "default_base_dir")]
    pub base_dir: PathBuf,

    /// JPEG encoding quality, 1-100.
    #[serde(default = "default_jpeg_quality")]
    pub jpeg_quality: u8,

    /// Font family for the overlay text. When unset (or not installed) the
    /// sink queries the system sans-serif font, and falls back to a builtin
    /// pixel font when no system font is usable.
    #[serde(default)]
    pub font_family: Option<String>,
}

impl Default for SinkConfig {
    fn default() -> Self {
        Self {
            base_dir: default_base_dir(),
            jpeg_quality: default_jpeg_quality(),
            font_family: None,
        }
    }
}

impl SinkConfig {
    /// Create a configuration writing under the given base directory, with
    /// defaults for everything else.
    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            ..Self::default()
        }
    }
}

/// Platform pictures directory, falling back to `~/Pictures`, then `.`.
fn default_base_dir() -> PathBuf {
    if let Some(pictures) = dirs::picture_dir() {
        return pictures;
    }
    if let Some(home) = dirs::home_dir() {
        return home.join("Pictures");
    }
    PathBuf::from(".")
}

fn default_jpeg_quality() -> u8 {
    DEFAULT_JPEG_QUALITY
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_nonempty_base_dir() {
        let config = SinkConfig::default();
        assert!(!config.base_dir.as_os_str().is_empty());
        assert_eq!(config.jpeg_quality, DEFAULT_JPEG_QUALITY);
        assert!(config.font_family.is_none());
    }

    #[test]
    fn empty_toml_table_deserializes_to_defaults() {
        let config: SinkConfig = toml::from_str("").expect("empty config");
        assert_eq!(config.jpeg_quality, DEFAULT_JPEG_QUALITY);
    }

    #[test]
    fn partial_toml_overrides_only_named_fields() {
        let config: SinkConfig = toml::from_str(
            r#"
            base_dir = "/var/log/shots"
            jpeg_quality = 75
            "#,
        )
        .expect("partial config");
        assert_eq!(config.base_dir, PathBuf::from("/var/log/shots"));
        assert_eq!(config.jpeg_quality, 75);
        assert!(config.font_family.is_none());
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let result: Result<SinkConfig, _> = toml::from_str("log_path = \"/tmp\"");
        assert!(result.is_err());
    }
}

//! Command-line interface for the piclog sample program.

use clap::Parser;
use std::path::PathBuf;

/// piclog - log a synthetic screenshot through the image sink
#[derive(Parser, Debug)]
#[command(name = "piclog")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Base output directory (overrides the config file and the platform
    /// pictures directory default)
    #[arg(long, value_name = "DIR")]
    pub base_dir: Option<PathBuf>,

    /// TOML sink configuration file (base_dir, jpeg_quality, font_family)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Text stamped in red at the image's top-left corner
    #[arg(long, value_name = "TEXT", default_value = "piclog demo")]
    pub overlay: String,

    /// Skip the overlay entirely
    #[arg(long)]
    pub no_overlay: bool,

    /// Output filename, used verbatim (default: 18-digit local timestamp
    /// plus .jpg, chosen by the sink)
    #[arg(long, value_name = "NAME")]
    pub filename: Option<String>,

    /// Number of screenshots to capture and log
    #[arg(long, value_name = "N", default_value_t = 1)]
    pub count: u32,

    /// Rendered screen size
    #[arg(long, value_name = "WxH", default_value = "960x540")]
    pub size: String,

    /// Console log level (off, error, warn, info, debug, trace)
    #[arg(long, value_name = "LEVEL", default_value = "info", value_parser = parse_level)]
    pub log_level: log::LevelFilter,
}

impl Cli {
    /// Parse the `--size` flag into a (width, height) pair.
    pub fn parse_size(&self) -> anyhow::Result<(u32, u32)> {
        let (w, h) = self
            .size
            .split_once(['x', 'X'])
            .ok_or_else(|| anyhow::anyhow!("--size must look like 960x540, got '{}'", self.size))?;
        let width: u32 = w.trim().parse()?;
        let height: u32 = h.trim().parse()?;
        if width == 0 || height == 0 {
            anyhow::bail!("--size dimensions must be non-zero, got '{}'", self.size);
        }
        Ok((width, height))
    }
}

fn parse_level(s: &str) -> Result<log::LevelFilter, String> {
    s.parse()
        .map_err(|_| format!("unknown log level '{s}' (use off..trace)"))
}

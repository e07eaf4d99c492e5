use anyhow::{Context, Result};
use clap::Parser;
use std::path::Path;

use piclog::logging::SCREENSHOT_TARGET;
use piclog::{capture, cli, logging};
use piclog_sink::{ImageLogger, ImageSink, SinkConfig, TextRasterizer};

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    let (width, height) = cli.parse_size()?;

    let mut config = load_sink_config(cli.config.as_deref())?;
    if let Some(dir) = &cli.base_dir {
        config.base_dir = dir.clone();
    }
    let base_dir = config.base_dir.clone();
    let jpeg_quality = config.jpeg_quality;

    // Sink errors have no return path through the `log` facade; surface them
    // on stderr directly rather than back through the logger we are inside of.
    let image_logger = ImageLogger::new(ImageSink::new(config), SCREENSHOT_TARGET)
        .with_error_hook(|e| eprintln!("piclog: image sink error: {e}"));
    logging::init(cli.log_level, image_logger)?;

    log::info!("piclog {} starting", piclog::VERSION);
    log::info!("writing screenshots under {}", base_dir.display());

    let rasterizer = TextRasterizer::new(None);
    let session = uuid::Uuid::new_v4().to_string();
    let overlay = (!cli.no_overlay).then_some(cli.overlay.as_str());

    for shot in 0..cli.count {
        let frame = capture::render_fake_screen(&rasterizer, width, height);
        let payload = capture::to_base64_jpeg(&frame, jpeg_quality)?;
        emit_screenshot(&payload, overlay, &session, cli.filename.as_deref());
        log::info!("screenshot {}/{} routed to the image sink", shot + 1, cli.count);
    }

    log::info!(
        "done, session directory: {}",
        base_dir.join(&session).display()
    );
    Ok(())
}

/// Emit one screenshot record. The base64 payload is the message; overlay,
/// path, and filename travel as structured key-values, present only when set.
fn emit_screenshot(payload: &str, overlay: Option<&str>, sub_path: &str, filename: Option<&str>) {
    match (overlay, filename) {
        (Some(o), Some(f)) => {
            log::trace!(target: SCREENSHOT_TARGET, overlay = o, path = sub_path, filename = f; "{payload}");
        }
        (Some(o), None) => {
            log::trace!(target: SCREENSHOT_TARGET, overlay = o, path = sub_path; "{payload}");
        }
        (None, Some(f)) => {
            log::trace!(target: SCREENSHOT_TARGET, path = sub_path, filename = f; "{payload}");
        }
        (None, None) => {
            log::trace!(target: SCREENSHOT_TARGET, path = sub_path; "{payload}");
        }
    }
}

/// Sink configuration from an optional TOML file; defaults otherwise.
fn load_sink_config(path: Option<&Path>) -> Result<SinkConfig> {
    let Some(path) = path else {
        return Ok(SinkConfig::default());
    };
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading config file {}", path.display()))?;
    toml::from_str(&raw).with_context(|| format!("parsing config file {}", path.display()))
}

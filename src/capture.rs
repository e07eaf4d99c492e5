//! Synthetic screenshot rendering.
//!
//! The sample has no platform screen-capture dependency, so it renders
//! something interesting to look at instead: a terminal-style frame filled
//! with freshly generated UUIDs, drawn with the sink crate's text
//! rasterizer. The frame is then JPEG-encoded and base64-encoded, which is
//! exactly the payload shape the image sink expects in a log message.

use anyhow::Context;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, Rgba, RgbaImage};
use piclog_sink::TextRasterizer;

const BACKGROUND: Rgba<u8> = Rgba([16, 20, 24, 255]);
const TITLE_BAR: Rgba<u8> = Rgba([38, 44, 54, 255]);
const TEXT_GREEN: [u8; 3] = [110, 210, 130];
const TEXT_DIM: [u8; 3] = [140, 145, 160];

const TITLE_BAR_HEIGHT: u32 = 28;
const LINE_HEIGHT: i32 = 18;
const TEXT_SIZE: f32 = 14.0;

/// Render a fake terminal screen of the given size.
pub fn render_fake_screen(rasterizer: &TextRasterizer, width: u32, height: u32) -> RgbaImage {
    let mut img = RgbaImage::from_pixel(width, height, BACKGROUND);

    for y in 0..TITLE_BAR_HEIGHT.min(height) {
        for x in 0..width {
            img.put_pixel(x, y, TITLE_BAR);
        }
    }
    rasterizer.draw_text(&mut img, "piclog sample session", (8, 6), 16.0, TEXT_DIM);

    // Rows of random identifiers, like a console someone has been busy in.
    let mut y = TITLE_BAR_HEIGHT as i32 + 8;
    let mut row = 0u32;
    while y + LINE_HEIGHT <= height as i32 {
        let line = uuid::Uuid::new_v4().to_string();
        let color = if row % 3 == 0 { TEXT_DIM } else { TEXT_GREEN };
        rasterizer.draw_text(&mut img, &line, (8, y), TEXT_SIZE, color);
        y += LINE_HEIGHT;
        row += 1;
    }

    img
}

/// JPEG-encode `img` at `quality` and base64-encode the result.
pub fn to_base64_jpeg(img: &RgbaImage, quality: u8) -> anyhow::Result<String> {
    let rgb = DynamicImage::ImageRgba8(img.clone()).to_rgb8();
    let mut bytes = Vec::new();
    rgb.write_with_encoder(JpegEncoder::new_with_quality(
        &mut std::io::Cursor::new(&mut bytes),
        quality,
    ))
    .context("JPEG-encoding the rendered screen")?;
    Ok(BASE64.encode(&bytes))
}

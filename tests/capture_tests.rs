//! Tests for the synthetic screenshot renderer and payload encoding.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use piclog::capture;
use piclog_sink::TextRasterizer;

#[test]
fn rendered_screen_has_requested_size_and_content() {
    let rasterizer = TextRasterizer::new(None);
    let img = capture::render_fake_screen(&rasterizer, 320, 200);
    assert_eq!(img.dimensions(), (320, 200));

    // Title bar plus text rows: plenty of non-background pixels.
    let background = *img.get_pixel(319, 199);
    let foreground = img.pixels().filter(|p| **p != background).count();
    assert!(
        foreground > 500,
        "expected a busy frame, got {foreground} foreground pixels"
    );
}

#[test]
fn payload_round_trips_through_base64_and_jpeg() {
    let rasterizer = TextRasterizer::new(None);
    let img = capture::render_fake_screen(&rasterizer, 160, 120);
    let payload = capture::to_base64_jpeg(&img, 90).unwrap();

    let bytes = BASE64.decode(&payload).expect("payload is valid base64");
    let decoded = image::load_from_memory(&bytes).expect("payload decodes as an image");
    assert_eq!(decoded.width(), 160);
    assert_eq!(decoded.height(), 120);
}

#[test]
fn payload_feeds_the_sink_end_to_end() {
    use piclog_sink::{ImageSink, SinkConfig};

    let dir = tempfile::tempdir().unwrap();
    let rasterizer = TextRasterizer::new(None);
    let img = capture::render_fake_screen(&rasterizer, 160, 120);
    let payload = capture::to_base64_jpeg(&img, 90).unwrap();

    let sink = ImageSink::new(SinkConfig::with_base_dir(dir.path()));
    let written = sink
        .handle(&payload, &["path=session", "filename=frame.jpg"])
        .unwrap();
    assert_eq!(written, dir.path().join("session/frame.jpg"));
    assert!(written.is_file());
}

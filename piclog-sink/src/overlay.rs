//! Overlay text rasterization.
//!
//! Renders the event's overlay text directly onto the decoded image, in red,
//! anchored at the top-left corner. Glyphs come from a system font discovered
//! via fontdb and rasterized with swash; when no usable system font exists
//! (headless CI containers, minimal images) a builtin 5x7 pixel font keeps the
//! overlay visible rather than silently dropping it.

mod builtin;

use image::RgbaImage;
use swash::FontRef;
use swash::scale::{Render, ScaleContext, Source};
use swash::zeno::Format;

/// Fixed overlay text size in pixels.
pub const OVERLAY_TEXT_SIZE: f32 = 40.0;

/// Overlay text color (red).
pub const OVERLAY_COLOR: [u8; 3] = [255, 0, 0];

/// Owned font data plus the face index within it (.ttc collections carry
/// multiple faces in one blob). A `FontRef` is re-derived per draw call so no
/// self-referential borrow is held across calls.
struct FontData {
    data: Vec<u8>,
    index: usize,
}

impl FontData {
    fn font_ref(&self) -> Option<FontRef<'_>> {
        FontRef::from_index(&self.data, self.index)
    }
}

/// Rasterizes text onto RGBA images.
///
/// Built once per sink; font discovery walks the system font database a
/// single time at construction.
pub struct TextRasterizer {
    font: Option<FontData>,
}

impl TextRasterizer {
    /// Discover a usable font, preferring `family` when given, then the
    /// system sans-serif font, then a short list of common families.
    pub fn new(family: Option<&str>) -> Self {
        let font = load_system_font(family);
        match &font {
            Some(f) => log::debug!("overlay font loaded ({} bytes)", f.data.len()),
            None => log::debug!("no usable system font, overlay uses builtin pixel font"),
        }
        Self { font }
    }

    /// Draw `text` with its top-left corner at `(x, y)`.
    ///
    /// Pixels outside the image bounds are clipped. Glyphs the font does not
    /// cover render as the font's .notdef glyph (system path) or as a filled
    /// block (builtin path).
    pub fn draw_text(
        &self,
        image: &mut RgbaImage,
        text: &str,
        (x, y): (i32, i32),
        size_px: f32,
        color: [u8; 3],
    ) {
        if let Some(font) = &self.font
            && let Some(font_ref) = font.font_ref()
        {
            draw_with_font(font_ref, image, text, (x, y), size_px, color);
            return;
        }
        builtin::draw_text(image, text, (x, y), size_px, color);
    }
}

/// Rasterize each char's glyph as an alpha mask and composite it in `color`.
fn draw_with_font(
    font: FontRef<'_>,
    image: &mut RgbaImage,
    text: &str,
    (x, y): (i32, i32),
    size_px: f32,
    color: [u8; 3],
) {
    let metrics = font.metrics(&[]).scale(size_px);
    let glyph_metrics = font.glyph_metrics(&[]).scale(size_px);
    let charmap = font.charmap();

    let mut context = ScaleContext::new();
    let mut scaler = context.builder(font).size(size_px).hint(true).build();

    // y is the top of the text box; glyphs hang from the baseline below it.
    let baseline = y as f32 + metrics.ascent;
    let mut pen_x = x as f32;

    for ch in text.chars() {
        let glyph_id = charmap.map(ch);

        if let Some(glyph) = Render::new(&[Source::Outline])
            .format(Format::Alpha)
            .render(&mut scaler, glyph_id)
        {
            let gx = pen_x as i32 + glyph.placement.left;
            let gy = baseline as i32 - glyph.placement.top;
            let w = glyph.placement.width as usize;
            for (i, &alpha) in glyph.data.iter().enumerate() {
                if alpha == 0 || w == 0 {
                    continue;
                }
                let px = gx + (i % w) as i32;
                let py = gy + (i / w) as i32;
                blend_pixel(image, px, py, color, alpha);
            }
        }

        let advance = glyph_metrics.advance_width(glyph_id);
        // A zero advance (uncovered char) would stack glyphs on top of each
        // other; move by half an em instead.
        pen_x += if advance > 0.0 { advance } else { size_px * 0.5 };
    }
}

/// Alpha-blend `color` over the pixel at `(x, y)`, clipping out-of-bounds.
fn blend_pixel(image: &mut RgbaImage, x: i32, y: i32, color: [u8; 3], alpha: u8) {
    if x < 0 || y < 0 {
        return;
    }
    let (x, y) = (x as u32, y as u32);
    if x >= image.width() || y >= image.height() {
        return;
    }
    let dst = image.get_pixel_mut(x, y);
    let a = alpha as u16;
    for c in 0..3 {
        let blended = (color[c] as u16 * a + dst.0[c] as u16 * (255 - a)) / 255;
        dst.0[c] = blended as u8;
    }
    dst.0[3] = dst.0[3].max(alpha);
}

/// Load font bytes from the system database, in query priority order:
/// explicit family, generic sans-serif, then common installed families.
fn load_system_font(family: Option<&str>) -> Option<FontData> {
    let mut db = fontdb::Database::new();
    db.load_system_fonts();

    let mut families: Vec<fontdb::Family> = Vec::new();
    if let Some(name) = family {
        families.push(fontdb::Family::Name(name));
    }
    families.push(fontdb::Family::SansSerif);
    for name in ["DejaVu Sans", "Liberation Sans", "Noto Sans", "Arial"] {
        families.push(fontdb::Family::Name(name));
    }

    let id = db.query(&fontdb::Query {
        families: &families,
        weight: fontdb::Weight::NORMAL,
        stretch: fontdb::Stretch::Normal,
        style: fontdb::Style::Normal,
    })?;

    let (data, index) = db.with_face_data(id, |data, index| (data.to_vec(), index as usize))?;
    let font = FontData { data, index };
    // Reject faces swash cannot parse up front.
    font.font_ref()?;
    Some(font)
}

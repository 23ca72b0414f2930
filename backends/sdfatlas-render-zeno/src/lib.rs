//! Zeno glyph source: font outlines in, coverage masks out
//!
//! skrifa pulls the outline out of the font at the requested pixel size,
//! the path is built twice at once (an SVG string for Zeno, a kurbo path
//! for exact bounds), and Zeno scan-converts it into a tight 8-bit
//! coverage mask with 256 levels of anti-aliasing.
//!
//! Pure Rust, no system libraries.

use std::fmt::Write as _;

use kurbo::Shape;
use skrifa::instance::{LocationRef, Size};
use skrifa::outline::{DrawSettings, OutlineGlyphCollection};
use skrifa::{charmap::Charmap, GlyphId as SkrifaGlyphId, MetadataProvider};

use sdfatlas_core::error::{FontLoadError, RasterError, Result};
use sdfatlas_core::traits::GlyphSource;
use sdfatlas_core::types::{GlyphBitmap, GlyphId};
use sdfatlas_fontdb::Font;

/// Largest glyph bitmap edge we agree to allocate
pub const MAX_GLYPH_EXTENT: u32 = 65535;

/// What the ids walked by the packer mean
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GlyphIndexing {
    /// Ids are character codes looked up through the cmap
    #[default]
    Codepoint,
    /// Ids are raw glyph indices
    GlyphIndex,
}

/// Rasterizes glyphs of one [`Font`] on demand
///
/// Holds a scratch path buffer that every call rewrites, which is why
/// [`GlyphSource::rasterize`] needs `&mut self`.
pub struct ZenoGlyphSource<'a> {
    outlines: OutlineGlyphCollection<'a>,
    charmap: Charmap<'a>,
    indexing: GlyphIndexing,
    glyph_count: u32,
    builder: ZenoPathBuilder,
}

impl<'a> ZenoGlyphSource<'a> {
    /// Borrow `font` for rasterization
    pub fn new(font: &'a Font, indexing: GlyphIndexing) -> Result<Self> {
        let font_ref = skrifa::FontRef::from_index(font.data(), font.face_index())
            .map_err(|_| FontLoadError::InvalidData)?;

        log::debug!(
            "Zeno glyph source over {} glyphs, indexed by {:?}",
            font.glyph_count(),
            indexing
        );

        Ok(Self {
            outlines: font_ref.outline_glyphs(),
            charmap: font_ref.charmap(),
            indexing,
            glyph_count: font.glyph_count(),
            builder: ZenoPathBuilder::new(),
        })
    }

    pub fn indexing(&self) -> GlyphIndexing {
        self.indexing
    }

    /// The font glyph an id refers to
    fn resolve(&self, id: GlyphId) -> Option<SkrifaGlyphId> {
        match self.indexing {
            GlyphIndexing::Codepoint => self
                .charmap
                .map(id)
                .filter(|gid| gid.to_u32() != 0),
            GlyphIndexing::GlyphIndex => (id < self.glyph_count).then(|| SkrifaGlyphId::new(id)),
        }
    }
}

impl GlyphSource for ZenoGlyphSource<'_> {
    fn glyph_count(&self) -> u32 {
        self.glyph_count
    }

    fn has_glyph(&self, id: GlyphId) -> bool {
        self.resolve(id)
            .is_some_and(|gid| self.outlines.get(gid).is_some())
    }

    fn rasterize(
        &mut self,
        id: GlyphId,
        pixel_size: u32,
    ) -> std::result::Result<GlyphBitmap, RasterError> {
        use zeno::Mask;

        let gid = self.resolve(id).ok_or(RasterError::GlyphNotFound(id))?;
        let glyph = self
            .outlines
            .get(gid)
            .ok_or(RasterError::GlyphNotFound(id))?;

        // skrifa scales font units to pixels for us
        let settings =
            DrawSettings::unhinted(Size::new(pixel_size as f32), LocationRef::default());

        self.builder.clear();
        glyph
            .draw(settings, &mut self.builder)
            .map_err(|_| RasterError::OutlineExtractionFailed(id))?;

        if self.builder.is_empty() {
            // Spaces and other ink-free glyphs
            return Ok(GlyphBitmap::empty());
        }

        let bbox = self.builder.kurbo_path.bounding_box();
        if !(bbox.x0.is_finite() && bbox.y0.is_finite() && bbox.x1.is_finite() && bbox.y1.is_finite())
        {
            return Ok(GlyphBitmap::empty());
        }

        // Snap to whole pixels so the outline keeps its sub-pixel phase
        let min_x = bbox.x0.floor();
        let min_y = bbox.y0.floor();
        let width = (bbox.x1.ceil() - min_x) as u32;
        let height = (bbox.y1.ceil() - min_y) as u32;

        if width == 0 || height == 0 {
            return Ok(GlyphBitmap::empty());
        }
        if width > MAX_GLYPH_EXTENT || height > MAX_GLYPH_EXTENT {
            return Err(RasterError::TooLarge {
                glyph: id,
                width,
                height,
            });
        }

        let mut mask = vec![0u8; width as usize * height as usize];
        Mask::new(self.builder.commands.as_str())
            .size(width, height)
            .offset((-min_x as i32, -min_y as i32))
            .render_into(&mut mask, None);

        // Font coordinates are y-up, bitmaps are y-down
        let stride = width as usize;
        for y in 0..(height as usize / 2) {
            let top = y * stride;
            let bottom = (height as usize - 1 - y) * stride;
            for x in 0..stride {
                mask.swap(top + x, bottom + x);
            }
        }

        GlyphBitmap::from_coverage(width, height, mask).ok_or_else(|| {
            RasterError::Backend(format!("coverage buffer for glyph {} is short", id))
        })
    }
}

/// Dual-output path builder
///
/// - SVG path data that Zeno can rasterize
/// - a kurbo `BezPath` for exact bounds
struct ZenoPathBuilder {
    commands: String,
    kurbo_path: kurbo::BezPath,
}

impl ZenoPathBuilder {
    fn new() -> Self {
        Self {
            commands: String::new(),
            kurbo_path: kurbo::BezPath::new(),
        }
    }

    fn clear(&mut self) {
        self.commands.clear();
        self.kurbo_path = kurbo::BezPath::new();
    }

    fn is_empty(&self) -> bool {
        self.kurbo_path.elements().is_empty()
    }
}

// Writing into a String cannot fail
impl skrifa::outline::OutlinePen for ZenoPathBuilder {
    fn move_to(&mut self, x: f32, y: f32) {
        let _ = write!(self.commands, "M {:.2},{:.2} ", x, y);
        self.kurbo_path.move_to((x as f64, y as f64));
    }

    fn line_to(&mut self, x: f32, y: f32) {
        let _ = write!(self.commands, "L {:.2},{:.2} ", x, y);
        self.kurbo_path.line_to((x as f64, y as f64));
    }

    fn quad_to(&mut self, cx: f32, cy: f32, x: f32, y: f32) {
        let _ = write!(self.commands, "Q {:.2},{:.2} {:.2},{:.2} ", cx, cy, x, y);
        self.kurbo_path
            .quad_to((cx as f64, cy as f64), (x as f64, y as f64));
    }

    fn curve_to(&mut self, cx0: f32, cy0: f32, cx1: f32, cy1: f32, x: f32, y: f32) {
        let _ = write!(
            self.commands,
            "C {:.2},{:.2} {:.2},{:.2} {:.2},{:.2} ",
            cx0, cy0, cx1, cy1, x, y
        );
        self.kurbo_path.curve_to(
            (cx0 as f64, cy0 as f64),
            (cx1 as f64, cy1 as f64),
            (x as f64, y as f64),
        );
    }

    fn close(&mut self) {
        self.commands.push_str("Z ");
        self.kurbo_path.close_path();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skrifa::outline::OutlinePen;

    #[test]
    fn test_path_builder_emits_svg_and_kurbo() {
        let mut builder = ZenoPathBuilder::new();
        builder.move_to(0.0, 0.0);
        builder.line_to(10.0, 0.0);
        builder.quad_to(10.0, 5.0, 5.0, 10.0);
        builder.close();

        assert_eq!(
            builder.commands.trim_end(),
            "M 0.00,0.00 L 10.00,0.00 Q 10.00,5.00 5.00,10.00 Z"
        );
        let bbox = builder.kurbo_path.bounding_box();
        assert_eq!((bbox.x0, bbox.y0), (0.0, 0.0));
        assert_eq!((bbox.x1, bbox.y1), (10.0, 10.0));
    }

    #[test]
    fn test_path_builder_clear_resets_both_paths() {
        let mut builder = ZenoPathBuilder::new();
        builder.move_to(1.0, 1.0);
        builder.line_to(2.0, 2.0);
        assert!(!builder.is_empty());

        builder.clear();
        assert!(builder.is_empty());
        assert!(builder.commands.is_empty());
    }

    #[test]
    fn test_default_indexing_is_codepoint() {
        assert_eq!(GlyphIndexing::default(), GlyphIndexing::Codepoint);
    }
}

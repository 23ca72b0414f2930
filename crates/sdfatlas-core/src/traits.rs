//! The contracts between the packer and everything it delegates to
//!
//! - [`GlyphSource`] - Where glyph ids become coverage bitmaps
//! - [`SdfBackend`] - Where coverage becomes distance
//! - [`ImageWriter`] - Where pages become files
//! - [`ImageLoader`] - Where files become images (image mode)

use std::path::Path;

use crate::error::{RasterError, Result};
use crate::types::{BitmapData, GlyphBitmap, GlyphId};

/// A font, or anything shaped like one, seen as a walkable id space
///
/// `rasterize` takes `&mut self`: rasterizers keep per-call scratch state
/// and are driven strictly one glyph at a time.
///
/// ```ignore
/// struct Boxes;
///
/// impl GlyphSource for Boxes {
///     fn glyph_count(&self) -> u32 {
///         3
///     }
///
///     fn has_glyph(&self, id: GlyphId) -> bool {
///         id != 1
///     }
///
///     fn rasterize(&mut self, _id: GlyphId, size: u32) -> Result<GlyphBitmap, RasterError> {
///         Ok(GlyphBitmap { width: size, height: size, data: vec![255; (size * size) as usize] })
///     }
/// }
/// ```
pub trait GlyphSource {
    /// Upper bound (exclusive) of the id space
    fn glyph_count(&self) -> u32;

    /// Whether `id` maps to a glyph at all
    ///
    /// Missing ids are skipped silently by the packer.
    fn has_glyph(&self, id: GlyphId) -> bool;

    /// Render one glyph at `pixel_size` pixels per em
    fn rasterize(&mut self, id: GlyphId, pixel_size: u32)
        -> std::result::Result<GlyphBitmap, RasterError>;
}

/// Turns a coverage image into a signed distance field
///
/// One blocking call per page. Implementations may fan out internally
/// (threads, a GPU queue) but must return the finished image.
pub trait SdfBackend: Send + Sync {
    /// Used in logs
    fn name(&self) -> &'static str;

    /// Convert `input` into a distance-encoded image of the same size
    fn convert(&self, input: &BitmapData) -> Result<BitmapData>;
}

/// Persists a finished page
pub trait ImageWriter {
    /// Encode `image` as PNG at `path`; any failure is fatal for the run
    fn write_png(&mut self, path: &Path, image: &BitmapData) -> Result<()>;
}

/// Reads a standalone image for image-to-SDF mode
pub trait ImageLoader {
    /// Load `path` as a single-channel image
    fn load(&self, path: &Path) -> Result<BitmapData>;
}

//! sdfatlas core: from a glyph set to pages of signed distance fields
//!
//! A font holds thousands of glyphs; a texture holds a fixed number of
//! pixels. This crate owns the part in between: packing glyph coverage
//! bitmaps onto fixed-size pages, noticing when a page is full, and
//! resuming on the next page exactly where the previous one stopped.
//!
//! ## The Pipeline
//!
//! 1. **Glyph source** - rasterizes one glyph at a time ([`GlyphSource`])
//! 2. **Page layout** - shelf-packs glyphs into a [`PageCanvas`] ([`layout`])
//! 3. **SDF conversion** - turns coverage into distance ([`SdfBackend`])
//! 4. **Output** - encodes each page to disk ([`ImageWriter`])
//!
//! Steps 1, 3 and 4 live in other crates behind the traits in [`traits`];
//! this crate never touches a font parser, a codec or a compute device.
//!
//! ```rust,no_run
//! use sdfatlas_core::{generate_all_pages, OutputNaming, PageLayout};
//! # use sdfatlas_core::traits::*;
//! # use sdfatlas_core::types::*;
//! # use sdfatlas_core::error::RasterError;
//! # struct Source;
//! # impl GlyphSource for Source {
//! #     fn glyph_count(&self) -> u32 { 0 }
//! #     fn has_glyph(&self, _: GlyphId) -> bool { false }
//! #     fn rasterize(&mut self, id: GlyphId, _: u32) -> Result<GlyphBitmap, RasterError> {
//! #         Err(RasterError::GlyphNotFound(id))
//! #     }
//! # }
//! # struct Sdf;
//! # impl SdfBackend for Sdf {
//! #     fn name(&self) -> &'static str { "identity" }
//! #     fn convert(&self, input: &BitmapData) -> sdfatlas_core::Result<BitmapData> { Ok(input.clone()) }
//! # }
//! # struct Writer;
//! # impl ImageWriter for Writer {
//! #     fn write_png(&mut self, _: &std::path::Path, _: &BitmapData) -> sdfatlas_core::Result<()> { Ok(()) }
//! # }
//!
//! let layout = PageLayout::new(1024, 1024, 32)?;
//! let naming = OutputNaming::from_source("out", "fonts/Inter.ttf".as_ref());
//! let summary = generate_all_pages(&mut Source, &layout, &Sdf, &mut Writer, &naming, true)?;
//! println!("wrote {} pages", summary.pages.len());
//! # Ok::<(), sdfatlas_core::AtlasError>(())
//! ```

pub mod canvas;
pub mod error;
pub mod layout;
pub mod naming;
pub mod paginate;
pub mod traits;

pub use canvas::PageCanvas;
pub use error::{AtlasError, Result};
pub use layout::{pack_page, Fit, LayoutCursor, PackedPage, PageLayout, Placement};
pub use naming::OutputNaming;
pub use paginate::{convert_image, generate_all_pages, GenerationSummary};
pub use traits::{GlyphSource, ImageLoader, ImageWriter, SdfBackend};

/// The data structures passed between pipeline stages
pub mod types {
    /// Identifier in the glyph id space walked by the packer
    ///
    /// Depending on the glyph source this is either a character code or a
    /// raw glyph index. The space may be sparse.
    pub type GlyphId = u32;

    /// Coverage produced by rasterizing one glyph
    ///
    /// Row-major, one byte per pixel, no padding. Lives only long enough to
    /// be copied onto a page.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct GlyphBitmap {
        pub width: u32,
        pub height: u32,
        pub data: Vec<u8>,
    }

    impl GlyphBitmap {
        /// A glyph with no ink, such as a space
        pub fn empty() -> Self {
            Self {
                width: 0,
                height: 0,
                data: Vec::new(),
            }
        }

        /// Wraps a coverage buffer, rejecting one that is too short
        pub fn from_coverage(width: u32, height: u32, data: Vec<u8>) -> Option<Self> {
            if data.len() < width as usize * height as usize {
                return None;
            }
            Some(Self {
                width,
                height,
                data,
            })
        }

        pub fn is_empty(&self) -> bool {
            self.width == 0 || self.height == 0
        }
    }

    /// A whole image moving between stages
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct BitmapData {
        pub width: u32,
        pub height: u32,
        pub format: BitmapFormat,
        pub data: Vec<u8>,
    }

    impl BitmapData {
        /// Bytes the buffer must hold for its dimensions and format
        pub fn expected_len(&self) -> usize {
            self.width as usize * self.height as usize * self.format.channels() as usize
        }

        /// Bytes per row
        pub fn stride(&self) -> usize {
            self.width as usize * self.format.channels() as usize
        }
    }

    /// How pixels are arranged in the bitmap
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum BitmapFormat {
        Gray8,
        Rgba8,
    }

    impl BitmapFormat {
        /// Components per pixel
        pub fn channels(self) -> u8 {
            match self {
                Self::Gray8 => 1,
                Self::Rgba8 => 4,
            }
        }
    }

    /// Where packing goes after a page is finished
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum PageResult {
        /// The page filled up; the next page starts at this id
        Continue(GlyphId),
        /// Every glyph has been visited
        Done,
    }
}

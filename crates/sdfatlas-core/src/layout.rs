//! Shelf packing: glyphs in rows, rows down the page
//!
//! Glyphs are laid left to right along a shelf. When the next glyph would
//! cross the right edge a new shelf opens below the tallest glyph of the
//! current one. When a new shelf could not hold a glyph of the nominal
//! pixel size, the page is full and the glyph that did not fit becomes the
//! first glyph of the next page.
//!
//! The margin pads every glyph by half its value on each side, which also
//! leaves a full margin between neighbours and between shelves.

use crate::canvas::PageCanvas;
use crate::error::{AtlasError, Result};
use crate::traits::GlyphSource;
use crate::types::{GlyphId, PageResult};

/// Default page edge in pixels
pub const DEFAULT_PAGE_SIZE: u32 = 1024;

/// Default nominal glyph size in pixels per em
pub const DEFAULT_PIXEL_SIZE: u32 = 32;

/// Default padding between glyphs and shelves
pub const DEFAULT_MARGIN: u32 = 8;

/// Fixed geometry shared by every page of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLayout {
    width: u32,
    height: u32,
    pixel_size: u32,
    margin: u32,
}

impl PageLayout {
    /// Validated page geometry with the default margin
    pub fn new(width: u32, height: u32, pixel_size: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(AtlasError::Config(format!(
                "page size must be positive, got {}x{}",
                width, height
            )));
        }
        if pixel_size == 0 {
            return Err(AtlasError::Config("glyph size must be positive".into()));
        }

        Ok(Self {
            width,
            height,
            pixel_size,
            margin: DEFAULT_MARGIN,
        })
    }

    /// Replace the packing margin
    pub fn with_margin(mut self, margin: u32) -> Self {
        self.margin = margin;
        self
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Nominal glyph size, also the worst-case shelf height
    pub fn pixel_size(&self) -> u32 {
        self.pixel_size
    }

    pub fn margin(&self) -> u32 {
        self.margin
    }
}

impl Default for PageLayout {
    fn default() -> Self {
        Self {
            width: DEFAULT_PAGE_SIZE,
            height: DEFAULT_PAGE_SIZE,
            pixel_size: DEFAULT_PIXEL_SIZE,
            margin: DEFAULT_MARGIN,
        }
    }
}

/// Where the next glyph goes on the current page
///
/// A plain value: [`LayoutCursor::fit`] consumes one cursor and hands back
/// the next, so the packing arithmetic can be driven and inspected without
/// a rasterizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutCursor {
    /// Next insertion x on the current shelf
    pub cursor_x: u32,
    /// Top of the current shelf
    pub shelf_y: u32,
    /// Tallest glyph placed on the current shelf so far
    pub shelf_max_height: u32,
    /// Padding around glyphs and between shelves
    pub margin: u32,
}

/// Outcome of offering one glyph to the cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fit {
    /// Top-left corner for the glyph and the cursor after it
    Placed { x: u32, y: u32, next: LayoutCursor },
    /// Nothing more goes on this page
    PageFull,
}

impl LayoutCursor {
    /// Cursor at the top-left of an empty page
    pub fn new(margin: u32) -> Self {
        let half_margin = margin / 2;
        Self {
            cursor_x: half_margin,
            shelf_y: half_margin,
            shelf_max_height: 0,
            margin,
        }
    }

    fn half_margin(&self) -> u32 {
        self.margin / 2
    }

    /// Try to place a `width` x `height` glyph
    pub fn fit(self, width: u32, height: u32, layout: &PageLayout) -> Fit {
        let half_margin = self.half_margin();
        let mut next = self;

        if exceeds(next.cursor_x, width, half_margin, layout.width) {
            next.cursor_x = half_margin;
            next.shelf_y = next
                .shelf_y
                .saturating_add(next.shelf_max_height)
                .saturating_add(half_margin);
            next.shelf_max_height = 0;

            // Any glyph may land on the new shelf, so it must hold a full em
            if exceeds(next.shelf_y, layout.pixel_size, half_margin, layout.height) {
                return Fit::PageFull;
            }
        }

        // Oversized glyphs: wider than a fresh shelf or taller than what is left
        if exceeds(next.cursor_x, width, half_margin, layout.width)
            || exceeds(next.shelf_y, height, half_margin, layout.height)
        {
            return Fit::PageFull;
        }

        let (x, y) = (next.cursor_x, next.shelf_y);
        next.shelf_max_height = next.shelf_max_height.max(height);
        next.cursor_x = next.cursor_x.saturating_add(width).saturating_add(half_margin);

        Fit::Placed { x, y, next }
    }
}

fn exceeds(start: u32, extent: u32, padding: u32, limit: u32) -> bool {
    u64::from(start) + u64::from(extent) + u64::from(padding) > u64::from(limit)
}

/// Where one glyph landed on a page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub glyph: GlyphId,
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// One finished page and where packing goes next
#[derive(Debug, Clone)]
pub struct PackedPage {
    pub canvas: PageCanvas,
    pub placements: Vec<Placement>,
    pub next: PageResult,
}

/// Pack glyphs from `start` onward into a single page
///
/// Missing ids are skipped. A glyph that fails to rasterize is logged and
/// skipped. The first glyph that does not fit is not consumed: its id is
/// returned as [`PageResult::Continue`].
pub fn pack_page<S>(source: &mut S, start: GlyphId, layout: &PageLayout) -> PackedPage
where
    S: GlyphSource + ?Sized,
{
    let mut canvas = PageCanvas::new(layout.width, layout.height);
    let mut placements = Vec::new();
    let mut cursor = LayoutCursor::new(layout.margin);
    let glyph_count = source.glyph_count();

    log::debug!(
        "Packing glyphs {}..{} into a {}x{} page at {}px",
        start,
        glyph_count,
        layout.width,
        layout.height,
        layout.pixel_size
    );

    for id in start..glyph_count {
        if !source.has_glyph(id) {
            continue;
        }

        let glyph = match source.rasterize(id, layout.pixel_size) {
            Ok(glyph) => glyph,
            Err(err) => {
                log::warn!("Failed to load glyph {}: {}", id, err);
                continue;
            },
        };

        match cursor.fit(glyph.width, glyph.height, layout) {
            Fit::Placed { x, y, next } => {
                log::trace!("Glyph {} ({}x{}) at {},{}", id, glyph.width, glyph.height, x, y);
                canvas.blit(&glyph, x, y);
                placements.push(Placement {
                    glyph: id,
                    x,
                    y,
                    width: glyph.width,
                    height: glyph.height,
                });
                cursor = next;
            },
            Fit::PageFull => {
                log::debug!("Texture size exceeded, next page starts at glyph {}", id);
                return PackedPage {
                    canvas,
                    placements,
                    next: PageResult::Continue(id),
                };
            },
        }
    }

    PackedPage {
        canvas,
        placements,
        next: PageResult::Done,
    }
}

//! Pagination: keep packing pages until the glyph set runs out
//!
//! The only state carried from one page to the next is the glyph offset
//! and the page counter. Each page gets a fresh canvas and cursor, goes
//! through the SDF backend, and is written before the next one starts.

use std::path::{Path, PathBuf};

use crate::error::{AtlasError, Result};
use crate::layout::{pack_page, PageLayout};
use crate::naming::OutputNaming;
use crate::traits::{GlyphSource, ImageLoader, ImageWriter, SdfBackend};
use crate::types::{GlyphId, PageResult};

/// What a run produced
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationSummary {
    /// Written files, in page order
    pub pages: Vec<PathBuf>,
    /// Glyphs placed across all pages
    pub glyphs_placed: usize,
    /// First glyph left out when single-page mode stopped early
    pub truncated_at: Option<GlyphId>,
}

/// Pack, convert and write every page of a glyph set
///
/// With `paginate` off exactly one page is written, even if glyphs were
/// left over. With it on, pages are named `_page<N>` and generation stops
/// with [`AtlasError::UngeneratableGlyph`] as soon as a page cannot place
/// anything, since every later attempt would start from the same glyph.
pub fn generate_all_pages<S, W>(
    source: &mut S,
    layout: &PageLayout,
    sdf: &dyn SdfBackend,
    writer: &mut W,
    naming: &OutputNaming,
    paginate: bool,
) -> Result<GenerationSummary>
where
    S: GlyphSource + ?Sized,
    W: ImageWriter + ?Sized,
{
    log::info!(
        "Generating glyph atlas for {} glyphs with the {} SDF backend",
        source.glyph_count(),
        sdf.name()
    );

    let mut summary = GenerationSummary::default();
    let mut offset: GlyphId = 0;
    let mut page: u32 = 0;

    loop {
        log::info!("Generating page {}", page);

        let packed = pack_page(source, offset, layout);

        if paginate && packed.next == PageResult::Continue(offset) {
            return Err(AtlasError::UngeneratableGlyph {
                glyph: offset,
                width: layout.width(),
                height: layout.height(),
            });
        }

        let placed = packed.placements.len();
        let distance = sdf.convert(&packed.canvas.into_bitmap())?;

        let path = naming.page_path(paginate.then_some(page));
        log::info!("writing to {}", path.display());
        writer.write_png(&path, &distance)?;

        summary.pages.push(path);
        summary.glyphs_placed += placed;
        page += 1;

        match packed.next {
            PageResult::Done => break,
            PageResult::Continue(next) if !paginate => {
                log::warn!(
                    "Page full at glyph {}; remaining glyphs dropped (enable pagination to keep them)",
                    next
                );
                summary.truncated_at = Some(next);
                break;
            },
            PageResult::Continue(next) => offset = next,
        }
    }

    Ok(summary)
}

/// Convert a standalone image into a distance field
///
/// Writes `<out_dir>/<base>_sdf.png` and returns its path.
pub fn convert_image<L, W>(
    loader: &L,
    path: &Path,
    sdf: &dyn SdfBackend,
    writer: &mut W,
    naming: &OutputNaming,
) -> Result<PathBuf>
where
    L: ImageLoader + ?Sized,
    W: ImageWriter + ?Sized,
{
    let image = loader.load(path)?;
    log::info!(
        "Loaded {} ({}x{}), converting with the {} SDF backend",
        path.display(),
        image.width,
        image.height,
        sdf.name()
    );

    let distance = sdf.convert(&image)?;

    let out = naming.page_path(None);
    log::info!("writing to {}", out.display());
    writer.write_png(&out, &distance)?;

    Ok(out)
}

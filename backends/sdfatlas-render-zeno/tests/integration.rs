//! Integration tests for the Zeno glyph source
//!
//! These need a real font and skip themselves when `test-fonts/` is absent.

use std::path::PathBuf;

use sdfatlas_core::traits::GlyphSource;
use sdfatlas_core::types::PageResult;
use sdfatlas_core::{pack_page, PageLayout};
use sdfatlas_fontdb::Font;
use sdfatlas_render_zeno::{GlyphIndexing, ZenoGlyphSource};

fn test_font() -> Option<Font> {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../test-fonts")
        .join("NotoSans-Regular.ttf");
    if !path.exists() {
        eprintln!("Skipping test: font not found at {:?}", path);
        return None;
    }
    Some(Font::from_file(&path).expect("load test font"))
}

#[test]
fn test_codepoint_source_knows_latin_and_rasterizes_it() {
    let Some(font) = test_font() else { return };
    let mut source = ZenoGlyphSource::new(&font, GlyphIndexing::Codepoint).unwrap();

    assert!(source.has_glyph('H' as u32));
    assert!(!source.has_glyph(0x01));

    let glyph = source.rasterize('H' as u32, 32).unwrap();
    assert!(glyph.width > 0 && glyph.width <= 32);
    assert!(glyph.height > 16 && glyph.height <= 33);
    assert_eq!(glyph.data.len(), (glyph.width * glyph.height) as usize);
    assert!(glyph.data.iter().any(|&c| c == 255), "stems should be fully covered");
}

#[test]
fn test_space_rasterizes_to_empty_bitmap() {
    let Some(font) = test_font() else { return };
    let mut source = ZenoGlyphSource::new(&font, GlyphIndexing::Codepoint).unwrap();

    let glyph = source.rasterize(' ' as u32, 32).unwrap();
    assert!(glyph.is_empty());
}

#[test]
fn test_bitmap_grows_with_pixel_size() {
    let Some(font) = test_font() else { return };
    let mut source = ZenoGlyphSource::new(&font, GlyphIndexing::Codepoint).unwrap();

    let small = source.rasterize('O' as u32, 16).unwrap();
    let large = source.rasterize('O' as u32, 64).unwrap();
    assert!(large.width > small.width * 3);
    assert!(large.height > small.height * 3);
}

#[test]
fn test_rasterization_is_deterministic() {
    let Some(font) = test_font() else { return };
    let mut source = ZenoGlyphSource::new(&font, GlyphIndexing::Codepoint).unwrap();

    let first = source.rasterize('g' as u32, 40).unwrap();
    let _ = source.rasterize('W' as u32, 40).unwrap();
    let second = source.rasterize('g' as u32, 40).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_glyph_index_mode_walks_every_glyph() {
    let Some(font) = test_font() else { return };
    let source = ZenoGlyphSource::new(&font, GlyphIndexing::GlyphIndex).unwrap();

    assert_eq!(source.glyph_count(), font.glyph_count());
    assert!(!source.has_glyph(font.glyph_count()));
}

#[test]
fn test_font_packs_onto_pages() {
    let Some(font) = test_font() else { return };
    let mut source = ZenoGlyphSource::new(&font, GlyphIndexing::Codepoint).unwrap();
    let layout = PageLayout::new(256, 256, 24).unwrap();

    let page = pack_page(&mut source, 0, &layout);
    assert!(!page.placements.is_empty());
    assert!(matches!(page.next, PageResult::Continue(next) if next > 0));
}

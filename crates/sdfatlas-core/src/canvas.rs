//! The page a packer draws on
//!
//! One canvas per page, zeroed on creation, owned by the page iteration
//! that created it and consumed when the page is handed to the SDF backend.

use crate::types::{BitmapData, BitmapFormat, GlyphBitmap};

/// Single-channel coverage accumulator for one atlas page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageCanvas {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PageCanvas {
    /// A blank page
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Row-major coverage bytes
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Coverage at `(x, y)`, `None` outside the page
    pub fn pixel(&self, x: u32, y: u32) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    /// Copy a glyph's coverage with its top-left corner at `(x, y)`
    ///
    /// The layout engine only hands out positions that fit; anything that
    /// would still cross the page edge is clipped rather than wrapped.
    pub fn blit(&mut self, glyph: &GlyphBitmap, x: u32, y: u32) {
        if glyph.is_empty() || x >= self.width || y >= self.height {
            return;
        }

        let src_stride = glyph.width as usize;
        let dst_stride = self.width as usize;
        let copy_width = glyph.width.min(self.width - x) as usize;
        let copy_height = glyph.height.min(self.height - y) as usize;

        for row in 0..copy_height {
            let src_start = row * src_stride;
            let dst_start = (y as usize + row) * dst_stride + x as usize;
            let (Some(src), Some(dst)) = (
                glyph.data.get(src_start..src_start + copy_width),
                self.data.get_mut(dst_start..dst_start + copy_width),
            ) else {
                break;
            };
            dst.copy_from_slice(src);
        }
    }

    /// Hand the finished page on as a grayscale image
    pub fn into_bitmap(self) -> BitmapData {
        BitmapData {
            width: self.width,
            height: self.height,
            format: BitmapFormat::Gray8,
            data: self.data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(width: u32, height: u32, value: u8) -> GlyphBitmap {
        GlyphBitmap {
            width,
            height,
            data: vec![value; (width * height) as usize],
        }
    }

    #[test]
    fn test_new_canvas_is_zeroed() {
        let canvas = PageCanvas::new(16, 8);
        assert_eq!(canvas.data().len(), 128);
        assert!(canvas.data().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_blit_copies_rows_at_offset() {
        let mut canvas = PageCanvas::new(8, 8);
        let glyph = GlyphBitmap {
            width: 2,
            height: 2,
            data: vec![1, 2, 3, 4],
        };
        canvas.blit(&glyph, 3, 5);

        assert_eq!(canvas.pixel(3, 5), Some(1));
        assert_eq!(canvas.pixel(4, 5), Some(2));
        assert_eq!(canvas.pixel(3, 6), Some(3));
        assert_eq!(canvas.pixel(4, 6), Some(4));
        assert_eq!(canvas.pixel(2, 5), Some(0));
        assert_eq!(canvas.pixel(5, 6), Some(0));
    }

    #[test]
    fn test_blit_clips_at_page_edge() {
        let mut canvas = PageCanvas::new(4, 4);
        canvas.blit(&solid(3, 3, 9), 2, 2);

        assert_eq!(canvas.pixel(3, 3), Some(9));
        assert_eq!(canvas.data().iter().filter(|&&b| b == 9).count(), 4);
    }

    #[test]
    fn test_blit_empty_glyph_is_noop() {
        let mut canvas = PageCanvas::new(4, 4);
        canvas.blit(&GlyphBitmap::empty(), 0, 0);
        assert!(canvas.data().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_into_bitmap_is_gray8() {
        let bitmap = PageCanvas::new(3, 2).into_bitmap();
        assert_eq!(bitmap.format, BitmapFormat::Gray8);
        assert_eq!(bitmap.expected_len(), 6);
        assert_eq!(bitmap.data.len(), 6);
    }
}

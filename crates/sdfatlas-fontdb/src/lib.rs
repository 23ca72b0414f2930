//! Where font files become something the packer can walk
//!
//! A [`Font`] owns the raw bytes of one face. Table views are parsed on
//! demand and borrow from the handle, so nothing outlives it and dropping
//! the handle releases everything, on the error path as much as on the
//! happy one.

use std::fs;
use std::path::Path;

use read_fonts::{FileRef, FontRef as ReadFontRef, TableProvider};

use sdfatlas_core::error::{FontLoadError, Result};

/// Largest font file we are willing to read (50MB)
pub const MAX_FONT_SIZE: u64 = 50 * 1024 * 1024;

/// One face of a font file, held in memory
pub struct Font {
    data: Vec<u8>,
    face_index: u32,
    units_per_em: u16,
    glyph_count: u32,
}

impl Font {
    /// Opens a font file from disk
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_file_index(path, 0)
    }

    /// Opens a specific face from a font file (for TTC collections)
    pub fn from_file_index(path: impl AsRef<Path>, face_index: u32) -> Result<Self> {
        let path = path.as_ref();
        let display = path.display().to_string();

        let size = fs::metadata(path)
            .map_err(|_| FontLoadError::FileNotFound(display.clone()))?
            .len();
        if size > MAX_FONT_SIZE {
            return Err(FontLoadError::TooLarge {
                path: display,
                size,
                limit: MAX_FONT_SIZE,
            }
            .into());
        }

        let data = fs::read(path).map_err(|_| FontLoadError::FileNotFound(display.clone()))?;
        log::debug!("Read {} bytes from {}", data.len(), display);

        Self::from_data_index(data, face_index)
    }

    /// Turns raw font bytes into a usable face
    pub fn from_data(data: Vec<u8>) -> Result<Self> {
        Self::from_data_index(data, 0)
    }

    /// Turns raw font bytes into a specific face (for TTC collections)
    pub fn from_data_index(data: Vec<u8>, face_index: u32) -> Result<Self> {
        if let Some(format) = unsupported_container(&data) {
            return Err(FontLoadError::UnsupportedFormat(format.to_string()).into());
        }

        // FileRef tells a bad collection index apart from garbage bytes
        let file = FileRef::new(&data).map_err(|_| FontLoadError::InvalidData)?;
        if let FileRef::Collection(collection) = &file {
            if face_index >= collection.len() {
                return Err(FontLoadError::UnsupportedFormat(format!(
                    "face index {} out of range for a collection of {} faces",
                    face_index,
                    collection.len()
                ))
                .into());
            }
        }

        let font_ref =
            ReadFontRef::from_index(&data, face_index).map_err(|_| FontLoadError::InvalidData)?;

        // Fonts without a head table still render; assume the common grid
        let units_per_em = font_ref
            .head()
            .map(|head| head.units_per_em())
            .unwrap_or(1000);
        let glyph_count = font_ref
            .maxp()
            .map(|maxp| u32::from(maxp.num_glyphs()))
            .map_err(|_| FontLoadError::InvalidData)?;

        Ok(Font {
            data,
            face_index,
            units_per_em,
            glyph_count,
        })
    }

    /// Raw font bytes as they live in the file
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Returns the face index for TTC collections (0 for single fonts)
    pub fn face_index(&self) -> u32 {
        self.face_index
    }

    pub fn units_per_em(&self) -> u16 {
        self.units_per_em
    }

    /// Glyphs in the face, from `maxp`
    pub fn glyph_count(&self) -> u32 {
        self.glyph_count
    }

    /// Parsed view of the face, borrowing from this handle
    pub fn font_ref(&self) -> Result<ReadFontRef<'_>> {
        ReadFontRef::from_index(&self.data, self.face_index)
            .map_err(|_| FontLoadError::InvalidData.into())
    }

    /// Glyph that draws a character code, if the cmap has one
    pub fn glyph_for_codepoint(&self, codepoint: u32) -> Option<u32> {
        let font = self.font_ref().ok()?;
        font.cmap()
            .ok()?
            .map_codepoint(codepoint)
            .map(|gid| gid.to_u32())
            .filter(|&gid| gid != 0)
    }
}

impl std::fmt::Debug for Font {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Font")
            .field("bytes", &self.data.len())
            .field("face_index", &self.face_index)
            .field("units_per_em", &self.units_per_em)
            .field("glyph_count", &self.glyph_count)
            .finish()
    }
}

/// Containers read-fonts does not unpack
fn unsupported_container(data: &[u8]) -> Option<&'static str> {
    match data.get(..4) {
        Some(b"wOFF") => Some("WOFF"),
        Some(b"wOF2") => Some("WOFF2"),
        _ => None,
    }
}

//! Error types for sdfatlas

use std::path::PathBuf;

use thiserror::Error;

use crate::types::GlyphId;

pub type Result<T> = std::result::Result<T, AtlasError>;

/// Main error type for sdfatlas
///
/// Everything here is fatal for a run except [`AtlasError::Raster`], which
/// the packer downgrades to a warning and a skipped glyph.
#[derive(Debug, Error)]
pub enum AtlasError {
    #[error("Invalid argument: {0}")]
    Argument(String),

    #[error("Font loading failed: {0}")]
    FontLoad(#[from] FontLoadError),

    #[error("Rasterization failed: {0}")]
    Raster(#[from] RasterError),

    #[error("Failed to load image {path}: {reason}")]
    ImageLoad { path: PathBuf, reason: String },

    #[error("SDF conversion failed: {0}")]
    Sdf(#[from] SdfError),

    #[error("Export failed: {0}")]
    Export(#[from] ExportError),

    #[error("Glyph {glyph} cannot be placed on an empty {width}x{height} page")]
    UngeneratableGlyph {
        glyph: GlyphId,
        width: u32,
        height: u32,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Font loading errors
#[derive(Debug, Error)]
pub enum FontLoadError {
    #[error("Font file not found: {0}")]
    FileNotFound(String),

    #[error("Font file {path} is {size} bytes, above the {limit} byte limit")]
    TooLarge { path: String, size: u64, limit: u64 },

    #[error("Invalid font data")]
    InvalidData,

    #[error("Unsupported font format: {0}")]
    UnsupportedFormat(String),
}

/// Per-glyph rasterization errors
#[derive(Debug, Error)]
pub enum RasterError {
    #[error("Glyph {0} not found")]
    GlyphNotFound(GlyphId),

    #[error("Outline extraction failed for glyph {0}")]
    OutlineExtractionFailed(GlyphId),

    #[error("Glyph {glyph} rasterizes to {width}x{height}, above the size limit")]
    TooLarge {
        glyph: GlyphId,
        width: u32,
        height: u32,
    },

    #[error("Backend error: {0}")]
    Backend(String),
}

/// Distance transform errors
#[derive(Debug, Error)]
pub enum SdfError {
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Buffer too small: expected {expected} bytes, got {actual}")]
    BufferSize { expected: usize, actual: usize },

    #[error("Backend error: {0}")]
    Backend(String),
}

/// Export errors
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Encoding failed: {0}")]
    EncodingFailed(String),

    #[error("Write to {path} failed: {reason}")]
    WriteFailed { path: PathBuf, reason: String },
}

//! Image input for image-to-SDF mode

use std::path::Path;

use sdfatlas_core::{
    error::{AtlasError, Result},
    traits::ImageLoader,
    types::{BitmapData, BitmapFormat},
};

/// Loads any image the `image` crate can decode, reduced to one channel
///
/// Colour is collapsed to luma; alpha is dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageFileLoader;

impl ImageFileLoader {
    pub fn new() -> Self {
        Self
    }
}

impl ImageLoader for ImageFileLoader {
    fn load(&self, path: &Path) -> Result<BitmapData> {
        let image = image::open(path).map_err(|e| AtlasError::ImageLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let luma = image.to_luma8();
        let (width, height) = luma.dimensions();
        log::debug!("Loaded {} as {}x{} luma", path.display(), width, height);

        Ok(BitmapData {
            width,
            height,
            format: BitmapFormat::Gray8,
            data: luma.into_raw(),
        })
    }
}

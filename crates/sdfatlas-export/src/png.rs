//! PNG export
//!
//! Grayscale pages are written as 8-bit grayscale PNGs, RGBA as RGBA. The
//! result of every encode and write is checked; a page that did not reach
//! the disk fails the run.

use std::fs;
use std::path::Path;

use image::{ExtendedColorType, ImageEncoder};
use sdfatlas_core::{
    error::{ExportError, Result},
    traits::ImageWriter,
    types::{BitmapData, BitmapFormat},
};

/// Encode bitmap data to PNG bytes
///
/// Rows are read with a stride of `width * channels`; trailing bytes past
/// the last row are ignored.
pub fn encode_png(bitmap: &BitmapData) -> Result<Vec<u8>> {
    let expected_size = bitmap.expected_len();

    if bitmap.data.len() < expected_size {
        return Err(ExportError::EncodingFailed(format!(
            "Buffer too small: expected {} bytes for {}x{} {:?}, got {}",
            expected_size,
            bitmap.width,
            bitmap.height,
            bitmap.format,
            bitmap.data.len()
        ))
        .into());
    }

    let color = match bitmap.format {
        BitmapFormat::Gray8 => ExtendedColorType::L8,
        BitmapFormat::Rgba8 => ExtendedColorType::Rgba8,
    };

    let mut png_data = Vec::new();
    let encoder = image::codecs::png::PngEncoder::new_with_quality(
        &mut png_data,
        image::codecs::png::CompressionType::Default,
        image::codecs::png::FilterType::Sub,
    );

    encoder
        .write_image(
            &bitmap.data[..expected_size],
            bitmap.width,
            bitmap.height,
            color,
        )
        .map_err(|e| ExportError::EncodingFailed(format!("PNG encoding failed: {}", e)))?;

    Ok(png_data)
}

/// Writes pages to disk as PNG files
#[derive(Debug, Default)]
pub struct PngWriter {
    written: usize,
}

impl PngWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Files written so far
    pub fn written(&self) -> usize {
        self.written
    }
}

impl ImageWriter for PngWriter {
    fn write_png(&mut self, path: &Path, image: &BitmapData) -> Result<()> {
        let bytes = encode_png(image)?;

        fs::write(path, &bytes).map_err(|e| ExportError::WriteFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        log::debug!("Wrote {} bytes to {}", bytes.len(), path.display());
        self.written += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sdfatlas_core::AtlasError;
    use std::path::PathBuf;

    const PNG_MAGIC: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

    fn temp_output(ext: &str) -> PathBuf {
        let mut path = std::env::temp_dir();
        let id = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        path.push(format!("sdfatlas_png_test_{}.{}", id, ext));
        path
    }

    fn gray(width: u32, height: u32, data: Vec<u8>) -> BitmapData {
        BitmapData {
            width,
            height,
            format: BitmapFormat::Gray8,
            data,
        }
    }

    #[test]
    fn test_png_export_grayscale() {
        let png_data = encode_png(&gray(2, 2, vec![0, 128, 192, 255])).unwrap();
        assert_eq!(&png_data[0..8], &PNG_MAGIC);

        let decoded = image::load_from_memory(&png_data).unwrap();
        assert_eq!(decoded.color(), image::ColorType::L8);
        assert_eq!(decoded.to_luma8().into_raw(), vec![0, 128, 192, 255]);
    }

    #[test]
    fn test_png_export_rgba() {
        let bitmap = BitmapData {
            width: 2,
            height: 1,
            format: BitmapFormat::Rgba8,
            data: vec![255, 0, 0, 255, 0, 0, 255, 128],
        };
        let png_data = encode_png(&bitmap).unwrap();
        let decoded = image::load_from_memory(&png_data).unwrap();
        assert_eq!(decoded.to_rgba8().into_raw(), bitmap.data);
    }

    #[test]
    fn test_short_buffer_rejected() {
        let err = encode_png(&gray(4, 4, vec![0; 10])).unwrap_err();
        assert!(matches!(err, AtlasError::Export(ExportError::EncodingFailed(_))));
    }

    #[test]
    fn test_writer_creates_file() {
        let path = temp_output("png");
        let mut writer = PngWriter::new();
        writer.write_png(&path, &gray(3, 3, vec![7; 9])).unwrap();

        let data = std::fs::read(&path).unwrap();
        assert_eq!(&data[0..8], &PNG_MAGIC);
        assert_eq!(writer.written(), 1);

        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_writer_reports_unwritable_path() {
        let path = std::env::temp_dir()
            .join("sdfatlas_no_such_dir_for_tests")
            .join("nested")
            .join("out.png");
        let mut writer = PngWriter::new();
        let err = writer.write_png(&path, &gray(1, 1, vec![0])).unwrap_err();

        assert!(matches!(err, AtlasError::Export(ExportError::WriteFailed { .. })));
        assert_eq!(writer.written(), 0);
    }
}

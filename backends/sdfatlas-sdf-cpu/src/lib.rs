//! Reference signed distance field backend
//!
//! Works from the coverage raster, not from outlines, the way TinySDF
//! does: coverage is split into an "inside" and an "outside" seed grid,
//! each gets an exact squared Euclidean distance transform
//! (Felzenszwalb & Huttenlocher, separable 1-D lower envelopes), and the
//! signed difference is packed into one byte per pixel:
//!
//! ```text
//! value = 255 - 255 * (distance / radius + cutoff)
//! ```
//!
//! With the default cutoff the glyph edge lands at 191, the interior
//! saturates at 255, and anything further than `0.75 * radius` outside
//! reads 0.
//!
//! The `parallel` feature runs the row passes on rayon. Output is the same
//! byte for byte.

mod edt;

use sdfatlas_core::error::{AtlasError, Result, SdfError};
use sdfatlas_core::traits::SdfBackend;
use sdfatlas_core::types::{BitmapData, BitmapFormat};

use edt::INF;

/// Default spread of the field in pixels
pub const DEFAULT_RADIUS: f64 = 8.0;

/// Default share of the byte range given to the outside
pub const DEFAULT_CUTOFF: f64 = 0.25;

/// Exact distance transform on the CPU
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CpuSdfBackend {
    radius: f64,
    cutoff: f64,
}

impl CpuSdfBackend {
    pub fn new() -> Self {
        Self {
            radius: DEFAULT_RADIUS,
            cutoff: DEFAULT_CUTOFF,
        }
    }

    /// Set how many pixels the field spreads from the edge
    pub fn with_radius(mut self, radius: f64) -> Result<Self> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(AtlasError::Config(format!(
                "SDF radius must be a positive number, got {}",
                radius
            )));
        }
        self.radius = radius;
        Ok(self)
    }

    /// Set where the edge sits in the byte range (0 = at 255, 1 = at 0)
    pub fn with_cutoff(mut self, cutoff: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&cutoff) {
            return Err(AtlasError::Config(format!(
                "SDF cutoff must be within 0..=1, got {}",
                cutoff
            )));
        }
        self.cutoff = cutoff;
        Ok(self)
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn cutoff(&self) -> f64 {
        self.cutoff
    }

    fn encode(&self, outer: f64, inner: f64) -> u8 {
        let distance = outer.sqrt() - inner.sqrt();
        let value = 255.0 - 255.0 * (distance / self.radius + self.cutoff);
        value.round().clamp(0.0, 255.0) as u8
    }
}

impl Default for CpuSdfBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl SdfBackend for CpuSdfBackend {
    fn name(&self) -> &'static str {
        "cpu"
    }

    fn convert(&self, input: &BitmapData) -> Result<BitmapData> {
        let (width, height) = (input.width as usize, input.height as usize);
        if width == 0 || height == 0 {
            return Err(SdfError::InvalidDimensions {
                width: input.width,
                height: input.height,
            }
            .into());
        }
        if input.data.len() < input.expected_len() {
            return Err(SdfError::BufferSize {
                expected: input.expected_len(),
                actual: input.data.len(),
            }
            .into());
        }

        let coverage: Box<dyn Iterator<Item = u8> + '_> = match input.format {
            BitmapFormat::Gray8 => Box::new(input.data.iter().copied()),
            BitmapFormat::Rgba8 => Box::new(input.data.chunks_exact(4).map(|px| px[3])),
        };

        let len = width * height;
        let mut outer = Vec::with_capacity(len);
        let mut inner = Vec::with_capacity(len);
        for value in coverage.take(len) {
            let (o, i) = seed(value);
            outer.push(o);
            inner.push(i);
        }

        edt::transform(&mut outer, width, height);
        edt::transform(&mut inner, width, height);

        let data = outer
            .iter()
            .zip(&inner)
            .map(|(&o, &i)| self.encode(o, i))
            .collect();

        log::debug!(
            "CPU SDF: {}x{} page, radius {}, cutoff {}",
            width,
            height,
            self.radius,
            self.cutoff
        );

        Ok(BitmapData {
            width: input.width,
            height: input.height,
            format: BitmapFormat::Gray8,
            data,
        })
    }
}

/// Squared seed distances `(outer, inner)` for one coverage sample
///
/// Partial coverage is treated as an edge sitting inside the pixel, offset
/// from its centre by `0.5 - alpha`.
fn seed(coverage: u8) -> (f64, f64) {
    match coverage {
        255 => (0.0, INF),
        0 => (INF, 0.0),
        _ => {
            let d = 0.5 - f64::from(coverage) / 255.0;
            if d > 0.0 {
                (d * d, 0.0)
            } else {
                (0.0, d * d)
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gray(width: u32, height: u32, data: Vec<u8>) -> BitmapData {
        BitmapData {
            width,
            height,
            format: BitmapFormat::Gray8,
            data,
        }
    }

    /// A filled square in the middle of an otherwise empty image
    fn square(size: u32, inset: u32) -> BitmapData {
        let mut data = vec![0u8; (size * size) as usize];
        for y in inset..size - inset {
            for x in inset..size - inset {
                data[(y * size + x) as usize] = 255;
            }
        }
        gray(size, size, data)
    }

    fn at(image: &BitmapData, x: u32, y: u32) -> u8 {
        image.data[(y * image.width + x) as usize]
    }

    #[test]
    fn test_output_matches_input_size_and_is_gray() {
        let out = CpuSdfBackend::new().convert(&square(32, 8)).unwrap();
        assert_eq!((out.width, out.height), (32, 32));
        assert_eq!(out.format, BitmapFormat::Gray8);
        assert_eq!(out.data.len(), 32 * 32);
    }

    #[test]
    fn test_inside_is_bright_and_far_outside_is_dark() {
        let out = CpuSdfBackend::new().convert(&square(64, 16)).unwrap();
        assert_eq!(at(&out, 32, 32), 255);
        assert!(at(&out, 16, 32) > 127);
        assert_eq!(at(&out, 0, 0), 0);
    }

    #[test]
    fn test_field_falls_off_monotonically_outside() {
        let out = CpuSdfBackend::new().convert(&square(64, 16)).unwrap();
        let row: Vec<u8> = (8..16).map(|x| at(&out, x, 32)).collect();
        assert!(row.windows(2).all(|w| w[0] <= w[1]), "{:?}", row);
    }

    #[test]
    fn test_conversion_is_deterministic() {
        let backend = CpuSdfBackend::new();
        let input = square(40, 10);
        assert_eq!(backend.convert(&input).unwrap(), backend.convert(&input).unwrap());
    }

    #[test]
    fn test_empty_page_is_all_outside() {
        let out = CpuSdfBackend::new().convert(&gray(8, 8, vec![0; 64])).unwrap();
        assert!(out.data.iter().all(|&b| b == 0));
    }

    #[test]
    fn test_rgba_uses_alpha() {
        let gray_in = square(16, 4);
        let rgba = BitmapData {
            width: 16,
            height: 16,
            format: BitmapFormat::Rgba8,
            data: gray_in.data.iter().flat_map(|&a| [0, 0, 0, a]).collect(),
        };
        let backend = CpuSdfBackend::new();
        assert_eq!(backend.convert(&rgba).unwrap(), backend.convert(&gray_in).unwrap());
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        let err = CpuSdfBackend::new().convert(&gray(0, 4, Vec::new())).unwrap_err();
        assert!(matches!(err, AtlasError::Sdf(SdfError::InvalidDimensions { .. })));
    }

    #[test]
    fn test_short_buffer_rejected() {
        let err = CpuSdfBackend::new().convert(&gray(4, 4, vec![0; 3])).unwrap_err();
        assert!(matches!(
            err,
            AtlasError::Sdf(SdfError::BufferSize {
                expected: 16,
                actual: 3
            })
        ));
    }

    #[test]
    fn test_radius_and_cutoff_validated() {
        assert!(CpuSdfBackend::new().with_radius(0.0).is_err());
        assert!(CpuSdfBackend::new().with_radius(f64::NAN).is_err());
        assert!(CpuSdfBackend::new().with_cutoff(1.5).is_err());
        let backend = CpuSdfBackend::new().with_radius(4.0).unwrap();
        assert_eq!(backend.radius(), 4.0);
    }

    #[test]
    fn test_edge_value_follows_cutoff() {
        let backend = CpuSdfBackend::new();
        assert_eq!(backend.encode(0.0, 0.0), 191);
        let centred = backend.with_cutoff(0.5).unwrap();
        assert_eq!(centred.encode(0.0, 0.0), 128);
    }
}

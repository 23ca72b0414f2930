//! Files in and out of sdfatlas
//!
//! Pages leave as PNG through [`PngWriter`]; standalone images for
//! image-to-SDF mode come in through [`ImageFileLoader`]. Both sit on the
//! `image` crate.

pub mod load;
pub mod png;

pub use load::ImageFileLoader;
pub use png::{encode_png, PngWriter};

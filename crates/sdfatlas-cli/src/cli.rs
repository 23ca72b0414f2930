//! CLI argument definitions using Clap v4
//!
//! `-h` is the page height here, so clap's built-in `-h/--help` is replaced
//! by a long-only `--help`.

use clap::{ArgAction, Parser, ValueEnum};
use std::ffi::OsString;
use std::path::PathBuf;

use sdfatlas_core::layout::{DEFAULT_MARGIN, DEFAULT_PAGE_SIZE, DEFAULT_PIXEL_SIZE};
use sdfatlas_render_zeno::GlyphIndexing;
use sdfatlas_sdf_cpu::DEFAULT_RADIUS;

/// sdfatlas - pack a font's glyphs into signed distance field atlas pages
#[derive(Parser, Debug)]
#[command(name = "sdfatlas")]
#[command(version, about, long_about = None, disable_help_flag = true)]
pub struct Cli {
    // Input
    /// Font file to pack (.ttf, .otf, .ttc, .otc)
    #[arg(long = "font", value_name = "PATH", conflicts_with = "img")]
    pub font: Option<PathBuf>,

    /// Image file to convert to a distance field as-is
    #[arg(long = "img", value_name = "PATH")]
    pub img: Option<PathBuf>,

    /// Face index for TTC/OTC collections
    #[arg(long = "face-index", default_value_t = 0)]
    pub face_index: u32,

    /// How glyph ids are read: as Unicode codepoints or raw glyph indices
    #[arg(long = "index", value_enum, default_value_t = IndexArg::Codepoint)]
    pub index: IndexArg,

    // Page layout
    /// Page width in pixels
    #[arg(
        short = 'w',
        long = "width",
        default_value_t = DEFAULT_PAGE_SIZE,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub width: u32,

    /// Page height in pixels
    #[arg(
        short = 'h',
        long = "height",
        default_value_t = DEFAULT_PAGE_SIZE,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub height: u32,

    /// Nominal glyph size in pixels
    #[arg(
        long = "glyphsize",
        default_value_t = DEFAULT_PIXEL_SIZE,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub glyph_size: u32,

    /// Space kept around every glyph
    #[arg(long = "margin", default_value_t = DEFAULT_MARGIN)]
    pub margin: u32,

    /// Write as many pages as the glyph set needs
    #[arg(short = 'p', long = "paginate")]
    pub paginate: bool,

    // Distance field
    /// How far the field spreads from a glyph edge, in pixels
    #[arg(long = "radius", default_value_t = DEFAULT_RADIUS)]
    pub radius: f64,

    // Output
    /// Directory for the generated PNGs (defaults to the executable's directory)
    #[arg(short = 'o', long = "out-dir", value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Silent mode (warnings and errors only)
    #[arg(short = 'q', long = "quiet", conflicts_with = "verbose")]
    pub quiet: bool,

    /// Verbose output
    #[arg(long = "verbose")]
    pub verbose: bool,

    /// Print help
    #[arg(long = "help", action = ArgAction::Help)]
    #[allow(dead_code)]
    help: Option<bool>,
}

/// Glyph id space for `--index`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum IndexArg {
    /// Ids are Unicode scalar values looked up through the cmap
    Codepoint,
    /// Ids are glyph indices in `0..numGlyphs`
    Glyph,
}

impl From<IndexArg> for GlyphIndexing {
    fn from(arg: IndexArg) -> Self {
        match arg {
            IndexArg::Codepoint => GlyphIndexing::Codepoint,
            IndexArg::Glyph => GlyphIndexing::GlyphIndex,
        }
    }
}

/// Single-dash spellings accepted for compatibility with older scripts
const LEGACY_FLAGS: &[(&str, &str)] = &[
    ("-font", "--font"),
    ("-img", "--img"),
    ("-glyphsize", "--glyphsize"),
    ("-out", "--out-dir"),
];

/// Rewrite legacy single-dash long flags into their `--` form
///
/// Both `-font path` and `-font=path` are recognised. Everything else
/// passes through untouched.
pub fn normalize_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    args.into_iter()
        .map(|arg| match arg.to_str() {
            Some(text) => rewrite_legacy(text).map(OsString::from).unwrap_or(arg),
            None => arg,
        })
        .collect()
}

fn rewrite_legacy(arg: &str) -> Option<String> {
    let (flag, value) = match arg.split_once('=') {
        Some((flag, value)) => (flag, Some(value)),
        None => (arg, None),
    };

    let (_, modern) = LEGACY_FLAGS.iter().find(|(legacy, _)| *legacy == flag)?;
    Some(match value {
        Some(value) => format!("{}={}", modern, value),
        None => (*modern).to_string(),
    })
}

//! Font and image modes
//!
//! Wires the collaborators together: fontdb for the face, zeno for glyph
//! coverage, the CPU backend for distances, and the PNG writer for output.

use std::fs;
use std::path::{Path, PathBuf};

use sdfatlas_core::{
    convert_image, generate_all_pages,
    error::{AtlasError, Result},
    OutputNaming, PageLayout,
};
use sdfatlas_export::{ImageFileLoader, PngWriter};
use sdfatlas_fontdb::Font;
use sdfatlas_render_zeno::ZenoGlyphSource;
use sdfatlas_sdf_cpu::CpuSdfBackend;

use crate::cli::Cli;

pub fn run(cli: &Cli) -> Result<()> {
    if let Some(font) = &cli.font {
        run_font(cli, font)
    } else if let Some(image) = &cli.img {
        run_image(cli, image)
    } else {
        log::warn!("Nothing to do: pass --font <PATH> or --img <PATH>");
        Ok(())
    }
}

fn run_font(cli: &Cli, font_path: &Path) -> Result<()> {
    let layout = PageLayout::new(cli.width, cli.height, cli.glyph_size)?.with_margin(cli.margin);
    let sdf = CpuSdfBackend::new().with_radius(cli.radius)?;
    let naming = OutputNaming::from_source(output_dir(cli.out_dir.as_deref())?, font_path);

    let font = Font::from_file_index(font_path, cli.face_index)?;
    log::info!(
        "Loaded {} (face {}, {} glyphs, {} units/em)",
        font_path.display(),
        font.face_index(),
        font.glyph_count(),
        font.units_per_em()
    );

    let mut source = ZenoGlyphSource::new(&font, cli.index.into())?;
    let mut writer = PngWriter::new();

    let summary = generate_all_pages(
        &mut source,
        &layout,
        &sdf,
        &mut writer,
        &naming,
        cli.paginate,
    )?;

    if !cli.quiet {
        eprintln!(
            "✓ Packed {} glyphs into {} page(s) in {}",
            summary.glyphs_placed,
            summary.pages.len(),
            naming.out_dir().display()
        );
        if let Some(glyph) = summary.truncated_at {
            eprintln!("  Stopped at glyph {}; use -p to write every page", glyph);
        }
    }

    Ok(())
}

fn run_image(cli: &Cli, image_path: &Path) -> Result<()> {
    let sdf = CpuSdfBackend::new().with_radius(cli.radius)?;
    let naming = OutputNaming::from_source(output_dir(cli.out_dir.as_deref())?, image_path);
    let mut writer = PngWriter::new();

    let out = convert_image(&ImageFileLoader::new(), image_path, &sdf, &mut writer, &naming)?;

    if !cli.quiet {
        eprintln!("✓ Wrote {}", out.display());
    }

    Ok(())
}

/// Directory pages are written to
///
/// An explicit directory is created if missing. Without one, output lands
/// next to the running executable.
fn output_dir(explicit: Option<&Path>) -> Result<PathBuf> {
    match explicit {
        Some(dir) => {
            fs::create_dir_all(dir)?;
            Ok(dir.to_path_buf())
        },
        None => {
            let exe = std::env::current_exe()?;
            exe.parent().map(Path::to_path_buf).ok_or_else(|| {
                AtlasError::Config(format!("{} has no parent directory", exe.display()))
            })
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_output_dir_is_next_to_executable() {
        let dir = output_dir(None).unwrap();
        let exe = std::env::current_exe().unwrap();
        assert_eq!(Some(dir.as_path()), exe.parent());
    }

    #[test]
    fn test_explicit_output_dir_is_created() {
        let id = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let dir = std::env::temp_dir().join(format!("sdfatlas_out_{}", id)).join("pages");

        assert_eq!(output_dir(Some(&dir)).unwrap(), dir);
        assert!(dir.is_dir());

        let _ = fs::remove_dir_all(dir.parent().unwrap());
    }
}

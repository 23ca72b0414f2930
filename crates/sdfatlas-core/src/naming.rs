//! Output file names: `<dir>/<base>[_page<N>]_sdf.png`

use std::path::{Path, PathBuf};

/// Suffix shared by every file the tool writes
pub const SDF_SUFFIX: &str = "_sdf.png";

/// Where pages for one source file are written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputNaming {
    out_dir: PathBuf,
    base: String,
}

impl OutputNaming {
    pub fn new(out_dir: impl Into<PathBuf>, base: impl Into<String>) -> Self {
        Self {
            out_dir: out_dir.into(),
            base: base.into(),
        }
    }

    /// Name outputs after the source file, minus directories and extension
    pub fn from_source(out_dir: impl Into<PathBuf>, source: &Path) -> Self {
        let source = source.to_string_lossy();
        Self::new(out_dir, base_name(&source))
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    /// File name for a page; `None` when pagination is off
    pub fn file_name(&self, page: Option<u32>) -> String {
        match page {
            Some(page) => format!("{}_page{}{}", self.base, page, SDF_SUFFIX),
            None => format!("{}{}", self.base, SDF_SUFFIX),
        }
    }

    pub fn page_path(&self, page: Option<u32>) -> PathBuf {
        self.out_dir.join(self.file_name(page))
    }
}

/// Strip everything up to the last `/` or `\` and from the last `.`
///
/// Both separators are honoured on every platform so that Windows-style
/// paths name their outputs the same way everywhere.
pub fn base_name(source: &str) -> &str {
    let file = source
        .rsplit(|c| c == '/' || c == '\\')
        .next()
        .unwrap_or(source);
    match file.rfind('.') {
        Some(dot) => &file[..dot],
        None => file,
    }
}

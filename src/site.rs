use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use crate::loader::{self, Issue, LoadError};
use crate::render;
use crate::settings::SiteConfig;

const NOJEKYLL: &str = ".nojekyll";

#[derive(Debug, Error)]
pub enum BuildError {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl BuildError {
    /// True when the run stopped because there was nothing to render.
    pub fn is_empty_input(&self) -> bool {
        matches!(self, BuildError::Load(LoadError::EmptyInput { .. }))
    }
}

/// Outcome of a successful build.
#[derive(Debug)]
pub struct BuildSummary {
    pub output: PathBuf,
    pub files: usize,
    pub records: usize,
    pub bytes: usize,
    pub issues: Vec<Issue>,
}

/// Load, render, write. Nothing is written unless at least one record loaded.
pub fn build(cfg: &SiteConfig) -> Result<BuildSummary, BuildError> {
    let report = loader::load(&cfg.data_dir, cfg.load_options())?;
    let html = render::render(&report.records, &cfg.page_meta());
    let output = write_page(&cfg.out_dir, &cfg.out_file, &html, cfg.nojekyll)?;

    info!(path = %output.display(), bytes = html.len(), "Page written");
    Ok(BuildSummary {
        output,
        files: report.files.len(),
        records: report.records.len(),
        bytes: html.len(),
        issues: report.issues,
    })
}

/// Write `html` to `out_dir/out_file`, creating `out_dir`. Returns the page path.
pub fn write_page(
    out_dir: &Path,
    out_file: &str,
    html: &str,
    nojekyll: bool,
) -> Result<PathBuf, BuildError> {
    std::fs::create_dir_all(out_dir).map_err(|source| BuildError::Write {
        path: out_dir.to_path_buf(),
        source,
    })?;

    let path = out_dir.join(out_file);
    std::fs::write(&path, html).map_err(|source| BuildError::Write {
        path: path.clone(),
        source,
    })?;

    if nojekyll {
        let marker = out_dir.join(NOJEKYLL);
        std::fs::write(&marker, "").map_err(|source| BuildError::Write {
            path: marker,
            source,
        })?;
    }
    Ok(path)
}

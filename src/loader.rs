use std::fmt;
use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::record::{Record, RecordSet};

#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// Why a single input file (or one element of it) was skipped.
#[derive(Debug, Error)]
pub enum FileError {
    #[error("unreadable: {0}")]
    Read(#[from] std::io::Error),
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("top-level value is {found}, expected an object or an array of objects")]
    Shape { found: &'static str },
    #[error("element {index} is {found}, expected an object")]
    Element { index: usize, found: &'static str },
}

/// A non-fatal load problem, tied to the file it came from.
#[derive(Debug)]
pub struct Issue {
    pub path: PathBuf,
    pub error: FileError,
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path.display(), self.error)
    }
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read input directory {}: {source}", .path.display())]
    InputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("no records loaded from {} ({files} JSON files scanned, {} issues)", .path.display(), .issues.len())]
    EmptyInput {
        path: PathBuf,
        files: usize,
        issues: Vec<Issue>,
    },
}

/// Everything one load pass produced.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub records: RecordSet,
    pub files: Vec<PathBuf>,
    pub issues: Vec<Issue>,
}

#[derive(Debug, Clone, Copy)]
pub struct LoadOptions {
    /// Descend into subdirectories.
    pub recursive: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        LoadOptions { recursive: true }
    }
}

/// Discover, read and parse every JSON file under `dir`.
/// Fails only when the directory itself is unusable or nothing loads.
pub fn load(dir: &Path, opts: LoadOptions) -> Result<LoadReport, LoadError> {
    let files = discover(dir, opts)?;
    info!(dir = %dir.display(), files = files.len(), "Discovered input files");

    let sources = read_all(files);
    let report = collect(sources);

    if report.records.is_empty() {
        return Err(LoadError::EmptyInput {
            path: dir.to_path_buf(),
            files: report.files.len(),
            issues: report.issues,
        });
    }

    info!(
        records = report.records.len(),
        issues = report.issues.len(),
        "Loaded records"
    );
    Ok(report)
}

/// `*.json` files under `dir`, file-name order within each directory.
/// Symlinks are resolved; broken links and loops are logged and skipped.
pub fn discover(dir: &Path, opts: LoadOptions) -> Result<Vec<PathBuf>, LoadError> {
    let meta = std::fs::metadata(dir).map_err(|source| LoadError::InputDir {
        path: dir.to_path_buf(),
        source,
    })?;
    if !meta.is_dir() {
        return Err(LoadError::InputDir {
            path: dir.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "not a directory"),
        });
    }

    let mut walker = WalkDir::new(dir)
        .min_depth(1)
        .follow_links(true)
        .sort_by_file_name();
    if !opts.recursive {
        walker = walker.max_depth(1);
    }

    let mut files = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                warn!(error = %e, "Skipping unreadable directory entry");
                continue;
            }
        };
        if entry.file_type().is_file() && is_json(entry.path()) {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"))
}

#[cfg(feature = "rayon")]
fn read_all(files: Vec<PathBuf>) -> Vec<(PathBuf, std::io::Result<String>)> {
    // indexed collect keeps discovery order
    files
        .into_par_iter()
        .map(|p| {
            let text = std::fs::read_to_string(&p);
            (p, text)
        })
        .collect()
}

#[cfg(not(feature = "rayon"))]
fn read_all(files: Vec<PathBuf>) -> Vec<(PathBuf, std::io::Result<String>)> {
    files
        .into_iter()
        .map(|p| {
            let text = std::fs::read_to_string(&p);
            (p, text)
        })
        .collect()
}

/// Fold already-read sources into a report, in the order given. No I/O.
pub fn collect<I>(sources: I) -> LoadReport
where
    I: IntoIterator<Item = (PathBuf, std::io::Result<String>)>,
{
    let mut report = LoadReport::default();

    for (path, text) in sources {
        let parsed = text.map_err(FileError::from).and_then(|t| parse_document(&t));
        match parsed {
            Ok(doc) => {
                debug!(path = %path.display(), records = doc.records.len(), "Loaded file");
                report.records.extend(doc.records);
                for error in doc.skipped {
                    warn!(path = %path.display(), %error, "Skipping element");
                    report.issues.push(Issue { path: path.clone(), error });
                }
            }
            Err(error) => {
                warn!(path = %path.display(), %error, "Skipping file");
                report.issues.push(Issue { path: path.clone(), error });
            }
        }
        report.files.push(path);
    }

    report
}

/// Records from one file, plus the array elements that were not objects.
#[derive(Debug, Default)]
pub struct Document {
    pub records: Vec<Record>,
    pub skipped: Vec<FileError>,
}

/// Parse one file's text. Objects yield one record, arrays yield their object elements.
pub fn parse_document(text: &str) -> Result<Document, FileError> {
    let value: Value = serde_json::from_str(text)?;
    match value {
        Value::Object(map) => Ok(Document {
            records: vec![Record::new(map)],
            skipped: Vec::new(),
        }),
        Value::Array(items) => {
            let mut doc = Document::default();
            for (index, item) in items.into_iter().enumerate() {
                let found = kind_of(&item);
                match Record::from_value(item) {
                    Some(r) => doc.records.push(r),
                    None => doc.skipped.push(FileError::Element { index, found }),
                }
            }
            Ok(doc)
        }
        other => Err(FileError::Shape {
            found: kind_of(&other),
        }),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// ── Tests ──

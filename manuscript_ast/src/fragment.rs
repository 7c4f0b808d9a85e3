//! Reading source fragments.
//!
//! A fragment is a plain text file of prose. Loading one never fails:
//! a missing or unreadable file is logged and contributes nothing,
//! so that one bad path does not cost the rest of the manuscript.
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, error, warn};

lazy_static! {
    static ref HEADING: Regex = Regex::new(r"^#{1,6}\s").unwrap();
}

/// Whether a trimmed source line contributes to the text
fn is_prose(line: &str) -> bool {
    !(line.is_empty() || line.starts_with('%') || HEADING.is_match(line))
}

/// Split fragment source into its paragraphs, one per line,
/// dropping blank lines, markdown headings and `%` comments
/// ```
/// # use manuscript_ast::prose_lines;
/// let src = "# Scene One\n\nIt was dark.\n% fix this later\n  It was cold.  \n";
/// assert_eq!(prose_lines(src), vec!["It was dark.", "It was cold."]);
/// ```
pub fn prose_lines(src: &str) -> Vec<&str> {
    src.split('\n')
        .map(str::trim)
        .filter(|line| is_prose(line))
        .collect()
}

/// Somewhere fragments can be read from
pub trait FragmentSource {
    /// Read the raw text of a fragment, or `None` if it cannot be read.
    /// Implementations are responsible for reporting why.
    fn read_raw(&self, path: &Path) -> Option<String>;

    /// The paragraphs of a fragment; empty if it cannot be read
    fn load(&self, path: &Path) -> Vec<String> {
        match self.read_raw(path) {
            Some(src) => {
                let lines = prose_lines(&src);
                debug!("Loaded {} paragraphs from {}", lines.len(), path.display());
                lines.into_iter().map(String::from).collect()
            }
            None => Vec::new(),
        }
    }
}

/// Reads fragments from disk.
///
/// A relative path is looked for in each search directory in turn;
/// an empty directory stands for the current working directory.
#[derive(Debug, Clone, Default)]
pub struct FragmentLoader {
    search_dirs: Vec<PathBuf>,
}

impl FragmentLoader {
    /// Create a loader which resolves relative paths against `base_dir`
    pub fn new<P: Into<PathBuf>>(base_dir: P) -> Self {
        FragmentLoader {
            search_dirs: vec![base_dir.into()],
        }
    }

    /// Also look in `dir` for paths not found in the directories already given
    pub fn with_fallback<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.search_dirs.push(dir.into());
        self
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            return path.to_path_buf();
        }
        let mut candidates = self.search_dirs.iter().map(|dir| dir.join(path));
        let first = candidates.next().unwrap_or_else(|| path.to_path_buf());
        if first.exists() {
            return first;
        }
        candidates.find(|p| p.exists()).unwrap_or(first)
    }
}

impl FragmentSource for FragmentLoader {
    fn read_raw(&self, path: &Path) -> Option<String> {
        let full_path = self.resolve(path);
        match std::fs::read_to_string(&full_path) {
            Ok(src) => Some(src),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                warn!("File not found: {}", full_path.display());
                None
            }
            Err(e) => {
                error!("Could not read {}: {}", full_path.display(), e);
                None
            }
        }
    }
}

/// In-memory fragments, keyed by path
impl FragmentSource for HashMap<PathBuf, String> {
    fn read_raw(&self, path: &Path) -> Option<String> {
        let found = self.get(path).cloned();
        if found.is_none() {
            warn!("File not found: {}", path.display());
        }
        found
    }
}

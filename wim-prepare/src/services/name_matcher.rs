//! Name to biography text matching
//!
//! Text files from the extract stage are named after the person, usually
//! `surname_given.pdf.txt` (e.g. `adams_rachel.pdf.txt`), but not
//! consistently. For each name a fixed, ordered list of filename candidates
//! is generated and compared against every file stem; the first exact
//! (case-insensitive) hit wins.
//!
//! The index is built once, up front. Given the same names and the same
//! directory contents it always produces the same mapping.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use walkdir::WalkDir;
use wim_common::{Error, Result};

const EXAMPLE_MATCHES: usize = 3;
const EXAMPLE_MISSES: usize = 5;

/// Generate filename candidates for a full name, in match priority order
///
/// For "Sister Mary Nicholas Arnoldy":
/// `arnoldy_sister_mary_nicholas`, `arnoldy_nicholas`, `arnoldy_sister`,
/// `sister_arnoldy`, `sister_mary_nicholas_arnoldy`
pub fn name_candidates(full_name: &str) -> Vec<String> {
    let parts: Vec<&str> = full_name.split_whitespace().collect();
    let mut candidates = Vec::new();

    if parts.len() >= 2 {
        let surname = parts[parts.len() - 1].to_lowercase();
        let given: Vec<String> = parts[..parts.len() - 1]
            .iter()
            .map(|p| p.to_lowercase())
            .collect();

        candidates.push(format!("{}_{}", surname, given.join("_")));
        if given.len() > 1 {
            candidates.push(format!("{}_{}", surname, given[given.len() - 1]));
            candidates.push(format!("{}_{}", surname, given[0]));
        }
        candidates.push(format!("{}_{}", parts[0].to_lowercase(), surname));
    }

    candidates.push(
        full_name
            .to_lowercase()
            .replace(' ', "_")
            .replace(&['.', ','][..], ""),
    );

    candidates
        .into_iter()
        .map(|c| c.replace(&['(', ')', '.'][..], ""))
        .collect()
}

/// File name with a trailing `.pdf.txt` or `.txt` removed
pub fn comparison_key(file_name: &str) -> &str {
    file_name
        .strip_suffix(".pdf.txt")
        .or_else(|| file_name.strip_suffix(".txt"))
        .unwrap_or(file_name)
}

/// List `.txt` files directly inside `dir`, sorted by file name
///
/// Hidden files are skipped. Subdirectories are not descended into.
pub fn list_text_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(Error::NotFound(dir.display().to_string()));
    }

    let mut files = Vec::new();
    let walker = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name();

    for entry in walker {
        match entry {
            Ok(entry) => {
                let name = entry.file_name().to_string_lossy();
                if entry.file_type().is_file() && name.ends_with(".txt") && !name.starts_with('.') {
                    files.push(entry.path().to_path_buf());
                }
            }
            Err(e) => {
                warn!("Error accessing entry: {}", e);
            }
        }
    }

    Ok(files)
}

/// Mapping from full name to its biography text file
#[derive(Debug, Clone, Default)]
pub struct TextIndex {
    file_count: usize,
    mapping: HashMap<String, PathBuf>,
    unmatched: Vec<String>,
}

impl TextIndex {
    /// Scan `text_dir` and match every name against it
    pub fn build<'a, I>(names: I, text_dir: &Path) -> Result<Self>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let files = list_text_files(text_dir)?;

        info!("📁 Found {} text files in {}", files.len(), text_dir.display());
        if let Some(first) = files.first().and_then(|f| f.file_name()) {
            info!("   Example: {}", first.to_string_lossy());
        }

        let names: Vec<&str> = names.into_iter().collect();
        let index = Self::from_files(names.iter().copied(), files);
        index.log_report(&names);

        Ok(index)
    }

    /// Match names against an already listed set of files
    ///
    /// `files` order is the tie-break order when two files share a key.
    pub fn from_files<'a, I>(names: I, files: Vec<PathBuf>) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let keyed: Vec<(String, &PathBuf)> = files
            .iter()
            .filter_map(|path| {
                let file_name = path.file_name()?.to_string_lossy();
                Some((comparison_key(&file_name).to_lowercase(), path))
            })
            .collect();

        let mut mapping = HashMap::new();
        let mut unmatched = Vec::new();

        for name in names {
            if mapping.contains_key(name) {
                continue;
            }

            let found = name_candidates(name).into_iter().find_map(|candidate| {
                let candidate = candidate.to_lowercase();
                keyed
                    .iter()
                    .find(|(key, _)| *key == candidate)
                    .map(|(_, path)| (*path).clone())
            });

            match found {
                Some(path) => {
                    mapping.insert(name.to_string(), path);
                }
                None => unmatched.push(name.to_string()),
            }
        }

        Self {
            file_count: files.len(),
            mapping,
            unmatched,
        }
    }

    /// Text file matched to `name`, if any
    pub fn lookup(&self, name: &str) -> Option<&Path> {
        self.mapping.get(name).map(PathBuf::as_path)
    }

    /// Read the biography text for `name`
    ///
    /// A file that disappeared or cannot be decoded counts as "no text".
    pub fn read_text(&self, name: &str) -> Option<String> {
        let path = self.lookup(name)?;
        match std::fs::read_to_string(path) {
            Ok(text) => Some(text),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Could not read text file");
                None
            }
        }
    }

    pub fn file_count(&self) -> usize {
        self.file_count
    }

    pub fn matched_count(&self) -> usize {
        self.mapping.len()
    }

    /// Names with no matching file, in input order
    pub fn unmatched(&self) -> &[String] {
        &self.unmatched
    }

    fn log_report(&self, names: &[&str]) {
        info!("✅ Matched {}/{} people to text files", self.matched_count(), names.len());

        if self.matched_count() > 0 {
            info!("   Example matches:");
            for name in names
                .iter()
                .filter(|n| self.mapping.contains_key(**n))
                .take(EXAMPLE_MATCHES)
            {
                if let Some(file_name) = self.lookup(name).and_then(Path::file_name) {
                    info!("     {} → {}", name, file_name.to_string_lossy());
                }
            }
        }

        if !self.unmatched.is_empty() {
            info!("   ⚠️  {} unmatched people:", self.unmatched.len());
            for name in self.unmatched.iter().take(EXAMPLE_MISSES) {
                info!("     - {}", name);
            }
            if self.unmatched.len() > EXAMPLE_MISSES {
                info!("     ... and {} more", self.unmatched.len() - EXAMPLE_MISSES);
            }
        }
    }
}

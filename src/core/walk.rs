//! Recursive file discovery for the substitution pass.

use glob_match::glob_match;
use std::path::{Path, PathBuf};

/// Which files a walk yields.
#[derive(Debug, Clone)]
pub struct WalkFilter {
    /// Extension without the leading dot, compared exactly.
    pub extension: String,
    /// Directory names skipped at any depth. Empty by default: dot-directories
    /// are walked like any other.
    pub skip_dirs: Vec<String>,
    /// Glob patterns matched against root-relative, `/`-separated paths.
    pub exclude: Vec<String>,
}

impl WalkFilter {
    pub fn for_extension(extension: impl Into<String>) -> Self {
        Self {
            extension: extension.into(),
            skip_dirs: Vec::new(),
            exclude: Vec::new(),
        }
    }

    /// `*.<ext>` on the file name, so a file named exactly `.kt` matches too.
    fn matches_extension(&self, path: &Path) -> bool {
        path.file_name()
            .and_then(|name| name.to_str())
            .and_then(|name| name.strip_suffix(self.extension.as_str()))
            .is_some_and(|stem| stem.ends_with('.'))
    }

    fn is_excluded(&self, relative: &str) -> bool {
        self.exclude
            .iter()
            .any(|pattern| glob_match(pattern, relative))
    }
}

/// Collect every matching file under `root`, in sorted walk order.
///
/// A missing root yields an empty list.
pub fn walk_files(root: &Path, filter: &WalkFilter) -> Vec<PathBuf> {
    let mut files = Vec::new();
    walk_recursive(root, root, filter, &mut files);
    files
}

fn walk_recursive(dir: &Path, root: &Path, filter: &WalkFilter, files: &mut Vec<PathBuf>) {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            if dir != root || root.exists() {
                crate::log_status!("walk", "Skipping {}: {}", dir.display(), e);
            }
            return;
        }
    };

    let mut entries: Vec<_> = entries.flatten().collect();
    entries.sort_by_key(|entry| entry.file_name());

    for entry in entries {
        let path = entry.path();
        let Ok(file_type) = entry.file_type() else {
            continue;
        };

        if file_type.is_dir() {
            let name = entry.file_name().to_string_lossy().to_string();
            if filter.skip_dirs.iter().any(|skip| *skip == name) {
                continue;
            }
            walk_recursive(&path, root, filter, files);
            continue;
        }

        // Symlinked directories are not followed; symlinked files are.
        let is_file = file_type.is_file() || (file_type.is_symlink() && path.is_file());
        if !is_file || !filter.matches_extension(&path) {
            continue;
        }

        if !filter.exclude.is_empty() && filter.is_excluded(&relative_path(&path, root)) {
            continue;
        }

        files.push(path);
    }
}

/// Root-relative path with `/` separators, for display and glob matching.
pub fn relative_path(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

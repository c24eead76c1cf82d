//! Substitution pass — rewrite every matching file under a root.
//!
//! One sequential read-modify-write per file:
//! 1. Walk the root for files with the configured extension
//! 2. Apply the substitution set to each file's full text
//! 3. Overwrite the file only when the text changed
//! 4. Tally updated / unchanged / failed files
//!
//! A read or write failure is recorded against its file and the pass moves on.

use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::config::RepackageConfig;
use crate::error::Result;
use crate::output::BatchResult;
use crate::substitution::SubstitutionSet;
use crate::utils::io;
use crate::walk::{self, WalkFilter};

// ============================================================================
// Types
// ============================================================================

/// Everything a pass needs to run.
#[derive(Debug, Clone)]
pub struct PassSpec {
    pub root: PathBuf,
    pub filter: WalkFilter,
    pub substitutions: SubstitutionSet,
    /// Compute outcomes without touching disk.
    pub dry_run: bool,
    /// Write through a temp file + rename instead of overwriting in place.
    pub atomic: bool,
}

impl PassSpec {
    pub fn from_config(config: &RepackageConfig) -> Self {
        PassSpec {
            root: config.root.clone(),
            filter: WalkFilter {
                extension: config.extension.clone(),
                skip_dirs: config.skip_dirs.clone(),
                exclude: config.exclude.clone(),
            },
            substitutions: config.substitutions.clone(),
            dry_run: false,
            atomic: config.atomic_writes,
        }
    }
}

impl Default for PassSpec {
    fn default() -> Self {
        Self::from_config(&RepackageConfig::default())
    }
}

/// What happened to one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileOutcome {
    Updated { file: String, replacements: usize },
    Unchanged { file: String },
    Failed { file: String, error: String },
}

/// A non-fatal condition worth surfacing alongside the result.
#[derive(Debug, Clone, Serialize)]
pub struct PassWarning {
    /// Warning category.
    pub kind: String,
    /// Human-readable description.
    pub message: String,
}

/// The full result of a pass.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PassResult {
    pub root: String,
    pub extension: String,
    /// Sum of replacements across updated files.
    pub total_replacements: usize,
    /// Per-file items and the updated / unchanged / failed counts.
    pub batch: BatchResult,
    pub warnings: Vec<PassWarning>,
    pub dry_run: bool,
    /// Whether changes were written to disk.
    pub applied: bool,
}

impl PassResult {
    fn new(spec: &PassSpec) -> Self {
        PassResult {
            root: spec.root.display().to_string(),
            extension: spec.filter.extension.clone(),
            total_replacements: 0,
            batch: BatchResult::new(),
            warnings: Vec::new(),
            dry_run: spec.dry_run,
            applied: false,
        }
    }

    /// Matching files visited.
    pub fn files_scanned(&self) -> u32 {
        self.batch.total()
    }

    /// Files whose content changed (written, or would be written on dry run).
    pub fn files_updated(&self) -> u32 {
        self.batch.updated
    }

    /// Files that could not be read or written.
    pub fn files_failed(&self) -> u32 {
        self.batch.errors
    }

    fn record(&mut self, outcome: &FileOutcome) {
        match outcome {
            FileOutcome::Updated { file, replacements } => {
                self.total_replacements += replacements;
                self.batch.record_updated(file.clone(), *replacements);
            }
            FileOutcome::Unchanged { file } => {
                self.batch.record_skipped(file.clone());
            }
            FileOutcome::Failed { file, error } => {
                self.batch.record_error(file.clone(), error.clone());
            }
        }
    }
}

// ============================================================================
// Running
// ============================================================================

/// Run a pass without observing individual files.
pub fn run_pass(spec: &PassSpec) -> Result<PassResult> {
    run_pass_with(spec, |_| {})
}

/// Run a pass, calling `on_file` after each file is processed.
///
/// Only an invalid substitution set fails the whole pass. A missing root is a
/// warning and yields zero files.
pub fn run_pass_with<F>(spec: &PassSpec, mut on_file: F) -> Result<PassResult>
where
    F: FnMut(&FileOutcome),
{
    spec.substitutions.validate()?;

    let mut result = PassResult::new(spec);

    for label in spec.substitutions.non_idempotent_pairs() {
        result.warnings.push(PassWarning {
            kind: "non_idempotent".to_string(),
            message: format!(
                "Substitution '{}' contains its own source text; repeated runs will keep rewriting",
                label
            ),
        });
    }

    if !spec.root.is_dir() {
        result.warnings.push(PassWarning {
            kind: "root_missing".to_string(),
            message: format!("Root '{}' is not a directory; nothing to do", spec.root.display()),
        });
    }

    for path in walk::walk_files(&spec.root, &spec.filter) {
        let outcome = process_file(&path, spec);
        result.record(&outcome);
        on_file(&outcome);
    }

    result.applied = !spec.dry_run;
    Ok(result)
}

/// Read, substitute, and conditionally rewrite a single file.
pub fn process_file(path: &Path, spec: &PassSpec) -> FileOutcome {
    let file = path.display().to_string();

    let content = match io::read_file(path, &format!("read {}", file)) {
        Ok(content) => content,
        Err(e) => {
            return FileOutcome::Failed {
                file,
                error: e.detail(),
            }
        }
    };

    let applied = spec.substitutions.apply(&content);
    if !applied.changed(&content) {
        return FileOutcome::Unchanged { file };
    }

    if !spec.dry_run {
        let operation = format!("write {}", file);
        let written = if spec.atomic {
            io::write_file_atomic(path, &applied.content, &operation)
        } else {
            io::write_file(path, &applied.content, &operation)
        };
        if let Err(e) = written {
            return FileOutcome::Failed {
                file,
                error: e.detail(),
            };
        }
    }

    FileOutcome::Updated {
        file,
        replacements: applied.replacements,
    }
}

// ============================================================================
// Tests
// ============================================================================

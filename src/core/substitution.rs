//! Literal substitution pairs and their application to file content.
//!
//! Matching is exact substring matching with no boundary detection and no
//! syntactic awareness: an occurrence inside a comment or string literal is
//! rewritten like any other.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Namespace the default pass renames from.
pub const DEFAULT_OLD_NAMESPACE: &str = "com.example.espressoshots";

/// Namespace the default pass renames to.
pub const DEFAULT_NEW_NAMESPACE: &str = "com.example.shots";

/// A single literal `from` → `to` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Substitution {
    pub from: String,
    pub to: String,
    #[serde(default = "default_label")]
    pub label: String,
}

fn default_label() -> String {
    "literal".to_string()
}

impl Substitution {
    pub fn new(from: impl Into<String>, to: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            label: label.into(),
        }
    }
}

/// Ordered substitution pairs, applied one after another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubstitutionSet {
    pub pairs: Vec<Substitution>,
}

impl Default for SubstitutionSet {
    fn default() -> Self {
        Self::package_rename(DEFAULT_OLD_NAMESPACE, DEFAULT_NEW_NAMESPACE)
    }
}

/// Result of applying a substitution set to a text buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Applied {
    pub content: String,
    pub replacements: usize,
}

impl Applied {
    pub fn changed(&self, original: &str) -> bool {
        self.content != original
    }
}

impl SubstitutionSet {
    pub fn new(pairs: Vec<Substitution>) -> Self {
        Self { pairs }
    }

    /// Package declaration and import prefix pairs for renaming `old` to `new`.
    ///
    /// - `package <old>` → `package <new>`
    /// - `import <old>` → `import <new>`
    pub fn package_rename(old: &str, new: &str) -> Self {
        Self::new(vec![
            Substitution::new(format!("package {}", old), format!("package {}", new), "package"),
            Substitution::new(format!("import {}", old), format!("import {}", new), "import"),
        ])
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Reject sets that cannot run: empty, empty `from`, or `from == to`.
    pub fn validate(&self) -> Result<()> {
        if self.pairs.is_empty() {
            return Err(Error::validation_invalid_argument(
                "substitutions",
                "At least one substitution pair is required",
                None,
            ));
        }

        for pair in &self.pairs {
            if pair.from.is_empty() {
                return Err(Error::validation_invalid_argument(
                    "substitutions",
                    format!("Substitution '{}' has an empty 'from' string", pair.label),
                    Some(pair.label.clone()),
                ));
            }
            if pair.from == pair.to {
                return Err(Error::validation_invalid_argument(
                    "substitutions",
                    format!(
                        "Substitution '{}' replaces '{}' with itself",
                        pair.label, pair.from
                    ),
                    Some(pair.label.clone()),
                ));
            }
        }

        Ok(())
    }

    /// Labels of pairs whose replacement contains their own source string.
    ///
    /// Running such a pass twice keeps rewriting the file.
    pub fn non_idempotent_pairs(&self) -> Vec<String> {
        self.pairs
            .iter()
            .filter(|p| !p.from.is_empty() && p.to.contains(&p.from))
            .map(|p| p.label.clone())
            .collect()
    }

    /// Apply every pair in order to `content`.
    pub fn apply(&self, content: &str) -> Applied {
        let mut text = content.to_string();
        let mut replacements = 0;

        for pair in &self.pairs {
            let positions = find_literal_matches(&text, &pair.from);
            if positions.is_empty() {
                continue;
            }
            replacements += positions.len();

            // Replace from end to start so earlier offsets stay valid
            for &start in positions.iter().rev() {
                text.replace_range(start..start + pair.from.len(), &pair.to);
            }
        }

        Applied {
            content: text,
            replacements,
        }
    }
}

/// Find non-overlapping occurrences of `term` in `text`, scanning left to right.
fn find_literal_matches(text: &str, term: &str) -> Vec<usize> {
    let mut matches = Vec::new();
    let term_len = term.len();

    if term_len == 0 || term_len > text.len() {
        return matches;
    }

    let mut start = 0;
    while let Some(pos) = text[start..].find(term) {
        matches.push(start + pos);
        start += pos + term_len;
    }

    matches
}

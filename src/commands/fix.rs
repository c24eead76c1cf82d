use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

use repackage::config::{self, ConfigSource, RepackageConfig};
use repackage::pass::{self, FileOutcome, PassResult, PassSpec};
use repackage::substitution::SubstitutionSet;
use repackage::validation;

use crate::commands::{CmdResult, GlobalArgs};

#[derive(Args, Debug, Default)]
pub struct FixArgs {
    /// Directory to rewrite (default: app/src/main/java/com/example/shots)
    #[arg(long)]
    pub path: Option<PathBuf>,

    /// File extension to rewrite (default: kt)
    #[arg(long = "ext", value_name = "EXT")]
    pub extension: Option<String>,

    /// Namespace to rename from (requires --to)
    #[arg(long, value_name = "NAMESPACE")]
    pub from: Option<String>,

    /// Namespace to rename to (requires --from)
    #[arg(long, value_name = "NAMESPACE")]
    pub to: Option<String>,

    /// JSON config file (default: built-in settings)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Skip files whose root-relative path matches this glob (repeatable)
    #[arg(long, value_name = "GLOB")]
    pub exclude: Vec<String>,

    /// Report what would change without writing
    #[arg(long)]
    pub dry_run: bool,

    /// Write through a temp file and rename
    #[arg(long)]
    pub atomic: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FixOutput {
    pub command: &'static str,
    pub config_source: String,
    #[serde(flatten)]
    pub result: PassResult,
}

pub fn run(args: FixArgs, global: &GlobalArgs) -> CmdResult<FixOutput> {
    let (config, source) = config::load_config(args.config.as_deref())?;
    repackage::log_status!("config", "Using {}", source.describe());

    let spec = build_spec(&args, config)?;

    if spec.dry_run {
        repackage::log_status!("fix", "Dry run: no files will be written");
    }

    let quiet = global.json;
    let result = pass::run_pass_with(&spec, |outcome| {
        if !quiet {
            print_outcome(outcome, spec.dry_run);
        }
    })?;

    for warning in &result.warnings {
        repackage::log_status!("fix", "{}", warning.message);
    }

    if !quiet {
        print_summary(&result);
    }

    Ok((
        FixOutput {
            command: "fix",
            config_source: source_label(&source),
            result,
        },
        0,
    ))
}

/// Merge CLI overrides onto the loaded config.
fn build_spec(args: &FixArgs, mut config: RepackageConfig) -> repackage::Result<PassSpec> {
    if let Some(path) = &args.path {
        config.root = path.clone();
    }

    if let Some(ext) = &args.extension {
        config.extension = validation::normalize_extension(ext)?;
    }

    if let Some((from, to)) =
        validation::require_pair(args.from.as_deref(), args.to.as_deref(), "from", "to")?
    {
        let from = validation::require_non_empty(from, "from", "Namespace cannot be empty")?;
        let to = validation::require_non_empty(to, "to", "Namespace cannot be empty")?;
        config.substitutions = SubstitutionSet::package_rename(from, to);
    }

    config.exclude.extend(args.exclude.iter().cloned());
    config.atomic_writes |= args.atomic;

    let mut spec = PassSpec::from_config(&config);
    spec.dry_run = args.dry_run;
    Ok(spec)
}

fn source_label(source: &ConfigSource) -> String {
    match source {
        ConfigSource::BuiltIn => "builtin".to_string(),
        ConfigSource::File(path) => path.display().to_string(),
    }
}

fn print_outcome(outcome: &FileOutcome, dry_run: bool) {
    match outcome {
        FileOutcome::Updated { file, .. } if dry_run => println!("✓ Would update: {}", file),
        FileOutcome::Updated { file, .. } => println!("✓ Updated: {}", file),
        FileOutcome::Failed { file, error } => println!("✗ Error in {}: {}", file, error),
        FileOutcome::Unchanged { .. } => {}
    }
}

fn print_summary(result: &PassResult) {
    if result.dry_run {
        println!("\n✅ Total files that would be updated: {}", result.files_updated());
    } else {
        println!("\n✅ Total files updated: {}", result.files_updated());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use repackage::ErrorCode;

    #[test]
    fn no_flags_keeps_config() {
        let spec = build_spec(&FixArgs::default(), RepackageConfig::default()).unwrap();
        assert_eq!(spec.root, PathBuf::from(config::DEFAULT_ROOT));
        assert_eq!(spec.filter.extension, "kt");
        assert_eq!(spec.substitutions, SubstitutionSet::default());
        assert!(!spec.dry_run);
    }

    #[test]
    fn flags_override_config() {
        let args = FixArgs {
            path: Some(PathBuf::from("src")),
            extension: Some(".java".to_string()),
            from: Some("org.old".to_string()),
            to: Some("org.new".to_string()),
            exclude: vec!["gen/**".to_string()],
            dry_run: true,
            atomic: true,
            ..FixArgs::default()
        };

        let spec = build_spec(&args, RepackageConfig::default()).unwrap();
        assert_eq!(spec.root, PathBuf::from("src"));
        assert_eq!(spec.filter.extension, "java");
        assert_eq!(spec.substitutions.pairs[0].from, "package org.old");
        assert_eq!(spec.substitutions.pairs[1].to, "import org.new");
        assert_eq!(spec.filter.exclude, vec!["gen/**"]);
        assert!(spec.dry_run);
        assert!(spec.atomic);
    }

    #[test]
    fn from_without_to_is_rejected() {
        let args = FixArgs {
            from: Some("org.old".to_string()),
            ..FixArgs::default()
        };
        let err = build_spec(&args, RepackageConfig::default()).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationMissingArgument);
    }
}

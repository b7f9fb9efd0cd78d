//! Resolved settings and the load → process → backup → write sequence.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use domset_rules::loader::RuleSetStore;
use domset_rules::{process, DedupError, ProcessSummary, PrunePolicy};
use tracing::{info, warn};

use crate::cli::CliArgs;
use crate::config::DedupConfig;

/// Effective settings after merging CLI flags over the config file.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub input: PathBuf,
    pub output: PathBuf,
    pub write_in_place: bool,
    /// `--output` was given explicitly.
    pub output_requested: bool,
    pub backup: bool,
    pub backup_dir: PathBuf,
    pub log_to_file: bool,
    pub log_file: PathBuf,
    pub prune_policy: PrunePolicy,
}

impl Settings {
    /// Priority: CLI flag (or env var) > config file > built-in default.
    pub fn resolve(args: &CliArgs, config: &DedupConfig) -> Self {
        Self {
            input: args.file.clone().unwrap_or_else(|| config.input.clone()),
            output: args.output.clone().unwrap_or_else(|| config.output.clone()),
            write_in_place: args.write,
            output_requested: args.output.is_some(),
            backup: args.bak.unwrap_or(config.backup),
            backup_dir: args
                .backup_dir
                .clone()
                .unwrap_or_else(|| config.backup_dir.clone()),
            log_to_file: args.log,
            log_file: args.log_file.clone().unwrap_or_else(|| config.log_file.clone()),
            prune_policy: args.prune_policy.unwrap_or(config.prune_policy),
        }
    }

    /// Where the result is written; `--write` wins over `--output`.
    pub fn target(&self) -> &Path {
        if self.write_in_place {
            &self.input
        } else {
            &self.output
        }
    }
}

/// What a successful run did.
#[derive(Debug)]
pub struct RunReport {
    pub target: PathBuf,
    pub backup: Option<PathBuf>,
    pub summary: ProcessSummary,
}

/// Load, deduplicate, back up and write.
///
/// Nothing is written unless processing succeeded.
pub fn run(settings: &Settings) -> Result<RunReport> {
    if settings.write_in_place && settings.output_requested {
        warn!(
            output = %settings.output.display(),
            "--write is enabled, --output is ignored and the input file is overwritten"
        );
    }

    let store = RuleSetStore::new(&settings.backup_dir);
    let mut rule_set = store
        .load(&settings.input)
        .with_context(|| format!("failed to load {}", settings.input.display()))?;

    let summary = process(&mut rule_set, settings.prune_policy);

    let backup = if settings.backup {
        Some(store.backup(&settings.input).context("failed to back up input")?)
    } else {
        info!("backup disabled");
        None
    };

    let target = settings.target().to_path_buf();
    store
        .write(&rule_set, &target)
        .with_context(|| format!("failed to write {}", target.display()))?;

    Ok(RunReport {
        target,
        backup,
        summary,
    })
}

/// Process exit code for a failed run.
pub fn exit_code(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<DedupError>() {
        Some(DedupError::InputNotFound(_)) => 2,
        Some(DedupError::MalformedDocument(_)) => 3,
        Some(DedupError::WriteFailure { .. }) => 4,
        _ => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use serde_json::{json, Value};
    use std::fs;
    use tempfile::TempDir;

    fn settings_in(dir: &TempDir, args: &[&str]) -> Settings {
        let args = CliArgs::try_parse_from(std::iter::once("domset").chain(args.iter().copied()))
            .unwrap();
        let config = DedupConfig {
            input: dir.path().join("input.json"),
            output: dir.path().join("output.json"),
            backup_dir: dir.path().join("backups"),
            ..DedupConfig::default()
        };
        Settings::resolve(&args, &config)
    }

    fn read_json(path: &Path) -> Value {
        serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
    }

    #[test]
    fn cli_flags_override_config() {
        let args = CliArgs::try_parse_from([
            "domset",
            "-f",
            "a.json",
            "--bak",
            "false",
            "--prune-policy",
            "single-value",
        ])
        .unwrap();
        let config = DedupConfig {
            input: PathBuf::from("cfg.json"),
            backup_dir: PathBuf::from("cfg-backups"),
            ..DedupConfig::default()
        };
        let settings = Settings::resolve(&args, &config);

        assert_eq!(settings.input, PathBuf::from("a.json"));
        assert!(!settings.backup);
        assert_eq!(settings.prune_policy, PrunePolicy::SingleValue);
        assert_eq!(settings.backup_dir, PathBuf::from("cfg-backups"));
        assert_eq!(settings.output, PathBuf::from("output.json"));
        assert!(!settings.output_requested);
    }

    #[test]
    fn write_in_place_wins_over_output() {
        let args = CliArgs::try_parse_from(["domset", "-f", "in.json", "-o", "out.json", "-w"])
            .unwrap();
        let settings = Settings::resolve(&args, &DedupConfig::default());
        assert!(settings.output_requested);
        assert_eq!(settings.target(), Path::new("in.json"));
    }

    #[test]
    fn run_writes_deduplicated_output_and_backup() {
        let dir = TempDir::new().unwrap();
        let settings = settings_in(&dir, &[]);
        fs::write(
            &settings.input,
            r#"{"version":1,"rules":[{"domain":"x.com"},{"domain":"x.com"}]}"#,
        )
        .unwrap();

        let report = run(&settings).unwrap();

        assert_eq!(report.target, settings.output);
        assert_eq!(
            read_json(&settings.output),
            json!({"version": 1, "rules": [{"domain": "x.com"}]})
        );
        let backup = report.backup.expect("backup enabled by default");
        assert!(backup.starts_with(dir.path().join("backups")));
        assert!(backup.file_name().unwrap().to_string_lossy().starts_with("input.json.backup_"));
        assert_eq!(report.summary.pruned.len(), 1);
    }

    #[test]
    fn run_in_place_overwrites_input() {
        let dir = TempDir::new().unwrap();
        let settings = settings_in(&dir, &["-w", "--bak", "false"]);
        fs::write(&settings.input, r#"{"rules":[{"domain":["a","a"]}]}"#).unwrap();

        let report = run(&settings).unwrap();

        assert!(report.backup.is_none());
        assert_eq!(read_json(&settings.input), json!({"rules": [{"domain": ["a"]}]}));
        assert!(!settings.output.exists());
        assert!(!dir.path().join("backups").exists());
    }

    #[test]
    fn missing_input_maps_to_exit_code_2() {
        let dir = TempDir::new().unwrap();
        let settings = settings_in(&dir, &[]);

        let err = run(&settings).unwrap_err();
        assert_eq!(exit_code(&err), 2);
        assert!(!settings.output.exists());
    }

    #[test]
    fn malformed_input_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let settings = settings_in(&dir, &[]);
        fs::write(&settings.input, r#"{"rules":[{"domain": 7}]}"#).unwrap();

        let err = run(&settings).unwrap_err();
        assert_eq!(exit_code(&err), 3);
        assert!(!settings.output.exists());
        assert!(!dir.path().join("backups").exists());
    }

    #[test]
    fn unwritable_target_maps_to_exit_code_4() {
        let dir = TempDir::new().unwrap();
        let mut settings = settings_in(&dir, &["--bak", "false"]);
        fs::write(&settings.input, r#"{"rules":[]}"#).unwrap();
        settings.output = dir.path().to_path_buf();

        let err = run(&settings).unwrap_err();
        assert_eq!(exit_code(&err), 4);
    }
}

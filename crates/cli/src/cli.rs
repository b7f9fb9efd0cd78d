use std::path::PathBuf;

use clap::builder::BoolishValueParser;
use clap::{ArgAction, Parser};
use domset_rules::PrunePolicy;

/// Deduplicate domain rule-sets.
///
/// Removes values repeated across `domain`, `domain_suffix` and
/// `domain_keyword` fields of a JSON rule-set, then prunes rules left
/// without any value.
#[derive(Parser, Debug)]
#[command(name = "domset", version, disable_version_flag = true)]
pub struct CliArgs {
    /// Input JSON file (default: input.json)
    #[arg(short = 'f', long, env = "DOMSET_FILE")]
    pub file: Option<PathBuf>,

    /// Output JSON file (default: output.json, ignored with --write)
    #[arg(short = 'o', long, env = "DOMSET_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Write the result back to the input file
    #[arg(short = 'w', long)]
    pub write: bool,

    /// Back up the input file before writing: true/false (default: true)
    #[arg(long, env = "DOMSET_BACKUP", value_parser = BoolishValueParser::new())]
    pub bak: Option<bool>,

    /// Also append logs to a log file (console output is unaffected)
    #[arg(long)]
    pub log: bool,

    /// Log file used with --log (default: deduplication.log)
    #[arg(long, env = "DOMSET_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// Directory for backups (default: backups)
    #[arg(long, env = "DOMSET_BACKUP_DIR")]
    pub backup_dir: Option<PathBuf>,

    /// Rule pruning policy: emptied or single-value (default: emptied)
    #[arg(long, env = "DOMSET_PRUNE_POLICY")]
    pub prune_policy: Option<PrunePolicy>,

    /// Path to config file (default: ~/.config/domset/config.toml)
    #[arg(long, env = "DOMSET_CONFIG")]
    pub config: Option<PathBuf>,

    /// Print version
    #[arg(short = 'v', long, action = ArgAction::Version)]
    pub version: Option<bool>,
}

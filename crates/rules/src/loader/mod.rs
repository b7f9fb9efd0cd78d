//! Filesystem access for rule-set documents.
//!
//! Loads JSON rule-sets, writes results atomically (temp file + rename) and
//! creates timestamped backups of input files before they are overwritten.

mod core;


pub use self::core::{backup_file_name, RuleSetStore};

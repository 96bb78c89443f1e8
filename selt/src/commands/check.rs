//! Check command implementation.
//!
//! Parses each file and reports whether it reads cleanly. Errors are
//! reported per file; the command fails if any file failed.

use std::path::PathBuf;

use selc_read::read_all;
use tracing::debug;

use crate::error::{Result, SeltError};

/// Arguments for the check command.
#[derive(Debug, Clone, Default)]
pub struct CheckArgs {
    /// Enable verbose output.
    pub verbose: bool,
    /// Files to check.
    pub files: Vec<PathBuf>,
}

/// Checks that every file reads without errors.
pub fn run_check(args: CheckArgs) -> Result<()> {
    let mut failed = false;
    for path in &args.files {
        let source = std::fs::read_to_string(path)?;
        match read_all(&source) {
            Ok(forms) => {
                debug!(path = %path.display(), forms = forms.len(), "checked");
                println!("{}: ok ({} forms)", path.display(), forms.len());
            }
            Err(e) => {
                failed = true;
                eprintln!("{}: {}", path.display(), e);
            }
        }
    }
    if failed {
        Err(SeltError::CheckFailed)
    } else {
        Ok(())
    }
}

//! Read command implementation.
//!
//! Reads every form from a file (or stdin) and prints each one in its
//! canonical textual form.

use std::io::Read as _;
use std::path::PathBuf;

use selc_read::{default_registry, NsResolver, Reader};
use tracing::debug;

use crate::config::Config;
use crate::error::Result;

/// Arguments for the read command.
#[derive(Debug, Clone, Default)]
pub struct ReadArgs {
    /// Enable verbose output.
    pub verbose: bool,
    /// Input file; stdin when absent.
    pub file: Option<PathBuf>,
    /// Namespace override for `::keyword` and syntax-quote resolution.
    pub namespace: Option<String>,
}

/// Reads all forms from the input and prints them.
pub fn run_read(args: ReadArgs, config: Config) -> Result<()> {
    let source = match &args.file {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let namespace = args.namespace.unwrap_or(config.namespace);
    let resolver = NsResolver::new(namespace);
    let mut reader = Reader::new(&source, &resolver, default_registry());

    let mut forms = Vec::new();
    while let Some(form) = reader.read()? {
        forms.push(form);
    }
    debug!(count = forms.len(), "finished reading");

    if config.print.one_per_line {
        for form in &forms {
            println!("{}", form);
        }
    } else {
        let line: Vec<String> = forms.iter().map(ToString::to_string).collect();
        println!("{}", line.join(" "));
    }
    Ok(())
}

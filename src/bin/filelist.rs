//! Prints the contents of selected source trees for documentation/review
//!
//! Usage: `cargo run --bin filelist > listing.md`
//!
//! The directory list and extension allow-list are compile-time
//! configuration; edit the constants below to change what gets scanned.

use std::io::{self, Write};
use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};

use sock_hop::filelist::{ListConfig, list_root};

/// Directories to scan
const TARGET_DIRECTORIES: &[&str] = &["./src", "./levels"];

/// Relative path prefixes to exclude from scanning
const EXCLUDED_DIRS: &[&str] = &[];

/// File extensions whose contents will be printed
const ALLOWED_EXTENSIONS: &[&str] =
    &[".rs", ".toml", ".html", ".css", ".json", ".csv", ".ldtk"];

fn main() -> ExitCode {
    env_logger::init();

    let cfg = ListConfig::new(EXCLUDED_DIRS, ALLOWED_EXTENSIONS);
    let mut out = io::stdout().lock();
    let mut failed = false;

    for target in TARGET_DIRECTORIES {
        if let Err(err) = scan_target(target, &cfg, &mut out) {
            log::error!("{:#}", err);
            failed = true;
        }
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Scan one configured root. Failures here (missing root, unreadable
/// root) are the only ones that flip the exit code; everything below the
/// root is logged and skipped inside the walker.
fn scan_target(target: &str, cfg: &ListConfig, out: &mut impl Write) -> Result<()> {
    let root = Path::new(target);

    if !root.exists() {
        anyhow::bail!("starting directory {:?} not found", target);
    }
    if !root.is_dir() {
        anyhow::bail!("starting path {:?} is not a directory", target);
    }

    writeln!(out, "\n=== Scanning directory: {} ===\n", target)?;
    list_root(root, Path::new("."), cfg, out)
        .with_context(|| format!("failed to read directory {:?}", target))
}

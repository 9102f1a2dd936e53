//! Developer utility: recursively print source trees for review
//!
//! Walks configured directories and writes each included file's relative
//! path and contents inside a fenced block; files outside the extension
//! allow-list get a one-line "binary file" notice. Per-entry errors are
//! logged and skipped so one unreadable file never aborts the walk; only
//! a configured root that cannot be read at all is treated as fatal.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Walk configuration: directory deny-list and extension allow-list.
#[derive(Debug, Clone, Default)]
pub struct ListConfig {
    /// Relative path prefixes to skip entirely
    pub excluded_dirs: Vec<PathBuf>,
    /// Extensions (with leading dot, lowercase) whose contents are printed
    pub allowed_extensions: Vec<String>,
}

impl ListConfig {
    pub fn new(excluded_dirs: &[&str], allowed_extensions: &[&str]) -> Self {
        Self {
            excluded_dirs: excluded_dirs.iter().map(PathBuf::from).collect(),
            allowed_extensions: allowed_extensions
                .iter()
                .map(|e| e.to_lowercase())
                .collect(),
        }
    }

    fn is_excluded(&self, rel: &Path) -> bool {
        self.excluded_dirs.iter().any(|dir| rel.starts_with(dir))
    }

    fn is_allowed(&self, path: &Path) -> bool {
        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            return false;
        };
        let dotted = format!(".{}", ext.to_lowercase());
        self.allowed_extensions.contains(&dotted)
    }
}

/// List one configured root.
///
/// An error reading `root` itself propagates to the caller; everything
/// deeper is logged and skipped. Paths are printed relative to `base`.
pub fn list_root(
    root: &Path,
    base: &Path,
    cfg: &ListConfig,
    out: &mut impl Write,
) -> io::Result<()> {
    let entries = read_dir_sorted(root)?;
    for entry in entries {
        visit(&entry, base, cfg, out)?;
    }
    Ok(())
}

/// Directory entries in name order, so output is stable across platforms.
fn read_dir_sorted(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut entries: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|e| e.ok().map(|e| e.path()))
        .collect();
    entries.sort();
    Ok(entries)
}

fn visit(path: &Path, base: &Path, cfg: &ListConfig, out: &mut impl Write) -> io::Result<()> {
    let rel = path.strip_prefix(base).unwrap_or(path);
    if cfg.is_excluded(rel) {
        return Ok(());
    }

    let meta = match fs::metadata(path) {
        Ok(meta) => meta,
        Err(err) => {
            log::error!("error processing entry {:?}: {}", rel, err);
            return Ok(());
        }
    };

    if meta.is_file() {
        print_file(path, rel, cfg, out)
    } else if meta.is_dir() {
        // Non-root subdirectory: an unreadable branch is skipped, the
        // walk continues elsewhere
        match read_dir_sorted(path) {
            Ok(entries) => {
                for entry in entries {
                    visit(&entry, base, cfg, out)?;
                }
                Ok(())
            }
            Err(err) => {
                log::error!("failed to read directory {:?}: {}", rel, err);
                Ok(())
            }
        }
    } else {
        // Links, devices, etc. are ignored
        Ok(())
    }
}

fn print_file(path: &Path, rel: &Path, cfg: &ListConfig, out: &mut impl Write) -> io::Result<()> {
    if !cfg.is_allowed(path) {
        return writeln!(out, "{}: binary file\n", rel.display());
    }

    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) => {
            log::error!("error reading {:?}: {}", rel, err);
            return Ok(());
        }
    };

    writeln!(out, "{}:", rel.display())?;
    writeln!(out, "```")?;
    writeln!(out, "{}", content)?;
    writeln!(out, "```")?;
    writeln!(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;

    fn output_for(root: &Path, cfg: &ListConfig) -> String {
        let mut out = Vec::new();
        list_root(root, root, cfg, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_allowed_and_binary_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.rs"), "X").unwrap();
        File::create(dir.path().join("b.bin")).unwrap();

        let cfg = ListConfig::new(&[], &[".rs"]);
        let out = output_for(dir.path(), &cfg);

        assert!(out.contains("a.rs:\n```\nX\n```"));
        assert!(out.contains("b.bin: binary file"));
        // No content block for the binary file
        assert_eq!(out.matches("```").count(), 2);
    }

    #[test]
    fn test_recurses_into_subdirectories() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested/deep.rs"), "inner").unwrap();

        let cfg = ListConfig::new(&[], &[".rs"]);
        let out = output_for(dir.path(), &cfg);

        assert!(out.contains("deep.rs:"));
        assert!(out.contains("inner"));
    }

    #[test]
    fn test_excluded_dir_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("skip")).unwrap();
        fs::write(dir.path().join("skip/hidden.rs"), "nope").unwrap();
        fs::write(dir.path().join("kept.rs"), "yes").unwrap();

        let cfg = ListConfig::new(&["skip"], &[".rs"]);
        let out = output_for(dir.path(), &cfg);

        assert!(out.contains("kept.rs:"));
        assert!(!out.contains("hidden.rs"));
    }

    #[test]
    fn test_extension_matching_is_case_insensitive() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("UPPER.RS"), "shout").unwrap();

        let cfg = ListConfig::new(&[], &[".rs"]);
        let out = output_for(dir.path(), &cfg);

        assert!(out.contains("shout"));
    }

    #[test]
    fn test_unreadable_root_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("does-not-exist");

        let cfg = ListConfig::new(&[], &[".rs"]);
        let mut out = Vec::new();
        assert!(list_root(&missing, dir.path(), &cfg, &mut out).is_err());
    }
}

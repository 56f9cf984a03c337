//! Architectural Enforcement Integration Tests
//!
//! This package contains integration tests that enforce architectural principles:
//! - No sleep() calls in production code (time only advances through ticks)
//! - The core crate never reads the clock itself
//! - The core crate stays free of terminal and audio-device crates
//!
//! The helpers here walk the workspace sources. Test modules are cut off at
//! the first `#[cfg(test)]` line of each file.

use std::fs;
use std::path::{Path, PathBuf};

/// Production source directories of the workspace, relative to its root
pub const PRODUCTION_DIRS: &[&str] = &["lottery/core/src", "tui/src"];

/// The headless core crate
pub const CORE_DIR: &str = "lottery/core";

/// Workspace root, two levels above this package
pub fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../..")
        .canonicalize()
        .unwrap_or_else(|_| PathBuf::from("../.."))
}

/// All `.rs` files under `dir` (relative to the workspace root)
pub fn rust_files(dir: &str) -> Vec<PathBuf> {
    let root = workspace_root().join(dir);
    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(root)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.path().extension().and_then(|s| s.to_str()) == Some("rs"))
        .map(walkdir::DirEntry::into_path)
        .collect();
    files.sort();
    files
}

/// One line of production code with its comment stripped
pub struct CodeLine {
    /// 1-based line number
    pub number: usize,
    /// Code before any `//`
    pub code: String,
    /// The full original line
    pub raw: String,
}

/// Production lines of a file: stops at `#[cfg(test)]`, drops comments
pub fn production_lines(path: &Path) -> Vec<CodeLine> {
    let Ok(content) = fs::read_to_string(path) else {
        return Vec::new();
    };

    content
        .lines()
        .enumerate()
        .take_while(|(_, line)| line.trim() != "#[cfg(test)]")
        .map(|(idx, line)| CodeLine {
            number: idx + 1,
            code: line.split("//").next().unwrap_or(line).to_string(),
            raw: line.trim().to_string(),
        })
        .collect()
}

/// Scan production code for lines matching `pred`, formatted as violations
pub fn find_violations<F>(dirs: &[&str], pred: F) -> Vec<String>
where
    F: Fn(&str) -> bool,
{
    let root = workspace_root();
    let mut violations = Vec::new();

    for dir in dirs {
        for file in rust_files(dir) {
            for line in production_lines(&file) {
                if pred(&line.code) {
                    let shown = file.strip_prefix(&root).unwrap_or(&file);
                    violations.push(format!("{}:{} - {}", shown.display(), line.number, line.raw));
                }
            }
        }
    }

    violations
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workspace_root_has_members() {
        let root = workspace_root();
        assert!(root.join("Cargo.toml").exists());
        assert!(root.join(CORE_DIR).join("Cargo.toml").exists());
    }

    #[test]
    fn test_production_lines_skip_comments_and_tests() {
        let dir = std::env::temp_dir().join("architectural-enforcement-selftest");
        fs::create_dir_all(&dir).unwrap();
        let file = dir.join("sample.rs");
        fs::write(
            &file,
            "fn a() {} // sleep(\n#[cfg(test)]\nmod tests { fn b() { sleep(1) } }\n",
        )
        .unwrap();

        let lines = production_lines(&file);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].code.trim(), "fn a() {}");
    }
}

//! Integration Test: Core Separation
//!
//! **Policy**: `lottery-core` is headless. It must not depend on or mention
//! terminal crates (`ratatui`, `crossterm`) or device audio (`rodio`). Those
//! belong to the surface that embeds it.

use std::fs;

use architectural_enforcement::{find_violations, workspace_root, CORE_DIR};

const SURFACE_CRATES: &[&str] = &["ratatui", "crossterm", "rodio"];

#[test]
fn test_core_manifest_has_no_surface_dependencies() {
    let manifest = workspace_root().join(CORE_DIR).join("Cargo.toml");
    let content = fs::read_to_string(&manifest).expect("core Cargo.toml should be readable");

    let offending: Vec<&str> = SURFACE_CRATES
        .iter()
        .copied()
        .filter(|name| {
            content
                .lines()
                .map(|line| line.split('#').next().unwrap_or(line).trim())
                .any(|line| line.starts_with(name))
        })
        .collect();

    assert!(
        offending.is_empty(),
        "lottery-core must stay headless, but depends on: {offending:?}"
    );
}

#[test]
fn test_core_sources_do_not_use_surface_crates() {
    let core_src = format!("{CORE_DIR}/src");
    let violations = find_violations(&[core_src.as_str()], |code| {
        SURFACE_CRATES
            .iter()
            .any(|name| code.contains(&format!("{name}::")))
    });

    if !violations.is_empty() {
        eprintln!("\n❌ Surface crates used inside lottery-core:\n");
        for violation in &violations {
            eprintln!("  ❌ {violation}");
        }

        panic!(
            "\nFound {} surface reference(s) in the core.\nMove them into the TUI crate.",
            violations.len()
        );
    }
}

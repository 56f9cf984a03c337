//! Integration Test: Sleep Prohibition
//!
//! **Policy**: Production code MUST NOT sleep. The animation advances when the
//! host ticks it with the current time, and the TUI waits on its event stream
//! and a `tokio::time::interval`.
//!
//! **Policy**: The core never calls `Instant::now()`. Every time-dependent
//! operation takes `now` from the caller.

use architectural_enforcement::{find_violations, CORE_DIR, PRODUCTION_DIRS};

/// Test that production code does not contain sleep() calls
#[test]
fn test_no_sleep_in_production_code() {
    let violations = find_violations(PRODUCTION_DIRS, |code| {
        code.contains("::sleep(") || code.contains(".sleep(")
    });

    if !violations.is_empty() {
        eprintln!("\n❌ CRITICAL: Sleep calls found in production code!\n");
        for violation in &violations {
            eprintln!("  ❌ {violation}");
        }
        eprintln!("\n✅ Use tokio::time::interval() in the TUI loop");
        eprintln!("✅ Pass `now` into DrawSequencer::tick() instead of waiting");

        panic!(
            "\nFound {} sleep violation(s) in production code.\nFix these before merging!",
            violations.len()
        );
    }
}

/// Test that the core takes time from its caller
#[test]
fn test_core_does_not_read_the_clock() {
    let core_src = format!("{CORE_DIR}/src");
    let violations = find_violations(&[core_src.as_str()], |code| {
        code.contains("Instant::now()") || code.contains("SystemTime::now()")
    });

    if !violations.is_empty() {
        eprintln!("\n❌ The core read the clock directly:\n");
        for violation in &violations {
            eprintln!("  ❌ {violation}");
        }

        panic!(
            "\nFound {} clock read(s) in the core.\nTake `now: Instant` as a parameter instead.",
            violations.len()
        );
    }
}

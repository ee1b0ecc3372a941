//! Scripted demo against a real log file.

use std::time::Duration;

use chrono::NaiveDate;
use turnstile_core::FixedClock;
use turnstile_tui::demo::{self, DEMO_TARGET, DemoOptions};

fn clock() -> FixedClock {
    FixedClock::new(
        NaiveDate::from_ymd_opt(2024, 7, 8).and_then(|d| d.and_hms_opt(9, 10, 11)).expect("date"),
    )
}

#[test]
fn demo_locks_out_then_unblocks_target() {
    let dir = tempfile::tempdir().expect("tempdir");
    let options = DemoOptions {
        log_file: dir.path().join("demo_security_log.txt"),
        max_attempts: 5,
        pause: Duration::ZERO,
    };
    let mut out = Vec::new();

    let summary = demo::run(&mut out, &options, clock()).expect("demo");

    assert_eq!(summary.blocked_after_lockout, [DEMO_TARGET]);
    assert!(summary.blocked_at_end.is_empty());
    // Fewer lines than the tail length, so the whole log is shown
    assert_eq!(summary.log_tail.len(), 9);
    assert!(summary.log_tail.iter().all(|l| l.starts_with("[2024-07-08 09:10:11] ")));
    assert!(
        summary
            .log_tail
            .last()
            .is_some_and(|l| l.ends_with("User 'testuser' was unblocked"))
    );

    let text = String::from_utf8(out).expect("utf8");
    assert!(text.contains("Result: SUCCESS"));
    assert!(text.contains("Result: FAILED (as expected)"));
    assert!(text.contains("Attempt 5/5: testuser / wrongpass5"));
    assert!(text.contains("SECURITY STATUS REPORT"));
    assert!(text.contains("  1. testuser - Failed attempts: 5"));
    assert!(text.contains("testuser has been unblocked!"));
    assert!(text.contains("DEMO COMPLETE!"));

    let log = std::fs::read_to_string(&options.log_file).expect("log file");
    // 1 success + 1 admin failure + 5 testuser failures + 1 alert + 1 unblock
    assert_eq!(log.lines().count(), 9);
}

#[test]
fn demo_reports_unwritable_log() {
    let dir = tempfile::tempdir().expect("tempdir");
    let options = DemoOptions {
        log_file: dir.path().join("missing-dir").join("log.txt"),
        max_attempts: 2,
        pause: Duration::ZERO,
    };
    let mut out = Vec::new();

    let summary = demo::run(&mut out, &options, clock()).expect("demo still completes");

    assert!(summary.log_tail.is_empty());
    let text = String::from_utf8(out).expect("utf8");
    assert!(text.contains("No log file yet"));
    assert!(text.contains("[ERROR] Failed to write to log:"));
}

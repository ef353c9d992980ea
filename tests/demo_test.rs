use std::process::Command;

fn run_binary(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_smart_parking"))
        .args(args)
        .env("RUST_LOG", "warn,smart_parking=info")
        .output()
        .expect("Failed to execute smart_parking")
}

/// Test that the scripted demo parks and releases both vehicles
#[test]
fn test_demo_runs() {
    let output = run_binary(&[]);
    assert!(
        output.status.success(),
        "Demo failed. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines[0], "Availability: Small=1 Medium=1 Large=1");
    assert!(stdout.contains("Vehicle KA01AB1234 parked at M1 (Ticket T1)"));
    assert!(stdout.contains("Vehicle MH12CD9876 parked at S1 (Ticket T2)"));
    assert!(stdout.contains("Availability: Small=0 Medium=0 Large=1"));
    assert!(stdout.contains("Vehicle KA01AB1234 exited. Fee: $60"));
    assert!(stdout.contains("Vehicle MH12CD9876 exited. Fee: $30"));
    assert_eq!(
        lines.last().copied(),
        Some("Availability: Small=1 Medium=1 Large=1")
    );

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(stderr.matches("[Observer] Availability changed!").count(), 4);
}

/// Test that the demo stay length drives the fee
#[test]
fn test_demo_stay_minutes() {
    let output = run_binary(&["--stay-minutes", "200", "--car-rate", "25"]);
    assert!(output.status.success(), "Demo failed to run");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Vehicle KA01AB1234 exited. Fee: $100"));
    assert!(stdout.contains("Vehicle MH12CD9876 exited. Fee: $40"));
}

/// Test that simulation statistics are logged
#[test]
fn test_simulation_statistics_logged() {
    let output = run_binary(&["--simulate", "--seed", "11", "--ticks", "48"]);
    assert!(
        output.status.success(),
        "Simulation failed. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("=== Final State ==="));

    let stderr = String::from_utf8_lossy(&output.stderr);
    for key in [
        "SIMULATION COMPLETE",
        "Total arrivals:",
        "Total parked:",
        "Total rejected:",
        "Total departures:",
        "Revenue:",
        "Success rate:",
    ] {
        assert!(stderr.contains(key), "Missing '{}' statistic", key);
    }

    // Format: "[2025-01-01T00:00:00Z INFO  smart_parking::lot::simulation] Elapsed minutes: 720"
    let elapsed_line = stderr
        .lines()
        .find(|line| line.contains("Elapsed minutes:"))
        .expect("Could not find 'Elapsed minutes' line");
    let elapsed: i64 = elapsed_line
        .split("Elapsed minutes:")
        .nth(1)
        .and_then(|s| s.trim().parse().ok())
        .expect("Could not parse elapsed minutes");
    assert_eq!(elapsed, 48 * 15);
}

/// Test that out-of-range inputs fail with an error instead of a panic
#[test]
fn test_invalid_inputs_exit_with_error() {
    for args in [
        vec!["--stay-minutes", "9223372036854775807"],
        vec!["--simulate", "--arrival-chance", "NaN"],
        vec!["--simulate", "--arrival-chance", "2"],
        vec!["--stay-minutes", "-5"],
        vec!["--car-rate", "18446744073709551615"],
    ] {
        let output = run_binary(&args);
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(!output.status.success(), "{:?} should fail", args);
        assert!(!stderr.contains("panicked"), "{:?} panicked: {}", args, stderr);
    }
}

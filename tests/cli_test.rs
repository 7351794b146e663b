use std::path::PathBuf;
use std::process::Command;

fn scratch_file(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("intersection_sim_{}_{}", std::process::id(), name))
}

/// Test that a short run writes a trip file and logs completion
#[test]
fn test_cli_writes_trip_file() {
    let output_path = scratch_file("sign.csv");
    let output = Command::new(env!("CARGO_BIN_EXE_intersection_sim"))
        .args(["--policy", "sign", "--horizon", "7200", "--output"])
        .arg(&output_path)
        .env("RUST_LOG", "info")
        .output()
        .expect("Failed to execute simulation");

    assert!(
        output.status.success(),
        "Simulation failed. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Simulation complete"),
        "Missing completion message. stderr: {}",
        stderr
    );

    let contents = std::fs::read_to_string(&output_path).expect("trip file written");
    let _ = std::fs::remove_file(&output_path);
    assert!(contents.starts_with("Car_Number,Arrive,Depart,Wait,Direction\n"));
    assert!(contents.lines().count() > 1);
}

/// Test that an existing trip file can be summarised without simulating
#[test]
fn test_cli_analyzes_trip_file() {
    let input_path = scratch_file("analyze.csv");
    std::fs::write(
        &input_path,
        "Car_Number,Arrive,Depart,Wait,Direction\n1,10,30,20,N\n2,3700,3710,10,E\n",
    )
    .expect("write trip file");

    let output = Command::new(env!("CARGO_BIN_EXE_intersection_sim"))
        .arg("--analyze")
        .arg(&input_path)
        .output()
        .expect("Failed to execute analysis");
    let _ = std::fs::remove_file(&input_path);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Mean Wait by Hour of Arrival"));
    assert!(stdout.contains("20.0s"));
    assert!(stdout.contains("10.0s"));
}

/// Test that bad configuration stops the program before it simulates
#[test]
fn test_cli_rejects_bad_configuration() {
    let output = Command::new(env!("CARGO_BIN_EXE_intersection_sim"))
        .args(["--policy", "yield"])
        .output()
        .expect("Failed to execute simulation");
    assert!(!output.status.success());

    let output_path = scratch_file("lanes.csv");
    let output = Command::new(env!("CARGO_BIN_EXE_intersection_sim"))
        .args(["--policy", "sign", "--ew-lanes", "4", "--output"])
        .arg(&output_path)
        .output()
        .expect("Failed to execute simulation");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("cannot control 4 lanes"));
    assert!(!output_path.exists());
}

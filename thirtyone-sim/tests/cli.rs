use std::process::Command;

fn temp_path(label: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!(
        "thirtyone-cli-{label}-{}",
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos()
    ))
}

#[test]
fn cli_list_strategies_writes_output() {
    let exe = env!("CARGO_BIN_EXE_thirtyone-sim");
    let output_path = temp_path("list");
    let status = Command::new(exe)
        .args(["--list-strategies", "--output"])
        .arg(&output_path)
        .status()
        .expect("run cli");
    assert!(status.success());
    let content = std::fs::read_to_string(output_path).expect("read output");
    assert!(content.contains("Available strategies"));
    assert!(content.contains("PremeditatedTarget6"));
}

#[test]
fn cli_tournament_writes_json_report() {
    let exe = env!("CARGO_BIN_EXE_thirtyone-sim");
    let output_path = temp_path("tournament");
    let output = Command::new(exe)
        .args([
            "--games",
            "200",
            "--strategies",
            "Only3OrLowest,TakeHigherDiceLater2,PremeditatedTarget3",
            "--parallel",
            "--report",
            "json",
            "--output",
        ])
        .arg(&output_path)
        .output()
        .expect("run cli");
    assert!(output.status.success());
    let content = std::fs::read_to_string(output_path).expect("read output");
    let value: serde_json::Value = serde_json::from_str(&content).expect("valid json");
    assert_eq!(value["mode"], "tournament");
    assert_eq!(value["result"]["games"], 200);
    let wins = value["result"]["wins"].as_object().expect("wins map");
    assert_eq!(wins.len(), 3);
    let total: u64 = wins.values().filter_map(serde_json::Value::as_u64).sum();
    assert_eq!(total, 200);
}

#[test]
fn cli_single_mode_writes_csv_report() {
    let exe = env!("CARGO_BIN_EXE_thirtyone-sim");
    let output_path = temp_path("single");
    let status = Command::new(exe)
        .args([
            "--mode",
            "single",
            "--players",
            "3",
            "--games",
            "100",
            "--strategies",
            "TakeHigherDiceLater2",
            "--report",
            "csv",
            "--output",
        ])
        .arg(&output_path)
        .status()
        .expect("run cli");
    assert!(status.success());
    let content = std::fs::read_to_string(output_path).expect("read output");
    assert!(content.starts_with("strategy,players,games,mean,std_dev,min,max"));
    assert!(content.contains("TakeHigherDiceLater2,3,100,"));
}

#[test]
fn cli_same_seed_same_report() {
    let exe = env!("CARGO_BIN_EXE_thirtyone-sim");
    let run = |label: &str| {
        let output_path = temp_path(label);
        let status = Command::new(exe)
            .args(["--games", "150", "--seed", "99", "--report", "csv", "--output"])
            .arg(&output_path)
            .status()
            .expect("run cli");
        assert!(status.success());
        std::fs::read_to_string(output_path).expect("read output")
    };
    assert_eq!(run("seed-a"), run("seed-b"));
}

#[test]
fn cli_rejects_unknown_strategy() {
    let exe = env!("CARGO_BIN_EXE_thirtyone-sim");
    let output = Command::new(exe)
        .args(["--strategies", "Gambler", "--games", "10"])
        .output()
        .expect("run cli");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Gambler"));
}

#[test]
fn cli_rejects_zero_games() {
    let exe = env!("CARGO_BIN_EXE_thirtyone-sim");
    let output = Command::new(exe)
        .args(["--games", "0"])
        .output()
        .expect("run cli");
    assert!(!output.status.success());
}

mod common;

use assert_cmd::prelude::*;
use common::{serve, serve_recorded, Canned};
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use std::process::Command;
use std::time::Duration;
use tempfile::TempDir;

fn reportdesk_cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("reportdesk"))
}

/// Run `init` into a fresh temp dir and point the config at `base_url`.
fn init_config(temp_dir: &TempDir, base_url: &str, timeout_secs: u64) -> std::path::PathBuf {
    let config_path = temp_dir.path().join("reportdesk-config");

    reportdesk_cmd()
        .args(["-C", config_path.to_str().unwrap(), "init"])
        .assert()
        .success();

    let config = fs::read_to_string(config_path.join("config.toml"))
        .unwrap()
        .replace("http://localhost:8080", base_url)
        .replace("timeout_secs = 60", &format!("timeout_secs = {timeout_secs}"));
    fs::write(config_path.join("config.toml"), config).unwrap();
    config_path
}

fn arg(path: &Path) -> &str {
    path.to_str().unwrap()
}

#[test]
fn test_help() {
    reportdesk_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Billing and finance reports"));
}

#[test]
fn test_version() {
    reportdesk_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("reportdesk"));
}

#[test]
fn test_init_creates_config() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("reportdesk-config");

    reportdesk_cmd()
        .args(["-C", arg(&config_path), "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized reportdesk config"));

    assert!(config_path.join("config.toml").exists());
    assert!(config_path.join("output").is_dir());
}

#[test]
fn test_init_fails_if_exists() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("reportdesk-config");

    reportdesk_cmd()
        .args(["-C", arg(&config_path), "init"])
        .assert()
        .success();

    reportdesk_cmd()
        .args(["-C", arg(&config_path), "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_report_without_init() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("nonexistent");

    reportdesk_cmd()
        .args(["-C", arg(&config_path), "stock", "--location", "510.20"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_missing_filter_rejected_before_request() {
    let temp_dir = TempDir::new().unwrap();
    // nothing listens here; validation must fail first
    let config_path = init_config(&temp_dir, "http://127.0.0.1:9", 60);

    reportdesk_cmd()
        .args(["-C", arg(&config_path), "age", "--area", "A01", "--period", "All"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Missing required filter 'bill-cycle'"));
}

#[test]
fn test_unknown_period_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = init_config(&temp_dir, "http://127.0.0.1:9", 60);

    reportdesk_cmd()
        .args([
            "-C",
            arg(&config_path),
            "age",
            "--area",
            "A01",
            "--bill-cycle",
            "412",
            "--period",
            "13-14",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown time period '13-14'"));
}

#[test]
fn test_lookups_table() {
    let base = serve(vec![Canned::json(
        "200 OK",
        r#"{"data":[{"code":"A01","name":"Colombo North"}],"errorMessage":null}"#,
    )]);
    let temp_dir = TempDir::new().unwrap();
    let config_path = init_config(&temp_dir, &base, 60);

    reportdesk_cmd()
        .args(["-C", arg(&config_path), "lookups", "areas"])
        .assert()
        .success()
        .stdout(predicate::str::contains("A01"))
        .stdout(predicate::str::contains("Colombo North"));
}

#[test]
fn test_stock_report_and_csv_export() {
    let base = serve(vec![Canned::json(
        "200 OK",
        r#"[{"MaterialCode":"M-100","MaterialName":"Cable, 16mm","Unit":"m","QtyOnHand":250,"UnitPrice":12.5,"StockValue":3125},
            {"MaterialCode":"M-200","MaterialName":"Meter","Unit":"ea","QtyOnHand":4,"UnitPrice":-10,"StockValue":-40}]"#,
    )]);
    let temp_dir = TempDir::new().unwrap();
    let config_path = init_config(&temp_dir, &base, 60);
    let csv_path = temp_dir.path().join("stock.csv");

    reportdesk_cmd()
        .args([
            "-C",
            arg(&config_path),
            "stock",
            "--location",
            "510.20",
            "--export",
            "csv",
            "-o",
            arg(&csv_path),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Material Stock Balance"))
        .stdout(predicate::str::contains("3,125.00"))
        .stdout(predicate::str::contains("(40.00)"))
        .stdout(predicate::str::contains("TOTAL"))
        .stdout(predicate::str::contains("Saved:"));

    let content = fs::read_to_string(&csv_path).unwrap();
    assert!(content.starts_with("\"Report\",\"Material Stock Balance\""));
    assert!(content.contains("\"Cable, 16mm\""));
    assert!(content.contains("\"-40\""));
}

#[test]
fn test_html_export_uses_default_name() {
    let base = serve(vec![Canned::json(
        "200 OK",
        r#"[{"NetType":"Net Accounting","CustomerCount":12,"CapacityKw":48.5}]"#,
    )]);
    let temp_dir = TempDir::new().unwrap();
    let config_path = init_config(&temp_dir, &base, 60);

    reportdesk_cmd()
        .args([
            "-C",
            arg(&config_path),
            "solar",
            "--area",
            "A01",
            "--year",
            "2026",
            "--month",
            "9",
            "--export",
            "html",
        ])
        .assert()
        .success();

    let exported: Vec<_> = fs::read_dir(config_path.join("output"))
        .unwrap()
        .map(|e| e.unwrap().file_name().into_string().unwrap())
        .collect();
    assert_eq!(exported.len(), 1);
    assert!(exported[0].starts_with("SolarAnalytics_A01_2026_9_"));
    assert!(exported[0].ends_with(".html"));
}

#[test]
fn test_empty_report_shows_no_data() {
    let base = serve(vec![Canned::json("200 OK", r#"{"data":[],"errorMessage":null}"#)]);
    let temp_dir = TempDir::new().unwrap();
    let config_path = init_config(&temp_dir, &base, 60);

    reportdesk_cmd()
        .args(["-C", arg(&config_path), "stock", "--location", "510.20", "--export", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No data found for the selected filters."))
        .stdout(predicate::str::contains("Nothing to export."));
}

#[test]
fn test_backend_error_message_shown() {
    let base = serve(vec![Canned::json(
        "500 Internal Server Error",
        r#"{"errorMessage":"bad cycle"}"#,
    )]);
    let temp_dir = TempDir::new().unwrap();
    let config_path = init_config(&temp_dir, &base, 60);

    reportdesk_cmd()
        .args(["-C", arg(&config_path), "stock", "--location", "510.20"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: bad cycle"))
        .stdout(predicate::str::contains("Material Stock Balance").not());
}

#[test]
fn test_timeout_shows_smaller_area_hint() {
    let base = serve(vec![Canned {
        delay: Duration::from_secs(4),
        ..Canned::json("200 OK", "[]")
    }]);
    let temp_dir = TempDir::new().unwrap();
    let config_path = init_config(&temp_dir, &base, 1);

    reportdesk_cmd()
        .args(["-C", arg(&config_path), "stock", "--location", "510.20"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("timed out"))
        .stderr(predicate::str::contains("Try a smaller area"));
}

#[test]
fn test_debtors_merges_ordinary_and_bulk() {
    let body = r#"[{"CustomerType":"DOM","TariffCode":"D1","AccountCount":10,"TotalArrears":1000}]"#;
    let base = serve(vec![Canned::json("200 OK", body), Canned::json("200 OK", body)]);
    let temp_dir = TempDir::new().unwrap();
    let config_path = init_config(&temp_dir, &base, 60);

    reportdesk_cmd()
        .args([
            "-C",
            arg(&config_path),
            "debtors",
            "--area",
            "A01",
            "--customer-type",
            "DOM",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Ordinary"))
        .stdout(predicate::str::contains("Bulk"))
        .stdout(predicate::str::contains("2,000.00"));
}

#[test]
fn test_error_message_alongside_empty_data_is_reported() {
    let base = serve(vec![Canned::json(
        "200 OK",
        r#"{"data":[],"errorMessage":"Bill cycle 412 not closed"}"#,
    )]);
    let temp_dir = TempDir::new().unwrap();
    let config_path = init_config(&temp_dir, &base, 60);

    reportdesk_cmd()
        .args(["-C", arg(&config_path), "stock", "--location", "510.20"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: Bill cycle 412 not closed"))
        .stdout(predicate::str::contains("No data found").not());
}

#[test]
fn test_zero_timeout_config_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = init_config(&temp_dir, "http://127.0.0.1:9", 0);

    reportdesk_cmd()
        .args(["-C", arg(&config_path), "stock", "--location", "510.20"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("api.timeout_secs must be at least 1"));
}

#[test]
fn test_age_all_aggregates_buckets() {
    let (base, requests) = serve_recorded(vec![Canned::json(
        "200 OK",
        r#"{"data":[{"AccountNumber":"4010","Name":"Perera","TariffCode":"D1",
            "Month0":1,"Month1":2,"Month2":3,"Month3":4,"Month4":5,"Month5":6,"Month6":7,
            "Months7_9":5,"Months10_12":5,"Years1_2":0,"Years2_3":0,"Years3_4":0,"Years4_5":0,
            "Years5Plus":0,"Balance":38}],"errorMessage":null}"#,
    )]);
    let temp_dir = TempDir::new().unwrap();
    let config_path = init_config(&temp_dir, &base, 60);
    let csv_path = temp_dir.path().join("age.csv");

    reportdesk_cmd()
        .args([
            "-C",
            arg(&config_path),
            "age",
            "--area",
            "A01",
            "--bill-cycle",
            "412",
            "--period",
            "All",
            "--province",
            "WP",
            "--export",
            "csv",
            "-o",
            arg(&csv_path),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Province: WP"))
        .stdout(predicate::str::contains("0-6 Months"))
        .stdout(predicate::str::contains("28.00"))
        .stdout(predicate::str::contains("10.00"))
        .stdout(predicate::str::contains("Over 5 Years"));

    let request = requests.lock().unwrap()[0].clone();
    assert!(request.contains("timePeriod=All"), "{request}");
    assert!(request.contains("provinceCode=WP"), "{request}");

    let content = fs::read_to_string(&csv_path).unwrap();
    assert!(content.contains("\"4010\",\"Perera\",\"D1\",\"28\",\"10\""));
}

#[test]
fn test_trial_balance_by_cost_center_groups_accounts() {
    let (base, requests) = serve_recorded(vec![Canned::json(
        "200 OK",
        r#"[{"AccountCode":"L200","AccountName":"Payables","CC1":-4,"CC2":0},
            {"AccountCode":"A100","AccountName":"Cash","CC1":10,"CC2":5},
            {"AccountCode":"A050","AccountName":"Bank","CC1":2,"CC2":0}]"#,
    )]);
    let temp_dir = TempDir::new().unwrap();
    let config_path = init_config(&temp_dir, &base, 60);

    let output = reportdesk_cmd()
        .args([
            "-C",
            arg(&config_path),
            "trial-balance",
            "--company",
            "EB",
            "--year",
            "2025",
            "--month",
            "12",
            "--cost-center",
            "CC1",
            "--cost-center",
            "CC2",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();

    let pos = |s: &str| stdout.find(s).unwrap_or_else(|| panic!("missing {s:?} in\n{stdout}"));
    assert!(pos("Assets") < pos("A050"));
    assert!(pos("A050") < pos("A100"));
    assert!(pos("A100") < pos("Total Assets"));
    assert!(pos("Total Assets") < pos("Liabilities"));
    assert!(pos("Total Liabilities") < pos("GRAND TOTAL"));
    // Cash row total across both cost centers, then the Assets and grand totals.
    assert!(stdout.contains("15.00"));
    assert!(stdout.contains("17.00"));
    assert!(stdout.contains("13.00"));

    let request = requests.lock().unwrap()[0].clone();
    assert!(request.contains("companyId=EB"), "{request}");
    assert!(request.contains("costCenters="), "{request}");
}

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use anyhow::Result;
use tempfile::TempDir;

const CATALOG: &str = r#"[
    {"title": "Widget", "type": "tools", "price": 10.0},
    {"title": "Bolt", "type": "hardware", "price": 0.25}
]"#;

fn compute_sales(dir: &Path, args: &[&str]) -> Result<Output> {
    Ok(Command::new(env!("CARGO_BIN_EXE_compute-sales"))
        .current_dir(dir)
        .args(args)
        .output()?)
}

fn setup(sales: &str) -> Result<TempDir> {
    let dir = TempDir::new()?;
    fs::write(dir.path().join("priceCatalogue.json"), CATALOG)?;
    fs::write(dir.path().join("salesRecord.json"), sales)?;
    Ok(dir)
}

#[test]
fn test_computes_total() -> Result<()> {
    let dir = setup(
        r#"[
            {"SALE_ID": 1, "items": [{"Product": "Widget", "Quantity": 3}]},
            {"SALE_ID": 2, "items": [{"Product": "Bolt", "Quantity": 10}]},
            {"SALE_ID": 3}
        ]"#,
    )?;
    let output = compute_sales(dir.path(), &["priceCatalogue.json", "salesRecord.json"])?;
    assert!(output.status.success());

    let results = fs::read_to_string(dir.path().join("SalesResults.txt"))?;
    let lines: Vec<&str> = results.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], "Total sales cost: $32.50");
    assert!(lines[1].starts_with("Elapsed time: "));
    assert!(lines[1].ends_with(" seconds"));
    assert!(String::from_utf8(output.stdout)?.contains(&results));
    Ok(())
}

#[test]
fn test_bad_items_are_reported_and_skipped() -> Result<()> {
    let dir = setup(
        r#"[{"items": [
            {"Product": "Gadget", "Quantity": 2},
            {"Product": "Widget"},
            {"Product": "Widget", "Quantity": "two"},
            {"Product": "Widget", "Quantity": 1}
        ]}]"#,
    )?;
    let output = compute_sales(dir.path(), &["priceCatalogue.json", "salesRecord.json"])?;
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout)?;
    let errors: Vec<&str> = stdout.lines().filter(|l| l.starts_with("Error: ")).collect();
    assert_eq!(errors.len(), 3);
    assert!(errors[0].contains("Gadget"));
    assert!(errors[1].contains("'Quantity'"));
    assert!(errors[2].contains("type error"));
    assert!(stdout.contains("Total sales cost: $10.00"));

    let log = fs::read_to_string(dir.path().join("computeSales.log"))?;
    let entries: Vec<&str> = log.lines().filter(|l| l.contains("ERROR")).collect();
    assert_eq!(entries.len(), 3);
    assert!(entries[0].contains("Gadget"));
    Ok(())
}

#[test]
fn test_bad_catalog_entries_are_not_fatal() -> Result<()> {
    let dir = setup(
        r#"[{"items": [
            {"Product": "Widget", "Quantity": 2},
            {"Product": "Legacy", "Quantity": 1}
        ]}]"#,
    )?;
    fs::write(
        dir.path().join("priceCatalogue.json"),
        r#"[
            {"title": "Widget", "price": 10.0},
            {"title": "Legacy", "price": "N/A"},
            {"price": 3.0}
        ]"#,
    )?;
    let output = compute_sales(dir.path(), &["priceCatalogue.json", "salesRecord.json"])?;
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout)?;
    let errors: Vec<&str> = stdout.lines().filter(|l| l.starts_with("Error: ")).collect();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("type error"));
    assert!(fs::read_to_string(dir.path().join("SalesResults.txt"))?
        .starts_with("Total sales cost: $20.00\n"));
    Ok(())
}

#[test]
fn test_custom_output_paths() -> Result<()> {
    let dir = setup(r#"[{"items": [{"Product": "Nope", "Quantity": 1}]}]"#)?;
    let output = compute_sales(
        dir.path(),
        &[
            "priceCatalogue.json",
            "salesRecord.json",
            "--output",
            "out.txt",
            "--log-file",
            "audit.log",
        ],
    )?;
    assert!(output.status.success());
    assert!(fs::read_to_string(dir.path().join("out.txt"))?.starts_with("Total sales cost: $0.00\n"));
    assert!(fs::read_to_string(dir.path().join("audit.log"))?.contains("Nope"));
    assert!(!dir.path().join("SalesResults.txt").exists());
    Ok(())
}

#[test]
fn test_missing_catalog_is_fatal() -> Result<()> {
    let dir = setup("[]")?;
    fs::write(dir.path().join("SalesResults.txt"), "previous run\n")?;
    let output = compute_sales(dir.path(), &["missing.json", "salesRecord.json"])?;
    assert_eq!(output.status.code(), Some(3));
    assert!(String::from_utf8(output.stdout)?.contains("missing.json"));
    assert_eq!(
        fs::read_to_string(dir.path().join("SalesResults.txt"))?,
        "previous run\n"
    );
    let log = fs::read_to_string(dir.path().join("computeSales.log"))?;
    assert!(log.contains("missing.json"));
    Ok(())
}

#[test]
fn test_malformed_sales_is_fatal() -> Result<()> {
    let dir = setup("[{\"items\": ")?;
    let output = compute_sales(dir.path(), &["priceCatalogue.json", "salesRecord.json"])?;
    assert_eq!(output.status.code(), Some(4));
    assert!(String::from_utf8(output.stdout)?.contains("salesRecord.json"));
    assert!(!dir.path().join("SalesResults.txt").exists());
    Ok(())
}

#[test]
fn test_wrong_argument_count() -> Result<()> {
    let dir = setup("[]")?;
    let output = compute_sales(dir.path(), &["priceCatalogue.json"])?;
    assert_eq!(output.status.code(), Some(2));
    assert!(!dir.path().join("SalesResults.txt").exists());

    let output = compute_sales(
        dir.path(),
        &["priceCatalogue.json", "salesRecord.json", "extra.json"],
    )?;
    assert_eq!(output.status.code(), Some(2));
    assert!(!dir.path().join("SalesResults.txt").exists());
    Ok(())
}

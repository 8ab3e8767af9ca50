//! End-to-end scoring through the binary.
//!
//! Writes synthetic scans to disk and checks the reported metrics.

#![allow(clippy::unwrap_used)]
#![allow(deprecated)] // cargo_bin deprecation

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use image::RgbaImage;
use page_qa_test_support::SyntheticPageBuilder;
use serde_json::Value;
use tempfile::TempDir;

fn write_page(dir: &Path, name: &str, page: &RgbaImage) -> PathBuf {
    let path = dir.join(name);
    page.save(&path).unwrap();
    path
}

/// Runs the binary and parses every JSONL report.
fn reports<P: AsRef<OsStr>>(args: &[P]) -> Vec<Value> {
    let output = Command::cargo_bin("page-qa")
        .unwrap()
        .arg("--seed")
        .arg("17")
        .args(args)
        .output()
        .unwrap();
    String::from_utf8(output.stdout)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

fn metric(report: &Value, name: &str) -> f64 {
    report["average_metrics"]
        .as_array()
        .unwrap()
        .iter()
        .find(|m| m["name"] == name)
        .and_then(|m| m["score"].as_f64())
        .unwrap()
}

#[test]
fn test_blank_page_scores() {
    let temp_dir = TempDir::new().unwrap();
    let page = write_page(temp_dir.path(), "blank.png", &SyntheticPageBuilder::blank_page());

    let report = &reports(&[&page])[0];
    assert!((metric(report, "Text Clarity") - 30.0).abs() < 1e-9);
    assert!((metric(report, "Noise Level") - 100.0).abs() < 1e-9);
    assert!((metric(report, "Skew / Rotation") - 100.0).abs() < 1e-9);
    assert!((report["overall_score"].as_f64().unwrap() - 61.5).abs() < 1e-9);
}

#[test]
fn test_skewed_page_penalized() {
    let temp_dir = TempDir::new().unwrap();
    let straight = write_page(temp_dir.path(), "straight.png", &SyntheticPageBuilder::printed_page());
    let skewed = write_page(temp_dir.path(), "skewed.png", &SyntheticPageBuilder::skewed_page());

    let reports = reports(&[&straight, &skewed]);
    assert!((metric(&reports[0], "Skew / Rotation") - 100.0).abs() < 1e-9);
    assert!((metric(&reports[1], "Skew / Rotation") - 55.0).abs() < 1e-9);
}

#[test]
fn test_speckled_page_penalized() {
    let temp_dir = TempDir::new().unwrap();
    let clean = write_page(temp_dir.path(), "clean.png", &SyntheticPageBuilder::printed_page());
    let speckled = write_page(
        temp_dir.path(),
        "speckled.png",
        &SyntheticPageBuilder::speckled(400, 300, 0.1, 21),
    );

    let reports = reports(&[&clean, &speckled]);
    assert!((metric(&reports[0], "Noise Level") - 100.0).abs() < 1e-9);
    assert!(metric(&reports[1], "Noise Level") < 90.0);
    assert!(
        reports[1]["overall_score"].as_f64().unwrap()
            < reports[0]["overall_score"].as_f64().unwrap()
    );
}

#[test]
fn test_reports_follow_argument_order() {
    let temp_dir = TempDir::new().unwrap();
    let b = write_page(temp_dir.path(), "b.png", &SyntheticPageBuilder::blank(50, 50));
    let a = write_page(temp_dir.path(), "a.png", &SyntheticPageBuilder::blank(50, 50));

    let reports = reports(&[&b, &a]);
    assert_eq!(reports.len(), 2);
    assert!(reports[0]["path"].as_str().unwrap().ends_with("b.png"));
    assert!(reports[1]["path"].as_str().unwrap().ends_with("a.png"));
}

#[test]
fn test_directory_document_averages_pages() {
    let temp_dir = TempDir::new().unwrap();
    let doc = temp_dir.path().join("letter");
    std::fs::create_dir(&doc).unwrap();
    write_page(&doc, "page-1.png", &SyntheticPageBuilder::blank_page());
    write_page(&doc, "page-2.png", &SyntheticPageBuilder::skewed_page());

    let report = &reports(&[&doc])[0];
    assert_eq!(report["page_count"], 2);

    // Blank skew 100, skewed 55
    assert!((metric(report, "Skew / Rotation") - 77.5).abs() < 1e-9);
    assert!((metric(report, "Noise Level") - 100.0).abs() < 1e-9);
}

#[test]
fn test_scaled_rendering_still_scores() {
    let temp_dir = TempDir::new().unwrap();
    let page = write_page(temp_dir.path(), "scan.png", &SyntheticPageBuilder::printed_page());

    let output = Command::cargo_bin("page-qa")
        .unwrap()
        .arg("--scale")
        .arg("0.5")
        .arg(&page)
        .output()
        .unwrap();
    let report: Value = serde_json::from_slice(&output.stdout).unwrap();
    let score = report["overall_score"].as_f64().unwrap();
    assert!((0.0..=100.0).contains(&score));
    assert_eq!(report["page_count"], 1);
}

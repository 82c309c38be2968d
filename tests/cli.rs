//! End-to-end tests for the btree-report binary

use plotters::style::{FontDesc, FontFamily, FontStyle};
use std::fs;
use std::path::Path;
use std::process::Command;

const RESULTS: &str = "\
TreeType,Sortedness,ReadRatio,InsertTime,LeafUtilization
B,1.0,0.5,0.6,0.9
A,0.0,0.5,0.1,0.5
B,0.5,0.5,0.5,0.7
A,1.0,0.5,0.3,0.6
B,0.0,0.5,0.4,0.5
A,0.5,0.5,0.2,0.5
";

fn btree_report() -> Command {
    Command::new(env!("CARGO_BIN_EXE_btree-report"))
}

fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn test_missing_input_exits_nonzero() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("charts");

    let output = btree_report()
        .arg(dir.path().join("btree_benchmark.csv"))
        .arg("--output-dir")
        .arg(&out)
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("btree_benchmark.csv"), "stderr: {stderr}");
    assert!(stderr.contains("run the benchmark first"), "stderr: {stderr}");
    assert!(output.stdout.is_empty());
    assert!(!out.exists());
}

#[test]
fn test_default_input_is_resolved_in_working_dir() {
    let dir = tempfile::tempdir().unwrap();

    let output = btree_report().current_dir(dir.path()).output().unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("btree_benchmark.csv"), "stderr: {stderr}");
    assert!(file_names(dir.path()).is_empty());
}

#[test]
fn test_non_numeric_value_fails() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("results.csv");
    fs::write(&input, "TreeType,Sortedness,ReadRatio,InsertTime\nA,0.5,0.5,n/a\n").unwrap();

    let output = btree_report()
        .arg(&input)
        .arg("--output-dir")
        .arg(dir.path().join("charts"))
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("InsertTime"), "stderr: {stderr}");
}

#[test]
fn test_zero_trial_count_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("results.csv");
    fs::write(&input, RESULTS).unwrap();

    let output = btree_report()
        .arg(&input)
        .arg("--trial-count")
        .arg("0")
        .output()
        .unwrap();

    assert!(!output.status.success());
}

/// Text layout needs a sans-serif system font
fn has_sans_serif_font() -> bool {
    FontDesc::new(FontFamily::SansSerif, 12.0, FontStyle::Normal)
        .box_size("0")
        .is_ok()
}

#[test]
fn test_rendering_is_deterministic() {
    if !has_sans_serif_font() {
        eprintln!("skipping: no sans-serif font installed");
        return;
    }

    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("results.csv");
    fs::write(&input, RESULTS).unwrap();

    let render = |name: &str| {
        let out = dir.path().join(name);
        let output = btree_report()
            .arg(&input)
            .arg("-o")
            .arg(&out)
            .arg("--svg")
            .output()
            .unwrap();
        assert!(output.status.success(), "{output:?}");
        (out, String::from_utf8(output.stdout).unwrap())
    };

    let (first, stdout) = render("first");
    let (second, _) = render("second");

    assert_eq!(stdout.lines().count(), 2);
    assert!(stdout.lines().next().unwrap().contains("insert_performance.png"));
    assert_eq!(
        file_names(&first),
        vec![
            "insert_performance.png",
            "insert_performance.svg",
            "leaf_utilization.png",
            "leaf_utilization.svg",
        ]
    );
    for name in file_names(&first) {
        assert_eq!(
            fs::read(first.join(&name)).unwrap(),
            fs::read(second.join(&name)).unwrap(),
            "{name} differs between runs"
        );
    }
}

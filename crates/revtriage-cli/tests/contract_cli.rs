use std::fs;
use std::path::Path;

use assert_cmd::Command;
use polars::prelude::*;
use predicates::prelude::*;
use tempfile::tempdir;

fn revtriage() -> Command {
    Command::cargo_bin("revtriage").expect("binary builds")
}

fn write_parquet(df: &mut DataFrame, path: &Path) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    let file = fs::File::create(path).unwrap();
    ParquetWriter::new(file).finish(df).unwrap();
}

fn read_parquet(path: &Path) -> DataFrame {
    ParquetReader::new(fs::File::open(path).unwrap())
        .finish()
        .unwrap()
}

fn input_frame() -> DataFrame {
    DataFrame::new(vec![
        Series::new("before_revision", &["old 1", "old 2"]),
        Series::new("after_revision", &["new 1", "new 2"]),
    ])
    .unwrap()
}

#[test]
fn label_rejects_unknown_model() {
    let dir = tempdir().unwrap();
    fs::create_dir_all(dir.path().join("data/input")).unwrap();
    revtriage()
        .current_dir(dir.path())
        .args(["label", "-m", "definitely-not-a-model"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not supported"));
}

#[test]
fn label_requires_exactly_one_dataset() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("data/input");
    fs::create_dir_all(&input).unwrap();
    revtriage()
        .current_dir(dir.path())
        .args(["label", "--model_name", "mistral"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No dataset file found"));

    fs::write(input.join("a.csv"), "x\n1\n").unwrap();
    fs::write(input.join("b.parquet"), b"").unwrap();
    revtriage()
        .current_dir(dir.path())
        .args(["label", "-m", "mistral"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Multiple dataset files found"));
}

#[test]
fn merge_requires_predictions_file() {
    let dir = tempdir().unwrap();
    let mut input = input_frame();
    write_parquet(&mut input, &dir.path().join("data/input/dataset.parquet"));

    revtriage()
        .current_dir(dir.path())
        .args(["merge", "-m", "mistral"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Predictions file for mistral not found",
        ));
}

#[test]
fn combine_requires_merged_dataset() {
    let dir = tempdir().unwrap();
    revtriage()
        .current_dir(dir.path())
        .arg("combine")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No dataset found at"));
}

#[test]
fn merge_then_combine_produces_consensus() {
    let dir = tempdir().unwrap();

    let mut input = input_frame();
    write_parquet(&mut input, &dir.path().join("data/input/dataset.parquet"));

    let mut mistral = input.clone();
    mistral
        .with_column(Series::new("mistral_prediction", &["good", "bad"]))
        .unwrap();
    write_parquet(
        &mut mistral,
        &dir.path().join("data/labeled_data_mistral.parquet"),
    );

    revtriage()
        .current_dir(dir.path())
        .args(["merge", "-m", "mistral"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Predictions have been added to the dataset.",
        ));

    // per-model artifacts are cleaned up once merged
    assert!(!dir.path().join("data/labeled_data_mistral.parquet").exists());

    let merged = read_parquet(&dir.path().join("data/output/labeled_dataset.parquet"));
    assert_eq!(
        merged.get_column_names(),
        vec!["before_revision", "after_revision", "mistral_prediction"]
    );

    // a second model extends the existing merged output instead of rebuilding it
    let mut nemo = input.clone();
    nemo.with_column(Series::new("nemo_prediction", &["good", "good"]))
        .unwrap();
    write_parquet(&mut nemo, &dir.path().join("data/labeled_data_nemo.parquet"));

    revtriage()
        .current_dir(dir.path())
        .args(["merge", "-m", "nemo"])
        .assert()
        .success();

    revtriage()
        .current_dir(dir.path())
        .arg("combine")
        .assert()
        .success()
        .stdout(predicate::str::contains("Done."));

    let combined = read_parquet(&dir.path().join("data/output/combined_dataset.parquet"));
    assert_eq!(
        combined.get_column_names(),
        vec!["before_revision", "after_revision", "quality_label"]
    );
    let labels: Vec<Option<&str>> = combined
        .column("quality_label")
        .unwrap()
        .str()
        .unwrap()
        .into_iter()
        .collect();
    assert_eq!(labels, vec![Some("good"), Some("bad")]);
}

#[test]
fn model_name_flag_is_required() {
    let dir = tempdir().unwrap();
    revtriage()
        .current_dir(dir.path())
        .arg("label")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--model_name"));
}

//! End-to-end tests of the entity-locator binary.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn entity_locator() -> Command {
    Command::cargo_bin("entity-locator").unwrap()
}

/// Reference list, synonyms, flag config and a folder of three documents
struct Fixture {
    dir: TempDir,
}

impl Fixture {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();

        fs::write(
            root.join("issuers.txt"),
            "# issuers\nAcme Capital Funding\nBeta Bank plc\n",
        )
        .unwrap();
        fs::write(root.join("synonyms.csv"), "from,to\ncapital,cap\n").unwrap();
        fs::write(
            root.join("flags.json"),
            r#"{"after": ["issued by"], "before": ["as issuer"], "remove": []}"#,
        )
        .unwrap();

        let docs = root.join("docs");
        fs::create_dir(&docs).unwrap();
        fs::write(
            docs.join("XS1.txt"),
            "The notes are issued by Acme Capital Funding, a Delaware company.",
        )
        .unwrap();
        fs::write(
            docs.join("XS2_prospectus.txt"),
            "Notes of Beta Bank plc as Issuer, due 2030.",
        )
        .unwrap();
        fs::write(docs.join("XS3.txt"), "Nothing relevant here.").unwrap();

        Self { dir }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn build_catalog(&self) -> PathBuf {
        let output = self.path("issuers.catalog");
        entity_locator()
            .arg("catalog")
            .arg("build")
            .arg("--values")
            .arg(self.path("issuers.txt"))
            .arg("--synonyms")
            .arg(self.path("synonyms.csv"))
            .arg("-o")
            .arg(&output)
            .assert()
            .success();
        output
    }

    fn build_locator(&self) -> PathBuf {
        let catalog = self.build_catalog();
        let output = self.path("issuers.locator");
        entity_locator()
            .arg("locator")
            .arg("build")
            .arg("--catalog")
            .arg(&catalog)
            .arg("--config")
            .arg(self.path("flags.json"))
            .arg("-o")
            .arg(&output)
            .assert()
            .success();
        output
    }
}

fn write(path: &Path, content: &str) {
    fs::write(path, content).unwrap();
}

#[test]
fn test_catalog_build_reports_counts() {
    let fixture = Fixture::new();
    entity_locator()
        .arg("catalog")
        .arg("build")
        .arg("--values")
        .arg(fixture.path("issuers.txt"))
        .arg("--synonyms")
        .arg(fixture.path("synonyms.csv"))
        .arg("-o")
        .arg(fixture.path("out.catalog"))
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Built catalog with 2 entries (6 distinct words, 1 synonyms)",
        ));
    assert!(fixture.path("out.catalog").exists());
}

#[test]
fn test_catalog_build_from_column() {
    let fixture = Fixture::new();
    write(
        &fixture.path("issuers.csv"),
        "isin,issuer\nXS1,Acme Capital Funding\nXS2,Beta Bank plc\nXS3,Acme Capital Funding\n",
    );
    entity_locator()
        .args(["--format", "json", "catalog", "build", "--column", "issuer"])
        .arg("--values")
        .arg(fixture.path("issuers.csv"))
        .arg("-o")
        .arg(fixture.path("column.catalog"))
        .assert()
        .success()
        .stdout(predicate::str::contains("\"entries\": 2"));
}

#[test]
fn test_catalog_build_empty_values_fails() {
    let fixture = Fixture::new();
    write(&fixture.path("empty.txt"), "# nothing\n");
    entity_locator()
        .arg("catalog")
        .arg("build")
        .arg("--values")
        .arg(fixture.path("empty.txt"))
        .arg("-o")
        .arg(fixture.path("empty.catalog"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("No reference values found"));
}

#[test]
fn test_catalog_show_lists_entries() {
    let fixture = Fixture::new();
    let catalog = fixture.build_catalog();
    entity_locator()
        .args(["--format", "tsv", "catalog", "show"])
        .arg(&catalog)
        .assert()
        .success()
        .stdout(predicate::str::contains("Acme Capital Funding\t3\t20"))
        .stdout(predicate::str::contains("Beta Bank plc\t3\t20"));
}

#[test]
fn test_match_closest_entry() {
    let fixture = Fixture::new();
    let catalog = fixture.build_catalog();
    entity_locator()
        .args(["--format", "json", "match", "--catalog"])
        .arg(&catalog)
        .arg("acme cap funding")
        .arg("BETA BANK")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"value\": \"Acme Capital Funding\""))
        .stdout(predicate::str::contains("\"value\": \"Beta Bank plc\""));
}

#[test]
fn test_match_requires_text() {
    let fixture = Fixture::new();
    let catalog = fixture.build_catalog();
    entity_locator()
        .args(["match", "--catalog"])
        .arg(&catalog)
        .assert()
        .failure();
}

#[test]
fn test_match_missing_catalog() {
    let fixture = Fixture::new();
    entity_locator()
        .args(["match", "--catalog"])
        .arg(fixture.path("missing.catalog"))
        .arg("acme")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load catalog"));
}

#[test]
fn test_locator_build_rejects_empty_flag() {
    let fixture = Fixture::new();
    let catalog = fixture.build_catalog();
    write(&fixture.path("bad.json"), r#"{"before": ["the"]}"#);
    entity_locator()
        .args(["locator", "build", "--catalog"])
        .arg(&catalog)
        .arg("--config")
        .arg(fixture.path("bad.json"))
        .arg("-o")
        .arg(fixture.path("bad.locator"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("empty after normalization"));
}

#[test]
fn test_locator_show_normalized_flags() {
    let fixture = Fixture::new();
    let locator = fixture.build_locator();
    entity_locator()
        .args(["--format", "tsv", "locator", "show"])
        .arg(&locator)
        .assert()
        .success()
        .stdout(predicate::str::contains("before\tas issuer"))
        .stdout(predicate::str::contains("after\tissued by"));
}

#[test]
fn test_extract_documents() {
    let fixture = Fixture::new();
    let locator = fixture.build_locator();
    let predictions = fixture.path("predictions.csv");

    entity_locator()
        .args(["extract", "--locator"])
        .arg(&locator)
        .arg(fixture.path("docs"))
        .arg("-o")
        .arg(&predictions)
        .assert()
        .success()
        .stdout(predicate::str::contains("XS1: Acme Capital Funding"))
        .stdout(predicate::str::contains("XS2: Beta Bank plc"))
        .stdout(predicate::str::contains("XS3: not found"))
        .stdout(predicate::str::contains("Found 2 of 3 documents"));

    let written = fs::read_to_string(&predictions).unwrap();
    assert_eq!(
        written,
        "id,value\nXS1,Acme Capital Funding\nXS2,Beta Bank plc\n"
    );
}

#[test]
fn test_extract_rejects_catalog_artifact() {
    let fixture = Fixture::new();
    let catalog = fixture.build_catalog();
    entity_locator()
        .args(["extract", "--locator"])
        .arg(&catalog)
        .arg(fixture.path("docs"))
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Expected a locator artifact, found catalog",
        ));
}

#[test]
fn test_score_predictions() {
    let fixture = Fixture::new();
    write(
        &fixture.path("predictions.csv"),
        "id,value\nXS1,Acme Capital Funding\nXS2,Beta Bank plc\n",
    );
    write(
        &fixture.path("truth.csv"),
        "id,value\nXS1,Acme Capital Funding\nXS2,Acme Capital Funding\nXS3,Beta Bank plc\n",
    );

    entity_locator()
        .args(["score", "--predictions"])
        .arg(fixture.path("predictions.csv"))
        .arg("--truth")
        .arg(fixture.path("truth.csv"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Compared: 2"))
        .stdout(predicate::str::contains("Missing:  1"))
        .stdout(predicate::str::contains("Errors:   1"))
        .stdout(predicate::str::contains("33.33% of 3"));
}

#[test]
fn test_score_json_lists_mismatches() {
    let fixture = Fixture::new();
    write(&fixture.path("predictions.csv"), "XS1,Beta Bank plc\n");
    write(&fixture.path("truth.csv"), "XS1,Acme Capital Funding|Beta Bank plc\n");

    entity_locator()
        .args(["--format", "json", "score", "--predictions"])
        .arg(fixture.path("predictions.csv"))
        .arg("--truth")
        .arg(fixture.path("truth.csv"))
        .assert()
        .success()
        .stdout(predicate::str::contains("\"errors\": 1"))
        .stdout(predicate::str::contains("\"error_percent\": 100.0"));
}

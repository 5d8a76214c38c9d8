/// End-to-end tests for config file discovery, validation and merging
/// with command-line flags.
///
/// Every run either fails before resolution or has nothing to resolve,
/// so none of them needs a live database.
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write_requirements(dir: &Path) {
    fs::write(dir.join("requirements.txt"), "flask==3.0.3\ngunicorn>=22.0\n").unwrap();
}

fn write_empty_requirements(dir: &Path) {
    fs::write(dir.join("requirements.txt"), "# nothing pinned yet\n").unwrap();
}

fn write_config(dir: &Path, content: &str) {
    fs::write(dir.join("sbom-meta.config.yml"), content).unwrap();
}

fn cli() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("sbom-meta");
    cmd.env("CHAI_DB_HOST", "127.0.0.1")
        .env("CHAI_DB_PORT", "1")
        .env("NO_COLOR", "1");
    cmd
}

#[test]
fn test_discovered_config_selects_json() {
    let temp = TempDir::new().unwrap();
    write_empty_requirements(temp.path());
    write_config(temp.path(), "json: true\nsort: downloads,desc\n");

    cli()
        .arg(temp.path())
        .assert()
        .code(0)
        .stdout("[]\n");
}

#[test]
fn test_config_found_next_to_lockfile_argument() {
    let temp = TempDir::new().unwrap();
    write_empty_requirements(temp.path());
    write_config(temp.path(), "json: true\n");

    cli()
        .arg(temp.path().join("requirements.txt"))
        .assert()
        .code(0)
        .stdout("[]\n");
}

#[test]
fn test_config_excludes_everything() {
    let temp = TempDir::new().unwrap();
    write_requirements(temp.path());
    write_config(
        temp.path(),
        "exclude_packages:\n  - flask\n  - \"guni*\"\n",
    );

    cli()
        .arg(temp.path())
        .assert()
        .code(1)
        .stderr(
            predicate::str::contains("Excluded 2 package(s)")
                .and(predicate::str::contains("were excluded")),
        );
}

#[test]
fn test_config_and_cli_excludes_combine() {
    let temp = TempDir::new().unwrap();
    write_requirements(temp.path());
    write_config(temp.path(), "exclude_packages:\n  - flask\n");

    cli()
        .args(["-e", "gunicorn"])
        .arg(temp.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("were excluded"));
}

#[test]
fn test_invalid_yaml_fails() {
    let temp = TempDir::new().unwrap();
    write_empty_requirements(temp.path());
    write_config(temp.path(), "json: [unterminated\n");

    cli()
        .arg(temp.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to parse config file"));
}

#[test]
fn test_zero_concurrency_in_config_fails() {
    let temp = TempDir::new().unwrap();
    write_empty_requirements(temp.path());
    write_config(temp.path(), "concurrency: 0\n");

    cli()
        .arg(temp.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("concurrency must be at least 1"));
}

#[test]
fn test_explicit_missing_config_fails() {
    let temp = TempDir::new().unwrap();
    write_empty_requirements(temp.path());

    cli()
        .arg(temp.path())
        .arg("--config")
        .arg(temp.path().join("nope.yml"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to read config file"));
}

#[test]
fn test_explicit_config_overrides_discovery() {
    let temp = TempDir::new().unwrap();
    let elsewhere = TempDir::new().unwrap();
    write_empty_requirements(temp.path());
    // Discovered file is broken; the explicit one wins and is never combined
    write_config(temp.path(), "concurrency: 0\n");
    write_config(elsewhere.path(), "json: true\n");

    cli()
        .arg(temp.path())
        .arg("--config")
        .arg(elsewhere.path().join("sbom-meta.config.yml"))
        .assert()
        .code(0)
        .stdout("[]\n");
}

#[test]
fn test_unknown_config_field_warns() {
    let temp = TempDir::new().unwrap();
    write_empty_requirements(temp.path());
    write_config(temp.path(), "json: true\nformat: markdown\n");

    cli()
        .arg(temp.path())
        .assert()
        .code(0)
        .stdout("[]\n")
        .stderr(predicate::str::contains(
            "Unknown config field 'format' will be ignored",
        ));
}

#[test]
fn test_cli_borders_with_config_sort() {
    let temp = TempDir::new().unwrap();
    write_empty_requirements(temp.path());
    write_config(temp.path(), "sort: repository,desc\n");

    cli()
        .arg(temp.path())
        .arg("--borders")
        .assert()
        .code(0)
        .stdout(predicate::str::contains("┌").and(predicate::str::contains("Package")));
}

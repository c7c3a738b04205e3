use bemforge::test_utils::ProjectFixture;
use predicates::prelude::*;

use crate::common::bemforge;

#[test]
fn test_config_found_from_subdirectory() {
    let project = ProjectFixture::sample().unwrap().config("out_dir = \"public\"\n").unwrap();
    let nested = project.path().join("src/blocks");

    bemforge(&nested).arg("build").assert().success();
    assert!(project.path().join("public/index.html").exists());
}

#[test]
fn test_explicit_config_missing() {
    let project = ProjectFixture::new().unwrap();

    bemforge(project.path())
        .args(["--config", "nope.toml", "bundles"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration file not found"));
}

#[test]
fn test_invalid_config_values() {
    let project = ProjectFixture::new().unwrap().config("levels = []\n").unwrap();

    bemforge(project.path())
        .arg("build")
        .assert()
        .failure()
        .stderr(predicate::str::contains("at least one level"));

    let project = ProjectFixture::new().unwrap().config("[split_chunks]\nmin_chunks = 0\n").unwrap();
    bemforge(project.path())
        .arg("build")
        .assert()
        .failure()
        .stderr(predicate::str::contains("min_chunks"));
}

#[test]
fn test_malformed_config() {
    let project = ProjectFixture::new().unwrap().config("levels = [\n").unwrap();

    bemforge(project.path())
        .arg("build")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid configuration"));
}

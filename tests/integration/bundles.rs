use bemforge::test_utils::ProjectFixture;
use predicates::prelude::*;

use crate::common::bemforge;

#[test]
fn test_bundles_table() {
    let project = ProjectFixture::sample().unwrap().config("[split_chunks]\nvendor_entities = [\"button\"]\n").unwrap();

    bemforge(project.path())
        .arg("bundles")
        .assert()
        .success()
        .stdout(predicate::str::contains("ENTITY"))
        .stdout(predicate::str::contains("about, index"))
        .stdout(predicate::str::contains("[vendor]"));
}

#[test]
fn test_bundles_json() {
    let project = ProjectFixture::sample().unwrap();

    let output = bemforge(project.path()).args(["bundles", "--format", "json"]).output().unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["header"]["referencing_templates"], serde_json::json!(["about", "index"]));
    assert_eq!(json["button"]["referencing_templates"], serde_json::json!(["index"]));
    assert_eq!(json["button"]["is_vendor"], false);
}

#[test]
fn test_bundles_empty_project() {
    let project = ProjectFixture::new().unwrap();

    bemforge(project.path())
        .arg("bundles")
        .assert()
        .success()
        .stdout(predicate::str::contains("No entities referenced."));
}

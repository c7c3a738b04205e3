use bemforge::test_utils::ProjectFixture;
use predicates::prelude::*;

use crate::common::bemforge;

fn project() -> ProjectFixture {
    ProjectFixture::new()
        .unwrap()
        .entity("src/blocks", "link", "html", "{% include \"icon\" %}<a class=\"link\"></a>")
        .unwrap()
        .entity("src/blocks", "icon", "css", ".icon{}")
        .unwrap()
        .page("index", "<nav class=\"link ghost\"></nav>")
        .unwrap()
}

#[test]
fn test_chain_tree() {
    let project = project();

    bemforge(project.path())
        .args(["chain", "index"])
        .assert()
        .success()
        .stdout(predicate::str::contains("index"))
        .stdout(predicate::str::contains("├── ghost (implicit) missing"))
        .stdout(predicate::str::contains("├── icon (explicit)"))
        .stdout(predicate::str::contains("└── link (implicit)"));
}

#[test]
fn test_chain_json() {
    let project = project();

    let output = bemforge(project.path()).args(["chain", "index", "--format", "json"]).output().unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["template"], "index");
    let names: Vec<&str> = json["chain"].as_array().unwrap().iter().map(|e| e["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["ghost", "icon", "link"]);
    assert_eq!(json["chain"][0]["exists"], false);
}

#[test]
fn test_chain_unknown_template() {
    let project = project();

    bemforge(project.path())
        .args(["chain", "contact"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Template not found: contact"));
}

#[test]
fn test_chain_invalid_format() {
    let project = project();

    bemforge(project.path())
        .args(["chain", "index", "--format", "yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid format 'yaml'"));
}

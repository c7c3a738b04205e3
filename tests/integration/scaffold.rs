use bemforge::test_utils::ProjectFixture;
use predicates::prelude::*;

use crate::common::bemforge;

#[test]
fn test_add_creates_files_on_last_level() {
    let project = ProjectFixture::new().unwrap();

    bemforge(project.path())
        .args(["add", "header__logo", "--tech", "css,html,pug"])
        .assert()
        .success()
        .stdout(predicate::str::contains("created"))
        .stdout(predicate::str::contains("unknown technology 'pug'"));

    assert_eq!(
        project.read("src/blocks/header/__logo/header__logo.css").unwrap(),
        ".header__logo {\n\t\n}"
    );
    assert_eq!(
        project.read("src/blocks/header/__logo/header__logo.html").unwrap(),
        "{# header__logo #}\n\n"
    );
    assert!(!project.path().join("src/blocks/header/__logo/header__logo.js").exists());
}

#[test]
fn test_add_defaults_and_existing_files() {
    let project = ProjectFixture::new().unwrap().entity("src/blocks", "card", "css", ".card{}").unwrap();

    bemforge(project.path())
        .args(["add", "card"])
        .assert()
        .success()
        .stdout(predicate::str::contains("exists"));

    assert_eq!(project.read("src/blocks/card/card.css").unwrap(), ".card{}");
    assert_eq!(project.read("src/blocks/card/card.js").unwrap(), "");
    assert!(project.path().join("src/blocks/card/card.html").exists());
}

#[test]
fn test_add_uses_configured_levels() {
    let project = ProjectFixture::new().unwrap().config("levels = [\"lib\", \"site\"]\n").unwrap();

    bemforge(project.path()).args(["add", "button_size_l", "--tech", "js"]).assert().success();
    assert!(project.path().join("site/button/_size/button_size_l.js").exists());
}

#[test]
fn test_add_invalid_name() {
    let project = ProjectFixture::new().unwrap();

    bemforge(project.path())
        .args(["add", "bad name"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Invalid entity name"));
}

use bemforge::test_utils::ProjectFixture;
use predicates::prelude::*;

use crate::common::bemforge;

#[test]
fn test_build_writes_pages_bundles_and_assets() {
    let project = ProjectFixture::sample().unwrap().static_file("robots.txt", "User-agent: *").unwrap();

    bemforge(project.path())
        .arg("build")
        .assert()
        .success()
        .stdout(predicate::str::contains("Built 2 page(s)"));

    assert_eq!(
        project.read("build/index.html").unwrap(),
        "<div class=\"header\"><button class=\"button\">Go</button></div>"
    );
    assert_eq!(project.read("build/about.html").unwrap(), "<div class=\"header\"></div>");

    // header is on both pages, button only on index
    assert_eq!(project.read("build/css/common.css").unwrap(), ".header{}\n.header{color:red}\n");
    assert_eq!(project.read("build/css/index.css").unwrap(), ".button{}\n");
    assert!(!project.path().join("build/css/about.css").exists());
    assert_eq!(project.read("build/js/common.js").unwrap(), "initHeader();\n");

    assert_eq!(project.read("build/img/logo.png").unwrap(), "png");
    assert_eq!(project.read("build/robots.txt").unwrap(), "User-agent: *");
}

#[test]
fn test_build_without_splitting_uses_main_group() {
    let project = ProjectFixture::sample()
        .unwrap()
        .config("[split_chunks]\nstyle_split = false\nbehavior_split = false\n")
        .unwrap();

    bemforge(project.path()).arg("build").assert().success();

    assert_eq!(
        project.read("build/css/main.css").unwrap(),
        ".header{}\n.header{color:red}\n\n.button{}\n\n"
    );
    assert_eq!(project.read("build/js/main.js").unwrap(), "initHeader();\n\n");
    assert!(!project.path().join("build/css/common.css").exists());
}

#[test]
fn test_build_cleans_stale_output() {
    let project = ProjectFixture::sample().unwrap().file("build/stale.html", "old").unwrap();

    bemforge(project.path()).arg("build").assert().success();
    assert!(!project.path().join("build/stale.html").exists());

    let project = ProjectFixture::sample().unwrap().file("build/stale.html", "old").unwrap();
    bemforge(project.path()).args(["build", "--no-clean"]).assert().success();
    assert!(project.path().join("build/stale.html").exists());
}

#[test]
fn test_build_respects_out_dir_and_levels() {
    let project = ProjectFixture::new()
        .unwrap()
        .config("levels = [\"base\", \"theme\"]\nout_dir = \"dist\"\n")
        .unwrap()
        .entity("base", "card", "css", ".card{}")
        .unwrap()
        .entity("theme", "card", "css", ".card{border:0}")
        .unwrap()
        .asset("base", "card", "fonts", "a.woff", "base")
        .unwrap()
        .asset("theme", "card", "fonts", "a.woff", "theme")
        .unwrap()
        .page("index", "<section class=\"card\"></section>")
        .unwrap();

    bemforge(project.path()).arg("build").assert().success();

    assert_eq!(project.read("dist/css/index.css").unwrap(), ".card{}\n.card{border:0}\n");
    assert_eq!(project.read("dist/fonts/a.woff").unwrap(), "theme");
}

#[test]
fn test_missing_entities_do_not_fail_the_build() {
    let project = ProjectFixture::new()
        .unwrap()
        .page("index", "<p class=\"ghost\">{% include \"nowhere\" %}</p>")
        .unwrap();

    bemforge(project.path()).arg("build").assert().success();
    assert_eq!(project.read("build/index.html").unwrap(), "<p class=\"ghost\"></p>");
}

#[test]
fn test_template_syntax_error_fails_build() {
    let project = ProjectFixture::new().unwrap().page("index", "<p>{{ unclosed</p>").unwrap();

    bemforge(project.path())
        .arg("build")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("index"));
}

#[test]
fn test_private_macros_do_not_collide() {
    let project = ProjectFixture::new()
        .unwrap()
        .entity(
            "src/blocks",
            "menu",
            "html",
            "{% macro _row() %}menu-row{% endmacro %}{% macro menu() %}<ul>{{ self::_row() }}</ul>{% endmacro %}",
        )
        .unwrap()
        .entity(
            "src/blocks",
            "table",
            "html",
            "{% macro _row() %}table-row{% endmacro %}{% macro table() %}<table>{{ self::_row() }}</table>{% endmacro %}",
        )
        .unwrap()
        .page("index", "{{ menu::menu() }}{{ table::table() }}")
        .unwrap();

    bemforge(project.path()).arg("build").assert().success();
    assert_eq!(
        project.read("build/index.html").unwrap(),
        "<ul>menu-row</ul><table>table-row</table>"
    );
}

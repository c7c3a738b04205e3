//! File change handling, driven through the library the way a watcher would.

use bemforge::core::Technology;
use bemforge::pipeline::{BuildPipeline, ChangeEvent, OutputWriter};
use bemforge::test_utils::{ProjectFixture, init_test_logging};

struct Session {
    project: ProjectFixture,
    pipeline: BuildPipeline,
    writer: OutputWriter,
}

impl Session {
    fn start(project: ProjectFixture) -> Self {
        init_test_logging(None);
        let config = project.project_config().unwrap();
        let writer = OutputWriter::new(config.out_dir());
        let mut pipeline = BuildPipeline::new(config);
        writer.clean().unwrap();
        writer.apply(&pipeline.full_build().unwrap()).unwrap();
        Self {
            project,
            pipeline,
            writer,
        }
    }

    fn apply(&mut self, event: ChangeEvent) {
        let update = self.pipeline.handle_event(&event).unwrap();
        self.writer.apply(&update).unwrap();
    }

    fn read(&self, rel: &str) -> String {
        self.project.read(rel).unwrap()
    }

    fn exists(&self, rel: &str) -> bool {
        self.project.path().join(rel).exists()
    }
}

#[test]
fn test_new_page_moves_entity_to_common() {
    let mut session = Session::start(ProjectFixture::sample().unwrap());
    assert_eq!(session.read("build/css/index.css"), ".button{}\n");

    let path = session.project.path().join("src/templates/contact.html");
    std::fs::write(&path, "<form>{{ button::button(text=\"Send\") }}</form>").unwrap();
    session.apply(ChangeEvent::added(&path));

    assert_eq!(session.read("build/contact.html"), "<form><button class=\"button\">Send</button></form>");
    assert!(session.read("build/css/common.css").contains(".button{}"));
    // index no longer has a group of its own
    assert!(!session.exists("build/css/index.css"));

    std::fs::remove_file(&path).unwrap();
    session.apply(ChangeEvent::removed(&path));
    assert!(!session.exists("build/contact.html"));
    assert_eq!(session.read("build/css/index.css"), ".button{}\n");
}

#[test]
fn test_behavior_change_only_touches_js() {
    let mut session = Session::start(ProjectFixture::sample().unwrap());
    let css_before = session.read("build/css/common.css");

    let path = session.project.path().join("common.blocks/header/header.js");
    std::fs::write(&path, "initHeader(true);").unwrap();
    session.apply(ChangeEvent::changed(&path));

    assert_eq!(session.read("build/js/common.js"), "initHeader(true);\n");
    assert_eq!(session.read("build/css/common.css"), css_before);
}

#[test]
fn test_markup_change_pulls_in_new_dependency() {
    let mut session = Session::start(
        ProjectFixture::sample()
            .unwrap()
            .entity("common.blocks", "icon", "css", ".icon{}")
            .unwrap(),
    );
    assert!(!session.pipeline.is_entity_in_bundle("icon"));

    let path = session.project.path().join("common.blocks/button/button.html");
    std::fs::write(
        &path,
        "{% macro button(text) %}<button class=\"button\"><i class=\"icon\"></i>{{ text }}</button>{% endmacro %}",
    )
    .unwrap();
    session.apply(ChangeEvent::changed(&path));

    assert!(session.pipeline.is_entity_in_bundle("icon"));
    assert!(session.read("build/index.html").contains("<i class=\"icon\"></i>"));
    assert_eq!(session.read("build/css/index.css"), ".button{}\n.icon{}\n");
}

#[test]
fn test_override_asset_and_fallback() {
    let mut session = Session::start(ProjectFixture::sample().unwrap());
    assert_eq!(session.read("build/img/logo.png"), "png");

    let base = session.project.path().join("common.blocks/header/img/logo.png");
    std::fs::create_dir_all(base.parent().unwrap()).unwrap();
    std::fs::write(&base, "base").unwrap();
    session.apply(ChangeEvent::added(&base));
    // The project level still wins
    assert_eq!(session.read("build/img/logo.png"), "png");

    let top = session.project.path().join("src/blocks/header/img/logo.png");
    std::fs::remove_file(&top).unwrap();
    session.apply(ChangeEvent::removed(&top));
    assert_eq!(session.read("build/img/logo.png"), "base");

    std::fs::remove_file(&base).unwrap();
    session.apply(ChangeEvent::removed(&base));
    assert!(!session.exists("build/img/logo.png"));
}

#[test]
fn test_static_files_follow_changes() {
    let mut session = Session::start(ProjectFixture::sample().unwrap().static_file("robots.txt", "v1").unwrap());
    assert_eq!(session.read("build/robots.txt"), "v1");

    let path = session.project.path().join("src/templates/static/robots.txt");
    std::fs::write(&path, "v2").unwrap();
    session.apply(ChangeEvent::changed(&path));
    assert_eq!(session.read("build/robots.txt"), "v2");

    std::fs::remove_file(&path).unwrap();
    session.apply(ChangeEvent::removed(&path));
    assert!(!session.exists("build/robots.txt"));
}

#[test]
fn test_unused_entity_changes_are_ignored() {
    let mut session = Session::start(ProjectFixture::sample().unwrap());

    let path = session.project.path().join("src/blocks/footer/footer.css");
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, ".footer{}").unwrap();
    let update = session.pipeline.handle_event(&ChangeEvent::added(&path)).unwrap();

    assert!(update.is_empty());
    assert_eq!(
        session.pipeline.render_entity(Technology::Style, "footer")["footer"],
        ""
    );
}

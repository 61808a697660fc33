mod common;

use serde_json::{json, Value};
use vitae_core::{export_document, GeneratorSink, JsonFileSink};

#[test]
fn export_projects_identity_and_entries() {
    let document = common::sample_document();
    let (generated, summary) = export_document(&document).expect("export should succeed");
    let value = serde_json::to_value(&generated).expect("generator document should serialize");
    let cv = &value["cv"];

    assert_eq!(cv["name"], "Ada Example");
    assert_eq!(cv["social_networks"][0]["network"], "GitHub");
    assert!(cv.get("pronouns").is_none());

    let experience = cv["sections"]["experience"]
        .as_array()
        .expect("experience should be exported");
    assert_eq!(experience.len(), 1, "show:false entry must be excluded");
    assert_eq!(experience[0]["company"], "Now Corp");
    assert!(experience[0].get("team_size").is_none());
    assert!(cv["sections"]["education"][0].get("gpa").is_none());
    assert!(cv["sections"]["intro"][0]
        .as_str()
        .is_some_and(|text| text.starts_with("I build")));

    assert_eq!(summary.kept_entries(), 8);
    assert_eq!(summary.omitted_collections(), vec!["Awards"]);
}

#[test]
fn collections_emptied_by_visibility_are_omitted() {
    let document = common::document_with(json!({
        "projects": [{"name": "Secret", "show": false}],
        "skills": [{"label": "Languages", "details": "Rust", "show": true}]
    }));
    let (generated, summary) = export_document(&document).expect("export should succeed");
    let value = serde_json::to_value(&generated).expect("generator document should serialize");

    let sections = value["cv"]["sections"]
        .as_object()
        .expect("sections should be an object");
    assert!(!sections.contains_key("projects"));
    assert_eq!(
        sections["skills"],
        json!([{"label": "Languages", "details": "Rust"}])
    );

    let projects = summary
        .collections
        .iter()
        .find(|c| c.name == "projects")
        .expect("projects should be summarized");
    assert_eq!((projects.kept, projects.hidden), (0, 1));
}

#[test]
fn export_leaves_the_source_document_untouched() {
    let document = common::sample_document();
    let before = document.clone();
    export_document(&document).expect("export should succeed");
    assert_eq!(document, before);
}

#[test]
fn json_file_sink_writes_the_generator_document() {
    let dir = tempfile::tempdir().expect("temp dir should be created");
    let path = dir.path().join("cv.json");

    let (generated, _) =
        export_document(&common::sample_document()).expect("export should succeed");
    let mut sink = JsonFileSink::new(&path);
    sink.accept(&generated).expect("sink should write");

    let written = std::fs::read_to_string(&path).expect("export file should exist");
    assert!(written.ends_with('\n'));
    let parsed: Value = serde_json::from_str(&written).expect("export should be valid JSON");
    assert_eq!(
        parsed,
        serde_json::to_value(&generated).expect("generator document should serialize")
    );

    let keys: Vec<&str> = parsed["cv"]["sections"]
        .as_object()
        .expect("sections should be an object")
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(
        keys,
        vec![
            "intro",
            "skills",
            "experience",
            "education",
            "projects",
            "publications",
            "Open Source"
        ]
    );
}

#[test]
fn json_file_sink_reports_unwritable_path() {
    let dir = tempfile::tempdir().expect("temp dir should be created");
    let path = dir.path().join("missing").join("cv.json");

    let (generated, _) =
        export_document(&common::sample_document()).expect("export should succeed");
    let error = JsonFileSink::new(&path)
        .accept(&generated)
        .expect_err("missing parent directory should fail");
    assert!(error.to_string().contains("cv.json"));
}

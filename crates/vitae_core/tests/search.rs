mod common;

use vitae_core::{search, EntryKind, HighlightStyle, SearchOutcome};

fn hits_for(term: &str, style: &HighlightStyle) -> Vec<vitae_core::SearchHit> {
    match search(&common::sample_document(), term, style) {
        SearchOutcome::Matches { hits, .. } => hits,
        SearchOutcome::Usage(usage) => panic!("unexpected usage outcome: {usage}"),
    }
}

#[test]
fn blank_term_returns_usage() {
    let document = common::sample_document();
    for term in ["", "   "] {
        match search(&document, term, &HighlightStyle::default()) {
            SearchOutcome::Usage(usage) => assert!(usage.contains("search")),
            other => panic!("expected usage, got {other:?}"),
        }
    }
}

#[test]
fn python_matches_skills_and_experience_once_each() {
    let hits = hits_for("python", &HighlightStyle::default());
    assert_eq!(hits.len(), 2);

    assert_eq!(hits[0].category, "skills");
    assert_eq!(hits[0].kind, EntryKind::OneLine);
    assert_eq!(hits[0].title, "Languages");
    assert_eq!(hits[0].snippets[0].field, "details");
    assert_eq!(hits[0].snippets[0].snippet, "Rust, [Python], SQL");

    assert_eq!(hits[1].category, "experience");
    assert_eq!(hits[1].title, "Staff Engineer");
    assert_eq!(hits[1].snippets[0].field, "highlights[0]");
    assert_eq!(
        hits[1].snippets[0].snippet,
        "Ported the ingest pipeline from [Python] to Rust"
    );
}

#[test]
fn one_hit_per_entry_with_every_matching_field() {
    let hits = hits_for("engineer", &HighlightStyle::default());
    let now_corp = hits
        .iter()
        .find(|hit| hit.title == "Staff Engineer")
        .expect("experience entry should match");
    assert_eq!(now_corp.snippets.len(), 1);
    assert_eq!(
        hits.iter().filter(|hit| hit.title == "Staff Engineer").count(),
        1
    );
}

#[test]
fn custom_highlight_markers_are_used() {
    let style = HighlightStyle {
        open: "<<".to_string(),
        close: ">>".to_string(),
    };
    let hits = hits_for("SQL", &style);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].snippets[0].snippet, "Rust, Python, <<SQL>>");
}

#[test]
fn regex_metacharacters_match_literally() {
    let hits = hits_for("J. Parsing", &HighlightStyle::default());
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].category, "publications");
    assert!(hits_for("J.*Parsing", &HighlightStyle::default()).is_empty());
}

#[test]
fn hit_title_follows_the_classified_shape() {
    let document = common::document_with(serde_json::json!({
        "experience": [{
            "company": "Acme",
            "position": "Engineer",
            "highlights": "Led the migration",
            "team_size": 4
        }]
    }));
    let SearchOutcome::Matches { hits, .. } =
        search(&document, "migration", &HighlightStyle::default())
    else {
        panic!("expected matches");
    };
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].kind, EntryKind::Experience);
    assert_eq!(hits[0].title, "Engineer");
}

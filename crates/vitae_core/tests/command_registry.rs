mod common;

use serde_json::json;
use std::collections::BTreeSet;
use vitae_core::{CommandCategory, CommandRegistry, CommandTarget, Resolution};

#[test]
fn offered_names_are_exactly_the_names_dispatch_accepts() {
    let document = common::sample_document();
    let registry = CommandRegistry::for_document(&document);

    let offered: Vec<&str> = registry
        .list_available(&document)
        .into_iter()
        .flat_map(|spec| spec.names())
        .collect();
    for name in &offered {
        assert!(
            matches!(registry.resolve(name, &document), Resolution::Target(_)),
            "{name} is offered but does not dispatch"
        );
    }

    for spec in registry.commands() {
        for name in spec.names() {
            let dispatches = matches!(registry.resolve(name, &document), Resolution::Target(_));
            assert_eq!(dispatches, offered.contains(&name), "{name}");
        }
    }
}

#[test]
fn emptied_baseline_collection_is_unavailable_not_missing() {
    let document = common::document_with(json!({"skills": [], "intro": ["hi"]}));
    let registry = CommandRegistry::for_document(&document);

    match registry.resolve("skills", &document) {
        Resolution::Unavailable(spec) => assert_eq!(spec.name, "skills"),
        other => panic!("expected unavailable, got {other:?}"),
    }
    assert!(matches!(
        registry.resolve("experience", &document),
        Resolution::Unavailable(_)
    ));
    assert!(matches!(
        registry.resolve("definitely_not_a_command", &document),
        Resolution::NotFound { .. }
    ));
}

#[test]
fn extension_collections_are_registered_with_slug_and_label() {
    let document = common::sample_document();
    let registry = CommandRegistry::for_document(&document);

    let spec = match registry.resolve("open_source", &document) {
        Resolution::Target(spec) => spec,
        other => panic!("expected target, got {other:?}"),
    };
    assert_eq!(spec.category, CommandCategory::Extra);
    assert_eq!(spec.label, "Open Source");
    assert_eq!(
        spec.target,
        CommandTarget::Collection("Open Source".to_string())
    );

    // Empty extension collections get no command at all.
    assert!(matches!(
        registry.resolve("awards", &document),
        Resolution::NotFound { .. }
    ));
}

#[test]
fn aliases_and_case_resolve_to_the_primary_command() {
    let document = common::sample_document();
    let registry = CommandRegistry::for_document(&document);

    for verb in ["work", "JOBS", "  Experience "] {
        match registry.resolve(verb, &document) {
            Resolution::Target(spec) => assert_eq!(spec.name, "experience", "{verb}"),
            other => panic!("{verb}: expected target, got {other:?}"),
        }
    }
}

#[test]
fn colliding_extension_slug_does_not_shadow_builtin() {
    let document = common::document_with(json!({
        "Search": [{"name": "not a tool"}],
        "intro": ["hi"]
    }));
    let registry = CommandRegistry::for_document(&document);

    match registry.resolve("search", &document) {
        Resolution::Target(spec) => assert_eq!(spec.target, CommandTarget::Search),
        other => panic!("expected built-in search, got {other:?}"),
    }
}

#[test]
fn completion_and_suggestions_use_available_names() {
    let document = common::sample_document();
    let registry = CommandRegistry::for_document(&document);

    assert_eq!(registry.complete("ed", &document), vec!["edu", "education"]);
    assert_eq!(
        registry.complete("p", &document),
        vec!["papers", "projects", "publications"]
    );
    assert_eq!(registry.complete("wo", &document), vec!["work"]);

    match registry.resolve("pro", &document) {
        Resolution::NotFound { verb, suggestions } => {
            assert_eq!(verb, "pro");
            assert_eq!(suggestions, vec!["projects"]);
        }
        other => panic!("expected not found, got {other:?}"),
    }
}

#[test]
fn completion_covers_exactly_the_names_dispatch_accepts() {
    let document = common::sample_document();
    let registry = CommandRegistry::for_document(&document);

    let dispatched: BTreeSet<String> = registry
        .commands()
        .iter()
        .flat_map(|spec| spec.names())
        .filter(|name| matches!(registry.resolve(name, &document), Resolution::Target(_)))
        .map(str::to_string)
        .collect();

    let mut completed = BTreeSet::new();
    for name in &dispatched {
        for end in 1..=name.len() {
            if name.is_char_boundary(end) {
                completed.extend(registry.complete(&name[..end], &document));
            }
        }
    }
    assert_eq!(completed, dispatched);

    for alias in ["work", "papers", "whoami", "grep"] {
        assert!(dispatched.contains(alias), "{alias} should dispatch");
    }
    // Unavailable commands dispatch nowhere and are never offered.
    assert!(!dispatched.contains("side_projects"));
    assert!(registry.complete("side", &document).is_empty());
}

#[test]
fn suggestions_only_name_commands_that_dispatch() {
    let document = common::sample_document();
    let registry = CommandRegistry::for_document(&document);

    for verb in ["pa", "wo", "e", "s", "x"] {
        let Resolution::NotFound { suggestions, .. } = registry.resolve(verb, &document) else {
            panic!("{verb} should not resolve");
        };
        for suggestion in &suggestions {
            assert!(
                matches!(
                    registry.resolve(suggestion, &document),
                    Resolution::Target(_)
                ),
                "{suggestion} is suggested but does not dispatch"
            );
        }
    }

    match registry.resolve("pa", &document) {
        Resolution::NotFound { suggestions, .. } => assert_eq!(suggestions, vec!["papers"]),
        other => panic!("expected not found, got {other:?}"),
    }
}

#[test]
fn case_variant_of_a_baseline_name_is_reported_as_shadowed() {
    let document = common::document_with(json!({
        "Skills": [{"label": "Languages", "details": "Rust"}],
        "intro": ["hi"]
    }));
    let registry = CommandRegistry::for_document(&document);

    assert!(matches!(
        registry.resolve("skills", &document),
        Resolution::Unavailable(_)
    ));
    let shadowed = registry.shadowed();
    assert_eq!(shadowed.len(), 1);
    assert_eq!(shadowed[0].collection, "Skills");
    assert_eq!(shadowed[0].command, "skills");
}

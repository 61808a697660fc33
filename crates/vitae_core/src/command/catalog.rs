//! Built-in command catalog.

use crate::model::document::{
    Document, COLLECTION_EDUCATION, COLLECTION_EXPERIENCE, COLLECTION_INTRO,
    COLLECTION_PERSONAL_PROJECTS, COLLECTION_PROJECTS, COLLECTION_PUBLICATIONS,
    COLLECTION_SKILLS,
};
use std::fmt;

/// Data-availability predicate evaluated against the loaded document.
pub type AvailabilityFn = fn(&Document) -> bool;

/// Grouping used by `help` output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum CommandCategory {
    General,
    Sections,
    Tools,
    /// Auto-registered extension collections.
    Extra,
}

impl CommandCategory {
    pub fn label(self) -> &'static str {
        match self {
            Self::General => "General",
            Self::Sections => "Sections",
            Self::Tools => "Tools",
            Self::Extra => "Extra",
        }
    }
}

/// What a resolved command does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandTarget {
    Help,
    About,
    Contact,
    Timeline,
    Search,
    /// Render one collection by its source name.
    Collection(String),
}

/// One invocable command.
#[derive(Clone)]
pub struct CommandSpec {
    /// Primary verb, lowercase.
    pub name: String,
    /// Display label used by `help`.
    pub label: String,
    pub category: CommandCategory,
    pub aliases: Vec<String>,
    pub description: String,
    pub target: CommandTarget,
    /// `None` means always available.
    pub availability: Option<AvailabilityFn>,
}

impl fmt::Debug for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandSpec")
            .field("name", &self.name)
            .field("category", &self.category)
            .field("aliases", &self.aliases)
            .field("target", &self.target)
            .field("conditional", &self.availability.is_some())
            .finish()
    }
}

impl CommandSpec {
    pub fn is_available(&self, document: &Document) -> bool {
        self.availability
            .map(|predicate| predicate(document))
            .unwrap_or(true)
    }

    /// Primary name followed by aliases.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str()).chain(self.aliases.iter().map(String::as_str))
    }
}

fn builtin(
    name: &str,
    label: &str,
    category: CommandCategory,
    aliases: &[&str],
    description: &str,
    target: CommandTarget,
    availability: Option<AvailabilityFn>,
) -> CommandSpec {
    CommandSpec {
        name: name.to_string(),
        label: label.to_string(),
        category,
        aliases: aliases.iter().map(|alias| alias.to_string()).collect(),
        description: description.to_string(),
        target,
        availability,
    }
}

fn section(
    collection: &str,
    label: &str,
    aliases: &[&str],
    description: &str,
    availability: AvailabilityFn,
) -> CommandSpec {
    builtin(
        collection,
        label,
        CommandCategory::Sections,
        aliases,
        description,
        CommandTarget::Collection(collection.to_string()),
        Some(availability),
    )
}

/// Returns the fixed built-in catalog in display order.
pub fn builtin_catalog() -> Vec<CommandSpec> {
    vec![
        builtin(
            "help",
            "Help",
            CommandCategory::General,
            &["commands", "h"],
            "List available commands",
            CommandTarget::Help,
            None,
        ),
        builtin(
            "about",
            "About",
            CommandCategory::General,
            &["whoami"],
            "Name, headline and location",
            CommandTarget::About,
            None,
        ),
        builtin(
            "contact",
            "Contact",
            CommandCategory::General,
            &[],
            "Email, phone, website and profiles",
            CommandTarget::Contact,
            Some(has_contact),
        ),
        section(COLLECTION_INTRO, "Intro", &[], "Introduction", has_intro),
        section(COLLECTION_SKILLS, "Skills", &[], "Skill groups", has_skills),
        section(
            COLLECTION_EXPERIENCE,
            "Experience",
            &["work", "jobs"],
            "Employment history",
            has_experience,
        ),
        section(
            COLLECTION_EDUCATION,
            "Education",
            &["edu"],
            "Education history",
            has_education,
        ),
        section(
            COLLECTION_PROJECTS,
            "Projects",
            &[],
            "Professional projects",
            has_projects,
        ),
        section(
            COLLECTION_PERSONAL_PROJECTS,
            "Personal Projects",
            &["side_projects"],
            "Personal and side projects",
            has_personal_projects,
        ),
        section(
            COLLECTION_PUBLICATIONS,
            "Publications",
            &["papers"],
            "Papers and articles",
            has_publications,
        ),
        builtin(
            "timeline",
            "Timeline",
            CommandCategory::Tools,
            &["history"],
            "Education, work, projects and publications in date order",
            CommandTarget::Timeline,
            Some(has_timeline_sources),
        ),
        builtin(
            "search",
            "Search",
            CommandCategory::Tools,
            &["find", "grep"],
            "Search every section: search <term>",
            CommandTarget::Search,
            None,
        ),
    ]
}

fn has_contact(document: &Document) -> bool {
    document.identity.has_contact()
}

fn has_intro(document: &Document) -> bool {
    document.has_entries(COLLECTION_INTRO)
}

fn has_skills(document: &Document) -> bool {
    document.has_entries(COLLECTION_SKILLS)
}

fn has_experience(document: &Document) -> bool {
    document.has_entries(COLLECTION_EXPERIENCE)
}

fn has_education(document: &Document) -> bool {
    document.has_entries(COLLECTION_EDUCATION)
}

fn has_projects(document: &Document) -> bool {
    document.has_entries(COLLECTION_PROJECTS)
}

fn has_personal_projects(document: &Document) -> bool {
    document.has_entries(COLLECTION_PERSONAL_PROJECTS)
}

fn has_publications(document: &Document) -> bool {
    document.has_entries(COLLECTION_PUBLICATIONS)
}

fn has_timeline_sources(document: &Document) -> bool {
    [
        COLLECTION_EDUCATION,
        COLLECTION_EXPERIENCE,
        COLLECTION_PROJECTS,
        COLLECTION_PERSONAL_PROJECTS,
        COLLECTION_PUBLICATIONS,
    ]
    .iter()
    .any(|name| document.has_entries(name))
}

//! Interactive session over one loaded document.
//!
//! # Responsibility
//! - Split a command line into verb and arguments and dispatch it.
//! - Render each command into a [`RenderedBlock`] with a status.
//!
//! # Invariants
//! - Derived views (registry, timeline, search) are recomputed per call from
//!   the immutable document.
//! - "not found" and "unavailable" produce distinct statuses and messages.

use crate::command::catalog::{CommandCategory, CommandSpec, CommandTarget};
use crate::command::registry::{CommandRegistry, Resolution};
use crate::config::SessionConfig;
use crate::model::document::Document;
use crate::render::template::{collection_label, render_collection};
use crate::render::RenderedBlock;
use crate::search::scan::{search, SearchOutcome};
use crate::timeline::builder::{build_timeline, EventStatus, Timeline};
use log::info;

/// Outcome class of one executed line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputStatus {
    Ok,
    /// The command ran but needs different arguments.
    Usage,
    NotFound,
    Unavailable,
    /// Blank input; nothing to show.
    Empty,
}

impl OutputStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::Usage => "usage",
            Self::NotFound => "not_found",
            Self::Unavailable => "unavailable",
            Self::Empty => "empty",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub status: OutputStatus,
    pub block: RenderedBlock,
}

impl CommandOutput {
    fn ok(block: RenderedBlock) -> Self {
        Self {
            status: OutputStatus::Ok,
            block,
        }
    }

    fn with_status(status: OutputStatus, message: impl Into<String>) -> Self {
        Self {
            status,
            block: RenderedBlock::message(message),
        }
    }
}

/// Read-only session facade over one document snapshot.
pub struct Session {
    document: Document,
    config: SessionConfig,
}

impl Session {
    pub fn new(document: Document, config: SessionConfig) -> Self {
        Self { document, config }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Command registry for the current document.
    pub fn registry(&self) -> CommandRegistry {
        CommandRegistry::for_document(&self.document)
    }

    /// Available command names starting with `prefix`.
    pub fn complete(&self, prefix: &str) -> Vec<String> {
        self.registry().complete(prefix, &self.document)
    }

    /// Builds the timeline with the session's parser and options.
    pub fn timeline(&self) -> Timeline {
        build_timeline(
            &self.document,
            &self.config.date_parser(),
            &self.config.timeline_options(),
        )
    }

    /// Executes one command line.
    pub fn execute(&self, line: &str) -> CommandOutput {
        let mut tokens = line.split_whitespace();
        let Some(verb) = tokens.next() else {
            return CommandOutput {
                status: OutputStatus::Empty,
                block: RenderedBlock::new(),
            };
        };
        let args: Vec<&str> = tokens.collect();

        let registry = self.registry();
        let output = match registry.resolve(verb, &self.document) {
            Resolution::Target(spec) => self.run(spec, &args, &registry),
            Resolution::Unavailable(spec) => CommandOutput::with_status(
                OutputStatus::Unavailable,
                format!("{}: no data available in this document", spec.name),
            ),
            Resolution::NotFound { verb, suggestions } => {
                let mut message = format!("command not found: {verb}");
                if !suggestions.is_empty() {
                    message.push_str(&format!(" (did you mean: {}?)", suggestions.join(", ")));
                }
                message.push_str(". Type `help` for available commands.");
                CommandOutput::with_status(OutputStatus::NotFound, message)
            }
        };

        info!(
            "event=command_execute module=session status={} args={}",
            output.status.as_str(),
            args.len()
        );
        output
    }

    fn run(&self, spec: &CommandSpec, args: &[&str], registry: &CommandRegistry) -> CommandOutput {
        match &spec.target {
            CommandTarget::Help => CommandOutput::ok(self.render_help(registry)),
            CommandTarget::About => CommandOutput::ok(self.render_about()),
            CommandTarget::Contact => CommandOutput::ok(self.render_contact()),
            CommandTarget::Timeline => CommandOutput::ok(self.render_timeline()),
            CommandTarget::Search => self.render_search(&args.join(" ")),
            CommandTarget::Collection(name) => match self.document.collections.get(name) {
                Some(collection) => CommandOutput::ok(render_collection(collection)),
                None => CommandOutput::with_status(
                    OutputStatus::Unavailable,
                    format!("{}: no data available in this document", spec.name),
                ),
            },
        }
    }

    fn render_help(&self, registry: &CommandRegistry) -> RenderedBlock {
        let mut block = RenderedBlock::message("Available commands");
        let available = registry.list_available(&self.document);
        for category in [
            CommandCategory::General,
            CommandCategory::Sections,
            CommandCategory::Extra,
            CommandCategory::Tools,
        ] {
            let specs: Vec<_> = available
                .iter()
                .filter(|spec| spec.category == category)
                .collect();
            if specs.is_empty() {
                continue;
            }
            block.push_blank();
            block.push_line(category.label());
            for spec in specs {
                let aliases = if spec.aliases.is_empty() {
                    String::new()
                } else {
                    format!(" (aliases: {})", spec.aliases.join(", "))
                };
                block.push_line(format!(
                    "  {:<18} {}{}",
                    spec.name, spec.description, aliases
                ));
            }
        }

        let shadowed = registry.shadowed();
        if !shadowed.is_empty() {
            block.push_blank();
            block.push_line("Not reachable by name (try search)");
            for entry in shadowed {
                block.push_line(format!(
                    "  {:<18} verb taken by `{}`",
                    entry.collection, entry.command
                ));
            }
        }
        block
    }

    fn render_about(&self) -> RenderedBlock {
        let identity = &self.document.identity;
        let mut block = RenderedBlock::message(identity.name.clone());
        if let Some(label) = identity.label.as_deref() {
            block.push_markup("  ", label);
        }
        if let Some(location) = identity.location.as_deref() {
            block.push_markup("  ", location);
        }
        block
    }

    fn render_contact(&self) -> RenderedBlock {
        let identity = &self.document.identity;
        let mut block = RenderedBlock::message("Contact");
        block.push_blank();
        if let Some(email) = identity.email.as_deref() {
            let index = block.push_link(email, format!("mailto:{email}"));
            block.push_line(format!("  email: {email} [{index}]"));
        }
        if let Some(phone) = identity.phone.as_deref() {
            block.push_line(format!("  phone: {phone}"));
        }
        if let Some(website) = identity.website.as_deref() {
            let index = block.push_link(website, website);
            block.push_line(format!("  website: {website} [{index}]"));
        }
        for profile in &identity.social_networks {
            match profile.url.as_deref() {
                Some(url) => {
                    let index = block.push_link(profile.username.clone(), url);
                    block.push_line(format!(
                        "  {}: {} [{index}]",
                        profile.network, profile.username
                    ));
                }
                None => block.push_line(format!("  {}: {}", profile.network, profile.username)),
            }
        }
        block
    }

    fn render_timeline(&self) -> RenderedBlock {
        let timeline = self.timeline();
        let counters = timeline.counters;
        let mut block = RenderedBlock::message("Timeline");
        block.push_line(format!(
            "  {} jobs, {} education, {} projects, {} publications",
            counters.employment, counters.education, counters.projects, counters.publications
        ));
        block.push_blank();

        for event in &timeline.events {
            let period = match (event.status, event.end) {
                (EventStatus::Ongoing, _) => {
                    format!("{} \u{2013} now", event.start.format("%b %Y"))
                }
                (EventStatus::Completed, Some(end)) if end != event.start => format!(
                    "{} \u{2013} {}",
                    event.start.format("%b %Y"),
                    end.format("%b %Y")
                ),
                (EventStatus::Completed, _) => event.start.format("%b %Y").to_string(),
            };
            let subtitle = event
                .subtitle
                .as_deref()
                .map(|value| format!(", {value}"))
                .unwrap_or_default();
            block.push_markup(
                "",
                &format!(
                    "{period}  [{}] {}{subtitle}",
                    event.category.as_str(),
                    event.title
                ),
            );
        }

        if !timeline.diagnostics.is_empty() {
            block.push_blank();
            block.push_line(format!(
                "  {} date(s) could not be parsed and were placed at today:",
                timeline.diagnostics.len()
            ));
            for diagnostic in &timeline.diagnostics {
                block.push_line(format!(
                    "  - {} / {}: {}",
                    collection_label(&diagnostic.collection),
                    diagnostic.title,
                    diagnostic.message
                ));
            }
        }
        block
    }

    fn render_search(&self, term: &str) -> CommandOutput {
        match search(&self.document, term, &self.config.highlight) {
            SearchOutcome::Usage(usage) => CommandOutput::with_status(OutputStatus::Usage, usage),
            SearchOutcome::Matches { term, hits } => {
                let mut block =
                    RenderedBlock::message(format!("{} result(s) for \"{term}\"", hits.len()));
                for hit in hits {
                    block.push_blank();
                    block.push_line(format!(
                        "{} \u{203a} {}",
                        collection_label(&hit.category),
                        hit.title
                    ));
                    for snippet in hit.snippets {
                        block.push_line(format!("  {}: {}", snippet.field, snippet.snippet));
                    }
                }
                CommandOutput::ok(block)
            }
        }
    }
}

//! Command registry built from the catalog and the document.
//!
//! # Invariants
//! - `list_available` and `resolve` read the same registered list, so every
//!   offered name resolves to a target and every target name is offered.
//! - Names and aliases are unique across the registry.
//! - `complete` offers every available name and alias, so completion and
//!   dispatch accept the same words.
//! - Built-ins win over auto-discovered collections on name collisions; the
//!   losing collection is recorded in `shadowed`.

use crate::command::catalog::{builtin_catalog, CommandCategory, CommandSpec, CommandTarget};
use crate::model::document::Document;
use crate::render::template::collection_label;
use log::{debug, warn};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

const MAX_SUGGESTIONS: usize = 3;

/// Outcome of resolving one verb.
#[derive(Debug, Clone)]
pub enum Resolution<'a> {
    /// Known and available.
    Target(&'a CommandSpec),
    /// Known, but its data-availability predicate is false.
    Unavailable(&'a CommandSpec),
    /// No command or alias with that name.
    NotFound {
        verb: String,
        suggestions: Vec<String>,
    },
}

/// Registration errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    InvalidName(String),
    DuplicateName(String),
}

impl Display for RegistryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidName(value) => write!(f, "command name is invalid: `{value}`"),
            Self::DuplicateName(value) => write!(f, "command name already registered: {value}"),
        }
    }
}

impl Error for RegistryError {}

/// Ordered command list with a name/alias index.
#[derive(Debug, Default)]
pub struct CommandRegistry {
    commands: Vec<CommandSpec>,
    index: BTreeMap<String, usize>,
    shadowed: Vec<ShadowedCollection>,
}

/// Extension collection whose slug was already taken by another command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShadowedCollection {
    pub collection: String,
    pub command: String,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the registry for one document: built-ins, then every non-empty
    /// extension collection in source order.
    pub fn for_document(document: &Document) -> Self {
        let mut registry = Self::new();
        for spec in builtin_catalog() {
            if let Err(err) = registry.register(spec) {
                warn!("event=command_register module=command status=error source=builtin error={err}");
            }
        }

        for collection in &document.collections {
            if collection.is_baseline() || collection.entries.is_empty() {
                continue;
            }
            let slug = command_slug(&collection.name);
            let spec = CommandSpec {
                name: slug.clone(),
                label: collection_label(&collection.name),
                category: CommandCategory::Extra,
                aliases: Vec::new(),
                description: format!("{} entries", collection.entries.len()),
                target: CommandTarget::Collection(collection.name.clone()),
                availability: None,
            };
            match registry.register(spec) {
                Ok(()) => debug!(
                    "event=command_register module=command status=ok source=collection entries={}",
                    collection.entries.len()
                ),
                // Why: a built-in verb must keep meaning the same thing in every
                // document, so the extension loses and is reported instead.
                Err(RegistryError::DuplicateName(_)) => {
                    warn!(
                        "event=command_register module=command status=shadowed source=collection collection={:?} command={slug}",
                        collection.name
                    );
                    registry.shadowed.push(ShadowedCollection {
                        collection: collection.name.clone(),
                        command: slug,
                    });
                }
                Err(err) => warn!(
                    "event=command_register module=command status=skipped source=collection collection={:?} error={err}",
                    collection.name
                ),
            }
        }
        registry
    }

    /// Registers one command after validating its names.
    pub fn register(&mut self, spec: CommandSpec) -> Result<(), RegistryError> {
        for name in spec.names() {
            if !is_valid_command_name(name) {
                return Err(RegistryError::InvalidName(name.to_string()));
            }
            if self.index.contains_key(name) {
                return Err(RegistryError::DuplicateName(name.to_string()));
            }
        }

        let position = self.commands.len();
        for name in spec.names() {
            self.index.insert(name.to_string(), position);
        }
        self.commands.push(spec);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// All registered commands, available or not, in registration order.
    pub fn commands(&self) -> &[CommandSpec] {
        &self.commands
    }

    /// Extension collections that lost their verb to an earlier command.
    pub fn shadowed(&self) -> &[ShadowedCollection] {
        &self.shadowed
    }

    /// Commands whose availability predicate holds, in registration order.
    pub fn list_available(&self, document: &Document) -> Vec<&CommandSpec> {
        self.commands
            .iter()
            .filter(|spec| spec.is_available(document))
            .collect()
    }

    /// Resolves a verb or alias. Input is trimmed and lowercased.
    pub fn resolve(&self, verb: &str, document: &Document) -> Resolution<'_> {
        let normalized = verb.trim().to_lowercase();
        match self.index.get(normalized.as_str()) {
            Some(&position) => {
                let spec = &self.commands[position];
                if spec.is_available(document) {
                    Resolution::Target(spec)
                } else {
                    Resolution::Unavailable(spec)
                }
            }
            None => Resolution::NotFound {
                suggestions: self
                    .complete(&normalized, document)
                    .into_iter()
                    .take(MAX_SUGGESTIONS)
                    .collect(),
                verb: normalized,
            },
        }
    }

    /// Available names and aliases starting with `prefix`, sorted.
    ///
    /// An empty prefix yields nothing; `help` covers discovery.
    pub fn complete(&self, prefix: &str, document: &Document) -> Vec<String> {
        let prefix = prefix.trim().to_lowercase();
        if prefix.is_empty() {
            return Vec::new();
        }
        let mut names: Vec<String> = self
            .list_available(document)
            .into_iter()
            .flat_map(|spec| spec.names())
            .filter(|name| name.starts_with(prefix.as_str()))
            .map(str::to_string)
            .collect();
        names.sort();
        names.dedup();
        names
    }
}

/// Verb for a collection name: lowercase, separators folded to `_`.
pub fn command_slug(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for c in name.trim().chars() {
        if c.is_whitespace() || c == '-' || c == '_' {
            if !slug.is_empty() && !slug.ends_with('_') {
                slug.push('_');
            }
        } else if c.is_alphanumeric() {
            slug.extend(c.to_lowercase());
        }
    }
    slug.trim_end_matches('_').to_string()
}

fn is_valid_command_name(value: &str) -> bool {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) if first.is_alphanumeric() => {}
        _ => return false,
    }
    value
        .chars()
        .all(|c| c == '_' || (c.is_alphanumeric() && !c.is_uppercase()))
}

//! Document and collection model.
//!
//! # Responsibility
//! - Hold identity attributes and insertion-ordered collections.
//! - Decode the source `sections` map without a declared per-collection schema.
//!
//! # Invariants
//! - Collection order equals source order.
//! - Collection names are unique; duplicate keys are a load error.
//! - Raw entries are strings or objects; other JSON values are rejected.

use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use std::fmt::Formatter;

/// Free-text intro paragraphs.
pub const COLLECTION_INTRO: &str = "intro";
/// Skill groups, usually `label`/`details` pairs.
pub const COLLECTION_SKILLS: &str = "skills";
/// Employment history.
pub const COLLECTION_EXPERIENCE: &str = "experience";
/// Education history.
pub const COLLECTION_EDUCATION: &str = "education";
/// Professional projects.
pub const COLLECTION_PROJECTS: &str = "projects";
/// Personal/side projects.
pub const COLLECTION_PERSONAL_PROJECTS: &str = "personal_projects";
/// Papers and articles.
pub const COLLECTION_PUBLICATIONS: &str = "publications";

const BASELINE_COLLECTIONS: &[&str] = &[
    COLLECTION_INTRO,
    COLLECTION_SKILLS,
    COLLECTION_EXPERIENCE,
    COLLECTION_EDUCATION,
    COLLECTION_PROJECTS,
    COLLECTION_PERSONAL_PROJECTS,
    COLLECTION_PUBLICATIONS,
];

/// Returns the fixed baseline collection names in documented order.
pub fn baseline_collections() -> &'static [&'static str] {
    BASELINE_COLLECTIONS
}

/// Returns whether `name` is one of the baseline collections.
pub fn is_baseline_collection(name: &str) -> bool {
    BASELINE_COLLECTIONS.contains(&name)
}

/// Whole personal record loaded once per session/build.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(flatten)]
    pub identity: Identity,
    /// Serialized as `sections` to match the source format.
    #[serde(rename = "sections", default)]
    pub collections: Collections,
}

impl Document {
    /// Returns the entries of one collection, or an empty slice when absent.
    pub fn entries(&self, collection: &str) -> &[RawEntry] {
        self.collections
            .get(collection)
            .map(|c| c.entries.as_slice())
            .unwrap_or(&[])
    }

    /// Returns whether the named collection exists and has at least one entry.
    pub fn has_entries(&self, collection: &str) -> bool {
        !self.entries(collection).is_empty()
    }
}

/// Identity attributes of the document owner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    pub name: String,
    /// Short headline, e.g. job title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub social_networks: Vec<SocialNetwork>,
    /// Author-defined identity keys outside the canonical set.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Identity {
    /// Creates an identity with only a name set.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: None,
            location: None,
            email: None,
            phone: None,
            website: None,
            social_networks: Vec::new(),
            extra: Map::new(),
        }
    }

    /// Returns whether any contact channel is declared.
    pub fn has_contact(&self) -> bool {
        self.email.is_some()
            || self.phone.is_some()
            || self.website.is_some()
            || !self.social_networks.is_empty()
    }
}

/// One social profile reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialNetwork {
    pub network: String,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One named, ordered entry sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct Collection {
    pub name: String,
    pub entries: Vec<RawEntry>,
}

impl Collection {
    pub fn new(name: impl Into<String>, entries: Vec<RawEntry>) -> Self {
        Self {
            name: name.into(),
            entries,
        }
    }

    /// Returns whether this collection belongs to the documented baseline set.
    pub fn is_baseline(&self) -> bool {
        is_baseline_collection(self.name.as_str())
    }
}

/// Insertion-ordered collection list keyed by unique name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Collections {
    items: Vec<Collection>,
}

impl Collections {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one collection, replacing an existing one with the same name
    /// in place so order stays stable.
    pub fn insert(&mut self, collection: Collection) {
        match self.items.iter_mut().find(|c| c.name == collection.name) {
            Some(existing) => *existing = collection,
            None => self.items.push(collection),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Collection> {
        self.items.iter().find(|c| c.name == name)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Collection> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns collection names in source order.
    pub fn names(&self) -> Vec<&str> {
        self.items.iter().map(|c| c.name.as_str()).collect()
    }
}

impl FromIterator<Collection> for Collections {
    fn from_iter<T: IntoIterator<Item = Collection>>(iter: T) -> Self {
        let mut collections = Collections::new();
        for collection in iter {
            collections.insert(collection);
        }
        collections
    }
}

impl<'a> IntoIterator for &'a Collections {
    type Item = &'a Collection;
    type IntoIter = std::slice::Iter<'a, Collection>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl Serialize for Collections {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.items.len()))?;
        for collection in &self.items {
            map.serialize_entry(&collection.name, &collection.entries)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Collections {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(CollectionsVisitor)
    }
}

struct CollectionsVisitor;

impl<'de> Visitor<'de> for CollectionsVisitor {
    type Value = Collections;

    fn expecting(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("a map from collection name to an entry list")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut seen = BTreeSet::new();
        let mut items = Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some(name) = access.next_key::<String>()? {
            if !seen.insert(name.clone()) {
                return Err(de::Error::custom(format!("duplicate collection `{name}`")));
            }
            let entries = access.next_value::<Vec<RawEntry>>()?;
            items.push(Collection { name, entries });
        }
        Ok(Collections { items })
    }
}

/// Source-level entry before classification.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RawEntry {
    Text(String),
    Object(Map<String, Value>),
}

impl RawEntry {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text.as_str()),
            Self::Object(_) => None,
        }
    }

    pub fn as_object(&self) -> Option<&Map<String, Value>> {
        match self {
            Self::Text(_) => None,
            Self::Object(map) => Some(map),
        }
    }

    /// Returns one field value of an object entry.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_object().and_then(|map| map.get(key))
    }

    pub fn has(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Returns a field as text; integers are rendered as their decimal form
    /// so `"date": 2021` reads like `"date": "2021"`.
    pub fn text_field(&self, key: &str) -> Option<String> {
        match self.get(key)? {
            Value::String(value) => Some(value.clone()),
            Value::Number(value) => Some(value.to_string()),
            _ => None,
        }
    }

    /// Returns whether the entry opts out of generator export (`show: false`).
    pub fn is_hidden(&self) -> bool {
        matches!(self.get("show"), Some(Value::Bool(false)))
    }
}

impl From<&str> for RawEntry {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<Map<String, Value>> for RawEntry {
    fn from(value: Map<String, Value>) -> Self {
        Self::Object(value)
    }
}

impl<'de> Deserialize<'de> for RawEntry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::String(text) => Ok(Self::Text(text)),
            Value::Object(map) => Ok(Self::Object(map)),
            other => Err(de::Error::custom(format!(
                "entry must be a string or an object, got {}",
                json_kind(&other)
            ))),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

//! Document domain model.
//!
//! # Responsibility
//! - Define the loaded document shape: identity fields plus named collections.
//! - Define the typed entry sum type parsed from raw collection values.
//!
//! # Invariants
//! - Collections keep source order and are never mutated after load.
//! - Every raw entry is either a string or a key/value object.
//! - Extension fields on object entries survive typed parsing.

pub mod document;
pub mod entry;

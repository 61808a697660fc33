//! Shared entry taxonomy.
//!
//! # Responsibility
//! - Classify every entry into one canonical shape without a declared schema.
//! - Project entries onto the field set the external generator accepts.
//!
//! # Invariants
//! - Both the generator export and the interactive renderer classify through
//!   this module; there is no second taxonomy.
//! - Classification and projection are pure functions.

pub mod allow_list;
pub mod classifier;
pub mod projector;

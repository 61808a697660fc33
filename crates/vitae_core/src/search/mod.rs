//! Full-text search entry points.
//!
//! # Responsibility
//! - Find case-insensitive substring matches across every collection.
//! - Return one aggregated, highlighted hit per matching entry.
//!
//! Search is a linear scan per query; documents hold tens of entries per
//! collection, so no index is built.

pub mod scan;

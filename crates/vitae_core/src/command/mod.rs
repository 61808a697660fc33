//! Dynamic command surface.
//!
//! This module turns the fixed built-in catalog plus the document's
//! extension collections into one command list. Completion and dispatch
//! both read that single list.

pub mod catalog;
pub mod registry;

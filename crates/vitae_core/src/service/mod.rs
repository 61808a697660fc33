//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate registry, renderers and derived views into command-level
//!   APIs for the interactive surface.
//! - Keep CLI/UI layers decoupled from taxonomy details.

pub mod session;

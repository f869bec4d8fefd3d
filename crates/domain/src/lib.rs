//! # lumo-domain
//!
//! Pure domain model for the lumo lamp controller.
//!
//! ## Responsibilities
//! - Define [`LampState`](lamp::LampState) — the full, always-valid lamp
//!   record (power, brightness, warmth)
//! - Define [`Action`](action::Action) — one discrete, validated lamp
//!   instruction
//! - Define [`ParsedCommand`](action::ParsedCommand) — an ordered action
//!   sequence tagged with its provenance (rules vs model)
//! - Merge actions into a state in a fixed precedence order
//!   ([`LampState::apply`](lamp::LampState::apply))
//! - Contain all invariant enforcement and domain logic
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod action;
pub mod error;
pub mod lamp;
pub mod warmth;

//! # lumo-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound
//!   ports):
//!   - `CommandParser` — text in, validated actions out
//!   - `StateStore` — load/save the persisted lamp record
//!   - `LampGateway` — push a lamp state to the hardware (or a stand-in)
//! - Provide the **deterministic rules parser** (pure, no IO, so it needs
//!   no adapter crate)
//! - Provide `CommandService` — the one-line-at-a-time use case: parse with
//!   model→rules fallback, merge, persist, apply
//! - Orchestrate domain objects without knowing *how* persistence or IO
//!   works
//!
//! ## Dependency rule
//! Depends on `lumo-domain` only (plus `tokio` for timers).
//! Never imports adapter crates. Adapters depend on *this* crate, not the
//! reverse.

pub mod ports;
pub mod rules;
pub mod services;

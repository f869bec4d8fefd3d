//! Application services — the use-cases of the interactive loop.

pub mod command_service;

pub use command_service::{CommandOutcome, CommandService};

//! Command handlers.
//!
//! Handlers follow the canonical pattern:
//! - Signature: `pub async fn execute(ctx: &CliContext, ...) -> Result<...>`
//! - Thin wrappers that:
//!   1. Turn CLI input into store intents
//!   2. Let the orchestrator fetch
//!   3. Format output for the terminal
//!
//! Handlers should NOT:
//! - Call the remote client for list data (the orchestrator owns that)
//! - Contain pagination or filtering rules

pub mod browse;
pub mod list;
pub mod show;

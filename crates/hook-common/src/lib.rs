//! Common utilities for the Rolling Weft hooks.
//!
//! This crate provides shared functionality for all hook binaries:
//! - JSON input/output parsing
//! - Ordered rule tables for command classification
//! - Subprocess execution with timeouts
//! - Local port liveness probes
//! - Marker file management
//! - Debug logging

pub mod config;
pub mod debug;
pub mod input;
pub mod net;
pub mod output;
pub mod rules;
pub mod runner;
pub mod state;
pub mod subprocess;

pub use debug::{is_debug_enabled, log_decision, HookDebugLog};
pub use input::{HookInput, ToolInput, ToolOutput};
pub use output::HookOutput;
pub use rules::{Action, Rule, RuleSet};
pub use runner::{dispatch, run_hook, HookResult};
pub use state::MarkerFile;
pub use subprocess::{run_tool, CommandResult, SubprocessError};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config;
    pub use crate::debug::log_decision;
    pub use crate::input::HookInput;
    pub use crate::output::HookOutput;
    pub use crate::rules::{Action, Rule, RuleSet};
    pub use crate::runner::{run_hook, HookResult};
    pub use crate::state::MarkerFile;
    pub use crate::subprocess::{run_tool, CommandResult};
    pub use anyhow::{Context, Result};
}

//! Hook input parsing from stdin.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io::{self, Read};

/// Main hook input structure received from Claude Code.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HookInput {
    /// The name of the tool being called (e.g., "Bash")
    #[serde(default)]
    pub tool_name: String,

    /// Tool-specific input parameters
    #[serde(default)]
    pub tool_input: ToolInput,

    /// Captured output of the tool (PostToolUse only)
    #[serde(default, alias = "tool_response")]
    pub tool_output: Option<ToolOutput>,

    /// Hook event name
    #[serde(default)]
    pub hook_event_name: Option<String>,

    /// Session ID
    #[serde(default)]
    pub session_id: Option<String>,

    /// Additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

/// Tool input parameters.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToolInput {
    /// Command for Bash tool
    #[serde(default)]
    pub command: Option<String>,

    /// Additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

/// Captured tool output. Hosts send either the raw text or split streams.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ToolOutput {
    Text(String),
    Streams {
        #[serde(default)]
        stdout: Option<String>,
        #[serde(default)]
        stderr: Option<String>,
    },
}

impl ToolOutput {
    /// Stdout followed by stderr.
    pub fn combined(&self) -> String {
        match self {
            ToolOutput::Text(text) => text.clone(),
            ToolOutput::Streams { stdout, stderr } => {
                let mut out = stdout.clone().unwrap_or_default();
                out.push_str(stderr.as_deref().unwrap_or(""));
                out
            }
        }
    }
}

impl HookInput {
    /// Parse hook input from a JSON document.
    pub fn parse(raw: &str) -> anyhow::Result<Self> {
        let parsed: HookInput = serde_json::from_str(raw)?;
        Ok(parsed)
    }

    /// Read stdin to EOF and parse it.
    pub fn from_stdin() -> anyhow::Result<Self> {
        let mut input = String::new();
        io::stdin().read_to_string(&mut input)?;
        Self::parse(&input)
    }

    /// Get the shell command, or an empty string when there is none.
    pub fn command(&self) -> &str {
        self.tool_input.command.as_deref().unwrap_or("")
    }

    /// Get the captured output (stdout then stderr), empty when absent.
    pub fn combined_output(&self) -> String {
        self.tool_output
            .as_ref()
            .map(ToolOutput::combined)
            .unwrap_or_default()
    }
}

//! Hook output generation for stdout.

use serde::{Deserialize, Serialize};
use std::io::{self, Write};

/// Advisory surfaced to the assistant as a system message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HookOutput {
    pub system_message: String,
}

impl HookOutput {
    /// Create an advisory output.
    pub fn message(text: impl Into<String>) -> Self {
        Self {
            system_message: text.into(),
        }
    }

    /// Serialize to a single JSON line.
    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Write the output to stdout, newline terminated.
    pub fn write_stdout(&self) -> anyhow::Result<()> {
        self.write_to(&mut io::stdout().lock())
    }

    pub fn write_to(&self, writer: &mut impl Write) -> anyhow::Result<()> {
        writeln!(writer, "{}", self.to_json()?)?;
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_message_shape() {
        let output = HookOutput::message("Check the checklist");
        insta::assert_snapshot!(output.to_json().unwrap(), @r#"{"systemMessage":"Check the checklist"}"#);
    }

    #[test]
    fn test_multiline_message_is_escaped() {
        let mut buf = Vec::new();
        HookOutput::message("a\nb").write_to(&mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "{\"systemMessage\":\"a\\nb\"}\n");
    }
}

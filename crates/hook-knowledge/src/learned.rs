//! Extraction of `LEARNED` comments from tracker commands.
//!
//! Recognized shapes:
//!
//! ```text
//! bd comment proj-12 "LEARNED: retries need backoff"
//! bd comment proj-12 "LEARNED [http, vendorx]: retries need backoff"
//! bd comment proj-12 "LEARNED: [http, vendorx] retries need backoff"
//! ```

use crate::schema::{KnowledgeEntry, KnowledgeType};
use regex::Regex;
use std::sync::LazyLock;

const TYPE_TAG: &str = "learned";

static MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"LEARNED\s*(?:\[[^\]]*\])?\s*:").expect("valid regex"));
static BEAD_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"bd\s+comment\s+([A-Za-z0-9_.-]+)\s+").expect("valid regex"));
static QUOTED_BODY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?s)["'](.+?)["']\s*$"#).expect("valid regex"));
static CONTENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)LEARNED\s*(?:\[[^\]]*\])?\s*:\s*(?:\[[^\]]*\]\s*)?(.*)").expect("valid regex")
});
static TAG_LIST: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"LEARNED\s*:?\s*\[([^\]]+)\]").expect("valid regex"));

/// A parsed `bd comment <id> "LEARNED ..."` command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LearnedComment {
    pub bead: String,
    pub content: String,
    /// Lowercased tags in order, with `learned` appended
    pub tags: Vec<String>,
}

impl LearnedComment {
    /// Parse a shell command. Returns None unless every part is present.
    pub fn parse(command: &str) -> Option<Self> {
        if !command.contains("bd") || !command.contains("comment") || !MARKER.is_match(command) {
            return None;
        }

        let bead = BEAD_ID.captures(command)?.get(1)?.as_str().to_string();
        let body = QUOTED_BODY.captures(command)?.get(1)?.as_str();
        let content = CONTENT.captures(body)?.get(1)?.as_str().trim().to_string();
        if content.is_empty() {
            return None;
        }

        let mut tags: Vec<String> = TAG_LIST
            .captures(body)
            .and_then(|caps| caps.get(1))
            .map(|list| {
                list.as_str()
                    .split(',')
                    .map(|t| t.trim().to_lowercase())
                    .filter(|t| !t.is_empty())
                    .collect()
            })
            .unwrap_or_default();
        tags.push(TYPE_TAG.to_string());

        Some(Self {
            bead,
            content,
            tags,
        })
    }

    /// Tags other than the type tag, used as tracker labels.
    pub fn domain_tags(&self) -> impl Iterator<Item = &str> {
        self.tags
            .iter()
            .map(String::as_str)
            .filter(|t| *t != TYPE_TAG)
    }

    pub fn to_entry(&self) -> KnowledgeEntry {
        KnowledgeEntry::new(
            KnowledgeType::Learned,
            self.content.clone(),
            self.tags.clone(),
            self.bead.clone(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_learned() {
        let parsed =
            LearnedComment::parse(r#"bd comment proj-12 "LEARNED: retries need backoff""#).unwrap();
        assert_eq!(parsed.bead, "proj-12");
        assert_eq!(parsed.content, "retries need backoff");
        assert_eq!(parsed.tags, vec!["learned"]);
        assert_eq!(parsed.domain_tags().count(), 0);
    }

    #[test]
    fn test_tagged_learned() {
        let parsed =
            LearnedComment::parse(r#"bd comment proj-12 "LEARNED [A, b]: retries need backoff""#)
                .unwrap();
        assert_eq!(parsed.tags, vec!["a", "b", "learned"]);
        assert_eq!(parsed.domain_tags().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(parsed.content, "retries need backoff");
    }

    #[test]
    fn test_tags_after_colon() {
        let parsed =
            LearnedComment::parse(r#"bd comment p-1 "LEARNED: [a, b] retries need backoff""#)
                .unwrap();
        assert_eq!(parsed.tags, vec!["a", "b", "learned"]);
        assert_eq!(parsed.content, "retries need backoff");
        assert_eq!(parsed.to_entry().key, "learned-retries-need-backoff");
    }

    #[test]
    fn test_empty_tags_dropped() {
        let parsed =
            LearnedComment::parse(r#"bd comment x.1 'LEARNED [grpc, , ]: deadline is per call'"#)
                .unwrap();
        assert_eq!(parsed.bead, "x.1");
        assert_eq!(parsed.tags, vec!["grpc", "learned"]);
    }

    #[test]
    fn test_multiline_content() {
        let parsed =
            LearnedComment::parse("bd comment p-3 \"LEARNED: first line\nsecond line\"").unwrap();
        assert_eq!(parsed.content, "first line\nsecond line");
    }

    #[test]
    fn test_rejects_incomplete_commands() {
        assert!(LearnedComment::parse(r#"bd comment p-1 "FINDING: x""#).is_none());
        assert!(LearnedComment::parse(r#"bd comment p-1 "LEARNED:   ""#).is_none());
        assert!(LearnedComment::parse(r#"echo "LEARNED: x""#).is_none());
        assert!(LearnedComment::parse("bd comment p-1 LEARNED: unquoted").is_none());
        assert!(LearnedComment::parse(r#"bd comment "LEARNED: no id""#).is_none());
    }

    #[test]
    fn test_entry_from_comment() {
        let parsed =
            LearnedComment::parse(r#"bd comment proj-12 "LEARNED [Net]: Use HTTP/2 keepalive""#)
                .unwrap();
        let entry = parsed.to_entry();
        assert_eq!(entry.key, "learned-use-http-2-keepalive");
        assert_eq!(entry.bead, "proj-12");
        assert_eq!(entry.tags, vec!["net", "learned"]);
    }
}

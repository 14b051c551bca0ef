//! Knowledge entry schema, one JSON object per line of `knowledge.jsonl`.

use serde::{Deserialize, Serialize};

/// Kind of knowledge entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KnowledgeType {
    /// Gotcha recorded via a `LEARNED:` comment
    Learned,
}

impl KnowledgeType {
    pub fn as_str(self) -> &'static str {
        match self {
            KnowledgeType::Learned => "learned",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeEntry {
    /// Slug key, e.g. `learned-retries-need-backoff`
    pub key: String,

    #[serde(rename = "type")]
    pub kind: KnowledgeType,

    pub content: String,

    /// Lowercased domain tags, always ending with the type tag
    #[serde(default)]
    pub tags: Vec<String>,

    /// Creation time (epoch seconds)
    pub ts: i64,

    /// Bead the entry was recorded against
    pub bead: String,
}

impl KnowledgeEntry {
    /// Create an entry stamped with the current time.
    pub fn new(
        kind: KnowledgeType,
        content: impl Into<String>,
        tags: Vec<String>,
        bead: impl Into<String>,
    ) -> Self {
        let content = content.into();
        Self {
            key: format!("{}-{}", kind.as_str(), slugify(&content)),
            kind,
            content,
            tags,
            ts: chrono::Utc::now().timestamp(),
            bead: bead.into(),
        }
    }
}

const SLUG_SOURCE_CHARS: usize = 60;

/// Slug from the first 60 characters: lowercase, runs of anything outside
/// `[a-z0-9]` collapsed to `-`, one leading and one trailing `-` removed.
pub fn slugify(content: &str) -> String {
    let head: String = content.chars().take(SLUG_SOURCE_CHARS).collect();
    let mut slug = String::with_capacity(head.len());
    let mut in_gap = false;
    for c in head.to_lowercase().chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            slug.push(c);
            in_gap = false;
        } else if !in_gap {
            slug.push('-');
            in_gap = true;
        }
    }

    let slug = slug.strip_prefix('-').unwrap_or(&slug);
    let slug = slug.strip_suffix('-').unwrap_or(slug);
    slug.to_string()
}

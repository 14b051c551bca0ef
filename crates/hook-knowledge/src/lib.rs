//! Knowledge log for the Rolling Weft hooks.
//!
//! Provides:
//! - Knowledge entry schema
//! - `LEARNED` comment extraction
//! - JSONL storage with archive rotation

pub mod learned;
pub mod schema;
pub mod storage;

pub use learned::LearnedComment;
pub use schema::{slugify, KnowledgeEntry, KnowledgeType};
pub use storage::{KnowledgeError, KnowledgeStorage, RotationOutcome, ROTATE_BATCH, ROTATE_THRESHOLD};

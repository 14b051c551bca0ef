//! Project file materialization.
//!
//! Templates belong to the user after the first run and are never
//! overwritten. Skills and hook binaries belong to the framework and are
//! replaced on every run.

use crate::assets::{self, Asset};
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

pub const HOOKS_DEST_DIR: &str = ".hooks/scripts";
pub const SKILLS_DEST_DIR: &str = ".claude/skills";

/// What happened to one managed file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    Created,
    Kept,
    Updated,
    /// Source binary not found
    Missing,
}

fn dest_path(root: &Path, rel: &str) -> PathBuf {
    rel.split('/').fold(root.to_path_buf(), |path, part| path.join(part))
}

fn write_file(path: &Path, contents: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    fs::write(path, contents).with_context(|| format!("failed to write {}", path.display()))
}

/// Write `asset` unless something already exists at its destination.
pub fn write_if_missing(root: &Path, asset: &Asset) -> Result<FileOutcome> {
    let path = dest_path(root, asset.dest);
    if path.exists() {
        return Ok(FileOutcome::Kept);
    }
    write_file(&path, asset.contents.as_bytes())?;
    Ok(FileOutcome::Created)
}

/// Write `asset`, replacing whatever is there.
pub fn write_always(root: &Path, asset: &Asset) -> Result<FileOutcome> {
    let path = dest_path(root, asset.dest);
    write_file(&path, asset.contents.as_bytes())?;
    Ok(FileOutcome::Updated)
}

/// Step 1: copy templates that are not present yet.
pub fn copy_templates(root: &Path) -> Result<()> {
    for template in assets::TEMPLATES {
        match write_if_missing(root, template)? {
            FileOutcome::Created => println!("  +  {}  <- fill in before committing", template.dest),
            _ => println!("  .  {}  (exists, not overwritten)", template.dest),
        }
    }
    Ok(())
}

/// Step 2a: rewrite all skill definitions.
pub fn install_skills(root: &Path) -> Result<()> {
    for skill in assets::SKILLS {
        write_always(root, skill)?;
    }
    println!("  +  {}/", SKILLS_DEST_DIR);
    Ok(())
}

/// Copy one hook binary from `hooks_dir`, replacing any existing copy.
pub fn install_hook_binary(root: &Path, hooks_dir: &Path, name: &str) -> Result<FileOutcome> {
    let file_name = assets::binary_file_name(name);
    let src = hooks_dir.join(&file_name);
    if !src.is_file() {
        return Ok(FileOutcome::Missing);
    }

    let dest_dir = dest_path(root, HOOKS_DEST_DIR);
    fs::create_dir_all(&dest_dir)
        .with_context(|| format!("failed to create {}", dest_dir.display()))?;
    let dest = dest_dir.join(&file_name);
    fs::copy(&src, &dest)
        .with_context(|| format!("failed to copy {} to {}", src.display(), dest.display()))?;
    Ok(FileOutcome::Updated)
}

/// Step 2b: rewrite all hook binaries found in `hooks_dir`.
pub fn install_hooks(root: &Path, hooks_dir: &Path) -> Result<()> {
    fs::create_dir_all(dest_path(root, HOOKS_DEST_DIR))
        .with_context(|| format!("failed to create {}", HOOKS_DEST_DIR))?;

    let mut missing = Vec::new();
    for name in assets::HOOK_BINARIES {
        if install_hook_binary(root, hooks_dir, name)? == FileOutcome::Missing {
            missing.push(*name);
        }
    }
    println!("  +  {}/", HOOKS_DEST_DIR);

    if !missing.is_empty() {
        println!(
            "  !  hook binaries not found in {}: {}",
            hooks_dir.display(),
            missing.join(", ")
        );
        println!("     Build them with `cargo build --release` and pass --hooks-dir target/release");
    }
    Ok(())
}

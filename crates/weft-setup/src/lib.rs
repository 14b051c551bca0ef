//! Rolling Weft project setup.
//!
//! Idempotent: re-running on an existing project is safe.
//! - Templates → written only if the target doesn't exist
//! - Skills, hooks → always overwritten (keeps current)
//! - `.beads/` → `bd init` only if not initialized
//! - `.claude/settings.json` → `hooks` replaced, other fields kept

pub mod assets;
pub mod check;
pub mod scaffold;
pub mod settings;
pub mod tracker;

use anyhow::{Context, Result};
use settings::SettingsSource;
use std::fs;
use std::path::Path;

/// Materialize the framework into `root`.
pub fn run_setup(root: &Path, hooks_dir: &Path) -> Result<()> {
    println!("Rolling Weft setup");
    println!("  Hooks   : {}", hooks_dir.display());
    println!("  Project : {}", root.display());
    println!();

    if !root.exists() {
        fs::create_dir_all(root)
            .with_context(|| format!("failed to create {}", root.display()))?;
        println!("Created directory: {}", root.display());
        println!();
    }

    println!("[1/4] Copying templates...");
    scaffold::copy_templates(root)?;

    println!();
    println!("[2/4] Updating skills and hooks...");
    scaffold::install_skills(root)?;
    scaffold::install_hooks(root, hooks_dir)?;

    println!();
    println!("[3/4] Initializing beads...");
    tracker::init_beads(root);

    println!();
    println!("[4/4] Configuring Claude Code hooks...");
    match settings::configure_hooks(root, assets::HOOKS_CONFIG)? {
        SettingsSource::Merged => println!("  .  Merged into existing .claude/settings.json"),
        SettingsSource::Replaced => {
            println!("  !  Could not parse existing settings.json — overwritten")
        }
        SettingsSource::Created => {}
    }
    println!("  +  .claude/settings.json");

    println!();
    println!("Setup complete.");
    println!();
    println!("Next steps:");
    println!("  1. Open Claude Code and run: @skills/onboarding");
    println!("     This fills CLAUDE.md, seeds constitution.md, sketches .designs/index.md,");
    println!("     and creates your root bead — through a conversation.");
    println!("  2. git add && git commit");
    println!();
    Ok(())
}

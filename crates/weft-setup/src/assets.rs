//! Framework files compiled into the setup binary.

/// A file written into the target project.
#[derive(Debug, Clone, Copy)]
pub struct Asset {
    /// Path relative to the project root, `/`-separated
    pub dest: &'static str,
    pub contents: &'static str,
}

/// Project templates. Written only when the destination is absent.
pub const TEMPLATES: &[Asset] = &[
    Asset {
        dest: "CLAUDE.md",
        contents: include_str!("../framework/templates/CLAUDE.md.template"),
    },
    Asset {
        dest: "constitution.md",
        contents: include_str!("../framework/templates/constitution.md.template"),
    },
    Asset {
        dest: ".context/patterns.md",
        contents: include_str!("../framework/templates/patterns.md.template"),
    },
    Asset {
        dest: ".designs/index.md",
        contents: include_str!("../framework/templates/design-index.md.template"),
    },
    Asset {
        dest: ".designs/_template.md",
        contents: include_str!("../framework/templates/design-slice.md.template"),
    },
];

/// Skill definitions. Rewritten on every run.
pub const SKILLS: &[Asset] = &[
    Asset {
        dest: ".claude/skills/compound/SKILL.md",
        contents: include_str!("../framework/skills/compound/SKILL.md"),
    },
    Asset {
        dest: ".claude/skills/onboarding/SKILL.md",
        contents: include_str!("../framework/skills/onboarding/SKILL.md"),
    },
];

/// Hook registration merged into `.claude/settings.json`.
pub const HOOKS_CONFIG: &str = include_str!("../framework/hooks/hooks.json");

/// Hook binaries installed into `.hooks/scripts/`.
pub const HOOK_BINARIES: &[&str] = &[
    "session-start",
    "finalize-check",
    "pre-commit",
    "knowledge-capture",
    "record-enforcement",
    "pre-compact",
];

/// Platform file name of a hook binary.
pub fn binary_file_name(name: &str) -> String {
    format!("{}{}", name, std::env::consts::EXE_SUFFIX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hooks_config_registers_every_binary() {
        let config: serde_json::Value = serde_json::from_str(HOOKS_CONFIG).unwrap();
        assert!(config["hooks"].is_object());
        for name in HOOK_BINARIES {
            assert!(
                HOOKS_CONFIG.contains(&format!(".hooks/scripts/{}\"", name)),
                "{} not registered",
                name
            );
        }
    }

    #[test]
    fn test_assets_are_relative() {
        for asset in TEMPLATES.iter().chain(SKILLS) {
            assert!(!asset.dest.starts_with('/'));
            assert!(!asset.contents.is_empty());
        }
    }
}

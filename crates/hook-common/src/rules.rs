//! Ordered rule table for command classification.
//!
//! Each hook declares its rules as a static slice. Rules are checked in
//! order and the first one whose predicate holds decides the outcome.

use crate::input::HookInput;
use std::fmt;

/// What a matching rule does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Emit this advisory.
    Advise(&'static str),
    /// Stop evaluating and stay quiet.
    Silent,
}

/// A single predicate → action pair.
#[derive(Clone, Copy)]
pub struct Rule {
    pub name: &'static str,
    pub applies: fn(&HookInput) -> bool,
    pub action: Action,
}

impl Rule {
    pub const fn advise(
        name: &'static str,
        applies: fn(&HookInput) -> bool,
        message: &'static str,
    ) -> Self {
        Self {
            name,
            applies,
            action: Action::Advise(message),
        }
    }

    pub const fn silent(name: &'static str, applies: fn(&HookInput) -> bool) -> Self {
        Self {
            name,
            applies,
            action: Action::Silent,
        }
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name)
            .field("action", &self.action)
            .finish()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RuleSet {
    rules: &'static [Rule],
}

impl RuleSet {
    pub const fn new(rules: &'static [Rule]) -> Self {
        Self { rules }
    }

    /// First rule that applies to the input, if any.
    pub fn first_match(&self, input: &HookInput) -> Option<&'static Rule> {
        self.rules.iter().find(|rule| (rule.applies)(input))
    }

    /// Advisory text for the input, if the deciding rule advises.
    pub fn advisory(&self, input: &HookInput) -> Option<&'static str> {
        match self.first_match(input)?.action {
            Action::Advise(message) => Some(message),
            Action::Silent => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mentions_deploy(input: &HookInput) -> bool {
        input.command().contains("deploy")
    }

    fn mentions_dry_run(input: &HookInput) -> bool {
        input.command().contains("--dry-run")
    }

    static RULES: &[Rule] = &[
        Rule::silent("dry-run", mentions_dry_run),
        Rule::advise("deploy", mentions_deploy, "Deploying"),
    ];

    fn input(command: &str) -> HookInput {
        let mut input = HookInput::default();
        input.tool_input.command = Some(command.to_string());
        input
    }

    #[test]
    fn test_first_match_wins() {
        let rules = RuleSet::new(RULES);
        assert_eq!(rules.advisory(&input("make deploy")), Some("Deploying"));
        assert_eq!(rules.first_match(&input("make deploy")).unwrap().name, "deploy");
    }

    #[test]
    fn test_silent_rule_short_circuits() {
        let rules = RuleSet::new(RULES);
        assert_eq!(rules.advisory(&input("make deploy --dry-run")), None);
        assert_eq!(
            rules.first_match(&input("make deploy --dry-run")).unwrap().name,
            "dry-run"
        );
    }

    #[test]
    fn test_no_match() {
        let rules = RuleSet::new(RULES);
        assert!(rules.first_match(&input("ls")).is_none());
        assert_eq!(rules.advisory(&input("ls")), None);
    }
}

//! Destination name generation and collision handling
use std::collections::HashSet;

use crate::errors::TransferError;
use crate::utils::Prompter;

/// How destination names are derived and compared
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NamingPolicy {
    /// Replace whitespace runs in project names with a single hyphen
    pub normalize_whitespace: bool,

    /// Compare names ignoring case
    pub case_insensitive: bool,
}

impl NamingPolicy {
    /// Whitespace normalization and case-insensitive collisions
    pub const STRICT: Self = Self {
        normalize_whitespace: true,
        case_insensitive: true,
    };

    /// Names used as-is, compared exactly
    pub const LOOSE: Self = Self {
        normalize_whitespace: false,
        case_insensitive: false,
    };

    /// Key used for collision checks
    fn key(&self, name: &str) -> String {
        if self.case_insensitive {
            name.to_lowercase()
        } else {
            name.to_string()
        }
    }
}

impl Default for NamingPolicy {
    fn default() -> Self {
        Self::STRICT
    }
}

/// Names already in use at the destination: pre-existing ones plus the ones
/// claimed during this run
#[derive(Debug, Clone)]
pub struct TakenNames {
    /// Policy used to compare names
    policy: NamingPolicy,

    /// Comparison keys of every taken name
    keys: HashSet<String>,
}

impl TakenNames {
    /// Build the set from the names found at the destination
    pub fn new<I, S>(policy: NamingPolicy, existing: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keys = existing
            .into_iter()
            .map(|name| policy.key(name.as_ref()))
            .collect();
        Self { policy, keys }
    }

    /// Whether `name` collides with a taken name
    pub fn contains(&self, name: &str) -> bool {
        self.keys.contains(&self.policy.key(name))
    }

    /// Claim `name`
    pub fn insert(&mut self, name: &str) {
        self.keys.insert(self.policy.key(name));
    }
}

/// Collapse whitespace runs into single hyphens
pub fn normalize_whitespace(name: &str) -> String {
    name.split_whitespace().collect::<Vec<_>>().join("-")
}

/// Name a project would get at the destination before collision checks
pub fn base_name(
    project_name: &str,
    owner: &str,
    current_user: &str,
    policy: &NamingPolicy,
) -> String {
    let name = if policy.normalize_whitespace {
        normalize_whitespace(project_name)
    } else {
        project_name.to_string()
    };
    if owner != current_user {
        format!("{owner}-{name}")
    } else {
        name
    }
}

/// Resolve a collision-free destination name for a project.
///
/// Returns `None` when the operator answers a collision prompt with an empty
/// line, meaning the project must be skipped.
/// # Errors
/// Error if the prompt can't be answered
pub fn resolve_name(
    project_name: &str,
    owner: &str,
    current_user: &str,
    taken: &TakenNames,
    prompter: &mut dyn Prompter,
) -> Result<Option<String>, TransferError> {
    let mut candidate = base_name(project_name, owner, current_user, &taken.policy);
    while taken.contains(&candidate) {
        candidate = prompter.ask_rename(&candidate)?;
        if candidate.is_empty() {
            return Ok(None);
        }
    }
    Ok(Some(candidate))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::utils::test::ScriptedPrompter;

    #[test]
    fn own_project_is_not_prefixed() {
        let name = base_name("alpha", "alice", "alice", &NamingPolicy::STRICT);
        assert_eq!(name, "alpha");
    }

    #[test]
    fn foreign_project_is_prefixed_with_owner() {
        let name = base_name("alpha", "bob", "alice", &NamingPolicy::LOOSE);
        assert_eq!(name, "bob-alpha");
    }

    #[test]
    fn strict_policy_collapses_whitespace_before_prefixing() {
        let name = base_name("  my \t cool  project ", "bob", "alice", &NamingPolicy::STRICT);
        assert_eq!(name, "bob-my-cool-project");
        let loose = base_name("my project", "alice", "alice", &NamingPolicy::LOOSE);
        assert_eq!(loose, "my project");
    }

    #[test]
    fn free_name_needs_no_prompt() {
        let taken = TakenNames::new(NamingPolicy::STRICT, ["beta"]);
        let mut prompter = ScriptedPrompter::new(&[]);
        let name = resolve_name("alpha", "alice", "alice", &taken, &mut prompter).unwrap();
        assert_eq!(name.as_deref(), Some("alpha"));
        assert!(prompter.rename_questions.is_empty());
    }

    #[test]
    fn collision_prompts_until_free() {
        let taken = TakenNames::new(NamingPolicy::LOOSE, ["alpha", "alpha2"]);
        let mut prompter = ScriptedPrompter::new(&["alpha2", "alpha3"]);
        let name = resolve_name("alpha", "alice", "alice", &taken, &mut prompter).unwrap();
        assert_eq!(name.as_deref(), Some("alpha3"));
        assert_eq!(prompter.rename_questions, vec!["alpha", "alpha2"]);
    }

    #[test]
    fn collision_never_returns_taken_name() {
        let taken = TakenNames::new(NamingPolicy::LOOSE, ["alpha"]);
        let mut prompter = ScriptedPrompter::new(&["alpha", "alpha", "omega"]);
        let name = resolve_name("alpha", "alice", "alice", &taken, &mut prompter).unwrap();
        assert_eq!(name.as_deref(), Some("omega"));
        assert_eq!(prompter.rename_questions.len(), 3);
    }

    #[test]
    fn empty_answer_means_skip() {
        let taken = TakenNames::new(NamingPolicy::STRICT, ["alpha"]);
        let mut prompter = ScriptedPrompter::new(&[""]);
        let name = resolve_name("alpha", "alice", "alice", &taken, &mut prompter).unwrap();
        assert_eq!(name, None);
    }

    #[test]
    fn strict_collisions_ignore_case() {
        let taken = TakenNames::new(NamingPolicy::STRICT, ["Alpha"]);
        assert!(taken.contains("alpha"));
        assert!(taken.contains("ALPHA"));
        let loose = TakenNames::new(NamingPolicy::LOOSE, ["Alpha"]);
        assert!(!loose.contains("alpha"));
        assert!(loose.contains("Alpha"));
    }

    #[test]
    fn inserted_names_collide() {
        let mut taken = TakenNames::new(NamingPolicy::STRICT, Vec::<String>::new());
        taken.insert("Gamma");
        let mut prompter = ScriptedPrompter::new(&[""]);
        let name = resolve_name("gamma", "alice", "alice", &taken, &mut prompter).unwrap();
        assert_eq!(name, None);
        assert_eq!(prompter.rename_questions, vec!["gamma"]);
    }
}

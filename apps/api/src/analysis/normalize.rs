use std::collections::HashSet;

/// Canonical comparison form of a skill: surrounding whitespace trimmed, lower-cased.
/// Whitespace-only input maps to `""`, which is never a valid skill.
pub fn normalize(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// A candidate's deduplicated skills.
///
/// Membership is decided on the normalized form; the first-seen display form of each
/// skill is kept in insertion order for presentation.
#[derive(Debug, Clone, Default)]
pub struct SkillSet {
    keys: HashSet<String>,
    display: Vec<String>,
}

impl SkillSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a raw skill string. Returns `false` for blanks and for skills already
    /// present under another spelling.
    pub fn insert(&mut self, raw: &str) -> bool {
        let key = normalize(raw);
        if key.is_empty() || !self.keys.insert(key) {
            return false;
        }
        self.display.push(raw.trim().to_string());
        true
    }

    pub fn contains(&self, raw: &str) -> bool {
        self.contains_normalized(&normalize(raw))
    }

    /// Membership test for a key that is already in normalized form.
    pub fn contains_normalized(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    /// Skills as first written, in insertion order.
    pub fn display(&self) -> &[String] {
        &self.display
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for SkillSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = SkillSet::new();
        for raw in iter {
            set.insert(raw.as_ref());
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_trims_and_lowercases() {
        assert_eq!(normalize("  Python "), "python");
        assert_eq!(normalize("\tMachine Learning\n"), "machine learning");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for raw in ["  Python ", "C++", "NODE.JS", "", "   ", "Ünïcode Skill", "İstanbul"] {
            let once = normalize(raw);
            assert_eq!(normalize(&once), once, "not idempotent for {raw:?}");
        }
    }

    #[test]
    fn test_whitespace_only_normalizes_to_empty() {
        assert_eq!(normalize(" \t\n "), "");
    }

    #[test]
    fn test_insert_deduplicates_case_and_whitespace() {
        let mut set = SkillSet::new();
        assert!(set.insert("Python"));
        assert!(!set.insert("  python  "));
        assert!(!set.insert("PYTHON"));
        assert_eq!(set.len(), 1);
        assert_eq!(set.display(), &["Python".to_string()]);
    }

    #[test]
    fn test_blank_skills_are_never_inserted() {
        let set: SkillSet = ["", "   ", "Rust"].into_iter().collect();
        assert_eq!(set.len(), 1);
        assert!(!set.contains(""));
    }

    #[test]
    fn test_contains_normalizes_query() {
        let set: SkillSet = ["JavaScript"].into_iter().collect();
        assert!(set.contains("javascript"));
        assert!(set.contains("  JAVASCRIPT "));
        assert!(set.contains_normalized("javascript"));
        assert!(!set.contains_normalized("JavaScript"));
    }

    #[test]
    fn test_display_preserves_insertion_order() {
        let set: SkillSet = ["Git", "Docker", "git", "AWS"].into_iter().collect();
        assert_eq!(set.display(), &["Git", "Docker", "AWS"]);
    }
}

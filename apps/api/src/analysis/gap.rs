use crate::analysis::normalize::{normalize, SkillSet};
use crate::catalog::DomainProfile;

/// Required skills of `domain` the candidate does not have, in the domain's declared
/// order. One hash lookup per required skill.
pub fn compute_missing(candidate: &SkillSet, domain: &DomainProfile) -> Vec<String> {
    domain
        .required
        .iter()
        .filter(|skill| !candidate.contains_normalized(&normalize(skill)))
        .cloned()
        .collect()
}

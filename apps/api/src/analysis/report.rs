//! Recommendation Composer — turns (candidate skills, domain name) into a GapReport.

use serde::{Deserialize, Serialize};

use crate::analysis::gap::compute_missing;
use crate::analysis::normalize::SkillSet;
use crate::catalog::{SkillCatalog, UnknownDomain};

/// Result of comparing one candidate against one domain. Computed on demand.
///
/// `missing ⊆ required`, and `matched` is exactly `required \ missing`; all three
/// lists follow the domain's declared order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GapReport {
    pub domain: String,
    pub required: Vec<String>,
    pub matched: Vec<String>,
    pub missing: Vec<String>,
    pub courses: Vec<String>,
}

impl GapReport {
    /// Share of required skills the candidate already has, 0 – 100.
    pub fn coverage_percent(&self) -> u32 {
        if self.required.is_empty() {
            return 100;
        }
        ((self.matched.len() as f64 / self.required.len() as f64) * 100.0).round() as u32
    }
}

/// Resolves `domain_name` and assembles the report. `UnknownDomain` is the only
/// failure and is returned as the catalog produced it.
pub fn build_report(
    catalog: &SkillCatalog,
    candidate: &SkillSet,
    domain_name: &str,
) -> Result<GapReport, UnknownDomain> {
    let profile = catalog.get_domain_profile(domain_name)?;
    let missing = compute_missing(candidate, profile);
    let matched = profile
        .required
        .iter()
        .filter(|skill| candidate.contains(skill))
        .cloned()
        .collect();

    Ok(GapReport {
        domain: profile.name.clone(),
        required: profile.required.clone(),
        matched,
        missing,
        courses: profile.courses.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> SkillCatalog {
        SkillCatalog::builtin().unwrap()
    }

    #[test]
    fn test_web_development_scenario() {
        let candidate: SkillSet = ["html", "CSS", "JavaScript"].into_iter().collect();
        let report = build_report(&catalog(), &candidate, "Web Development").unwrap();

        assert_eq!(report.domain, "Web Development");
        assert_eq!(
            report.required,
            vec!["Html", "Css", "Javascript", "React", "Node", "Express", "Mongodb"]
        );
        assert_eq!(report.missing, vec!["React", "Node", "Express", "Mongodb"]);
        assert_eq!(report.matched, vec!["Html", "Css", "Javascript"]);
        assert_eq!(
            report.courses,
            vec![
                "Full Stack Web Development - Udemy",
                "React Complete Guide - Coursera",
                "Node.js Masterclass - Udacity",
            ]
        );
    }

    #[test]
    fn test_devops_with_no_skills_misses_everything() {
        let catalog = catalog();
        let report = build_report(&catalog, &SkillSet::new(), "DevOps").unwrap();
        let devops = catalog.get_domain_profile("DevOps").unwrap();
        assert_eq!(report.missing, devops.required);
        assert_eq!(
            report.missing,
            vec!["Docker", "Kubernetes", "Aws", "Git", "Python", "Linux"]
        );
        assert!(report.matched.is_empty());
        assert_eq!(report.coverage_percent(), 0);
    }

    #[test]
    fn test_unknown_domain_propagates() {
        let candidate: SkillSet = ["Python"].into_iter().collect();
        let err = build_report(&catalog(), &candidate, "Quantum Computing").unwrap_err();
        assert_eq!(err, UnknownDomain("Quantum Computing".to_string()));
    }

    #[test]
    fn test_matched_and_missing_partition_required() {
        let catalog = catalog();
        let candidate: SkillSet = ["python", "numpy", "Tensorflow", "Excel"].into_iter().collect();
        for name in catalog.domain_names() {
            let report = build_report(&catalog, &candidate, name).unwrap();
            assert_eq!(
                report.matched.len() + report.missing.len(),
                report.required.len()
            );
            assert!(report.matched.iter().all(|m| !report.missing.contains(m)));
        }
    }

    #[test]
    fn test_coverage_percent_rounds() {
        let candidate: SkillSet = ["docker", "git"].into_iter().collect();
        let report = build_report(&catalog(), &candidate, "DevOps").unwrap();
        // 2 of 6
        assert_eq!(report.coverage_percent(), 33);
    }

    #[test]
    fn test_report_serializes_field_names() {
        let report = build_report(&catalog(), &SkillSet::new(), "AI/ML").unwrap();
        let json = serde_json::to_value(&report).unwrap();
        for field in ["domain", "required", "matched", "missing", "courses"] {
            assert!(json.get(field).is_some(), "missing field {field}");
        }
    }
}

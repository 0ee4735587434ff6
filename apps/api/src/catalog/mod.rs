//! Skill Catalog: the process-wide registry of target domains.
//!
//! Each domain maps to an ordered required-skill list and an ordered course list.
//! The catalog is built once at startup (built-in TOML or `CATALOG_PATH`) and is
//! shared read-only as `Arc<SkillCatalog>` afterwards.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::analysis::normalize::normalize;

const BUILTIN_CATALOG: &str = include_str!("default_catalog.toml");

/// A named career/technology track and what it takes to be ready for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainProfile {
    pub name: String,
    /// Declared order is the presentation order of every report.
    pub required: Vec<String>,
    #[serde(default)]
    pub courses: Vec<String>,
}

/// Lookup failure. Carries the rejected name so callers can echo it back.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown domain: {0}")]
pub struct UnknownDomain(pub String);

#[derive(Debug, Error)]
pub enum CatalogLoadError {
    #[error("Invalid catalog: {0}")]
    Invalid(String),

    #[error("Catalog parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Catalog read error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(rename = "domain", default)]
    domains: Vec<DomainProfile>,
}

#[derive(Debug)]
pub struct SkillCatalog {
    domains: Vec<DomainProfile>,
    by_name: HashMap<String, usize>,
}

impl SkillCatalog {
    /// Builds a catalog from already-parsed profiles, rejecting anything that would
    /// make reports ambiguous (duplicate domains, duplicate or blank skills).
    pub fn new(domains: Vec<DomainProfile>) -> Result<Self, CatalogLoadError> {
        if domains.is_empty() {
            return Err(CatalogLoadError::Invalid(
                "catalog must declare at least one domain".to_string(),
            ));
        }

        let mut by_name = HashMap::with_capacity(domains.len());
        for (idx, domain) in domains.iter().enumerate() {
            if domain.name.trim().is_empty() {
                return Err(CatalogLoadError::Invalid(format!(
                    "domain #{} has an empty name",
                    idx + 1
                )));
            }
            if by_name.insert(domain.name.clone(), idx).is_some() {
                return Err(CatalogLoadError::Invalid(format!(
                    "domain '{}' is declared more than once",
                    domain.name
                )));
            }
            validate_required(domain)?;
        }

        Ok(Self { domains, by_name })
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, CatalogLoadError> {
        let file: CatalogFile = toml::from_str(raw)?;
        Self::new(file.domains)
    }

    pub fn from_path(path: &Path) -> Result<Self, CatalogLoadError> {
        let raw = std::fs::read_to_string(path)?;
        let catalog = Self::from_toml_str(&raw)?;
        info!(
            "Loaded skill catalog from {} ({} domains)",
            path.display(),
            catalog.len()
        );
        Ok(catalog)
    }

    /// The catalog compiled into the binary.
    pub fn builtin() -> Result<Self, CatalogLoadError> {
        Self::from_toml_str(BUILTIN_CATALOG)
    }

    /// Exact-name lookup. An unrecognized name is an error, never an empty profile.
    pub fn get_domain_profile(&self, domain_name: &str) -> Result<&DomainProfile, UnknownDomain> {
        self.by_name
            .get(domain_name)
            .map(|&idx| &self.domains[idx])
            .ok_or_else(|| UnknownDomain(domain_name.to_string()))
    }

    /// Domain names in declared order.
    pub fn domain_names(&self) -> impl Iterator<Item = &str> {
        self.domains.iter().map(|d| d.name.as_str())
    }

    pub fn domains(&self) -> &[DomainProfile] {
        &self.domains
    }

    pub fn len(&self) -> usize {
        self.domains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }
}

fn validate_required(domain: &DomainProfile) -> Result<(), CatalogLoadError> {
    let mut seen = HashSet::with_capacity(domain.required.len());
    for skill in &domain.required {
        let key = normalize(skill);
        if key.is_empty() {
            return Err(CatalogLoadError::Invalid(format!(
                "domain '{}' lists a blank required skill",
                domain.name
            )));
        }
        if !seen.insert(key) {
            return Err(CatalogLoadError::Invalid(format!(
                "domain '{}' lists required skill '{}' more than once",
                domain.name,
                skill.trim()
            )));
        }
    }
    Ok(())
}

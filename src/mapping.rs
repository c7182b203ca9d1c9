/// Domain mappings: one source hostname redirecting to one or more targets

use crate::error::ValidationError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::LazyLock;
use url::Host;

static HOSTNAME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z0-9_]([a-z0-9_-]{0,61}[a-z0-9_])?(\.[a-z0-9_]([a-z0-9_-]{0,61}[a-z0-9_])?)*$")
        .expect("hostname regex is valid")
});

/// Association from one source hostname to its redirect targets.
///
/// Persisted with the camelCase field names used by the extension storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainMapping {
    pub source_domain: String,
    pub target_domains: Vec<String>,
}

impl DomainMapping {
    pub fn new(source_domain: impl Into<String>, target_domains: Vec<String>) -> DomainMapping {
        DomainMapping {
            source_domain: source_domain.into(),
            target_domains,
        }
    }

    /// Build a mapping from raw form input.
    ///
    /// Inputs are trimmed, lowercased and converted to punycode. Blank
    /// targets are dropped and duplicates collapse to their first occurrence.
    /// At least one target must survive, and every name must look like a
    /// hostname.
    pub fn from_input(source: &str, targets: &[String]) -> Result<DomainMapping, ValidationError> {
        let source_domain = normalize_host(source);
        if source_domain.is_empty() {
            return Err(ValidationError::EmptySource);
        }
        if !is_valid_hostname(&source_domain) {
            return Err(ValidationError::InvalidHostname(source_domain));
        }

        let target_domains = normalize_targets(targets.iter().map(String::as_str));
        if target_domains.is_empty() {
            return Err(ValidationError::NoTargets);
        }

        for target in &target_domains {
            if !is_valid_hostname(target) {
                return Err(ValidationError::InvalidHostname(target.clone()));
            }
            if *target == source_domain {
                return Err(ValidationError::TargetIsSource(target.clone()));
            }
        }

        Ok(DomainMapping {
            source_domain,
            target_domains,
        })
    }

    /// Same mapping with the write-time invariants applied
    pub fn normalized(&self) -> DomainMapping {
        DomainMapping {
            source_domain: normalize_host(&self.source_domain),
            target_domains: normalize_targets(self.target_domains.iter().map(String::as_str)),
        }
    }

    /// Union `other` into this mapping's targets, keeping existing order first
    pub fn merge_targets(&mut self, other: &[String]) {
        let merged = normalize_targets(
            self.target_domains
                .iter()
                .chain(other.iter())
                .map(String::as_str),
        );
        self.target_domains = merged;
    }
}

/// Trimmed, lowercased, and in ASCII (punycode) form for internationalized names
pub fn normalize_host(host: &str) -> String {
    let host = host.trim().to_lowercase();
    if host.is_ascii() {
        return host;
    }

    match Host::parse(&host) {
        Ok(Host::Domain(ascii)) => ascii,
        _ => host,
    }
}

/// Trim, lowercase, drop blanks and remove duplicates (first occurrence wins)
fn normalize_targets<'a>(targets: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    targets
        .map(normalize_host)
        .filter(|t| !t.is_empty())
        .filter(|t| seen.insert(t.clone()))
        .collect()
}

pub fn is_valid_hostname(host: &str) -> bool {
    host.len() <= 253 && HOSTNAME_REGEX.is_match(host)
}

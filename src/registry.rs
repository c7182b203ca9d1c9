/// The mapping registry: the ordered collection persisted under one storage key

use crate::config;
use crate::mapping::{DomainMapping, normalize_host};
use serde::{Deserialize, Serialize};

/// Root storage structure. Serializes as a bare array of mappings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MappingRegistry {
    pub mappings: Vec<DomainMapping>,
}

/// What an upsert did to the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upserted {
    Added,
    Merged,
}

impl MappingRegistry {
    pub fn new() -> Self {
        MappingRegistry {
            mappings: Vec::new(),
        }
    }

    /// The registry written on first run
    pub fn with_defaults() -> Self {
        MappingRegistry {
            mappings: config::default_mappings(),
        }
    }

    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DomainMapping> {
        self.mappings.iter()
    }

    /// Look up a mapping; `source_domain` is normalized like stored sources
    pub fn get(&self, source_domain: &str) -> Option<&DomainMapping> {
        self.position(source_domain).map(|index| &self.mappings[index])
    }

    fn position(&self, source_domain: &str) -> Option<usize> {
        let source_domain = normalize_host(source_domain);
        self.mappings
            .iter()
            .position(|m| m.source_domain == source_domain)
    }

    /// Merge into the entry with the same source, or append a new one
    pub fn upsert(&mut self, mapping: DomainMapping) -> Upserted {
        let mapping = mapping.normalized();
        match self.position(&mapping.source_domain) {
            Some(index) => {
                self.mappings[index].merge_targets(&mapping.target_domains);
                Upserted::Merged
            }
            None => {
                self.mappings.push(mapping);
                Upserted::Added
            }
        }
    }

    pub fn remove(&mut self, source_domain: &str) -> bool {
        let source_domain = normalize_host(source_domain);
        let original_len = self.mappings.len();
        self.mappings.retain(|m| m.source_domain != source_domain);
        self.mappings.len() < original_len
    }

    /// Overwrite the entry at `index` (edit mode).
    ///
    /// If the new source belongs to a different entry, the targets are merged
    /// into that entry and the edited one is dropped, keeping sources unique.
    pub fn replace_at(&mut self, index: usize, mapping: DomainMapping) -> bool {
        if index >= self.mappings.len() {
            return false;
        }

        let mapping = mapping.normalized();
        match self.position(&mapping.source_domain) {
            Some(existing) if existing != index => {
                self.mappings[existing].merge_targets(&mapping.target_domains);
                self.mappings.remove(index);
            }
            _ => self.mappings[index] = mapping,
        }
        true
    }

    /// Mappings for `current_host` first, everything else in registry order
    ///
    /// Each mapping is paired with its position in the registry, which is what
    /// `replace_at` expects.
    pub fn ordered_for_host(&self, current_host: Option<&str>) -> Vec<(usize, &DomainMapping)> {
        let mut ordered: Vec<(usize, &DomainMapping)> = self.mappings.iter().enumerate().collect();
        if let Some(host) = current_host {
            ordered.sort_by_key(|(_, m)| !m.source_domain.eq_ignore_ascii_case(host));
        }
        ordered
    }

    /// Number of menu entries this registry produces
    pub fn target_count(&self) -> usize {
        self.mappings.iter().map(|m| m.target_domains.len()).sum()
    }
}

impl Default for MappingRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Vec<DomainMapping>> for MappingRegistry {
    fn from(mappings: Vec<DomainMapping>) -> Self {
        MappingRegistry { mappings }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapping(source: &str, targets: &[&str]) -> DomainMapping {
        DomainMapping::new(source, targets.iter().map(|t| t.to_string()).collect())
    }

    fn sample_registry() -> MappingRegistry {
        MappingRegistry::from(vec![
            mapping("github.com", &["deepwiki.com", "github.dev"]),
            mapping("youtube.com", &["yewtu.be"]),
        ])
    }

    #[test]
    fn test_registry_new() {
        let registry = MappingRegistry::new();
        assert!(registry.is_empty());
    }

    #[test]
    fn test_upsert_new_source_appends() {
        let mut registry = sample_registry();
        let added = mapping("reddit.com", &["old.reddit.com"]);

        let outcome = registry.upsert(added.clone());

        assert_eq!(outcome, Upserted::Added);
        assert_eq!(registry.len(), 3);
        assert_eq!(registry.mappings[2], added);
    }

    #[test]
    fn test_upsert_existing_source_unions_targets() {
        let mut registry = sample_registry();

        let outcome = registry.upsert(mapping("github.com", &["github.dev", "gitingest.com"]));

        assert_eq!(outcome, Upserted::Merged);
        assert_eq!(registry.len(), 2);
        assert_eq!(
            registry.get("github.com").unwrap().target_domains,
            vec!["deepwiki.com", "github.dev", "gitingest.com"]
        );
    }

    #[test]
    fn test_remove() {
        let mut registry = sample_registry();

        let removed = registry.remove("github.com");

        assert!(removed);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.mappings[0].source_domain, "youtube.com");
    }

    #[test]
    fn test_remove_nonexistent() {
        let mut registry = sample_registry();

        let removed = registry.remove("gitlab.com");

        assert!(!removed);
        assert_eq!(registry, sample_registry());
    }

    #[test]
    fn test_lookup_and_remove_use_written_form() {
        let mut registry = MappingRegistry::new();
        registry.upsert(mapping(" GitHub.com", &["deepwiki.com"]));

        assert!(registry.get("GITHUB.COM ").is_some());
        assert!(registry.remove(" GitHub.com"));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_replace_at() {
        let mut registry = sample_registry();

        let replaced = registry.replace_at(1, mapping("youtube.com", &["invidious.io"]));

        assert!(replaced);
        assert_eq!(registry.mappings[1].target_domains, vec!["invidious.io"]);
    }

    #[test]
    fn test_replace_at_renamed_source_collides() {
        let mut registry = sample_registry();

        registry.replace_at(1, mapping("github.com", &["gitingest.com"]));

        assert_eq!(registry.len(), 1);
        assert_eq!(
            registry.mappings[0].target_domains,
            vec!["deepwiki.com", "github.dev", "gitingest.com"]
        );
    }

    #[test]
    fn test_replace_at_out_of_range() {
        let mut registry = sample_registry();

        assert!(!registry.replace_at(5, mapping("gitlab.com", &["x.com"])));
        assert_eq!(registry, sample_registry());
    }

    #[test]
    fn test_ordered_for_host() {
        let registry = MappingRegistry::from(vec![
            mapping("github.com", &["deepwiki.com"]),
            mapping("reddit.com", &["old.reddit.com"]),
            mapping("youtube.com", &["yewtu.be"]),
        ]);

        let ordered = registry.ordered_for_host(Some("youtube.com"));
        let sources: Vec<(usize, &str)> = ordered
            .iter()
            .map(|(i, m)| (*i, m.source_domain.as_str()))
            .collect();

        assert_eq!(sources, vec![(2, "youtube.com"), (0, "github.com"), (1, "reddit.com")]);

        let unordered: Vec<usize> = registry.ordered_for_host(None).iter().map(|(i, _)| *i).collect();
        assert_eq!(unordered, vec![0, 1, 2]);
    }

    #[test]
    fn test_target_count() {
        assert_eq!(sample_registry().target_count(), 3);
    }

    #[test]
    fn test_serialization_is_bare_array() {
        let registry = MappingRegistry::from(vec![mapping("github.com", &["deepwiki.com"])]);

        let json = serde_json::to_string(&registry).unwrap();
        let deserialized: MappingRegistry = serde_json::from_str(&json).unwrap();

        assert_eq!(json, r#"[{"sourceDomain":"github.com","targetDomains":["deepwiki.com"]}]"#);
        assert_eq!(deserialized, registry);
    }
}

/// Fixed settings for the extension

use crate::mapping::DomainMapping;

/// chrome.storage.local key holding the registry
pub const STORAGE_KEY: &str = "domainMappings";

/// Contexts in which the redirect entries appear
pub const MENU_CONTEXTS: &[&str] = &["page", "link"];

/// Registry written on first run
pub fn default_mappings() -> Vec<DomainMapping> {
    vec![DomainMapping::new(
        "github.com",
        vec!["deepwiki.com".to_string(), "github.dev".to_string()],
    )]
}

pub fn menu_title(target_domain: &str) -> String {
    format!("Open in {}", target_domain)
}

/// Match pattern limiting an entry to pages on the source domain or its subdomains
pub fn document_url_pattern(source_domain: &str) -> String {
    format!("*://*.{}/*", source_domain)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_mappings() {
        let defaults = default_mappings();

        assert_eq!(defaults.len(), 1);
        assert_eq!(defaults[0].source_domain, "github.com");
        assert_eq!(defaults[0].target_domains, vec!["deepwiki.com", "github.dev"]);
    }

    #[test]
    fn test_document_url_pattern() {
        assert_eq!(document_url_pattern("github.com"), "*://*.github.com/*");
    }

    #[test]
    fn test_menu_title() {
        assert_eq!(menu_title("deepwiki.com"), "Open in deepwiki.com");
    }
}

/// Hostname rewriting for redirect targets

use url::Url;

/// Swap the host of `page_url` from `source_domain` to `target_domain`.
///
/// Returns `None` when the URL does not parse, its host is not exactly
/// `source_domain` (compared case-insensitively), or the target is not an
/// acceptable host. Scheme, port, path, query and fragment are preserved.
///
/// Examples:
/// - `https://github.com/a/b?x=1#y` with github.com → deepwiki.com
///   gives `https://deepwiki.com/a/b?x=1#y`
/// - `https://gist.github.com/a` with github.com gives `None`
pub fn rewrite(page_url: &str, source_domain: &str, target_domain: &str) -> Option<String> {
    let mut url = Url::parse(page_url).ok()?;

    let host = url.host_str()?;
    if !host.eq_ignore_ascii_case(source_domain) {
        return None;
    }

    url.set_host(Some(target_domain)).ok()?;
    Some(url.to_string())
}

/// Hostname of a URL, if it has one
pub fn host_of(page_url: &str) -> Option<String> {
    Url::parse(page_url)
        .ok()
        .and_then(|url| url.host_str().map(str::to_string))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rewrite_preserves_path_query_fragment() {
        assert_eq!(
            rewrite("https://github.com/a/b?x=1#y", "github.com", "deepwiki.com"),
            Some("https://deepwiki.com/a/b?x=1#y".to_string())
        );
    }

    #[test]
    fn test_rewrite_host_mismatch() {
        assert_eq!(rewrite("https://example.com/a", "github.com", "deepwiki.com"), None);
    }

    #[test]
    fn test_rewrite_subdomain_is_not_source() {
        assert_eq!(rewrite("https://gist.github.com/a", "github.com", "deepwiki.com"), None);
    }

    #[test]
    fn test_rewrite_keeps_scheme_and_port() {
        assert_eq!(
            rewrite("http://github.com:8080/rust-lang/rust", "github.com", "github.dev"),
            Some("http://github.dev:8080/rust-lang/rust".to_string())
        );
    }

    #[test]
    fn test_rewrite_source_case_insensitive() {
        assert_eq!(
            rewrite("https://GitHub.com/x", "github.com", "deepwiki.com"),
            Some("https://deepwiki.com/x".to_string())
        );
    }

    #[test]
    fn test_rewrite_malformed_url() {
        assert_eq!(rewrite("not a url", "github.com", "deepwiki.com"), None);
        assert_eq!(rewrite("", "github.com", "deepwiki.com"), None);
    }

    #[test]
    fn test_rewrite_invalid_target() {
        assert_eq!(rewrite("https://github.com/a", "github.com", "bad host"), None);
    }

    #[test]
    fn test_rewrite_does_not_touch_input() {
        let page = String::from("https://github.com/a");
        let _ = rewrite(&page, "github.com", "deepwiki.com");
        assert_eq!(page, "https://github.com/a");
    }

    #[test]
    fn test_host_of() {
        assert_eq!(host_of("https://github.com/rust"), Some("github.com".to_string()));
        assert_eq!(host_of("about:blank"), None);
        assert_eq!(host_of("garbage"), None);
    }
}

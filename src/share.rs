use regex::Regex;
use url::Url;

use crate::error::Error;

// A resolved public share: where the Nextcloud lives, which share we are
// looking at, and the subfolder inside it (empty string = share root).
// The subfolder comes from the caller, never from the URL.
#[derive(Debug, Clone)]
pub struct ShareReference {
    pub base_url: String,
    pub token: String,
    pub path: String,
}

impl ShareReference {
    pub fn new(base_url: String, token: String, path: String) -> Self {
        Self { base_url, token, path }
    }

    /// The share's landing page, the thing a browser would open.
    pub fn share_page_url(&self) -> String {
        format!("{}/s/{}", self.base_url, self.token)
    }

    /// Older Nextcloud installs only answer on the index.php route.
    pub fn fallback_page_url(&self) -> String {
        format!("{}/index.php/s/{}", self.base_url, self.token)
    }
}

/// Resolve a share URL into a `ShareReference` with an empty subfolder.
pub fn resolve(share_url: &str) -> Result<ShareReference, Error> {
    let base_url = base_url_of(share_url)?;
    let token = extract_token(share_url).ok_or(Error::TokenNotFound)?;
    Ok(ShareReference::new(base_url, token, String::new()))
}

// Extract the share token. Three URL shapes are seen in the wild, tried in
// order; the first match wins.
pub fn extract_token(share_url: &str) -> Option<String> {
    // Shape 1: /s/TOKEN
    let s_pattern = Regex::new(r"/s/([a-zA-Z0-9]+)").unwrap();
    if let Some(caps) = s_pattern.captures(share_url) {
        return Some(caps[1].to_string());
    }

    // Shape 2: ?token=TOKEN
    if let Ok(parsed) = Url::parse(share_url) {
        if let Some((_, value)) = parsed.query_pairs().find(|(key, _)| key == "token") {
            if !value.is_empty() {
                return Some(value.to_string());
            }
        }
    }

    // Shape 3: /index.php/s/TOKEN
    let index_pattern = Regex::new(r"/index\.php/s/([a-zA-Z0-9]+)").unwrap();
    if let Some(caps) = index_pattern.captures(share_url) {
        return Some(caps[1].to_string());
    }

    None
}

/// Scheme and host (with port, if any) of a URL; path, query and fragment
/// are dropped.
pub fn base_url_of(share_url: &str) -> Result<String, Error> {
    let parsed = Url::parse(share_url)?;
    let host = parsed.host_str().ok_or(url::ParseError::EmptyHost)?;

    let base = match parsed.port() {
        Some(port) => format!("{}://{}:{}", parsed.scheme(), host, port),
        None => format!("{}://{}", parsed.scheme(), host),
    };
    Ok(base)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_from_s_segment() {
        let reference = resolve("https://cloud.ex.com/s/AbC123").unwrap();
        assert_eq!(reference.token, "AbC123");
        assert_eq!(reference.base_url, "https://cloud.ex.com");
    }

    #[test]
    fn token_from_index_php_segment() {
        let reference = resolve("https://cloud.ex.com/index.php/s/Xyz9").unwrap();
        assert_eq!(reference.token, "Xyz9");
    }

    #[test]
    fn token_from_query_parameter() {
        let reference = resolve("https://cloud.ex.com/apps/files?token=Q1W2").unwrap();
        assert_eq!(reference.token, "Q1W2");
    }

    #[test]
    fn missing_token_is_an_error() {
        let result = resolve("https://cloud.ex.com/apps/files");
        assert!(matches!(result, Err(Error::TokenNotFound)));
    }

    #[test]
    fn base_url_keeps_explicit_port() {
        let base = base_url_of("https://cloud.ex.com:8443/s/AbC123").unwrap();
        assert_eq!(base, "https://cloud.ex.com:8443");
    }

    #[test]
    fn garbage_url_is_invalid() {
        assert!(matches!(resolve("not a url"), Err(Error::InvalidUrl(_))));
    }

    #[test]
    fn page_urls_compose_from_parts() {
        let reference =
            ShareReference::new("https://c.com".into(), "T1".into(), String::new());
        assert_eq!(reference.share_page_url(), "https://c.com/s/T1");
        assert_eq!(reference.fallback_page_url(), "https://c.com/index.php/s/T1");
    }
}

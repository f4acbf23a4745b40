//! URL helpers for frontend-backend communication.

/// Join the configured base URL and an endpoint path.
///
/// An empty base keeps the path relative, i.e. same origin as the page.
///
/// # Example
/// ```rust,ignore
/// let url = api_url("http://127.0.0.1:5000/", "/run_query");
/// assert_eq!(url, "http://127.0.0.1:5000/run_query");
/// ```
pub fn api_url(base_url: &str, path: &str) -> String {
    let base = base_url.trim_end_matches('/');
    if path.starts_with('/') {
        format!("{}{}", base, path)
    } else {
        format!("{}/{}", base, path)
    }
}

/// Percent-encode a single path segment or query value.
pub fn encode_segment(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_url() {
        assert_eq!(api_url("", "/run_query"), "/run_query");
        assert_eq!(api_url("http://h:5000", "/run_query"), "http://h:5000/run_query");
        assert_eq!(api_url("http://h:5000/", "save_results"), "http://h:5000/save_results");
    }

    #[test]
    fn test_encode_segment() {
        assert_eq!(encode_segment("a b/c.pkl"), "a%20b%2Fc.pkl");
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FirebaseUrl(String);

impl AsRef<str> for FirebaseUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FirebaseUrl {
    pub fn new(base: impl Into<String>) -> Self {
        Self(base.into())
    }

    /// Append the given path to the URL.
    pub fn append_path(&self, path: &str) -> Self {
        let trimmed_url = self.0.trim_end_matches('/');
        let trimmed_path = path.trim_start_matches('/');
        Self(format!("{}/{}", trimmed_url, trimmed_path))
    }

    /// Append a path segment, percent-encoding it first.
    pub fn append_segment(&self, segment: &str) -> Self {
        self.append_path(&urlencoding::encode(segment))
    }

    /// Append a raw suffix such as `:runAggregationQuery` without a separator.
    pub fn append_suffix(&self, suffix: &str) -> Self {
        Self(format!("{}{}", self.0.trim_end_matches('/'), suffix))
    }

    pub fn with_api_key(&self, api_key: &str) -> Self {
        self.with_query("key", api_key)
    }

    pub fn with_query(&self, name: &str, value: &str) -> Self {
        let separator = if self.0.contains('?') { '&' } else { '?' };
        Self(format!(
            "{}{}{}={}",
            self.0,
            separator,
            name,
            urlencoding::encode(value)
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_path_normalizes_slashes() {
        let url = FirebaseUrl::new("https://example.com/v1/").append_path("/accounts");
        assert_eq!(url.as_ref(), "https://example.com/v1/accounts");
    }

    #[test]
    fn api_key_goes_after_rpc_suffix() {
        let url = FirebaseUrl::new("https://identitytoolkit.googleapis.com/v1")
            .append_path("accounts")
            .append_suffix(":signUp")
            .with_api_key("abc 123");
        assert_eq!(
            url.as_ref(),
            "https://identitytoolkit.googleapis.com/v1/accounts:signUp?key=abc%20123"
        );
    }

    #[test]
    fn second_query_parameter_uses_ampersand() {
        let url = FirebaseUrl::new("http://localhost/doc")
            .with_query("a", "1")
            .with_query("b", "2");
        assert_eq!(url.as_ref(), "http://localhost/doc?a=1&b=2");
    }

    #[test]
    fn segments_are_percent_encoded() {
        let url = FirebaseUrl::new("http://localhost/users").append_segment("a/b");
        assert_eq!(url.as_ref(), "http://localhost/users/a%2Fb");
    }
}

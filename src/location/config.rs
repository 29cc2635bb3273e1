//! Resolver configuration.

/// Default provider endpoint; the address is appended to it.
pub const DEFAULT_ENDPOINT: &str = "http://ip-api.com/json/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverConfig {
    pub endpoint: String,
    /// Sent as `User-Agent` when set; otherwise the HTTP client's default is used.
    pub user_agent: Option<String>,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            user_agent: None,
        }
    }
}

impl ResolverConfig {
    /// Replace the endpoint, normalizing it to end with `/`.
    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        let mut endpoint = endpoint.trim().to_string();
        if !endpoint.ends_with('/') {
            endpoint.push('/');
        }
        self.endpoint = endpoint;
        self
    }

    pub fn with_user_agent(mut self, user_agent: &str) -> Self {
        self.user_agent = Some(user_agent.to_string());
        self
    }

    pub fn url_for(&self, ip: &str) -> String {
        format!("{}{}", self.endpoint, ip)
    }
}

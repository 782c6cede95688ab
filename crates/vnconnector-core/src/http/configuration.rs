/// Configuration for one remote service.
#[derive(Debug, Clone)]
pub struct Configuration {
    /// Base URL of the service (e.g. "<https://sso.vnlin.com>").
    pub base_path: String,
    /// HTTP client with middleware support.
    pub client: reqwest_middleware::ClientWithMiddleware,
}

impl Configuration {
    /// The same service configuration pointed at another base URL.
    pub fn with_base_path(&self, base_path: impl Into<String>) -> Self {
        Self {
            base_path: base_path.into(),
            client: self.client.clone(),
        }
    }

    /// Absolute URL of `path` on this service. `path` must start with a `/`.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_path.trim_end_matches('/'), path)
    }
}

//! Endpoint candidates for logical API resources.

use std::fmt;

/// One `{base_url, resource_path}` option for reaching a logical resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EndpointCandidate {
    base_url: String,
    resource_path: String,
}

impl EndpointCandidate {
    #[must_use]
    pub fn new(base_url: impl Into<String>, resource_path: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let resource_path = resource_path.into();
        let resource_path = if resource_path.starts_with('/') || resource_path.is_empty() {
            resource_path
        } else {
            format!("/{resource_path}")
        };
        Self {
            base_url,
            resource_path,
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn resource_path(&self) -> &str {
        &self.resource_path
    }

    /// Full URL without query string.
    #[must_use]
    pub fn url(&self) -> String {
        format!("{}{}", self.base_url, self.resource_path)
    }
}

impl fmt::Display for EndpointCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.base_url, self.resource_path)
    }
}

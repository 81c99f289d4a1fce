//! Endpoint configuration for the graphing backend.

use std::fmt;

use reqwest::Url;

use crate::error::LoadError;

/// Base URL used when nothing overrides it (local development server).
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000/api/";

/// Environment variable that overrides [`DEFAULT_BASE_URL`].
pub const BASE_URL_ENV: &str = "UMAP_EXPLORER_API";

/// One of the three collections the explorer loads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    PlotPoints,
    Signals,
    Targets,
}

impl Resource {
    /// Load order. Fetches run strictly in this sequence.
    pub const ALL: [Resource; 3] = [Resource::PlotPoints, Resource::Signals, Resource::Targets];

    pub fn path(self) -> &'static str {
        match self {
            Resource::PlotPoints => "umapplotpoint/",
            Resource::Signals => "samplesignal/",
            Resource::Targets => "target/",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Resource::PlotPoints => "Plot Data",
            Resource::Signals => "Sample Signal",
            Resource::Targets => "Target",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Reads [`BASE_URL_ENV`]. Native builds consult the process environment
    /// first; wasm builds only see the value baked in at compile time.
    pub fn from_env() -> Self {
        #[cfg(not(target_arch = "wasm32"))]
        {
            if let Ok(value) = std::env::var(BASE_URL_ENV) {
                if !value.trim().is_empty() {
                    return Self::new(value.trim());
                }
            }
        }

        match option_env!("UMAP_EXPLORER_API") {
            Some(value) if !value.trim().is_empty() => Self::new(value.trim()),
            _ => Self::default(),
        }
    }

    /// Absolute URL for `resource`. A missing trailing slash on the base is
    /// tolerated so `http://host/api` and `http://host/api/` resolve alike.
    pub fn endpoint(&self, resource: Resource) -> Result<Url, LoadError> {
        let mut base = self.base_url.trim().to_string();
        if !base.ends_with('/') {
            base.push('/');
        }

        let invalid = |reason: String| LoadError::InvalidBaseUrl {
            url: self.base_url.clone(),
            reason,
        };

        let base = Url::parse(&base).map_err(|err| invalid(err.to_string()))?;
        if base.cannot_be_a_base() {
            return Err(invalid("URL cannot be used as a base".to_string()));
        }
        base.join(resource.path())
            .map_err(|err| invalid(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_local_backend() {
        let config = ApiConfig::default();
        let url = config.endpoint(Resource::PlotPoints).unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:8000/api/umapplotpoint/");
    }

    #[test]
    fn base_without_trailing_slash_keeps_prefix() {
        let config = ApiConfig::new("https://example.org/graphing/api");
        let url = config.endpoint(Resource::Signals).unwrap();
        assert_eq!(url.as_str(), "https://example.org/graphing/api/samplesignal/");
    }

    #[test]
    fn invalid_base_is_a_load_error() {
        let config = ApiConfig::new("not a url");
        let err = config.endpoint(Resource::Targets).unwrap_err();
        assert!(matches!(err, LoadError::InvalidBaseUrl { .. }));
    }

    #[test]
    fn resources_load_in_fixed_order() {
        assert_eq!(
            Resource::ALL,
            [Resource::PlotPoints, Resource::Signals, Resource::Targets]
        );
        assert_eq!(Resource::Signals.to_string(), "Sample Signal");
    }
}

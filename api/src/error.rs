use reqwest::StatusCode;
use thiserror::Error;

use crate::config::Resource;

/// Why a snapshot could not be loaded. Any variant is terminal for the view.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("invalid API base URL `{url}`: {reason}")]
    InvalidBaseUrl { url: String, reason: String },
    #[error("{resource} response was not ok (HTTP {status})")]
    Status {
        resource: Resource,
        status: StatusCode,
    },
    #[error("{resource} request failed: {source}")]
    Request {
        resource: Resource,
        #[source]
        source: reqwest::Error,
    },
    #[error("{resource} payload could not be decoded: {source}")]
    Decode {
        resource: Resource,
        #[source]
        source: serde_json::Error,
    },
}

impl LoadError {
    pub fn resource(&self) -> Option<Resource> {
        match self {
            LoadError::InvalidBaseUrl { .. } => None,
            LoadError::Status { resource, .. }
            | LoadError::Request { resource, .. }
            | LoadError::Decode { resource, .. } => Some(*resource),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_message_names_the_collection() {
        let err = LoadError::Status {
            resource: Resource::PlotPoints,
            status: StatusCode::INTERNAL_SERVER_ERROR,
        };
        let message = err.to_string();
        assert!(message.starts_with("Plot Data response was not ok"));
        assert!(message.contains("500"));
        assert_eq!(err.resource(), Some(Resource::PlotPoints));
    }
}

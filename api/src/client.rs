use serde::de::DeserializeOwned;
use tracing::{info, warn};

use crate::config::{ApiConfig, Resource};
use crate::error::LoadError;
use crate::model::{PlotPoint, SignalMeasurement, Snapshot, Target};

/// Thin HTTP client over the three collection endpoints.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    config: ApiConfig,
}

impl ApiClient {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Loads plot points, then signals, then targets. The first failure
    /// aborts the remaining fetches; there is no partial snapshot.
    pub async fn fetch_snapshot(&self) -> Result<Snapshot, LoadError> {
        let points = self.fetch_plot_points().await?;
        let signals = self.fetch_signals().await?;
        let targets = self.fetch_targets().await?;

        info!(
            points = points.len(),
            signals = signals.len(),
            targets = targets.len(),
            "snapshot loaded"
        );

        Ok(Snapshot {
            points,
            signals,
            targets,
        })
    }

    pub async fn fetch_plot_points(&self) -> Result<Vec<PlotPoint>, LoadError> {
        self.fetch_collection(Resource::PlotPoints).await
    }

    pub async fn fetch_signals(&self) -> Result<Vec<SignalMeasurement>, LoadError> {
        self.fetch_collection(Resource::Signals).await
    }

    pub async fn fetch_targets(&self) -> Result<Vec<Target>, LoadError> {
        self.fetch_collection(Resource::Targets).await
    }

    async fn fetch_collection<T: DeserializeOwned>(
        &self,
        resource: Resource,
    ) -> Result<Vec<T>, LoadError> {
        let url = self.config.endpoint(resource)?;

        let result = async {
            let response = self
                .http
                .get(url.clone())
                .send()
                .await
                .map_err(|source| LoadError::Request { resource, source })?;

            let status = response.status();
            if !status.is_success() {
                return Err(LoadError::Status { resource, status });
            }

            let body = response
                .text()
                .await
                .map_err(|source| LoadError::Request { resource, source })?;
            decode_collection(resource, &body)
        }
        .await;

        match &result {
            Ok(records) => info!(%resource, %url, count = records.len(), "collection fetched"),
            Err(err) => warn!(%resource, %url, error = %err, "collection fetch failed"),
        }

        result
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new(ApiConfig::from_env())
    }
}

/// Decodes a whole-collection body (a JSON array of records).
pub fn decode_collection<T: DeserializeOwned>(
    resource: Resource,
    body: &str,
) -> Result<Vec<T>, LoadError> {
    serde_json::from_str(body).map_err(|source| LoadError::Decode { resource, source })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_target_catalog() {
        let body = r#"[{"id": 7, "name": "IFNG"}, {"id": 9, "name": "IL6"}]"#;
        let targets: Vec<Target> = decode_collection(Resource::Targets, body).unwrap();
        assert_eq!(targets.len(), 2);
        assert_eq!(targets[1].name, "IL6");
    }

    #[test]
    fn empty_collection_is_not_an_error() {
        let points: Vec<PlotPoint> = decode_collection(Resource::PlotPoints, "[]").unwrap();
        assert!(points.is_empty());
    }

    #[test]
    fn paginated_envelope_is_a_decode_error() {
        let body = r#"{"count": 0, "results": []}"#;
        let err = decode_collection::<Target>(Resource::Targets, body).unwrap_err();
        assert!(matches!(
            err,
            LoadError::Decode {
                resource: Resource::Targets,
                ..
            }
        ));
        assert!(err.to_string().starts_with("Target payload could not be decoded"));
    }
}

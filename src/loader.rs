//! Dashboard loader
//!
//! Binds a [`Source`] to a [`PathTable`] and exposes one accessor per
//! snapshot. Nothing is cached: every call retrieves and parses again.

use crate::error::LoadError;
use crate::model::KpiSnapshot;
use crate::resource::{PathTable, Resource};
use crate::source::{DirSource, HttpSource, Source};
use anyhow::Result;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Client for the dashboard's snapshot resources
#[derive(Debug, Clone)]
pub struct DashboardClient {
    source: Source,
    paths: PathTable,
}

impl DashboardClient {
    pub fn new(source: impl Into<Source>, paths: PathTable) -> Self {
        Self {
            source: source.into(),
            paths,
        }
    }

    /// Client against a dashboard server, using the default paths
    pub fn http(base_url: &str) -> Result<Self> {
        Ok(Self::new(HttpSource::new(base_url)?, PathTable::default()))
    }

    /// Client reading from a local directory, using the default paths
    pub fn dir(root: impl Into<std::path::PathBuf>) -> Self {
        Self::new(DirSource::new(root), PathTable::default())
    }

    pub fn source(&self) -> &Source {
        &self.source
    }

    pub fn paths(&self) -> &PathTable {
        &self.paths
    }

    /// Path the given resource is loaded from
    pub fn path(&self, resource: Resource) -> &str {
        self.paths.path(resource)
    }

    /// Retrieve a path and parse its body as JSON
    pub async fn load(&self, path: &str) -> Result<Value, LoadError> {
        self.load_as(path).await
    }

    /// Retrieve a path and deserialize its body into `T`
    pub async fn load_as<T: DeserializeOwned>(&self, path: &str) -> Result<T, LoadError> {
        let body = self.source.fetch(path).await?;
        serde_json::from_slice(&body).map_err(|source| {
            tracing::error!("{} is not valid JSON for the expected shape: {}", path, source);
            LoadError::Malformed {
                path: path.to_string(),
                source,
            }
        })
    }

    /// Load a resource by name as raw JSON
    pub async fn load_resource(&self, resource: Resource) -> Result<Value, LoadError> {
        self.load(self.path(resource)).await
    }

    pub async fn load_kpis(&self) -> Result<KpiSnapshot, LoadError> {
        self.load_as(self.path(Resource::Kpis)).await
    }

    pub async fn load_payer_summary(&self) -> Result<Value, LoadError> {
        self.load_resource(Resource::PayerSummary).await
    }

    pub async fn load_denial_trends(&self) -> Result<Value, LoadError> {
        self.load_resource(Resource::DenialTrends).await
    }

    pub async fn load_claim_risk(&self) -> Result<Value, LoadError> {
        self.load_resource(Resource::ClaimRisk).await
    }

    pub async fn load_incentives(&self) -> Result<Value, LoadError> {
        self.load_resource(Resource::Incentives).await
    }

    /// Load all five snapshots concurrently. Each result stands on its own;
    /// one failure does not cancel or fail the others.
    pub async fn load_all(&self) -> DashboardData {
        let (kpis, payer_summary, denial_trends, claim_risk, incentives) = futures::join!(
            self.load_kpis(),
            self.load_payer_summary(),
            self.load_denial_trends(),
            self.load_claim_risk(),
            self.load_incentives()
        );

        let data = DashboardData {
            kpis,
            payer_summary,
            denial_trends,
            claim_risk,
            incentives,
        };
        tracing::info!("Loaded {}/{} snapshots", data.loaded_count(), Resource::ALL.len());
        data
    }
}

/// Outcome of [`DashboardClient::load_all`]
#[derive(Debug)]
pub struct DashboardData {
    pub kpis: Result<KpiSnapshot, LoadError>,
    pub payer_summary: Result<Value, LoadError>,
    pub denial_trends: Result<Value, LoadError>,
    pub claim_risk: Result<Value, LoadError>,
    pub incentives: Result<Value, LoadError>,
}

impl DashboardData {
    /// Number of snapshots that loaded
    pub fn loaded_count(&self) -> usize {
        Resource::ALL.len() - self.errors().len()
    }

    /// Failures, in dashboard order
    pub fn errors(&self) -> Vec<(Resource, &LoadError)> {
        [
            (Resource::Kpis, self.kpis.as_ref().err()),
            (Resource::PayerSummary, self.payer_summary.as_ref().err()),
            (Resource::DenialTrends, self.denial_trends.as_ref().err()),
            (Resource::ClaimRisk, self.claim_risk.as_ref().err()),
            (Resource::Incentives, self.incentives.as_ref().err()),
        ]
        .into_iter()
        .filter_map(|(resource, err)| err.map(|e| (resource, e)))
        .collect()
    }

    /// Each snapshot as JSON, or the error that replaced it
    pub fn entries(&self) -> Vec<(Resource, Result<Value, &LoadError>)> {
        let kpis = self.kpis.as_ref().map(|k| k.as_value().clone());

        vec![
            (Resource::Kpis, kpis),
            (Resource::PayerSummary, self.payer_summary.as_ref().cloned()),
            (Resource::DenialTrends, self.denial_trends.as_ref().cloned()),
            (Resource::ClaimRisk, self.claim_risk.as_ref().cloned()),
            (Resource::Incentives, self.incentives.as_ref().cloned()),
        ]
    }
}

//! Resource Registry - The five dashboard snapshots and where they live
//!
//! Each snapshot has a short key (used on the command line and in the config
//! file) and a default path served next to the dashboard front end.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// A dashboard snapshot resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Resource {
    Kpis,
    PayerSummary,
    DenialTrends,
    ClaimRisk,
    Incentives,
}

impl Resource {
    /// All resources, in dashboard order
    pub const ALL: [Resource; 5] = [
        Resource::Kpis,
        Resource::PayerSummary,
        Resource::DenialTrends,
        Resource::ClaimRisk,
        Resource::Incentives,
    ];

    /// Short key used by the CLI and config file
    pub fn key(self) -> &'static str {
        match self {
            Resource::Kpis => "kpis",
            Resource::PayerSummary => "payer-summary",
            Resource::DenialTrends => "denial-trends",
            Resource::ClaimRisk => "claim-risk",
            Resource::Incentives => "incentives",
        }
    }

    /// Human readable name
    pub fn display_name(self) -> &'static str {
        match self {
            Resource::Kpis => "KPI Snapshot",
            Resource::PayerSummary => "Payer Summary",
            Resource::DenialTrends => "Denial Trends",
            Resource::ClaimRisk => "Claim Risk Scores",
            Resource::Incentives => "Incentive Snapshot",
        }
    }

    /// Built-in location of the resource
    pub fn default_path(self) -> &'static str {
        match self {
            Resource::Kpis => "/src/data/kpi_snapshot.json",
            Resource::PayerSummary => "/src/data/payer_summary.json",
            Resource::DenialTrends => "/src/data/denial_trends.json",
            Resource::ClaimRisk => "/src/data/claim_risk_scores.json",
            Resource::Incentives => "/src/data/incentive_snapshot.json",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Resource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        Resource::ALL
            .into_iter()
            .find(|r| r.key() == wanted)
            .ok_or_else(|| {
                let keys: Vec<&str> = Resource::ALL.iter().map(|r| r.key()).collect();
                format!("Unknown resource: {} (expected one of: {})", s, keys.join(", "))
            })
    }
}

/// Mapping from resource to path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathTable {
    paths: BTreeMap<Resource, String>,
}

impl Default for PathTable {
    fn default() -> Self {
        Self {
            paths: Resource::ALL
                .into_iter()
                .map(|r| (r, r.default_path().to_string()))
                .collect(),
        }
    }
}

impl PathTable {
    /// Replace the path for one resource
    pub fn with_path(mut self, resource: Resource, path: impl Into<String>) -> Self {
        self.set(resource, path);
        self
    }

    pub fn set(&mut self, resource: Resource, path: impl Into<String>) {
        self.paths.insert(resource, path.into());
    }

    /// Path for a resource
    pub fn path(&self, resource: Resource) -> &str {
        self.paths
            .get(&resource)
            .map(String::as_str)
            .unwrap_or_else(|| resource.default_path())
    }

    /// Apply overrides keyed by resource key; unknown keys are skipped
    pub fn with_overrides<'a>(
        mut self,
        overrides: impl IntoIterator<Item = (&'a String, &'a String)>,
    ) -> Self {
        for (key, path) in overrides {
            match key.parse::<Resource>() {
                Ok(resource) => self.set(resource, path.clone()),
                Err(e) => tracing::warn!("Ignoring path override: {}", e),
            }
        }
        self
    }

    /// Iterate entries in dashboard order
    pub fn iter(&self) -> impl Iterator<Item = (Resource, &str)> {
        Resource::ALL.into_iter().map(move |r| (r, self.path(r)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_paths() {
        let table = PathTable::default();
        assert_eq!(table.path(Resource::Kpis), "/src/data/kpi_snapshot.json");
        assert_eq!(table.path(Resource::PayerSummary), "/src/data/payer_summary.json");
        assert_eq!(table.path(Resource::DenialTrends), "/src/data/denial_trends.json");
        assert_eq!(table.path(Resource::ClaimRisk), "/src/data/claim_risk_scores.json");
        assert_eq!(table.path(Resource::Incentives), "/src/data/incentive_snapshot.json");
    }

    #[test]
    fn test_with_path_replaces_one_entry() {
        let table = PathTable::default().with_path(Resource::Kpis, "/fixtures/kpis.json");
        assert_eq!(table.path(Resource::Kpis), "/fixtures/kpis.json");
        assert_eq!(table.path(Resource::Incentives), "/src/data/incentive_snapshot.json");
    }

    #[test]
    fn test_resource_parses_from_key() {
        for resource in Resource::ALL {
            assert_eq!(resource.key().parse::<Resource>(), Ok(resource));
        }
        assert_eq!("Payer_Summary".parse::<Resource>(), Ok(Resource::PayerSummary));
        assert!("payers".parse::<Resource>().is_err());
    }

    #[test]
    fn test_overrides_skip_unknown_keys() {
        let mut overrides = HashMap::new();
        overrides.insert("claim-risk".to_string(), "/out/risk.json".to_string());
        overrides.insert("bogus".to_string(), "/nowhere.json".to_string());

        let table = PathTable::default().with_overrides(&overrides);
        assert_eq!(table.path(Resource::ClaimRisk), "/out/risk.json");
        assert_eq!(table, PathTable::default().with_path(Resource::ClaimRisk, "/out/risk.json"));
    }

    #[test]
    fn test_iter_in_dashboard_order() {
        let keys: Vec<&str> = PathTable::default().iter().map(|(r, _)| r.key()).collect();
        assert_eq!(
            keys,
            vec!["kpis", "payer-summary", "denial-trends", "claim-risk", "incentives"]
        );
    }
}

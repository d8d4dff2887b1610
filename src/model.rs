//! Snapshot shapes
//!
//! [`KpiSnapshot`] is what `load_kpis` resolves to. It wraps the document
//! as served; the six KPI fields are read on access and nothing about the
//! shape is checked at load time. The other types are opt-in views for
//! callers that want typed access through
//! [`DashboardClient::load_as`](crate::loader::DashboardClient::load_as);
//! the named accessors hand those resources back as raw JSON.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Headline revenue-cycle numbers
///
/// Expected fields: `payments_ytd`, `denial_rate`, `days_to_pay`,
/// `write_offs`, `clean_rate`, `incentives_ytd`. Each accessor returns
/// `None` when its field is absent or not a number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KpiSnapshot(Value);

impl KpiSnapshot {
    /// Field names of a complete snapshot
    pub const FIELDS: [&'static str; 6] = [
        "payments_ytd",
        "denial_rate",
        "days_to_pay",
        "write_offs",
        "clean_rate",
        "incentives_ytd",
    ];

    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// The document as served
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }

    /// Numeric field by name
    pub fn number(&self, field: &str) -> Option<f64> {
        self.0.get(field).and_then(Value::as_f64)
    }

    pub fn payments_ytd(&self) -> Option<f64> {
        self.number("payments_ytd")
    }

    pub fn denial_rate(&self) -> Option<f64> {
        self.number("denial_rate")
    }

    pub fn days_to_pay(&self) -> Option<f64> {
        self.number("days_to_pay")
    }

    pub fn write_offs(&self) -> Option<f64> {
        self.number("write_offs")
    }

    pub fn clean_rate(&self) -> Option<f64> {
        self.number("clean_rate")
    }

    pub fn incentives_ytd(&self) -> Option<f64> {
        self.number("incentives_ytd")
    }

    /// Expected fields that are absent or not numeric
    pub fn missing_fields(&self) -> Vec<&'static str> {
        Self::FIELDS
            .into_iter()
            .filter(|f| self.number(f).is_none())
            .collect()
    }
}

/// One payer's row in the payer summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayerRow {
    pub payer: String,
    pub clean_rate: f64,
    pub top_denial: String,
    pub avg_dollars: f64,
    /// Period-over-period change, preformatted (`"+2%"`)
    pub delta: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayerSummary {
    pub rows: Vec<PayerRow>,
}

/// Denial rate for one month; the resource is an array of these
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DenialTrendPoint {
    pub month: String,
    pub rate: f64,
}

/// Risk score for one claim stub; the resource is an array of these
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimRiskScore {
    pub claim_stub_id: String,
    /// 0.0 ..= 0.95
    pub risk: f64,
    #[serde(default)]
    pub top_factors: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgramAmount {
    pub name: String,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderAmount {
    pub npi: String,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncentiveSnapshot {
    pub total_paid: f64,
    #[serde(default)]
    pub by_program: Vec<ProgramAmount>,
    #[serde(default)]
    pub by_provider: Vec<ProviderAmount>,
}

impl IncentiveSnapshot {
    /// Sum of the per-program amounts
    pub fn program_total(&self) -> f64 {
        self.by_program.iter().map(|p| p.amount).sum()
    }
}

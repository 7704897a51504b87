//! `GET /health` response body.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Overall {
    Healthy,
    Degraded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Probe {
    Ok,
    Error,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: Overall,
    pub version: &'static str,
    pub checks: HealthChecks,
}

#[derive(Debug, Serialize)]
pub struct HealthChecks {
    pub storage: CheckStatus,
    pub cache: CheckStatus,
}

/// Outcome of probing one dependency, with a human-readable detail.
#[derive(Debug, Serialize)]
pub struct CheckStatus {
    pub status: Probe,
    pub message: String,
}

impl CheckStatus {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            status: Probe::Ok,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: Probe::Error,
            message: message.into(),
        }
    }
}

impl HealthResponse {
    /// Healthy only when every probe passed.
    pub fn from_checks(checks: HealthChecks) -> Self {
        let status = if checks.storage.status == Probe::Ok && checks.cache.status == Probe::Ok {
            Overall::Healthy
        } else {
            Overall::Degraded
        };

        Self {
            status,
            version: env!("CARGO_PKG_VERSION"),
            checks,
        }
    }
}

// Object storage buckets, endpoints and per-endpoint quotas

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Bucket {
    pub label: String,
    /// Absent on older API versions, which only report `cluster`.
    #[serde(default)]
    pub region: Option<String>,
    /// Deprecated cluster id (e.g. `us-east-1`), still sent alongside `region`.
    #[serde(default)]
    pub cluster: Option<String>,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub objects: u64,
}

impl Bucket {
    /// `region`, falling back to `cluster`; empty when neither is present.
    pub fn location(&self) -> &str {
        self.region
            .as_deref()
            .or(self.cluster.as_deref())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ObjectStorageEndpoint {
    pub region: String,
    pub endpoint_type: String,
    #[serde(default)]
    pub s3_endpoint: Option<String>,
}

/// Response of `GET /object-storage/quotas/{id}/usage`.
#[derive(Debug, Clone, Deserialize)]
pub struct QuotaUsage {
    pub quota_limit: f64,
    #[serde(default)]
    pub usage: Option<f64>,
}

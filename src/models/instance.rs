// Compute instances ("Linodes") and their 24h stats window

use serde::Deserialize;

use crate::series::Point;

#[derive(Debug, Clone, Deserialize)]
pub struct Instance {
    pub id: u64,
    pub label: String,
    pub region: String,
}

/// Response of `GET /linode/instances/{id}/stats`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InstanceStats {
    #[serde(default)]
    pub data: InstanceStatsData,
}

/// One series per statistic family. A family missing from the response
/// deserializes as empty and is skipped by the collectors.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InstanceStatsData {
    #[serde(default)]
    pub cpu: Vec<Point>,
    #[serde(default)]
    pub io: IoStats,
    #[serde(default)]
    pub netv4: NetStats,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct IoStats {
    #[serde(default)]
    pub io: Vec<Point>,
    #[serde(default)]
    pub swap: Vec<Point>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NetStats {
    #[serde(default, rename = "in")]
    pub in_: Vec<Point>,
    #[serde(default)]
    pub out: Vec<Point>,
}

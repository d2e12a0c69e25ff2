// Linode Kubernetes Engine (LKE) clusters and node pools

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct LkeCluster {
    pub id: u64,
    pub label: String,
    pub region: String,
    #[serde(default)]
    pub k8s_version: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LkeNodePool {
    pub id: u64,
    pub count: u32,
    #[serde(rename = "type")]
    pub type_: String,
    #[serde(default)]
    pub nodes: Vec<LkeNode>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LkeNode {
    pub id: String,
    /// Backing Linode; null while the node is still provisioning.
    #[serde(default)]
    pub instance_id: Option<u64>,
    pub status: LkeNodeStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LkeNodeStatus {
    Ready,
    NotReady,
    #[serde(other)]
    Unknown,
}

impl LkeNodeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ready => "ready",
            Self::NotReady => "not_ready",
            Self::Unknown => "unknown",
        }
    }
}

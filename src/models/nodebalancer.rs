use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct NodeBalancer {
    pub id: u64,
    /// Required for labelling; a node-balancer without one is skipped.
    #[serde(default)]
    pub label: Option<String>,
    pub region: String,
    #[serde(default)]
    pub transfer: NodeBalancerTransfer,
}

/// Megabytes transferred this month. Each total is optional: absent means "do not emit", never zero.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NodeBalancerTransfer {
    #[serde(default)]
    pub total: Option<f64>,
    #[serde(default)]
    pub out: Option<f64>,
    #[serde(default, rename = "in")]
    pub in_: Option<f64>,
}

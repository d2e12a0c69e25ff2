use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Volume {
    pub id: u64,
    pub label: String,
    pub status: String,
    pub region: String,
}

use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Account {
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub balance: f64,
    /// Absent on older API versions; not emitted when missing.
    #[serde(default)]
    pub balance_uninvoiced: Option<f64>,
}

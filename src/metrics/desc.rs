// Metric identity: name, help, label keys, kind.

use std::sync::Arc;

/// Namespace prefixed to every metric name.
pub const NAMESPACE: &str = "linode";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    Counter,
    Gauge,
}

impl MetricKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Counter => "counter",
            Self::Gauge => "gauge",
        }
    }
}

/// Immutable once built; collectors hold them in `Arc` and share them with every pass.
#[derive(Debug, PartialEq, Eq)]
pub struct MetricDescriptor {
    name: String,
    help: String,
    label_keys: Vec<String>,
    kind: MetricKind,
}

impl MetricDescriptor {
    pub fn new(name: impl Into<String>, help: impl Into<String>, label_keys: &[&str], kind: MetricKind) -> Arc<Self> {
        Arc::new(Self {
            name: name.into(),
            help: help.into(),
            label_keys: label_keys.iter().map(|k| k.to_string()).collect(),
            kind,
        })
    }

    pub fn gauge(name: impl Into<String>, help: impl Into<String>, label_keys: &[&str]) -> Arc<Self> {
        Self::new(name, help, label_keys, MetricKind::Gauge)
    }

    pub fn counter(name: impl Into<String>, help: impl Into<String>, label_keys: &[&str]) -> Arc<Self> {
        Self::new(name, help, label_keys, MetricKind::Counter)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn help(&self) -> &str {
        &self.help
    }

    pub fn label_keys(&self) -> &[String] {
        &self.label_keys
    }

    pub fn kind(&self) -> MetricKind {
        self.kind
    }
}

/// Joins namespace, subsystem and name with `_`, skipping empty parts.
pub fn fq_name(subsystem: &str, name: &str) -> String {
    [NAMESPACE, subsystem, name]
        .iter()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join("_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fq_name_joins_parts() {
        assert_eq!(fq_name("instance", "count"), "linode_instance_count");
        assert_eq!(fq_name("objectstorage_quota", "bytes_limit"), "linode_objectstorage_quota_bytes_limit");
    }

    #[test]
    fn fq_name_skips_empty_subsystem() {
        assert_eq!(fq_name("", "up"), "linode_up");
    }

    #[test]
    fn descriptor_keeps_label_order() {
        let d = MetricDescriptor::gauge("x", "help", &["id", "label", "region"]);
        assert_eq!(d.label_keys(), ["id", "label", "region"]);
        assert_eq!(d.kind(), MetricKind::Gauge);
    }
}

// Resource collectors: one per resource kind, each running one pass per scrape.

mod account;
mod exporter;
mod fanout;
mod instance;
mod instance_stats;
mod kubernetes;
mod nodebalancer;
mod object_storage;
mod object_storage_quota;
mod ticket;
mod volume;

pub use account::AccountCollector;
pub use exporter::ExporterCollector;
pub use fanout::{ErrorReporter, FanOut};
pub use instance::InstanceCollector;
pub use instance_stats::InstanceStatsCollector;
pub use kubernetes::KubernetesCollector;
pub use nodebalancer::NodeBalancerCollector;
pub use object_storage::ObjectStorageCollector;
pub use object_storage_quota::ObjectStorageQuotaCollector;
pub use ticket::TicketCollector;
pub use volume::VolumeCollector;

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

use crate::client::ResourceClient;
use crate::config::CollectionConfig;
use crate::error::CollectError;
use crate::metrics::{MetricDescriptor, MetricSink};

/// Fixed per-process options handed to every collector at construction.
#[derive(Debug, Clone, Copy)]
pub struct CollectorOptions {
    /// Cap on in-flight detail fetches for collectors that bound their fan-out.
    pub concurrency_limit: usize,
    /// Freshness window for shared lookups.
    pub cache_ttl: Duration,
    /// Deadline for the whole scrape.
    pub pass_timeout: Duration,
}

impl Default for CollectorOptions {
    fn default() -> Self {
        Self {
            concurrency_limit: 50,
            cache_ttl: Duration::from_secs(30),
            pass_timeout: Duration::from_secs(60),
        }
    }
}

impl From<&CollectionConfig> for CollectorOptions {
    fn from(config: &CollectionConfig) -> Self {
        Self {
            concurrency_limit: config.concurrency_limit,
            cache_ttl: config.endpoint_cache_ttl(),
            pass_timeout: config.pass_timeout(),
        }
    }
}

/// Outcome of a pass that did not fail outright: how many units of work ran
/// and the soft failures that were logged and skipped along the way.
#[derive(Debug, Default)]
pub struct CollectReport {
    /// Spawned fan-out tasks. A collector that works inline reports its pass as one unit.
    pub tasks: usize,
    pub errors: Vec<CollectError>,
}

#[async_trait]
pub trait Collector: Send + Sync {
    fn name(&self) -> &'static str;

    /// Every descriptor this collector may emit. Fixed at construction.
    fn describe(&self) -> Vec<Arc<MetricDescriptor>>;

    /// One collection pass. Returns `Err` only when the kind as a whole could not be enumerated.
    async fn collect(&self, sink: MetricSink) -> Result<CollectReport, CollectError>;
}

/// Collector names known to [`build`], in registration order.
pub const ALL: &[&str] = &[
    "account",
    "exporter",
    "instance",
    "instance_stats",
    "kubernetes",
    "nodebalancer",
    "objectstorage",
    "objectstorage_quota",
    "ticket",
    "volume",
];

pub fn build(
    name: &str,
    client: Arc<dyn ResourceClient>,
    options: CollectorOptions,
) -> Option<Arc<dyn Collector>> {
    let collector: Arc<dyn Collector> = match name {
        "account" => Arc::new(AccountCollector::new(client)),
        "exporter" => Arc::new(ExporterCollector::new()),
        "instance" => Arc::new(InstanceCollector::new(client, options)),
        "instance_stats" => Arc::new(InstanceStatsCollector::new(client, options)),
        "kubernetes" => Arc::new(KubernetesCollector::new(client)),
        "nodebalancer" => Arc::new(NodeBalancerCollector::new(client)),
        "objectstorage" => Arc::new(ObjectStorageCollector::new(client)),
        "objectstorage_quota" => Arc::new(ObjectStorageQuotaCollector::new(client, options)),
        "ticket" => Arc::new(TicketCollector::new(client)),
        "volume" => Arc::new(VolumeCollector::new(client)),
        _ => return None,
    };
    Some(collector)
}

/// Label values for a kind-level aggregate sample: one empty string per label key.
pub(crate) fn aggregate_labels(desc: &MetricDescriptor) -> Vec<String> {
    vec![String::new(); desc.label_keys().len()]
}

pub(crate) fn enumeration_failed(kind: &'static str) -> impl FnOnce(crate::error::ClientError) -> CollectError {
    move |source| CollectError::Enumeration { kind, source }
}

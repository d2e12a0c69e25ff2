// Shared test helpers: an in-memory ResourceClient and sample lookups

#![allow(dead_code)]

use async_trait::async_trait;
use linode_exporter::client::ResourceClient;
use linode_exporter::collector::{CollectReport, Collector};
use linode_exporter::error::{ClientError, CollectError};
use linode_exporter::metrics::{MetricSample, MetricSink};
use linode_exporter::models::*;
use linode_exporter::series::Point;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Fixture data served by [`FakeClient`]. Anything left empty is an empty listing.
#[derive(Default)]
pub struct FakeClient {
    pub account: Option<Account>,
    pub instances: Vec<Instance>,
    pub stats: HashMap<u64, InstanceStats>,
    /// Instance ids whose stats fetch fails.
    pub failing_stats: HashSet<u64>,
    /// Every list call fails when set.
    pub fail_listing: bool,
    /// Delay applied to every stats fetch.
    pub stats_delay: Option<Duration>,
    pub node_balancers: Vec<NodeBalancer>,
    pub buckets: Vec<Bucket>,
    pub endpoints: Mutex<Vec<ObjectStorageEndpoint>>,
    pub fail_endpoints: Mutex<bool>,
    /// Quota usage by quota id; unknown ids answer 404.
    pub quotas: HashMap<String, QuotaUsage>,
    pub tickets: Vec<Ticket>,
    pub volumes: Vec<Volume>,
    pub clusters: Vec<LkeCluster>,
    pub pools: HashMap<u64, Vec<LkeNodePool>>,

    pub endpoint_calls: AtomicUsize,
    pub stats_in_flight: AtomicUsize,
    pub stats_peak: AtomicUsize,
}

fn server_error(path: &str) -> ClientError {
    ClientError::Status {
        url: format!("fake://{}", path),
        status: 500,
    }
}

impl FakeClient {
    fn listing<T: Clone>(&self, path: &str, items: &[T]) -> Result<Vec<T>, ClientError> {
        if self.fail_listing {
            return Err(server_error(path));
        }
        Ok(items.to_vec())
    }
}

#[async_trait]
impl ResourceClient for FakeClient {
    async fn get_account(&self) -> Result<Account, ClientError> {
        self.account.clone().ok_or_else(|| server_error("/account"))
    }

    async fn list_instances(&self) -> Result<Vec<Instance>, ClientError> {
        self.listing("/linode/instances", &self.instances)
    }

    async fn get_instance_stats(&self, id: u64) -> Result<InstanceStats, ClientError> {
        let now = self.stats_in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.stats_peak.fetch_max(now, Ordering::SeqCst);
        if let Some(delay) = self.stats_delay {
            tokio::time::sleep(delay).await;
        }
        self.stats_in_flight.fetch_sub(1, Ordering::SeqCst);
        if self.failing_stats.contains(&id) {
            return Err(server_error(&format!("/linode/instances/{}/stats", id)));
        }
        Ok(self.stats.get(&id).cloned().unwrap_or_default())
    }

    async fn list_node_balancers(&self) -> Result<Vec<NodeBalancer>, ClientError> {
        self.listing("/nodebalancers", &self.node_balancers)
    }

    async fn list_buckets(&self) -> Result<Vec<Bucket>, ClientError> {
        self.listing("/object-storage/buckets", &self.buckets)
    }

    async fn list_object_storage_endpoints(&self) -> Result<Vec<ObjectStorageEndpoint>, ClientError> {
        self.endpoint_calls.fetch_add(1, Ordering::SeqCst);
        if *self.fail_endpoints.lock().unwrap() {
            return Err(server_error("/object-storage/endpoints"));
        }
        Ok(self.endpoints.lock().unwrap().clone())
    }

    async fn get_object_storage_quota_usage(&self, quota_id: &str) -> Result<QuotaUsage, ClientError> {
        self.quotas.get(quota_id).cloned().ok_or_else(|| ClientError::Status {
            url: format!("fake:///object-storage/quotas/{}/usage", quota_id),
            status: 404,
        })
    }

    async fn list_tickets(&self) -> Result<Vec<Ticket>, ClientError> {
        self.listing("/support/tickets", &self.tickets)
    }

    async fn list_volumes(&self) -> Result<Vec<Volume>, ClientError> {
        self.listing("/volumes", &self.volumes)
    }

    async fn list_lke_clusters(&self) -> Result<Vec<LkeCluster>, ClientError> {
        self.listing("/lke/clusters", &self.clusters)
    }

    async fn list_lke_pools(&self, cluster_id: u64) -> Result<Vec<LkeNodePool>, ClientError> {
        let pools = self.pools.get(&cluster_id).cloned().unwrap_or_default();
        self.listing(&format!("/lke/clusters/{}/pools", cluster_id), &pools)
    }
}

pub fn instance(id: u64, label: &str) -> Instance {
    Instance {
        id,
        label: label.to_string(),
        region: "us-east".to_string(),
    }
}

/// Points at consecutive timestamps.
pub fn points(values: &[f64]) -> Vec<Point> {
    values
        .iter()
        .enumerate()
        .map(|(i, v)| Point(1_700_000_000_000.0 + i as f64 * 300_000.0, *v))
        .collect()
}

/// Stats with every family populated from `values`.
pub fn full_stats(values: &[f64]) -> InstanceStats {
    InstanceStats {
        data: InstanceStatsData {
            cpu: points(values),
            io: IoStats {
                io: points(values),
                swap: points(values),
            },
            netv4: NetStats {
                in_: points(values),
                out: points(values),
            },
        },
    }
}

pub fn endpoint(region: &str, s3: &str) -> ObjectStorageEndpoint {
    ObjectStorageEndpoint {
        region: region.to_string(),
        endpoint_type: "E1".to_string(),
        s3_endpoint: Some(s3.to_string()),
    }
}

/// Runs one collection pass and returns its outcome and everything it emitted.
pub async fn run(collector: &dyn Collector) -> (Result<CollectReport, CollectError>, Vec<MetricSample>) {
    let (sink, mut rx) = MetricSink::channel();
    let result = collector.collect(sink).await;
    let mut samples = Vec::new();
    while let Ok(sample) = rx.try_recv() {
        samples.push(sample);
    }
    (result, samples)
}

/// Samples of metric `name`.
pub fn named<'a>(samples: &'a [MetricSample], name: &str) -> Vec<&'a MetricSample> {
    samples.iter().filter(|s| s.desc().name() == name).collect()
}

/// Value of the sample of metric `name` whose `key` label equals `value`.
pub fn value_of(samples: &[MetricSample], name: &str, key: &str, value: &str) -> Option<f64> {
    samples
        .iter()
        .find(|s| s.desc().name() == name && s.label(key) == Some(value))
        .map(MetricSample::value)
}

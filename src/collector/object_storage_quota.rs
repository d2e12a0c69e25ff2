// Object storage quotas: usage and limit per endpoint and quota type.
//
// Endpoints change rarely, so the list is cached across scrapes; quota lookups
// fan out one task per (endpoint, quota type) behind the admission gate.

use async_trait::async_trait;
use std::sync::Arc;

use super::{CollectReport, Collector, CollectorOptions, FanOut};
use crate::cache::TtlCache;
use crate::client::ResourceClient;
use crate::error::{ClientError, CollectError};
use crate::metrics::{MetricDescriptor, MetricSink, fq_name};
use crate::models::ObjectStorageEndpoint;

const KIND: &str = "objectstorage_quota";

/// Quota types queried for every endpoint.
const QUOTA_TYPES: [&str; 2] = ["buckets", "bytes"];

struct QuotaDescs {
    quota_type: &'static str,
    usage: Arc<MetricDescriptor>,
    limit: Arc<MetricDescriptor>,
}

pub struct ObjectStorageQuotaCollector {
    client: Arc<dyn ResourceClient>,
    descs: Arc<Vec<QuotaDescs>>,
    endpoints: Arc<TtlCache<Arc<Vec<ObjectStorageEndpoint>>>>,
    options: CollectorOptions,
}

impl ObjectStorageQuotaCollector {
    pub fn new(client: Arc<dyn ResourceClient>, options: CollectorOptions) -> Self {
        let labels = ["region", "endpoint_type", "endpoint"];
        let descs = QUOTA_TYPES
            .iter()
            .map(|&quota_type| QuotaDescs {
                quota_type,
                usage: MetricDescriptor::gauge(
                    fq_name(KIND, &format!("{}_usage", quota_type)),
                    format!("Count of {} in region", quota_type),
                    &labels,
                ),
                limit: MetricDescriptor::gauge(
                    fq_name(KIND, &format!("{}_limit", quota_type)),
                    format!("{} limit in region", capitalize(quota_type)),
                    &labels,
                ),
            })
            .collect();
        Self {
            client,
            descs: Arc::new(descs),
            endpoints: Arc::new(TtlCache::new(options.cache_ttl)),
            options,
        }
    }

    async fn endpoints(&self) -> Result<Arc<Vec<ObjectStorageEndpoint>>, CollectError> {
        let client = self.client.clone();
        self.endpoints
            .get(|| async move { client.list_object_storage_endpoints().await.map(Arc::new) })
            .await
            .map_err(|source| CollectError::CacheRefresh {
                what: "object storage endpoints",
                source,
            })
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[async_trait]
impl Collector for ObjectStorageQuotaCollector {
    fn name(&self) -> &'static str {
        KIND
    }

    fn describe(&self) -> Vec<Arc<MetricDescriptor>> {
        self.descs
            .iter()
            .flat_map(|d| [d.usage.clone(), d.limit.clone()])
            .collect()
    }

    async fn collect(&self, sink: MetricSink) -> Result<CollectReport, CollectError> {
        let endpoints = self.endpoints().await?;
        tracing::debug!(collector = KIND, endpoints = endpoints.len(), "enumerated");

        let mut fan = FanOut::bounded(KIND, self.options.concurrency_limit);
        for (endpoint_idx, endpoint) in endpoints.iter().enumerate() {
            let Some(s3_endpoint) = endpoint.s3_endpoint.clone() else {
                continue;
            };
            for descs_idx in 0..self.descs.len() {
                let client = self.client.clone();
                let descs = self.descs.clone();
                let endpoints = endpoints.clone();
                let cache = self.endpoints.clone();
                let sink = sink.clone();
                let s3_endpoint = s3_endpoint.clone();
                fan.spawn(async move {
                    let endpoint = &endpoints[endpoint_idx];
                    let quota = &descs[descs_idx];
                    let quota_id = format!("obj-{}-{}", quota.quota_type, s3_endpoint);
                    let usage = match client.get_object_storage_quota_usage(&quota_id).await {
                        Ok(u) => u,
                        Err(source) => {
                            // A vanished endpoint means the cached list is out of date.
                            if matches!(source, ClientError::Status { status: 404, .. }) {
                                cache.invalidate().await;
                            }
                            return Err(CollectError::DetailFetch {
                                kind: KIND,
                                id: quota_id,
                                source,
                            });
                        }
                    };
                    let labels = vec![
                        endpoint.region.clone(),
                        endpoint.endpoint_type.clone(),
                        s3_endpoint,
                    ];
                    sink.emit(&quota.limit, usage.quota_limit, labels.clone());
                    match usage.usage {
                        Some(u) => {
                            sink.emit(&quota.usage, u, labels);
                            Ok(())
                        }
                        None => Err(CollectError::MissingField {
                            kind: KIND,
                            id: quota_id,
                            field: "usage",
                        }),
                    }
                })
                .await;
            }
        }
        Ok(fan.join().await)
    }
}

// Object storage buckets: size and object count

use async_trait::async_trait;
use std::sync::Arc;

use super::{CollectReport, Collector, enumeration_failed};
use crate::client::ResourceClient;
use crate::error::CollectError;
use crate::metrics::{MetricDescriptor, MetricSink, fq_name};

const KIND: &str = "objectstorage";

pub struct ObjectStorageCollector {
    client: Arc<dyn ResourceClient>,
    size: Arc<MetricDescriptor>,
    objects_count: Arc<MetricDescriptor>,
}

impl ObjectStorageCollector {
    pub fn new(client: Arc<dyn ResourceClient>) -> Self {
        let labels = ["label", "region"];
        Self {
            client,
            size: MetricDescriptor::gauge(fq_name(KIND, "size_bytes"), "Size of a bucket (in bytes)", &labels),
            objects_count: MetricDescriptor::gauge(
                fq_name(KIND, "objects_count"),
                "Count of objects in a bucket",
                &labels,
            ),
        }
    }
}

#[async_trait]
impl Collector for ObjectStorageCollector {
    fn name(&self) -> &'static str {
        KIND
    }

    fn describe(&self) -> Vec<Arc<MetricDescriptor>> {
        vec![self.size.clone(), self.objects_count.clone()]
    }

    async fn collect(&self, sink: MetricSink) -> Result<CollectReport, CollectError> {
        let buckets = self
            .client
            .list_buckets()
            .await
            .map_err(enumeration_failed(KIND))?;
        tracing::debug!(collector = KIND, buckets = buckets.len(), "enumerated");

        for bucket in &buckets {
            let labels = vec![bucket.label.clone(), bucket.location().to_string()];
            sink.emit(&self.size, bucket.size as f64, labels.clone());
            sink.emit(&self.objects_count, bucket.objects as f64, labels);
        }
        Ok(CollectReport {
            tasks: 1,
            errors: Vec::new(),
        })
    }
}

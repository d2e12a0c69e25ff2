// Block storage volumes

use async_trait::async_trait;
use std::sync::Arc;

use super::{CollectReport, Collector, enumeration_failed};
use crate::client::ResourceClient;
use crate::error::CollectError;
use crate::metrics::{MetricDescriptor, MetricSink, fq_name};

const KIND: &str = "volume";

pub struct VolumeCollector {
    client: Arc<dyn ResourceClient>,
    up: Arc<MetricDescriptor>,
}

impl VolumeCollector {
    pub fn new(client: Arc<dyn ResourceClient>) -> Self {
        Self {
            client,
            up: MetricDescriptor::counter(
                fq_name(KIND, "up"),
                "Status of Volume",
                &["id", "label", "status", "region"],
            ),
        }
    }
}

#[async_trait]
impl Collector for VolumeCollector {
    fn name(&self) -> &'static str {
        KIND
    }

    fn describe(&self) -> Vec<Arc<MetricDescriptor>> {
        vec![self.up.clone()]
    }

    async fn collect(&self, sink: MetricSink) -> Result<CollectReport, CollectError> {
        let volumes = self
            .client
            .list_volumes()
            .await
            .map_err(enumeration_failed(KIND))?;
        tracing::debug!(collector = KIND, volumes = volumes.len(), "enumerated");

        for v in volumes {
            sink.emit(&self.up, 1.0, vec![v.id.to_string(), v.label, v.status, v.region]);
        }
        Ok(CollectReport {
            tasks: 1,
            errors: Vec::new(),
        })
    }
}

// Exporter build info as a constant-1 metric

use async_trait::async_trait;
use std::sync::Arc;

use super::{CollectReport, Collector};
use crate::error::CollectError;
use crate::metrics::{MetricDescriptor, MetricSink, fq_name};
use crate::version::{GIT_COMMIT, OS_VERSION, VERSION};

const KIND: &str = "exporter";

pub struct ExporterCollector {
    info: Arc<MetricDescriptor>,
}

impl ExporterCollector {
    pub fn new() -> Self {
        tracing::debug!(version = VERSION, os = OS_VERSION, commit = GIT_COMMIT, "exporter build info");
        Self {
            info: MetricDescriptor::counter(
                fq_name(KIND, "info"),
                "A metric with a constant value of '1' labeled with the exporter version, build OS and commit",
                &["version", "osVersion", "exporterCommit"],
            ),
        }
    }
}

impl Default for ExporterCollector {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Collector for ExporterCollector {
    fn name(&self) -> &'static str {
        KIND
    }

    fn describe(&self) -> Vec<Arc<MetricDescriptor>> {
        vec![self.info.clone()]
    }

    async fn collect(&self, sink: MetricSink) -> Result<CollectReport, CollectError> {
        sink.emit(
            &self.info,
            1.0,
            vec![VERSION.to_string(), OS_VERSION.to_string(), GIT_COMMIT.to_string()],
        );
        Ok(CollectReport {
            tasks: 1,
            errors: Vec::new(),
        })
    }
}

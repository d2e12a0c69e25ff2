// Most recent reading of each instance stats family

use async_trait::async_trait;
use std::sync::Arc;

use super::{CollectReport, Collector, CollectorOptions, ErrorReporter, FanOut, enumeration_failed};
use crate::client::ResourceClient;
use crate::error::CollectError;
use crate::metrics::{MetricDescriptor, MetricSink, fq_name};
use crate::models::InstanceStatsData;
use crate::series::{Point, TimeSeries};

const KIND: &str = "instance_stats";

struct Descs {
    cpu_usage: Arc<MetricDescriptor>,
    disk_io: Arc<MetricDescriptor>,
    network_in: Arc<MetricDescriptor>,
    network_out: Arc<MetricDescriptor>,
}

pub struct InstanceStatsCollector {
    client: Arc<dyn ResourceClient>,
    descs: Arc<Descs>,
    options: CollectorOptions,
}

impl InstanceStatsCollector {
    pub fn new(client: Arc<dyn ResourceClient>, options: CollectorOptions) -> Self {
        let labels = ["linode_id", "label", "region"];
        let descs = Descs {
            cpu_usage: MetricDescriptor::gauge(
                fq_name(KIND, "cpu_usage"),
                "CPU usage percentage for Linode",
                &labels,
            ),
            disk_io: MetricDescriptor::gauge(
                fq_name(KIND, "diskio"),
                "Disk IO operations for Linode",
                &["linode_id", "label", "region", "type"],
            ),
            network_in: MetricDescriptor::gauge(
                fq_name(KIND, "network_in"),
                "Network incoming bytes for Linode",
                &labels,
            ),
            network_out: MetricDescriptor::gauge(
                fq_name(KIND, "network_out"),
                "Network outgoing bytes for Linode",
                &labels,
            ),
        };
        Self {
            client,
            descs: Arc::new(descs),
            options,
        }
    }
}

#[async_trait]
impl Collector for InstanceStatsCollector {
    fn name(&self) -> &'static str {
        KIND
    }

    fn describe(&self) -> Vec<Arc<MetricDescriptor>> {
        vec![
            self.descs.cpu_usage.clone(),
            self.descs.disk_io.clone(),
            self.descs.network_in.clone(),
            self.descs.network_out.clone(),
        ]
    }

    async fn collect(&self, sink: MetricSink) -> Result<CollectReport, CollectError> {
        let instances = self
            .client
            .list_instances()
            .await
            .map_err(enumeration_failed(KIND))?;
        tracing::debug!(collector = KIND, instances = instances.len(), "enumerated");

        let mut fan = FanOut::bounded(KIND, self.options.concurrency_limit);
        for instance in instances {
            let client = self.client.clone();
            let descs = self.descs.clone();
            let sink = sink.clone();
            let reporter = fan.reporter();
            fan.spawn(async move {
                let id = instance.id.to_string();
                let stats = client
                    .get_instance_stats(instance.id)
                    .await
                    .map_err(|source| CollectError::DetailFetch {
                        kind: KIND,
                        id: id.clone(),
                        source,
                    })?;
                let labels = vec![id, instance.label, instance.region];
                emit_latest(&descs, &sink, &reporter, &labels, stats.data);
                Ok(())
            })
            .await;
        }
        Ok(fan.join().await)
    }
}

fn emit_latest(
    descs: &Descs,
    sink: &MetricSink,
    reporter: &ErrorReporter,
    labels: &[String],
    data: InstanceStatsData,
) {
    let with_type = |t: &str| {
        let mut l = labels.to_vec();
        l.push(t.to_string());
        l
    };
    let readings: [(&'static str, Vec<Point>, &Arc<MetricDescriptor>, Vec<String>); 5] = [
        ("cpu", data.cpu, &descs.cpu_usage, labels.to_vec()),
        ("io", data.io.io, &descs.disk_io, with_type("io")),
        ("swap", data.io.swap, &descs.disk_io, with_type("swap")),
        ("ipv4_in", data.netv4.in_, &descs.network_in, labels.to_vec()),
        ("ipv4_out", data.netv4.out, &descs.network_out, labels.to_vec()),
    ];
    for (family, points, desc, label_values) in readings {
        match TimeSeries::new(points).latest() {
            Ok(value) => {
                sink.emit(desc, value, label_values);
            }
            Err(source) => reporter.report(CollectError::EmptySeries {
                kind: KIND,
                id: labels[0].clone(),
                family,
                source,
            }),
        }
    }
}

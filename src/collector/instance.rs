// Compute instances: count plus 24h CPU, disk, swap and IPv4 summaries per instance

use async_trait::async_trait;
use std::sync::Arc;

use super::{CollectReport, Collector, CollectorOptions, ErrorReporter, FanOut, aggregate_labels, enumeration_failed};
use crate::client::ResourceClient;
use crate::error::{CollectError, EmptySeriesError};
use crate::metrics::{MetricDescriptor, MetricSink, fq_name};
use crate::models::InstanceStatsData;
use crate::series::TimeSeries;

const KIND: &str = "instance";

struct Descs {
    count: Arc<MetricDescriptor>,
    cpu_avg: Arc<MetricDescriptor>,
    cpu_max: Arc<MetricDescriptor>,
    io_sum: Arc<MetricDescriptor>,
    io_avg: Arc<MetricDescriptor>,
    swap_sum: Arc<MetricDescriptor>,
    swap_avg: Arc<MetricDescriptor>,
    ipv4_rx_sum: Arc<MetricDescriptor>,
    ipv4_rx_avg: Arc<MetricDescriptor>,
    ipv4_tx_sum: Arc<MetricDescriptor>,
    ipv4_tx_avg: Arc<MetricDescriptor>,
}

/// Statistic families of one instance's stats window. Each is emitted on its own,
/// so an empty family only drops its own samples.
#[derive(Debug, Clone, Copy)]
enum Family {
    Cpu,
    Io,
    Swap,
    Ipv4In,
    Ipv4Out,
}

impl Family {
    fn name(&self) -> &'static str {
        match self {
            Self::Cpu => "cpu",
            Self::Io => "io",
            Self::Swap => "swap",
            Self::Ipv4In => "ipv4_in",
            Self::Ipv4Out => "ipv4_out",
        }
    }
}

pub struct InstanceCollector {
    client: Arc<dyn ResourceClient>,
    descs: Arc<Descs>,
    options: CollectorOptions,
}

impl InstanceCollector {
    pub fn new(client: Arc<dyn ResourceClient>, options: CollectorOptions) -> Self {
        let labels = ["id", "label", "region"];
        let gauge = |name: &str, help: &str| MetricDescriptor::gauge(fq_name(KIND, name), help, &labels);
        let descs = Descs {
            count: gauge("count", "The total number of Linodes"),
            cpu_avg: gauge("cpu_average_utilization", "CPU average utilization value for past 24 hours"),
            cpu_max: gauge("cpu_max_utilization", "CPU max utilization value for past 24 hours"),
            io_sum: gauge("io_total_blocks", "IO total blocks written in past 24 hours"),
            io_avg: gauge("io_average_blocks", "IO average blocks written in past 24 hours"),
            swap_sum: gauge("swap_total_blocks", "Swap total blocks written in past 24 hours"),
            swap_avg: gauge("swap_average_blocks", "Swap average blocks written in past 24 hours"),
            ipv4_rx_sum: gauge("ipv4_total_bits_received", "IPv4 total bits received over past 24 hours"),
            ipv4_rx_avg: gauge("ipv4_average_bits_received", "IPv4 average bits received over past 24 hours"),
            ipv4_tx_sum: gauge("ipv4_total_bits_sent", "IPv4 total bits sent over past 24 hours"),
            ipv4_tx_avg: gauge("ipv4_average_bits_sent", "IPv4 average bits sent over past 24 hours"),
        };
        Self {
            client,
            descs: Arc::new(descs),
            options,
        }
    }
}

#[async_trait]
impl Collector for InstanceCollector {
    fn name(&self) -> &'static str {
        KIND
    }

    fn describe(&self) -> Vec<Arc<MetricDescriptor>> {
        let d = &self.descs;
        vec![
            d.count.clone(),
            d.cpu_avg.clone(),
            d.cpu_max.clone(),
            d.io_sum.clone(),
            d.io_avg.clone(),
            d.swap_sum.clone(),
            d.swap_avg.clone(),
            d.ipv4_rx_sum.clone(),
            d.ipv4_rx_avg.clone(),
            d.ipv4_tx_sum.clone(),
            d.ipv4_tx_avg.clone(),
        ]
    }

    async fn collect(&self, sink: MetricSink) -> Result<CollectReport, CollectError> {
        let instances = self
            .client
            .list_instances()
            .await
            .map_err(enumeration_failed(KIND))?;
        tracing::debug!(collector = KIND, instances = instances.len(), "enumerated");

        sink.emit(
            &self.descs.count,
            instances.len() as f64,
            aggregate_labels(&self.descs.count),
        );

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
                emit_families(&descs, &sink, &reporter, &labels, stats.data);
                Ok(())
            })
            .await;
        }
        Ok(fan.join().await)
    }
}

fn emit_families(
    descs: &Descs,
    sink: &MetricSink,
    reporter: &ErrorReporter,
    labels: &[String],
    data: InstanceStatsData,
) {
    let families = [
        (Family::Cpu, data.cpu),
        (Family::Io, data.io.io),
        (Family::Swap, data.io.swap),
        (Family::Ipv4In, data.netv4.in_),
        (Family::Ipv4Out, data.netv4.out),
    ];
    for (family, points) in families {
        let series = TimeSeries::new(points);
        if let Err(source) = emit_family(descs, sink, labels, family, &series) {
            reporter.report(CollectError::EmptySeries {
                kind: KIND,
                id: labels[0].clone(),
                family: family.name(),
                source,
            });
        }
    }
}

fn emit_family(
    descs: &Descs,
    sink: &MetricSink,
    labels: &[String],
    family: Family,
    series: &TimeSeries,
) -> Result<(), EmptySeriesError> {
    match family {
        Family::Cpu => {
            let (avg, max) = (series.average()?, series.max()?);
            sink.emit(&descs.cpu_avg, avg, labels.to_vec());
            sink.emit(&descs.cpu_max, max, labels.to_vec());
            Ok(())
        }
        Family::Io => emit_sum_avg(sink, &descs.io_sum, &descs.io_avg, labels, series),
        Family::Swap => emit_sum_avg(sink, &descs.swap_sum, &descs.swap_avg, labels, series),
        Family::Ipv4In => emit_sum_avg(sink, &descs.ipv4_rx_sum, &descs.ipv4_rx_avg, labels, series),
        Family::Ipv4Out => emit_sum_avg(sink, &descs.ipv4_tx_sum, &descs.ipv4_tx_avg, labels, series),
    }
}

// An empty window has a sum of 0 but no average; both are skipped rather than reporting a bare 0.
fn emit_sum_avg(
    sink: &MetricSink,
    sum_desc: &Arc<MetricDescriptor>,
    avg_desc: &Arc<MetricDescriptor>,
    labels: &[String],
    series: &TimeSeries,
) -> Result<(), EmptySeriesError> {
    let avg = series.average()?;
    sink.emit(sum_desc, series.sum(), labels.to_vec());
    sink.emit(avg_desc, avg, labels.to_vec());
    Ok(())
}

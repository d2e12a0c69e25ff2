// NodeBalancers: count plus this month's transfer totals

use async_trait::async_trait;
use std::sync::Arc;

use super::{CollectReport, Collector, FanOut, aggregate_labels, enumeration_failed};
use crate::client::ResourceClient;
use crate::error::CollectError;
use crate::metrics::{MetricDescriptor, MetricSink, fq_name};
use crate::models::NodeBalancer;

const KIND: &str = "nodebalancer";

struct Descs {
    count: Arc<MetricDescriptor>,
    transfer_total: Arc<MetricDescriptor>,
    transfer_out: Arc<MetricDescriptor>,
    transfer_in: Arc<MetricDescriptor>,
}

pub struct NodeBalancerCollector {
    client: Arc<dyn ResourceClient>,
    descs: Arc<Descs>,
}

impl NodeBalancerCollector {
    pub fn new(client: Arc<dyn ResourceClient>) -> Self {
        let labels = ["id", "label", "region"];
        let gauge = |name: &str, help: &str| MetricDescriptor::gauge(fq_name(KIND, name), help, &labels);
        let descs = Descs {
            count: gauge("count", "Total number of NodeBalancers"),
            transfer_total: gauge("transfer_total_bytes", "MB transferred this month by the NodeBalancer"),
            transfer_out: gauge("transfer_out_bytes", "MB transferred out this month by the NodeBalancer"),
            transfer_in: gauge("transfer_in_bytes", "MB transferred in this month by the NodeBalancer"),
        };
        Self {
            client,
            descs: Arc::new(descs),
        }
    }
}

#[async_trait]
impl Collector for NodeBalancerCollector {
    fn name(&self) -> &'static str {
        KIND
    }

    fn describe(&self) -> Vec<Arc<MetricDescriptor>> {
        vec![
            self.descs.count.clone(),
            self.descs.transfer_total.clone(),
            self.descs.transfer_out.clone(),
            self.descs.transfer_in.clone(),
        ]
    }

    async fn collect(&self, sink: MetricSink) -> Result<CollectReport, CollectError> {
        let nodebalancers = self
            .client
            .list_node_balancers()
            .await
            .map_err(enumeration_failed(KIND))?;
        tracing::debug!(collector = KIND, nodebalancers = nodebalancers.len(), "enumerated");

        sink.emit(
            &self.descs.count,
            nodebalancers.len() as f64,
            aggregate_labels(&self.descs.count),
        );

        let mut fan = FanOut::unbounded(KIND);
        for nb in nodebalancers {
            let descs = self.descs.clone();
            let sink = sink.clone();
            fan.spawn(async move { emit_transfer(&descs, &sink, nb) }).await;
        }
        Ok(fan.join().await)
    }
}

fn emit_transfer(descs: &Descs, sink: &MetricSink, nb: NodeBalancer) -> Result<(), CollectError> {
    let id = nb.id.to_string();
    let label = nb.label.ok_or_else(|| CollectError::MissingField {
        kind: KIND,
        id: id.clone(),
        field: "label",
    })?;
    let labels = vec![id, label, nb.region];
    let totals = [
        (&descs.transfer_total, nb.transfer.total),
        (&descs.transfer_out, nb.transfer.out),
        (&descs.transfer_in, nb.transfer.in_),
    ];
    for (desc, value) in totals {
        if let Some(v) = value {
            sink.emit(desc, v, labels.clone());
        }
    }
    Ok(())
}

// Support tickets counted by status

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;

use super::{CollectReport, Collector, enumeration_failed};
use crate::client::ResourceClient;
use crate::error::CollectError;
use crate::metrics::{MetricDescriptor, MetricSink, fq_name};
use crate::models::TicketStatus;

const KIND: &str = "ticket";

pub struct TicketCollector {
    client: Arc<dyn ResourceClient>,
    count: Arc<MetricDescriptor>,
}

impl TicketCollector {
    pub fn new(client: Arc<dyn ResourceClient>) -> Self {
        Self {
            client,
            count: MetricDescriptor::gauge(fq_name("tickets", "count"), "Number of support tickets", &["status"]),
        }
    }
}

#[async_trait]
impl Collector for TicketCollector {
    fn name(&self) -> &'static str {
        KIND
    }

    fn describe(&self) -> Vec<Arc<MetricDescriptor>> {
        vec![self.count.clone()]
    }

    async fn collect(&self, sink: MetricSink) -> Result<CollectReport, CollectError> {
        let tickets = self
            .client
            .list_tickets()
            .await
            .map_err(enumeration_failed(KIND))?;
        tracing::debug!(collector = KIND, tickets = tickets.len(), "enumerated");

        let mut totals: BTreeMap<TicketStatus, u64> = BTreeMap::new();
        for ticket in &tickets {
            *totals.entry(ticket.status).or_default() += 1;
        }
        for (status, count) in totals {
            sink.emit(&self.count, count as f64, vec![status.as_str().to_string()]);
        }
        Ok(CollectReport {
            tasks: 1,
            errors: Vec::new(),
        })
    }
}

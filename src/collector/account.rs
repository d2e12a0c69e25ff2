// Account balance

use async_trait::async_trait;
use std::sync::Arc;

use super::{CollectReport, Collector, enumeration_failed};
use crate::client::ResourceClient;
use crate::error::CollectError;
use crate::metrics::{MetricDescriptor, MetricSink, fq_name};

const KIND: &str = "account";

pub struct AccountCollector {
    client: Arc<dyn ResourceClient>,
    balance: Arc<MetricDescriptor>,
    uninvoiced: Arc<MetricDescriptor>,
}

impl AccountCollector {
    pub fn new(client: Arc<dyn ResourceClient>) -> Self {
        let labels = ["company", "email"];
        Self {
            client,
            balance: MetricDescriptor::gauge(fq_name(KIND, "balance"), "Balance of account", &labels),
            uninvoiced: MetricDescriptor::gauge(
                fq_name(KIND, "balance_uninvoiced"),
                "Uninvoiced balance of account",
                &labels,
            ),
        }
    }
}

#[async_trait]
impl Collector for AccountCollector {
    fn name(&self) -> &'static str {
        KIND
    }

    fn describe(&self) -> Vec<Arc<MetricDescriptor>> {
        vec![self.balance.clone(), self.uninvoiced.clone()]
    }

    async fn collect(&self, sink: MetricSink) -> Result<CollectReport, CollectError> {
        let account = self
            .client
            .get_account()
            .await
            .map_err(enumeration_failed(KIND))?;

        let labels = vec![account.company, account.email];
        if let Some(uninvoiced) = account.balance_uninvoiced {
            sink.emit(&self.uninvoiced, uninvoiced, labels.clone());
        }
        sink.emit(&self.balance, account.balance, labels);
        Ok(CollectReport {
            tasks: 1,
            errors: Vec::new(),
        })
    }
}

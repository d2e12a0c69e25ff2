// Concrete metric values and the shared output conduit they travel on.

use std::sync::Arc;
use tokio::sync::mpsc;

use super::MetricDescriptor;
use crate::error::SampleError;

/// A descriptor bound to a value and one label value per label key.
#[derive(Debug, Clone)]
pub struct MetricSample {
    desc: Arc<MetricDescriptor>,
    value: f64,
    label_values: Vec<String>,
}

impl MetricSample {
    pub fn new(
        desc: &Arc<MetricDescriptor>,
        value: f64,
        label_values: Vec<String>,
    ) -> Result<Self, SampleError> {
        if label_values.len() != desc.label_keys().len() {
            return Err(SampleError {
                name: desc.name().to_string(),
                expected: desc.label_keys().len(),
                got: label_values.len(),
            });
        }
        Ok(Self {
            desc: desc.clone(),
            value,
            label_values,
        })
    }

    pub fn desc(&self) -> &Arc<MetricDescriptor> {
        &self.desc
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn label_values(&self) -> &[String] {
        &self.label_values
    }

    /// Label value for `key`, if the descriptor declares it.
    pub fn label(&self, key: &str) -> Option<&str> {
        self.desc
            .label_keys()
            .iter()
            .position(|k| k == key)
            .map(|i| self.label_values[i].as_str())
    }
}

/// Many-producer handle onto one scrape's output stream.
///
/// Sends never block: the conduit is unbounded, and once the scrape has stopped
/// listening (deadline passed) further samples are discarded.
#[derive(Debug, Clone)]
pub struct MetricSink {
    tx: mpsc::UnboundedSender<MetricSample>,
}

impl MetricSink {
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<MetricSample>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// Builds and sends one sample. Returns false if it was dropped.
    pub fn emit(&self, desc: &Arc<MetricDescriptor>, value: f64, label_values: Vec<String>) -> bool {
        let sample = match MetricSample::new(desc, value, label_values) {
            Ok(s) => s,
            Err(e) => {
                tracing::warn!(error = %e, "dropping invalid sample");
                return false;
            }
        };
        if self.tx.send(sample).is_err() {
            tracing::debug!(metric = desc.name(), "scrape no longer listening; sample discarded");
            return false;
        }
        true
    }
}

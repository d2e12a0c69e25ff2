// Collector registry: runs every enabled collector concurrently for one scrape
// and merges their samples under a single deadline.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use futures_util::future::join_all;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::instrument;

use crate::client::ResourceClient;
use crate::collector::{self, Collector, CollectorOptions};
use crate::error::{CollectError, RegistryError};
use crate::metrics::{MetricDescriptor, MetricSample, MetricSink, render};

pub struct Registry {
    collectors: Vec<Arc<dyn Collector>>,
    descriptors: Vec<Arc<MetricDescriptor>>,
    names: HashSet<String>,
    pass_timeout: Duration,
}

impl Registry {
    pub fn new(pass_timeout: Duration) -> Self {
        Self {
            collectors: Vec::new(),
            descriptors: Vec::new(),
            names: HashSet::new(),
            pass_timeout,
        }
    }

    /// Adds `collector`. Fails without registering anything if one of its
    /// descriptor names is already taken.
    pub fn register(&mut self, collector: Arc<dyn Collector>) -> Result<(), RegistryError> {
        let descs = collector.describe();
        let mut incoming = HashSet::new();
        for d in &descs {
            if self.names.contains(d.name()) || !incoming.insert(d.name().to_string()) {
                return Err(RegistryError::DuplicateDescriptor(d.name().to_string()));
            }
        }
        tracing::debug!(collector = collector.name(), descriptors = descs.len(), "registered");
        self.names.extend(incoming);
        self.descriptors.extend(descs);
        self.collectors.push(collector);
        Ok(())
    }

    /// Builds and registers the named collectors; an empty list enables every known one.
    /// Unknown names are logged and skipped. Returns how many were registered.
    pub fn register_enabled(
        &mut self,
        names: &[String],
        client: Arc<dyn ResourceClient>,
        options: CollectorOptions,
    ) -> Result<usize, RegistryError> {
        let names: Vec<&str> = if names.is_empty() {
            collector::ALL.to_vec()
        } else {
            names.iter().map(String::as_str).collect()
        };
        let mut registered = 0;
        for name in names {
            match collector::build(name, client.clone(), options) {
                Some(c) => {
                    self.register(c)?;
                    registered += 1;
                }
                None => {
                    let e = RegistryError::UnknownCollector(name.to_string());
                    tracing::warn!(error = %e, known = ?collector::ALL, "skipping collector");
                }
            }
        }
        Ok(registered)
    }

    /// Union of every registered collector's descriptors, in registration order.
    pub fn describe_all(&self) -> &[Arc<MetricDescriptor>] {
        &self.descriptors
    }

    pub fn collector_names(&self) -> Vec<&'static str> {
        self.collectors.iter().map(|c| c.name()).collect()
    }

    /// One scrape: every collector runs in its own task. Collectors still running
    /// at the deadline are cancelled; whatever they emitted before that is kept.
    #[instrument(skip(self), fields(collectors = self.collectors.len()))]
    pub async fn collect_all(&self) -> Vec<MetricSample> {
        let started = Instant::now();
        let (sink, mut rx) = MetricSink::channel();

        let mut handles: Vec<(&'static str, JoinHandle<()>)> = self
            .collectors
            .iter()
            .map(|c| {
                let c = c.clone();
                let sink = sink.clone();
                (c.name(), tokio::spawn(run_collector(c, sink)))
            })
            .collect();
        drop(sink);

        let waited = tokio::time::timeout(
            self.pass_timeout,
            join_all(handles.iter_mut().map(|(_, handle)| handle)),
        )
        .await;

        match waited {
            Ok(results) => {
                for ((name, _), result) in handles.iter().zip(results) {
                    if let Err(e) = result
                        && e.is_panic()
                    {
                        tracing::error!(collector = name, error = %e, "collector panicked");
                    }
                }
            }
            Err(_) => {
                let pending: Vec<&str> = handles
                    .iter()
                    .filter(|(_, h)| !h.is_finished())
                    .map(|(name, _)| *name)
                    .collect();
                let e = CollectError::Timeout(self.pass_timeout);
                tracing::warn!(error = %e, pending = ?pending, "scrape truncated");
                for (_, handle) in &handles {
                    handle.abort();
                }
            }
        }

        let mut samples = Vec::new();
        while let Ok(sample) = rx.try_recv() {
            if self.names.contains(sample.desc().name()) {
                samples.push(sample);
            } else {
                tracing::warn!(metric = sample.desc().name(), "dropping sample with undescribed metric");
            }
        }
        tracing::debug!(
            samples = samples.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "scrape finished"
        );
        samples
    }

    /// Runs [`Registry::collect_all`] and renders the result in the text exposition format.
    pub async fn scrape(&self) -> String {
        let samples = self.collect_all().await;
        render(&self.descriptors, samples)
    }
}

async fn run_collector(collector: Arc<dyn Collector>, sink: MetricSink) {
    let started = Instant::now();
    match collector.collect(sink).await {
        Ok(report) => tracing::debug!(
            collector = collector.name(),
            tasks = report.tasks,
            soft_errors = report.errors.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "collection pass finished"
        ),
        Err(e) => tracing::warn!(collector = collector.name(), error = %e, "collection pass failed"),
    }
}

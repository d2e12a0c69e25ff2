// LKE clusters, their node pools, and the readiness of each pool node

use async_trait::async_trait;
use std::sync::Arc;

use super::{CollectReport, Collector, ErrorReporter, FanOut, enumeration_failed};
use crate::client::ResourceClient;
use crate::error::CollectError;
use crate::metrics::{MetricDescriptor, MetricSink, fq_name};
use crate::models::{LkeCluster, LkeNodePool, LkeNodeStatus};

const KIND: &str = "kubernetes";

struct Descs {
    up: Arc<MetricDescriptor>,
    pool: Arc<MetricDescriptor>,
    linode: Arc<MetricDescriptor>,
}

pub struct KubernetesCollector {
    client: Arc<dyn ResourceClient>,
    descs: Arc<Descs>,
}

impl KubernetesCollector {
    pub fn new(client: Arc<dyn ResourceClient>) -> Self {
        let descs = Descs {
            up: MetricDescriptor::counter(
                fq_name(KIND, "count"),
                "Status of Kubernetes cluster",
                &["id", "label", "region", "version"],
            ),
            pool: MetricDescriptor::gauge(
                fq_name(KIND, "pool"),
                "Size of Kubernetes node pool",
                &["cluster_id", "id", "type"],
            ),
            linode: MetricDescriptor::counter(
                fq_name(KIND, "linode_up"),
                "Status of Kubernetes node pool Linode",
                &["cluster_id", "pool_id", "id", "status"],
            ),
        };
        Self {
            client,
            descs: Arc::new(descs),
        }
    }
}

#[async_trait]
impl Collector for KubernetesCollector {
    fn name(&self) -> &'static str {
        KIND
    }

    fn describe(&self) -> Vec<Arc<MetricDescriptor>> {
        vec![
            self.descs.up.clone(),
            self.descs.pool.clone(),
            self.descs.linode.clone(),
        ]
    }

    async fn collect(&self, sink: MetricSink) -> Result<CollectReport, CollectError> {
        let clusters = self
            .client
            .list_lke_clusters()
            .await
            .map_err(enumeration_failed(KIND))?;
        tracing::debug!(collector = KIND, clusters = clusters.len(), "enumerated");

        let mut fan = FanOut::unbounded(KIND);
        for cluster in clusters {
            let client = self.client.clone();
            let descs = self.descs.clone();
            let sink = sink.clone();
            let reporter = fan.reporter();
            fan.spawn(async move { collect_cluster(client, descs, sink, reporter, cluster).await })
                .await;
        }
        Ok(fan.join().await)
    }
}

async fn collect_cluster(
    client: Arc<dyn ResourceClient>,
    descs: Arc<Descs>,
    sink: MetricSink,
    reporter: ErrorReporter,
    cluster: LkeCluster,
) -> Result<(), CollectError> {
    let cluster_id = cluster.id.to_string();
    sink.emit(
        &descs.up,
        1.0,
        vec![
            cluster_id.clone(),
            cluster.label,
            cluster.region,
            cluster.k8s_version,
        ],
    );

    let pools = client
        .list_lke_pools(cluster.id)
        .await
        .map_err(|source| CollectError::DetailFetch {
            kind: KIND,
            id: cluster_id.clone(),
            source,
        })?;
    tracing::debug!(collector = KIND, cluster = %cluster_id, pools = pools.len(), "node pools");

    for pool in pools {
        emit_pool(&descs, &sink, &reporter, &cluster_id, pool);
    }
    Ok(())
}

fn emit_pool(
    descs: &Descs,
    sink: &MetricSink,
    reporter: &ErrorReporter,
    cluster_id: &str,
    pool: LkeNodePool,
) {
    let pool_id = pool.id.to_string();
    sink.emit(
        &descs.pool,
        pool.count as f64,
        vec![cluster_id.to_string(), pool_id.clone(), pool.type_],
    );
    for node in pool.nodes {
        let Some(instance_id) = node.instance_id else {
            reporter.report(CollectError::MissingField {
                kind: KIND,
                id: node.id,
                field: "instance_id",
            });
            continue;
        };
        let ready = if node.status == LkeNodeStatus::Ready { 1.0 } else { 0.0 };
        sink.emit(
            &descs.linode,
            ready,
            vec![
                cluster_id.to_string(),
                pool_id.clone(),
                instance_id.to_string(),
                node.status.as_str().to_string(),
            ],
        );
    }
}

// Resource Client: the remote API the collectors enumerate and fetch from

mod linode;

pub use linode::LinodeClient;

use async_trait::async_trait;

use crate::error::ClientError;
use crate::models::{
    Account, Bucket, Instance, InstanceStats, LkeCluster, LkeNodePool, NodeBalancer,
    ObjectStorageEndpoint, QuotaUsage, Ticket, Volume,
};

/// Every call may fail with a transport or authorization error; callers treat both alike.
#[async_trait]
pub trait ResourceClient: Send + Sync {
    async fn get_account(&self) -> Result<Account, ClientError>;

    async fn list_instances(&self) -> Result<Vec<Instance>, ClientError>;

    /// Last 24h of per-family series for one instance.
    async fn get_instance_stats(&self, id: u64) -> Result<InstanceStats, ClientError>;

    async fn list_node_balancers(&self) -> Result<Vec<NodeBalancer>, ClientError>;

    async fn list_buckets(&self) -> Result<Vec<Bucket>, ClientError>;

    /// Endpoints that expose an S3 hostname. Others are filtered out.
    async fn list_object_storage_endpoints(&self) -> Result<Vec<ObjectStorageEndpoint>, ClientError>;

    async fn get_object_storage_quota_usage(&self, quota_id: &str) -> Result<QuotaUsage, ClientError>;

    async fn list_tickets(&self) -> Result<Vec<Ticket>, ClientError>;

    async fn list_volumes(&self) -> Result<Vec<Volume>, ClientError>;

    async fn list_lke_clusters(&self) -> Result<Vec<LkeCluster>, ClientError>;

    async fn list_lke_pools(&self, cluster_id: u64) -> Result<Vec<LkeNodePool>, ClientError>;
}

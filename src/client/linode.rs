// Linode API v4 over reqwest

use async_trait::async_trait;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::instrument;

use super::ResourceClient;
use crate::config::LinodeConfig;
use crate::error::ClientError;
use crate::models::{
    Account, Bucket, Instance, InstanceStats, LkeCluster, LkeNodePool, NodeBalancer,
    ObjectStorageEndpoint, QuotaUsage, Ticket, Volume,
};
use crate::version::{NAME, VERSION};

/// Paginated list envelope.
#[derive(Debug, Deserialize)]
struct Page<T> {
    data: Vec<T>,
    #[serde(default = "first_page")]
    pages: u32,
}

fn first_page() -> u32 {
    1
}

pub struct LinodeClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
    page_size: u32,
}

impl LinodeClient {
    pub fn new(config: &LinodeConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(format!("{}/{}", NAME, VERSION))
            .build()?;
        Ok(Self {
            http,
            base_url: config.api_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
            page_size: config.page_size,
        })
    }

    async fn get<T: DeserializeOwned>(&self, path_and_query: &str) -> Result<T, ClientError> {
        let url = format!("{}{}", self.base_url, path_and_query);
        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(|source| ClientError::Http {
                url: url.clone(),
                source,
            })?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status {
                url,
                status: status.as_u16(),
            });
        }
        tracing::debug!(url = %url, status = status.as_u16(), "linode api response");
        response
            .json::<T>()
            .await
            .map_err(|source| ClientError::Decode { url, source })
    }

    /// Requests pages 1..=`pages`, counting locally; the `page` echoed back is ignored.
    async fn list<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, ClientError> {
        let mut items = Vec::new();
        let mut page = 1;
        loop {
            let resp: Page<T> = self
                .get(&format!("{}?page={}&page_size={}", path, page, self.page_size))
                .await?;
            items.extend(resp.data);
            page += 1;
            if page > resp.pages {
                break;
            }
        }
        Ok(items)
    }
}

#[async_trait]
impl ResourceClient for LinodeClient {
    #[instrument(skip(self), fields(client = "linode", operation = "get_account"))]
    async fn get_account(&self) -> Result<Account, ClientError> {
        self.get("/account").await
    }

    #[instrument(skip(self), fields(client = "linode", operation = "list_instances"))]
    async fn list_instances(&self) -> Result<Vec<Instance>, ClientError> {
        self.list("/linode/instances").await
    }

    #[instrument(skip(self), fields(client = "linode", operation = "get_instance_stats"))]
    async fn get_instance_stats(&self, id: u64) -> Result<InstanceStats, ClientError> {
        self.get(&format!("/linode/instances/{}/stats", id)).await
    }

    #[instrument(skip(self), fields(client = "linode", operation = "list_node_balancers"))]
    async fn list_node_balancers(&self) -> Result<Vec<NodeBalancer>, ClientError> {
        self.list("/nodebalancers").await
    }

    #[instrument(skip(self), fields(client = "linode", operation = "list_buckets"))]
    async fn list_buckets(&self) -> Result<Vec<Bucket>, ClientError> {
        self.list("/object-storage/buckets").await
    }

    #[instrument(skip(self), fields(client = "linode", operation = "list_object_storage_endpoints"))]
    async fn list_object_storage_endpoints(&self) -> Result<Vec<ObjectStorageEndpoint>, ClientError> {
        let endpoints: Vec<ObjectStorageEndpoint> = self.list("/object-storage/endpoints").await?;
        let total = endpoints.len();
        let filtered: Vec<_> = endpoints
            .into_iter()
            .filter(|ep| ep.s3_endpoint.is_some())
            .collect();
        tracing::debug!(total, with_s3_endpoint = filtered.len(), "object storage endpoints");
        Ok(filtered)
    }

    #[instrument(skip(self), fields(client = "linode", operation = "get_object_storage_quota_usage"))]
    async fn get_object_storage_quota_usage(&self, quota_id: &str) -> Result<QuotaUsage, ClientError> {
        self.get(&format!("/object-storage/quotas/{}/usage", quota_id)).await
    }

    #[instrument(skip(self), fields(client = "linode", operation = "list_tickets"))]
    async fn list_tickets(&self) -> Result<Vec<Ticket>, ClientError> {
        self.list("/support/tickets").await
    }

    #[instrument(skip(self), fields(client = "linode", operation = "list_volumes"))]
    async fn list_volumes(&self) -> Result<Vec<Volume>, ClientError> {
        self.list("/volumes").await
    }

    #[instrument(skip(self), fields(client = "linode", operation = "list_lke_clusters"))]
    async fn list_lke_clusters(&self) -> Result<Vec<LkeCluster>, ClientError> {
        self.list("/lke/clusters").await
    }

    #[instrument(skip(self), fields(client = "linode", operation = "list_lke_pools"))]
    async fn list_lke_pools(&self, cluster_id: u64) -> Result<Vec<LkeNodePool>, ClientError> {
        self.list(&format!("/lke/clusters/{}/pools", cluster_id)).await
    }
}

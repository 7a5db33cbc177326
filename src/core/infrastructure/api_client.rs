//! Internal HTTP client for the Proxmox API, authenticated with an API token.

use crate::core::{
    domain::{
        error::{DashError, DashResult},
        model::{
            cluster_resource::ClusterResource,
            guest::{GuestAction, GuestKind},
            node_guest::NodeGuestItem,
            node_list_item::NodeListItem,
            proxmox_connection::ProxmoxConnection,
        },
        value_object::Vmid,
    },
    infrastructure::cluster_api::ClusterApi,
};
use async_trait::async_trait;
use reqwest::{Client, Method, StatusCode, header::AUTHORIZATION};
use serde::{Deserialize, de::DeserializeOwned};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Default upper bound for a single upstream call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Every Proxmox API body is wrapped in `{ "data": ... }`.
#[derive(Debug, Deserialize)]
struct ProxmoxResponse<T> {
    data: Option<T>,
}

/// Internal HTTP client that calls the Proxmox API.
///
/// Each request carries the `Authorization: PVEAPIToken=...` header of the
/// connection. Requests are never retried: a network failure or timeout
/// becomes `DashError::UpstreamUnreachable` and a non-success status becomes
/// `DashError::UpstreamRejected` with the upstream status and body.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http_client: Client,
    connection: Arc<ProxmoxConnection>,
}

impl ApiClient {
    /// Creates a new `ApiClient` with the given per-request timeout.
    ///
    /// # Errors
    /// Returns `DashError::Config` if the HTTP client cannot be built.
    pub fn new(connection: ProxmoxConnection, timeout: Duration) -> DashResult<Self> {
        let http_client = Client::builder()
            .danger_accept_invalid_certs(connection.accept_invalid_certs())
            .timeout(timeout)
            .build()
            .map_err(|e| DashError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            connection: Arc::new(connection),
        })
    }

    /// Returns a reference to the underlying connection details.
    pub fn connection(&self) -> &ProxmoxConnection {
        &self.connection
    }

    /// Performs a GET request and unwraps the `data` member.
    ///
    /// # Errors
    /// Returns `DashError` if the request fails or the response cannot be parsed.
    pub async fn get<T>(
        &self,
        segments: &[&str],
        query: &[(&str, &str)],
    ) -> DashResult<Option<T>>
    where
        T: DeserializeOwned,
    {
        let url = self.endpoint(segments, query)?;
        let body: ProxmoxResponse<T> = self.execute_request(Method::GET, url).await?;
        Ok(body.data)
    }

    /// Performs a POST request without body and returns the raw response body.
    ///
    /// # Errors
    /// Returns `DashError` if the request fails or the response is not JSON.
    pub async fn post(
        &self,
        segments: &[&str],
        query: &[(&str, &str)],
    ) -> DashResult<serde_json::Value> {
        let url = self.endpoint(segments, query)?;
        self.execute_request(Method::POST, url).await
    }

    /// Builds `{base}/api2/json/{segments...}?{query}`, percent-encoding each segment.
    fn endpoint(&self, segments: &[&str], query: &[(&str, &str)]) -> DashResult<Url> {
        let mut url = self.connection.proxmox_url().clone();
        url.path_segments_mut()
            .map_err(|_| DashError::Config("Proxmox URL cannot be a base".to_string()))?
            .pop_if_empty()
            .extend(["api2", "json"])
            .extend(segments);
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    async fn execute_request<T>(&self, method: Method, url: Url) -> DashResult<T>
    where
        T: DeserializeOwned,
    {
        debug!(%method, %url, "proxmox request");

        let response = self
            .http_client
            .request(method, url.clone())
            .header(
                AUTHORIZATION,
                self.connection.api_token().authorization_header(),
            )
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    DashError::UpstreamUnreachable(format!("Request to {} timed out", url))
                } else {
                    DashError::UpstreamUnreachable(format!("HTTP request failed: {}", e))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            debug!(status = status.as_u16(), %url, "proxmox rejected request");
            return Err(DashError::UpstreamRejected {
                status: status.as_u16(),
                body: rejection_body(status, text),
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| DashError::UpstreamPayload(format!("Failed to parse response: {}", e)))
    }
}

/// Upstream error bodies are relayed as JSON when they parse, else as text.
fn rejection_body(status: StatusCode, text: String) -> serde_json::Value {
    if text.trim().is_empty() {
        return serde_json::Value::String(format!(
            "Request failed with status code {}",
            status.as_u16()
        ));
    }
    serde_json::from_str(&text).unwrap_or(serde_json::Value::String(text))
}

#[async_trait]
impl ClusterApi for ApiClient {
    async fn cluster_resources(&self) -> DashResult<Vec<ClusterResource>> {
        let resources = self
            .get::<Vec<ClusterResource>>(&["cluster", "resources"], &[("type", "vm")])
            .await?;
        Ok(resources.unwrap_or_default())
    }

    async fn nodes(&self) -> DashResult<Vec<NodeListItem>> {
        let nodes = self.get::<Vec<NodeListItem>>(&["nodes"], &[]).await?;
        Ok(nodes.unwrap_or_default())
    }

    async fn node_guests(&self, node: &str, kind: GuestKind) -> DashResult<Vec<NodeGuestItem>> {
        let guests = self
            .get::<Vec<NodeGuestItem>>(&["nodes", node, kind.api_segment()], &[])
            .await?;
        Ok(guests.unwrap_or_default())
    }

    async fn change_status(
        &self,
        node: &str,
        vmid: Vmid,
        action: GuestAction,
    ) -> DashResult<serde_json::Value> {
        let vmid = vmid.to_string();
        self.post(
            &[
                "nodes",
                node,
                action.kind().api_segment(),
                vmid.as_str(),
                "status",
                action.api_segment(),
            ],
            action.query(),
        )
        .await
    }
}

//! The Railway GraphQL client.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::debug;

use railscale_core::{MetricsReport, ScaleBackend};

use crate::error::RailwayError;

/// Railway's public GraphQL endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://backboard.railway.com/graphql/v2";

/// Scoped to a project rather than an account; the least privilege
/// Railway offers for this kind of automation.
const AUTH_HEADER: &str = "Project-Access-Token";

/// Metrics come back in one-minute buckets; finer granularity is not
/// available over this window size anyway.
const METRICS_QUERY: &str = r#"query($id:String!,$from:Time!,$to:Time!){service(id:$id){replicas instances{metrics(from:$from,to:$to,interval:"1m"){cpuPercent}}}}"#;

const SCALE_MUTATION: &str = r#"mutation($id:String!,$count:Int!){serviceReplicaScale(input:{serviceId:$id,replicas:$count}){id}}"#;

#[derive(serde::Serialize)]
struct GqlRequest<'a> {
    query: &'a str,
    variables: serde_json::Value,
}

#[derive(Deserialize)]
struct GqlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GqlError>,
}

#[derive(Deserialize)]
struct GqlError {
    message: String,
}

// service(id) { replicas instances { metrics { cpuPercent } } } —
// only the fields the autoscaler reads.
#[derive(Debug, Deserialize)]
struct MetricsData {
    service: ServiceData,
}

#[derive(Debug, Deserialize)]
struct ServiceData {
    replicas: u32,
    instances: Vec<InstanceData>,
}

#[derive(Debug, Deserialize)]
struct InstanceData {
    metrics: Vec<MetricPoint>,
}

#[derive(Debug, Deserialize)]
struct MetricPoint {
    #[serde(rename = "cpuPercent")]
    cpu_percent: f64,
}

/// One Railway service, one credential, one bounded HTTP client.
pub struct RailwayClient {
    http: reqwest::Client,
    endpoint: String,
    token: String,
    service_id: String,
}

impl RailwayClient {
    /// Build a client for `service_id`.
    ///
    /// Every request is bounded by `timeout`; a hung remote call must
    /// never stall the control loop past its network budget.
    pub fn new(
        endpoint: impl Into<String>,
        token: impl Into<String>,
        service_id: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, RailwayError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            endpoint: endpoint.into(),
            token: token.into(),
            service_id: service_id.into(),
        })
    }

    async fn graphql<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: serde_json::Value,
    ) -> Result<T, RailwayError> {
        let response = self
            .http
            .post(&self.endpoint)
            .header(AUTH_HEADER, &self.token)
            .json(&GqlRequest { query, variables })
            .send()
            .await?
            .error_for_status()?
            .json::<GqlResponse<T>>()
            .await?;
        unwrap_response(response)
    }
}

/// Surface GraphQL-level errors, which arrive inside a 200 response.
fn unwrap_response<T>(response: GqlResponse<T>) -> Result<T, RailwayError> {
    if !response.errors.is_empty() {
        let messages: Vec<_> = response.errors.into_iter().map(|e| e.message).collect();
        return Err(RailwayError::Api(messages.join("; ")));
    }
    response.data.ok_or(RailwayError::MissingData)
}

#[async_trait]
impl ScaleBackend for RailwayClient {
    async fn fetch_metrics(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> anyhow::Result<MetricsReport> {
        debug!(service = %self.service_id, %from, %to, "querying railway metrics");
        let variables = json!({
            "id": self.service_id,
            "from": from.to_rfc3339(),
            "to": to.to_rfc3339(),
        });
        let data: MetricsData = self.graphql(METRICS_QUERY, variables).await?;
        Ok(flatten(data))
    }

    async fn apply_replicas(&self, desired: u32) -> anyhow::Result<()> {
        debug!(service = %self.service_id, desired, "scaling railway service");
        let variables = json!({
            "id": self.service_id,
            "count": desired,
        });
        let _: serde_json::Value = self.graphql(SCALE_MUTATION, variables).await?;
        Ok(())
    }
}

/// Collect every sample from every instance into one flat list.
fn flatten(data: MetricsData) -> MetricsReport {
    let replicas = data.service.replicas;
    let cpu_samples = data
        .service
        .instances
        .into_iter()
        .flat_map(|instance| instance.metrics)
        .map(|point| point.cpu_percent)
        .collect();
    MetricsReport {
        cpu_samples,
        replicas,
    }
}

// src/api/http_api.rs

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{
    api::{DashboardApi, INITIALIZE_PATH, METRICS_PATH, OPTIMIZE_PATH, SLA_REQUEST_PATH},
    common::error::AppError,
    config::DashboardConfig,
    models::{
        actions::{InitializeResponse, OptimizeResponse, SlaRequest, SlaResponse},
        metrics::MetricsPayload,
    },
};

#[derive(Clone)]
pub struct HttpDashboardApi {
    client: Client,
    base_url: String,
}

impl HttpDashboardApi {
    pub fn new(config: &DashboardConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .user_agent(concat!("arbitrage-dashboard/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self::with_client(client, &config.api_base))
    }

    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

// FastAPI devolve `{"detail": "..."}` nos HTTPException; o backend também usa
// `message` e `error` em alguns caminhos.
fn error_detail(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    ["detail", "message", "error"]
        .iter()
        .find_map(|key| value.get(*key).and_then(Value::as_str))
        .map(str::to_string)
}

async fn decode<T: DeserializeOwned>(endpoint: &'static str, response: Response) -> Result<T, AppError> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        return Err(AppError::UnexpectedStatus {
            endpoint,
            status,
            detail: error_detail(&body),
        });
    }

    Ok(serde_json::from_str(&body)?)
}

#[async_trait]
impl DashboardApi for HttpDashboardApi {
    async fn initialize(&self) -> Result<InitializeResponse, AppError> {
        let response = self.client.post(self.url(INITIALIZE_PATH)).send().await?;
        decode(INITIALIZE_PATH, response).await
    }

    async fn optimize(&self) -> Result<OptimizeResponse, AppError> {
        let response = self.client.post(self.url(OPTIMIZE_PATH)).send().await?;
        decode(OPTIMIZE_PATH, response).await
    }

    async fn request_sla(&self, request: &SlaRequest) -> Result<SlaResponse, AppError> {
        let response = self
            .client
            .post(self.url(SLA_REQUEST_PATH))
            .json(request)
            .send()
            .await?;
        decode(SLA_REQUEST_PATH, response).await
    }

    async fn fetch_metrics(&self) -> Result<MetricsPayload, AppError> {
        let response = self.client.get(self.url(METRICS_PATH)).send().await?;
        decode(METRICS_PATH, response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_prefers_fastapi_field() {
        assert_eq!(
            error_detail(r#"{"detail":"System not initialized"}"#).as_deref(),
            Some("System not initialized")
        );
        assert_eq!(error_detail(r#"{"message":"nope"}"#).as_deref(), Some("nope"));
        assert_eq!(error_detail("<html>502</html>"), None);
        assert_eq!(error_detail(r#"{"detail":[{"loc":["body"]}]}"#), None);
    }

    #[test]
    fn base_url_trailing_slash_is_ignored() {
        let api = HttpDashboardApi::with_client(Client::new(), "http://localhost:8000/");
        assert_eq!(api.url(METRICS_PATH), "http://localhost:8000/api/dashboard/metrics");
    }
}

// src/api.rs

pub mod http_api;
pub use http_api::HttpDashboardApi;

use async_trait::async_trait;

use crate::{
    common::error::AppError,
    models::{
        actions::{InitializeResponse, OptimizeResponse, SlaRequest, SlaResponse},
        metrics::MetricsPayload,
    },
};

pub const INITIALIZE_PATH: &str = "/api/initialize";
pub const OPTIMIZE_PATH: &str = "/api/optimize";
pub const SLA_REQUEST_PATH: &str = "/api/sla/request";
pub const METRICS_PATH: &str = "/api/dashboard/metrics";

// O backend visto pelo controller. Cada método é uma única requisição;
// status fora de 2xx já volta como erro.
#[async_trait]
pub trait DashboardApi: Send + Sync {
    async fn initialize(&self) -> Result<InitializeResponse, AppError>;

    async fn optimize(&self) -> Result<OptimizeResponse, AppError>;

    async fn request_sla(&self, request: &SlaRequest) -> Result<SlaResponse, AppError>;

    async fn fetch_metrics(&self) -> Result<MetricsPayload, AppError>;
}

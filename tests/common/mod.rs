// tests/common/mod.rs

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use arbitrage_dashboard::{
    api::DashboardApi,
    common::error::AppError,
    config::DashboardConfig,
    models::{
        actions::{InitializeResponse, OptimizeResponse, SlaRequest, SlaResponse},
        metrics::MetricsPayload,
    },
    services::DashboardController,
    ui::{MemoryChart, MemoryLayer, MemoryView},
};

/// Resposta roteirizada de um endpoint.
#[derive(Debug, Clone)]
pub enum Reply {
    Json(Value),
    Status(u16),
    Delayed(Duration, Value),
}

#[derive(Default)]
struct Script {
    initialize: VecDeque<Reply>,
    optimize: VecDeque<Reply>,
    sla: VecDeque<Reply>,
    metrics: VecDeque<Reply>,
}

/// Backend falso: cada endpoint consome a próxima resposta da fila e, com a
/// fila vazia, responde com um default de sucesso.
#[derive(Default)]
pub struct FakeApi {
    script: Mutex<Script>,
    calls: Mutex<Vec<&'static str>>,
    sla_requests: Mutex<Vec<SlaRequest>>,
}

impl FakeApi {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn push_initialize(&self, reply: Reply) {
        self.script.lock().unwrap().initialize.push_back(reply);
    }

    pub fn push_optimize(&self, reply: Reply) {
        self.script.lock().unwrap().optimize.push_back(reply);
    }

    pub fn push_sla(&self, reply: Reply) {
        self.script.lock().unwrap().sla.push_back(reply);
    }

    pub fn push_metrics(&self, reply: Reply) {
        self.script.lock().unwrap().metrics.push_back(reply);
    }

    pub fn calls(&self, endpoint: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| **c == endpoint).count()
    }

    pub fn sla_requests(&self) -> Vec<SlaRequest> {
        self.sla_requests.lock().unwrap().clone()
    }

    async fn answer<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        pick: impl FnOnce(&mut Script) -> Option<Reply>,
        fallback: Value,
    ) -> Result<T, AppError> {
        self.calls.lock().unwrap().push(endpoint);
        let reply = pick(&mut self.script.lock().unwrap()).unwrap_or(Reply::Json(fallback));
        let body = match reply {
            Reply::Json(body) => body,
            Reply::Status(code) => {
                return Err(AppError::UnexpectedStatus {
                    endpoint,
                    status: StatusCode::from_u16(code).unwrap(),
                    detail: None,
                });
            }
            Reply::Delayed(delay, body) => {
                tokio::time::sleep(delay).await;
                body
            }
        };
        Ok(serde_json::from_value(body)?)
    }
}

#[async_trait]
impl DashboardApi for FakeApi {
    async fn initialize(&self) -> Result<InitializeResponse, AppError> {
        self.answer(
            "initialize",
            |s| s.initialize.pop_front(),
            json!({ "status": "success", "message": "System initialized with dummy data" }),
        )
        .await
    }

    async fn optimize(&self) -> Result<OptimizeResponse, AppError> {
        self.answer(
            "optimize",
            |s| s.optimize.pop_front(),
            json!({
                "claude_reasoning": "Shift GPU inference to Nordic sites overnight.",
                "climate_savings": 12500.0,
                "timezone_optimization": 1_250_000.0,
                "total_revenue": 2_000_000.0
            }),
        )
        .await
    }

    async fn request_sla(&self, request: &SlaRequest) -> Result<SlaResponse, AppError> {
        self.sla_requests.lock().unwrap().push(request.clone());
        self.answer(
            "sla",
            |s| s.sla.pop_front(),
            json!({ "optimal_site": "site_3_norway", "estimated_uptime": 99.9 }),
        )
        .await
    }

    async fn fetch_metrics(&self) -> Result<MetricsPayload, AppError> {
        self.answer("metrics", |s| s.metrics.pop_front(), sample_metrics()).await
    }
}

/// Payload no formato do backend, com três sites (um de cada faixa).
pub fn sample_metrics() -> Value {
    json!({
        "global_metrics": {
            "total_revenue": 1_534_200.0,
            "total_power_used": 245_000.0,
            "avg_cooling_efficiency": 0.7166,
            "renewable_energy_usage": 0.62,
            "active_sites": 3
        },
        "sites": [
            {
                "site_id": "site_1_nordic",
                "name": "Nordic Iceland",
                "location": { "lat": 64.1466, "lon": -21.9426, "timezone": "Atlantic/Reykjavik" },
                "local_time": "2024-05-01 14:03:22 GMT",
                "weather": { "temperature": 35.4 },
                "pricing": { "energy_price": 0.0312 },
                "cooling_efficiency": 0.95,
                "revenue": 812_000.0,
                "power_used": 100_000.0,
                "allocation": { "gpu_compute": 64 }
            },
            {
                "site_id": "site_7_japan",
                "name": "Japan Tokyo",
                "location": { "lat": 35.6762, "lon": 139.6503, "timezone": "Asia/Tokyo" },
                "local_time": "2024-05-01 23:03:22 JST",
                "weather": { "temperature": 68.0 },
                "energy_price": 0.084,
                "cooling_efficiency": 0.7,
                "revenue": 402_200.0,
                "power_used": 95_000.0
            },
            {
                "site_id": "site_4_singapore",
                "name": "Singapore Tropical",
                "local_time": "2024-05-01 22:03:22 +08",
                "current_temp": 84.2,
                "cooling_efficiency": 0.4,
                "revenue": 320_000.0,
                "power_used": 50_000.0
            }
        ],
        "sla_commitments": { "premium": 1500, "standard": 800, "flexible": 0, "spot": 250 },
        "optimization_history": [
            { "total_revenue": 1_000_000.0 },
            { "total_revenue": 1_200_000.0 },
            { "total_revenue": 1_534_200.0 }
        ]
    })
}

/// Controller montado com widgets em memória.
pub struct Harness {
    pub controller: DashboardController,
    pub api: Arc<FakeApi>,
    pub view: MemoryView,
    pub map: MemoryLayer,
    pub revenue: MemoryChart,
    pub efficiency: MemoryChart,
}

impl Harness {
    pub fn new(config: DashboardConfig) -> Self {
        Self::with_api(config, FakeApi::new())
    }

    pub fn with_api(config: DashboardConfig, api: Arc<FakeApi>) -> Self {
        let view = MemoryView::new();
        let map = MemoryLayer::new();
        let revenue = MemoryChart::new();
        let efficiency = MemoryChart::new();

        let controller = DashboardController::new(config, api.clone(), Box::new(view.clone()));
        controller.mount(
            Box::new(map.clone()),
            Box::new(revenue.clone()),
            Box::new(efficiency.clone()),
        );

        Self {
            controller,
            api,
            view,
            map,
            revenue,
            efficiency,
        }
    }
}

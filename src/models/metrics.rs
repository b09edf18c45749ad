// src/models/metrics.rs

// Tipos "crus" de GET /api/dashboard/metrics, exatamente como chegam do backend.
// Tudo é opcional: um campo ausente OU com tipo errado vira `None` em vez de
// derrubar o payload inteiro. Os defaults ficam em `models::snapshot`.

use serde::{de::DeserializeOwned, Deserialize, Deserializer};
use serde_json::Value;

/// Aceita qualquer JSON; se não couber em `T`, devolve `None`.
pub(crate) fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MetricsPayload {
    #[serde(default, deserialize_with = "lenient")]
    pub error: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub global_metrics: Option<RawGlobalMetrics>,
    #[serde(default, deserialize_with = "lenient")]
    pub sites: Option<Vec<RawSite>>,
    #[serde(default, deserialize_with = "lenient")]
    pub sla_commitments: Option<RawSlaCommitments>,
    #[serde(default, deserialize_with = "lenient")]
    pub optimization_history: Option<Vec<RawHistoryEntry>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawGlobalMetrics {
    #[serde(default, deserialize_with = "lenient")]
    pub total_revenue: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub total_power_used: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub avg_cooling_efficiency: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub renewable_energy_usage: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub active_sites: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSite {
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub location: Option<RawLocation>,
    #[serde(default, deserialize_with = "lenient")]
    pub local_time: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub weather: Option<RawWeather>,
    // Campo plano legado, usado quando `weather.temperature` falta
    #[serde(default, deserialize_with = "lenient")]
    pub current_temp: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub pricing: Option<RawPricing>,
    // Idem para `pricing.energy_price`
    #[serde(default, deserialize_with = "lenient")]
    pub energy_price: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub cooling_efficiency: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub revenue: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub power_used: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub allocation: Option<RawAllocation>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawLocation {
    #[serde(default, deserialize_with = "lenient")]
    pub lat: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub lon: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawWeather {
    #[serde(default, deserialize_with = "lenient")]
    pub temperature: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPricing {
    #[serde(default, deserialize_with = "lenient")]
    pub energy_price: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawAllocation {
    #[serde(default, deserialize_with = "lenient")]
    pub gpu_compute: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSlaCommitments {
    #[serde(default, deserialize_with = "lenient")]
    pub premium: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub standard: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub flexible: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub spot: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawHistoryEntry {
    #[serde(default, deserialize_with = "lenient")]
    pub total_revenue: Option<f64>,
}

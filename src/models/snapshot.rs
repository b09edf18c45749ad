// src/models/snapshot.rs

// Snapshot normalizado: é aqui (e só aqui) que os defaults são aplicados.
// Depois da normalização, nenhum renderer precisa lidar com `None` de número.

use crate::models::metrics::{
    MetricsPayload, RawGlobalMetrics, RawHistoryEntry, RawSite, RawSlaCommitments,
};

pub const DEFAULT_SITE_NAME: &str = "Unknown Site";
pub const DEFAULT_LOCAL_TIME: &str = "N/A";
pub const DEFAULT_COOLING_EFFICIENCY: f64 = 0.8;
pub const DEFAULT_ENERGY_PRICE: f64 = 1.0;
pub const DEFAULT_TEMPERATURE_F: f64 = 70.0;

// --- Faixas de eficiência ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EfficiencyBand {
    High,
    Medium,
    Low,
}

impl EfficiencyBand {
    /// `> 0.8` alta, `[0.6, 0.8]` média, `< 0.6` baixa. NaN cai em média.
    pub fn classify(efficiency: f64) -> Self {
        if efficiency > 0.8 {
            EfficiencyBand::High
        } else if efficiency >= 0.6 || efficiency.is_nan() {
            EfficiencyBand::Medium
        } else {
            EfficiencyBand::Low
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            EfficiencyBand::High => "high-efficiency",
            EfficiencyBand::Medium => "medium-efficiency",
            EfficiencyBand::Low => "low-efficiency",
        }
    }

    /// Posição no dataset do gráfico de rosca: [alta, média, baixa]
    pub fn bucket_index(self) -> usize {
        match self {
            EfficiencyBand::High => 0,
            EfficiencyBand::Medium => 1,
            EfficiencyBand::Low => 2,
        }
    }
}

// --- Structs normalizadas ---

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Site {
    pub name: String,
    pub location: Option<GeoPoint>,
    pub local_time: String,
    pub temperature_f: f64,
    pub energy_price: f64,
    pub cooling_efficiency: f64,
    pub revenue: f64,
    pub power_used: f64,
    pub gpu_compute: f64,
}

impl Site {
    pub fn band(&self) -> EfficiencyBand {
        EfficiencyBand::classify(self.cooling_efficiency)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GlobalMetrics {
    pub total_revenue: f64,
    pub total_power_used: f64,
    pub avg_cooling_efficiency: f64,
    pub renewable_energy_usage: f64,
    pub active_sites: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SlaCommitments {
    pub premium: f64,
    pub standard: f64,
    pub flexible: f64,
    pub spot: f64,
}

/// Cada seção continua opcional: seção ausente não é renderizada.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Snapshot {
    pub global_metrics: Option<GlobalMetrics>,
    pub sites: Option<Vec<Site>>,
    pub sla_commitments: Option<SlaCommitments>,
    pub revenue_history: Option<Vec<f64>>,
}

// --- Normalização ---

// Semântica de `||`: zero e NaN contam como ausentes.
fn truthy(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v != 0.0 && !v.is_nan())
}

fn number(value: Option<f64>) -> f64 {
    value.filter(|v| v.is_finite()).unwrap_or(0.0)
}

fn non_empty(value: Option<String>, default: &str) -> String {
    value
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

impl From<RawSite> for Site {
    fn from(raw: RawSite) -> Self {
        let temperature_f = raw
            .weather
            .and_then(|w| truthy(w.temperature))
            .or_else(|| truthy(raw.current_temp))
            .unwrap_or(DEFAULT_TEMPERATURE_F);

        let energy_price = raw
            .pricing
            .and_then(|p| truthy(p.energy_price))
            .or_else(|| truthy(raw.energy_price))
            .unwrap_or(DEFAULT_ENERGY_PRICE);

        let location = raw.location.and_then(|loc| match (loc.lat, loc.lon) {
            (Some(lat), Some(lon)) if lat.is_finite() && lon.is_finite() => {
                Some(GeoPoint { lat, lon })
            }
            _ => None,
        });

        Site {
            name: non_empty(raw.name, DEFAULT_SITE_NAME),
            location,
            local_time: non_empty(raw.local_time, DEFAULT_LOCAL_TIME),
            temperature_f,
            energy_price,
            cooling_efficiency: truthy(raw.cooling_efficiency).unwrap_or(DEFAULT_COOLING_EFFICIENCY),
            revenue: number(raw.revenue),
            power_used: number(raw.power_used),
            gpu_compute: number(raw.allocation.and_then(|a| a.gpu_compute)),
        }
    }
}

impl From<RawGlobalMetrics> for GlobalMetrics {
    fn from(raw: RawGlobalMetrics) -> Self {
        GlobalMetrics {
            total_revenue: number(raw.total_revenue),
            total_power_used: number(raw.total_power_used),
            avg_cooling_efficiency: number(raw.avg_cooling_efficiency),
            renewable_energy_usage: number(raw.renewable_energy_usage),
            active_sites: raw.active_sites,
        }
    }
}

impl From<RawSlaCommitments> for SlaCommitments {
    fn from(raw: RawSlaCommitments) -> Self {
        SlaCommitments {
            premium: number(raw.premium),
            standard: number(raw.standard),
            flexible: number(raw.flexible),
            spot: number(raw.spot),
        }
    }
}

fn history_revenue(entry: RawHistoryEntry) -> f64 {
    number(entry.total_revenue)
}

impl Snapshot {
    /// Passo único de normalização, executado logo após o parse.
    /// O campo `error` é tratado antes, pelo pipeline de refresh.
    pub fn normalize(payload: MetricsPayload) -> Self {
        Snapshot {
            global_metrics: payload.global_metrics.map(GlobalMetrics::from),
            sites: payload
                .sites
                .map(|sites| sites.into_iter().map(Site::from).collect()),
            sla_commitments: payload.sla_commitments.map(SlaCommitments::from),
            revenue_history: payload
                .optimization_history
                .map(|entries| entries.into_iter().map(history_revenue).collect()),
        }
    }

    /// Contagem de sites por faixa: [alta, média, baixa].
    pub fn efficiency_buckets(&self) -> Option<[usize; 3]> {
        let sites = self.sites.as_ref()?;
        let mut buckets = [0usize; 3];
        for site in sites {
            buckets[site.band().bucket_index()] += 1;
        }
        Some(buckets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::metrics::{RawLocation, RawPricing, RawWeather};

    #[test]
    fn banding_boundaries_are_exclusive_on_high_and_inclusive_on_medium() {
        assert_eq!(EfficiencyBand::classify(0.81), EfficiencyBand::High);
        assert_eq!(EfficiencyBand::classify(0.8), EfficiencyBand::Medium);
        assert_eq!(EfficiencyBand::classify(0.6), EfficiencyBand::Medium);
        assert_eq!(EfficiencyBand::classify(0.5999), EfficiencyBand::Low);
        assert_eq!(EfficiencyBand::classify(0.0), EfficiencyBand::Low);
        assert_eq!(EfficiencyBand::classify(1.0), EfficiencyBand::High);
    }

    #[test]
    fn banding_is_total_over_unit_interval() {
        for step in 0..=1000 {
            let value = step as f64 / 1000.0;
            let band = EfficiencyBand::classify(value);
            let expected = if value > 0.8 {
                EfficiencyBand::High
            } else if value >= 0.6 {
                EfficiencyBand::Medium
            } else {
                EfficiencyBand::Low
            };
            assert_eq!(band, expected, "value {}", value);
        }
    }

    #[test]
    fn empty_site_gets_every_default() {
        let site = Site::from(RawSite::default());
        assert_eq!(site.name, DEFAULT_SITE_NAME);
        assert_eq!(site.local_time, DEFAULT_LOCAL_TIME);
        assert_eq!(site.temperature_f, DEFAULT_TEMPERATURE_F);
        assert_eq!(site.energy_price, DEFAULT_ENERGY_PRICE);
        assert_eq!(site.cooling_efficiency, DEFAULT_COOLING_EFFICIENCY);
        assert_eq!(site.revenue, 0.0);
        assert_eq!(site.power_used, 0.0);
        assert_eq!(site.gpu_compute, 0.0);
        assert!(site.location.is_none());
        assert_eq!(site.band(), EfficiencyBand::Medium);
    }

    #[test]
    fn zero_counts_as_missing_for_defaulted_fields() {
        let site = Site::from(RawSite {
            cooling_efficiency: Some(0.0),
            weather: Some(RawWeather { temperature: Some(0.0) }),
            pricing: Some(RawPricing { energy_price: Some(0.0) }),
            ..RawSite::default()
        });
        assert_eq!(site.cooling_efficiency, 0.8);
        assert_eq!(site.temperature_f, 70.0);
        assert_eq!(site.energy_price, 1.0);
    }

    #[test]
    fn nested_values_win_over_legacy_flat_fields() {
        let site = Site::from(RawSite {
            weather: Some(RawWeather { temperature: Some(35.0) }),
            current_temp: Some(99.0),
            pricing: None,
            energy_price: Some(0.42),
            ..RawSite::default()
        });
        assert_eq!(site.temperature_f, 35.0);
        assert_eq!(site.energy_price, 0.42);
    }

    #[test]
    fn location_requires_both_coordinates() {
        let partial = Site::from(RawSite {
            location: Some(RawLocation { lat: Some(10.0), lon: None }),
            ..RawSite::default()
        });
        assert!(partial.location.is_none());

        let equator = Site::from(RawSite {
            location: Some(RawLocation { lat: Some(0.0), lon: Some(32.5) }),
            ..RawSite::default()
        });
        assert_eq!(equator.location, Some(GeoPoint { lat: 0.0, lon: 32.5 }));
    }

    #[test]
    fn buckets_count_every_site_exactly_once() {
        let mk = |eff: f64| Site::from(RawSite {
            cooling_efficiency: Some(eff),
            ..RawSite::default()
        });
        let snapshot = Snapshot {
            sites: Some(vec![mk(0.95), mk(0.85), mk(0.8), mk(0.6), mk(0.4), mk(0.0)]),
            ..Snapshot::default()
        };
        // 0.0 vira 0.8 (default) e conta como média
        assert_eq!(snapshot.efficiency_buckets(), Some([2, 3, 1]));
        assert_eq!(Snapshot::default().efficiency_buckets(), None);
    }

    #[test]
    fn normalize_keeps_sections_independent() {
        let payload: MetricsPayload = serde_json::from_value(serde_json::json!({
            "sites": [{ "name": "Texas USA", "cooling_efficiency": 0.6 }],
            "optimization_history": [{ "total_revenue": 1500.0 }, {}]
        }))
        .unwrap();

        let snapshot = Snapshot::normalize(payload);
        assert!(snapshot.global_metrics.is_none());
        assert!(snapshot.sla_commitments.is_none());
        assert_eq!(snapshot.sites.as_ref().map(Vec::len), Some(1));
        assert_eq!(snapshot.revenue_history, Some(vec![1500.0, 0.0]));
    }
}

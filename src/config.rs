// src/config.rs

use std::{env, str::FromStr, time::Duration};

use crate::common::error::AppError;

// As duas variações do painel (tema clássico e o redesenho) diferem só nestes
// valores. Em vez de duas cópias do controller, um único config.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    Classic,
    Modern,
}

impl FromStr for Variant {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "classic" | "a" => Ok(Variant::Classic),
            "modern" | "b" => Ok(Variant::Modern),
            other => Err(AppError::Config(format!("unknown dashboard variant '{}'", other))),
        }
    }
}

/// Cores das três faixas de eficiência nos marcadores do mapa.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    pub high: String,
    pub medium: String,
    pub low: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelStyle {
    /// `T-9 … T-0`
    Countdown,
    /// `0 … n-1`
    Index,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupStyle {
    /// Nome, temperatura, eficiência, receita e potência
    Weather,
    /// Nome, potência e eficiência
    Operations,
}

/// Textos das notificações.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiCopy {
    pub initialize_success: String,
    pub optimize_success: String,
    pub optimize_fallback_reasoning: String,
}

#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub api_base: String,
    pub variant: Variant,
    pub poll_interval: Duration,
    pub request_timeout: Duration,
    pub notification_lifetime: Duration,
    pub history_window: usize,
    pub percent_decimals: usize,
    pub label_style: LabelStyle,
    pub popup_style: PopupStyle,
    pub palette: Palette,
    pub marker_base_radius: f64,
    pub marker_power_scale: f64,
    pub marker_min_radius: Option<f64>,
    pub disable_initialize_after_success: bool,
    pub discard_stale_ticks: bool,
    pub copy: UiCopy,
}

pub const DEFAULT_API_BASE: &str = "http://localhost:8000";
pub const MAX_PERCENT_DECIMALS: usize = 6;

impl DashboardConfig {
    pub fn for_variant(variant: Variant) -> Self {
        match variant {
            Variant::Classic => Self {
                api_base: DEFAULT_API_BASE.to_string(),
                variant,
                poll_interval: Duration::from_secs(30),
                request_timeout: Duration::from_secs(10),
                notification_lifetime: Duration::from_secs(5),
                history_window: 10,
                percent_decimals: 1,
                label_style: LabelStyle::Countdown,
                popup_style: PopupStyle::Weather,
                palette: Palette {
                    high: "#10b981".into(),
                    medium: "#f59e0b".into(),
                    low: "#ef4444".into(),
                },
                marker_base_radius: 8.0,
                marker_power_scale: 50_000.0,
                marker_min_radius: None,
                disable_initialize_after_success: true,
                discard_stale_ticks: false,
                copy: UiCopy {
                    initialize_success: "System initialized successfully with dummy data!".into(),
                    optimize_success: "System optimized successfully!".into(),
                    optimize_fallback_reasoning: "Optimization completed successfully".into(),
                },
            },
            Variant::Modern => Self {
                api_base: DEFAULT_API_BASE.to_string(),
                variant,
                poll_interval: Duration::from_secs(10),
                request_timeout: Duration::from_secs(10),
                notification_lifetime: Duration::from_secs(5),
                history_window: 20,
                percent_decimals: 0,
                label_style: LabelStyle::Index,
                popup_style: PopupStyle::Operations,
                palette: Palette {
                    high: "#22c55e".into(),
                    medium: "#eab308".into(),
                    low: "#dc2626".into(),
                },
                marker_base_radius: 6.0,
                marker_power_scale: 40_000.0,
                marker_min_radius: Some(6.0),
                disable_initialize_after_success: false,
                discard_stale_ticks: false,
                copy: UiCopy {
                    initialize_success: "System initialized".into(),
                    optimize_success: "Optimization complete".into(),
                    optimize_fallback_reasoning: "Optimization completed successfully".into(),
                },
            },
        }
    }

    // Carrega .env (se existir) e depois as variáveis do processo.
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Mesma lógica do `from_env`, mas com a fonte de variáveis injetada.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let variant = match lookup("DASHBOARD_VARIANT") {
            Some(raw) => raw.parse()?,
            None => Variant::Classic,
        };
        let mut config = Self::for_variant(variant);

        if let Some(base) = lookup("DASHBOARD_API_BASE") {
            let base = base.trim().trim_end_matches('/').to_string();
            if base.is_empty() {
                return Err(AppError::Config("DASHBOARD_API_BASE is empty".into()));
            }
            config.api_base = base;
        }
        if let Some(secs) = parse_var::<u64>(&lookup, "DASHBOARD_POLL_INTERVAL_SECS")? {
            if secs == 0 {
                return Err(AppError::Config("DASHBOARD_POLL_INTERVAL_SECS must be > 0".into()));
            }
            config.poll_interval = Duration::from_secs(secs);
        }
        if let Some(secs) = parse_var::<u64>(&lookup, "DASHBOARD_REQUEST_TIMEOUT_SECS")? {
            if secs == 0 {
                return Err(AppError::Config("DASHBOARD_REQUEST_TIMEOUT_SECS must be > 0".into()));
            }
            config.request_timeout = Duration::from_secs(secs);
        }
        if let Some(window) = parse_var::<usize>(&lookup, "DASHBOARD_HISTORY_WINDOW")? {
            config.history_window = window;
        }
        if let Some(decimals) = parse_var::<usize>(&lookup, "DASHBOARD_PERCENT_DECIMALS")? {
            if decimals > MAX_PERCENT_DECIMALS {
                return Err(AppError::Config(format!(
                    "DASHBOARD_PERCENT_DECIMALS must be at most {}",
                    MAX_PERCENT_DECIMALS
                )));
            }
            config.percent_decimals = decimals;
        }
        if let Some(discard) = parse_var::<bool>(&lookup, "DASHBOARD_DISCARD_STALE_TICKS")? {
            config.discard_stale_ticks = discard;
        }

        Ok(config)
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self::for_variant(Variant::Classic)
    }
}

fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<T>, AppError>
where
    T: FromStr,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| AppError::Config(format!("{} has an invalid value '{}'", key, raw))),
    }
}

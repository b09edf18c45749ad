// src/ui/widgets.rs

// Contratos entre o controller e o que estiver desenhando a tela.
// O controller nunca sabe se é um terminal, um mapa de verdade ou um fake de teste.

use crate::models::{actions::SlaForm, snapshot::{EfficiencyBand, GeoPoint}};

// Campos de texto com id fixo (os "elementos" do painel)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Slot {
    TotalRevenue,
    TotalPower,
    CoolingEfficiency,
    RenewableEnergy,
    ActiveSites,
    PremiumAllocation,
    StandardAllocation,
    FlexibleAllocation,
    SpotAllocation,
    Reasoning,
    ClimateSavings,
    TimezoneOptimization,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Control {
    Initialize,
    Optimize,
    RequestSla,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemStatus {
    Online,
    Offline,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: u64,
    pub level: NotificationLevel,
    pub message: String,
}

/// Card de um site, já com todos os valores formatados.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteCard {
    pub band: EfficiencyBand,
    pub name: String,
    pub temperature: String,
    pub local_time: String,
    pub energy_price: String,
    pub cooling_efficiency: String,
    pub revenue: String,
    pub power_used: String,
    pub gpu_compute: String,
}

impl SiteCard {
    pub fn class_name(&self) -> String {
        format!("site-card {}", self.band.css_class())
    }
}

pub trait DashboardView: Send {
    fn set_text(&mut self, slot: Slot, text: String);
    /// Substitui todos os cards (sem diff).
    fn replace_site_cards(&mut self, cards: Vec<SiteCard>);
    fn set_status(&mut self, status: SystemStatus);
    fn set_loading(&mut self, loading: bool);
    fn set_control_enabled(&mut self, control: Control, enabled: bool);
    fn show_notification(&mut self, notification: Notification);
    fn dismiss_notification(&mut self, id: u64);
    fn sla_form(&self) -> SlaForm;
    /// Limpa só os dois campos numéricos; o tier selecionado permanece.
    fn clear_sla_inputs(&mut self);
}

/// Camada de pontos do mapa.
pub trait PointLayer: Send {
    fn clear(&mut self);
    fn add_point(&mut self, position: GeoPoint, color: &str, radius: f64, popup: String);
}

/// Gráfico: série (linha) ou buckets (rosca).
pub trait SeriesChart: Send {
    fn set_points(&mut self, labels: Vec<String>, values: Vec<f64>);
    fn set_buckets(&mut self, counts: &[usize]);
}

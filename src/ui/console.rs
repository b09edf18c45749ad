// src/ui/console.rs

// "Tela" do binário: mantém o estado em um MemoryView e imprime cada mudança
// relevante no stdout. Mapa e gráficos viram listas de texto.

use crate::models::{actions::SlaForm, snapshot::GeoPoint};
use crate::ui::memory::MemoryView;
use crate::ui::widgets::{
    Control, DashboardView, Notification, NotificationLevel, PointLayer, SeriesChart, SiteCard,
    Slot, SystemStatus,
};

#[derive(Debug, Clone, Default)]
pub struct ConsoleView {
    inner: MemoryView,
}

impl ConsoleView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle compartilhado para o leitor de comandos preencher o formulário.
    pub fn memory(&self) -> MemoryView {
        self.inner.clone()
    }
}

fn slot_label(slot: Slot) -> &'static str {
    match slot {
        Slot::TotalRevenue => "Total Revenue",
        Slot::TotalPower => "Total Power",
        Slot::CoolingEfficiency => "Cooling Efficiency",
        Slot::RenewableEnergy => "Renewable Energy",
        Slot::ActiveSites => "Active Sites",
        Slot::PremiumAllocation => "Premium",
        Slot::StandardAllocation => "Standard",
        Slot::FlexibleAllocation => "Flexible",
        Slot::SpotAllocation => "Spot",
        Slot::Reasoning => "Optimizer Reasoning",
        Slot::ClimateSavings => "Climate Savings",
        Slot::TimezoneOptimization => "Timezone Optimization",
    }
}

impl DashboardView for ConsoleView {
    fn set_text(&mut self, slot: Slot, text: String) {
        println!("  {:<22} {}", slot_label(slot), text);
        self.inner.set_text(slot, text);
    }

    fn replace_site_cards(&mut self, cards: Vec<SiteCard>) {
        println!("── Sites ({}) ──", cards.len());
        for card in &cards {
            println!(
                "  [{}] {} {} | {} | energy {} | cooling {} | revenue {} | power {} | gpu {}",
                card.band.css_class(),
                card.name,
                card.temperature,
                card.local_time,
                card.energy_price,
                card.cooling_efficiency,
                card.revenue,
                card.power_used,
                card.gpu_compute,
            );
        }
        self.inner.replace_site_cards(cards);
    }

    fn set_status(&mut self, status: SystemStatus) {
        let label = match status {
            SystemStatus::Online => "● Online",
            SystemStatus::Offline => "○ Offline",
        };
        println!("Status: {}", label);
        self.inner.set_status(status);
    }

    fn set_loading(&mut self, loading: bool) {
        if loading {
            println!("… loading");
        }
        self.inner.set_loading(loading);
    }

    fn set_control_enabled(&mut self, control: Control, enabled: bool) {
        self.inner.set_control_enabled(control, enabled);
    }

    fn show_notification(&mut self, notification: Notification) {
        let prefix = match notification.level {
            NotificationLevel::Info => "ℹ",
            NotificationLevel::Success => "✔",
            NotificationLevel::Error => "✖",
        };
        println!("{} {}", prefix, notification.message);
        self.inner.show_notification(notification);
    }

    fn dismiss_notification(&mut self, id: u64) {
        self.inner.dismiss_notification(id);
    }

    fn sla_form(&self) -> SlaForm {
        self.inner.sla_form()
    }

    fn clear_sla_inputs(&mut self) {
        self.inner.clear_sla_inputs();
    }
}

#[derive(Debug, Default)]
pub struct ConsoleLayer {
    points: usize,
}

impl PointLayer for ConsoleLayer {
    fn clear(&mut self) {
        self.points = 0;
    }

    fn add_point(&mut self, position: GeoPoint, color: &str, radius: f64, popup: String) {
        self.points += 1;
        println!(
            "  ◉ ({:>8.3}, {:>9.3}) r={:.1} {} {}",
            position.lat,
            position.lon,
            radius,
            color,
            popup.replace('\n', " · ")
        );
    }
}

#[derive(Debug)]
pub struct ConsoleChart {
    title: String,
}

impl ConsoleChart {
    pub fn new(title: impl Into<String>) -> Self {
        Self { title: title.into() }
    }
}

impl SeriesChart for ConsoleChart {
    fn set_points(&mut self, labels: Vec<String>, values: Vec<f64>) {
        if labels.is_empty() {
            return;
        }
        let series: Vec<String> = labels
            .iter()
            .zip(&values)
            .map(|(label, value)| format!("{}={:.0}", label, value))
            .collect();
        println!("  {}: {}", self.title, series.join(" "));
    }

    fn set_buckets(&mut self, counts: &[usize]) {
        if counts.iter().all(|c| *c == 0) {
            return;
        }
        let parts: Vec<String> = counts.iter().map(usize::to_string).collect();
        println!("  {}: {}", self.title, parts.join(" / "));
    }
}

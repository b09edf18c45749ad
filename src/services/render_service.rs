// src/services/render_service.rs

// Traduz um Snapshot normalizado em chamadas nos widgets. Nada aqui faz I/O
// nem guarda estado: o mesmo snapshot sempre produz as mesmas chamadas.

use crate::{
    common::format::{format_currency, format_number, format_percentage, format_time, to_fixed},
    config::{DashboardConfig, LabelStyle, PopupStyle},
    models::snapshot::{EfficiencyBand, GlobalMetrics, Site, SlaCommitments, Snapshot},
    ui::widgets::{DashboardView, PointLayer, SeriesChart, SiteCard, Slot},
};

/// Handles dos widgets. Mapa e gráficos só existem depois do `mount`.
pub struct Widgets {
    pub view: Box<dyn DashboardView>,
    pub map: Option<Box<dyn PointLayer>>,
    pub revenue_chart: Option<Box<dyn SeriesChart>>,
    pub efficiency_chart: Option<Box<dyn SeriesChart>>,
}

impl Widgets {
    pub fn new(view: Box<dyn DashboardView>) -> Self {
        Self {
            view,
            map: None,
            revenue_chart: None,
            efficiency_chart: None,
        }
    }
}

#[derive(Clone, Copy)]
pub struct RenderService<'a> {
    config: &'a DashboardConfig,
}

// Math.round: metade sobe em direção a +infinito
fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

fn temperature_label(site: &Site) -> String {
    format!("{}°F", round_half_up(site.temperature_f))
}

fn megawatts(value: f64) -> String {
    format!("{} MW", format_number(value))
}

impl<'a> RenderService<'a> {
    pub fn new(config: &'a DashboardConfig) -> Self {
        Self { config }
    }

    fn percent(&self, value: f64) -> String {
        format_percentage(value, self.config.percent_decimals)
    }

    /// Cada seção depende só dos próprios dados: seção ausente não bloqueia as outras.
    pub fn render_snapshot(&self, widgets: &mut Widgets, snapshot: &Snapshot) {
        if let Some(metrics) = &snapshot.global_metrics {
            self.render_global_metrics(widgets.view.as_mut(), metrics);
        }
        if let Some(sites) = &snapshot.sites {
            self.render_sites(widgets.view.as_mut(), sites);
        }
        if let Some(commitments) = &snapshot.sla_commitments {
            self.render_sla_commitments(widgets.view.as_mut(), commitments);
        }
        if let (Some(map), Some(sites)) = (widgets.map.as_mut(), &snapshot.sites) {
            self.render_markers(map.as_mut(), sites);
        }
        if let (Some(chart), Some(history)) = (widgets.revenue_chart.as_mut(), &snapshot.revenue_history) {
            self.render_revenue_chart(chart.as_mut(), history);
        }
        if let (Some(chart), Some(buckets)) = (widgets.efficiency_chart.as_mut(), snapshot.efficiency_buckets()) {
            chart.set_buckets(&buckets);
        }
    }

    pub fn render_global_metrics(&self, view: &mut dyn DashboardView, metrics: &GlobalMetrics) {
        view.set_text(Slot::TotalRevenue, format_currency(metrics.total_revenue));
        view.set_text(Slot::TotalPower, megawatts(metrics.total_power_used));
        view.set_text(Slot::CoolingEfficiency, self.percent(metrics.avg_cooling_efficiency));
        view.set_text(Slot::RenewableEnergy, self.percent(metrics.renewable_energy_usage));
        if let Some(active) = metrics.active_sites {
            view.set_text(Slot::ActiveSites, active.to_string());
        }
    }

    pub fn render_sites(&self, view: &mut dyn DashboardView, sites: &[Site]) {
        let cards = sites.iter().map(|site| self.site_card(site)).collect();
        view.replace_site_cards(cards);
    }

    pub fn site_card(&self, site: &Site) -> SiteCard {
        SiteCard {
            band: site.band(),
            name: site.name.clone(),
            temperature: temperature_label(site),
            local_time: format_time(&site.local_time),
            energy_price: format!("${}", to_fixed(site.energy_price, 3)),
            cooling_efficiency: self.percent(site.cooling_efficiency),
            revenue: format_currency(site.revenue),
            power_used: megawatts(site.power_used),
            gpu_compute: site.gpu_compute.to_string(),
        }
    }

    pub fn render_sla_commitments(&self, view: &mut dyn DashboardView, commitments: &SlaCommitments) {
        view.set_text(Slot::PremiumAllocation, megawatts(commitments.premium));
        view.set_text(Slot::StandardAllocation, megawatts(commitments.standard));
        view.set_text(Slot::FlexibleAllocation, megawatts(commitments.flexible));
        view.set_text(Slot::SpotAllocation, megawatts(commitments.spot));
    }

    // --- Mapa ---

    pub fn marker_color(&self, band: EfficiencyBand) -> &'a str {
        let palette = &self.config.palette;
        match band {
            EfficiencyBand::High => &palette.high,
            EfficiencyBand::Medium => &palette.medium,
            EfficiencyBand::Low => &palette.low,
        }
    }

    /// Base fixa + potência / escala, com piso opcional.
    pub fn marker_radius(&self, power_used: f64) -> f64 {
        let radius = self.config.marker_base_radius + power_used / self.config.marker_power_scale;
        match self.config.marker_min_radius {
            Some(min) => radius.max(min),
            None => radius,
        }
    }

    pub fn popup_text(&self, site: &Site) -> String {
        match self.config.popup_style {
            PopupStyle::Weather => format!(
                "{}\nTemperature: {}\nEfficiency: {}\nRevenue: {}\nPower: {}",
                site.name,
                temperature_label(site),
                self.percent(site.cooling_efficiency),
                format_currency(site.revenue),
                megawatts(site.power_used),
            ),
            PopupStyle::Operations => format!(
                "{}\nPower: {}\nEfficiency: {}",
                site.name,
                megawatts(site.power_used),
                self.percent(site.cooling_efficiency),
            ),
        }
    }

    pub fn render_markers(&self, map: &mut dyn PointLayer, sites: &[Site]) {
        map.clear();
        // Sites sem coordenadas ficam de fora, sem aviso
        for site in sites {
            let Some(position) = site.location else { continue };
            map.add_point(
                position,
                self.marker_color(site.band()),
                self.marker_radius(site.power_used),
                self.popup_text(site),
            );
        }
    }

    // --- Gráficos ---

    /// Janela final do histórico. Janela 0 = histórico inteiro.
    pub fn history_window<'h>(&self, history: &'h [f64]) -> &'h [f64] {
        let window = self.config.history_window;
        if window == 0 || history.len() <= window {
            history
        } else {
            &history[history.len() - window..]
        }
    }

    pub fn render_revenue_chart(&self, chart: &mut dyn SeriesChart, history: &[f64]) {
        let points = self.history_window(history);
        let labels = (0..points.len())
            .map(|index| match self.config.label_style {
                LabelStyle::Countdown => format!("T-{}", points.len() - index - 1),
                LabelStyle::Index => index.to_string(),
            })
            .collect();
        chart.set_points(labels, points.to_vec());
    }
}

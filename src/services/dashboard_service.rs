// src/services/dashboard_service.rs

use std::sync::{
    atomic::{AtomicBool, AtomicU64, Ordering},
    Arc, Mutex, Weak,
};

use tokio::{
    task::JoinHandle,
    time::{interval_at, Instant, MissedTickBehavior},
};

use crate::{
    api::DashboardApi,
    common::{error::AppError, format::format_currency, sync_utils::lock},
    config::DashboardConfig,
    handlers::controls::ControlState,
    models::{
        actions::{SlaRequest, SlaTier},
        snapshot::Snapshot,
    },
    services::render_service::{RenderService, Widgets},
    ui::widgets::{
        Control, DashboardView, Notification, NotificationLevel, PointLayer, SeriesChart, Slot,
        SystemStatus,
    },
};

/// Ciclo de vida do controller: `Created → Mounted → Running → Disposed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Created,
    Mounted,
    Running,
    Disposed,
}

/// Resultado de um tick de refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Sistema não inicializado (ou controller descartado): nada foi feito.
    Skipped,
    /// Falha de rede/JSON ou campo `error`: logado, nada renderizado.
    Failed,
    /// Resposta mais velha que a última aplicada (só com `discard_stale_ticks`).
    Discarded,
    Rendered,
}

// Tudo que é "tela" fica atrás de um único lock, nunca segurado em um `.await`.
struct UiState {
    widgets: Widgets,
    controls: ControlState,
    last_applied_tick: Option<u64>,
}

impl UiState {
    fn set_control(&mut self, control: Control, enabled: bool) {
        self.controls.set(control, enabled);
        self.widgets.view.set_control_enabled(control, enabled);
    }
}

struct ControllerInner {
    config: DashboardConfig,
    api: Arc<dyn DashboardApi>,
    ui: Mutex<UiState>,
    lifecycle: Mutex<Lifecycle>,
    initialized: AtomicBool,
    timer: Mutex<Option<JoinHandle<()>>>,
    next_tick: AtomicU64,
    next_notification: AtomicU64,
}

#[derive(Clone)]
pub struct DashboardController {
    inner: Arc<ControllerInner>,
}

impl DashboardController {
    /// Só monta a struct: nenhuma chamada de rede, nenhum widget tocado.
    pub fn new(config: DashboardConfig, api: Arc<dyn DashboardApi>, view: Box<dyn DashboardView>) -> Self {
        Self {
            inner: Arc::new(ControllerInner {
                config,
                api,
                ui: Mutex::new(UiState {
                    widgets: Widgets::new(view),
                    controls: ControlState::default(),
                    last_applied_tick: None,
                }),
                lifecycle: Mutex::new(Lifecycle::Created),
                initialized: AtomicBool::new(false),
                timer: Mutex::new(None),
                next_tick: AtomicU64::new(0),
                next_notification: AtomicU64::new(1),
            }),
        }
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.inner.config
    }

    pub fn lifecycle(&self) -> Lifecycle {
        *lock(&self.inner.lifecycle)
    }

    pub fn is_initialized(&self) -> bool {
        self.inner.initialized.load(Ordering::SeqCst)
    }

    fn is_disposed(&self) -> bool {
        self.lifecycle() == Lifecycle::Disposed
    }

    pub fn is_enabled(&self, control: Control) -> bool {
        lock(&self.inner.ui).controls.is_enabled(control)
    }

    fn with_ui<R>(&self, f: impl FnOnce(&mut UiState) -> R) -> R {
        let mut ui = lock(&self.inner.ui);
        f(&mut ui)
    }

    fn renderer(&self) -> RenderService<'_> {
        RenderService::new(&self.inner.config)
    }

    // ---
    // Ciclo de vida
    // ---

    /// Setup único dos widgets: gráficos vazios, status offline e estado
    /// inicial dos botões. Chamadas repetidas são ignoradas.
    pub fn mount(
        &self,
        map: Box<dyn PointLayer>,
        revenue_chart: Box<dyn SeriesChart>,
        efficiency_chart: Box<dyn SeriesChart>,
    ) {
        {
            let mut lifecycle = lock(&self.inner.lifecycle);
            if *lifecycle != Lifecycle::Created {
                tracing::warn!("mount ignorado: controller já está em {:?}", *lifecycle);
                return;
            }
            *lifecycle = Lifecycle::Mounted;
        }

        self.with_ui(|ui| {
            let mut revenue_chart = revenue_chart;
            let mut efficiency_chart = efficiency_chart;
            revenue_chart.set_points(Vec::new(), Vec::new());
            efficiency_chart.set_buckets(&[0, 0, 0]);

            ui.widgets.map = Some(map);
            ui.widgets.revenue_chart = Some(revenue_chart);
            ui.widgets.efficiency_chart = Some(efficiency_chart);
            ui.widgets.view.set_status(SystemStatus::Offline);

            let defaults = ControlState::default();
            for control in ControlState::ALL {
                ui.set_control(control, defaults.is_enabled(control));
            }
        });

        tracing::info!("🧭 Painel montado (variante {:?})", self.inner.config.variant);
    }

    /// Cancela o timer e solta mapa e gráficos. Depois disso nenhum tick renderiza.
    pub fn dispose(&self) {
        {
            let mut lifecycle = lock(&self.inner.lifecycle);
            if *lifecycle == Lifecycle::Disposed {
                return;
            }
            *lifecycle = Lifecycle::Disposed;
        }

        self.stop_periodic_updates();
        self.with_ui(|ui| {
            ui.widgets.map = None;
            ui.widgets.revenue_chart = None;
            ui.widgets.efficiency_chart = None;
        });

        tracing::info!("👋 Painel descartado");
    }

    // ---
    // Timer
    // ---

    /// Reinicia o timer de atualização. Qualquer timer anterior é cancelado
    /// antes, então existe no máximo um ativo.
    pub fn start_periodic_updates(&self) {
        if self.is_disposed() {
            return;
        }

        let period = self.inner.config.poll_interval;
        let weak: Weak<ControllerInner> = Arc::downgrade(&self.inner);

        let mut timer = lock(&self.inner.timer);
        if let Some(previous) = timer.take() {
            previous.abort();
        }

        *timer = Some(tokio::spawn(async move {
            // Primeiro disparo só depois de um período inteiro
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let Some(inner) = weak.upgrade() else { break };
                let controller = DashboardController { inner };
                // Sem await aqui: um tick lento não atrasa o próximo
                tokio::spawn(async move {
                    controller.refresh().await;
                });
            }
        }));

        tracing::debug!("⏱️ Atualização periódica a cada {:?}", period);
    }

    pub fn stop_periodic_updates(&self) {
        if let Some(handle) = lock(&self.inner.timer).take() {
            handle.abort();
        }
    }

    pub fn has_active_timer(&self) -> bool {
        lock(&self.inner.timer)
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    // ---
    // Notificações
    // ---

    fn notify(&self, level: NotificationLevel, message: String) {
        let id = self.inner.next_notification.fetch_add(1, Ordering::SeqCst);
        self.with_ui(|ui| {
            ui.widgets.view.show_notification(Notification { id, level, message });
        });

        let lifetime = self.inner.config.notification_lifetime;
        let weak = Arc::downgrade(&self.inner);
        tokio::spawn(async move {
            tokio::time::sleep(lifetime).await;
            if let Some(inner) = weak.upgrade() {
                lock(&inner.ui).widgets.view.dismiss_notification(id);
            }
        });
    }

    // Ações só valem entre o mount e o dispose. Fora disso nada é tocado.
    fn ensure_active(&self, action: &str) -> Result<(), AppError> {
        let reason = match self.lifecycle() {
            Lifecycle::Created => "not mounted yet",
            Lifecycle::Disposed => "disposed",
            Lifecycle::Mounted | Lifecycle::Running => return Ok(()),
        };
        tracing::warn!("{} recusado: painel {}", action, reason);
        Err(AppError::Inactive(reason))
    }

    // Desabilita o controle e devolve o estado anterior, para restaurar depois.
    fn disable(&self, control: Control) -> bool {
        self.with_ui(|ui| {
            let previous = ui.controls.is_enabled(control);
            ui.set_control(control, false);
            previous
        })
    }

    // ---
    // Ações do usuário
    // ---

    /// POST /api/initialize. Qualquer falha de rede já foi mostrada como
    /// notificação quando o `Err` chega ao chamador; fora do intervalo
    /// mount..dispose devolve `AppError::Inactive` sem requisição.
    pub async fn initialize_system(&self) -> Result<(), AppError> {
        self.ensure_active("initialize")?;
        let was_enabled = self.disable(Control::Initialize);
        self.with_ui(|ui| ui.widgets.view.set_loading(true));

        let result = match self.inner.api.initialize().await {
            Ok(response) if response.is_success() => Ok(response),
            Ok(response) => Err(AppError::Rejected(
                response
                    .message
                    .filter(|m| !m.is_empty())
                    .unwrap_or_else(|| "Initialization failed".to_string()),
            )),
            Err(err) => Err(err),
        };

        match result {
            Ok(response) => {
                {
                    // Dispose durante a requisição: a resposta é descartada
                    let mut lifecycle = lock(&self.inner.lifecycle);
                    if *lifecycle == Lifecycle::Disposed {
                        return Err(AppError::Inactive("disposed"));
                    }
                    *lifecycle = Lifecycle::Running;
                }
                self.inner.initialized.store(true, Ordering::SeqCst);

                let keep_initialize = !self.inner.config.disable_initialize_after_success;
                self.with_ui(|ui| {
                    ui.widgets.view.set_status(SystemStatus::Online);
                    ui.set_control(Control::Optimize, true);
                    ui.set_control(Control::RequestSla, true);
                    ui.set_control(Control::Initialize, keep_initialize);
                });
                tracing::info!(
                    "✅ Sistema inicializado: {}",
                    response.message.as_deref().unwrap_or("ok")
                );
                self.notify(
                    NotificationLevel::Success,
                    self.inner.config.copy.initialize_success.clone(),
                );

                self.start_periodic_updates();
                self.refresh().await;

                self.with_ui(|ui| ui.widgets.view.set_loading(false));
                Ok(())
            }
            Err(err) => {
                tracing::error!("🔥 Falha na inicialização: {}", err);
                self.with_ui(|ui| {
                    ui.set_control(Control::Initialize, was_enabled);
                    ui.widgets.view.set_loading(false);
                });
                self.notify(
                    NotificationLevel::Error,
                    format!("Failed to initialize system: {}", err),
                );
                Err(err)
            }
        }
    }

    /// POST /api/optimize. Em caso de falha, só a notificação muda.
    pub async fn optimize_system(&self) -> Result<(), AppError> {
        self.ensure_active("optimize")?;
        let was_enabled = self.disable(Control::Optimize);
        self.with_ui(|ui| ui.widgets.view.set_loading(true));

        let result = match self.inner.api.optimize().await {
            Ok(response) => {
                let reasoning = response
                    .claude_reasoning
                    .filter(|r| !r.trim().is_empty())
                    .unwrap_or_else(|| self.inner.config.copy.optimize_fallback_reasoning.clone());
                let climate = format_currency(response.climate_savings.unwrap_or(0.0));
                let timezone = format_currency(response.timezone_optimization.unwrap_or(0.0));

                self.with_ui(|ui| {
                    let view = ui.widgets.view.as_mut();
                    view.set_text(Slot::Reasoning, reasoning);
                    view.set_text(Slot::ClimateSavings, climate);
                    view.set_text(Slot::TimezoneOptimization, timezone);
                });
                tracing::info!(
                    "⚡ Otimização concluída (receita total: {})",
                    format_currency(response.total_revenue.unwrap_or(0.0))
                );
                self.notify(
                    NotificationLevel::Success,
                    self.inner.config.copy.optimize_success.clone(),
                );

                self.refresh().await;
                Ok(())
            }
            Err(err) => {
                tracing::error!("🔥 Falha na otimização: {}", err);
                self.notify(
                    NotificationLevel::Error,
                    format!("Failed to optimize system: {}", err),
                );
                Err(err)
            }
        };

        self.with_ui(|ui| {
            ui.set_control(Control::Optimize, was_enabled);
            ui.widgets.view.set_loading(false);
        });
        result
    }

    /// POST /api/sla/request com os valores do formulário. Formulário
    /// inválido não gera requisição.
    pub async fn request_sla(&self) -> Result<(), AppError> {
        self.ensure_active("request_sla")?;
        let form = self.with_ui(|ui| ui.widgets.view.sla_form());

        let request = match SlaRequest::try_from(&form) {
            Ok(request) => request,
            Err(errors) => {
                let err = AppError::from(errors);
                tracing::debug!("Formulário de SLA inválido: {:?}", form);
                self.notify(NotificationLevel::Error, err.to_string());
                return Err(err);
            }
        };

        let was_enabled = self.disable(Control::RequestSla);

        let result = match self.inner.api.request_sla(&request).await {
            Ok(response) => {
                let message = sla_success_message(
                    request.tier,
                    response.optimal_site.as_deref(),
                    response.estimated_uptime,
                );
                tracing::info!(
                    "📝 SLA {} de {} MW por {}h alocado",
                    request.tier,
                    request.power_requirement,
                    request.duration_hours
                );
                self.notify(NotificationLevel::Success, message);
                self.with_ui(|ui| ui.widgets.view.clear_sla_inputs());

                self.refresh().await;
                Ok(())
            }
            Err(err) => {
                tracing::error!("🔥 Falha no pedido de SLA: {}", err);
                self.notify(NotificationLevel::Error, format!("Failed to request SLA: {}", err));
                Err(err)
            }
        };

        self.with_ui(|ui| ui.set_control(Control::RequestSla, was_enabled));
        result
    }

    // ---
    // Pipeline de refresh
    // ---

    /// Um tick: busca o snapshot e renderiza. Falhas aqui nunca viram
    /// notificação; o dado antigo continua na tela.
    pub async fn refresh(&self) -> TickOutcome {
        if !self.is_initialized() || self.is_disposed() {
            return TickOutcome::Skipped;
        }

        let tick = self.inner.next_tick.fetch_add(1, Ordering::SeqCst);

        let payload = match self.inner.api.fetch_metrics().await {
            Ok(payload) => payload,
            Err(err) => {
                tracing::warn!("Falha ao atualizar o painel (tick {}): {}", tick, err);
                return TickOutcome::Failed;
            }
        };

        if let Some(error) = payload.error.as_deref().filter(|e| !e.is_empty()) {
            let err = AppError::Payload(error.to_string());
            tracing::warn!("Painel não atualizado (tick {}): {}", tick, err);
            return TickOutcome::Failed;
        }

        let snapshot = Snapshot::normalize(payload);

        let mut ui = lock(&self.inner.ui);
        if self.is_disposed() {
            return TickOutcome::Skipped;
        }
        if self.inner.config.discard_stale_ticks {
            if let Some(last) = ui.last_applied_tick {
                if tick < last {
                    tracing::debug!("Tick {} descartado: {} já foi aplicado", tick, last);
                    return TickOutcome::Discarded;
                }
            }
        }
        ui.last_applied_tick = Some(ui.last_applied_tick.map_or(tick, |last| last.max(tick)));

        self.renderer().render_snapshot(&mut ui.widgets, &snapshot);
        TickOutcome::Rendered
    }
}

fn sla_success_message(tier: SlaTier, optimal_site: Option<&str>, uptime: Option<f64>) -> String {
    let site = optimal_site.filter(|s| !s.is_empty()).unwrap_or("an available site");
    let mut message = format!("SLA {} requested successfully! Allocated to {}", tier, site);
    if let Some(uptime) = uptime.filter(|u| u.is_finite() && *u > 0.0) {
        message.push_str(&format!(" ({}% uptime)", uptime));
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sla_message_names_tier_site_and_uptime() {
        assert_eq!(
            sla_success_message(SlaTier::Premium, Some("site_3_norway"), Some(99.9)),
            "SLA premium requested successfully! Allocated to site_3_norway (99.9% uptime)"
        );
        assert_eq!(
            sla_success_message(SlaTier::Spot, None, None),
            "SLA spot requested successfully! Allocated to an available site"
        );
    }
}

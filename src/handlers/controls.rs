// src/handlers/controls.rs

// Camada de controle: é ela (e não a lógica de requisição) que garante que um
// botão desabilitado não dispara nada.

use crate::{
    common::error::AppError,
    services::dashboard_service::DashboardController,
    ui::widgets::Control,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlState {
    initialize: bool,
    optimize: bool,
    request_sla: bool,
}

// Estado da tela recém-aberta: só dá para inicializar (e pedir SLA).
impl Default for ControlState {
    fn default() -> Self {
        Self {
            initialize: true,
            optimize: false,
            request_sla: true,
        }
    }
}

impl ControlState {
    pub const ALL: [Control; 3] = [Control::Initialize, Control::Optimize, Control::RequestSla];

    pub fn is_enabled(&self, control: Control) -> bool {
        match control {
            Control::Initialize => self.initialize,
            Control::Optimize => self.optimize,
            Control::RequestSla => self.request_sla,
        }
    }

    pub fn set(&mut self, control: Control, enabled: bool) {
        match control {
            Control::Initialize => self.initialize = enabled,
            Control::Optimize => self.optimize = enabled,
            Control::RequestSla => self.request_sla = enabled,
        }
    }
}

#[derive(Debug)]
pub enum ClickOutcome {
    /// Controle desabilitado: clique descartado sem efeito nenhum.
    Ignored,
    Completed,
    /// A ação falhou; a notificação já foi exibida.
    Failed(AppError),
}

impl ClickOutcome {
    pub fn is_ignored(&self) -> bool {
        matches!(self, ClickOutcome::Ignored)
    }
}

/// Despacha um clique para a ação correspondente, se o controle estiver habilitado.
pub async fn handle_click(controller: &DashboardController, control: Control) -> ClickOutcome {
    if !controller.is_enabled(control) {
        tracing::debug!("Clique em {:?} ignorado: controle desabilitado", control);
        return ClickOutcome::Ignored;
    }

    let result = match control {
        Control::Initialize => controller.initialize_system().await,
        Control::Optimize => controller.optimize_system().await,
        Control::RequestSla => controller.request_sla().await,
    };

    match result {
        Ok(()) => ClickOutcome::Completed,
        Err(err) => ClickOutcome::Failed(err),
    }
}

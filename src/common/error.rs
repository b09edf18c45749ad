// src/common/error.rs

use reqwest::StatusCode;
use thiserror::Error;

// Nosso tipo de erro, com `thiserror` para ergonomia.
// As mensagens aparecem nas notificações, então devem ser legíveis para o usuário.
#[derive(Debug, Error)]
pub enum AppError {
    // Falha de transporte (conexão recusada, timeout, corpo ilegível...)
    #[error("network error: {0}")]
    Http(#[from] reqwest::Error),

    // O backend respondeu, mas com status fora de 2xx
    #[error("{endpoint} returned {status}{}", detail_suffix(.detail))]
    UnexpectedStatus {
        endpoint: &'static str,
        status: StatusCode,
        detail: Option<String>,
    },

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    // Resposta 2xx cujo payload diz que a operação falhou
    #[error("{0}")]
    Rejected(String),

    // Campo `error` presente no payload de métricas
    #[error("backend reported: {0}")]
    Payload(String),

    #[error("Please fill in all SLA request fields")]
    Validation(#[from] validator::ValidationErrors),

    // Ação pedida fora do ciclo de vida (antes do mount ou depois do dispose)
    #[error("dashboard is {0}")]
    Inactive(&'static str),

    #[error("invalid configuration: {0}")]
    Config(String),
}

fn detail_suffix(detail: &Option<String>) -> String {
    match detail {
        Some(d) if !d.is_empty() => format!(": {}", d),
        _ => String::new(),
    }
}

impl AppError {
    /// Erros de validação são mostrados sem o prefixo "Failed to ...".
    pub fn is_validation(&self) -> bool {
        matches!(self, AppError::Validation(_))
    }
}

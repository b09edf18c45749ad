// src/models/actions.rs

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::models::metrics::lenient;

// --- Enums ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlaTier {
    Premium,
    Standard,
    Flexible,
    Spot,
}

impl SlaTier {
    pub const ALL: [SlaTier; 4] = [
        SlaTier::Premium,
        SlaTier::Standard,
        SlaTier::Flexible,
        SlaTier::Spot,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SlaTier::Premium => "premium",
            SlaTier::Standard => "standard",
            SlaTier::Flexible => "flexible",
            SlaTier::Spot => "spot",
        }
    }
}

impl fmt::Display for SlaTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SlaTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SlaTier::ALL
            .into_iter()
            .find(|tier| tier.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown SLA tier '{}'", s))
    }
}

// --- Respostas ---

// POST /api/initialize
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InitializeResponse {
    #[serde(default, deserialize_with = "lenient")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub message: Option<String>,
}

impl InitializeResponse {
    pub fn is_success(&self) -> bool {
        self.status.as_deref() == Some("success")
    }
}

// POST /api/optimize
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OptimizeResponse {
    #[serde(default, deserialize_with = "lenient")]
    pub claude_reasoning: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub climate_savings: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub timezone_optimization: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub total_revenue: Option<f64>,
}

// POST /api/sla/request
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SlaResponse {
    #[serde(default, deserialize_with = "lenient")]
    pub optimal_site: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub sla_tier: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub power_allocated: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub estimated_uptime: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub price_multiplier: Option<f64>,
}

// --- Formulário de SLA ---

/// O que o usuário digitou, antes de qualquer parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlaForm {
    pub tier: SlaTier,
    pub power_requirement: String,
    pub duration_hours: String,
}

impl Default for SlaForm {
    fn default() -> Self {
        Self {
            tier: SlaTier::Premium,
            power_requirement: String::new(),
            duration_hours: String::new(),
        }
    }
}

/// Parse de prefixo inteiro: `"42MW"` → 42, `" -7"` → -7, `"abc"` → None.
/// Prefixos grandes demais saturam em `i64::MAX`/`i64::MIN`.
pub fn parse_int_prefix(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (sign, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (-1, &trimmed[1..]),
        Some(b'+') => (1, &trimmed[1..]),
        _ => (1, trimmed),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    let value = digits[..end].bytes().fold(0i64, |acc, b| {
        let digit = i64::from(b - b'0');
        acc.saturating_mul(10).saturating_add(sign * digit)
    });
    Some(value)
}

// ---
// Validação Customizada
// ---
fn validate_non_zero(value: i64) -> Result<(), ValidationError> {
    if value == 0 {
        let mut err = ValidationError::new("non_zero");
        err.message = Some("Please fill in all SLA request fields".into());
        return Err(err);
    }
    Ok(())
}

// ---
// Payload: SlaRequest (corpo do POST)
// ---
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Validate)]
pub struct SlaRequest {
    pub tier: SlaTier,

    #[validate(custom(function = "validate_non_zero"))]
    pub power_requirement: i64,

    #[validate(custom(function = "validate_non_zero"))]
    pub duration_hours: i64,
}

impl TryFrom<&SlaForm> for SlaRequest {
    type Error = validator::ValidationErrors;

    // Texto não numérico conta como zero e cai na mesma validação.
    fn try_from(form: &SlaForm) -> Result<Self, Self::Error> {
        let request = SlaRequest {
            tier: form.tier,
            power_requirement: parse_int_prefix(&form.power_requirement).unwrap_or(0),
            duration_hours: parse_int_prefix(&form.duration_hours).unwrap_or(0),
        };
        request.validate()?;
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(power: &str, hours: &str) -> SlaForm {
        SlaForm {
            tier: SlaTier::Standard,
            power_requirement: power.into(),
            duration_hours: hours.into(),
        }
    }

    #[test]
    fn parse_int_prefix_behaves_like_integer_prefix_parsing() {
        assert_eq!(parse_int_prefix("250"), Some(250));
        assert_eq!(parse_int_prefix("  12MW"), Some(12));
        assert_eq!(parse_int_prefix("-5"), Some(-5));
        assert_eq!(parse_int_prefix("+8h"), Some(8));
        assert_eq!(parse_int_prefix("3.9"), Some(3));
        assert_eq!(parse_int_prefix(""), None);
        assert_eq!(parse_int_prefix("abc"), None);
        assert_eq!(parse_int_prefix("-"), None);
    }

    #[test]
    fn huge_prefix_saturates_instead_of_failing() {
        assert_eq!(parse_int_prefix("99999999999999999999"), Some(i64::MAX));
        assert_eq!(parse_int_prefix("-99999999999999999999MW"), Some(i64::MIN));
        let request = SlaRequest::try_from(&form("99999999999999999999", "1")).unwrap();
        assert_eq!(request.power_requirement, i64::MAX);
    }

    #[test]
    fn non_zero_rule_takes_the_value() {
        assert!(validate_non_zero(0).is_err());
        assert!(validate_non_zero(-3).is_ok());
        assert!(validate_non_zero(7).is_ok());
    }

    #[test]
    fn valid_form_becomes_request() {
        let request = SlaRequest::try_from(&form("500", "24")).unwrap();
        assert_eq!(request.tier, SlaTier::Standard);
        assert_eq!(request.power_requirement, 500);
        assert_eq!(request.duration_hours, 24);
    }

    #[test]
    fn zero_or_non_numeric_fields_fail_validation() {
        assert!(SlaRequest::try_from(&form("0", "24")).is_err());
        assert!(SlaRequest::try_from(&form("100", "soon")).is_err());
        assert!(SlaRequest::try_from(&form("", "")).is_err());

        let errors = SlaRequest::try_from(&form("0", "x")).unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("power_requirement"));
        assert!(fields.contains_key("duration_hours"));
    }

    #[test]
    fn negative_values_are_truthy_and_pass() {
        assert!(SlaRequest::try_from(&form("-10", "2")).is_ok());
    }

    #[test]
    fn request_serializes_with_lowercase_tier() {
        let request = SlaRequest {
            tier: SlaTier::Flexible,
            power_requirement: 100,
            duration_hours: 6,
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            serde_json::json!({ "tier": "flexible", "power_requirement": 100, "duration_hours": 6 })
        );
    }

    #[test]
    fn tier_parses_case_insensitively() {
        assert_eq!("Premium".parse::<SlaTier>(), Ok(SlaTier::Premium));
        assert_eq!(" spot ".parse::<SlaTier>(), Ok(SlaTier::Spot));
        assert!("gold".parse::<SlaTier>().is_err());
    }

    #[test]
    fn initialize_success_requires_exact_status() {
        let ok: InitializeResponse =
            serde_json::from_str(r#"{"status":"success","message":"ready"}"#).unwrap();
        assert!(ok.is_success());
        let err: InitializeResponse =
            serde_json::from_str(r#"{"status":"error","message":"boom"}"#).unwrap();
        assert!(!err.is_success());
        assert!(!InitializeResponse::default().is_success());
    }
}

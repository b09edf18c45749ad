// src/common/format.rs

// Formatadores puros usados pelos cards, popups e slots de texto.
// Nenhum deles tem efeito colateral; zero e NaN contam como "vazio".

use chrono::{DateTime, FixedOffset, NaiveDateTime};

/// Ponto fixo com `digits` casas. Empates exatos arredondam para longe de
/// zero (`0.125` → `"0.13"`), diferente do `{:.2}` padrão do Rust.
pub fn to_fixed(value: f64, digits: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let abs = value.abs();

    // Expansão com casas extras para detectar um empate exato
    let wide = format!("{:.*}", digits + 30, abs);
    let tail = &wide[wide.len() - 30..];
    let is_tie = tail.starts_with('5') && tail[1..].bytes().all(|b| b == b'0');

    let rounded = if is_tie {
        let step = 10f64.powi(-(digits as i32));
        format!("{:.*}", digits, abs + step / 2.0)
    } else {
        format!("{:.*}", digits, abs)
    };

    if value < 0.0 { format!("-{}", rounded) } else { rounded }
}

fn is_blank(value: f64) -> bool {
    value == 0.0 || value.is_nan()
}

// Três faixas: unidades / milhares / milhões
fn scaled(value: f64, base_digits: usize) -> String {
    if value < 1_000.0 {
        to_fixed(value, base_digits)
    } else if value < 1_000_000.0 {
        format!("{}K", to_fixed(value / 1_000.0, 1))
    } else {
        format!("{}M", to_fixed(value / 1_000_000.0, 1))
    }
}

pub fn format_currency(value: f64) -> String {
    if is_blank(value) {
        return "$0".to_string();
    }
    format!("${}", scaled(value, 2))
}

pub fn format_number(value: f64) -> String {
    if is_blank(value) {
        return "0".to_string();
    }
    scaled(value, 0)
}

/// Fração (0..1) em porcentagem. O sentinela de zero acompanha as casas
/// decimais: `"0.0%"` com uma casa, `"0%"` sem casas.
pub fn format_percentage(value: f64, decimals: usize) -> String {
    if is_blank(value) {
        return format!("{}%", to_fixed(0.0, decimals));
    }
    format!("{}%", to_fixed(value * 100.0, decimals))
}

pub fn format_time(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return "N/A".to_string();
    }

    if let Some(parsed) = parse_with_offset(trimmed) {
        return format!("{} {}", parsed.format("%I:%M %p"), offset_label(&parsed));
    }
    // "2024-05-01 14:03:22 UTC": data local seguida do nome da zona zero
    if let Some(naive) = strip_utc_suffix(trimmed).and_then(parse_naive) {
        return format!("{} UTC", naive.format("%I:%M %p"));
    }
    if let Some(naive) = parse_naive(trimmed) {
        return naive.format("%I:%M %p").to_string();
    }

    // Ex.: "2024-05-01 14:03:22 CEST" → "14:03:22 CEST"
    let tokens: Vec<&str> = raw.split(' ').collect();
    let tail = tokens[tokens.len().saturating_sub(2)..].join(" ");
    if tail.is_empty() { raw.to_string() } else { tail }
}

fn parse_with_offset(raw: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(raw)
        .or_else(|_| DateTime::parse_from_rfc2822(raw))
        .ok()
}

fn strip_utc_suffix(raw: &str) -> Option<&str> {
    let (head, zone) = raw.rsplit_once(' ')?;
    matches!(zone, "UTC" | "GMT" | "Z").then(|| head.trim_end())
}

fn parse_naive(raw: &str) -> Option<NaiveDateTime> {
    const FORMATS: [&str; 4] = [
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M",
    ];
    FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| raw.parse::<NaiveDateTime>().ok())
}

fn offset_label(dt: &DateTime<FixedOffset>) -> String {
    let seconds = dt.offset().local_minus_utc();
    if seconds == 0 {
        return "UTC".to_string();
    }
    let sign = if seconds < 0 { '-' } else { '+' };
    let minutes = seconds.abs() / 60;
    format!("UTC{}{:02}:{:02}", sign, minutes / 60, minutes % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_fixed_rounds_ties_away_from_zero() {
        assert_eq!(to_fixed(0.125, 2), "0.13");
        assert_eq!(to_fixed(2.5, 0), "3");
        assert_eq!(to_fixed(-2.5, 0), "-3");
        assert_eq!(to_fixed(1.005, 2), "1.00"); // 1.005 é 1.00499999... em binário
        assert_eq!(to_fixed(999.994, 2), "999.99");
        assert_eq!(to_fixed(0.0, 1), "0.0");
    }

    #[test]
    fn currency_tiers_switch_exactly_at_thousand_and_million() {
        assert_eq!(format_currency(0.0), "$0");
        assert_eq!(format_currency(f64::NAN), "$0");
        assert_eq!(format_currency(999.99), "$999.99");
        assert_eq!(format_currency(1_000.0), "$1.0K");
        assert_eq!(format_currency(999_999.0), "$1000.0K");
        assert_eq!(format_currency(1_000_000.0), "$1.0M");
        assert_eq!(format_currency(2_345_678.0), "$2.3M");
    }

    #[test]
    fn negative_currency_stays_in_base_tier() {
        assert_eq!(format_currency(-1500.0), "$-1500.00");
    }

    #[test]
    fn number_tiers_have_no_prefix() {
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(999.4), "999");
        assert_eq!(format_number(1_000.0), "1.0K");
        assert_eq!(format_number(999_999.0), "1000.0K");
        assert_eq!(format_number(1_000_000.0), "1.0M");
    }

    #[test]
    fn percentage_zero_sentinel_follows_decimals() {
        assert_eq!(format_percentage(0.0, 1), "0.0%");
        assert_eq!(format_percentage(0.0, 0), "0%");
        assert_eq!(format_percentage(f64::NAN, 1), "0.0%");
        assert_eq!(format_percentage(0.853, 1), "85.3%");
        assert_eq!(format_percentage(0.853, 0), "85%");
        assert_eq!(format_percentage(1.0, 1), "100.0%");
    }

    #[test]
    fn time_parses_timestamps_with_offset() {
        assert_eq!(format_time("2024-05-01T14:03:22Z"), "02:03 PM UTC");
        assert_eq!(format_time("2024-05-01T09:30:00+02:00"), "09:30 AM UTC+02:00");
        assert_eq!(format_time("2024-05-01T09:30:00-03:30"), "09:30 AM UTC-03:30");
    }

    #[test]
    fn time_parses_naive_timestamps() {
        assert_eq!(format_time("2024-05-01 18:45:00"), "06:45 PM");
        assert_eq!(format_time("2024-05-01T07:05"), "07:05 AM");
    }

    #[test]
    fn time_accepts_trailing_utc_zone_name() {
        assert_eq!(format_time("2024-05-01 14:03:22 UTC"), "02:03 PM UTC");
        assert_eq!(format_time("2024-05-01 09:15:00 GMT"), "09:15 AM UTC");
        // Outras abreviações continuam no fallback
        assert_eq!(format_time("2024-05-01 14:03:22 JST"), "14:03:22 JST");
    }

    #[test]
    fn time_falls_back_to_trailing_tokens() {
        assert_eq!(format_time("2024-05-01 14:03:22 CEST"), "14:03:22 CEST");
        assert_eq!(format_time("N/A"), "N/A");
        assert_eq!(format_time("noon"), "noon");
        assert_eq!(format_time(""), "N/A");
        assert_eq!(format_time("   "), "N/A");
    }
}

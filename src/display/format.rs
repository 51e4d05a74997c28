//! Locale-style formatting for prices and dates (es-AR conventions,
//! matching how the original dashboard rendered them)

use chrono::{DateTime, Datelike, Utc};

const MONTHS_ES: [&str; 12] = [
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];

/// Currency format without decimals, thousands separated by dots:
/// 1234567.0 → "$ 1.234.567"
pub fn format_price(price: f64) -> String {
    let rounded = price.round() as i64;
    let negative = rounded < 0;
    let digits = rounded.abs().to_string();

    let mut grouped = String::new();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    if negative {
        format!("$ -{}", grouped)
    } else {
        format!("$ {}", grouped)
    }
}

/// Long-form Spanish date: "10 de marzo de 2025"
pub fn format_date(date: DateTime<Utc>) -> String {
    format!(
        "{} de {} de {}",
        date.day(),
        MONTHS_ES[date.month0() as usize],
        date.year()
    )
}

/// Publication date or a placeholder for rows that predate `created_at`
pub fn format_optional_date(date: Option<DateTime<Utc>>) -> String {
    date.map(format_date).unwrap_or_else(|| "—".to_string())
}

//! Shipping Quote Helpers
//!
//! Formatting and small payload builders shared by the REST and tool handlers.

use super::{
    models::{Country, QuoteRequest, QuoteResult, ShippingMode},
    rates::RateTable,
};
use serde_json::{json, Value};

/// Renders a cost the way the calculator page shows it: a dollar sign,
/// thousands separators and at most three fraction digits.
///
/// Example output: `"$2,099.8"`.
pub fn format_cost(cost: f64) -> String {
    let fixed = format!("{:.3}", cost.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if cost < 0.0 { "-" } else { "" };
    if frac_part.is_empty() {
        format!("{}${}", sign, grouped)
    } else {
        format!("{}${}.{}", sign, grouped, frac_part)
    }
}

/// Produces a one-line summary of a quote for logs and tool messages.
///
/// Example output: `"air colombia -> spain, 2 kg, 1000 cm3: $2,099.8"`.
pub fn format_quote_summary(request: &QuoteRequest, result: &QuoteResult) -> String {
    format!(
        "{} {} -> {}, {} kg, {} cm3: {}",
        request.mode,
        request.origin,
        request.destination,
        request.weight_kg,
        result.volume_cm3,
        format_cost(result.cost_estimate)
    )
}

fn country_options(countries: &[Country]) -> Vec<Value> {
    countries
        .iter()
        .map(|c| json!({ "value": c.as_str(), "label": c.label() }))
        .collect()
}

/// Builds the payload the form uses to populate its selectors.
pub fn selector_options(rates: &RateTable) -> Value {
    let modes: Vec<Value> = ShippingMode::ALL
        .iter()
        .map(|m| json!({ "value": m.as_str(), "label": m.label() }))
        .collect();

    json!({
        "modes": modes,
        "origins": country_options(&Country::ORIGINS),
        "destinations": country_options(&Country::DESTINATIONS),
        "rates": rates,
    })
}

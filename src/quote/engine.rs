//! Quote Engine
//!
//! Pure computation: same request and table in, same cost out.

use super::{
    models::{QuoteRequest, QuoteResult},
    rates::RateTable,
};
use crate::error::{QuoteError, Result};

/// Rejects non-positive (or non-finite) weight and box dimensions.
pub fn validate_measurements(
    weight_kg: f64,
    length_cm: f64,
    width_cm: f64,
    height_cm: f64,
) -> Result<()> {
    let fields = [
        ("weight", weight_kg),
        ("length", length_cm),
        ("width", width_cm),
        ("height", height_cm),
    ];

    for (name, value) in fields {
        if !(value.is_finite() && value > 0.0) {
            return Err(QuoteError::invalid(format!(
                "{} must be a positive number",
                name
            )));
        }
    }

    Ok(())
}

/// Estimates the shipping cost for `request` using `rates`.
///
/// The unit rate comes from the origin country. The destination must be in
/// the table as well, though its rates do not enter the formula.
pub fn compute_quote(request: &QuoteRequest, rates: &RateTable) -> Result<QuoteResult> {
    validate_measurements(
        request.weight_kg,
        request.length_cm,
        request.width_cm,
        request.height_cm,
    )?;

    let (origin_rates, _destination_rates) =
        match (rates.get(request.origin), rates.get(request.destination)) {
            (Some(origin), Some(destination)) => (origin, destination),
            _ => return Err(QuoteError::invalid("please select valid countries")),
        };

    let volume_cm3 = request.volume_cm3();
    let unit_rate = origin_rates.for_mode(request.mode);
    let cost_estimate =
        unit_rate * request.weight_kg + request.mode.volume_multiplier() * volume_cm3;

    // Finite inputs can still overflow once multiplied together
    if !(volume_cm3.is_finite() && cost_estimate.is_finite()) {
        return Err(QuoteError::invalid("measurements are too large"));
    }

    Ok(QuoteResult {
        cost_estimate,
        volume_cm3,
        unit_rate,
    })
}

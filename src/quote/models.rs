//! Shipping Quote Domain Models
//!
//! This module contains the data structures exchanged with the quote engine:
//! the closed country and mode enumerations, the raw form input and the typed
//! request/result pair.

use crate::error::{QuoteError, Result};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

// =============================================================================
// Enumerations
// =============================================================================

/// Countries known to the calculator
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Country {
    Colombia,
    Peru,
    Ecuador,
    Usa,
    Spain,
    China,
}

impl Country {
    pub const ALL: [Country; 6] = [
        Country::Colombia,
        Country::Peru,
        Country::Ecuador,
        Country::Usa,
        Country::Spain,
        Country::China,
    ];

    /// Countries offered by the origin selector of the form
    pub const ORIGINS: [Country; 3] = [Country::Colombia, Country::Peru, Country::Ecuador];

    /// Countries offered by the destination selector of the form
    pub const DESTINATIONS: [Country; 3] = [Country::Usa, Country::Spain, Country::China];

    pub fn as_str(&self) -> &'static str {
        match self {
            Country::Colombia => "colombia",
            Country::Peru => "peru",
            Country::Ecuador => "ecuador",
            Country::Usa => "usa",
            Country::Spain => "spain",
            Country::China => "china",
        }
    }

    /// Label shown in the form selectors
    pub fn label(&self) -> &'static str {
        match self {
            Country::Colombia => "Colombia",
            Country::Peru => "Perú",
            Country::Ecuador => "Ecuador",
            Country::Usa => "Estados Unidos",
            Country::Spain => "España",
            Country::China => "China",
        }
    }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Country {
    type Err = QuoteError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase();
        Country::ALL
            .into_iter()
            .find(|c| c.as_str() == wanted)
            .ok_or_else(|| QuoteError::invalid(format!("unknown country: {:?}", s)))
    }
}

/// Transport category for a shipment
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShippingMode {
    #[default]
    #[serde(alias = "aereo")]
    Air,
    #[serde(alias = "maritimo")]
    Sea,
    #[serde(alias = "terrestre")]
    Land,
}

impl ShippingMode {
    pub const ALL: [ShippingMode; 3] = [ShippingMode::Air, ShippingMode::Sea, ShippingMode::Land];

    pub fn as_str(&self) -> &'static str {
        match self {
            ShippingMode::Air => "air",
            ShippingMode::Sea => "sea",
            ShippingMode::Land => "land",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ShippingMode::Air => "Aéreo",
            ShippingMode::Sea => "Marítimo",
            ShippingMode::Land => "Terrestre",
        }
    }

    /// Surcharge applied per cubic centimetre of box volume
    pub fn volume_multiplier(&self) -> f64 {
        match self {
            ShippingMode::Air => 2.0,
            ShippingMode::Sea => 1.0,
            ShippingMode::Land => 1.5,
        }
    }
}

impl fmt::Display for ShippingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShippingMode {
    type Err = QuoteError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "air" | "aereo" => Ok(ShippingMode::Air),
            "sea" | "maritimo" => Ok(ShippingMode::Sea),
            "land" | "terrestre" => Ok(ShippingMode::Land),
            _ => Err(QuoteError::invalid(format!("unknown shipping mode: {:?}", s))),
        }
    }
}

// =============================================================================
// Requests and Results
// =============================================================================

/// Raw values as submitted by the calculator form.
///
/// Everything is optional or stringly typed here; `into_request` is the only
/// way to turn it into something the engine accepts.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct QuoteInput {
    /// Shipping mode identifier (defaults to air, the form's preselected tab)
    #[serde(default)]
    pub mode: Option<String>,

    #[serde(default)]
    pub origin: String,

    #[serde(default)]
    pub destination: String,

    #[serde(default)]
    pub weight_kg: Option<f64>,

    #[serde(default)]
    pub length_cm: Option<f64>,

    #[serde(default)]
    pub width_cm: Option<f64>,

    #[serde(default)]
    pub height_cm: Option<f64>,
}

impl QuoteInput {
    /// Validates the raw form values and assembles an immutable request.
    ///
    /// Measurements are checked before the country selection so the first
    /// reported problem matches what the form shows first.
    pub fn into_request(self) -> Result<QuoteRequest> {
        let mode = match self.mode.as_deref() {
            None | Some("") => ShippingMode::default(),
            Some(raw) => raw.parse::<ShippingMode>()?,
        };

        let weight_kg = self.weight_kg.unwrap_or(0.0);
        let length_cm = self.length_cm.unwrap_or(0.0);
        let width_cm = self.width_cm.unwrap_or(0.0);
        let height_cm = self.height_cm.unwrap_or(0.0);
        super::engine::validate_measurements(weight_kg, length_cm, width_cm, height_cm)?;

        let (origin, destination) = match (
            self.origin.parse::<Country>(),
            self.destination.parse::<Country>(),
        ) {
            (Ok(origin), Ok(destination)) => (origin, destination),
            _ => return Err(QuoteError::invalid("please select valid countries")),
        };

        Ok(QuoteRequest {
            mode,
            origin,
            destination,
            weight_kg,
            length_cm,
            width_cm,
            height_cm,
        })
    }
}

/// A validated-shape quote request
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    pub mode: ShippingMode,
    pub origin: Country,
    pub destination: Country,
    pub weight_kg: f64,
    pub length_cm: f64,
    pub width_cm: f64,
    pub height_cm: f64,
}

impl QuoteRequest {
    pub fn volume_cm3(&self) -> f64 {
        self.length_cm * self.width_cm * self.height_cm
    }
}

/// Outcome of a successful quote
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResult {
    pub cost_estimate: f64,

    /// Box volume the surcharge was computed from
    pub volume_cm3: f64,

    /// Origin rate for the chosen mode
    pub unit_rate: f64,
}

/// Body returned by `POST /quote`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResponse {
    pub mode: ShippingMode,
    pub origin: Country,
    pub destination: Country,
    pub volume_cm3: f64,
    pub unit_rate: f64,
    pub cost_estimate: f64,

    /// Cost formatted for display, e.g. `$2,099.8`
    pub display: String,
}

impl QuoteResponse {
    pub fn new(request: &QuoteRequest, result: &QuoteResult) -> Self {
        Self {
            mode: request.mode,
            origin: request.origin,
            destination: request.destination,
            volume_cm3: result.volume_cm3,
            unit_rate: result.unit_rate,
            cost_estimate: result.cost_estimate,
            display: super::helpers::format_cost(result.cost_estimate),
        }
    }
}

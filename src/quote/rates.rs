//! Per-country unit rates
//!
//! The standard table is a literal. Operators may start the server with a
//! TOML file instead, but once built a `RateTable` is never mutated.

use super::models::{Country, ShippingMode};
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, path::Path};

/// Unit price per kilogram for each shipping mode
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModeRates {
    pub air: f64,
    pub sea: f64,
    pub land: f64,
}

impl ModeRates {
    pub const fn new(air: f64, sea: f64, land: f64) -> Self {
        Self { air, sea, land }
    }

    pub fn for_mode(&self, mode: ShippingMode) -> f64 {
        match mode {
            ShippingMode::Air => self.air,
            ShippingMode::Sea => self.sea,
            ShippingMode::Land => self.land,
        }
    }

    fn is_valid(&self) -> bool {
        [self.air, self.sea, self.land]
            .iter()
            .all(|r| r.is_finite() && *r >= 0.0)
    }
}

const STANDARD_RATES: [(Country, ModeRates); 6] = [
    (Country::Colombia, ModeRates::new(49.9, 36.0, 7.0)),
    (Country::Peru, ModeRates::new(49.9, 36.0, 8.0)),
    (Country::Ecuador, ModeRates::new(49.9, 36.0, 7.5)),
    (Country::Usa, ModeRates::new(49.9, 36.0, 10.0)),
    (Country::Spain, ModeRates::new(49.9, 36.0, 9.0)),
    (Country::China, ModeRates::new(49.9, 36.0, 12.0)),
];

/// Mapping from country to its per-mode rates
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RateTable {
    rates: BTreeMap<Country, ModeRates>,
}

impl Default for RateTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl FromIterator<(Country, ModeRates)> for RateTable {
    fn from_iter<I: IntoIterator<Item = (Country, ModeRates)>>(iter: I) -> Self {
        Self {
            rates: iter.into_iter().collect(),
        }
    }
}

impl RateTable {
    /// The built-in table covering every known country
    pub fn standard() -> Self {
        STANDARD_RATES.into_iter().collect()
    }

    pub fn get(&self, country: Country) -> Option<&ModeRates> {
        self.rates.get(&country)
    }

    pub fn contains(&self, country: Country) -> bool {
        self.rates.contains_key(&country)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Country, &ModeRates)> {
        self.rates.iter().map(|(c, r)| (*c, r))
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    /// Parses a table from TOML, one `[country]` section per entry:
    ///
    /// ```toml
    /// [colombia]
    /// air = 49.9
    /// sea = 36
    /// land = 7
    /// ```
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let raw: BTreeMap<String, ModeRates> = toml::from_str(source)?;

        let mut rates = BTreeMap::new();
        for (name, entry) in raw {
            let country: Country = name.parse().map_err(|_| ConfigError::Invalid {
                message: format!("unknown country in rate file: {}", name),
            })?;
            if !entry.is_valid() {
                return Err(ConfigError::Invalid {
                    message: format!("rates for {} must be finite and non-negative", name),
                });
            }
            rates.insert(country, entry);
        }

        let table = Self { rates };
        if table.is_empty() {
            return Err(ConfigError::Invalid {
                message: "rate file defines no countries".to_string(),
            });
        }

        Ok(table)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }
}

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Error;

/// The energy carrier of a vehicle. It determines both the emission factor
/// and the unit in which the fuel efficiency is expressed.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(try_from = "String")]
pub enum FuelType {
    Petrol,
    Diesel,
    #[serde(rename = "EV")]
    Ev,
}

/// An entry of [`EMISSION_FACTORS`]
#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct EmissionFactor {
    pub fuel_type: FuelType,
    /// kg of CO2e per unit of fuel (L) or energy (kWh)
    pub kg_co2e_per_unit: f64,
}

/// The emission factor of every [`FuelType`].
pub static EMISSION_FACTORS: [EmissionFactor; 3] = [
    EmissionFactor {
        fuel_type: FuelType::Petrol,
        kg_co2e_per_unit: 2.31,
    },
    EmissionFactor {
        fuel_type: FuelType::Diesel,
        kg_co2e_per_unit: 2.66,
    },
    EmissionFactor {
        fuel_type: FuelType::Ev,
        kg_co2e_per_unit: 0.79,
    },
];

impl FuelType {
    pub const ALL: [FuelType; 3] = [FuelType::Petrol, FuelType::Diesel, FuelType::Ev];

    /// Returns the emission factor in kg CO2e per [`FuelType::fuel_unit`]
    pub fn emission_factor(self) -> f64 {
        EMISSION_FACTORS[self.index()].kg_co2e_per_unit
    }

    /// The unit of fuel consumed (`L` or `kWh`)
    pub fn fuel_unit(self) -> &'static str {
        match self {
            FuelType::Petrol | FuelType::Diesel => "L",
            FuelType::Ev => "kWh",
        }
    }

    /// The unit of the fuel efficiency (`L/100km` or `kWh/100km`)
    pub fn efficiency_unit(self) -> &'static str {
        match self {
            FuelType::Petrol | FuelType::Diesel => "L/100km",
            FuelType::Ev => "kWh/100km",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            FuelType::Petrol => "Petrol",
            FuelType::Diesel => "Diesel",
            FuelType::Ev => "EV",
        }
    }

    fn index(self) -> usize {
        match self {
            FuelType::Petrol => 0,
            FuelType::Diesel => 1,
            FuelType::Ev => 2,
        }
    }
}

impl std::fmt::Display for FuelType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FuelType {
    type Err = Error;

    /// Case-insensitive, surrounding whitespace ignored
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        FuelType::ALL
            .into_iter()
            .find(|fuel| fuel.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| Error::InvalidFuelType(trimmed.to_string()))
    }
}

impl TryFrom<String> for FuelType {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

use serde::{Deserialize, Serialize};

use crate::{Error, FuelType};

/// What is known about the annual use of a vehicle
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct EmissionsInput {
    /// annual distance driven in km
    pub distance_km: f64,
    pub fuel_type: FuelType,
    /// consumption per 100 km, in [`FuelType::efficiency_unit`]
    pub fuel_efficiency: f64,
    /// share of the distance driven for business, in %
    pub business_use_percent: f64,
}

/// Emissions of a vehicle over a year, in kg of CO2e.
///
/// `scope2` is the share of `total` attributed to business use and `scope3`
/// is its complement, so that `scope2 + scope3 == total`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Default)]
pub struct EmissionsResult {
    pub total: f64,
    pub scope2: f64,
    pub scope3: f64,
}

impl EmissionsInput {
    pub fn new(
        distance_km: f64,
        fuel_type: FuelType,
        fuel_efficiency: f64,
        business_use_percent: f64,
    ) -> Self {
        Self {
            distance_km,
            fuel_type,
            fuel_efficiency,
            business_use_percent,
        }
    }

    /// Builds an [`EmissionsInput`] whose fuel type is given by name.
    /// # Error
    /// Errors with [`Error::InvalidFuelType`] if `fuel_type` is not one of `Petrol`, `Diesel` or `EV`
    pub fn parse(
        distance_km: f64,
        fuel_type: &str,
        fuel_efficiency: f64,
        business_use_percent: f64,
    ) -> Result<Self, Error> {
        Ok(Self::new(
            distance_km,
            fuel_type.parse()?,
            fuel_efficiency,
            business_use_percent,
        ))
    }

    /// Checks that the input is within the domain of the calculation:
    /// * all values are finite
    /// * the distance is not negative
    /// * the fuel efficiency is positive
    /// * the business use is within `[0, 100]`
    /// # Error
    /// Errors with [`Error::InvalidInput`] naming the first offending field
    pub fn validate(&self) -> Result<(), Error> {
        fn invalid(field: &'static str, value: f64, reason: &'static str) -> Result<(), Error> {
            Err(Error::InvalidInput {
                field,
                value,
                reason,
            })
        }

        let fields = [
            ("distance_km", self.distance_km),
            ("fuel_efficiency", self.fuel_efficiency),
            ("business_use_percent", self.business_use_percent),
        ];
        if let Some((field, value)) = fields.into_iter().find(|(_, v)| !v.is_finite()) {
            return invalid(field, value, "must be a finite number");
        }

        if self.distance_km < 0.0 {
            return invalid("distance_km", self.distance_km, "must not be negative");
        }
        if self.fuel_efficiency <= 0.0 {
            return invalid("fuel_efficiency", self.fuel_efficiency, "must be positive");
        }
        if !(0.0..=100.0).contains(&self.business_use_percent) {
            return invalid(
                "business_use_percent",
                self.business_use_percent,
                "must be between 0 and 100",
            );
        }
        Ok(())
    }
}

/// Returns the fuel (L) or energy (kWh) consumed by driving `distance_km`.
pub fn fuel_used(input: &EmissionsInput) -> f64 {
    input.distance_km / 100.0 * input.fuel_efficiency
}

/// Returns the emissions of a vehicle, split by business use.
/// Values are passed through as given; see [`estimate_checked`] to reject
/// out-of-domain inputs.
pub fn estimate(input: &EmissionsInput) -> EmissionsResult {
    let total = fuel_used(input) * input.fuel_type.emission_factor();
    let scope2 = input.business_use_percent / 100.0 * total;
    EmissionsResult {
        total,
        scope2,
        scope3: total - scope2,
    }
}

/// [`estimate`] after [`EmissionsInput::validate`].
/// # Error
/// Errors with [`Error::InvalidInput`] if the input is out of domain
pub fn estimate_checked(input: &EmissionsInput) -> Result<EmissionsResult, Error> {
    input.validate()?;
    Ok(estimate(input))
}

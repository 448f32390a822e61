use crate::{estimate, format_kg_co2e, fuel_used, EmissionsInput, EmissionsResult, Error};

/// A leased vehicle as declared by its driver
#[derive(Debug, Clone, PartialEq)]
pub struct Vehicle {
    /// the driver (e.g. `j.doe@example.com`)
    pub employee: String,
    /// a free-form description of the vehicle (e.g. a plate number)
    pub vehicle: String,
    pub input: EmissionsInput,
}

/// The estimated emissions of a [`Vehicle`]
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleEmissions {
    pub employee: String,
    pub vehicle: String,
    pub input: EmissionsInput,
    /// fuel (L) or energy (kWh) used over the year
    pub fuel_used: f64,
    pub emissions: EmissionsResult,
}

impl Vehicle {
    pub fn estimate(&self) -> VehicleEmissions {
        VehicleEmissions {
            employee: self.employee.clone(),
            vehicle: self.vehicle.clone(),
            input: self.input,
            fuel_used: fuel_used(&self.input),
            emissions: estimate(&self.input),
        }
    }

    fn reject(self, error: Error) -> Rejected {
        Rejected {
            employee: self.employee,
            vehicle: self.vehicle,
            error,
        }
    }
}

/// A vehicle that could not be estimated
#[derive(Debug, Clone, PartialEq)]
pub struct Rejected {
    pub employee: String,
    pub vehicle: String,
    pub error: Error,
}

impl std::ops::Add for EmissionsResult {
    type Output = Self;

    /// Adds totals and business shares; `scope3` remains their complement.
    fn add(self, rhs: Self) -> Self {
        let total = self.total + rhs.total;
        let scope2 = self.scope2 + rhs.scope2;
        Self {
            total,
            scope2,
            scope3: total - scope2,
        }
    }
}

impl std::iter::Sum for EmissionsResult {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), |acc, x| acc + x)
    }
}

impl<'a> std::iter::Sum<&'a EmissionsResult> for EmissionsResult {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

/// The emissions of a set of vehicles
#[derive(Debug, Clone, PartialEq)]
pub struct Fleet {
    pub vehicles: Vec<VehicleEmissions>,
    /// vehicles that were not estimated, with the reason
    pub rejected: Vec<Rejected>,
    pub total: EmissionsResult,
}

/// Estimates the emissions of every vehicle and their sum.
/// Vehicles already rejected (e.g. with an unknown fuel type) and vehicles
/// whose input does not [validate](EmissionsInput::validate) are excluded
/// from the sum and returned in [`Fleet::rejected`].
pub fn estimate_fleet(
    vehicles: impl IntoIterator<Item = Result<Vehicle, Rejected>>,
) -> Fleet {
    let mut estimated = vec![];
    let mut rejected = vec![];
    for vehicle in vehicles {
        let vehicle = match vehicle {
            Ok(vehicle) => vehicle,
            Err(r) => {
                rejected.push(r);
                continue;
            }
        };
        match vehicle.input.validate() {
            Ok(()) => {
                let emissions = vehicle.estimate();
                log::debug!(
                    "{} ({}): {}",
                    emissions.employee,
                    emissions.vehicle,
                    format_kg_co2e(emissions.emissions.total)
                );
                estimated.push(emissions)
            }
            Err(e) => rejected.push(vehicle.reject(e)),
        }
    }

    let total = estimated.iter().map(|v| &v.emissions).sum();
    Fleet {
        vehicles: estimated,
        rejected,
        total,
    }
}

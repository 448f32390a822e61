use serde::{Deserialize, Serialize};

use crate::{EmissionsInput, EmissionsResult, FuelType, Rejected, Vehicle, VehicleEmissions};

/// A row of a fleet file, e.g.
/// ```text
/// employee,vehicle,distance_km,fuel_type,fuel_efficiency,business_use_percent
/// a.smith,AB-123-C,15000,Petrol,7.5,30
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct VehicleRecord {
    pub employee: String,
    pub vehicle: String,
    pub distance_km: f64,
    /// parsed per row, so that an unknown fuel type only rejects its own vehicle
    pub fuel_type: String,
    pub fuel_efficiency: f64,
    pub business_use_percent: f64,
}

/// A row of an estimates file
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct EstimateRecord {
    pub employee: String,
    pub vehicle: String,
    pub fuel_type: FuelType,
    /// in L or kWh, depending on the fuel type
    pub fuel_used: f64,
    /// kg CO2e
    pub total: f64,
    /// kg CO2e
    pub scope2: f64,
    /// kg CO2e
    pub scope3: f64,
}

impl TryFrom<VehicleRecord> for Vehicle {
    type Error = Rejected;

    fn try_from(r: VehicleRecord) -> Result<Self, Self::Error> {
        match EmissionsInput::parse(
            r.distance_km,
            &r.fuel_type,
            r.fuel_efficiency,
            r.business_use_percent,
        ) {
            Ok(input) => Ok(Vehicle {
                employee: r.employee,
                vehicle: r.vehicle,
                input,
            }),
            Err(error) => Err(Rejected {
                employee: r.employee,
                vehicle: r.vehicle,
                error,
            }),
        }
    }
}

impl EstimateRecord {
    pub fn new(v: &VehicleEmissions) -> Self {
        let EmissionsResult {
            total,
            scope2,
            scope3,
        } = v.emissions;
        Self {
            employee: v.employee.clone(),
            vehicle: v.vehicle.clone(),
            fuel_type: v.input.fuel_type,
            fuel_used: v.fuel_used,
            total,
            scope2,
            scope3,
        }
    }
}

/// Loads the vehicles of a fleet file from disk. A row with an unknown fuel
/// type is returned as [`Rejected`] in place of its vehicle.
/// # Error
/// Errors if the file cannot be read or a row is malformed (e.g. missing columns or a non-numeric distance)
pub fn load_vehicles(path: &str) -> Result<Vec<Result<Vehicle, Rejected>>, csv::Error> {
    let data = std::fs::read(path)?;

    deserialize::<VehicleRecord>(&data)
        .map(|r| r.map(Vehicle::try_from))
        .collect()
}

/// Serializes `items` as CSV with a header row
/// # Error
/// Errors if an item cannot be serialized as a flat record
pub fn serialize(
    items: impl Iterator<Item = impl serde::Serialize>,
) -> Result<Vec<u8>, csv::Error> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    for item in items {
        wtr.serialize(item)?
    }
    wtr.into_inner().map_err(|e| e.into_error().into())
}

pub fn deserialize<'a, D: serde::de::DeserializeOwned + 'a>(
    data: &'a [u8],
) -> impl Iterator<Item = Result<D, csv::Error>> + 'a {
    let rdr = csv::ReaderBuilder::new()
        .delimiter(b',')
        .trim(csv::Trim::All)
        .from_reader(std::io::Cursor::new(data));
    rdr.into_deserialize()
}

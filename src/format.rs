use crate::{EmissionsResult, FuelType};

/// Rounds to two decimals, halves away from zero (`779.625` -> `779.63`).
/// `{:.2}` alone rounds halves to even.
pub fn round_to_cents(value: f64) -> f64 {
    // `+ 0.0` turns a rounded `-0.0` into `0.0`
    (value * 100.0).round() / 100.0 + 0.0
}

/// Formats kg of CO2e with two decimals, e.g. `2598.75 kg CO₂e`
pub fn format_kg_co2e(kg: f64) -> String {
    format!("{:.2} kg CO₂e", round_to_cents(kg))
}

/// Formats a fuel efficiency with the unit of its fuel type, e.g. `7.5 L/100km`
pub fn format_efficiency(efficiency: f64, fuel_type: FuelType) -> String {
    format!("{efficiency} {}", fuel_type.efficiency_unit())
}

impl std::fmt::Display for EmissionsResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Total emissions:    {}", format_kg_co2e(self.total))?;
        writeln!(f, "Scope 2 (business): {}", format_kg_co2e(self.scope2))?;
        write!(f, "Scope 3 (private):  {}", format_kg_co2e(self.scope3))
    }
}

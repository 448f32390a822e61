/// Errors raised while assembling or checking an [`crate::EmissionsInput`].
/// Each one is scoped to a single calculation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// The fuel type is not one of `Petrol`, `Diesel` or `EV`
    #[error("unknown fuel type \"{0}\" (expected one of Petrol, Diesel, EV)")]
    InvalidFuelType(String),
    /// A numeric field is outside of its domain
    #[error("invalid {field} {value}: {reason}")]
    InvalidInput {
        field: &'static str,
        value: f64,
        reason: &'static str,
    },
}

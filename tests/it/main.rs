use scopes::{estimate, fuel_used, EmissionsInput, Error, FuelType};

fn abs_difference<T: std::ops::Sub<Output = T> + PartialOrd>(x: T, y: T) -> T {
    if x < y {
        y - x
    } else {
        x - y
    }
}

fn assert_close(value: f64, expected: f64) {
    assert!(
        abs_difference(value, expected) < 1e-9,
        "{value} is not {expected}"
    );
}

/// 15000 km per year with a petrol car at 7.5 L/100km, 30% of which for business
#[test]
fn acceptance_petrol() {
    let input = EmissionsInput::new(15000.0, FuelType::Petrol, 7.5, 30.0);

    assert_close(fuel_used(&input), 1125.0);
    let r = estimate(&input);
    assert_close(r.total, 2598.75);
    assert_close(r.scope2, 779.625);
    assert_close(r.scope3, 1819.125);
}

/// 10000 km per year with an electric car at 15 kWh/100km, only for business
#[test]
fn acceptance_ev() {
    let input = EmissionsInput::new(10000.0, FuelType::Ev, 15.0, 100.0);

    assert_close(fuel_used(&input), 1500.0);
    let r = estimate(&input);
    assert_close(r.total, 1185.0);
    assert_eq!(r.scope2, r.total);
    assert_eq!(r.scope3, 0.0);
}

#[test]
fn unknown_fuel_type() {
    assert_eq!(
        EmissionsInput::parse(15000.0, "Hybrid", 4.0, 30.0),
        Err(Error::InvalidFuelType("Hybrid".to_string()))
    );
}

#[test]
fn deterministic() {
    let input = EmissionsInput::new(12345.6, FuelType::Diesel, 5.7, 42.0);
    assert_eq!(estimate(&input), estimate(&input));
}

#[test]
fn monotonic_in_distance() {
    for fuel_type in FuelType::ALL {
        let mut previous = estimate(&EmissionsInput::new(0.0, fuel_type, 6.0, 50.0)).total;
        for distance_km in (1..=50).map(|x| x as f64 * 1000.0) {
            let total = estimate(&EmissionsInput::new(distance_km, fuel_type, 6.0, 50.0)).total;
            assert!(total > previous, "{fuel_type} at {distance_km} km");
            previous = total;
        }
    }
}

#[test]
fn split_adds_up() {
    for fuel_type in FuelType::ALL {
        for percent in (0..=100).map(|x| x as f64) {
            let r = estimate(&EmissionsInput::new(17500.0, fuel_type, 6.3, percent));
            assert!(abs_difference(r.scope2 + r.scope3, r.total) <= f64::EPSILON * r.total);
        }
    }
}

#[test]
fn fleet() -> Result<(), Box<dyn std::error::Error>> {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/it/fleet.csv");
    let vehicles = scopes::csv::load_vehicles(path)?;
    assert_eq!(vehicles.len(), 5);

    let fleet = scopes::estimate_fleet(vehicles);
    assert_eq!(fleet.vehicles.len(), 4);
    assert_eq!(fleet.rejected.len(), 1);
    assert_eq!(fleet.rejected[0].employee, "e.moreau");
    assert!(matches!(
        fleet.rejected[0].error,
        Error::InvalidInput {
            field: "business_use_percent",
            ..
        }
    ));

    // 2598.75 + 1185 + 2660 + 1108.8
    assert!(abs_difference(fleet.total.total, 7552.55) < 1e-6);
    // 779.625 + 1185 + 1330 + 0
    assert!(abs_difference(fleet.total.scope2, 3294.625) < 1e-6);
    assert!(abs_difference(fleet.total.scope3, 4257.925) < 1e-6);
    assert!(
        abs_difference(fleet.total.scope2 + fleet.total.scope3, fleet.total.total)
            <= f64::EPSILON * fleet.total.total
    );
    Ok(())
}

#[test]
fn fleet_estimates_csv() -> Result<(), Box<dyn std::error::Error>> {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/it/fleet.csv");
    let fleet = scopes::estimate_fleet(scopes::csv::load_vehicles(path)?);

    let data = scopes::csv::serialize(
        fleet.vehicles.iter().map(scopes::csv::EstimateRecord::new),
    )?;
    let records = scopes::csv::deserialize::<scopes::csv::EstimateRecord>(&data)
        .collect::<Result<Vec<_>, _>>()?;

    assert_eq!(records.len(), 4);
    assert_eq!(records[1].employee, "b.jones");
    assert_eq!(records[1].fuel_type, FuelType::Ev);
    assert_eq!(records[1].fuel_used, 1500.0);
    Ok(())
}

/// A row with an unknown fuel type is rejected on its own; the rest of the fleet is estimated
#[test]
fn fleet_with_unknown_fuel_type() -> Result<(), Box<dyn std::error::Error>> {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/it/fleet_mixed.csv");
    let vehicles = scopes::csv::load_vehicles(path)?;
    assert_eq!(vehicles.len(), 3);

    let fleet = scopes::estimate_fleet(vehicles);
    assert_eq!(fleet.vehicles.len(), 2);
    assert_eq!(fleet.vehicles[0].employee, "a.smith");
    assert_eq!(fleet.vehicles[1].employee, "b.jones");
    assert_eq!(
        fleet.rejected,
        vec![scopes::Rejected {
            employee: "f.ito".to_string(),
            vehicle: "HY-42".to_string(),
            error: Error::InvalidFuelType("Hybrid".to_string()),
        }]
    );
    // 2598.75 + 1185
    assert!(abs_difference(fleet.total.total, 3783.75) < 1e-6);
    Ok(())
}

#[test]
fn displayed_halves_round_up() {
    let r = estimate(&EmissionsInput::new(15000.0, FuelType::Petrol, 7.5, 30.0));
    assert_eq!(scopes::format_kg_co2e(r.scope2), "779.63 kg CO₂e");
    assert_eq!(scopes::format_kg_co2e(r.scope3), "1819.13 kg CO₂e");
}

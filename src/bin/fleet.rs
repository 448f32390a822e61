use std::error::Error;

use clap::Parser;
use itertools::Itertools;
use num_format::{Locale, ToFormattedString};
use simple_logger::SimpleLogger;

use scopes::{
    estimate_fleet, format_efficiency, round_to_cents, Fleet, VehicleEmissions, EMISSION_FACTORS,
};

static TEMPLATE: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/src/bin/fleet_template.md"
));
static TEMPLATE_NAME: &'static str = "t";

const ABOUT: &'static str = r#"Estimates the annual emissions (kg CO2e) of every vehicle of a fleet.
The input is a CSV file with the columns
`employee,vehicle,distance_km,fuel_type,fuel_efficiency,business_use_percent`.
Writes the estimate of each vehicle to a CSV file and, optionally, a markdown report with
* the total emissions of the fleet, split in business (scope 2) and private (scope 3) use
* the emissions of each vehicle, from highest to lowest
* the vehicles that could not be estimated, and why
"#;

#[derive(Parser, Debug)]
#[command(author, version, about = ABOUT)]
struct Cli {
    /// The CSV file with the vehicles of the fleet
    #[arg(short, long)]
    input: String,
    /// The CSV file to write the estimates to
    #[arg(short, long, default_value = "estimates.csv")]
    output: String,
    /// Optional markdown report to write
    #[arg(short, long)]
    report: Option<String>,
    /// The date of the report in format `yyyy-mm-dd` (else it is today)
    #[arg(long, value_parser = parse_date)]
    date: Option<time::Date>,
    /// Fail on the first vehicle with an invalid input instead of skipping it
    #[arg(long, default_value_t = false)]
    strict: bool,
}

fn parse_date(arg: &str) -> Result<time::Date, time::error::Parse> {
    time::Date::parse(
        arg,
        time::macros::format_description!("[year]-[month]-[day]"),
    )
}

#[derive(serde::Serialize)]
struct Row {
    employee: String,
    vehicle: String,
    fuel_type: String,
    distance_km: String,
    efficiency: String,
    fuel_used: String,
    total: String,
    scope2: String,
    scope3: String,
}

#[derive(serde::Serialize)]
struct RejectedRow {
    employee: String,
    vehicle: String,
    reason: String,
}

#[derive(serde::Serialize)]
struct Factor {
    fuel_type: String,
    kg_co2e_per_unit: String,
    unit: &'static str,
}

#[derive(serde::Serialize)]
struct Context {
    date: String,
    number_of_vehicles: String,
    total: String,
    scope2: String,
    scope3: String,
    business_share: String,
    vehicles: Vec<Row>,
    rejected: Vec<RejectedRow>,
    factors: Vec<Factor>,
}

// 2^63: the magnitude above which a whole `f64` no longer fits an `i64`
const I64_LIMIT: f64 = 9_223_372_036_854_775_808.0;

/// `1234567.891` -> `1,234,567.89`, rounded like [`scopes::format_kg_co2e`].
/// Values beyond `i64` cents are written without separators.
fn format_number(value: f64) -> String {
    let cents = (round_to_cents(value) * 100.0).round();
    if !(cents.abs() < I64_LIMIT) {
        return format!("{:.2}", round_to_cents(value));
    }
    let cents = cents as i64;
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.abs();
    format!(
        "{sign}{}.{:02}",
        (cents / 100).to_formatted_string(&Locale::en),
        cents % 100
    )
}

/// `15000.4` -> `15,000`; values beyond `i64` are written without separators.
fn format_integer(value: f64) -> String {
    let value = value.round();
    if !(value.abs() < I64_LIMIT) {
        return format!("{value:.0}");
    }
    (value as i64).to_formatted_string(&Locale::en)
}

impl From<&VehicleEmissions> for Row {
    fn from(v: &VehicleEmissions) -> Self {
        Row {
            employee: v.employee.clone(),
            vehicle: v.vehicle.clone(),
            fuel_type: v.input.fuel_type.to_string(),
            distance_km: format_integer(v.input.distance_km),
            efficiency: format_efficiency(v.input.fuel_efficiency, v.input.fuel_type),
            fuel_used: format!(
                "{} {}",
                format_number(v.fuel_used),
                v.input.fuel_type.fuel_unit()
            ),
            total: format_number(v.emissions.total),
            scope2: format_number(v.emissions.scope2),
            scope3: format_number(v.emissions.scope3),
        }
    }
}

fn render(fleet: &Fleet, date: time::Date, path: &str) -> Result<(), Box<dyn Error>> {
    let business_share = if fleet.total.total > 0.0 {
        fleet.total.scope2 / fleet.total.total * 100.0
    } else {
        0.0
    };

    let context = Context {
        date: date.to_string(),
        number_of_vehicles: fleet.vehicles.len().to_formatted_string(&Locale::en),
        total: format_number(fleet.total.total),
        scope2: format_number(fleet.total.scope2),
        scope3: format_number(fleet.total.scope3),
        business_share: format!("{business_share:.0}"),
        vehicles: fleet
            .vehicles
            .iter()
            .sorted_by(|a, b| b.emissions.total.total_cmp(&a.emissions.total))
            .map(Row::from)
            .collect(),
        rejected: fleet
            .rejected
            .iter()
            .map(|r| RejectedRow {
                employee: r.employee.clone(),
                vehicle: r.vehicle.clone(),
                reason: r.error.to_string(),
            })
            .collect(),
        factors: EMISSION_FACTORS
            .iter()
            .map(|f| Factor {
                fuel_type: f.fuel_type.to_string(),
                kg_co2e_per_unit: f.kg_co2e_per_unit.to_string(),
                unit: f.fuel_type.fuel_unit(),
            })
            .collect(),
    };

    let mut tt = tinytemplate::TinyTemplate::new();
    tt.set_default_formatter(&tinytemplate::format_unescaped);
    tt.add_template(TEMPLATE_NAME, TEMPLATE)?;

    let rendered = tt.render(TEMPLATE_NAME, &context)?;

    log::info!("Report written to {path}");
    std::fs::write(path, rendered)?;
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    SimpleLogger::new()
        .with_level(log::LevelFilter::Info)
        .init()?;

    let cli = Cli::parse();

    let vehicles = scopes::csv::load_vehicles(&cli.input)?;
    log::info!("{} vehicles read from {}", vehicles.len(), cli.input);

    let fleet = estimate_fleet(vehicles);
    for r in &fleet.rejected {
        log::warn!("{} ({}) skipped: {}", r.employee, r.vehicle, r.error);
    }
    if cli.strict {
        if let Some(r) = fleet.rejected.first() {
            return Err(format!("{} ({}): {}", r.employee, r.vehicle, r.error).into());
        }
    }

    let data = scopes::csv::serialize(
        fleet.vehicles.iter().map(scopes::csv::EstimateRecord::new),
    )?;
    std::fs::write(&cli.output, data)?;
    log::info!("{} estimates written to {}", fleet.vehicles.len(), cli.output);

    log::info!(
        "Fleet total: {} (scope 2: {}, scope 3: {})",
        scopes::format_kg_co2e(fleet.total.total),
        scopes::format_kg_co2e(fleet.total.scope2),
        scopes::format_kg_co2e(fleet.total.scope3),
    );

    if let Some(path) = cli.report.as_deref() {
        let date = cli
            .date
            .unwrap_or_else(|| time::OffsetDateTime::now_utc().date());
        render(&fleet, date, path)?;
    }

    Ok(())
}

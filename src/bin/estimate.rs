use std::error::Error;

use clap::Parser;
use simple_logger::SimpleLogger;

use scopes::{
    estimate_checked, format_efficiency, format_kg_co2e, fuel_used, EmissionsInput, FuelType,
};

const ABOUT: &'static str = r#"Estimates the annual emissions (kg CO2e) of a leased vehicle and splits them into
* scope 2: the share attributed to business use
* scope 3: the remaining, private, share
"#;

#[derive(clap::ValueEnum, Debug, Clone, Copy)]
enum Format {
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(author, version, about = ABOUT)]
struct Cli {
    /// The distance driven per year in km
    #[arg(long)]
    distance_km: f64,
    /// One of `Petrol`, `Diesel` or `EV`
    #[arg(long, value_parser = parse_fuel_type)]
    fuel_type: FuelType,
    /// The consumption per 100 km, in L (Petrol, Diesel) or kWh (EV)
    #[arg(long)]
    fuel_efficiency: f64,
    /// The share of the distance driven for business, between 0 and 100
    #[arg(long, default_value_t = 0.0)]
    business_use_percent: f64,
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,
}

fn parse_fuel_type(arg: &str) -> Result<FuelType, scopes::Error> {
    arg.parse()
}

#[derive(serde::Serialize)]
struct Output {
    input: EmissionsInput,
    fuel_used: f64,
    emissions: scopes::EmissionsResult,
}

fn main() -> Result<(), Box<dyn Error>> {
    SimpleLogger::new()
        .with_level(log::LevelFilter::Info)
        .init()?;

    let cli = Cli::parse();

    let input = EmissionsInput::new(
        cli.distance_km,
        cli.fuel_type,
        cli.fuel_efficiency,
        cli.business_use_percent,
    );
    log::info!(
        "{} km with {} at {}, {}% business use",
        input.distance_km,
        input.fuel_type,
        format_efficiency(input.fuel_efficiency, input.fuel_type),
        input.business_use_percent
    );

    let emissions = estimate_checked(&input)?;
    let fuel_used = fuel_used(&input);

    match cli.format {
        Format::Text => {
            println!(
                "Fuel used:          {fuel_used:.2} {}",
                input.fuel_type.fuel_unit()
            );
            println!("{emissions}");
        }
        Format::Json => {
            let output = Output {
                input,
                fuel_used,
                emissions,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }
    log::info!("Total: {}", format_kg_co2e(emissions.total));

    Ok(())
}

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use log::info;

use smart_parking::lot::{
    after_minutes, LotSimulation, ParkingLot, RateTable, SimulationConfig, SpotSize, Vehicle,
    VehicleSize, RATE_BUS, RATE_CAR, RATE_MOTORCYCLE,
};

#[derive(Parser)]
#[command(name = "smart_parking")]
#[command(about = "Parking lot demo with an optional headless simulation")]
struct Cli {
    /// Run the randomized headless simulation instead of the scripted demo
    #[arg(long)]
    simulate: bool,

    /// Minutes the demo vehicles stay parked before checking out
    #[arg(long, default_value = "130")]
    stay_minutes: i64,

    /// Number of simulation ticks
    #[arg(long, default_value = "96")]
    ticks: u32,

    /// Simulated minutes per tick
    #[arg(long, default_value = "15")]
    tick_minutes: i64,

    /// Seed for a reproducible simulation
    #[arg(long)]
    seed: Option<u64>,

    /// Small spots in the simulated lot
    #[arg(long, default_value = "4")]
    small: usize,

    /// Medium spots in the simulated lot
    #[arg(long, default_value = "6")]
    medium: usize,

    /// Large spots in the simulated lot
    #[arg(long, default_value = "2")]
    large: usize,

    /// Probability of an arrival per tick
    #[arg(long, default_value = "0.6", value_parser = parse_probability)]
    arrival_chance: f64,

    /// Hourly rate for motorcycles
    #[arg(long, default_value_t = RATE_MOTORCYCLE)]
    motorcycle_rate: u64,

    /// Hourly rate for cars
    #[arg(long, default_value_t = RATE_CAR)]
    car_rate: u64,

    /// Hourly rate for buses
    #[arg(long, default_value_t = RATE_BUS)]
    bus_rate: u64,
}

/// Parse a probability in [0, 1]; NaN and out-of-range values are rejected
fn parse_probability(s: &str) -> Result<f64, String> {
    let value: f64 = s.parse().map_err(|e| format!("{}", e))?;
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(format!("{} is not within [0, 1]", s))
    }
}

impl Cli {
    fn rates(&self) -> RateTable {
        RateTable {
            motorcycle: self.motorcycle_rate,
            car: self.car_rate,
            bus: self.bus_rate,
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    if cli.simulate {
        run_simulation(&cli)
    } else {
        run_demo(&cli)
    }
}

/// The fixed demo: three spots, a car and a motorcycle park, then leave
fn run_demo(cli: &Cli) -> Result<()> {
    let mut lot = ParkingLot::with_rates(cli.rates());
    lot.register_observer(|event| info!("[Observer] Availability changed! {}", event));

    lot.add_spot("S1", SpotSize::Small)?;
    lot.add_spot("M1", SpotSize::Medium)?;
    lot.add_spot("L1", SpotSize::Large)?;

    lot.print_availability();

    let car = Vehicle::new("KA01AB1234", VehicleSize::Car);
    let bike = Vehicle::new("MH12CD9876", VehicleSize::Motorcycle);

    let entry_time = Utc::now();
    let mut tickets = Vec::new();
    for vehicle in [&car, &bike] {
        match lot.check_in_at(vehicle, entry_time) {
            Ok(ticket_id) => {
                let ticket = lot.ticket(ticket_id)?;
                println!(
                    "Vehicle {} parked at {} (Ticket {})",
                    vehicle.plate(),
                    ticket.spot_id,
                    ticket_id
                );
                tickets.push(ticket_id);
            }
            Err(e) => println!("{}", e),
        }
    }
    lot.print_availability();

    // Simulated stay instead of a real sleep
    let exit_time = after_minutes(entry_time, cli.stay_minutes)
        .context("Invalid --stay-minutes")?;
    for ticket_id in tickets {
        let fee = lot
            .check_out_at(ticket_id, exit_time)
            .with_context(|| format!("Failed to check out {}", ticket_id))?;
        let ticket = lot.ticket(ticket_id)?;
        println!("Vehicle {} exited. Fee: ${}", ticket.plate, fee);
    }
    lot.print_availability();

    Ok(())
}

/// Run the randomized simulation in headless mode
fn run_simulation(cli: &Cli) -> Result<()> {
    let config = SimulationConfig {
        small_spots: cli.small,
        medium_spots: cli.medium,
        large_spots: cli.large,
        arrival_chance: cli.arrival_chance,
        rates: cli.rates(),
        ..SimulationConfig::default()
    };

    println!("Running parking simulation in headless mode...");
    println!("Ticks: {}, Minutes per tick: {}", cli.ticks, cli.tick_minutes);
    println!();

    let mut sim = match cli.seed {
        Some(seed) => LotSimulation::new_with_seed(config, seed),
        None => LotSimulation::new(config),
    }
    .context("Failed to build simulated lot")?;

    println!("Initial state:");
    sim.print_summary();
    println!();

    // Report once per simulated hour
    let ticks_per_report = (60 / cli.tick_minutes.max(1)).max(1) as u32;
    for tick in 1..=cli.ticks {
        sim.tick(cli.tick_minutes)
            .with_context(|| format!("Simulation failed at tick {}", tick))?;
        if tick % ticks_per_report == 0 && tick < cli.ticks {
            println!("--- After tick {} ({} min simulated) ---", tick, sim.stats.elapsed_minutes);
            sim.print_summary();
            println!();
        }
    }

    println!("=== Final State ===");
    sim.print_summary();
    sim.stats.log_summary();

    Ok(())
}

// Copyright 2024, F. Stan
//
// Licensed under the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>,
// This file may not be copied, modified, or distributed
// except according to those terms.

use {
    anyhow::{bail, Context, Result},
    clap::Parser,
    log::{info, warn},
    sht31_i2c::Sht31Sensor,
    std::{thread, time::Duration},
};

/// Reads temperature and humidity from an SHT31 sensor
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// I2C bus number, the device used is /dev/i2c-<BUS>
    #[arg(short, long, env = "SHT31_BUS", default_value_t = 1)]
    bus: u32,

    /// Number of measurements to take, 0 keeps measuring forever
    #[arg(short, long, env = "SHT31_COUNT", default_value_t = 1)]
    count: u64,

    /// Seconds between measurements, at least 1
    #[arg(short, long, env = "SHT31_PERIOD_SECS", default_value_t = 1)]
    period_secs: u64,

    /// Also print the temperature in Fahrenheit
    #[arg(short, long)]
    fahrenheit: bool,
}

fn main() -> Result<()> {
    pretty_env_logger::init();
    let args = Args::parse();

    if args.period_secs < 1 {
        bail!("period must be at least one second, faster polling hangs the bus");
    }
    let period = Duration::from_secs(args.period_secs);

    let mut sensor = Sht31Sensor::new(args.bus)
        .with_context(|| format!("Failed to initialize SHT31 on bus {}", args.bus))?;

    let mut taken = 0;
    let mut failed = 0;
    while args.count == 0 || taken < args.count {
        if taken > 0 {
            thread::sleep(period);
        }
        taken += 1;

        match sensor.measure() {
            Ok(m) if args.fahrenheit => {
                println!("{}, fahrenheit: [{:.3}]", m, m.fahrenheit())
            }
            Ok(m) => println!("{}", m),
            Err(reason) => {
                failed += 1;
                warn!("Measurement {} failed: {}", taken, reason);
            }
        }
    }

    info!("{} measurements, {} failed", taken, failed);
    sensor.close()?;

    if failed == taken {
        bail!("no measurement succeeded");
    }
    Ok(())
}

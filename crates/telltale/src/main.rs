use clap::{Parser, Subcommand};
use telltale::geometry::{angle_collision, angular_distance, deg_to_rad, normalize_angle, rad_to_deg};
use telltale::wind::{BoatVector, Compass, PointOfSail, WindVector, calculate_apparent_wind};

#[derive(Parser, Debug)]
#[command(name = "telltale", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Compute the apparent wind felt aboard a moving boat.
    Apparent {
        /// Direction the true wind blows toward, degrees clockwise from east
        #[arg(long, allow_hyphen_values = true)]
        wind_angle: f64,
        /// True wind speed in knots
        #[arg(long)]
        wind_speed: f64,
        /// Boat heading, degrees clockwise from east
        #[arg(long, allow_hyphen_values = true)]
        heading: f64,
        /// Boat speed in knots
        #[arg(long)]
        boat_speed: f64,
    },
    /// Check whether two angles sit closer together than a separation.
    Collide {
        #[arg(allow_hyphen_values = true)]
        a: f64,
        #[arg(allow_hyphen_values = true)]
        b: f64,
        /// Minimum separation in degrees
        #[arg(short = 's', long, default_value_t = 10.0)]
        separation: f64,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Apparent {
            wind_angle,
            wind_speed,
            heading,
            boat_speed,
        } => apparent(wind_angle, wind_speed, heading, boat_speed),
        Commands::Collide { a, b, separation } => collide(a, b, separation),
    }
}

fn apparent(wind_angle: f64, wind_speed: f64, heading: f64, boat_speed: f64) -> anyhow::Result<()> {
    println!("{}", apparent_report(wind_angle, wind_speed, heading, boat_speed)?);
    Ok(())
}

fn apparent_report(
    wind_angle: f64,
    wind_speed: f64,
    heading: f64,
    boat_speed: f64,
) -> anyhow::Result<String> {
    if wind_speed < 0.0 || boat_speed < 0.0 {
        anyhow::bail!("Speeds must not be negative (wind {wind_speed}, boat {boat_speed})");
    }

    let heading = normalize_angle(deg_to_rad(heading));
    let true_wind = WindVector::new(normalize_angle(deg_to_rad(wind_angle)), wind_speed);
    let boat = BoatVector::new(heading, boat_speed);
    let apparent = calculate_apparent_wind(true_wind, boat);
    log::debug!("true {:?} boat {:?} -> apparent {:?}", true_wind, boat, apparent);

    Ok(format!(
        "apparent wind: {:.1} deg ({}) at {:.2} kn, {}",
        rad_to_deg(apparent.angle),
        Compass::from_angle(apparent.angle),
        apparent.speed,
        PointOfSail::classify(apparent, heading)
    ))
}

fn collide(a: f64, b: f64, separation: f64) -> anyhow::Result<()> {
    println!("{}", collide_report(a, b, separation)?);
    Ok(())
}

fn collide_report(a: f64, b: f64, separation: f64) -> anyhow::Result<String> {
    if separation < 0.0 {
        anyhow::bail!("Separation must not be negative, got {separation}");
    }

    let (a, b) = (deg_to_rad(a), deg_to_rad(b));
    let gap = rad_to_deg(angular_distance(a, b));
    let verdict = if angle_collision(a, b, deg_to_rad(separation)) {
        "collide"
    } else {
        "clear"
    };
    Ok(format!("{verdict}: {gap:.1} deg apart (minimum {separation:.1})"))
}

use orbsim::{bench_curve, ScenarioConfig, Simulation, TimeUnit};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(version, about = "Fixed-step gravitational N-body simulator")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play a scenario headless at a fixed frame rate
    Run {
        /// Scenario file; bare names are looked up in the crate's `scenarios/` directory
        #[arg(short, long, default_value = "sun_earth_moon.yaml")]
        file: PathBuf,
        /// Display frames per real second
        #[arg(long, default_value_t = 60.0)]
        fps: f64,
        /// Real seconds to play
        #[arg(long, default_value_t = 10.0)]
        seconds: f64,
        /// Print a report every N frames
        #[arg(long, default_value_t = 60)]
        report_every: u64,
        /// Print the final snapshot as YAML
        #[arg(long)]
        dump: bool,
    },
    /// Time both integrators for a range of body counts
    Bench {
        #[arg(long, value_delimiter = ',', default_value = "2,4,8,16,32,64")]
        bodies: Vec<usize>,
        #[arg(long, default_value_t = 1000)]
        steps: usize,
    },
}

// load here to keep main clean
fn load_scenario(file: &Path) -> Result<ScenarioConfig> {
    let path = if file.exists() {
        file.to_path_buf()
    } else {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file)
    };
    ScenarioConfig::load(&path).with_context(|| format!("failed to load scenario {}", path.display()))
}

fn run(file: &Path, fps: f64, seconds: f64, report_every: u64, dump: bool) -> Result<()> {
    let cfg = load_scenario(file)?;
    let mut sim = Simulation::new(&cfg).context("invalid scenario")?;

    let frame_dt = 1.0 / fps;
    let frames = (seconds * fps).round() as u64;
    let day = TimeUnit::Days.seconds();

    for frame in 1..=frames {
        let result = sim.advance(frame_dt)?;

        if report_every > 0 && frame % report_every == 0 {
            println!(
                "frame {frame:6}  elapsed {:10.3} days  steps {:6}",
                result.real_time / day,
                result.steps
            );
            for tracker in sim.trackers() {
                match tracker.log().rolling_period(sim.parameters().period_window) {
                    Some(period) => println!("  {:>12} period {:10.3} days", tracker.name, period / day),
                    None => println!("  {:>12} period        n/a", tracker.name),
                }
            }
        }
    }

    for body in sim.bodies() {
        println!(
            "{:>12}  x = [{:+.4e}, {:+.4e}, {:+.4e}] m  |v| = {:.4e} m/s",
            body.name,
            body.x.x,
            body.x.y,
            body.x.z,
            body.speed()
        );
    }

    if dump {
        println!("{}", serde_yaml::to_string(&sim.snapshot())?);
    }

    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive("orbsim=info".parse()?))
        .init();

    let args = Args::parse();
    match args.command {
        Command::Run {
            file,
            fps,
            seconds,
            report_every,
            dump,
        } => run(&file, fps, seconds, report_every, dump),
        Command::Bench { bodies, steps } => {
            bench_curve(&bodies, steps);
            Ok(())
        }
    }
}

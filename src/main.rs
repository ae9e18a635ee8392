use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use spacetime_orbits::scenario::ScenarioConfig;
use spacetime_orbits::{dispatch, Frame, Preset, Simulation};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FrameArg {
    Astronaut,
    Observer,
}

impl From<FrameArg> for Frame {
    fn from(arg: FrameArg) -> Self {
        match arg {
            FrameArg::Astronaut => Frame::Astronaut,
            FrameArg::Observer => Frame::DistantObserver,
        }
    }
}

fn parse_preset(name: &str) -> Result<Preset, String> {
    Preset::from_name(name).ok_or_else(|| {
        let options: Vec<_> = Preset::ALL.iter().map(|p| p.name()).collect();
        format!("unknown preset '{name}'. Options: {}", options.join(", "))
    })
}

/// Integrate test-particle and photon trajectories around a Schwarzschild
/// mass and print them as CSV.
#[derive(Parser)]
#[command(name = "spacetime-orbits")]
struct Cli {
    /// Built-in scenario (ignored when --scenario is given)
    #[arg(long, value_parser = parse_preset, default_value = "circular")]
    preset: Preset,

    /// YAML scenario file
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// Clock that drives the integration; overrides the scenario's frame
    #[arg(long, value_enum)]
    frame: Option<FrameArg>,

    /// Number of ticks to run
    #[arg(long, default_value_t = 10_000)]
    ticks: u64,

    /// Print every n-th tick
    #[arg(long, default_value_t = 100)]
    every: u64,

    /// Step mobiles in parallel
    #[arg(long)]
    parallel: bool,
}

fn write_rows(out: &mut impl Write, sim: &Simulation) -> io::Result<()> {
    for (index, mobile) in sim.mobiles.iter().enumerate() {
        let position = mobile.position();
        let potential = dispatch::potential(mobile, &sim.body, sim.frame).unwrap_or(f64::NAN);
        writeln!(
            out,
            "{},{},{},{},{},{},{},{},{},{},{},{},{}",
            sim.ticks,
            index,
            mobile.r,
            mobile.phi,
            position.x,
            position.y,
            mobile.v_r,
            mobile.v_phi,
            mobile.v_norm,
            mobile.clock_astronaut,
            mobile.clock_distant_observer,
            mobile.dtau,
            potential
        )?;
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut sim = match &cli.scenario {
        Some(path) => ScenarioConfig::load(path)
            .and_then(|config| config.build())
            .with_context(|| format!("failed to load scenario {}", path.display()))?,
        None => Simulation::new(cli.preset),
    };
    if let Some(frame) = cli.frame {
        sim.frame = frame.into();
    }
    sim.parallel = cli.parallel;

    let every = cli.every.max(1);
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    writeln!(
        out,
        "tick,index,r,phi,x,y,v_r,v_phi,v_norm,clock_astronaut,clock_distant_observer,dtau,potential"
    )?;
    write_rows(&mut out, &sim)?;

    for _ in 0..cli.ticks {
        sim.step();
        if sim.ticks % every == 0 {
            write_rows(&mut out, &sim)?;
        }
    }
    out.flush()?;

    let halted = sim.halted_count();
    if halted > 0 {
        log::warn!("{halted} of {} mobile(s) halted before the end", sim.mobiles.len());
    }
    log::info!("finished {} ticks in the {} frame", sim.ticks, sim.frame);
    Ok(())
}

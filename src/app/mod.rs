// app/mod.rs
// Command-line surface: parses and validates a run configuration, drives the
// simulation, and reports pass/fail and throughput.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::{InitMode, PopulationChange, SimConfig};
use crate::grid::Patch;
use crate::simulation::Simulation;

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Particle-in-cell proxy benchmark on a periodic charge grid",
    long_about = None
)]
struct Args {
    /// Total number of simulation steps
    #[arg(short = 's', long, required_unless_present = "scenario")]
    steps: Option<i64>,
    /// Dimension of the grid in cells (must be even)
    #[arg(short = 'g', long, required_unless_present = "scenario")]
    grid_cells: Option<i64>,
    /// Number of particles requested at initialization
    #[arg(short = 'n', long, required_unless_present = "scenario")]
    particles: Option<i64>,
    /// Particle charge semi-increment: particles drift 2k+1 cells per step
    #[arg(short = 'k', long, default_value_t = 0)]
    charge_semi_increment: i64,
    /// Vertical velocity in cells per step
    #[arg(short = 'm', long, default_value_t = 0, allow_negative_numbers = true)]
    vertical_velocity: i64,
    /// Inject particles mid-run: <ppc> <step> <xleft> <xright> <ybottom> <ytop>
    #[arg(
        long,
        num_args = 6,
        value_names = ["PPC", "STEP", "XLEFT", "XRIGHT", "YBOTTOM", "YTOP"],
        conflicts_with = "removal"
    )]
    injection: Option<Vec<i64>>,
    /// Remove particles mid-run: <step> <xleft> <xright> <ybottom> <ytop>
    #[arg(
        long,
        num_args = 5,
        value_names = ["STEP", "XLEFT", "XRIGHT", "YBOTTOM", "YTOP"]
    )]
    removal: Option<Vec<i64>>,
    /// Load the whole run configuration from a TOML scenario file instead
    #[arg(long, value_name = "FILE")]
    scenario: Option<PathBuf>,
    #[command(subcommand)]
    init: Option<InitCommand>,
}

/// Particle initialization mode.
#[derive(Subcommand, Debug)]
enum InitCommand {
    /// Geometric column distribution: floor(A * rho^x) particles in column x
    Geometric {
        /// Attenuation factor rho
        #[arg(short, long, value_name = "RHO")]
        attenuation: f64,
    },
    /// Sinusoidal column distribution over a single period
    Sinusoidal,
    /// Linearly decreasing column distribution beta - alpha * x / (g - 2)
    Linear {
        /// Negative slope
        #[arg(short, long, allow_negative_numbers = true)]
        alpha: f64,
        /// Constant offset
        #[arg(short, long, allow_negative_numbers = true)]
        beta: f64,
    },
    /// Uniform placement inside a bounding patch
    Patch {
        #[arg(long)]
        xleft: i64,
        #[arg(long)]
        xright: i64,
        #[arg(long)]
        ybottom: i64,
        #[arg(long)]
        ytop: i64,
    },
}

fn build_config(args: Args) -> Result<SimConfig, String> {
    if let Some(path) = &args.scenario {
        return SimConfig::load_from_file(path)
            .map_err(|err| format!("cannot load scenario {}: {}", path.display(), err));
    }

    let init = match args.init.ok_or("an initialization mode is required")? {
        InitCommand::Geometric { attenuation } => InitMode::Geometric { attenuation },
        InitCommand::Sinusoidal => InitMode::Sinusoidal,
        InitCommand::Linear { alpha, beta } => InitMode::Linear { alpha, beta },
        InitCommand::Patch { xleft, xright, ybottom, ytop } => InitMode::Patch {
            patch: Patch::new(xleft, xright, ybottom, ytop),
        },
    };

    let population_change = match (args.injection, args.removal) {
        (Some(inj), None) => Some(PopulationChange::Injection {
            particles_per_cell: inj[0],
            step: inj[1],
            patch: Patch::new(inj[2], inj[3], inj[4], inj[5]),
        }),
        (None, Some(rem)) => Some(PopulationChange::Removal {
            step: rem[0],
            patch: Patch::new(rem[1], rem[2], rem[3], rem[4]),
        }),
        (None, None) => None,
        (Some(_), Some(_)) => {
            return Err("choose either injection or removal, not both".into());
        }
    };

    Ok(SimConfig {
        steps: args.steps.ok_or("number of steps is required")?,
        cells: args.grid_cells.ok_or("grid dimension is required")?,
        particles: args.particles.ok_or("number of particles is required")?,
        k: args.charge_semi_increment,
        m: args.vertical_velocity,
        init,
        population_change,
    })
}

fn print_config(config: &SimConfig) {
    println!("Particle-in-cell proxy benchmark v{}", env!("CARGO_PKG_VERSION"));
    println!("Grid size                      = {}", config.cells);
    println!("Initial number of particles    = {}", config.particles);
    println!("Number of time steps           = {}", config.steps);
    match config.init {
        InitMode::Geometric { attenuation } => {
            println!("Initialization mode            = GEOMETRIC");
            println!("  Attenuation factor           = {:.6}", attenuation);
        }
        InitMode::Sinusoidal => {
            println!("Initialization mode            = SINUSOIDAL");
        }
        InitMode::Linear { alpha, beta } => {
            println!("Initialization mode            = LINEAR");
            println!("  Negative slope               = {:.6}", alpha);
            println!("  Offset                       = {:.6}", beta);
        }
        InitMode::Patch { patch } => {
            println!("Initialization mode            = PATCH");
            println!(
                "  Bounding box                 = {}, {}, {}, {}",
                patch.xleft, patch.xright, patch.ybottom, patch.ytop
            );
        }
    }
    println!("Particle charge semi-increment = {}", config.k);
    println!("Vertical velocity              = {}", config.m);
    match config.population_change {
        Some(PopulationChange::Injection { particles_per_cell, step, patch }) => {
            println!("Population change mode         = INJECTION");
            println!(
                "  Bounding box                 = {}, {}, {}, {}",
                patch.xleft, patch.xright, patch.ybottom, patch.ytop
            );
            println!("  Injection time step          = {}", step);
            println!("  Particles per cell           = {}", particles_per_cell);
            println!(
                "  Total particles added        = {}",
                patch.cells() * particles_per_cell
            );
        }
        Some(PopulationChange::Removal { step, patch }) => {
            println!("Population change mode         = REMOVAL");
            println!(
                "  Bounding box                 = {}, {}, {}, {}",
                patch.xleft, patch.xright, patch.ybottom, patch.ytop
            );
            println!("  Removal time step            = {}", step);
        }
        None => {}
    }
}

/// Parse, validate, simulate, report. Returns the process exit code: 0 for a
/// validated run, 1 for a malformed configuration, 2 when the simulation
/// completes but verification fails.
pub fn run() -> i32 {
    let args = Args::parse();

    let config = match build_config(args) {
        Ok(config) => config,
        Err(message) => {
            eprintln!("ERROR: {}", message);
            return 1;
        }
    };
    if let Err(message) = config.validate() {
        eprintln!("ERROR: {}", message);
        return 1;
    }

    print_config(&config);

    let mut simulation = Simulation::new(config);
    println!("Number of particles placed     = {}", simulation.store.len());

    let outcome = simulation.run();

    #[cfg(feature = "profiling")]
    crate::PROFILER.lock().print_and_clear();

    if outcome.validated {
        println!("Solution validates");
        println!("Final number of particles      = {}", outcome.particles);
        println!(
            "Simulation time is {:.6} seconds",
            outcome.elapsed.as_secs_f64()
        );
        println!("Rate (Mparticles_moved/s): {:.6}", 1.0e-6 * outcome.rate());
        0
    } else {
        println!("Solution does not validate");
        2
    }
}

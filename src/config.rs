// config.rs
// Physical constants and the validated run configuration handed to the core.
// Configurations come from the command line (see app) or a TOML scenario file.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::grid::Patch;

/// Charge magnitude at every grid point.
pub const Q: f64 = 1.0;
/// Fixed integration time step.
pub const DT: f64 = 1.0;
/// Inverse particle mass.
pub const MASS_INV: f64 = 1.0;
/// Fractional in-cell offset for deterministically placed particles.
pub const REL_X: f64 = 0.5;
pub const REL_Y: f64 = 0.5;
/// Tolerance when comparing simulated against reconstructed positions.
pub const EPSILON: f64 = 1.0e-8;

/// Spatial density profile for the initial particle population.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum InitMode {
    /// Column `x` holds `floor(A * attenuation^x)` particles.
    Geometric { attenuation: f64 },
    /// Column weight `1 + cos(2*pi*x/(g-2))`, a single period across the grid.
    Sinusoidal,
    /// Column weight `beta - alpha * x/(g-2)`, linearly decreasing.
    Linear { alpha: f64, beta: f64 },
    /// Uniform placement inside a bounding patch.
    Patch { patch: Patch },
}

/// One scheduled change to the particle population.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PopulationChange {
    Injection {
        particles_per_cell: i64,
        step: i64,
        patch: Patch,
    },
    Removal {
        step: i64,
        patch: Patch,
    },
}

/// A fully-typed run configuration. The core assumes a validated instance;
/// `validate` is called by the binary before the simulation is built.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    /// Total number of simulation steps `T`.
    pub steps: i64,
    /// Grid dimension in cells `L` (even). The point grid has side `L + 1`.
    pub cells: i64,
    /// Requested size of the initial population.
    pub particles: i64,
    /// Charge semi-increment: seeded particles drift `2k+1` cells per step.
    pub k: i64,
    /// Vertical velocity in cells per step.
    pub m: i64,
    pub init: InitMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub population_change: Option<PopulationChange>,
}

impl SimConfig {
    /// Side of the point grid, `g = L + 1`.
    pub fn grid_points(&self) -> i64 {
        self.cells + 1
    }

    /// The whole point domain, used to bound init/injection/removal patches.
    pub fn grid_patch(&self) -> Patch {
        Patch::new(0, self.grid_points(), 0, self.grid_points())
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let content = fs::read_to_string(path)?;
        let config: SimConfig = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.steps < 1 {
            return Err(format!("number of time steps must be positive: {}", self.steps));
        }
        if self.cells < 1 || self.cells % 2 != 0 {
            return Err(format!(
                "number of grid cells must be positive and even: {}",
                self.cells
            ));
        }
        if self.particles < 1 {
            return Err(format!("number of particles must be positive: {}", self.particles));
        }
        if self.k < 0 {
            return Err(format!("particle charge semi-increment must be non-negative: {}", self.k));
        }

        let grid_patch = self.grid_patch();
        match self.init {
            InitMode::Geometric { attenuation } => {
                if attenuation == 1.0 {
                    return Err("geometric attenuation factor must not be exactly 1".into());
                }
            }
            InitMode::Linear { alpha, beta } => {
                // Column weights must stay positive across the whole grid.
                if beta <= 0.0 || beta <= alpha {
                    return Err(format!(
                        "linear profile gives non-positive density: alpha={}, beta={}",
                        alpha, beta
                    ));
                }
            }
            InitMode::Patch { patch } => {
                if patch.is_degenerate() || !patch.contained_in(&grid_patch) {
                    return Err(format!("inconsistent initial patch: {:?}", patch));
                }
            }
            InitMode::Sinusoidal => {}
        }

        match self.population_change {
            Some(PopulationChange::Injection { particles_per_cell, step, patch }) => {
                if particles_per_cell < 0 {
                    return Err(format!(
                        "injected particles per cell must be non-negative: {}",
                        particles_per_cell
                    ));
                }
                if step < 0 {
                    return Err(format!("injection time step must be non-negative: {}", step));
                }
                if patch.is_degenerate() || !patch.contained_in(&grid_patch) {
                    return Err(format!("inconsistent injection patch: {:?}", patch));
                }
            }
            Some(PopulationChange::Removal { step, patch }) => {
                if step < 0 {
                    return Err(format!("removal time step must be non-negative: {}", step));
                }
                if patch.is_degenerate() || !patch.contained_in(&grid_patch) {
                    return Err(format!("inconsistent removal patch: {:?}", patch));
                }
            }
            None => {}
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> SimConfig {
        SimConfig {
            steps: 10,
            cells: 10,
            particles: 100,
            k: 1,
            m: 1,
            init: InitMode::Geometric { attenuation: 0.5 },
            population_change: None,
        }
    }

    #[test]
    fn accepts_a_well_formed_configuration() {
        assert!(base_config().validate().is_ok());
    }

    #[test]
    fn rejects_odd_grid_dimension() {
        let mut config = base_config();
        config.cells = 11;
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_non_positive_counts() {
        let mut config = base_config();
        config.particles = 0;
        assert!(config.validate().is_err());

        let mut config = base_config();
        config.steps = 0;
        assert!(config.validate().is_err());

        let mut config = base_config();
        config.k = -1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_unit_attenuation() {
        let mut config = base_config();
        config.init = InitMode::Geometric { attenuation: 1.0 };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_linear_profile_with_non_positive_density() {
        let mut config = base_config();
        config.init = InitMode::Linear { alpha: 2.0, beta: 1.0 };
        assert!(config.validate().is_err());

        config.init = InitMode::Linear { alpha: 1.0, beta: 2.0 };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_patches_outside_the_grid() {
        let mut config = base_config();
        config.init = InitMode::Patch { patch: Patch::new(2, 20, 2, 4) };
        assert!(config.validate().is_err());

        let mut config = base_config();
        config.population_change = Some(PopulationChange::Removal {
            step: 5,
            patch: Patch::new(4, 2, 2, 4),
        });
        assert!(config.validate().is_err());
    }

    #[test]
    fn scenario_round_trips_through_toml() {
        let mut config = base_config();
        config.population_change = Some(PopulationChange::Injection {
            particles_per_cell: 2,
            step: 3,
            patch: Patch::new(1, 3, 1, 3),
        });
        let text = toml::to_string(&config).expect("serializes");
        let parsed: SimConfig = toml::from_str(&text).expect("parses back");
        assert_eq!(parsed, config);
    }
}

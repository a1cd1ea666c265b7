// simulation/mod.rs
// The time-step loop: population changes first, then force + move for every
// live particle. Timing excludes the warmup step; verification folds the
// removal-time results into the final pass.

pub mod forces;
pub mod integrate;


use std::time::{Duration, Instant};

use rayon::prelude::*;

use crate::config::{InitMode, PopulationChange, SimConfig, MASS_INV};
use crate::grid::ChargeGrid;
use crate::init;
use crate::population::ParticleStore;
use crate::profile_scope;
use crate::rng::RandomDraw;
use crate::verify::verify_particle;

/// Result of a completed run.
pub struct RunOutcome {
    /// True when every removal-time and finalization-time verification
    /// succeeded.
    pub validated: bool,
    /// Surviving population size.
    pub particles: usize,
    /// Total particle moves performed across the measured steps.
    pub particle_steps: i64,
    /// Wall-clock time of steps `1..=T` (the warmup step is excluded).
    pub elapsed: Duration,
}

impl RunOutcome {
    /// Particles moved per second over the measured interval.
    pub fn rate(&self) -> f64 {
        self.particle_steps as f64 / self.elapsed.as_secs_f64()
    }
}

/// Owns the grid, the population and the step loop.
pub struct Simulation {
    pub config: SimConfig,
    pub grid: ChargeGrid,
    pub store: ParticleStore,
    /// Step currently being executed.
    pub step: i64,
    particle_steps: i64,
    removal_verified: bool,
}

impl Simulation {
    /// Build the charge grid and seed the initial population under the
    /// configured density profile. The draw sequence is seeded here, once
    /// per run.
    pub fn new(config: SimConfig) -> Self {
        let grid = ChargeGrid::new(config.grid_points());
        let mut draw = RandomDraw::new();

        let g = config.grid_points();
        let n = config.particles;
        let mut particles = match config.init {
            InitMode::Geometric { attenuation } => init::geometric(n, g, attenuation, &mut draw),
            InitMode::Sinusoidal => init::sinusoidal(n, g, &mut draw),
            InitMode::Linear { alpha, beta } => init::linear(n, g, alpha, beta, &mut draw),
            InitMode::Patch { patch } => init::patch(n, patch),
        };
        init::finish_distribution(0, config.k, config.m, &mut particles);

        let particle_steps = particles.len() as i64 * config.steps;
        Self {
            config,
            grid,
            store: ParticleStore::new(particles),
            step: 0,
            particle_steps,
            removal_verified: true,
        }
    }

    /// Run steps `0..=T`, then verify every survivor at `T + 1`.
    pub fn run(&mut self) -> RunOutcome {
        let mut timer = Instant::now();
        for t in 0..=self.config.steps {
            // Step 0 warms up; the measured interval starts with step 1.
            if t == 1 {
                timer = Instant::now();
            }
            self.advance_step(t);
        }
        let elapsed = timer.elapsed();

        let validated = self.removal_verified && self.verify_all(self.config.steps + 1);
        RunOutcome {
            validated,
            particles: self.store.len(),
            particle_steps: self.particle_steps,
            elapsed,
        }
    }

    /// One step: scheduled population change first, then force + move for
    /// every live particle.
    fn advance_step(&mut self, t: i64) {
        self.step = t;
        match self.config.population_change {
            Some(PopulationChange::Injection { particles_per_cell, step, patch }) if step == t => {
                profile_scope!("inject");
                let added = self.store.inject(t, patch, particles_per_cell) as i64;
                self.particle_steps += added * (self.config.steps + 1 - t);
            }
            Some(PopulationChange::Removal { step, patch }) if step == t => {
                profile_scope!("remove");
                let removal = self.store.remove(t, patch, &self.grid);
                self.removal_verified &= removal.all_verified;
                self.particle_steps -= removal.removed as i64 * (self.config.steps + 1 - t);
            }
            _ => {}
        }
        self.move_particles();
    }

    /// Force and kinematic update for the whole population. Particles are
    /// independent within a step, so the parallel pass produces the same
    /// floating-point results as a sequential sweep.
    fn move_particles(&mut self) {
        profile_scope!("force_move");
        let grid = &self.grid;
        let l = self.config.cells as f64;
        self.store.particles_mut().par_iter_mut().for_each(|particle| {
            let force = forces::total_force(particle, grid);
            let acc = force * MASS_INV;
            integrate::advance(particle, acc, l);
        });
    }

    fn verify_all(&self, step: i64) -> bool {
        profile_scope!("verify");
        self.store
            .particles()
            .iter()
            .all(|particle| verify_particle(particle, step, &self.grid))
    }
}

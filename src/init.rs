// init.rs
// Initial particle placement under the four density profiles, and the charge
// design that pins each particle to an exactly predictable drift.

use std::f64::consts::PI;

use ultraviolet::DVec2;

use crate::config::{DT, Q, REL_X, REL_Y};
use crate::grid::Patch;
use crate::particle::Particle;
use crate::rng::RandomDraw;

/// Geometric profile: column `x` receives `floor(A * rho^x)` particles with
/// `A = n * (1 - rho) / (1 - rho^(g-1))`; the shortfall lands in column 0.
pub fn geometric(n: i64, points: i64, rho: f64, draw: &mut RandomDraw) -> Vec<Particle> {
    let g = points;
    let mut particles = Vec::with_capacity(n as usize);

    let a = n as f64 * (1.0 - rho) / (1.0 - rho.powf((g - 1) as f64));
    for x in 0..g - 1 {
        let column = (a * rho.powf(x as f64)).floor() as i64;
        for _ in 0..column {
            let y = draw.random_draw(g - 1) + REL_Y;
            particles.push(Particle::placed(DVec2::new(x as f64 + REL_X, y)));
        }
    }

    while (particles.len() as i64) < n {
        let y = draw.random_draw(g - 1) + REL_Y;
        particles.push(Particle::placed(DVec2::new(REL_X, y)));
    }

    particles
}

/// Sinusoidal profile: a single cosine period of column weights across the
/// grid; the remainder is spread uniformly over the whole domain.
pub fn sinusoidal(n: i64, points: i64, draw: &mut RandomDraw) -> Vec<Particle> {
    let g = points;
    let step = 2.0 * PI / (g - 2) as f64;
    let mut particles = Vec::with_capacity(n as usize);

    let total_weight: f64 = (0..=g - 2).map(|i| 1.0 + (step * i as f64).cos()).sum();
    for x in 0..=g - 2 {
        let weight = 1.0 + (step * x as f64).cos();
        let column = (n as f64 * weight / total_weight).floor() as i64;
        for _ in 0..column {
            let y = draw.random_draw(g - 1) + REL_Y;
            particles.push(Particle::placed(DVec2::new(x as f64 + REL_X, y)));
        }
    }

    while (particles.len() as i64) < n {
        let x = draw.random_draw(g - 1) + REL_X;
        let y = draw.random_draw(g - 1) + REL_Y;
        particles.push(Particle::placed(DVec2::new(x, y)));
    }

    particles
}

/// Linear profile: column weight `beta - alpha * x/(g-2)`; same
/// normalization and remainder policy as the sinusoidal profile. Weights are
/// assumed positive; configuration validation enforces that.
pub fn linear(n: i64, points: i64, alpha: f64, beta: f64, draw: &mut RandomDraw) -> Vec<Particle> {
    let g = points;
    let step = 1.0 / (g - 2) as f64;
    let mut particles = Vec::with_capacity(n as usize);

    let total_weight: f64 = (0..=g - 2).map(|i| beta - alpha * step * i as f64).sum();
    for x in 0..=g - 2 {
        let weight = beta - alpha * step * x as f64;
        let column = (n as f64 * weight / total_weight).floor() as i64;
        for _ in 0..column {
            let y = draw.random_draw(g - 1) + REL_Y;
            particles.push(Particle::placed(DVec2::new(x as f64 + REL_X, y)));
        }
    }

    while (particles.len() as i64) < n {
        let x = draw.random_draw(g - 1) + REL_X;
        let y = draw.random_draw(g - 1) + REL_Y;
        particles.push(Particle::placed(DVec2::new(x, y)));
    }

    particles
}

/// Patch profile: `floor(n / cells)` particles in every cell of the patch,
/// then one extra per cell until exactly `n` are placed.
pub fn patch(n: i64, region: Patch) -> Vec<Particle> {
    let mut particles = Vec::with_capacity(n as usize);
    let per_cell = n / region.cells();

    for x in region.xleft..region.xright {
        for y in region.ybottom..region.ytop {
            for _ in 0..per_cell {
                particles.push(Particle::placed(DVec2::new(
                    x as f64 + REL_X,
                    y as f64 + REL_Y,
                )));
            }
        }
    }

    'remainder: for x in region.xleft..region.xright {
        for y in region.ybottom..region.ytop {
            if particles.len() as i64 >= n {
                break 'remainder;
            }
            particles.push(Particle::placed(DVec2::new(
                x as f64 + REL_X,
                y as f64 + REL_Y,
            )));
        }
    }

    particles
}

/// Complete a freshly placed slice of particles: derive the charge that makes
/// the corner forces integrate to a drift of exactly `2k+1` cells per step
/// horizontally and `m` cells per step vertically, set the initial velocity,
/// and record the creation provenance used by verification.
///
/// The algebraic form of the charge is load-bearing: trajectory verification
/// relies on bit-level closeness, not physical plausibility.
pub fn finish_distribution(timestep: i64, k: i64, m: i64, particles: &mut [Particle]) {
    for particle in particles {
        let rel_x = particle.pos.x % 1.0;
        let rel_y = particle.pos.y % 1.0;
        let x = particle.pos.x as i64;

        // Distances to the two corners on the left and right cell edges.
        let r1_sq = rel_y * rel_y + rel_x * rel_x;
        let r2_sq = rel_y * rel_y + (1.0 - rel_x) * (1.0 - rel_x);
        let cos_theta = rel_x / r1_sq.sqrt();
        let cos_phi = (1.0 - rel_x) / r2_sq.sqrt();
        let base = 1.0 / (DT * DT * Q * (cos_theta / r1_sq + cos_phi / r2_sq));
        let magnitude = (2 * k + 1) as f64 * base;

        particle.charge = if x % 2 == 0 { magnitude } else { -magnitude };
        particle.vel = DVec2::new(0.0, m as f64 / DT);
        particle.origin = particle.pos;
        particle.k = k;
        particle.m = m;
        particle.init_step = timestep;
    }
}

// verify.rs
// Reconstructs a particle's expected position from its creation record and
// compares it against the simulated state.

use crate::config::EPSILON;
use crate::grid::ChargeGrid;
use crate::particle::Particle;

/// Check a particle against its analytic trajectory at `current_step`.
///
/// The drift direction follows from the sign of the particle charge times
/// the charge of the grid point at its creation cell; the expected
/// displacement is `2k+1` cells per step horizontally and `m` cells per step
/// vertically, wrapped periodically on the cell count `L`. A full-period
/// offset is added before the modulus so the wrapped target stays
/// non-negative for either drift direction.
pub fn verify_particle(particle: &Particle, current_step: i64, grid: &ChargeGrid) -> bool {
    let elapsed = (current_step - particle.init_step) as f64;
    let l = grid.cells() as f64;

    // Cell that contained the particle when it was created.
    let x = particle.origin.x.floor() as i64;
    let y = particle.origin.y.floor() as i64;

    let disp = elapsed * (2 * particle.k + 1) as f64;
    let x_target = if particle.charge * grid.charge_at(x, y) > 0.0 {
        particle.origin.x + disp
    } else {
        particle.origin.x - disp
    };
    let y_target = particle.origin.y + particle.m as f64 * elapsed;

    let x_periodic = (x_target + disp * l) % l;
    let y_periodic = (y_target + elapsed * (particle.m as f64).abs() * l) % l;

    (particle.pos.x - x_periodic).abs() <= EPSILON
        && (particle.pos.y - y_periodic).abs() <= EPSILON
}

// particle.rs
// The charged point particle and its creation record.

use serde::{Deserialize, Serialize};
use ultraviolet::DVec2;

/// A charged point particle together with the record of how it was created.
///
/// `pos` and `vel` mutate every step; the remaining fields are fixed by
/// `init::finish_distribution` and drive the trajectory reconstruction in
/// `verify`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Particle {
    pub pos: DVec2,
    pub vel: DVec2,
    pub charge: f64,
    /// Position at creation time.
    pub origin: DVec2,
    /// Horizontal drift index: the particle covers `2k+1` cells per step.
    pub k: i64,
    /// Vertical drift in cells per step.
    pub m: i64,
    /// Step at which the particle entered the simulation.
    pub init_step: i64,
}

impl Particle {
    /// A particle placed at `pos`. Charge, velocity and provenance are
    /// completed by `init::finish_distribution`.
    pub fn placed(pos: DVec2) -> Self {
        Self {
            pos,
            vel: DVec2::zero(),
            charge: 0.0,
            origin: pos,
            k: 0,
            m: 0,
            init_step: 0,
        }
    }

    /// Integer coordinates of the enclosing grid cell.
    pub fn cell(&self) -> (i64, i64) {
        (self.pos.x.floor() as i64, self.pos.y.floor() as i64)
    }
}

// population.rs
// Owns the live particle collection: growth by injection, compaction on
// removal, with removed particles verified on the way out.

use ultraviolet::DVec2;

use crate::config::{REL_X, REL_Y};
use crate::grid::{ChargeGrid, Patch};
use crate::init;
use crate::particle::Particle;
use crate::verify::verify_particle;

/// The live particle population. A single owner mutates it; the grid never
/// does.
pub struct ParticleStore {
    particles: Vec<Particle>,
}

/// Outcome of one removal pass.
pub struct Removal {
    pub removed: usize,
    pub all_verified: bool,
}

impl ParticleStore {
    pub fn new(particles: Vec<Particle>) -> Self {
        Self { particles }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    /// Append `particles_per_cell` particles to every cell of `patch` and
    /// complete the new slice. Injected particles always carry zero drift
    /// parameters; their trajectory is predicted from the state recorded
    /// here, not from the run's configured drift.
    pub fn inject(&mut self, step: i64, patch: Patch, particles_per_cell: i64) -> usize {
        let added = (patch.cells() * particles_per_cell) as usize;
        let start = self.particles.len();
        self.particles.reserve(added);

        for y in patch.ybottom..patch.ytop {
            for x in patch.xleft..patch.xright {
                for _ in 0..particles_per_cell {
                    self.particles.push(Particle::placed(DVec2::new(
                        x as f64 + REL_X,
                        y as f64 + REL_Y,
                    )));
                }
            }
        }

        init::finish_distribution(step, 0, 0, &mut self.particles[start..]);
        added
    }

    /// Drop every particle strictly inside `patch`, verifying each one as it
    /// leaves. Particles exactly on a boundary are retained. Survivors keep
    /// their relative order.
    pub fn remove(&mut self, step: i64, patch: Patch, grid: &ChargeGrid) -> Removal {
        let before = self.particles.len();
        let mut all_verified = true;

        self.particles.retain(|particle| {
            if patch.contains_strict(particle.pos.x, particle.pos.y) {
                all_verified &= verify_particle(particle, step, grid);
                false
            } else {
                true
            }
        });

        Removal {
            removed: before - self.particles.len(),
            all_verified,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded_store() -> ParticleStore {
        let mut particles = init::patch(16, Patch::new(2, 4, 2, 4));
        init::finish_distribution(0, 1, 1, &mut particles);
        ParticleStore::new(particles)
    }

    #[test]
    fn injection_grows_by_cells_times_particles_per_cell() {
        let mut store = seeded_store();
        let region = Patch::new(5, 7, 5, 8);

        let added = store.inject(3, region, 2);
        assert_eq!(added, 12);
        assert_eq!(store.len(), 28);

        for particle in &store.particles()[16..] {
            assert!(region.contains_strict(particle.pos.x, particle.pos.y));
            assert_eq!(particle.k, 0);
            assert_eq!(particle.m, 0);
            assert_eq!(particle.init_step, 3);
            assert_eq!(particle.vel.y, 0.0);
        }
    }

    #[test]
    fn removal_conserves_the_population_count() {
        let grid = ChargeGrid::new(11);
        let mut store = seeded_store();
        let before = store.len();

        let removal = store.remove(0, Patch::new(2, 3, 2, 3), &grid);
        assert_eq!(store.len() + removal.removed, before);
        assert_eq!(removal.removed, 4);
        assert!(removal.all_verified);

        for particle in store.particles() {
            assert!(!Patch::new(2, 3, 2, 3).contains_strict(particle.pos.x, particle.pos.y));
        }
    }

    #[test]
    fn removal_retains_particles_exactly_on_the_boundary() {
        let grid = ChargeGrid::new(11);
        let mut particles = vec![
            Particle::placed(DVec2::new(2.0, 2.5)),
            Particle::placed(DVec2::new(2.5, 4.0)),
        ];
        init::finish_distribution(0, 0, 0, &mut particles);
        let mut store = ParticleStore::new(particles);

        let removal = store.remove(0, Patch::new(2, 4, 2, 4), &grid);
        assert_eq!(removal.removed, 0);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn removal_is_idempotent_without_intervening_motion() {
        let grid = ChargeGrid::new(11);
        let mut store = seeded_store();
        let region = Patch::new(2, 4, 2, 4);

        let first = store.remove(0, region, &grid);
        assert_eq!(first.removed, 16);

        let second = store.remove(0, region, &grid);
        assert_eq!(second.removed, 0);
        assert!(second.all_verified);
    }

    #[test]
    fn removal_preserves_the_relative_order_of_survivors() {
        let grid = ChargeGrid::new(11);
        let mut particles = Vec::new();
        for x in 0..8 {
            particles.push(Particle::placed(DVec2::new(x as f64 + 0.5, 0.5)));
        }
        init::finish_distribution(0, 0, 0, &mut particles);
        let mut store = ParticleStore::new(particles);

        store.remove(0, Patch::new(2, 5, 0, 2), &grid);
        let columns: Vec<i64> = store
            .particles()
            .iter()
            .map(|p| p.pos.x.floor() as i64)
            .collect();
        assert_eq!(columns, vec![0, 1, 5, 6, 7]);
    }
}

//! Explicit kinematic update with periodic boundary wraparound.

use ultraviolet::DVec2;

use crate::config::DT;
use crate::particle::Particle;

/// Advance one step under acceleration `acc`. The domain is periodic on the
/// cell count `l`; adding `l` before the modulus keeps negative
/// displacements non-negative.
pub fn advance(particle: &mut Particle, acc: DVec2, l: f64) {
    particle.pos.x = (particle.pos.x + particle.vel.x * DT + 0.5 * acc.x * DT * DT + l) % l;
    particle.pos.y = (particle.pos.y + particle.vel.y * DT + 0.5 * acc.y * DT * DT + l) % l;

    particle.vel += acc * DT;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advances_position_and_velocity() {
        let mut particle = Particle::placed(DVec2::new(1.5, 2.5));
        particle.vel = DVec2::new(1.0, 0.0);

        advance(&mut particle, DVec2::new(2.0, 4.0), 10.0);
        assert_eq!(particle.pos.x, 3.5);
        assert_eq!(particle.pos.y, 4.5);
        assert_eq!(particle.vel.x, 3.0);
        assert_eq!(particle.vel.y, 4.0);
    }

    #[test]
    fn wraps_past_the_upper_edge() {
        let mut particle = Particle::placed(DVec2::new(9.5, 0.5));
        particle.vel = DVec2::new(3.0, 0.0);

        advance(&mut particle, DVec2::zero(), 10.0);
        assert!((particle.pos.x - 2.5).abs() < 1e-12);
    }

    #[test]
    fn negative_displacement_re_enters_from_the_opposite_edge() {
        let mut particle = Particle::placed(DVec2::new(0.5, 0.5));
        particle.vel = DVec2::new(-2.0, -1.0);

        advance(&mut particle, DVec2::zero(), 10.0);
        assert!((particle.pos.x - 8.5).abs() < 1e-12);
        assert!((particle.pos.y - 9.5).abs() < 1e-12);
        assert!(particle.pos.x >= 0.0 && particle.pos.y >= 0.0);
    }
}

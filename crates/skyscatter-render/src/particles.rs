//! Particle Field: the fixed ensemble of light-scattering particles.
//!
//! Particles are created once with randomized attributes and drift
//! horizontally forever, wrapping from the right edge back to the left.
//! Only `x` changes after creation.

use rand::Rng;
use skyscatter_core::constants::{
    PARTICLE_RADIUS_MAX, PARTICLE_RADIUS_MIN, PARTICLE_SPEED_MAX, PARTICLE_SPEED_MIN,
};
use skyscatter_core::geometry::pulse;
use std::f32::consts::TAU;

/// One scattering particle. Position is surface-relative, [0, 1).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    /// Base radius in device pixels.
    pub radius: f32,
    /// Horizontal drift per frame in surface-relative units.
    pub speed: f32,
    /// Twinkle phase offset in radians.
    pub phase: f32,
}

impl Particle {
    /// Draw a particle with uniformly distributed attributes.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            x: rng.gen_range(0.0..1.0),
            y: rng.gen_range(0.0..1.0),
            radius: rng.gen_range(PARTICLE_RADIUS_MIN..PARTICLE_RADIUS_MAX),
            speed: rng.gen_range(PARTICLE_SPEED_MIN..PARTICLE_SPEED_MAX),
            phase: rng.gen_range(0.0..TAU),
        }
    }

    /// Move right by `speed`, wrapping back into [0, 1).
    pub fn drift(&mut self) {
        let x = (self.x + self.speed).rem_euclid(1.0);
        // rem_euclid can round up to exactly 1.0 for tiny negative inputs
        self.x = if x >= 1.0 { 0.0 } else { x };
    }

    /// Radius after applying the twinkle pulse.
    pub fn render_radius(&self, elapsed_ms: f64) -> f32 {
        self.radius * pulse(elapsed_ms, self.phase)
    }
}

/// Constant-cardinality particle set.
#[derive(Debug, Clone, Default)]
pub struct ParticleField {
    particles: Vec<Particle>,
}

impl ParticleField {
    /// Empty field. Call [`ParticleField::initialize`] to populate.
    pub fn new() -> Self {
        Self::default()
    }

    /// Field from explicit particles (tests, replays).
    pub fn from_particles(particles: Vec<Particle>) -> Self {
        Self { particles }
    }

    /// Populate with `count` random particles. A no-op once populated, so
    /// repeated setup events cannot reset drift continuity.
    /// Returns true if the field was populated by this call.
    pub fn initialize<R: Rng + ?Sized>(&mut self, count: usize, rng: &mut R) -> bool {
        if !self.particles.is_empty() {
            log::debug!(
                "Particle field already holds {} particles; skipping init",
                self.particles.len()
            );
            return false;
        }
        self.particles = (0..count).map(|_| Particle::random(rng)).collect();
        log::info!("Particle field initialized with {} particles", count);
        true
    }

    /// Advance every particle by one frame of drift.
    pub fn advance(&mut self) {
        for particle in &mut self.particles {
            particle.drift();
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use skyscatter_core::constants::PARTICLE_COUNT;

    fn seeded_field(seed: u64) -> ParticleField {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut field = ParticleField::new();
        field.initialize(PARTICLE_COUNT, &mut rng);
        field
    }

    #[test]
    fn test_initialize_count_and_ranges() {
        let field = seeded_field(7);
        assert_eq!(field.len(), 150);
        for p in field.particles() {
            assert!((0.0..1.0).contains(&p.x), "x {}", p.x);
            assert!((0.0..1.0).contains(&p.y), "y {}", p.y);
            assert!((0.5..2.0).contains(&p.radius), "radius {}", p.radius);
            assert!((0.0001..0.0006).contains(&p.speed), "speed {}", p.speed);
            assert!((0.0..TAU).contains(&p.phase), "phase {}", p.phase);
        }
    }

    #[test]
    fn test_initialize_is_idempotent() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut field = ParticleField::new();
        assert!(field.initialize(150, &mut rng));
        let before = field.particles().to_vec();
        assert!(!field.initialize(150, &mut rng));
        assert!(!field.initialize(10, &mut rng));
        assert_eq!(field.particles(), before.as_slice());
    }

    #[test]
    fn test_same_seed_same_field() {
        assert_eq!(seeded_field(42).particles(), seeded_field(42).particles());
        assert_ne!(seeded_field(42).particles(), seeded_field(43).particles());
    }

    #[test]
    fn test_drift_wraps_into_unit_range() {
        let mut p = Particle {
            x: 0.999,
            y: 0.5,
            radius: 1.0,
            speed: 0.01,
            phase: 0.0,
        };
        p.drift();
        assert!((p.x - 0.009).abs() < 1e-5, "x = {}", p.x);
        assert!(p.x < 1.0);
    }

    #[test]
    fn test_drift_exactly_one_wraps_to_zero() {
        let mut p = Particle {
            x: 0.75,
            y: 0.5,
            radius: 1.0,
            speed: 0.25,
            phase: 0.0,
        };
        p.drift();
        assert_eq!(p.x, 0.0);
    }

    #[test]
    fn test_advance_changes_only_x() {
        let mut field = seeded_field(3);
        let before = field.particles().to_vec();
        field.advance();
        for (a, b) in before.iter().zip(field.particles()) {
            assert_ne!(a.x, b.x);
            assert_eq!(a.y, b.y);
            assert_eq!(a.radius, b.radius);
            assert_eq!(a.speed, b.speed);
            assert_eq!(a.phase, b.phase);
        }
    }

    #[test]
    fn test_count_invariant_across_advances() {
        let mut field = seeded_field(9);
        for _ in 0..10_000 {
            field.advance();
        }
        assert_eq!(field.len(), PARTICLE_COUNT);
        assert!(field.particles().iter().all(|p| (0.0..1.0).contains(&p.x)));
    }

    #[test]
    fn test_render_radius_pulse_bounds() {
        let p = Particle {
            x: 0.0,
            y: 0.0,
            radius: 2.0,
            speed: 0.001,
            phase: 1.0,
        };
        for i in 0..1000 {
            let r = p.render_radius(i as f64 * 16.7);
            assert!((1.2 - 1e-5..=2.0 + 1e-5).contains(&r), "radius {r}");
        }
    }
}

use glam::Vec2;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use skyscatter_core::constants::{
    HALO_ALPHA, HALO_INNER_RADIUS, HALO_OUTER_RADIUS, PARTICLE_ALPHA, PARTICLE_COUNT, RAY_ALPHA,
    RAY_INNER_OFFSET, RAY_WIDTH, SUN_BORDER_ALPHA, SUN_BORDER_WIDTH, SUN_RADIUS,
};
use skyscatter_core::geometry::{ray_angles, scatter_intensity, sun_position, surface_diagonal};
use skyscatter_core::{ColorRGB, Palette, SkyColors};

use crate::framebuffer::FrameBuffer;
use crate::particles::ParticleField;

/// Result of one scheduled frame, consumed by the frame scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Frame composited into the surface.
    Drawn,
    /// Nothing drawn (zero-area or unavailable surface). Loop continues.
    Skipped,
    /// Drawing context is gone. Loop stops.
    ContextLost,
}

/// Owns the drawing surface and the particle field, and composites the sky
/// scene for a time value and elapsed time.
pub struct Compositor {
    palette: Palette,
    particles: ParticleField,
    frame: FrameBuffer,
    last_colors: Option<SkyColors>,
}

impl Compositor {
    /// Compositor with a zero-size surface and a particle field seeded from `seed`.
    pub fn new(palette: Palette, seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut particles = ParticleField::new();
        particles.initialize(PARTICLE_COUNT, &mut rng);
        Self::with_particles(palette, particles)
    }

    /// Compositor around an existing particle field.
    pub fn with_particles(palette: Palette, particles: ParticleField) -> Self {
        Self {
            palette,
            particles,
            frame: FrameBuffer::new(0, 0),
            last_colors: None,
        }
    }

    /// Resize the backing buffer to the container size in device pixels.
    /// Independent of the render cadence; the next frame draws at this size.
    pub fn resize(&mut self, width: u32, height: u32) {
        if (width, height) != self.size() {
            log::debug!("Surface resized to {}x{}", width, height);
        }
        self.frame.resize(width, height);
    }

    pub fn size(&self) -> (u32, u32) {
        (self.frame.width(), self.frame.height())
    }

    pub fn frame(&self) -> &FrameBuffer {
        &self.frame
    }

    pub fn particles(&self) -> &ParticleField {
        &self.particles
    }

    /// Swap the palette. Particle state is untouched.
    pub fn set_palette(&mut self, palette: Palette) {
        self.palette = palette;
    }

    /// Colors used by the most recent drawn frame.
    pub fn last_colors(&self) -> Option<SkyColors> {
        self.last_colors
    }

    /// Composite one frame. `time_value` is the latest control value,
    /// `elapsed_ms` drives twinkle and ray rotation.
    pub fn render(&mut self, time_value: f32, elapsed_ms: f64) -> FrameOutcome {
        if self.frame.is_empty() {
            return FrameOutcome::Skipped;
        }

        let colors = self.palette.colors_at(time_value);
        let width = self.frame.width() as f32;
        let height = self.frame.height() as f32;

        // 1. Sky
        self.frame.fill_vertical_gradient(colors.top, colors.horizon);

        // 2. Sun position
        let sun = sun_position(time_value, width, height);

        // 3. Particles
        self.particles.advance();
        let max_distance = surface_diagonal(width, height);
        for particle in self.particles.particles() {
            let center = Vec2::new(particle.x * width, particle.y * height);
            let intensity = scatter_intensity(center.distance(sun), max_distance);
            if intensity <= 0.0 {
                continue;
            }
            self.frame.fill_circle(
                center,
                particle.render_radius(elapsed_ms),
                colors.scatter,
                PARTICLE_ALPHA * intensity,
            );
        }

        // 4. Rays
        for angle in ray_angles(elapsed_ms) {
            let dir = Vec2::from_angle(angle);
            self.frame.stroke_segment(
                sun + dir * RAY_INNER_OFFSET,
                sun + dir * width,
                RAY_WIDTH,
                colors.sun,
                RAY_ALPHA,
            );
        }

        // 5. Halo
        self.frame.fill_radial_glow(
            sun,
            HALO_INNER_RADIUS,
            HALO_OUTER_RADIUS,
            colors.sun,
            HALO_ALPHA,
        );

        // 6. Sun disc + border
        self.frame.fill_circle(sun, SUN_RADIUS, colors.sun, 1.0);
        self.frame.stroke_circle(
            sun,
            SUN_RADIUS,
            SUN_BORDER_WIDTH,
            ColorRGB::WHITE,
            SUN_BORDER_ALPHA,
        );

        self.last_colors = Some(colors);
        FrameOutcome::Drawn
    }
}

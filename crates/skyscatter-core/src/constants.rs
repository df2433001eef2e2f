//! Single source of truth for shared constants.
//! Every visual and timing parameter of the sky scene lives here so the
//! compositor, host shell and bench runner agree on the same values.

/// Lower bound of the time-of-day control (sunrise).
pub const TIME_MIN: f32 = 0.0;

/// Upper bound of the time-of-day control (sunset).
pub const TIME_MAX: f32 = 100.0;

/// Time value the application starts at (noon).
pub const INITIAL_TIME_VALUE: f32 = 50.0;

/// Upper bound of the sunrise -> morning interpolation range (inclusive).
pub const MORNING_STOP: f32 = 25.0;

/// Upper bound of the morning -> noon interpolation range (inclusive).
pub const NOON_STOP: f32 = 50.0;

/// Number of scattering particles. Constant for the process lifetime.
pub const PARTICLE_COUNT: usize = 150;

/// Particle radius range in device pixels, [min, max).
pub const PARTICLE_RADIUS_MIN: f32 = 0.5;
pub const PARTICLE_RADIUS_MAX: f32 = 2.0;

/// Particle horizontal drift per frame in surface-relative units, [min, max).
pub const PARTICLE_SPEED_MIN: f32 = 0.0001;
pub const PARTICLE_SPEED_MAX: f32 = 0.0006;

/// Twinkle angular rate in radians per millisecond of elapsed time.
pub const PULSE_RATE: f64 = 0.005;

/// Twinkle baseline and amplitude: pulse = BASE + AMPLITUDE * sin(..).
pub const PULSE_BASE: f32 = 0.8;
pub const PULSE_AMPLITUDE: f32 = 0.2;

/// Fraction of the surface diagonal beyond which particles receive no light.
pub const SCATTER_FALLOFF: f32 = 0.6;

/// Particle opacity at full intensity.
pub const PARTICLE_ALPHA: f32 = 0.6;

/// Sun path: sun_y = height * SUN_BASE - height * SUN_ARC * sin(nx * PI).
pub const SUN_BASE: f32 = 0.9;
pub const SUN_ARC: f32 = 0.7;

/// Sun disc radius in device pixels.
pub const SUN_RADIUS: f32 = 25.0;

/// Width of the translucent white sun border.
pub const SUN_BORDER_WIDTH: f32 = 2.0;

/// Opacity of the sun border.
pub const SUN_BORDER_ALPHA: f32 = 0.5;

/// Halo inner radius (fully sun-colored inside).
pub const HALO_INNER_RADIUS: f32 = 10.0;

/// Halo outer radius (fully transparent at and beyond).
pub const HALO_OUTER_RADIUS: f32 = 120.0;

/// Global opacity applied to the halo.
pub const HALO_ALPHA: f32 = 0.4;

/// Number of light rays around the sun.
pub const RAY_COUNT: usize = 12;

/// Ray rotation in radians per millisecond of elapsed time.
pub const RAY_ANGULAR_RATE: f64 = 0.0005;

/// Distance from the sun center at which rays start.
pub const RAY_INNER_OFFSET: f32 = 20.0;

/// Ray stroke width in device pixels.
pub const RAY_WIDTH: f32 = 2.0;

/// Ray opacity.
pub const RAY_ALPHA: f32 = 0.1;

/// Auto-advance increment applied per playback interval.
pub const PLAYBACK_STEP: f32 = 0.2;

/// Auto-advance interval in milliseconds.
pub const PLAYBACK_INTERVAL_MS: f64 = 30.0;

/// Frame gaps longer than this (backgrounded tab) are capped for playback.
pub const MAX_FRAME_GAP_MS: f64 = 100.0;

use glam::Vec2;
use std::f32::consts::{PI, TAU};

use crate::constants::{
    PULSE_AMPLITUDE, PULSE_BASE, PULSE_RATE, RAY_ANGULAR_RATE, RAY_COUNT, SCATTER_FALLOFF,
    SUN_ARC, SUN_BASE, TIME_MAX,
};
use crate::state::clamp_time_value;

/// Sun center in device pixels for a time value on a `width` x `height` surface.
///
/// Single arch: x sweeps left to right, y is lowest (largest) at both ends
/// and highest (smallest) at t = 50.
pub fn sun_position(time_value: f32, width: f32, height: f32) -> Vec2 {
    let nx = clamp_time_value(time_value) / TIME_MAX;
    let x = nx * width;
    let y = height * SUN_BASE - height * SUN_ARC * (nx * PI).sin();
    Vec2::new(x, y)
}

/// Length of the surface diagonal.
pub fn surface_diagonal(width: f32, height: f32) -> f32 {
    Vec2::new(width, height).length()
}

/// Light received by a particle at `distance` from the sun.
/// Linear falloff reaching zero at `SCATTER_FALLOFF * max_distance`.
pub fn scatter_intensity(distance: f32, max_distance: f32) -> f32 {
    let reach = max_distance * SCATTER_FALLOFF;
    if reach <= 0.0 {
        return if distance <= 0.0 { 1.0 } else { 0.0 };
    }
    (1.0 - distance / reach).clamp(0.0, 1.0)
}

/// Twinkle multiplier in [0.6, 1.0].
pub fn pulse(elapsed_ms: f64, phase: f32) -> f32 {
    let angle = elapsed_ms * PULSE_RATE + phase as f64;
    PULSE_BASE + PULSE_AMPLITUDE * angle.sin() as f32
}

/// Angles of the sun rays, evenly spaced and rotating with elapsed time.
pub fn ray_angles(elapsed_ms: f64) -> [f32; RAY_COUNT] {
    let rotation = (elapsed_ms * RAY_ANGULAR_RATE).rem_euclid(TAU as f64) as f32;
    let spacing = TAU / RAY_COUNT as f32;
    std::array::from_fn(|i| rotation + spacing * i as f32)
}

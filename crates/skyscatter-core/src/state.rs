use std::cell::RefCell;
use std::rc::Rc;

use crate::constants::{
    INITIAL_TIME_VALUE, MAX_FRAME_GAP_MS, PLAYBACK_INTERVAL_MS, PLAYBACK_STEP, TIME_MAX, TIME_MIN,
};

/// Shared handle to the simulation state. The control surface writes through
/// it synchronously; the render loop reads the latest value every frame.
pub type SharedState = Rc<RefCell<SimulationState>>;

/// Clamp a time value into [0, 100]. NaN maps to 0.
pub fn clamp_time_value(value: f32) -> f32 {
    if value.is_nan() {
        TIME_MIN
    } else {
        value.clamp(TIME_MIN, TIME_MAX)
    }
}

/// External state owned by the control surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationState {
    pub time_value: f32,
    pub is_playing: bool,
}

impl SimulationState {
    pub fn new() -> Self {
        Self {
            time_value: INITIAL_TIME_VALUE,
            is_playing: false,
        }
    }

    pub fn shared() -> SharedState {
        Rc::new(RefCell::new(Self::new()))
    }

    /// Set the time value without touching playback.
    pub fn set_time_value(&mut self, value: f32) {
        self.time_value = clamp_time_value(value);
    }

    /// Slider drag or preset click: jump to `value` and pause.
    pub fn scrub_to(&mut self, value: f32) {
        self.set_time_value(value);
        self.is_playing = false;
    }

    pub fn toggle_playing(&mut self) {
        self.is_playing = !self.is_playing;
    }
}

impl Default for SimulationState {
    fn default() -> Self {
        Self::new()
    }
}

/// Auto-advance driver. Converts frame deltas into fixed-interval steps so
/// playback speed does not depend on display refresh rate.
#[derive(Debug, Clone, Default)]
pub struct PlaybackClock {
    accumulator_ms: f64,
}

impl PlaybackClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance `state` by the number of whole playback intervals contained in
    /// `delta_ms`. Returns the number of steps applied.
    pub fn tick(&mut self, state: &mut SimulationState, delta_ms: f64) -> u32 {
        if !state.is_playing {
            self.accumulator_ms = 0.0;
            return 0;
        }

        // Backgrounded tab: do not fast-forward through the gap
        self.accumulator_ms += delta_ms.clamp(0.0, MAX_FRAME_GAP_MS);

        let mut steps = 0;
        while self.accumulator_ms >= PLAYBACK_INTERVAL_MS {
            self.accumulator_ms -= PLAYBACK_INTERVAL_MS;
            let next = state.time_value + PLAYBACK_STEP;
            state.time_value = if next >= TIME_MAX { TIME_MIN } else { next };
            steps += 1;
        }
        steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state_is_noon_paused() {
        let s = SimulationState::new();
        assert_eq!(s.time_value, 50.0);
        assert!(!s.is_playing);
    }

    #[test]
    fn test_clamp_time_value() {
        assert_eq!(clamp_time_value(-5.0), 0.0);
        assert_eq!(clamp_time_value(150.0), 100.0);
        assert_eq!(clamp_time_value(42.5), 42.5);
        assert_eq!(clamp_time_value(f32::NAN), 0.0);
        assert_eq!(clamp_time_value(f32::INFINITY), 100.0);
    }

    #[test]
    fn test_scrub_pauses() {
        let mut s = SimulationState::new();
        s.is_playing = true;
        s.scrub_to(15.0);
        assert_eq!(s.time_value, 15.0);
        assert!(!s.is_playing);
    }

    #[test]
    fn test_set_time_value_keeps_playback() {
        let mut s = SimulationState::new();
        s.is_playing = true;
        s.set_time_value(80.0);
        assert!(s.is_playing);
    }

    #[test]
    fn test_shared_state_visible_through_clone() {
        let shared = SimulationState::shared();
        let writer = shared.clone();
        writer.borrow_mut().set_time_value(12.0);
        assert_eq!(shared.borrow().time_value, 12.0);
    }

    #[test]
    fn test_playback_paused_does_nothing() {
        let mut clock = PlaybackClock::new();
        let mut s = SimulationState::new();
        assert_eq!(clock.tick(&mut s, 1000.0), 0);
        assert_eq!(s.time_value, 50.0);
    }

    #[test]
    fn test_playback_steps_per_interval() {
        let mut clock = PlaybackClock::new();
        let mut s = SimulationState {
            time_value: 10.0,
            is_playing: true,
        };
        // 16 ms frames: first frame no step, second crosses 30 ms
        assert_eq!(clock.tick(&mut s, 16.0), 0);
        assert_eq!(clock.tick(&mut s, 16.0), 1);
        assert!((s.time_value - 10.2).abs() < 1e-4, "got {}", s.time_value);
        assert_eq!(clock.tick(&mut s, 90.0), 3);
    }

    #[test]
    fn test_playback_wraps_to_zero() {
        let mut clock = PlaybackClock::new();
        let mut s = SimulationState {
            time_value: 99.9,
            is_playing: true,
        };
        clock.tick(&mut s, 30.0);
        assert_eq!(s.time_value, 0.0);
    }

    #[test]
    fn test_playback_caps_large_gaps() {
        let mut clock = PlaybackClock::new();
        let mut s = SimulationState {
            time_value: 0.0,
            is_playing: true,
        };
        // 10 s gap counts as 100 ms -> 3 steps
        assert_eq!(clock.tick(&mut s, 10_000.0), 3);
    }
}

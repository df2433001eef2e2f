//! End-to-end loop behavior: scheduler + compositor + shared state driven by
//! a manual frame host, the way the browser drives them with rAF.

use skyscatter_core::palette::Stage;
use skyscatter_core::{colors_for, Palette, SimulationState};
use skyscatter_render::{Compositor, FrameHandle, FrameHost, FrameOutcome, FrameScheduler, LoopPhase};

/// Queues at most one pending callback, like requestAnimationFrame.
#[derive(Default)]
struct ManualHost {
    next_id: i32,
    pending: Option<FrameHandle>,
    cancelled: u32,
}

impl FrameHost for ManualHost {
    fn request_frame(&mut self) -> Option<FrameHandle> {
        self.next_id += 1;
        let handle = FrameHandle(self.next_id);
        self.pending = Some(handle);
        Some(handle)
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if self.pending == Some(handle) {
            self.pending = None;
            self.cancelled += 1;
        }
    }
}

impl ManualHost {
    /// Fire the pending callback, if any. Returns whether one fired.
    fn fire(&mut self) -> bool {
        self.pending.take().is_some()
    }
}

fn run_frame(
    host: &mut ManualHost,
    scheduler: &mut FrameScheduler,
    compositor: &mut Compositor,
    state: &skyscatter_core::SharedState,
    timestamp: f64,
) -> Option<FrameOutcome> {
    if !host.fire() || !scheduler.begin_frame() {
        return None;
    }
    let time_value = state.borrow().time_value;
    let outcome = compositor.render(time_value, timestamp);
    scheduler.finish_frame(host, outcome);
    Some(outcome)
}

#[test]
fn test_resize_mid_loop_renders_at_new_size() {
    let state = SimulationState::shared();
    let mut host = ManualHost::default();
    let mut scheduler = FrameScheduler::new();
    let mut compositor = Compositor::new(Palette::DEFAULT, 2024);

    compositor.resize(300, 150);
    scheduler.start(&mut host);
    assert_eq!(
        run_frame(&mut host, &mut scheduler, &mut compositor, &state, 16.0),
        Some(FrameOutcome::Drawn)
    );
    assert_eq!(compositor.size(), (300, 150));

    // Container grows between frames
    compositor.resize(800, 600);
    assert_eq!(
        run_frame(&mut host, &mut scheduler, &mut compositor, &state, 33.0),
        Some(FrameOutcome::Drawn)
    );
    assert_eq!(compositor.frame().width(), 800);
    assert_eq!(compositor.frame().height(), 600);
    assert_eq!(compositor.frame().pixels().len(), 800 * 600);
    // Bottom-right pixel belongs to the new frame, not a stale buffer
    assert_eq!(compositor.frame().pixel(799, 599).map(|p| p.a), Some(255));
}

#[test]
fn test_zero_area_frames_keep_loop_alive() {
    let state = SimulationState::shared();
    let mut host = ManualHost::default();
    let mut scheduler = FrameScheduler::new();
    let mut compositor = Compositor::new(Palette::DEFAULT, 1);

    scheduler.start(&mut host);
    for i in 0..3 {
        assert_eq!(
            run_frame(&mut host, &mut scheduler, &mut compositor, &state, i as f64 * 16.0),
            Some(FrameOutcome::Skipped)
        );
    }
    assert!(scheduler.is_live());

    // Surface becomes available: the loop self-heals
    compositor.resize(64, 48);
    assert_eq!(
        run_frame(&mut host, &mut scheduler, &mut compositor, &state, 64.0),
        Some(FrameOutcome::Drawn)
    );
}

#[test]
fn test_state_change_visible_next_frame() {
    let state = SimulationState::shared();
    let control = state.clone();
    let mut host = ManualHost::default();
    let mut scheduler = FrameScheduler::new();
    let mut compositor = Compositor::new(Palette::DEFAULT, 3);
    compositor.resize(120, 80);
    scheduler.start(&mut host);

    run_frame(&mut host, &mut scheduler, &mut compositor, &state, 0.0);
    assert_eq!(compositor.last_colors(), Some(colors_for(50.0)));

    control.borrow_mut().scrub_to(0.0);
    run_frame(&mut host, &mut scheduler, &mut compositor, &state, 16.0);
    let colors = compositor.last_colors().expect("frame drawn");
    assert_eq!(colors.top, Palette::DEFAULT.sky_top.get(Stage::Sunrise));
    assert_eq!(colors.horizon, Palette::DEFAULT.sky_horizon.get(Stage::Sunrise));

    control.borrow_mut().scrub_to(100.0);
    run_frame(&mut host, &mut scheduler, &mut compositor, &state, 32.0);
    let colors = compositor.last_colors().expect("frame drawn");
    assert_eq!(colors.top, Palette::DEFAULT.sky_top.get(Stage::Sunset));
    assert_eq!(colors.horizon, Palette::DEFAULT.sky_horizon.get(Stage::Sunset));

    // Same loop the whole time
    assert_eq!(scheduler.frame_count(), 3);
}

#[test]
fn test_particles_continue_across_state_changes() {
    let state = SimulationState::shared();
    let mut host = ManualHost::default();
    let mut scheduler = FrameScheduler::new();
    let mut compositor = Compositor::new(Palette::DEFAULT, 4);
    compositor.resize(100, 100);
    scheduler.start(&mut host);

    run_frame(&mut host, &mut scheduler, &mut compositor, &state, 0.0);
    let after_first = compositor.particles().particles().to_vec();
    state.borrow_mut().scrub_to(10.0);
    run_frame(&mut host, &mut scheduler, &mut compositor, &state, 16.0);

    for (a, b) in after_first.iter().zip(compositor.particles().particles()) {
        let expected = (a.x + a.speed).rem_euclid(1.0);
        assert!((b.x - expected).abs() < 1e-6 || b.x == 0.0);
    }
}

#[test]
fn test_teardown_cancels_pending_frame() {
    let state = SimulationState::shared();
    let mut host = ManualHost::default();
    let mut scheduler = FrameScheduler::new();
    let mut compositor = Compositor::new(Palette::DEFAULT, 5);
    compositor.resize(10, 10);
    scheduler.start(&mut host);
    run_frame(&mut host, &mut scheduler, &mut compositor, &state, 0.0);

    scheduler.cancel(&mut host);
    scheduler.cancel(&mut host);
    assert_eq!(host.cancelled, 1);
    assert_eq!(scheduler.phase(), LoopPhase::Stopped);
    assert_eq!(
        run_frame(&mut host, &mut scheduler, &mut compositor, &state, 16.0),
        None
    );
}

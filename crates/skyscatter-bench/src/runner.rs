use std::time::Instant;

use skyscatter_core::{Palette, PlaybackClock, SimulationState};
use skyscatter_render::{Compositor, FrameHandle, FrameHost, FrameOutcome, FrameScheduler};

use crate::scenes::SceneConfig;

/// Simulated display refresh interval.
const FRAME_INTERVAL_MS: f64 = 1000.0 / 60.0;

/// Timing data for a single benchmark run.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct TimingSeries {
    pub mean_ms: f64,
    pub median_ms: f64,
    pub p95_ms: f64,
    pub p99_ms: f64,
    pub min_ms: f64,
    pub max_ms: f64,
}

/// Result of a single scene benchmark.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct BenchmarkResult {
    pub scene_name: String,
    pub width: u32,
    pub height: u32,
    pub particle_count: usize,
    pub frame_count: u32,
    /// Time value after the last frame.
    pub final_time_value: f32,
    pub timings: TimingSeries,
}

/// Frame host without a display: one outstanding request at a time, fired
/// by the runner.
#[derive(Debug, Default)]
pub struct HeadlessHost {
    next_id: i32,
    pending: Option<FrameHandle>,
}

impl HeadlessHost {
    /// Consume the pending request. Returns whether there was one.
    pub fn fire(&mut self) -> bool {
        self.pending.take().is_some()
    }
}

impl FrameHost for HeadlessHost {
    fn request_frame(&mut self) -> Option<FrameHandle> {
        self.next_id = self.next_id.wrapping_add(1);
        let handle = FrameHandle(self.next_id);
        self.pending = Some(handle);
        Some(handle)
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if self.pending == Some(handle) {
            self.pending = None;
        }
    }
}

/// Runs the compositor natively through the frame scheduler.
pub struct BenchmarkRunner {
    frame_count: u32,
    seed: u64,
}

impl BenchmarkRunner {
    pub fn new(frame_count: u32, seed: u64) -> Self {
        Self { frame_count, seed }
    }

    /// Run a single benchmark scene and return timing results.
    pub fn run_scene(&self, config: &SceneConfig) -> BenchmarkResult {
        log::info!(
            "Running scene '{}' ({}x{}, {} frames)...",
            config.name,
            config.width,
            config.height,
            self.frame_count
        );

        let mut state = SimulationState::new();
        state.set_time_value(config.time_value);
        state.is_playing = config.playing;
        let mut clock = PlaybackClock::new();

        let mut compositor = Compositor::new(Palette::default(), self.seed);
        compositor.resize(config.width, config.height);

        let mut host = HeadlessHost::default();
        let mut scheduler = FrameScheduler::new();
        scheduler.start(&mut host);

        let mut frame_times = Vec::with_capacity(self.frame_count as usize);
        let mut elapsed_ms = 0.0f64;

        for _ in 0..self.frame_count {
            if !host.fire() || !scheduler.begin_frame() {
                log::warn!("  Loop stopped early after {} frames", frame_times.len());
                break;
            }
            elapsed_ms += FRAME_INTERVAL_MS;
            clock.tick(&mut state, FRAME_INTERVAL_MS);

            let frame_start = Instant::now();
            let outcome = compositor.render(state.time_value, elapsed_ms);
            frame_times.push(frame_start.elapsed().as_secs_f64() * 1000.0);

            if outcome != FrameOutcome::Drawn {
                log::warn!("  Frame not drawn: {:?}", outcome);
            }
            scheduler.finish_frame(&mut host, outcome);
        }
        scheduler.cancel(&mut host);

        let timings = compute_timings(&frame_times);
        log::info!(
            "  Done: mean={:.2}ms, p95={:.2}ms, p99={:.2}ms",
            timings.mean_ms,
            timings.p95_ms,
            timings.p99_ms
        );

        BenchmarkResult {
            scene_name: config.name.to_string(),
            width: config.width,
            height: config.height,
            particle_count: compositor.particles().len(),
            frame_count: frame_times.len() as u32,
            final_time_value: state.time_value,
            timings,
        }
    }
}

/// Compute timing statistics from a list of frame times in milliseconds.
pub fn compute_timings(times: &[f64]) -> TimingSeries {
    if times.is_empty() {
        return TimingSeries {
            mean_ms: 0.0,
            median_ms: 0.0,
            p95_ms: 0.0,
            p99_ms: 0.0,
            min_ms: 0.0,
            max_ms: 0.0,
        };
    }

    let mut sorted = times.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let n = sorted.len();
    let mean = sorted.iter().sum::<f64>() / n as f64;
    let median = if n % 2 == 0 {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    } else {
        sorted[n / 2]
    };
    let p95_idx = ((n as f64) * 0.95).ceil() as usize;
    let p99_idx = ((n as f64) * 0.99).ceil() as usize;

    TimingSeries {
        mean_ms: mean,
        median_ms: median,
        p95_ms: sorted[p95_idx.min(n - 1)],
        p99_ms: sorted[p99_idx.min(n - 1)],
        min_ms: sorted[0],
        max_ms: sorted[n - 1],
    }
}

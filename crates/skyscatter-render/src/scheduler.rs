//! Frame scheduler lifecycle.
//!
//! The loop is started once, rescheduled after every frame, and cancelled
//! once on teardown. The platform side (requestAnimationFrame, a test
//! double, a headless driver) sits behind [`FrameHost`].

use crate::compositor::FrameOutcome;

/// Opaque id of a pending frame request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub i32);

/// Platform frame-callback queue.
pub trait FrameHost {
    /// Ask for one callback at the next display refresh. `None` means the
    /// request could not be made (context gone).
    fn request_frame(&mut self) -> Option<FrameHandle>;

    /// Withdraw a pending request.
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// Where the loop is in its lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopPhase {
    /// Not started yet.
    Idle,
    /// A frame request is outstanding.
    Pending(FrameHandle),
    /// Inside a frame callback; the next request has not been made.
    Running,
    /// Cancelled or context lost. Terminal.
    Stopped,
}

/// Drives an unbounded frame sequence with exactly-once start and cancel.
#[derive(Debug)]
pub struct FrameScheduler {
    phase: LoopPhase,
    frames: u64,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self {
            phase: LoopPhase::Idle,
            frames: 0,
        }
    }

    pub fn phase(&self) -> LoopPhase {
        self.phase
    }

    /// Completed frame callbacks (drawn or skipped).
    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    pub fn is_live(&self) -> bool {
        matches!(self.phase, LoopPhase::Pending(_) | LoopPhase::Running)
    }

    /// Request the first frame. Only valid from `Idle`; later calls are
    /// ignored so a second setup event cannot spawn a duplicate loop.
    pub fn start<H: FrameHost>(&mut self, host: &mut H) -> bool {
        if self.phase != LoopPhase::Idle {
            log::warn!("Frame loop already started ({:?}); ignoring", self.phase);
            return false;
        }
        self.schedule_next(host);
        if self.is_live() {
            log::info!("Frame loop started");
        }
        self.is_live()
    }

    /// Called at the top of a frame callback. Returns false for a stale
    /// callback that arrives after cancellation; the caller must not draw.
    pub fn begin_frame(&mut self) -> bool {
        match self.phase {
            LoopPhase::Pending(_) => {
                self.phase = LoopPhase::Running;
                true
            }
            _ => false,
        }
    }

    /// Called after drawing. Reschedules unless the context is gone.
    pub fn finish_frame<H: FrameHost>(&mut self, host: &mut H, outcome: FrameOutcome) {
        if self.phase != LoopPhase::Running {
            return;
        }
        self.frames += 1;
        match outcome {
            FrameOutcome::ContextLost => {
                log::warn!("Drawing context lost after {} frames; stopping loop", self.frames);
                self.phase = LoopPhase::Stopped;
            }
            FrameOutcome::Drawn | FrameOutcome::Skipped => self.schedule_next(host),
        }
    }

    /// Withdraw the pending frame and stop. Idempotent.
    pub fn cancel<H: FrameHost>(&mut self, host: &mut H) {
        match self.phase {
            LoopPhase::Pending(handle) => {
                host.cancel_frame(handle);
                log::info!("Frame loop cancelled after {} frames", self.frames);
            }
            LoopPhase::Stopped => return,
            LoopPhase::Idle | LoopPhase::Running => {}
        }
        self.phase = LoopPhase::Stopped;
    }

    fn schedule_next<H: FrameHost>(&mut self, host: &mut H) {
        self.phase = match host.request_frame() {
            Some(handle) => LoopPhase::Pending(handle),
            None => {
                log::warn!("Frame request failed; stopping loop");
                LoopPhase::Stopped
            }
        };
    }
}

impl Default for FrameScheduler {
    fn default() -> Self {
        Self::new()
    }
}

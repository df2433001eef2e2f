pub mod compositor;
pub mod framebuffer;
pub mod particles;
pub mod present;
pub mod scheduler;

pub use compositor::{Compositor, FrameOutcome};
pub use framebuffer::{FrameBuffer, Rgba8};
pub use particles::{Particle, ParticleField};
pub use present::Presenter;
pub use scheduler::{FrameHandle, FrameHost, FrameScheduler, LoopPhase};

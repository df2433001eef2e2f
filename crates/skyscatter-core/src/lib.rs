pub mod color;
pub mod constants;
pub mod error;
pub mod geometry;
pub mod insight;
pub mod palette;
pub mod state;

pub use color::ColorRGB;
pub use error::SkyError;
pub use palette::{colors_for, Keyframes, Palette, SkyColors, Stage};
pub use state::{PlaybackClock, SharedState, SimulationState};

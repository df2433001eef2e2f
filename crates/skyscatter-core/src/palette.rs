//! Color Model: keyframe palettes and the time-of-day -> colors mapping.
//!
//! A palette holds four independent keyframe tables (sky top, sky horizon,
//! sun, scatter light). Each table maps the closed set of [`Stage`]s to a
//! color. Lookups are total: a stage without an entry resolves to black.
//!
//! Interpolation ranges use inclusive upper bounds:
//!   [0, 25]   sunrise -> morning, factor = t / 25
//!   (25, 50]  morning -> noon,    factor = (t - 25) / 25
//!   (50, 100] noon    -> sunset,  factor = (t - 50) / 50

use serde::{Deserialize, Serialize};

use crate::color::ColorRGB;
use crate::constants::{MORNING_STOP, NOON_STOP, TIME_MAX};
use crate::error::SkyError;
use crate::state::clamp_time_value;

/// Named point in the day anchoring keyframe colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Sunrise,
    Morning,
    Noon,
    Sunset,
}

impl Stage {
    pub const ALL: [Stage; 4] = [Stage::Sunrise, Stage::Morning, Stage::Noon, Stage::Sunset];

    pub fn name(self) -> &'static str {
        match self {
            Stage::Sunrise => "sunrise",
            Stage::Morning => "morning",
            Stage::Noon => "noon",
            Stage::Sunset => "sunset",
        }
    }
}

/// Stage -> color table. Entries are optional so partially specified RON
/// palettes load; missing entries read back as [`ColorRGB::BLACK`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Keyframes {
    pub sunrise: Option<ColorRGB>,
    pub morning: Option<ColorRGB>,
    pub noon: Option<ColorRGB>,
    pub sunset: Option<ColorRGB>,
}

impl Keyframes {
    /// Table with every stage defined.
    pub const fn full(
        sunrise: ColorRGB,
        morning: ColorRGB,
        noon: ColorRGB,
        sunset: ColorRGB,
    ) -> Self {
        Self {
            sunrise: Some(sunrise),
            morning: Some(morning),
            noon: Some(noon),
            sunset: Some(sunset),
        }
    }

    /// Total lookup over the stage set.
    pub fn get(&self, stage: Stage) -> ColorRGB {
        let entry = match stage {
            Stage::Sunrise => self.sunrise,
            Stage::Morning => self.morning,
            Stage::Noon => self.noon,
            Stage::Sunset => self.sunset,
        };
        entry.unwrap_or(ColorRGB::BLACK)
    }

    /// Stages without an entry.
    pub fn missing_stages(&self) -> Vec<Stage> {
        Stage::ALL
            .into_iter()
            .filter(|&s| match s {
                Stage::Sunrise => self.sunrise.is_none(),
                Stage::Morning => self.morning.is_none(),
                Stage::Noon => self.noon.is_none(),
                Stage::Sunset => self.sunset.is_none(),
            })
            .collect()
    }

    fn interpolate(&self, segment: Segment) -> ColorRGB {
        self.get(segment.from).lerp(self.get(segment.to), segment.factor)
    }
}

/// The four colors of one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkyColors {
    pub top: ColorRGB,
    pub horizon: ColorRGB,
    pub sun: ColorRGB,
    pub scatter: ColorRGB,
}

/// Interpolation segment selected for a time value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub from: Stage,
    pub to: Stage,
    pub factor: f32,
}

impl Segment {
    /// Select the stage pair and factor for a time value in [0, 100].
    /// Out-of-range and NaN inputs are clamped first.
    pub fn for_time(time_value: f32) -> Self {
        let t = clamp_time_value(time_value);
        if t <= MORNING_STOP {
            Self {
                from: Stage::Sunrise,
                to: Stage::Morning,
                factor: t / MORNING_STOP,
            }
        } else if t <= NOON_STOP {
            Self {
                from: Stage::Morning,
                to: Stage::Noon,
                factor: (t - MORNING_STOP) / (NOON_STOP - MORNING_STOP),
            }
        } else {
            Self {
                from: Stage::Noon,
                to: Stage::Sunset,
                factor: (t - NOON_STOP) / (TIME_MAX - NOON_STOP),
            }
        }
    }
}

/// Complete visual palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    #[serde(default)]
    pub sky_top: Keyframes,
    #[serde(default)]
    pub sky_horizon: Keyframes,
    #[serde(default)]
    pub sun: Keyframes,
    #[serde(default)]
    pub scatter: Keyframes,
}

impl Palette {
    /// Built-in palette.
    pub const DEFAULT: Palette = Palette {
        sky_top: Keyframes::full(
            ColorRGB::new(10, 20, 60),
            ColorRGB::new(70, 130, 230),
            ColorRGB::new(0, 100, 255),
            ColorRGB::new(20, 20, 60),
        ),
        // Orange/red, white-ish blue, sky blue, red-orange
        sky_horizon: Keyframes::full(
            ColorRGB::new(255, 100, 50),
            ColorRGB::new(180, 220, 255),
            ColorRGB::new(135, 206, 235),
            ColorRGB::new(255, 69, 0),
        ),
        sun: Keyframes::full(
            ColorRGB::new(255, 50, 0),
            ColorRGB::new(255, 220, 100),
            ColorRGB::new(255, 255, 220),
            ColorRGB::new(255, 0, 0),
        ),
        scatter: Keyframes::full(
            ColorRGB::new(255, 100, 50),
            ColorRGB::new(255, 255, 255),
            ColorRGB::new(255, 255, 255),
            ColorRGB::new(255, 50, 0),
        ),
    };

    /// Parse a palette from RON. Stage entries may be written without
    /// `Some(..)`; omitted stages or tables resolve to black at lookup time.
    pub fn from_ron(source: &str) -> Result<Palette, SkyError> {
        let options = ron::Options::default()
            .with_default_extension(ron::extensions::Extensions::IMPLICIT_SOME);
        let palette: Palette = options
            .from_str(source)
            .map_err(|e| SkyError::PaletteParse(e.to_string()))?;

        for line in palette.missing_summary() {
            log::warn!("Palette has no entry for {line}; using black");
        }
        Ok(palette)
    }

    /// One line per incomplete table, e.g. `sun: morning, sunset`.
    pub fn missing_summary(&self) -> Vec<String> {
        self.tables()
            .into_iter()
            .filter_map(|(name, table)| {
                let missing = table.missing_stages();
                if missing.is_empty() {
                    return None;
                }
                let stages: Vec<&str> = missing.iter().map(|s| s.name()).collect();
                Some(format!("{name}: {}", stages.join(", ")))
            })
            .collect()
    }

    /// Interpolate all four tables for a time value. Pure.
    pub fn colors_at(&self, time_value: f32) -> SkyColors {
        self.interpolate_segment(Segment::for_time(time_value))
    }

    fn interpolate_segment(&self, segment: Segment) -> SkyColors {
        SkyColors {
            top: self.sky_top.interpolate(segment),
            horizon: self.sky_horizon.interpolate(segment),
            sun: self.sun.interpolate(segment),
            scatter: self.scatter.interpolate(segment),
        }
    }

    fn tables(&self) -> [(&'static str, &Keyframes); 4] {
        [
            ("sky_top", &self.sky_top),
            ("sky_horizon", &self.sky_horizon),
            ("sun", &self.sun),
            ("scatter", &self.scatter),
        ]
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Colors for a time value using the built-in palette.
pub fn colors_for(time_value: f32) -> SkyColors {
    Palette::DEFAULT.colors_at(time_value)
}

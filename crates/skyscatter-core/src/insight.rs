//! Plain-language explanation of the scattering regime for a time value,
//! shown next to the sky view.

use crate::state::clamp_time_value;

/// Broad lighting regime. Boundaries: t < 33, 33 <= t <= 66, t > 66.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Regime {
    Morning,
    Midday,
    Evening,
}

impl Regime {
    pub fn for_time(time_value: f32) -> Self {
        let t = clamp_time_value(time_value);
        if t < 33.0 {
            Regime::Morning
        } else if t <= 66.0 {
            Regime::Midday
        } else {
            Regime::Evening
        }
    }
}

/// Text and indicator values for the insight panel.
#[derive(Debug, Clone, PartialEq)]
pub struct Insight {
    pub regime: Regime,
    pub title: &'static str,
    pub description: &'static str,
    pub physics_note: &'static str,
    /// Relative atmospheric path length, [0.1, 1.0].
    pub path_length: f32,
    pub path_label: &'static str,
    pub scattered_label: &'static str,
}

impl Insight {
    pub fn for_time(time_value: f32) -> Self {
        let t = clamp_time_value(time_value);
        let regime = Regime::for_time(t);
        let (title, description, physics_note) = match regime {
            Regime::Morning => (
                "Morning / Sunrise",
                "The sun is low on the horizon.",
                "Sunlight travels through a thicker layer of atmosphere. Much of the blue \
                 light is scattered away before reaching your eyes, allowing longer \
                 wavelengths (yellows, oranges, reds) to dominate the sky color near the sun.",
            ),
            Regime::Midday => (
                "Midday / Noon",
                "The sun is high overhead.",
                "Sunlight takes a shorter, more direct path through the atmosphere. Rayleigh \
                 scattering is strongest for short wavelengths (blue/violet). We see this \
                 scattered blue light coming from all directions, creating a blue sky.",
            ),
            Regime::Evening => (
                "Evening / Sunset",
                "The sun dips towards the horizon again.",
                "The path of light through the atmosphere is at its longest. Almost all blue \
                 light is scattered out of the direct beam. Only the longest wavelengths \
                 (reds and oranges) penetrate through to the observer, painting the horizon red.",
            ),
        };

        let offset = (t - 50.0).abs();
        let path_length = (offset * 2.0 / 100.0).max(0.1);
        let path_label = if offset < 20.0 {
            "Short (Direct)"
        } else {
            "Long (Atmospheric)"
        };
        // Strict on both ends, unlike the regime boundaries
        let scattered_label = if t > 33.0 && t < 66.0 {
            "Blue Dominant"
        } else {
            "Red/Orange Dominant"
        };

        Self {
            regime,
            title,
            description,
            physics_note,
            path_length,
            path_label,
            scattered_label,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regime_boundaries() {
        assert_eq!(Regime::for_time(0.0), Regime::Morning);
        assert_eq!(Regime::for_time(32.9), Regime::Morning);
        assert_eq!(Regime::for_time(33.0), Regime::Midday);
        assert_eq!(Regime::for_time(66.0), Regime::Midday);
        assert_eq!(Regime::for_time(66.1), Regime::Evening);
        assert_eq!(Regime::for_time(100.0), Regime::Evening);
    }

    #[test]
    fn test_path_length() {
        assert_eq!(Insight::for_time(50.0).path_length, 0.1);
        assert_eq!(Insight::for_time(0.0).path_length, 1.0);
        assert_eq!(Insight::for_time(100.0).path_length, 1.0);
        assert!((Insight::for_time(75.0).path_length - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_path_label() {
        assert_eq!(Insight::for_time(40.0).path_label, "Short (Direct)");
        assert_eq!(Insight::for_time(30.0).path_label, "Long (Atmospheric)");
        assert_eq!(Insight::for_time(70.0).path_label, "Long (Atmospheric)");
    }

    #[test]
    fn test_scattered_label_strict_bounds() {
        assert_eq!(Insight::for_time(33.0).scattered_label, "Red/Orange Dominant");
        assert_eq!(Insight::for_time(50.0).scattered_label, "Blue Dominant");
        assert_eq!(Insight::for_time(66.0).scattered_label, "Red/Orange Dominant");
    }

    #[test]
    fn test_titles_follow_regime() {
        assert_eq!(Insight::for_time(10.0).title, "Morning / Sunrise");
        assert_eq!(Insight::for_time(50.0).title, "Midday / Noon");
        assert_eq!(Insight::for_time(90.0).title, "Evening / Sunset");
    }
}

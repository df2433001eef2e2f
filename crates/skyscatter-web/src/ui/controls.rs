use skyscatter_core::constants::{TIME_MAX, TIME_MIN};
use skyscatter_core::insight::Regime;
use skyscatter_core::SimulationState;

/// Clickable labels under the slider and the time value each jumps to.
pub const STAGE_LABELS: [(&str, f32); 5] = [
    ("Sunrise", 0.0),
    ("Morning", 25.0),
    ("Noon", 50.0),
    ("Afternoon", 75.0),
    ("Sunset", 100.0),
];

/// One-click time presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    Morning,
    Noon,
    Evening,
}

impl Preset {
    pub const ALL: [Preset; 3] = [Preset::Morning, Preset::Noon, Preset::Evening];

    pub fn label(self) -> &'static str {
        match self {
            Preset::Morning => "Morning",
            Preset::Noon => "Noon",
            Preset::Evening => "Evening",
        }
    }

    pub fn time_value(self) -> f32 {
        match self {
            Preset::Morning => 15.0,
            Preset::Noon => 50.0,
            Preset::Evening => 85.0,
        }
    }

    /// The preset whose band contains `time_value`.
    pub fn active_for(time_value: f32) -> Preset {
        match Regime::for_time(time_value) {
            Regime::Morning => Preset::Morning,
            Regime::Midday => Preset::Noon,
            Regime::Evening => Preset::Evening,
        }
    }
}

/// Time-of-day window: play/pause, slider, stage labels, presets.
/// Any direct manipulation pauses playback.
pub fn show(ctx: &egui::Context, state: &mut SimulationState) {
    egui::Window::new("Time of Day")
        .anchor(egui::Align2::LEFT_BOTTOM, egui::vec2(8.0, -8.0))
        .resizable(false)
        .collapsible(true)
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                let label = if state.is_playing { "Pause" } else { "Play" };
                if ui.button(label).clicked() {
                    state.toggle_playing();
                }
                ui.label(format!("t = {:.1}", state.time_value));
            });

            let mut value = state.time_value;
            let slider = ui.add(
                egui::Slider::new(&mut value, TIME_MIN..=TIME_MAX)
                    .show_value(false)
                    .text("Time"),
            );
            if slider.changed() {
                state.scrub_to(value);
            }

            ui.horizontal(|ui| {
                for (label, stop) in STAGE_LABELS {
                    if ui.small_button(label).clicked() {
                        state.scrub_to(stop);
                    }
                }
            });

            ui.separator();
            let active = Preset::active_for(state.time_value);
            ui.horizontal(|ui| {
                for preset in Preset::ALL {
                    if ui
                        .selectable_label(preset == active, preset.label())
                        .clicked()
                    {
                        state.scrub_to(preset.time_value());
                    }
                }
            });
        });
}

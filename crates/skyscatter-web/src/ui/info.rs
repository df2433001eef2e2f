use skyscatter_core::insight::{Insight, Regime};

/// Heading tint per regime.
pub fn regime_color(regime: Regime) -> egui::Color32 {
    match regime {
        Regime::Morning => egui::Color32::from_rgb(253, 186, 116),
        Regime::Midday => egui::Color32::from_rgb(147, 197, 253),
        Regime::Evening => egui::Color32::from_rgb(252, 165, 165),
    }
}

/// Scattering explanation for the current time value.
pub fn show(ctx: &egui::Context, insight: &Insight) {
    egui::Window::new("Rayleigh Scattering")
        .anchor(egui::Align2::RIGHT_BOTTOM, egui::vec2(-8.0, -8.0))
        .resizable(false)
        .collapsible(true)
        .default_width(320.0)
        .show(ctx, |ui| {
            let tint = regime_color(insight.regime);
            ui.label(egui::RichText::new(insight.title).heading().color(tint));
            ui.label(insight.description);
            ui.separator();
            ui.label(egui::RichText::new("Physics Insight").strong());
            ui.label(egui::RichText::new(insight.physics_note).italics());
            ui.separator();
            ui.horizontal(|ui| {
                ui.vertical(|ui| {
                    ui.label("Path Length");
                    ui.add(
                        egui::ProgressBar::new(insight.path_length)
                            .desired_width(120.0)
                            .fill(egui::Color32::from_rgb(163, 230, 53)),
                    );
                    ui.label(insight.path_label);
                });
                ui.vertical(|ui| {
                    ui.label("Scattered Light");
                    ui.label(egui::RichText::new(insight.scattered_label).color(tint));
                });
            });
        });
}

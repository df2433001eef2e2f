pub mod controls;
pub mod debug;
pub mod info;

use egui_wgpu::ScreenDescriptor;

/// Manages egui context and its wgpu renderer.
pub struct UiState {
    pub ctx: egui::Context,
    pub renderer: egui_wgpu::Renderer,
}

impl UiState {
    pub fn new(device: &wgpu::Device, surface_format: wgpu::TextureFormat, dpi_scale: f32) -> Self {
        let ctx = egui::Context::default();
        ctx.set_pixels_per_point(dpi_scale);
        ctx.set_visuals(egui::Visuals::dark());

        let renderer = egui_wgpu::Renderer::new(device, surface_format, None, 1, false);

        Self { ctx, renderer }
    }

    pub fn screen_descriptor(&self, width: u32, height: u32) -> ScreenDescriptor {
        ScreenDescriptor {
            size_in_pixels: [width, height],
            pixels_per_point: self.ctx.pixels_per_point(),
        }
    }

    /// Raw input for one frame: logical screen rect, queued pointer events,
    /// and the frame clock in seconds.
    pub fn raw_input(
        &self,
        screen: &ScreenDescriptor,
        events: Vec<egui::Event>,
        timestamp_ms: f64,
    ) -> egui::RawInput {
        egui::RawInput {
            screen_rect: Some(egui::Rect::from_min_size(
                egui::Pos2::ZERO,
                egui::vec2(
                    screen.size_in_pixels[0] as f32 / screen.pixels_per_point,
                    screen.size_in_pixels[1] as f32 / screen.pixels_per_point,
                ),
            )),
            events,
            time: Some(timestamp_ms / 1000.0),
            ..Default::default()
        }
    }
}

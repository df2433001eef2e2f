/// Debug window: adapter, frame timing, surface size and scene state.
pub struct DebugPanel {
    adapter_name: String,
    backend: String,
    frame_times: [f64; 60],
    frame_index: usize,
    avg_frame_time_ms: f64,
    surface_size: (u32, u32),
    time_value: f32,
    is_playing: bool,
    particle_count: usize,
    frames: u64,
}

impl DebugPanel {
    pub fn new(adapter_name: String, backend: String) -> Self {
        Self {
            adapter_name,
            backend,
            frame_times: [0.0; 60],
            frame_index: 0,
            avg_frame_time_ms: 0.0,
            surface_size: (0, 0),
            time_value: 0.0,
            is_playing: false,
            particle_count: 0,
            frames: 0,
        }
    }

    /// Record a frame's delta time and update rolling average.
    pub fn update(&mut self, delta_ms: f64) {
        self.frame_times[self.frame_index] = delta_ms;
        self.frame_index = (self.frame_index + 1) % 60;
        let sum: f64 = self.frame_times.iter().sum();
        self.avg_frame_time_ms = sum / 60.0;
    }

    pub fn avg_frame_time_ms(&self) -> f64 {
        self.avg_frame_time_ms
    }

    pub fn fps(&self) -> f64 {
        if self.avg_frame_time_ms > 0.0 {
            1000.0 / self.avg_frame_time_ms
        } else {
            0.0
        }
    }

    pub fn set_surface_size(&mut self, width: u32, height: u32) {
        self.surface_size = (width, height);
    }

    pub fn set_scene_info(&mut self, time_value: f32, is_playing: bool, particle_count: usize, frames: u64) {
        self.time_value = time_value;
        self.is_playing = is_playing;
        self.particle_count = particle_count;
        self.frames = frames;
    }

    pub fn show(&self, ctx: &egui::Context) {
        egui::Window::new("Debug")
            .anchor(egui::Align2::RIGHT_TOP, egui::vec2(-8.0, 8.0))
            .default_open(false)
            .resizable(false)
            .show(ctx, |ui| {
                ui.label(&self.adapter_name);
                ui.label(&self.backend);
                ui.separator();
                ui.label(format!("{:.2} ms", self.avg_frame_time_ms));
                ui.label(format!("{:.0} FPS", self.fps()));
                ui.label(format!(
                    "Surface: {}x{}",
                    self.surface_size.0, self.surface_size.1
                ));
                ui.separator();
                let state_str = if self.is_playing { "PLAYING" } else { "PAUSED" };
                ui.label(format!("t = {:.1} | {}", self.time_value, state_str));
                ui.label(format!(
                    "Particles: {} | Frames: {}",
                    self.particle_count, self.frames
                ));
            });
    }
}

/// Configuration for a single benchmark scene.
#[derive(Debug, Clone)]
pub struct SceneConfig {
    pub name: &'static str,
    pub width: u32,
    pub height: u32,
    /// Starting time value.
    pub time_value: f32,
    /// Auto-advance the time value while running.
    pub playing: bool,
}

/// Standard suite: small to full-HD surfaces across the day, plus one
/// playback sweep.
pub fn standard_scenes() -> Vec<SceneConfig> {
    vec![
        SceneConfig {
            name: "300x150 noon",
            width: 300,
            height: 150,
            time_value: 50.0,
            playing: false,
        },
        SceneConfig {
            name: "1280x720 sunrise",
            width: 1280,
            height: 720,
            time_value: 0.0,
            playing: false,
        },
        SceneConfig {
            name: "1280x720 noon",
            width: 1280,
            height: 720,
            time_value: 50.0,
            playing: false,
        },
        SceneConfig {
            name: "1920x1080 sunset",
            width: 1920,
            height: 1080,
            time_value: 100.0,
            playing: false,
        },
        SceneConfig {
            name: "1920x1080 playback",
            width: 1920,
            height: 1080,
            time_value: 0.0,
            playing: true,
        },
    ]
}

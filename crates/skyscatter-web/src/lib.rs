#![cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]

#[cfg(target_arch = "wasm32")]
mod app;
#[cfg(target_arch = "wasm32")]
mod frame_host;
#[cfg(target_arch = "wasm32")]
mod gpu;
mod input;
mod resize;
pub mod ui;

#[cfg(target_arch = "wasm32")]
pub use web::SkyView;

#[cfg(target_arch = "wasm32")]
mod web {
    use crate::app::{AppParts, Application};
    use crate::input::{InputListeners, InputState};
    use crate::resize::{content_box_size, physical_size, ResizeWatch};
    use crate::{gpu, show_error_to_user};
    use skyscatter_core::{Palette, SharedState, SimulationState, SkyError};
    use std::cell::{Cell, RefCell};
    use std::rc::{Rc, Weak};
    use wasm_bindgen::prelude::*;

    /// WASM entry point. Sets panic hook and initializes logging.
    #[wasm_bindgen(start)]
    pub fn main() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("logger init failed");
        log::info!("Skyscatter loaded");
    }

    /// A sky view bound to one canvas. Created with `await SkyView.mount(id)`.
    #[wasm_bindgen]
    pub struct SkyView {
        app: Option<Rc<RefCell<Application>>>,
        state: SharedState,
    }

    #[wasm_bindgen]
    impl SkyView {
        /// Size the canvas to its container, initialize WebGPU, and start
        /// the frame loop.
        pub async fn mount(canvas_id: String) -> Result<SkyView, JsValue> {
            match mount_canvas(&canvas_id).await {
                Ok(view) => Ok(view),
                Err(e) => {
                    show_error_to_user(&format!("{e}"));
                    Err(JsValue::from_str(&e.to_string()))
                }
            }
        }

        /// Jump to a time value without changing playback. Clamped to [0, 100].
        pub fn set_time_value(&self, value: f32) {
            self.state.borrow_mut().set_time_value(value);
        }

        pub fn time_value(&self) -> f32 {
            self.state.borrow().time_value
        }

        pub fn set_playing(&self, playing: bool) {
            self.state.borrow_mut().is_playing = playing;
        }

        pub fn is_playing(&self) -> bool {
            self.state.borrow().is_playing
        }

        /// Replace the keyframe palette from RON source.
        pub fn set_palette_ron(&self, source: &str) -> Result<(), JsValue> {
            let palette =
                Palette::from_ron(source).map_err(|e| JsValue::from_str(&e.to_string()))?;
            if let Some(app) = &self.app {
                app.borrow_mut().set_palette(palette);
            }
            Ok(())
        }

        /// Stop the loop and release everything tied to the canvas.
        pub fn destroy(&mut self) {
            if let Some(app) = self.app.take() {
                app.borrow_mut().teardown();
                log::info!("Sky view destroyed");
            }
        }
    }

    impl Drop for SkyView {
        fn drop(&mut self) {
            self.destroy();
        }
    }

    async fn mount_canvas(canvas_id: &str) -> Result<SkyView, SkyError> {
        let window = web_sys::window().ok_or_else(|| SkyError::Dom("no global window".into()))?;
        let document = window
            .document()
            .ok_or_else(|| SkyError::Dom("no document".into()))?;

        let canvas = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| SkyError::CanvasNotFound(canvas_id.to_string()))?
            .dyn_into::<web_sys::HtmlCanvasElement>()
            .map_err(|_| SkyError::NotACanvas(canvas_id.to_string()))?;

        // Size from the container; the canvas fills it
        let container: web_sys::Element = canvas
            .parent_element()
            .unwrap_or_else(|| canvas.clone().into());
        let dpi_scale = window.device_pixel_ratio();
        let (css_width, css_height) = content_box_size(&window, &container);
        let (width, height) = physical_size(css_width, css_height, dpi_scale);
        canvas.set_width(width);
        canvas.set_height(height);

        log::info!(
            "Canvas: {}x{} CSS, {}x{} physical (DPI: {:.2})",
            css_width,
            css_height,
            width,
            height,
            dpi_scale
        );

        let input = Rc::new(RefCell::new(InputState::new()));
        let listeners = InputListeners::register(&canvas, input.clone());

        let gpu_ctx = gpu::init_gpu(canvas.clone(), width, height).await?;

        let state = SimulationState::shared();
        let pending_size = Rc::new(Cell::new(None));
        let application = Application::new(AppParts {
            gpu: gpu_ctx,
            canvas,
            window: window.clone(),
            state: state.clone(),
            dpi_scale: dpi_scale as f32,
            size: (width, height),
            seed: js_sys::Date::now().to_bits(),
            input,
            listeners,
            pending_size: pending_size.clone(),
        });
        let app = Rc::new(RefCell::new(application));

        // Observer resizes straight away; a busy app picks the size up next frame
        let weak: Weak<RefCell<Application>> = Rc::downgrade(&app);
        let apply = move || {
            let Some(app) = weak.upgrade() else {
                return true;
            };
            let Ok(mut app) = app.try_borrow_mut() else {
                return false;
            };
            app.apply_pending_resize();
            true
        };
        match ResizeWatch::observe(&container, pending_size, apply) {
            Ok(watch) => app.borrow_mut().attach_resize_watch(watch),
            Err(e) => log::warn!("{e}; canvas will keep its initial size"),
        }

        Application::start_loop(&app);

        Ok(SkyView {
            app: Some(app),
            state,
        })
    }
}

/// Show a user-visible error, not only a console line.
#[cfg(target_arch = "wasm32")]
fn show_error_to_user(msg: &str) {
    log::error!("{msg}");
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(&format!("Skyscatter Error: {msg}"));
    }
}

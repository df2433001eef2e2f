use crate::frame_host::WebFrameHost;
use crate::gpu::GpuContext;
use crate::input::{InputListeners, InputState};
use crate::resize::{PendingSize, ResizeWatch};
use crate::ui::debug::DebugPanel;
use crate::ui::{controls, info, UiState};
use skyscatter_core::insight::Insight;
use skyscatter_core::{Palette, PlaybackClock, SharedState};
use skyscatter_render::{Compositor, FrameOutcome, FrameScheduler, Presenter};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::prelude::*;

/// Everything a mounted sky view owns.
pub struct Application {
    gpu: GpuContext,
    canvas: web_sys::HtmlCanvasElement,
    presenter: Presenter,
    compositor: Compositor,
    ui_state: UiState,
    debug_panel: DebugPanel,
    state: SharedState,
    clock: PlaybackClock,
    scheduler: FrameScheduler,
    frame_host: WebFrameHost,
    input: Rc<RefCell<InputState>>,
    listeners: InputListeners,
    resize_watch: Option<ResizeWatch>,
    pending_size: PendingSize,
    last_frame_time: f64,
}

/// Construction inputs gathered by `SkyView::mount`.
pub struct AppParts {
    pub gpu: GpuContext,
    pub canvas: web_sys::HtmlCanvasElement,
    pub window: web_sys::Window,
    pub state: SharedState,
    pub dpi_scale: f32,
    pub size: (u32, u32),
    pub seed: u64,
    pub input: Rc<RefCell<InputState>>,
    pub listeners: InputListeners,
    pub pending_size: PendingSize,
}

impl Application {
    pub fn new(parts: AppParts) -> Self {
        let AppParts {
            gpu,
            canvas,
            window,
            state,
            dpi_scale,
            size,
            seed,
            input,
            listeners,
            pending_size,
        } = parts;

        let presenter = Presenter::new(&gpu.device, gpu.view_format);
        let ui_state = UiState::new(&gpu.device, gpu.view_format, dpi_scale);
        let mut debug_panel = DebugPanel::new(gpu.adapter_name.clone(), gpu.backend.clone());
        debug_panel.set_surface_size(size.0, size.1);

        let mut compositor = Compositor::new(Palette::default(), seed);
        compositor.resize(size.0, size.1);

        Self {
            gpu,
            canvas,
            presenter,
            compositor,
            ui_state,
            debug_panel,
            state,
            clock: PlaybackClock::new(),
            scheduler: FrameScheduler::new(),
            frame_host: WebFrameHost::new(window),
            input,
            listeners,
            resize_watch: None,
            pending_size,
            last_frame_time: 0.0,
        }
    }

    /// Install the frame callback and request the first frame.
    /// The callback is created once and holds only a weak reference, so
    /// dropping the view frees the application.
    pub fn start_loop(app: &Rc<RefCell<Self>>) {
        let weak: Weak<RefCell<Self>> = Rc::downgrade(app);
        let callback = Closure::<dyn FnMut(f64)>::new(move |timestamp: f64| {
            let Some(app) = weak.upgrade() else {
                return;
            };
            let Ok(mut app) = app.try_borrow_mut() else {
                log::warn!("Frame callback re-entered; skipping");
                return;
            };
            app.on_frame(timestamp);
        });

        let mut app_ref = app.borrow_mut();
        let Application {
            scheduler,
            frame_host,
            ..
        } = &mut *app_ref;
        frame_host.install(callback);
        scheduler.start(frame_host);
    }

    pub fn attach_resize_watch(&mut self, watch: ResizeWatch) {
        self.resize_watch = Some(watch);
    }

    pub fn set_palette(&mut self, palette: Palette) {
        log::info!("Palette replaced");
        self.compositor.set_palette(palette);
    }

    /// Cancel the pending frame, stop observing, remove listeners, and drop
    /// the frame callback. Safe to call more than once.
    pub fn teardown(&mut self) {
        self.scheduler.cancel(&mut self.frame_host);
        self.frame_host.release();
        if let Some(watch) = self.resize_watch.take() {
            watch.disconnect();
        }
        self.listeners.detach();
    }

    fn on_frame(&mut self, timestamp: f64) {
        if !self.scheduler.begin_frame() {
            return;
        }

        let delta = if self.last_frame_time > 0.0 {
            timestamp - self.last_frame_time
        } else {
            0.0
        };
        self.last_frame_time = timestamp;
        self.debug_panel.update(delta);
        {
            let mut state = self.state.borrow_mut();
            self.clock.tick(&mut state, delta);
        }

        let outcome = self.render_frame(timestamp);

        let Application {
            scheduler,
            frame_host,
            ..
        } = self;
        scheduler.finish_frame(frame_host, outcome);
    }

    /// Resize canvas, surface and compositor to the pending size, if any.
    /// Called from the resize observer and again at the start of each frame.
    pub fn apply_pending_resize(&mut self) {
        let Some((width, height)) = self.pending_size.take() else {
            return;
        };
        if (width, height) == self.compositor.size() {
            return;
        }
        log::info!("Canvas resized to {}x{}", width, height);
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        self.gpu.resize(width, height);
        self.compositor.resize(width, height);
        self.debug_panel.set_surface_size(width, height);
    }

    fn render_frame(&mut self, timestamp: f64) -> FrameOutcome {
        if !self.canvas.is_connected() {
            return FrameOutcome::ContextLost;
        }
        self.apply_pending_resize();

        let time_value = self.state.borrow().time_value;
        match self.compositor.render(time_value, timestamp) {
            FrameOutcome::Drawn => {}
            other => return other,
        }

        let Application {
            gpu,
            presenter,
            compositor,
            ui_state,
            debug_panel,
            state,
            scheduler,
            input,
            ..
        } = self;

        let output = match gpu.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                gpu.reconfigure();
                return FrameOutcome::Skipped;
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("GPU out of memory");
                return FrameOutcome::ContextLost;
            }
            Err(e) => {
                log::warn!("Surface error: {e:?}");
                return FrameOutcome::Skipped;
            }
        };
        let view = gpu.create_view(&output.texture);

        presenter.upload(&gpu.device, &gpu.queue, compositor.frame());

        {
            let current = *state.borrow();
            debug_panel.set_scene_info(
                current.time_value,
                current.is_playing,
                compositor.particles().len(),
                scheduler.frame_count(),
            );
        }

        let screen =
            ui_state.screen_descriptor(gpu.surface_config.width, gpu.surface_config.height);
        let events = input.borrow_mut().take_events();
        let raw_input = ui_state.raw_input(&screen, events, timestamp);
        let insight = Insight::for_time(time_value);

        // Edits made here are visible to the next frame
        let full_output = ui_state.ctx.run(raw_input, |ctx| {
            let mut state = state.borrow_mut();
            controls::show(ctx, &mut state);
            info::show(ctx, &insight);
            debug_panel.show(ctx);
        });

        let clipped_primitives = ui_state
            .ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);

        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame-encoder"),
            });

        presenter.render(&mut encoder, &view);

        for (id, delta) in &full_output.textures_delta.set {
            ui_state
                .renderer
                .update_texture(&gpu.device, &gpu.queue, *id, delta);
        }
        ui_state.renderer.update_buffers(
            &gpu.device,
            &gpu.queue,
            &mut encoder,
            &clipped_primitives,
            &screen,
        );

        // forget_lifetime() decouples the pass from the encoder borrow so the
        // renderer can record into it.
        {
            let mut pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("egui-pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    timestamp_writes: None,
                    occlusion_query_set: None,
                })
                .forget_lifetime();
            ui_state
                .renderer
                .render(&mut pass, &clipped_primitives, &screen);
        }

        for id in &full_output.textures_delta.free {
            ui_state.renderer.free_texture(id);
        }

        gpu.queue.submit(std::iter::once(encoder.finish()));
        output.present();
        FrameOutcome::Drawn
    }
}

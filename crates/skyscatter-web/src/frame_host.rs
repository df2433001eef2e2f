use skyscatter_render::{FrameHandle, FrameHost};
use wasm_bindgen::prelude::*;

pub type FrameCallback = Closure<dyn FnMut(f64)>;

/// `requestAnimationFrame` behind [`FrameHost`]. The callback is created once
/// and reused for every request.
pub struct WebFrameHost {
    window: web_sys::Window,
    callback: Option<FrameCallback>,
}

impl WebFrameHost {
    pub fn new(window: web_sys::Window) -> Self {
        Self {
            window,
            callback: None,
        }
    }

    pub fn install(&mut self, callback: FrameCallback) {
        self.callback = Some(callback);
    }

    /// Drop the callback. Later requests fail, which stops the loop.
    pub fn release(&mut self) {
        self.callback = None;
    }
}

impl FrameHost for WebFrameHost {
    fn request_frame(&mut self) -> Option<FrameHandle> {
        let callback = self.callback.as_ref()?;
        match self
            .window
            .request_animation_frame(callback.as_ref().unchecked_ref())
        {
            Ok(id) => Some(FrameHandle(id)),
            Err(e) => {
                log::error!("requestAnimationFrame failed: {e:?}");
                None
            }
        }
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if let Err(e) = self.window.cancel_animation_frame(handle.0) {
            log::warn!("cancelAnimationFrame failed: {e:?}");
        }
    }
}

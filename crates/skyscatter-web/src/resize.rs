use skyscatter_core::SkyError;
use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;

/// Latest observed physical size not yet applied.
pub type PendingSize = Rc<Cell<Option<(u32, u32)>>>;

pub fn physical_size(css_width: f64, css_height: f64, dpi_scale: f64) -> (u32, u32) {
    let scale = |v: f64| (v * dpi_scale).round().max(0.0) as u32;
    (scale(css_width), scale(css_height))
}

/// Computed style length such as `"12.5px"`. Anything unparsable counts as zero.
pub fn parse_px(value: &str) -> f64 {
    value
        .trim()
        .trim_end_matches("px")
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Content-box extent from a client extent, which includes padding.
pub fn content_extent(client: f64, padding_start: f64, padding_end: f64) -> f64 {
    (client - padding_start - padding_end).max(0.0)
}

/// Content-box size of `element` in CSS pixels, matching what
/// `ResizeObserverEntry::content_rect` reports.
pub fn content_box_size(window: &web_sys::Window, element: &web_sys::Element) -> (f64, f64) {
    let client_width = element.client_width() as f64;
    let client_height = element.client_height() as f64;
    let Ok(Some(style)) = window.get_computed_style(element) else {
        return (client_width, client_height);
    };
    let padding = |side: &str| {
        style
            .get_property_value(side)
            .map(|v| parse_px(&v))
            .unwrap_or(0.0)
    };
    (
        content_extent(client_width, padding("padding-left"), padding("padding-right")),
        content_extent(client_height, padding("padding-top"), padding("padding-bottom")),
    )
}

/// Record `size` and try to apply it right away. `apply` consumes the cell
/// and returns false when the target is busy, in which case the size stays
/// pending for the next frame.
pub fn deliver_size(
    pending: &PendingSize,
    size: (u32, u32),
    apply: impl FnOnce() -> bool,
) -> bool {
    pending.set(Some(size));
    apply()
}

/// Container observer. Each notification resizes through `apply` without
/// waiting for a frame.
pub struct ResizeWatch {
    observer: web_sys::ResizeObserver,
    _callback: Closure<dyn FnMut(js_sys::Array)>,
}

impl ResizeWatch {
    pub fn observe(
        element: &web_sys::Element,
        pending: PendingSize,
        mut apply: impl FnMut() -> bool + 'static,
    ) -> Result<Self, SkyError> {
        let callback = Closure::<dyn FnMut(js_sys::Array)>::new(move |entries: js_sys::Array| {
            let Ok(entry) = entries.get(0).dyn_into::<web_sys::ResizeObserverEntry>() else {
                return;
            };
            let rect = entry.content_rect();
            let dpi_scale = web_sys::window()
                .map(|w| w.device_pixel_ratio())
                .unwrap_or(1.0);
            let size = physical_size(rect.width(), rect.height(), dpi_scale);
            if !deliver_size(&pending, size, &mut apply) {
                log::debug!("Resize to {}x{} deferred to next frame", size.0, size.1);
            }
        });

        let observer = web_sys::ResizeObserver::new(callback.as_ref().unchecked_ref())
            .map_err(|e| SkyError::Dom(format!("ResizeObserver: {e:?}")))?;
        observer.observe(element);

        Ok(Self {
            observer,
            _callback: callback,
        })
    }

    pub fn disconnect(&self) {
        self.observer.disconnect();
    }
}

impl Drop for ResizeWatch {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_physical_size_scales() {
        assert_eq!(physical_size(300.0, 150.0, 1.0), (300, 150));
        assert_eq!(physical_size(400.0, 300.0, 2.0), (800, 600));
        assert_eq!(physical_size(100.4, 50.6, 1.5), (151, 76));
    }

    #[test]
    fn test_physical_size_collapsed() {
        assert_eq!(physical_size(0.0, 0.0, 2.0), (0, 0));
        assert_eq!(physical_size(-5.0, 10.0, 1.0), (0, 10));
    }

    #[test]
    fn test_parse_px() {
        assert_eq!(parse_px("16px"), 16.0);
        assert_eq!(parse_px(" 12.5px "), 12.5);
        assert_eq!(parse_px("0"), 0.0);
        assert_eq!(parse_px(""), 0.0);
        assert_eq!(parse_px("auto"), 0.0);
    }

    #[test]
    fn test_content_extent_strips_padding() {
        // 300px client box with 10px + 20px padding
        assert_eq!(content_extent(300.0, 10.0, 20.0), 270.0);
        assert_eq!(content_extent(300.0, 0.0, 0.0), 300.0);
        assert_eq!(content_extent(20.0, 16.0, 16.0), 0.0);
    }

    #[test]
    fn test_content_box_matches_observer_size() {
        // Initial mount and a later observation of the same box agree
        let (w, h) = (
            content_extent(820.0, 10.0, 10.0),
            content_extent(620.0, 10.0, 10.0),
        );
        assert_eq!(physical_size(w, h, 2.0), physical_size(800.0, 600.0, 2.0));
    }

    #[test]
    fn test_deliver_size_applies_immediately() {
        let pending: PendingSize = Rc::new(Cell::new(None));
        let applied = Rc::new(Cell::new(None));
        let ok = deliver_size(&pending, (640, 480), || {
            applied.set(pending.take());
            true
        });
        assert!(ok);
        assert_eq!(applied.get(), Some((640, 480)));
        assert_eq!(pending.get(), None);
    }

    #[test]
    fn test_deliver_size_busy_stays_pending() {
        let pending: PendingSize = Rc::new(Cell::new(None));
        assert!(!deliver_size(&pending, (640, 480), || false));
        assert_eq!(pending.get(), Some((640, 480)));

        // A later notification replaces the deferred size
        assert!(!deliver_size(&pending, (800, 600), || false));
        assert_eq!(pending.take(), Some((800, 600)));
    }
}

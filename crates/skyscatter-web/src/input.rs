use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;

/// Pointer events queued between frames and handed to egui.
#[derive(Default)]
pub struct InputState {
    events: Vec<egui::Event>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pointer_moved(&mut self, pos: egui::Pos2) {
        self.events.push(egui::Event::PointerMoved(pos));
    }

    pub fn pointer_button(&mut self, pos: egui::Pos2, button: egui::PointerButton, pressed: bool) {
        self.events.push(egui::Event::PointerButton {
            pos,
            button,
            pressed,
            modifiers: egui::Modifiers::default(),
        });
    }

    pub fn pointer_left(&mut self) {
        self.events.push(egui::Event::PointerGone);
    }

    /// Drain queued events for this frame.
    pub fn take_events(&mut self) -> Vec<egui::Event> {
        std::mem::take(&mut self.events)
    }
}

/// DOM `MouseEvent.button` to egui.
pub fn pointer_button(button: i16) -> Option<egui::PointerButton> {
    match button {
        0 => Some(egui::PointerButton::Primary),
        1 => Some(egui::PointerButton::Middle),
        2 => Some(egui::PointerButton::Secondary),
        _ => None,
    }
}

/// Canvas-relative CSS pixels are egui points because pixels_per_point
/// equals the device pixel ratio.
fn event_pos(e: &web_sys::MouseEvent) -> egui::Pos2 {
    egui::pos2(e.offset_x() as f32, e.offset_y() as f32)
}

type MouseClosure = Closure<dyn FnMut(web_sys::MouseEvent)>;

/// Mouse listeners registered once on the canvas. Removed on `detach`.
pub struct InputListeners {
    target: web_sys::EventTarget,
    closures: Vec<(&'static str, MouseClosure)>,
}

impl InputListeners {
    pub fn register(canvas: &web_sys::HtmlCanvasElement, state: Rc<RefCell<InputState>>) -> Self {
        let target: web_sys::EventTarget = canvas.clone().into();
        let mut listeners = Self {
            target,
            closures: Vec::with_capacity(4),
        };

        {
            let state = state.clone();
            listeners.add("mousemove", move |e| {
                state.borrow_mut().pointer_moved(event_pos(&e));
            });
        }

        for (event, pressed) in [("mousedown", true), ("mouseup", false)] {
            let state = state.clone();
            listeners.add(event, move |e| {
                if let Some(button) = pointer_button(e.button()) {
                    state
                        .borrow_mut()
                        .pointer_button(event_pos(&e), button, pressed);
                }
            });
        }

        listeners.add("mouseleave", move |_| {
            state.borrow_mut().pointer_left();
        });

        listeners
    }

    fn add(&mut self, event: &'static str, handler: impl FnMut(web_sys::MouseEvent) + 'static) {
        let closure = MouseClosure::new(handler);
        if let Err(e) = self
            .target
            .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
        {
            log::warn!("Failed to add {event} listener: {e:?}");
            return;
        }
        self.closures.push((event, closure));
    }

    pub fn detach(&mut self) {
        for (event, closure) in self.closures.drain(..) {
            let _ = self
                .target
                .remove_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
        }
    }
}

impl Drop for InputListeners {
    fn drop(&mut self) {
        self.detach();
    }
}

use crate::frame::FrameContext;
use crate::input;
use glam::Vec2;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

#[derive(Clone)]
pub struct InputWiring {
    pub canvas: web::HtmlCanvasElement,
    pub frame_ctx: Rc<RefCell<FrameContext>>,
}

pub fn wire_input_handlers(w: InputWiring) {
    wire_pointerdown(&w);
}

/// Pointer position in the canvas's CSS-pixel space, if it lands on it.
#[inline]
pub fn pointer_canvas_css(ev: &web::PointerEvent, canvas: &web::HtmlCanvasElement) -> Option<Vec2> {
    let rect = canvas.get_bounding_client_rect();
    input::css_point_in_rect(
        Vec2::new(ev.client_x() as f32, ev.client_y() as f32),
        Vec2::new(rect.left() as f32, rect.top() as f32),
        Vec2::new(rect.width() as f32, rect.height() as f32),
    )
}

fn wire_pointerdown(w: &InputWiring) {
    let w = w.clone();
    let canvas_for_listener = w.canvas.clone();

    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let Some(pos) = pointer_canvas_css(&ev, &w.canvas) else {
            return;
        };
        let spawned = w
            .frame_ctx
            .borrow_mut()
            .renderer
            .pointer_down(pos, input::pointer_pressure(&ev.pointer_type(), ev.pressure()));
        if spawned > 0 {
            log::debug!("[pointer] burst at ({:.0},{:.0}) n={}", pos.x, pos.y, spawned);
        }
    }) as Box<dyn FnMut(_)>);
    _ = canvas_for_listener
        .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
    closure.forget();
}

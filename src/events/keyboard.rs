use crate::constants::CONTROL_BURST_STRENGTH;
use crate::frame::{FrameContext, RafScheduler};
use crate::input::{action_for_key, KeyAction};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Pause when running, resume otherwise. Shared by the toggle button.
pub fn toggle_pause(frame_ctx: &Rc<RefCell<FrameContext>>, scheduler: &mut RafScheduler) {
    let mut fc = frame_ctx.borrow_mut();
    if fc.anim.is_running() {
        fc.stop(scheduler);
        log::info!("[keys] paused");
    } else {
        fc.start(scheduler);
        log::info!("[keys] resumed");
    }
}

pub fn handle_global_keydown(
    ev: &web::KeyboardEvent,
    frame_ctx: &Rc<RefCell<FrameContext>>,
    scheduler: &mut RafScheduler,
) {
    // Leave typing in form fields alone.
    if let Some(target) = ev.target().and_then(|t| t.dyn_into::<web::Element>().ok()) {
        let tag = target.tag_name();
        if tag.eq_ignore_ascii_case("input") || tag.eq_ignore_ascii_case("textarea") {
            return;
        }
    }
    match action_for_key(&ev.key()) {
        Some(KeyAction::BurstCenter) => {
            let n = frame_ctx
                .borrow_mut()
                .renderer
                .burst_center(CONTROL_BURST_STRENGTH);
            log::info!("[keys] burst n={}", n);
        }
        Some(KeyAction::TogglePause) => {
            toggle_pause(frame_ctx, scheduler);
            ev.prevent_default();
        }
        Some(KeyAction::Clear) => {
            let mut fc = frame_ctx.borrow_mut();
            fc.renderer.clear();
            if !fc.anim.is_running() {
                fc.render_static();
            }
            log::info!("[keys] cleared field");
        }
        None => {}
    }
}

pub fn wire_global_keydown(frame_ctx: Rc<RefCell<FrameContext>>, scheduler: RafScheduler) {
    if let Some(window) = web::window() {
        let mut scheduler = scheduler;
        let closure =
            wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
                handle_global_keydown(&ev, &frame_ctx, &mut scheduler);
            }) as Box<dyn FnMut(_)>);
        _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

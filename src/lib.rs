#![cfg(target_arch = "wasm32")]
use crate::constants::*;
use crate::core::{FieldConfig, FieldRenderer, Preset, Theme};
use crate::frame::{FrameContext, RafScheduler};
use glam::Vec2;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

mod constants;
mod core;
mod dom;
mod events;
mod frame;
mod input;
mod overlay;
mod render;

fn wire_canvas_resize(frame_ctx: &Rc<RefCell<FrameContext>>) {
    let frame_ctx = frame_ctx.clone();
    let resize_closure = Closure::wrap(Box::new(move || {
        frame_ctx.borrow_mut().sync_size();
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
    }
    resize_closure.forget();
}

// Follow OS-level reduced-motion changes while the page is open.
fn wire_reduced_motion(handle: &FieldHandle, document: &web::Document) {
    let Some(mql) = web::window().and_then(|w| w.match_media(REDUCED_MOTION_QUERY).ok().flatten())
    else {
        return;
    };
    let handle = handle.clone();
    let doc = document.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::MediaQueryListEvent| {
        let reduced = ev.matches();
        handle.set_reduced_motion(reduced);
        overlay::show_motion_signal(&doc, reduced);
        log::info!("[field] reduced motion={}", reduced);
    }) as Box<dyn FnMut(_)>);
    _ = mql.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_controls(handle: &FieldHandle, document: &web::Document) {
    let burst = handle.clone();
    dom::add_click_listener(document, BURST_BUTTON_ID, move || {
        burst
            .frame_ctx
            .borrow_mut()
            .renderer
            .burst_center(CONTROL_BURST_STRENGTH);
    });

    let toggle = handle.clone();
    let doc = document.clone();
    dom::add_click_listener(document, TOGGLE_BUTTON_ID, move || {
        let mut scheduler = toggle.scheduler.clone();
        events::keyboard::toggle_pause(&toggle.frame_ctx, &mut scheduler);
        overlay::update_toggle_label(&doc, TOGGLE_BUTTON_ID, toggle.is_running());
    });
}

// Page teardown halts rAF delivery anyway; disposing also releases the tick
// closure so the canvas and store can be collected.
fn wire_teardown(handle: &FieldHandle) {
    let handle = handle.clone();
    let closure = Closure::wrap(Box::new(move || {
        handle.dispose();
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window.add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

/// JS-facing handle to one mounted particle field.
#[wasm_bindgen]
#[derive(Clone)]
pub struct FieldHandle {
    frame_ctx: Rc<RefCell<FrameContext>>,
    scheduler: RafScheduler,
}

#[wasm_bindgen]
impl FieldHandle {
    /// Start the frame loop (or draw a still frame under reduced motion).
    pub fn start(&self) {
        let mut scheduler = self.scheduler.clone();
        self.frame_ctx.borrow_mut().start(&mut scheduler);
    }

    /// Cancel the pending frame; safe to call repeatedly.
    pub fn stop(&self) {
        let mut scheduler = self.scheduler.clone();
        self.frame_ctx.borrow_mut().stop(&mut scheduler);
    }

    /// Stop, drop all entities and release the frame closure.
    pub fn dispose(&self) {
        let mut scheduler = self.scheduler.clone();
        self.frame_ctx.borrow_mut().dispose(&mut scheduler);
        self.scheduler.release();
    }

    /// Spawn a burst at CSS-pixel coordinates; returns the particle count
    /// spawned (0 under reduced motion).
    pub fn burst(&self, x: f32, y: f32, strength: f32) -> u32 {
        self.frame_ctx
            .borrow_mut()
            .renderer
            .burst(Vec2::new(x, y), strength) as u32
    }

    pub fn set_theme(&self, theme: &str) {
        let prefers_dark = dom::media_matches(DARK_SCHEME_QUERY);
        let mut fc = self.frame_ctx.borrow_mut();
        fc.renderer.set_theme(Theme::resolve(Some(theme), prefers_dark));
        if !fc.anim.is_running() && !fc.is_disposed() {
            fc.render_static();
        }
    }

    pub fn set_reduced_motion(&self, reduced: bool) {
        let mut scheduler = self.scheduler.clone();
        self.frame_ctx
            .borrow_mut()
            .set_reduced_motion(reduced, &mut scheduler);
    }

    pub fn is_running(&self) -> bool {
        self.frame_ctx.borrow().anim.is_running()
    }

    pub fn particle_count(&self) -> u32 {
        self.frame_ctx.borrow().renderer.field().particle_count() as u32
    }
}

/// Mount a particle field on the canvas with id `canvas_id`. Returns
/// `undefined` when the canvas or its 2D context is missing.
#[wasm_bindgen]
pub fn mount(canvas_id: &str) -> Option<FieldHandle> {
    match try_mount(canvas_id) {
        Ok(handle) => handle,
        Err(e) => {
            log::error!("[field] mount error: {:?}", e);
            None
        }
    }
}

fn try_mount(canvas_id: &str) -> anyhow::Result<Option<FieldHandle>> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let Some((canvas, ctx)) = dom::canvas_2d(&document, canvas_id) else {
        log::warn!("[field] #{} missing or has no 2d context; skipping", canvas_id);
        return Ok(None);
    };

    let preset = canvas
        .get_attribute(PRESET_ATTR)
        .and_then(|name| Preset::from_name(&name))
        .unwrap_or_default();
    let seed = (js_sys::Math::random() * u32::MAX as f64) as u64;
    let mut renderer = FieldRenderer::new(FieldConfig::preset(preset), seed)?;

    let reduced = dom::media_matches(REDUCED_MOTION_QUERY);
    renderer.set_reduced_motion(reduced);
    let theme = Theme::resolve(
        dom::theme_attr(&document, THEME_ATTR).as_deref(),
        dom::media_matches(DARK_SCHEME_QUERY),
    );
    renderer.set_theme(theme);
    log::info!(
        "[field] mount #{} preset={} theme={:?} reduced_motion={}",
        canvas_id,
        preset.name(),
        theme,
        reduced
    );

    let frame_ctx = Rc::new(RefCell::new(FrameContext::new(renderer, canvas.clone(), ctx)));
    let scheduler = frame::install_loop(frame_ctx.clone());
    frame_ctx.borrow_mut().sync_size();

    let handle = FieldHandle {
        frame_ctx: frame_ctx.clone(),
        scheduler: scheduler.clone(),
    };

    wire_canvas_resize(&frame_ctx);
    events::wire_input_handlers(events::InputWiring {
        canvas,
        frame_ctx: frame_ctx.clone(),
    });
    events::wire_global_keydown(frame_ctx, scheduler);
    wire_controls(&handle, &document);
    wire_reduced_motion(&handle, &document);
    wire_teardown(&handle);
    overlay::show_motion_signal(&document, reduced);

    handle.start();
    overlay::update_toggle_label(&document, TOGGLE_BUTTON_ID, handle.is_running());
    Ok(Some(handle))
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("particle-field starting");

    // Pages without the default canvas can still call `mount` themselves.
    if let Some(document) = dom::window_document() {
        if document.get_element_by_id(CANVAS_ID).is_some() {
            _ = mount(CANVAS_ID);
        }
    }
    Ok(())
}

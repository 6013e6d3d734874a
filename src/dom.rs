use crate::core::SurfaceSize;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

#[inline]
pub fn add_click_listener(
    document: &web::Document,
    element_id: &str,
    mut handler: impl FnMut() + 'static,
) {
    if let Some(el) = document.get_element_by_id(element_id) {
        let closure =
            wasm_bindgen::closure::Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
        let _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

/// Look up a canvas and its 2D context. `None` when either is unavailable so
/// the decorative layer can be skipped without failing the page.
pub fn canvas_2d(
    document: &web::Document,
    canvas_id: &str,
) -> Option<(web::HtmlCanvasElement, web::CanvasRenderingContext2d)> {
    let canvas = document
        .get_element_by_id(canvas_id)?
        .dyn_into::<web::HtmlCanvasElement>()
        .ok()?;
    let ctx = canvas
        .get_context("2d")
        .ok()
        .flatten()?
        .dyn_into::<web::CanvasRenderingContext2d>()
        .ok()?;
    Some((canvas, ctx))
}

/// Displayed CSS size of the canvas and the raw device pixel ratio.
pub fn measure_canvas(canvas: &web::HtmlCanvasElement) -> (f64, f64, f64) {
    let dpr = web::window().map(|w| w.device_pixel_ratio()).unwrap_or(1.0);
    let rect = canvas.get_bounding_client_rect();
    (rect.width(), rect.height(), dpr)
}

/// Size the backing buffer to `surface` and scale the context so drawing can
/// be authored in CSS pixels. Resizing implicitly clears the buffer.
pub fn apply_surface(
    canvas: &web::HtmlCanvasElement,
    ctx: &web::CanvasRenderingContext2d,
    surface: &SurfaceSize,
) {
    canvas.set_width(surface.device_width);
    canvas.set_height(surface.device_height);
    let dpr = surface.dpr as f64;
    if let Err(e) = ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0) {
        log::warn!("[resize] set_transform failed: {:?}", e);
    }
}

/// Evaluate a media query; false when `matchMedia` is unavailable.
pub fn media_matches(query: &str) -> bool {
    web::window()
        .and_then(|w| w.match_media(query).ok().flatten())
        .map(|m| m.matches())
        .unwrap_or(false)
}

/// The page's persisted theme flag (`<html data-theme=…>`), if any.
pub fn theme_attr(document: &web::Document, attr: &str) -> Option<String> {
    document.document_element()?.get_attribute(attr)
}

use crate::constants::MOTION_SIGNAL_SELECTOR;
use web_sys as web;

/// Reflect the active motion mode in the page's status badge, if present.
#[inline]
pub fn show_motion_signal(document: &web::Document, reduced: bool) {
    if let Ok(Some(el)) = document.query_selector(MOTION_SIGNAL_SELECTOR) {
        el.set_text_content(Some(if reduced { "reduced" } else { "full" }));
    }
}

/// Label the pause/resume control with the action it will perform next.
#[inline]
pub fn update_toggle_label(document: &web::Document, element_id: &str, running: bool) {
    if let Some(el) = document.get_element_by_id(element_id) {
        el.set_text_content(Some(if running { "Pause" } else { "Resume" }));
        _ = el.set_attribute("aria-pressed", if running { "false" } else { "true" });
    }
}

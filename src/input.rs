use glam::Vec2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    BurstCenter,
    TogglePause,
    Clear,
}

#[inline]
pub fn action_for_key(key: &str) -> Option<KeyAction> {
    match key {
        "b" | "B" => Some(KeyAction::BurstCenter),
        " " => Some(KeyAction::TogglePause),
        "c" | "C" => Some(KeyAction::Clear),
        _ => None,
    }
}

/// Map a client-space point into the canvas's CSS-pixel space given its
/// bounding rect. Returns `None` for a collapsed rect or a point outside it.
#[inline]
pub fn css_point_in_rect(client: Vec2, rect_origin: Vec2, rect_size: Vec2) -> Option<Vec2> {
    if !(rect_size.x > 0.0 && rect_size.y > 0.0) || !client.is_finite() {
        return None;
    }
    let local = client - rect_origin;
    let inside =
        local.x >= 0.0 && local.y >= 0.0 && local.x <= rect_size.x && local.y <= rect_size.y;
    inside.then_some(local)
}

/// Pressure to feed the burst strength. Mice report a constant 0.5 while a
/// button is held, so they are treated as pressure-less.
#[inline]
pub fn pointer_pressure(pointer_type: &str, pressure: f32) -> f32 {
    if pointer_type == "mouse" {
        0.0
    } else {
        pressure
    }
}

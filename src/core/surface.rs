use super::constants::DPR_CAP;
use glam::Vec2;

/// Backing-buffer geometry for one canvas.
///
/// Drawing is authored in CSS pixels; the context transform scales by `dpr`
/// so the device buffer stays sharp. `device == round(css * dpr)` holds after
/// every [`SurfaceSize::compute`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SurfaceSize {
    pub css_width: f32,
    pub css_height: f32,
    pub dpr: f32,
    pub device_width: u32,
    pub device_height: u32,
}

impl SurfaceSize {
    /// Derive the backing size from the displayed size and the raw
    /// `devicePixelRatio`, capping the ratio at [`DPR_CAP`].
    pub fn compute(css_width: f64, css_height: f64, raw_dpr: f64) -> Self {
        let dpr = effective_dpr(raw_dpr);
        let css_width = sanitize_extent(css_width);
        let css_height = sanitize_extent(css_height);
        Self {
            css_width: css_width as f32,
            css_height: css_height as f32,
            dpr: dpr as f32,
            device_width: (css_width * dpr).round() as u32,
            device_height: (css_height * dpr).round() as u32,
        }
    }

    /// True while layout reports a collapsed element; nothing should be drawn.
    pub fn is_empty(&self) -> bool {
        self.device_width == 0 || self.device_height == 0
    }

    pub fn css_size(&self) -> Vec2 {
        Vec2::new(self.css_width, self.css_height)
    }

    pub fn center(&self) -> Vec2 {
        self.css_size() * 0.5
    }

    /// Half of the shorter side, the reference length for radial layers.
    pub fn half_min(&self) -> f32 {
        self.css_width.min(self.css_height) * 0.5
    }

    /// Distance from the centre to a corner.
    pub fn half_diagonal(&self) -> f32 {
        self.center().length()
    }
}

#[inline]
pub fn effective_dpr(raw: f64) -> f64 {
    if raw.is_finite() && raw > 0.0 {
        raw.min(DPR_CAP)
    } else {
        1.0
    }
}

#[inline]
fn sanitize_extent(v: f64) -> f64 {
    if v.is_finite() && v > 0.0 {
        v
    } else {
        0.0
    }
}

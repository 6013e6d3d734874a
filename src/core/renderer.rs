use super::compositor::{Compositor, Painter};
use super::config::{ConfigError, FieldConfig, Palette, Theme};
use super::constants::{MAX_DT_SCALE, NOMINAL_FRAME};
use super::field::ParticleField;
use super::lifecycle::IntervalTimer;
use super::surface::SurfaceSize;
use glam::Vec2;
use std::time::Duration;

/// One particle field instance: store, compositor, surface and display flags.
///
/// Typical usage:
/// - Construct with `FieldRenderer::new(config, seed)`
/// - Call `resize` on mount and whenever the canvas layout changes
/// - Call `tick(elapsed, painter)` once per animation frame, or
///   `render_static` when reduced motion is requested
/// - Route pointer and button input to `pointer_down` / `burst`
pub struct FieldRenderer {
    field: ParticleField,
    compositor: Compositor,
    surface: SurfaceSize,
    theme: Theme,
    palette: Palette,
    reduced_motion: bool,
    disposed: bool,
    reseed: Option<(IntervalTimer, usize)>,
    frames: u64,
}

impl FieldRenderer {
    pub fn new(config: FieldConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        let compositor = Compositor::new(&config);
        let reseed = config
            .reseed
            .map(|r| (IntervalTimer::new(r.interval), r.count));
        let theme = Theme::default();
        Ok(Self {
            field: ParticleField::new(config, seed),
            compositor,
            surface: SurfaceSize::default(),
            theme,
            palette: theme.palette(),
            reduced_motion: false,
            disposed: false,
            reseed,
            frames: 0,
        })
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    pub fn field_mut(&mut self) -> &mut ParticleField {
        &mut self.field
    }

    pub fn compositor(&self) -> &Compositor {
        &self.compositor
    }

    pub fn surface(&self) -> &SurfaceSize {
        &self.surface
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
        self.palette = theme.palette();
    }

    pub fn reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    pub fn set_reduced_motion(&mut self, reduced: bool) {
        self.reduced_motion = reduced;
    }

    /// Re-derive the surface and reseed the ambient population; positions
    /// from the previous buffer are meaningless after a resize.
    pub fn resize(&mut self, css_width: f64, css_height: f64, dpr: f64) -> SurfaceSize {
        let surface = SurfaceSize::compute(css_width, css_height, dpr);
        self.surface = surface;
        self.field.set_bounds(surface.css_size());
        self.field.clear();
        if let Some((timer, _)) = &mut self.reseed {
            timer.reset();
        }
        if surface.is_empty() {
            log::debug!("[resize] collapsed surface, field left empty");
        } else {
            let n = self.field.config().ambient_count;
            self.field.spawn_ambient(n);
            log::debug!(
                "[resize] css={}x{} device={}x{} dpr={:.2} seeded={}",
                surface.css_width,
                surface.css_height,
                surface.device_width,
                surface.device_height,
                surface.dpr,
                n
            );
        }
        surface
    }

    /// Impact burst at `pos` (CSS px). Suppressed under reduced motion and
    /// after `dispose`.
    pub fn burst(&mut self, pos: Vec2, strength: f32) -> usize {
        if self.reduced_motion || self.disposed {
            return 0;
        }
        self.field.spawn_burst(pos, strength)
    }

    /// Pointer-down feedback; `pressure` of 0 maps to the configured default
    /// strength. Callers pass 0 for mice, whose reported pressure is fixed.
    pub fn pointer_down(&mut self, pos: Vec2, pressure: f32) -> usize {
        let base = self.field.config().pointer_strength;
        let strength = if pressure.is_finite() && pressure > 0.0 {
            base * (0.6 + pressure)
        } else {
            base
        };
        self.burst(pos, strength)
    }

    /// Burst at the surface centre, used by buttons and the keyboard.
    pub fn burst_center(&mut self, strength: f32) -> usize {
        let c = self.surface.center();
        self.burst(c, strength)
    }

    pub fn clear(&mut self) {
        self.field.clear();
    }

    /// Drop all entities for good; later bursts are ignored.
    pub fn dispose(&mut self) {
        self.field.clear();
        self.disposed = true;
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Advance and draw one animated frame. `elapsed` is wall time since the
    /// previous frame.
    pub fn tick<P: Painter + ?Sized>(&mut self, elapsed: Duration, painter: &mut P) {
        let dt = frame_scale(elapsed);
        if let Some((timer, count)) = &mut self.reseed {
            if timer.tick(elapsed) && !self.surface.is_empty() {
                self.field.spawn_ambient(*count);
            }
        }
        self.field.advance(dt);
        self.compositor
            .compose(painter, &self.field, &self.surface, &self.palette, dt);
        self.frames += 1;
    }

    pub fn render_static<P: Painter + ?Sized>(&self, painter: &mut P) {
        self.compositor
            .compose_static(painter, &self.field, &self.surface, &self.palette);
    }
}

/// Wall-clock delta expressed in nominal 60 Hz ticks, clamped.
#[inline]
pub fn frame_scale(elapsed: Duration) -> f32 {
    (elapsed.as_secs_f32() / NOMINAL_FRAME.as_secs_f32()).clamp(0.0, MAX_DT_SCALE)
}

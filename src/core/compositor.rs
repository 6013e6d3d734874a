use super::config::{FieldConfig, Layers, Palette, Rgba};
use super::constants::*;
use super::field::{Category, ParticleField, ParticleKind};
use super::surface::SurfaceSize;
use glam::Vec2;
use std::f32::consts::TAU;

/// Drawing seam between the compositor and a concrete 2D context.
///
/// Coordinates and widths are CSS pixels; implementors apply the DPR.
pub trait Painter {
    fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: Rgba);
    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Rgba);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba);
    fn stroke_circle(&mut self, center: Vec2, radius: f32, width: f32, color: Rgba);
    /// Radial gradient from `inner` at the centre to `outer` at `radius`.
    fn radial_glow(&mut self, center: Vec2, radius: f32, inner: Rgba, outer: Rgba);
    fn fill_wedge(&mut self, center: Vec2, radius: f32, start: f32, end: f32, color: Rgba);
}

/// Per-frame layer compositing plus the sweep angle it animates.
#[derive(Clone, Debug)]
pub struct Compositor {
    layers: Layers,
    trail_alpha: f32,
    grid_spacing: f32,
    sweep_speed: f32,
    sweep_angle: f32,
}

impl Compositor {
    pub fn new(config: &FieldConfig) -> Self {
        Self {
            layers: config.layers,
            trail_alpha: config.trail_alpha.clamp(TRAIL_ALPHA_MIN, TRAIL_ALPHA_MAX),
            grid_spacing: config.grid_spacing,
            sweep_speed: config.sweep_speed,
            sweep_angle: 0.0,
        }
    }

    pub fn sweep_angle(&self) -> f32 {
        self.sweep_angle
    }

    pub fn layers(&self) -> Layers {
        self.layers
    }

    /// Draw one animated frame: trail fill, decoration, entities, overlays.
    pub fn compose<P: Painter + ?Sized>(
        &mut self,
        painter: &mut P,
        field: &ParticleField,
        surface: &SurfaceSize,
        palette: &Palette,
        dt: f32,
    ) {
        if surface.is_empty() {
            return;
        }
        // Translucent fill leaves motion trails; a hard clear would drop them.
        painter.fill_rect(
            Vec2::ZERO,
            surface.css_size(),
            palette.background.with_alpha(self.trail_alpha),
        );
        self.draw_decoration(painter, surface, palette);
        draw_entities(painter, field, palette);
        if self.layers.sweep {
            self.draw_sweep(painter, surface, palette);
            let dt = if dt.is_finite() { dt.clamp(0.0, MAX_DT_SCALE) } else { 1.0 };
            self.sweep_angle = (self.sweep_angle + self.sweep_speed * dt).rem_euclid(TAU);
        }
        if self.layers.vignette {
            draw_vignette(painter, surface, palette);
        }
    }

    /// Single still frame for reduced motion: opaque background, decoration,
    /// the current entity snapshot and the vignette. The sweep is frozen.
    pub fn compose_static<P: Painter + ?Sized>(
        &self,
        painter: &mut P,
        field: &ParticleField,
        surface: &SurfaceSize,
        palette: &Palette,
    ) {
        if surface.is_empty() {
            return;
        }
        painter.fill_rect(Vec2::ZERO, surface.css_size(), palette.background);
        self.draw_decoration(painter, surface, palette);
        draw_entities(painter, field, palette);
        if self.layers.vignette {
            draw_vignette(painter, surface, palette);
        }
    }

    fn draw_decoration<P: Painter + ?Sized>(
        &self,
        painter: &mut P,
        surface: &SurfaceSize,
        palette: &Palette,
    ) {
        let size = surface.css_size();
        if self.layers.grid && self.grid_spacing > 0.0 {
            let color = palette.grid.with_alpha(GRID_ALPHA);
            let mut x = self.grid_spacing;
            while x < size.x {
                let (from, to) = (Vec2::new(x, 0.0), Vec2::new(x, size.y));
                painter.stroke_line(from, to, GRID_LINE_WIDTH, color);
                x += self.grid_spacing;
            }
            let mut y = self.grid_spacing;
            while y < size.y {
                let (from, to) = (Vec2::new(0.0, y), Vec2::new(size.x, y));
                painter.stroke_line(from, to, GRID_LINE_WIDTH, color);
                y += self.grid_spacing;
            }
        }
        let half = surface.half_min();
        if self.layers.radar && half > 0.0 {
            let color = palette.accent.with_alpha(0.22);
            for i in 1..=RADAR_RING_COUNT {
                let r = half * i as f32 / RADAR_RING_COUNT as f32;
                painter.stroke_circle(surface.center(), r, GRID_LINE_WIDTH, color);
            }
            let c = surface.center();
            let (dx, dy) = (Vec2::new(half, 0.0), Vec2::new(0.0, half));
            painter.stroke_line(c - dx, c + dx, GRID_LINE_WIDTH, color);
            painter.stroke_line(c - dy, c + dy, GRID_LINE_WIDTH, color);
        }
        if self.layers.core_glow && half > 0.0 {
            painter.radial_glow(
                surface.center(),
                half * 0.7,
                palette.hot.with_alpha(0.18),
                palette.hot.with_alpha(0.0),
            );
        }
    }

    fn draw_sweep<P: Painter + ?Sized>(
        &self,
        painter: &mut P,
        surface: &SurfaceSize,
        palette: &Palette,
    ) {
        let radius = surface.half_diagonal();
        if radius <= 0.0 {
            return;
        }
        painter.fill_wedge(
            surface.center(),
            radius,
            self.sweep_angle - SWEEP_WEDGE_RAD,
            self.sweep_angle,
            palette.accent.with_alpha(SWEEP_ALPHA),
        );
        let tip = surface.center() + Vec2::from_angle(self.sweep_angle) * radius;
        painter.stroke_line(surface.center(), tip, GRID_LINE_WIDTH, palette.accent.with_alpha(0.5));
    }
}

// Particles and rings share one step so impact feedback sits above decoration.
fn draw_entities<P: Painter + ?Sized>(painter: &mut P, field: &ParticleField, palette: &Palette) {
    for p in field.particles() {
        let base = match p.category {
            Category::Hot => palette.hot,
            Category::Cold => palette.cold,
        };
        let color = base.with_alpha(p.life_fraction());
        let size = p.size.max(0.0);
        match p.kind {
            ParticleKind::Ambient => painter.fill_circle(p.pos, size, color),
            ParticleKind::Debris => {
                let tail = p.pos - p.vel * DEBRIS_STREAK;
                painter.stroke_line(tail, p.pos, size, color);
            }
        }
    }
    for r in field.rings() {
        if r.radius.is_finite() && r.radius >= 0.0 {
            let color = palette.accent.with_alpha(r.opacity);
            painter.stroke_circle(r.origin, r.radius, RING_LINE_WIDTH, color);
        }
    }
}

fn draw_vignette<P: Painter + ?Sized>(painter: &mut P, surface: &SurfaceSize, palette: &Palette) {
    let radius = surface.half_diagonal();
    if radius > 0.0 {
        painter.radial_glow(
            surface.center(),
            radius,
            Rgba::TRANSPARENT,
            palette.background.with_alpha(VIGNETTE_ALPHA),
        );
    }
}

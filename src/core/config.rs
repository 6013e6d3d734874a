use super::constants::*;
use rand::distributions::uniform::SampleUniform;
use rand::Rng;
use std::time::Duration;
use thiserror::Error;

/// Straight-alpha colour as consumed by the canvas `fillStyle`/`strokeStyle`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0.0);

    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Same colour with alpha replaced; alpha is clamped to \[0, 1\].
    pub fn with_alpha(self, a: f32) -> Self {
        let a = if a.is_finite() { a.clamp(0.0, 1.0) } else { 0.0 };
        Self { a, ..self }
    }

    pub fn to_css(self) -> String {
        format!("rgba({},{},{},{:.3})", self.r, self.g, self.b, self.a)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    /// Parse the page's persisted theme attribute. `auto` and unknown values
    /// resolve through `prefers_dark`.
    pub fn resolve(attr: Option<&str>, prefers_dark: bool) -> Theme {
        match attr.map(str::trim) {
            Some(s) if s.eq_ignore_ascii_case("dark") => Theme::Dark,
            Some(s) if s.eq_ignore_ascii_case("light") => Theme::Light,
            _ if prefers_dark => Theme::Dark,
            _ => Theme::Light,
        }
    }

    pub fn palette(self) -> Palette {
        match self {
            Theme::Dark => Palette {
                background: Rgba::opaque(7, 10, 18),
                hot: Rgba::opaque(255, 120, 72),
                cold: Rgba::opaque(88, 196, 255),
                grid: Rgba::opaque(120, 160, 210),
                accent: Rgba::opaque(96, 255, 180),
            },
            Theme::Light => Palette {
                background: Rgba::opaque(244, 246, 250),
                hot: Rgba::opaque(220, 76, 40),
                cold: Rgba::opaque(30, 110, 200),
                grid: Rgba::opaque(60, 80, 110),
                accent: Rgba::opaque(0, 150, 110),
            },
        }
    }
}

/// Theme-dependent colours used by the compositor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
    pub background: Rgba,
    pub hot: Rgba,
    pub cold: Rgba,
    pub grid: Rgba,
    pub accent: Rgba,
}

/// Inclusive sampling span.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Span<T> {
    pub min: T,
    pub max: T,
}

impl<T: SampleUniform + PartialOrd + Copy> Span<T> {
    pub const fn new(min: T, max: T) -> Self {
        Self { min, max }
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> T {
        if self.min < self.max {
            rng.gen_range(self.min..=self.max)
        } else {
            self.min
        }
    }
}

/// Fractional sub-rectangle of the surface used to bias ambient spawns.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Region {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
}

impl Region {
    pub const FULL: Region = Region {
        x0: 0.0,
        y0: 0.0,
        x1: 1.0,
        y1: 1.0,
    };
}

/// Optional decorative layers, drawn in a fixed order around the particles.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Layers {
    pub grid: bool,
    pub radar: bool,
    pub core_glow: bool,
    pub sweep: bool,
    pub vignette: bool,
}

impl Default for Layers {
    fn default() -> Self {
        Self {
            grid: true,
            radar: false,
            core_glow: false,
            sweep: false,
            vignette: true,
        }
    }
}

/// Timer-driven top-up of the ambient population.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Reseed {
    pub interval: Duration,
    pub count: usize,
}

/// Tunables for one particle field instance.
///
/// Spans are sampled uniformly per entity. Speeds are CSS pixels per nominal
/// tick, lives are in ticks.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldConfig {
    pub ambient_count: usize,
    pub ambient_speed: Span<f32>,
    pub ambient_life: Span<u32>,
    pub ambient_region: Region,
    pub size: Span<f32>,
    pub hot_ratio: f32,

    pub burst_count: usize,
    pub burst_speed: Span<f32>,
    pub burst_life: Span<u32>,
    pub burst_size: Span<f32>,
    pub drag: f32,
    pub pointer_strength: f32,

    pub ring_growth: f32,
    pub ring_decay: f32,

    pub max_particles: usize,
    pub max_rings: usize,

    pub trail_alpha: f32,
    pub grid_spacing: f32,
    pub sweep_speed: f32,
    pub layers: Layers,
    pub reseed: Option<Reseed>,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            ambient_count: DEFAULT_AMBIENT_COUNT,
            ambient_speed: Span::new(0.05, 0.45),
            ambient_life: Span::new(120, 280),
            ambient_region: Region::FULL,
            size: Span::new(0.6, 2.2),
            hot_ratio: 0.35,

            burst_count: DEFAULT_BURST_COUNT,
            burst_speed: Span::new(1.2, 3.6),
            burst_life: Span::new(28, 64),
            burst_size: Span::new(0.8, 2.6),
            drag: 0.95,
            pointer_strength: 1.0,

            ring_growth: 2.4,
            ring_decay: 0.025,

            max_particles: DEFAULT_MAX_PARTICLES,
            max_rings: DEFAULT_MAX_RINGS,

            trail_alpha: 0.2,
            grid_spacing: 48.0,
            sweep_speed: 0.02,
            layers: Layers::default(),
            reseed: None,
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{name} span is inverted or not finite ({min}..={max})")]
    InvalidSpan {
        name: &'static str,
        min: f32,
        max: f32,
    },
    #[error("{name} must be within {lo}..={hi}, got {value}")]
    OutOfRange {
        name: &'static str,
        value: f32,
        lo: f32,
        hi: f32,
    },
    #[error("{0} must be greater than zero")]
    Zero(&'static str),
}

fn check_span(name: &'static str, s: Span<f32>, hi: f32) -> Result<(), ConfigError> {
    if !(s.min.is_finite() && s.max.is_finite() && s.min >= 0.0 && s.min <= s.max) {
        return Err(ConfigError::InvalidSpan {
            name,
            min: s.min,
            max: s.max,
        });
    }
    if s.max > hi {
        return Err(ConfigError::OutOfRange {
            name,
            value: s.max,
            lo: 0.0,
            hi,
        });
    }
    Ok(())
}

fn check_life(name: &'static str, s: Span<u32>) -> Result<(), ConfigError> {
    if s.min == 0 {
        return Err(ConfigError::Zero(name));
    }
    if s.min > s.max {
        return Err(ConfigError::InvalidSpan {
            name,
            min: s.min as f32,
            max: s.max as f32,
        });
    }
    Ok(())
}

fn check_range(name: &'static str, value: f32, lo: f32, hi: f32) -> Result<(), ConfigError> {
    if value.is_finite() && (lo..=hi).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            name,
            value,
            lo,
            hi,
        })
    }
}

impl FieldConfig {
    /// Reject configurations that could yield negative, NaN or runaway sizes
    /// and speeds, immortal particles or rings, or a zero cap.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_span("ambient_speed", self.ambient_speed, MAX_PARTICLE_SPEED)?;
        check_span("size", self.size, MAX_PARTICLE_SIZE)?;
        check_span("burst_speed", self.burst_speed, MAX_PARTICLE_SPEED)?;
        check_span("burst_size", self.burst_size, MAX_PARTICLE_SIZE)?;
        check_life("ambient_life", self.ambient_life)?;
        check_life("burst_life", self.burst_life)?;
        check_range("hot_ratio", self.hot_ratio, 0.0, 1.0)?;
        check_range("drag", self.drag, 0.0, 1.0)?;
        check_range(
            "pointer_strength",
            self.pointer_strength,
            BURST_STRENGTH_MIN,
            BURST_STRENGTH_MAX,
        )?;
        check_range("ring_growth", self.ring_growth, 0.0, MAX_RING_GROWTH)?;
        check_range("ring_decay", self.ring_decay, MIN_RING_DECAY, 1.0)?;
        check_range("trail_alpha", self.trail_alpha, TRAIL_ALPHA_MIN, TRAIL_ALPHA_MAX)?;
        check_range("grid_spacing", self.grid_spacing, 4.0, f32::MAX)?;
        check_range("sweep_speed", self.sweep_speed, 0.0, std::f32::consts::PI)?;
        let r = self.ambient_region;
        let corners = [
            ("region.x0", r.x0),
            ("region.y0", r.y0),
            ("region.x1", r.x1),
            ("region.y1", r.y1),
        ];
        for (name, v) in corners {
            check_range(name, v, 0.0, 1.0)?;
        }
        if r.x0 > r.x1 || r.y0 > r.y1 {
            return Err(ConfigError::InvalidSpan {
                name: "ambient_region",
                min: r.x0.max(r.y0),
                max: r.x1.min(r.y1),
            });
        }
        if self.max_particles == 0 {
            return Err(ConfigError::Zero("max_particles"));
        }
        if self.max_rings == 0 {
            return Err(ConfigError::Zero("max_rings"));
        }
        if let Some(rs) = self.reseed {
            if rs.interval.is_zero() {
                return Err(ConfigError::Zero("reseed.interval"));
            }
        }
        Ok(())
    }

    pub fn preset(preset: Preset) -> Self {
        let base = FieldConfig::default();
        match preset {
            Preset::Radar => FieldConfig {
                ambient_count: 120,
                hot_ratio: 0.2,
                layers: Layers {
                    grid: true,
                    radar: true,
                    core_glow: false,
                    sweep: true,
                    vignette: true,
                },
                ..base
            },
            Preset::Rift => FieldConfig {
                ambient_count: 200,
                ambient_speed: Span::new(0.2, 0.9),
                ambient_life: Span::new(60, 200),
                ambient_region: Region {
                    x0: 0.0,
                    y0: 0.35,
                    x1: 1.0,
                    y1: 0.65,
                },
                hot_ratio: 0.5,
                burst_count: 28,
                drag: 0.92,
                trail_alpha: 0.24,
                layers: Layers {
                    grid: false,
                    radar: false,
                    core_glow: true,
                    sweep: false,
                    vignette: true,
                },
                ..base
            },
            Preset::Drift => FieldConfig {
                ambient_count: 160,
                ambient_speed: Span::new(0.05, 0.25),
                size: Span::new(0.8, 3.0),
                hot_ratio: 0.1,
                trail_alpha: 0.18,
                layers: Layers {
                    grid: false,
                    radar: false,
                    core_glow: true,
                    sweep: false,
                    vignette: true,
                },
                reseed: Some(Reseed {
                    interval: Duration::from_millis(2000),
                    count: 24,
                }),
                ..base
            },
        }
    }
}

/// Effect families the field can be dressed as.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Preset {
    #[default]
    Radar,
    Rift,
    Drift,
}

impl Preset {
    pub fn all() -> [Preset; 3] {
        [Preset::Radar, Preset::Rift, Preset::Drift]
    }

    pub fn name(self) -> &'static str {
        match self {
            Preset::Radar => "radar",
            Preset::Rift => "rift",
            Preset::Drift => "drift",
        }
    }

    pub fn from_name(name: &str) -> Option<Preset> {
        let name = name.trim();
        Preset::all()
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(name))
    }
}

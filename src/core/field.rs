use super::config::{FieldConfig, Region};
use super::constants::*;
use glam::Vec2;
use rand::prelude::*;
use std::f32::consts::TAU;

/// Render colour family; has no effect on motion.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Category {
    Hot,
    Cold,
}

/// Ambient particles wrap around the surface to keep it populated; burst
/// debris is dropped once it leaves the despawn margin.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParticleKind {
    Ambient,
    Debris,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub life: u32,
    pub max_life: u32,
    pub size: f32,
    pub category: Category,
    pub kind: ParticleKind,
}

impl Particle {
    /// Remaining life as a 0..1 fraction, used for fade-out.
    pub fn life_fraction(&self) -> f32 {
        if self.max_life == 0 {
            0.0
        } else {
            (self.life as f32 / self.max_life as f32).clamp(0.0, 1.0)
        }
    }
}

/// Expanding shock ring spawned by impacts.
#[derive(Clone, Debug, PartialEq)]
pub struct Ring {
    pub origin: Vec2,
    pub radius: f32,
    pub opacity: f32,
    pub growth: f32,
    pub decay: f32,
}

/// Owned store of live particles and rings.
///
/// Coordinates are CSS pixels inside `bounds`. The store is capped; pushing
/// past `max_particles`/`max_rings` evicts the oldest entries.
pub struct ParticleField {
    particles: Vec<Particle>,
    rings: Vec<Ring>,
    bounds: Vec2,
    config: FieldConfig,
    rng: StdRng,
}

impl ParticleField {
    pub fn new(config: FieldConfig, seed: u64) -> Self {
        Self {
            particles: Vec::with_capacity(config.ambient_count),
            rings: Vec::new(),
            bounds: Vec2::ZERO,
            config,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn bounds(&self) -> Vec2 {
        self.bounds
    }

    pub fn set_bounds(&mut self, bounds: Vec2) {
        self.bounds = bounds.max(Vec2::ZERO);
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn rings(&self) -> &[Ring] {
        &self.rings
    }

    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    pub fn ring_count(&self) -> usize {
        self.rings.len()
    }

    /// Total live entities (particles and rings).
    pub fn len(&self) -> usize {
        self.particles.len() + self.rings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty() && self.rings.is_empty()
    }

    pub fn clear(&mut self) {
        self.particles.clear();
        self.rings.clear();
    }

    /// Push a fully specified particle, honouring the cap.
    pub fn insert(&mut self, particle: Particle) {
        self.particles.push(particle);
        self.enforce_caps();
    }

    /// Seed `n` ambient particles across the configured spawn region.
    pub fn spawn_ambient(&mut self, n: usize) {
        let Region { x0, y0, x1, y1 } = self.config.ambient_region;
        let min = Vec2::new(x0, y0) * self.bounds;
        let max = Vec2::new(x1, y1) * self.bounds;
        self.particles.reserve(n);
        for _ in 0..n {
            let pos = Vec2::new(
                lerp(min.x, max.x, self.rng.gen::<f32>()),
                lerp(min.y, max.y, self.rng.gen::<f32>()),
            );
            let speed = self.config.ambient_speed.sample(&mut self.rng);
            let life = self.config.ambient_life.sample(&mut self.rng).max(1);
            let particle = Particle {
                pos,
                vel: random_direction(&mut self.rng) * speed,
                life,
                max_life: life,
                size: self.config.size.sample(&mut self.rng),
                category: self.pick_category(),
                kind: ParticleKind::Ambient,
            };
            self.particles.push(particle);
        }
        self.enforce_caps();
    }

    /// Emit an impact burst at `origin` plus one shock ring. Returns the
    /// number of particles spawned (0 when `origin` is not finite).
    pub fn spawn_burst(&mut self, origin: Vec2, strength: f32) -> usize {
        if !origin.is_finite() {
            log::warn!("[field] burst rejected: non-finite origin {:?}", origin);
            return 0;
        }
        let strength = clamp_strength(strength);
        let n = self.config.burst_count;
        self.particles.reserve(n);
        for _ in 0..n {
            let speed = self.config.burst_speed.sample(&mut self.rng) * strength;
            let life = self.config.burst_life.sample(&mut self.rng).max(1);
            let particle = Particle {
                pos: origin,
                vel: random_direction(&mut self.rng) * speed,
                life,
                max_life: life,
                size: self.config.burst_size.sample(&mut self.rng),
                category: self.pick_category(),
                kind: ParticleKind::Debris,
            };
            self.particles.push(particle);
        }
        self.rings.push(Ring {
            origin,
            radius: RING_START_RADIUS,
            opacity: RING_START_OPACITY,
            growth: self.config.ring_growth * strength,
            decay: self.config.ring_decay,
        });
        self.enforce_caps();
        n
    }

    /// Advance every entity by one tick. `dt` scales motion relative to a
    /// nominal 60 Hz frame; particle life and ring opacity always decay by
    /// one tick.
    pub fn advance(&mut self, dt: f32) {
        let dt = if dt.is_finite() {
            dt.clamp(0.0, MAX_DT_SCALE)
        } else {
            1.0
        };
        let bounds = self.bounds;
        let drag = self.config.drag.powf(dt);

        for p in &mut self.particles {
            p.pos += p.vel * dt;
            p.life = p.life.saturating_sub(1);
            match p.kind {
                ParticleKind::Ambient => wrap(&mut p.pos, bounds),
                ParticleKind::Debris => {
                    p.vel *= drag;
                    let sized = bounds.x > 0.0 && bounds.y > 0.0;
                    if sized && outside(p.pos, bounds, DESPAWN_MARGIN) {
                        p.life = 0;
                    }
                }
            }
        }
        // Fading is tick-counted like particle life; only growth follows dt.
        for r in &mut self.rings {
            r.radius += r.growth * dt;
            r.opacity -= r.decay;
        }

        self.particles.retain(|p| p.life > 0);
        self.rings.retain(|r| r.opacity > 0.0);
    }

    fn pick_category(&mut self) -> Category {
        if self.rng.gen::<f32>() < self.config.hot_ratio {
            Category::Hot
        } else {
            Category::Cold
        }
    }

    fn enforce_caps(&mut self) {
        let max_p = self.config.max_particles;
        if self.particles.len() > max_p {
            let excess = self.particles.len() - max_p;
            self.particles.drain(..excess);
            log::debug!("[field] evicted {} oldest particles", excess);
        }
        let max_r = self.config.max_rings;
        if self.rings.len() > max_r {
            let excess = self.rings.len() - max_r;
            self.rings.drain(..excess);
        }
    }
}

/// Clamp a requested burst strength into the supported band; non-finite
/// requests fall back to 1.0.
#[inline]
pub fn clamp_strength(strength: f32) -> f32 {
    if strength.is_finite() {
        strength.clamp(BURST_STRENGTH_MIN, BURST_STRENGTH_MAX)
    } else {
        1.0
    }
}

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[inline]
fn random_direction<R: Rng + ?Sized>(rng: &mut R) -> Vec2 {
    Vec2::from_angle(rng.gen::<f32>() * TAU)
}

#[inline]
fn outside(pos: Vec2, bounds: Vec2, margin: f32) -> bool {
    pos.x < -margin || pos.y < -margin || pos.x > bounds.x + margin || pos.y > bounds.y + margin
}

// Toroidal wrap with a small margin so particles leave the edge before
// re-entering on the far side. Any overshoot folds back into range. A
// collapsed axis is left alone.
#[inline]
fn wrap(pos: &mut Vec2, bounds: Vec2) {
    pos.x = wrap_axis(pos.x, bounds.x);
    pos.y = wrap_axis(pos.y, bounds.y);
}

#[inline]
fn wrap_axis(v: f32, extent: f32) -> f32 {
    if extent <= 0.0 || (-WRAP_MARGIN..=extent + WRAP_MARGIN).contains(&v) {
        return v;
    }
    (v + WRAP_MARGIN).rem_euclid(extent + 2.0 * WRAP_MARGIN) - WRAP_MARGIN
}

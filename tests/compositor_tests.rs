// Host-side tests for frame compositing order and edge cases.

mod common;

use common::field_core::compositor::*;
use common::field_core::config::*;
use common::field_core::constants::*;
use common::field_core::field::*;
use common::field_core::surface::SurfaceSize;
use common::{Op, RecordingPainter};
use glam::Vec2;
use std::f32::consts::TAU;

fn radar_config() -> FieldConfig {
    FieldConfig {
        burst_count: 0,
        ..FieldConfig::preset(Preset::Radar)
    }
}

fn field_with_dot_and_ring(config: FieldConfig, surface: &SurfaceSize) -> ParticleField {
    let mut field = ParticleField::new(config, 5);
    field.set_bounds(surface.css_size());
    field.insert(Particle {
        pos: Vec2::new(20.0, 20.0),
        vel: Vec2::ZERO,
        life: 5,
        max_life: 10,
        size: 2.0,
        category: Category::Hot,
        kind: ParticleKind::Ambient,
    });
    field.spawn_burst(Vec2::new(100.0, 50.0), 1.0);
    field
}

#[test]
fn layers_are_drawn_in_fixed_order() {
    let config = radar_config();
    let surface = SurfaceSize::compute(200.0, 100.0, 1.0);
    let field = field_with_dot_and_ring(config.clone(), &surface);
    let palette = Theme::Dark.palette();
    let mut compositor = Compositor::new(&config);
    let mut painter = RecordingPainter::default();

    compositor.compose(&mut painter, &field, &surface, &palette, 1.0);

    let mut expected = vec!["rect"];
    expected.extend(["line"; 6]); // grid: 4 vertical + 2 horizontal at 48px spacing
    expected.extend(["stroke_circle"; RADAR_RING_COUNT]);
    expected.extend(["line"; 2]); // radar cross-hair
    expected.push("circle"); // ambient particle
    expected.push("stroke_circle"); // shock ring
    expected.extend(["wedge", "line"]); // sweep
    expected.push("glow"); // vignette
    assert_eq!(painter.kinds(), expected);
}

#[test]
fn trail_fill_is_translucent_background() {
    let config = FieldConfig::default();
    let surface = SurfaceSize::compute(300.0, 150.0, 2.0);
    let field = ParticleField::new(config.clone(), 1);
    let palette = Theme::Dark.palette();
    let mut painter = RecordingPainter::default();

    Compositor::new(&config).compose(&mut painter, &field, &surface, &palette, 1.0);

    match &painter.ops[0] {
        Op::Rect { origin, size, color } => {
            assert_eq!(*origin, Vec2::ZERO);
            assert_eq!(*size, Vec2::new(300.0, 150.0));
            assert_eq!(*color, palette.background.with_alpha(config.trail_alpha));
            assert!(color.a >= TRAIL_ALPHA_MIN && color.a <= TRAIL_ALPHA_MAX);
        }
        other => panic!("expected trail fill first, got {:?}", other),
    }
}

#[test]
fn zero_sized_surface_draws_nothing() {
    let config = radar_config();
    let surface = SurfaceSize::compute(0.0, 0.0, 2.0);
    let field = ParticleField::new(config.clone(), 1);
    let palette = Theme::Dark.palette();
    let mut compositor = Compositor::new(&config);
    let mut painter = RecordingPainter::default();

    compositor.compose(&mut painter, &field, &surface, &palette, 1.0);
    compositor.compose_static(&mut painter, &field, &surface, &palette);
    assert!(painter.ops.is_empty());
    assert_eq!(compositor.sweep_angle(), 0.0);
}

#[test]
fn sweep_advances_and_wraps() {
    let config = radar_config();
    let surface = SurfaceSize::compute(200.0, 100.0, 1.0);
    let field = ParticleField::new(config.clone(), 1);
    let palette = Theme::Dark.palette();
    let mut compositor = Compositor::new(&config);
    let mut painter = RecordingPainter::default();

    compositor.compose(&mut painter, &field, &surface, &palette, 1.0);
    assert!((compositor.sweep_angle() - config.sweep_speed).abs() < 1e-6);

    compositor.compose(&mut painter, &field, &surface, &palette, f32::NAN);
    assert!((compositor.sweep_angle() - 2.0 * config.sweep_speed).abs() < 1e-6);

    for _ in 0..1000 {
        compositor.compose(&mut painter, &field, &surface, &palette, 3.0);
        let a = compositor.sweep_angle();
        assert!((0.0..TAU).contains(&a), "angle {}", a);
    }
}

#[test]
fn static_frame_is_opaque_and_frozen() {
    let config = radar_config();
    let surface = SurfaceSize::compute(200.0, 100.0, 1.0);
    let field = field_with_dot_and_ring(config.clone(), &surface);
    let palette = Theme::Light.palette();
    let compositor = Compositor::new(&config);
    let mut painter = RecordingPainter::default();

    compositor.compose_static(&mut painter, &field, &surface, &palette);

    assert_eq!(
        painter.ops[0],
        Op::Rect {
            origin: Vec2::ZERO,
            size: Vec2::new(200.0, 100.0),
            color: palette.background,
        }
    );
    assert!(!painter.kinds().contains(&"wedge"));
    assert_eq!(compositor.sweep_angle(), 0.0);
}

#[test]
fn particle_colour_follows_category_and_fades() {
    let config = FieldConfig {
        layers: Layers {
            grid: false,
            radar: false,
            core_glow: false,
            sweep: false,
            vignette: false,
        },
        burst_count: 0,
        ..FieldConfig::default()
    };
    let surface = SurfaceSize::compute(200.0, 100.0, 1.0);
    let field = field_with_dot_and_ring(config.clone(), &surface);
    let palette = Theme::Dark.palette();
    let mut painter = RecordingPainter::default();

    Compositor::new(&config).compose(&mut painter, &field, &surface, &palette, 1.0);

    assert_eq!(painter.kinds(), vec!["rect", "circle", "stroke_circle"]);
    match &painter.ops[1] {
        Op::Circle { center, radius, color } => {
            assert_eq!(*center, Vec2::new(20.0, 20.0));
            assert_eq!(*radius, 2.0);
            assert_eq!(*color, palette.hot.with_alpha(0.5));
        }
        other => panic!("expected particle, got {:?}", other),
    }
    match &painter.ops[2] {
        Op::StrokeCircle { radius, color, .. } => {
            assert_eq!(*radius, RING_START_RADIUS);
            assert_eq!(*color, palette.accent.with_alpha(RING_START_OPACITY));
        }
        other => panic!("expected ring, got {:?}", other),
    }
}

#[test]
fn debris_draws_as_streaks() {
    let config = FieldConfig {
        layers: Layers {
            grid: false,
            radar: false,
            core_glow: false,
            sweep: false,
            vignette: false,
        },
        ..FieldConfig::default()
    };
    let surface = SurfaceSize::compute(200.0, 100.0, 1.0);
    let mut field = ParticleField::new(config.clone(), 2);
    field.set_bounds(surface.css_size());
    field.spawn_burst(Vec2::new(50.0, 50.0), 1.0);
    let mut painter = RecordingPainter::default();

    Compositor::new(&config).compose(&mut painter, &field, &surface, &Theme::Dark.palette(), 1.0);

    let lines = painter.kinds().iter().filter(|k| **k == "line").count();
    assert_eq!(lines, config.burst_count);
}

#[test]
fn grid_coarser_than_surface_draws_no_lines() {
    let config = FieldConfig {
        grid_spacing: 500.0,
        ..FieldConfig::default()
    };
    let surface = SurfaceSize::compute(200.0, 100.0, 1.0);
    let field = ParticleField::new(config.clone(), 1);
    let mut painter = RecordingPainter::default();

    Compositor::new(&config).compose(&mut painter, &field, &surface, &Theme::Dark.palette(), 1.0);

    assert_eq!(painter.kinds(), vec!["rect", "glow"]);
}

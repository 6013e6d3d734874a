// Shared host-side harness. The main crate is wasm-only, so the pure-Rust
// core modules are included directly and exercised through fakes.

#![allow(dead_code)]

pub mod field_core {
    pub mod constants {
        include!("../../src/core/constants.rs");
    }
    pub mod config {
        include!("../../src/core/config.rs");
    }
    pub mod surface {
        include!("../../src/core/surface.rs");
    }
    pub mod field {
        include!("../../src/core/field.rs");
    }
    pub mod compositor {
        include!("../../src/core/compositor.rs");
    }
    pub mod lifecycle {
        include!("../../src/core/lifecycle.rs");
    }
    pub mod renderer {
        include!("../../src/core/renderer.rs");
    }
}

use field_core::compositor::Painter;
use field_core::config::Rgba;
use field_core::lifecycle::{FrameHandle, FrameScheduler, LoopError};
use glam::Vec2;

#[derive(Clone, Debug, PartialEq)]
pub enum Op {
    Rect { origin: Vec2, size: Vec2, color: Rgba },
    Line { from: Vec2, to: Vec2, width: f32, color: Rgba },
    Circle { center: Vec2, radius: f32, color: Rgba },
    StrokeCircle { center: Vec2, radius: f32, color: Rgba },
    Glow { center: Vec2, radius: f32 },
    Wedge { start: f32, end: f32, color: Rgba },
}

impl Op {
    pub fn kind(&self) -> &'static str {
        match self {
            Op::Rect { .. } => "rect",
            Op::Line { .. } => "line",
            Op::Circle { .. } => "circle",
            Op::StrokeCircle { .. } => "stroke_circle",
            Op::Glow { .. } => "glow",
            Op::Wedge { .. } => "wedge",
        }
    }
}

/// Painter that records every call in order.
#[derive(Default)]
pub struct RecordingPainter {
    pub ops: Vec<Op>,
}

impl RecordingPainter {
    pub fn kinds(&self) -> Vec<&'static str> {
        self.ops.iter().map(Op::kind).collect()
    }
}

impl Painter for RecordingPainter {
    fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: Rgba) {
        self.ops.push(Op::Rect { origin, size, color });
    }
    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Rgba) {
        self.ops.push(Op::Line { from, to, width, color });
    }
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        self.ops.push(Op::Circle { center, radius, color });
    }
    fn stroke_circle(&mut self, center: Vec2, radius: f32, _width: f32, color: Rgba) {
        self.ops.push(Op::StrokeCircle { center, radius, color });
    }
    fn radial_glow(&mut self, center: Vec2, radius: f32, _inner: Rgba, _outer: Rgba) {
        self.ops.push(Op::Glow { center, radius });
    }
    fn fill_wedge(&mut self, _center: Vec2, _radius: f32, start: f32, end: f32, color: Rgba) {
        self.ops.push(Op::Wedge { start, end, color });
    }
}

/// Scheduler fake tracking outstanding frame handles.
#[derive(Default)]
pub struct MockScheduler {
    pub next: FrameHandle,
    pub outstanding: Vec<FrameHandle>,
    pub requests: usize,
    pub cancels: usize,
    pub fail: bool,
}

impl MockScheduler {
    /// Platform delivers the oldest pending callback.
    pub fn deliver(&mut self) -> Option<FrameHandle> {
        if self.outstanding.is_empty() {
            None
        } else {
            Some(self.outstanding.remove(0))
        }
    }
}

impl FrameScheduler for MockScheduler {
    fn request_frame(&mut self) -> Result<FrameHandle, LoopError> {
        self.requests += 1;
        if self.fail {
            return Err(LoopError::Request("mock failure".into()));
        }
        self.next += 1;
        self.outstanding.push(self.next);
        Ok(self.next)
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.cancels += 1;
        self.outstanding.retain(|h| *h != handle);
    }
}

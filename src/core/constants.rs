use std::time::Duration;

// Shared tuning constants for the particle field. Web-only ids live in
// `crate::constants`.

// Surface sizing
pub const DPR_CAP: f64 = 2.0; // bounds backing-buffer cost on dense displays

// Frame pacing
pub const NOMINAL_FRAME: Duration = Duration::from_micros(16_667); // one 60 Hz tick
pub const MAX_DT_SCALE: f32 = 3.0; // a stalled tab must not teleport particles

// Population
pub const DEFAULT_AMBIENT_COUNT: usize = 160;
pub const DEFAULT_BURST_COUNT: usize = 18;
pub const DEFAULT_MAX_PARTICLES: usize = 1200;
pub const DEFAULT_MAX_RINGS: usize = 48;

// Burst strength clamp
pub const BURST_STRENGTH_MIN: f32 = 0.6;
pub const BURST_STRENGTH_MAX: f32 = 2.2;

// Validation ceilings (CSS px per tick / CSS px)
pub const MAX_PARTICLE_SPEED: f32 = 48.0;
pub const MAX_PARTICLE_SIZE: f32 = 32.0;
pub const MAX_RING_GROWTH: f32 = 16.0;
pub const MIN_RING_DECAY: f32 = 0.002; // rings live at most 450 ticks

// Boundary margins (CSS px)
pub const WRAP_MARGIN: f32 = 24.0;
pub const DESPAWN_MARGIN: f32 = 96.0;

// Rings
pub const RING_START_RADIUS: f32 = 4.0;
pub const RING_START_OPACITY: f32 = 0.9;
pub const RING_LINE_WIDTH: f32 = 1.5;

// Compositing
pub const TRAIL_ALPHA_MIN: f32 = 0.18;
pub const TRAIL_ALPHA_MAX: f32 = 0.24;
pub const RADAR_RING_COUNT: usize = 4;
pub const SWEEP_WEDGE_RAD: f32 = 0.45;
pub const SWEEP_ALPHA: f32 = 0.14;
pub const VIGNETTE_ALPHA: f32 = 0.55;
pub const GRID_ALPHA: f32 = 0.10;
pub const GRID_LINE_WIDTH: f32 = 1.0;
pub const DEBRIS_STREAK: f32 = 2.5; // streak length in ticks of velocity

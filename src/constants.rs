// DOM hooks and media queries used by the web front-end. Host pages opt in
// by providing these ids/attributes; anything missing is skipped.

// Canvas mounted by the `#[wasm_bindgen(start)]` entry point
pub const CANVAS_ID: &str = "particle-field";

// Optional controls
pub const BURST_BUTTON_ID: &str = "field-burst";
pub const TOGGLE_BUTTON_ID: &str = "field-toggle";
pub const MOTION_SIGNAL_SELECTOR: &str = "[data-ui=\"signal-motion\"]";

// Attributes
pub const PRESET_ATTR: &str = "data-preset";
pub const THEME_ATTR: &str = "data-theme";

// Media queries
pub const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";
pub const DARK_SCHEME_QUERY: &str = "(prefers-color-scheme: dark)";

// Strength used by button and keyboard bursts
pub const CONTROL_BURST_STRENGTH: f32 = 1.4;

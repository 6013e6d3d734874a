pub mod compositor;
pub mod config;
pub mod constants;
pub mod field;
pub mod lifecycle;
pub mod renderer;
pub mod surface;

pub use compositor::*;
pub use config::*;
pub use constants::*;
pub use field::*;
pub use lifecycle::*;
pub use renderer::*;
pub use surface::*;

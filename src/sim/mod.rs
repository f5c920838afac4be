//! Deterministic simulation
//!
//! All gameplay rules live here. Given the same factory rolls, clock readings and pointer
//! samples a session plays out identically. Nothing in this module touches the terminal.

pub mod collision;
pub mod events;
pub mod motion;
pub mod session;
pub mod spawner;
pub mod world;

pub use events::{GameEvent, Outcome};
pub use motion::interpolate_depth;
pub use session::{FrameView, Session};
pub use spawner::{enemy_wave_size, powerup_hit_count};
pub use world::{World, clamp_pointer, pointer_target};

//! Application state and core logic

pub mod screen;
pub mod state;
pub mod wake;

pub use screen::{Screen, SetupField};
pub use state::App;
pub use wake::{Unsupported, WakeLock};

//! Game constants organized by domain.
//!
//! Centralizing magic numbers makes tuning easier and documents intent.
//! Constants are split into submodules by domain for easier navigation.

mod combat;
mod enemies;
mod magic;
mod player;
mod world;

// Re-export all constants at the module level
pub use combat::*;
pub use enemies::*;
pub use magic::*;
pub use player::*;
pub use world::*;

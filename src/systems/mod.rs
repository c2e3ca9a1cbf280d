//! Game systems organized by domain.
//!
//! All game logic lives here, split into focused submodules:
//! - `ai`: enemy state-machine stepping
//! - `movement`: steering application and collision resolution
//! - `player`: the player controller
//! - `magic`: spell instance upkeep
//! - `combat`: damage application and death handling
//! - `pickups`: world pickup collection
//! - `experience`: XP, leveling, kill tallies

pub mod ai;
pub mod combat;
pub mod experience;
pub mod magic;
pub mod movement;
pub mod pickups;
pub mod player;

// Re-export commonly used items
pub use combat::{resolve_combat, take_hit, update_dying};
pub use experience::{grant_xp, xp_progress};
pub use movement::{collect_obstacle_rects, normalize_or};

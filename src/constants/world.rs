//! World dimensions and the fixed simulation tick.

/// Tile edge length in pixels
pub const TILE_SIZE: f32 = 64.0;
/// World width in tiles
pub const WORLD_COLS: u32 = 20;
/// World height in tiles
pub const WORLD_ROWS: u32 = 19;

/// Simulation ticks per second
pub const FPS: u32 = 60;
/// Fixed timestep, in seconds
pub const DT: f32 = 1.0 / FPS as f32;

/// Inset from the world edge used to clamp flying enemies
pub const WORLD_MARGIN: f32 = TILE_SIZE;

/// Pickup collection hitbox edge length
pub const PICKUP_HITBOX: f32 = 28.0;
/// Exit portal hitbox edge length
pub const PORTAL_HITBOX: f32 = 40.0;
/// HP restored by a health pickup (clamped to max)
pub const HEALTH_PICKUP_HEAL: i32 = 20;

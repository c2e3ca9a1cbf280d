//! Player stats, knockback, and leveling.

/// Player's starting/maximum health
pub const PLAYER_MAX_HP: i32 = 100;
/// Player's starting/maximum mana
pub const PLAYER_MAX_MP: i32 = 60;
/// Walking speed, pixels per tick
pub const PLAYER_SPEED: f32 = 5.0;
/// Flat damage reduction; incoming hits always deal at least 1
pub const PLAYER_ARMOR: i32 = 2;
/// Mana regenerated per second (credited in whole points)
pub const PLAYER_MP_REGEN_PER_SEC: f32 = 2.0;
/// Player hitbox (width, height)
pub const PLAYER_HITBOX: (f32, f32) = (28.0, 40.0);
/// Death animation length, frames
pub const PLAYER_DEATH_FRAMES: u32 = 40;

/// Knockback push duration, frames
pub const KNOCKBACK_FRAMES: u32 = 10;
/// Knockback push distance per frame, pixels
pub const KNOCKBACK_SPEED: f32 = 8.0;
/// Collision sub-steps per knockback frame (prevents tunneling through
/// thin obstacles)
pub const KNOCKBACK_SUBSTEPS: u32 = 4;
/// Invulnerability window after a hit, frames; also drives the flicker
pub const PLAYER_INVULN_FRAMES: u32 = 60;

/// XP needed for the first level-up
pub const XP_FIRST_THRESHOLD: u32 = 20;
/// Threshold growth per level, floored to an integer
pub const XP_GROWTH: f32 = 1.5;

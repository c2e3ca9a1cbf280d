//! Melee weapon data. Cooldowns are seconds; sizes are pixels.

/// Sword damage per hit
pub const SWORD_DAMAGE: i32 = 1;
/// Sword attack lock duration
pub const SWORD_COOLDOWN: f32 = 0.25;
/// Sword arc sweep width (cross axis)
pub const SWORD_ARC_WIDTH: f32 = 56.0;
/// Sword arc reach (facing axis)
pub const SWORD_ARC_REACH: f32 = 36.0;

/// Spear damage per hit
pub const SPEAR_DAMAGE: i32 = 2;
/// Spear attack lock duration
pub const SPEAR_COOLDOWN: f32 = 0.40;
/// Spear thrust width (cross axis)
pub const SPEAR_WIDTH: f32 = 14.0;
/// Spear thrust reach (facing axis)
pub const SPEAR_REACH: f32 = 76.0;

/// Vertical offset for side swings, putting the weapon at hand height
pub const WEAPON_HAND_OFFSET: f32 = 12.0;

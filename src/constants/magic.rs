//! Spell data. Cooldowns are seconds; lifetimes are frames; speeds are
//! pixels per tick.

// FIRE CONE - short-range piercing flame burst
/// Fire cone damage (each enemy in the area, once)
pub const FIRE_CONE_DAMAGE: i32 = 15;
/// Cast lock duration
pub const FIRE_CONE_COOLDOWN: f32 = 0.4;
/// Mana cost
pub const FIRE_CONE_COST: i32 = 10;
/// Lifetime, frames
pub const FIRE_CONE_LIFETIME: u32 = 30;
/// Cone length along the facing axis
pub const FIRE_CONE_LENGTH: f32 = 85.0;
/// Cone width across the facing axis
pub const FIRE_CONE_WIDTH: f32 = 65.0;

// ICE BALL - fast straight-line projectile
/// Ice ball damage (first enemy hit)
pub const ICE_BALL_DAMAGE: i32 = 20;
/// Cast lock duration
pub const ICE_BALL_COOLDOWN: f32 = 0.3;
/// Mana cost
pub const ICE_BALL_COST: i32 = 15;
/// Flight speed
pub const ICE_BALL_SPEED: f32 = 14.0;
/// Lifetime, frames
pub const ICE_BALL_LIFETIME: u32 = 90;
/// Hitbox edge length
pub const ICE_BALL_HITBOX: f32 = 16.0;

// SHADOW BLADE - weaving homing blade
/// Shadow blade damage (first enemy hit)
pub const SHADOW_BLADE_DAMAGE: i32 = 25;
/// Cast lock duration
pub const SHADOW_BLADE_COOLDOWN: f32 = 0.35;
/// Mana cost
pub const SHADOW_BLADE_COST: i32 = 20;
/// Flight speed
pub const SHADOW_BLADE_SPEED: f32 = 8.0;
/// Lifetime, frames
pub const SHADOW_BLADE_LIFETIME: u32 = 75;
/// Steering lerp factor toward the target per tick
pub const SHADOW_BLADE_HOMING: f32 = 0.12;
/// Target acquisition range at cast time
pub const SHADOW_BLADE_DETECT_RANGE: f32 = 250.0;
/// Weave frequency, radians per frame of age
pub const SHADOW_BLADE_WAVE_FREQ: f32 = 0.28;
/// Weave amplitude, pixels of lateral swing
pub const SHADOW_BLADE_WAVE_AMP: f32 = 16.0;
/// Hitbox edge length
pub const SHADOW_BLADE_HITBOX: f32 = 20.0;

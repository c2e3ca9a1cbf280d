//! Enemy archetype stats and AI timings.
//!
//! Speeds are pixels per tick at the fixed 60 Hz step; durations are
//! seconds on the game clock; death/flash animations are frame counts.

// DEMON
/// Demon walking speed
pub const DEMON_SPEED: f32 = 2.5;
/// Demon charge speed
pub const DEMON_CHARGE_SPEED: f32 = 7.0;
/// Distance at which a demon notices the player
pub const DEMON_DETECT_RADIUS: f32 = 200.0;
/// Multiplier on the detect radius before a noticing demon loses interest
pub const DEMON_DISENGAGE_FACTOR: f32 = 1.5;
/// How long the demon stares before charging
pub const DEMON_NOTICE_SECS: f32 = 2.0;
/// Straight-line charge duration
pub const DEMON_CHARGE_SECS: f32 = 1.2;
/// Breather after a charge
pub const DEMON_REST_SECS: f32 = 3.0;
/// Interval between wander direction re-rolls
pub const DEMON_WANDER_CHANGE_SECS: f32 = 2.5;
/// Chance a wander re-roll stands still instead
pub const DEMON_WANDER_IDLE_CHANCE: f64 = 0.25;
/// Demon hit points
pub const DEMON_MAX_HP: i32 = 2;
/// Contact damage dealt to the player
pub const DEMON_CONTACT_DAMAGE: i32 = 8;
/// XP granted on death
pub const DEMON_XP: u32 = 5;
/// Death animation length, frames
pub const DEMON_DEATH_FRAMES: u32 = 25;
/// Hit-flash length, frames
pub const DEMON_FLASH_FRAMES: u32 = 6;
/// Demon hitbox (width, height)
pub const DEMON_HITBOX: (f32, f32) = (36.0, 34.0);

// BAT
/// Bat flutter speed
pub const BAT_SPEED: f32 = 3.5;
/// Bat swoop speed
pub const BAT_SWOOP_SPEED: f32 = 9.0;
/// Distance at which a bat will consider swooping
pub const BAT_DETECT_RADIUS: f32 = 180.0;
/// Swoop duration
pub const BAT_SWOOP_SECS: f32 = 0.8;
/// Retreat duration after a swoop
pub const BAT_RETREAT_SECS: f32 = 0.6;
/// Idle duration range before the first swoop
pub const BAT_IDLE_SECS: (f32, f32) = (1.5, 3.0);
/// Idle duration range after a retreat
pub const BAT_IDLE_AGAIN_SECS: (f32, f32) = (1.0, 2.5);
/// Flutter oscillator step per tick
pub const BAT_FLUTTER_STEP: f32 = 0.05;
/// Swoop wobble frequency (over normalized swoop progress)
pub const BAT_WOBBLE_FREQ: f32 = 12.0;
/// Swoop wobble amplitude (fraction of the dive direction)
pub const BAT_WOBBLE_AMP: f32 = 0.3;
/// Bat hit points
pub const BAT_MAX_HP: i32 = 1;
/// Contact damage dealt to the player
pub const BAT_CONTACT_DAMAGE: i32 = 5;
/// XP granted on death
pub const BAT_XP: u32 = 3;
/// Death animation length, frames
pub const BAT_DEATH_FRAMES: u32 = 20;
/// Hit-flash length, frames
pub const BAT_FLASH_FRAMES: u32 = 6;
/// Bat hitbox (width, height)
pub const BAT_HITBOX: (f32, f32) = (28.0, 18.0);

// CENTIPEDE
/// Centipede slither speed
pub const CENTIPEDE_SPEED: f32 = 2.0;
/// Centipede pursuit speed
pub const CENTIPEDE_PURSUE_SPEED: f32 = 3.5;
/// Distance at which a centipede starts pursuing
pub const CENTIPEDE_DETECT_RADIUS: f32 = 180.0;
/// Multiplier on the detect radius before pursuit breaks off
pub const CENTIPEDE_DISENGAGE_FACTOR: f32 = 2.0;
/// Interval between slither direction re-rolls
pub const CENTIPEDE_TURN_SECS: f32 = 3.0;
/// Steering lerp factor toward the player while pursuing
pub const CENTIPEDE_STEER: f32 = 0.05;
/// Slither wave phase step per tick
pub const CENTIPEDE_WAVE_STEP: f32 = 0.06;
/// Slither wave amplitude, pixels per tick of lateral push
pub const CENTIPEDE_WAVE_AMP: f32 = 2.5;
/// Starting segment count; each segment is one hit point
pub const CENTIPEDE_SEGMENTS: u32 = 7;
/// Trail samples kept per rendered segment
pub const CENTIPEDE_TRAIL_PER_SEGMENT: usize = 4;
/// Contact damage dealt to the player
pub const CENTIPEDE_CONTACT_DAMAGE: i32 = 8;
/// XP granted on death
pub const CENTIPEDE_XP: u32 = 12;
/// Death animation length, frames
pub const CENTIPEDE_DEATH_FRAMES: u32 = 30;
/// Hit-flash length, frames
pub const CENTIPEDE_FLASH_FRAMES: u32 = 8;
/// Centipede hitbox (width, height), sized for the full-length body
pub const CENTIPEDE_HITBOX: (f32, f32) = (128.0, 28.0);

// SPAWNER
/// Horizontal jitter applied to cave spawn positions
pub const SPAWNER_JITTER_X: f32 = 16.0;
/// Vertical offset from the cave mouth to the spawn point
pub const SPAWNER_MOUTH_OFFSET_Y: f32 = -40.0;

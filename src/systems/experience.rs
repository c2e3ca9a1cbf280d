//! Experience, leveling, and kill tallies.

use hecs::{Entity, World};

use crate::components::{EnemyKind, Experience, Health, KillCounter, Mana};
use crate::constants::*;
use crate::events::{EventQueue, GameEvent};

/// XP progress toward the next level (0.0 to 1.0), for the HUD
pub fn xp_progress(exp: &Experience) -> f32 {
    exp.xp as f32 / exp.xp_to_next.max(1) as f32
}

/// Add XP, looping through level-ups while the threshold is met. The
/// threshold grows by the configured factor each level, floored to an
/// integer. Returns the number of levels gained.
pub fn grant_xp(exp: &mut Experience, amount: u32) -> u32 {
    exp.xp += amount;
    let mut levels = 0;
    while exp.xp >= exp.xp_to_next {
        exp.xp -= exp.xp_to_next;
        exp.level += 1;
        exp.xp_to_next = (exp.xp_to_next as f32 * XP_GROWTH) as u32;
        levels += 1;
    }
    levels
}

/// Record a kill on the player: tally the kind, grant XP, and on any
/// level-up fully restore HP and MP.
pub fn award_kill(
    world: &mut World,
    player: Entity,
    kind: EnemyKind,
    xp: u32,
    events: &mut EventQueue,
) {
    if let Ok(mut kills) = world.get::<&mut KillCounter>(player) {
        kills.record(kind);
    }

    let mut new_level = None;
    if let Ok(mut exp) = world.get::<&mut Experience>(player) {
        if grant_xp(&mut exp, xp) > 0 {
            new_level = Some(exp.level);
        }
    }

    if let Some(level) = new_level {
        // Leveling is always a full heal.
        if let Ok(mut health) = world.get::<&mut Health>(player) {
            health.current = health.max;
        }
        if let Ok(mut mana) = world.get::<&mut Mana>(player) {
            mana.restore_full();
        }
        log::info!("player reached level {}", level);
        events.push(GameEvent::LevelUp { new_level: level });
    }
}

//! The player controller.
//!
//! One update per frame: timers first (knockback, invulnerability, the
//! attack lock), then movement from the input snapshot, then attack and
//! spell presses, then mana regen. Damage and knockback entry points
//! are called from combat resolution.

use glam::Vec2;
use hecs::{Entity, World};

use crate::components::{
    ActionLock, AnimMode, Dying, Equipment, Facing, Health, Hitbox, Knockback, Mana, MeleeAttack,
    Pose, Position, Rect, WeaponKind,
};
use crate::constants::*;
use crate::events::{EventQueue, GameEvent};
use crate::game_loop::GameClock;
use crate::input::InputState;
use crate::systems::magic;
use crate::systems::movement::move_ground;

/// Where a swing's hitbox sits for the given facing. Sword and spear
/// orient their (reach, cross-width) footprint along the facing axis;
/// side swings sit slightly below center, at hand height.
fn weapon_placement(
    player_pos: Vec2,
    player_hb: &Hitbox,
    facing: Facing,
    kind: WeaponKind,
) -> (Vec2, Vec2) {
    let (reach, cross) = kind.hitbox();
    match facing {
        Facing::Down => (
            player_pos + Vec2::new(0.0, player_hb.half_h + reach * 0.5),
            Vec2::new(cross, reach),
        ),
        Facing::Up => (
            player_pos - Vec2::new(0.0, player_hb.half_h + reach * 0.5),
            Vec2::new(cross, reach),
        ),
        Facing::Left => (
            player_pos + Vec2::new(-(player_hb.half_w + reach * 0.5), WEAPON_HAND_OFFSET),
            Vec2::new(reach, cross),
        ),
        Facing::Right => (
            player_pos + Vec2::new(player_hb.half_w + reach * 0.5, WEAPON_HAND_OFFSET),
            Vec2::new(reach, cross),
        ),
    }
}

/// Step the player for one frame
pub fn update_player(
    world: &mut World,
    player: Entity,
    input: &InputState,
    clock: &GameClock,
    events: &mut EventQueue,
    obstacles: &[Rect],
) {
    puffin::profile_function!();

    // Dead players accept no input and run no timers but the death
    // animation (ticked with the other dying entities).
    if world.get::<&Dying>(player).is_ok() {
        return;
    }

    let now = clock.time;

    // Knockback push and invulnerability window.
    let knockback_dir = {
        let Ok(mut kb) = world.get::<&mut Knockback>(player) else {
            return;
        };
        if kb.invuln_frames > 0 {
            kb.invuln_frames -= 1;
        }
        if kb.active() {
            kb.frames_left -= 1;
            Some(kb.dir)
        } else {
            None
        }
    };
    if let Some(dir) = knockback_dir {
        // Sub-stepping keeps a strong push from tunneling through thin
        // obstacles.
        let step = KNOCKBACK_SPEED / KNOCKBACK_SUBSTEPS as f32;
        let Ok(hb) = world.get::<&Hitbox>(player).map(|h| *h) else {
            return;
        };
        if let Ok(mut pos) = world.get::<&mut Position>(player) {
            for _ in 0..KNOCKBACK_SUBSTEPS {
                move_ground(&mut pos, &hb, dir, step, obstacles);
            }
        }
    }

    // Attack lock expiry: also sweeps up the lingering melee hitbox
    // (spells look after themselves).
    let mut lock_cleared = false;
    {
        let Ok(mut lock) = world.get::<&mut ActionLock>(player) else {
            return;
        };
        if lock.attacking && lock.expired(now) {
            lock.clear();
            lock_cleared = true;
        }
    }
    if lock_cleared {
        let swings: Vec<Entity> = world
            .query::<&MeleeAttack>()
            .iter()
            .map(|(e, _)| e)
            .collect();
        for swing in swings {
            let _ = world.despawn(swing);
        }
        if let Ok(mut pose) = world.get::<&mut Pose>(player) {
            pose.mode = AnimMode::Idle;
        }
    }

    let attacking = world
        .get::<&ActionLock>(player)
        .map(|l| l.attacking)
        .unwrap_or(false);

    // Movement. Ignored while the attack lock is engaged or while the
    // knockback push owns the player's position.
    if !attacking && knockback_dir.is_none() {
        let dir = input.direction();
        if dir.length_squared() > 0.0 {
            if let (Ok(hb), Ok(mut pos)) = (
                world.get::<&Hitbox>(player).map(|h| *h),
                world.get::<&mut Position>(player),
            ) {
                move_ground(&mut pos, &hb, dir, PLAYER_SPEED, obstacles);
            }
        }
        if let Ok(mut pose) = world.get::<&mut Pose>(player) {
            pose.face_movement(dir);
        }
    }

    // Attack and spell presses need the caster's stance.
    let stance = {
        match (
            world.get::<&Equipment>(player),
            world.get::<&Pose>(player),
            world.get::<&Position>(player),
            world.get::<&Hitbox>(player),
        ) {
            (Ok(equipment), Ok(pose), Ok(pos), Ok(hb)) => Some((
                equipment.weapon,
                equipment.spell,
                equipment.spell_unlocked(equipment.spell),
                pose.facing,
                pos.vec(),
                *hb,
            )),
            _ => None,
        }
    };

    if let Some((weapon, spell, spell_unlocked, facing, pos, hb)) = stance {
        if input.attack && !attacking {
            if let Ok(mut lock) = world.get::<&mut ActionLock>(player) {
                lock.engage(now, weapon.cooldown(), false);
            }
            if let Ok(mut pose) = world.get::<&mut Pose>(player) {
                pose.mode = AnimMode::Attack;
            }
            let (center, size) = weapon_placement(pos, &hb, facing, weapon);
            world.spawn((
                Position::new(center.x, center.y),
                Hitbox::new(size.x, size.y),
                MeleeAttack::new(weapon),
            ));
            events.push(GameEvent::WeaponSwung { kind: weapon });
        } else if input.cast && !attacking {
            // A cast needs the rune and the mana.
            let paid = spell_unlocked
                && world
                    .get::<&mut Mana>(player)
                    .map(|mut m| m.spend(spell.mana_cost()))
                    .unwrap_or(false);
            if paid {
                if let Ok(mut lock) = world.get::<&mut ActionLock>(player) {
                    lock.engage(now, spell.cooldown(), true);
                }
                if let Ok(mut pose) = world.get::<&mut Pose>(player) {
                    pose.mode = AnimMode::Attack;
                }
                magic::cast_spell(world, pos, &hb, facing, spell, events);
            }
        }
    }

    // Mana trickles back continuously, credited in whole points.
    if let Ok(mut mana) = world.get::<&mut Mana>(player) {
        mana.regen(PLAYER_MP_REGEN_PER_SEC, DT);
    }
}

/// Damage the player. A no-op while invulnerable or dead. Armor is a
/// flat reduction but a connecting hit always costs at least one point.
pub fn damage_player(world: &mut World, player: Entity, amount: i32, events: &mut EventQueue) {
    if world.get::<&Dying>(player).is_ok() {
        return;
    }
    if world
        .get::<&Knockback>(player)
        .map(|kb| kb.invulnerable())
        .unwrap_or(false)
    {
        return;
    }

    let hp_left = {
        let Ok(mut health) = world.get::<&mut Health>(player) else {
            return;
        };
        let dealt = (amount - PLAYER_ARMOR).max(1);
        health.current -= dealt;
        events.push(GameEvent::PlayerDamaged {
            damage: dealt,
            hp_left: health.current,
        });
        health.current
    };

    if hp_left <= 0 {
        let _ = world.insert_one(player, Dying::new(PLAYER_DEATH_FRAMES));
        log::info!("player died");
        events.push(GameEvent::PlayerDied);
    }
}

/// Push the player away from an enemy. A no-op while invulnerable or
/// dead; otherwise arms the push and opens the invulnerability window.
pub fn apply_knockback(world: &mut World, player: Entity, dir: Vec2) {
    if world.get::<&Dying>(player).is_ok() {
        return;
    }
    let Ok(mut kb) = world.get::<&mut Knockback>(player) else {
        return;
    };
    if kb.invulnerable() {
        return;
    }
    kb.dir = dir;
    kb.frames_left = KNOCKBACK_FRAMES;
    kb.invuln_frames = PLAYER_INVULN_FRAMES;
}

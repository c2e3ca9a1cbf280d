//! Damage application and death handling.
//!
//! `resolve_combat` runs once per frame after every AI and movement
//! update, so damage always reflects the frame's final positions. The
//! enemy list is snapshotted up front; an enemy dying mid-resolution is
//! skipped by the terminal checks rather than by mutating the list
//! under iteration. When two enemies touch the player on the same
//! frame, whichever the query yields first wins - the order is
//! unspecified.

use glam::Vec2;
use hecs::{Entity, World};

use crate::components::{
    Brain, Dying, Enemy, Health, Hitbox, MeleeAttack, Position, Rect, SpellEffect,
};
use crate::events::{EventQueue, GameEvent};
use crate::systems::movement::normalize_or;
use crate::systems::{experience, player};

/// Apply damage to an enemy. A no-op on a dying enemy. On a surviving
/// hit the cosmetic flash starts; on the hit that empties HP the enemy
/// enters its death animation exactly once and the player is awarded
/// XP. Returns true when this call killed the enemy.
pub fn take_hit(
    world: &mut World,
    target: Entity,
    damage: i32,
    player: Entity,
    events: &mut EventQueue,
) -> bool {
    if world.get::<&Dying>(target).is_ok() {
        return false;
    }

    let (kind, xp_value, position, killed) = {
        let Ok(mut enemy) = world.get::<&mut Enemy>(target) else {
            return false;
        };
        let Ok(mut health) = world.get::<&mut Health>(target) else {
            return false;
        };
        let Ok(pos) = world.get::<&Position>(target) else {
            return false;
        };

        health.current -= damage;
        // Each lost point strips a rendered centipede segment, floor one.
        if let Brain::Centipede(b) = &mut enemy.brain {
            b.segments = health.current.max(1) as u32;
        }

        let killed = health.current <= 0;
        if !killed {
            enemy.hit_flash = enemy.kind.flash_frames();
        }
        (enemy.kind, enemy.xp_value, pos.vec(), killed)
    };

    if killed {
        let _ = world.insert_one(target, Dying::new(kind.death_frames()));
        log::debug!("{} died", kind.label());
        events.push(GameEvent::EnemyDied {
            entity: target,
            kind,
            position,
        });
        experience::award_kill(world, player, kind, xp_value, events);
    } else {
        events.push(GameEvent::EnemyHit {
            entity: target,
            damage,
            position,
        });
    }
    killed
}

/// Snapshot of the enemies eligible for damage this frame
fn live_enemy_rects(world: &World) -> Vec<(Entity, Rect)> {
    world
        .query::<(&Position, &Hitbox, &Enemy, Option<&Dying>)>()
        .iter()
        .filter(|(_, (_, _, _, dying))| dying.is_none())
        .map(|(e, (pos, hb, _, _))| (e, hb.rect_at(pos)))
        .collect()
}

/// Run the frame's collision and damage resolution:
/// 1. melee swings against enemies (each swing hits an enemy once),
/// 2. spells against enemies (non-piercing spells die on first contact),
/// 3. enemy contact against the player (damage + knockback),
pub fn resolve_combat(world: &mut World, player_entity: Entity, events: &mut EventQueue) {
    puffin::profile_function!();

    let enemies = live_enemy_rects(world);

    // 1. Melee swings.
    let weapons: Vec<(Entity, Rect, i32)> = world
        .query::<(&Position, &Hitbox, &MeleeAttack)>()
        .iter()
        .map(|(e, (pos, hb, weapon))| (e, hb.rect_at(pos), weapon.damage))
        .collect();
    for (weapon_entity, weapon_rect, damage) in weapons {
        for (enemy_entity, enemy_rect) in &enemies {
            let fresh_hit = match world.get::<&mut MeleeAttack>(weapon_entity) {
                Ok(mut weapon) => {
                    if weapon.already_hit.contains(enemy_entity) || !weapon_rect.overlaps(enemy_rect)
                    {
                        false
                    } else {
                        weapon.already_hit.insert(*enemy_entity);
                        true
                    }
                }
                Err(_) => false,
            };
            if fresh_hit {
                take_hit(world, *enemy_entity, damage, player_entity, events);
            }
        }
    }

    // 2. Spells.
    let spells: Vec<(Entity, Rect, i32, bool)> = world
        .query::<(&Position, &Hitbox, &SpellEffect)>()
        .iter()
        .map(|(e, (pos, hb, spell))| (e, hb.rect_at(pos), spell.damage, spell.piercing))
        .collect();
    for (spell_entity, spell_rect, damage, piercing) in spells {
        for (enemy_entity, enemy_rect) in &enemies {
            let fresh_hit = match world.get::<&mut SpellEffect>(spell_entity) {
                Ok(mut spell) => {
                    if spell.already_hit.contains(enemy_entity) || !spell_rect.overlaps(enemy_rect)
                    {
                        false
                    } else {
                        spell.already_hit.insert(*enemy_entity);
                        true
                    }
                }
                Err(_) => false,
            };
            if fresh_hit {
                take_hit(world, *enemy_entity, damage, player_entity, events);
                if !piercing {
                    let _ = world.despawn(spell_entity);
                    break;
                }
            }
        }
    }

    // 3. Enemy contact with the player.
    let player_rect = match (
        world.get::<&Position>(player_entity),
        world.get::<&Hitbox>(player_entity),
    ) {
        (Ok(pos), Ok(hb)) => hb.rect_at(&pos),
        _ => return,
    };
    for (enemy_entity, enemy_rect) in &enemies {
        // Re-check: a weapon or spell above may have just killed it.
        if world.get::<&Dying>(*enemy_entity).is_ok() {
            continue;
        }
        if !enemy_rect.overlaps(&player_rect) {
            continue;
        }
        let contact_damage = match world.get::<&Enemy>(*enemy_entity) {
            Ok(enemy) => enemy.contact_damage,
            Err(_) => continue,
        };
        let bump = normalize_or(player_rect.center - enemy_rect.center, Vec2::X);
        player::damage_player(world, player_entity, contact_damage, events);
        player::apply_knockback(world, player_entity, bump);
    }
}

/// Tick death animations; finished enemies despawn. Returns true the
/// frame the player's own death animation completes (the player entity
/// is left in the world for the shell to read).
pub fn update_dying(world: &mut World, player_entity: Entity) -> bool {
    let mut to_despawn = Vec::new();
    let mut player_done = false;

    for (entity, dying) in world.query_mut::<&mut Dying>() {
        dying.frames += 1;
        if dying.finished() {
            if entity == player_entity {
                player_done = true;
            } else {
                to_despawn.push(entity);
            }
        }
    }

    for entity in to_despawn {
        let _ = world.despawn(entity);
    }
    player_done
}

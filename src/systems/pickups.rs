//! World pickup collection.
//!
//! Pickups collect by pure hitbox overlap with the player and kill
//! themselves on collection. A health pickup at full HP refuses and
//! stays in the world, so nothing is wasted; the `PickupCollected`
//! event is the cue signal and is only emitted for a real collection.

use hecs::{Entity, World};

use crate::components::{Dying, Equipment, Health, Hitbox, Pickup, PickupKind, Position};
use crate::events::{EventQueue, GameEvent};

/// Collect every pickup overlapping the player this frame
pub fn collect_pickups(world: &mut World, player: Entity, events: &mut EventQueue) {
    if world.get::<&Dying>(player).is_ok() {
        return;
    }
    let player_rect = match (
        world.get::<&Position>(player),
        world.get::<&Hitbox>(player),
    ) {
        (Ok(pos), Ok(hb)) => hb.rect_at(&pos),
        _ => return,
    };

    let touching: Vec<(Entity, Pickup, glam::Vec2)> = world
        .query::<(&Position, &Hitbox, &Pickup)>()
        .iter()
        .filter(|(_, (pos, hb, _))| hb.rect_at(pos).overlaps(&player_rect))
        .map(|(e, (pos, _, pickup))| (e, *pickup, pos.vec()))
        .collect();

    for (entity, pickup, position) in touching {
        let collected = match pickup.kind {
            PickupKind::Health { heal } => {
                let Ok(mut health) = world.get::<&mut Health>(player) else {
                    continue;
                };
                if health.is_full() {
                    false
                } else {
                    health.heal(heal);
                    true
                }
            }
            PickupKind::Rune(rune) => {
                let Ok(mut equipment) = world.get::<&mut Equipment>(player) else {
                    continue;
                };
                equipment.collect_rune(rune);
                true
            }
        };

        if collected {
            let _ = world.despawn(entity);
            events.push(GameEvent::PickupCollected {
                kind: pickup.kind,
                position,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{Player, Rune};
    use crate::constants::*;

    fn setup(hp: i32) -> (World, Entity) {
        let mut world = World::new();
        let player = world.spawn((
            Position::new(400.0, 400.0),
            Hitbox::new(PLAYER_HITBOX.0, PLAYER_HITBOX.1),
            Player,
            Health {
                current: hp,
                max: PLAYER_MAX_HP,
            },
            Equipment::new(),
        ));
        (world, player)
    }

    fn drop_pickup(world: &mut World, kind: PickupKind, x: f32, y: f32) -> Entity {
        world.spawn((
            Position::new(x, y),
            Hitbox::new(PICKUP_HITBOX, PICKUP_HITBOX),
            Pickup { kind },
        ))
    }

    #[test]
    fn health_pickup_refused_at_full_hp() {
        let (mut world, player) = setup(PLAYER_MAX_HP);
        let mut events = EventQueue::new();
        let heart = drop_pickup(
            &mut world,
            PickupKind::Health {
                heal: HEALTH_PICKUP_HEAL,
            },
            400.0,
            400.0,
        );

        collect_pickups(&mut world, player, &mut events);
        assert!(world.contains(heart), "refused pickup stays in the world");
        assert!(events.is_empty(), "no cue for a refused pickup");
    }

    #[test]
    fn health_pickup_heals_clamped_and_despawns() {
        let (mut world, player) = setup(PLAYER_MAX_HP - 5);
        let mut events = EventQueue::new();
        let heart = drop_pickup(
            &mut world,
            PickupKind::Health {
                heal: HEALTH_PICKUP_HEAL,
            },
            400.0,
            400.0,
        );

        collect_pickups(&mut world, player, &mut events);
        assert!(!world.contains(heart));
        assert_eq!(
            world.get::<&Health>(player).unwrap().current,
            PLAYER_MAX_HP
        );
        assert!(events
            .drain()
            .any(|e| matches!(e, GameEvent::PickupCollected { .. })));
    }

    #[test]
    fn rune_pickup_unlocks_and_despawns() {
        let (mut world, player) = setup(PLAYER_MAX_HP);
        let mut events = EventQueue::new();
        let rune = drop_pickup(&mut world, PickupKind::Rune(Rune::IceBall), 400.0, 400.0);
        // Out-of-reach pickup is untouched.
        let far = drop_pickup(&mut world, PickupKind::Rune(Rune::Spear), 900.0, 900.0);

        collect_pickups(&mut world, player, &mut events);
        assert!(!world.contains(rune));
        assert!(world.contains(far));
        assert!(world
            .get::<&Equipment>(player)
            .unwrap()
            .runes
            .contains(&Rune::IceBall));
    }
}

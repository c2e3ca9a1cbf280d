//! Spell instance upkeep.
//!
//! Spells are transient entities spawned by the player controller. The
//! fire cone sits anchored in front of the caster, the ice ball flies
//! straight, and the shadow blade steers toward the nearest enemy while
//! weaving a sine wave around its homing path. Instances self-expire;
//! damage application happens in `combat::resolve_combat`.

use glam::Vec2;
use hecs::{Entity, World};
use std::collections::{HashMap, HashSet};

use crate::components::{
    Dying, Enemy, Facing, Hitbox, Player, Pose, Position, SpellEffect, SpellKind, SpellMotion,
};
use crate::constants::*;
use crate::events::{EventQueue, GameEvent};
use crate::systems::movement::normalize_or;

/// Where a spell leaves the caster: the midpoint of the facing edge
fn cast_origin(pos: Vec2, hitbox: &Hitbox, facing: Facing) -> Vec2 {
    match facing {
        Facing::Up => pos + Vec2::new(0.0, -hitbox.half_h),
        Facing::Down => pos + Vec2::new(0.0, hitbox.half_h),
        Facing::Left => pos + Vec2::new(-hitbox.half_w, 0.0),
        Facing::Right => pos + Vec2::new(hitbox.half_w, 0.0),
    }
}

/// Cone center and oriented extents for the caster's facing
fn cone_placement(pos: Vec2, hitbox: &Hitbox, facing: Facing) -> (Vec2, Vec2) {
    let reach = hitbox_offset(hitbox, facing) + FIRE_CONE_LENGTH * 0.5;
    let center = pos + facing.vec() * reach;
    let size = match facing {
        Facing::Up | Facing::Down => Vec2::new(FIRE_CONE_WIDTH, FIRE_CONE_LENGTH),
        Facing::Left | Facing::Right => Vec2::new(FIRE_CONE_LENGTH, FIRE_CONE_WIDTH),
    };
    (center, size)
}

fn hitbox_offset(hitbox: &Hitbox, facing: Facing) -> f32 {
    match facing {
        Facing::Up | Facing::Down => hitbox.half_h,
        Facing::Left | Facing::Right => hitbox.half_w,
    }
}

/// Nearest living enemy within range of `origin`, if any
pub fn closest_enemy(world: &World, origin: Vec2, range: f32) -> Option<Entity> {
    let mut best = None;
    let mut best_dist = range;
    for (entity, (pos, _enemy, dying)) in world
        .query::<(&Position, &Enemy, Option<&Dying>)>()
        .iter()
    {
        if dying.is_some() {
            continue;
        }
        let dist = (pos.vec() - origin).length();
        if dist < best_dist {
            best_dist = dist;
            best = Some(entity);
        }
    }
    best
}

/// Spawn a spell instance for the caster. Mana and the cast lock are
/// the caller's responsibility.
pub fn cast_spell(
    world: &mut World,
    caster_pos: Vec2,
    caster_hitbox: &Hitbox,
    facing: Facing,
    kind: SpellKind,
    events: &mut EventQueue,
) -> Entity {
    let effect = SpellEffect {
        kind,
        damage: kind.damage(),
        piercing: kind.piercing(),
        already_hit: HashSet::new(),
        age: 0,
        lifetime: kind.lifetime_frames(),
        motion: match kind {
            SpellKind::FireCone => SpellMotion::Cone,
            SpellKind::IceBall => SpellMotion::Bolt {
                velocity: facing.vec(),
            },
            SpellKind::ShadowBlade => SpellMotion::Homing {
                velocity: facing.vec(),
                target: closest_enemy(world, caster_pos, SHADOW_BLADE_DETECT_RANGE),
                base_pos: cast_origin(caster_pos, caster_hitbox, facing),
            },
        },
    };

    let entity = match kind {
        SpellKind::FireCone => {
            let (center, size) = cone_placement(caster_pos, caster_hitbox, facing);
            world.spawn((
                Position::new(center.x, center.y),
                Hitbox::new(size.x, size.y),
                effect,
            ))
        }
        SpellKind::IceBall => {
            let origin = cast_origin(caster_pos, caster_hitbox, facing);
            world.spawn((
                Position::new(origin.x, origin.y),
                Hitbox::new(ICE_BALL_HITBOX, ICE_BALL_HITBOX),
                effect,
            ))
        }
        SpellKind::ShadowBlade => {
            let origin = cast_origin(caster_pos, caster_hitbox, facing);
            world.spawn((
                Position::new(origin.x, origin.y),
                Hitbox::new(SHADOW_BLADE_HITBOX, SHADOW_BLADE_HITBOX),
                effect,
            ))
        }
    };

    events.push(GameEvent::SpellCast { kind });
    entity
}

/// Age and move every active spell; expired instances despawn.
pub fn update_spells(world: &mut World) {
    puffin::profile_function!();

    // Caster pose, for the anchored cone.
    let caster = world
        .query::<(&Position, &Hitbox, &Pose, &Player)>()
        .iter()
        .map(|(_, (pos, hb, pose, _))| (pos.vec(), *hb, pose.facing))
        .next();

    // Live enemy positions, for homing target checks.
    let targets: HashMap<Entity, Vec2> = world
        .query::<(&Position, &Enemy, Option<&Dying>)>()
        .iter()
        .filter(|(_, (_, _, dying))| dying.is_none())
        .map(|(e, (pos, _, _))| (e, pos.vec()))
        .collect();

    let mut expired = Vec::new();
    for (entity, (pos, spell)) in world.query_mut::<(&mut Position, &mut SpellEffect)>() {
        spell.age += 1;
        if spell.age >= spell.lifetime {
            expired.push(entity);
            continue;
        }

        match &mut spell.motion {
            SpellMotion::Cone => {
                if let Some((caster_pos, caster_hb, facing)) = caster {
                    let (center, _) = cone_placement(caster_pos, &caster_hb, facing);
                    pos.set(center);
                }
            }
            SpellMotion::Bolt { velocity } => {
                pos.set(pos.vec() + *velocity * ICE_BALL_SPEED);
            }
            SpellMotion::Homing {
                velocity,
                target,
                base_pos,
            } => {
                // A dead or missing target degrades to straight flight.
                if let Some(t) = *target {
                    match targets.get(&t) {
                        Some(target_pos) => {
                            let to = *target_pos - *base_pos;
                            if to.length_squared() > f32::EPSILON {
                                let desired = to.normalize();
                                *velocity += (desired - *velocity) * SHADOW_BLADE_HOMING;
                                *velocity = normalize_or(*velocity, desired);
                            }
                        }
                        None => *target = None,
                    }
                }
                *base_pos += *velocity * SHADOW_BLADE_SPEED;

                let perp = Vec2::new(-velocity.y, velocity.x);
                let wave =
                    (spell.age as f32 * SHADOW_BLADE_WAVE_FREQ).sin() * SHADOW_BLADE_WAVE_AMP;
                pos.set(*base_pos + perp * wave);
            }
        }
    }

    for entity in expired {
        let _ = world.despawn(entity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{AnimMode, Health};
    use crate::spawning;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn spawn_caster(world: &mut World, x: f32, y: f32) -> (Vec2, Hitbox) {
        let pos = Vec2::new(x, y);
        let hb = Hitbox::new(PLAYER_HITBOX.0, PLAYER_HITBOX.1);
        world.spawn((
            Position::new(x, y),
            hb,
            Pose {
                facing: Facing::Right,
                mode: AnimMode::Attack,
            },
            Player,
        ));
        (pos, hb)
    }

    #[test]
    fn ice_ball_flies_straight_and_expires() {
        let mut world = World::new();
        let mut events = EventQueue::new();
        let (pos, hb) = spawn_caster(&mut world, 300.0, 300.0);

        let bolt = cast_spell(&mut world, pos, &hb, Facing::Right, SpellKind::IceBall, &mut events);
        let start_x = world.get::<&Position>(bolt).unwrap().x;

        for _ in 0..10 {
            update_spells(&mut world);
        }
        let p = world.get::<&Position>(bolt).unwrap();
        assert!((p.x - (start_x + 10.0 * ICE_BALL_SPEED)).abs() < 1e-3);
        assert_eq!(p.y, 300.0);
        drop(p);

        for _ in 0..ICE_BALL_LIFETIME {
            update_spells(&mut world);
        }
        assert!(!world.contains(bolt), "expired bolt should despawn");
    }

    #[test]
    fn shadow_blade_without_target_flies_straight() {
        let mut world = World::new();
        let mut events = EventQueue::new();
        let (pos, hb) = spawn_caster(&mut world, 300.0, 300.0);

        let blade = cast_spell(&mut world, pos, &hb, Facing::Right, SpellKind::ShadowBlade, &mut events);
        {
            let spell = world.get::<&SpellEffect>(blade).unwrap();
            let SpellMotion::Homing { target, .. } = &spell.motion else {
                panic!("expected homing motion");
            };
            assert!(target.is_none());
        }

        for _ in 0..20 {
            update_spells(&mut world);
        }
        // The homing base advances straight along +X; the rendered
        // position only weaves perpendicular to it.
        let spell = world.get::<&SpellEffect>(blade).unwrap();
        let SpellMotion::Homing { base_pos, .. } = &spell.motion else {
            panic!("expected homing motion");
        };
        assert!(base_pos.x > pos.x + 19.0 * SHADOW_BLADE_SPEED);
        assert_eq!(base_pos.y, 300.0);
    }

    #[test]
    fn shadow_blade_homes_toward_enemy() {
        let mut world = World::new();
        let mut events = EventQueue::new();
        let mut rng = StdRng::seed_from_u64(11);
        let (pos, hb) = spawn_caster(&mut world, 300.0, 300.0);
        let prey = spawning::spawn_enemy(
            &mut world,
            crate::components::EnemyKind::Bat,
            Vec2::new(300.0, 450.0),
            0.0,
            &mut rng,
        );

        let blade = cast_spell(&mut world, pos, &hb, Facing::Right, SpellKind::ShadowBlade, &mut events);
        {
            let spell = world.get::<&SpellEffect>(blade).unwrap();
            let SpellMotion::Homing { target, .. } = &spell.motion else {
                panic!("expected homing motion");
            };
            assert_eq!(*target, Some(prey));
        }

        for _ in 0..30 {
            update_spells(&mut world);
        }
        let spell = world.get::<&SpellEffect>(blade).unwrap();
        let SpellMotion::Homing { velocity, .. } = &spell.motion else {
            panic!("expected homing motion");
        };
        // Launched along +X, the blade bends downward toward the bat.
        assert!(velocity.y > 0.3);
    }

    #[test]
    fn closest_enemy_ignores_dying_and_range() {
        let mut world = World::new();
        let mut rng = StdRng::seed_from_u64(2);
        let near = spawning::spawn_enemy(
            &mut world,
            crate::components::EnemyKind::Demon,
            Vec2::new(100.0, 0.0),
            0.0,
            &mut rng,
        );
        let far = spawning::spawn_enemy(
            &mut world,
            crate::components::EnemyKind::Demon,
            Vec2::new(200.0, 0.0),
            0.0,
            &mut rng,
        );
        // Out of range entirely.
        spawning::spawn_enemy(
            &mut world,
            crate::components::EnemyKind::Demon,
            Vec2::new(900.0, 0.0),
            0.0,
            &mut rng,
        );

        assert_eq!(closest_enemy(&world, Vec2::ZERO, 250.0), Some(near));

        // Kill the near one; the next candidate wins.
        {
            let mut health = world.get::<&mut Health>(near).unwrap();
            health.current = 0;
        }
        world.insert_one(near, Dying::new(10)).unwrap();
        assert_eq!(closest_enemy(&world, Vec2::ZERO, 250.0), Some(far));
    }
}

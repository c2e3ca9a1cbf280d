//! Data-driven entity spawning.
//!
//! `EnemyDef` holds everything needed to spawn one archetype, so levels
//! and cave spawners share a single code path. Cave spawners release
//! demons on an interval up to a live cap.

use glam::Vec2;
use hecs::{Entity, World};
use rand::Rng;
use std::collections::VecDeque;
use std::f32::consts::TAU;

use crate::components::{
    BatBrain, BatState, Brain, CaveSpawner, CentipedeBrain, CentipedeState, DemonBrain,
    DemonState, Enemy, EnemyKind, Facing, Health, Hitbox, Pose, Position,
};
use crate::constants::*;
use crate::events::{EventQueue, GameEvent};
use crate::game_loop::GameClock;

/// Definition of an enemy archetype - all the data needed to spawn one
#[derive(Clone, Copy)]
pub struct EnemyDef {
    pub kind: EnemyKind,
    pub max_hp: i32,
    pub contact_damage: i32,
    pub xp_value: u32,
    /// Hitbox (width, height)
    pub hitbox: (f32, f32),
}

pub const DEMON: EnemyDef = EnemyDef {
    kind: EnemyKind::Demon,
    max_hp: DEMON_MAX_HP,
    contact_damage: DEMON_CONTACT_DAMAGE,
    xp_value: DEMON_XP,
    hitbox: DEMON_HITBOX,
};

pub const BAT: EnemyDef = EnemyDef {
    kind: EnemyKind::Bat,
    max_hp: BAT_MAX_HP,
    contact_damage: BAT_CONTACT_DAMAGE,
    xp_value: BAT_XP,
    hitbox: BAT_HITBOX,
};

pub const CENTIPEDE: EnemyDef = EnemyDef {
    kind: EnemyKind::Centipede,
    max_hp: CENTIPEDE_SEGMENTS as i32,
    contact_damage: CENTIPEDE_CONTACT_DAMAGE,
    xp_value: CENTIPEDE_XP,
    hitbox: CENTIPEDE_HITBOX,
};

pub fn def_of(kind: EnemyKind) -> EnemyDef {
    match kind {
        EnemyKind::Demon => DEMON,
        EnemyKind::Bat => BAT,
        EnemyKind::Centipede => CENTIPEDE,
    }
}

/// Random unit direction
fn random_direction(rng: &mut impl Rng) -> Vec2 {
    let angle = rng.gen_range(0.0..TAU);
    Vec2::new(angle.cos(), angle.sin())
}

impl EnemyDef {
    /// Spawn this archetype at the given position
    pub fn spawn(&self, world: &mut World, pos: Vec2, now: f32, rng: &mut impl Rng) -> Entity {
        let brain = match self.kind {
            EnemyKind::Demon => Brain::Demon(DemonBrain {
                state: DemonState::Wander,
                state_entered: now,
                direction: random_direction(rng),
                last_wander_change: now,
                charge_dir: Vec2::ZERO,
            }),
            EnemyKind::Bat => Brain::Bat(BatBrain {
                state: BatState::Idle,
                state_entered: now,
                direction: Vec2::ZERO,
                flutter_phase: rng.gen_range(0.0..TAU),
                swoop_dir: Vec2::ZERO,
                idle_duration: rng.gen_range(BAT_IDLE_SECS.0..BAT_IDLE_SECS.1),
            }),
            EnemyKind::Centipede => Brain::Centipede(CentipedeBrain {
                state: CentipedeState::Slither,
                state_entered: now,
                direction: if rng.gen_bool(0.5) { Vec2::X } else { -Vec2::X },
                last_turn: now,
                wave_phase: rng.gen_range(0.0..TAU),
                segments: CENTIPEDE_SEGMENTS,
                max_segments: CENTIPEDE_SEGMENTS,
                trail: VecDeque::from(vec![
                    pos;
                    CENTIPEDE_SEGMENTS as usize * CENTIPEDE_TRAIL_PER_SEGMENT
                ]),
            }),
        };

        world.spawn((
            Position::new(pos.x, pos.y),
            Hitbox::new(self.hitbox.0, self.hitbox.1),
            Pose::new(Facing::Down),
            Health::new(self.max_hp),
            Enemy {
                kind: self.kind,
                contact_damage: self.contact_damage,
                xp_value: self.xp_value,
                brain,
                hit_flash: 0,
            },
        ))
    }
}

/// Spawn an enemy of the given kind
pub fn spawn_enemy(
    world: &mut World,
    kind: EnemyKind,
    pos: Vec2,
    now: f32,
    rng: &mut impl Rng,
) -> Entity {
    def_of(kind).spawn(world, pos, now, rng)
}

/// Step all cave spawners: purge dead references, then release a demon
/// when the interval has elapsed and the live cap allows it.
pub fn update_spawners(
    world: &mut World,
    clock: &GameClock,
    rng: &mut impl Rng,
    events: &mut EventQueue,
) {
    let spawner_entities: Vec<Entity> = world
        .query::<&CaveSpawner>()
        .iter()
        .map(|(e, _)| e)
        .collect();

    for spawner_entity in spawner_entities {
        let spawn_at = {
            let Ok(mut spawner) = world.get::<&mut CaveSpawner>(spawner_entity) else {
                continue;
            };
            let alive: Vec<Entity> = spawner
                .spawned
                .iter()
                .copied()
                .filter(|&e| world.contains(e))
                .collect();
            spawner.spawned = alive;

            if clock.time - spawner.last_spawn < spawner.interval
                || spawner.spawned.len() >= spawner.max_alive
            {
                continue;
            }
            spawner.last_spawn = clock.time;
            world
                .get::<&Position>(spawner_entity)
                .map(|p| p.vec())
                .unwrap_or(Vec2::ZERO)
        };

        let jitter = rng.gen_range(-SPAWNER_JITTER_X..=SPAWNER_JITTER_X);
        let pos = spawn_at + Vec2::new(jitter, SPAWNER_MOUTH_OFFSET_Y);
        let enemy = DEMON.spawn(world, pos, clock.time, rng);

        if let Ok(mut spawner) = world.get::<&mut CaveSpawner>(spawner_entity) {
            spawner.spawned.push(enemy);
            log::debug!(
                "cave released a demon ({}/{})",
                spawner.spawned.len(),
                spawner.max_alive
            );
        }
        events.push(GameEvent::EnemySpawned {
            entity: enemy,
            position: pos,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn spawner_respects_interval_and_cap() {
        let mut world = World::new();
        let mut rng = StdRng::seed_from_u64(7);
        let mut events = EventQueue::new();
        let mut clock = GameClock::new();

        world.spawn((
            Position::new(640.0, 1100.0),
            CaveSpawner {
                interval: 1.0,
                max_alive: 2,
                last_spawn: 0.0,
                spawned: Vec::new(),
            },
        ));

        // Before the interval elapses nothing spawns.
        clock.time = 0.5;
        update_spawners(&mut world, &clock, &mut rng, &mut events);
        assert_eq!(world.query::<&Enemy>().iter().count(), 0);

        clock.time = 1.0;
        update_spawners(&mut world, &clock, &mut rng, &mut events);
        clock.time = 2.0;
        update_spawners(&mut world, &clock, &mut rng, &mut events);
        assert_eq!(world.query::<&Enemy>().iter().count(), 2);

        // At the cap the spawner stays quiet.
        clock.time = 3.0;
        update_spawners(&mut world, &clock, &mut rng, &mut events);
        assert_eq!(world.query::<&Enemy>().iter().count(), 2);

        // Killing one frees a slot.
        let victim = world.query::<&Enemy>().iter().map(|(e, _)| e).next().unwrap();
        world.despawn(victim).unwrap();
        clock.time = 4.0;
        update_spawners(&mut world, &clock, &mut rng, &mut events);
        assert_eq!(world.query::<&Enemy>().iter().count(), 2);
    }

    #[test]
    fn spawned_centipede_has_full_trail() {
        let mut world = World::new();
        let mut rng = StdRng::seed_from_u64(1);
        let e = spawn_enemy(&mut world, EnemyKind::Centipede, Vec2::new(500.0, 600.0), 0.0, &mut rng);
        let enemy = world.get::<&Enemy>(e).unwrap();
        let Brain::Centipede(brain) = &enemy.brain else {
            panic!("expected centipede brain");
        };
        assert_eq!(brain.segments, CENTIPEDE_SEGMENTS);
        assert_eq!(
            brain.trail.len(),
            CENTIPEDE_SEGMENTS as usize * CENTIPEDE_TRAIL_PER_SEGMENT
        );
    }
}

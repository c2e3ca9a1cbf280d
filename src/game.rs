//! Game session state and world initialization.
//!
//! A `GameState` owns everything one level needs: the ECS world, the
//! clock, the event queue, and the RNG. Services are constructed once
//! and injected; nothing reaches for ambient global state. The player
//! carries over between levels via `PlayerSnapshot`.

use glam::Vec2;
use hecs::{Entity, World};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::components::{
    ActionLock, CaveSpawner, Equipment, Experience, Facing, Health, Hitbox, KillCounter,
    Knockback, Mana, Obstacle, Pickup, PickupKind, Player, Pose, Position, Rect,
};
use crate::constants::*;
use crate::events::EventQueue;
use crate::game_loop::GameClock;
use crate::level::{self, LevelConfig, PickupSpec};
use crate::spawning;

/// The player's persistent state, carried from one level to the next
#[derive(Debug, Clone)]
pub struct PlayerSnapshot {
    pub health: Health,
    pub mana: Mana,
    pub experience: Experience,
    pub kills: KillCounter,
    pub equipment: Equipment,
}

impl PlayerSnapshot {
    pub fn capture(world: &World, player: Entity) -> Option<Self> {
        Some(Self {
            health: *world.get::<&Health>(player).ok()?,
            mana: *world.get::<&Mana>(player).ok()?,
            experience: *world.get::<&Experience>(player).ok()?,
            kills: (*world.get::<&KillCounter>(player).ok()?).clone(),
            equipment: (*world.get::<&Equipment>(player).ok()?).clone(),
        })
    }
}

/// One running level
pub struct GameState {
    pub world: World,
    pub player: Entity,
    pub clock: GameClock,
    pub events: EventQueue,
    pub rng: StdRng,
    pub config: LevelConfig,
    pub bounds: Rect,
    /// Player kill total when the level started, for kill-count goals
    pub kills_at_start: u32,
    pub portal_open: bool,
}

impl GameState {
    /// Build a fresh level. `carry` restores the player from the
    /// previous level; a new campaign starts with `None`.
    pub fn new(config: LevelConfig, seed: u64, carry: Option<PlayerSnapshot>) -> Self {
        let mut world = World::new();
        let clock = GameClock::new();
        let mut rng = StdRng::seed_from_u64(seed);

        let kills_at_start = carry.as_ref().map(|c| c.kills.total()).unwrap_or(0);
        let player = spawn_player(&mut world, config.player_pos, carry);
        spawn_level_content(&mut world, &config, &clock, &mut rng);

        log::info!("level start: {}", config.name);

        Self {
            world,
            player,
            clock,
            events: EventQueue::new(),
            rng,
            config,
            bounds: level::world_bounds(),
            kills_at_start,
            portal_open: false,
        }
    }

    /// Kills scored inside this level
    pub fn level_kills(&self) -> u32 {
        self.world
            .get::<&KillCounter>(self.player)
            .map(|k| k.total())
            .unwrap_or(0)
            .saturating_sub(self.kills_at_start)
    }
}

fn spawn_player(world: &mut World, pos: (f32, f32), carry: Option<PlayerSnapshot>) -> Entity {
    let snapshot = carry.unwrap_or_else(|| PlayerSnapshot {
        health: Health::new(PLAYER_MAX_HP),
        mana: Mana::new(PLAYER_MAX_MP),
        experience: Experience::new(),
        kills: KillCounter::new(),
        equipment: Equipment::new(),
    });
    world.spawn((
        Position::new(pos.0, pos.1),
        Hitbox::new(PLAYER_HITBOX.0, PLAYER_HITBOX.1),
        Pose::new(Facing::Down),
        Player,
        snapshot.health,
        snapshot.mana,
        snapshot.experience,
        snapshot.kills,
        snapshot.equipment,
        ActionLock::idle(),
        Knockback::none(),
    ))
}

/// Tile center in world pixels
fn tile_center(col: u32, row: u32) -> Vec2 {
    Vec2::new(
        (col as f32 + 0.5) * TILE_SIZE,
        (row as f32 + 0.5) * TILE_SIZE,
    )
}

fn spawn_obstacle_tile(world: &mut World, col: u32, row: u32) {
    let center = tile_center(col, row);
    world.spawn((
        Position::new(center.x, center.y),
        Hitbox::new(TILE_SIZE, TILE_SIZE),
        Obstacle,
    ));
}

fn spawn_level_content(
    world: &mut World,
    config: &LevelConfig,
    clock: &GameClock,
    rng: &mut StdRng,
) {
    // Perimeter wall, one tile thick.
    for col in 0..WORLD_COLS {
        spawn_obstacle_tile(world, col, 0);
        spawn_obstacle_tile(world, col, WORLD_ROWS - 1);
    }
    for row in 1..WORLD_ROWS - 1 {
        spawn_obstacle_tile(world, 0, row);
        spawn_obstacle_tile(world, WORLD_COLS - 1, row);
    }

    // Interior rocks.
    for &(col, row) in &config.rocks {
        spawn_obstacle_tile(world, col, row);
    }

    // Enemies.
    for placement in &config.enemies {
        spawning::spawn_enemy(
            world,
            placement.kind,
            Vec2::new(placement.pos.0, placement.pos.1),
            clock.time,
            rng,
        );
    }

    // Pickups.
    for placement in &config.pickups {
        let kind = match placement.pickup {
            PickupSpec::Health => PickupKind::Health {
                heal: HEALTH_PICKUP_HEAL,
            },
            PickupSpec::Rune { rune } => PickupKind::Rune(rune),
        };
        world.spawn((
            Position::new(placement.pos.0, placement.pos.1),
            Hitbox::new(PICKUP_HITBOX, PICKUP_HITBOX),
            Pickup { kind },
        ));
    }

    // Cave spawners.
    for placement in &config.spawners {
        let pos = placement.world_pos();
        world.spawn((
            Position::new(pos.x, pos.y),
            CaveSpawner {
                interval: placement.interval,
                max_alive: placement.max_alive,
                last_spawn: clock.time,
                spawned: Vec::new(),
            },
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{Enemy, Rune};
    use crate::level;

    #[test]
    fn init_spawns_configured_content() {
        let config = level::campaign().remove(0);
        let enemy_count = config.enemies.len();
        let pickup_count = config.pickups.len();
        let state = GameState::new(config, 42, None);

        assert_eq!(
            state.world.query::<&Enemy>().iter().count(),
            enemy_count
        );
        assert_eq!(
            state.world.query::<&Pickup>().iter().count(),
            pickup_count
        );
        // Perimeter wall plus the interior rocks.
        let wall_tiles = (2 * WORLD_COLS + 2 * (WORLD_ROWS - 2)) as usize;
        let rocks = state.config.rocks.len();
        assert_eq!(
            state.world.query::<&Obstacle>().iter().count(),
            wall_tiles + rocks
        );
        assert!(state.world.contains(state.player));
    }

    #[test]
    fn snapshot_carries_the_player_between_levels() {
        let levels = level::campaign();
        let mut state = GameState::new(levels[0].clone(), 1, None);

        {
            let mut health = state
                .world
                .get::<&mut Health>(state.player)
                .unwrap();
            health.current = 37;
        }
        {
            let mut equipment = state
                .world
                .get::<&mut Equipment>(state.player)
                .unwrap();
            equipment.collect_rune(Rune::FireCone);
        }
        {
            let mut kills = state
                .world
                .get::<&mut KillCounter>(state.player)
                .unwrap();
            kills.record(crate::components::EnemyKind::Bat);
        }

        let snapshot = PlayerSnapshot::capture(&state.world, state.player).unwrap();
        let next = GameState::new(levels[1].clone(), 2, Some(snapshot));

        assert_eq!(
            next.world.get::<&Health>(next.player).unwrap().current,
            37
        );
        assert!(next
            .world
            .get::<&Equipment>(next.player)
            .unwrap()
            .runes
            .contains(&Rune::FireCone));
        // The carried kill does not count toward the new level's goal.
        assert_eq!(next.kills_at_start, 1);
        assert_eq!(next.level_kills(), 0);
    }
}

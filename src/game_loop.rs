//! The fixed-timestep frame loop.
//!
//! One `advance_frame` call is one simulation tick. AI and movement
//! finish for every entity before collision and damage resolution runs,
//! so damage always reflects the frame's final positions. The shell
//! drains `state.events` after each frame for VFX/audio/UI.

use glam::Vec2;
use hecs::World;

use crate::components::{Dying, Enemy, Hitbox, Portal, Position};
use crate::constants::*;
use crate::events::GameEvent;
use crate::game::GameState;
use crate::input::InputState;
use crate::level::Objective;
use crate::spawning;
use crate::systems;

/// Global game clock, advanced by one fixed step per frame
#[derive(Debug, Clone, Copy)]
pub struct GameClock {
    /// Simulation time in seconds
    pub time: f32,
    /// Frames elapsed
    pub frame: u64,
}

impl GameClock {
    pub fn new() -> Self {
        Self {
            time: 0.0,
            frame: 0,
        }
    }

    pub fn tick(&mut self) {
        self.time += DT;
        self.frame += 1;
    }
}

impl Default for GameClock {
    fn default() -> Self {
        Self::new()
    }
}

/// What the frame means for the embedding shell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelSignal {
    Continue,
    /// The player stepped into the open portal
    Complete,
    /// The player's death animation finished
    PlayerDead,
}

/// Advance the simulation by one frame
pub fn advance_frame(state: &mut GameState, input: &InputState) -> LevelSignal {
    puffin::profile_function!();

    state.clock.tick();
    let obstacles = systems::collect_obstacle_rects(&state.world);

    systems::player::update_player(
        &mut state.world,
        state.player,
        input,
        &state.clock,
        &mut state.events,
        &obstacles,
    );
    systems::ai::update_enemies(
        &mut state.world,
        state.player,
        &state.clock,
        &mut state.rng,
        &mut state.events,
    );
    systems::movement::update_enemy_movement(&mut state.world, &obstacles, &state.bounds);
    systems::magic::update_spells(&mut state.world);

    // Positions are final for the frame; now the damage pass.
    systems::resolve_combat(&mut state.world, state.player, &mut state.events);
    systems::pickups::collect_pickups(&mut state.world, state.player, &mut state.events);
    let player_gone = systems::update_dying(&mut state.world, state.player);

    spawning::update_spawners(
        &mut state.world,
        &state.clock,
        &mut state.rng,
        &mut state.events,
    );

    if !state.portal_open && objective_met(state) {
        open_portal(state);
    }

    if player_gone {
        return LevelSignal::PlayerDead;
    }
    if state.portal_open && player_at_portal(&state.world, state.player) {
        log::info!("level complete: {}", state.config.name);
        return LevelSignal::Complete;
    }
    LevelSignal::Continue
}

fn objective_met(state: &GameState) -> bool {
    match state.config.objective {
        Objective::KillAll => !state
            .world
            .query::<(&Enemy, Option<&Dying>)>()
            .iter()
            .any(|(_, (_, dying))| dying.is_none()),
        Objective::KillCount { count } => state.level_kills() >= count,
    }
}

fn open_portal(state: &mut GameState) {
    let pos = Vec2::new(state.config.portal_pos.0, state.config.portal_pos.1);
    state.world.spawn((
        Position::new(pos.x, pos.y),
        Hitbox::new(PORTAL_HITBOX, PORTAL_HITBOX),
        Portal,
    ));
    state.portal_open = true;
    log::info!("objective met, portal opened");
    state.events.push(GameEvent::PortalOpened { position: pos });
}

fn player_at_portal(world: &World, player: hecs::Entity) -> bool {
    let player_rect = match (world.get::<&Position>(player), world.get::<&Hitbox>(player)) {
        (Ok(pos), Ok(hb)) => hb.rect_at(&pos),
        _ => return false,
    };
    world
        .query::<(&Position, &Hitbox, &Portal)>()
        .iter()
        .any(|(_, (pos, hb, _))| hb.rect_at(pos).overlaps(&player_rect))
}

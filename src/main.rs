#![allow(dead_code)]

mod components;
mod constants;
mod events;
mod game;
mod game_loop;
mod input;
mod level;
mod spawning;
mod systems;

use glam::Vec2;

use components::{Dying, Enemy, KillCounter, Position};
use events::GameEvent;
use game::{GameState, PlayerSnapshot};
use game_loop::{advance_frame, LevelSignal};
use input::InputState;

/// Frame cap per level for the headless demo session (two minutes)
const DEMO_FRAME_LIMIT: u64 = 2 * 60 * 60;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Opt-in profiling: connect a puffin viewer to the printed address.
    let _puffin_server = if std::env::var("MANABLADE_PROFILE").is_ok() {
        let addr = format!("127.0.0.1:{}", puffin_http::DEFAULT_PORT);
        let server = puffin_http::Server::new(&addr)
            .map_err(|e| format!("failed to start puffin server on {}: {}", addr, e))?;
        puffin::set_scopes_on(true);
        log::info!("puffin server listening on {}", addr);
        Some(server)
    } else {
        None
    };

    // The demo drives the simulation headless with a scripted hunter
    // bot; a windowed shell would sample real input instead.
    let levels = level::campaign();
    let mut carry: Option<PlayerSnapshot> = None;
    let mut level_index = 0usize;

    loop {
        let config = levels[level_index].clone();
        let seed = 0xDE_CAFE ^ level_index as u64;
        let mut state = GameState::new(config, seed, carry.take());

        let outcome = run_level(&mut state);
        report_events(&mut state);

        match outcome {
            LevelSignal::Complete => match state.config.next_level {
                Some(next) => {
                    carry = PlayerSnapshot::capture(&state.world, state.player);
                    level_index = next;
                }
                None => {
                    print_summary(&state, "Victory!");
                    break;
                }
            },
            LevelSignal::PlayerDead => {
                print_summary(&state, "Game over");
                break;
            }
            LevelSignal::Continue => {
                print_summary(&state, "Demo time limit reached");
                break;
            }
        }
    }

    Ok(())
}

/// Run one level to a terminal signal or the demo frame cap
fn run_level(state: &mut GameState) -> LevelSignal {
    for _ in 0..DEMO_FRAME_LIMIT {
        puffin::GlobalProfiler::lock().new_frame();
        let input = demo_input(state);
        let signal = advance_frame(state, &input);
        report_events(state);
        if signal != LevelSignal::Continue {
            return signal;
        }
    }
    LevelSignal::Continue
}

/// Scripted session driver: walk at the nearest living enemy and swing
/// when in reach; head for the portal once it opens.
fn demo_input(state: &GameState) -> InputState {
    let player_pos = match state.world.get::<&Position>(state.player) {
        Ok(pos) => pos.vec(),
        Err(_) => return InputState::new(),
    };

    let nearest = state
        .world
        .query::<(&Position, &Enemy, Option<&Dying>)>()
        .iter()
        .filter(|(_, (_, _, dying))| dying.is_none())
        .map(|(_, (pos, _, _))| pos.vec())
        .min_by(|a, b| {
            let da = (*a - player_pos).length_squared();
            let db = (*b - player_pos).length_squared();
            da.total_cmp(&db)
        });

    let target = match nearest {
        Some(enemy_pos) => enemy_pos,
        None if state.portal_open => Vec2::new(
            state.config.portal_pos.0,
            state.config.portal_pos.1,
        ),
        None => return InputState::new(),
    };

    let to_target = target - player_pos;
    let dist = to_target.length();
    let mut input = InputState::new();
    if dist > 1.0 {
        let dir = to_target / dist;
        input.move_x = dir.x;
        input.move_y = dir.y;
    }
    if nearest.is_some() && dist < 70.0 {
        input.attack = true;
    }
    input
}

/// Drain the frame's events into the log
fn report_events(state: &mut GameState) {
    for event in state.events.drain() {
        match event {
            GameEvent::EnemyNoticed { .. } => log::debug!("an enemy noticed the player"),
            GameEvent::EnemyHit { damage, .. } => log::debug!("enemy hit for {}", damage),
            GameEvent::EnemyDied { kind, .. } => log::info!("{} defeated", kind.label()),
            GameEvent::EnemySpawned { .. } => log::debug!("reinforcements arrived"),
            GameEvent::WeaponSwung { kind } => log::trace!("swung {:?}", kind),
            GameEvent::SpellCast { kind } => log::info!("cast {:?}", kind),
            GameEvent::PlayerDamaged { damage, hp_left } => {
                log::info!("player took {} damage ({} hp left)", damage, hp_left)
            }
            GameEvent::PlayerDied => log::info!("the hero has fallen"),
            GameEvent::LevelUp { new_level } => log::info!("level up! now level {}", new_level),
            GameEvent::PickupCollected { kind, .. } => log::info!("picked up {:?}", kind),
            GameEvent::PortalOpened { .. } => log::info!("a portal shimmers open"),
        }
    }
}

fn print_summary(state: &GameState, headline: &str) {
    let exp = state
        .world
        .get::<&components::Experience>(state.player)
        .map(|e| (e.level, e.xp))
        .unwrap_or((1, 0));
    println!("== {} ==", headline);
    println!("stage: {}", state.config.name);
    println!("hero level: {} ({} xp banked)", exp.0, exp.1);
    if let Ok(kills) = state.world.get::<&KillCounter>(state.player) {
        println!("total kills: {}", kills.total());
        let mut by_kind: Vec<_> = kills.by_kind.iter().collect();
        by_kind.sort_by_key(|(kind, _)| kind.label());
        for (kind, count) in by_kind {
            println!("  {}s: {}", kind.label(), count);
        }
    }
}

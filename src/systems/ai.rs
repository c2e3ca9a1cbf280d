//! Enemy AI state machines.
//!
//! Every archetype follows the same shape: a passive phase notices the
//! player inside a detection radius, commits to an action after a fixed
//! delay, then cools down and returns to passive. Disengaging uses a
//! wider radius than engaging so an enemy at the boundary does not flap
//! between states. All transitions are driven by the game clock and the
//! distance to the player; `step_brain` is pure data-in/data-out over
//! the archetype tagged variant, which keeps it testable without a
//! world.

use glam::Vec2;
use hecs::{Entity, World};
use rand::Rng;
use std::f32::consts::TAU;

use crate::components::{
    BatState, Brain, CentipedeState, DemonState, Dying, Enemy, Position,
};
use crate::constants::*;
use crate::events::{EventQueue, GameEvent};
use crate::game_loop::GameClock;
use crate::systems::movement::normalize_or;

/// What an enemy knows about the world this frame
#[derive(Debug, Clone, Copy)]
pub struct Perception {
    pub now: f32,
    /// Distance to the player's center, pixels
    pub dist_to_player: f32,
    /// Unit direction toward the player (unit +X when on top of them)
    pub dir_to_player: Vec2,
}

/// Random unit direction for wandering
fn random_direction(rng: &mut impl Rng) -> Vec2 {
    let angle = rng.gen_range(0.0..TAU);
    Vec2::new(angle.cos(), angle.sin())
}

/// Wander re-roll: a random heading, or standing still some of the time
fn wander_direction(rng: &mut impl Rng) -> Vec2 {
    if rng.gen_bool(DEMON_WANDER_IDLE_CHANCE) {
        Vec2::ZERO
    } else {
        random_direction(rng)
    }
}

/// Step every living enemy's brain and decay hit-flash counters
pub fn update_enemies(
    world: &mut World,
    player: Entity,
    clock: &GameClock,
    rng: &mut impl Rng,
    events: &mut EventQueue,
) {
    puffin::profile_function!();

    let player_pos = match world.get::<&Position>(player) {
        Ok(p) => p.vec(),
        Err(_) => return,
    };

    for (entity, (pos, enemy, dying)) in
        world.query_mut::<(&Position, &mut Enemy, Option<&Dying>)>()
    {
        if dying.is_some() {
            continue;
        }
        if enemy.hit_flash > 0 {
            enemy.hit_flash -= 1;
        }

        let offset = player_pos - pos.vec();
        let perception = Perception {
            now: clock.time,
            dist_to_player: offset.length(),
            dir_to_player: normalize_or(offset, Vec2::X),
        };
        step_brain(entity, &mut enemy.brain, &perception, rng, events);
    }
}

/// Advance one enemy brain by one tick. Dispatches on the archetype
/// variant; the caller guarantees the enemy is not dying.
pub fn step_brain(
    entity: Entity,
    brain: &mut Brain,
    per: &Perception,
    rng: &mut impl Rng,
    events: &mut EventQueue,
) {
    match brain {
        Brain::Demon(b) => {
            let elapsed = per.now - b.state_entered;
            match b.state {
                DemonState::Wander => {
                    if per.now - b.last_wander_change > DEMON_WANDER_CHANGE_SECS {
                        b.direction = wander_direction(rng);
                        b.last_wander_change = per.now;
                    }
                    if per.dist_to_player < DEMON_DETECT_RADIUS {
                        b.state = DemonState::Notice;
                        b.state_entered = per.now;
                        b.direction = Vec2::ZERO;
                        events.push(GameEvent::EnemyNoticed { entity });
                    }
                }
                DemonState::Notice => {
                    b.direction = Vec2::ZERO;
                    if per.dist_to_player > DEMON_DETECT_RADIUS * DEMON_DISENGAGE_FACTOR {
                        b.state = DemonState::Wander;
                        b.state_entered = per.now;
                        return;
                    }
                    if elapsed > DEMON_NOTICE_SECS {
                        b.charge_dir = per.dir_to_player;
                        b.state = DemonState::Charge;
                        b.state_entered = per.now;
                    }
                }
                DemonState::Charge => {
                    b.direction = b.charge_dir;
                    if elapsed > DEMON_CHARGE_SECS {
                        b.direction = Vec2::ZERO;
                        b.state = DemonState::Rest;
                        b.state_entered = per.now;
                    }
                }
                DemonState::Rest => {
                    b.direction = Vec2::ZERO;
                    if elapsed > DEMON_REST_SECS {
                        b.state = DemonState::Wander;
                        b.state_entered = per.now;
                        b.direction = wander_direction(rng);
                        b.last_wander_change = per.now;
                    }
                }
            }
        }

        Brain::Bat(b) => {
            let elapsed = per.now - b.state_entered;
            match b.state {
                BatState::Idle => {
                    // Flutter in place with a slight oscillation.
                    b.flutter_phase += BAT_FLUTTER_STEP;
                    b.direction = Vec2::new(
                        (b.flutter_phase * 1.3).sin() * 0.8,
                        b.flutter_phase.cos() * 0.6,
                    );
                    if per.dist_to_player < BAT_DETECT_RADIUS && elapsed > b.idle_duration {
                        b.swoop_dir = per.dir_to_player;
                        b.state = BatState::Swoop;
                        b.state_entered = per.now;
                    }
                }
                BatState::Swoop => {
                    // Perpendicular wobble makes the dive erratic.
                    let t = elapsed / BAT_SWOOP_SECS;
                    let wave = (t * BAT_WOBBLE_FREQ).sin() * BAT_WOBBLE_AMP;
                    let perp = Vec2::new(-b.swoop_dir.y, b.swoop_dir.x);
                    b.direction = b.swoop_dir + perp * wave;
                    if elapsed > BAT_SWOOP_SECS {
                        b.direction = -b.swoop_dir;
                        b.state = BatState::Retreat;
                        b.state_entered = per.now;
                    }
                }
                BatState::Retreat => {
                    if elapsed > BAT_RETREAT_SECS {
                        b.state = BatState::Idle;
                        b.state_entered = per.now;
                        b.idle_duration =
                            rng.gen_range(BAT_IDLE_AGAIN_SECS.0..BAT_IDLE_AGAIN_SECS.1);
                    }
                }
            }
        }

        Brain::Centipede(b) => {
            match b.state {
                CentipedeState::Slither => {
                    if per.now - b.last_turn > CENTIPEDE_TURN_SECS {
                        b.direction = random_direction(rng);
                        b.last_turn = per.now;
                    }
                    if per.dist_to_player < CENTIPEDE_DETECT_RADIUS {
                        b.state = CentipedeState::Pursue;
                        b.state_entered = per.now;
                    }
                }
                CentipedeState::Pursue => {
                    // Gradual steering toward the player, renormalized.
                    b.direction += (per.dir_to_player - b.direction) * CENTIPEDE_STEER;
                    if b.direction.length_squared() > f32::EPSILON {
                        b.direction = b.direction.normalize();
                    }
                    if per.dist_to_player > CENTIPEDE_DETECT_RADIUS * CENTIPEDE_DISENGAGE_FACTOR {
                        b.state = CentipedeState::Slither;
                        b.state_entered = per.now;
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{BatBrain, CentipedeBrain, DemonBrain};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::VecDeque;

    fn demon_brain() -> Brain {
        Brain::Demon(DemonBrain {
            state: DemonState::Wander,
            state_entered: 0.0,
            direction: Vec2::X,
            last_wander_change: 0.0,
            charge_dir: Vec2::ZERO,
        })
    }

    fn perceive(now: f32, dist: f32) -> Perception {
        Perception {
            now,
            dist_to_player: dist,
            dir_to_player: Vec2::X,
        }
    }

    fn dummy_entity() -> Entity {
        let mut w = World::new();
        w.spawn(())
    }

    #[test]
    fn demon_walks_the_full_cycle() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut events = EventQueue::new();
        let e = dummy_entity();
        let mut brain = demon_brain();

        // Player inside the detection radius: wander -> notice.
        step_brain(e, &mut brain, &perceive(1.0, 150.0), &mut rng, &mut events);
        let Brain::Demon(b) = &brain else { unreachable!() };
        assert_eq!(b.state, DemonState::Notice);
        assert_eq!(b.direction, Vec2::ZERO);
        assert!(!events.is_empty(), "notice should emit an event");

        // Staring long enough commits to a charge toward the player.
        step_brain(e, &mut brain, &perceive(1.0 + DEMON_NOTICE_SECS + 0.1, 150.0), &mut rng, &mut events);
        let Brain::Demon(b) = &brain else { unreachable!() };
        assert_eq!(b.state, DemonState::Charge);
        assert_eq!(b.charge_dir, Vec2::X);

        // Charge runs its fixed duration, then rests.
        let charge_started = b.state_entered;
        step_brain(e, &mut brain, &perceive(charge_started + DEMON_CHARGE_SECS + 0.1, 150.0), &mut rng, &mut events);
        let Brain::Demon(b) = &brain else { unreachable!() };
        assert_eq!(b.state, DemonState::Rest);

        let rest_started = b.state_entered;
        step_brain(e, &mut brain, &perceive(rest_started + DEMON_REST_SECS + 0.1, 500.0), &mut rng, &mut events);
        let Brain::Demon(b) = &brain else { unreachable!() };
        assert_eq!(b.state, DemonState::Wander);
    }

    #[test]
    fn demon_notice_has_hysteresis() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut events = EventQueue::new();
        let e = dummy_entity();
        let mut brain = demon_brain();

        step_brain(e, &mut brain, &perceive(1.0, 150.0), &mut rng, &mut events);
        let Brain::Demon(b) = &brain else { unreachable!() };
        assert_eq!(b.state, DemonState::Notice);

        // Just past the detect radius is NOT enough to disengage...
        step_brain(e, &mut brain, &perceive(1.1, DEMON_DETECT_RADIUS + 10.0), &mut rng, &mut events);
        let Brain::Demon(b) = &brain else { unreachable!() };
        assert_eq!(b.state, DemonState::Notice);

        // ...but past 1.5x it is.
        step_brain(
            e,
            &mut brain,
            &perceive(1.2, DEMON_DETECT_RADIUS * DEMON_DISENGAGE_FACTOR + 1.0),
            &mut rng,
            &mut events,
        );
        let Brain::Demon(b) = &brain else { unreachable!() };
        assert_eq!(b.state, DemonState::Wander);
    }

    #[test]
    fn bat_swoops_then_retreats_then_idles() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut events = EventQueue::new();
        let e = dummy_entity();
        let mut brain = Brain::Bat(BatBrain {
            state: BatState::Idle,
            state_entered: 0.0,
            direction: Vec2::ZERO,
            flutter_phase: 0.0,
            swoop_dir: Vec2::ZERO,
            idle_duration: 1.0,
        });

        // Close player but idle timer not elapsed: keep fluttering.
        step_brain(e, &mut brain, &perceive(0.5, 100.0), &mut rng, &mut events);
        let Brain::Bat(b) = &brain else { unreachable!() };
        assert_eq!(b.state, BatState::Idle);
        assert!(b.direction.length() > 0.0, "flutter should move the bat");

        step_brain(e, &mut brain, &perceive(1.5, 100.0), &mut rng, &mut events);
        let Brain::Bat(b) = &brain else { unreachable!() };
        assert_eq!(b.state, BatState::Swoop);
        assert_eq!(b.swoop_dir, Vec2::X);

        let swoop_started = b.state_entered;
        step_brain(e, &mut brain, &perceive(swoop_started + BAT_SWOOP_SECS + 0.1, 100.0), &mut rng, &mut events);
        let Brain::Bat(b) = &brain else { unreachable!() };
        assert_eq!(b.state, BatState::Retreat);
        assert_eq!(b.direction, -Vec2::X);

        let retreat_started = b.state_entered;
        step_brain(e, &mut brain, &perceive(retreat_started + BAT_RETREAT_SECS + 0.1, 100.0), &mut rng, &mut events);
        let Brain::Bat(b) = &brain else { unreachable!() };
        assert_eq!(b.state, BatState::Idle);
        assert!(b.idle_duration >= BAT_IDLE_AGAIN_SECS.0 && b.idle_duration <= BAT_IDLE_AGAIN_SECS.1);
    }

    #[test]
    fn centipede_pursues_and_disengages_at_double_radius() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut events = EventQueue::new();
        let e = dummy_entity();
        let mut brain = Brain::Centipede(CentipedeBrain {
            state: CentipedeState::Slither,
            state_entered: 0.0,
            direction: -Vec2::Y,
            last_turn: 0.0,
            wave_phase: 0.0,
            segments: 7,
            max_segments: 7,
            trail: VecDeque::new(),
        });

        step_brain(e, &mut brain, &perceive(1.0, 100.0), &mut rng, &mut events);
        let Brain::Centipede(b) = &brain else { unreachable!() };
        assert_eq!(b.state, CentipedeState::Pursue);

        // Steering bends the heading toward the player a little each tick.
        let before = b.direction;
        step_brain(e, &mut brain, &perceive(1.1, 100.0), &mut rng, &mut events);
        let Brain::Centipede(b) = &brain else { unreachable!() };
        assert!(b.direction.x > before.x);
        assert!((b.direction.length() - 1.0).abs() < 1e-5);

        // Still pursuing just past the detect radius (hysteresis)...
        step_brain(e, &mut brain, &perceive(1.2, CENTIPEDE_DETECT_RADIUS + 20.0), &mut rng, &mut events);
        let Brain::Centipede(b) = &brain else { unreachable!() };
        assert_eq!(b.state, CentipedeState::Pursue);

        // ...until twice the radius.
        step_brain(
            e,
            &mut brain,
            &perceive(1.3, CENTIPEDE_DETECT_RADIUS * CENTIPEDE_DISENGAGE_FACTOR + 1.0),
            &mut rng,
            &mut events,
        );
        let Brain::Centipede(b) = &brain else { unreachable!() };
        assert_eq!(b.state, CentipedeState::Slither);
    }
}

//! Steering application and collision resolution.
//!
//! Ground movers resolve obstacles one axis at a time: apply the X
//! displacement and clamp against every overlapping box, then do the
//! same for Y. Resolving per-axis keeps a mover from slipping
//! diagonally through the corner of a single obstacle. Flyers skip
//! obstacles entirely but bounce off the world bounds, and the
//! centipede drags its trail behind a weaving head.

use glam::Vec2;
use hecs::World;

use crate::components::{
    Brain, CentipedeBrain, Dying, Enemy, Hitbox, Obstacle, Pose, Position, Rect,
};
use crate::constants::*;

/// Normalize a vector, or fall back to a fixed direction for
/// zero-length input (never faults).
pub fn normalize_or(v: Vec2, fallback: Vec2) -> Vec2 {
    if v.length_squared() > f32::EPSILON {
        v.normalize()
    } else {
        fallback
    }
}

/// Snapshot all static obstacle boxes for this frame
pub fn collect_obstacle_rects(world: &World) -> Vec<Rect> {
    world
        .query::<(&Position, &Hitbox, &Obstacle)>()
        .iter()
        .map(|(_, (pos, hb, _))| hb.rect_at(pos))
        .collect()
}

/// Move a ground entity with axis-separated obstacle clamping
pub fn move_ground(pos: &mut Position, hitbox: &Hitbox, dir: Vec2, speed: f32, obstacles: &[Rect]) {
    if dir.length_squared() < f32::EPSILON {
        return;
    }
    let dir = dir.normalize();
    let mut rect = hitbox.rect_at(pos);

    rect.center.x += dir.x * speed;
    for obs in obstacles {
        if rect.overlaps(obs) {
            if dir.x > 0.0 {
                rect.center.x = obs.left() - rect.half.x;
            } else if dir.x < 0.0 {
                rect.center.x = obs.right() + rect.half.x;
            }
        }
    }

    rect.center.y += dir.y * speed;
    for obs in obstacles {
        if rect.overlaps(obs) {
            if dir.y > 0.0 {
                rect.center.y = obs.top() - rect.half.y;
            } else if dir.y < 0.0 {
                rect.center.y = obs.bottom() + rect.half.y;
            }
        }
    }

    pos.set(rect.center);
}

/// Move a flying entity: no obstacle collision, but clamp to the world
/// bounds and reflect the offending direction component on contact.
pub fn move_flying(
    pos: &mut Position,
    hitbox: &Hitbox,
    dir: &mut Vec2,
    speed: f32,
    bounds: &Rect,
) {
    if dir.length_squared() > f32::EPSILON {
        *dir = dir.normalize();
    }
    let mut rect = hitbox.rect_at(pos);
    rect.center += *dir * speed;

    let (hit_x, hit_y) = rect.clamp_into(bounds);
    if hit_x {
        dir.x = -dir.x;
    }
    if hit_y {
        dir.y = -dir.y;
    }

    pos.set(rect.center);
}

/// Move the centipede head: forward motion plus a perpendicular sine
/// wave, obstacle contact reverses course, and the trail records the
/// path for the body segments to follow.
pub fn move_centipede(
    pos: &mut Position,
    hitbox: &Hitbox,
    brain: &mut CentipedeBrain,
    speed: f32,
    obstacles: &[Rect],
    bounds: &Rect,
) {
    if brain.direction.length_squared() > f32::EPSILON {
        brain.direction = brain.direction.normalize();
    }

    brain.wave_phase += CENTIPEDE_WAVE_STEP;
    let perp = Vec2::new(-brain.direction.y, brain.direction.x);
    let wave = perp * brain.wave_phase.sin() * CENTIPEDE_WAVE_AMP;

    let mut rect = hitbox.rect_at(pos);
    rect.center += brain.direction * speed + wave;

    for obs in obstacles {
        if rect.overlaps(obs) {
            brain.direction = -brain.direction;
            rect.center += brain.direction * speed * 2.0;
            break;
        }
    }

    rect.clamp_into(bounds);
    pos.set(rect.center);

    brain.trail.push_front(rect.center);
    let max_trail = brain.segments as usize * CENTIPEDE_TRAIL_PER_SEGMENT;
    brain.trail.truncate(max_trail);
}

/// Apply each living enemy's steering for this frame
pub fn update_enemy_movement(world: &mut World, obstacles: &[Rect], bounds: &Rect) {
    puffin::profile_function!();

    for (_, (pos, hitbox, pose, enemy, dying)) in world.query_mut::<(
        &mut Position,
        &Hitbox,
        &mut Pose,
        &mut Enemy,
        Option<&Dying>,
    )>() {
        if dying.is_some() {
            continue;
        }
        let speed = enemy.brain.speed();
        match &mut enemy.brain {
            Brain::Demon(b) => {
                move_ground(pos, hitbox, b.direction, speed, obstacles);
                pose.face_movement(b.direction);
            }
            Brain::Bat(b) => {
                move_flying(pos, hitbox, &mut b.direction, speed, bounds);
                pose.face_movement(b.direction);
            }
            Brain::Centipede(b) => {
                move_centipede(pos, hitbox, b, speed, obstacles, bounds);
                pose.face_movement(b.direction);
            }
        }
    }
}

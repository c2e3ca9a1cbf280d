//! ECS components for the simulation core.
//!
//! Components are plain data; all behavior lives in the systems modules.
//! Presentation layers read `Pose`, `Dying::progress`, and the hit-flash
//! counters to pick visual frames - nothing here draws anything.

use glam::Vec2;
use hecs::Entity;
use serde::Deserialize;
use std::collections::{HashMap, HashSet, VecDeque};

use crate::constants::*;

/// Axis-aligned box stored as center + half extents. Y grows downward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub center: Vec2,
    pub half: Vec2,
}

impl Rect {
    pub fn new(center: Vec2, size: Vec2) -> Self {
        Self {
            center,
            half: size * 0.5,
        }
    }

    pub fn left(&self) -> f32 {
        self.center.x - self.half.x
    }

    pub fn right(&self) -> f32 {
        self.center.x + self.half.x
    }

    pub fn top(&self) -> f32 {
        self.center.y - self.half.y
    }

    pub fn bottom(&self) -> f32 {
        self.center.y + self.half.y
    }

    pub fn overlaps(&self, other: &Rect) -> bool {
        (self.center.x - other.center.x).abs() < self.half.x + other.half.x
            && (self.center.y - other.center.y).abs() < self.half.y + other.half.y
    }

    /// Clamp this rect inside `bounds`. Returns which axes were clamped.
    pub fn clamp_into(&mut self, bounds: &Rect) -> (bool, bool) {
        let mut hit_x = false;
        let mut hit_y = false;
        if self.left() < bounds.left() {
            self.center.x = bounds.left() + self.half.x;
            hit_x = true;
        } else if self.right() > bounds.right() {
            self.center.x = bounds.right() - self.half.x;
            hit_x = true;
        }
        if self.top() < bounds.top() {
            self.center.y = bounds.top() + self.half.y;
            hit_y = true;
        } else if self.bottom() > bounds.bottom() {
            self.center.y = bounds.bottom() - self.half.y;
            hit_y = true;
        }
        (hit_x, hit_y)
    }
}

/// World-space center of an entity, in pixels.
#[derive(Debug, Clone, Copy)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn vec(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn set(&mut self, v: Vec2) {
        self.x = v.x;
        self.y = v.y;
    }
}

/// Collision half-extents; the box is always centered on the entity's
/// `Position` (the hitbox never drifts from the logical position).
#[derive(Debug, Clone, Copy)]
pub struct Hitbox {
    pub half_w: f32,
    pub half_h: f32,
}

impl Hitbox {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            half_w: width * 0.5,
            half_h: height * 0.5,
        }
    }

    pub fn rect_at(&self, pos: &Position) -> Rect {
        Rect {
            center: pos.vec(),
            half: Vec2::new(self.half_w, self.half_h),
        }
    }
}

/// Cardinal facing, derived from the dominant movement axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facing {
    Up,
    Down,
    Left,
    Right,
}

impl Facing {
    /// Unit vector for this facing (Y grows downward)
    pub fn vec(&self) -> Vec2 {
        match self {
            Facing::Up => Vec2::new(0.0, -1.0),
            Facing::Down => Vec2::new(0.0, 1.0),
            Facing::Left => Vec2::new(-1.0, 0.0),
            Facing::Right => Vec2::new(1.0, 0.0),
        }
    }
}

/// What the animation layer should be playing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimMode {
    Idle,
    Walk,
    Attack,
}

/// Facing + animation mode as an explicit pair (no status strings).
#[derive(Debug, Clone, Copy)]
pub struct Pose {
    pub facing: Facing,
    pub mode: AnimMode,
}

impl Pose {
    pub fn new(facing: Facing) -> Self {
        Self {
            facing,
            mode: AnimMode::Idle,
        }
    }

    /// Update from a movement direction. Near-zero movement keeps the last
    /// facing and drops back to idle; otherwise the dominant axis wins.
    pub fn face_movement(&mut self, dir: Vec2) {
        if dir.length_squared() < 0.01 {
            if self.mode == AnimMode::Walk {
                self.mode = AnimMode::Idle;
            }
            return;
        }
        self.facing = if dir.x.abs() > dir.y.abs() {
            if dir.x > 0.0 {
                Facing::Right
            } else {
                Facing::Left
            }
        } else if dir.y > 0.0 {
            Facing::Down
        } else {
            Facing::Up
        };
        if self.mode != AnimMode::Attack {
            self.mode = AnimMode::Walk;
        }
    }

    /// Unit vector for the current facing.
    pub fn facing_vec(&self) -> Vec2 {
        self.facing.vec()
    }
}

/// Health component, shared by the player and enemies.
#[derive(Debug, Clone, Copy)]
pub struct Health {
    pub current: i32,
    pub max: i32,
}

impl Health {
    pub fn new(max: i32) -> Self {
        Self { current: max, max }
    }

    pub fn heal(&mut self, amount: i32) {
        self.current = (self.current + amount).min(self.max);
    }

    pub fn is_full(&self) -> bool {
        self.current >= self.max
    }
}

/// Mana pool with a fractional regen accumulator. Regen is credited in
/// whole points only; the carry never exceeds one point.
#[derive(Debug, Clone, Copy)]
pub struct Mana {
    pub current: i32,
    pub max: i32,
    carry: f32,
}

impl Mana {
    pub fn new(max: i32) -> Self {
        Self {
            current: max,
            max,
            carry: 0.0,
        }
    }

    pub fn regen(&mut self, per_second: f32, dt: f32) {
        if self.current >= self.max {
            self.carry = 0.0;
            return;
        }
        self.carry += per_second * dt;
        while self.carry >= 1.0 && self.current < self.max {
            self.carry -= 1.0;
            self.current += 1;
        }
    }

    pub fn spend(&mut self, cost: i32) -> bool {
        if self.current < cost {
            return false;
        }
        self.current -= cost;
        true
    }

    pub fn restore_full(&mut self) {
        self.current = self.max;
        self.carry = 0.0;
    }
}

/// Player marker component.
#[derive(Debug, Clone, Copy)]
pub struct Player;

/// Level / XP progression. `xp_to_next` grows by the configured factor
/// (floored to an integer) on every level-up.
#[derive(Debug, Clone, Copy)]
pub struct Experience {
    pub level: u32,
    pub xp: u32,
    pub xp_to_next: u32,
}

impl Experience {
    pub fn new() -> Self {
        Self {
            level: 1,
            xp: 0,
            xp_to_next: XP_FIRST_THRESHOLD,
        }
    }
}

impl Default for Experience {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-enemy-kind kill tally, read by the HUD and the level objectives.
#[derive(Debug, Clone, Default)]
pub struct KillCounter {
    pub by_kind: HashMap<EnemyKind, u32>,
}

impl KillCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, kind: EnemyKind) {
        *self.by_kind.entry(kind).or_insert(0) += 1;
    }

    pub fn total(&self) -> u32 {
        self.by_kind.values().sum()
    }
}

/// Melee weapon identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeaponKind {
    Sword,
    Spear,
}

impl WeaponKind {
    pub fn damage(&self) -> i32 {
        match self {
            WeaponKind::Sword => SWORD_DAMAGE,
            WeaponKind::Spear => SPEAR_DAMAGE,
        }
    }

    /// How long the attack locks the player, in seconds.
    pub fn cooldown(&self) -> f32 {
        match self {
            WeaponKind::Sword => SWORD_COOLDOWN,
            WeaponKind::Spear => SPEAR_COOLDOWN,
        }
    }

    /// Hitbox size as (reach, cross-width). Sword sweeps a wide short
    /// arc; the spear thrusts a narrow long line.
    pub fn hitbox(&self) -> (f32, f32) {
        match self {
            WeaponKind::Sword => (SWORD_ARC_REACH, SWORD_ARC_WIDTH),
            WeaponKind::Spear => (SPEAR_REACH, SPEAR_WIDTH),
        }
    }
}

/// Spell identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpellKind {
    FireCone,
    IceBall,
    ShadowBlade,
}

impl SpellKind {
    pub fn damage(&self) -> i32 {
        match self {
            SpellKind::FireCone => FIRE_CONE_DAMAGE,
            SpellKind::IceBall => ICE_BALL_DAMAGE,
            SpellKind::ShadowBlade => SHADOW_BLADE_DAMAGE,
        }
    }

    pub fn cooldown(&self) -> f32 {
        match self {
            SpellKind::FireCone => FIRE_CONE_COOLDOWN,
            SpellKind::IceBall => ICE_BALL_COOLDOWN,
            SpellKind::ShadowBlade => SHADOW_BLADE_COOLDOWN,
        }
    }

    pub fn mana_cost(&self) -> i32 {
        match self {
            SpellKind::FireCone => FIRE_CONE_COST,
            SpellKind::IceBall => ICE_BALL_COST,
            SpellKind::ShadowBlade => SHADOW_BLADE_COST,
        }
    }

    /// Whether one instance may damage many enemies.
    pub fn piercing(&self) -> bool {
        matches!(self, SpellKind::FireCone)
    }

    pub fn lifetime_frames(&self) -> u32 {
        match self {
            SpellKind::FireCone => FIRE_CONE_LIFETIME,
            SpellKind::IceBall => ICE_BALL_LIFETIME,
            SpellKind::ShadowBlade => SHADOW_BLADE_LIFETIME,
        }
    }

    pub fn rune(&self) -> Rune {
        match self {
            SpellKind::FireCone => Rune::FireCone,
            SpellKind::IceBall => Rune::IceBall,
            SpellKind::ShadowBlade => Rune::ShadowBlade,
        }
    }
}

/// Collectible rune unlocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rune {
    Spear,
    FireCone,
    IceBall,
    ShadowBlade,
}

/// Equipped weapon/spell plus the set of collected runes. The ring menu
/// (out of scope here) drives `equip_weapon`/`equip_spell`.
#[derive(Debug, Clone)]
pub struct Equipment {
    pub weapon: WeaponKind,
    pub spell: SpellKind,
    pub runes: HashSet<Rune>,
}

impl Equipment {
    pub fn new() -> Self {
        Self {
            weapon: WeaponKind::Sword,
            spell: SpellKind::FireCone,
            runes: HashSet::new(),
        }
    }

    pub fn collect_rune(&mut self, rune: Rune) {
        self.runes.insert(rune);
    }

    pub fn weapon_unlocked(&self, kind: WeaponKind) -> bool {
        match kind {
            WeaponKind::Sword => true,
            WeaponKind::Spear => self.runes.contains(&Rune::Spear),
        }
    }

    pub fn spell_unlocked(&self, kind: SpellKind) -> bool {
        self.runes.contains(&kind.rune())
    }

    /// Equip a weapon if its rune has been collected.
    pub fn equip_weapon(&mut self, kind: WeaponKind) -> bool {
        if !self.weapon_unlocked(kind) {
            return false;
        }
        self.weapon = kind;
        true
    }

    /// Equip a spell if its rune has been collected.
    pub fn equip_spell(&mut self, kind: SpellKind) -> bool {
        if !self.spell_unlocked(kind) {
            return false;
        }
        self.spell = kind;
        true
    }
}

impl Default for Equipment {
    fn default() -> Self {
        Self::new()
    }
}

/// Attack/cast animation lock. Movement input is ignored while engaged;
/// the lock clears once the active cooldown has elapsed.
#[derive(Debug, Clone, Copy)]
pub struct ActionLock {
    pub attacking: bool,
    pub casting_magic: bool,
    pub started_at: f32,
    pub cooldown: f32,
}

impl ActionLock {
    pub fn idle() -> Self {
        Self {
            attacking: false,
            casting_magic: false,
            started_at: 0.0,
            cooldown: 0.0,
        }
    }

    pub fn engage(&mut self, now: f32, cooldown: f32, casting: bool) {
        self.attacking = true;
        self.casting_magic = casting;
        self.started_at = now;
        self.cooldown = cooldown;
    }

    pub fn expired(&self, now: f32) -> bool {
        now - self.started_at >= self.cooldown
    }

    pub fn clear(&mut self) {
        self.attacking = false;
        self.casting_magic = false;
    }
}

/// Knockback push + invulnerability window on the player. Zero frames on
/// both means inactive.
#[derive(Debug, Clone, Copy)]
pub struct Knockback {
    pub dir: Vec2,
    pub frames_left: u32,
    pub invuln_frames: u32,
}

impl Knockback {
    pub fn none() -> Self {
        Self {
            dir: Vec2::ZERO,
            frames_left: 0,
            invuln_frames: 0,
        }
    }

    pub fn active(&self) -> bool {
        self.frames_left > 0
    }

    pub fn invulnerable(&self) -> bool {
        self.invuln_frames > 0
    }
}

/// Enemy archetypes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnemyKind {
    Demon,
    Bat,
    Centipede,
}

impl EnemyKind {
    pub fn label(&self) -> &'static str {
        match self {
            EnemyKind::Demon => "demon",
            EnemyKind::Bat => "bat",
            EnemyKind::Centipede => "centipede",
        }
    }

    /// Death animation length, in frames.
    pub fn death_frames(&self) -> u32 {
        match self {
            EnemyKind::Demon => DEMON_DEATH_FRAMES,
            EnemyKind::Bat => BAT_DEATH_FRAMES,
            EnemyKind::Centipede => CENTIPEDE_DEATH_FRAMES,
        }
    }

    /// Cosmetic white-flash length on a surviving hit, in frames.
    pub fn flash_frames(&self) -> u32 {
        match self {
            EnemyKind::Demon => DEMON_FLASH_FRAMES,
            EnemyKind::Bat => BAT_FLASH_FRAMES,
            EnemyKind::Centipede => CENTIPEDE_FLASH_FRAMES,
        }
    }
}

/// Demon phases: patrol until the player is close, stare them down, rush
/// in a straight line, then catch breath.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemonState {
    Wander,
    Notice,
    Charge,
    Rest,
}

#[derive(Debug, Clone)]
pub struct DemonBrain {
    pub state: DemonState,
    pub state_entered: f32,
    pub direction: Vec2,
    pub last_wander_change: f32,
    pub charge_dir: Vec2,
}

/// Bat phases: flutter in place, dive at the player, fly off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatState {
    Idle,
    Swoop,
    Retreat,
}

#[derive(Debug, Clone)]
pub struct BatBrain {
    pub state: BatState,
    pub state_entered: f32,
    pub direction: Vec2,
    pub flutter_phase: f32,
    pub swoop_dir: Vec2,
    /// Randomized; re-rolled each time the bat returns to idle.
    pub idle_duration: f32,
}

/// Centipede phases: aimless slither, then a steered pursuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CentipedeState {
    Slither,
    Pursue,
}

#[derive(Debug, Clone)]
pub struct CentipedeBrain {
    pub state: CentipedeState,
    pub state_entered: f32,
    pub direction: Vec2,
    pub last_turn: f32,
    pub wave_phase: f32,
    /// Rendered body segments; shrinks with each hit, never below one.
    pub segments: u32,
    pub max_segments: u32,
    /// Past head positions, newest first. Body segments sample this.
    pub trail: VecDeque<Vec2>,
}

impl CentipedeBrain {
    /// World positions for each rendered segment, head first, sampling
    /// the trail at intervals proportional to the segment index.
    pub fn segment_positions(&self) -> Vec<Vec2> {
        (0..self.segments as usize)
            .filter_map(|i| {
                let idx = i * CENTIPEDE_TRAIL_PER_SEGMENT;
                self.trail.get(idx).or_else(|| self.trail.back()).copied()
            })
            .collect()
    }
}

/// Archetype-specific AI state, stepped by a single dispatch function in
/// `systems::ai`.
#[derive(Debug, Clone)]
pub enum Brain {
    Demon(DemonBrain),
    Bat(BatBrain),
    Centipede(CentipedeBrain),
}

impl Brain {
    /// Current steering direction (not necessarily normalized).
    pub fn direction(&self) -> Vec2 {
        match self {
            Brain::Demon(b) => b.direction,
            Brain::Bat(b) => b.direction,
            Brain::Centipede(b) => b.direction,
        }
    }

    /// Movement speed for the current phase, in pixels per tick.
    pub fn speed(&self) -> f32 {
        match self {
            Brain::Demon(b) => {
                if b.state == DemonState::Charge {
                    DEMON_CHARGE_SPEED
                } else {
                    DEMON_SPEED
                }
            }
            Brain::Bat(b) => {
                if b.state == BatState::Swoop {
                    BAT_SWOOP_SPEED
                } else {
                    BAT_SPEED
                }
            }
            Brain::Centipede(b) => {
                if b.state == CentipedeState::Pursue {
                    CENTIPEDE_PURSUE_SPEED
                } else {
                    CENTIPEDE_SPEED
                }
            }
        }
    }
}

/// An enemy in the world. Stats are copied from its `EnemyDef` at spawn.
#[derive(Debug, Clone)]
pub struct Enemy {
    pub kind: EnemyKind,
    pub contact_damage: i32,
    pub xp_value: u32,
    pub brain: Brain,
    /// Cosmetic flash frames remaining after a surviving hit.
    pub hit_flash: u32,
}

/// Terminal death animation. While present the entity takes no damage,
/// runs no AI, and accepts no input; it despawns when the timer expires.
#[derive(Debug, Clone, Copy)]
pub struct Dying {
    pub frames: u32,
    pub duration: u32,
}

impl Dying {
    pub fn new(duration: u32) -> Self {
        Self { frames: 0, duration }
    }

    /// 0.0 at death, 1.0 at despawn; drives the shrink/fade visual.
    pub fn progress(&self) -> f32 {
        self.frames as f32 / self.duration.max(1) as f32
    }

    pub fn finished(&self) -> bool {
        self.frames >= self.duration
    }
}

/// Active melee swing. Spawned on attack, destroyed when the attack lock
/// clears. The hit-set keeps one swing from damaging an enemy twice.
#[derive(Debug, Clone)]
pub struct MeleeAttack {
    pub kind: WeaponKind,
    pub damage: i32,
    pub already_hit: HashSet<Entity>,
}

impl MeleeAttack {
    pub fn new(kind: WeaponKind) -> Self {
        Self {
            kind,
            damage: kind.damage(),
            already_hit: HashSet::new(),
        }
    }
}

/// How a spell instance moves each frame.
#[derive(Debug, Clone)]
pub enum SpellMotion {
    /// Stationary area anchored in front of the caster.
    Cone,
    /// Straight-line projectile.
    Bolt { velocity: Vec2 },
    /// Steers toward `target` (straight line when none), weaving a
    /// perpendicular sine wave around the homing path.
    Homing {
        velocity: Vec2,
        target: Option<Entity>,
        base_pos: Vec2,
    },
}

/// Active spell instance.
#[derive(Debug, Clone)]
pub struct SpellEffect {
    pub kind: SpellKind,
    pub damage: i32,
    pub piercing: bool,
    pub already_hit: HashSet<Entity>,
    pub age: u32,
    pub lifetime: u32,
    pub motion: SpellMotion,
}

/// World pickups.
#[derive(Debug, Clone, Copy)]
pub enum PickupKind {
    Health { heal: i32 },
    Rune(Rune),
}

#[derive(Debug, Clone, Copy)]
pub struct Pickup {
    pub kind: PickupKind,
}

/// Static collision box. No behavior.
#[derive(Debug, Clone, Copy)]
pub struct Obstacle;

/// Cave mouth that periodically releases demons, up to a live cap.
#[derive(Debug, Clone)]
pub struct CaveSpawner {
    pub interval: f32,
    pub max_alive: usize,
    pub last_spawn: f32,
    pub spawned: Vec<Entity>,
}

/// Exit portal; spawned once the level objective is met.
#[derive(Debug, Clone, Copy)]
pub struct Portal;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_overlap_and_clamp() {
        let a = Rect::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
        let b = Rect::new(Vec2::new(8.0, 0.0), Vec2::new(10.0, 10.0));
        let c = Rect::new(Vec2::new(30.0, 0.0), Vec2::new(10.0, 10.0));
        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c));

        let bounds = Rect::new(Vec2::ZERO, Vec2::new(100.0, 100.0));
        let mut r = Rect::new(Vec2::new(60.0, 0.0), Vec2::new(10.0, 10.0));
        let (hit_x, hit_y) = r.clamp_into(&bounds);
        assert!(hit_x && !hit_y);
        assert_eq!(r.right(), bounds.right());
    }

    #[test]
    fn pose_faces_dominant_axis() {
        let mut pose = Pose::new(Facing::Down);
        pose.face_movement(Vec2::new(1.0, 0.3));
        assert_eq!(pose.facing, Facing::Right);
        assert_eq!(pose.mode, AnimMode::Walk);

        pose.face_movement(Vec2::new(0.2, -0.9));
        assert_eq!(pose.facing, Facing::Up);

        // Zero movement keeps facing and drops to idle.
        pose.face_movement(Vec2::ZERO);
        assert_eq!(pose.facing, Facing::Up);
        assert_eq!(pose.mode, AnimMode::Idle);
    }

    #[test]
    fn mana_regen_accumulates_whole_points() {
        let mut mana = Mana::new(10);
        mana.current = 0;
        // 1.0/s sampled at 4 Hz: three ticks bank 0.75, no credit yet.
        for _ in 0..3 {
            mana.regen(1.0, 0.25);
            assert_eq!(mana.current, 0);
        }
        mana.regen(1.0, 0.25);
        assert_eq!(mana.current, 1);
    }

    #[test]
    fn mana_regen_caps_at_max() {
        let mut mana = Mana::new(3);
        mana.current = 2;
        for _ in 0..600 {
            mana.regen(5.0, 1.0 / 60.0);
        }
        assert_eq!(mana.current, 3);
    }

    #[test]
    fn equipment_requires_runes() {
        let mut eq = Equipment::new();
        assert!(eq.weapon_unlocked(WeaponKind::Sword));
        assert!(!eq.equip_weapon(WeaponKind::Spear));
        assert!(!eq.equip_spell(SpellKind::IceBall));

        eq.collect_rune(Rune::Spear);
        eq.collect_rune(Rune::IceBall);
        assert!(eq.equip_weapon(WeaponKind::Spear));
        assert!(eq.equip_spell(SpellKind::IceBall));
        assert_eq!(eq.weapon, WeaponKind::Spear);
        assert_eq!(eq.spell, SpellKind::IceBall);
    }

    #[test]
    fn centipede_segment_sampling_follows_trail() {
        let mut brain = CentipedeBrain {
            state: CentipedeState::Slither,
            state_entered: 0.0,
            direction: Vec2::X,
            last_turn: 0.0,
            wave_phase: 0.0,
            segments: 3,
            max_segments: 3,
            trail: VecDeque::new(),
        };
        for i in 0..12 {
            brain.trail.push_back(Vec2::new(i as f32, 0.0));
        }
        let segs = brain.segment_positions();
        assert_eq!(segs.len(), 3);
        assert_eq!(segs[0], Vec2::new(0.0, 0.0));
        assert_eq!(segs[1], Vec2::new(4.0, 0.0));
        assert_eq!(segs[2], Vec2::new(8.0, 0.0));
    }
}

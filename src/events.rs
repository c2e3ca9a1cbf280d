//! Game event system for decoupled communication between systems.
//!
//! Systems emit events during the frame; the embedding shell drains them
//! afterwards to drive VFX, audio, and UI without tight coupling.

use glam::Vec2;
use hecs::Entity;

use crate::components::{EnemyKind, PickupKind, SpellKind, WeaponKind};

/// Game events that systems can emit and subscribers can consume
#[derive(Debug, Clone)]
pub enum GameEvent {
    /// An enemy spotted the player (drives the "!" indicator and cue)
    EnemyNoticed { entity: Entity },
    /// An enemy took damage and survived
    EnemyHit {
        entity: Entity,
        damage: i32,
        position: Vec2,
    },
    /// An enemy entered its death animation; XP has been granted
    EnemyDied {
        entity: Entity,
        kind: EnemyKind,
        position: Vec2,
    },
    /// A cave spawner released a new enemy
    EnemySpawned { entity: Entity, position: Vec2 },
    /// The player swung the equipped weapon
    WeaponSwung { kind: WeaponKind },
    /// The player cast a spell (mana already deducted)
    SpellCast { kind: SpellKind },
    /// The player took damage (after armor)
    PlayerDamaged { damage: i32, hp_left: i32 },
    /// The player's death animation started
    PlayerDied,
    /// The player leveled up (HP/MP fully restored)
    LevelUp { new_level: u32 },
    /// A pickup was collected; the collection cue should play.
    /// Not emitted for a health pickup refused at full HP.
    PickupCollected { kind: PickupKind, position: Vec2 },
    /// The level objective was met and the exit portal appeared
    PortalOpened { position: Vec2 },
}

/// Simple event queue - events are pushed during update, processed at end of frame
#[derive(Default)]
pub struct EventQueue {
    events: Vec<GameEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Push an event to be processed later
    pub fn push(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Drain all events for processing
    pub fn drain(&mut self) -> impl Iterator<Item = GameEvent> + '_ {
        self.events.drain(..)
    }

    /// Check if there are pending events
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

//! Level definitions and loading.
//!
//! A `LevelConfig` is static data supplied externally: placements for
//! enemies, pickups, spawners and rocks, the win objective, and the exit
//! portal. Configs can be loaded from JSON or taken from the built-in
//! four-level campaign. Tile CSV parsing for terrain art is a
//! presentation concern and lives outside this crate; collision here is
//! the perimeter wall plus the configured rock tiles.

use serde::Deserialize;

use crate::components::{EnemyKind, Rect, Rune};
use crate::constants::*;
use glam::Vec2;

/// Where an enemy starts
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct EnemyPlacement {
    pub kind: EnemyKind,
    pub pos: (f32, f32),
}

/// What a pickup grants
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PickupSpec {
    Health,
    Rune { rune: Rune },
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PickupPlacement {
    #[serde(flatten)]
    pub pickup: PickupSpec,
    pub pos: (f32, f32),
}

/// A cave spawner: tile position, spawn interval, live cap
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct SpawnerPlacement {
    pub col: u32,
    pub row: u32,
    pub interval: f32,
    pub max_alive: usize,
}

impl SpawnerPlacement {
    pub fn world_pos(&self) -> Vec2 {
        Vec2::new(
            (self.col as f32 + 0.5) * TILE_SIZE,
            (self.row as f32 + 0.5) * TILE_SIZE,
        )
    }
}

/// Win condition for a level
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Objective {
    /// Every placed or spawned enemy must be dead
    KillAll,
    /// A fixed number of kills within the level
    KillCount { count: u32 },
}

/// One level of the campaign
#[derive(Debug, Clone, Deserialize)]
pub struct LevelConfig {
    pub name: String,
    pub player_pos: (f32, f32),
    #[serde(default)]
    pub enemies: Vec<EnemyPlacement>,
    #[serde(default)]
    pub pickups: Vec<PickupPlacement>,
    #[serde(default)]
    pub spawners: Vec<SpawnerPlacement>,
    /// Interior rock tiles (col, row); the perimeter wall is implicit
    #[serde(default)]
    pub rocks: Vec<(u32, u32)>,
    pub objective: Objective,
    pub portal_pos: (f32, f32),
    /// Index of the next level; `None` means the campaign ends here
    pub next_level: Option<usize>,
}

/// Load a level config from a JSON file
pub fn load_level(path: &std::path::Path) -> Result<LevelConfig, String> {
    let json_str = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
    serde_json::from_str(&json_str)
        .map_err(|e| format!("Failed to parse {}: {}", path.display(), e))
}

/// Playable world area: the full tile grid inset by one tile of wall
pub fn world_bounds() -> Rect {
    let w = WORLD_COLS as f32 * TILE_SIZE;
    let h = WORLD_ROWS as f32 * TILE_SIZE;
    Rect::new(
        Vec2::new(w * 0.5, h * 0.5),
        Vec2::new(w - 2.0 * WORLD_MARGIN, h - 2.0 * WORLD_MARGIN),
    )
}

/// The built-in four-level campaign
pub fn campaign() -> Vec<LevelConfig> {
    use EnemyKind::*;

    let rocks = vec![(6, 6), (7, 6), (13, 9), (14, 9), (5, 13), (12, 4)];

    vec![
        LevelConfig {
            name: "The Meadow".into(),
            player_pos: (100.0, 200.0),
            enemies: vec![
                EnemyPlacement { kind: Demon, pos: (400.0, 350.0) },
                EnemyPlacement { kind: Demon, pos: (700.0, 300.0) },
                EnemyPlacement { kind: Bat, pos: (550.0, 200.0) },
            ],
            pickups: vec![
                PickupPlacement { pickup: PickupSpec::Rune { rune: Rune::Spear }, pos: (250.0, 400.0) },
                PickupPlacement { pickup: PickupSpec::Rune { rune: Rune::FireCone }, pos: (500.0, 150.0) },
                PickupPlacement { pickup: PickupSpec::Health, pos: (450.0, 500.0) },
            ],
            spawners: vec![],
            rocks: rocks.clone(),
            objective: Objective::KillAll,
            portal_pos: (700.0, 180.0),
            next_level: Some(1),
        },
        LevelConfig {
            name: "Dark Woods".into(),
            player_pos: (100.0, 200.0),
            enemies: vec![
                EnemyPlacement { kind: Demon, pos: (350.0, 350.0) },
                EnemyPlacement { kind: Demon, pos: (600.0, 400.0) },
                EnemyPlacement { kind: Bat, pos: (400.0, 200.0) },
                EnemyPlacement { kind: Bat, pos: (750.0, 350.0) },
                EnemyPlacement { kind: Centipede, pos: (500.0, 600.0) },
            ],
            pickups: vec![
                PickupPlacement { pickup: PickupSpec::Rune { rune: Rune::IceBall }, pos: (750.0, 600.0) },
                PickupPlacement { pickup: PickupSpec::Health, pos: (300.0, 700.0) },
                PickupPlacement { pickup: PickupSpec::Health, pos: (650.0, 250.0) },
            ],
            spawners: vec![SpawnerPlacement { col: 10, row: 17, interval: 5.0, max_alive: 3 }],
            rocks: rocks.clone(),
            objective: Objective::KillCount { count: 8 },
            portal_pos: (700.0, 180.0),
            next_level: Some(2),
        },
        LevelConfig {
            name: "The Swarm".into(),
            player_pos: (100.0, 200.0),
            enemies: vec![
                EnemyPlacement { kind: Bat, pos: (300.0, 250.0) },
                EnemyPlacement { kind: Bat, pos: (500.0, 300.0) },
                EnemyPlacement { kind: Bat, pos: (700.0, 250.0) },
                EnemyPlacement { kind: Centipede, pos: (400.0, 500.0) },
                EnemyPlacement { kind: Centipede, pos: (600.0, 700.0) },
                EnemyPlacement { kind: Demon, pos: (350.0, 650.0) },
                EnemyPlacement { kind: Demon, pos: (700.0, 500.0) },
            ],
            pickups: vec![
                PickupPlacement { pickup: PickupSpec::Rune { rune: Rune::ShadowBlade }, pos: (200.0, 800.0) },
                PickupPlacement { pickup: PickupSpec::Health, pos: (500.0, 400.0) },
                PickupPlacement { pickup: PickupSpec::Health, pos: (300.0, 600.0) },
            ],
            spawners: vec![SpawnerPlacement { col: 10, row: 17, interval: 3.5, max_alive: 4 }],
            rocks: rocks.clone(),
            objective: Objective::KillCount { count: 12 },
            portal_pos: (700.0, 180.0),
            next_level: Some(3),
        },
        LevelConfig {
            name: "Demon's Gate".into(),
            player_pos: (100.0, 200.0),
            enemies: vec![
                EnemyPlacement { kind: Demon, pos: (300.0, 300.0) },
                EnemyPlacement { kind: Demon, pos: (500.0, 300.0) },
                EnemyPlacement { kind: Demon, pos: (700.0, 300.0) },
                EnemyPlacement { kind: Demon, pos: (400.0, 500.0) },
                EnemyPlacement { kind: Bat, pos: (600.0, 200.0) },
                EnemyPlacement { kind: Bat, pos: (200.0, 400.0) },
                EnemyPlacement { kind: Centipede, pos: (500.0, 700.0) },
                EnemyPlacement { kind: Centipede, pos: (300.0, 600.0) },
            ],
            pickups: vec![
                PickupPlacement { pickup: PickupSpec::Health, pos: (400.0, 400.0) },
                PickupPlacement { pickup: PickupSpec::Health, pos: (600.0, 600.0) },
                PickupPlacement { pickup: PickupSpec::Health, pos: (200.0, 700.0) },
            ],
            spawners: vec![
                SpawnerPlacement { col: 5, row: 17, interval: 3.0, max_alive: 3 },
                SpawnerPlacement { col: 15, row: 17, interval: 3.0, max_alive: 3 },
            ],
            rocks,
            objective: Objective::KillAll,
            portal_pos: (640.0, 180.0),
            next_level: None,
        },
    ]
}

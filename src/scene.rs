//! Scene lifecycle and the entity spawner
//!
//! A scene goes through three capabilities invoked by an external host:
//! `load` (parse the level bundle text assets), `build` (collision grid,
//! entity spawn, player + star setup, input capability check), and
//! `on_tick` (delegate to the simulation). No inheritance; the host just
//! calls the three methods in order.

use std::collections::HashMap;

use glam::Vec2;
use thiserror::Error;

use crate::consts::*;
use crate::level::bundle::{PLAYER_SHEET, STAR_TYPE};
use crate::level::{EntityRecord, LevelBundle, LevelError, LevelSource};
use crate::sim::{GameState, TickInput, tick};

/// Scene construction errors (load-time fatal).
#[derive(Debug, Error)]
pub enum SceneError {
    #[error(transparent)]
    Level(#[from] LevelError),

    /// An entity record references a visual nobody configured. The engine
    /// underneath would render it as garbage silently; we fail the build.
    #[error("entity type {0:?} has no configured visual")]
    UnknownEntityType(String),

    #[error("mount point {0:?} not found in the page")]
    MissingContainer(String),

    /// Checked once at build instead of branching on every tick.
    #[error("no keyboard input available on this page")]
    KeyboardUnavailable,
}

/// Player animation keys
pub const ANIM_LEFT: &str = "left";
pub const ANIM_TURN: &str = "turn";
pub const ANIM_RIGHT: &str = "right";

/// One registered animation: an inclusive frame range on the sheet.
#[derive(Debug, Clone)]
pub struct AnimationConfig {
    pub key: &'static str,
    pub first_frame: u32,
    pub last_frame: u32,
    pub frame_rate: u32,
    pub looped: bool,
}

impl AnimationConfig {
    /// Frame to display `elapsed_ticks` into the animation (60 Hz ticks).
    pub fn frame_at(&self, elapsed_ticks: u64) -> u32 {
        let count = self.last_frame - self.first_frame + 1;
        if count == 1 || self.frame_rate == 0 {
            return self.first_frame;
        }
        let ticks_per_frame = (60 / self.frame_rate).max(1) as u64;
        let step = elapsed_ticks / ticks_per_frame;
        if self.looped {
            self.first_frame + (step % count as u64) as u32
        } else {
            self.first_frame + (step as u32).min(count - 1)
        }
    }
}

/// Visual configuration for one entity type: sheet, frame size, animations.
#[derive(Debug, Clone)]
pub struct SpriteConfig {
    pub sheet: String,
    pub frame_w: u32,
    pub frame_h: u32,
    pub anims: Vec<AnimationConfig>,
}

impl SpriteConfig {
    pub fn anim(&self, key: &str) -> Option<&AnimationConfig> {
        self.anims.iter().find(|a| a.key == key)
    }
}

/// Maps entity type identifiers to configured visuals. Each distinct type
/// an entity document uses must be registered before the scene builds.
#[derive(Debug, Default)]
pub struct VisualRegistry {
    visuals: HashMap<String, SpriteConfig>,
}

impl VisualRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The stock registry: the sock player sheet with its three
    /// animations, and the star collectible.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(
            "sock",
            SpriteConfig {
                sheet: PLAYER_SHEET.to_string(),
                frame_w: PLAYER_FRAME_W,
                frame_h: PLAYER_FRAME_H,
                anims: vec![
                    AnimationConfig {
                        key: ANIM_LEFT,
                        first_frame: 0,
                        last_frame: 3,
                        frame_rate: 10,
                        looped: true,
                    },
                    AnimationConfig {
                        key: ANIM_TURN,
                        first_frame: 4,
                        last_frame: 4,
                        frame_rate: 20,
                        looped: false,
                    },
                    AnimationConfig {
                        key: ANIM_RIGHT,
                        first_frame: 5,
                        last_frame: 8,
                        frame_rate: 10,
                        looped: true,
                    },
                ],
            },
        );
        registry.register(
            STAR_TYPE,
            SpriteConfig {
                sheet: "assets/star.png".to_string(),
                frame_w: 24,
                frame_h: 22,
                anims: Vec::new(),
            },
        );
        registry
    }

    pub fn register(&mut self, type_id: &str, config: SpriteConfig) {
        self.visuals.insert(type_id.to_string(), config);
    }

    pub fn get(&self, type_id: &str) -> Option<&SpriteConfig> {
        self.visuals.get(type_id)
    }

    pub fn contains(&self, type_id: &str) -> bool {
        self.visuals.contains_key(type_id)
    }
}

/// One dynamic object instantiated from an entity record.
#[derive(Debug, Clone)]
pub struct SpawnedEntity {
    pub type_id: String,
    pub pos: Vec2,
}

/// Instantiate one dynamic object per record at its literal pixel position.
///
/// An identifier with no registered visual fails the whole build; the
/// records themselves are never mutated.
pub fn spawn_entities(
    records: &[EntityRecord],
    registry: &VisualRegistry,
) -> Result<Vec<SpawnedEntity>, SceneError> {
    records
        .iter()
        .map(|record| {
            if !registry.contains(&record.identifier) {
                return Err(SceneError::UnknownEntityType(record.identifier.clone()));
            }
            Ok(SpawnedEntity {
                type_id: record.identifier.clone(),
                pos: Vec2::new(record.px[0], record.px[1]),
            })
        })
        .collect()
}

/// A built scene: simulation state plus the spawned decoration entities.
pub struct Scene {
    pub state: GameState,
    pub entities: Vec<SpawnedEntity>,
    pub registry: VisualRegistry,
    pub source: LevelSource,
}

impl Scene {
    /// Load capability: parse the bundle's two text assets into a level
    /// source. Hosts that run the hand-placed layout skip this.
    pub fn load(entity_json: &str, grid_csv: &str) -> Result<LevelSource, SceneError> {
        Ok(LevelSource::Ldtk(LevelBundle::from_parts(
            entity_json,
            grid_csv,
        )?))
    }

    /// Build capability: materialize collision geometry, spawn entities,
    /// place the player and the star set. `keyboard_available` is the
    /// host's one-time input capability probe.
    pub fn build(
        source: LevelSource,
        registry: VisualRegistry,
        seed: u64,
        keyboard_available: bool,
    ) -> Result<Self, SceneError> {
        if !keyboard_available {
            return Err(SceneError::KeyboardUnavailable);
        }

        let entities = spawn_entities(source.entities(), &registry)?;

        let mut state = GameState::new(seed);
        state.install_solids(source.solids());
        state.spawn_stars(&source.star_columns());

        log::info!(
            "scene built: {} solids, {} stars, {} entities, seed {}",
            state.solids.len(),
            state.stars.len(),
            entities.len(),
            seed
        );

        Ok(Self {
            state,
            entities,
            registry,
            source,
        })
    }

    /// Tick capability: delegate to the simulation.
    pub fn on_tick(&mut self, input: &TickInput, dt: f32) {
        tick(&mut self.state, input, dt);
    }

    /// Displayed score text, e.g. `"Score: 30"`.
    pub fn score_label(&self) -> String {
        self.state.score_label()
    }

    /// Current player sheet frame, from the animation registry.
    pub fn player_frame(&self) -> u32 {
        let key = self.state.player.anim.key();
        self.registry
            .get("sock")
            .and_then(|sprite| sprite.anim(key))
            .map(|anim| anim.frame_at(self.state.time_ticks))
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn star_records(n: usize) -> Vec<EntityRecord> {
        (0..n)
            .map(|i| EntityRecord {
                identifier: STAR_TYPE.to_string(),
                px: [12.0 + i as f32 * 70.0, 0.0],
            })
            .collect()
    }

    #[test]
    fn test_spawn_entities_literal_positions() {
        let records = star_records(5);
        let spawned = spawn_entities(&records, &VisualRegistry::with_defaults()).unwrap();
        assert_eq!(spawned.len(), 5);
        for (record, entity) in records.iter().zip(&spawned) {
            assert_eq!(entity.pos, Vec2::new(record.px[0], record.px[1]));
            assert_eq!(entity.type_id, record.identifier);
        }
    }

    #[test]
    fn test_spawn_unknown_type_is_fatal() {
        let records = vec![EntityRecord {
            identifier: "Bomb".to_string(),
            px: [100.0, 100.0],
        }];
        let err = spawn_entities(&records, &VisualRegistry::with_defaults()).unwrap_err();
        assert!(matches!(err, SceneError::UnknownEntityType(id) if id == "Bomb"));
    }

    #[test]
    fn test_build_without_keyboard_fails_fast() {
        let result = Scene::build(
            LevelSource::HandPlaced,
            VisualRegistry::with_defaults(),
            1,
            false,
        );
        assert!(matches!(result, Err(SceneError::KeyboardUnavailable)));
    }

    #[test]
    fn test_build_hand_placed() {
        let scene = Scene::build(
            LevelSource::HandPlaced,
            VisualRegistry::with_defaults(),
            1,
            true,
        )
        .unwrap();
        assert_eq!(scene.state.solids.len(), 4);
        assert_eq!(scene.state.stars.len(), crate::consts::STAR_COUNT);
        assert!(scene.entities.is_empty());
    }

    #[test]
    fn test_load_then_build_ldtk() {
        let json = r#"{ "entities": [
            { "__identifier": "Star", "px": [96, 0] },
            { "__identifier": "Star", "px": [160, 0] }
        ] }"#;
        let csv = "0,0,0\n1,1,1\n";

        let source = Scene::load(json, csv).unwrap();
        let scene =
            Scene::build(source, VisualRegistry::with_defaults(), 7, true).unwrap();

        assert_eq!(scene.state.solids.len(), 3);
        assert_eq!(scene.state.stars.len(), 2);
        assert_eq!(scene.entities.len(), 2);
    }

    #[test]
    fn test_anim_frame_selection() {
        let registry = VisualRegistry::with_defaults();
        let left = registry.get("sock").unwrap().anim(ANIM_LEFT).unwrap();
        // 10 fps at 60 Hz: 6 ticks per frame, looping over frames 0..=3
        assert_eq!(left.frame_at(0), 0);
        assert_eq!(left.frame_at(6), 1);
        assert_eq!(left.frame_at(18), 3);
        assert_eq!(left.frame_at(24), 0);

        let turn = registry.get("sock").unwrap().anim(ANIM_TURN).unwrap();
        assert_eq!(turn.frame_at(999), 4);
    }
}

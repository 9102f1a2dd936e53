//! Level bundle assembly and the two level-representation strategies
//!
//! Asset paths are fixed under a configured base directory, matching the
//! LDtk simplified export layout. The hand-placed layout is the alternate
//! design from early prototyping; the two never coexist at runtime.

use glam::Vec2;

use super::data::LevelData;
use super::grid::IntGrid;
use super::LevelError;
use crate::consts::*;
use crate::sim::collision::Aabb;

/// Base directory for the level asset bundle
pub const LEVEL_BASE: &str = "levels/level01/simplified/AutoLayer/";

/// The full merged level image
pub const COMPOSITE_IMAGE: &str = "_composite.png";
/// Individual layers (optional)
pub const BACKGROUND_IMAGE: &str = "_bg.png";
pub const TILES_IMAGE: &str = "AutoLayer.png";
/// IntGrid visual (debug only, optional)
pub const INTGRID_IMAGE: &str = "IntGrid_layer-int.png";
/// Entities + metadata
pub const ENTITY_DOCUMENT: &str = "data.json";
/// IntGrid CSV for collisions
pub const INTGRID_CSV: &str = "IntGrid_layer.csv";

/// Player sprite sheet (32x48 frames)
pub const PLAYER_SHEET: &str = "assets/sock.png";

/// Entity identifier for collectible stars
pub const STAR_TYPE: &str = "Star";

/// A fully parsed level region: entity document + collision grid.
#[derive(Debug, Clone)]
pub struct LevelBundle {
    pub data: LevelData,
    pub grid: IntGrid,
}

impl LevelBundle {
    /// Parse and cross-validate the two text assets of the bundle.
    ///
    /// When the entity document reports pixel dimensions, the grid extent
    /// at [`CELL_SIZE`] must match them exactly. This catches a cell-size
    /// mismatch at load time instead of letting it silently misalign all
    /// collision geometry.
    pub fn from_parts(entity_json: &str, grid_csv: &str) -> Result<Self, LevelError> {
        let data = LevelData::parse(entity_json)?;
        let grid = IntGrid::parse(grid_csv)?;

        if let (Some(level_w), Some(level_h)) = (data.width, data.height) {
            let grid_w = grid.width as f32 * CELL_SIZE;
            let grid_h = grid.height as f32 * CELL_SIZE;
            if grid_w != level_w || grid_h != level_h {
                return Err(LevelError::GridMisaligned {
                    grid_w,
                    grid_h,
                    level_w,
                    level_h,
                    cell_size: CELL_SIZE,
                });
            }
        }

        log::info!(
            "level bundle parsed: {}x{} grid, {} entities",
            grid.width,
            grid.height,
            data.entities.len()
        );

        Ok(Self { data, grid })
    }

    /// Collision solids for every non-zero grid cell.
    pub fn solids(&self) -> Vec<Aabb> {
        self.grid.solids(CELL_SIZE)
    }
}

/// Which level representation a deployment runs. The two are mutually
/// exclusive alternate designs, not layered features.
#[derive(Debug, Clone)]
pub enum LevelSource {
    /// Composite image + IntGrid collisions + entity document
    Ldtk(LevelBundle),
    /// The classic four-platform layout with a row of stars
    HandPlaced,
}

impl LevelSource {
    /// Static collision geometry for this level.
    pub fn solids(&self) -> Vec<Aabb> {
        match self {
            LevelSource::Ldtk(bundle) => bundle.solids(),
            LevelSource::HandPlaced => hand_placed_platforms(),
        }
    }

    /// Horizontal star positions. Stars always drop in from the spawn row;
    /// only their columns come from the level.
    pub fn star_columns(&self) -> Vec<f32> {
        match self {
            LevelSource::Ldtk(bundle) => bundle
                .data
                .entities
                .iter()
                .filter(|e| e.identifier == STAR_TYPE)
                .map(|e| e.px[0])
                .collect(),
            LevelSource::HandPlaced => (0..STAR_COUNT)
                .map(|i| STAR_START_X + i as f32 * STAR_STEP_X)
                .collect(),
        }
    }

    /// Entity records to run through the spawner (empty for hand-placed).
    pub fn entities(&self) -> &[super::EntityRecord] {
        match self {
            LevelSource::Ldtk(bundle) => &bundle.data.entities,
            LevelSource::HandPlaced => &[],
        }
    }
}

/// The hand-placed platform layout: one double-width ground slab and
/// three floating platforms (platform image is 400x32, ground scaled x2).
fn hand_placed_platforms() -> Vec<Aabb> {
    vec![
        Aabb::new(Vec2::new(400.0, 568.0), Vec2::new(400.0, 32.0)),
        Aabb::new(Vec2::new(600.0, 400.0), Vec2::new(200.0, 16.0)),
        Aabb::new(Vec2::new(50.0, 250.0), Vec2::new(200.0, 16.0)),
        Aabb::new(Vec2::new(750.0, 220.0), Vec2::new(200.0, 16.0)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_parts_valid() {
        let json = r#"{ "entities": [{ "__identifier": "Star", "px": [48, 0] }] }"#;
        let csv = "0,0\n1,1\n";
        let bundle = LevelBundle::from_parts(json, csv).unwrap();
        assert_eq!(bundle.solids().len(), 2);
    }

    #[test]
    fn test_from_parts_cell_size_mismatch() {
        // 2x2 grid at cell size 32 covers 64x64 px, not 800x600
        let json = r#"{ "entities": [], "width": 800, "height": 600 }"#;
        let csv = "0,1\n1,0\n";
        assert!(matches!(
            LevelBundle::from_parts(json, csv),
            Err(LevelError::GridMisaligned { .. })
        ));
    }

    #[test]
    fn test_hand_placed_star_columns() {
        let source = LevelSource::HandPlaced;
        let columns = source.star_columns();
        assert_eq!(columns.len(), STAR_COUNT);
        assert_eq!(columns[0], STAR_START_X);
        assert_eq!(columns[1], STAR_START_X + STAR_STEP_X);
    }

    #[test]
    fn test_ldtk_star_columns_filter_by_type() {
        let json = r#"{ "entities": [
            { "__identifier": "Star", "px": [96, 0] },
            { "__identifier": "Door", "px": [640, 480] },
            { "__identifier": "Star", "px": [160, 0] }
        ] }"#;
        let bundle = LevelBundle::from_parts(json, "0\n").unwrap();
        let columns = LevelSource::Ldtk(bundle).star_columns();
        assert_eq!(columns, vec![96.0, 160.0]);
    }
}

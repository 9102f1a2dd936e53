//! Game state and core simulation types
//!
//! All state that must survive a snapshot (and everything the tick mutates)
//! lives here.

use glam::Vec2;
use rand::Rng;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use crate::consts::*;

/// Player visual/motion state, recomputed each tick from current input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlayerAnim {
    #[default]
    Idle,
    MovingLeft,
    MovingRight,
}

impl PlayerAnim {
    /// Animation key on the player sprite sheet.
    pub fn key(&self) -> &'static str {
        match self {
            PlayerAnim::Idle => "turn",
            PlayerAnim::MovingLeft => "left",
            PlayerAnim::MovingRight => "right",
        }
    }
}

/// The single player entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Rebound factor on landing
    pub bounce: f32,
    /// Resting on a supporting surface, derived from collision each tick
    pub on_ground: bool,
    pub anim: PlayerAnim,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec2::new(PLAYER_SPAWN_X, PLAYER_SPAWN_Y),
            vel: Vec2::ZERO,
            bounce: PLAYER_BOUNCE,
            on_ground: false,
            anim: PlayerAnim::Idle,
        }
    }
}

impl Player {
    /// Collision half extents (one 32x48 sheet frame).
    #[inline]
    pub fn half() -> Vec2 {
        Vec2::new(
            PLAYER_FRAME_W as f32 / 2.0,
            PLAYER_FRAME_H as f32 / 2.0,
        )
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, Self::half())
    }
}

/// Star collision half extents
pub const STAR_HALF: f32 = 11.0;

/// A collectible star. Deactivated on player overlap, reactivated in bulk
/// once the whole set is exhausted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collectible {
    pub id: u32,
    /// Original horizontal position, kept for reactivation
    pub spawn_x: f32,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Vertical rebound factor, redrawn from the RNG on each (re)activation
    pub bounce_y: f32,
    pub active: bool,
}

impl Collectible {
    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, Vec2::splat(STAR_HALF))
    }
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Seeded RNG, the only randomness source in the simulation
    pub rng: Pcg32,
    /// Score (+10 per star), monotone within a run
    pub score: u64,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Terminal flag: while set, the update loop is a no-op
    pub game_over: bool,
    pub player: Player,
    /// Static collision geometry; created once, never destroyed mid-level
    pub solids: Vec<Aabb>,
    /// The collectible set, in spawn order
    pub stars: Vec<Collectible>,
}

impl GameState {
    /// Create an empty game state with the given seed.
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            score: 0,
            time_ticks: 0,
            game_over: false,
            player: Player::default(),
            solids: Vec::new(),
            stars: Vec::new(),
        }
    }

    /// Install the level's static collision geometry.
    pub fn install_solids(&mut self, solids: Vec<Aabb>) {
        self.solids = solids;
    }

    /// Spawn the collectible set, one star per column, dropping in from
    /// the spawn row with a fresh random bounce factor each.
    pub fn spawn_stars(&mut self, columns: &[f32]) {
        self.stars = columns
            .iter()
            .enumerate()
            .map(|(i, &x)| Collectible {
                id: i as u32,
                spawn_x: x,
                pos: Vec2::new(x, STAR_SPAWN_Y),
                vel: Vec2::ZERO,
                bounce_y: self.rng.random_range(STAR_BOUNCE_MIN..STAR_BOUNCE_MAX),
                active: true,
            })
            .collect();
    }

    /// Re-arm the whole collectible set: every star returns to its original
    /// column at the spawn row with a freshly drawn bounce factor.
    pub fn reactivate_stars(&mut self) {
        for star in &mut self.stars {
            star.active = true;
            star.pos = Vec2::new(star.spawn_x, STAR_SPAWN_Y);
            star.vel = Vec2::ZERO;
            star.bounce_y = self.rng.random_range(STAR_BOUNCE_MIN..STAR_BOUNCE_MAX);
        }
    }

    pub fn active_stars(&self) -> usize {
        self.stars.iter().filter(|s| s.active).count()
    }

    /// Displayed score text.
    pub fn score_label(&self) -> String {
        format!("Score: {}", self.score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_stars_bounce_in_range() {
        let mut state = GameState::new(42);
        state.spawn_stars(&[12.0, 82.0, 152.0]);
        assert_eq!(state.stars.len(), 3);
        assert_eq!(state.active_stars(), 3);
        for star in &state.stars {
            assert!(star.bounce_y >= STAR_BOUNCE_MIN && star.bounce_y < STAR_BOUNCE_MAX);
            assert_eq!(star.pos.y, STAR_SPAWN_Y);
            assert_eq!(star.pos.x, star.spawn_x);
        }
    }

    #[test]
    fn test_spawn_stars_deterministic_per_seed() {
        let mut a = GameState::new(7);
        let mut b = GameState::new(7);
        a.spawn_stars(&[12.0, 82.0]);
        b.spawn_stars(&[12.0, 82.0]);
        assert_eq!(a.stars[0].bounce_y, b.stars[0].bounce_y);
        assert_eq!(a.stars[1].bounce_y, b.stars[1].bounce_y);
    }

    #[test]
    fn test_score_label() {
        let mut state = GameState::new(1);
        assert_eq!(state.score_label(), "Score: 0");
        state.score = 30;
        assert_eq!(state.score_label(), "Score: 30");
    }
}

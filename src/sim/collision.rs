//! Axis-aligned collision detection and resolution
//!
//! Everything collidable here is a box: grid cells, platforms, the player,
//! stars. Resolution pushes the moving box out along the axis of least
//! penetration and reports the contact normal (screen coordinates, +y down,
//! so a normal with `y < 0` means the moving box is resting on top).

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned box, stored as center + half extents.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub center: Vec2,
    pub half: Vec2,
}

impl Aabb {
    pub fn new(center: Vec2, half: Vec2) -> Self {
        Self { center, half }
    }

    /// The solid for grid cell (row, col): a `cell` x `cell` box centered
    /// at `(col*cell + cell/2, row*cell + cell/2)`.
    pub fn from_cell(row: usize, col: usize, cell: f32) -> Self {
        Self {
            center: Vec2::new(
                col as f32 * cell + cell / 2.0,
                row as f32 * cell + cell / 2.0,
            ),
            half: Vec2::splat(cell / 2.0),
        }
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        self.center - self.half
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.center + self.half
    }

    /// Overlap test (strict: touching edges do not count).
    pub fn overlaps(&self, other: &Aabb) -> bool {
        let d = (self.center - other.center).abs();
        let reach = self.half + other.half;
        d.x < reach.x && d.y < reach.y
    }
}

/// Result of resolving a moving box against a solid.
#[derive(Debug, Clone, Copy)]
pub struct Contact {
    /// Translation that separates the moving box from the solid
    pub push: Vec2,
    /// Unit normal on the solid's surface, pointing toward the moving box
    pub normal: Vec2,
    /// Penetration depth along the resolved axis
    pub penetration: f32,
}

/// Resolve `moving` against `solid`, if they overlap.
///
/// Picks the axis of least penetration; ties resolve vertically, which
/// keeps a box sliding along the seam between adjacent grid cells from
/// snagging on their shared corner.
pub fn resolve_aabb(moving: &Aabb, solid: &Aabb) -> Option<Contact> {
    let delta = moving.center - solid.center;
    let reach = moving.half + solid.half;
    let overlap_x = reach.x - delta.x.abs();
    let overlap_y = reach.y - delta.y.abs();

    if overlap_x <= 0.0 || overlap_y <= 0.0 {
        return None;
    }

    if overlap_y <= overlap_x {
        let dir = if delta.y < 0.0 { -1.0 } else { 1.0 };
        Some(Contact {
            push: Vec2::new(0.0, dir * overlap_y),
            normal: Vec2::new(0.0, dir),
            penetration: overlap_y,
        })
    } else {
        let dir = if delta.x < 0.0 { -1.0 } else { 1.0 };
        Some(Contact {
            push: Vec2::new(dir * overlap_x, 0.0),
            normal: Vec2::new(dir, 0.0),
            penetration: overlap_x,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap_basic() {
        let a = Aabb::new(Vec2::new(0.0, 0.0), Vec2::splat(10.0));
        let b = Aabb::new(Vec2::new(15.0, 0.0), Vec2::splat(10.0));
        let c = Aabb::new(Vec2::new(30.0, 0.0), Vec2::splat(10.0));
        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = Aabb::new(Vec2::new(0.0, 0.0), Vec2::splat(10.0));
        let b = Aabb::new(Vec2::new(20.0, 0.0), Vec2::splat(10.0));
        assert!(!a.overlaps(&b));
        assert!(resolve_aabb(&a, &b).is_none());
    }

    #[test]
    fn test_resolve_landing_from_above() {
        // Player box sunk 4 px into the top of a platform
        let player = Aabb::new(Vec2::new(100.0, 96.0), Vec2::new(16.0, 24.0));
        let platform = Aabb::new(Vec2::new(100.0, 132.0), Vec2::new(200.0, 16.0));

        let contact = resolve_aabb(&player, &platform).unwrap();
        assert_eq!(contact.normal, Vec2::new(0.0, -1.0));
        assert!((contact.push.y - (-4.0)).abs() < 1e-4);
        assert_eq!(contact.push.x, 0.0);
    }

    #[test]
    fn test_resolve_side_hit() {
        // Deep vertical overlap, shallow horizontal: push out sideways
        let player = Aabb::new(Vec2::new(70.0, 100.0), Vec2::new(16.0, 24.0));
        let wall = Aabb::new(Vec2::new(100.0, 100.0), Vec2::splat(16.0));

        let contact = resolve_aabb(&player, &wall).unwrap();
        assert_eq!(contact.normal, Vec2::new(-1.0, 0.0));
        assert!(contact.push.x < 0.0);
        assert_eq!(contact.push.y, 0.0);
    }

    #[test]
    fn test_resolve_ceiling_bump() {
        let player = Aabb::new(Vec2::new(100.0, 140.0), Vec2::new(16.0, 24.0));
        let block = Aabb::new(Vec2::new(100.0, 112.0), Vec2::splat(16.0));

        let contact = resolve_aabb(&player, &block).unwrap();
        assert_eq!(contact.normal, Vec2::new(0.0, 1.0));
        assert!(contact.push.y > 0.0);
    }

    #[test]
    fn test_from_cell_center() {
        let solid = Aabb::from_cell(3, 7, 32.0);
        assert_eq!(solid.center, Vec2::new(7.0 * 32.0 + 16.0, 3.0 * 32.0 + 16.0));
        assert_eq!(solid.half, Vec2::splat(16.0));
    }
}

//! Collision primitives and wall-sliding movement
//!
//! Actors are circles; walls are axis-aligned tile boxes. Movement against
//! walls resolves one axis at a time so actors slide along surfaces instead
//! of sticking in corners.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::tilemap::TileMap;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Square box around a centre point
    pub fn around(center: Vec2, half_extent: f32) -> Self {
        let half = Vec2::splat(half_extent);
        Self::new(center - half, center + half)
    }

    /// Strict overlap (touching edges do not count)
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }
}

/// True when two circles overlap
#[inline]
pub fn circles_overlap(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    let reach = ra + rb;
    a.distance_squared(b) < reach * reach
}

/// Move a circle by `vel * dt`, sliding along walls, then clamp to the map
///
/// The actor's box is the square around its centre with half extent
/// `radius`, capped at half a tile so every open tile fits any actor.
/// X is resolved first, then Y. An overlapping wall pushes the actor out
/// on the side its centre is on.
pub fn move_and_slide(pos: Vec2, vel: Vec2, radius: f32, dt: f32, map: &TileMap) -> Vec2 {
    let half = collision_half_extent(radius, map);
    let mut pos = pos;

    pos.x += vel.x * dt;
    for wall in map.walls_overlapping(&Aabb::around(pos, half)) {
        if pos.x < (wall.min.x + wall.max.x) * 0.5 {
            pos.x = pos.x.min(wall.min.x - half);
        } else {
            pos.x = pos.x.max(wall.max.x + half);
        }
    }

    pos.y += vel.y * dt;
    for wall in map.walls_overlapping(&Aabb::around(pos, half)) {
        if pos.y < (wall.min.y + wall.max.y) * 0.5 {
            pos.y = pos.y.min(wall.min.y - half);
        } else {
            pos.y = pos.y.max(wall.max.y + half);
        }
    }

    map.clamp_to_bounds(pos, half)
}

/// Half extent of an actor's wall box
#[inline]
pub fn collision_half_extent(radius: f32, map: &TileMap) -> f32 {
    radius.min(map.tile * 0.5)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circles_overlap() {
        assert!(circles_overlap(Vec2::ZERO, 5.0, Vec2::new(9.0, 0.0), 5.0));
        assert!(!circles_overlap(Vec2::ZERO, 5.0, Vec2::new(10.0, 0.0), 5.0));
    }

    #[test]
    fn test_aabb_intersects() {
        let a = Aabb::around(Vec2::ZERO, 1.0);
        assert!(a.intersects(&Aabb::around(Vec2::new(1.5, 0.0), 1.0)));
        assert!(!a.intersects(&Aabb::around(Vec2::new(2.0, 0.0), 1.0)));
    }

    #[test]
    fn test_slide_stops_at_wall() {
        // 10x10 map with 48px tiles, border walls only; inner space is 48..432
        let map = TileMap::empty(10, 10, 48.0);
        let start = Vec2::new(400.0, 240.0);
        let end = move_and_slide(start, Vec2::new(1000.0, 0.0), 10.0, 0.05, &map);
        assert_eq!(end.x, 432.0 - 10.0);
        assert_eq!(end.y, 240.0);
    }

    #[test]
    fn test_slide_keeps_free_axis() {
        let map = TileMap::empty(10, 10, 48.0);
        let start = Vec2::new(420.0, 240.0);
        // Pushing into the right wall while moving down still moves down
        let end = move_and_slide(start, Vec2::new(300.0, 300.0), 10.0, 0.1, &map);
        assert_eq!(end.x, 422.0);
        assert!((end.y - 270.0).abs() < 1e-3);
    }

    #[test]
    fn test_free_movement() {
        let map = TileMap::empty(10, 10, 48.0);
        let end = move_and_slide(Vec2::new(200.0, 200.0), Vec2::new(60.0, -60.0), 10.0, 0.5, &map);
        assert!((end - Vec2::new(230.0, 170.0)).length() < 1e-3);
    }

    #[test]
    fn test_wide_actor_holds_in_one_tile_gap() {
        // Walls either side of tile (4, 5); the actor is wider than a tile
        let mut map = TileMap::empty(10, 10, 48.0);
        map.set_wall(3, 5, true);
        map.set_wall(5, 5, true);
        let start = map.tile_center(4, 5);
        let mut pos = start;
        for vel in [Vec2::new(-170.0, 0.0), Vec2::new(170.0, 0.0)] {
            for _ in 0..30 {
                pos = move_and_slide(pos, vel, 26.0, 1.0 / 60.0, &map);
                assert_eq!(pos.x, start.x);
                assert!(!map.overlaps_wall(&Aabb::around(pos, collision_half_extent(26.0, &map))));
            }
        }
    }

    #[test]
    fn test_wide_actor_next_to_border_moves_with_velocity() {
        // One-tile corridor between the border and a wall column
        let mut map = TileMap::empty(10, 10, 48.0);
        for y in 1..9 {
            map.set_wall(2, y, true);
        }
        let start = map.tile_center(1, 5);
        let mut pos = start;
        let mut last_y = pos.y;
        for _ in 0..240 {
            pos = move_and_slide(pos, Vec2::new(170.0, 50.0), 26.0, 1.0 / 60.0, &map);
            assert_eq!(pos.x, start.x);
            assert!(pos.y >= last_y);
            assert!(!map.overlaps_wall(&Aabb::around(pos, collision_half_extent(26.0, &map))));
            last_y = pos.y;
        }
        // Slid down the border column to the bottom wall
        assert_eq!(pos.y, 9.0 * 48.0 - 24.0);
    }
}

//! Seeded tile arena
//!
//! Solid border, sparse wall blocks inside, and a large open plaza around
//! the centre where the player spawns.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use crate::consts::*;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TileMap {
    pub width: usize,
    pub height: usize,
    pub tile: f32,
    /// Row-major, true = wall
    walls: Vec<bool>,
}

impl TileMap {
    /// Map with only the border walls
    pub fn empty(width: usize, height: usize, tile: f32) -> Self {
        let mut map = Self {
            width,
            height,
            tile,
            walls: vec![false; width * height],
        };
        for y in 0..height {
            for x in 0..width {
                if x == 0 || y == 0 || x + 1 == width || y + 1 == height {
                    map.set_wall(x, y, true);
                }
            }
        }
        map
    }

    /// Generate the standard arena
    pub fn generate<R: Rng>(rng: &mut R) -> Self {
        let mut map = Self::empty(MAP_W, MAP_H, TILE);
        for y in 1..map.height - 1 {
            for x in 1..map.width - 1 {
                if rng.random_bool(WALL_DENSITY) {
                    map.set_wall(x, y, true);
                }
            }
        }

        let (cx, cy) = (map.width / 2, map.height / 2);
        for y in cy.saturating_sub(PLAZA_HALF_H)..=cy + PLAZA_HALF_H {
            for x in cx.saturating_sub(PLAZA_HALF_W)..=cx + PLAZA_HALF_W {
                if x > 0 && y > 0 && x + 1 < map.width && y + 1 < map.height {
                    map.set_wall(x, y, false);
                }
            }
        }
        map
    }

    pub fn is_wall(&self, x: usize, y: usize) -> bool {
        if x >= self.width || y >= self.height {
            return true;
        }
        self.walls[y * self.width + x]
    }

    pub fn set_wall(&mut self, x: usize, y: usize, wall: bool) {
        if x < self.width && y < self.height {
            self.walls[y * self.width + x] = wall;
        }
    }

    /// World-space size of the whole map
    pub fn world_size(&self) -> Vec2 {
        Vec2::new(self.width as f32 * self.tile, self.height as f32 * self.tile)
    }

    /// World-space centre of the map
    pub fn center(&self) -> Vec2 {
        self.tile_center(self.width / 2, self.height / 2)
    }

    pub fn tile_center(&self, x: usize, y: usize) -> Vec2 {
        Vec2::new(
            x as f32 * self.tile + self.tile / 2.0,
            y as f32 * self.tile + self.tile / 2.0,
        )
    }

    /// Clamp a circle centre so the circle stays inside the map
    pub fn clamp_to_bounds(&self, pos: Vec2, radius: f32) -> Vec2 {
        let size = self.world_size();
        Vec2::new(
            pos.x.clamp(radius, (size.x - radius).max(radius)),
            pos.y.clamp(radius, (size.y - radius).max(radius)),
        )
    }

    /// All open tiles, row-major
    pub fn free_tiles(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.height)
            .flat_map(move |y| (0..self.width).map(move |x| (x, y)))
            .filter(|&(x, y)| !self.is_wall(x, y))
    }

    /// Wall tiles overlapping a box
    pub fn walls_overlapping(&self, aabb: &Aabb) -> Vec<Aabb> {
        let mut out = Vec::new();
        if aabb.max.x <= 0.0 || aabb.max.y <= 0.0 {
            return out;
        }
        let x0 = (aabb.min.x / self.tile).floor().max(0.0) as usize;
        let y0 = (aabb.min.y / self.tile).floor().max(0.0) as usize;
        let x1 = ((aabb.max.x / self.tile).floor() as usize).min(self.width.saturating_sub(1));
        let y1 = ((aabb.max.y / self.tile).floor() as usize).min(self.height.saturating_sub(1));
        for y in y0..=y1 {
            for x in x0..=x1 {
                if self.is_wall(x, y) {
                    let wall = self.tile_aabb(x, y);
                    if wall.intersects(aabb) {
                        out.push(wall);
                    }
                }
            }
        }
        out
    }

    pub fn overlaps_wall(&self, aabb: &Aabb) -> bool {
        !self.walls_overlapping(aabb).is_empty()
    }

    fn tile_aabb(&self, x: usize, y: usize) -> Aabb {
        let min = Vec2::new(x as f32 * self.tile, y as f32 * self.tile);
        Aabb::new(min, min + Vec2::splat(self.tile))
    }

    /// Walls merged into horizontal runs, for drawing
    pub fn wall_runs(&self) -> Vec<Aabb> {
        let mut runs = Vec::new();
        for y in 0..self.height {
            let mut x = 0;
            while x < self.width {
                if self.is_wall(x, y) {
                    let start = x;
                    while x < self.width && self.is_wall(x, y) {
                        x += 1;
                    }
                    let min = Vec2::new(start as f32 * self.tile, y as f32 * self.tile);
                    let max = Vec2::new(x as f32 * self.tile, (y + 1) as f32 * self.tile);
                    runs.push(Aabb::new(min, max));
                } else {
                    x += 1;
                }
            }
        }
        runs
    }
}

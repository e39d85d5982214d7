//! Collision world: all stones plus the fixed rink walls
//!
//! Stones are stored in throw order and iterated in that order every step,
//! so identical inputs always produce identical positions.

use glam::Vec2;
use serde::Serialize;

use super::collision::{resolve_stone_pair, resolve_stone_wall};
use super::stone::Stone;
use super::wall::Wall;
use crate::consts::{RINK_HEIGHT, RINK_WIDTH};

/// A contact resolved during a step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Contact {
    /// Indices into the stone sequence, `first < second`
    Stones { first: usize, second: usize },
    /// Stone index and wall index
    Wall { stone: usize, wall: usize },
}

#[derive(Debug, Clone)]
pub struct CollisionWorld {
    stones: Vec<Stone>,
    walls: [Wall; 4],
    gravity: Vec2,
}

impl Default for CollisionWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl CollisionWorld {
    /// Empty world enclosed by the standard rink
    pub fn new() -> Self {
        Self {
            stones: Vec::new(),
            walls: Wall::rink(RINK_WIDTH, RINK_HEIGHT),
            gravity: Vec2::ZERO,
        }
    }

    pub fn stones(&self) -> &[Stone] {
        &self.stones
    }

    pub fn walls(&self) -> &[Wall; 4] {
        &self.walls
    }

    /// Always zero: the rink is viewed top-down
    pub fn gravity(&self) -> Vec2 {
        self.gravity
    }

    /// Append a stone; returns its index in throw order
    pub fn add_stone(&mut self, stone: Stone) -> usize {
        self.stones.push(stone);
        self.stones.len() - 1
    }

    /// Remove every stone (match reset)
    pub fn clear(&mut self) {
        self.stones.clear();
    }

    /// True when no stone is moving
    pub fn is_settled(&self) -> bool {
        self.stones.iter().all(|s| !s.is_moving())
    }

    pub fn total_kinetic_energy(&self) -> f32 {
        self.stones.iter().map(|s| s.body.kinetic_energy()).sum()
    }

    /// Advance the world by one fixed step.
    ///
    /// Order: integrate and apply friction to every stone, resolve stone
    /// pairs in (i, j) order with i < j, then resolve each stone against the
    /// walls in wall order. Returns the contacts resolved this step.
    pub fn step(&mut self, dt: f32) -> Vec<Contact> {
        let mut contacts = Vec::new();
        if self.stones.is_empty() {
            return contacts;
        }

        for stone in &mut self.stones {
            stone.body.integrate(dt);
            stone.apply_friction();
        }

        for i in 0..self.stones.len() {
            let (head, tail) = self.stones.split_at_mut(i + 1);
            let a = &mut head[i];
            for (offset, b) in tail.iter_mut().enumerate() {
                if resolve_stone_pair(a, b) {
                    contacts.push(Contact::Stones {
                        first: i,
                        second: i + 1 + offset,
                    });
                }
            }
        }

        for (stone_idx, stone) in self.stones.iter_mut().enumerate() {
            for (wall_idx, wall) in self.walls.iter().enumerate() {
                if resolve_stone_wall(stone, wall) {
                    contacts.push(Contact::Wall {
                        stone: stone_idx,
                        wall: wall_idx,
                    });
                }
            }
        }

        contacts
    }
}

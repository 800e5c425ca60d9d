use rand::Rng;
use tracing::{debug, trace};

use super::Field;
use crate::{
    constants::{ENEMY_CHARS, MIN_SPEED, PATH_LENGTH, PATH_WIDTH, SPAWN_ODDS, START_SPEED},
    ui::ColorClass,
};

/// The three kinds of obstacle. Each kind has its own color.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Glyph {
    #[default]
    Ball,
    Block,
    Star,
}

impl Glyph {
    pub const ALL: [Glyph; 3] = [Glyph::Ball, Glyph::Block, Glyph::Star];

    pub fn symbol(self) -> char {
        ENEMY_CHARS[self as usize]
    }

    pub fn color(self) -> ColorClass {
        match self {
            Glyph::Ball => ColorClass::Enemy1,
            Glyph::Block => ColorClass::Enemy2,
            Glyph::Star => ColorClass::Enemy3,
        }
    }

    fn random<R: Rng>(rng: &mut R) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }
}

/// One slot of the pool. A slot with `used == false` is free.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Enemy {
    pub used: bool,
    pub x: i32,
    pub y: i32,
    pub glyph: Glyph,
}

/// Fixed number of enemy slots, allocated by scanning for a free one.
///
/// Enemies only ever move down. They fall one row every `speed + 1` calls to
/// [`EnemyPool::advance`], and the slot is released again once the enemy has
/// left the screen or hit the bike.
#[derive(Debug, Clone)]
pub struct EnemyPool {
    slots: Vec<Enemy>,
    steps: u32,
    speed: u32,
}

impl EnemyPool {
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![Enemy::default(); capacity],
            steps: 0,
            speed: START_SPEED,
        }
    }

    pub fn speed(&self) -> u32 {
        self.speed
    }

    /// Occupied slots.
    pub fn iter(&self) -> impl Iterator<Item = &Enemy> {
        self.slots.iter().filter(|e| e.used)
    }

    /// Gives every free slot a one in [`SPAWN_ODDS`] chance of a new enemy.
    ///
    /// The initial fill scans the whole pool and scatters enemies over the
    /// upper half of the path. During play at most one enemy is added per
    /// call, always on the top row. Returns how many enemies were placed.
    pub fn spawn<R: Rng>(&mut self, field: &Field, initial: bool, rng: &mut R) -> usize {
        let mut placed = 0;
        for slot in 0..self.slots.len() {
            if self.slots[slot].used || !rng.gen_ratio(1, SPAWN_ODDS) {
                continue;
            }
            let x = rng.gen_range(0..PATH_WIDTH - 1) + field.side_edge() + 1;
            let y = if initial {
                rng.gen_range(0..PATH_LENGTH / 2) + field.top_edge()
            } else {
                field.top_edge()
            };
            let glyph = Glyph::random(rng);
            self.slots[slot] = Enemy { used: true, x, y, glyph };
            trace!(slot, x, y, ?glyph, "enemy spawned");
            placed += 1;
            if !initial {
                break;
            }
        }
        placed
    }

    /// Counts down one tick. When the countdown runs out every enemy falls a
    /// row and the countdown restarts; returns whether that happened.
    pub fn advance(&mut self) -> bool {
        if self.steps < self.speed {
            self.steps += 1;
            return false;
        }
        self.steps = 0;
        for enemy in self.slots.iter_mut().filter(|e| e.used) {
            enemy.y += 1;
        }
        true
    }

    /// Frees every enemy below the bottom row. Returns how many were freed.
    pub fn prune(&mut self, field: &Field) -> usize {
        let mut freed = 0;
        for enemy in self.slots.iter_mut().filter(|e| e.used && e.y > field.bottom()) {
            enemy.used = false;
            freed += 1;
        }
        freed
    }

    /// Frees every enemy sitting exactly on `(x, y)` and returns how many there were.
    pub fn collide(&mut self, x: i32, y: i32) -> u32 {
        let mut hits = 0;
        for enemy in self.slots.iter_mut().filter(|e| e.used && e.x == x && e.y == y) {
            enemy.used = false;
            hits += 1;
        }
        hits
    }

    /// Makes enemies fall faster, down to [`MIN_SPEED`]. Returns false once the floor is reached.
    pub fn quicken(&mut self) -> bool {
        if self.speed <= MIN_SPEED {
            return false;
        }
        self.speed -= 1;
        debug!(speed = self.speed, "enemies speed up");
        true
    }

    /// Puts an enemy into the first free slot.
    #[cfg(test)]
    pub fn place(&mut self, x: i32, y: i32, glyph: Glyph) -> Option<usize> {
        let slot = self.slots.iter().position(|e| !e.used)?;
        self.slots[slot] = Enemy { used: true, x, y, glyph };
        Some(slot)
    }

    #[cfg(test)]
    pub fn occupied(&self) -> usize {
        self.iter().count()
    }

    #[cfg(test)]
    pub fn slots(&self) -> &[Enemy] {
        &self.slots
    }
}

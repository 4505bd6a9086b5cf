//! The automaton grid the invaders live in.
//!
//! Cells are stored row-major; each one packs its liveness together with a
//! boss tag. Tags are only ever set (by boss placement) and outlive the cell
//! they mark, so boss health is always `alive && boss`, recounted on demand.
//! Edges are hard: nothing wraps and out-of-grid neighbours count as dead.

use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Deserialize;

use crate::patterns::{Pattern, LIBRARY};

/// Rows at the bottom of the grid kept free of spawns (the ship lives there).
pub const SAFE_ZONE_ROWS: usize = 5;

/// Row used when the grid is empty and as the fallback spawn row.
pub const TOP_SPAWN_ROW: i32 = 1;

/// Empty rows left between the lowest live cell and a fresh spawn.
const SPAWN_GAP_ROWS: i32 = 2;

// ── Rules ───────────────────────────────────────────────────────────────────

/// Life-like birth/survival rule. Conway's B3/S23 is the default.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LifeRules {
    /// Fewest live neighbours a live cell needs to survive.
    pub survive_min: u8,
    /// Most live neighbours a live cell tolerates.
    pub survive_max: u8,
    /// Exact live-neighbour count that brings a dead cell to life.
    pub born: u8,
}

impl Default for LifeRules {
    fn default() -> Self {
        Self {
            survive_min: 2,
            survive_max: 3,
            born: 3,
        }
    }
}

impl LifeRules {
    fn next(&self, alive: bool, neighbours: u8) -> bool {
        if alive {
            (self.survive_min..=self.survive_max).contains(&neighbours)
        } else {
            neighbours == self.born
        }
    }
}

// ── Cells ───────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Cell {
    pub alive: bool,
    /// Set when the cell was stamped as part of the boss. Never cleared.
    pub boss: bool,
}

// ── Grid ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct LifeGrid {
    width: usize,
    height: usize,
    rules: LifeRules,
    cells: Vec<Cell>,
}

impl LifeGrid {
    /// An all-dead, untagged grid.
    pub fn new(width: usize, height: usize, rules: LifeRules) -> Self {
        Self {
            width,
            height,
            rules,
            cells: vec![Cell::default(); width * height],
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn rules(&self) -> LifeRules {
        self.rules
    }

    #[inline]
    fn index(&self, r: i32, c: i32) -> Option<usize> {
        if r < 0 || c < 0 || r as usize >= self.height || c as usize >= self.width {
            None
        } else {
            Some(r as usize * self.width + c as usize)
        }
    }

    /// The cell at `(r, c)`, or `None` outside the grid.
    pub fn cell(&self, r: i32, c: i32) -> Option<Cell> {
        self.index(r, c).map(|i| self.cells[i])
    }

    /// `true` only for in-bounds live cells.
    pub fn is_alive(&self, r: i32, c: i32) -> bool {
        self.cell(r, c).is_some_and(|cell| cell.alive)
    }

    pub fn is_boss(&self, r: i32, c: i32) -> bool {
        self.cell(r, c).is_some_and(|cell| cell.boss)
    }

    /// Row slices, top to bottom — the read-only snapshot renderers draw from.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.width.max(1))
    }

    pub fn live_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.alive).count()
    }

    /// Live cells still carrying the boss tag.
    pub fn boss_cells_alive(&self) -> usize {
        self.cells
            .iter()
            .filter(|cell| cell.alive && cell.boss)
            .count()
    }

    /// Index of the bottom-most row holding any live cell.
    pub fn lowest_occupied_row(&self) -> Option<usize> {
        self.rows()
            .enumerate()
            .filter(|(_, row)| row.iter().any(|cell| cell.alive))
            .map(|(r, _)| r)
            .last()
    }

    fn live_neighbours(&self, r: i32, c: i32) -> u8 {
        let mut count = 0u8;
        for dr in [-1, 0, 1] {
            for dc in [-1, 0, 1] {
                if dr == 0 && dc == 0 {
                    continue;
                }
                if self.is_alive(r + dr, c + dc) {
                    count += 1;
                }
            }
        }
        count
    }

    /// Advance one generation. Every cell is computed from the previous
    /// generation; boss tags are carried over untouched.
    pub fn step(&mut self) {
        let mut next = self.cells.clone();
        for r in 0..self.height {
            for c in 0..self.width {
                let (ri, ci) = (r as i32, c as i32);
                let i = r * self.width + c;
                let n = self.live_neighbours(ri, ci);
                next[i].alive = self.rules.next(self.cells[i].alive, n);
            }
        }
        self.cells = next;
    }

    /// Stamp `pattern` with its top-left corner at `(top, left)`. Entries
    /// falling outside the grid are dropped. With `is_boss`, every stamped
    /// cell is tagged as well.
    pub fn place_pattern(&mut self, pattern: &Pattern, top: i32, left: i32, is_boss: bool) {
        for (dr, dc) in pattern.live_offsets() {
            if let Some(i) = self.index(top + dr as i32, left + dc as i32) {
                self.cells[i].alive = true;
                if is_boss {
                    self.cells[i].boss = true;
                }
            }
        }
    }

    /// `true` iff every live entry of `pattern` lands on a dead, in-bounds
    /// cell. Unlike `place_pattern`, clipping counts as blocked.
    pub fn is_area_clear(&self, pattern: &Pattern, top: i32, left: i32) -> bool {
        pattern.live_offsets().all(|(dr, dc)| {
            self.cell(top + dr as i32, left + dc as i32)
                .is_some_and(|cell| !cell.alive)
        })
    }

    /// Try to drop `n` random library patterns onto the grid without touching
    /// live cells. Spawns go just below the colony (or at the top of an empty
    /// grid), never into the safe zone. A pattern that finds no room at its
    /// row or at the top row is skipped.
    pub fn random_spawn(&mut self, n: usize, rng: &mut impl Rng) {
        let start_row = match self.lowest_occupied_row() {
            Some(r) => r as i32 + SPAWN_GAP_ROWS + 1,
            None => TOP_SPAWN_ROW,
        };
        let safe_zone_top = self.height as i32 - SAFE_ZONE_ROWS as i32;

        for _ in 0..n {
            let Some(pattern) = LIBRARY.choose(rng) else {
                return;
            };
            debug_assert!(
                pattern.width() < self.width && pattern.height() + SAFE_ZONE_ROWS <= self.height,
                "pattern {} does not fit a {}x{} grid",
                pattern.name,
                self.width,
                self.height
            );

            let row = start_row.min(safe_zone_top - pattern.height() as i32);
            let mut columns: Vec<i32> =
                (0..self.width.saturating_sub(pattern.width()) as i32).collect();
            columns.shuffle(rng);

            let placed = [row, TOP_SPAWN_ROW].into_iter().find_map(|r| {
                columns
                    .iter()
                    .find(|&&c| self.is_area_clear(pattern, r, c))
                    .map(|&c| (r, c))
            });

            match placed {
                Some((r, c)) => {
                    debug!("spawned {} at ({r}, {c})", pattern.name);
                    self.place_pattern(pattern, r, c, false);
                }
                None => debug!("no room for {}, dropped", pattern.name),
            }
        }
    }

    /// Kill the cell at `(r, c)`. Returns `false` (and changes nothing) when
    /// the coordinates are off the grid.
    pub fn kill_cell(&mut self, r: i32, c: i32) -> bool {
        match self.index(r, c) {
            Some(i) => {
                self.cells[i].alive = false;
                true
            }
            None => false,
        }
    }
}

//! Static pattern catalogue — pure data, no logic.

/// A named stamp of live (1) and dead (0) cells, stored row-major.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pattern {
    pub name: &'static str,
    pub cells: &'static [&'static [u8]],
}

impl Pattern {
    pub const fn new(name: &'static str, cells: &'static [&'static [u8]]) -> Self {
        Self { name, cells }
    }

    pub fn height(&self) -> usize {
        self.cells.len()
    }

    /// Width of the widest row (patterns in the library are rectangular).
    pub fn width(&self) -> usize {
        self.cells.iter().map(|row| row.len()).max().unwrap_or(0)
    }

    /// Offsets `(dr, dc)` of every live entry.
    pub fn live_offsets(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.cells.iter().enumerate().flat_map(|(dr, row)| {
            row.iter()
                .enumerate()
                .filter(|&(_, &v)| v == 1)
                .map(move |(dc, _)| (dr, dc))
        })
    }

    pub fn population(&self) -> usize {
        self.live_offsets().count()
    }
}

// ── Small organisms (random spawns) ─────────────────────────────────────────

pub const BLOCK: Pattern = Pattern::new("block", &[&[1, 1], &[1, 1]]);

pub const GLIDER: Pattern = Pattern::new("glider", &[&[0, 1, 0], &[0, 0, 1], &[1, 1, 1]]);

pub const ACORN: Pattern = Pattern::new(
    "acorn",
    &[
        &[0, 1, 0, 0, 0, 0, 0],
        &[0, 0, 0, 1, 0, 0, 0],
        &[1, 1, 0, 0, 1, 1, 1],
    ],
);

pub const HEART: Pattern = Pattern::new(
    "heart",
    &[
        &[1, 0, 0, 0, 1],
        &[1, 1, 0, 1, 1],
        &[1, 0, 1, 0, 1],
        &[0, 1, 0, 1, 0],
        &[0, 0, 1, 0, 0],
    ],
);

/// Everything `random_spawn` picks from, uniformly.
pub static LIBRARY: [Pattern; 4] = [BLOCK, GLIDER, ACORN, HEART];

// ── Boss ────────────────────────────────────────────────────────────────────

/// The space invader, 11 × 8.
pub const BOSS: Pattern = Pattern::new(
    "space invader",
    &[
        &[0, 0, 1, 0, 0, 0, 0, 0, 1, 0, 0],
        &[0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 0],
        &[0, 0, 1, 1, 1, 1, 1, 1, 1, 0, 0],
        &[0, 1, 1, 0, 1, 1, 1, 0, 1, 1, 0],
        &[1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
        &[1, 0, 1, 1, 1, 1, 1, 1, 1, 0, 1],
        &[1, 0, 1, 0, 0, 0, 0, 0, 1, 0, 1],
        &[0, 0, 0, 1, 1, 0, 1, 1, 0, 0, 0],
    ],
);

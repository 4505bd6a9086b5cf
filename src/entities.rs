//! All game entity types — pure data plus the kinematics each entity owns.

use crate::config::Config;
use crate::grid::LifeGrid;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    GameOver,
    Won,
}

/// Discrete inputs the core understands. Key mapping lives in the binary.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    MoveLeft,
    MoveRight,
    StopMoving,
    FirePrimary,
    FireSecondary,
    TogglePause,
    ToggleHelp,
    /// Restart with the boss enabled.
    Reset,
    /// Restart in no-boss mode (only offered after a win).
    ResetWithoutBoss,
    Quit,
}

// ── Projectiles ──────────────────────────────────────────────────────────────

/// Which gun fired a projectile. Only the renderer cares.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Weapon {
    Primary,
    Secondary,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Projectile {
    /// Horizontal position (fractional columns).
    pub x: f32,
    /// Vertical position (fractional rows).
    pub y: f32,
    /// Columns per frame.
    pub vx: f32,
    /// Rows per frame; negative is upward.
    pub vy: f32,
    pub active: bool,
    pub weapon: Weapon,
}

impl Projectile {
    pub fn new(x: f32, y: f32, vx: f32, vy: f32, weapon: Weapon) -> Self {
        Self {
            x,
            y,
            vx,
            vy,
            active: true,
            weapon,
        }
    }

    /// Move one frame; deactivate on leaving the open `(0, width) × (0, height)` field.
    pub fn advance(&mut self, width: usize, height: usize) {
        self.x += self.vx;
        self.y += self.vy;
        let inside = 0.0 < self.x && self.x < width as f32 && 0.0 < self.y && self.y < height as f32;
        if !inside {
            self.active = false;
        }
    }

    /// Grid cell under the projectile as `(row, col)`.
    pub fn cell(&self) -> (i32, i32) {
        (self.y.floor() as i32, self.x.floor() as i32)
    }
}

// ── Ship ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Ship {
    /// Left edge (fractional columns).
    pub x: f32,
    /// Top row of the ship.
    pub row: i32,
    /// Columns per frame; set by input, applied by `advance`.
    pub vx: f32,
}

impl Ship {
    /// Move one frame, keeping the ship inside `[0, max_x]`.
    pub fn advance(&mut self, max_x: f32) {
        self.x = (self.x + self.vx).clamp(0.0, max_x.max(0.0));
    }

    /// Every `(row, col)` covered by a `width × height` ship.
    pub fn footprint(&self, width: usize, height: usize) -> impl Iterator<Item = (i32, i32)> {
        let (top, left) = (self.row, self.x.floor() as i32);
        (0..height as i32).flat_map(move |dr| (0..width as i32).map(move |dc| (top + dr, left + dc)))
    }
}

// ── Timers ───────────────────────────────────────────────────────────────────

/// Clock readings (ms) of the last time each periodic event fired.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Timers {
    pub last_step: u64,
    pub last_spawn: u64,
    pub last_difficulty: u64,
    pub last_ammo: u64,
}

impl Timers {
    pub fn starting_at(now_ms: u64) -> Self {
        Self {
            last_step: now_ms,
            last_spawn: now_ms,
            last_difficulty: now_ms,
            last_ammo: now_ms,
        }
    }
}

// ── Master game state ────────────────────────────────────────────────────────

/// One whole session. Cloneable so pure update functions can return a new
/// copy without mutating the original.
#[derive(Clone, Debug)]
pub struct GameState {
    pub grid: LifeGrid,
    pub ship: Ship,
    pub projectiles: Vec<Projectile>,
    pub score: u32,
    pub level: u32,
    pub secondary_ammo: u32,
    /// Current gap between random spawns; shrinks every level.
    pub spawn_interval_ms: f64,
    pub spawn_count: usize,
    pub boss_spawned: bool,
    /// Live boss-tagged cells as of the last automaton step.
    pub boss_health: usize,
    /// Session started without a boss: play goes on until the colony wins.
    pub no_boss: bool,
    pub status: GameStatus,
    pub paused: bool,
    pub show_help: bool,
    pub timers: Timers,
    pub config: Config,
}

impl GameState {
    pub fn is_running(&self) -> bool {
        self.status == GameStatus::Playing && !self.paused
    }
}

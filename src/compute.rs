//! Pure game-logic functions.
//!
//! Every public function takes an immutable reference to the current
//! `GameState` (plus the clock reading and, where needed, an RNG handle) and
//! returns a brand-new `GameState`. Side effects are limited to the injected RNG.

use log::{debug, info};
use rand::Rng;

use crate::config::Config;
use crate::entities::{GameState, GameStatus, InputEvent, Projectile, Ship, Timers, Weapon};
use crate::grid::{LifeGrid, TOP_SPAWN_ROW};
use crate::patterns::BOSS;

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build a fresh session. `config` is expected to have passed `validate`.
pub fn init_state(config: &Config, no_boss: bool, now_ms: u64) -> GameState {
    let (width, height) = (config.grid_width, config.grid_height);
    GameState {
        grid: LifeGrid::new(width, height, config.rules),
        ship: Ship {
            x: (width / 2) as f32,
            // one row of clearance below the ship
            row: height as i32 - config.ship_height as i32 - 1,
            vx: 0.0,
        },
        projectiles: Vec::new(),
        score: 0,
        level: 1,
        secondary_ammo: config.secondary_ammo_initial,
        spawn_interval_ms: config.spawn_interval_ms,
        spawn_count: config.spawn_count,
        boss_spawned: false,
        boss_health: 0,
        no_boss,
        status: GameStatus::Playing,
        paused: false,
        show_help: true,
        timers: Timers::starting_at(now_ms),
        config: config.clone(),
    }
}

// ── Input-driven state transitions (pure) ───────────────────────────────────

/// Apply one input event. Events that make no sense in the current state
/// (firing while paused, resetting mid-game, …) leave it unchanged.
pub fn handle_input(state: &GameState, event: InputEvent, now_ms: u64) -> GameState {
    match event {
        InputEvent::Quit => state.clone(),
        InputEvent::ToggleHelp => GameState {
            show_help: !state.show_help,
            ..state.clone()
        },
        InputEvent::TogglePause => toggle_pause(state),
        InputEvent::Reset => reset(state, false, now_ms),
        InputEvent::ResetWithoutBoss => reset(state, true, now_ms),
        InputEvent::MoveLeft => steer(state, -state.config.ship_speed),
        InputEvent::MoveRight => steer(state, state.config.ship_speed),
        InputEvent::StopMoving => steer(state, 0.0),
        InputEvent::FirePrimary => fire_primary(state),
        InputEvent::FireSecondary => fire_secondary(state),
    }
}

pub fn toggle_pause(state: &GameState) -> GameState {
    if state.status != GameStatus::Playing {
        return state.clone();
    }
    GameState {
        paused: !state.paused,
        show_help: false,
        ..state.clone()
    }
}

/// Start over. A won game may restart with or without the boss; a lost game
/// only restarts normally; a running game ignores resets.
pub fn reset(state: &GameState, no_boss: bool, now_ms: u64) -> GameState {
    let allowed = match state.status {
        GameStatus::Won => true,
        GameStatus::GameOver => !no_boss,
        GameStatus::Playing => false,
    };
    if !allowed {
        return state.clone();
    }
    info!("new game (no boss: {no_boss})");
    init_state(&state.config, no_boss, now_ms)
}

/// Set the ship's horizontal velocity. Position changes on the next tick.
pub fn steer(state: &GameState, vx: f32) -> GameState {
    if !state.is_running() {
        return state.clone();
    }
    GameState {
        ship: Ship {
            vx,
            ..state.ship.clone()
        },
        show_help: state.show_help && vx == 0.0,
        ..state.clone()
    }
}

/// Muzzle position: top row of the ship, horizontal centre.
fn muzzle(state: &GameState) -> (f32, f32) {
    let x = state.ship.x + state.config.ship_width as f32 / 2.0;
    (x, state.ship.row as f32)
}

/// One projectile straight up.
pub fn fire_primary(state: &GameState) -> GameState {
    if !state.is_running() {
        return state.clone();
    }
    let (x, y) = muzzle(state);
    let mut projectiles = state.projectiles.clone();
    projectiles.push(Projectile::new(
        x,
        y,
        0.0,
        -state.config.bullet_speed,
        Weapon::Primary,
    ));
    GameState {
        projectiles,
        show_help: false,
        ..state.clone()
    }
}

/// Five-way fan for one unit of ammo; nothing happens with an empty magazine.
/// Each spread value is a sideways slope, so the whole volley climbs at
/// bullet speed and stays level.
pub fn fire_secondary(state: &GameState) -> GameState {
    if !state.is_running() || state.secondary_ammo == 0 {
        return state.clone();
    }
    let (x, y) = muzzle(state);
    let speed = state.config.bullet_speed;
    let spread = state.config.spread_angle;
    let slopes = [0.0, -spread * 0.5, spread * 0.5, -spread, spread];

    let mut projectiles = state.projectiles.clone();
    projectiles.extend(slopes.iter().map(|a| {
        Projectile::new(x, y, speed * a, -speed, Weapon::Secondary)
    }));
    GameState {
        projectiles,
        secondary_ammo: state.secondary_ammo - 1,
        show_help: false,
        ..state.clone()
    }
}

// ── Per-frame tick (nearly pure — RNG is injected) ──────────────────────────

/// Advance the simulation by one frame at clock reading `now_ms`. All
/// periodic events compare against this single reading. Paused or finished
/// games come back unchanged.
pub fn tick(state: &GameState, now_ms: u64, rng: &mut impl Rng) -> GameState {
    if !state.is_running() {
        return state.clone();
    }
    let mut next = state.clone();
    let cfg = &state.config;
    let (width, height) = (next.grid.width(), next.grid.height());

    // ── 1. Kinematics ────────────────────────────────────────────────────────
    next.ship.advance(width.saturating_sub(cfg.ship_width) as f32);
    for p in next.projectiles.iter_mut() {
        p.advance(width, height);
    }
    next.projectiles.retain(|p| p.active);

    // ── 2. Automaton step ────────────────────────────────────────────────────
    if elapsed(now_ms, next.timers.last_step) > cfg.step_interval_ms {
        next.grid.step();
        next.timers.last_step = now_ms;
        debug!("generation stepped, {} live cells", next.grid.live_count());
        if next.boss_spawned {
            next.boss_health = next.grid.boss_cells_alive();
            if next.boss_health == 0 {
                info!("boss destroyed, final score {}", next.score);
                next.status = GameStatus::Won;
                return next;
            }
        }
    }

    // ── 3. Random spawns (stop once the boss is out) ─────────────────────────
    let since_spawn = elapsed(now_ms, next.timers.last_spawn) as f64;
    if !next.boss_spawned && since_spawn > next.spawn_interval_ms {
        next.grid.random_spawn(next.spawn_count, rng);
        next.timers.last_spawn = now_ms;
    }

    // ── 4. Difficulty ────────────────────────────────────────────────────────
    if elapsed(now_ms, next.timers.last_difficulty) > cfg.difficulty_interval_ms {
        next.level += 1;
        next.spawn_interval_ms *= cfg.spawn_decay;
        next.spawn_count += 1;
        next.timers.last_difficulty = now_ms;
        info!(
            "level {}: {} spawns every {:.0} ms",
            next.level, next.spawn_count, next.spawn_interval_ms
        );
    }

    // ── 5. Ammo refill ───────────────────────────────────────────────────────
    if elapsed(now_ms, next.timers.last_ammo) > cfg.ammo_refill_ms {
        next.secondary_ammo += cfg.ammo_refill;
        next.timers.last_ammo = now_ms;
    }

    // ── 6. Boss ──────────────────────────────────────────────────────────────
    if next.score >= cfg.boss_spawn_score && !next.boss_spawned && !next.no_boss {
        spawn_boss(&mut next);
    }

    // ── 7. Collision: projectiles ↔ live cells ───────────────────────────────
    let mut gained = 0;
    for p in next.projectiles.iter_mut().filter(|p| p.active) {
        let (r, c) = p.cell();
        if next.grid.is_alive(r, c) && next.grid.kill_cell(r, c) {
            p.active = false;
            gained += 1;
        }
    }
    next.score += gained;
    next.projectiles.retain(|p| p.active);

    // ── 8. Colony reached the ship? ──────────────────────────────────────────
    if ship_overrun(&next) {
        info!("ship overrun at level {}, score {}", next.level, next.score);
        next.status = GameStatus::GameOver;
    }

    next
}

fn elapsed(now_ms: u64, since: u64) -> u64 {
    now_ms.saturating_sub(since)
}

/// Stamp the boss at the top, horizontally centred, and start tracking it.
fn spawn_boss(state: &mut GameState) {
    let left = (state.grid.width() as i32 - BOSS.width() as i32) / 2;
    state.grid.place_pattern(&BOSS, TOP_SPAWN_ROW, left, true);
    state.boss_spawned = true;
    state.boss_health = state.grid.boss_cells_alive();
    info!("boss spawned at column {left} with {} cells", state.boss_health);
}

/// `true` if any live cell sits under the ship.
pub fn ship_overrun(state: &GameState) -> bool {
    state
        .ship
        .footprint(state.config.ship_width, state.config.ship_height)
        .any(|(r, c)| state.grid.is_alive(r, c))
}

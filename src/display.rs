//! Rendering layer — all terminal I/O lives here.
//!
//! Each function receives a mutable writer and an immutable view of the
//! game state. No game logic is performed; this module only translates
//! state into terminal commands. Grid cells are two columns wide so the
//! field looks square in a typical terminal font.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use life_invaders::entities::{GameState, GameStatus, Projectile, Weapon};
use life_invaders::starfield::Starfield;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::Cyan;
const C_HUD_LEVEL: Color = Color::White;
const C_HUD_AMMO: Color = Color::Magenta;
const C_HUD_BOSS: Color = Color::Red;
const C_LIFEFORM: Color = Color::Green;
const C_BOSS: Color = Color::Rgb { r: 255, g: 105, b: 180 };
const C_SHIP: Color = Color::Yellow;
const C_SHOT_PRIMARY: Color = Color::Yellow;
const C_SHOT_SECONDARY: Color = Color::Rgb { r: 184, g: 53, b: 0 };
const C_HINT: Color = Color::DarkGrey;
const C_STAR: Color = Color::White;
const C_HUD_RULES: Color = Color::DarkGreen;

/// Screen rows above the field: HUD line + top border.
const FIELD_TOP: u16 = 2;
/// Screen column of the first cell (just right of the left wall).
const FIELD_LEFT: u16 = 1;
const CELL_COLS: u16 = 2;

fn screen_pos(row: i32, col: i32) -> (u16, u16) {
    (
        FIELD_LEFT + col.max(0) as u16 * CELL_COLS,
        FIELD_TOP + row.max(0) as u16,
    )
}

/// Total terminal columns the frame occupies.
fn frame_width(state: &GameState) -> u16 {
    state.grid.width() as u16 * CELL_COLS + 2
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, state: &GameState, stars: &Starfield) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_stars(out, stars)?;

    draw_border(out, state)?;
    draw_hud(out, state)?;

    match state.status {
        GameStatus::Won => draw_won(out, state)?,
        GameStatus::GameOver => draw_game_over(out, state)?,
        GameStatus::Playing => {
            draw_cells(out, state)?;
            draw_ship(out, state)?;
            for p in &state.projectiles {
                draw_projectile(out, p)?;
            }
            if state.show_help {
                draw_help(out, state)?;
            }
            if state.paused {
                draw_centered(out, state, 0, "‖  PAUSED  ‖", Color::White)?;
            }
        }
    }
    draw_controls_hint(out, state)?;

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, FIELD_TOP + state.grid.height() as u16 + 2))?;
    out.flush()?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    let inner = (frame_width(state) - 2) as usize;
    let bottom = FIELD_TOP + state.grid.height() as u16;

    out.queue(style::SetForegroundColor(C_BORDER))?;
    out.queue(cursor::MoveTo(0, FIELD_TOP - 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(inner))))?;
    out.queue(cursor::MoveTo(0, bottom))?;
    out.queue(Print(format!("└{}┘", "─".repeat(inner))))?;

    for row in FIELD_TOP..bottom {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(frame_width(state) - 1, row))?;
        out.queue(Print("│"))?;
    }
    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("Score {:>4}", state.score)))?;
    out.queue(style::SetForegroundColor(C_HUD_LEVEL))?;
    out.queue(Print(format!("  Level {:>2}", state.level)))?;
    let rules = state.grid.rules();
    out.queue(style::SetForegroundColor(C_HUD_RULES))?;
    out.queue(Print(format!(
        "  B{}/S{}-{}",
        rules.born, rules.survive_min, rules.survive_max
    )))?;

    if state.boss_spawned && state.status != GameStatus::Won {
        let boss = format!("Boss Cells {}", state.boss_health);
        let bx = (frame_width(state) / 2).saturating_sub(boss.len() as u16 / 2);
        out.queue(cursor::MoveTo(bx, 0))?;
        out.queue(style::SetForegroundColor(C_HUD_BOSS))?;
        out.queue(Print(boss))?;
    }

    let ammo = format!("Ammo {}", state.secondary_ammo);
    let ax = frame_width(state).saturating_sub(ammo.len() as u16 + 1);
    out.queue(cursor::MoveTo(ax, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_AMMO))?;
    out.queue(Print(ammo))?;
    Ok(())
}

// ── Field ─────────────────────────────────────────────────────────────────────

/// Stars go down first; cells and sprites overdraw them.
fn draw_stars<W: Write>(out: &mut W, stars: &Starfield) -> std::io::Result<()> {
    for star in stars.stars() {
        let Some((row, col)) = star.cell(stars.height()) else {
            continue;
        };
        let color = match star.tint {
            Some((r, g, b)) => Color::Rgb { r, g, b },
            None => C_STAR,
        };
        let (x, y) = screen_pos(row as i32, col as i32);
        out.queue(cursor::MoveTo(x, y))?;
        out.queue(style::SetForegroundColor(color))?;
        out.queue(Print("·"))?;
    }
    Ok(())
}

fn draw_cells<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    for (r, row) in state.grid.rows().enumerate() {
        for (c, cell) in row.iter().enumerate().filter(|(_, cell)| cell.alive) {
            let (x, y) = screen_pos(r as i32, c as i32);
            let color = if cell.boss { C_BOSS } else { C_LIFEFORM };
            out.queue(cursor::MoveTo(x, y))?;
            out.queue(style::SetForegroundColor(color))?;
            out.queue(Print("██"))?;
        }
    }
    Ok(())
}

fn draw_ship<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    // Sprite scaled to the ship's cell footprint, e.g. for 3 × 2:
    //   ▗▟██▙▖   ← nose
    //   ██████   ← hull
    let cols = state.config.ship_width * CELL_COLS as usize;
    let nose = format!("▗▟{}▙▖", "█".repeat(cols.saturating_sub(4)));
    let hull = "█".repeat(cols);

    out.queue(style::SetForegroundColor(C_SHIP))?;
    let left = state.ship.x.floor() as i32;
    for dr in 0..state.config.ship_height as i32 {
        let (x, y) = screen_pos(state.ship.row + dr, left);
        out.queue(cursor::MoveTo(x, y))?;
        out.queue(Print(if dr == 0 { &nose } else { &hull }))?;
    }
    Ok(())
}

fn draw_projectile<W: Write>(out: &mut W, p: &Projectile) -> std::io::Result<()> {
    let x = FIELD_LEFT + (p.x.max(0.0) * CELL_COLS as f32) as u16;
    let y = FIELD_TOP + p.y.max(0.0) as u16;
    out.queue(cursor::MoveTo(x, y))?;
    match p.weapon {
        Weapon::Primary => {
            out.queue(style::SetForegroundColor(C_SHOT_PRIMARY))?;
            out.queue(Print("║"))?;
        }
        Weapon::Secondary => {
            out.queue(style::SetForegroundColor(C_SHOT_SECONDARY))?;
            out.queue(Print("•"))?;
        }
    }
    Ok(())
}

// ── Overlays ──────────────────────────────────────────────────────────────────

/// Print `msg` centred on the field, `offset` rows from the middle.
fn draw_centered<W: Write>(
    out: &mut W,
    state: &GameState,
    offset: i16,
    msg: &str,
    color: Color,
) -> std::io::Result<()> {
    let mid = FIELD_TOP as i16 + state.grid.height() as i16 / 2 + offset;
    let col = (frame_width(state) / 2).saturating_sub(msg.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, mid.max(0) as u16))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(msg))?;
    Ok(())
}

fn draw_help<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    let lines = [
        "Move:        ← → / A D",
        "Fire:        Z / Space",
        "Super Fire:  X",
        "Pause:       P",
        "Help:        H",
        "Quit:        Q",
    ];
    for (i, line) in lines.iter().enumerate() {
        draw_centered(out, state, i as i16 - 3, line, Color::White)?;
    }
    Ok(())
}

fn draw_game_over<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    let lines: &[(&str, Color)] = &[
        ("╔════════════════════╗", C_SHOT_SECONDARY),
        ("║     GAME  OVER     ║", C_SHOT_SECONDARY),
        ("╚════════════════════╝", C_SHOT_SECONDARY),
    ];
    for (i, (msg, color)) in lines.iter().enumerate() {
        draw_centered(out, state, i as i16 - 2, msg, *color)?;
    }
    let score = format!("Final Score: {:>4}", state.score);
    draw_centered(out, state, 1, &score, C_HUD_SCORE)?;
    draw_centered(out, state, 3, "R - Restart   Q - Quit", Color::White)
}

fn draw_won<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    let lines: &[(&str, Color)] = &[
        ("╔════════════════════╗", Color::Green),
        ("║      YOU  WON!     ║", Color::Green),
        ("╚════════════════════╝", Color::Green),
    ];
    for (i, (msg, color)) in lines.iter().enumerate() {
        draw_centered(out, state, i as i16 - 2, msg, *color)?;
    }
    let score = format!("Final Score: {:>4}", state.score);
    draw_centered(out, state, 1, &score, C_HUD_SCORE)?;
    draw_centered(out, state, 3, "R - Play Again (with boss)", Color::White)?;
    draw_centered(out, state, 4, "S - Play Again (no boss)", Color::White)
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, FIELD_TOP + state.grid.height() as u16 + 1))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("← → Move  Z Fire  X Super  P Pause  H Help  Q Quit"))?;
    Ok(())
}

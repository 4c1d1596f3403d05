//! Rendering layer. All terminal I/O lives here.
//!
//! Each function receives a mutable writer and an immutable `Frame`.  No game
//! logic is performed; this module only maps field coordinates onto terminal
//! cells and translates entities into terminal commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use rocket_shooter::combat::{BossPhase, BossTier};
use rocket_shooter::entities::{ExplosionKind, PowerUpKind};
use rocket_shooter::geometry::Vec2;
use rocket_shooter::snapshot::{EntityView, Frame, Hud};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_LIVES: Color = Color::Red;
const C_PLAYER: Color = Color::White;
const C_SHIELD: Color = Color::Cyan;
const C_BULLET_PLAYER: Color = Color::Cyan;
const C_BULLET_ENEMY: Color = Color::Magenta;
const C_LASER: Color = Color::Red;
const C_HINT: Color = Color::DarkGrey;
const C_POWERUP_ACTIVE: Color = Color::Yellow;

// ── Field → terminal mapping ──────────────────────────────────────────────────

/// Play area is rows 2..height-2 and columns 1..width-1 inside the border.
struct Viewport {
    cols: u16,
    rows: u16,
    field_w: f32,
    field_h: f32,
}

impl Viewport {
    fn new(frame: &Frame, cols: u16, rows: u16) -> Self {
        Self {
            cols,
            rows,
            field_w: frame.width,
            field_h: frame.height,
        }
    }

    fn inner_w(&self) -> f32 {
        self.cols.saturating_sub(2).max(1) as f32
    }

    fn inner_h(&self) -> f32 {
        self.rows.saturating_sub(4).max(1) as f32
    }

    /// Terminal cell for a field position, or `None` when off the play area.
    fn cell(&self, pos: Vec2) -> Option<(u16, u16)> {
        if pos.x < 0.0 || pos.y < 0.0 || pos.x >= self.field_w || pos.y >= self.field_h {
            return None;
        }
        let col = 1 + (pos.x / self.field_w * self.inner_w()) as u16;
        let row = 2 + (pos.y / self.field_h * self.inner_h()) as u16;
        (col < self.cols.saturating_sub(1) && row < self.rows.saturating_sub(2)).then_some((col, row))
    }

    /// Width in cells of a field length, at least one.
    fn span(&self, len: f32) -> u16 {
        ((len / self.field_w * self.inner_w()).round() as u16).max(1)
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, frame: &Frame) -> std::io::Result<()> {
    let (cols, rows) = terminal::size()?;
    let view = Viewport::new(frame, cols, rows);

    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out, cols, rows)?;
    draw_hud(out, &frame.hud, cols)?;

    for entity in &frame.entities {
        draw_entity(out, &view, entity)?;
    }

    draw_controls_hint(out, rows)?;

    if frame.hud.game_over {
        draw_game_over(out, &frame.hud, cols, rows)?;
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, cols: u16, rows: u16) -> std::io::Result<()> {
    let w = cols as usize;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    out.queue(cursor::MoveTo(0, rows.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    for row in 2..rows.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(cols.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, hud: &Hud, cols: u16) -> std::io::Result<()> {
    // Score and high score, left
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    if hud.high_score > 0 {
        out.queue(Print(format!("Score:{:>6}  Hi:{:>6}", hud.score, hud.high_score)))?;
    } else {
        out.queue(Print(format!("Score:{:>6}", hud.score)))?;
    }

    // Round timer or boss health, centre
    let (centre, centre_color) = match &hud.boss {
        Some(boss) => {
            let filled = (boss.health * 10).div_ceil(boss.max_health.max(1)) as usize;
            (
                format!(
                    "[ BOSS {}{} {:>3} ]",
                    "█".repeat(filled),
                    "░".repeat(10 - filled.min(10)),
                    boss.health
                ),
                phase_color(boss.phase),
            )
        }
        None if hud.boss_incoming => ("[ WARNING: BOSS APPROACHING ]".to_string(), Color::Red),
        None => (format!("[ {:>3}s ]", hud.round_elapsed_ms / 1000), Color::Green),
    };
    let cx = (cols / 2).saturating_sub(centre.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(cx, 0))?;
    out.queue(style::SetForegroundColor(centre_color))?;
    out.queue(Print(&centre))?;

    // Active power-ups and lives, right-aligned
    let mut power_tag = String::new();
    if hud.shield {
        power_tag.push_str("[SHIELD] ");
    }
    let weapon = if hud.laser_active {
        Some("LASER")
    } else if hud.triple_shot {
        Some("TRIPLE")
    } else if hud.speed_boost {
        Some("SPEED")
    } else {
        None
    };
    if let (Some(name), Some(ms)) = (weapon, hud.weapon_remaining_ms) {
        power_tag.push_str(&format!("[{} {:>2}s] ", name, ms / 1000 + 1));
    }
    let lives_str = format!("Lives:{}", "♥".repeat(hud.lives as usize));
    let right_len = power_tag.chars().count() + lives_str.chars().count();

    out.queue(cursor::MoveTo(cols.saturating_sub(right_len as u16 + 1), 0))?;
    if !power_tag.is_empty() {
        out.queue(style::SetForegroundColor(C_POWERUP_ACTIVE))?;
        out.queue(Print(&power_tag))?;
    }
    out.queue(style::SetForegroundColor(C_HUD_LIVES))?;
    out.queue(Print(&lives_str))?;

    Ok(())
}

fn phase_color(phase: BossPhase) -> Color {
    match phase {
        BossPhase::Descending => Color::DarkGrey,
        BossPhase::Active(BossTier::Tier1) => Color::Green,
        BossPhase::Active(BossTier::Tier2) => Color::Yellow,
        BossPhase::Active(BossTier::Tier3) | BossPhase::Destroyed => Color::Red,
    }
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn put<W: Write>(out: &mut W, at: (u16, u16), color: Color, glyph: &str) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(at.0, at.1))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(glyph))?;
    Ok(())
}

fn draw_entity<W: Write>(out: &mut W, view: &Viewport, entity: &EntityView) -> std::io::Result<()> {
    match entity {
        EntityView::Particle { pos, alpha, kind } => {
            let Some(cell) = view.cell(*pos) else { return Ok(()) };
            let glyph = if *alpha > 0.66 {
                "*"
            } else if *alpha > 0.33 {
                "+"
            } else {
                "."
            };
            let color = match kind {
                ExplosionKind::Player => Color::White,
                ExplosionKind::Boss => Color::Red,
                ExplosionKind::Enemy | ExplosionKind::Bullet => Color::DarkYellow,
            };
            put(out, cell, color, glyph)
        }
        EntityView::Enemy { pos, size, level, .. } => {
            let glyph = match level {
                1 => "o",
                2 => "()",
                3 => "(@)",
                _ => "{##}",
            };
            let w = view.span(*size).min(glyph.chars().count() as u16);
            let left = Vec2::new(pos.x - *size / 2.0, pos.y);
            let Some((col, row)) = view.cell(left).or_else(|| view.cell(*pos)) else {
                return Ok(());
            };
            let color = if *level >= 3 { Color::DarkYellow } else { Color::Grey };
            let clipped: String = glyph.chars().take(w.max(1) as usize).collect();
            put(out, (col, row), color, &clipped)
        }
        EntityView::Boss { pos, phase } => {
            // Three-row saucer:
            //   ▄████▄
            //  ██◉██◉██
            //   ▀▀  ▀▀
            let Some((col, row)) = view.cell(*pos) else { return Ok(()) };
            let color = phase_color(*phase);
            put(out, (col.saturating_sub(3), row.saturating_sub(1).max(2)), color, "▄████▄")?;
            put(out, (col.saturating_sub(4), row), color, "██◉██◉██")?;
            put(out, (col.saturating_sub(3), row + 1), color, "▀▀  ▀▀")
        }
        EntityView::PowerUp { pos, kind } => {
            let Some(cell) = view.cell(*pos) else { return Ok(()) };
            let (glyph, color) = match kind {
                PowerUpKind::Shield => ("◈", Color::Cyan),
                PowerUpKind::Laser => ("╿", Color::Red),
                PowerUpKind::TripleShot => ("★", Color::Yellow),
                PowerUpKind::SpeedBoost => ("»", Color::Green),
            };
            put(out, cell, color, glyph)
        }
        EntityView::Bullet { pos } => match view.cell(*pos) {
            Some(cell) => put(out, cell, C_BULLET_PLAYER, "║"),
            None => Ok(()),
        },
        EntityView::EnemyBullet { pos } => match view.cell(*pos) {
            Some(cell) => put(out, cell, C_BULLET_ENEMY, "↓"),
            None => Ok(()),
        },
        EntityView::Laser { rect } => {
            let bottom = Vec2::new(rect.center().x, (rect.bottom() - 1.0).max(0.0));
            let Some((col, last_row)) = view.cell(bottom) else { return Ok(()) };
            for row in 2..last_row {
                put(out, (col, row), C_LASER, "┃")?;
            }
            Ok(())
        }
        EntityView::Player { pos, shielded } => draw_player(out, view, *pos, *shielded),
    }
}

fn draw_player<W: Write>(out: &mut W, view: &Viewport, pos: Vec2, shielded: bool) -> std::io::Result<()> {
    // Sprite (2 rows, 3 cols):
    //   ▲       ← row y      (tip)
    //  /█\      ← row y+1    (fuselage + wings)
    let Some((col, row)) = view.cell(pos) else { return Ok(()) };
    let color = if shielded { C_SHIELD } else { C_PLAYER };
    let tip_row = row.saturating_sub(1).max(2);
    put(out, (col, tip_row), color, "▲")?;
    put(out, (col.saturating_sub(1).max(1), tip_row + 1), color, "/█\\")?;
    if shielded {
        put(out, (col.saturating_sub(2).max(1), tip_row + 1), C_SHIELD, "(")?;
        put(out, (col + 2, tip_row + 1), C_SHIELD, ")")?;
    }
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, rows: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("←↑↓→ / WASD : Move   SPACE : Shoot   Q : Quit"))?;
    Ok(())
}

// ── Game-over overlay ─────────────────────────────────────────────────────────

fn draw_game_over<W: Write>(out: &mut W, hud: &Hud, cols: u16, rows: u16) -> std::io::Result<()> {
    let new_best = hud.score >= hud.high_score && hud.score > 0;
    let score_line = format!("Final Score: {:>6}", hud.score);
    let best_line = if new_best {
        format!("★ NEW BEST: {:>6} ★", hud.high_score)
    } else {
        format!("Best Score:  {:>6}", hud.high_score)
    };

    let lines: [(String, Color); 6] = [
        ("╔════════════════════╗".to_string(), Color::Red),
        ("║    GAME  OVER      ║".to_string(), Color::Red),
        ("╚════════════════════╝".to_string(), Color::Red),
        (score_line, Color::Yellow),
        (best_line, if new_best { Color::Yellow } else { Color::DarkGrey }),
        ("R / ENTER - Play Again  Q - Quit".to_string(), Color::White),
    ];

    let cx = cols / 2;
    let start_row = (rows / 2).saturating_sub(lines.len() as u16 / 2);
    for (i, (msg, color)) in lines.iter().enumerate() {
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, start_row + i as u16))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(msg))?;
    }

    Ok(())
}

/// Rendering layer: all terminal I/O lives here.
///
/// Each function receives a mutable writer and an immutable view of the
/// game state.  No game logic is performed; this module only scales the
/// logical world onto the terminal grid and emits terminal commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use corporate_runner::config::{Priority, Shape, GROUND_LEVEL, VIEW_HEIGHT, VIEW_WIDTH};
use corporate_runner::entities::{
    Difficulty, GameState, Obstacle, ObstacleKind, ParticleColor, Stance, Theme,
};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_BEST: Color = Color::DarkYellow;
const C_HUD_SPEED: Color = Color::Cyan;
const C_HINT: Color = Color::DarkGrey;
const C_BOSS: Color = Color::DarkRed;
const C_BOSS_HURT: Color = Color::Red;
const C_BULLET: Color = Color::Red;
const C_UFO: Color = Color::Cyan;
const C_UFO_DROP: Color = Color::Green;

struct Palette {
    ground: Color,
    ground_detail: Color,
    runner: Color,
    sky_detail: Color,
}

fn palette(theme: Theme) -> Palette {
    match theme {
        Theme::Day => Palette {
            ground: Color::Green,
            ground_detail: Color::DarkGreen,
            runner: Color::White,
            sky_detail: Color::White,
        },
        Theme::Night => Palette {
            ground: Color::DarkBlue,
            ground_detail: Color::Blue,
            runner: Color::Yellow,
            sky_detail: Color::Grey,
        },
    }
}

fn priority_color(priority: Priority) -> Color {
    match priority {
        Priority::Critical => Color::Red,
        Priority::High => Color::Magenta,
        Priority::Medium => Color::Yellow,
        Priority::Low => Color::Cyan,
    }
}

fn shape_fill(shape: Shape) -> &'static str {
    match shape {
        Shape::Rect => "█",
        Shape::Person => "▓",
        Shape::Circle => "●",
        Shape::Banner => "═",
    }
}

fn particle_color(color: ParticleColor) -> Color {
    match color {
        ParticleColor::Coral => Color::Red,
        ParticleColor::Teal => Color::DarkCyan,
        ParticleColor::Sky => Color::Blue,
        ParticleColor::Salmon => Color::DarkYellow,
        ParticleColor::Sun => Color::Yellow,
    }
}

pub fn difficulty_label(difficulty: Difficulty) -> (&'static str, Color) {
    match difficulty {
        Difficulty::Easy => ("EASY", Color::Green),
        Difficulty::Normal => ("NORMAL", Color::Yellow),
        Difficulty::Expert => ("EXPERT", Color::Red),
    }
}

// ── World → terminal mapping ──────────────────────────────────────────────────

/// Play area: columns `1..width-1`, rows `2..height-2`.
#[derive(Clone, Copy)]
struct Viewport {
    width: u16,
    height: u16,
}

impl Viewport {
    fn play_cols(&self) -> f64 {
        self.width.saturating_sub(2).max(1) as f64
    }

    fn play_rows(&self) -> f64 {
        self.height.saturating_sub(4).max(1) as f64
    }

    fn col(&self, x: f64) -> i32 {
        1 + (x / VIEW_WIDTH * self.play_cols()).floor() as i32
    }

    fn row(&self, y: f64) -> i32 {
        2 + (y / VIEW_HEIGHT * self.play_rows()).floor() as i32
    }

    fn inside(&self, col: i32, row: i32) -> bool {
        col >= 1
            && col < self.width as i32 - 1
            && row >= 2
            && row < self.height as i32 - 2
    }

    /// Print `text` starting at a cell, clipped to the play area.
    fn put<W: Write>(
        &self,
        out: &mut W,
        col: i32,
        row: i32,
        text: &str,
        color: Color,
    ) -> std::io::Result<()> {
        out.queue(style::SetForegroundColor(color))?;
        for (i, ch) in text.chars().enumerate() {
            let c = col + i as i32;
            if self.inside(c, row) {
                out.queue(cursor::MoveTo(c as u16, row as u16))?;
                out.queue(Print(ch))?;
            }
        }
        Ok(())
    }

    /// Fill the cells covered by a world rectangle (at least one cell).
    fn fill<W: Write>(
        &self,
        out: &mut W,
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        fill: &str,
        color: Color,
    ) -> std::io::Result<()> {
        let (left, top) = (self.col(x), self.row(y));
        let right = self.col(x + w).max(left + 1);
        let bottom = self.row(y + h).max(top + 1);
        let line = fill.repeat((right - left) as usize);
        for row in top..bottom {
            self.put(out, left, row, &line, color)?;
        }
        Ok(())
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(
    out: &mut W,
    state: &GameState,
    width: u16,
    height: u16,
) -> std::io::Result<()> {
    let view = Viewport { width, height };
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out, width, height)?;
    draw_background(out, &view, state)?;
    draw_hud(out, state, width)?;

    for obstacle in &state.obstacles {
        draw_obstacle(out, &view, obstacle)?;
    }
    draw_ufo(out, &view, state)?;
    draw_runner(out, &view, state)?;
    draw_particles(out, &view, state)?;

    if state.boss_active && state.running {
        draw_centered(out, width, 2, "!! BOSS BATTLE! DUCK THE BULLETS! !!", Color::Red)?;
    }
    draw_controls_hint(out, height)?;

    if state.game_over {
        draw_game_over(out, state, width, height)?;
    } else if state.is_paused() {
        draw_pause(out, width, height)?;
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, height.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Border & background ───────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, width: u16, height: u16) -> std::io::Result<()> {
    let w = width as usize;
    out.queue(style::SetForegroundColor(C_BORDER))?;

    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    out.queue(cursor::MoveTo(0, height.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    for row in 2..height.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(width.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }
    Ok(())
}

/// Ground strip scrolled by `background_offset`; stars or clouds drift at
/// a quarter of that speed.
fn draw_background<W: Write>(
    out: &mut W,
    view: &Viewport,
    state: &GameState,
) -> std::io::Result<()> {
    let colors = palette(state.theme);
    let ground_row = view.row(GROUND_LEVEL);
    let cols = view.play_cols() as i32;
    let cell = VIEW_WIDTH / view.play_cols();

    for c in 0..cols {
        let world_x = c as f64 * cell + state.background_offset;
        let detail = (world_x / 40.0).floor() as i64 % 3 == 0;
        let (glyph, color) = if detail {
            ("▔", colors.ground_detail)
        } else {
            ("▀", colors.ground)
        };
        view.put(out, 1 + c, ground_row, glyph, color)?;

        let sky_x = (c as f64 * cell + state.background_offset / 4.0) as i64;
        if sky_x % 211 == 0 {
            let glyph = match state.theme {
                Theme::Day => "~",
                Theme::Night => "·",
            };
            let row = 3 + (sky_x / 211 % 3) as i32;
            view.put(out, 1 + c, row, glyph, colors.sky_detail)?;
        }
    }
    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, state: &GameState, width: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("Score:{:>6}", state.points())))?;
    out.queue(style::SetForegroundColor(C_HUD_BEST))?;
    out.queue(Print(format!("  Best:{:>6}", state.high_score)))?;
    out.queue(style::SetForegroundColor(C_HUD_SPEED))?;
    out.queue(Print(format!("  Speed:{:.1}x", state.speed)))?;
    if state.running {
        out.queue(style::SetForegroundColor(Color::Green))?;
        out.queue(Print(format!("  Time:{}s", state.seconds())))?;
    }

    let (label, color) = difficulty_label(state.difficulty);
    let tag = format!("[ {} ]", label);
    let col = width.saturating_sub(tag.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(col, 0))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(tag))?;
    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_runner<W: Write>(out: &mut W, view: &Viewport, state: &GameState) -> std::io::Result<()> {
    let runner = &state.runner;
    let (w, h) = runner.size();
    let color = palette(state.theme).runner;
    let body = match runner.stance {
        Stance::Standing => "█",
        Stance::Jumping { .. } => "▀",
        Stance::Ducking => "▄",
    };
    view.fill(out, runner.x, runner.y, w, h, body, color)?;
    // Head
    view.put(out, view.col(runner.x + w / 2.0), view.row(runner.y) - 1, "●", color)
}

fn draw_label<W: Write>(
    out: &mut W,
    view: &Viewport,
    obstacle: &Obstacle,
    label: &str,
    color: Color,
) -> std::io::Result<()> {
    let left = view.col(obstacle.x);
    let span = (view.col(obstacle.right()) - left).max(1) as usize;
    let text: String = if label.chars().count() <= span {
        label.to_string()
    } else {
        label.chars().take(span).collect()
    };
    view.put(out, left, view.row(obstacle.y) - 1, &text, color)
}

fn draw_obstacle<W: Write>(
    out: &mut W,
    view: &Viewport,
    obstacle: &Obstacle,
) -> std::io::Result<()> {
    match &obstacle.kind {
        ObstacleKind::Standard(archetype) => {
            let color = if obstacle.ufo_drop {
                C_UFO_DROP
            } else {
                priority_color(archetype.priority)
            };
            let fill = shape_fill(archetype.shape);
            view.fill(out, obstacle.x, obstacle.y, obstacle.width, obstacle.height, fill, color)?;
            let label = if obstacle.ufo_drop { "UFO DROP" } else { archetype.title };
            draw_label(out, view, obstacle, label, color)
        }
        ObstacleKind::Boss(boss) => {
            let color = if boss.is_destroyed() { C_BOSS_HURT } else { C_BOSS };
            view.fill(out, obstacle.x, obstacle.y, obstacle.width, obstacle.height, "▒", color)?;
            // Eyes
            let eye_row = view.row(obstacle.y + obstacle.height * 0.3);
            let eyes = if boss.is_shooting() { "◉ ◉" } else { "o o" };
            view.put(out, view.col(obstacle.x + obstacle.width * 0.25), eye_row, eyes, Color::Yellow)?;
            draw_label(out, view, obstacle, "BOSS", C_BOSS_HURT)?;
            for bullet in &boss.bullets {
                view.put(out, view.col(bullet.x), view.row(bullet.y), "=", C_BULLET)?;
            }
            Ok(())
        }
    }
}

fn draw_ufo<W: Write>(out: &mut W, view: &Viewport, state: &GameState) -> std::io::Result<()> {
    let ufo = &state.ufo;
    if !ufo.is_active() {
        return Ok(());
    }
    let col = view.col(ufo.x);
    let row = view.row(ufo.y);
    view.put(out, col, row - 1, "BOSS UFO", C_UFO)?;
    view.put(out, col, row, "<(O)>", C_UFO)?;
    if let Some(drop) = ufo.falling_drop() {
        draw_obstacle(out, view, drop)?;
    }
    Ok(())
}

fn draw_particles<W: Write>(
    out: &mut W,
    view: &Viewport,
    state: &GameState,
) -> std::io::Result<()> {
    for p in &state.particles {
        let glyph = if p.life > 0.5 { "*" } else { "·" };
        view.put(out, view.col(p.x), view.row(p.y), glyph, particle_color(p.color))?;
    }
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, height: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, height.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("↑/W : Jump   ↓/S : Duck   SPACE : Pause   Q : Quit"))?;
    Ok(())
}

// ── Overlays ──────────────────────────────────────────────────────────────────

fn draw_centered<W: Write>(
    out: &mut W,
    width: u16,
    row: u16,
    text: &str,
    color: Color,
) -> std::io::Result<()> {
    let col = (width / 2).saturating_sub(text.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(text))?;
    Ok(())
}

fn draw_pause<W: Write>(out: &mut W, width: u16, height: u16) -> std::io::Result<()> {
    let lines: &[(&str, Color)] = &[
        ("╔════════════════════╗", Color::Cyan),
        ("║       PAUSED       ║", Color::Cyan),
        ("╚════════════════════╝", Color::Cyan),
        ("SPACE - Resume  Q - Quit", Color::White),
    ];
    let start_row = (height / 2).saturating_sub(lines.len() as u16 / 2);
    for (i, (text, color)) in lines.iter().enumerate() {
        draw_centered(out, width, start_row + i as u16, text, *color)?;
    }
    Ok(())
}

fn draw_game_over<W: Write>(
    out: &mut W,
    state: &GameState,
    width: u16,
    height: u16,
) -> std::io::Result<()> {
    let points = state.points();
    let new_best = points >= state.high_score && points > 0;
    let score_line = format!("Final Score: {:>6}", points);
    let best_line = if new_best {
        format!("★ NEW BEST: {:>6} ★", state.high_score)
    } else {
        format!("Best Score:  {:>6}", state.high_score)
    };
    let (label, _) = difficulty_label(state.difficulty);
    let stats_line = format!("{}s  {:.1}x  {}", state.seconds(), state.speed, label);

    let lines: Vec<(String, Color)> = vec![
        ("╔════════════════════╗".to_string(), Color::Red),
        ("║    GAME  OVER      ║".to_string(), Color::Red),
        ("╚════════════════════╝".to_string(), Color::Red),
        (score_line, Color::Yellow),
        (best_line, if new_best { Color::Yellow } else { Color::DarkGrey }),
        (stats_line, Color::DarkGrey),
        ("R - Play Again  M - Menu  Q - Quit".to_string(), Color::White),
    ];

    let start_row = (height / 2).saturating_sub(lines.len() as u16 / 2);
    for (i, (text, color)) in lines.iter().enumerate() {
        draw_centered(out, width, start_row + i as u16, text, *color)?;
    }
    Ok(())
}

/// Rendering layer. All terminal I/O lives here.
///
/// The simulation runs in world units; this module scales them onto whatever
/// grid the terminal currently has.  No game logic is performed; it only
/// translates state into terminal commands.

use std::io::{self, Write};

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};

use arcade_shooter::compute::player_visible;
use arcade_shooter::entities::{GameState, GameStatus, PickupMessage, PowerUpKind};
use arcade_shooter::error::GameResult;
use arcade_shooter::session::{AudioPlayer, Renderer, Sound};
use arcade_shooter::timers::Effect;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::White;
const C_HUD_HIGH: Color = Color::Yellow;
const C_HUD_LIVES: Color = Color::Red;
const C_HUD_LIFE_LOST: Color = Color::DarkGrey;
const C_HUD_TIMER: Color = Color::Blue;
const C_PLAYER: Color = Color::White;
const C_ENEMY: Color = Color::Green;
const C_OBSTACLE: Color = Color::DarkYellow;
const C_BULLET: Color = Color::Yellow;
const C_POWER_DOUBLE: Color = Color::Green;
const C_POWER_INVIS: Color = Color::Blue;
const C_POPUP: Color = Color::White;
const C_SHADE: Color = Color::DarkGrey;
const C_HINT: Color = Color::DarkGrey;

pub const CONTROLS_HINT: &str = "← → / A D : Move   ↑ / W / SPACE : Fire   C : Sweep   Q : Quit";

pub struct TerminalRenderer<W: Write> {
    out: W,
    cols: u16,
    rows: u16,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W, cols: u16, rows: u16) -> Self {
        TerminalRenderer { out, cols, rows }
    }

    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.cols = cols;
        self.rows = rows;
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn render(&mut self, state: &GameState, now_ms: u64) -> GameResult<()> {
        let grid = Grid::new(self.cols, self.rows, state);
        draw_frame(&mut self.out, &grid, state, now_ms)?;
        Ok(())
    }
}

// ── World → terminal mapping ─────────────────────────────────────────────────

/// Play area is rows 2..rows-2 and columns 1..cols-1, inside the border.
struct Grid {
    cols: u16,
    rows: u16,
    world_w: i32,
    world_h: i32,
}

impl Grid {
    fn new(cols: u16, rows: u16, state: &GameState) -> Self {
        Grid {
            cols,
            rows,
            world_w: state.rules.world_width.max(1),
            world_h: state.rules.world_height.max(1),
        }
    }

    fn inner_w(&self) -> i32 {
        (self.cols as i32 - 2).max(1)
    }

    fn inner_h(&self) -> i32 {
        (self.rows as i32 - 4).max(1)
    }

    fn col(&self, x: i32) -> u16 {
        let c = 1 + x.clamp(0, self.world_w) * self.inner_w() / self.world_w;
        c.clamp(1, self.inner_w()) as u16
    }

    fn row(&self, y: i32) -> u16 {
        let r = 2 + y.clamp(0, self.world_h) * self.inner_h() / self.world_h;
        r.clamp(2, self.inner_h() + 1) as u16
    }

    /// Width in columns of something `w` world units wide; at least one.
    fn span(&self, w: i32) -> u16 {
        (w * self.inner_w() / self.world_w).max(1) as u16
    }
}

// ── Frame ─────────────────────────────────────────────────────────────────────

fn draw_frame<W: Write>(
    out: &mut W,
    grid: &Grid,
    state: &GameState,
    now_ms: u64,
) -> io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out, grid)?;
    draw_hud(out, grid, state, now_ms)?;

    if player_visible(state, now_ms) {
        draw_player(out, grid, state)?;
    }
    for bullet in &state.bullets {
        out.queue(cursor::MoveTo(grid.col(bullet.center_x()), grid.row(bullet.y)))?;
        out.queue(style::SetForegroundColor(C_BULLET))?;
        out.queue(Print("║"))?;
    }
    for enemy in &state.enemies {
        let glyph = sprite("«▼»", grid.span(enemy.width));
        out.queue(cursor::MoveTo(grid.col(enemy.x), grid.row(enemy.y)))?;
        out.queue(style::SetForegroundColor(C_ENEMY))?;
        out.queue(Print(glyph))?;
    }
    for obstacle in &state.obstacles {
        out.queue(cursor::MoveTo(grid.col(obstacle.x), grid.row(obstacle.y)))?;
        out.queue(style::SetForegroundColor(C_OBSTACLE))?;
        out.queue(Print("◆"))?;
    }
    for powerup in &state.powerups {
        let (glyph, color) = match powerup.kind {
            PowerUpKind::DoubleShot => ("‼", C_POWER_DOUBLE),
            PowerUpKind::Invisible => ("◌", C_POWER_INVIS),
        };
        out.queue(cursor::MoveTo(grid.col(powerup.x), grid.row(powerup.y)))?;
        out.queue(style::SetForegroundColor(color))?;
        out.queue(Print(glyph))?;
    }
    for popup in &state.popups {
        out.queue(cursor::MoveTo(
            grid.col(popup.x as i32),
            grid.row(popup.y as i32),
        ))?;
        out.queue(style::SetForegroundColor(C_POPUP))?;
        out.queue(Print(&popup.text))?;
    }
    for msg in &state.pickup_messages {
        draw_pickup_message(out, grid, msg)?;
    }

    out.queue(cursor::MoveTo(1, grid.rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(CONTROLS_HINT))?;

    if state.status == GameStatus::GameOver {
        draw_game_over(out, grid, state)?;
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, grid.rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

/// Stretch a three-character sprite to `span` columns by repeating its middle.
fn sprite(base: &str, span: u16) -> String {
    let chars: Vec<char> = base.chars().collect();
    if span <= 3 || chars.len() != 3 {
        return base.to_string();
    }
    let mut s = String::new();
    s.push(chars[0]);
    for _ in 0..span - 2 {
        s.push(chars[1]);
    }
    s.push(chars[2]);
    s
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, grid: &Grid) -> io::Result<()> {
    let w = grid.cols as usize;
    let h = grid.rows;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    // Row 1: top bar
    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    // Row h-2: bottom bar
    out.queue(cursor::MoveTo(0, h.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    // Side walls
    for row in 2..h.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(grid.cols.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(
    out: &mut W,
    grid: &Grid,
    state: &GameState,
    now_ms: u64,
) -> io::Result<()> {
    // Lives on the left, one heart per life, lost ones greyed out
    out.queue(cursor::MoveTo(1, 0))?;
    for i in 0..state.rules.max_lives {
        let color = if i < state.lives {
            C_HUD_LIVES
        } else {
            C_HUD_LIFE_LOST
        };
        out.queue(style::SetForegroundColor(color))?;
        out.queue(Print("♥ "))?;
    }

    // Active power-up countdowns in the centre
    let mut timers = Vec::new();
    if state.timers.is_active(Effect::DoubleShot) {
        timers.push(format!(
            "Double: {}s",
            state.timers.remaining_secs(Effect::DoubleShot, now_ms)
        ));
    }
    if state.timers.is_active(Effect::Invisible) {
        timers.push(format!(
            "Invisible: {}s",
            state.timers.remaining_secs(Effect::Invisible, now_ms)
        ));
    }
    if !timers.is_empty() {
        let line = timers.join("  ");
        let x = (grid.cols / 2).saturating_sub(line.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(x, 0))?;
        out.queue(style::SetForegroundColor(C_HUD_TIMER))?;
        out.queue(Print(line))?;
    }

    // Score and high score on the right
    let score = format!("Score: {}  ", state.score);
    let high = format!("High: {}", state.high_score);
    let len = (score.chars().count() + high.chars().count()) as u16;
    out.queue(cursor::MoveTo(grid.cols.saturating_sub(len + 1), 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(score))?;
    out.queue(style::SetForegroundColor(C_HUD_HIGH))?;
    out.queue(Print(high))?;

    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_player<W: Write>(out: &mut W, grid: &Grid, state: &GameState) -> io::Result<()> {
    //   ▲       ← tip
    //  /█\      ← fuselage + wings
    let p = &state.player;
    let tip_col = grid.col(p.center_x());
    let row = grid.row(p.y);
    out.queue(style::SetForegroundColor(C_PLAYER))?;

    out.queue(cursor::MoveTo(tip_col, row))?;
    out.queue(Print("▲"))?;

    let wing_row = row + 1;
    if wing_row < grid.rows.saturating_sub(2) {
        let body = sprite("/█\\", grid.span(p.width));
        let half = body.chars().count() as u16 / 2;
        out.queue(cursor::MoveTo(tip_col.saturating_sub(half).max(1), wing_row))?;
        out.queue(Print(body))?;
    }

    Ok(())
}

fn draw_pickup_message<W: Write>(
    out: &mut W,
    grid: &Grid,
    msg: &PickupMessage,
) -> io::Result<()> {
    // No real alpha in a terminal: step the colour down as it fades.
    let color = match msg.alpha {
        171..=255 => Color::White,
        86..=170 => Color::Grey,
        _ => Color::DarkGrey,
    };
    out.queue(cursor::MoveTo(grid.col(msg.x as i32), grid.row(msg.y as i32)))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(&msg.text))?;
    Ok(())
}

// ── Game-over overlay ─────────────────────────────────────────────────────────

fn draw_game_over<W: Write>(out: &mut W, grid: &Grid, state: &GameState) -> io::Result<()> {
    // Shade the whole play area first
    let shade = "░".repeat(grid.inner_w() as usize);
    out.queue(style::SetForegroundColor(C_SHADE))?;
    for row in 2..grid.rows.saturating_sub(2) {
        out.queue(cursor::MoveTo(1, row))?;
        out.queue(Print(&shade))?;
    }

    let lines: &[(String, Color)] = &[
        ("╔════════════════════╗".to_string(), Color::Red),
        ("║     GAME  OVER     ║".to_string(), Color::Red),
        ("╚════════════════════╝".to_string(), Color::Red),
        (format!("Score: {}", state.score), Color::White),
        (format!("High Score: {}", state.high_score), Color::Yellow),
        ("Press R to Restart or Q / ESC to Quit".to_string(), Color::Grey),
    ];

    let cx = grid.cols / 2;
    let start_row = (grid.rows / 2).saturating_sub(lines.len() as u16 / 2);

    for (i, (msg, color)) in lines.iter().enumerate() {
        let row = start_row + i as u16;
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(msg))?;
    }

    Ok(())
}

// ── Sound ─────────────────────────────────────────────────────────────────────

/// The terminal's only sound: the bell, rung for explosions and pickups.
/// Shots stay quiet or the bell would ring several times a second.
pub struct BellAudio {
    enabled: bool,
}

impl BellAudio {
    pub fn new(enabled: bool) -> Self {
        BellAudio { enabled }
    }
}

impl AudioPlayer for BellAudio {
    fn play(&mut self, sound: Sound) {
        log::trace!("sound {:?}", sound);
        if !self.enabled || sound == Sound::Fire {
            return;
        }
        let mut out = io::stdout();
        let _ = out.write_all(b"\x07").and_then(|_| out.flush());
    }
}

/// All game entity types: pure data plus bounding boxes, no game rules.

use crate::config::{Rules, BULLET_HEIGHT, BULLET_WIDTH};
use crate::timers::Timers;

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Axis-aligned box in world units. `y` grows downward; `(x, y)` is the top-left.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Rect { x, y, w, h }
    }

    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    /// Strict overlap: boxes that only share an edge do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

// ── Enums ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    GameOver,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PowerUpKind {
    /// Two bullets per shot for the power-up duration.
    DoubleShot,
    /// Enemies pass through the ship for the power-up duration.
    Invisible,
}

impl PowerUpKind {
    pub fn pickup_text(&self) -> &'static str {
        match self {
            PowerUpKind::DoubleShot => "Double Shot!",
            PowerUpKind::Invisible => "Invisible!",
        }
    }
}

/// Something that happened during a tick that the outside world may react to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameEvent {
    Shot,
    Explosion,
    PowerUpPickup(PowerUpKind),
    /// The run just ended with a score above the previous best.
    NewHighScore(u32),
}

// ── Player & projectiles ──────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Player {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    pub fn center_x(&self) -> i32 {
        self.x + self.width / 2
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Bullet {
    pub x: i32,
    pub y: i32,
}

impl Bullet {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, BULLET_WIDTH, BULLET_HEIGHT)
    }

    pub fn center_x(&self) -> i32 {
        self.x + BULLET_WIDTH / 2
    }
}

// ── Falling things ────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Enemy {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Obstacle {
    pub x: i32,
    pub y: i32,
    pub size: i32,
}

impl Obstacle {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.size, self.size)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PowerUp {
    pub kind: PowerUpKind,
    pub x: i32,
    pub y: i32,
    pub size: i32,
    /// Ticks left before it vanishes on its own.
    pub ttl: u32,
}

impl PowerUp {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.size, self.size)
    }
}

// ── Cosmetic text ─────────────────────────────────────────────────────────────

/// Floating "+1" shown where an enemy died.
#[derive(Clone, Debug, PartialEq)]
pub struct Popup {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub ttl: u32,
}

/// Fading message shown above the ship when a power-up is collected.
#[derive(Clone, Debug, PartialEq)]
pub struct PickupMessage {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub alpha: u8,
    pub ttl: u32,
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire game state.  Cloneable so pure update functions can
/// return a new copy without mutating the original.
#[derive(Clone, Debug)]
pub struct GameState {
    pub player: Player,
    pub bullets: Vec<Bullet>,
    pub enemies: Vec<Enemy>,
    pub obstacles: Vec<Obstacle>,
    pub powerups: Vec<PowerUp>,
    pub popups: Vec<Popup>,
    pub pickup_messages: Vec<PickupMessage>,
    pub timers: Timers,
    pub lives: u32,
    pub score: u32,
    /// Best score known to this process, including the run in progress once
    /// it ends.
    pub high_score: u32,
    pub status: GameStatus,
    pub frame: u64,
    /// Events produced by the most recent tick only.
    pub events: Vec<GameEvent>,
    pub rules: Rules,
}

impl GameState {
    /// True when every transient collection is empty.
    pub fn is_cleared(&self) -> bool {
        self.bullets.is_empty()
            && self.enemies.is_empty()
            && self.obstacles.is_empty()
            && self.powerups.is_empty()
            && self.popups.is_empty()
            && self.pickup_messages.is_empty()
    }

    pub fn clear_entities(&mut self) {
        self.bullets.clear();
        self.enemies.clear();
        self.obstacles.clear();
        self.powerups.clear();
        self.popups.clear();
        self.pickup_messages.clear();
    }
}

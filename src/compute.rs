/// Pure game-logic functions.
///
/// Every public function takes an immutable reference to the current
/// `GameState` (plus the caller's clock and, where needed, an RNG handle) and
/// returns a brand-new `GameState`.  Side effects are limited to the injected
/// RNG; anything the outside world should react to is left in `state.events`.

use rand::Rng;

use crate::config::Rules;
use crate::entities::{
    Bullet, Enemy, GameEvent, GameState, GameStatus, Obstacle, PickupMessage, Player, Popup,
    PowerUp, PowerUpKind, Rect,
};
use crate::input::FrameInput;
use crate::registry::{self, clamp_x, roll};
use crate::timers::{Effect, Timers};

/// Blink period of the ship while invulnerable.
const BLINK_MS: u64 = 150;

/// Pickup messages start this far above the ship.
const PICKUP_MESSAGE_RISE: i32 = 20;

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the initial game state: ship centred near the bottom, full lives.
pub fn init_state(rules: Rules, high_score: u32) -> GameState {
    GameState {
        player: Player {
            x: rules.world_width / 2,
            y: rules.world_height - (rules.player_height + 20),
            width: rules.player_width,
            height: rules.player_height,
        },
        bullets: Vec::new(),
        enemies: Vec::new(),
        obstacles: Vec::new(),
        powerups: Vec::new(),
        popups: Vec::new(),
        pickup_messages: Vec::new(),
        timers: Timers::new(),
        lives: rules.max_lives,
        score: 0,
        high_score,
        status: GameStatus::Playing,
        frame: 0,
        events: Vec::new(),
        rules,
    }
}

// ── Restart ───────────────────────────────────────────────────────────────────

/// GameOver → Playing. Empties the field and starts a fresh run; the ship
/// stays where it was and the high score carries over.
pub fn restart(state: &GameState) -> GameState {
    let mut next = state.clone();
    next.clear_entities();
    next.timers.clear();
    next.lives = next.rules.max_lives;
    next.score = 0;
    next.status = GameStatus::Playing;
    next.events.clear();
    log::info!("restart (high score {})", next.high_score);
    next
}

/// The ship blinks while invulnerable: hidden on every other 150 ms slot.
pub fn player_visible(state: &GameState, now_ms: u64) -> bool {
    !(state.timers.is_active(Effect::Invulnerable) && (now_ms / BLINK_MS) % 2 == 0)
}

fn step_player(state: &mut GameState, direction: i32) {
    let p = &mut state.player;
    p.x = clamp_x(p.x + direction * state.rules.player_speed, p.width, &state.rules);
}

fn fire(state: &mut GameState, now_ms: u64) {
    if !state
        .timers
        .try_fire(now_ms, state.rules.fire_cooldown_ms)
    {
        return;
    }
    let double = state.timers.is_active(Effect::DoubleShot);
    state
        .bullets
        .extend(registry::spawn_bullets(&state.player, double));
    state.events.push(GameEvent::Shot);
}

// ── Per-frame tick (RNG is injected) ──────────────────────────

/// Advance the simulation by one tick.  All randomness comes through `rng`
/// and all time through `now_ms`, so callers control determinism.
pub fn tick(
    state: &GameState,
    input: &FrameInput,
    now_ms: u64,
    rng: &mut impl Rng,
) -> GameState {
    let mut next = state.clone();
    next.frame += 1;
    next.events.clear();

    // Cosmetics from earlier ticks fade before anything new is added.
    age_popups(&mut next);

    if next.status == GameStatus::Playing {
        // ── 1. Input ─────────────────────────────────────────────────────────
        if input.cleanup {
            registry::manual_sweep(&mut next);
        }
        if input.left {
            step_player(&mut next, -1);
        }
        if input.right {
            step_player(&mut next, 1);
        }
        if input.fire {
            fire(&mut next, now_ms);
        }

        // ── 2–4. Movement and out-of-bounds removal ──────────────────────────
        advance(&mut next);

        // ── 5–6. Bullets ↔ enemies, then bullets ↔ obstacles ────────────────
        resolve_bullet_hits(&mut next);

        // ── 7–8. Contact damage ──────────────────────────────────────────────
        resolve_enemy_contact(&mut next, now_ms);
        if next.status == GameStatus::Playing {
            resolve_obstacle_contact(&mut next, now_ms);
        }

        // ── 9–10. Power-up pickups and spawn rolls ───────────────────────────
        if next.status == GameStatus::Playing {
            resolve_pickups(&mut next, now_ms);
            spawn_rolls(&mut next, rng);
        }
    }

    next.timers.update(now_ms);

    let margin = next.rules.sweep_margin;
    registry::sweep(&mut next, margin);

    next
}

fn advance(state: &mut GameState) {
    let r = state.rules;
    let floor = r.world_height - r.sweep_margin;

    state.bullets = state
        .bullets
        .iter()
        .map(|b| Bullet {
            y: b.y - r.bullet_speed,
            ..b.clone()
        })
        .filter(|b| b.y >= 0 && b.y <= r.world_height)
        .collect();

    state.enemies = state
        .enemies
        .iter()
        .map(|e| Enemy {
            y: e.y + r.enemy_speed,
            ..e.clone()
        })
        .filter(|e| e.y <= r.world_height && e.rect().bottom() < floor)
        .collect();

    state.obstacles = state
        .obstacles
        .iter()
        .map(|o| Obstacle {
            y: o.y + r.obstacle_speed,
            ..o.clone()
        })
        .filter(|o| o.y <= r.world_height && o.rect().bottom() < floor)
        .collect();

    state.powerups = state
        .powerups
        .iter()
        .map(|p| PowerUp {
            y: p.y + r.powerup_speed,
            ttl: p.ttl.saturating_sub(1),
            ..p.clone()
        })
        .filter(|p| p.y <= r.world_height && p.rect().bottom() < floor && p.ttl > 0)
        .collect();
}

/// Index of the first bullet not yet spent that overlaps `target`.
fn first_hit(bullets: &[Bullet], spent: &[bool], target: &Rect) -> Option<usize> {
    (0..bullets.len()).find(|&i| !spent[i] && bullets[i].rect().intersects(target))
}

fn resolve_bullet_hits(state: &mut GameState) {
    let mut spent = vec![false; state.bullets.len()];

    let mut enemies = Vec::with_capacity(state.enemies.len());
    for enemy in std::mem::take(&mut state.enemies) {
        match first_hit(&state.bullets, &spent, &enemy.rect()) {
            Some(bi) => {
                spent[bi] = true;
                state.score += 1;
                state.popups.push(Popup {
                    text: "+1".to_string(),
                    x: enemy.x as f32,
                    y: enemy.y as f32,
                    ttl: state.rules.popup_ttl,
                });
                state.events.push(GameEvent::Explosion);
            }
            None => enemies.push(enemy),
        }
    }
    state.enemies = enemies;

    let mut obstacles = Vec::with_capacity(state.obstacles.len());
    for obstacle in std::mem::take(&mut state.obstacles) {
        match first_hit(&state.bullets, &spent, &obstacle.rect()) {
            Some(bi) => {
                spent[bi] = true;
                state.events.push(GameEvent::Explosion);
            }
            None => obstacles.push(obstacle),
        }
    }
    state.obstacles = obstacles;

    state.bullets = std::mem::take(&mut state.bullets)
        .into_iter()
        .zip(spent)
        .filter(|(_, spent)| !spent)
        .map(|(b, _)| b)
        .collect();
}

fn resolve_enemy_contact(state: &mut GameState, now_ms: u64) {
    if state.timers.is_active(Effect::Invisible) {
        return;
    }
    let ship = state.player.rect();
    if let Some(i) = state.enemies.iter().position(|e| e.rect().intersects(&ship)) {
        state.enemies.remove(i);
        damage_player(state, now_ms, "enemy");
    }
}

fn resolve_obstacle_contact(state: &mut GameState, now_ms: u64) {
    if state.timers.is_active(Effect::Invulnerable) {
        return;
    }
    let ship = state.player.rect();
    if let Some(i) = state.obstacles.iter().position(|o| o.rect().intersects(&ship)) {
        state.obstacles.remove(i);
        damage_player(state, now_ms, "obstacle");
    }
}

fn damage_player(state: &mut GameState, now_ms: u64, cause: &str) {
    state.lives = state.lives.saturating_sub(1);
    state
        .timers
        .activate(Effect::Invulnerable, now_ms, state.rules.invulnerability_ms);
    state.events.push(GameEvent::Explosion);
    log::debug!("hit by {}; lives left: {}", cause, state.lives);

    if state.lives == 0 {
        enter_game_over(state);
    }
}

/// Playing → GameOver. Clears the field and records a new best score.
fn enter_game_over(state: &mut GameState) {
    state.status = GameStatus::GameOver;
    state.clear_entities();
    if state.score > state.high_score {
        state.high_score = state.score;
        state.events.push(GameEvent::NewHighScore(state.score));
    }
    log::info!(
        "game over: score {}, high score {}",
        state.score,
        state.high_score
    );
}

fn effect_for(kind: PowerUpKind) -> Effect {
    match kind {
        PowerUpKind::DoubleShot => Effect::DoubleShot,
        PowerUpKind::Invisible => Effect::Invisible,
    }
}

fn resolve_pickups(state: &mut GameState, now_ms: u64) {
    let ship = state.player.rect();
    let (taken, remaining): (Vec<PowerUp>, Vec<PowerUp>) = std::mem::take(&mut state.powerups)
        .into_iter()
        .partition(|p| p.rect().intersects(&ship));
    state.powerups = remaining;

    for powerup in taken {
        state.timers.activate(
            effect_for(powerup.kind),
            now_ms,
            state.rules.powerup_duration_ms,
        );
        state.pickup_messages.push(PickupMessage {
            text: powerup.kind.pickup_text().to_string(),
            x: state.player.x as f32,
            y: (state.player.y - PICKUP_MESSAGE_RISE) as f32,
            alpha: 255,
            ttl: state.rules.pickup_message_ttl,
        });
        state.events.push(GameEvent::PowerUpPickup(powerup.kind));
        log::debug!("picked up {:?}", powerup.kind);
    }
}

fn spawn_rolls(state: &mut GameState, rng: &mut impl Rng) {
    if roll(rng, state.rules.enemy_spawn_chance) {
        registry::spawn_enemy(state, rng);
    }
    if roll(rng, state.rules.obstacle_spawn_chance) {
        registry::spawn_obstacle(state, rng);
    }
}

/// Floating text drifts up half a unit per tick; pickup messages also fade.
fn age_popups(state: &mut GameState) {
    state.popups = state
        .popups
        .iter()
        .filter(|p| p.ttl > 1)
        .map(|p| Popup {
            y: p.y - 0.5,
            ttl: p.ttl - 1,
            ..p.clone()
        })
        .collect();

    state.pickup_messages = state
        .pickup_messages
        .iter()
        .filter(|m| m.ttl > 1 && m.alpha > 2)
        .map(|m| PickupMessage {
            y: m.y - 0.5,
            alpha: m.alpha - 2,
            ttl: m.ttl - 1,
            ..m.clone()
        })
        .collect();
}

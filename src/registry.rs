/// Spawning and bulk removal of entities.
///
/// Spawns take the RNG as a parameter so a seeded generator reproduces the
/// same sequence of enemies, obstacles and power-ups.

use rand::Rng;

use crate::config::{Rules, BULLET_WIDTH};
use crate::entities::{Bullet, Enemy, GameState, Obstacle, Player, PowerUp, PowerUpKind};

/// One-in-`chance` roll. A chance of 0 never succeeds.
pub fn roll(rng: &mut impl Rng, chance: u32) -> bool {
    chance > 0 && rng.gen_ratio(1, chance)
}

/// Add an enemy at the top edge, at a random column that keeps it on screen.
pub fn spawn_enemy(state: &mut GameState, rng: &mut impl Rng) {
    let r = state.rules;
    let max_x = (r.world_width - r.enemy_width).max(0);
    state.enemies.push(Enemy {
        x: rng.gen_range(0..=max_x),
        y: 0,
        width: r.enemy_width,
        height: r.enemy_height,
    });
}

/// Add an obstacle at the top edge. Occasionally a power-up comes with it,
/// starting at the same spot.
pub fn spawn_obstacle(state: &mut GameState, rng: &mut impl Rng) {
    let r = state.rules;
    let max_x = (r.world_width - r.obstacle_size).max(0);
    let obstacle = Obstacle {
        x: rng.gen_range(0..=max_x),
        y: 0,
        size: r.obstacle_size,
    };

    if roll(rng, r.powerup_spawn_chance) {
        let kind = if rng.gen_bool(0.5) {
            PowerUpKind::DoubleShot
        } else {
            PowerUpKind::Invisible
        };
        state.powerups.push(PowerUp {
            kind,
            x: obstacle.x,
            y: obstacle.y,
            size: r.obstacle_size,
            ttl: r.powerup_ttl,
        });
    }

    state.obstacles.push(obstacle);
}

/// Bullets for a single shot, leaving from the ship's top edge.
///
/// One bullet centred on the ship, or with `double_shot` two bullets whose
/// centres sit a quarter ship-width either side of the ship's centre.
pub fn spawn_bullets(player: &Player, double_shot: bool) -> Vec<Bullet> {
    let cx = player.center_x();
    let half = BULLET_WIDTH / 2;
    if double_shot {
        let offset = player.width / 4;
        vec![
            Bullet { x: cx - offset - half, y: player.y },
            Bullet { x: cx + offset - half, y: player.y },
        ]
    } else {
        vec![Bullet { x: cx - half, y: player.y }]
    }
}

/// Drop everything whose bottom edge has reached `world_height - margin`.
///
/// Calling it again with nothing past the line changes nothing.
pub fn sweep(state: &mut GameState, margin: i32) {
    let limit = state.rules.world_height - margin;
    state.bullets.retain(|b| b.rect().bottom() < limit);
    state.enemies.retain(|e| e.rect().bottom() < limit);
    state.obstacles.retain(|o| o.rect().bottom() < limit);
    state.powerups.retain(|p| p.rect().bottom() < limit);
    state.popups.retain(|p| p.y < limit as f32);
}

/// Player-triggered sweep using the wider manual margin.
pub fn manual_sweep(state: &mut GameState) {
    let margin = state.rules.manual_sweep_margin;
    sweep(state, margin);
    log::info!("manual sweep with {}-unit margin", margin);
}

/// Clamp helper shared by spawns and movement.
pub fn clamp_x(x: i32, width: i32, rules: &Rules) -> i32 {
    x.clamp(0, (rules.world_width - width).max(0))
}

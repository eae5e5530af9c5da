use arcade_shooter::compute::*;
use arcade_shooter::config::Rules;
use arcade_shooter::entities::*;
use arcade_shooter::input::FrameInput;
use arcade_shooter::timers::Effect;

use rand::rngs::StdRng;
use rand::SeedableRng;

// Default rules on a 1280×720 world:
//   ship 64×51 at (640, 649), speed 4
//   bullets 4×10, speed 9 up
//   enemies 57×38, speed 1 down
//   obstacles 24×24, speed 2 down; power-ups speed 1 down

/// Default rules with every spawn roll disabled, so only what a test
/// places is on the field.
fn quiet_rules() -> Rules {
    Rules {
        enemy_spawn_chance: 0,
        obstacle_spawn_chance: 0,
        powerup_spawn_chance: 0,
        ..Rules::default()
    }
}

fn make_state() -> GameState {
    init_state(quiet_rules(), 0)
}

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn idle() -> FrameInput {
    FrameInput::default()
}

fn step(s: &GameState, now_ms: u64) -> GameState {
    tick(s, &idle(), now_ms, &mut seeded_rng())
}

fn enemy_at(x: i32, y: i32) -> Enemy {
    Enemy { x, y, width: 57, height: 38 }
}

fn obstacle_at(x: i32, y: i32) -> Obstacle {
    Obstacle { x, y, size: 24 }
}

// ── init_state ────────────────────────────────────────────────────────────────

#[test]
fn init_state_player_position() {
    let s = make_state();
    assert_eq!(s.player.x, 640); // width / 2
    assert_eq!(s.player.y, 649); // height - (ship height + 20)
    assert_eq!(s.player.width, 64);
    assert_eq!(s.player.height, 51);
    assert_eq!(s.lives, 3);
}

#[test]
fn init_state_empty_collections() {
    let s = init_state(quiet_rules(), 17);
    assert!(s.is_cleared());
    assert_eq!(s.score, 0);
    assert_eq!(s.high_score, 17);
    assert_eq!(s.frame, 0);
    assert_eq!(s.status, GameStatus::Playing);
}

// ── movement ──────────────────────────────────────────────────────────────────

fn held(left: bool, right: bool, fire: bool) -> FrameInput {
    FrameInput { left, right, fire, cleanup: false }
}

#[test]
fn move_left_normal() {
    let s = make_state();
    let s2 = tick(&s, &held(true, false, false), 0, &mut seeded_rng());
    assert_eq!(s2.player.x, 636);
}

#[test]
fn move_left_clamps_at_edge() {
    let mut s = make_state();
    s.player.x = 2;
    let s2 = tick(&s, &held(true, false, false), 0, &mut seeded_rng());
    assert_eq!(s2.player.x, 0);
}

#[test]
fn move_right_clamps_at_edge() {
    let mut s = make_state();
    s.player.x = 1214;
    let s2 = tick(&s, &held(false, true, false), 0, &mut seeded_rng());
    assert_eq!(s2.player.x, 1216); // world width - ship width
}

#[test]
fn both_directions_cancel_out() {
    let s = make_state();
    let s2 = tick(&s, &held(true, true, false), 0, &mut seeded_rng());
    assert_eq!(s2.player.x, 640);
}

#[test]
fn tick_does_not_mutate_original() {
    let s = make_state();
    let _ = tick(&s, &held(true, false, true), 0, &mut seeded_rng());
    assert_eq!(s.player.x, 640);
    assert!(s.bullets.is_empty());
    assert_eq!(s.timers.last_shot_ms(), None);
}

#[test]
fn tick_applies_held_direction() {
    let s = make_state();
    let input = FrameInput { right: true, ..idle() };
    let s2 = tick(&s, &input, 0, &mut seeded_rng());
    assert_eq!(s2.player.x, 644);
}

// ── firing ────────────────────────────────────────────────────────────────────

fn fire_at(s: &GameState, now_ms: u64) -> GameState {
    tick(s, &held(false, false, true), now_ms, &mut seeded_rng())
}

#[test]
fn shoot_single_bullet_centred() {
    let s = make_state();
    let s2 = fire_at(&s, 0);
    assert_eq!(s2.bullets.len(), 1);
    assert_eq!(s2.bullets[0].center_x(), s.player.center_x());
    assert_eq!(s2.bullets[0].y, s.player.y - 9); // spawned, then one step up
    assert_eq!(s2.events, vec![GameEvent::Shot]);
}

#[test]
fn shoot_double_shot_is_symmetric() {
    let mut s = make_state();
    s.timers.activate(Effect::DoubleShot, 0, 8000);
    let s2 = fire_at(&s, 0);
    assert_eq!(s2.bullets.len(), 2);

    let cx = s.player.center_x();
    let left = s2.bullets[0].center_x();
    let right = s2.bullets[1].center_x();
    assert!(left < cx && cx < right);
    assert_eq!(cx - left, right - cx);
}

#[test]
fn shoot_respects_cooldown() {
    let s = make_state();
    let s = fire_at(&s, 1000);
    let s = fire_at(&s, 1300); // exactly the cooldown: still blocked
    assert_eq!(s.bullets.len(), 1);
    let s = fire_at(&s, 1301);
    assert_eq!(s.bullets.len(), 2);
}

#[test]
fn tick_fire_spawns_and_moves_bullet() {
    let s = make_state();
    let input = FrameInput { fire: true, ..idle() };
    let s2 = tick(&s, &input, 0, &mut seeded_rng());
    assert_eq!(s2.bullets.len(), 1);
    assert_eq!(s2.bullets[0].y, 649 - 9); // fired then advanced in the same tick
    assert!(s2.events.contains(&GameEvent::Shot));
}

// ── tick: frame counter, movement, bounds ───────────────────────────────────

#[test]
fn tick_increments_frame() {
    let mut s = make_state();
    s.frame = 5;
    assert_eq!(step(&s, 0).frame, 6);
}

#[test]
fn tick_bullet_moves_up() {
    let mut s = make_state();
    s.bullets.push(Bullet { x: 20, y: 300 });
    let s2 = step(&s, 0);
    assert_eq!(s2.bullets[0].y, 291);
}

#[test]
fn tick_bullet_discarded_past_top() {
    let mut s = make_state();
    s.bullets.push(Bullet { x: 20, y: 9 }); // → 0, kept
    s.bullets.push(Bullet { x: 40, y: 5 }); // → -4, dropped
    let s2 = step(&s, 0);
    assert_eq!(s2.bullets.len(), 1);
    assert_eq!(s2.bullets[0].y, 0);
}

#[test]
fn tick_falling_entities_move_down() {
    let mut s = make_state();
    s.enemies.push(enemy_at(0, 100));
    s.obstacles.push(obstacle_at(300, 100));
    s.powerups.push(PowerUp {
        kind: PowerUpKind::Invisible,
        x: 500,
        y: 100,
        size: 24,
        ttl: 50,
    });
    let s2 = step(&s, 0);
    assert_eq!(s2.enemies[0].y, 101);
    assert_eq!(s2.obstacles[0].y, 102);
    assert_eq!(s2.powerups[0].y, 101);
    assert_eq!(s2.powerups[0].ttl, 49);
}

#[test]
fn tick_enemy_removed_at_bottom_margin() {
    let mut s = make_state();
    s.enemies.push(enemy_at(0, 679)); // → 680, bottom 718 = height - 2
    s.enemies.push(enemy_at(200, 678)); // → 679, bottom 717
    let s2 = step(&s, 0);
    assert_eq!(s2.enemies.len(), 1);
    assert_eq!(s2.enemies[0].x, 200);
}

#[test]
fn tick_powerup_expires() {
    let mut s = make_state();
    s.powerups.push(PowerUp {
        kind: PowerUpKind::DoubleShot,
        x: 0,
        y: 100,
        size: 24,
        ttl: 1,
    });
    assert!(step(&s, 0).powerups.is_empty());
}

fn powerup_beside_ship(y: i32) -> GameState {
    let mut s = make_state();
    // Touches the ship's right edge; moving right makes them overlap.
    s.powerups.push(PowerUp {
        kind: PowerUpKind::DoubleShot,
        x: 704,
        y,
        size: 24,
        ttl: 100,
    });
    s
}

#[test]
fn tick_powerup_past_margin_cannot_be_collected() {
    // Bottom lands on 718 = height - margin after the advance.
    let s = powerup_beside_ship(693);
    let s2 = tick(&s, &held(false, true, false), 0, &mut seeded_rng());
    assert!(s2.powerups.is_empty());
    assert!(!s2.timers.is_active(Effect::DoubleShot));
    assert!(s2.events.is_empty());
    assert!(s2.pickup_messages.is_empty());
}

#[test]
fn tick_powerup_just_above_margin_is_collected() {
    let s = powerup_beside_ship(692);
    let s2 = tick(&s, &held(false, true, false), 0, &mut seeded_rng());
    assert!(s2.timers.is_active(Effect::DoubleShot));
    assert_eq!(
        s2.events,
        vec![GameEvent::PowerUpPickup(PowerUpKind::DoubleShot)]
    );
}

// ── tick: bullets ↔ enemies / obstacles ─────────────────────────────────────

#[test]
fn tick_bullet_destroys_enemy() {
    let mut s = make_state();
    s.enemies.push(enemy_at(100, 100)); // → y 101..139
    s.bullets.push(Bullet { x: 120, y: 140 }); // → y 131..141
    let s2 = step(&s, 0);
    assert!(s2.enemies.is_empty());
    assert!(s2.bullets.is_empty());
    assert_eq!(s2.score, 1);
    assert!(s2.events.contains(&GameEvent::Explosion));
    assert_eq!(s2.popups.len(), 1);
    assert_eq!(s2.popups[0].text, "+1");
    assert_eq!(s2.popups[0].x, 100.0);
    assert_eq!(s2.popups[0].y, 101.0);
}

#[test]
fn tick_bullet_touching_edge_misses() {
    let mut s = make_state();
    s.enemies.push(enemy_at(100, 100)); // → x 100..157
    s.bullets.push(Bullet { x: 157, y: 140 });
    let s2 = step(&s, 0);
    assert_eq!(s2.enemies.len(), 1);
    assert_eq!(s2.score, 0);
}

#[test]
fn tick_one_enemy_consumes_one_bullet() {
    let mut s = make_state();
    s.enemies.push(enemy_at(100, 100));
    s.bullets.push(Bullet { x: 110, y: 140 });
    s.bullets.push(Bullet { x: 130, y: 140 });
    let s2 = step(&s, 0);
    assert!(s2.enemies.is_empty());
    assert_eq!(s2.score, 1);
    assert_eq!(s2.bullets.len(), 1);
    assert_eq!(s2.bullets[0].x, 130); // first match wins
}

#[test]
fn tick_one_bullet_destroys_at_most_one_enemy() {
    let mut s = make_state();
    s.enemies.push(enemy_at(100, 100));
    s.enemies.push(enemy_at(105, 100));
    s.bullets.push(Bullet { x: 120, y: 140 });
    let s2 = step(&s, 0);
    assert_eq!(s2.score, 1);
    assert_eq!(s2.enemies.len(), 1);
    assert_eq!(s2.enemies[0].x, 105);
}

#[test]
fn tick_two_bullets_two_enemies_score_two() {
    let mut s = make_state();
    s.enemies.push(enemy_at(100, 100));
    s.enemies.push(enemy_at(400, 100));
    s.bullets.push(Bullet { x: 120, y: 140 });
    s.bullets.push(Bullet { x: 420, y: 140 });
    let s2 = step(&s, 0);
    assert_eq!(s2.score, 2);
    assert!(s2.enemies.is_empty());
    assert!(s2.bullets.is_empty());
    assert_eq!(s2.popups.len(), 2);
}

#[test]
fn tick_bullet_destroys_obstacle_without_score() {
    let mut s = make_state();
    s.obstacles.push(obstacle_at(200, 100)); // → y 102..126
    s.bullets.push(Bullet { x: 205, y: 120 }); // → y 111..121
    let s2 = step(&s, 0);
    assert!(s2.obstacles.is_empty());
    assert!(s2.bullets.is_empty());
    assert_eq!(s2.score, 0);
    assert!(s2.events.contains(&GameEvent::Explosion));
}

// ── tick: contact damage ────────────────────────────────────────────────────

#[test]
fn tick_enemy_contact_costs_a_life() {
    let mut s = make_state();
    s.enemies.push(enemy_at(650, 640));
    let s2 = step(&s, 1000);
    assert_eq!(s2.lives, 2);
    assert!(s2.enemies.is_empty());
    assert!(s2.timers.is_active(Effect::Invulnerable));
    assert_eq!(s2.timers.expires_at(Effect::Invulnerable), Some(2500));
    assert!(s2.events.contains(&GameEvent::Explosion));
    assert_eq!(s2.status, GameStatus::Playing);
}

#[test]
fn tick_enemy_contact_ignores_invulnerability() {
    let mut s = make_state();
    s.timers.activate(Effect::Invulnerable, 0, 1500);
    s.enemies.push(enemy_at(650, 640));
    let s2 = step(&s, 100);
    assert_eq!(s2.lives, 2);
}

#[test]
fn tick_invisible_ignores_enemy_contact() {
    let mut s = make_state();
    s.timers.activate(Effect::Invisible, 0, 8000);
    s.enemies.push(enemy_at(650, 640));
    let mut now = 0;
    for _ in 0..20 {
        now += 16;
        s = step(&s, now);
        assert_eq!(s.lives, 3);
    }
    assert_eq!(s.enemies.len(), 1);
}

#[test]
fn tick_only_one_enemy_contact_per_tick() {
    let mut s = make_state();
    s.enemies.push(enemy_at(650, 640));
    s.enemies.push(enemy_at(660, 640));
    let s2 = step(&s, 0);
    assert_eq!(s2.lives, 2);
    assert_eq!(s2.enemies.len(), 1);
}

#[test]
fn tick_obstacle_contact_costs_a_life() {
    let mut s = make_state();
    s.obstacles.push(obstacle_at(650, 660));
    let s2 = step(&s, 0);
    assert_eq!(s2.lives, 2);
    assert!(s2.obstacles.is_empty());
    assert!(s2.timers.is_active(Effect::Invulnerable));
}

#[test]
fn tick_obstacle_contact_ignored_while_invulnerable() {
    let mut s = make_state();
    s.timers.activate(Effect::Invulnerable, 0, 1500);
    s.obstacles.push(obstacle_at(650, 660));
    let s2 = step(&s, 100);
    assert_eq!(s2.lives, 3);
    assert_eq!(s2.obstacles.len(), 1);
}

#[test]
fn tick_enemy_hit_shields_against_obstacle_same_tick() {
    let mut s = make_state();
    s.enemies.push(enemy_at(650, 640));
    s.obstacles.push(obstacle_at(650, 660));
    let s2 = step(&s, 0);
    assert_eq!(s2.lives, 2);
    assert_eq!(s2.obstacles.len(), 1);
}

// ── game over ────────────────────────────────────────────────────────────────

#[test]
fn tick_last_life_on_obstacle_is_game_over() {
    let mut s = make_state();
    s.lives = 1;
    s.obstacles.push(obstacle_at(650, 660));
    s.enemies.push(enemy_at(0, 10));
    s.bullets.push(Bullet { x: 900, y: 300 });
    s.popups.push(Popup { text: "+1".into(), x: 5.0, y: 5.0, ttl: 30 });
    let s2 = step(&s, 0);
    assert_eq!(s2.lives, 0);
    assert_eq!(s2.status, GameStatus::GameOver);
    assert!(s2.is_cleared());
}

#[test]
fn tick_last_life_on_enemy_is_game_over() {
    let mut s = make_state();
    s.lives = 1;
    s.enemies.push(enemy_at(650, 640));
    s.obstacles.push(obstacle_at(0, 10));
    let s2 = step(&s, 0);
    assert_eq!(s2.lives, 0);
    assert_eq!(s2.status, GameStatus::GameOver);
    assert!(s2.is_cleared());
}

#[test]
fn game_over_records_new_high_score() {
    let mut s = init_state(quiet_rules(), 3);
    s.lives = 1;
    s.score = 5;
    s.obstacles.push(obstacle_at(650, 660));
    let s2 = step(&s, 0);
    assert_eq!(s2.high_score, 5);
    assert!(s2.events.contains(&GameEvent::NewHighScore(5)));
}

#[test]
fn game_over_keeps_higher_stored_score() {
    let mut s = init_state(quiet_rules(), 10);
    s.lives = 1;
    s.score = 5;
    s.obstacles.push(obstacle_at(650, 660));
    let s2 = step(&s, 0);
    assert_eq!(s2.high_score, 10);
    assert!(!s2
        .events
        .iter()
        .any(|e| matches!(e, GameEvent::NewHighScore(_))));
}

#[test]
fn game_over_equal_score_is_not_a_record() {
    let mut s = init_state(quiet_rules(), 5);
    s.lives = 1;
    s.score = 5;
    s.obstacles.push(obstacle_at(650, 660));
    let s2 = step(&s, 0);
    assert!(!s2.events.contains(&GameEvent::NewHighScore(5)));
}

#[test]
fn game_over_suppresses_input_and_spawning() {
    let mut s = init_state(Rules::default(), 0);
    s.status = GameStatus::GameOver;
    s.lives = 0;
    s.rules.enemy_spawn_chance = 1;
    s.rules.obstacle_spawn_chance = 1;
    let input = FrameInput { left: true, fire: true, cleanup: true, right: false };
    let mut rng = seeded_rng();
    for t in 0..10 {
        s = tick(&s, &input, t * 400, &mut rng);
    }
    assert_eq!(s.player.x, 640);
    assert!(s.is_cleared());
    assert_eq!(s.lives, 0);
    assert_eq!(s.status, GameStatus::GameOver);
}

#[test]
fn restart_resets_run() {
    let mut s = init_state(quiet_rules(), 9);
    s.status = GameStatus::GameOver;
    s.lives = 0;
    s.score = 12;
    s.timers.activate(Effect::Invulnerable, 0, 1500);
    s.timers.activate(Effect::DoubleShot, 0, 8000);
    s.pickup_messages.push(PickupMessage {
        text: "Invisible!".into(),
        x: 0.0,
        y: 0.0,
        alpha: 200,
        ttl: 10,
    });
    let s2 = restart(&s);
    assert_eq!(s2.status, GameStatus::Playing);
    assert_eq!(s2.lives, 3);
    assert_eq!(s2.score, 0);
    assert_eq!(s2.high_score, 9);
    assert!(s2.is_cleared());
    assert!(!s2.timers.is_active(Effect::Invulnerable));
    assert!(!s2.timers.is_active(Effect::DoubleShot));
}

#[test]
fn restart_from_playing_also_resets() {
    let mut s = make_state();
    s.lives = 2;
    s.score = 4;
    s.enemies.push(enemy_at(0, 0));
    let s2 = restart(&s);
    assert_eq!(s2.lives, 3);
    assert_eq!(s2.score, 0);
    assert!(s2.enemies.is_empty());
    assert_eq!(s2.status, GameStatus::Playing);
}

#[test]
fn lives_stay_in_range_over_many_ticks() {
    let mut s = init_state(Rules::default(), 0);
    s.rules.enemy_spawn_chance = 2;
    s.rules.obstacle_spawn_chance = 2;
    let mut rng = seeded_rng();
    for t in 0..5000u64 {
        let before = s.lives;
        s = tick(&s, &idle(), t * 16, &mut rng);
        assert!(s.lives <= 3);
        if s.status == GameStatus::GameOver {
            assert_eq!(s.lives, 0);
        }
        if before > 0 && s.lives == 0 {
            assert_eq!(s.status, GameStatus::GameOver);
        }
    }
}

// ── power-ups ─────────────────────────────────────────────────────────────────

#[test]
fn tick_pickup_activates_double_shot() {
    let mut s = make_state();
    s.powerups.push(PowerUp {
        kind: PowerUpKind::DoubleShot,
        x: 650,
        y: 660,
        size: 24,
        ttl: 100,
    });
    let s2 = step(&s, 1000);
    assert!(s2.powerups.is_empty());
    assert!(s2.timers.is_active(Effect::DoubleShot));
    assert_eq!(s2.timers.remaining_secs(Effect::DoubleShot, 1000), 8);
    assert!(s2.events.contains(&GameEvent::PowerUpPickup(PowerUpKind::DoubleShot)));
    assert_eq!(s2.pickup_messages.len(), 1);
    assert_eq!(s2.pickup_messages[0].text, "Double Shot!");
    assert_eq!(s2.pickup_messages[0].alpha, 255);
    assert_eq!(s2.pickup_messages[0].y, (649 - 20) as f32);
}

#[test]
fn tick_pickup_invisible_then_double_fire() {
    let mut s = make_state();
    s.powerups.push(PowerUp {
        kind: PowerUpKind::Invisible,
        x: 650,
        y: 660,
        size: 24,
        ttl: 100,
    });
    let s2 = step(&s, 0);
    assert!(s2.timers.is_active(Effect::Invisible));
    assert!(!s2.timers.is_active(Effect::DoubleShot));
    assert_eq!(s2.pickup_messages[0].text, "Invisible!");
}

#[test]
fn tick_power_up_window_expires() {
    let mut s = make_state();
    s.timers.activate(Effect::DoubleShot, 0, 8000);
    let s2 = step(&s, 8000);
    assert!(s2.timers.is_active(Effect::DoubleShot));
    let s3 = step(&s2, 8001);
    assert!(!s3.timers.is_active(Effect::DoubleShot));
}

#[test]
fn tick_invulnerability_expires() {
    let mut s = make_state();
    s.obstacles.push(obstacle_at(650, 660));
    let s = step(&s, 0);
    assert!(s.timers.is_active(Effect::Invulnerable));
    let s = step(&s, 1501);
    assert!(!s.timers.is_active(Effect::Invulnerable));
}

// ── spawning ──────────────────────────────────────────────────────────────────

#[test]
fn tick_spawns_enemy_when_roll_certain() {
    let mut s = make_state();
    s.rules.enemy_spawn_chance = 1;
    let s2 = step(&s, 0);
    assert_eq!(s2.enemies.len(), 1);
    assert_eq!(s2.enemies[0].y, 0);
    assert!(s2.obstacles.is_empty());
}

#[test]
fn tick_spawns_obstacle_and_powerup_when_rolls_certain() {
    let mut s = make_state();
    s.rules.obstacle_spawn_chance = 1;
    s.rules.powerup_spawn_chance = 1;
    let s2 = step(&s, 0);
    assert_eq!(s2.obstacles.len(), 1);
    assert_eq!(s2.powerups.len(), 1);
    assert_eq!(s2.powerups[0].x, s2.obstacles[0].x);
    assert!(s2.enemies.is_empty());
}

#[test]
fn tick_same_seed_same_game() {
    let mut s = init_state(Rules::default(), 0);
    s.rules.enemy_spawn_chance = 3;
    s.rules.obstacle_spawn_chance = 3;
    let mut a = s.clone();
    let mut b = s;
    let mut rng_a = seeded_rng();
    let mut rng_b = seeded_rng();
    for t in 0..300 {
        a = tick(&a, &idle(), t * 16, &mut rng_a);
        b = tick(&b, &idle(), t * 16, &mut rng_b);
    }
    assert_eq!(a.enemies, b.enemies);
    assert_eq!(a.obstacles, b.obstacles);
    assert_eq!(a.powerups, b.powerups);
    assert_eq!(a.lives, b.lives);
}

// ── cosmetics ─────────────────────────────────────────────────────────────────

#[test]
fn tick_popups_float_and_expire() {
    let mut s = make_state();
    s.popups.push(Popup { text: "+1".into(), x: 10.0, y: 100.0, ttl: 60 });
    s.popups.push(Popup { text: "+1".into(), x: 10.0, y: 100.0, ttl: 1 });
    let s2 = step(&s, 0);
    assert_eq!(s2.popups.len(), 1);
    assert_eq!(s2.popups[0].ttl, 59);
    assert_eq!(s2.popups[0].y, 99.5);
}

#[test]
fn tick_pickup_messages_fade() {
    let mut s = make_state();
    s.pickup_messages.push(PickupMessage {
        text: "Invisible!".into(),
        x: 10.0,
        y: 100.0,
        alpha: 255,
        ttl: 80,
    });
    s.pickup_messages.push(PickupMessage {
        text: "Invisible!".into(),
        x: 10.0,
        y: 100.0,
        alpha: 2,
        ttl: 80,
    });
    let s2 = step(&s, 0);
    assert_eq!(s2.pickup_messages.len(), 1);
    assert_eq!(s2.pickup_messages[0].alpha, 253);
    assert_eq!(s2.pickup_messages[0].ttl, 79);
}

#[test]
fn player_blinks_while_invulnerable() {
    let mut s = make_state();
    assert!(player_visible(&s, 0));
    s.timers.activate(Effect::Invulnerable, 0, 1500);
    assert!(!player_visible(&s, 0));
    assert!(player_visible(&s, 150));
    assert!(!player_visible(&s, 300));
}

// ── manual cleanup ───────────────────────────────────────────────────────────

#[test]
fn tick_manual_cleanup_uses_wider_margin() {
    let mut s = make_state();
    s.enemies.push(enemy_at(0, 662)); // bottom 700 = height - 20

    let kept = step(&s, 0);
    assert_eq!(kept.enemies.len(), 1);

    let input = FrameInput { cleanup: true, ..idle() };
    let swept = tick(&s, &input, 0, &mut seeded_rng());
    assert!(swept.enemies.is_empty());
}

use bug_crossing::compute::*;
use bug_crossing::entities::*;
use bug_crossing::settings::{Settings, SpawnRule};

use proptest::prelude::*;
use rand::rngs::mock::StepRng;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn make_state() -> GameState {
    init_state(&Settings::default())
}

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

/// Every draw is just below 1.0: spawn checks pass, lane is the last one.
fn always_draw_high() -> StepRng {
    StepRng::new(u64::MAX, 0)
}

/// Every draw is 0.0: spawn checks fail, lane is the first one.
fn always_draw_zero() -> StepRng {
    StepRng::new(0, 0)
}

fn enemy_at(x: i32, y: i32) -> Enemy {
    Enemy::new(x, y, 70.0)
}

// ── init_state ────────────────────────────────────────────────────────────────

#[test]
fn init_state_player_on_start_tile() {
    let s = make_state();
    assert_eq!((s.player.x, s.player.y), (START_X, START_Y));
    assert_eq!((s.player.x, s.player.y), (202, 374));
    assert_eq!(s.player.status, PlayerStatus::None);
}

#[test]
fn init_state_empty_board_and_scores() {
    let s = make_state();
    assert!(s.enemies.is_empty());
    assert_eq!(s.wins, 0);
    assert_eq!(s.losses, 0);
    assert_eq!(s.frame, 0);
    assert_eq!(s.info_text, "Game started!");
}

#[test]
fn init_state_copies_spawn_settings() {
    let settings = Settings {
        enemy_speed: 120.0,
        spawn_threshold: 0.5,
        max_enemies: 4,
        spawn_rule: SpawnRule::AllEnemies,
        ..Settings::default()
    };
    let s = init_state(&settings);
    assert_eq!(s.enemy_speed, 120.0);
    assert_eq!(s.spawn_threshold, 0.5);
    assert_eq!(s.max_enemies, 4);
    assert_eq!(s.spawn_rule, SpawnRule::AllEnemies);
}

// ── handle_input ──────────────────────────────────────────────────────────────

#[test]
fn input_moves_one_tile() {
    let s = make_state();
    assert_eq!(handle_input(&s, Direction::Left).player.x, 101);
    assert_eq!(handle_input(&s, Direction::Right).player.x, 303);
    assert_eq!(handle_input(&s, Direction::Up).player.y, 291);
}

#[test]
fn input_left_guarded_at_left_column() {
    let mut s = make_state();
    s.player.x = 0;
    assert_eq!(handle_input(&s, Direction::Left).player.x, 0);
}

#[test]
fn input_right_guarded_at_right_column() {
    let mut s = make_state();
    s.player.x = 404;
    assert_eq!(handle_input(&s, Direction::Right).player.x, 404);
}

#[test]
fn input_down_guarded_on_start_row() {
    let s = make_state();
    assert_eq!(handle_input(&s, Direction::Down).player.y, 374);
}

#[test]
fn input_down_allowed_above_start_row() {
    let mut s = make_state();
    s.player.y = 291;
    assert_eq!(handle_input(&s, Direction::Down).player.y, 374);
}

#[test]
fn input_up_is_unguarded() {
    let mut s = make_state();
    s.player.y = 42;
    assert_eq!(handle_input(&s, Direction::Up).player.y, -41);
}

#[test]
fn input_does_not_mutate_original() {
    let s = make_state();
    let _ = handle_input(&s, Direction::Up);
    let _ = handle_input(&s, Direction::Left);
    assert_eq!((s.player.x, s.player.y), (202, 374));
}

// ── advance_enemy ─────────────────────────────────────────────────────────────

#[test]
fn enemy_moves_by_floored_distance() {
    let e = enemy_at(495, 42);
    assert_eq!(advance_enemy(&e, 0.5).x, 530);
    // 70 / 60 = 1.166… → 1
    assert_eq!(advance_enemy(&e, 1.0 / 60.0).x, 496);
    assert_eq!(advance_enemy(&e, 0.0).x, 495);
}

#[test]
fn huge_speed_saturates_instead_of_overflowing() {
    let e = Enemy::new(1, 42, 1e12);
    assert_eq!(advance_enemy(&e, 0.016).x, i32::MAX);
}

#[test]
fn enemy_never_moves_vertically() {
    let e = enemy_at(10, 125);
    assert_eq!(advance_enemy(&e, 3.0).y, 125);
}

// ── player_status ─────────────────────────────────────────────────────────────

#[test]
fn status_none_on_board() {
    let s = make_state();
    assert_eq!(player_status(&s.player), PlayerStatus::None);
}

#[test]
fn status_win_at_top() {
    let mut s = make_state();
    s.player.y = -41;
    assert_eq!(player_status(&s.player), PlayerStatus::Win);
    s.player.y = 0;
    assert_eq!(player_status(&s.player), PlayerStatus::Win);
}

#[test]
fn status_lost_off_board() {
    let mut s = make_state();
    s.player.x = -1;
    assert_eq!(player_status(&s.player), PlayerStatus::Lost);
    s.player.x = 505;
    assert_eq!(player_status(&s.player), PlayerStatus::Lost);
    s.player.x = 202;
    s.player.y = 375;
    assert_eq!(player_status(&s.player), PlayerStatus::Lost);
}

#[test]
fn status_lost_takes_priority_over_win() {
    let mut s = make_state();
    s.player.x = 600;
    s.player.y = -41;
    assert_eq!(player_status(&s.player), PlayerStatus::Lost);
}

// ── spawn policy ──────────────────────────────────────────────────────────────

#[test]
fn empty_board_is_always_eligible() {
    assert!(spawn_eligible(&[], SpawnRule::LastEnemy, 0.98, &mut always_draw_zero()));
    assert!(spawn_eligible(&[], SpawnRule::AllEnemies, 0.98, &mut always_draw_zero()));
}

#[test]
fn last_enemy_rule_only_looks_at_last_enemy() {
    let trailing_last = [enemy_at(300, 42), enemy_at(50, 125)];
    let leading_last = [enemy_at(50, 125), enemy_at(300, 42)];
    let rule = SpawnRule::LastEnemy;
    assert!(!spawn_eligible(&trailing_last, rule, 0.98, &mut always_draw_high()));
    assert!(spawn_eligible(&leading_last, rule, 0.98, &mut always_draw_high()));
}

#[test]
fn all_enemies_rule_needs_every_enemy_clear() {
    let mixed = [enemy_at(50, 125), enemy_at(300, 42)];
    let clear = [enemy_at(150, 125), enemy_at(300, 42)];
    let rule = SpawnRule::AllEnemies;
    assert!(!spawn_eligible(&mixed, rule, 0.98, &mut always_draw_high()));
    assert!(spawn_eligible(&clear, rule, 0.98, &mut always_draw_high()));
}

#[test]
fn clearance_is_strictly_past_one_tile() {
    let at_edge = [enemy_at(101, 42)];
    assert!(!spawn_eligible(&at_edge, SpawnRule::LastEnemy, 0.98, &mut always_draw_high()));
}

#[test]
fn low_draw_blocks_spawn() {
    let clear = [enemy_at(300, 42)];
    assert!(!spawn_eligible(&clear, SpawnRule::LastEnemy, 0.98, &mut always_draw_zero()));
}

#[test]
fn spawn_lane_picks_lane_centres() {
    assert_eq!(spawn_lane(&mut always_draw_zero()), 42);
    assert_eq!(spawn_lane(&mut always_draw_high()), 208);
    let mut rng = seeded_rng();
    for _ in 0..100 {
        assert!(LANES.contains(&spawn_lane(&mut rng)));
    }
}

#[test]
fn first_tick_spawns_on_empty_board() {
    let s = make_state();
    let s2 = tick(&s, 0.0, &mut always_draw_zero());
    assert_eq!(s2.enemies.len(), 1);
    assert_eq!(s2.enemies[0].x, 0);
    assert_eq!(s2.enemies[0].y, 42);
    assert_eq!(s2.enemies[0].speed, 70.0);
}

#[test]
fn spawn_appends_behind_cleared_enemy() {
    let mut s = make_state();
    s.enemies.push(enemy_at(200, 42));
    let s2 = update_enemies(&s, 0.0, &mut always_draw_high());
    assert_eq!(s2.enemies.len(), 2);
    assert_eq!(s2.enemies[1].x, 0);
    assert_eq!(s2.enemies[1].y, 208);
}

#[test]
fn no_spawn_past_cap() {
    let mut s = make_state();
    for i in 0..10 {
        s.enemies.push(enemy_at(200 + i, 42));
    }
    let s2 = update_enemies(&s, 0.0, &mut always_draw_high());
    assert_eq!(s2.enemies.len(), 10);
}

#[test]
fn cap_follows_settings() {
    let mut s = make_state();
    s.max_enemies = 2;
    s.enemies.push(enemy_at(300, 42));
    s.enemies.push(enemy_at(200, 125));
    let s2 = update_enemies(&s, 0.0, &mut always_draw_high());
    assert_eq!(s2.enemies.len(), 2);
}

#[test]
fn cap_never_exceeds_hard_ceiling() {
    let mut s = make_state();
    s.max_enemies = 50;
    for i in 0..10 {
        s.enemies.push(enemy_at(200 + i, 42));
    }
    let s2 = update_enemies(&s, 0.0, &mut always_draw_high());
    assert_eq!(s2.enemies.len(), MAX_ENEMIES);
}

// ── despawn ───────────────────────────────────────────────────────────────────

#[test]
fn enemy_past_right_boundary_is_removed() {
    // 495 + floor(0.5 * 70) = 530 > 500
    let mut s = make_state();
    s.enemies.push(enemy_at(495, 42));
    let s2 = tick(&s, 0.5, &mut always_draw_zero());
    assert!(s2.enemies.is_empty());
}

#[test]
fn enemy_on_right_boundary_is_kept() {
    let mut s = make_state();
    s.enemies.push(enemy_at(500, 42));
    let s2 = tick(&s, 0.0, &mut always_draw_zero());
    assert_eq!(s2.enemies.len(), 1);
    assert_eq!(s2.enemies[0].x, 500);
}

#[test]
fn adjacent_expired_enemies_are_all_removed() {
    let mut s = make_state();
    s.enemies.push(enemy_at(501, 42));
    s.enemies.push(enemy_at(502, 125));
    s.enemies.push(enemy_at(300, 208));
    let s2 = update_enemies(&s, 0.0, &mut always_draw_zero());
    assert_eq!(s2.enemies.len(), 1);
    assert_eq!(s2.enemies[0].x, 300);
}

#[test]
fn removed_last_enemy_still_decides_spawn() {
    let mut s = make_state();
    s.enemies.push(enemy_at(600, 42));
    let s2 = update_enemies(&s, 0.0, &mut always_draw_high());
    assert_eq!(s2.enemies.len(), 1);
    assert_eq!(s2.enemies[0].x, 0);
}

// ── collisions ────────────────────────────────────────────────────────────────

#[test]
fn collision_requires_same_lane() {
    let s = make_state();
    let mut player = s.player.clone();
    player.y = 208;
    assert!(collides(&player, &enemy_at(202, 208)));
    assert!(!collides(&player, &enemy_at(202, 125)));
}

#[test]
fn collision_range_is_exclusive() {
    let s = make_state();
    let mut player = s.player.clone();
    player.y = 125;
    assert!(collides(&player, &enemy_at(202 - 74, 125)));
    assert!(collides(&player, &enemy_at(202 + 74, 125)));
    assert!(!collides(&player, &enemy_at(202 - 75, 125)));
    assert!(!collides(&player, &enemy_at(202 + 75, 125)));
}

#[test]
fn only_first_hit_counts_once_player_is_reset() {
    let mut s = make_state();
    s.player.y = 291;
    s.enemies.push(enemy_at(190, 291));
    s.enemies.push(enemy_at(210, 291));
    let s2 = check_collisions(&s);
    assert_eq!(s2.losses, 1);
    assert_eq!((s2.player.x, s2.player.y), (202, 374));
}

#[test]
fn collision_reset_leaves_enemies_alone() {
    let mut s = make_state();
    s.player.y = 125;
    s.enemies.push(enemy_at(180, 125));
    s.enemies.push(enemy_at(20, 42));
    let s2 = check_collisions(&s);
    assert_eq!(s2.enemies, s.enemies);
}

// ── resolve_outcome ───────────────────────────────────────────────────────────

#[test]
fn win_counts_and_resets() {
    let mut s = make_state();
    s.player.y = -41;
    s.player.status = PlayerStatus::Win;
    let s2 = resolve_outcome(&s);
    assert_eq!(s2.wins, 1);
    assert_eq!(s2.losses, 0);
    assert_eq!(s2.info_text, "WIN!");
    assert_eq!((s2.player.x, s2.player.y), (202, 374));
    assert_eq!(s2.player.status, PlayerStatus::None);
}

#[test]
fn collision_counts_loss() {
    let mut s = make_state();
    s.player.status = PlayerStatus::Collision;
    let s2 = resolve_outcome(&s);
    assert_eq!(s2.losses, 1);
    assert_eq!(s2.info_text, "LOST - because of collision! Game restarted");
    assert_eq!(s2.player.status, PlayerStatus::None);
}

#[test]
fn boundary_loss_is_not_scored() {
    let mut s = make_state();
    s.info_text = "WIN!".to_string();
    s.wins = 3;
    s.player.y = 457;
    s.player.status = PlayerStatus::Lost;
    let s2 = resolve_outcome(&s);
    assert_eq!(s2.wins, 3);
    assert_eq!(s2.losses, 0);
    assert_eq!(s2.info_text, "WIN!");
    assert_eq!((s2.player.x, s2.player.y), (202, 374));
}

#[test]
fn reset_keeps_player_sprite() {
    let mut s = make_state();
    s.player.sprite = bug_crossing::sprites::SpriteId::CharBoy;
    s.player.status = PlayerStatus::Win;
    let s2 = resolve_outcome(&s);
    assert_eq!(s2.player.sprite, bug_crossing::sprites::SpriteId::CharBoy);
}

// ── tick scenarios ────────────────────────────────────────────────────────────

#[test]
fn tick_increments_frame() {
    let mut s = make_state();
    s.frame = 5;
    let s2 = tick(&s, 0.016, &mut seeded_rng());
    assert_eq!(s2.frame, 6);
}

#[test]
fn scenario_quiet_tick_changes_nothing() {
    let mut s = make_state();
    s.enemies.push(enemy_at(0, 42));
    let s2 = tick(&s, 0.016, &mut seeded_rng());
    assert_eq!((s2.player.x, s2.player.y), (202, 374));
    assert_eq!(s2.player.status, PlayerStatus::None);
    assert_eq!((s2.wins, s2.losses), (0, 0));
    assert_eq!(s2.info_text, "Game started!");
}

#[test]
fn scenario_collision_resets_within_tick() {
    let mut s = make_state();
    s.player.y = 291;
    s.enemies.push(enemy_at(150, 291));
    let s2 = tick(&s, 0.0, &mut always_draw_zero());
    assert_eq!(s2.losses, 1);
    assert_eq!(s2.wins, 0);
    assert_eq!((s2.player.x, s2.player.y), (202, 374));
    assert_eq!(s2.player.status, PlayerStatus::None);
}

#[test]
fn scenario_five_ups_win() {
    let mut s = make_state();
    for _ in 0..5 {
        s = handle_input(&s, Direction::Up);
    }
    assert_eq!(s.player.y, -41);
    let s2 = tick(&s, 0.016, &mut always_draw_zero());
    assert_eq!(s2.wins, 1);
    assert_eq!(s2.losses, 0);
    assert_eq!((s2.player.x, s2.player.y), (202, 374));
    assert_eq!(s2.info_text, "WIN!");
}

#[test]
fn tick_resolves_boundary_loss_without_scoring() {
    let mut s = make_state();
    s.player.x = 505;
    let s2 = tick(&s, 0.016, &mut always_draw_zero());
    assert_eq!((s2.wins, s2.losses), (0, 0));
    assert_eq!((s2.player.x, s2.player.y), (202, 374));
    assert_eq!(s2.info_text, "Game started!");
}

#[test]
fn tick_does_not_mutate_original() {
    let mut s = make_state();
    s.enemies.push(enemy_at(100, 42));
    let _ = tick(&s, 1.0, &mut seeded_rng());
    assert_eq!(s.enemies[0].x, 100);
    assert_eq!(s.frame, 0);
}

// ── properties ────────────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn prop_enemy_update_is_floor_of_distance(x in -1000i32..1000, y in 0i32..400, dt in 0.0f64..10.0) {
        let e = enemy_at(x, y);
        let moved = advance_enemy(&e, dt);
        prop_assert_eq!(moved.x, x + (dt * 70.0).floor() as i32);
        prop_assert!(moved.x >= x);
        prop_assert_eq!(moved.y, y);
    }

    #[test]
    fn prop_population_and_lanes_hold(seed in any::<u64>(), threshold in 0.0f64..1.0, dts in prop::collection::vec(0.0f64..0.5, 1..200)) {
        let mut s = make_state();
        s.spawn_threshold = threshold;
        let mut rng = StdRng::seed_from_u64(seed);
        for dt in dts {
            s = tick(&s, dt, &mut rng);
            prop_assert!(s.enemies.len() <= 10);
            for e in &s.enemies {
                prop_assert!(LANES.contains(&e.y));
                prop_assert!(e.x <= RIGHT_BOUNDARY);
            }
        }
    }

    #[test]
    fn prop_lane_hits_always_reset(lane in 0usize..3, px in 0i32..5, offset in -74i32..75) {
        let mut s = make_state();
        s.player.x = px * 101;
        s.player.y = LANES[lane];
        s.enemies.push(enemy_at(s.player.x - offset, LANES[lane]));
        let s2 = check_collisions(&s);
        prop_assert_eq!(s2.losses, 1);
        prop_assert_eq!((s2.player.x, s2.player.y), (START_X, START_Y));
    }
}

/// Pure game-logic functions.
///
/// Every public function takes an immutable reference to the current
/// `GameState` (and, where needed, an RNG handle) and returns a brand-new
/// `GameState`.  Side effects are limited to the injected RNG and logging.

use rand::Rng;

use crate::entities::{
    Direction, Enemy, GameState, Player, PlayerStatus, COLLISION_TEXT, GRID_COLS,
    INITIAL_INFO_TEXT, LANES, MAX_ENEMIES, RIGHT_BOUNDARY, SPAWN_X, START_Y, TILE_HEIGHT, TILE_WIDTH,
    WIN_TEXT,
};
use crate::settings::{Settings, SpawnRule};

// ── Limits ───────────────────────────────────────────────────────────────────

/// Right-most column the player may step into.
pub const MAX_PLAYER_X: i32 = (GRID_COLS - 1) * TILE_WIDTH;
/// The player may only step down while above this row.
pub const MAX_DOWN_Y: i32 = 293;

/// Board edges used by the status check; touching them loses the round.
pub const LEFT_EDGE: i32 = -1;
pub const RIGHT_EDGE: i32 = GRID_COLS * TILE_WIDTH;
pub const BOTTOM_EDGE: i32 = START_Y + 1;

/// Horizontal reach inside which an enemy in the same lane hits the player.
pub const COLLISION_RANGE: i32 = 75;

/// The spawn check only fires once the reference enemy has moved past one tile.
pub const SPAWN_CLEARANCE: i32 = TILE_WIDTH;

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the initial game state from the loaded settings.
pub fn init_state(settings: &Settings) -> GameState {
    GameState {
        player: Player::new(settings.player_sprite.sprite()),
        enemies: Vec::new(),
        wins: 0,
        losses: 0,
        info_text: INITIAL_INFO_TEXT.to_string(),
        frame: 0,
        enemy_speed: settings.enemy_speed,
        spawn_threshold: settings.spawn_threshold,
        max_enemies: settings.max_enemies,
        spawn_rule: settings.spawn_rule,
    }
}

// ── Input-driven state transitions (pure) ───────────────────────────────────

/// Move the player one tile.  Left, right and down stay on the board;
/// up is unguarded because stepping onto the water row is the win.
pub fn handle_input(state: &GameState, direction: Direction) -> GameState {
    let mut player = state.player.clone();
    match direction {
        Direction::Left => {
            if player.x > 0 {
                player.x -= TILE_WIDTH;
            }
        }
        Direction::Right => {
            if player.x < MAX_PLAYER_X {
                player.x += TILE_WIDTH;
            }
        }
        Direction::Up => {
            player.y -= TILE_HEIGHT;
        }
        Direction::Down => {
            if player.y < MAX_DOWN_Y {
                player.y += TILE_HEIGHT;
            }
        }
    }
    GameState {
        player,
        ..state.clone()
    }
}

// ── Entity update ────────────────────────────────────────────────────────────

/// Advance one enemy by `dt` seconds: `x += floor(dt * speed)`.
pub fn advance_enemy(enemy: &Enemy, dt: f64) -> Enemy {
    Enemy {
        x: enemy.x.saturating_add((dt * enemy.speed).floor() as i32),
        ..enemy.clone()
    }
}

/// Terminal status implied by the player's position alone.
pub fn player_status(player: &Player) -> PlayerStatus {
    if player.x <= LEFT_EDGE || player.x >= RIGHT_EDGE || player.y >= BOTTOM_EDGE {
        PlayerStatus::Lost
    } else if player.y <= 0 {
        PlayerStatus::Win
    } else {
        PlayerStatus::None
    }
}

// ── Spawn / despawn ──────────────────────────────────────────────────────────

/// Decide whether this tick may add an enemy.  An empty board always may.
pub fn spawn_eligible(
    enemies: &[Enemy],
    rule: SpawnRule,
    threshold: f64,
    rng: &mut impl Rng,
) -> bool {
    let cleared = |e: &Enemy| e.x > SPAWN_CLEARANCE;
    let Some(last) = enemies.last() else {
        return true;
    };
    let clear = match rule {
        SpawnRule::LastEnemy => cleared(last),
        SpawnRule::AllEnemies => enemies.iter().all(cleared),
    };
    clear && rng.gen::<f64>() > threshold
}

/// Pick one of the three stone lanes uniformly.
pub fn spawn_lane(rng: &mut impl Rng) -> i32 {
    let index = (rng.gen::<f64>() * LANES.len() as f64).floor() as usize;
    LANES[index.min(LANES.len() - 1)]
}

/// Move every enemy, drop the ones past the right boundary and maybe spawn.
pub fn update_enemies(state: &GameState, dt: f64, rng: &mut impl Rng) -> GameState {
    let moved: Vec<Enemy> = state
        .enemies
        .iter()
        .map(|e| advance_enemy(e, dt))
        .collect();

    // Eligibility looks at the enemies as iterated, before any are removed.
    let eligible = spawn_eligible(&moved, state.spawn_rule, state.spawn_threshold, rng);

    let before = moved.len();
    let mut enemies: Vec<Enemy> = moved
        .into_iter()
        .filter(|e| e.x <= RIGHT_BOUNDARY)
        .collect();
    if enemies.len() < before {
        log::debug!("despawned {} enemy(s)", before - enemies.len());
    }

    if eligible && enemies.len() < state.max_enemies.min(MAX_ENEMIES) {
        let y = spawn_lane(rng);
        log::debug!("spawned enemy in lane y={} ({} live)", y, enemies.len() + 1);
        enemies.push(Enemy::new(SPAWN_X, y, state.enemy_speed));
    }

    GameState {
        enemies,
        ..state.clone()
    }
}

// ── Collisions ───────────────────────────────────────────────────────────────

/// Same lane and horizontally closer than `COLLISION_RANGE`.
pub fn collides(player: &Player, enemy: &Enemy) -> bool {
    (player.x - enemy.x).abs() < COLLISION_RANGE && enemy.y == player.y
}

/// Test every enemy in order, resolving each hit immediately so later
/// enemies are checked against the reset position.
pub fn check_collisions(state: &GameState) -> GameState {
    let mut next = state.clone();
    for enemy in &state.enemies {
        if collides(&next.player, enemy) {
            next.player.status = PlayerStatus::Collision;
            next = resolve_outcome(&next);
        }
    }
    next
}

// ── Outcome & reset ──────────────────────────────────────────────────────────

/// Score the player's status and put them back on the start tile.
/// Leaving the board costs the round but is not counted as a loss.
pub fn resolve_outcome(state: &GameState) -> GameState {
    let mut wins = state.wins;
    let mut losses = state.losses;
    let mut info_text = state.info_text.clone();

    match state.player.status {
        PlayerStatus::Win => {
            wins += 1;
            info_text = WIN_TEXT.to_string();
            log::info!("player crossed (wins {}, losses {})", wins, losses);
        }
        PlayerStatus::Collision => {
            losses += 1;
            info_text = COLLISION_TEXT.to_string();
            log::info!("player hit by enemy (wins {}, losses {})", wins, losses);
        }
        PlayerStatus::Lost => {
            log::info!(
                "player left the board at ({}, {})",
                state.player.x,
                state.player.y
            );
        }
        PlayerStatus::None => {}
    }

    GameState {
        player: Player::new(state.player.sprite),
        wins,
        losses,
        info_text,
        ..state.clone()
    }
}

// ── Per-frame tick (nearly pure: RNG is injected) ────────────────────────────

/// Advance the simulation by `dt` seconds.
///
/// Order: enemies move, despawn and spawn; the player's position is checked
/// for a win or a boundary loss; then collisions.  Every terminal status is
/// resolved within this call.
pub fn tick(state: &GameState, dt: f64, rng: &mut impl Rng) -> GameState {
    let mut next = update_enemies(state, dt, rng);

    let status = player_status(&next.player);
    if status.is_terminal() {
        next.player.status = status;
        next = resolve_outcome(&next);
    }

    let mut next = check_collisions(&next);
    next.frame += 1;
    next
}

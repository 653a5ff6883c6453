/// Rendering layer. All terminal I/O lives here.
///
/// Each function receives a mutable writer and an immutable view of the
/// game state.  No game logic is performed; this module only translates
/// state into terminal commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};

use crate::entities::{
    GameState, GRID_COLS, GRID_ROWS, SPRITE_Y_OFFSET, TILE_HEIGHT, TILE_WIDTH,
};
use crate::sprites::{Sprite, SpriteCache, SpriteId, TILE_COLS, TILE_ROWS};

// ── Layout ────────────────────────────────────────────────────────────────────

pub const SCORE_ROW: u16 = 0;
pub const BOARD_TOP: u16 = 1;
pub const BOARD_COLS: u16 = GRID_COLS as u16 * TILE_COLS;
pub const BOARD_ROWS: u16 = GRID_ROWS as u16 * TILE_ROWS;
pub const STATUS_ROW: u16 = BOARD_TOP + BOARD_ROWS;
pub const HINT_ROW: u16 = STATUS_ROW + 1;

/// Smallest terminal that shows the whole scene.
pub const SCREEN_WIDTH: u16 = BOARD_COLS;
pub const SCREEN_HEIGHT: u16 = HINT_ROW + 1;

/// World x the HUD texts are centred on.
const STATUS_TEXT_X: i32 = 253;
const SCORE_TEXT_X: i32 = 400;

/// Top to bottom: water, three stone lanes, two grass rows.
pub const ROW_PALETTE: [SpriteId; GRID_ROWS as usize] = [
    SpriteId::WaterBlock,
    SpriteId::StoneBlock,
    SpriteId::StoneBlock,
    SpriteId::StoneBlock,
    SpriteId::GrassBlock,
    SpriteId::GrassBlock,
];

// ── Colour palette ────────────────────────────────────────────────────────────

const C_STATUS: Color = Color::White;
const C_SCORE_AHEAD: Color = Color::Green;
const C_SCORE_BEHIND: Color = Color::Red;
const C_HINT: Color = Color::DarkGrey;

// ── Coordinate mapping ────────────────────────────────────────────────────────

/// Terminal column for a world x (may be off-board).
pub fn world_col(x: i32) -> i32 {
    (x * TILE_COLS as i32).div_euclid(TILE_WIDTH)
}

/// Grid row an entity with this y stands on.
pub fn tile_row(y: i32) -> i32 {
    (y + SPRITE_Y_OFFSET).div_euclid(TILE_HEIGHT)
}

/// Terminal row of an entity's top glyph row: one line into its tile.
pub fn entity_row(y: i32) -> i32 {
    BOARD_TOP as i32 + tile_row(y) * TILE_ROWS as i32 + 1
}

/// Colour shown when the score favours wins.
pub fn score_color(state: &GameState) -> Color {
    if state.wins >= state.losses {
        C_SCORE_AHEAD
    } else {
        C_SCORE_BEHIND
    }
}

pub fn score_text(state: &GameState) -> String {
    format!("Win/Lost score: {}/{}", state.wins, state.losses)
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(
    out: &mut W,
    state: &GameState,
    sprites: &SpriteCache,
) -> std::io::Result<()> {
    let placeholder = Sprite::placeholder();
    let lookup = |id: SpriteId| sprites.get(id).unwrap_or(&placeholder);

    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_background(out, &lookup)?;
    draw_text_centered(
        out,
        &state.info_text,
        world_col(STATUS_TEXT_X),
        STATUS_ROW,
        C_STATUS,
    )?;
    draw_text_centered(
        out,
        &score_text(state),
        world_col(SCORE_TEXT_X),
        SCORE_ROW,
        score_color(state),
    )?;

    for enemy in &state.enemies {
        let sprite = lookup(enemy.sprite);
        let bg = row_background(&lookup, enemy.y);
        draw_sprite(out, sprite, world_col(enemy.x), entity_row(enemy.y), bg)?;
    }

    let player = &state.player;
    let bg = row_background(&lookup, player.y);
    draw_sprite(
        out,
        lookup(player.sprite),
        world_col(player.x),
        entity_row(player.y),
        bg,
    )?;

    draw_controls_hint(out)?;

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, HINT_ROW))?;
    out.flush()?;
    Ok(())
}

// ── Background ────────────────────────────────────────────────────────────────

fn draw_background<'a, W: Write>(
    out: &mut W,
    lookup: &impl Fn(SpriteId) -> &'a Sprite,
) -> std::io::Result<()> {
    for (row, id) in ROW_PALETTE.iter().enumerate() {
        let tile = lookup(*id);
        for col in 0..GRID_COLS {
            draw_sprite(
                out,
                tile,
                world_col(col * TILE_WIDTH),
                BOARD_TOP as i32 + row as i32 * TILE_ROWS as i32,
                tile.bg,
            )?;
        }
    }
    Ok(())
}

/// Background colour of the tile row under `y`, so sprites blend in.
fn row_background<'a>(lookup: &impl Fn(SpriteId) -> &'a Sprite, y: i32) -> Option<Color> {
    usize::try_from(tile_row(y))
        .ok()
        .and_then(|row| ROW_PALETTE.get(row))
        .and_then(|id| lookup(*id).bg)
}

// ── Sprites ───────────────────────────────────────────────────────────────────

/// Draw `sprite` with its top-left glyph at terminal (`col`, `row`),
/// clipped to the board.
fn draw_sprite<W: Write>(
    out: &mut W,
    sprite: &Sprite,
    col: i32,
    row: i32,
    bg: Option<Color>,
) -> std::io::Result<()> {
    let board_top = BOARD_TOP as i32;
    let board_bottom = board_top + BOARD_ROWS as i32;

    for (i, line) in sprite.rows.iter().enumerate() {
        let r = row + i as i32;
        if r < board_top || r >= board_bottom {
            continue;
        }

        // Keep only the glyphs that land on a board column.
        let skip = (-col).max(0) as usize;
        let start = col.max(0);
        let room = (BOARD_COLS as i32 - start).max(0) as usize;
        let visible: String = line.chars().skip(skip).take(room).collect();
        if visible.is_empty() {
            continue;
        }

        out.queue(cursor::MoveTo(start as u16, r as u16))?;
        out.queue(style::SetForegroundColor(sprite.fg))?;
        match bg {
            Some(color) => out.queue(style::SetBackgroundColor(color))?,
            None => out.queue(style::SetBackgroundColor(Color::Reset))?,
        };
        out.queue(Print(visible))?;
    }
    Ok(())
}

// ── HUD text ──────────────────────────────────────────────────────────────────

fn draw_text_centered<W: Write>(
    out: &mut W,
    text: &str,
    center_col: i32,
    row: u16,
    color: Color,
) -> std::io::Result<()> {
    let half = text.chars().count() as i32 / 2;
    let col = (center_col - half).max(0) as u16;
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetBackgroundColor(Color::Reset))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(text))?;
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(0, HINT_ROW))?;
    out.queue(style::SetBackgroundColor(Color::Reset))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("Arrows / WASD : Move   Q : Quit"))?;
    Ok(())
}

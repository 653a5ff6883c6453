/// Sprite art and the sprite cache.
///
/// Tiles fill a whole `TILE_COLS` × `TILE_ROWS` cell block with a background
/// colour; character sprites are small glyph blocks drawn on top.

use std::collections::HashMap;

use crossterm::style::Color;

/// Terminal cells per tile.
pub const TILE_COLS: u16 = 10;
pub const TILE_ROWS: u16 = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpriteId {
    WaterBlock,
    StoneBlock,
    GrassBlock,
    EnemyBug,
    CharBoy,
    CharCatGirl,
}

impl SpriteId {
    pub const ALL: [SpriteId; 6] = [
        SpriteId::StoneBlock,
        SpriteId::WaterBlock,
        SpriteId::GrassBlock,
        SpriteId::EnemyBug,
        SpriteId::CharBoy,
        SpriteId::CharCatGirl,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SpriteId::WaterBlock => "water-block",
            SpriteId::StoneBlock => "stone-block",
            SpriteId::GrassBlock => "grass-block",
            SpriteId::EnemyBug => "enemy-bug",
            SpriteId::CharBoy => "char-boy",
            SpriteId::CharCatGirl => "char-cat-girl",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Sprite {
    /// Glyph rows, top to bottom.  All rows share the same width.
    pub rows: Vec<String>,
    pub fg: Color,
    /// `None` keeps whatever background is already on screen.
    pub bg: Option<Color>,
}

impl Sprite {
    fn tile(fill: char, fg: Color, bg: Color) -> Self {
        let row: String = std::iter::repeat(fill).take(TILE_COLS as usize).collect();
        Self {
            rows: vec![row; TILE_ROWS as usize],
            fg,
            bg: Some(bg),
        }
    }

    fn glyphs(rows: &[&str], fg: Color) -> Self {
        Self {
            rows: rows.iter().map(|r| r.to_string()).collect(),
            fg,
            bg: None,
        }
    }

    pub fn width(&self) -> usize {
        self.rows.first().map(|r| r.chars().count()).unwrap_or(0)
    }

    /// Shown when a sprite was never loaded.
    pub fn placeholder() -> Self {
        Self::glyphs(&["??"], Color::Magenta)
    }
}

fn build(id: SpriteId) -> Sprite {
    match id {
        SpriteId::WaterBlock => Sprite::tile('≈', Color::White, Color::DarkBlue),
        SpriteId::StoneBlock => Sprite::tile('▒', Color::Grey, Color::DarkGrey),
        SpriteId::GrassBlock => Sprite::tile('"', Color::Green, Color::DarkGreen),
        SpriteId::EnemyBug => Sprite::glyphs(&[" /--\\ ", "<(@@)>"], Color::Red),
        SpriteId::CharBoy => Sprite::glyphs(&["  o  ", " /|\\ "], Color::Cyan),
        SpriteId::CharCatGirl => Sprite::glyphs(&[" =^.^=", "  /|\\ "], Color::Magenta),
    }
}

// ── Cache ─────────────────────────────────────────────────────────────────────

/// Memoised sprites.  `load` is the start-up barrier: it builds every
/// requested sprite up front, so once it returns each one can be fetched
/// with `get`.  Ids that were not requested stay absent.
#[derive(Debug, Default)]
pub struct SpriteCache {
    sprites: HashMap<SpriteId, Sprite>,
}

impl SpriteCache {
    pub fn load(ids: &[SpriteId]) -> Self {
        let mut cache = SpriteCache::default();
        for &id in ids {
            cache.sprites.entry(id).or_insert_with(|| build(id));
        }
        log::debug!("sprite cache loaded {} sprite(s)", cache.sprites.len());
        cache
    }

    pub fn get(&self, id: SpriteId) -> Option<&Sprite> {
        self.sprites.get(&id)
    }

    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }
}

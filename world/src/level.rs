//! Level layouts: text parsing, validation and the campaign sequence.

use tether_core::{
    Character, LevelId, Occupant, Terrain, Tile, TileIndex, BOARD_SIDE, MAX_SLACK, TILE_COUNT,
};
use thiserror::Error;

use crate::{board::Board, navigation::shortest_path};

/// Content-authoring failures detected while loading levels.
///
/// These are fatal: a campaign containing an invalid level never starts.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ConfigurationError {
    /// The level text does not contain exactly eight rows.
    #[error("level `{level}` has {found} rows; expected {expected}")]
    RowCount {
        /// Name of the offending level.
        level: String,
        /// Number of non-empty rows found.
        found: usize,
        /// Number of rows a level must contain.
        expected: usize,
    },
    /// A row does not contain exactly eight tiles.
    #[error("row {row} of level `{level}` has {found} tiles; expected {expected}")]
    RowWidth {
        /// Name of the offending level.
        level: String,
        /// One-based row number within the file.
        row: usize,
        /// Number of tiles found on the row.
        found: usize,
        /// Number of tiles a row must contain.
        expected: usize,
    },
    /// A character has no start tile.
    #[error("level `{level}` has no start tile for character {character:?}")]
    MissingStart {
        /// Name of the offending level.
        level: String,
        /// Character without a start tile.
        character: Character,
    },
    /// A character is placed more than once.
    #[error("level `{level}` places character {character:?} more than once")]
    DuplicateStart {
        /// Name of the offending level.
        level: String,
        /// Character placed repeatedly.
        character: Character,
    },
    /// No walkable path connects A and B.
    #[error("level `{level}`: could not trace a path from A to B")]
    Disconnected {
        /// Name of the offending level.
        level: String,
    },
    /// A and B start further apart than the chain allows.
    #[error("level `{level}`: A and B start {gap} tiles apart; the chain allows {limit}")]
    SlackExceeded {
        /// Name of the offending level.
        level: String,
        /// Tiles strictly between the two start positions.
        gap: u32,
        /// Maximum number of tiles permitted between the characters.
        limit: u32,
    },
    /// The campaign contains no levels at all.
    #[error("campaign contains no levels")]
    EmptyCampaign,
}

/// Validated level layout ready to be loaded into the world.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Level {
    name: String,
    layout: Layout,
}

impl Level {
    /// Parses and validates a level from its text representation.
    ///
    /// The text holds eight rows of eight tiles. The first row of the text is
    /// the top of the board (row 7). Tiles map as follows: `.` floor, `#`
    /// wall, space water, `+` ice, `X` goal, `A` and `B` the characters' start
    /// tiles, `c` a collectable and `:` a block. Any other character is plain
    /// floor. A and B must be connected by a walkable path with no more than
    /// [`MAX_SLACK`] tiles between them.
    pub fn parse(name: impl Into<String>, text: &str) -> Result<Self, ConfigurationError> {
        let name = name.into();
        let layout = parse_layout(&name, text)?;

        let path = shortest_path(&layout.board, layout.player_a, layout.player_b);
        let Some(gap) = path.gap() else {
            return Err(ConfigurationError::Disconnected { level: name });
        };
        if gap > MAX_SLACK {
            return Err(ConfigurationError::SlackExceeded {
                level: name,
                gap,
                limit: MAX_SLACK,
            });
        }

        Ok(Self { name, layout })
    }

    /// Human-readable name of the level.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Pristine board as authored.
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.layout.board
    }

    /// Start tile of the provided character.
    #[must_use]
    pub fn start(&self, character: Character) -> TileIndex {
        match character {
            Character::A => self.layout.player_a,
            Character::B => self.layout.player_b,
        }
    }

    /// Number of collectables placed on the level.
    #[must_use]
    pub fn collectables(&self) -> u32 {
        self.layout.collectables
    }
}

/// Ordered sequence of validated levels.
#[derive(Clone, Debug)]
pub struct Campaign {
    levels: Vec<Level>,
}

impl Campaign {
    /// Creates a campaign from levels in play order.
    pub fn new(levels: Vec<Level>) -> Result<Self, ConfigurationError> {
        if levels.is_empty() {
            return Err(ConfigurationError::EmptyCampaign);
        }
        Ok(Self { levels })
    }

    pub(crate) fn first(&self) -> &Level {
        // `new` rejects empty level lists.
        &self.levels[0]
    }

    /// Level stored under the provided identifier.
    #[must_use]
    pub fn level(&self, id: LevelId) -> Option<&Level> {
        usize::try_from(id.get())
            .ok()
            .and_then(|index| self.levels.get(index))
    }

    /// Number of levels in the campaign.
    #[must_use]
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// Always `false`; campaigns cannot be empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Layout {
    pub(crate) board: Board,
    pub(crate) player_a: TileIndex,
    pub(crate) player_b: TileIndex,
    pub(crate) collectables: u32,
}

/// Parses the tile grid without checking connectivity.
pub(crate) fn parse_layout(name: &str, text: &str) -> Result<Layout, ConfigurationError> {
    let side = usize::from(BOARD_SIDE);
    let mut rows: Vec<&str> = text.lines().collect();
    while rows.len() > side && rows.last().is_some_and(|row| row.is_empty()) {
        let _ = rows.pop();
    }

    if rows.len() != side {
        return Err(ConfigurationError::RowCount {
            level: name.to_owned(),
            found: rows.len(),
            expected: side,
        });
    }

    let mut tiles = [Tile::default(); TILE_COUNT];
    let mut player_a = None;
    let mut player_b = None;
    let mut collectables = 0;

    for (file_row, line) in rows.iter().enumerate() {
        let found = line.chars().count();
        if found != side {
            return Err(ConfigurationError::RowWidth {
                level: name.to_owned(),
                row: file_row + 1,
                found,
                expected: side,
            });
        }

        let row = (side - 1 - file_row) as u8;
        for (column, glyph) in line.chars().enumerate() {
            let Some(index) = TileIndex::from_row_column(row, column as u8) else {
                continue;
            };
            let tile = tile_for(glyph);
            match tile.occupant {
                Occupant::PlayerA => record_start(&mut player_a, index, name, Character::A)?,
                Occupant::PlayerB => record_start(&mut player_b, index, name, Character::B)?,
                Occupant::Collectable => collectables += 1,
                _ => {}
            }
            tiles[index.get()] = tile;
        }
    }

    let player_a = player_a.ok_or_else(|| ConfigurationError::MissingStart {
        level: name.to_owned(),
        character: Character::A,
    })?;
    let player_b = player_b.ok_or_else(|| ConfigurationError::MissingStart {
        level: name.to_owned(),
        character: Character::B,
    })?;

    Ok(Layout {
        board: Board::from_tiles(tiles),
        player_a,
        player_b,
        collectables,
    })
}

fn tile_for(glyph: char) -> Tile {
    match glyph {
        '#' => Tile::new(Terrain::Wall, Occupant::Empty),
        ' ' => Tile::new(Terrain::Water, Occupant::Empty),
        '+' => Tile::new(Terrain::Ice, Occupant::Empty),
        'X' => Tile::new(Terrain::Goal, Occupant::Empty),
        'A' => Tile::new(Terrain::Normal, Occupant::PlayerA),
        'B' => Tile::new(Terrain::Normal, Occupant::PlayerB),
        'c' => Tile::new(Terrain::Normal, Occupant::Collectable),
        ':' => Tile::new(Terrain::Normal, Occupant::Block),
        _ => Tile::default(),
    }
}

fn record_start(
    slot: &mut Option<TileIndex>,
    index: TileIndex,
    level: &str,
    character: Character,
) -> Result<(), ConfigurationError> {
    if slot.replace(index).is_some() {
        return Err(ConfigurationError::DuplicateStart {
            level: level.to_owned(),
            character,
        });
    }
    Ok(())
}

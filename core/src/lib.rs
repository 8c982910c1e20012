#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Tether puzzle engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing player intent or elapsed time, the world resolves those commands
//! via its `apply` entry point, and then broadcasts [`Event`] values describing
//! every discrete effect. Systems consume event streams, query immutable
//! snapshots, and respond exclusively with new command batches.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Number of tiles along each edge of the square board.
pub const BOARD_SIDE: u8 = 8;

/// Total number of tiles on the board.
pub const TILE_COUNT: usize = BOARD_SIDE as usize * BOARD_SIDE as usize;

/// Maximum number of walkable tiles permitted strictly between A and B.
///
/// Whenever the shortest walk between the characters leaves more tiles than
/// this in between, the trailing character is pulled forward.
pub const MAX_SLACK: u32 = 2;

/// Time a sliding character spends on an ice tile before moving on.
pub const SLIDE_INTERVAL: Duration = Duration::from_millis(500);

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Replaces the board with the pristine layout of the provided level.
    LoadLevel {
        /// Position of the level within the campaign.
        level: LevelId,
    },
    /// Requests that character A attempt a single step in the given direction.
    Step {
        /// Direction supplied by the input collaborator.
        direction: Direction,
    },
    /// Advances the simulation clock by the provided delta time.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Requests that a sliding character continue across the ice.
    Slide {
        /// Character whose slide timer expired.
        character: Character,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Announces that a level was loaded and validated.
    LevelLoaded {
        /// Level that became active.
        level: LevelId,
        /// Number of collectables placed on the fresh board.
        collectables: u32,
    },
    /// Reports that a level selection referenced a level outside the campaign.
    LevelUnavailable {
        /// Level that was requested.
        level: LevelId,
    },
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Reports that directional input was dropped because a character is sliding.
    StepIgnored {
        /// Direction that was ignored.
        direction: Direction,
    },
    /// Summarises the effect of one resolved move.
    MoveResolved {
        /// Occupant that initiated the move.
        mover: Occupant,
        /// Direction of the attempted move.
        direction: Direction,
        /// Tagged outcome of the resolution.
        outcome: MoveOutcome,
    },
    /// Confirms that a character picked up a collectable.
    CollectablePicked {
        /// Tile that held the collectable.
        tile: TileIndex,
        /// Total collected on the current level after the pickup.
        collected: u32,
    },
    /// Confirms that a block was pushed into water, turning it into floor.
    HoleFilled {
        /// Tile whose water was filled.
        tile: TileIndex,
    },
    /// Reports that the chain dragged the trailing character forward.
    ChainPulled {
        /// Character that was dragged.
        character: Character,
        /// Tile the character occupies after the pull.
        to: TileIndex,
    },
    /// Announces that a character started sliding across ice.
    SlideStarted {
        /// Character that started sliding.
        character: Character,
        /// Fixed direction of the slide.
        direction: Direction,
    },
    /// Announces that a character came to rest.
    SlideEnded {
        /// Character that stopped sliding.
        character: Character,
    },
    /// Confirms that A pushed B onto the goal.
    LevelCompleted {
        /// Level that was completed.
        level: LevelId,
    },
    /// Reports that A walked into water alone and the level was reset.
    Drowned {
        /// Level that is reloaded.
        level: LevelId,
    },
    /// Reports that the final level of the campaign was completed.
    CampaignCompleted,
}

/// Tagged result of a single move resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveOutcome {
    /// Nothing moved.
    NoOp,
    /// The mover stepped onto the destination.
    Move,
    /// The mover displaced a block or the other character and followed.
    Push,
    /// A pushed B into water and both now share a tile.
    Merge,
    /// A merged pair stepped apart, A leading and B staying behind.
    Split,
    /// B was pushed onto the goal and the next level was requested.
    Transition,
    /// A drowned and the current level was reloaded.
    Reload,
}

/// Cardinal movement directions available to the characters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward decreasing column indices.
    Left,
    /// Movement toward increasing column indices.
    Right,
    /// Movement toward increasing row indices (row 7 is the top of the board).
    Up,
    /// Movement toward decreasing row indices.
    Down,
}

impl Direction {
    /// Fixed neighbour exploration order used by the connectivity solver.
    ///
    /// Shortest-path ties are broken by this order, so it determines where
    /// the chain lands in ambiguous layouts.
    pub const EXPLORATION_ORDER: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];
}

/// Row-major position of a tile on the board, with row 0 at the bottom.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileIndex(u8);

impl TileIndex {
    /// Creates a tile index, returning `None` when it lies off the board.
    #[must_use]
    pub const fn new(value: usize) -> Option<Self> {
        if value < TILE_COUNT {
            Some(Self(value as u8))
        } else {
            None
        }
    }

    /// Creates a tile index from zero-based row and column coordinates.
    #[must_use]
    pub const fn from_row_column(row: u8, column: u8) -> Option<Self> {
        if row < BOARD_SIDE && column < BOARD_SIDE {
            Some(Self(row * BOARD_SIDE + column))
        } else {
            None
        }
    }

    /// Retrieves the numeric index, suitable for addressing tile arrays.
    #[must_use]
    pub const fn get(self) -> usize {
        self.0 as usize
    }

    /// Zero-based row of the tile, counted from the bottom edge.
    #[must_use]
    pub const fn row(self) -> u8 {
        self.0 / BOARD_SIDE
    }

    /// Zero-based column of the tile, counted from the left edge.
    #[must_use]
    pub const fn column(self) -> u8 {
        self.0 % BOARD_SIDE
    }

    /// Adjacent tile in the provided direction.
    ///
    /// Board edges do not wrap: tiles in column 0 have no left neighbour,
    /// tiles in row 7 have no upward neighbour, and so on.
    #[must_use]
    pub const fn neighbor(self, direction: Direction) -> Option<Self> {
        match direction {
            Direction::Left if self.column() > 0 => Some(Self(self.0 - 1)),
            Direction::Right if self.column() + 1 < BOARD_SIDE => Some(Self(self.0 + 1)),
            Direction::Up if self.row() + 1 < BOARD_SIDE => Some(Self(self.0 + BOARD_SIDE)),
            Direction::Down if self.row() > 0 => Some(Self(self.0 - BOARD_SIDE)),
            _ => None,
        }
    }
}

/// Static terrain of a tile.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Terrain {
    /// Plain floor without special properties.
    #[default]
    Normal,
    /// Impassable tile; the chain must route around it.
    Wall,
    /// Drowns A when entered alone; fillable with a block.
    Water,
    /// Characters entering it slide until they leave the ice.
    Ice,
    /// Pushing B onto it completes the level.
    Goal,
}

/// Entity occupying a tile.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Occupant {
    /// Nothing occupies the tile.
    #[default]
    Empty,
    /// Character A, the one driven by player input.
    PlayerA,
    /// Character B, dragged along by the chain.
    PlayerB,
    /// Both characters merged on a single tile.
    PlayerBoth,
    /// Score item picked up by whichever character enters the tile.
    Collectable,
    /// Pushable obstacle that also blocks the chain.
    Block,
}

impl Occupant {
    /// Reports whether the occupant contains the provided character.
    #[must_use]
    pub const fn holds(self, character: Character) -> bool {
        matches!(
            (self, character),
            (Self::PlayerBoth, _) | (Self::PlayerA, Character::A) | (Self::PlayerB, Character::B)
        )
    }
}

/// Single board cell combining terrain and occupant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tile {
    /// Static terrain of the tile.
    pub terrain: Terrain,
    /// Entity currently standing on the tile.
    pub occupant: Occupant,
}

impl Tile {
    /// Creates a tile from its terrain and occupant.
    #[must_use]
    pub const fn new(terrain: Terrain, occupant: Occupant) -> Self {
        Self { terrain, occupant }
    }
}

/// Logical identity of the two linked characters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Character {
    /// The leading character controlled by the player.
    A,
    /// The trailing character attached by the chain.
    B,
}

impl Character {
    /// Occupant representing the character when standing alone.
    #[must_use]
    pub const fn occupant(self) -> Occupant {
        match self {
            Self::A => Occupant::PlayerA,
            Self::B => Occupant::PlayerB,
        }
    }

    /// The other end of the chain.
    #[must_use]
    pub const fn partner(self) -> Self {
        match self {
            Self::A => Self::B,
            Self::B => Self::A,
        }
    }
}

/// Position of a level within the campaign.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LevelId(u32);

impl LevelId {
    /// Creates a new level identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Identifier of the level that follows this one.
    #[must_use]
    pub const fn next(&self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

/// One of the two visible chain link slots.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChainLink {
    /// Tile the link is drawn on, if the slot has been placed.
    pub tile: Option<TileIndex>,
    /// Whether the renderer should draw the link.
    pub visible: bool,
}

impl ChainLink {
    /// Link placed on a tile and shown.
    #[must_use]
    pub const fn shown(tile: TileIndex) -> Self {
        Self {
            tile: Some(tile),
            visible: true,
        }
    }

    /// Tile that should be drawn, if the link is both placed and visible.
    #[must_use]
    pub const fn drawn_at(&self) -> Option<TileIndex> {
        if self.visible {
            self.tile
        } else {
            None
        }
    }
}

/// Collection progress on the active level.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Score {
    /// Collectables picked up so far.
    pub collected: u32,
    /// Collectables placed on the level when it was loaded.
    pub collectable: u32,
}

/// Immutable representation of one character's slide state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IceSnapshot {
    /// Character the state belongs to.
    pub character: Character,
    /// Direction of the slide in progress, if any.
    pub direction: Option<Direction>,
    /// Time left before the next slide step.
    pub remaining: Duration,
}

impl IceSnapshot {
    /// Reports whether the character is sliding.
    #[must_use]
    pub const fn active(&self) -> bool {
        self.direction.is_some()
    }

    /// Reports whether the slide timer expired and the next step is due.
    #[must_use]
    pub fn ready_to_slide(&self) -> bool {
        self.active() && self.remaining.is_zero()
    }
}

/// Read-only snapshot of every character's slide state in resolution order.
#[derive(Clone, Debug, Default)]
pub struct IceView {
    snapshots: Vec<IceSnapshot>,
}

impl IceView {
    /// Creates a new ice view from snapshots already in resolution order.
    #[must_use]
    pub fn from_snapshots(snapshots: Vec<IceSnapshot>) -> Self {
        Self { snapshots }
    }

    /// Iterator over the captured snapshots in resolution order.
    pub fn iter(&self) -> impl Iterator<Item = &IceSnapshot> {
        self.snapshots.iter()
    }

    /// Reports whether any character is currently sliding.
    #[must_use]
    pub fn any_active(&self) -> bool {
        self.snapshots.iter().any(IceSnapshot::active)
    }
}

/// Read-only snapshot of everything a renderer needs to present a frame.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Level currently loaded.
    pub level: LevelId,
    /// Board tiles in row-major order, row 0 first.
    pub tiles: Vec<Tile>,
    /// Tile held by character A.
    pub player_a: TileIndex,
    /// Tile held by character B.
    pub player_b: TileIndex,
    /// Chain link slots derived from the latest resolution.
    pub chain: [ChainLink; 2],
    /// Collection progress on the level.
    pub score: Score,
}

impl Snapshot {
    /// Tile stored at the provided index.
    #[must_use]
    pub fn tile(&self, index: TileIndex) -> Tile {
        self.tiles.get(index.get()).copied().unwrap_or_default()
    }

    /// Reports whether both characters share a tile.
    #[must_use]
    pub fn merged(&self) -> bool {
        self.player_a == self.player_b
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tile(value: usize) -> TileIndex {
        TileIndex::new(value).expect("index on board")
    }

    #[test]
    fn neighbors_do_not_wrap_around_edges() {
        assert_eq!(tile(8).neighbor(Direction::Left), None);
        assert_eq!(tile(7).neighbor(Direction::Right), None);
        assert_eq!(tile(56).neighbor(Direction::Up), None);
        assert_eq!(tile(3).neighbor(Direction::Down), None);
    }

    #[test]
    fn neighbors_follow_row_major_layout() {
        let origin = tile(9);
        assert_eq!(origin.neighbor(Direction::Left), Some(tile(8)));
        assert_eq!(origin.neighbor(Direction::Right), Some(tile(10)));
        assert_eq!(origin.neighbor(Direction::Up), Some(tile(17)));
        assert_eq!(origin.neighbor(Direction::Down), Some(tile(1)));
    }

    #[test]
    fn row_and_column_round_trip() {
        let index = TileIndex::from_row_column(6, 3).expect("on board");
        assert_eq!(index.get(), 51);
        assert_eq!(index.row(), 6);
        assert_eq!(index.column(), 3);
        assert_eq!(TileIndex::from_row_column(8, 0), None);
        assert_eq!(TileIndex::new(TILE_COUNT), None);
    }

    #[test]
    fn merged_occupant_holds_both_characters() {
        assert!(Occupant::PlayerBoth.holds(Character::A));
        assert!(Occupant::PlayerBoth.holds(Character::B));
        assert!(!Occupant::PlayerA.holds(Character::B));
        assert!(!Occupant::Block.holds(Character::A));
    }

    #[test]
    fn hidden_links_are_not_drawn() {
        let link = ChainLink {
            tile: Some(tile(4)),
            visible: false,
        };
        assert_eq!(link.drawn_at(), None);
        assert_eq!(ChainLink::shown(tile(4)).drawn_at(), Some(tile(4)));
    }

    #[test]
    fn snapshot_round_trips_through_bincode() {
        let mut tiles = vec![Tile::default(); TILE_COUNT];
        tiles[0] = Tile::new(Terrain::Normal, Occupant::PlayerA);
        tiles[2] = Tile::new(Terrain::Water, Occupant::PlayerB);
        let snapshot = Snapshot {
            level: LevelId::new(3),
            tiles,
            player_a: tile(0),
            player_b: tile(2),
            chain: [ChainLink::default(), ChainLink::shown(tile(1))],
            score: Score {
                collected: 1,
                collectable: 2,
            },
        };

        let bytes = bincode::serialize(&snapshot).expect("serialize");
        let restored: Snapshot = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(restored, snapshot);
    }
}

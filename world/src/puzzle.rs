//! Mutable simulation state of the level being played.

use tether_core::{Character, Direction, Event, Occupant, Score, Terrain, TileIndex};

use crate::{
    board::Board,
    chain::ChainState,
    ice::IceTimers,
    level::Level,
    navigation::{shortest_path, ShortestPath},
};

/// Board, character positions and derived state owned by the world.
///
/// `player_a` and `player_b` always name the tiles holding the matching
/// occupant; while merged both point at the single `PlayerBoth` tile.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Puzzle {
    pub(crate) board: Board,
    player_a: TileIndex,
    player_b: TileIndex,
    pub(crate) chain: ChainState,
    pub(crate) ice: IceTimers,
    score: Score,
}

impl Puzzle {
    pub(crate) fn from_level(level: &Level) -> Self {
        let mut puzzle = Self {
            board: level.board().clone(),
            player_a: level.start(Character::A),
            player_b: level.start(Character::B),
            chain: ChainState::default(),
            ice: IceTimers::default(),
            score: Score {
                collected: 0,
                collectable: level.collectables(),
            },
        };
        let path = puzzle.path_between();
        puzzle.chain.follow(&path);
        puzzle
    }

    pub(crate) fn position(&self, character: Character) -> TileIndex {
        match character {
            Character::A => self.player_a,
            Character::B => self.player_b,
        }
    }

    pub(crate) fn merged(&self) -> bool {
        self.player_a == self.player_b
    }

    pub(crate) fn score(&self) -> Score {
        self.score
    }

    /// Shortest walk from A to B on the current board.
    pub(crate) fn path_between(&self) -> ShortestPath {
        shortest_path(&self.board, self.player_a, self.player_b)
    }

    /// Reports whether A stands in water without B underneath.
    pub(crate) fn drowned(&self) -> bool {
        !self.merged() && self.board.terrain(self.player_a) == Terrain::Water
    }

    /// Moves a lone character onto `to`, collecting anything lying there.
    pub(crate) fn place(&mut self, character: Character, to: TileIndex, out: &mut Vec<Event>) {
        let from = self.position(character);
        if self.board.occupant(from) == character.occupant() {
            self.board.set_occupant(from, Occupant::Empty);
        }
        self.collect(to, out);
        self.board.set_occupant(to, character.occupant());
        self.set_position(character, to);
    }

    /// Moves A onto B's tile so both share it.
    pub(crate) fn merge(&mut self, at: TileIndex) {
        self.board.set_occupant(self.player_a, Occupant::Empty);
        self.board.set_occupant(at, Occupant::PlayerBoth);
        self.player_a = at;
        self.player_b = at;
    }

    /// Moves A out of a merged tile, leaving B behind on it.
    pub(crate) fn split(&mut self, to: TileIndex, out: &mut Vec<Event>) {
        let from = self.player_a;
        self.collect(to, out);
        self.board.set_occupant(to, Occupant::PlayerA);
        self.board.set_occupant(from, Occupant::PlayerB);
        self.player_a = to;
    }

    /// Shoves the block on `from` onto `to`, filling water if present.
    pub(crate) fn shove_block(&mut self, from: TileIndex, to: TileIndex, out: &mut Vec<Event>) {
        self.board.set_occupant(from, Occupant::Empty);
        if self.board.terrain(to) == Terrain::Water {
            self.board.set_terrain(to, Terrain::Normal);
            out.push(Event::HoleFilled { tile: to });
        } else {
            self.board.set_occupant(to, Occupant::Block);
        }
    }

    pub(crate) fn start_slide(
        &mut self,
        character: Character,
        direction: Direction,
        out: &mut Vec<Event>,
    ) {
        self.ice.start(character, direction);
        out.push(Event::SlideStarted {
            character,
            direction,
        });
    }

    pub(crate) fn end_slide(&mut self, character: Character, out: &mut Vec<Event>) {
        if self.ice.stop(character) {
            out.push(Event::SlideEnded { character });
        }
    }

    fn collect(&mut self, tile: TileIndex, out: &mut Vec<Event>) {
        if self.board.occupant(tile) != Occupant::Collectable {
            return;
        }
        self.score.collected = self.score.collected.saturating_add(1);
        out.push(Event::CollectablePicked {
            tile,
            collected: self.score.collected,
        });
    }

    fn set_position(&mut self, character: Character, to: TileIndex) {
        match character {
            Character::A => self.player_a = to,
            Character::B => self.player_b = to,
        }
    }
}

#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Tether adapters.

use anyhow::Result as AnyResult;
use std::fmt;
use tether_core::{Occupant, Score, Snapshot, Terrain, Tile, TileIndex, BOARD_SIDE};

/// Glyph drawn for a chain link resting on an otherwise empty tile.
pub const LINK_GLYPH: char = 'o';

/// Text rendition of one simulation snapshot.
///
/// Rows are stored top-down, so the first row is board row 7.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    rows: Vec<String>,
    score: Score,
}

impl Frame {
    /// Composes a frame from the provided snapshot.
    ///
    /// Occupants take precedence over chain links, which take precedence
    /// over terrain.
    #[must_use]
    pub fn compose(snapshot: &Snapshot) -> Self {
        let links: Vec<TileIndex> = snapshot
            .chain
            .iter()
            .filter_map(|link| link.drawn_at())
            .collect();

        let rows = (0..BOARD_SIDE)
            .rev()
            .map(|row| {
                (0..BOARD_SIDE)
                    .filter_map(|column| TileIndex::from_row_column(row, column))
                    .map(|index| glyph(snapshot.tile(index), links.contains(&index)))
                    .collect()
            })
            .collect();

        Self {
            rows,
            score: snapshot.score,
        }
    }

    /// Board rows from top to bottom.
    #[must_use]
    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    /// One marker per collectable, filled for every collected one.
    #[must_use]
    pub fn score_markers(&self) -> String {
        (0..self.score.collectable)
            .map(|slot| {
                if slot < self.score.collected {
                    "[*]"
                } else {
                    "[ ]"
                }
            })
            .collect()
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            writeln!(f, "{row}")?;
        }
        write!(f, "{}", self.score_markers())
    }
}

/// Glyph presenting a tile, optionally overlaid by a chain link.
#[must_use]
pub fn glyph(tile: Tile, link: bool) -> char {
    match tile.occupant {
        Occupant::PlayerA => 'A',
        Occupant::PlayerB => 'B',
        Occupant::PlayerBoth => '@',
        Occupant::Collectable => 'c',
        Occupant::Block => ':',
        Occupant::Empty if link => LINK_GLYPH,
        Occupant::Empty => match tile.terrain {
            Terrain::Normal => '.',
            Terrain::Wall => '#',
            Terrain::Water => '~',
            Terrain::Ice => '+',
            Terrain::Goal => 'X',
        },
    }
}

/// Rendering backend capable of presenting Tether frames.
pub trait RenderingBackend {
    /// Presents the provided frame.
    fn present(&mut self, frame: &Frame) -> AnyResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use tether_core::{ChainLink, LevelId, TILE_COUNT};

    fn tile(value: usize) -> TileIndex {
        TileIndex::new(value).expect("index on board")
    }

    fn snapshot() -> Snapshot {
        let mut tiles = vec![Tile::default(); TILE_COUNT];
        tiles[0] = Tile::new(Terrain::Normal, Occupant::PlayerA);
        tiles[3] = Tile::new(Terrain::Normal, Occupant::PlayerB);
        tiles[4] = Tile::new(Terrain::Water, Occupant::Empty);
        tiles[5] = Tile::new(Terrain::Ice, Occupant::Empty);
        tiles[6] = Tile::new(Terrain::Normal, Occupant::Block);
        tiles[7] = Tile::new(Terrain::Normal, Occupant::Collectable);
        tiles[56] = Tile::new(Terrain::Goal, Occupant::Empty);
        tiles[63] = Tile::new(Terrain::Wall, Occupant::Empty);
        Snapshot {
            level: LevelId::new(0),
            tiles,
            player_a: tile(0),
            player_b: tile(3),
            chain: [ChainLink::shown(tile(1)), ChainLink::shown(tile(2))],
            score: Score {
                collected: 1,
                collectable: 3,
            },
        }
    }

    #[test]
    fn rows_are_printed_top_down() {
        let frame = Frame::compose(&snapshot());

        assert_eq!(frame.rows().len(), usize::from(BOARD_SIDE));
        assert_eq!(frame.rows()[0], "X......#");
        assert_eq!(frame.rows()[7], "AooB~+:c");
    }

    #[test]
    fn hidden_links_fall_back_to_terrain() {
        let mut snapshot = snapshot();
        snapshot.chain[0].visible = false;

        let frame = Frame::compose(&snapshot);

        assert_eq!(frame.rows()[7], "A.oB~+:c");
    }

    #[test]
    fn merged_characters_share_a_glyph() {
        let merged = Tile::new(Terrain::Water, Occupant::PlayerBoth);
        assert_eq!(glyph(merged, true), '@');
    }

    #[test]
    fn score_markers_follow_the_board() {
        let frame = Frame::compose(&snapshot());

        assert_eq!(frame.score_markers(), "[*][ ][ ]");
        assert!(frame.to_string().ends_with("AooB~+:c\n[*][ ][ ]"));
    }
}

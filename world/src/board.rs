//! Dense tile grid backing the puzzle.

use tether_core::{Direction, Occupant, Terrain, Tile, TileIndex, TILE_COUNT};

/// Fixed 8×8 grid of tiles stored in row-major order, row 0 at the bottom.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    tiles: [Tile; TILE_COUNT],
}

impl Board {
    pub(crate) fn from_tiles(tiles: [Tile; TILE_COUNT]) -> Self {
        Self { tiles }
    }

    /// Tile stored at the provided index.
    #[must_use]
    pub fn tile(&self, index: TileIndex) -> Tile {
        self.tiles[index.get()]
    }

    /// Terrain of the tile at the provided index.
    #[must_use]
    pub fn terrain(&self, index: TileIndex) -> Terrain {
        self.tiles[index.get()].terrain
    }

    /// Entity standing on the tile at the provided index.
    #[must_use]
    pub fn occupant(&self, index: TileIndex) -> Occupant {
        self.tiles[index.get()].occupant
    }

    /// All tiles in row-major order.
    #[must_use]
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Neighbour in the provided direction that a character may step onto.
    ///
    /// Returns `None` at the board edge and in front of walls. Occupants are
    /// not considered; the resolver decides what entering an occupied tile
    /// means.
    #[must_use]
    pub fn step(&self, index: TileIndex, direction: Direction) -> Option<TileIndex> {
        index
            .neighbor(direction)
            .filter(|neighbor| self.terrain(*neighbor) != Terrain::Wall)
    }

    /// Reports whether the chain may route through the tile.
    ///
    /// Walls and blocks obstruct the chain; every other tile is walkable.
    #[must_use]
    pub fn is_passable(&self, index: TileIndex) -> bool {
        let tile = self.tile(index);
        tile.terrain != Terrain::Wall && tile.occupant != Occupant::Block
    }

    pub(crate) fn set_occupant(&mut self, index: TileIndex, occupant: Occupant) {
        self.tiles[index.get()].occupant = occupant;
    }

    pub(crate) fn set_terrain(&mut self, index: TileIndex, terrain: Terrain) {
        self.tiles[index.get()].terrain = terrain;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tile(value: usize) -> TileIndex {
        TileIndex::new(value).expect("index on board")
    }

    #[test]
    fn step_refuses_walls_and_edges() {
        let mut tiles = [Tile::default(); TILE_COUNT];
        tiles[10].terrain = Terrain::Wall;
        let board = Board::from_tiles(tiles);

        assert_eq!(board.step(tile(9), Direction::Right), None);
        assert_eq!(board.step(tile(9), Direction::Left), Some(tile(8)));
        assert_eq!(board.step(tile(8), Direction::Left), None);
    }

    #[test]
    fn blocks_are_not_passable() {
        let mut tiles = [Tile::default(); TILE_COUNT];
        tiles[5].occupant = Occupant::Block;
        tiles[6].occupant = Occupant::Collectable;
        let board = Board::from_tiles(tiles);

        assert!(!board.is_passable(tile(5)));
        assert!(board.is_passable(tile(6)));
    }

    #[test]
    fn setters_touch_only_the_addressed_tile() {
        let mut board = Board::from_tiles([Tile::default(); TILE_COUNT]);
        board.set_terrain(tile(3), Terrain::Water);
        board.set_occupant(tile(3), Occupant::PlayerB);

        assert_eq!(board.tile(tile(3)), Tile::new(Terrain::Water, Occupant::PlayerB));
        assert_eq!(board.tile(tile(4)), Tile::default());
    }
}

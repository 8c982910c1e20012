//! Breadth-first connectivity solver used for level validation and the chain.

use std::collections::VecDeque;

use tether_core::{Direction, TileIndex, TILE_COUNT};

use crate::board::Board;

/// Outcome of a shortest-walk query between two tiles.
///
/// The walk avoids walls and blocks. Parents record the tile each cell was
/// first discovered from, so the tree reflects the fixed exploration order of
/// [`Direction::EXPLORATION_ORDER`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShortestPath {
    start: TileIndex,
    goal: TileIndex,
    parents: [Option<TileIndex>; TILE_COUNT],
    path: Option<Vec<TileIndex>>,
}

impl ShortestPath {
    /// Tile the search started from.
    #[must_use]
    pub fn start(&self) -> TileIndex {
        self.start
    }

    /// Tile the search looked for.
    #[must_use]
    pub fn goal(&self) -> TileIndex {
        self.goal
    }

    /// Reports whether the goal is reachable from the start.
    #[must_use]
    pub fn found(&self) -> bool {
        self.path.is_some()
    }

    /// Number of edges along the shortest walk, if the goal was reached.
    #[must_use]
    pub fn distance(&self) -> Option<u32> {
        self.path.as_ref().map(|path| path.len() as u32)
    }

    /// Number of tiles strictly between start and goal, if the goal was reached.
    ///
    /// Coinciding endpoints and adjacent endpoints both report zero.
    #[must_use]
    pub fn gap(&self) -> Option<u32> {
        self.distance().map(|distance| distance.saturating_sub(1))
    }

    /// Tile from which the provided tile was first discovered.
    #[must_use]
    pub fn parent(&self, index: TileIndex) -> Option<TileIndex> {
        self.parents[index.get()]
    }

    /// Walk from the goal back toward the start, excluding the start itself.
    #[must_use]
    pub fn path(&self) -> Option<&[TileIndex]> {
        self.path.as_deref()
    }

    /// Tile lying `steps` edges from the goal along the walk.
    #[must_use]
    pub fn from_goal(&self, steps: usize) -> Option<TileIndex> {
        self.path.as_ref()?.get(steps).copied()
    }

    /// Tile lying `steps` edges from the start along the walk.
    #[must_use]
    pub fn from_start(&self, steps: usize) -> Option<TileIndex> {
        let path = self.path.as_ref()?;
        let offset = path.len().checked_sub(steps)?;
        path.get(offset).copied()
    }
}

/// Computes the shortest walk from `start` to `goal` on the provided board.
///
/// Every tile is enqueued at most once and the search stops as soon as the
/// goal is discovered. Neighbours are explored left, right, up, down; among
/// equally short walks the one reached first in that order wins.
#[must_use]
pub fn shortest_path(board: &Board, start: TileIndex, goal: TileIndex) -> ShortestPath {
    let mut parents = [None; TILE_COUNT];
    let mut visited = [false; TILE_COUNT];
    visited[start.get()] = true;

    let mut reached = start == goal;
    let mut queue = VecDeque::new();
    queue.push_back(start);

    'search: while let Some(current) = queue.pop_front() {
        if reached {
            break;
        }

        for direction in Direction::EXPLORATION_ORDER {
            let Some(neighbor) = current.neighbor(direction) else {
                continue;
            };

            if visited[neighbor.get()] || !board.is_passable(neighbor) {
                continue;
            }

            visited[neighbor.get()] = true;
            parents[neighbor.get()] = Some(current);

            if neighbor == goal {
                reached = true;
                break 'search;
            }

            queue.push_back(neighbor);
        }
    }

    let path = reached.then(|| trace_back(&parents, start, goal));

    ShortestPath {
        start,
        goal,
        parents,
        path,
    }
}

fn trace_back(
    parents: &[Option<TileIndex>; TILE_COUNT],
    start: TileIndex,
    goal: TileIndex,
) -> Vec<TileIndex> {
    let mut path = Vec::new();
    let mut current = goal;

    while current != start {
        path.push(current);
        let Some(parent) = parents[current.get()] else {
            break;
        };
        current = parent;
    }

    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::parse_layout;

    fn tile(value: usize) -> TileIndex {
        TileIndex::new(value).expect("index on board")
    }

    fn board(rows: &str) -> Board {
        parse_layout("test", rows).expect("layout parses").board
    }

    #[test]
    fn open_board_reports_edge_count() {
        let board = board(
            "........\n\
             ........\n\
             ........\n\
             ........\n\
             ........\n\
             ........\n\
             ........\n\
             A.B.....\n",
        );

        let result = shortest_path(&board, tile(0), tile(2));
        assert!(result.found());
        assert_eq!(result.distance(), Some(2));
        assert_eq!(result.gap(), Some(1));
        assert_eq!(result.path(), Some(&[tile(2), tile(1)][..]));
    }

    #[test]
    fn walls_and_blocks_force_detours() {
        let board = board(
            "........\n\
             ........\n\
             ........\n\
             ........\n\
             ........\n\
             ........\n\
             .:......\n\
             A#B.....\n",
        );

        let result = shortest_path(&board, tile(0), tile(2));
        assert_eq!(result.distance(), Some(6));
        assert!(result
            .path()
            .expect("path found")
            .iter()
            .all(|index| board.is_passable(*index)));
    }

    #[test]
    fn long_walks_keep_every_step() {
        let board = board(
            "B.......\n\
             ........\n\
             ........\n\
             ........\n\
             ........\n\
             ........\n\
             ........\n\
             .......A\n",
        );

        let result = shortest_path(&board, tile(7), tile(56));
        assert_eq!(result.distance(), Some(14));
        assert_eq!(result.path().map(<[TileIndex]>::len), Some(14));
        assert_eq!(result.from_goal(0), Some(tile(56)));
        assert_eq!(result.from_start(14), Some(tile(56)));
        assert_eq!(result.from_start(15), None);
    }

    #[test]
    fn ties_follow_exploration_order() {
        let board = board(
            "........\n\
             ........\n\
             ........\n\
             ........\n\
             ........\n\
             ........\n\
             .B......\n\
             A.......\n",
        );

        let result = shortest_path(&board, tile(0), tile(9));
        // Right is explored before up, so the walk turns through tile 1.
        assert_eq!(result.parent(tile(9)), Some(tile(1)));
        assert_eq!(result.from_start(1), Some(tile(1)));
    }

    #[test]
    fn sealed_goal_is_not_found() {
        let board = board(
            "........\n\
             ........\n\
             ........\n\
             ........\n\
             ........\n\
             ........\n\
             ##......\n\
             A#B.....\n",
        );

        let result = shortest_path(&board, tile(0), tile(2));
        assert!(!result.found());
        assert_eq!(result.distance(), None);
        assert_eq!(result.path(), None);
    }

    #[test]
    fn coinciding_endpoints_have_zero_distance() {
        let board = board(
            "........\n\
             ........\n\
             ........\n\
             ........\n\
             ........\n\
             ........\n\
             ........\n\
             A.B.....\n",
        );

        let result = shortest_path(&board, tile(4), tile(4));
        assert_eq!(result.distance(), Some(0));
        assert_eq!(result.gap(), Some(0));
    }
}

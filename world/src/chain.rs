//! Chain model: link placement and the slack-restoring pull.

use log::debug;
use tether_core::{ChainLink, Character, Direction, Event, Terrain, TileIndex, MAX_SLACK};

use crate::{navigation::ShortestPath, puzzle::Puzzle};

/// Derived link slots drawn between the two characters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct ChainState {
    links: [ChainLink; 2],
}

impl ChainState {
    pub(crate) fn links(&self) -> [ChainLink; 2] {
        self.links
    }

    /// Places the links on the tiles strictly between A and B.
    ///
    /// Slot 1 always sits next to B; slot 0 is only used when two tiles
    /// separate the characters. A path wider than the slack hides both.
    pub(crate) fn follow(&mut self, path: &ShortestPath) {
        self.hide();
        match path.gap() {
            Some(1) => self.links[1] = shown(path.from_goal(1)),
            Some(2) => {
                self.links[0] = shown(path.from_goal(2));
                self.links[1] = shown(path.from_goal(1));
            }
            _ => {}
        }
    }

    fn hide(&mut self) {
        for link in &mut self.links {
            link.visible = false;
        }
    }
}

fn shown(tile: Option<TileIndex>) -> ChainLink {
    tile.map(ChainLink::shown).unwrap_or_default()
}

/// Recomputes the chain after a move and pulls `trailing` when it went slack.
///
/// The trailing character is dragged along the shortest walk until exactly
/// [`MAX_SLACK`] tiles separate the pair again. Landing on ice starts a slide
/// in `direction`; a sliding character pulled off the ice comes to rest.
pub(crate) fn settle(
    puzzle: &mut Puzzle,
    trailing: Character,
    direction: Direction,
    out_events: &mut Vec<Event>,
) {
    let path = puzzle.path_between();
    if !path.gap().is_some_and(|gap| gap > MAX_SLACK) {
        puzzle.chain.follow(&path);
        return;
    }

    let reach = MAX_SLACK as usize + 1;
    let (target, links) = match trailing {
        Character::B => (
            path.from_start(reach),
            [path.from_start(1), path.from_start(2)],
        ),
        Character::A => (
            path.from_goal(reach),
            [path.from_goal(2), path.from_goal(1)],
        ),
    };
    let Some(to) = target else {
        puzzle.chain.follow(&path);
        return;
    };

    debug!("chain pulled {trailing:?} to tile {}", to.get());
    puzzle.place(trailing, to, out_events);
    puzzle.chain.links = links.map(shown);
    out_events.push(Event::ChainPulled {
        character: trailing,
        to,
    });

    if puzzle.board.terrain(to) == Terrain::Ice {
        puzzle.start_slide(trailing, direction, out_events);
    } else {
        puzzle.end_slide(trailing, out_events);
    }
}

//! Move resolution: decides what one step does, then commits it.
//!
//! Planning inspects the board without touching it so that aborted moves
//! leave the puzzle exactly as it was. Only a committed plan mutates state.

use tether_core::{Character, Direction, Event, MoveOutcome, Occupant, Terrain, TileIndex};

use crate::{board::Board, puzzle::Puzzle};

/// Effect of a single move, decided before anything is mutated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Plan {
    /// Nothing can move.
    Blocked,
    /// A sliding character cannot continue and comes to rest.
    Halt(Character),
    /// A lone character steps onto a free tile.
    Walk { to: TileIndex },
    /// A sliding character continues, optionally dragging B ahead of A.
    Slide {
        character: Character,
        to: TileIndex,
        drag: Option<TileIndex>,
    },
    /// A shoves B one tile further and takes its place.
    PushPartner { to: TileIndex, partner_to: TileIndex },
    /// A shoves a block one tile further and takes its place.
    PushBlock { to: TileIndex, block_to: TileIndex },
    /// A pushes B into water and both share the tile.
    Merge { at: TileIndex },
    /// The merged pair moves; A leads and B stays on the vacated tile.
    Split {
        to: TileIndex,
        block_to: Option<TileIndex>,
    },
    /// A pushes B while B stands on the goal.
    Transition,
}

/// Decides the effect of moving whatever stands on `mover` one tile.
pub(crate) fn plan(puzzle: &Puzzle, mover: TileIndex, direction: Direction) -> Plan {
    match puzzle.board.occupant(mover) {
        Occupant::PlayerA if puzzle.ice.get(Character::A).is_active() => {
            plan_slide(puzzle, Character::A, direction)
        }
        Occupant::PlayerA => plan_lead(puzzle, direction),
        Occupant::PlayerB => {
            debug_assert!(
                puzzle.ice.get(Character::B).is_active(),
                "B only moves on its own while sliding"
            );
            plan_slide(puzzle, Character::B, direction)
        }
        Occupant::PlayerBoth => plan_pair(puzzle, direction),
        other => {
            debug_assert!(false, "tile {} holds {other:?}, not a player", mover.get());
            Plan::Blocked
        }
    }
}

fn plan_lead(puzzle: &Puzzle, direction: Direction) -> Plan {
    let board = &puzzle.board;
    let Some(to) = board.step(puzzle.position(Character::A), direction) else {
        return Plan::Blocked;
    };
    let destination = board.tile(to);

    match (destination.occupant, destination.terrain) {
        (Occupant::PlayerB, Terrain::Water) => Plan::Merge { at: to },
        (Occupant::PlayerB, Terrain::Goal) => Plan::Transition,
        (Occupant::PlayerB, Terrain::Ice) => Plan::Blocked,
        (Occupant::PlayerB, _) => match partner_target(board, to, direction) {
            Some(partner_to) => Plan::PushPartner { to, partner_to },
            None => Plan::Blocked,
        },
        (Occupant::Block, _) => match block_target(board, to, direction) {
            Some(block_to) => Plan::PushBlock { to, block_to },
            None => Plan::Blocked,
        },
        _ => Plan::Walk { to },
    }
}

fn plan_slide(puzzle: &Puzzle, character: Character, direction: Direction) -> Plan {
    let board = &puzzle.board;
    let Some(to) = board.step(puzzle.position(character), direction) else {
        return Plan::Halt(character);
    };

    let occupant = board.occupant(to);
    if occupant == Occupant::Block {
        return Plan::Halt(character);
    }
    if !occupant.holds(character.partner()) {
        return Plan::Slide {
            character,
            to,
            drag: None,
        };
    }

    match (character, partner_target(board, to, direction)) {
        (Character::A, Some(drag)) => Plan::Slide {
            character,
            to,
            drag: Some(drag),
        },
        _ => Plan::Halt(character),
    }
}

fn plan_pair(puzzle: &Puzzle, direction: Direction) -> Plan {
    let board = &puzzle.board;
    let Some(to) = board.step(puzzle.position(Character::A), direction) else {
        return Plan::Blocked;
    };

    if board.occupant(to) != Occupant::Block {
        return Plan::Split { to, block_to: None };
    }
    match block_target(board, to, direction) {
        Some(block_to) => Plan::Split {
            to,
            block_to: Some(block_to),
        },
        None => Plan::Blocked,
    }
}

/// Tile B lands on when shoved out of `from`.
fn partner_target(board: &Board, from: TileIndex, direction: Direction) -> Option<TileIndex> {
    board
        .step(from, direction)
        .filter(|to| board.occupant(*to) != Occupant::Block)
}

/// Tile a block lands on when shoved out of `from`; blocks need a free tile.
fn block_target(board: &Board, from: TileIndex, direction: Direction) -> Option<TileIndex> {
    board
        .step(from, direction)
        .filter(|to| board.occupant(*to) == Occupant::Empty)
}

/// Applies a plan to the puzzle and reports the outcome.
///
/// `Transition` is reported but not applied; loading levels is the world's
/// job. A lone A ending a non-slide move on ice starts sliding.
pub(crate) fn commit(
    puzzle: &mut Puzzle,
    plan: Plan,
    direction: Direction,
    out_events: &mut Vec<Event>,
) -> MoveOutcome {
    let outcome = match plan {
        Plan::Blocked => return MoveOutcome::NoOp,
        Plan::Transition => return MoveOutcome::Transition,
        Plan::Halt(character) => {
            puzzle.end_slide(character, out_events);
            return MoveOutcome::NoOp;
        }
        Plan::Slide {
            character,
            to,
            drag,
        } => {
            if let Some(partner_to) = drag {
                puzzle.place(Character::B, partner_to, out_events);
            }
            puzzle.place(character, to, out_events);
            if puzzle.board.terrain(to) == Terrain::Ice {
                puzzle.ice.refresh(character);
            } else {
                puzzle.end_slide(character, out_events);
            }
            return if drag.is_some() {
                MoveOutcome::Push
            } else {
                MoveOutcome::Move
            };
        }
        Plan::Walk { to } => {
            puzzle.place(Character::A, to, out_events);
            MoveOutcome::Move
        }
        Plan::PushPartner { to, partner_to } => {
            puzzle.place(Character::B, partner_to, out_events);
            puzzle.place(Character::A, to, out_events);
            MoveOutcome::Push
        }
        Plan::PushBlock { to, block_to } => {
            puzzle.shove_block(to, block_to, out_events);
            puzzle.place(Character::A, to, out_events);
            MoveOutcome::Push
        }
        Plan::Merge { at } => {
            puzzle.merge(at);
            return MoveOutcome::Merge;
        }
        Plan::Split { to, block_to } => {
            if let Some(block_to) = block_to {
                puzzle.shove_block(to, block_to, out_events);
            }
            puzzle.split(to, out_events);
            MoveOutcome::Split
        }
    };

    let landed = puzzle.position(Character::A);
    if puzzle.board.terrain(landed) == Terrain::Ice {
        puzzle.start_slide(Character::A, direction, out_events);
    }
    outcome
}

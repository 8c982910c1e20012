#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative puzzle state for Tether.
//!
//! The world owns the campaign, the board of the active level and every piece
//! of derived state (chain links, slide timers, score). Adapters and systems
//! change it only through [`apply`] and observe it through [`query`].

mod board;
mod chain;
mod ice;
mod level;
mod navigation;
mod puzzle;
mod resolver;

use log::{debug, info, warn};
use tether_core::{Character, Command, Direction, Event, LevelId, MoveOutcome, Occupant, TileIndex};

pub use board::Board;
pub use level::{Campaign, ConfigurationError, Level};
pub use navigation::{shortest_path, ShortestPath};

use puzzle::Puzzle;

/// Represents the authoritative Tether world state.
#[derive(Clone, Debug)]
pub struct World {
    campaign: Campaign,
    level: LevelId,
    puzzle: Puzzle,
}

impl World {
    /// Creates a world with the first level of the campaign loaded.
    #[must_use]
    pub fn new(campaign: Campaign) -> Self {
        let level = LevelId::new(0);
        let puzzle = Puzzle::from_level(campaign.first());
        info!("loaded level 0 `{}`", campaign.first().name());
        Self {
            campaign,
            level,
            puzzle,
        }
    }

    fn load(&mut self, level: LevelId, out_events: &mut Vec<Event>) -> bool {
        let Some(layout) = self.campaign.level(level) else {
            return false;
        };
        self.puzzle = Puzzle::from_level(layout);
        self.level = level;
        info!("loaded level {} `{}`", level.get(), layout.name());
        out_events.push(Event::LevelLoaded {
            level,
            collectables: layout.collectables(),
        });
        true
    }

    fn resolve(&mut self, mover: TileIndex, direction: Direction, out_events: &mut Vec<Event>) {
        let occupant = self.puzzle.board.occupant(mover);
        let plan = resolver::plan(&self.puzzle, mover, direction);
        let mut outcome = resolver::commit(&mut self.puzzle, plan, direction, out_events);

        if !matches!(outcome, MoveOutcome::NoOp | MoveOutcome::Transition) {
            let trailing = if occupant == Occupant::PlayerB {
                Character::A
            } else {
                Character::B
            };
            chain::settle(&mut self.puzzle, trailing, direction, out_events);

            if self.puzzle.drowned() {
                outcome = MoveOutcome::Reload;
            }
        }

        debug!("{occupant:?} moved {direction:?}: {outcome:?}");
        out_events.push(Event::MoveResolved {
            mover: occupant,
            direction,
            outcome,
        });

        match outcome {
            MoveOutcome::Transition => self.complete_level(out_events),
            MoveOutcome::Reload => {
                info!("drowned on level {}", self.level.get());
                out_events.push(Event::Drowned { level: self.level });
                let _ = self.load(self.level, out_events);
            }
            _ => {}
        }
    }

    fn complete_level(&mut self, out_events: &mut Vec<Event>) {
        info!("completed level {}", self.level.get());
        out_events.push(Event::LevelCompleted { level: self.level });
        if !self.load(self.level.next(), out_events) {
            info!("campaign completed");
            out_events.push(Event::CampaignCompleted);
        }
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::LoadLevel { level } => {
            if !world.load(level, out_events) {
                warn!(
                    "level {} requested but the campaign holds {}",
                    level.get(),
                    world.campaign.len()
                );
                out_events.push(Event::LevelUnavailable { level });
            }
        }
        Command::Step { direction } => {
            if world.puzzle.ice.any_active() {
                out_events.push(Event::StepIgnored { direction });
                return;
            }
            let mover = world.puzzle.position(Character::A);
            world.resolve(mover, direction, out_events);
        }
        Command::Tick { dt } => {
            world.puzzle.ice.elapse(dt);
            out_events.push(Event::TimeAdvanced { dt });
        }
        Command::Slide { character } => {
            let state = world.puzzle.ice.get(character);
            let Some(direction) = state.direction().filter(|_| state.ready()) else {
                return;
            };
            let mover = world.puzzle.position(character);
            world.resolve(mover, direction, out_events);
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use tether_core::{Character, ChainLink, IceView, LevelId, Score, Snapshot, TileIndex};

    use super::{Board, ShortestPath, World};

    /// Identifier of the level currently loaded.
    #[must_use]
    pub fn level(world: &World) -> LevelId {
        world.level
    }

    /// Name of the level currently loaded.
    #[must_use]
    pub fn level_name(world: &World) -> &str {
        world
            .campaign
            .level(world.level)
            .map_or("", |level| level.name())
    }

    /// Number of levels in the campaign.
    #[must_use]
    pub fn level_count(world: &World) -> usize {
        world.campaign.len()
    }

    /// Provides read-only access to the live board.
    #[must_use]
    pub fn board(world: &World) -> &Board {
        &world.puzzle.board
    }

    /// Tiles held by A and B, in that order.
    #[must_use]
    pub fn players(world: &World) -> (TileIndex, TileIndex) {
        (
            world.puzzle.position(Character::A),
            world.puzzle.position(Character::B),
        )
    }

    /// Chain link slots as of the latest resolution.
    #[must_use]
    pub fn chain(world: &World) -> [ChainLink; 2] {
        world.puzzle.chain.links()
    }

    /// Collection progress on the active level.
    #[must_use]
    pub fn score(world: &World) -> Score {
        world.puzzle.score()
    }

    /// Captures the slide state of both characters, B first.
    #[must_use]
    pub fn ice_view(world: &World) -> IceView {
        IceView::from_snapshots(world.puzzle.ice.snapshots())
    }

    /// Shortest walk from A to B on the live board.
    #[must_use]
    pub fn shortest_path(world: &World) -> ShortestPath {
        world.puzzle.path_between()
    }

    /// Captures everything a renderer needs to present the current state.
    #[must_use]
    pub fn snapshot(world: &World) -> Snapshot {
        let (player_a, player_b) = players(world);
        Snapshot {
            level: world.level,
            tiles: world.puzzle.board.tiles().to_vec(),
            player_a,
            player_b,
            chain: chain(world),
            score: score(world),
        }
    }
}

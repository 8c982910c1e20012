use std::time::Duration;

use log::{debug, warn};
use tether_core::{Command, Direction, Event, LevelId, Snapshot, SLIDE_INTERVAL, TILE_COUNT};
use tether_system_ice_slide::IceSlide;
use tether_world::{self as world, query, World};

/// Frame loop driving the world and its systems.
#[derive(Debug)]
pub(crate) struct Session {
    world: World,
    ice_slide: IceSlide,
    frame: Duration,
    campaign_completed: bool,
}

impl Session {
    pub(crate) fn new(world: World, frame: Duration) -> Self {
        Self {
            world,
            ice_slide: IceSlide,
            frame,
            campaign_completed: false,
        }
    }

    pub(crate) fn world(&self) -> &World {
        &self.world
    }

    pub(crate) fn campaign_completed(&self) -> bool {
        self.campaign_completed
    }

    /// Selects a level of the campaign.
    pub(crate) fn load(&mut self, level: LevelId) -> Vec<Event> {
        self.submit(Command::LoadLevel { level })
    }

    /// Forwards one directional input to character A.
    pub(crate) fn step(&mut self, direction: Direction) -> Vec<Event> {
        self.submit(Command::Step { direction })
    }

    /// Simulates one frame: advances the clock and lets systems react.
    pub(crate) fn advance(&mut self) -> Vec<Event> {
        let mut events = self.submit(Command::Tick { dt: self.frame });

        let mut commands = Vec::new();
        self.ice_slide
            .handle(&events, &query::ice_view(&self.world), &mut commands);
        for command in commands {
            events.extend(self.submit(command));
        }
        events
    }

    /// Advances frames until no character is sliding.
    pub(crate) fn settle(&mut self) -> Vec<Event> {
        let mut events = Vec::new();
        let limit = self.settle_limit();
        for _ in 0..limit {
            if !query::ice_view(&self.world).any_active() {
                return events;
            }
            events.extend(self.advance());
        }
        warn!("slides still running after {limit} frames");
        events
    }

    pub(crate) fn snapshot(&self) -> Snapshot {
        query::snapshot(&self.world)
    }

    fn submit(&mut self, command: Command) -> Vec<Event> {
        let mut events = Vec::new();
        world::apply(&mut self.world, command, &mut events);
        for event in &events {
            debug!("{event:?}");
            if *event == Event::CampaignCompleted {
                self.campaign_completed = true;
            }
        }
        events
    }

    /// Upper bound on the frames `settle` runs before giving up.
    fn settle_limit(&self) -> u128 {
        let frame = self.frame.as_millis().max(1);
        let frames_per_step = SLIDE_INTERVAL.as_millis().div_ceil(frame) + 1;
        frames_per_step * TILE_COUNT as u128 * 4
    }
}

use std::time::Duration;

use tether_core::{
    Character, Command, Direction, Event, IceSnapshot, IceView, TileIndex, SLIDE_INTERVAL,
};
use tether_system_ice_slide::IceSlide;
use tether_world::{self as world, query, Campaign, Level, World};

const ICE_RUN: &str = "........\n\
                       ........\n\
                       ........\n\
                       ........\n\
                       ........\n\
                       ........\n\
                       ........\n\
                       A++B....\n";

fn world() -> World {
    let level = Level::parse("ice run", ICE_RUN).expect("valid level");
    World::new(Campaign::new(vec![level]).expect("campaign"))
}

fn pump(world: &mut World, system: &mut IceSlide, dt: Duration) {
    let mut events = Vec::new();
    world::apply(world, Command::Tick { dt }, &mut events);

    let mut commands = Vec::new();
    system.handle(&events, &query::ice_view(world), &mut commands);
    for command in commands {
        world::apply(world, command, &mut events);
    }
}

#[test]
fn nothing_happens_without_elapsed_time() {
    let view = IceView::from_snapshots(vec![IceSnapshot {
        character: Character::A,
        direction: Some(Direction::Left),
        remaining: Duration::ZERO,
    }]);
    let mut commands = Vec::new();

    IceSlide.handle(&[], &view, &mut commands);

    assert!(commands.is_empty());
}

#[test]
fn expired_timers_become_slide_commands_b_first() {
    let view = IceView::from_snapshots(vec![
        IceSnapshot {
            character: Character::B,
            direction: Some(Direction::Up),
            remaining: Duration::ZERO,
        },
        IceSnapshot {
            character: Character::A,
            direction: Some(Direction::Up),
            remaining: Duration::ZERO,
        },
    ]);
    let mut commands = Vec::new();

    IceSlide.handle(
        &[Event::TimeAdvanced {
            dt: Duration::from_millis(16),
        }],
        &view,
        &mut commands,
    );

    assert_eq!(
        commands,
        vec![
            Command::Slide {
                character: Character::B
            },
            Command::Slide {
                character: Character::A
            },
        ]
    );
}

#[test]
fn running_timers_and_idle_characters_are_skipped() {
    let view = IceView::from_snapshots(vec![
        IceSnapshot {
            character: Character::B,
            direction: None,
            remaining: Duration::ZERO,
        },
        IceSnapshot {
            character: Character::A,
            direction: Some(Direction::Right),
            remaining: Duration::from_millis(120),
        },
    ]);
    let mut commands = Vec::new();

    IceSlide.handle(
        &[Event::TimeAdvanced {
            dt: Duration::from_millis(16),
        }],
        &view,
        &mut commands,
    );

    assert!(commands.is_empty());
}

#[test]
fn slide_advances_one_tile_per_interval() {
    let mut world = world();
    let mut system = IceSlide;
    let mut events = Vec::new();
    world::apply(
        &mut world,
        Command::Step {
            direction: Direction::Right,
        },
        &mut events,
    );
    let tile = |value| TileIndex::new(value).expect("index on board");
    assert_eq!(query::players(&world).0, tile(1));

    pump(&mut world, &mut system, SLIDE_INTERVAL / 2);
    assert_eq!(query::players(&world).0, tile(1));

    pump(&mut world, &mut system, SLIDE_INTERVAL / 2);
    assert_eq!(query::players(&world).0, tile(2));

    pump(&mut world, &mut system, SLIDE_INTERVAL);
    assert_eq!(query::players(&world), (tile(3), tile(4)));
    assert!(!query::ice_view(&world).any_active());
}

#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that keeps characters moving across ice.

use tether_core::{Command, Event, IceView};

/// Emits a slide command for every character whose slide timer expired.
///
/// The world counts timers down on each tick; this system only reacts once
/// time has advanced and forwards expired timers in resolution order.
#[derive(Debug, Default)]
pub struct IceSlide;

impl IceSlide {
    /// Consumes world events and the ice view to emit slide commands.
    pub fn handle(&mut self, events: &[Event], ice_view: &IceView, out: &mut Vec<Command>) {
        if !events
            .iter()
            .any(|event| matches!(event, Event::TimeAdvanced { .. }))
        {
            return;
        }

        out.extend(
            ice_view
                .iter()
                .filter(|snapshot| snapshot.ready_to_slide())
                .map(|snapshot| Command::Slide {
                    character: snapshot.character,
                }),
        );
    }
}

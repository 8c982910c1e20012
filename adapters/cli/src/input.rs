use anyhow::{bail, Result};
use tether_core::Direction;

/// Key that ends an interactive session.
pub(crate) const QUIT_KEY: char = 'q';

/// Maps a key to a direction; accepts `LRUD` in either case and vi keys.
pub(crate) fn direction_for(key: char) -> Option<Direction> {
    match key {
        'L' | 'l' | 'h' => Some(Direction::Left),
        'R' | 'r' => Some(Direction::Right),
        'U' | 'u' | 'k' => Some(Direction::Up),
        'D' | 'd' | 'j' => Some(Direction::Down),
        _ => None,
    }
}

/// Parses a move script, skipping whitespace and commas.
pub(crate) fn parse_script(script: &str) -> Result<Vec<Direction>> {
    let mut moves = Vec::with_capacity(script.len());
    for (position, key) in script.chars().enumerate() {
        if key.is_whitespace() || key == ',' {
            continue;
        }
        let Some(direction) = direction_for(key) else {
            bail!("unknown move `{key}` at position {position} of the script");
        };
        moves.push(direction);
    }
    Ok(moves)
}

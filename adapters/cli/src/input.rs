//! Translation of textual move scripts into session commands.

use anyhow::{bail, Result};
use labyrinth_snake_core::{Command, Direction};

/// Parses a move script into commands.
///
/// `w`, `a`, `s` and `d` (either case) or the arrow glyphs `↑ ← ↓ →` move the
/// snake, `r` resets the session. Whitespace, commas and hyphens separate
/// groups and are skipped.
pub(crate) fn parse_script(script: &str) -> Result<Vec<Command>> {
    let mut commands = Vec::with_capacity(script.len());
    for (position, symbol) in script.chars().enumerate() {
        if symbol.is_whitespace() || matches!(symbol, ',' | '-') {
            continue;
        }

        let command = match symbol {
            'r' | 'R' => Command::Reset,
            other => match direction_for(other) {
                Some(direction) => Command::Move { direction },
                None => bail!("unrecognised move {other:?} at position {position}"),
            },
        };
        commands.push(command);
    }
    Ok(commands)
}

/// Formats directions using the same keys [`parse_script`] accepts.
pub(crate) fn format_moves(directions: &[Direction]) -> String {
    directions.iter().map(|direction| key_for(*direction)).collect()
}

fn direction_for(symbol: char) -> Option<Direction> {
    match symbol {
        'w' | 'W' | '↑' => Some(Direction::Up),
        'd' | 'D' | '→' => Some(Direction::Right),
        's' | 'S' | '↓' => Some(Direction::Down),
        'a' | 'A' | '←' => Some(Direction::Left),
        _ => None,
    }
}

fn key_for(direction: Direction) -> char {
    match direction {
        Direction::Up => 'w',
        Direction::Right => 'd',
        Direction::Down => 's',
        Direction::Left => 'a',
    }
}

#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative play-session state for Labyrinth Snake.
//!
//! A [`Session`] borrows one immutable level and tracks the snake's path,
//! facing, remaining moves and status. Illegal input is absorbed silently:
//! moves into walls, off the grid, or after the session ended leave the state
//! untouched and broadcast nothing.

use labyrinth_snake_core::{CellCoord, Command, Direction, Event, Level, SessionStatus};

/// Direction the snake faces when a session starts or resets.
pub const INITIAL_FACING: Direction = Direction::Right;

/// Result of attempting a single move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MoveOutcome {
    /// The session already ended; nothing changed.
    Ignored,
    /// The target cell is a wall or outside the grid; nothing changed.
    Blocked,
    /// The snake advanced and the session continues.
    Advanced,
    /// The snake advanced onto the exit.
    Won,
    /// The snake advanced and exhausted the move budget.
    Lost,
}

impl MoveOutcome {
    /// Reports whether the move was accepted and consumed budget.
    #[must_use]
    pub const fn is_accepted(self) -> bool {
        matches!(self, Self::Advanced | Self::Won | Self::Lost)
    }
}

/// Represents one attempt at a single level.
#[derive(Clone, Debug)]
pub struct Session<'level> {
    level: &'level Level,
    path: Vec<CellCoord>,
    facing: Direction,
    moves_remaining: u32,
    status: SessionStatus,
}

impl<'level> Session<'level> {
    /// Starts a session at the level's entry with the full move budget.
    #[must_use]
    pub fn new(level: &'level Level) -> Self {
        Self {
            level,
            path: vec![level.entry()],
            facing: INITIAL_FACING,
            moves_remaining: level.move_budget(),
            status: SessionStatus::InProgress,
        }
    }

    /// Level the session is bound to.
    #[must_use]
    pub fn level(&self) -> &'level Level {
        self.level
    }

    /// Attempts to advance the snake one cell in `direction`.
    pub fn apply_move(&mut self, direction: Direction) -> MoveOutcome {
        if self.status.is_terminal() {
            return MoveOutcome::Ignored;
        }

        let head = self.head();
        let Some(candidate) = head.step(direction) else {
            return MoveOutcome::Blocked;
        };
        if !self.level.grid().is_open(candidate) {
            return MoveOutcome::Blocked;
        }

        self.facing = direction;
        self.path.push(candidate);
        self.moves_remaining = self.moves_remaining.saturating_sub(1);

        // The exit always wins, even on the move that spends the last of the budget.
        if candidate == self.level.exit() {
            self.status = SessionStatus::Won;
            return MoveOutcome::Won;
        }

        if self.moves_remaining == 0 {
            self.status = SessionStatus::Lost;
            return MoveOutcome::Lost;
        }

        MoveOutcome::Advanced
    }

    /// Returns the session to its initial state for the same level.
    pub fn reset(&mut self) {
        self.path.clear();
        self.path.push(self.level.entry());
        self.facing = INITIAL_FACING;
        self.moves_remaining = self.level.move_budget();
        self.status = SessionStatus::InProgress;
    }

    fn head(&self) -> CellCoord {
        self.path.last().copied().unwrap_or_else(|| self.level.entry())
    }
}

/// Applies the provided command to the session, broadcasting resulting events.
pub fn apply(session: &mut Session<'_>, command: Command, out_events: &mut Vec<Event>) {
    let level = session.level.id();
    match command {
        Command::Move { direction } => {
            let from = session.head();
            let outcome = session.apply_move(direction);
            if !outcome.is_accepted() {
                tracing::trace!(level = level.get(), ?direction, ?outcome, "move absorbed");
                return;
            }

            out_events.push(Event::ActorAdvanced {
                from,
                to: session.head(),
                direction,
                moves_remaining: session.moves_remaining,
            });

            match outcome {
                MoveOutcome::Won => {
                    let moves_used = session.level.move_budget() - session.moves_remaining;
                    tracing::debug!(level = level.get(), moves_used, "level won");
                    out_events.push(Event::LevelWon { level, moves_used });
                }
                MoveOutcome::Lost => {
                    tracing::debug!(level = level.get(), "level lost");
                    out_events.push(Event::LevelLost { level });
                }
                MoveOutcome::Advanced | MoveOutcome::Blocked | MoveOutcome::Ignored => {}
            }
        }
        Command::Reset => {
            session.reset();
            out_events.push(Event::SessionReset { level });
        }
    }
}

/// Query functions that provide read-only access to the session state.
pub mod query {
    use labyrinth_snake_core::{CellCoord, Direction, SessionStatus};

    use super::Session;

    /// Full trajectory from the entry cell to the current head.
    #[must_use]
    pub fn path<'session>(session: &'session Session<'_>) -> &'session [CellCoord] {
        &session.path
    }

    /// Cell currently occupied by the snake head.
    #[must_use]
    pub fn head(session: &Session<'_>) -> CellCoord {
        session.head()
    }

    /// Direction of the most recent accepted move.
    #[must_use]
    pub fn facing(session: &Session<'_>) -> Direction {
        session.facing
    }

    /// Moves left in the budget.
    #[must_use]
    pub fn moves_remaining(session: &Session<'_>) -> u32 {
        session.moves_remaining
    }

    /// Moves spent since the session started or was last reset.
    #[must_use]
    pub fn moves_used(session: &Session<'_>) -> u32 {
        session.level.move_budget() - session.moves_remaining
    }

    /// Lifecycle state of the session.
    #[must_use]
    pub fn status(session: &Session<'_>) -> SessionStatus {
        session.status
    }
}

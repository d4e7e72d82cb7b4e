#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative game state for Maze Chase.
//!
//! A [`GameSession`] owns the maze, the player and every adversary. Adapters
//! feed it one direction per tick through [`GameSession::advance`] and read
//! the outcome from the returned [`TickResult`] or the [`query`] functions.

mod adversary;
mod grid;
mod level;
mod movement;
mod player;

use maze_chase_core::{AdversaryId, Direction, Event, SessionError, SessionState, TickResult};
use tracing::{debug, info};

pub use adversary::{Adversary, DirectionSource, RandomWalk, ScriptedDirections};
pub use grid::Grid;
pub use level::{Level, CLASSIC_ADVERSARY_STARTS, CLASSIC_MAZE, CLASSIC_PLAYER_START};
pub use movement::attempt_move;
pub use player::Player;

/// Complete state of a single game.
#[derive(Debug)]
pub struct GameSession {
    grid: Grid,
    player: Player,
    adversaries: Vec<Adversary>,
    score: u32,
    state: SessionState,
    tick_index: u64,
}

impl GameSession {
    /// Creates a session from a level, asking `source_for` for the direction
    /// source of each adversary.
    ///
    /// Adversaries receive identifiers in the order of the level's start
    /// cells and are always stepped in that order.
    pub fn new<F>(level: Level, mut source_for: F) -> Self
    where
        F: FnMut(AdversaryId) -> Box<dyn DirectionSource>,
    {
        let (grid, player_start, adversary_starts) = level.into_parts();
        let adversaries = adversary_starts
            .into_iter()
            .zip(0_u32..)
            .map(|(cell, index)| {
                let id = AdversaryId::new(index);
                Adversary::new(id, cell, source_for(id))
            })
            .collect();

        Self {
            grid,
            player: Player::new(player_start),
            adversaries,
            score: 0,
            state: SessionState::Running,
            tick_index: 0,
        }
    }

    /// Creates a session whose adversaries walk randomly, each on its own
    /// stream derived from `seed`.
    #[must_use]
    pub fn seeded(level: Level, seed: u64) -> Self {
        Self::new(level, |id| Box::new(RandomWalk::seeded(seed, id)))
    }

    /// Advances the session by one tick.
    ///
    /// The player moves first, then every adversary in identifier order.
    /// Sharing a cell with an adversary ends the game as lost before any
    /// pickup is counted; otherwise the pickup under the player is consumed
    /// and the game is won once the maze is clear. Ticking a finished session
    /// fails with [`SessionError::Finished`] and changes nothing.
    pub fn advance(&mut self, input: Option<Direction>) -> Result<TickResult, SessionError> {
        if self.state.is_terminal() {
            return Err(SessionError::Finished { state: self.state });
        }

        self.tick_index = self.tick_index.saturating_add(1);
        let mut events = Vec::new();

        let from = self.player.cell();
        let to = self.player.handle_input(&self.grid, input)?;
        if from != to {
            events.push(Event::PlayerMoved { from, to });
        } else if let Some(direction) = input {
            events.push(Event::PlayerBlocked {
                cell: from,
                direction,
            });
        }

        for adversary in &mut self.adversaries {
            let from = adversary.cell();
            let to = adversary.step(&self.grid)?;
            if from != to {
                events.push(Event::AdversaryMoved {
                    id: adversary.id(),
                    from,
                    to,
                });
            }
        }

        let player_cell = self.player.cell();
        if let Some(catcher) = self
            .adversaries
            .iter()
            .find(|adversary| adversary.cell() == player_cell)
        {
            self.state = SessionState::Lost;
            events.push(Event::PlayerCaught {
                id: catcher.id(),
                cell: player_cell,
            });
            info!(
                tick = self.tick_index,
                adversary = catcher.id().get(),
                score = self.score,
                "player caught"
            );
        } else {
            if self.grid.has_pickup(player_cell)? {
                self.grid.consume_pickup(player_cell)?;
                self.score = self.score.saturating_add(1);
                events.push(Event::PickupConsumed {
                    cell: player_cell,
                    score: self.score,
                });
            }

            if !self.grid.any_pickups_remaining() {
                self.state = SessionState::Won;
                events.push(Event::PickupsCleared);
                info!(tick = self.tick_index, score = self.score, "maze cleared");
            }
        }

        debug!(
            tick = self.tick_index,
            state = ?self.state,
            score = self.score,
            column = player_cell.column(),
            row = player_cell.row(),
            "advanced session"
        );

        Ok(self.tick_result(events))
    }

    fn tick_result(&self, events: Vec<Event>) -> TickResult {
        TickResult {
            tick: self.tick_index,
            state: self.state,
            score: self.score,
            player: self.player.cell(),
            adversaries: query::adversaries(self),
            events,
        }
    }
}

/// Query functions that provide read-only access to the session state.
pub mod query {
    use maze_chase_core::{
        AdversarySnapshot, CellCoord, CellKind, GridError, SessionState, TickResult,
    };

    use super::{GameSession, Grid};

    /// Provides read-only access to the maze.
    #[must_use]
    pub fn grid(session: &GameSession) -> &Grid {
        &session.grid
    }

    /// Kind of the cell at the provided position.
    pub fn cell_kind(session: &GameSession, cell: CellCoord) -> Result<CellKind, GridError> {
        session.grid.cell(cell)
    }

    /// Cell currently occupied by the player.
    #[must_use]
    pub fn player_cell(session: &GameSession) -> CellCoord {
        session.player.cell()
    }

    /// Captures the adversaries in identifier order.
    #[must_use]
    pub fn adversaries(session: &GameSession) -> Vec<AdversarySnapshot> {
        session
            .adversaries
            .iter()
            .map(|adversary| AdversarySnapshot {
                id: adversary.id(),
                cell: adversary.cell(),
            })
            .collect()
    }

    /// Current score.
    #[must_use]
    pub fn score(session: &GameSession) -> u32 {
        session.score
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(session: &GameSession) -> SessionState {
        session.state
    }

    /// Number of ticks processed so far.
    #[must_use]
    pub fn tick_index(session: &GameSession) -> u64 {
        session.tick_index
    }

    /// Captures the current state in the same shape [`GameSession::advance`]
    /// reports, without events.
    #[must_use]
    pub fn snapshot(session: &GameSession) -> TickResult {
        session.tick_result(Vec::new())
    }
}

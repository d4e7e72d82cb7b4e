//! End-of-game summary printed by the command-line driver.

use anyhow::Result;
use maze_chase_core::{AdversarySnapshot, CellCoord, SessionState};
use maze_chase_world::{query, GameSession};
use serde::Serialize;

/// Final state of a session in a form suitable for text or JSON output.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub(crate) struct GameReport {
    /// Seed the adversaries were created with.
    pub(crate) seed: u64,
    /// Number of ticks the session processed.
    pub(crate) ticks: u64,
    /// Session state when the driver stopped.
    pub(crate) state: SessionState,
    /// Pickups consumed.
    pub(crate) score: u32,
    /// Pickups still on the grid.
    pub(crate) pickups_remaining: usize,
    /// Final player cell.
    pub(crate) player: CellCoord,
    /// Final adversary cells.
    pub(crate) adversaries: Vec<AdversarySnapshot>,
}

impl GameReport {
    /// Captures the current state of the session.
    pub(crate) fn from_session(seed: u64, session: &GameSession) -> Self {
        Self {
            seed,
            ticks: query::tick_index(session),
            state: query::state(session),
            score: query::score(session),
            pickups_remaining: query::grid(session).pickups_remaining(),
            player: query::player_cell(session),
            adversaries: query::adversaries(session),
        }
    }

    /// Renders the report as the lines printed when the game ends.
    pub(crate) fn to_text(&self) -> String {
        match self.state.announcement() {
            Some(announcement) => format!("{announcement}\nFinal Score: {}", self.score),
            None => format!("Final Score: {}", self.score),
        }
    }

    /// Renders the report as pretty-printed JSON.
    pub(crate) fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maze_chase_world::Level;

    fn report(state: SessionState, score: u32) -> GameReport {
        GameReport {
            seed: 3,
            ticks: 12,
            state,
            score,
            pickups_remaining: 4,
            player: CellCoord::new(1, 1),
            adversaries: Vec::new(),
        }
    }

    #[test]
    fn text_announces_terminal_states() {
        assert_eq!(
            report(SessionState::Lost, 5).to_text(),
            "Game Over!\nFinal Score: 5"
        );
        assert_eq!(
            report(SessionState::Won, 9).to_text(),
            "You Win!\nFinal Score: 9"
        );
        assert_eq!(report(SessionState::Running, 2).to_text(), "Final Score: 2");
    }

    #[test]
    fn json_carries_every_field() {
        let json = report(SessionState::Won, 9).to_json().expect("serializes");
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");

        assert_eq!(value["seed"], 3);
        assert_eq!(value["ticks"], 12);
        assert_eq!(value["state"], "Won");
        assert_eq!(value["score"], 9);
        assert_eq!(value["pickups_remaining"], 4);
        assert_eq!(value["player"]["column"], 1);
    }

    #[test]
    fn fresh_session_reports_start_positions() {
        let level = Level::classic().expect("classic level");
        let pickups = level.grid().pickups_remaining();
        let session = GameSession::seeded(level, 11);

        let report = GameReport::from_session(11, &session);

        assert_eq!(report.ticks, 0);
        assert_eq!(report.score, 0);
        assert_eq!(report.state, SessionState::Running);
        assert_eq!(report.pickups_remaining, pickups);
        assert_eq!(report.adversaries.len(), 2);
    }
}

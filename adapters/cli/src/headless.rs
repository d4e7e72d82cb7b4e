//! Windowless driver replaying a scripted sequence of inputs.

use anyhow::{bail, Result};
use maze_chase_core::{Direction, SessionError};
use maze_chase_world::{query, GameSession};
use tracing::{debug, info};

/// Parses a move script of `U`, `D`, `L`, `R` letters with `.` for no input.
///
/// Whitespace is ignored and letters are case-insensitive.
pub(crate) fn parse_moves(script: &str) -> Result<Vec<Option<Direction>>> {
    script
        .chars()
        .filter(|letter| !letter.is_whitespace())
        .enumerate()
        .map(|(index, letter)| match letter {
            '.' => Ok(None),
            _ => match Direction::from_letter(letter) {
                Some(direction) => Ok(Some(direction)),
                None => bail!("unknown move {letter:?} at position {index}"),
            },
        })
        .collect()
}

/// Advances `session` once per scripted input until `max_ticks` ticks have
/// run or the session ends.
///
/// Ticks beyond the end of the script receive no input.
pub(crate) fn run(
    session: &mut GameSession,
    moves: &[Option<Direction>],
    max_ticks: u64,
) -> Result<()> {
    let mut inputs = moves.iter().copied();
    for _ in 0..max_ticks {
        let input = inputs.next().flatten();
        match session.advance(input) {
            Ok(result) => {
                debug!(tick = result.tick, ?input, "scripted tick");
                if result.state.is_terminal() {
                    break;
                }
            }
            Err(SessionError::Finished { state }) => {
                info!(?state, "session already finished");
                break;
            }
            Err(error) => return Err(error.into()),
        }
    }

    info!(
        ticks = query::tick_index(session),
        score = query::score(session),
        state = ?query::state(session),
        "headless run complete"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use maze_chase_core::{CellCoord, SessionState};
    use maze_chase_world::{Level, ScriptedDirections};

    fn corridor_session() -> GameSession {
        let rows = ["######", "#  ..#", "######"];
        let level = Level::parse(&rows, CellCoord::new(1, 1), Vec::new()).expect("valid level");
        GameSession::new(level, |_| {
            Box::new(ScriptedDirections::new(vec![Direction::Left]).expect("non-empty script"))
        })
    }

    #[test]
    fn parses_letters_and_idle_ticks() {
        let moves = parse_moves("Rr. d\nU").expect("valid script");

        assert_eq!(
            moves,
            vec![
                Some(Direction::Right),
                Some(Direction::Right),
                None,
                Some(Direction::Down),
                Some(Direction::Up),
            ]
        );
    }

    #[test]
    fn rejects_unknown_letters() {
        assert!(parse_moves("RRX").is_err());
    }

    #[test]
    fn stops_when_the_session_ends() {
        let mut session = corridor_session();
        let moves = parse_moves("RRRRRRRR").expect("valid script");

        run(&mut session, &moves, 100).expect("run succeeds");

        assert_eq!(query::state(&session), SessionState::Won);
        assert_eq!(query::score(&session), 2);
        assert_eq!(query::tick_index(&session), 3);
    }

    #[test]
    fn idles_after_the_script_runs_out() {
        let mut session = corridor_session();
        let moves = parse_moves("R").expect("valid script");

        run(&mut session, &moves, 5).expect("run succeeds");

        assert_eq!(query::tick_index(&session), 5);
        assert_eq!(query::player_cell(&session), CellCoord::new(2, 1));
        assert_eq!(query::state(&session), SessionState::Running);
    }
}

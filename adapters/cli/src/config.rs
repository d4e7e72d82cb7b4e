//! Optional TOML configuration merged with command-line overrides.

use std::{fs, path::Path};

use anyhow::{ensure, Context, Result};
use maze_chase_core::CellCoord;
use maze_chase_world::Level;
use serde::Deserialize;

/// Ticks per second used when neither the file nor the command line sets one.
pub(crate) const DEFAULT_TICK_RATE: f32 = 10.0;

/// Contents of a configuration file. Every field is optional.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct GameConfig {
    /// Seed for the adversaries' random walks.
    #[serde(default)]
    pub(crate) seed: Option<u64>,
    /// Simulation ticks per second in windowed mode.
    #[serde(default)]
    pub(crate) tick_rate: Option<f32>,
    /// Custom level replacing the classic maze.
    #[serde(default)]
    pub(crate) level: Option<LevelConfig>,
}

/// Level table of the configuration file.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct LevelConfig {
    /// Maze rows using `#`, `.` and space glyphs.
    pub(crate) maze: Vec<String>,
    /// Player start cell.
    pub(crate) player: CellCoord,
    /// Adversary start cells; identifiers follow this order.
    #[serde(default)]
    pub(crate) adversaries: Vec<CellCoord>,
}

impl GameConfig {
    /// Reads and parses a configuration file.
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::parse(&content)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }

    fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Applies command-line overrides and fills in defaults.
    ///
    /// `fallback_seed` is only consulted when neither source names a seed.
    pub(crate) fn resolve<S>(
        self,
        seed: Option<u64>,
        tick_rate: Option<f32>,
        fallback_seed: S,
    ) -> Result<Settings>
    where
        S: FnOnce() -> u64,
    {
        let tick_rate = tick_rate.or(self.tick_rate).unwrap_or(DEFAULT_TICK_RATE);
        ensure!(
            tick_rate.is_finite() && tick_rate > 0.0,
            "tick rate must be a positive number (received {tick_rate})"
        );

        let level = match self.level {
            Some(level) => Level::parse(level.maze.as_slice(), level.player, level.adversaries)
                .context("invalid level in config file")?,
            None => Level::classic().context("built-in level failed validation")?,
        };

        Ok(Settings {
            seed: seed.or(self.seed).unwrap_or_else(fallback_seed),
            tick_rate,
            level,
        })
    }
}

/// Fully resolved run settings.
#[derive(Clone, Debug)]
pub(crate) struct Settings {
    /// Seed for the adversaries' random walks.
    pub(crate) seed: u64,
    /// Simulation ticks per second in windowed mode.
    pub(crate) tick_rate: f32,
    /// Level to play.
    pub(crate) level: Level,
}

#[cfg(test)]
mod tests {
    use super::*;
    use maze_chase_world::CLASSIC_PLAYER_START;

    const CUSTOM: &str = r######"
seed = 42
tick_rate = 4.0

[level]
maze = ["#####", "#. .#", "#####"]
player = { column = 1, row = 1 }
adversaries = [{ column = 3, row = 1 }]
"######;

    #[test]
    fn empty_config_uses_defaults() {
        let settings = GameConfig::parse("")
            .expect("empty file parses")
            .resolve(None, None, || 9)
            .expect("defaults resolve");

        assert_eq!(settings.seed, 9);
        assert!((settings.tick_rate - DEFAULT_TICK_RATE).abs() <= f32::EPSILON);
        assert_eq!(settings.level.player_start(), CLASSIC_PLAYER_START);
    }

    #[test]
    fn file_values_build_custom_level() {
        let settings = GameConfig::parse(CUSTOM)
            .expect("custom file parses")
            .resolve(None, None, || unreachable!("seed comes from the file"))
            .expect("custom level resolves");

        assert_eq!(settings.seed, 42);
        assert!((settings.tick_rate - 4.0).abs() <= f32::EPSILON);
        assert_eq!(settings.level.grid().columns(), 5);
        assert_eq!(settings.level.adversary_starts(), &[CellCoord::new(3, 1)]);
    }

    #[test]
    fn command_line_overrides_file() {
        let settings = GameConfig::parse(CUSTOM)
            .expect("custom file parses")
            .resolve(Some(7), Some(20.0), || 0)
            .expect("overrides resolve");

        assert_eq!(settings.seed, 7);
        assert!((settings.tick_rate - 20.0).abs() <= f32::EPSILON);
    }

    #[test]
    fn rejects_non_positive_tick_rate() {
        let result = GameConfig::default().resolve(Some(1), Some(0.0), || 0);

        assert!(result.is_err());
    }

    #[test]
    fn rejects_level_with_blocked_start() {
        let config = GameConfig::parse(
            r######"
[level]
maze = ["###", "#.#", "###"]
player = { column = 0, row = 0 }
"######,
        )
        .expect("file parses");

        assert!(config.resolve(Some(1), None, || 0).is_err());
    }

    #[test]
    fn rejects_unknown_keys() {
        assert!(GameConfig::parse("speed = 3").is_err());
    }
}

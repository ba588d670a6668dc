//! Game configuration and its validation.

use std::time::Duration;

use thiserror::Error;

use crate::game::Phase;

/// Smallest accepted grid side.
pub const MIN_DIMENSION: usize = 4;

/// Largest accepted grid side.
pub const MAX_DIMENSION: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("grid must be at least {min}x{min}, got {width}x{height}", min = MIN_DIMENSION)]
    GridTooSmall { width: usize, height: usize },
    #[error("grid must be at most {max}x{max}, got {width}x{height}", max = MAX_DIMENSION)]
    GridTooLarge { width: usize, height: usize },
    #[error("{0} interval must be greater than zero")]
    ZeroInterval(&'static str),
    #[error("obstacle rows ({rows}) must leave two free rows in a grid of height {height}")]
    ObstacleRows { rows: usize, height: usize },
    #[error("{count} obstacles do not fit in {cells} obstacle cells")]
    TooManyObstacles { count: usize, cells: usize },
}

/// Options that shape a game: board size, phase cadence and starting obstacles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub width: usize,
    pub height: usize,
    /// Time between piece falls.
    pub playing_interval: Duration,
    /// Time between gravity passes once the piece has landed.
    pub settling_interval: Duration,
    pub scanning_interval: Duration,
    /// How long marked words stay on screen before removal.
    pub clearing_interval: Duration,
    /// Greyed tiles scattered at board generation.
    pub obstacles: usize,
    /// Number of bottom rows obstacles may occupy.
    pub obstacle_rows: usize,
    /// Seed for board generation; `None` draws from entropy.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: 10,
            height: 10,
            playing_interval: Duration::from_millis(1500),
            settling_interval: Duration::from_millis(250),
            scanning_interval: Duration::from_millis(250),
            clearing_interval: Duration::from_millis(300),
            obstacles: 10,
            obstacle_rows: 3,
            seed: None,
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width < MIN_DIMENSION || self.height < MIN_DIMENSION {
            return Err(ConfigError::GridTooSmall {
                width: self.width,
                height: self.height,
            });
        }
        if self.width > MAX_DIMENSION || self.height > MAX_DIMENSION {
            return Err(ConfigError::GridTooLarge {
                width: self.width,
                height: self.height,
            });
        }
        for (name, interval) in [
            ("playing", self.playing_interval),
            ("settling", self.settling_interval),
            ("scanning", self.scanning_interval),
            ("clearing", self.clearing_interval),
        ] {
            if interval.is_zero() {
                return Err(ConfigError::ZeroInterval(name));
            }
        }
        if self.obstacle_rows > self.height - 2 {
            return Err(ConfigError::ObstacleRows {
                rows: self.obstacle_rows,
                height: self.height,
            });
        }
        let cells = self.obstacle_rows * self.width;
        if self.obstacles > cells {
            return Err(ConfigError::TooManyObstacles {
                count: self.obstacles,
                cells,
            });
        }
        Ok(())
    }

    /// Step interval for a phase. `GameOver` never steps.
    pub fn interval(&self, phase: Phase) -> Option<Duration> {
        match phase {
            Phase::Playing => Some(self.playing_interval),
            Phase::Settling => Some(self.settling_interval),
            Phase::Scanning => Some(self.scanning_interval),
            Phase::Clearing => Some(self.clearing_interval),
            Phase::GameOver => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = GameConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.interval(Phase::Playing), Some(Duration::from_millis(1500)));
        assert_eq!(config.interval(Phase::GameOver), None);
    }

    #[test]
    fn rejects_small_grids() {
        let config = GameConfig {
            width: 3,
            ..GameConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::GridTooSmall { width: 3, height: 10 })
        );
    }

    #[test]
    fn rejects_huge_grids() {
        let config = GameConfig {
            height: MAX_DIMENSION + 1,
            ..GameConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::GridTooLarge { width: 10, height: 65 })
        );
        let config = GameConfig {
            width: MAX_DIMENSION,
            height: MAX_DIMENSION,
            ..GameConfig::default()
        };
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn rejects_zero_intervals() {
        let config = GameConfig {
            clearing_interval: Duration::ZERO,
            ..GameConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroInterval("clearing")));
    }

    #[test]
    fn obstacles_must_fit_their_rows() {
        let config = GameConfig {
            width: 4,
            height: 4,
            obstacle_rows: 3,
            ..GameConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::ObstacleRows { .. })));

        let config = GameConfig {
            width: 4,
            height: 4,
            obstacle_rows: 2,
            obstacles: 9,
            ..GameConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::TooManyObstacles { count: 9, cells: 8 })
        );
    }
}

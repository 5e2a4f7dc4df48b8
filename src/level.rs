//! Level data and validation
//!
//! A level is pure data: its length, platform layout and enemy spawn
//! table. Levels can round-trip through JSON for external authoring,
//! and are validated before the simulation accepts them.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::consts::VIEW_WIDTH;
use crate::sim::state::{EnemyKind, Platform, PlatformKind};

/// One enemy placement in a level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnemySpawn {
    pub x: f32,
    pub y: f32,
    pub kind: EnemyKind,
}

impl EnemySpawn {
    pub fn new(x: f32, y: f32, kind: EnemyKind) -> Self {
        Self { x, y, kind }
    }
}

/// Static description of one stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Level {
    /// World width in pixels. The camera clamps to it.
    pub length: f32,
    pub platforms: Vec<Platform>,
    pub spawns: Vec<EnemySpawn>,
}

#[derive(Debug)]
pub enum LevelError {
    Parse(serde_json::Error),
    TooShort { length: f32 },
    BadPlatform { index: usize },
    SpawnOutOfBounds { index: usize },
    NoBoss,
}

impl fmt::Display for LevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LevelError::Parse(err) => write!(f, "level parse error: {err}"),
            LevelError::TooShort { length } => {
                write!(f, "level length {length} is shorter than one screen")
            }
            LevelError::BadPlatform { index } => {
                write!(f, "platform {index} has a non-positive extent")
            }
            LevelError::SpawnOutOfBounds { index } => {
                write!(f, "spawn {index} lies outside the level")
            }
            LevelError::NoBoss => write!(f, "level has no boss spawn"),
        }
    }
}

impl std::error::Error for LevelError {}

impl Level {
    /// The built-in stage: four ground stretches split by pitfalls,
    /// pass-through floats above them, and a boss guarding the far end.
    pub fn stage_one() -> Self {
        let ground = PlatformKind::Solid;
        let float = PlatformKind::PassThrough;
        let platforms = vec![
            Platform::new(0.0, 400.0, 700.0, 50.0, ground),
            Platform::new(780.0, 400.0, 620.0, 50.0, ground),
            Platform::new(1500.0, 400.0, 600.0, 50.0, ground),
            Platform::new(2190.0, 400.0, 1010.0, 50.0, ground),
            Platform::new(560.0, 310.0, 120.0, 16.0, float),
            Platform::new(1050.0, 300.0, 140.0, 16.0, float),
            Platform::new(1420.0, 330.0, 90.0, 16.0, float),
            Platform::new(1840.0, 290.0, 130.0, 16.0, float),
            Platform::new(2480.0, 300.0, 150.0, 16.0, float),
            Platform::new(2780.0, 260.0, 120.0, 16.0, float),
        ];
        let spawns = vec![
            EnemySpawn::new(520.0, 370.0, EnemyKind::Runner),
            EnemySpawn::new(940.0, 370.0, EnemyKind::Runner),
            EnemySpawn::new(1100.0, 274.0, EnemyKind::Turret),
            EnemySpawn::new(1340.0, 374.0, EnemyKind::Turret),
            EnemySpawn::new(1620.0, 370.0, EnemyKind::Runner),
            EnemySpawn::new(1900.0, 264.0, EnemyKind::Turret),
            EnemySpawn::new(2050.0, 370.0, EnemyKind::Runner),
            EnemySpawn::new(2320.0, 370.0, EnemyKind::Runner),
            EnemySpawn::new(2580.0, 374.0, EnemyKind::Turret),
            EnemySpawn::new(2700.0, 370.0, EnemyKind::Runner),
            EnemySpawn::new(3050.0, 328.0, EnemyKind::Boss),
        ];
        Self {
            length: 3200.0,
            platforms,
            spawns,
        }
    }

    /// Check the level is playable before handing it to the simulation.
    pub fn validate(&self) -> Result<(), LevelError> {
        if self.length < VIEW_WIDTH {
            return Err(LevelError::TooShort {
                length: self.length,
            });
        }
        for (index, platform) in self.platforms.iter().enumerate() {
            if platform.body.size.x <= 0.0 || platform.body.size.y <= 0.0 {
                return Err(LevelError::BadPlatform { index });
            }
        }
        for (index, spawn) in self.spawns.iter().enumerate() {
            if spawn.x < 0.0 || spawn.x > self.length {
                return Err(LevelError::SpawnOutOfBounds { index });
            }
        }
        if !self.spawns.iter().any(|s| s.kind == EnemyKind::Boss) {
            return Err(LevelError::NoBoss);
        }
        Ok(())
    }

    /// Parse and validate a level from its JSON form.
    pub fn from_json(json: &str) -> Result<Self, LevelError> {
        let level: Level = serde_json::from_str(json).map_err(LevelError::Parse)?;
        level.validate()?;
        Ok(level)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_one_is_valid() {
        let level = Level::stage_one();
        assert!(level.validate().is_ok());
        assert!(level.length >= VIEW_WIDTH);
        assert!(level.spawns.iter().any(|s| s.kind == EnemyKind::Boss));
    }

    #[test]
    fn test_json_round_trip() {
        let level = Level::stage_one();
        let json = level.to_json().unwrap();
        let back = Level::from_json(&json).unwrap();
        assert!((back.length - level.length).abs() < 0.001);
        assert_eq!(back.platforms.len(), level.platforms.len());
        assert_eq!(back.spawns.len(), level.spawns.len());
        assert_eq!(back.spawns, level.spawns);
    }

    #[test]
    fn test_rejects_short_level() {
        let mut level = Level::stage_one();
        level.length = VIEW_WIDTH / 2.0;
        assert!(matches!(
            level.validate(),
            Err(LevelError::TooShort { .. })
        ));
    }

    #[test]
    fn test_rejects_zero_extent_platform() {
        let mut level = Level::stage_one();
        level
            .platforms
            .push(Platform::new(100.0, 100.0, 0.0, 16.0, PlatformKind::Solid));
        let bad = level.platforms.len() - 1;
        assert!(matches!(
            level.validate(),
            Err(LevelError::BadPlatform { index }) if index == bad
        ));
    }

    #[test]
    fn test_rejects_spawn_outside_level() {
        let mut level = Level::stage_one();
        level
            .spawns
            .push(EnemySpawn::new(level.length + 1.0, 370.0, EnemyKind::Runner));
        let bad = level.spawns.len() - 1;
        assert!(matches!(
            level.validate(),
            Err(LevelError::SpawnOutOfBounds { index }) if index == bad
        ));
    }

    #[test]
    fn test_rejects_level_without_boss() {
        let mut level = Level::stage_one();
        level.spawns.retain(|s| s.kind != EnemyKind::Boss);
        assert!(matches!(level.validate(), Err(LevelError::NoBoss)));
    }

    #[test]
    fn test_from_json_reports_parse_errors() {
        let err = Level::from_json("not a level").unwrap_err();
        assert!(matches!(err, LevelError::Parse(_)));
        assert!(!err.to_string().is_empty());
    }

    #[test]
    fn test_from_json_rejects_invalid_level() {
        let mut level = Level::stage_one();
        level.spawns.clear();
        let json = level.to_json().unwrap();
        assert!(matches!(
            Level::from_json(&json),
            Err(LevelError::NoBoss)
        ));
    }
}

//! Round configuration and ship selection.

use std::path::PathBuf;
use std::str::FromStr;

use crate::constants::{boss, field};
use crate::error::GameError;

// ── Ship selection ───────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShipKind {
    Default,
    Speed,
    Heavy,
}

/// Stats consumed at player construction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShipStats {
    /// Units per tick
    pub speed: f32,
    pub shoot_cooldown_ms: u64,
}

impl ShipKind {
    pub const ALL: [ShipKind; 3] = [ShipKind::Default, ShipKind::Speed, ShipKind::Heavy];

    pub fn stats(self) -> ShipStats {
        match self {
            ShipKind::Default => ShipStats { speed: 5.0, shoot_cooldown_ms: 250 },
            ShipKind::Speed => ShipStats { speed: 7.5, shoot_cooldown_ms: 300 },
            ShipKind::Heavy => ShipStats { speed: 4.0, shoot_cooldown_ms: 150 },
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            ShipKind::Default => "default",
            ShipKind::Speed => "speed",
            ShipKind::Heavy => "heavy",
        }
    }
}

impl FromStr for ShipKind {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "default" => Ok(ShipKind::Default),
            "speed" => Ok(ShipKind::Speed),
            "heavy" => Ok(ShipKind::Heavy),
            other => Err(GameError::UnknownShip(other.to_string())),
        }
    }
}

// ── Game configuration ───────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct GameConfig {
    pub width: f32,
    pub height: f32,
    /// Round time before the boss buffer starts
    pub boss_after_ms: u64,
    /// Length of the asteroid-clearing buffer before the boss appears
    pub buffer_ms: u64,
    /// Per-tick probability of a new asteroid during a wave
    pub enemy_spawn_chance: f64,
    /// Per-tick probability of a falling power-up
    pub powerup_spawn_chance: f64,
    /// Probability that a destroyed asteroid drops a power-up
    pub enemy_drop_chance: f64,
    /// Asteroids present at round start
    pub initial_enemies: usize,
    /// Fixed RNG seed; entropy when absent
    pub seed: Option<u64>,
    pub high_score_path: PathBuf,
    pub log_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: field::WIDTH,
            height: field::HEIGHT,
            boss_after_ms: 30_000,
            buffer_ms: 5_000,
            enemy_spawn_chance: 0.02,
            powerup_spawn_chance: 0.005,
            enemy_drop_chance: 0.1,
            initial_enemies: 8,
            seed: None,
            high_score_path: default_data_dir().join(".rocket_shooter_score.json"),
            log_path: std::env::temp_dir().join("rocket_shooter.log"),
        }
    }
}

fn default_data_dir() -> PathBuf {
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."))
}

impl GameConfig {
    /// Shorter waves: the boss shows up after 10 s.
    pub fn quick() -> Self {
        Self {
            boss_after_ms: 10_000,
            ..Self::default()
        }
    }

    /// Load config from environment or use defaults
    pub fn load_or_default() -> Self {
        let mut config = if env_parse::<bool>("ROCKET_QUICK").unwrap_or(false) {
            Self::quick()
        } else {
            Self::default()
        };

        if let Some(ms) = env_parse::<u64>("ROCKET_BOSS_AFTER_MS") {
            config.boss_after_ms = ms;
        }
        if let Some(ms) = env_parse::<u64>("ROCKET_BUFFER_MS") {
            config.buffer_ms = ms;
        }
        if let Some(p) = env_parse::<f64>("ROCKET_ENEMY_SPAWN_CHANCE") {
            if (0.0..=1.0).contains(&p) {
                config.enemy_spawn_chance = p;
            } else {
                tracing::warn!("ROCKET_ENEMY_SPAWN_CHANCE must be within 0..=1, using default");
            }
        }
        if let Some(p) = env_parse::<f64>("ROCKET_POWERUP_SPAWN_CHANCE") {
            if (0.0..=1.0).contains(&p) {
                config.powerup_spawn_chance = p;
            } else {
                tracing::warn!("ROCKET_POWERUP_SPAWN_CHANCE must be within 0..=1, using default");
            }
        }
        if let Some(seed) = env_parse::<u64>("ROCKET_SEED") {
            config.seed = Some(seed);
        }
        if let Ok(path) = std::env::var("ROCKET_HIGH_SCORE_PATH") {
            config.high_score_path = PathBuf::from(path);
        }
        if let Ok(path) = std::env::var("ROCKET_LOG_PATH") {
            config.log_path = PathBuf::from(path);
        }

        config
    }

    /// Validate configuration after loading
    pub fn validate(&self) -> Result<(), GameError> {
        if self.width <= 0.0 || self.height <= 0.0 {
            return Err(GameError::InvalidConfig(format!(
                "field size must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        for (name, p) in [
            ("enemy_spawn_chance", self.enemy_spawn_chance),
            ("powerup_spawn_chance", self.powerup_spawn_chance),
            ("enemy_drop_chance", self.enemy_drop_chance),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(GameError::InvalidConfig(format!(
                    "{name} must be within 0..=1, got {p}"
                )));
            }
        }
        if self.width < boss::WIDTH {
            return Err(GameError::InvalidConfig(format!(
                "field width {} is narrower than the boss ({})",
                self.width,
                boss::WIDTH
            )));
        }
        if self.boss_after_ms == 0 {
            return Err(GameError::InvalidConfig("boss_after_ms must be at least 1".into()));
        }
        if self.buffer_ms == 0 {
            return Err(GameError::InvalidConfig("buffer_ms must be at least 1".into()));
        }
        Ok(())
    }
}

fn env_parse<T: FromStr>(name: &str) -> Option<T> {
    let raw = std::env::var(name).ok()?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!("Invalid {} '{}', using default", name, raw);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.width, 800.0);
        assert_eq!(config.height, 600.0);
        assert_eq!(config.boss_after_ms, 30_000);
        assert_eq!(config.initial_enemies, 8);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_quick_preset() {
        assert_eq!(GameConfig::quick().boss_after_ms, 10_000);
    }

    #[test]
    fn test_validate_rejects_bad_probability() {
        let config = GameConfig {
            enemy_spawn_chance: 1.5,
            ..GameConfig::default()
        };
        assert!(matches!(config.validate(), Err(GameError::InvalidConfig(_))));
    }

    #[test]
    fn test_validate_rejects_zero_buffer() {
        let config = GameConfig {
            buffer_ms: 0,
            ..GameConfig::default()
        };
        assert!(matches!(config.validate(), Err(GameError::InvalidConfig(_))));
    }

    #[test]
    fn test_validate_rejects_field_narrower_than_boss() {
        let config = GameConfig {
            width: 120.0,
            ..GameConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("narrower than the boss"));
    }

    #[test]
    fn test_ship_keys_round_trip() {
        for kind in ShipKind::ALL {
            assert_eq!(kind.key().parse::<ShipKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_unknown_ship_fails_fast() {
        let err = "battlecruiser".parse::<ShipKind>().unwrap_err();
        assert!(err.to_string().contains("battlecruiser"));
    }
}

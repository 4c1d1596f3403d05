//! Tuning constants.  Speeds are in field units per tick at 60 Hz, times in ms.

/// Loop timing
pub mod timing {
    /// Target tick rate in Hz
    pub const TICK_RATE: u32 = 60;
}

/// Play-field
pub mod field {
    pub const WIDTH: f32 = 800.0;
    pub const HEIGHT: f32 = 600.0;
}

/// Player ship
pub mod player {
    pub const WIDTH: f32 = 40.0;
    pub const HEIGHT: f32 = 50.0;
    /// Gap between the ship's bottom edge and the bottom of the field
    pub const BOTTOM_MARGIN: f32 = 10.0;
    pub const STARTING_LIVES: u32 = 3;
    pub const RESPAWN_DELAY_MS: u64 = 1_000;
    pub const FLASH_INTERVAL_MS: u64 = 100;
    /// Visibility toggles before invulnerability ends
    pub const FLASH_TOGGLES: u32 = 6;
}

/// Power-up durations and effects
pub mod powerup {
    pub const SIZE: f32 = 24.0;
    pub const FALL_SPEED: f32 = 3.0;
    pub const SHIELD_MS: u64 = 8_000;
    pub const TRIPLE_SHOT_MS: u64 = 10_000;
    pub const SPEED_BOOST_MS: u64 = 15_000;
    pub const LASER_MS: u64 = 5_000;
    pub const SPEED_BOOST_FACTOR: f32 = 1.5;
}

/// Laser beam
pub mod laser {
    pub const WIDTH: f32 = 10.0;
    pub const DAMAGE: u32 = 1;
    /// Minimum time between two damage applications of the beam
    pub const DAMAGE_DELAY_MS: u64 = 500;
}

/// Projectiles
pub mod bullet {
    pub const WIDTH: f32 = 5.0;
    pub const HEIGHT: f32 = 10.0;
    pub const PLAYER_SPEED: f32 = 10.0;
    pub const ENEMY_SPEED: f32 = 5.0;
    /// Angular offset of the outer triple-shot bullets, in degrees
    pub const TRIPLE_SPREAD_DEG: f32 = 15.0;
    /// Angular offset of the outer boss bullets, in degrees
    pub const BOSS_SPREAD_DEG: f32 = 20.0;
}

/// Asteroids
pub mod enemy {
    /// Level weights for levels 1..=4
    pub const LEVEL_WEIGHTS: [f64; 4] = [0.4, 0.3, 0.2, 0.1];
    pub const SPAWN_Y_MIN: f32 = -100.0;
    pub const SPAWN_Y_MAX: f32 = -40.0;
    /// Horizontal slack before an asteroid counts as off-field
    pub const SIDE_SLACK: f32 = 25.0;
    pub const MAX_ROTATION_DEG: f32 = 3.0;
}

/// Boss
pub mod boss {
    pub const WIDTH: f32 = 160.0;
    pub const HEIGHT: f32 = 96.0;
    pub const MAX_HEALTH: u32 = 240;
    pub const TARGET_Y: f32 = 40.0;
    pub const DESCENT_SPEED: f32 = 2.0;
    pub const BASE_SPEED: f32 = 2.0;
    pub const BASE_FIRE_INTERVAL_MS: u64 = 1_200;
    /// Health lost between two shield drops
    pub const DROP_EVERY: u32 = 20;
    pub const DEFEAT_BONUS: u32 = 1_000;
    /// Upper bound (inclusive) of the second tier
    pub const TIER2_RATIO: f32 = 0.6;
    /// Lower bound (inclusive) of the second tier
    pub const TIER3_RATIO: f32 = 0.3;
}

/// Explosion particles
pub mod particles {
    pub const ENEMY_COUNT: usize = 20;
    pub const PLAYER_COUNT: usize = 40;
    pub const BULLET_COUNT: usize = 12;
    pub const BOSS_COUNT: usize = 80;
    pub const GRAVITY: f32 = 0.1;
    pub const MIN_SPEED: f32 = 1.0;
    pub const MAX_SPEED: f32 = 5.0;
    pub const MIN_LIFETIME: u32 = 30;
    pub const MAX_LIFETIME: u32 = 60;
}

#![allow(dead_code)]

use rand::rngs::StdRng;
use rand::SeedableRng;

use rocket_shooter::compute::init_state;
use rocket_shooter::entities::{Boss, Bullet, BulletOwner, Enemy, World};
use rocket_shooter::geometry::Vec2;
use rocket_shooter::{GameConfig, ShipKind};

pub fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

/// Config with every random roll switched off.
pub fn quiet_config() -> GameConfig {
    GameConfig {
        initial_enemies: 0,
        enemy_spawn_chance: 0.0,
        powerup_spawn_chance: 0.0,
        enemy_drop_chance: 0.0,
        ..GameConfig::default()
    }
}

/// An empty round: ship at its start position, nothing else on the field.
pub fn make_world() -> World {
    init_state(ShipKind::Default, quiet_config(), 0, 0, &mut seeded_rng()).unwrap()
}

/// Stationary, non-rotating asteroid.
pub fn still_enemy(level: u8, x: f32, y: f32) -> Enemy {
    Enemy::new(level, Vec2::new(x, y), Vec2::ZERO, 0.0)
}

pub fn player_bullet(x: f32, y: f32) -> Bullet {
    Bullet {
        pos: Vec2::new(x, y),
        vel: Vec2::ZERO,
        owner: BulletOwner::Player,
    }
}

pub fn enemy_bullet(x: f32, y: f32) -> Bullet {
    Bullet {
        pos: Vec2::new(x, y),
        vel: Vec2::ZERO,
        owner: BulletOwner::Enemy,
    }
}

/// Boss already on station, centred horizontally.
pub fn stationed_boss(world: &World) -> Boss {
    let mut boss = Boss::new(world.bounds);
    boss.pos.y = 40.0 + 48.0;
    boss.reached_position = true;
    boss
}

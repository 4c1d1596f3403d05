//! Entity creation: asteroids, pickups, explosions and the boss encounter.
//!
//! All randomness comes through the injected `rng`.

use rand::distributions::{Distribution, WeightedIndex};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::constants::{enemy, particles, powerup};
use crate::entities::{
    Boss, Bounds, Enemy, Encounter, Explosion, ExplosionKind, GameEvent, Particle, PowerUp, PowerUpKind, World,
};
use crate::geometry::Vec2;
use crate::timers::Expiry;

// ── Asteroids ────────────────────────────────────────────────────────────────

/// Level in 1..=4 drawn with weights 0.4 / 0.3 / 0.2 / 0.1.
pub fn roll_enemy_level(rng: &mut impl Rng) -> u8 {
    match WeightedIndex::new(enemy::LEVEL_WEIGHTS) {
        Ok(dist) => dist.sample(rng) as u8 + 1,
        Err(_) => 1,
    }
}

/// Random position just above the field for an asteroid of width `size`.
pub fn enemy_spawn_position(size: f32, bounds: Bounds, rng: &mut impl Rng) -> Vec2 {
    let span = (bounds.width - size).max(1.0);
    let left = rng.gen_range(0.0..span);
    let top = rng.gen_range(enemy::SPAWN_Y_MIN..enemy::SPAWN_Y_MAX);
    Vec2::new(left + size / 2.0, top + size / 2.0)
}

/// Whole-unit speeds: vertical in 1..4, horizontal in -2..2.
pub fn random_enemy_velocity(rng: &mut impl Rng) -> Vec2 {
    let vx = rng.gen_range(-2..2) as f32;
    let vy = rng.gen_range(1..4) as f32;
    Vec2::new(vx, vy)
}

pub fn spawn_enemy(bounds: Bounds, rng: &mut impl Rng) -> Enemy {
    let level = roll_enemy_level(rng);
    let mut e = Enemy::new(level, Vec2::ZERO, Vec2::ZERO, 0.0);
    e.pos = enemy_spawn_position(e.size(), bounds, rng);
    e.vel = random_enemy_velocity(rng);
    e.rotation_speed = rng.gen_range(-enemy::MAX_ROTATION_DEG..=enemy::MAX_ROTATION_DEG);
    e
}

// ── Power-ups ────────────────────────────────────────────────────────────────

/// A pickup entering from the top at a random column, kind uniform over the
/// falling kinds.
pub fn spawn_falling_power_up(bounds: Bounds, rng: &mut impl Rng) -> PowerUp {
    let half = powerup::SIZE / 2.0;
    let x = rng.gen_range(half..(bounds.width - half).max(half + 1.0));
    let kind = *PowerUpKind::FALLING.choose(rng).unwrap_or(&PowerUpKind::Shield);
    PowerUp {
        pos: Vec2::new(x, -half),
        kind,
    }
}

/// A pickup of uniform random kind dropped by a destroyed asteroid.
pub fn roll_drop(at: Vec2, rng: &mut impl Rng) -> PowerUp {
    let kind = *PowerUpKind::ALL.choose(rng).unwrap_or(&PowerUpKind::Shield);
    PowerUp { pos: at, kind }
}

// ── Explosions ───────────────────────────────────────────────────────────────

pub fn explosion(kind: ExplosionKind, at: Vec2, rng: &mut impl Rng) -> Explosion {
    let count = match kind {
        ExplosionKind::Enemy => particles::ENEMY_COUNT,
        ExplosionKind::Player => particles::PLAYER_COUNT,
        ExplosionKind::Bullet => particles::BULLET_COUNT,
        ExplosionKind::Boss => particles::BOSS_COUNT,
    };
    let particles = (0..count)
        .map(|_| {
            let angle = rng.gen_range(0.0..360.0);
            let speed = rng.gen_range(particles::MIN_SPEED..particles::MAX_SPEED);
            let lifetime = rng.gen_range(particles::MIN_LIFETIME..particles::MAX_LIFETIME);
            Particle {
                pos: at,
                vel: Vec2::from_angle_deg(angle) * speed,
                fall: 0.0,
                lifetime,
                max_lifetime: lifetime,
            }
        })
        .collect();
    Explosion { kind, particles }
}

/// Queue an explosion on the world and cue its sound.
pub fn explode(world: &mut World, kind: ExplosionKind, at: Vec2, rng: &mut impl Rng) {
    world.explosions.push(explosion(kind, at, rng));
    world.events.push(GameEvent::Explosion);
}

// ── Per-tick rolls ───────────────────────────────────────────────────────────

/// Bernoulli rolls for a new asteroid (waves only) and a falling power-up.
pub fn roll_spawns(world: &mut World, rng: &mut impl Rng) {
    if matches!(world.encounter, Encounter::Wave { .. }) && rng.gen_bool(world.config.enemy_spawn_chance) {
        world.enemies.push(spawn_enemy(world.bounds, rng));
    }
    if rng.gen_bool(world.config.powerup_spawn_chance) {
        world.power_ups.push(spawn_falling_power_up(world.bounds, rng));
    }
}

// ── Boss encounter ───────────────────────────────────────────────────────────

/// Wave → Buffer once the round timer crosses the threshold (every live
/// asteroid blows up), Buffer → Boss once the buffer runs out.
pub fn update_encounter(world: &mut World, rng: &mut impl Rng) {
    match world.encounter {
        Encounter::Wave { started_at } => {
            if world.now.saturating_sub(started_at) >= world.config.boss_after_ms {
                world.encounter = Encounter::Buffer {
                    until: Expiry::after(world.now, world.config.buffer_ms),
                };
                tracing::debug!(
                    now = world.now,
                    asteroids = world.enemies.len(),
                    "Boss buffer started"
                );
                for e in std::mem::take(&mut world.enemies) {
                    explode(world, ExplosionKind::Enemy, e.pos, rng);
                }
            }
        }
        Encounter::Buffer { until } => {
            if until.is_expired(world.now) {
                world.boss = Some(Boss::new(world.bounds));
                world.encounter = Encounter::Boss;
                world.events.push(GameEvent::BossSpawned);
                tracing::info!(now = world.now, "Boss spawned");
            }
        }
        Encounter::Boss => {}
    }
}

/// Boss is gone: back to a fresh wave with the round timer restarted.
pub fn end_encounter(world: &mut World) {
    world.boss = None;
    world.encounter = Encounter::Wave { started_at: world.now };
    tracing::debug!(now = world.now, "Wave resumed");
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const BOUNDS: Bounds = Bounds { width: 800.0, height: 600.0 };

    #[test]
    fn level_distribution_matches_weights() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut counts = [0usize; 4];
        let n = 20_000;
        for _ in 0..n {
            counts[(roll_enemy_level(&mut rng) - 1) as usize] += 1;
        }
        for (count, weight) in counts.iter().zip(enemy::LEVEL_WEIGHTS) {
            let freq = *count as f64 / n as f64;
            assert!((freq - weight).abs() < 0.02, "freq {freq} vs weight {weight}");
        }
    }

    #[test]
    fn spawned_asteroid_starts_above_field() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..200 {
            let e = spawn_enemy(BOUNDS, &mut rng);
            let r = e.rect();
            assert!(r.top() >= enemy::SPAWN_Y_MIN && r.top() < enemy::SPAWN_Y_MAX);
            assert!(r.left() >= 0.0 && r.right() <= BOUNDS.width);
            assert!(e.vel.y >= 1.0 && e.vel.y < 4.0);
            assert!(e.vel.x >= -2.0 && e.vel.x < 2.0);
        }
    }

    #[test]
    fn falling_power_ups_are_never_speed_boost() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..500 {
            assert_ne!(spawn_falling_power_up(BOUNDS, &mut rng).kind, PowerUpKind::SpeedBoost);
        }
    }

    #[test]
    fn explosion_particles_start_at_origin() {
        let mut rng = StdRng::seed_from_u64(5);
        let e = explosion(ExplosionKind::Boss, Vec2::new(10.0, 20.0), &mut rng);
        assert_eq!(e.particles.len(), particles::BOSS_COUNT);
        assert!(e.particles.iter().all(|p| p.pos == Vec2::new(10.0, 20.0)));
        assert!(e.particles.iter().all(|p| p.lifetime >= particles::MIN_LIFETIME));
    }
}

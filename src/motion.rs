//! Per-category kinematics.
//!
//! Each `advance` touches only its own entity.  Off-field policy differs by
//! category: projectiles and pickups report themselves dead, asteroids are
//! recycled at the top, the player and the boss are clamped.

use rand::Rng;

use crate::combat::BossTier;
use crate::constants::{boss, enemy, particles, player, powerup};
use crate::entities::{Boss, Bounds, Bullet, Enemy, Explosion, Player, PowerUp};
use crate::input::InputSnapshot;
use crate::spawner;

impl Player {
    /// Move from input and clamp the hit box inside the field.  A respawning
    /// ship does not move.
    pub fn advance(&mut self, dt: f32, input: &InputSnapshot, bounds: Bounds) {
        if self.life.is_respawning() {
            return;
        }
        let (dx, dy) = input.axis();
        let step = self.speed() * dt;
        self.pos.x += dx * step;
        self.pos.y += dy * step;

        let half_w = player::WIDTH / 2.0;
        let half_h = player::HEIGHT / 2.0;
        self.pos.x = self.pos.x.clamp(half_w, (bounds.width - half_w).max(half_w));
        self.pos.y = self.pos.y.clamp(half_h, (bounds.height - half_h).max(half_h));
    }
}

impl Enemy {
    pub fn advance(&mut self, dt: f32, bounds: Bounds, rng: &mut impl Rng) {
        self.pos += self.vel * dt;
        self.angle = (self.angle + self.rotation_speed * dt).rem_euclid(360.0);

        let r = self.rect();
        let off_field = r.top() > bounds.height
            || r.left() < -enemy::SIDE_SLACK
            || r.right() > bounds.width + enemy::SIDE_SLACK;
        if off_field {
            self.recycle(bounds, rng);
        }
    }

    /// Put the asteroid back above the field with a fresh heading.  Level and
    /// remaining health are kept.
    pub fn recycle(&mut self, bounds: Bounds, rng: &mut impl Rng) {
        self.pos = spawner::enemy_spawn_position(self.size(), bounds, rng);
        self.vel = spawner::random_enemy_velocity(rng);
    }
}

impl Bullet {
    /// Returns `false` once the bullet is entirely outside the field.
    pub fn advance(&mut self, dt: f32, bounds: Bounds) -> bool {
        self.pos += self.vel * dt;
        let r = self.rect();
        !(r.bottom() < 0.0 || r.top() > bounds.height || r.right() < 0.0 || r.left() > bounds.width)
    }
}

impl PowerUp {
    /// Returns `false` once the pickup has fallen past the bottom.
    pub fn advance(&mut self, dt: f32, bounds: Bounds) -> bool {
        self.pos.y += powerup::FALL_SPEED * dt;
        self.rect().top() <= bounds.height
    }
}

impl Boss {
    /// Descend to the station line, then move according to the current tier.
    pub fn advance(&mut self, dt: f32, target_x: f32, bounds: Bounds) {
        if !self.reached_position {
            self.pos.y += boss::DESCENT_SPEED * dt;
            if self.pos.y >= boss::TARGET_Y + boss::HEIGHT / 2.0 {
                self.pos.y = boss::TARGET_Y + boss::HEIGHT / 2.0;
                self.reached_position = true;
            }
            return;
        }

        let tier = BossTier::from_ratio(self.health_ratio());
        let speed = boss::BASE_SPEED * tier.multiplier() * dt;
        let half_w = boss::WIDTH / 2.0;
        let min_x = half_w;
        let max_x = (bounds.width - half_w).max(half_w);

        if tier.bounces() {
            self.pos.x += self.direction * speed;
            if self.pos.x <= min_x {
                self.direction = 1.0;
            } else if self.pos.x >= max_x {
                self.direction = -1.0;
            }
        } else {
            let gap = target_x - self.pos.x;
            self.pos.x += gap.clamp(-speed, speed);
        }
        self.pos.x = self.pos.x.clamp(min_x, max_x);
    }
}

impl Explosion {
    /// Age every particle by one tick.  Returns `false` once all are spent.
    pub fn advance(&mut self, dt: f32) -> bool {
        for p in self.particles.iter_mut().filter(|p| p.lifetime > 0) {
            p.fall += particles::GRAVITY * dt;
            p.pos.x += p.vel.x * dt;
            p.pos.y += (p.vel.y + p.fall) * dt;
            p.lifetime -= 1;
        }
        self.is_alive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ShipKind;
    use crate::entities::{BulletOwner, ExplosionKind, Particle, PowerUpKind};
    use crate::geometry::Vec2;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const BOUNDS: Bounds = Bounds { width: 800.0, height: 600.0 };

    #[test]
    fn player_is_clamped_to_field() {
        let mut p = Player::new(ShipKind::Default, BOUNDS);
        let input = InputSnapshot { left: true, down: true, ..InputSnapshot::default() };
        for _ in 0..500 {
            p.advance(1.0, &input, BOUNDS);
        }
        assert_eq!(p.pos.x, player::WIDTH / 2.0);
        assert_eq!(p.pos.y, BOUNDS.height - player::HEIGHT / 2.0);
    }

    #[test]
    fn asteroid_leaving_bottom_is_recycled_to_top() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut e = Enemy::new(2, Vec2::new(400.0, 640.0), Vec2::new(0.0, 3.0), 1.0);
        e.health = 2;
        e.advance(1.0, BOUNDS, &mut rng);
        assert!(e.pos.y < 0.0);
        assert_eq!(e.level, 2);
        assert_eq!(e.health, 2);
    }

    #[test]
    fn bullet_dies_above_field() {
        let mut b = Bullet::launched(Vec2::new(100.0, 8.0), -90.0, 10.0, BulletOwner::Player);
        assert!(b.advance(1.0, BOUNDS));
        assert!(!b.advance(1.0, BOUNDS));
    }

    #[test]
    fn power_up_dies_below_field() {
        let mut p = PowerUp {
            pos: Vec2::new(200.0, BOUNDS.height + 8.0),
            kind: PowerUpKind::Shield,
        };
        // Top edge at 596, still on the field after falling to 599
        assert!(p.advance(1.0, BOUNDS));
        assert!(!p.advance(1.0, BOUNDS));
    }

    #[test]
    fn enemy_bullet_dies_below_field() {
        let mut b = Bullet::launched(Vec2::new(300.0, BOUNDS.height), 90.0, 5.0, BulletOwner::Enemy);
        // Top edge at 600 after the first step, past it after the second
        assert!(b.advance(1.0, BOUNDS));
        assert!(!b.advance(1.0, BOUNDS));
    }

    #[test]
    fn boss_descends_then_holds_station() {
        let mut boss = Boss::new(BOUNDS);
        let mut ticks = 0;
        while !boss.reached_position {
            boss.advance(1.0, 400.0, BOUNDS);
            ticks += 1;
            assert!(ticks < 1_000);
        }
        assert_eq!(boss.rect().top(), boss::TARGET_Y);
    }

    #[test]
    fn explosion_burns_out() {
        let mut e = Explosion {
            kind: ExplosionKind::Enemy,
            particles: vec![Particle {
                pos: Vec2::ZERO,
                vel: Vec2::new(1.0, 0.0),
                fall: 0.0,
                lifetime: 2,
                max_lifetime: 2,
            }],
        };
        assert!(e.advance(1.0));
        assert!(e.particles[0].pos.y > 0.0);
        assert!(!e.advance(1.0));
        assert_eq!(e.particles[0].alpha(), 0.0);
    }
}

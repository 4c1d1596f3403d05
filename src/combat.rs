//! Damage, power-up effects, firing patterns and the boss tier machine.

use crate::constants::{boss, bullet, powerup};
use crate::entities::{Boss, Bullet, BulletOwner, Enemy, GameEvent, Laser, Player, PowerUpKind};
use crate::geometry::Vec2;
use crate::timers::WeaponMode;

// ── Boss tiers ───────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BossTier {
    /// Health above 60%: base speed, tracks the player.
    Tier1,
    /// 30–60%: double speed and fire rate, bounces between walls.
    Tier2,
    /// Below 30%: triple speed and fire rate, bounces.
    Tier3,
}

impl BossTier {
    /// Pure function of the health ratio, no hysteresis.
    pub fn from_ratio(ratio: f32) -> Self {
        if ratio > boss::TIER2_RATIO {
            BossTier::Tier1
        } else if ratio >= boss::TIER3_RATIO {
            BossTier::Tier2
        } else {
            BossTier::Tier3
        }
    }

    pub fn multiplier(self) -> f32 {
        match self {
            BossTier::Tier1 => 1.0,
            BossTier::Tier2 => 2.0,
            BossTier::Tier3 => 3.0,
        }
    }

    pub fn bounces(self) -> bool {
        !matches!(self, BossTier::Tier1)
    }

    pub fn fire_interval_ms(self) -> u64 {
        (boss::BASE_FIRE_INTERVAL_MS as f32 / self.multiplier()) as u64
    }
}

/// Where the boss is in its encounter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BossPhase {
    Descending,
    Active(BossTier),
    Destroyed,
}

impl Boss {
    pub fn tier(&self) -> BossTier {
        BossTier::from_ratio(self.health_ratio())
    }

    pub fn phase(&self) -> BossPhase {
        if !self.is_alive() {
            BossPhase::Destroyed
        } else if !self.reached_position {
            BossPhase::Descending
        } else {
            BossPhase::Active(self.tier())
        }
    }

    /// Apply damage and return how many shield drops it earned.  A drop is
    /// due every `DROP_EVERY` health lost since the previous one.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        self.health = self.health.saturating_sub(amount);
        let mut drops = 0;
        while self.last_drop_health.saturating_sub(self.health) >= boss::DROP_EVERY {
            self.last_drop_health -= boss::DROP_EVERY;
            drops += 1;
        }
        drops
    }

    pub fn ready_to_fire(&self, now: u64) -> bool {
        self.reached_position
            && self
                .last_shot
                .map_or(true, |last| now.saturating_sub(last) >= self.tier().fire_interval_ms())
    }

    /// Three-way spread aimed straight down from the boss's lower edge.
    pub fn volley(&mut self, now: u64) -> Vec<Bullet> {
        self.last_shot = Some(now);
        let muzzle = Vec2::new(self.pos.x, self.rect().bottom());
        [90.0 - bullet::BOSS_SPREAD_DEG, 90.0, 90.0 + bullet::BOSS_SPREAD_DEG]
            .into_iter()
            .map(|angle| Bullet::launched(muzzle, angle, bullet::ENEMY_SPEED, BulletOwner::Enemy))
            .collect()
    }
}

impl Enemy {
    /// Returns `true` when this damage destroyed the asteroid.
    pub fn take_damage(&mut self, amount: u32) -> bool {
        let was_alive = self.is_alive();
        self.health = self.health.saturating_sub(amount);
        was_alive && !self.is_alive()
    }
}

// ── Player weapons ───────────────────────────────────────────────────────────

impl Player {
    /// Whether the shoot cooldown has elapsed.  The laser replaces bullets.
    pub fn can_shoot(&self, now: u64) -> bool {
        !self.laser_active()
            && !self.life.is_respawning()
            && self
                .last_shot
                .map_or(true, |last| now.saturating_sub(last) > self.shoot_cooldown_ms)
    }

    /// Fire from the nose: one bullet, or a fan of three under triple shot.
    pub fn volley(&mut self, now: u64) -> Vec<Bullet> {
        self.last_shot = Some(now);
        let muzzle = Vec2::new(self.pos.x, self.rect().top());
        let angles: &[f32] = if self.has_triple_shot() {
            &[-90.0 - bullet::TRIPLE_SPREAD_DEG, -90.0, -90.0 + bullet::TRIPLE_SPREAD_DEG]
        } else {
            &[-90.0]
        };
        angles
            .iter()
            .map(|&angle| Bullet::launched(muzzle, angle, bullet::PLAYER_SPEED, BulletOwner::Player))
            .collect()
    }
}

// ── Power-up effects ─────────────────────────────────────────────────────────

fn weapon_for(kind: PowerUpKind) -> Option<(WeaponMode, u64)> {
    match kind {
        PowerUpKind::Shield => None,
        PowerUpKind::Laser => Some((WeaponMode::Laser, powerup::LASER_MS)),
        PowerUpKind::TripleShot => Some((WeaponMode::TripleShot, powerup::TRIPLE_SHOT_MS)),
        PowerUpKind::SpeedBoost => Some((WeaponMode::SpeedBoost, powerup::SPEED_BOOST_MS)),
    }
}

/// Apply a collected power-up.  Shield stacks with everything; the other
/// kinds displace whichever weapon mode is active.
pub fn apply_power_up(player: &mut Player, kind: PowerUpKind, now: u64, events: &mut Vec<GameEvent>) {
    events.push(GameEvent::PowerUpCollected(kind));
    let Some((mode, duration)) = weapon_for(kind) else {
        player.power.grant_shield(now, powerup::SHIELD_MS);
        return;
    };

    let displaced = player.power.grant_weapon(mode, now, duration);
    if displaced == Some(WeaponMode::Laser) {
        release_laser(player, events);
    }
    if mode == WeaponMode::Laser && player.laser.is_none() {
        player.laser = Some(Laser { last_damage: None });
        events.push(GameEvent::LaserStart);
    }
}

/// Detach the beam, if any.
pub fn release_laser(player: &mut Player, events: &mut Vec<GameEvent>) {
    if player.laser.take().is_some() {
        events.push(GameEvent::LaserStop);
    }
}

/// Clear every effect whose expiry has passed.
pub fn expire_power_ups(player: &mut Player, now: u64, events: &mut Vec<GameEvent>) {
    let expired = player.power.expire(now);
    if expired.weapon == Some(WeaponMode::Laser) {
        release_laser(player, events);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Bounds;

    const BOUNDS: Bounds = Bounds { width: 800.0, height: 600.0 };

    #[test]
    fn tier_boundaries() {
        assert_eq!(BossTier::from_ratio(1.0), BossTier::Tier1);
        assert_eq!(BossTier::from_ratio(0.61), BossTier::Tier1);
        assert_eq!(BossTier::from_ratio(0.6), BossTier::Tier2);
        assert_eq!(BossTier::from_ratio(0.3), BossTier::Tier2);
        assert_eq!(BossTier::from_ratio(0.29), BossTier::Tier3);
        assert_eq!(BossTier::from_ratio(0.0), BossTier::Tier3);
    }

    #[test]
    fn fire_interval_shrinks_with_tier() {
        assert_eq!(BossTier::Tier1.fire_interval_ms(), 1_200);
        assert_eq!(BossTier::Tier2.fire_interval_ms(), 600);
        assert_eq!(BossTier::Tier3.fire_interval_ms(), 400);
    }

    #[test]
    fn boss_drops_every_twenty_health() {
        let mut boss = Boss::new(BOUNDS);
        assert_eq!(boss.take_damage(19), 0);
        assert_eq!(boss.take_damage(1), 1);
        assert_eq!(boss.take_damage(45), 2);
        assert_eq!(boss.health, 175);
        assert_eq!(boss.last_drop_health, 180);
    }

    #[test]
    fn boss_health_never_underflows() {
        let mut boss = Boss::new(BOUNDS);
        boss.take_damage(1_000);
        assert_eq!(boss.health, 0);
        assert_eq!(boss.phase(), BossPhase::Destroyed);
    }

    #[test]
    fn enemy_destroyed_only_once() {
        let mut e = Enemy::new(1, Vec2::ZERO, Vec2::ZERO, 0.0);
        assert!(e.take_damage(3));
        assert!(!e.take_damage(1));
        assert_eq!(e.health, 0);
    }
}

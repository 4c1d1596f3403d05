//! Collision resolution.
//!
//! Runs once per tick after every entity has moved.  Passes run in a fixed
//! order; within a pass hits are counted against start-of-pass health before
//! any of them is applied.

use std::sync::OnceLock;

use rand::Rng;

use crate::combat::{self, release_laser};
use crate::constants::{boss, laser, player, powerup};
use crate::entities::{Enemy, ExplosionKind, GameEvent, GameStatus, Player, PowerUp, PowerUpKind, World};
use crate::geometry::{Mask, Rect, Vec2};
use crate::spawner::{self, explode};
use crate::timers::{Expiry, LifeState, PowerState};

fn player_mask() -> &'static Mask {
    static MASK: OnceLock<Mask> = OnceLock::new();
    MASK.get_or_init(|| Mask::rocket(player::WIDTH as usize, player::HEIGHT as usize))
}

fn power_up_mask() -> &'static Mask {
    static MASK: OnceLock<Mask> = OnceLock::new();
    MASK.get_or_init(|| Mask::disc(powerup::SIZE as usize))
}

fn top_left(r: &Rect) -> Vec2 {
    Vec2::new(r.left(), r.top())
}

/// Run every pass for this tick.
pub fn resolve(world: &mut World, rng: &mut impl Rng) {
    let laser_ready = laser_ready(world);
    let mut laser_fired = false;

    bullets_vs_enemies(world, rng);
    if laser_ready {
        laser_fired |= laser_vs_enemies(world, rng);
    }
    laser_fired |= player_vs_boss_damage(world, laser_ready, rng);
    if laser_fired {
        if let Some(beam) = world.player.laser.as_mut() {
            beam.last_damage = Some(world.now);
        }
    }
    player_vs_power_ups(world);
    hostiles_vs_player(world, rng);
}

/// Whether the beam's damage delay has elapsed.
pub fn laser_ready(world: &World) -> bool {
    match &world.player.laser {
        Some(beam) => beam
            .last_damage
            .map_or(true, |last| world.now.saturating_sub(last) >= laser::DAMAGE_DELAY_MS),
        None => false,
    }
}

// ── Asteroid kills ───────────────────────────────────────────────────────────

/// Score, explode and maybe drop a pickup for every asteroid at or below
/// zero health, then drop them from the set.
fn clear_destroyed_enemies(world: &mut World, rng: &mut impl Rng) {
    let (dead, alive): (Vec<Enemy>, Vec<Enemy>) =
        std::mem::take(&mut world.enemies).into_iter().partition(|e| !e.is_alive());
    world.enemies = alive;
    for e in dead {
        world.score += e.points();
        explode(world, ExplosionKind::Enemy, e.pos, rng);
        if rng.gen_bool(world.config.enemy_drop_chance) {
            world.power_ups.push(spawner::roll_drop(e.pos, rng));
        }
    }
}

/// Pass 1.  A bullet is consumed by the first live asteroid it overlaps; each
/// asteroid loses one health per bullet it consumed.
pub fn bullets_vs_enemies(world: &mut World, rng: &mut impl Rng) {
    let mut hits = vec![0u32; world.enemies.len()];
    let enemies = &world.enemies;
    world.bullets.retain(|b| {
        let r = b.rect();
        match enemies.iter().position(|e| e.is_alive() && e.rect().intersects(&r)) {
            Some(i) => {
                hits[i] += 1;
                false
            }
            None => true,
        }
    });

    for (e, n) in world.enemies.iter_mut().zip(hits) {
        if n > 0 {
            e.take_damage(n);
        }
    }
    clear_destroyed_enemies(world, rng);
}

/// Pass 2.  Every live asteroid under the beam takes one damage window's
/// worth.  Returns whether anything was hit.
pub fn laser_vs_enemies(world: &mut World, rng: &mut impl Rng) -> bool {
    let Some(beam) = world.player.laser_rect() else {
        return false;
    };
    let mut hit = false;
    for e in world.enemies.iter_mut().filter(|e| e.is_alive()) {
        if e.rect().intersects(&beam) {
            e.take_damage(laser::DAMAGE);
            hit = true;
        }
    }
    clear_destroyed_enemies(world, rng);
    hit
}

/// Pass 3.  Bullets and the beam against the boss, once it is in position.
/// Bullets pass through a descending boss.  Returns whether the beam hit.
pub fn player_vs_boss_damage(world: &mut World, laser_ready: bool, rng: &mut impl Rng) -> bool {
    let Some(boss_rect) = world
        .boss
        .as_ref()
        .filter(|b| b.reached_position && b.is_alive())
        .map(|b| b.rect())
    else {
        return false;
    };

    let before = world.bullets.len();
    world.bullets.retain(|b| !b.rect().intersects(&boss_rect));
    let mut damage = (before - world.bullets.len()) as u32;

    let beam_hit = laser_ready
        && world
            .player
            .laser_rect()
            .is_some_and(|beam| beam.intersects(&boss_rect));
    if beam_hit {
        damage += laser::DAMAGE;
    }
    if damage == 0 {
        return false;
    }

    let Some(b) = world.boss.as_mut() else {
        return beam_hit;
    };
    let drops = b.take_damage(damage);
    let (center, alive) = (b.pos, b.is_alive());
    for _ in 0..drops {
        world.power_ups.push(PowerUp {
            pos: center,
            kind: PowerUpKind::Shield,
        });
    }

    if !alive {
        world.score += boss::DEFEAT_BONUS;
        explode(world, ExplosionKind::Boss, center, rng);
        world.events.push(GameEvent::BossDefeated);
        tracing::info!(now = world.now, score = world.score, "Boss defeated");
        spawner::end_encounter(world);
    }
    beam_hit
}

/// Pass 4.  Pickups use the rocket and disc masks, not just the boxes.
pub fn player_vs_power_ups(world: &mut World) {
    if world.player.life.is_respawning() {
        return;
    }
    let ship = world.player.rect();
    let ship_at = top_left(&ship);
    let mut collected = Vec::new();
    world.power_ups.retain(|p| {
        let r = p.rect();
        let touching = r.intersects(&ship) && player_mask().overlaps(ship_at, power_up_mask(), top_left(&r));
        if touching {
            collected.push(p.kind);
        }
        !touching
    });

    for kind in collected {
        tracing::debug!(?kind, now = world.now, "Power-up collected");
        combat::apply_power_up(&mut world.player, kind, world.now, &mut world.events);
    }
}

/// Pass 5.  Enemy bullets, asteroids and the boss against an unprotected
/// ship.  Every colliding bullet and asteroid is destroyed, but the ship
/// loses at most one life per tick.  A shield, invulnerability or a pending
/// respawn suppresses the whole outcome.
pub fn hostiles_vs_player(world: &mut World, rng: &mut impl Rng) {
    if world.status != GameStatus::Playing || world.player.is_protected() {
        return;
    }
    let ship = world.player.rect();
    let mut struck = false;

    let (spent, flying): (Vec<_>, Vec<_>) = std::mem::take(&mut world.enemy_bullets)
        .into_iter()
        .partition(|b| b.rect().intersects(&ship));
    world.enemy_bullets = flying;
    for b in spent {
        struck = true;
        explode(world, ExplosionKind::Bullet, b.pos, rng);
    }

    let (rammed, clear): (Vec<_>, Vec<_>) = std::mem::take(&mut world.enemies)
        .into_iter()
        .partition(|e| e.rect().intersects(&ship));
    world.enemies = clear;
    for e in rammed {
        struck = true;
        explode(world, ExplosionKind::Enemy, e.pos, rng);
    }

    if world
        .boss
        .as_ref()
        .is_some_and(|b| b.is_alive() && b.rect().intersects(&ship))
    {
        struck = true;
    }

    if struck {
        lose_life(world, rng);
    }
}

/// One life lost: explode the ship, clear its power-ups and start the
/// respawn delay, or end the round on the last life.
pub fn lose_life(world: &mut World, rng: &mut impl Rng) {
    let lives_before = world.player.lives;
    let at = world.player.pos;
    explode(world, ExplosionKind::Player, at, rng);
    world.events.push(GameEvent::PlayerHit);

    let p = &mut world.player;
    p.lives = p.lives.saturating_sub(1);
    release_laser(p, &mut world.events);
    p.power = PowerState::default();
    debug_assert!(lives_before - p.lives <= 1);

    if p.lives == 0 {
        world.status = GameStatus::GameOver;
        world.events.push(GameEvent::GameOver);
        tracing::info!(score = world.score, frame = world.frame, "Game over");
    } else {
        p.pos = Player::start_position(world.bounds);
        p.life = LifeState::Respawning {
            until: Expiry::after(world.now, player::RESPAWN_DELAY_MS),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masks_are_built_once() {
        assert!(std::ptr::eq(player_mask(), player_mask()));
        assert!(power_up_mask().count() > 0);
    }
}

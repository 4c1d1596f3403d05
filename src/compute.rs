//! Game-loop orchestration.
//!
//! `tick` takes an immutable reference to the current `World` (plus the input
//! snapshot, the tick's clock reading and an RNG handle) and returns a brand
//! new `World`.  Every system inside a tick works on that one copy, in a
//! fixed order, so collision checks always see fully moved entities.

use rand::Rng;

use crate::collision;
use crate::combat;
use crate::config::{GameConfig, ShipKind};
use crate::entities::{Bounds, Encounter, GameEvent, GameStatus, Player, World};
use crate::error::GameError;
use crate::input::InputSnapshot;
use crate::spawner;
use crate::timers::LifeTransition;

/// One tick is one fixed simulation step.
pub const DT: f32 = 1.0;

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the opening state of a round: fresh ship, the configured number of
/// asteroids, empty everything else.  The config is validated first.
pub fn init_state(
    ship: ShipKind,
    config: GameConfig,
    high_score: u32,
    now: u64,
    rng: &mut impl Rng,
) -> Result<World, GameError> {
    config.validate()?;
    let bounds = Bounds {
        width: config.width,
        height: config.height,
    };
    let enemies = (0..config.initial_enemies)
        .map(|_| spawner::spawn_enemy(bounds, rng))
        .collect();
    Ok(World {
        player: Player::new(ship, bounds),
        enemies,
        bullets: Vec::new(),
        enemy_bullets: Vec::new(),
        power_ups: Vec::new(),
        boss: None,
        explosions: Vec::new(),
        encounter: Encounter::Wave { started_at: now },
        score: 0,
        high_score,
        status: GameStatus::Playing,
        now,
        frame: 0,
        bounds,
        config,
        events: Vec::new(),
    })
}

/// Start over after game over.  Only the ship choice and the config survive;
/// `high_score` is the best score as read back from storage.
pub fn reset(state: &World, high_score: u32, now: u64, rng: &mut impl Rng) -> Result<World, GameError> {
    tracing::debug!(ship = state.player.ship.key(), high_score, "Round reset");
    init_state(state.player.ship, state.config.clone(), high_score, now, rng)
}

// ── Per-frame tick ───────────────────────────────────────────────────────────

/// Advance the simulation by one tick at time `now` (ms).  A finished round
/// is returned unchanged apart from its event list being cleared.
pub fn tick(state: &World, input: &InputSnapshot, now: u64, rng: &mut impl Rng) -> World {
    let mut world = state.clone();
    world.events.clear();
    if world.status == GameStatus::GameOver {
        return world;
    }
    debug_assert!(now >= world.now, "clock went backwards");
    world.now = now;
    world.frame += 1;

    advance_entities(&mut world, input, rng);
    fire(&mut world, input);
    spawner::update_encounter(&mut world, rng);
    spawner::roll_spawns(&mut world, rng);
    collision::resolve(&mut world, rng);
    expire_timers(&mut world);

    world
}

// ── 1. Movement ──────────────────────────────────────────────────────────────

fn advance_entities(world: &mut World, input: &InputSnapshot, rng: &mut impl Rng) {
    let bounds = world.bounds;

    world.player.advance(DT, input, bounds);
    world.bullets.retain_mut(|b| b.advance(DT, bounds));
    world.enemy_bullets.retain_mut(|b| b.advance(DT, bounds));
    for e in &mut world.enemies {
        e.advance(DT, bounds, rng);
    }
    world.power_ups.retain_mut(|p| p.advance(DT, bounds));
    if let Some(boss) = world.boss.as_mut() {
        boss.advance(DT, world.player.pos.x, bounds);
    }
    world.explosions.retain_mut(|e| e.advance(DT));
}

// ── 2. Weapons ───────────────────────────────────────────────────────────────

fn fire(world: &mut World, input: &InputSnapshot) {
    let now = world.now;
    if input.fire && world.player.can_shoot(now) {
        let volley = world.player.volley(now);
        world.bullets.extend(volley);
        world.events.push(GameEvent::Shoot);
    }
    if let Some(boss) = world.boss.as_mut() {
        if boss.ready_to_fire(now) {
            let volley = boss.volley(now);
            world.enemy_bullets.extend(volley);
        }
    }
}

// ── 3. Timers ────────────────────────────────────────────────────────────────

fn expire_timers(world: &mut World) {
    let now = world.now;
    combat::expire_power_ups(&mut world.player, now, &mut world.events);
    if let Some(LifeTransition::Respawned) = world.player.life.update(now) {
        tracing::debug!(lives = world.player.lives, "Player respawned");
    }
}

//! All game entity types and the world that owns them.
//!
//! Each category lives in its own `Vec` on `World`; destroying an entity means
//! removing it from that collection.

use crate::config::{GameConfig, ShipKind};
use crate::constants::{boss, bullet, laser, player, powerup};
use crate::geometry::{Rect, Vec2};
use crate::timers::{Expiry, LifeState, PowerState, WeaponMode};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    GameOver,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BulletOwner {
    Player,
    Enemy,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PowerUpKind {
    Shield,
    Laser,
    TripleShot,
    SpeedBoost,
}

impl PowerUpKind {
    /// Kinds that fall from the sky on their own.
    pub const FALLING: [PowerUpKind; 3] = [PowerUpKind::Shield, PowerUpKind::Laser, PowerUpKind::TripleShot];
    /// Kinds an asteroid can drop.
    pub const ALL: [PowerUpKind; 4] = [
        PowerUpKind::Shield,
        PowerUpKind::Laser,
        PowerUpKind::TripleShot,
        PowerUpKind::SpeedBoost,
    ];
}

/// Discrete cues for the audio collaborator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameEvent {
    Shoot,
    Explosion,
    PowerUpCollected(PowerUpKind),
    LaserStart,
    LaserStop,
    PlayerHit,
    BossSpawned,
    BossDefeated,
    GameOver,
}

// ── Bounds ───────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }
}

// ── Player ───────────────────────────────────────────────────────────────────

/// Beam attached to the ship while the laser power-up is active.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Laser {
    /// Time of the last damage application
    pub last_damage: Option<u64>,
}

#[derive(Clone, Debug)]
pub struct Player {
    /// Centre of the hit box
    pub pos: Vec2,
    pub lives: u32,
    pub ship: ShipKind,
    pub base_speed: f32,
    pub shoot_cooldown_ms: u64,
    pub last_shot: Option<u64>,
    pub life: LifeState,
    pub power: PowerState,
    pub laser: Option<Laser>,
}

impl Player {
    pub fn new(ship: ShipKind, bounds: Bounds) -> Self {
        let stats = ship.stats();
        Self {
            pos: Self::start_position(bounds),
            lives: player::STARTING_LIVES,
            ship,
            base_speed: stats.speed,
            shoot_cooldown_ms: stats.shoot_cooldown_ms,
            last_shot: None,
            life: LifeState::Normal,
            power: PowerState::default(),
            laser: None,
        }
    }

    /// Centred horizontally, bottom edge just above the bottom of the field.
    pub fn start_position(bounds: Bounds) -> Vec2 {
        Vec2::new(
            bounds.width / 2.0,
            bounds.height - player::BOTTOM_MARGIN - player::HEIGHT / 2.0,
        )
    }

    pub fn rect(&self) -> Rect {
        Rect::centered(self.pos, player::WIDTH, player::HEIGHT)
    }

    /// Movement speed including the speed boost.
    pub fn speed(&self) -> f32 {
        if self.power.has(WeaponMode::SpeedBoost) {
            self.base_speed * powerup::SPEED_BOOST_FACTOR
        } else {
            self.base_speed
        }
    }

    pub fn is_shielded(&self) -> bool {
        self.power.is_shielded()
    }

    pub fn has_triple_shot(&self) -> bool {
        self.power.has(WeaponMode::TripleShot)
    }

    pub fn has_speed_boost(&self) -> bool {
        self.power.has(WeaponMode::SpeedBoost)
    }

    pub fn laser_active(&self) -> bool {
        self.power.has(WeaponMode::Laser)
    }

    /// Immune to hostile contact this tick.
    pub fn is_protected(&self) -> bool {
        self.is_shielded() || self.life.is_intangible()
    }

    /// The beam reaches from the ship's nose to the top of the field.
    pub fn laser_rect(&self) -> Option<Rect> {
        self.laser.map(|_| {
            let top = self.rect().top().max(0.0);
            Rect::new(self.pos.x - laser::WIDTH / 2.0, 0.0, laser::WIDTH, top)
        })
    }
}

// ── Asteroids ────────────────────────────────────────────────────────────────

/// Size, health and score for an asteroid level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LevelStats {
    pub size: u32,
    pub health: u32,
    pub points: u32,
}

/// Level table; levels outside 1..=4 are clamped.
pub fn level_stats(level: u8) -> LevelStats {
    match level.clamp(1, 4) {
        1 => LevelStats { size: 30, health: 1, points: 10 },
        2 => LevelStats { size: 40, health: 3, points: 20 },
        3 => LevelStats { size: 50, health: 5, points: 30 },
        _ => LevelStats { size: 64, health: 10, points: 50 },
    }
}

#[derive(Clone, Debug)]
pub struct Enemy {
    pub pos: Vec2,
    pub vel: Vec2,
    pub level: u8,
    pub health: u32,
    /// Degrees
    pub angle: f32,
    /// Degrees per tick
    pub rotation_speed: f32,
}

impl Enemy {
    pub fn new(level: u8, pos: Vec2, vel: Vec2, rotation_speed: f32) -> Self {
        let level = level.clamp(1, 4);
        Self {
            pos,
            vel,
            level,
            health: level_stats(level).health,
            angle: 0.0,
            rotation_speed,
        }
    }

    pub fn size(&self) -> f32 {
        level_stats(self.level).size as f32
    }

    pub fn points(&self) -> u32 {
        level_stats(self.level).points
    }

    pub fn rect(&self) -> Rect {
        let s = self.size();
        Rect::centered(self.pos, s, s)
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }
}

// ── Projectiles & pickups ────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Bullet {
    pub pos: Vec2,
    pub vel: Vec2,
    pub owner: BulletOwner,
}

impl Bullet {
    /// Bullet launched at `angle_deg` (0° = right, 90° = down).
    pub fn launched(pos: Vec2, angle_deg: f32, speed: f32, owner: BulletOwner) -> Self {
        Self {
            pos,
            vel: Vec2::from_angle_deg(angle_deg) * speed,
            owner,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::centered(self.pos, bullet::WIDTH, bullet::HEIGHT)
    }
}

#[derive(Clone, Debug)]
pub struct PowerUp {
    pub pos: Vec2,
    pub kind: PowerUpKind,
}

impl PowerUp {
    pub fn rect(&self) -> Rect {
        Rect::centered(self.pos, powerup::SIZE, powerup::SIZE)
    }
}

// ── Boss ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Boss {
    pub pos: Vec2,
    pub max_health: u32,
    pub health: u32,
    pub reached_position: bool,
    pub last_shot: Option<u64>,
    /// Health at the last shield drop
    pub last_drop_health: u32,
    /// Horizontal direction while bouncing, ±1
    pub direction: f32,
}

impl Boss {
    /// Boss centred horizontally, fully above the field.
    pub fn new(bounds: Bounds) -> Self {
        Self {
            pos: Vec2::new(bounds.width / 2.0, -boss::HEIGHT / 2.0),
            max_health: boss::MAX_HEALTH,
            health: boss::MAX_HEALTH,
            reached_position: false,
            last_shot: None,
            last_drop_health: boss::MAX_HEALTH,
            direction: 1.0,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::centered(self.pos, boss::WIDTH, boss::HEIGHT)
    }

    pub fn health_ratio(&self) -> f32 {
        if self.max_health == 0 {
            return 0.0;
        }
        self.health as f32 / self.max_health as f32
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }
}

// ── Explosions ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Accumulated downward pull
    pub fall: f32,
    pub lifetime: u32,
    pub max_lifetime: u32,
}

impl Particle {
    /// 1.0 when fresh, 0.0 when spent.
    pub fn alpha(&self) -> f32 {
        if self.max_lifetime == 0 {
            return 0.0;
        }
        self.lifetime as f32 / self.max_lifetime as f32
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExplosionKind {
    Enemy,
    Player,
    Bullet,
    Boss,
}

#[derive(Clone, Debug)]
pub struct Explosion {
    pub kind: ExplosionKind,
    pub particles: Vec<Particle>,
}

impl Explosion {
    pub fn is_alive(&self) -> bool {
        self.particles.iter().any(|p| p.lifetime > 0)
    }
}

// ── Encounter phases ─────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Encounter {
    /// Normal asteroid spawning; round timer runs from `started_at`.
    Wave { started_at: u64 },
    /// Asteroids cleared, boss arrives when this expires.
    Buffer { until: Expiry },
    /// Boss on the field.
    Boss,
}

// ── Master game state ────────────────────────────────────────────────────────

/// The entire round.  Cloneable so `tick` can return a fresh copy.
#[derive(Clone, Debug)]
pub struct World {
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub bullets: Vec<Bullet>,
    pub enemy_bullets: Vec<Bullet>,
    pub power_ups: Vec<PowerUp>,
    pub boss: Option<Boss>,
    pub explosions: Vec<Explosion>,
    pub encounter: Encounter,
    pub score: u32,
    /// Best score on record when the round started
    pub high_score: u32,
    pub status: GameStatus,
    /// Simulation time of the last tick
    pub now: u64,
    pub frame: u64,
    pub bounds: Bounds,
    pub config: GameConfig,
    /// Cues produced by the last tick
    pub events: Vec<GameEvent>,
}

impl World {
    /// Round time shown on the HUD; frozen outside waves.
    pub fn round_elapsed_ms(&self) -> u64 {
        match self.encounter {
            Encounter::Wave { started_at } => self.now.saturating_sub(started_at),
            Encounter::Buffer { .. } | Encounter::Boss => self.config.boss_after_ms,
        }
    }

    pub fn boss_active(&self) -> bool {
        !matches!(self.encounter, Encounter::Wave { .. })
    }
}

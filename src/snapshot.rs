//! Render handoff: a flat list of what is alive this tick plus HUD scalars.
//! The core never draws; the front-end turns a `Frame` into pixels or cells.

use crate::combat::BossPhase;
use crate::entities::{ExplosionKind, GameStatus, PowerUpKind, World};
use crate::geometry::{Rect, Vec2};

/// One drawable entity.
#[derive(Clone, Debug, PartialEq)]
pub enum EntityView {
    Player { pos: Vec2, shielded: bool },
    Enemy { pos: Vec2, size: f32, level: u8, angle: f32 },
    Bullet { pos: Vec2 },
    EnemyBullet { pos: Vec2 },
    PowerUp { pos: Vec2, kind: PowerUpKind },
    Boss { pos: Vec2, phase: BossPhase },
    Laser { rect: Rect },
    Particle { pos: Vec2, alpha: f32, kind: ExplosionKind },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BossHud {
    pub health: u32,
    pub max_health: u32,
    pub phase: BossPhase,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Hud {
    pub score: u32,
    pub high_score: u32,
    pub lives: u32,
    pub round_elapsed_ms: u64,
    pub boss: Option<BossHud>,
    pub boss_incoming: bool,
    pub shield: bool,
    pub triple_shot: bool,
    pub speed_boost: bool,
    pub laser_active: bool,
    /// Time left on the active weapon power-up
    pub weapon_remaining_ms: Option<u64>,
    pub game_over: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    pub width: f32,
    pub height: f32,
    /// Back to front
    pub entities: Vec<EntityView>,
    pub hud: Hud,
}

/// Build the frame for the current state.  A hidden (respawning or
/// flash-off) ship is left out.
pub fn frame(world: &World) -> Frame {
    let mut entities = Vec::with_capacity(
        world.enemies.len()
            + world.bullets.len()
            + world.enemy_bullets.len()
            + world.power_ups.len()
            + 4,
    );

    for e in &world.explosions {
        entities.extend(e.particles.iter().filter(|p| p.lifetime > 0).map(|p| EntityView::Particle {
            pos: p.pos,
            alpha: p.alpha(),
            kind: e.kind,
        }));
    }
    entities.extend(world.enemies.iter().map(|e| EntityView::Enemy {
        pos: e.pos,
        size: e.size(),
        level: e.level,
        angle: e.angle,
    }));
    if let Some(b) = &world.boss {
        entities.push(EntityView::Boss {
            pos: b.pos,
            phase: b.phase(),
        });
    }
    entities.extend(world.power_ups.iter().map(|p| EntityView::PowerUp { pos: p.pos, kind: p.kind }));
    entities.extend(world.bullets.iter().map(|b| EntityView::Bullet { pos: b.pos }));
    entities.extend(world.enemy_bullets.iter().map(|b| EntityView::EnemyBullet { pos: b.pos }));

    let p = &world.player;
    if p.life.is_visible() && world.status == GameStatus::Playing {
        if let Some(rect) = p.laser_rect() {
            entities.push(EntityView::Laser { rect });
        }
        entities.push(EntityView::Player {
            pos: p.pos,
            shielded: p.is_shielded(),
        });
    }

    Frame {
        width: world.bounds.width,
        height: world.bounds.height,
        entities,
        hud: hud(world),
    }
}

pub fn hud(world: &World) -> Hud {
    let p = &world.player;
    Hud {
        score: world.score,
        high_score: world.high_score.max(world.score),
        lives: p.lives,
        round_elapsed_ms: world.round_elapsed_ms(),
        boss: world.boss.as_ref().map(|b| BossHud {
            health: b.health,
            max_health: b.max_health,
            phase: b.phase(),
        }),
        boss_incoming: world.boss_active() && world.boss.is_none(),
        shield: p.is_shielded(),
        triple_shot: p.has_triple_shot(),
        speed_boost: p.has_speed_boost(),
        laser_active: p.laser_active(),
        weapon_remaining_ms: p.power.weapon.map(|(_, expiry)| expiry.remaining(world.now)),
        game_over: world.status == GameStatus::GameOver,
    }
}

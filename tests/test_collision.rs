mod common;

use rocket_shooter::collision::*;
use rocket_shooter::combat::apply_power_up;
use rocket_shooter::entities::*;
use rocket_shooter::geometry::Vec2;

use common::*;

// ── Bullets × asteroids ───────────────────────────────────────────────────────

#[test]
fn level_one_asteroid_dies_to_one_bullet() {
    let mut w = make_world();
    let mut rng = seeded_rng();
    w.enemies.push(still_enemy(1, 200.0, 200.0));
    w.bullets.push(player_bullet(200.0, 200.0));

    bullets_vs_enemies(&mut w, &mut rng);

    assert!(w.enemies.is_empty());
    assert!(w.bullets.is_empty());
    assert_eq!(w.score, 10);
    assert_eq!(w.explosions.len(), 1);
    assert_eq!(w.explosions[0].kind, ExplosionKind::Enemy);
    assert!(w.events.contains(&GameEvent::Explosion));
}

#[test]
fn health_drops_by_number_of_bullets_that_hit() {
    let mut w = make_world();
    let mut rng = seeded_rng();
    w.enemies.push(still_enemy(3, 200.0, 200.0)); // health 5
    w.enemies.push(still_enemy(2, 600.0, 200.0)); // health 3
    for _ in 0..3 {
        w.bullets.push(player_bullet(200.0, 200.0));
        w.bullets.push(player_bullet(600.0, 200.0));
    }
    w.bullets.push(player_bullet(50.0, 400.0)); // miss

    bullets_vs_enemies(&mut w, &mut rng);

    assert_eq!(w.enemies.len(), 1);
    assert_eq!(w.enemies[0].level, 3);
    assert_eq!(w.enemies[0].health, 2);
    assert_eq!(w.score, 20);
    assert_eq!(w.bullets.len(), 1);
}

#[test]
fn bullet_over_two_asteroids_hits_only_the_first() {
    let mut w = make_world();
    let mut rng = seeded_rng();
    w.enemies.push(still_enemy(2, 200.0, 200.0));
    w.enemies.push(still_enemy(2, 210.0, 200.0));
    w.bullets.push(player_bullet(205.0, 200.0));

    bullets_vs_enemies(&mut w, &mut rng);

    assert_eq!(w.enemies[0].health, 2);
    assert_eq!(w.enemies[1].health, 3);
}

#[test]
fn overkill_scores_once() {
    let mut w = make_world();
    let mut rng = seeded_rng();
    w.enemies.push(still_enemy(1, 200.0, 200.0));
    for _ in 0..5 {
        w.bullets.push(player_bullet(200.0, 200.0));
    }

    bullets_vs_enemies(&mut w, &mut rng);

    assert_eq!(w.score, 10);
    assert_eq!(w.explosions.len(), 1);
    assert!(w.bullets.is_empty());
}

#[test]
fn guaranteed_drop_leaves_power_up_where_asteroid_died() {
    let mut w = make_world();
    w.config.enemy_drop_chance = 1.0;
    let mut rng = seeded_rng();
    w.enemies.push(still_enemy(1, 200.0, 200.0));
    w.bullets.push(player_bullet(200.0, 200.0));

    bullets_vs_enemies(&mut w, &mut rng);

    assert_eq!(w.power_ups.len(), 1);
    assert_eq!(w.power_ups[0].pos, Vec2::new(200.0, 200.0));
}

// ── Laser ─────────────────────────────────────────────────────────────────────

#[test]
fn laser_damages_once_per_window() {
    let mut w = make_world();
    let mut rng = seeded_rng();
    let x = w.player.pos.x;
    w.enemies.push(still_enemy(4, x, 200.0)); // health 10
    w.enemies.push(still_enemy(4, 100.0, 200.0)); // outside the beam
    let mut events = Vec::new();
    apply_power_up(&mut w.player, PowerUpKind::Laser, 0, &mut events);

    w.now = 0;
    resolve(&mut w, &mut rng);
    assert_eq!(w.enemies[0].health, 9);

    w.now = 100;
    resolve(&mut w, &mut rng);
    assert_eq!(w.enemies[0].health, 9);

    w.now = 500;
    resolve(&mut w, &mut rng);
    assert_eq!(w.enemies[0].health, 8);
    assert_eq!(w.enemies[1].health, 10);
}

#[test]
fn laser_finishes_off_weak_asteroids() {
    let mut w = make_world();
    let mut rng = seeded_rng();
    let x = w.player.pos.x;
    w.enemies.push(still_enemy(1, x, 100.0));
    w.enemies.push(still_enemy(1, x, 300.0));
    let mut events = Vec::new();
    apply_power_up(&mut w.player, PowerUpKind::Laser, 0, &mut events);

    resolve(&mut w, &mut rng);

    assert!(w.enemies.is_empty());
    assert_eq!(w.score, 20);
}

// ── Boss ──────────────────────────────────────────────────────────────────────

#[test]
fn twenty_damage_drops_exactly_one_shield() {
    let mut w = make_world();
    let mut rng = seeded_rng();
    let boss = stationed_boss(&w);
    let at = boss.pos;
    w.boss = Some(boss);
    w.encounter = Encounter::Boss;
    for _ in 0..20 {
        w.bullets.push(player_bullet(at.x, at.y));
    }

    player_vs_boss_damage(&mut w, false, &mut rng);

    assert_eq!(w.boss.as_ref().unwrap().health, 220);
    assert_eq!(w.power_ups.len(), 1);
    assert_eq!(w.power_ups[0].kind, PowerUpKind::Shield);
    assert_eq!(w.power_ups[0].pos, at);

    // 19 more is not enough for another
    for _ in 0..19 {
        w.bullets.push(player_bullet(at.x, at.y));
    }
    player_vs_boss_damage(&mut w, false, &mut rng);
    assert_eq!(w.boss.as_ref().unwrap().health, 201);
    assert_eq!(w.power_ups.len(), 1);

    w.bullets.push(player_bullet(at.x, at.y));
    player_vs_boss_damage(&mut w, false, &mut rng);
    assert_eq!(w.boss.as_ref().unwrap().health, 200);
    assert_eq!(w.power_ups.len(), 2);
}

#[test]
fn bullets_pass_through_descending_boss() {
    let mut w = make_world();
    let mut rng = seeded_rng();
    let mut boss = stationed_boss(&w);
    boss.reached_position = false;
    let at = boss.pos;
    w.boss = Some(boss);
    w.bullets.push(player_bullet(at.x, at.y));

    player_vs_boss_damage(&mut w, false, &mut rng);

    assert_eq!(w.boss.as_ref().unwrap().health, 240);
    assert_eq!(w.bullets.len(), 1);
}

#[test]
fn killing_the_boss_ends_the_encounter() {
    let mut w = make_world();
    let mut rng = seeded_rng();
    let mut boss = stationed_boss(&w);
    boss.health = 1;
    boss.last_drop_health = 20;
    let at = boss.pos;
    w.boss = Some(boss);
    w.encounter = Encounter::Boss;
    w.now = 45_000;
    w.score = 70;
    w.bullets.push(player_bullet(at.x, at.y));

    player_vs_boss_damage(&mut w, false, &mut rng);

    assert!(w.boss.is_none());
    assert_eq!(w.score, 1_070);
    assert_eq!(w.encounter, Encounter::Wave { started_at: 45_000 });
    assert_eq!(w.round_elapsed_ms(), 0);
    assert!(w.events.contains(&GameEvent::BossDefeated));
    assert!(w.explosions.iter().any(|e| e.kind == ExplosionKind::Boss));
}

// ── Power-up pickup ───────────────────────────────────────────────────────────

#[test]
fn pickup_uses_masks_not_boxes() {
    let mut w = make_world();
    let ship = w.player.rect();

    // Boxes overlap at the ship's top-left corner, but the rocket's nose
    // leaves that corner empty.
    w.power_ups.push(PowerUp {
        pos: Vec2::new(ship.left() + 2.0, ship.top() + 2.0),
        kind: PowerUpKind::TripleShot,
    });
    player_vs_power_ups(&mut w);
    assert_eq!(w.power_ups.len(), 1);
    assert!(!w.player.has_triple_shot());

    w.power_ups[0].pos = w.player.pos;
    player_vs_power_ups(&mut w);
    assert!(w.power_ups.is_empty());
    assert!(w.player.has_triple_shot());
    assert!(w.events.contains(&GameEvent::PowerUpCollected(PowerUpKind::TripleShot)));
}

// ── Hostiles × player ─────────────────────────────────────────────────────────

#[test]
fn simultaneous_hits_cost_one_life() {
    let mut w = make_world();
    let mut rng = seeded_rng();
    let at = w.player.pos;
    w.enemies.push(still_enemy(2, at.x, at.y));
    w.enemies.push(still_enemy(1, at.x + 5.0, at.y));
    w.enemy_bullets.push(enemy_bullet(at.x, at.y));
    w.enemy_bullets.push(enemy_bullet(at.x - 5.0, at.y));

    hostiles_vs_player(&mut w, &mut rng);

    assert_eq!(w.player.lives, 2);
    assert!(w.enemies.is_empty());
    assert!(w.enemy_bullets.is_empty());
    assert!(w.player.life.is_respawning());
    assert_eq!(w.events.iter().filter(|e| **e == GameEvent::PlayerHit).count(), 1);
    assert!(w.explosions.iter().any(|e| e.kind == ExplosionKind::Player));
    // Rammed asteroids do not score
    assert_eq!(w.score, 0);
}

#[test]
fn shield_blocks_the_whole_collision() {
    let mut w = make_world();
    let mut rng = seeded_rng();
    let mut events = Vec::new();
    apply_power_up(&mut w.player, PowerUpKind::Shield, 0, &mut events);
    let at = w.player.pos;
    for dx in [-5.0, 0.0, 5.0] {
        w.enemies.push(still_enemy(2, at.x + dx, at.y));
    }

    hostiles_vs_player(&mut w, &mut rng);

    assert_eq!(w.player.lives, 3);
    assert_eq!(w.enemies.len(), 3);
    assert!(w.enemies.iter().all(|e| e.health == 3));
    assert!(w.explosions.is_empty());
}

#[test]
fn boss_contact_costs_a_life_but_spares_the_boss() {
    let mut w = make_world();
    let mut rng = seeded_rng();
    let mut boss = stationed_boss(&w);
    boss.pos = w.player.pos;
    w.boss = Some(boss);

    hostiles_vs_player(&mut w, &mut rng);

    assert_eq!(w.player.lives, 2);
    assert_eq!(w.boss.as_ref().unwrap().health, 240);
}

#[test]
fn last_life_ends_the_round() {
    let mut w = make_world();
    let mut rng = seeded_rng();
    w.player.lives = 1;
    let at = w.player.pos;
    w.enemy_bullets.push(enemy_bullet(at.x, at.y));

    hostiles_vs_player(&mut w, &mut rng);

    assert_eq!(w.player.lives, 0);
    assert_eq!(w.status, GameStatus::GameOver);
    assert!(w.events.contains(&GameEvent::GameOver));
}

#[test]
fn losing_a_life_drops_power_ups() {
    let mut w = make_world();
    let mut rng = seeded_rng();
    let mut events = Vec::new();
    apply_power_up(&mut w.player, PowerUpKind::Laser, 0, &mut events);
    assert!(w.player.laser.is_some());

    lose_life(&mut w, &mut rng);

    assert!(w.player.laser.is_none());
    assert!(!w.player.laser_active());
    assert!(w.events.contains(&GameEvent::LaserStop));
}

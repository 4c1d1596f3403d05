mod common;

use rocket_shooter::config::ShipKind;
use rocket_shooter::entities::*;
use rocket_shooter::geometry::Vec2;

use common::*;

#[test]
fn level_table_matches_asteroid_classes() {
    let health: Vec<u32> = (1..=4).map(|l| level_stats(l).health).collect();
    let points: Vec<u32> = (1..=4).map(|l| level_stats(l).points).collect();
    assert_eq!(health, vec![1, 3, 5, 10]);
    assert_eq!(points, vec![10, 20, 30, 50]);

    // Bigger levels are bigger rocks
    let sizes: Vec<u32> = (1..=4).map(|l| level_stats(l).size).collect();
    assert!(sizes.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn enemy_starts_at_full_health() {
    let e = Enemy::new(3, Vec2::ZERO, Vec2::ZERO, 0.0);
    assert_eq!(e.health, 5);
    assert_eq!(e.points(), 30);
    assert!(e.is_alive());
}

#[test]
fn enemy_level_is_clamped() {
    assert_eq!(Enemy::new(0, Vec2::ZERO, Vec2::ZERO, 0.0).level, 1);
    assert_eq!(Enemy::new(9, Vec2::ZERO, Vec2::ZERO, 0.0).level, 4);
}

#[test]
fn player_uses_ship_stats() {
    let bounds = Bounds { width: 800.0, height: 600.0 };
    let heavy = Player::new(ShipKind::Heavy, bounds);
    assert_eq!(heavy.base_speed, 4.0);
    assert_eq!(heavy.shoot_cooldown_ms, 150);
    assert_eq!(heavy.lives, 3);

    // Bottom edge sits 10 units above the floor, centred horizontally
    let r = heavy.rect();
    assert_eq!(r.center().x, 400.0);
    assert_eq!(r.bottom(), 590.0);
}

#[test]
fn boss_starts_above_field_at_full_health() {
    let boss = Boss::new(Bounds { width: 800.0, height: 600.0 });
    assert_eq!(boss.health, 240);
    assert_eq!(boss.max_health, 240);
    assert!(boss.rect().bottom() <= 0.0);
    assert!(!boss.reached_position);
    assert_eq!(boss.health_ratio(), 1.0);
}

#[test]
fn laser_rect_spans_ship_nose_to_top() {
    let mut w = make_world();
    assert!(w.player.laser_rect().is_none());
    w.player.laser = Some(Laser { last_damage: None });
    let beam = w.player.laser_rect().unwrap();
    assert_eq!(beam.top(), 0.0);
    assert_eq!(beam.bottom(), w.player.rect().top());
    assert_eq!(beam.center().x, w.player.pos.x);
}

#[test]
fn world_clone_is_independent() {
    let original = make_world();
    let mut cloned = original.clone();

    cloned.player.pos.x = 99.0;
    cloned.score = 999;
    cloned.enemies.push(still_enemy(1, 5.0, 5.0));

    assert_eq!(original.player.pos.x, 400.0);
    assert_eq!(original.score, 0);
    assert!(original.enemies.is_empty());
}

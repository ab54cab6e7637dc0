use crate::game::entity::{Asteroid, Bullet, Ship};
use nalgebra::Vector2;

/// The bullet is treated as a point.
pub fn bullet_hits(bullet: &Bullet, asteroid: &Asteroid) -> bool {
    within(&bullet.position, &asteroid.position, asteroid.radius)
}

pub fn ship_hits(ship: &Ship, asteroid: &Asteroid) -> bool {
    within(&ship.position, &asteroid.position, ship.radius + asteroid.radius)
}

fn within(a: &Vector2<f64>, b: &Vector2<f64>, reach: f64) -> bool {
    (a - b).norm() < reach
}

/// Pairs each bullet, in firing order, with the first live asteroid it
/// overlaps, then drops every matched bullet and asteroid. Returns the number
/// of asteroids destroyed.
pub fn resolve_bullet_hits(bullets: &mut Vec<Bullet>, asteroids: &mut Vec<Asteroid>) -> usize {
    let mut spent = vec![false; bullets.len()];
    let mut destroyed = vec![false; asteroids.len()];
    let mut hits = 0;

    for (bi, bullet) in bullets.iter().enumerate() {
        let target = asteroids
            .iter()
            .enumerate()
            .find(|(ai, asteroid)| !destroyed[*ai] && bullet_hits(bullet, asteroid));
        if let Some((ai, _)) = target {
            spent[bi] = true;
            destroyed[ai] = true;
            hits += 1;
        }
    }

    if hits > 0 {
        *bullets = keep_unmarked(std::mem::take(bullets), &spent);
        *asteroids = keep_unmarked(std::mem::take(asteroids), &destroyed);
    }
    hits
}

fn keep_unmarked<T>(items: Vec<T>, marked: &[bool]) -> Vec<T> {
    items
        .into_iter()
        .zip(marked)
        .filter_map(|(item, &gone)| (!gone).then_some(item))
        .collect()
}

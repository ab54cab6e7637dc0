use crate::game::config::GameConfig;
use crate::game::entity::Asteroid;
use nalgebra::Vector2;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use std::f64::consts::TAU;

/// Draws velocity vectors from the `[-range, range)` square until one is at
/// least `min_speed` long.
pub fn drift_velocity(rng: &mut ChaCha8Rng, range: f64, min_speed: f64) -> Vector2<f64> {
    loop {
        let candidate = Vector2::new(rng.gen_range(-range..range), rng.gen_range(-range..range));
        if candidate.norm() >= min_speed {
            return candidate;
        }
    }
}

pub fn make_asteroid(rng: &mut ChaCha8Rng, config: &GameConfig) -> Asteroid {
    let position = Vector2::new(
        rng.gen_range(0.0..config.field.width),
        rng.gen_range(0.0..config.field.height),
    );
    let velocity = drift_velocity(rng, config.asteroid_speed_range, config.min_asteroid_speed);

    Asteroid {
        position,
        velocity,
        radius: config.asteroid_radius,
        angle: rng.gen_range(0.0..TAU),
    }
}

pub fn asteroid_field(rng: &mut ChaCha8Rng, config: &GameConfig) -> Vec<Asteroid> {
    (0..config.asteroid_count)
        .map(|_| make_asteroid(rng, config))
        .collect()
}

use crate::game::error::ConfigError;
use nalgebra::Vector2;
use serde::Deserialize;

/// Playfield bounds. Positions live in the closed box `[0, width] x [0, height]`.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Field {
    pub width: f64,
    pub height: f64,
}

impl Field {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Vector2<f64> {
        Vector2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Inclusive on every edge; used for the bullet off-field check.
    pub fn contains(&self, pos: &Vector2<f64>) -> bool {
        pos.x >= 0.0 && pos.x <= self.width && pos.y >= 0.0 && pos.y <= self.height
    }
}

impl Default for Field {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub field: Field,
    pub ship_radius: f64,
    pub asteroid_count: usize,
    pub asteroid_radius: f64,
    pub min_asteroid_speed: f64,
    /// Asteroid velocity components are drawn from `[-range, range)`.
    pub asteroid_speed_range: f64,
    pub rotation_rate: f64,
    pub thrust_accel: f64,
    pub thrust_damping: f64,
    pub bullet_speed: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            field: Field::default(),
            ship_radius: 15.0,
            asteroid_count: 5,
            asteroid_radius: 15.0,
            min_asteroid_speed: 1.0,
            asteroid_speed_range: 2.0,
            rotation_rate: 0.05,
            thrust_accel: 0.05,
            thrust_damping: 0.99,
            bullet_speed: 5.0,
        }
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("must be a positive finite number, got {value}"),
        })
    }
}

impl GameConfig {
    pub fn with_field(width: f64, height: f64) -> Self {
        Self {
            field: Field::new(width, height),
            ..Self::default()
        }
    }

    /// Parses a JSON object; missing keys keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("field.width", self.field.width)?;
        positive("field.height", self.field.height)?;
        positive("ship_radius", self.ship_radius)?;
        positive("asteroid_radius", self.asteroid_radius)?;
        positive("min_asteroid_speed", self.min_asteroid_speed)?;
        positive("asteroid_speed_range", self.asteroid_speed_range)?;
        positive("rotation_rate", self.rotation_rate)?;
        positive("thrust_accel", self.thrust_accel)?;
        positive("bullet_speed", self.bullet_speed)?;

        if !(0.0..1.0).contains(&self.thrust_damping) {
            return Err(ConfigError::Invalid {
                field: "thrust_damping",
                reason: format!("must lie in [0, 1), got {}", self.thrust_damping),
            });
        }

        // Rejection sampling needs a non-empty region of the sampling square
        // whose norm clears the floor.
        if self.min_asteroid_speed >= self.asteroid_speed_range {
            return Err(ConfigError::Invalid {
                field: "min_asteroid_speed",
                reason: format!(
                    "must be below asteroid_speed_range ({}), got {}",
                    self.asteroid_speed_range, self.min_asteroid_speed
                ),
            });
        }

        Ok(())
    }
}

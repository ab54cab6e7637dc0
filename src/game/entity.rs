use crate::game::config::Field;
use nalgebra::Vector2;

/// Distance from the ship's center to its nose, in ship radii.
pub const NOSE_OFFSET: f64 = 4.0 / 3.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum RotationInput {
    Left,
    Right,
    #[default]
    None,
}

impl RotationInput {
    /// `-1` is left, `1` is right; anything else stops rotation.
    pub fn from_code(code: i32) -> Self {
        match code {
            -1 => RotationInput::Left,
            1 => RotationInput::Right,
            _ => RotationInput::None,
        }
    }

    pub fn rate(self, magnitude: f64) -> f64 {
        match self {
            RotationInput::Left => -magnitude,
            RotationInput::Right => magnitude,
            RotationInput::None => 0.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Bullet {
    pub position: Vector2<f64>,
    pub velocity: Vector2<f64>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Asteroid {
    pub position: Vector2<f64>,
    pub velocity: Vector2<f64>,
    pub radius: f64,
    // Only used for drawing.
    pub angle: f64,
}

impl Asteroid {
    pub fn new(position: Vector2<f64>, velocity: Vector2<f64>, radius: f64) -> Self {
        Self {
            position,
            velocity,
            radius,
            angle: 0.0,
        }
    }

    pub fn speed(&self) -> f64 {
        self.velocity.norm()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Ship {
    pub position: Vector2<f64>,
    pub radius: f64,
    pub angle: f64,
    pub rotation: f64,
    pub thrust: Vector2<f64>,
    pub thrusting: bool,
    pub bullets: Vec<Bullet>,
}

impl Ship {
    pub fn new(position: Vector2<f64>, radius: f64) -> Self {
        Self {
            position,
            radius,
            angle: 0.0,
            rotation: 0.0,
            thrust: Vector2::zeros(),
            thrusting: false,
            bullets: Vec::new(),
        }
    }

    /// Unit vector the ship is facing, in screen coordinates.
    pub fn heading(&self) -> Vector2<f64> {
        Vector2::new(self.angle.cos(), self.angle.sin())
    }

    pub fn nose(&self) -> Vector2<f64> {
        self.position + self.heading() * (NOSE_OFFSET * self.radius)
    }

    pub fn spawn_bullet(&self, speed: f64) -> Bullet {
        Bullet {
            position: self.nose(),
            velocity: self.heading() * speed,
        }
    }
}

fn wrap_axis(value: f64, max: f64) -> f64 {
    if value < 0.0 {
        max
    } else if value > max {
        0.0
    } else {
        value
    }
}

/// Toroidal wrap, one axis at a time. Exact boundary values are left alone.
pub fn wrap(position: &mut Vector2<f64>, field: &Field) {
    position.x = wrap_axis(position.x, field.width);
    position.y = wrap_axis(position.y, field.height);
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn wrap_moves_to_opposite_edge_per_axis() {
        let field = Field::new(200.0, 100.0);

        let mut pos = Vector2::new(-0.5, 50.0);
        wrap(&mut pos, &field);
        assert_eq!(pos, Vector2::new(200.0, 50.0));

        let mut pos = Vector2::new(10.0, 100.5);
        wrap(&mut pos, &field);
        assert_eq!(pos, Vector2::new(10.0, 0.0));

        let mut pos = Vector2::new(200.0, 0.0);
        wrap(&mut pos, &field);
        assert_eq!(pos, Vector2::new(200.0, 0.0));
    }

    #[test]
    fn bullet_spawns_at_nose_along_heading() {
        let mut ship = Ship::new(Vector2::new(100.0, 100.0), 15.0);
        ship.angle = std::f64::consts::FRAC_PI_2;

        let bullet = ship.spawn_bullet(5.0);
        assert_relative_eq!(bullet.position.x, 100.0, epsilon = 1e-9);
        assert_relative_eq!(bullet.position.y, 120.0, epsilon = 1e-9);
        assert_relative_eq!(bullet.velocity.x, 0.0, epsilon = 1e-9);
        assert_relative_eq!(bullet.velocity.y, 5.0, epsilon = 1e-9);
    }

    #[test]
    fn rotation_codes_outside_range_stop_rotation() {
        assert_eq!(RotationInput::from_code(-1), RotationInput::Left);
        assert_eq!(RotationInput::from_code(1), RotationInput::Right);
        assert_eq!(RotationInput::from_code(7), RotationInput::None);
        assert_eq!(RotationInput::Left.rate(0.05), -0.05);
        assert_eq!(RotationInput::None.rate(0.05), 0.0);
    }
}

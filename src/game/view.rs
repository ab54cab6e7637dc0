use crate::game::{Asteroid, Bullet, GameState, Outcome, Ship, Snapshot};
use serde::Serialize;

pub fn state_label(state: GameState) -> &'static str {
    match state {
        GameState::Playing => "playing",
        GameState::Over(Outcome::Win) => "win",
        GameState::Over(Outcome::Loss) => "loss",
    }
}

#[derive(Serialize)]
struct BulletView {
    x: f64,
    y: f64,
    dx: f64,
    dy: f64,
}

#[derive(Serialize)]
struct AsteroidView {
    x: f64,
    y: f64,
    dx: f64,
    dy: f64,
    radius: f64,
    angle: f64,
}

#[derive(Serialize)]
struct ShipView {
    x: f64,
    y: f64,
    radius: f64,
    angle: f64,
    thrust_x: f64,
    thrust_y: f64,
    thrusting: bool,
}

#[derive(Serialize)]
struct SnapshotView {
    state: &'static str,
    tick: u64,
    width: f64,
    height: f64,
    asteroids_left: usize,
    ship: ShipView,
    bullets: Vec<BulletView>,
    asteroids: Vec<AsteroidView>,
}

impl From<&Bullet> for BulletView {
    fn from(b: &Bullet) -> Self {
        Self {
            x: b.position.x,
            y: b.position.y,
            dx: b.velocity.x,
            dy: b.velocity.y,
        }
    }
}

impl From<&Asteroid> for AsteroidView {
    fn from(a: &Asteroid) -> Self {
        Self {
            x: a.position.x,
            y: a.position.y,
            dx: a.velocity.x,
            dy: a.velocity.y,
            radius: a.radius,
            angle: a.angle,
        }
    }
}

impl From<&Ship> for ShipView {
    fn from(ship: &Ship) -> Self {
        Self {
            x: ship.position.x,
            y: ship.position.y,
            radius: ship.radius,
            angle: ship.angle,
            thrust_x: ship.thrust.x,
            thrust_y: ship.thrust.y,
            thrusting: ship.thrusting,
        }
    }
}

impl From<&Snapshot> for SnapshotView {
    fn from(snap: &Snapshot) -> Self {
        Self {
            state: state_label(snap.state),
            tick: snap.tick,
            width: snap.field.width,
            height: snap.field.height,
            asteroids_left: snap.asteroids.len(),
            ship: ShipView::from(&snap.ship),
            bullets: snap.bullets().iter().map(BulletView::from).collect(),
            asteroids: snap.asteroids.iter().map(AsteroidView::from).collect(),
        }
    }
}

pub fn snapshot_json(snap: &Snapshot) -> String {
    let view = SnapshotView::from(snap);
    serde_json::to_string(&view).unwrap_or_else(|_| "{}".to_string())
}

pub mod collision;
pub mod config;
pub mod entity;
pub mod error;
pub mod spawn;
pub mod view;

pub use config::{Field, GameConfig};
pub use entity::{Asteroid, Bullet, RotationInput, Ship};
pub use error::{ConfigError, EngineError};

use collision::{resolve_bullet_hits, ship_hits};
use entity::wrap;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Win,
    Loss,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameState {
    Playing,
    Over(Outcome),
}

impl GameState {
    pub fn is_over(&self) -> bool {
        matches!(self, GameState::Over(_))
    }
}

/// Owned copy of everything a renderer needs for one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    pub state: GameState,
    pub tick: u64,
    pub field: Field,
    pub ship: Ship,
    pub asteroids: Vec<Asteroid>,
}

impl Snapshot {
    pub fn bullets(&self) -> &[Bullet] {
        &self.ship.bullets
    }
}

struct Session {
    ship: Ship,
    asteroids: Vec<Asteroid>,
    state: GameState,
    tick: u64,
}

impl Session {
    fn new(ship: Ship, asteroids: Vec<Asteroid>) -> Self {
        Self {
            ship,
            asteroids,
            state: GameState::Playing,
            tick: 0,
        }
    }

    fn step(&mut self, config: &GameConfig) {
        let field = &config.field;
        let ship = &mut self.ship;

        ship.angle += ship.rotation;
        if ship.thrusting {
            let heading = ship.heading();
            ship.thrust += heading * config.thrust_accel;
        } else {
            ship.thrust *= config.thrust_damping;
        }
        ship.position += ship.thrust;
        wrap(&mut ship.position, field);

        for bullet in ship.bullets.iter_mut() {
            bullet.position += bullet.velocity;
        }
        ship.bullets.retain(|bullet| field.contains(&bullet.position));

        for asteroid in self.asteroids.iter_mut() {
            asteroid.position += asteroid.velocity;
            wrap(&mut asteroid.position, field);
        }

        let destroyed = resolve_bullet_hits(&mut ship.bullets, &mut self.asteroids);
        if destroyed > 0 {
            log::debug!(
                "tick {}: {} asteroid(s) destroyed, {} left",
                self.tick,
                destroyed,
                self.asteroids.len()
            );
        }

        self.tick += 1;

        if self.asteroids.iter().any(|asteroid| ship_hits(ship, asteroid)) {
            self.state = GameState::Over(Outcome::Loss);
            log::info!("ship destroyed after {} ticks", self.tick);
            return;
        }

        if self.asteroids.is_empty() {
            self.state = GameState::Over(Outcome::Win);
            log::info!("field cleared after {} ticks", self.tick);
        }
    }

    fn snapshot(&self, field: Field) -> Snapshot {
        Snapshot {
            state: self.state,
            tick: self.tick,
            field,
            ship: self.ship.clone(),
            asteroids: self.asteroids.clone(),
        }
    }
}

pub struct SimulationEngine {
    config: GameConfig,
    rng: ChaCha8Rng,
    session: Option<Session>,
}

impl SimulationEngine {
    /// Builds an engine with no running session; call `reset` before ticking.
    pub fn new(config: GameConfig, seed: u64) -> Result<Self, EngineError> {
        Self::with_rng(config, ChaCha8Rng::seed_from_u64(seed))
    }

    pub fn from_entropy(config: GameConfig) -> Result<Self, EngineError> {
        Self::with_rng(config, ChaCha8Rng::from_entropy())
    }

    fn with_rng(config: GameConfig, rng: ChaCha8Rng) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(Self {
            config,
            rng,
            session: None,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn reset(&mut self) -> Snapshot {
        let ship = Ship::new(self.config.field.center(), self.config.ship_radius);
        let asteroids = spawn::asteroid_field(&mut self.rng, &self.config);
        log::info!("new game: {} asteroids", asteroids.len());
        self.install(Session::new(ship, asteroids))
    }

    /// Starts a session from a prepared ship and asteroid set.
    pub fn load_layout(&mut self, ship: Ship, asteroids: Vec<Asteroid>) -> Snapshot {
        self.install(Session::new(ship, asteroids))
    }

    fn install(&mut self, session: Session) -> Snapshot {
        let field = self.config.field;
        self.session.insert(session).snapshot(field)
    }

    fn session(&self) -> Result<&Session, EngineError> {
        self.session.as_ref().ok_or(EngineError::NotInitialized)
    }

    fn session_mut(&mut self) -> Result<&mut Session, EngineError> {
        self.session.as_mut().ok_or(EngineError::NotInitialized)
    }

    pub fn set_rotation_input(&mut self, direction: RotationInput) -> Result<(), EngineError> {
        let rate = direction.rate(self.config.rotation_rate);
        self.session_mut()?.ship.rotation = rate;
        Ok(())
    }

    pub fn set_thrust_input(&mut self, active: bool) -> Result<(), EngineError> {
        self.session_mut()?.ship.thrusting = active;
        Ok(())
    }

    pub fn fire_bullet(&mut self) -> Result<(), EngineError> {
        let speed = self.config.bullet_speed;
        let session = self.session_mut()?;
        if session.state != GameState::Playing {
            return Ok(());
        }
        let bullet = session.ship.spawn_bullet(speed);
        session.ship.bullets.push(bullet);
        log::debug!("fired, {} bullet(s) in flight", session.ship.bullets.len());
        Ok(())
    }

    /// Advances one step. Once the game is over this only returns the frozen
    /// snapshot.
    pub fn tick(&mut self) -> Result<Snapshot, EngineError> {
        let field = self.config.field;
        let session = self.session.as_mut().ok_or(EngineError::NotInitialized)?;
        if session.state == GameState::Playing {
            session.step(&self.config);
            log::trace!("tick {} -> {:?}", session.tick, session.state);
        }
        Ok(session.snapshot(field))
    }

    pub fn state(&self) -> Result<GameState, EngineError> {
        Ok(self.session()?.state)
    }

    pub fn snapshot(&self) -> Result<Snapshot, EngineError> {
        Ok(self.session()?.snapshot(self.config.field))
    }

    pub fn asteroids_left(&self) -> Result<usize, EngineError> {
        Ok(self.session()?.asteroids.len())
    }
}

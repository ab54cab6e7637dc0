use crate::game::{EngineError, RotationInput, SimulationEngine};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputAction {
    Rotate(RotationInput),
    Thrust(bool),
    Fire,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyPhase {
    Down,
    Up,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    Up,
    Space,
}

impl Key {
    /// Legacy `KeyboardEvent.keyCode` values.
    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            37 => Some(Key::Left),
            38 => Some(Key::Up),
            39 => Some(Key::Right),
            32 => Some(Key::Space),
            _ => None,
        }
    }

    /// `KeyboardEvent.key` names.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "ArrowLeft" | "Left" => Some(Key::Left),
            "ArrowUp" | "Up" => Some(Key::Up),
            "ArrowRight" | "Right" => Some(Key::Right),
            " " | "Space" | "Spacebar" => Some(Key::Space),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyEvent {
    pub phase: KeyPhase,
    pub key: Key,
}

impl KeyEvent {
    pub fn down(key: Key) -> Self {
        Self {
            phase: KeyPhase::Down,
            key,
        }
    }

    pub fn up(key: Key) -> Self {
        Self {
            phase: KeyPhase::Up,
            key,
        }
    }

    /// Releasing the fire key does nothing.
    pub fn action(&self) -> Option<InputAction> {
        match (self.phase, self.key) {
            (KeyPhase::Down, Key::Left) => Some(InputAction::Rotate(RotationInput::Left)),
            (KeyPhase::Down, Key::Right) => Some(InputAction::Rotate(RotationInput::Right)),
            (KeyPhase::Down, Key::Up) => Some(InputAction::Thrust(true)),
            (KeyPhase::Down, Key::Space) => Some(InputAction::Fire),
            (KeyPhase::Up, Key::Left | Key::Right) => Some(InputAction::Rotate(RotationInput::None)),
            (KeyPhase::Up, Key::Up) => Some(InputAction::Thrust(false)),
            (KeyPhase::Up, Key::Space) => None,
        }
    }
}

pub fn apply(engine: &mut SimulationEngine, action: InputAction) -> Result<(), EngineError> {
    match action {
        InputAction::Rotate(direction) => engine.set_rotation_input(direction),
        InputAction::Thrust(active) => engine.set_thrust_input(active),
        InputAction::Fire => engine.fire_bullet(),
    }
}

/// Decodes and applies a key event. Unknown keys are ignored.
pub fn handle_key(
    engine: &mut SimulationEngine,
    phase: KeyPhase,
    key: Option<Key>,
) -> Result<(), EngineError> {
    match key.and_then(|key| KeyEvent { phase, key }.action()) {
        Some(action) => apply(engine, action),
        None => Ok(()),
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PlayAgainButton {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub label: &'static str,
}

impl PlayAgainButton {
    pub fn for_field(width: f64, height: f64) -> Self {
        Self {
            x: width / 2.0 - 50.0,
            y: height / 2.0 + 40.0,
            width: 100.0,
            height: 40.0,
            label: "Play Again",
        }
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && y >= self.y && x <= self.x + self.width && y <= self.y + self.height
    }
}

/// Resets the game when a finished round's button is clicked. Returns whether
/// a reset happened.
pub fn handle_click(engine: &mut SimulationEngine, x: f64, y: f64) -> Result<bool, EngineError> {
    if !engine.state()?.is_over() {
        return Ok(false);
    }
    let field = engine.config().field;
    if !PlayAgainButton::for_field(field.width, field.height).contains(x, y) {
        return Ok(false);
    }
    engine.reset();
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Asteroid, GameConfig, GameState, Ship};
    use nalgebra::Vector2;

    fn playing_engine() -> SimulationEngine {
        let mut engine = SimulationEngine::new(GameConfig::default(), 9).unwrap();
        engine.reset();
        engine
    }

    fn lost_engine() -> SimulationEngine {
        let mut engine = SimulationEngine::new(GameConfig::default(), 9).unwrap();
        engine.load_layout(
            Ship::new(Vector2::new(100.0, 100.0), 15.0),
            vec![Asteroid::new(Vector2::new(100.0, 100.0), Vector2::new(1.0, 0.0), 15.0)],
        );
        engine.tick().unwrap();
        engine
    }

    #[test]
    fn codes_and_names_decode_to_the_same_keys() {
        for (code, name) in [(37, "ArrowLeft"), (38, "ArrowUp"), (39, "ArrowRight"), (32, " ")] {
            assert_eq!(Key::from_code(code), Key::from_name(name));
            assert!(Key::from_code(code).is_some());
        }
        assert_eq!(Key::from_code(65), None);
        assert_eq!(Key::from_name("a"), None);
    }

    #[test]
    fn key_events_map_to_actions() {
        assert_eq!(
            KeyEvent::down(Key::Left).action(),
            Some(InputAction::Rotate(RotationInput::Left))
        );
        assert_eq!(
            KeyEvent::up(Key::Right).action(),
            Some(InputAction::Rotate(RotationInput::None))
        );
        assert_eq!(KeyEvent::down(Key::Up).action(), Some(InputAction::Thrust(true)));
        assert_eq!(KeyEvent::up(Key::Up).action(), Some(InputAction::Thrust(false)));
        assert_eq!(KeyEvent::down(Key::Space).action(), Some(InputAction::Fire));
        assert_eq!(KeyEvent::up(Key::Space).action(), None);
    }

    #[test]
    fn every_fire_keydown_spawns_a_bullet() {
        let mut engine = playing_engine();
        for _ in 0..3 {
            handle_key(&mut engine, KeyPhase::Down, Key::from_code(32)).unwrap();
        }
        handle_key(&mut engine, KeyPhase::Up, Key::from_code(32)).unwrap();
        handle_key(&mut engine, KeyPhase::Down, Key::from_code(90)).unwrap();

        assert_eq!(engine.snapshot().unwrap().bullets().len(), 3);
    }

    #[test]
    fn held_keys_drive_the_ship() {
        let mut engine = playing_engine();
        handle_key(&mut engine, KeyPhase::Down, Key::from_name("ArrowRight")).unwrap();
        handle_key(&mut engine, KeyPhase::Down, Key::from_name("ArrowUp")).unwrap();

        let ship = engine.snapshot().unwrap().ship;
        assert_eq!(ship.rotation, 0.05);
        assert!(ship.thrusting);

        handle_key(&mut engine, KeyPhase::Up, Key::from_name("ArrowRight")).unwrap();
        handle_key(&mut engine, KeyPhase::Up, Key::from_name("ArrowUp")).unwrap();
        let ship = engine.snapshot().unwrap().ship;
        assert_eq!(ship.rotation, 0.0);
        assert!(!ship.thrusting);
    }

    #[test]
    fn button_hit_region_is_edge_inclusive() {
        let button = PlayAgainButton::for_field(800.0, 600.0);
        assert_eq!((button.x, button.y), (350.0, 340.0));
        assert!(button.contains(350.0, 340.0));
        assert!(button.contains(450.0, 380.0));
        assert!(!button.contains(349.9, 360.0));
        assert!(!button.contains(400.0, 380.1));
    }

    #[test]
    fn click_resets_only_after_game_over() {
        let mut engine = playing_engine();
        assert!(!handle_click(&mut engine, 400.0, 360.0).unwrap());

        let mut engine = lost_engine();
        assert!(!handle_click(&mut engine, 10.0, 10.0).unwrap());
        assert!(engine.state().unwrap().is_over());

        assert!(handle_click(&mut engine, 400.0, 360.0).unwrap());
        assert_eq!(engine.state().unwrap(), GameState::Playing);
        assert_eq!(engine.asteroids_left().unwrap(), 5);
    }

    #[test]
    fn click_before_any_game_is_an_error() {
        let mut engine = SimulationEngine::new(GameConfig::default(), 1).unwrap();
        assert!(matches!(
            handle_click(&mut engine, 400.0, 360.0),
            Err(EngineError::NotInitialized)
        ));
    }
}

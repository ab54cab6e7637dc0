use std::cell::RefCell;
use wasm_bindgen::prelude::*;

pub mod game;
pub mod input;
pub mod logging;
pub mod render;
#[cfg(target_arch = "wasm32")]
mod web;

use game::view::snapshot_json;
use game::{EngineError, GameConfig, RotationInput, SimulationEngine};
use input::{Key, KeyPhase};
use log::Level;

thread_local! {
    static ENGINE: RefCell<Option<SimulationEngine>> = RefCell::new(None);
}

pub(crate) fn with_engine_mut<R>(f: impl FnOnce(&mut SimulationEngine) -> R) -> Result<R, EngineError> {
    ENGINE.with(|cell| {
        let mut opt = cell.borrow_mut();
        match opt.as_mut() {
            Some(engine) => Ok(f(engine)),
            None => Err(EngineError::NotInitialized),
        }
    })
}

/// Replaces the page's engine with a fresh one and starts a round.
pub(crate) fn install_engine(config: GameConfig, seed: u64) -> Result<String, EngineError> {
    logging::init(Level::Info);
    let mut engine = SimulationEngine::new(config, seed)?;
    let snap = engine.reset();
    ENGINE.with(|cell| *cell.borrow_mut() = Some(engine));
    Ok(snapshot_json(&snap))
}

fn error_json(err: &EngineError) -> String {
    serde_json::json!({ "error": err.to_string() }).to_string()
}

fn respond(result: Result<String, EngineError>) -> String {
    match result {
        Ok(json) => json,
        Err(err) => error_json(&err),
    }
}

fn accepted(result: Result<Result<(), EngineError>, EngineError>) -> bool {
    match result.and_then(|r| r) {
        Ok(()) => true,
        Err(err) => {
            log::warn!("input ignored: {err}");
            false
        }
    }
}

#[wasm_bindgen]
pub fn init_game(seed: u64) -> String {
    respond(install_engine(GameConfig::default(), seed))
}

#[wasm_bindgen]
pub fn init_game_with_config(seed: u64, config_json: &str) -> String {
    let config = GameConfig::from_json(config_json).map_err(EngineError::from);
    respond(config.and_then(|config| install_engine(config, seed)))
}

#[wasm_bindgen]
pub fn reset() -> String {
    respond(with_engine_mut(|engine| snapshot_json(&engine.reset())))
}

#[wasm_bindgen]
pub fn tick() -> String {
    respond(with_engine_mut(|engine| engine.tick().map(|snap| snapshot_json(&snap))).and_then(|r| r))
}

#[wasm_bindgen]
pub fn snapshot() -> String {
    respond(with_engine_mut(|engine| engine.snapshot().map(|snap| snapshot_json(&snap))).and_then(|r| r))
}

#[wasm_bindgen]
pub fn draw_list() -> String {
    respond(
        with_engine_mut(|engine| engine.snapshot().map(|snap| render::draw_list_json(&snap)))
            .and_then(|r| r),
    )
}

/// `-1` rotates left, `1` rotates right, anything else stops.
#[wasm_bindgen]
pub fn set_rotation(direction: i32) -> bool {
    accepted(with_engine_mut(|engine| {
        engine.set_rotation_input(RotationInput::from_code(direction))
    }))
}

#[wasm_bindgen]
pub fn set_thrust(active: bool) -> bool {
    accepted(with_engine_mut(|engine| engine.set_thrust_input(active)))
}

#[wasm_bindgen]
pub fn fire() -> bool {
    accepted(with_engine_mut(|engine| engine.fire_bullet()))
}

#[wasm_bindgen]
pub fn key_down(code: u32) -> bool {
    accepted(with_engine_mut(|engine| {
        input::handle_key(engine, KeyPhase::Down, Key::from_code(code))
    }))
}

#[wasm_bindgen]
pub fn key_up(code: u32) -> bool {
    accepted(with_engine_mut(|engine| {
        input::handle_key(engine, KeyPhase::Up, Key::from_code(code))
    }))
}

/// Returns `true` when the click hit Play Again and a new round started.
#[wasm_bindgen]
pub fn click(x: f64, y: f64) -> bool {
    match with_engine_mut(|engine| input::handle_click(engine, x, y)).and_then(|r| r) {
        Ok(reset) => reset,
        Err(err) => {
            log::warn!("click ignored: {err}");
            false
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn start(canvas_id: &str, seed: u64) -> Result<(), JsValue> {
    web::start(canvas_id, seed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn parse(json: &str) -> Value {
        serde_json::from_str(json).expect("exports return JSON")
    }

    #[test]
    fn exports_report_missing_game() {
        ENGINE.with(|cell| *cell.borrow_mut() = None);
        assert_eq!(parse(&tick())["error"], "game not initialized");
        assert!(!fire());
        assert!(!click(400.0, 360.0));
    }

    #[test]
    fn exports_drive_a_round() {
        let started = parse(&init_game(17));
        assert_eq!(started["state"], "playing");
        assert_eq!(started["tick"], 0);

        assert!(key_down(38));
        assert!(key_down(32));
        assert!(set_rotation(1));
        let after = parse(&tick());
        assert_eq!(after["tick"], 1);
        assert_eq!(after["ship"]["thrusting"], true);

        assert!(key_up(38));
        assert!(!parse(&snapshot())["ship"]["thrusting"].as_bool().unwrap());
        assert!(parse(&draw_list()).is_array());
    }

    #[test]
    fn native_games_keep_the_logger_quiet() {
        init_game(1);
        let info = log::Metadata::builder().level(Level::Info).build();
        assert!(!log::logger().enabled(&info));
    }

    #[test]
    fn bad_config_json_is_reported() {
        let reply = parse(&init_game_with_config(1, r#"{"thrust_damping": 2.0}"#));
        assert!(reply["error"].as_str().unwrap().contains("thrust_damping"));

        let ok = parse(&init_game_with_config(1, r#"{"asteroid_count": 1}"#));
        assert_eq!(ok["asteroids_left"], 1);
    }
}

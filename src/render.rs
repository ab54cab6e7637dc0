use crate::game::{GameState, Outcome, Ship, Snapshot};
use crate::input::PlayAgainButton;
use serde::Serialize;

const BULLET_DRAW_RADIUS: f64 = 5.0;
const OUTLINE_WIDTH: f64 = 2.0;

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    FillRect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        color: &'static str,
    },
    Polygon {
        points: Vec<[f64; 2]>,
        stroke: &'static str,
        line_width: f64,
    },
    FillCircle {
        x: f64,
        y: f64,
        radius: f64,
        color: &'static str,
    },
    StrokeCircle {
        x: f64,
        y: f64,
        radius: f64,
        stroke: &'static str,
        line_width: f64,
    },
    Text {
        text: String,
        x: f64,
        y: f64,
        font: &'static str,
        align: &'static str,
        color: &'static str,
    },
}

pub fn terminal_message(state: GameState) -> Option<&'static str> {
    match state {
        GameState::Playing => None,
        GameState::Over(Outcome::Win) => Some("You Win!"),
        GameState::Over(Outcome::Loss) => Some("Game Over!"),
    }
}

/// Nose first, then the two rear corners.
pub fn ship_outline(ship: &Ship) -> [[f64; 2]; 3] {
    let heading = ship.heading();
    let normal = nalgebra::Vector2::new(-heading.y, heading.x);
    let nose = ship.nose();
    let tail = ship.position - heading * (2.0 / 3.0 * ship.radius);
    let left = tail - normal * ship.radius;
    let right = tail + normal * ship.radius;
    [[nose.x, nose.y], [left.x, left.y], [right.x, right.y]]
}

pub fn draw_list(snap: &Snapshot) -> Vec<DrawCommand> {
    let field = snap.field;
    let mut cmds = Vec::with_capacity(snap.asteroids.len() + snap.bullets().len() + 6);

    cmds.push(DrawCommand::FillRect {
        x: 0.0,
        y: 0.0,
        width: field.width,
        height: field.height,
        color: "black",
    });

    cmds.push(DrawCommand::Polygon {
        points: ship_outline(&snap.ship).to_vec(),
        stroke: "white",
        line_width: OUTLINE_WIDTH,
    });

    cmds.extend(snap.bullets().iter().map(|b| DrawCommand::FillCircle {
        x: b.position.x,
        y: b.position.y,
        radius: BULLET_DRAW_RADIUS,
        color: "red",
    }));

    cmds.extend(snap.asteroids.iter().map(|a| DrawCommand::StrokeCircle {
        x: a.position.x,
        y: a.position.y,
        radius: a.radius,
        stroke: "white",
        line_width: OUTLINE_WIDTH,
    }));

    cmds.push(DrawCommand::Text {
        text: format!("Asteroids Left: {}", snap.asteroids.len()),
        x: 10.0,
        y: 30.0,
        font: "20px Arial",
        align: "left",
        color: "white",
    });

    if let Some(message) = terminal_message(snap.state) {
        cmds.push(DrawCommand::Text {
            text: message.to_string(),
            x: field.width / 2.0,
            y: field.height / 2.0,
            font: "48px Arial",
            align: "center",
            color: "white",
        });

        let button = PlayAgainButton::for_field(field.width, field.height);
        cmds.push(DrawCommand::FillRect {
            x: button.x,
            y: button.y,
            width: button.width,
            height: button.height,
            color: "white",
        });
        cmds.push(DrawCommand::Text {
            text: button.label.to_string(),
            x: button.x + button.width / 2.0,
            y: button.y + button.height / 2.0 + 7.0,
            font: "20px Arial",
            align: "center",
            color: "black",
        });
    }

    cmds
}

pub fn draw_list_json(snap: &Snapshot) -> String {
    serde_json::to_string(&draw_list(snap)).unwrap_or_else(|_| "[]".to_string())
}

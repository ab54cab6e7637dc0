use crate::game::{EngineError, GameConfig};
use crate::input::{self, Key, KeyPhase};
use crate::render::{draw_list, DrawCommand};
use std::cell::RefCell;
use std::f64::consts::TAU;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, KeyboardEvent, MouseEvent, Window};

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

fn js_error(err: EngineError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

pub fn start(canvas_id: &str, seed: u64) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let canvas = document
        .get_element_by_id(canvas_id)
        .ok_or_else(|| JsValue::from_str(&format!("no element with id `{canvas_id}`")))?
        .dyn_into::<HtmlCanvasElement>()?;
    let ctx = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
        .dyn_into::<CanvasRenderingContext2d>()?;

    let config = GameConfig::with_field(f64::from(canvas.width()), f64::from(canvas.height()));
    crate::install_engine(config, seed).map_err(js_error)?;

    listen_keys(&document)?;
    listen_clicks(&canvas)?;
    run_frames(window, ctx)
}

fn listen_keys(document: &Document) -> Result<(), JsValue> {
    for (name, phase) in [("keydown", KeyPhase::Down), ("keyup", KeyPhase::Up)] {
        let handler = Closure::<dyn FnMut(KeyboardEvent)>::new(move |event: KeyboardEvent| {
            let key = Key::from_name(&event.key()).or_else(|| Key::from_code(event.key_code()));
            if key.is_some() {
                event.prevent_default();
            }
            let applied = crate::with_engine_mut(|engine| input::handle_key(engine, phase, key));
            if let Err(err) = applied.and_then(|r| r) {
                log::warn!("key ignored: {err}");
            }
        });
        document.add_event_listener_with_callback(name, handler.as_ref().unchecked_ref())?;
        handler.forget();
    }
    Ok(())
}

fn listen_clicks(canvas: &HtmlCanvasElement) -> Result<(), JsValue> {
    let target = canvas.clone();
    let handler = Closure::<dyn FnMut(MouseEvent)>::new(move |event: MouseEvent| {
        let rect = target.get_bounding_client_rect();
        let x = f64::from(event.client_x()) - rect.left();
        let y = f64::from(event.client_y()) - rect.top();
        match crate::with_engine_mut(|engine| input::handle_click(engine, x, y)).and_then(|r| r) {
            Ok(true) => log::info!("play again"),
            Ok(false) => {}
            Err(err) => log::warn!("click ignored: {err}"),
        }
    });
    canvas.add_event_listener_with_callback("click", handler.as_ref().unchecked_ref())?;
    handler.forget();
    Ok(())
}

fn run_frames(window: Window, ctx: CanvasRenderingContext2d) -> Result<(), JsValue> {
    let frame: FrameCallback = Rc::new(RefCell::new(None));
    let next = frame.clone();
    let scheduler = window.clone();

    *frame.borrow_mut() = Some(Closure::<dyn FnMut()>::new(move || {
        match crate::with_engine_mut(|engine| engine.tick()).and_then(|r| r) {
            Ok(snap) => {
                if let Err(err) = paint(&ctx, &draw_list(&snap)) {
                    log::error!("paint failed: {err:?}");
                }
            }
            Err(err) => log::error!("tick failed: {err}"),
        }
        if let Some(callback) = next.borrow().as_ref() {
            if let Err(err) = scheduler.request_animation_frame(callback.as_ref().unchecked_ref()) {
                log::error!("requestAnimationFrame failed: {err:?}");
            }
        }
    }));

    let first = frame.borrow();
    if let Some(callback) = first.as_ref() {
        window.request_animation_frame(callback.as_ref().unchecked_ref())?;
    }
    Ok(())
}

fn paint(ctx: &CanvasRenderingContext2d, cmds: &[DrawCommand]) -> Result<(), JsValue> {
    for cmd in cmds {
        match cmd {
            DrawCommand::FillRect {
                x,
                y,
                width,
                height,
                color,
            } => {
                ctx.set_fill_style(&JsValue::from_str(color));
                ctx.fill_rect(*x, *y, *width, *height);
            }
            DrawCommand::Polygon {
                points,
                stroke,
                line_width,
            } => {
                ctx.set_stroke_style(&JsValue::from_str(stroke));
                ctx.set_line_width(*line_width);
                ctx.begin_path();
                if let Some((first, rest)) = points.split_first() {
                    ctx.move_to(first[0], first[1]);
                    for point in rest {
                        ctx.line_to(point[0], point[1]);
                    }
                }
                ctx.close_path();
                ctx.stroke();
            }
            DrawCommand::FillCircle { x, y, radius, color } => {
                ctx.set_fill_style(&JsValue::from_str(color));
                ctx.begin_path();
                ctx.arc(*x, *y, *radius, 0.0, TAU)?;
                ctx.fill();
            }
            DrawCommand::StrokeCircle {
                x,
                y,
                radius,
                stroke,
                line_width,
            } => {
                ctx.set_stroke_style(&JsValue::from_str(stroke));
                ctx.set_line_width(*line_width);
                ctx.begin_path();
                ctx.arc(*x, *y, *radius, 0.0, TAU)?;
                ctx.stroke();
            }
            DrawCommand::Text {
                text,
                x,
                y,
                font,
                align,
                color,
            } => {
                ctx.set_fill_style(&JsValue::from_str(color));
                ctx.set_font(font);
                ctx.set_text_align(align);
                ctx.fill_text(text, *x, *y)?;
            }
        }
    }
    Ok(())
}

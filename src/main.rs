//! Thrust Ship entry point
//!
//! Handles platform-specific initialization and runs the frame loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent};

    use thrust_ship::consts::FRAME_DT;
    use thrust_ship::{Session, Tuning, Variant};

    const SHIP_SIZE: f64 = 12.0;

    /// Page-level state shared by the callbacks
    struct Game {
        session: Session,
        ctx: CanvasRenderingContext2d,
        last_time: f64,
    }

    impl Game {
        fn new(ctx: CanvasRenderingContext2d, tuning: Tuning) -> Self {
            Self {
                session: Session::new(tuning),
                ctx,
                last_time: 0.0,
            }
        }

        fn render(&self) {
            let bounds = self.session.tuning().bounds;
            let ctx = &self.ctx;
            ctx.set_fill_style_str("#000");
            ctx.fill_rect(0.0, 0.0, bounds.width as f64, bounds.height as f64);

            let ship = self.session.ship();
            ctx.save();
            ctx.translate(ship.pos.x as f64, ship.pos.y as f64).ok();
            ctx.rotate(ship.display_rotation() as f64).ok();
            match self.session.variant() {
                Variant::SpinningSquare => draw_square(ctx),
                Variant::RotatingShip | Variant::ThrustShip => draw_ship(ctx),
            }
            ctx.restore();
        }
    }

    fn draw_square(ctx: &CanvasRenderingContext2d) {
        ctx.set_fill_style_str("#4af");
        ctx.fill_rect(-SHIP_SIZE, -SHIP_SIZE, SHIP_SIZE * 2.0, SHIP_SIZE * 2.0);
    }

    /// Triangle with its nose along +X (rotation 0)
    fn draw_ship(ctx: &CanvasRenderingContext2d) {
        ctx.set_stroke_style_str("#fff");
        ctx.set_line_width(2.0);
        ctx.begin_path();
        ctx.move_to(SHIP_SIZE, 0.0);
        ctx.line_to(-SHIP_SIZE, SHIP_SIZE * 0.7);
        ctx.line_to(-SHIP_SIZE * 0.6, 0.0);
        ctx.line_to(-SHIP_SIZE, -SHIP_SIZE * 0.7);
        ctx.close_path();
        ctx.stroke();
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Thrust Ship starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let tuning = Tuning::load();
        canvas.set_width(tuning.bounds.width as u32);
        canvas.set_height(tuning.bounds.height as u32);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .expect("get_context failed")
            .expect("no 2d context")
            .dyn_into()
            .expect("not a 2d context");

        let game = Rc::new(RefCell::new(Game::new(ctx, tuning)));

        setup_input_handlers(game.clone());
        request_animation_frame(game);

        log::info!("Thrust Ship running!");
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        // Key down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let key = event.key();
                if key.starts_with("Arrow") || key == " " {
                    event.prevent_default();
                }
                // Held state only changes on real transitions
                if event.repeat() {
                    return;
                }

                let mut g = game.borrow_mut();
                match key.as_str() {
                    "1" => g.session.set_variant(Variant::SpinningSquare),
                    "2" => g.session.set_variant(Variant::RotatingShip),
                    "3" => g.session.set_variant(Variant::ThrustShip),
                    "r" | "R" => g.session.reset(),
                    "d" | "D" => toggle_drag_mode(&mut g.session),
                    _ => {}
                }
                g.session.key_down(&key);
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().session.key_up(&event.key());
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Window blur: keyup events are lost while unfocused
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                game.borrow_mut().session.release_all();
                log::info!("Released held keys (window blur)");
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Switch drag mode and persist it for the next visit
    fn toggle_drag_mode(session: &mut Session) {
        let mut tuning = *session.tuning();
        tuning.drag_mode = tuning.drag_mode.toggled();
        session.set_tuning(tuning);
        tuning.save();
        log::info!("Drag mode: {}", tuning.drag_mode.as_str());
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            // Timestamps are already in ms
            let dt = if g.last_time > 0.0 {
                (time - g.last_time) as f32
            } else {
                FRAME_DT
            };
            g.last_time = time;

            g.session.frame(dt);
            g.render();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Thrust Ship (native) starting...");
    log::info!("Native mode runs a headless script - serve the wasm build for the canvas version");

    run_headless();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Thrust while turning right for two seconds, then coast for one
#[cfg(not(target_arch = "wasm32"))]
fn run_headless() {
    use thrust_ship::consts::FRAME_DT;
    use thrust_ship::{Event, Session, Tuning};

    let mut session = Session::new(Tuning::load());

    session.handle(Event::KeyDown("ArrowUp".to_string()));
    session.handle(Event::KeyDown("ArrowRight".to_string()));
    for _ in 0..120 {
        session.handle(Event::Frame(FRAME_DT));
    }
    session.handle(Event::KeyUp("ArrowUp".to_string()));
    session.handle(Event::KeyUp("ArrowRight".to_string()));
    for _ in 0..60 {
        session.handle(Event::Frame(FRAME_DT));
    }

    log::info!(
        "{} ticks, {:.0} ms simulated",
        session.ticks(),
        session.elapsed()
    );
    match serde_json::to_string_pretty(session.ship()) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Failed to serialize ship: {}", e),
    }
}

//! Ball Hunt entry point
//!
//! Web: sets up the canvas, keyboard handling and the requestAnimationFrame loop.
//! Native: runs the simulation headless for a number of frames.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent};

    use ball_hunt::platform::web::{CanvasSurface, DomCounter};
    use ball_hunt::sim::Bounds;
    use ball_hunt::{FrameStatus, Settings, Simulation};

    /// Everything the frame callback needs
    struct Game {
        sim: Simulation,
        surface: CanvasSurface,
        counter: DomCounter,
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Ball Hunt starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // Canvas fills the viewport; the size is fixed for the whole run
        let width = window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0) as u32;
        let height = window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let settings = Settings::load();
        let seed = settings.seed.unwrap_or(js_sys::Date::now() as u64);

        let sim = match Simulation::start(&settings, Bounds::new(width, height), seed) {
            Ok(sim) => sim,
            Err(e) => {
                log::error!("Cannot start simulation: {e}");
                return;
            }
        };
        let surface = CanvasSurface::new(&canvas).expect("no 2d context");
        let counter = DomCounter::new(
            document
                .get_element_by_id("ball-count")
                .expect("no #ball-count element"),
        );

        let game = Rc::new(RefCell::new(Game {
            sim,
            surface,
            counter,
        }));

        setup_keyboard(game.clone());

        // Start game loop
        request_animation_frame(game);

        log::info!("Ball Hunt running!");
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            game.borrow_mut().sim.handle_key(&event.key());
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        let status = {
            let mut g = game.borrow_mut();
            let Game {
                sim,
                surface,
                counter,
            } = &mut *g;
            sim.frame(surface, counter)
        };

        if status != FrameStatus::Stopped {
            request_animation_frame(game);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod native_run {
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    use anyhow::{Context, Result};
    use clap::Parser;
    use serde::Serialize;

    use ball_hunt::consts::{DEFAULT_HEIGHT, DEFAULT_WIDTH};
    use ball_hunt::driver;
    use ball_hunt::platform::native::{FrameBudget, LogCounter};
    use ball_hunt::renderer::RecordingSurface;
    use ball_hunt::sim::{Bounds, SimState};
    use ball_hunt::{Settings, Simulation};

    /// Run the ball hunt simulation headless
    #[derive(Debug, Parser)]
    #[command(name = "ball-hunt", version, about)]
    pub struct Args {
        /// Frames to simulate
        #[arg(long, default_value_t = 600)]
        frames: u64,
        /// RNG seed (overrides the settings file; defaults to the clock)
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, default_value_t = DEFAULT_WIDTH)]
        width: u32,
        #[arg(long, default_value_t = DEFAULT_HEIGHT)]
        height: u32,
        /// Settings JSON file
        #[arg(long)]
        settings: Option<PathBuf>,
        /// Let the hunter chase balls on its own
        #[arg(long)]
        idle: bool,
        /// Stop as soon as every ball is destroyed
        #[arg(long)]
        until_clear: bool,
        /// Pace frames at 60 Hz instead of running flat out
        #[arg(long)]
        realtime: bool,
        /// Print a JSON run summary to stdout
        #[arg(long)]
        json: bool,
    }

    #[derive(Debug, Serialize)]
    struct RunSummary<'a> {
        seed: u64,
        frames: u64,
        width: u32,
        height: u32,
        initial_live_count: u32,
        final_live_count: u32,
        state: &'a SimState,
    }

    pub fn run(args: Args) -> Result<()> {
        let settings = match &args.settings {
            Some(path) => Settings::load_file(path)?,
            None => Settings::default(),
        };
        let seed = match args.seed.or(settings.seed) {
            Some(seed) => seed,
            None => SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .context("system clock before unix epoch")?
                .as_millis() as u64,
        };

        let mut surface = RecordingSurface::new(args.width, args.height);
        let bounds = Bounds::of(&surface);
        let mut sim = Simulation::start(&settings, bounds, seed)
            .with_context(|| format!("invalid settings for a {}x{} canvas", args.width, args.height))?;
        sim.set_idle_mode(args.idle);
        let initial_live_count = sim.state().live_count.get();

        let mut counter = LogCounter::default();
        let mut scheduler = FrameBudget::new(args.frames);
        if args.realtime {
            scheduler = scheduler.realtime();
        }

        let mut violation = None;
        let frames = driver::run(
            &mut sim,
            &mut surface,
            &mut counter,
            &mut scheduler,
            |sim, surface, report| {
                surface.clear();
                if let Err(e) = sim.state().validate() {
                    log::error!("Frame {}: {}", report.frame, e);
                    violation = Some(e);
                    sim.stop();
                } else if args.until_clear && report.live_count == 0 {
                    sim.stop();
                }
            },
        );
        if let Some(e) = violation {
            return Err(anyhow::Error::new(e).context("simulation invariant broken"));
        }

        let final_live_count = counter.latest().unwrap_or(initial_live_count);
        log::info!(
            "Ran {} frames: {} of {} balls left",
            frames,
            final_live_count,
            initial_live_count
        );

        if args.json {
            let summary = RunSummary {
                seed,
                frames,
                width: args.width,
                height: args.height,
                initial_live_count,
                final_live_count,
                state: sim.state(),
            };
            let json = serde_json::to_string_pretty(&summary).context("serializing run summary")?;
            println!("{json}");
        } else {
            println!("{final_live_count}/{initial_live_count} balls alive after {frames} frames");
        }
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use clap::Parser;

    env_logger::init();
    log::info!("Ball Hunt (native) starting...");

    native_run::run(native_run::Args::parse())
}

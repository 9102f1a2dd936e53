//! Sock Hop entry point
//!
//! Handles platform-specific initialization and runs the game loop. The
//! browser build mounts a canvas inside the page's container element and
//! drives the simulation from requestAnimationFrame; the native build is
//! a headless smoke runner for the same scene code.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

/// Which level representation this deployment runs. The LDtk bundle and
/// the hand-placed layout are mutually exclusive alternate designs.
#[allow(dead_code)]
#[derive(Clone, Copy, PartialEq, Eq)]
enum LevelStrategy {
    Ldtk,
    HandPlaced,
}

const LEVEL_STRATEGY: LevelStrategy = LevelStrategy::Ldtk;

/// DOM id of the mount point the embedding page must provide
#[cfg(target_arch = "wasm32")]
const CONTAINER_ID: &str = "game-container";

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::prelude::*;
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{
        CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlImageElement, Response,
    };

    use sock_hop::consts::*;
    use sock_hop::level::bundle::{
        COMPOSITE_IMAGE, ENTITY_DOCUMENT, INTGRID_CSV, LEVEL_BASE, PLAYER_SHEET, STAR_TYPE,
    };
    use sock_hop::level::LevelSource;
    use sock_hop::scene::{Scene, SceneError, VisualRegistry};
    use sock_hop::sim::TickInput;

    use super::{CONTAINER_ID, LEVEL_STRATEGY, LevelStrategy};

    /// Held keyboard state, updated by keydown/keyup listeners and
    /// polled once per tick.
    #[derive(Debug, Clone, Copy, Default)]
    struct InputState {
        left: bool,
        right: bool,
        up: bool,
    }

    impl InputState {
        fn as_tick_input(&self) -> TickInput {
            TickInput {
                left: self.left,
                right: self.right,
                up: self.up,
            }
        }
    }

    /// Loaded image assets, drawn only once the browser reports them
    /// complete (a missing image leaves its placeholder visible rather
    /// than breaking the loop).
    struct Images {
        composite: Option<HtmlImageElement>,
        player: HtmlImageElement,
        star: HtmlImageElement,
    }

    /// Game instance holding all state
    struct Game {
        scene: Scene,
        images: Images,
        ctx: CanvasRenderingContext2d,
        input: InputState,
        accumulator: f32,
        last_time: f64,
    }

    impl Game {
        /// Run simulation ticks for the elapsed frame time.
        fn update(&mut self, dt: f32) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                let input = self.input.as_tick_input();
                self.scene.on_tick(&input, SIM_DT);
                self.accumulator -= SIM_DT;
                substeps += 1;
            }
        }

        /// Render the current frame.
        fn render(&self) {
            let ctx = &self.ctx;

            // Sky
            ctx.set_fill_style_str("#87ceeb");
            ctx.fill_rect(0.0, 0.0, GAME_WIDTH as f64, GAME_HEIGHT as f64);

            match &self.scene.source {
                LevelSource::Ldtk(_) => {
                    if let Some(composite) = &self.images.composite {
                        if composite.complete() {
                            let _ = ctx.draw_image_with_html_image_element(composite, 0.0, 0.0);
                        }
                    }
                }
                LevelSource::HandPlaced => {
                    ctx.set_fill_style_str("#2e8b57");
                    for solid in &self.scene.state.solids {
                        let min = solid.min();
                        ctx.fill_rect(
                            min.x as f64,
                            min.y as f64,
                            (solid.half.x * 2.0) as f64,
                            (solid.half.y * 2.0) as f64,
                        );
                    }
                }
            }

            // Stars
            for star in self.scene.state.stars.iter().filter(|s| s.active) {
                let min = star.aabb().min();
                if self.images.star.complete() {
                    let _ = ctx.draw_image_with_html_image_element(
                        &self.images.star,
                        min.x as f64,
                        min.y as f64,
                    );
                } else {
                    ctx.set_fill_style_str("#ffd700");
                    ctx.fill_rect(min.x as f64, min.y as f64, 22.0, 22.0);
                }
            }

            // Non-star entities get a placeholder box until someone
            // configures behavior for them
            ctx.set_fill_style_str("#c060c0");
            for entity in &self.scene.entities {
                if entity.type_id != STAR_TYPE {
                    ctx.fill_rect(entity.pos.x as f64 - 8.0, entity.pos.y as f64 - 8.0, 16.0, 16.0);
                }
            }

            // Player: current sheet frame from the animation registry
            let player = &self.scene.state.player;
            let frame = self.scene.player_frame();
            if self.images.player.complete() {
                let _ = ctx
                    .draw_image_with_html_image_element_and_sw_and_sh_and_dx_and_dy_and_dw_and_dh(
                        &self.images.player,
                        (frame * PLAYER_FRAME_W) as f64,
                        0.0,
                        PLAYER_FRAME_W as f64,
                        PLAYER_FRAME_H as f64,
                        (player.pos.x - PLAYER_FRAME_W as f32 / 2.0) as f64,
                        (player.pos.y - PLAYER_FRAME_H as f32 / 2.0) as f64,
                        PLAYER_FRAME_W as f64,
                        PLAYER_FRAME_H as f64,
                    );
            } else {
                ctx.set_fill_style_str("#d04040");
                ctx.fill_rect(
                    (player.pos.x - PLAYER_FRAME_W as f32 / 2.0) as f64,
                    (player.pos.y - PLAYER_FRAME_H as f32 / 2.0) as f64,
                    PLAYER_FRAME_W as f64,
                    PLAYER_FRAME_H as f64,
                );
            }

            // Score text
            ctx.set_fill_style_str("#000000");
            ctx.set_font("32px sans-serif");
            let _ = ctx.fill_text(&self.scene.score_label(), 16.0, 40.0);
        }
    }

    /// Fetch a text asset; any failure is a load-time fatal error.
    async fn fetch_text(url: &str) -> Result<String, String> {
        let window = web_sys::window().ok_or("no window")?;
        let response: Response = JsFuture::from(window.fetch_with_str(url))
            .await
            .map_err(|e| format!("fetch {url}: {e:?}"))?
            .dyn_into()
            .map_err(|_| format!("fetch {url}: not a Response"))?;
        if !response.ok() {
            return Err(format!("fetch {url}: HTTP {}", response.status()));
        }
        let text = JsFuture::from(
            response
                .text()
                .map_err(|e| format!("fetch {url}: {e:?}"))?,
        )
        .await
        .map_err(|e| format!("read {url}: {e:?}"))?;
        text.as_string().ok_or_else(|| format!("read {url}: not text"))
    }

    fn load_image(url: &str) -> HtmlImageElement {
        let img = HtmlImageElement::new().expect("image element");
        img.set_src(url);
        img
    }

    /// Mount the canvas inside the page's container at the fixed logical
    /// resolution, CSS-scaled to fit.
    fn mount_canvas(document: &Document) -> Result<HtmlCanvasElement, SceneError> {
        let container = document
            .get_element_by_id(CONTAINER_ID)
            .ok_or_else(|| SceneError::MissingContainer(CONTAINER_ID.to_string()))?;

        let canvas: HtmlCanvasElement = document
            .create_element("canvas")
            .expect("create canvas")
            .dyn_into()
            .expect("not a canvas");
        canvas.set_width(GAME_WIDTH as u32);
        canvas.set_height(GAME_HEIGHT as u32);
        let _ = canvas.set_attribute("style", "width: 100%; height: 100%; object-fit: contain");
        container
            .append_child(&canvas)
            .expect("append canvas to container");
        Ok(canvas)
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Sock Hop starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas = match mount_canvas(&document) {
            Ok(canvas) => canvas,
            Err(err) => {
                log::error!("scene construction halted: {err}");
                return;
            }
        };
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .expect("2d context")
            .expect("2d context unavailable")
            .dyn_into()
            .expect("not a 2d context");

        // Asset load completes fully before the build step; there is no
        // partial-load handling because nothing runs until it finishes.
        let (source, composite) = match LEVEL_STRATEGY {
            LevelStrategy::Ldtk => {
                let entity_url = format!("{LEVEL_BASE}{ENTITY_DOCUMENT}");
                let grid_url = format!("{LEVEL_BASE}{INTGRID_CSV}");
                let entity_json = match fetch_text(&entity_url).await {
                    Ok(text) => text,
                    Err(err) => {
                        log::error!("scene construction halted: {err}");
                        return;
                    }
                };
                let grid_csv = match fetch_text(&grid_url).await {
                    Ok(text) => text,
                    Err(err) => {
                        log::error!("scene construction halted: {err}");
                        return;
                    }
                };
                let source = match Scene::load(&entity_json, &grid_csv) {
                    Ok(source) => source,
                    Err(err) => {
                        log::error!("scene construction halted: {err}");
                        return;
                    }
                };
                let composite = load_image(&format!("{LEVEL_BASE}{COMPOSITE_IMAGE}"));
                (source, Some(composite))
            }
            LevelStrategy::HandPlaced => (LevelSource::HandPlaced, None),
        };

        let images = Images {
            composite,
            player: load_image(PLAYER_SHEET),
            star: load_image("assets/star.png"),
        };

        let seed = js_sys::Date::now() as u64;
        let scene = match Scene::build(source, VisualRegistry::with_defaults(), seed, true) {
            Ok(scene) => scene,
            Err(err) => {
                log::error!("scene construction halted: {err}");
                return;
            }
        };

        log::info!("Scene built with seed: {seed}");

        let game = Rc::new(RefCell::new(Game {
            scene,
            images,
            ctx,
            input: InputState::default(),
            accumulator: 0.0,
            last_time: 0.0,
        }));

        setup_keyboard(game.clone());
        request_animation_frame(game);

        log::info!("Sock Hop running!");
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    "ArrowLeft" => g.input.left = true,
                    "ArrowRight" => g.input.right = true,
                    "ArrowUp" => g.input.up = true,
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    "ArrowLeft" => g.input.left = false,
                    "ArrowRight" => g.input.right = false,
                    "ArrowUp" => g.input.up = false,
                    _ => {}
                }
            });
            let _ =
                window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
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

            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt);
            g.render();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use sock_hop::consts::*;
    use sock_hop::level::bundle::{ENTITY_DOCUMENT, INTGRID_CSV, LEVEL_BASE};
    use sock_hop::level::LevelSource;
    use sock_hop::scene::{Scene, VisualRegistry};
    use sock_hop::sim::TickInput;

    env_logger::init();
    log::info!("Sock Hop (native) starting...");

    // The browser deployment fetches the bundle; headless reads it from
    // disk, or runs the hand-placed layout when so configured.
    let source = match LEVEL_STRATEGY {
        LevelStrategy::Ldtk => {
            let base = std::path::Path::new(LEVEL_BASE);
            let entity_json = std::fs::read_to_string(base.join(ENTITY_DOCUMENT));
            let grid_csv = std::fs::read_to_string(base.join(INTGRID_CSV));
            match (entity_json, grid_csv) {
                (Ok(entity_json), Ok(grid_csv)) => {
                    match Scene::load(&entity_json, &grid_csv) {
                        Ok(source) => source,
                        Err(err) => {
                            log::error!("scene construction halted: {err}");
                            std::process::exit(1);
                        }
                    }
                }
                _ => {
                    log::info!("no level bundle at {LEVEL_BASE:?}, using hand-placed layout");
                    LevelSource::HandPlaced
                }
            }
        }
        LevelStrategy::HandPlaced => LevelSource::HandPlaced,
    };

    let mut scene = match Scene::build(source, VisualRegistry::with_defaults(), 12345, true) {
        Ok(scene) => scene,
        Err(err) => {
            log::error!("scene construction halted: {err}");
            std::process::exit(1);
        }
    };

    // Headless smoke run: hold right and hop every second for ten seconds
    for tick_index in 0u64..600 {
        let input = TickInput {
            right: true,
            up: tick_index % 60 == 0,
            ..Default::default()
        };
        scene.on_tick(&input, SIM_DT);
    }

    log::info!(
        "smoke run done: {} after 600 ticks, player at ({:.1}, {:.1})",
        scene.score_label(),
        scene.state.player.pos.x,
        scene.state.player.pos.y
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

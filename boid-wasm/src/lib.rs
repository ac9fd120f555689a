use boid_core::{Agent, Vector2D, World, WorldConfig};
use boid_shared::{SimulationSettings, VisualSettings};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Element, HtmlCanvasElement, MouseEvent};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console)]
    fn log(s: &str);
}

macro_rules! console_log {
    ($($t:tt)*) => (log(&format_args!($($t)*).to_string()))
}

const BACKGROUND: &str = "#000000";
const PREDATOR_FILL: &str = "#ffffff";

/// Parses optional settings JSON and validates it into a world config.
pub fn parse_settings(json: Option<&str>) -> Result<(WorldConfig, VisualSettings), String> {
    let settings = match json {
        Some(json) => SimulationSettings::from_json(json).map_err(|e| e.to_string())?,
        None => SimulationSettings::default(),
    };
    let config = WorldConfig::from_settings(&settings).map_err(|e| e.to_string())?;
    Ok((config, settings.visuals))
}

/// Translucent black laid over the last frame so old triangles fade out.
pub fn trail_style(trail_fade: u16) -> String {
    let alpha = f32::from(trail_fade.min(255)) / 255.0;
    format!("rgba(0, 0, 0, {:.3})", alpha)
}

/// Fully saturated colour for a hue in `[0, 1)`.
pub fn boid_fill(hue: f32) -> String {
    format!("hsl({:.1}, 100%, 50%)", hue * 360.0)
}

/// Agent at a canvas point moving at `speed` in a random direction.
fn spawn_at(x: f64, y: f64, speed: f32) -> Agent {
    let heading = js_sys::Math::random() * 360.0;
    Agent::new(
        Vector2D::new(x as f32, y as f32),
        Vector2D::from_heading(heading as f32) * speed,
    )
}

#[wasm_bindgen]
pub struct BoidSimulation {
    world: World,
    visuals: VisualSettings,
    pointer: Option<Vector2D>,
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
}

#[wasm_bindgen]
impl BoidSimulation {
    /// Attaches to the canvas with `canvas_id`. `settings_json` may be
    /// omitted to use the default tuning.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: &str, settings_json: Option<String>) -> Result<BoidSimulation, JsValue> {
        let (config, visuals) =
            parse_settings(settings_json.as_deref()).map_err(|e| JsValue::from_str(&e))?;
        console_log!(
            "Initializing simulation with {} boids and {} predators",
            config.boid_count,
            config.predator_count
        );

        let window = web_sys::window().ok_or("no global window")?;
        let document = window.document().ok_or("no document")?;
        let canvas = document
            .get_element_by_id(canvas_id)
            .ok_or("canvas not found")?
            .dyn_into::<HtmlCanvasElement>()?;

        canvas.set_width(config.width as u32);
        canvas.set_height(config.height as u32);

        let context = canvas
            .get_context("2d")?
            .ok_or("no 2d context")?
            .dyn_into::<CanvasRenderingContext2d>()?;

        context.set_fill_style_str(BACKGROUND);
        context.fill_rect(0.0, 0.0, config.width as f64, config.height as f64);

        Ok(BoidSimulation {
            world: World::random(config),
            visuals,
            pointer: None,
            canvas,
            context,
        })
    }

    /// Advances one tick using the last known pointer position.
    pub fn update(&mut self) {
        self.world.tick(self.pointer);
    }

    pub fn render(&self) -> Result<(), JsValue> {
        let width = self.canvas.width() as f64;
        let height = self.canvas.height() as f64;

        self.context
            .set_fill_style_str(&trail_style(self.visuals.trail_fade));
        self.context.fill_rect(0.0, 0.0, width, height);

        for boid in self.world.boids() {
            let fill = boid_fill(boid.hue());
            self.draw_agent(boid, self.visuals.boid_size, &fill);
        }
        for predator in self.world.predators() {
            self.draw_agent(predator, self.visuals.predator_size, PREDATOR_FILL);
        }

        Ok(())
    }

    fn draw_agent(&self, agent: &Agent, size: f32, fill: &str) {
        let [nose, left, right] = agent.triangle(size);

        self.context.begin_path();
        self.context.move_to(nose.x as f64, nose.y as f64);
        self.context.line_to(left.x as f64, left.y as f64);
        self.context.line_to(right.x as f64, right.y as f64);
        self.context.close_path();

        self.context.set_fill_style_str(fill);
        self.context.fill();
    }

    pub fn set_pointer(&mut self, x: f64, y: f64) {
        self.pointer = Some(Vector2D::new(x as f32, y as f32));
    }

    pub fn clear_pointer(&mut self) {
        self.pointer = None;
    }

    pub fn handle_mouse_move(&mut self, event: MouseEvent) {
        let canvas_element: &Element = self.canvas.as_ref();
        let rect = canvas_element.get_bounding_client_rect();
        let x = event.client_x() as f64 - rect.left();
        let y = event.client_y() as f64 - rect.top();
        self.set_pointer(x, y);
    }

    pub fn handle_mouse_leave(&mut self) {
        self.clear_pointer();
    }

    pub fn add_boid_at(&mut self, x: f64, y: f64) {
        let agent = spawn_at(x, y, self.world.config().boid.max_speed);
        self.world.add_boid(agent);
        console_log!(
            "Added boid at ({}, {}). Total boids: {}",
            x,
            y,
            self.world.boids().len()
        );
    }

    pub fn add_predator_at(&mut self, x: f64, y: f64) {
        let agent = spawn_at(x, y, self.world.config().predator.max_speed);
        self.world.add_predator(agent);
        console_log!(
            "Added predator at ({}, {}). Total predators: {}",
            x,
            y,
            self.world.predators().len()
        );
    }

    pub fn resize(&mut self, width: f64, height: f64) -> Result<(), JsValue> {
        self.world
            .resize(width as f32, height as f32)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        self.canvas.set_width(width as u32);
        self.canvas.set_height(height as u32);
        console_log!("Resized to {}x{}", width, height);
        Ok(())
    }

    pub fn boid_count(&self) -> usize {
        self.world.boids().len()
    }

    pub fn predator_count(&self) -> usize {
        self.world.predators().len()
    }

    pub fn tick_count(&self) -> f64 {
        self.world.tick_count() as f64
    }

    /// Frame rate the page should schedule `update`/`render` at.
    pub fn target_fps(&self) -> u32 {
        self.visuals.target_fps
    }

    pub fn snapshot_json(&self) -> Result<String, JsValue> {
        self.world
            .snapshot()
            .to_json_line()
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

use flock_core::{FlockingEngine, SimulationParams};
use flock_shared::FlockSettings;
use wasm_bindgen::prelude::*;

macro_rules! console_log {
    ($($t:tt)*) => (web_sys::console::log_1(&format_args!($($t)*).to_string().into()))
}

/// Browser-facing handle to a flock
///
/// The host drives it once per animation frame with `tick` and reads the
/// result back with `get_all_boid_data` between ticks.
#[wasm_bindgen]
pub struct FlockSimulation {
    engine: FlockingEngine,
}

#[wasm_bindgen]
impl FlockSimulation {
    #[wasm_bindgen(constructor)]
    pub fn new() -> FlockSimulation {
        FlockSimulation {
            engine: FlockingEngine::new(),
        }
    }

    /// (Re)creates the flock with `count` boids scattered over the domain.
    pub fn initialize(&mut self, count: usize, width: f32, height: f32) {
        console_log!(
            "Initializing flock with {} boids in {}x{}",
            count,
            width,
            height
        );
        self.engine
            .initialize(count, width, height, &mut rand::thread_rng());
    }

    pub fn tick(&mut self) {
        self.engine.tick();
    }

    pub fn set_pointer_position(&mut self, x: f32, y: f32) {
        self.engine.set_pointer_position(x, y);
    }

    pub fn boid_count(&self) -> usize {
        self.engine.boid_count()
    }

    /// Array of `{x, y, vx, vy}` objects in boid order
    pub fn get_all_boid_data(&self) -> Result<js_sys::Array, JsValue> {
        let result = js_sys::Array::new_with_length(self.engine.boid_count() as u32);

        for (i, snapshot) in self.engine.snapshots().iter().enumerate() {
            let boid = js_sys::Object::new();
            js_sys::Reflect::set(&boid, &"x".into(), &snapshot.x.into())?;
            js_sys::Reflect::set(&boid, &"y".into(), &snapshot.y.into())?;
            js_sys::Reflect::set(&boid, &"vx".into(), &snapshot.vx.into())?;
            js_sys::Reflect::set(&boid, &"vy".into(), &snapshot.vy.into())?;
            result.set(i as u32, boid.into());
        }

        Ok(result)
    }

    pub fn boid_position_x(&self, index: usize) -> f32 {
        self.engine.boid_position_x(index)
    }

    pub fn boid_position_y(&self, index: usize) -> f32 {
        self.engine.boid_position_y(index)
    }

    pub fn boid_velocity_x(&self, index: usize) -> f32 {
        self.engine.boid_velocity_x(index)
    }

    pub fn boid_velocity_y(&self, index: usize) -> f32 {
        self.engine.boid_velocity_y(index)
    }

    pub fn set_separation_params(&mut self, radius: f32, strength: f32) {
        self.engine.set_separation_params(radius, strength);
    }

    pub fn set_alignment_params(&mut self, radius: f32, strength: f32) {
        self.engine.set_alignment_params(radius, strength);
    }

    pub fn set_cohesion_params(&mut self, radius: f32, strength: f32) {
        self.engine.set_cohesion_params(radius, strength);
    }

    pub fn set_avoidance_distance(&mut self, distance: f32) {
        self.engine.set_avoidance_distance(distance);
    }

    /// Current behavior settings as JSON
    pub fn settings_json(&self) -> Result<String, JsValue> {
        FlockSettings::from(*self.engine.params())
            .to_json()
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Replaces the behavior settings from JSON. Missing fields take their
    /// default values.
    pub fn apply_settings_json(&mut self, json: &str) -> Result<(), JsValue> {
        let settings = FlockSettings::from_json(json)
            .map_err(|e| JsValue::from_str(&format!("invalid settings: {}", e)))?;
        self.engine.set_params(SimulationParams::from(settings));
        Ok(())
    }
}

impl Default for FlockSimulation {
    fn default() -> Self {
        Self::new()
    }
}

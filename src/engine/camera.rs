/// Host-owned camera state.
///
/// The renderer itself is stateless; the orbit angles and zoom distance
/// accumulate here, on the host side, from pointer and wheel events. The
/// host writes the resulting pose into each frame's parameter buffer.

use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

use crate::math::utils::clamp;

/// Closest allowed orbit distance.
pub const MIN_CAMERA_DISTANCE: f64 = 1.0;
/// Farthest allowed orbit distance.
pub const MAX_CAMERA_DISTANCE: f64 = 10.0;

/// Radians of rotation per pixel of pointer drag.
const DRAG_SCALE: f64 = 0.01;
/// Distance units per wheel delta unit.
const WHEEL_SCALE: f64 = 0.01;

/// Orbit camera pose: three accumulated rotation angles plus distance.
#[wasm_bindgen]
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct CameraState {
    pub rotation_x: f64,
    pub rotation_y: f64,
    pub rotation_z: f64,
    pub distance: f64,
}

impl Default for CameraState {
    fn default() -> Self {
        Self {
            rotation_x: 0.0,
            rotation_y: 0.0,
            rotation_z: 0.0,
            distance: 3.0,
        }
    }
}

#[wasm_bindgen]
impl CameraState {
    #[wasm_bindgen(constructor)]
    pub fn new() -> CameraState {
        CameraState::default()
    }

    /// Accumulate a pointer drag. Horizontal motion orbits around Y,
    /// vertical motion around X.
    pub fn pointer_drag(&mut self, dx: f64, dy: f64) {
        self.rotation_y += dx * DRAG_SCALE;
        self.rotation_x += dy * DRAG_SCALE;
    }

    /// Apply a wheel delta to the orbit distance, clamped to
    /// [`MIN_CAMERA_DISTANCE`, `MAX_CAMERA_DISTANCE`].
    pub fn wheel_zoom(&mut self, delta: f64) {
        self.distance = clamp(
            self.distance + delta * WHEEL_SCALE,
            MIN_CAMERA_DISTANCE,
            MAX_CAMERA_DISTANCE,
        );
    }

    /// Serialize for host-side persistence (localStorage, URL state).
    pub fn to_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(self).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Restore a persisted pose. The distance is re-clamped so stale or
    /// hand-edited state cannot escape the documented range.
    pub fn from_json(json: &str) -> Result<CameraState, JsValue> {
        let mut state: CameraState =
            serde_json::from_str(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        state.distance = clamp(state.distance, MIN_CAMERA_DISTANCE, MAX_CAMERA_DISTANCE);
        Ok(state)
    }
}

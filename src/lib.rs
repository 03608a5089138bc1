use wasm_bindgen::prelude::*;

pub mod engine;
pub mod error;
pub mod formulas;
pub mod lighting;
pub mod math;

pub use engine::camera::CameraState;

use engine::renderer;
use engine::types::FrameParams;
use error::RenderError;

/// Initialize the WASM module (call once from JS).
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(target_arch = "wasm32")]
    {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);
    }
}

#[cfg(target_arch = "wasm32")]
fn to_js(e: RenderError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

// On non-wasm32 targets (e.g. the native `cargo test` host) `JsValue::from_str`
// panics because the wasm-bindgen describe intrinsics are unavailable. Build the
// error value from a const that needs no intrinsics so the error path stays
// runnable in native tests; the wasm boundary behavior above is unchanged.
#[cfg(not(target_arch = "wasm32"))]
fn to_js(e: RenderError) -> JsValue {
    let _ = e;
    JsValue::NULL
}

fn check_output(params: &FrameParams, rgba_out: &[u8]) -> Result<(), RenderError> {
    let need = params.width as usize * params.height as usize * 4;
    if rgba_out.len() < need {
        return Err(RenderError::OutputBufferTooSmall {
            got: rgba_out.len(),
            need,
        });
    }
    Ok(())
}

/// Render interleaved scanlines into a pre-allocated RGBA buffer.
///
/// Called from each Web Worker with its share of rows: worker `i` of `n`
/// renders rows `i, i+n, i+2n, …`
///
/// `frame_params` — Float64Array, see the `FrameParams` buffer layout
/// `rgba_out` — Uint8Array of width × height × 4 bytes
///
/// Returns the number of rows rendered by this worker.
#[wasm_bindgen]
pub fn render_scanlines(
    frame_params: &[f64],
    rgba_out: &mut [u8],
    worker_id: u32,
    worker_count: u32,
) -> Result<u32, JsValue> {
    let params = FrameParams::from_buffer(frame_params).map_err(to_js)?;
    check_output(&params, rgba_out).map_err(to_js)?;

    Ok(renderer::render_scanlines(&params, rgba_out, worker_id, worker_count))
}

/// Whole-frame render in one call — single-threaded hosts and previews.
#[wasm_bindgen]
pub fn render_frame(frame_params: &[f64], rgba_out: &mut [u8]) -> Result<(), JsValue> {
    let params = FrameParams::from_buffer(frame_params).map_err(to_js)?;
    check_output(&params, rgba_out).map_err(to_js)?;

    renderer::render_scanlines(&params, rgba_out, 0, 1);
    Ok(())
}

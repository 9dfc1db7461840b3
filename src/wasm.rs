//! WebAssembly bindings.
//!
//! ```js
//! import init, { solve_transport } from './pkg/u_transport.js';
//!
//! await init();
//! const result = solve_transport({
//!   supply: [500, 400],
//!   demand: [300, 600],
//!   costs: [[4, 6], [5, 3]],
//!   config: { strategy: "vogel" },
//! });
//! console.log(result.total_cost); // 3600
//! ```

use wasm_bindgen::prelude::*;

use crate::solver::TransportRequest;

/// Solves a transportation request given as a plain JS object.
///
/// Returns a `TransportResponse` object. Solver failures are reported inside
/// the response (`success: false`); only a request that cannot be decoded,
/// or a response that cannot be encoded, rejects with an `Error`.
#[wasm_bindgen]
pub fn solve_transport(request: JsValue) -> Result<JsValue, JsValue> {
    let request: TransportRequest = serde_wasm_bindgen::from_value(request)
        .map_err(|e| JsValue::from(js_sys::Error::new(&format!("invalid request: {e}"))))?;
    let response = request.solve();
    serde_wasm_bindgen::to_value(&response)
        .map_err(|e| JsValue::from(js_sys::Error::new(&format!("encoding failed: {e}"))))
}

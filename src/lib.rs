//! Terrain layout optimizer.
//!
//! Finds the highest-scoring arrangement of one landscape card plus a single
//! connected river on a small grid, by branch-and-bound over every tile
//! placement. The engine is plain Rust; the `wasm32` build additionally
//! exports a few functions to JavaScript via wasm-bindgen.

pub mod config;
pub mod grid;
pub mod render;
pub mod river;
pub mod score;
pub mod seed;
pub mod solver;
pub mod types;

pub use config::{ConfigError, EngineConfig, MAX_CELLS};
pub use grid::{Grid, Placement};
pub use score::{score, PruneRule};
pub use solver::{optimize, Search, SearchStats, Solution};
pub use types::{GridShape, LandscapeKind, TileKind};

// ─── WASM Exports (only compiled for wasm32 target) ─────────────────────────

#[cfg(target_arch = "wasm32")]
mod wasm_exports {
    use wasm_bindgen::prelude::*;

    use crate::config::EngineConfig;
    use crate::types::LandscapeKind;
    use crate::{seed, solver};

    fn config_from(rows: usize, cols: usize, landscape: &str) -> Result<EngineConfig, JsValue> {
        let landscape = landscape
            .parse::<LandscapeKind>()
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        let config = EngineConfig::new(rows, cols, landscape);
        config
            .validate()
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(config)
    }

    /// Search for the best layout.
    /// Returns JS object: `{ rows, cols, landscape, score, tiles, river, stats }`.
    #[wasm_bindgen(js_name = "optimizeLayout")]
    pub fn wasm_optimize_layout(
        rows: usize,
        cols: usize,
        landscape: &str,
    ) -> Result<JsValue, JsValue> {
        let config = config_from(rows, cols, landscape)?;
        let solution = solver::optimize(&config).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(serde_wasm_bindgen::to_value(&solution)?)
    }

    /// Tile codes (0 = empty, 1 = river, 2 = landscape) of the zig-zag seed.
    #[wasm_bindgen(js_name = "seedLayout")]
    pub fn wasm_seed_layout(
        rows: usize,
        cols: usize,
        landscape: &str,
    ) -> Result<js_sys::Uint8Array, JsValue> {
        let config = config_from(rows, cols, landscape)?;
        let grid = seed::heuristic_seed(config.shape(), config.landscape);
        let codes: Vec<u8> = grid.tiles().iter().map(|t| t.kind.code()).collect();

        let arr = js_sys::Uint8Array::new_with_length(codes.len() as u32);
        arr.copy_from(&codes);
        Ok(arr)
    }

    /// Best layout rendered as the ASCII table, followed by its value.
    #[wasm_bindgen(js_name = "renderLayout")]
    pub fn wasm_render_layout(
        rows: usize,
        cols: usize,
        landscape: &str,
    ) -> Result<String, JsValue> {
        let config = config_from(rows, cols, landscape)?;
        let solution = solver::optimize(&config).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(format!("{}Value of grid: {}\n", solution.grid, solution.score))
    }

    /// Ping function to verify WASM is loaded.
    #[wasm_bindgen(js_name = "ping")]
    pub fn wasm_ping() -> String {
        "WASM optimizer ready".to_string()
    }
}

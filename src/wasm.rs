//! JavaScript bindings.

use wasm_bindgen::prelude::*;

use crate::bff;
use crate::config::SearchConfig;
use crate::search::SearchOutcome;

fn js_error(message: impl ToString) -> JsValue {
    js_sys::Error::new(&message.to_string()).into()
}

/// Solve a puzzle given as `.bff` text, returning the solved grid one row per line, or `"no solution"`.
///
/// Load and precondition errors are thrown as JavaScript `Error`s.
#[wasm_bindgen(js_name = solveBff)]
pub fn solve_bff(source: &str) -> Result<String, JsValue> {
    let board = bff::parse(source).map_err(js_error)?;
    match board.solve(&SearchConfig::default()).map_err(js_error)? {
        SearchOutcome::Found(placement) => Ok(board.show(&placement)),
        SearchOutcome::NotFound => Ok("no solution".to_string()),
    }
}

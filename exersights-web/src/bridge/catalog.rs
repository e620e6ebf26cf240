//! Catalog lookups for the exercise menu

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::exercises;

#[derive(Serialize)]
struct CatalogEntry {
    id: &'static str,
    title: String,
}

/// List every exercise.
///
/// @returns {Array<{id: string, title: string}>}
#[wasm_bindgen(js_name = listExercises)]
pub fn list_exercises() -> JsValue {
    let entries: Vec<CatalogEntry> = exercises::IDS
        .iter()
        .filter_map(|&id| {
            exercises::load(id)
                .map(|def| CatalogEntry {
                    id,
                    title: def.title().to_string(),
                })
                .map_err(|err| log::warn!("skipping {}: {}", id, err))
                .ok()
        })
        .collect();

    serde_wasm_bindgen::to_value(&entries).unwrap_or(JsValue::NULL)
}

/// Describe one exercise: states, default targets and angle channels.
///
/// @param {string} id - Exercise id
#[wasm_bindgen(js_name = describeExercise)]
pub fn describe_exercise(id: &str) -> Result<JsValue, JsValue> {
    let definition = exercises::load(id)?;
    let serializer = serde_wasm_bindgen::Serializer::json_compatible();
    definition
        .summary()
        .serialize(&serializer)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

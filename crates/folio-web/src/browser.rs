//! wasm-bindgen bridge for the web front end
//!
//! JSON in, JSON out: claims cross the boundary in their camelCase wire
//! format so the TypeScript side can reuse the API types it already has.

use folio_core::{LocalClaimStore, ProfileSettings, ProfileStore};
use wasm_bindgen::prelude::*;

use crate::storage::BrowserSlots;

fn js_err(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn local_store() -> Result<LocalClaimStore<BrowserSlots>, JsValue> {
    console_error_panic_hook::set_once();
    let slots = BrowserSlots::local().map_err(js_err)?;
    Ok(LocalClaimStore::new(slots))
}

/// Convert a 1-5 star rating into a trust score in [-1, 1].
#[wasm_bindgen(js_name = starsToScore)]
pub fn stars_to_score(stars: u8) -> f64 {
    folio_core::stars_to_score(stars)
}

/// Ensure a subject is an absolute http(s) URI.
#[wasm_bindgen(js_name = normalizeUri)]
pub fn normalize_uri(s: &str) -> String {
    folio_core::normalize_uri(s)
}

/// JSON array of the claims kept in localStorage (`[]` when none or corrupt).
#[wasm_bindgen(js_name = listLocalClaims)]
pub fn list_local_claims() -> Result<String, JsValue> {
    let store = local_store()?;
    serde_json::to_string(&store.list()).map_err(js_err)
}

/// Merge a JSON array of claims into localStorage. Returns how many were added.
#[wasm_bindgen(js_name = importClaims)]
pub fn import_claims(raw: &str) -> Result<usize, JsValue> {
    let store = local_store()?;
    let outcome = folio_core::import_batch(&store, raw).map_err(js_err)?;
    Ok(outcome.imported.len())
}

/// Portfolio summary (count, average, breakdowns) of a JSON claims array.
#[wasm_bindgen(js_name = summarizeClaims)]
pub fn summarize_claims(claims_json: &str) -> Result<String, JsValue> {
    let claims: Vec<folio_core::Claim> = serde_json::from_str(claims_json).map_err(js_err)?;
    serde_json::to_string(&folio_core::summarize(&claims)).map_err(js_err)
}

/// Profile settings JSON from localStorage (defaults when absent).
#[wasm_bindgen(js_name = loadProfile)]
pub fn load_profile() -> Result<String, JsValue> {
    let slots = BrowserSlots::local().map_err(js_err)?;
    serde_json::to_string(&ProfileStore::new(slots).load()).map_err(js_err)
}

/// Store profile settings JSON (`{"displayName": ..., "bio": ...}`).
#[wasm_bindgen(js_name = saveProfile)]
pub fn save_profile(settings_json: &str) -> Result<(), JsValue> {
    let settings: ProfileSettings = serde_json::from_str(settings_json).map_err(js_err)?;
    let slots = BrowserSlots::local().map_err(js_err)?;
    ProfileStore::new(slots).save(&settings).map_err(js_err)
}

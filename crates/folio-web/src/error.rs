//! Error types for the browser storage backend

use folio_core::StoreError;
use thiserror::Error;
use wasm_bindgen::JsCast;

/// Result type for browser storage operations
pub type Result<T> = std::result::Result<T, WebStorageError>;

/// Errors that can occur during Web Storage operations
#[derive(Debug, Error)]
pub enum WebStorageError {
    /// Web Storage is not available in this environment
    #[error("Web Storage not available: {0}")]
    NotAvailable(String),

    /// The browser refused the write (`QuotaExceededError`)
    #[error("Web Storage quota exceeded writing {key} ({size} bytes)")]
    QuotaExceeded { key: String, size: usize },

    /// Any other exception raised by the Storage API
    #[error("Web Storage request error: {0}")]
    Request(String),
}

impl WebStorageError {
    /// Classify an exception thrown by `setItem`.
    pub fn from_write(val: wasm_bindgen::JsValue, key: &str, size: usize) -> Self {
        match val.dyn_ref::<web_sys::DomException>() {
            Some(ex) if ex.name() == "QuotaExceededError" => WebStorageError::QuotaExceeded {
                key: key.to_string(),
                size,
            },
            _ => WebStorageError::from(val),
        }
    }
}

impl From<wasm_bindgen::JsValue> for WebStorageError {
    fn from(val: wasm_bindgen::JsValue) -> Self {
        let msg = js_sys::JSON::stringify(&val)
            .map(String::from)
            .unwrap_or_else(|_| format!("{:?}", val));
        WebStorageError::Request(msg)
    }
}

/// Convert WebStorageError to StoreError for the slot storage trait
impl From<WebStorageError> for StoreError {
    fn from(err: WebStorageError) -> Self {
        match err {
            WebStorageError::NotAvailable(msg) => StoreError::Unavailable(msg),
            WebStorageError::QuotaExceeded { key, size } => {
                StoreError::QuotaExceeded { key, size }
            }
            WebStorageError::Request(msg) => {
                StoreError::Backend(format!("Web Storage request: {}", msg))
            }
        }
    }
}

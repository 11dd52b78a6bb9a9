//! Tauri Command Wrappers
//!
//! Frontend bindings to backend commands, organized by domain.

mod item;
mod sync;
mod admin;
mod settings;
mod shell;

use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    /// Rejects with the command's error string on failure
    #[wasm_bindgen(catch, js_namespace = ["window", "__TAURI__", "core"])]
    async fn invoke(cmd: &str, args: JsValue) -> Result<JsValue, JsValue>;
}

/// Invoke `cmd` with serialized `args` and decode the reply
pub(crate) async fn call<A, T>(cmd: &str, args: &A) -> Result<T, String>
where
    A: Serialize + ?Sized,
    T: DeserializeOwned,
{
    let js_args = serde_wasm_bindgen::to_value(args).map_err(|e| format!("Serialization error: {}", e))?;
    decode(cmd, invoke(cmd, js_args).await)
}

/// Invoke a command that takes no arguments
pub(crate) async fn call_no_args<T: DeserializeOwned>(cmd: &str) -> Result<T, String> {
    decode(cmd, invoke(cmd, JsValue::NULL).await)
}

fn decode<T: DeserializeOwned>(cmd: &str, result: Result<JsValue, JsValue>) -> Result<T, String> {
    match result {
        Ok(value) => serde_wasm_bindgen::from_value(value).map_err(|e| format!("Response error: {}", e)),
        Err(err) => {
            let message = err.as_string().unwrap_or_else(|| format!("{:?}", err));
            web_sys::console::error_1(&format!("[{}] {}", cmd, message).into());
            Err(message)
        }
    }
}

// Re-export all public items
pub use item::*;
pub use sync::*;
pub use admin::*;
pub use settings::*;
pub use shell::*;

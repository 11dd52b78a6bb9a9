//! Shell Plugin Wrapper

use serde::Serialize;
use super::call;

#[derive(Serialize)]
struct OpenArgs<'a> {
    path: &'a str,
}

/// Open a URL in the system browser (maps links)
pub async fn open_external(url: &str) -> Result<(), String> {
    call("plugin:shell|open", &OpenArgs { path: url }).await
}

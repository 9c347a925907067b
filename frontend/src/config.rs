use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuntimeConfig {
    pub api_base_url: Option<String>,
}

static API_BASE_URL: OnceLock<String> = OnceLock::new();

#[cfg(target_arch = "wasm32")]
mod globals {
    use wasm_bindgen::JsValue;

    fn read_key(global: &str, keys: [&str; 2]) -> Option<String> {
        let window = web_sys::window()?;
        let any = js_sys::Reflect::get(&window, &global.into()).ok()?;
        if any.is_undefined() || any.is_null() {
            return None;
        }
        let obj = js_sys::Object::from(any);
        keys.iter()
            .filter_map(|key| js_sys::Reflect::get(&obj, &(*key).into()).ok())
            .find(|v| !v.is_undefined() && !v.is_null())
            .and_then(|v| v.as_string())
    }

    // window.__WOUNDCARE_ENV = { API_BASE_URL: "..." } (env.js)
    pub fn from_env_js() -> Option<String> {
        read_key("__WOUNDCARE_ENV", ["API_BASE_URL", "api_base_url"])
    }

    // window.__WOUNDCARE_CONFIG = { api_base_url: "..." }
    pub fn from_window_config() -> Option<String> {
        read_key("__WOUNDCARE_CONFIG", ["api_base_url", "API_BASE_URL"])
    }

    pub fn write_window_config(url: &str) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let obj = js_sys::Object::new();
        let _ = js_sys::Reflect::set(&obj, &"api_base_url".into(), &JsValue::from_str(url));
        let _ = js_sys::Reflect::set(&window, &"__WOUNDCARE_CONFIG".into(), &obj);
    }
}

#[cfg(target_arch = "wasm32")]
fn snapshot_from_globals() -> Option<String> {
    globals::from_env_js().or_else(globals::from_window_config)
}

#[cfg(not(target_arch = "wasm32"))]
fn snapshot_from_globals() -> Option<String> {
    None
}

#[cfg(target_arch = "wasm32")]
async fn fetch_runtime_config() -> Option<RuntimeConfig> {
    let location = web_sys::window()?.location().href().ok()?;
    let url = reqwest::Url::parse(&location).ok()?.join("config.json").ok()?;
    let resp = reqwest::get(url).await.ok()?;
    if !resp.status().is_success() {
        return None;
    }
    let cfg = resp.json::<RuntimeConfig>().await.ok()?;
    if let Some(url) = &cfg.api_base_url {
        globals::write_window_config(url);
    }
    Some(cfg)
}

#[cfg(not(target_arch = "wasm32"))]
async fn fetch_runtime_config() -> Option<RuntimeConfig> {
    None
}

fn cache_base_url(value: &str) -> String {
    let value = normalize_base_url(value);
    let _ = API_BASE_URL.set(value.clone());
    API_BASE_URL.get().cloned().unwrap_or(value)
}

pub fn normalize_base_url(value: &str) -> String {
    value.trim().trim_end_matches('/').to_string()
}

/// Resolves the API base URL once: env.js globals, then `config.json`,
/// then [`DEFAULT_API_BASE_URL`].
pub async fn await_api_base_url() -> String {
    if let Some(cached) = API_BASE_URL.get() {
        return cached.clone();
    }
    if let Some(existing) = snapshot_from_globals() {
        return cache_base_url(&existing);
    }
    if let Some(url) = fetch_runtime_config().await.and_then(|cfg| cfg.api_base_url) {
        return cache_base_url(&url);
    }
    log::debug!("no runtime config found, using {DEFAULT_API_BASE_URL}");
    cache_base_url(DEFAULT_API_BASE_URL)
}

pub async fn init() {
    let url = await_api_base_url().await;
    log::info!("API base URL: {url}");
}

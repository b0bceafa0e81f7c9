use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

pub const SETTINGS_STORE: &str = "settings.json";

fn default_backend_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_frame_socket_url() -> String {
    "ws://localhost:8000/frames".to_string()
}

fn default_overlay_width() -> f64 {
    360.0
}

fn default_overlay_height() -> f64 {
    420.0
}

fn default_overlay_margin() -> f64 {
    20.0
}

fn default_true() -> bool {
    true
}

/// App settings persisted in the tauri-plugin-store JSON file.
/// These match the TypeScript AppSettings interface on the UI side.
///
/// Window bounds and pass-through state are deliberately absent: they are
/// session-scoped and reset on every launch.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSettings {
    #[serde(default = "default_backend_url")]
    pub backend_url: String,
    /// Socket endpoint the UI pushes preview frames to. Carried here so the
    /// webview has one place to read it from; the native side never opens it.
    #[serde(default = "default_frame_socket_url")]
    pub frame_socket_url: String,
    #[serde(default = "default_overlay_width")]
    pub overlay_width: f64,
    #[serde(default = "default_overlay_height")]
    pub overlay_height: f64,
    /// Distance from the work-area top-right corner at first show.
    #[serde(default = "default_overlay_margin")]
    pub overlay_margin: f64,
    /// Start in pass-through with event forwarding, so the overlay is
    /// invisible to clicks until the UI marks its interactive regions.
    #[serde(default = "default_true")]
    pub click_through: bool,
    #[serde(default = "default_true")]
    pub always_on_top: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            backend_url: default_backend_url(),
            frame_socket_url: default_frame_socket_url(),
            overlay_width: default_overlay_width(),
            overlay_height: default_overlay_height(),
            overlay_margin: default_overlay_margin(),
            click_through: true,
            always_on_top: true,
        }
    }
}

impl AppSettings {
    /// Load settings from the tauri-plugin-store JSON file in the app data
    /// dir. Returns None if the file doesn't exist or can't be parsed.
    pub fn load(app_data_dir: &Path) -> Option<Self> {
        let store_path = app_data_dir.join(SETTINGS_STORE);

        if !store_path.exists() {
            return None;
        }

        let content = fs::read_to_string(&store_path).ok()?;

        // The tauri-plugin-store format stores values directly as key-value pairs
        let store_data: serde_json::Value = serde_json::from_str(&content).ok()?;

        Some(Self::from_store_value(&store_data))
    }

    /// Extract individual fields from the store object, falling back to the
    /// defaults for anything missing or mistyped.
    pub fn from_store_value(store_data: &serde_json::Value) -> Self {
        let backend_url = store_data
            .get("backendUrl")
            .and_then(|v| v.as_str())
            .map(|s| s.to_string())
            .unwrap_or_else(default_backend_url);

        let frame_socket_url = store_data
            .get("frameSocketUrl")
            .and_then(|v| v.as_str())
            .map(|s| s.to_string())
            .unwrap_or_else(default_frame_socket_url);

        let overlay_width = store_data
            .get("overlayWidth")
            .and_then(|v| v.as_f64())
            .unwrap_or_else(default_overlay_width);

        let overlay_height = store_data
            .get("overlayHeight")
            .and_then(|v| v.as_f64())
            .unwrap_or_else(default_overlay_height);

        let overlay_margin = store_data
            .get("overlayMargin")
            .and_then(|v| v.as_f64())
            .unwrap_or_else(default_overlay_margin);

        let click_through = store_data
            .get("clickThrough")
            .and_then(|v| v.as_bool())
            .unwrap_or(true);

        let always_on_top = store_data
            .get("alwaysOnTop")
            .and_then(|v| v.as_bool())
            .unwrap_or(true);

        Self {
            backend_url,
            frame_socket_url,
            overlay_width,
            overlay_height,
            overlay_margin,
            click_through,
            always_on_top,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn defaults_describe_the_stock_overlay() {
        let settings = AppSettings::default();
        assert_eq!(settings.overlay_width, 360.0);
        assert_eq!(settings.overlay_height, 420.0);
        assert_eq!(settings.overlay_margin, 20.0);
        assert!(settings.click_through);
        assert!(settings.always_on_top);
    }

    #[test]
    fn store_fields_override_defaults() {
        let settings = AppSettings::from_store_value(&json!({
            "backendUrl": "http://10.0.0.2:9000",
            "overlayWidth": 420.0,
            "clickThrough": false,
        }));
        assert_eq!(settings.backend_url, "http://10.0.0.2:9000");
        assert_eq!(settings.overlay_width, 420.0);
        assert!(!settings.click_through);
        // Untouched fields keep their defaults.
        assert_eq!(settings.overlay_height, 420.0);
        assert!(settings.always_on_top);
    }

    #[test]
    fn mistyped_fields_fall_back_to_defaults() {
        let settings = AppSettings::from_store_value(&json!({
            "backendUrl": 42,
            "overlayWidth": "wide",
        }));
        assert_eq!(settings.backend_url, "http://localhost:8000");
        assert_eq!(settings.overlay_width, 360.0);
    }
}

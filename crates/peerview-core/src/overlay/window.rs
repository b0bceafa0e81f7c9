use serde::{Deserialize, Serialize};

use crate::settings::AppSettings;

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct OverlayOptions {
    pub label: String,
    pub entry_point: String,
    pub width: f64,
    pub height: f64,
    /// Distance from the work-area top-right corner at first show.
    pub margin: f64,
    pub min_width: f64,
    pub min_height: f64,
    pub click_through: bool,
    pub always_on_top: bool,
    pub resizable: bool,
}

impl OverlayOptions {
    pub fn from_settings(settings: &AppSettings) -> Self {
        Self {
            width: settings.overlay_width,
            height: settings.overlay_height,
            margin: settings.overlay_margin,
            min_width: settings.overlay_width,
            min_height: settings.overlay_height,
            click_through: settings.click_through,
            always_on_top: settings.always_on_top,
            ..Self::default()
        }
    }
}

impl Default for OverlayOptions {
    fn default() -> Self {
        Self {
            label: "overlay".to_string(),
            entry_point: "index.html".to_string(),
            width: 360.0,
            height: 420.0,
            margin: 20.0,
            min_width: 360.0,
            min_height: 420.0,
            click_through: true,
            always_on_top: true,
            resizable: true,
        }
    }
}

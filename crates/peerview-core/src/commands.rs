use std::sync::Mutex;

use serde_json::json;
use tauri::{AppHandle, Emitter, State, command};
use tauri_plugin_store::StoreExt;
use tracing::warn;

use crate::{
    capture::{self, CaptureSource, DisplayEnumerator},
    chat::{self, ChatClient},
    geometry::Rect,
    overlay::OverlayController,
    settings::{AppSettings, SETTINGS_STORE},
};

/// The overlay controller slot. Empty until the runtime has created the
/// window; calls arriving before that are no-ops.
pub struct OverlayState(pub Mutex<Option<OverlayController>>);
pub struct ChatState(pub Mutex<ChatClient>);

fn with_controller<T>(
    state: &OverlayState,
    fallback: T,
    f: impl FnOnce(&mut OverlayController) -> T,
) -> Result<T, String> {
    let mut guard = state.0.lock().map_err(|e| e.to_string())?;
    match guard.as_mut() {
        Some(controller) => Ok(f(controller)),
        None => {
            warn!("overlay window not ready, ignoring call");
            Ok(fallback)
        }
    }
}

// ============================================
// Geometry & Input Commands
// ============================================

#[command]
pub fn get_work_area(state: State<'_, OverlayState>) -> Result<Rect, String> {
    with_controller(&state, Rect::ZERO, |c| c.work_area())
}

#[command]
pub fn get_bounds(state: State<'_, OverlayState>) -> Result<Rect, String> {
    with_controller(&state, Rect::ZERO, |c| c.bounds())
}

#[command]
pub fn set_size(state: State<'_, OverlayState>, width: f64, height: f64) -> Result<(), String> {
    with_controller(&state, (), |c| c.set_size(width, height))
}

#[command]
pub fn set_position(
    state: State<'_, OverlayState>,
    x: f64,
    y: f64,
    width: Option<f64>,
    height: Option<f64>,
) -> Result<(), String> {
    with_controller(&state, (), |c| c.set_position(x, y, width, height))
}

#[command]
pub fn set_resizable(state: State<'_, OverlayState>, resizable: bool) -> Result<(), String> {
    with_controller(&state, (), |c| c.set_resizable(resizable))
}

#[command]
pub fn set_click_through(
    state: State<'_, OverlayState>,
    enabled: bool,
    forward_events: bool,
) -> Result<(), String> {
    with_controller(&state, (), |c| c.set_click_through(enabled, forward_events))
}

#[command]
pub fn set_interactive_regions(
    state: State<'_, OverlayState>,
    regions: Vec<Rect>,
) -> Result<(), String> {
    with_controller(&state, (), |c| c.set_interactive_regions(regions))
}

#[command]
pub fn pointer_moved(state: State<'_, OverlayState>, x: f64, y: f64) -> Result<(), String> {
    with_controller(&state, (), |c| c.pointer_moved(x, y))
}

// ============================================
// Capture Commands
// ============================================

#[command]
pub async fn get_screen_source() -> Result<CaptureSource, String> {
    // Enumeration talks to the display server; keep it off the main thread.
    tauri::async_runtime::spawn_blocking(|| capture::first_source(&DisplayEnumerator))
        .await
        .map_err(|e| e.to_string())
}

// ============================================
// Chat Commands
// ============================================

#[command]
pub async fn chat_send(
    app: AppHandle,
    state: State<'_, ChatState>,
    prompt: String,
) -> Result<(), String> {
    // Clone the client out so the guard is not held across the await.
    let client = { state.0.lock().map_err(|e| e.to_string())?.clone() };
    match client.send_stream(&app, &prompt).await {
        Ok(()) => Ok(()),
        Err(e) => {
            let message = e.to_string();
            let _ = app.emit(chat::ERROR_EVENT, json!({ "message": message }));
            Err(message)
        }
    }
}

#[command]
pub async fn chat_clear(state: State<'_, ChatState>) -> Result<(), String> {
    let client = { state.0.lock().map_err(|e| e.to_string())?.clone() };
    client.clear().await.map_err(|e| e.to_string())
}

// ============================================
// Settings Commands
// ============================================

#[command]
pub fn settings_get(app: AppHandle) -> Result<AppSettings, String> {
    let store = app.store(SETTINGS_STORE).map_err(|e| e.to_string())?;

    let mut values = serde_json::Map::new();
    for key in store.keys() {
        if let Some(value) = store.get(&key) {
            values.insert(key.clone(), value);
        }
    }

    Ok(AppSettings::from_store_value(&serde_json::Value::Object(
        values,
    )))
}

/// Write settings keys to the store. Picked up on the next launch; the
/// running overlay and chat session keep their current configuration.
#[command]
pub fn settings_set(app: AppHandle, values: serde_json::Value) -> Result<(), String> {
    let store = app.store(SETTINGS_STORE).map_err(|e| e.to_string())?;

    if let serde_json::Value::Object(map) = values {
        for (key, value) in map {
            store.set(&key, value);
        }
        store.save().map_err(|e| e.to_string())?;
    } else {
        return Err("values must be an object".to_string());
    }

    Ok(())
}

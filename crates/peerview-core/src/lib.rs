pub mod capture;
pub mod chat;
pub mod commands;
pub mod error;
pub mod geometry;
pub mod input;
pub mod overlay;
pub mod settings;

pub use capture::*;
pub use chat::*;
pub use commands::*;
pub use error::*;
pub use geometry::*;
pub use input::*;
pub use overlay::*;
pub use settings::*;

use std::sync::Mutex;

use tauri::{
    AppHandle, Manager, Wry,
    plugin::{Builder, TauriPlugin},
};
use tracing::info;

/// State wrapper for the settings loaded at startup
pub struct SettingsState(pub Mutex<AppSettings>);

pub fn init() -> TauriPlugin<Wry> {
    Builder::<Wry, ()>::new("peerview")
        .invoke_handler(tauri::generate_handler![
            // Geometry & input
            commands::get_work_area,
            commands::get_bounds,
            commands::set_size,
            commands::set_position,
            commands::set_resizable,
            commands::set_click_through,
            commands::set_interactive_regions,
            commands::pointer_moved,
            // Capture
            commands::get_screen_source,
            // Chat
            commands::chat_send,
            commands::chat_clear,
            // Settings
            commands::settings_get,
            commands::settings_set
        ])
        .setup(|app, _api| {
            let settings = app
                .path()
                .app_data_dir()
                .ok()
                .and_then(|dir| AppSettings::load(&dir))
                .unwrap_or_default();
            info!("chat backend at {}", settings.backend_url);

            let client = ChatClient::new(&settings.backend_url);
            info!("chat session {}", client.session_id());

            // The controller slot stays empty until the runtime creates the
            // window via setup_overlay.
            app.manage(OverlayState(Mutex::new(None)));
            app.manage(ChatState(Mutex::new(client)));
            app.manage(SettingsState(Mutex::new(settings)));

            Ok(())
        })
        .build()
}

/// Create the overlay window from the loaded settings and fill the managed
/// controller slot. Called by the runtime once the app is ready.
pub fn setup_overlay(app: &AppHandle) -> Result<(), Error> {
    let options = {
        let settings_state = app.state::<SettingsState>();
        let settings = settings_state.0.lock().map_err(|_| Error::StatePoisoned)?;
        OverlayOptions::from_settings(&settings)
    };

    let controller = OverlayController::create(app, options)?;

    let state = app.state::<OverlayState>();
    *state.0.lock().map_err(|_| Error::StatePoisoned)? = Some(controller);
    Ok(())
}

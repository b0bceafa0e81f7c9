use tauri::{Manager, WindowEvent};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    tauri::Builder::default()
        .plugin(tauri_plugin_store::Builder::new().build())
        .plugin(peerview_core::init())
        .setup(|app| {
            let app_handle = app.handle().clone();
            tauri::async_runtime::spawn(async move {
                // Let the store plugin settle before the window appears
                tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;

                info!("creating overlay window...");
                if let Err(e) = peerview_core::setup_overlay(&app_handle) {
                    error!("failed to create overlay window: {e}");
                }
            });

            Ok(())
        })
        .on_window_event(|window, event| {
            if let WindowEvent::Destroyed = event {
                // Single-window app: when the overlay goes, so does the
                // process, except on macOS per platform convention.
                if window.label() == "overlay" && !cfg!(target_os = "macos") {
                    window.app_handle().exit(0);
                }
            }
        })
        .run(tauri::generate_context!())
        .expect("error running PeerView")
}

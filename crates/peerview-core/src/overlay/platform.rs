//! Platform-specific overlay window configuration
//!
//! This module handles the parts Tauri's cross-platform surface doesn't
//! cover for a transparent overlay:
//! - Window level and collection behavior on macOS (always on top, on every
//!   space, out of the window switcher)
//! - Tool-window styling and topmost ordering on Windows
//! - Click-through with event forwarding on both
//! - Work-area queries (the usable screen rectangle minus taskbars/docks)

use tauri::WebviewWindow;
use tracing::debug;

use crate::Error;
use crate::geometry::Rect;
use crate::input::InputMode;

/// Configure a freshly created window to behave as a proper overlay.
pub fn configure_overlay(window: &WebviewWindow) -> Result<(), Error> {
    debug!("applying platform overlay configuration");

    #[cfg(target_os = "macos")]
    configure_overlay_macos(window)?;

    #[cfg(target_os = "windows")]
    configure_overlay_windows(window)?;

    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        // Linux and other platforms: the always_on_top / skip_taskbar flags
        // from the window builder are all we get.
        let _ = window;
    }

    Ok(())
}

/// Apply a pass-through state to the window.
///
/// The generic `set_ignore_cursor_events` call covers every platform; the
/// per-OS refinement handles the forwarding half: keeping move events
/// flowing to the webview on macOS, and the layered/transparent ex-style
/// bits on Windows.
pub fn apply_input_mode(window: &WebviewWindow, mode: InputMode) -> Result<(), Error> {
    let (pass_through, forward) = match mode {
        InputMode::Capturing => (false, false),
        InputMode::PassThrough { forward } => (true, forward),
    };
    window.set_ignore_cursor_events(pass_through)?;
    apply_forwarding(window, pass_through, forward)?;
    debug!("input mode applied: {mode:?}");
    Ok(())
}

/// Work area of the display the window sits on, in logical pixels with a
/// top-left origin.
pub fn query_work_area(window: &WebviewWindow) -> Result<Rect, Error> {
    #[cfg(target_os = "macos")]
    {
        use objc2::MainThreadMarker;
        use objc2_app_kit::NSScreen;

        // NSScreen is main-thread only. Commands usually arrive there; when
        // one doesn't, fall back to the monitor bounds rather than blocking
        // on a main-thread dispatch.
        if let Some(mtm) = MainThreadMarker::new() {
            let screen = NSScreen::mainScreen(mtm).ok_or(Error::DisplayUnavailable)?;
            let frame = screen.frame();
            let visible = screen.visibleFrame();
            // AppKit uses a bottom-left origin; convert to top-left.
            let y = frame.size.height - visible.origin.y - visible.size.height;
            return Ok(Rect::new(
                visible.origin.x,
                y,
                visible.size.width,
                visible.size.height,
            ));
        }
        monitor_bounds(window)
    }

    #[cfg(target_os = "windows")]
    {
        use windows::Win32::Foundation::RECT;
        use windows::Win32::UI::WindowsAndMessaging::{
            SPI_GETWORKAREA, SYSTEM_PARAMETERS_INFO_UPDATE_FLAGS, SystemParametersInfoW,
        };

        let mut rect = RECT::default();
        unsafe {
            SystemParametersInfoW(
                SPI_GETWORKAREA,
                0,
                Some(&mut rect as *mut RECT as *mut _),
                SYSTEM_PARAMETERS_INFO_UPDATE_FLAGS(0),
            )
            .map_err(|e| Error::DisplayQuery(e.to_string()))?;
        }
        // SPI_GETWORKAREA is in physical pixels.
        let scale = window.scale_factor()?;
        Ok(Rect::new(
            rect.left as f64 / scale,
            rect.top as f64 / scale,
            (rect.right - rect.left) as f64 / scale,
            (rect.bottom - rect.top) as f64 / scale,
        ))
    }

    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        monitor_bounds(window)
    }
}

/// Full bounds of the window's monitor, used as the fallback when no
/// platform work-area API is available.
#[cfg(not(target_os = "windows"))]
fn monitor_bounds(window: &WebviewWindow) -> Result<Rect, Error> {
    let monitor = match window.current_monitor()? {
        Some(monitor) => Some(monitor),
        None => window.primary_monitor()?,
    }
    .ok_or(Error::DisplayUnavailable)?;

    let scale = monitor.scale_factor();
    let position = monitor.position().to_logical::<f64>(scale);
    let size = monitor.size().to_logical::<f64>(scale);
    Ok(Rect::new(position.x, position.y, size.width, size.height))
}

/// macOS-specific overlay configuration
#[cfg(target_os = "macos")]
fn configure_overlay_macos(window: &WebviewWindow) -> Result<(), Error> {
    use objc2::rc::Retained;
    use objc2_app_kit::{NSMainMenuWindowLevel, NSWindow, NSWindowCollectionBehavior};

    let ns_window_ptr = window
        .ns_window()
        .map_err(|e| Error::WindowCreation(format!("Failed to get NSWindow handle: {}", e)))?;

    // SAFETY: The pointer is valid as long as the window exists, and we're
    // retaining it to ensure it stays valid during our operations
    let ns_window: Retained<NSWindow> = unsafe { Retained::retain(ns_window_ptr as *mut NSWindow) }
        .ok_or_else(|| Error::WindowCreation("NSWindow pointer was null".to_string()))?;

    ns_window.setLevel(NSMainMenuWindowLevel);

    // - CanJoinAllSpaces: appears on every virtual desktop/space
    // - Stationary: stays in place during Mission Control
    // - IgnoresCycle: doesn't appear in Cmd+Tab
    // - FullScreenAuxiliary: can sit alongside fullscreen apps
    let behavior = NSWindowCollectionBehavior::CanJoinAllSpaces
        | NSWindowCollectionBehavior::Stationary
        | NSWindowCollectionBehavior::IgnoresCycle
        | NSWindowCollectionBehavior::FullScreenAuxiliary;
    ns_window.setCollectionBehavior(behavior);

    // Shadows can intercept clicks along the window edge.
    ns_window.setHasShadow(false);

    Ok(())
}

/// Windows-specific overlay configuration
#[cfg(target_os = "windows")]
fn configure_overlay_windows(window: &WebviewWindow) -> Result<(), Error> {
    use windows::Win32::Foundation::HWND;
    use windows::Win32::UI::WindowsAndMessaging::{
        GWL_EXSTYLE, GetWindowLongPtrW, HWND_TOPMOST, SWP_NOMOVE, SWP_NOSIZE, SetWindowLongPtrW,
        SetWindowPos, WS_EX_TOOLWINDOW,
    };

    let hwnd = window
        .hwnd()
        .map_err(|e| Error::WindowCreation(format!("Failed to get HWND handle: {}", e)))?;

    unsafe {
        let hwnd = HWND(hwnd.0);

        // WS_EX_TOOLWINDOW keeps the overlay out of the taskbar and Alt+Tab.
        let mut ex_style = GetWindowLongPtrW(hwnd, GWL_EXSTYLE);
        ex_style |= WS_EX_TOOLWINDOW.0 as isize;
        SetWindowLongPtrW(hwnd, GWL_EXSTYLE, ex_style);

        SetWindowPos(
            hwnd,
            Some(HWND_TOPMOST),
            0,
            0,
            0,
            0,
            SWP_NOMOVE | SWP_NOSIZE,
        )
        .map_err(|e| Error::WindowCreation(format!("Failed to set window position: {}", e)))?;
    }

    Ok(())
}

#[cfg(target_os = "macos")]
fn apply_forwarding(window: &WebviewWindow, pass_through: bool, forward: bool) -> Result<(), Error> {
    use objc2::rc::Retained;
    use objc2_app_kit::NSWindow;

    let ns_window_ptr = window
        .ns_window()
        .map_err(|e| Error::WindowCreation(format!("Failed to get NSWindow handle: {}", e)))?;

    // SAFETY: same retain contract as configure_overlay_macos
    let ns_window: Retained<NSWindow> = unsafe { Retained::retain(ns_window_ptr as *mut NSWindow) }
        .ok_or_else(|| Error::WindowCreation("NSWindow pointer was null".to_string()))?;

    // While ignoring mouse events the window still sees move events when
    // forwarding is requested, so hover tracking inside interactive regions
    // keeps working.
    ns_window.setAcceptsMouseMovedEvents(!pass_through || forward);

    Ok(())
}

#[cfg(target_os = "windows")]
fn apply_forwarding(window: &WebviewWindow, pass_through: bool, forward: bool) -> Result<(), Error> {
    use windows::Win32::Foundation::HWND;
    use windows::Win32::UI::WindowsAndMessaging::{
        GWL_EXSTYLE, GetWindowLongPtrW, SetWindowLongPtrW, WS_EX_LAYERED, WS_EX_TRANSPARENT,
    };

    // Forwarding is inherent to WS_EX_TRANSPARENT: events go to the next
    // window in z-order.
    let _ = forward;

    let hwnd = window
        .hwnd()
        .map_err(|e| Error::WindowCreation(format!("Failed to get HWND handle: {}", e)))?;

    unsafe {
        let hwnd = HWND(hwnd.0);
        let mut ex_style = GetWindowLongPtrW(hwnd, GWL_EXSTYLE);
        if pass_through {
            ex_style |= WS_EX_LAYERED.0 as isize;
            ex_style |= WS_EX_TRANSPARENT.0 as isize;
        } else {
            ex_style &= !(WS_EX_TRANSPARENT.0 as isize);
        }
        SetWindowLongPtrW(hwnd, GWL_EXSTYLE, ex_style);
    }

    Ok(())
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn apply_forwarding(
    _window: &WebviewWindow,
    _pass_through: bool,
    _forward: bool,
) -> Result<(), Error> {
    // set_ignore_cursor_events is all the generic backends offer.
    Ok(())
}

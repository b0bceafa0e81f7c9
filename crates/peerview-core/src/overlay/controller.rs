use tauri::{
    AppHandle, LogicalPosition, LogicalSize, Position, Size, WebviewUrl, WebviewWindow,
    WebviewWindowBuilder, window::Color,
};
use tracing::{info, warn};

use crate::{
    Error,
    geometry::{self, BUBBLE_SIZE, Rect},
    input::{InputMode, InputState},
    overlay::{OverlayOptions, platform},
};

/// Owns the overlay window handle and keeps its geometry and pass-through
/// state consistent with what the UI asked for.
///
/// Geometry mutations are best-effort: when the platform call fails (window
/// already destroyed, display gone) the operation logs and returns, and the
/// cached state answers reads until the next successful round trip.
pub struct OverlayController {
    window: WebviewWindow,
    work_area: Rect,
    bounds: Rect,
    input: InputState,
    resizable: bool,
}

impl OverlayController {
    /// Create the overlay window and position it at the work-area top-right
    /// corner, inset by the configured margin.
    pub fn create(app: &AppHandle, options: OverlayOptions) -> Result<Self, Error> {
        let url = if options.entry_point.starts_with("http://")
            || options.entry_point.starts_with("https://")
        {
            // External URL (e.g., dev server)
            WebviewUrl::External(
                options
                    .entry_point
                    .parse()
                    .map_err(|e| Error::WindowCreation(format!("Invalid URL: {}", e)))?,
            )
        } else {
            // Bundled asset (relative path like "index.html")
            WebviewUrl::App(options.entry_point.clone().into())
        };

        // Created hidden; shown only after platform configuration and
        // positioning so the window never flashes at the wrong spot.
        let window = WebviewWindowBuilder::new(app, &options.label, url)
            .title(&options.label)
            .inner_size(options.width, options.height)
            .min_inner_size(options.min_width, options.min_height)
            .decorations(false)
            .transparent(true)
            .background_color(Color(0, 0, 0, 0))
            .always_on_top(options.always_on_top)
            .skip_taskbar(true)
            .shadow(false)
            .resizable(options.resizable)
            .visible(false)
            .build()
            .map_err(|e| Error::WindowCreation(e.to_string()))?;

        platform::configure_overlay(&window)?;

        let mut controller = Self {
            window,
            work_area: Rect::ZERO,
            bounds: Rect::new(0.0, 0.0, options.width, options.height),
            input: InputState::new(),
            resizable: options.resizable,
        };
        let _ = controller.input.window_resized(options.width, options.height);

        controller.refresh_work_area();
        let wa = controller.work_area;
        controller.apply_bounds(geometry::clamp_rect(
            Rect::new(
                wa.x + wa.width - options.width - options.margin,
                wa.y + options.margin,
                options.width,
                options.height,
            ),
            wa,
        ));

        controller
            .window
            .show()
            .map_err(|e| Error::WindowCreation(e.to_string()))?;

        if options.click_through {
            controller.set_click_through(true, true);
        }

        info!(
            "overlay window created at ({}, {}) {}x{}",
            controller.bounds.x, controller.bounds.y, controller.bounds.width,
            controller.bounds.height
        );
        Ok(controller)
    }

    /// Current display work area. Falls back to the last-known value (zero
    /// until the first successful query) when no display can be found.
    pub fn work_area(&mut self) -> Rect {
        self.refresh_work_area();
        self.work_area
    }

    /// Current window bounds, from the platform when possible, cached
    /// otherwise.
    pub fn bounds(&mut self) -> Rect {
        match self.read_bounds() {
            Ok(bounds) => {
                self.bounds = bounds;
                bounds
            }
            Err(e) => {
                warn!("window bounds read failed, using last-known: {e}");
                self.bounds
            }
        }
    }

    /// Resize in place. Non-positive dimensions are rejected; the position is
    /// re-clamped in case the new size pushes the window off-screen.
    pub fn set_size(&mut self, width: f64, height: f64) {
        if !geometry::is_valid_size(width, height) {
            warn!("rejecting set_size({width}, {height}): dimensions must be positive");
            return;
        }
        self.refresh_work_area();
        let current = self.bounds();
        self.apply_bounds(geometry::clamp_rect(
            Rect::new(current.x, current.y, width, height),
            self.work_area,
        ));
    }

    /// Move (and optionally resize) the window, clamped into the work area.
    /// Omitted dimensions default to the minimized bubble size; the
    /// minimize-to-bubble move is the only caller that omits them.
    pub fn set_position(&mut self, x: f64, y: f64, width: Option<f64>, height: Option<f64>) {
        let width = width.unwrap_or(BUBBLE_SIZE);
        let height = height.unwrap_or(BUBBLE_SIZE);
        self.refresh_work_area();
        self.apply_bounds(geometry::clamp_rect(
            Rect::new(x, y, width, height),
            self.work_area,
        ));
    }

    /// Advisory to the window manager; `resizable()` reflects the last-set
    /// value.
    pub fn set_resizable(&mut self, resizable: bool) {
        if let Err(e) = self.window.set_resizable(resizable) {
            warn!("set_resizable({resizable}) failed: {e}");
            return;
        }
        self.resizable = resizable;
    }

    pub fn resizable(&self) -> bool {
        self.resizable
    }

    pub fn set_click_through(&mut self, enabled: bool, forward: bool) {
        if let Some(mode) = self.input.set_click_through(enabled, forward) {
            self.apply_input_mode(mode);
        }
    }

    pub fn set_interactive_regions(&mut self, regions: Vec<Rect>) {
        if let Some(mode) = self.input.set_regions(regions) {
            self.apply_input_mode(mode);
        }
    }

    pub fn pointer_moved(&mut self, x: f64, y: f64) {
        if let Some(mode) = self.input.pointer_moved(x, y) {
            self.apply_input_mode(mode);
        }
    }

    pub fn input_mode(&self) -> InputMode {
        self.input.mode()
    }

    fn refresh_work_area(&mut self) {
        match platform::query_work_area(&self.window) {
            Ok(area) => self.work_area = area,
            Err(e) => warn!("work area query failed, using last-known: {e}"),
        }
    }

    fn read_bounds(&self) -> Result<Rect, Error> {
        let scale = self.window.scale_factor()?;
        let position = self.window.outer_position()?.to_logical::<f64>(scale);
        let size = self.window.outer_size()?.to_logical::<f64>(scale);
        Ok(Rect::new(position.x, position.y, size.width, size.height))
    }

    fn apply_bounds(&mut self, rect: Rect) {
        if let Err(e) = self.try_apply_bounds(rect) {
            warn!("geometry update failed: {e}");
            return;
        }
        self.bounds = rect;
        if let Some(mode) = self.input.window_resized(rect.width, rect.height) {
            self.apply_input_mode(mode);
        }
    }

    fn try_apply_bounds(&self, rect: Rect) -> Result<(), Error> {
        self.window.set_size(Size::Logical(LogicalSize {
            width: rect.width,
            height: rect.height,
        }))?;
        self.window.set_position(Position::Logical(LogicalPosition {
            x: rect.x,
            y: rect.y,
        }))?;
        Ok(())
    }

    fn apply_input_mode(&self, mode: InputMode) {
        if let Err(e) = platform::apply_input_mode(&self.window, mode) {
            warn!("pass-through update failed: {e}");
        }
    }
}

//! Pass-through state machine for the overlay window.
//!
//! The window is either CAPTURING (intercepts all pointer input) or
//! PASS-THROUGH (pointer events fall through to whatever is beneath, outside
//! any interactive region). Transitions come only from UI gestures; the most
//! recent `set_click_through` / `set_regions` call wins. The state machine is
//! pure; the controller applies the platform side effect whenever a mutation
//! reports a changed mode.

use crate::geometry::Rect;

/// Whether the overlay window captures pointer input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Capturing,
    PassThrough { forward: bool },
}

pub struct InputState {
    mode: InputMode,
    /// `Some` while the region form is active; `None` after a flag-form call.
    regions: Option<Vec<Rect>>,
    pointer: Option<(f64, f64)>,
    window_size: (f64, f64),
}

impl InputState {
    /// Windows start capturing; the shell switches to pass-through after
    /// creation when configured to.
    pub fn new() -> Self {
        Self {
            mode: InputMode::Capturing,
            regions: None,
            pointer: None,
            window_size: (0.0, 0.0),
        }
    }

    pub fn mode(&self) -> InputMode {
        self.mode
    }

    /// Flag form: supersedes any region set.
    pub fn set_click_through(&mut self, enabled: bool, forward: bool) -> Option<InputMode> {
        self.regions = None;
        let next = if enabled {
            InputMode::PassThrough { forward }
        } else {
            InputMode::Capturing
        };
        self.apply(next)
    }

    /// Region form: the listed window-local rectangles stay click-capturing,
    /// everything else becomes click-through. An empty list means fully
    /// click-through; a rect covering the whole window means fully capturing.
    pub fn set_regions(&mut self, regions: Vec<Rect>) -> Option<InputMode> {
        self.regions = Some(regions);
        self.reevaluate()
    }

    /// UI-forwarded pointer position, used to evaluate the region set.
    pub fn pointer_moved(&mut self, x: f64, y: f64) -> Option<InputMode> {
        self.pointer = Some((x, y));
        self.reevaluate()
    }

    /// Keeps the full-window-region check accurate across resizes.
    pub fn window_resized(&mut self, width: f64, height: f64) -> Option<InputMode> {
        self.window_size = (width, height);
        self.reevaluate()
    }

    fn reevaluate(&mut self) -> Option<InputMode> {
        let Some(regions) = &self.regions else {
            // Flag form active; pointer position is irrelevant.
            return None;
        };
        let (w, h) = self.window_size;
        let covers_window = w > 0.0
            && h > 0.0
            && regions
                .iter()
                .any(|r| r.x <= 0.0 && r.y <= 0.0 && r.right() >= w && r.bottom() >= h);
        let over_region = self
            .pointer
            .map(|(x, y)| regions.iter().any(|r| r.contains(x, y)))
            .unwrap_or(false);
        let next = if covers_window || over_region {
            InputMode::Capturing
        } else {
            InputMode::PassThrough { forward: true }
        };
        self.apply(next)
    }

    fn apply(&mut self, next: InputMode) -> Option<InputMode> {
        if next == self.mode {
            return None;
        }
        self.mode = next;
        Some(next)
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_capturing() {
        assert_eq!(InputState::new().mode(), InputMode::Capturing);
    }

    #[test]
    fn last_click_through_call_wins() {
        let mut state = InputState::new();
        assert_eq!(
            state.set_click_through(true, true),
            Some(InputMode::PassThrough { forward: true })
        );
        assert_eq!(
            state.set_click_through(false, true),
            Some(InputMode::Capturing)
        );
        assert_eq!(state.mode(), InputMode::Capturing);
    }

    #[test]
    fn redundant_toggle_reports_no_change() {
        let mut state = InputState::new();
        state.set_click_through(true, true);
        assert_eq!(state.set_click_through(true, true), None);
    }

    #[test]
    fn empty_region_set_means_fully_click_through() {
        let mut state = InputState::new();
        state.window_resized(360.0, 420.0);
        assert_eq!(
            state.set_regions(vec![]),
            Some(InputMode::PassThrough { forward: true })
        );
        assert_eq!(state.pointer_moved(100.0, 100.0), None);
    }

    #[test]
    fn full_window_region_means_fully_capturing() {
        let mut state = InputState::new();
        state.window_resized(360.0, 420.0);
        state.set_regions(vec![]);
        assert_eq!(
            state.set_regions(vec![Rect::new(0.0, 0.0, 360.0, 420.0)]),
            Some(InputMode::Capturing)
        );
        // Pointer outside the window does not matter while the region covers it.
        assert_eq!(state.pointer_moved(-10.0, -10.0), None);
    }

    #[test]
    fn pointer_crossing_a_region_boundary_toggles() {
        let mut state = InputState::new();
        state.window_resized(360.0, 420.0);
        state.set_regions(vec![Rect::new(0.0, 0.0, 100.0, 100.0)]);

        assert_eq!(
            state.pointer_moved(50.0, 50.0),
            Some(InputMode::Capturing)
        );
        assert_eq!(state.pointer_moved(60.0, 60.0), None);
        assert_eq!(
            state.pointer_moved(200.0, 200.0),
            Some(InputMode::PassThrough { forward: true })
        );
    }

    #[test]
    fn region_set_is_replaced_not_merged() {
        let mut state = InputState::new();
        state.window_resized(360.0, 420.0);
        state.set_regions(vec![Rect::new(0.0, 0.0, 100.0, 100.0)]);
        state.pointer_moved(50.0, 50.0);
        assert_eq!(state.mode(), InputMode::Capturing);

        // The old region is gone; the pointer now sits on click-through ground.
        assert_eq!(
            state.set_regions(vec![Rect::new(200.0, 200.0, 50.0, 50.0)]),
            Some(InputMode::PassThrough { forward: true })
        );
    }

    #[test]
    fn flag_form_supersedes_regions() {
        let mut state = InputState::new();
        state.window_resized(360.0, 420.0);
        state.set_regions(vec![Rect::new(0.0, 0.0, 100.0, 100.0)]);
        state.pointer_moved(50.0, 50.0);

        state.set_click_through(true, false);
        assert_eq!(state.mode(), InputMode::PassThrough { forward: false });
        // Pointer movement no longer re-evaluates the stale region list.
        assert_eq!(state.pointer_moved(50.0, 50.0), None);
    }
}

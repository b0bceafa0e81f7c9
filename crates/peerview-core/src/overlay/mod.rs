pub mod controller;
pub mod platform;
pub mod window;

pub use controller::OverlayController;
pub use window::OverlayOptions;

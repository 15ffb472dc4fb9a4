/// Initial inner size of the window in pixels.
pub const WINDOW_SIZE: [f32; 2] = [1280.0, 720.0];

/// Zoom levels per scroll notch or `+`/`-` key press.
pub const ZOOM_STEP: f64 = 0.25;

/// Zoom levels added by a double click.
pub const DOUBLE_CLICK_ZOOM: f64 = 1.0;

/// Pixels moved per arrow key press.
pub const KEYBOARD_PAN: f64 = 128.0;

/// Inner margin of the side panel.
pub const PANEL_MARGIN: f32 = 12.0;

/// Panels narrower than this only show their background.
pub const PANEL_MIN_CONTENT_WIDTH: f32 = 60.0;

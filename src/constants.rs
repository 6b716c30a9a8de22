//! Application-wide constants.

/// The display name of the application.
pub const APP_NAME: &str = "swatchmatch";

/// Default port for `swatchmatch-web`.
pub const DEFAULT_WEB_PORT: u16 = 3002;

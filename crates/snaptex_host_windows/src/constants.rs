pub const WINDOW_CLASS_NAME: &str = "snaptex_overlay";

/// Title of the result viewer window.
pub const VIEWER_TITLE: &str = "Extracted Formula (LaTeX)";

/// Viewer title when recognition failed and the failure was propagated.
pub const VIEWER_TITLE_FAILED: &str = "Extracted Formula (LaTeX) - recognition failed";

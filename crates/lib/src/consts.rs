use std::time::Duration;

/// Application name used for data directories.
pub const APP_NAME: &str = "daypage";

/// Idle period after the last completed edit before a page is saved.
pub const DEFAULT_IDLE_WINDOW: Duration = Duration::from_secs(3);

/// File extension of stored pages.
pub const PAGE_EXTENSION: &str = "png";

/// Directory name for pages within the data directory.
pub const PAGES_DIR: &str = "pages";

/// Overrides the pages directory.
pub const PAGES_DIR_ENV: &str = "DAYPAGE_PAGES_DIR";

/// Overrides the idle window (humantime syntax, e.g. `3s`, `500ms`).
pub const IDLE_WINDOW_ENV: &str = "DAYPAGE_IDLE_WINDOW";

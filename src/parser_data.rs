use super::types::{App, BrowserName};

// ---------------------------------------------------------------------------
// Internal data structs carried inside RuleSet<T> / MarkerSet<T>
// ---------------------------------------------------------------------------

pub(crate) struct BrowserData {
    pub name: BrowserName,
}

pub(crate) struct AppData {
    pub app: App,
}

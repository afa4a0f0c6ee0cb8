use indexmap::IndexMap;
use serde::Deserialize;

// ---------------------------------------------------------------------------
// Browsers  (regexes/browsers.yml)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub(crate) struct BrowserEntry {
    pub regex: String,
    pub name: String,
    #[serde(default)]
    pub exclude: Option<String>,
    #[serde(default)]
    pub ignore_case: bool,
}

// ---------------------------------------------------------------------------
// Apps  (regexes/apps.yml)
//
// Format: top-level mapping  app_name → AppEntry
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub(crate) struct AppEntry {
    pub markers: Vec<String>,
    #[serde(default)]
    pub bridge_markers: Vec<String>,
}

/// Raw deserialization target for apps.yml.
/// Uses IndexMap to preserve YAML insertion order (first-match-wins).
pub(crate) type AppMap = IndexMap<String, AppEntry>;

pub(crate) const BUILTIN_BROWSERS: &str = include_str!("../regexes/browsers.yml");
pub(crate) const BUILTIN_APPS: &str = include_str!("../regexes/apps.yml");

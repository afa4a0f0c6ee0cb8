use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BrowserName {
    #[serde(rename = "Internet Explorer")]
    InternetExplorer,
    #[serde(rename = "Microsoft Edge")]
    Edge,
    #[serde(rename = "Google Chrome")]
    Chrome,
    #[serde(rename = "Mozilla Firefox")]
    Firefox,
    #[serde(rename = "Safari")]
    Safari,
    #[serde(rename = "Opera")]
    Opera,
    #[serde(rename = "Chromium")]
    Chromium,
    #[default]
    #[serde(rename = "Unknown")]
    Unknown,
}

impl BrowserName {
    /// Accepts the display name used in rule files, or the short vendor name.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "internet explorer" | "ie" => Some(Self::InternetExplorer),
            "microsoft edge" | "edge" => Some(Self::Edge),
            "google chrome" | "chrome" => Some(Self::Chrome),
            "mozilla firefox" | "firefox" => Some(Self::Firefox),
            "safari" => Some(Self::Safari),
            "opera" => Some(Self::Opera),
            "chromium" => Some(Self::Chromium),
            "unknown" => Some(Self::Unknown),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InternetExplorer => "Internet Explorer",
            Self::Edge => "Microsoft Edge",
            Self::Chrome => "Google Chrome",
            Self::Firefox => "Mozilla Firefox",
            Self::Safari => "Safari",
            Self::Opera => "Opera",
            Self::Chromium => "Chromium",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for BrowserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

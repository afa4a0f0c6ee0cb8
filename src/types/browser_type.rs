use super::App;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether the page runs in a standalone browser or inside a host app's WebView.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BrowserType {
    #[default]
    #[serde(rename = "standard")]
    Standard,
    #[serde(rename = "embedded")]
    Embedded,
    #[serde(rename = "embedded-facebook")]
    EmbeddedFacebook,
    #[serde(rename = "embedded-instagram")]
    EmbeddedInstagram,
    #[serde(rename = "embedded-twitter")]
    EmbeddedTwitter,
    #[serde(rename = "embedded-linkedin")]
    EmbeddedLinkedIn,
}

impl BrowserType {
    /// Embedded browser type for a WebView hosted by `app`, or the generic
    /// embedded type when the host app is unknown.
    pub fn embedded_in(app: Option<App>) -> Self {
        match app {
            Some(App::Facebook) => Self::EmbeddedFacebook,
            Some(App::Instagram) => Self::EmbeddedInstagram,
            Some(App::Twitter) => Self::EmbeddedTwitter,
            Some(App::LinkedIn) => Self::EmbeddedLinkedIn,
            None => Self::Embedded,
        }
    }

    pub fn is_embedded(&self) -> bool {
        !matches!(self, Self::Standard)
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "standard" => Some(Self::Standard),
            "embedded" => Some(Self::Embedded),
            "embedded-facebook" => Some(Self::EmbeddedFacebook),
            "embedded-instagram" => Some(Self::EmbeddedInstagram),
            "embedded-twitter" => Some(Self::EmbeddedTwitter),
            "embedded-linkedin" => Some(Self::EmbeddedLinkedIn),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Embedded => "embedded",
            Self::EmbeddedFacebook => "embedded-facebook",
            Self::EmbeddedInstagram => "embedded-instagram",
            Self::EmbeddedTwitter => "embedded-twitter",
            Self::EmbeddedLinkedIn => "embedded-linkedin",
        }
    }
}

impl fmt::Display for BrowserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

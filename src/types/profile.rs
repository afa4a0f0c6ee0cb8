use super::{App, BrowserName, BrowserType};
use serde::{Deserialize, Serialize};

/// Classification result for one set of [`PlatformSignals`](super::PlatformSignals).
///
/// Serializes to the camelCase shape browser front-ends expect, e.g.
/// `{"userAgent": ..., "browserType": "embedded-facebook", "platform": {"isIOS": true, ...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentProfile {
    pub user_agent: String,
    pub browser_name: BrowserName,
    pub browser_type: BrowserType,
    pub is_embedded: bool,
    pub platform: PlatformFlags,
    pub apps: AppFlags,
    pub details: WebViewEvidence,
}

impl EnvironmentProfile {
    /// "Mobile" or "Desktop".
    pub fn device_label(&self) -> &'static str {
        if self.platform.is_mobile {
            "Mobile"
        } else {
            "Desktop"
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformFlags {
    #[serde(rename = "isAndroid")]
    pub is_android: bool,
    #[serde(rename = "isIOS")]
    pub is_ios: bool,
    #[serde(rename = "isMobile")]
    pub is_mobile: bool,
}

/// Which host apps the user agent mentions, regardless of WebView evidence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppFlags {
    #[serde(rename = "isFacebook")]
    pub is_facebook: bool,
    #[serde(rename = "isInstagram")]
    pub is_instagram: bool,
    #[serde(rename = "isTwitter")]
    pub is_twitter: bool,
    #[serde(rename = "isLinkedIn")]
    pub is_linkedin: bool,
}

impl AppFlags {
    pub(crate) fn set(&mut self, app: App) {
        match app {
            App::Facebook => self.is_facebook = true,
            App::Instagram => self.is_instagram = true,
            App::Twitter => self.is_twitter = true,
            App::LinkedIn => self.is_linkedin = true,
        }
    }

    pub fn contains(&self, app: App) -> bool {
        match app {
            App::Facebook => self.is_facebook,
            App::Instagram => self.is_instagram,
            App::Twitter => self.is_twitter,
            App::LinkedIn => self.is_linkedin,
        }
    }
}

/// The individual pieces of evidence behind `is_embedded`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebViewEvidence {
    #[serde(rename = "isAndroidWebView")]
    pub is_android_webview: bool,
    #[serde(rename = "isIOSWebView")]
    pub is_ios_webview: bool,
    #[serde(rename = "hasWebViewBridge")]
    pub has_webview_bridge: bool,
}

impl WebViewEvidence {
    pub fn any(&self) -> bool {
        self.is_android_webview || self.is_ios_webview || self.has_webview_bridge
    }
}

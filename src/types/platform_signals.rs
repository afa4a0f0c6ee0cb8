/// Raw client-side signals the classifier works from.
///
/// Everything here is supplied by the caller and treated as untrusted. A signal
/// that could not be observed stays at its `Default` (empty / `false` / `None`),
/// which classification maps to "no evidence".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlatformSignals {
    /// The `User-Agent` string.
    pub user_agent: String,
    /// Platform name as reported by the browser (`navigator.platform`).
    pub platform: Option<String>,
    /// Maximum simultaneous touch points (`navigator.maxTouchPoints`).
    pub max_touch_points: u32,
    /// iOS home-screen "standalone" display flag; `None` when not exposed.
    pub standalone: Option<bool>,
    /// Bridge objects injected into the page by a host app.
    pub bridges: WebViewBridges,
    /// A cross-frame messaging primitive (`window.postMessage`) is available.
    pub has_post_message: bool,
}

/// Presence of the named bridge objects host apps inject into their WebViews.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WebViewBridges {
    /// `window.webkit.messageHandlers` (WKWebView script message handlers).
    pub message_handlers: bool,
    /// `window.ReactNativeWebView`.
    pub react_native: bool,
    /// `window.AndroidBridge`.
    pub android: bool,
    /// `window.nativeBridge`.
    pub native: bool,
}

impl WebViewBridges {
    pub fn any(&self) -> bool {
        self.message_handlers || self.react_native || self.android || self.native
    }
}

impl PlatformSignals {
    /// Signals consisting of a user agent only.
    pub fn new(user_agent: impl Into<String>) -> Self {
        Self {
            user_agent: user_agent.into(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_platform(mut self, platform: impl Into<String>) -> Self {
        self.platform = Some(platform.into());
        self
    }

    #[must_use]
    pub fn with_max_touch_points(mut self, points: u32) -> Self {
        self.max_touch_points = points;
        self
    }

    #[must_use]
    pub fn with_standalone(mut self, standalone: bool) -> Self {
        self.standalone = Some(standalone);
        self
    }

    #[must_use]
    pub fn with_bridges(mut self, bridges: WebViewBridges) -> Self {
        self.bridges = bridges;
        self
    }

    #[must_use]
    pub fn with_post_message(mut self, available: bool) -> Self {
        self.has_post_message = available;
        self
    }
}

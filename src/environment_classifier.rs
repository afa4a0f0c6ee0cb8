use super::db;
use super::error::{Error, Result};
use super::helpers::contains_any;
use super::markers::MarkerSet;
use super::parser::{RulePattern, RuleSet};
use super::parser_data::*;
use super::types::*;
use rayon::prelude::*;
use std::path::Path;

/// Platform name iPadOS reports in desktop mode.
const IPADOS_DESKTOP_PLATFORM: &str = "MacIntel";

pub struct EnvironmentClassifier {
    browser_parser: RuleSet<BrowserData>,
    /// App markers deciding the embedded browser type (case-sensitive).
    embedded_app_markers: MarkerSet<AppData>,
    /// The same markers for the independent app flags (ASCII case-insensitive).
    app_flag_markers: MarkerSet<AppData>,
    /// Markers that count as bridge evidence when `postMessage` is available.
    bridge_markers: MarkerSet<AppData>,
}

impl EnvironmentClassifier {
    /// Build the classifier from the rules compiled into the crate.
    pub fn new() -> Result<Self> {
        Self::from_yaml(db::BUILTIN_BROWSERS, db::BUILTIN_APPS)
    }

    /// Load `browsers.yml` and `apps.yml` from `dir` and build the classifier.
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let browsers = std::fs::read_to_string(dir.join("browsers.yml"))?;
        let apps = std::fs::read_to_string(dir.join("apps.yml"))?;
        Self::from_yaml(&browsers, &apps)
    }

    /// Build the classifier from the text of a browser rule file and an app
    /// marker file.
    pub fn from_yaml(browsers: &str, apps: &str) -> Result<Self> {
        let browsers: Vec<db::BrowserEntry> = serde_yaml::from_str(browsers)?;
        let browser_items = browsers
            .into_iter()
            .map(|b| -> Result<_> {
                let name = BrowserName::from_str(&b.name).ok_or(Error::UnknownBrowser(b.name))?;
                Ok((
                    RulePattern {
                        regex: b.regex,
                        exclude: b.exclude,
                        ignore_case: b.ignore_case,
                    },
                    BrowserData { name },
                ))
            })
            .collect::<Result<Vec<_>>>()?;
        let browser_parser = RuleSet::build(browser_items)?;

        let apps: db::AppMap = serde_yaml::from_str(apps)?;
        let apps = apps
            .into_iter()
            .map(|(key, entry)| -> Result<_> {
                let app = App::from_str(&key).ok_or(Error::UnknownApp(key))?;
                Ok((app, entry))
            })
            .collect::<Result<Vec<_>>>()?;

        let markers = |select: fn(&db::AppEntry) -> &Vec<String>| {
            apps.iter()
                .map(|(app, entry)| (select(entry).clone(), AppData { app: *app }))
                .collect::<Vec<_>>()
        };
        let embedded_app_markers = MarkerSet::build(markers(|e| &e.markers), false)?;
        let app_flag_markers = MarkerSet::build(markers(|e| &e.markers), true)?;
        let bridge_markers = MarkerSet::build(markers(|e| &e.bridge_markers), false)?;

        tracing::debug!(
            browsers = browser_parser.len(),
            apps = apps.len(),
            "environment classifier ready"
        );

        Ok(Self {
            browser_parser,
            embedded_app_markers,
            app_flag_markers,
            bridge_markers,
        })
    }

    /// Classify one set of platform signals.
    ///
    /// Total: empty or garbage input yields a profile with every flag `false`,
    /// `BrowserName::Unknown` and `BrowserType::Standard`.
    pub fn classify(&self, signals: &PlatformSignals) -> EnvironmentProfile {
        let ua = signals.user_agent.as_str();
        let lower = ua.to_lowercase();

        // 1-3. Platform
        let is_ios = is_ios(&lower, signals);
        let is_android = lower.contains("android");
        let is_mobile = is_android || is_ios || lower.contains("mobile");

        // 4-7. WebView evidence
        let details = WebViewEvidence {
            is_android_webview: lower.contains("android") && lower.contains("wv"),
            is_ios_webview: is_ios && is_ios_webview(&lower, signals),
            has_webview_bridge: self.has_webview_bridge(ua, signals),
        };
        let is_embedded = details.any();

        // 8. Browser name
        let browser_name = self
            .browser_parser
            .match_first(ua)
            .map(|b| b.name)
            .unwrap_or_default();

        // 9. Browser type
        let browser_type = if is_embedded {
            BrowserType::embedded_in(self.embedded_app_markers.first(ua).map(|a| a.app))
        } else {
            BrowserType::Standard
        };

        // 10. App flags, independent of the embedded verdict
        let mut apps = AppFlags::default();
        for a in self.app_flag_markers.all(ua) {
            apps.set(a.app);
        }

        tracing::trace!(
            browser = %browser_name,
            browser_type = %browser_type,
            is_mobile,
            ?details,
            "classified user agent"
        );

        EnvironmentProfile {
            user_agent: ua.to_owned(),
            browser_name,
            browser_type,
            is_embedded,
            platform: PlatformFlags {
                is_android,
                is_ios,
                is_mobile,
            },
            apps,
            details,
        }
    }

    /// Classify many signal sets in parallel. Output order matches input order.
    pub fn classify_many(&self, signals: &[PlatformSignals]) -> Vec<EnvironmentProfile> {
        signals.par_iter().map(|s| self.classify(s)).collect()
    }

    fn has_webview_bridge(&self, ua: &str, signals: &PlatformSignals) -> bool {
        signals.bridges.any() || (signals.has_post_message && self.bridge_markers.is_match(ua))
    }
}

fn is_ios(lower_ua: &str, signals: &PlatformSignals) -> bool {
    contains_any(lower_ua, &["iphone", "ipad", "ipod"])
        || (signals.platform.as_deref() == Some(IPADOS_DESKTOP_PLATFORM)
            && signals.max_touch_points > 1)
}

/// iOS WebViews usually drop the `Safari` token and never expose the
/// standalone flag. Third-party iOS browsers (CriOS, FxiOS builds without
/// `Safari`) look the same and are reported as WebViews too.
fn is_ios_webview(lower_ua: &str, signals: &PlatformSignals) -> bool {
    !signals.standalone.unwrap_or(false) && !lower_ua.contains("safari")
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHROME_DESKTOP: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/100.0.4896.127 Safari/537.36";
    const ANDROID_WV: &str = "Mozilla/5.0 (Linux; Android 10; K; wv) AppleWebKit/537.36 (KHTML, like Gecko) Version/4.0 Chrome/90.0.4430.91 Mobile Safari/537.36";
    const IPHONE_SAFARI: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 15_0 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/15.0 Mobile/15E148 Safari/604.1";

    fn classifier() -> EnvironmentClassifier {
        EnvironmentClassifier::new().unwrap()
    }

    fn classify(signals: PlatformSignals) -> EnvironmentProfile {
        classifier().classify(&signals)
    }

    #[test]
    fn chrome_is_not_safari() {
        let p = classify(PlatformSignals::new(CHROME_DESKTOP));
        assert_eq!(p.browser_name, BrowserName::Chrome);
        assert_eq!(p.browser_type, BrowserType::Standard);
        assert!(!p.platform.is_mobile);
        assert_eq!(p.device_label(), "Desktop");
    }

    #[test]
    fn android_wv_token() {
        let p = classify(PlatformSignals::new(ANDROID_WV));
        assert!(p.details.is_android_webview);
        assert!(p.is_embedded);
        assert_eq!(p.browser_type, BrowserType::Embedded);
        assert!(p.platform.is_android && p.platform.is_mobile);
    }

    #[test]
    fn wv_and_android_are_independent_substrings() {
        // "wv" anywhere counts, not only as a `; wv)` token.
        let p = classify(PlatformSignals::new("Mozilla/5.0 (Linux; Android 9) WVBrowser"));
        assert!(p.details.is_android_webview);
    }

    #[test]
    fn facebook_webview() {
        let ua = format!("{ANDROID_WV} [FBAN/EMA;FBLC/en_US;FBAV/239.0.0.10.109;]");
        let p = classify(PlatformSignals::new(ua));
        assert_eq!(p.browser_type, BrowserType::EmbeddedFacebook);
        assert!(p.apps.is_facebook);
    }

    #[test]
    fn app_marker_without_webview_evidence_stays_standard() {
        let ua = format!("{CHROME_DESKTOP} Instagram");
        let p = classify(PlatformSignals::new(ua));
        assert_eq!(p.browser_type, BrowserType::Standard);
        assert!(p.apps.is_instagram);
        assert!(!p.is_embedded);
    }

    #[test]
    fn iphone_safari_is_not_a_webview() {
        let p = classify(PlatformSignals::new(IPHONE_SAFARI).with_standalone(false));
        assert!(p.platform.is_ios);
        assert!(!p.details.is_ios_webview);
        assert_eq!(p.browser_name, BrowserName::Safari);
    }

    #[test]
    fn ios_without_safari_token_is_a_webview() {
        let ua = "Mozilla/5.0 (iPhone; CPU iPhone OS 15_0 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Mobile/15E148";
        let p = classify(PlatformSignals::new(ua));
        assert!(p.details.is_ios_webview);
        assert_eq!(p.browser_type, BrowserType::Embedded);

        let home_screen = classify(PlatformSignals::new(ua).with_standalone(true));
        assert!(!home_screen.details.is_ios_webview);
        assert!(!home_screen.is_embedded);
    }

    #[test]
    fn ipados_desktop_mode() {
        let ua = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/16.0 Safari/605.1.15";
        let touch = classify(
            PlatformSignals::new(ua)
                .with_platform("MacIntel")
                .with_max_touch_points(5),
        );
        assert!(touch.platform.is_ios && touch.platform.is_mobile);

        let mac = classify(
            PlatformSignals::new(ua)
                .with_platform("MacIntel")
                .with_max_touch_points(1),
        );
        assert!(!mac.platform.is_ios);
    }

    #[test]
    fn bridge_objects() {
        let p = classify(PlatformSignals::new(CHROME_DESKTOP).with_bridges(WebViewBridges {
            react_native: true,
            ..Default::default()
        }));
        assert!(p.details.has_webview_bridge);
        assert_eq!(p.browser_type, BrowserType::Embedded);
    }

    #[test]
    fn post_message_needs_bridge_marker() {
        let plain = classify(PlatformSignals::new(CHROME_DESKTOP).with_post_message(true));
        assert!(!plain.details.has_webview_bridge);

        // "LinkedIn" alone is an app marker but not a bridge marker.
        let linkedin = classify(
            PlatformSignals::new(format!("{CHROME_DESKTOP} LinkedIn")).with_post_message(true),
        );
        assert!(!linkedin.details.has_webview_bridge);
        assert!(linkedin.apps.is_linkedin);

        let app = classify(
            PlatformSignals::new(format!("{CHROME_DESKTOP} LinkedInApp")).with_post_message(true),
        );
        assert!(app.details.has_webview_bridge);
        assert_eq!(app.browser_type, BrowserType::EmbeddedLinkedIn);

        let lower = classify(
            PlatformSignals::new(format!("{CHROME_DESKTOP} instagram fban")).with_post_message(true),
        );
        assert!(!lower.details.has_webview_bridge);
        assert_eq!(lower.browser_type, BrowserType::Standard);
        assert!(lower.apps.is_instagram && lower.apps.is_facebook);
    }

    #[test]
    fn browser_names_ignore_case() {
        let seamonkey = classify(PlatformSignals::new(
            "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:91.0) Gecko/20100101 Firefox/91.0 SeaMonkey/2.53.18",
        ));
        assert_eq!(seamonkey.browser_name, BrowserName::Unknown);

        let lower = classify(PlatformSignals::new(CHROME_DESKTOP.to_lowercase()));
        assert_eq!(lower.browser_name, BrowserName::Chrome);
    }

    #[test]
    fn app_flags_ignore_case_but_browser_type_does_not() {
        let ua = format!("{ANDROID_WV} twitter");
        let p = classify(PlatformSignals::new(ua));
        assert!(p.apps.is_twitter);
        assert_eq!(p.browser_type, BrowserType::Embedded);
    }

    #[test]
    fn empty_and_junk_input() {
        let long = "x".repeat(10_000);
        for ua in ["", "\u{0}\u{1}\u{fffd}", "🙂🙂🙂", long.as_str()] {
            let p = classify(PlatformSignals::new(ua));
            assert_eq!(p.browser_name, BrowserName::Unknown);
            assert_eq!(p.browser_type, BrowserType::Standard);
            assert!(!p.is_embedded);
            assert_eq!(p.platform, PlatformFlags::default());
            assert_eq!(p.apps, AppFlags::default());
            assert_eq!(p.details, WebViewEvidence::default());
        }
    }

    #[test]
    fn embedded_invariant() {
        let c = classifier();
        let inputs = [
            PlatformSignals::new(CHROME_DESKTOP),
            PlatformSignals::new(ANDROID_WV),
            PlatformSignals::new(IPHONE_SAFARI),
            PlatformSignals::new("Mozilla/5.0 (iPad; CPU OS 16_0) Instagram"),
        ];
        for p in c.classify_many(&inputs) {
            assert_eq!(p.is_embedded, p.details.any());
            assert_eq!(p.is_embedded, p.browser_type.is_embedded());
        }
    }

    #[test]
    fn classify_many_keeps_order() {
        let c = classifier();
        let inputs: Vec<_> = [CHROME_DESKTOP, ANDROID_WV, IPHONE_SAFARI]
            .into_iter()
            .map(PlatformSignals::new)
            .collect();
        let uas: Vec<String> = c
            .classify_many(&inputs)
            .into_iter()
            .map(|p| p.user_agent)
            .collect();
        assert_eq!(uas, vec![CHROME_DESKTOP, ANDROID_WV, IPHONE_SAFARI]);
    }

    #[test]
    fn custom_rules() {
        let c = EnvironmentClassifier::from_yaml(
            "- regex: 'opr'\n  name: Opera\n  ignore_case: true\n",
            "instagram:\n  markers: ['Instagram']\n",
        )
        .unwrap();
        let p = c.classify(&PlatformSignals::new("Mozilla/5.0 Chrome/100 opr/86"));
        assert_eq!(p.browser_name, BrowserName::Opera);
    }

    #[test]
    fn unknown_names_in_rules_are_errors() {
        let browser = EnvironmentClassifier::from_yaml("- regex: 'x'\n  name: Netscape\n", "{}");
        assert!(matches!(browser, Err(Error::UnknownBrowser(_))));

        let app = EnvironmentClassifier::from_yaml("[]", "myspace:\n  markers: ['MySpace']\n");
        assert!(matches!(app, Err(Error::UnknownApp(_))));
    }
}
